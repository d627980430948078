use alloy_primitives::U256;

pub fn parse_hex<const N: usize>(s: &str) -> Result<[u8; N], String> {
    let ss = s
        .strip_prefix("0x")
        .ok_or_else(|| "missing 0x prefix".to_string())?;
    if ss.len() != N * 2 {
        return Err(format!("expected {} hex chars, got {}", N * 2, ss.len()));
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(ss, &mut out).map_err(|_| "invalid hex".to_string())?;
    Ok(out)
}

/// Variable-length `0x` hex, e.g. signatures.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, String> {
    let ss = s
        .strip_prefix("0x")
        .ok_or_else(|| "missing 0x prefix".to_string())?;
    hex::decode(ss).map_err(|_| "invalid hex".to_string())
}

pub fn hex0x(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn to_u256(s: &str) -> Result<U256, String> {
    U256::from_str_radix(s, 10).map_err(|_| "invalid u256".to_string())
}

pub fn to_u64(s: &str) -> Result<u64, String> {
    s.parse().map_err(|_| "invalid u64".to_string())
}
