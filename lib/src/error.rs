use thiserror::Error;

pub type AirdropResult<T> = Result<T, AirdropError>;

/// Rejection reasons for airdrop operations. A rejected operation leaves no
/// state behind; callers branch on [`AirdropError::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AirdropError {
    #[error("recipient has already claimed")]
    AlreadyClaimed,

    #[error("caller is not the recipient")]
    InvalidSender,

    #[error("signature claims are disabled")]
    SignaturesDisabled,

    #[error("signature was not produced by the configured signer")]
    InvalidSigner,

    #[error("leaf does not match keccak256(recipient, amount)")]
    InvalidLeaf,

    #[error("merkle proof does not reach the configured root")]
    InvalidMerkleRoot,

    #[error("token transfer reported failure")]
    TransferFailed,

    #[error("caller is not the owner")]
    Unauthorized,

    #[error("token does not match the configured token reference")]
    WrongToken,

    #[error("new owner is the zero address")]
    InvalidOwner,
}

impl AirdropError {
    /// Stable identifier, identical to the variant name.
    pub fn code(&self) -> &'static str {
        match self {
            AirdropError::AlreadyClaimed => "AlreadyClaimed",
            AirdropError::InvalidSender => "InvalidSender",
            AirdropError::SignaturesDisabled => "SignaturesDisabled",
            AirdropError::InvalidSigner => "InvalidSigner",
            AirdropError::InvalidLeaf => "InvalidLeaf",
            AirdropError::InvalidMerkleRoot => "InvalidMerkleRoot",
            AirdropError::TransferFailed => "TransferFailed",
            AirdropError::Unauthorized => "Unauthorized",
            AirdropError::WrongToken => "WrongToken",
            AirdropError::InvalidOwner => "InvalidOwner",
        }
    }
}
