use crate::airdrop::DeployEnv;
use crate::scenario::{Call, Deployment, Scenario};
use crate::util::{hex0x, parse_hex, parse_hex_bytes, to_u256, to_u64};

pub mod json {
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DeploymentJson {
        pub chain_id: String,
        pub contract: String,
        pub deployer: String,
        pub merkle_root: String,
        pub signer: String,
        pub token: String,
        pub funding: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(tag = "kind", rename_all = "camelCase")]
    pub enum CallJson {
        #[serde(rename_all = "camelCase")]
        SignatureClaim { caller: String, recipient: String, amount: String, signature: String },
        #[serde(rename_all = "camelCase")]
        MerkleClaim { caller: String, recipient: String, amount: String, leaf: String, proof: Vec<String> },
        #[serde(rename_all = "camelCase")]
        DisableSignatures { caller: String },
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ScenarioJson {
        pub deployment: DeploymentJson,
        pub calls: Vec<CallJson>,
    }
}

use json::{CallJson, DeploymentJson, ScenarioJson};

pub fn deployment_to_native(j: &DeploymentJson) -> Result<Deployment, String> {
    Ok(Deployment {
        env: DeployEnv {
            chain_id: to_u64(&j.chain_id)?,
            contract: parse_hex(&j.contract)?,
            deployer: parse_hex(&j.deployer)?,
        },
        merkle_root: parse_hex(&j.merkle_root)?,
        signer: parse_hex(&j.signer)?,
        token: parse_hex(&j.token)?,
        funding: to_u256(&j.funding)?,
    })
}

pub fn call_to_native(j: &CallJson) -> Result<Call, String> {
    Ok(match j {
        CallJson::SignatureClaim { caller, recipient, amount, signature } => Call::SignatureClaim {
            caller: parse_hex(caller)?,
            recipient: parse_hex(recipient)?,
            amount: to_u256(amount)?,
            signature: parse_hex_bytes(signature)?,
        },
        CallJson::MerkleClaim { caller, recipient, amount, leaf, proof } => Call::MerkleClaim {
            caller: parse_hex(caller)?,
            recipient: parse_hex(recipient)?,
            amount: to_u256(amount)?,
            leaf: parse_hex(leaf)?,
            proof: proof.iter().map(|p| parse_hex(p)).collect::<Result<Vec<_>, _>>()?,
        },
        CallJson::DisableSignatures { caller } => Call::DisableSignatures { caller: parse_hex(caller)? },
    })
}

pub fn scenario_to_native(j: &ScenarioJson) -> Result<Scenario, String> {
    let deployment = deployment_to_native(&j.deployment)?;
    let calls = j
        .calls
        .iter()
        .enumerate()
        .map(|(i, c)| call_to_native(c).map_err(|e| format!("call {}: {}", i, e)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Scenario { deployment, calls })
}

pub fn scenario_to_json(s: &Scenario) -> ScenarioJson {
    let d = &s.deployment;
    let deployment = DeploymentJson {
        chain_id: d.env.chain_id.to_string(),
        contract: hex0x(d.env.contract),
        deployer: hex0x(d.env.deployer),
        merkle_root: hex0x(d.merkle_root),
        signer: hex0x(d.signer),
        token: hex0x(d.token),
        funding: d.funding.to_string(),
    };
    let calls = s
        .calls
        .iter()
        .map(|c| match c {
            Call::SignatureClaim { caller, recipient, amount, signature } => CallJson::SignatureClaim {
                caller: hex0x(caller),
                recipient: hex0x(recipient),
                amount: amount.to_string(),
                signature: hex0x(signature),
            },
            Call::MerkleClaim { caller, recipient, amount, leaf, proof } => CallJson::MerkleClaim {
                caller: hex0x(caller),
                recipient: hex0x(recipient),
                amount: amount.to_string(),
                leaf: hex0x(leaf),
                proof: proof.iter().map(hex0x).collect(),
            },
            Call::DisableSignatures { caller } => CallJson::DisableSignatures { caller: hex0x(caller) },
        })
        .collect();
    ScenarioJson { deployment, calls }
}
