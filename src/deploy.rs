use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use serde::Deserialize;

use crate::config::DeployArgs;
use crate::data::catalog::PRODUCT_IDS;
use crate::data::contract::StoreContract;
use crate::data::provider::ChainProvider;
use crate::data::types::ChainConfig;
use crate::data::verify::{CodeFormat, ExplorerClient, VerificationRequest, VerificationStatus};
use crate::utils;

const VERIFY_POLL_INTERVAL: Duration = Duration::from_secs(5);
const VERIFY_ATTEMPTS: usize = 12;

/// The parts of a Hardhat build artifact needed to deploy and verify.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub bytecode: Bytes,
}

impl Artifact {
    /// "contracts/JengawizeStore.sol:JengawizeStore"
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }
}

pub fn parse_artifact(json: &str) -> Result<Artifact> {
    let artifact: Artifact = serde_json::from_str(json).wrap_err("Malformed Hardhat artifact")?;
    if artifact.bytecode.is_empty() {
        bail!("Artifact {} has no bytecode (abstract contract?)", artifact.contract_name);
    }
    Ok(artifact)
}

fn load_artifact(path: &Path) -> Result<Artifact> {
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Cannot read artifact {}", path.display()))?;
    parse_artifact(&json)
}

/// Compiler run that produced an artifact (`artifacts/build-info/<hash>.json`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// e.g. "0.8.20+commit.a1b79de6"
    pub solc_long_version: String,
    /// solc standard JSON input: sources plus optimizer settings.
    pub input: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    build_info: PathBuf,
}

pub fn parse_build_info(json: &str) -> Result<BuildInfo> {
    let info: BuildInfo = serde_json::from_str(json).wrap_err("Malformed Hardhat build-info")?;
    if !info.input.get("sources").is_some_and(|s| s.is_object()) {
        bail!("Build-info input carries no sources");
    }
    Ok(info)
}

/// Follow `<artifact>.dbg.json` to the build-info it points at.
fn build_info_path(artifact_path: &Path) -> Result<PathBuf> {
    let dbg_path = artifact_path.with_extension("dbg.json");
    let json = std::fs::read_to_string(&dbg_path)
        .wrap_err_with(|| format!("Cannot read {}", dbg_path.display()))?;
    let dbg: DebugFile = serde_json::from_str(&json)
        .wrap_err_with(|| format!("Malformed {}", dbg_path.display()))?;
    let dir = dbg_path.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(dbg.build_info))
}

fn load_build_info(artifact_path: &Path) -> Result<BuildInfo> {
    let path = build_info_path(artifact_path)?;
    let json = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("Cannot read build-info {}", path.display()))?;
    parse_build_info(&json)
}

/// Verify the exact compiler input Hardhat used. CLI flags override the
/// recorded compiler version and optimizer runs.
pub fn standard_json_request(
    args: &DeployArgs,
    artifact: &Artifact,
    build_info: BuildInfo,
    address: Address,
) -> Result<VerificationRequest> {
    let mut input = build_info.input;
    if let Some(runs) = args.optimizer_runs {
        let settings = input
            .as_object_mut()
            .ok_or_else(|| eyre!("Build-info input is not an object"))?
            .entry("settings")
            .or_insert_with(|| serde_json::json!({}))
            .as_object_mut()
            .ok_or_else(|| eyre!("Build-info settings are not an object"))?;
        settings.insert(
            "optimizer".to_string(),
            serde_json::json!({ "enabled": true, "runs": runs }),
        );
    }

    Ok(VerificationRequest {
        address,
        code_format: CodeFormat::StandardJsonInput,
        source_code: serde_json::to_string(&input)?,
        contract_name: artifact.qualified_name(),
        compiler_version: args
            .compiler_version
            .clone()
            .unwrap_or_else(|| format!("v{}", build_info.solc_long_version)),
        optimizer_runs: None,
        constructor_args: Bytes::new(),
    })
}

fn single_file_request(
    args: &DeployArgs,
    artifact: &Artifact,
    source_code: String,
    address: Address,
) -> Result<VerificationRequest> {
    let compiler_version = args
        .compiler_version
        .clone()
        .ok_or_else(|| eyre!("--compiler-version is required with --source"))?;
    Ok(VerificationRequest {
        address,
        code_format: CodeFormat::SingleFile,
        source_code,
        contract_name: artifact.contract_name.clone(),
        compiler_version,
        optimizer_runs: args.optimizer_runs,
        constructor_args: Bytes::new(),
    })
}

/// Deploy the store, wait for confirmations, then ask the explorer to verify it.
/// Only deployment errors are fatal.
pub async fn run(
    args: &DeployArgs,
    chain: &ChainConfig,
    rpc_url: &str,
    private_key: Option<&str>,
) -> Result<()> {
    let artifact = load_artifact(&args.artifact)?;

    let signer: PrivateKeySigner = private_key
        .ok_or_else(|| eyre!("PRIVATE_KEY is required to deploy"))?
        .trim()
        .parse()
        .wrap_err("PRIVATE_KEY is not a valid secp256k1 key")?;
    let deployer = signer.address();

    let node = ChainProvider::connect_with_signer(rpc_url, signer).await?;
    tracing::info!(chain = %chain.name, chain_id = node.chain_id(), %deployer, "deploying {}", artifact.contract_name);

    let address = deploy(&node, &artifact, args.confirmations).await?;
    tracing::info!("{} deployed to: {address}", artifact.contract_name);

    log_seeded_products(&node, address).await;

    match verify(args, chain, &artifact, address).await {
        Ok(VerificationStatus::Verified) => tracing::info!("Contract verified successfully"),
        Ok(VerificationStatus::Pending) => {
            tracing::warn!("Verification still pending, check the explorer later")
        }
        Ok(VerificationStatus::Failed(reason)) => {
            tracing::error!(%reason, "Error verifying contract")
        }
        Err(e) => tracing::error!(error = %format!("{e:#}"), "Error verifying contract"),
    }

    Ok(())
}

async fn deploy(node: &ChainProvider, artifact: &Artifact, confirmations: u64) -> Result<Address> {
    let tx = TransactionRequest::default().with_deploy_code(artifact.bytecode.clone());
    let pending = node
        .handle()
        .send_transaction(tx)
        .await
        .wrap_err("Deployment transaction was rejected")?;
    tracing::info!(tx_hash = %pending.tx_hash(), "Waiting for {confirmations} block confirmations...");

    let receipt = pending
        .with_required_confirmations(confirmations)
        .get_receipt()
        .await
        .wrap_err("Deployment transaction was not confirmed")?;
    if !receipt.status() {
        bail!("Deployment reverted in {}", receipt.transaction_hash);
    }
    receipt
        .contract_address
        .ok_or_else(|| eyre!("Receipt {} carries no contract address", receipt.transaction_hash))
}

/// Read the constructor-seeded catalog back. Failures only warn.
async fn log_seeded_products(node: &ChainProvider, address: Address) {
    let store = StoreContract::at(node.handle(), address);
    for id in PRODUCT_IDS {
        match store.products(U256::from(id)).await {
            Ok(product) if product.exists() => tracing::info!(
                id,
                name = %product.name,
                price = %utils::format_price(product.price),
                active = product.is_active,
                "seeded product"
            ),
            Ok(_) => tracing::info!(id, "no product seeded"),
            Err(e) => {
                tracing::warn!(id, error = %e, "could not read seeded product");
                return;
            }
        }
    }
}

async fn verify(
    args: &DeployArgs,
    chain: &ChainConfig,
    artifact: &Artifact,
    address: Address,
) -> Result<VerificationStatus> {
    let Some(api_url) = chain.explorer_api_url.as_deref() else {
        bail!("{} has no explorer to verify against", chain.name);
    };

    let request = match &args.source {
        Some(path) => {
            let source_code = tokio::fs::read_to_string(path)
                .await
                .wrap_err_with(|| format!("Cannot read contract source {}", path.display()))?;
            single_file_request(args, artifact, source_code, address)?
        }
        None => standard_json_request(args, artifact, load_build_info(&args.artifact)?, address)?,
    };

    tracing::info!(explorer = api_url, "Verifying contract...");
    ExplorerClient::new(api_url, args.explorer_api_key.clone())
        .verify(&request, VERIFY_POLL_INTERVAL, VERIFY_ATTEMPTS)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::verify::form_fields;

    const ARTIFACT: &str = r#"{
        "_format": "hh-sol-artifact-1",
        "contractName": "JengawizeStore",
        "sourceName": "contracts/JengawizeStore.sol",
        "abi": [],
        "bytecode": "0x6080604052",
        "deployedBytecode": "0x6080",
        "linkReferences": {},
        "deployedLinkReferences": {}
    }"#;

    #[test]
    fn test_parse_hardhat_artifact() {
        let artifact = parse_artifact(ARTIFACT).unwrap();
        assert_eq!(artifact.contract_name, "JengawizeStore");
        assert_eq!(artifact.bytecode.len(), 5);
        assert_eq!(
            artifact.qualified_name(),
            "contracts/JengawizeStore.sol:JengawizeStore"
        );
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let json = ARTIFACT.replace("0x6080604052", "0x");
        let err = parse_artifact(&json).unwrap_err();
        assert!(err.to_string().contains("no bytecode"));
    }

    #[test]
    fn test_missing_artifact_file() {
        let err = load_artifact(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read artifact"));
    }

    const BUILD_INFO: &str = r#"{
        "id": "4f1c0c7e",
        "_format": "hh-sol-build-info-1",
        "solcVersion": "0.8.24",
        "solcLongVersion": "0.8.24+commit.e11b9ed9",
        "input": {
            "language": "Solidity",
            "sources": {
                "contracts/JengawizeStore.sol": {
                    "content": "import \"@openzeppelin/contracts/access/Ownable.sol\";"
                },
                "@openzeppelin/contracts/access/Ownable.sol": { "content": "abstract contract Ownable {}" }
            },
            "settings": {
                "optimizer": { "enabled": true, "runs": 200 },
                "outputSelection": { "*": { "*": ["abi"] } }
            }
        },
        "output": {}
    }"#;

    fn deploy_args() -> DeployArgs {
        DeployArgs {
            artifact: PathBuf::from("artifact.json"),
            source: None,
            compiler_version: None,
            optimizer_runs: None,
            confirmations: 5,
            explorer_api_key: None,
        }
    }

    fn field<'a>(fields: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        fields.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_build_info_becomes_standard_json_input() {
        let artifact = parse_artifact(ARTIFACT).unwrap();
        let info = parse_build_info(BUILD_INFO).unwrap();
        let request = standard_json_request(&deploy_args(), &artifact, info, Address::ZERO).unwrap();

        let fields = form_fields(&request, Some("KEY"));
        assert_eq!(field(&fields, "codeformat"), Some("solidity-standard-json-input"));
        assert_eq!(
            field(&fields, "contractname"),
            Some("contracts/JengawizeStore.sol:JengawizeStore")
        );
        assert_eq!(field(&fields, "compilerversion"), Some("v0.8.24+commit.e11b9ed9"));
        assert_eq!(field(&fields, "constructorArguements"), Some(""));
        assert_eq!(field(&fields, "optimizationUsed"), None);

        let input: serde_json::Value =
            serde_json::from_str(field(&fields, "sourceCode").unwrap()).unwrap();
        assert_eq!(input["settings"]["optimizer"]["runs"], 200);
        assert!(input["sources"]
            .get("@openzeppelin/contracts/access/Ownable.sol")
            .is_some());
    }

    #[test]
    fn test_flags_override_build_info() {
        let artifact = parse_artifact(ARTIFACT).unwrap();
        let info = parse_build_info(BUILD_INFO).unwrap();
        let mut args = deploy_args();
        args.compiler_version = Some("v0.8.24+commit.e11b9ed9.custom".into());
        args.optimizer_runs = Some(10_000);

        let request = standard_json_request(&args, &artifact, info, Address::ZERO).unwrap();
        assert_eq!(request.compiler_version, "v0.8.24+commit.e11b9ed9.custom");
        let input: serde_json::Value = serde_json::from_str(&request.source_code).unwrap();
        assert_eq!(input["settings"]["optimizer"]["runs"], 10_000);
        assert_eq!(input["settings"]["optimizer"]["enabled"], true);
    }

    #[test]
    fn test_build_info_without_sources_rejected() {
        let json = r#"{"solcLongVersion": "0.8.24+commit.e11b9ed9", "input": {}}"#;
        assert!(parse_build_info(json).is_err());
    }

    #[test]
    fn test_single_file_needs_compiler_version() {
        let artifact = parse_artifact(ARTIFACT).unwrap();
        let source = "contract JengawizeStore {}".to_string();

        let err = single_file_request(&deploy_args(), &artifact, source.clone(), Address::ZERO)
            .unwrap_err();
        assert!(err.to_string().contains("--compiler-version"));

        let mut args = deploy_args();
        args.compiler_version = Some("v0.8.24+commit.e11b9ed9".into());
        let request = single_file_request(&args, &artifact, source, Address::ZERO).unwrap();
        assert_eq!(request.code_format, CodeFormat::SingleFile);
        assert_eq!(request.contract_name, "JengawizeStore");
    }

    #[test]
    fn test_dbg_file_points_at_build_info() {
        let root = std::env::temp_dir().join(format!("jengawize-deploy-{}", std::process::id()));
        let contract_dir = root.join("contracts/JengawizeStore.sol");
        let build_dir = root.join("build-info");
        std::fs::create_dir_all(&contract_dir).unwrap();
        std::fs::create_dir_all(&build_dir).unwrap();

        let artifact_path = contract_dir.join("JengawizeStore.json");
        std::fs::write(&artifact_path, ARTIFACT).unwrap();
        std::fs::write(
            contract_dir.join("JengawizeStore.dbg.json"),
            r#"{"_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/4f1c0c7e.json"}"#,
        )
        .unwrap();
        std::fs::write(build_dir.join("4f1c0c7e.json"), BUILD_INFO).unwrap();

        let info = load_build_info(&artifact_path).unwrap();
        assert_eq!(info.solc_long_version, "0.8.24+commit.e11b9ed9");

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn test_verify_needs_explorer() {
        let artifact = parse_artifact(ARTIFACT).unwrap();
        let chain = crate::data::chains::get_chain_config("localhost").unwrap();

        let err = verify(&deploy_args(), &chain, &artifact, Address::ZERO)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no explorer"));
    }
}
