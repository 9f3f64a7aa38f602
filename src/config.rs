use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "jengawize", about = "Terminal storefront for the Jengawize building-materials store")]
pub struct Config {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Chain preset (base, base-sepolia, ethereum, sepolia, localhost)
    #[arg(long, default_value = "base", global = true)]
    pub chain: String,

    /// RPC endpoint URL, overrides the chain preset
    #[arg(short, long, env = "JENGAWIZE_RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// Wallet JSON-RPC endpoint that answers eth_requestAccounts (e.g. Frame)
    #[arg(long, env = "WALLET_RPC_URL")]
    pub wallet_url: Option<String>,

    /// Private key used to sign when no wallet endpoint is given
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true, global = true)]
    pub private_key: Option<String>,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,

    /// Where the storefront writes its log (defaults to the user data dir)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Deploy the store contract and verify it on the chain's explorer
    Deploy(DeployArgs),
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Hardhat artifact holding the contract bytecode
    #[arg(
        long,
        default_value = "artifacts/contracts/JengawizeStore.sol/JengawizeStore.json"
    )]
    pub artifact: PathBuf,

    /// Flattened Solidity file to verify instead of the Hardhat build-info
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Long solc version (e.g. v0.8.20+commit.a1b79de6); overrides the build-info,
    /// required with --source
    #[arg(long)]
    pub compiler_version: Option<String>,

    /// Optimizer runs; overrides the build-info settings
    #[arg(long)]
    pub optimizer_runs: Option<u32>,

    /// Confirmations to wait for before verifying
    #[arg(long, default_value = "5")]
    pub confirmations: u64,

    /// Explorer API key (Etherscan / BaseScan)
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub explorer_api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["jengawize"]).unwrap();
        assert!(config.command.is_none());
        assert_eq!(config.chain, "base");
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_deploy_needs_no_flags() {
        let config = Config::try_parse_from(["jengawize", "deploy"]).unwrap();
        let Some(Command::Deploy(args)) = config.command else {
            panic!("expected deploy");
        };
        assert_eq!(args.confirmations, 5);
        assert!(args.compiler_version.is_none());
        assert!(args.artifact.ends_with("JengawizeStore.json"));
    }

    #[test]
    fn test_chain_after_subcommand() {
        let config =
            Config::try_parse_from(["jengawize", "deploy", "--chain", "base-sepolia"]).unwrap();
        assert_eq!(config.chain, "base-sepolia");
    }

    #[test]
    fn test_verify_config() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
