use std::sync::Arc;

use alloy::network::EthereumWallet;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use color_eyre::eyre::{Result, WrapErr};

/// Shared, type-erased provider handle. Read-only or signing depending on
/// how it was built; the contract proxy does not care which.
pub type ProviderHandle = Arc<dyn Provider + Send + Sync>;

/// A connected node together with the chain id it reported.
pub struct ChainProvider {
    provider: ProviderHandle,
    chain_id: u64,
}

impl ChainProvider {
    /// Connect to a node via HTTP RPC without any signing capability.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        let provider = read_only(rpc_url)?;
        let chain_id = provider
            .get_chain_id()
            .await
            .wrap_err_with(|| format!("Failed to reach {rpc_url}"))?;
        Ok(Self { provider, chain_id })
    }

    /// Connect to a node via HTTP RPC, signing transactions with a local key.
    pub async fn connect_with_signer(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self> {
        let provider = signing(rpc_url, signer)?;
        let chain_id = provider
            .get_chain_id()
            .await
            .wrap_err_with(|| format!("Failed to reach {rpc_url}"))?;
        Ok(Self { provider, chain_id })
    }

    /// Return the chain ID obtained at connection time.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn handle(&self) -> ProviderHandle {
        Arc::clone(&self.provider)
    }
}

/// Build a read-only provider. Does not touch the network.
pub fn read_only(rpc_url: &str) -> Result<ProviderHandle> {
    let url = rpc_url
        .parse::<reqwest::Url>()
        .wrap_err_with(|| format!("Invalid RPC URL '{rpc_url}'"))?;
    let provider = ProviderBuilder::new().on_http(url);
    Ok(Arc::new(provider))
}

/// Build a provider whose transactions are signed by `signer`. Does not touch the network.
pub fn signing(rpc_url: &str, signer: PrivateKeySigner) -> Result<ProviderHandle> {
    let url = rpc_url
        .parse::<reqwest::Url>()
        .wrap_err_with(|| format!("Invalid RPC URL '{rpc_url}'"))?;
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);
    Ok(Arc::new(provider))
}
