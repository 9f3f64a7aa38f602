use alloy::primitives::Address;
use alloy::providers::Provider;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use color_eyre::eyre::{Result, WrapErr};

use crate::data::provider::{self, ProviderHandle};

/// Something that can hand out the user's accounts.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    async fn request_accounts(&self) -> Result<Vec<Address>>;
}

/// The configured wallet, plus the provider that signs on its behalf.
pub enum Wallet {
    /// An external wallet speaking JSON-RPC (e.g. Frame at http://127.0.0.1:1248).
    /// It prompts the user and signs `eth_sendTransaction` itself.
    Rpc { provider: ProviderHandle },
    /// A key held by this process.
    LocalKey {
        signer: PrivateKeySigner,
        provider: ProviderHandle,
    },
}

impl Wallet {
    /// Pick a wallet from configuration. A wallet endpoint wins over a private key.
    /// `Ok(None)` means no wallet is installed.
    pub fn from_config(
        wallet_url: Option<&str>,
        private_key: Option<&str>,
        rpc_url: &str,
    ) -> Result<Option<Self>> {
        if let Some(url) = wallet_url {
            let provider = provider::read_only(url)?;
            return Ok(Some(Wallet::Rpc { provider }));
        }
        if let Some(key) = private_key {
            let signer: PrivateKeySigner = key
                .trim()
                .parse()
                .wrap_err("PRIVATE_KEY is not a valid secp256k1 key")?;
            let provider = provider::signing(rpc_url, signer.clone())?;
            return Ok(Some(Wallet::LocalKey { signer, provider }));
        }
        Ok(None)
    }

    /// Provider to send the payable call through.
    pub fn signing_provider(&self) -> ProviderHandle {
        match self {
            Wallet::Rpc { provider } | Wallet::LocalKey { provider, .. } => provider.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Wallet::Rpc { .. } => "wallet rpc",
            Wallet::LocalKey { .. } => "local key",
        }
    }
}

#[async_trait]
impl WalletConnector for Wallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        match self {
            Wallet::Rpc { provider } => {
                let accounts: Vec<Address> = provider
                    .client()
                    .request("eth_requestAccounts", ())
                    .await
                    .wrap_err("Wallet refused eth_requestAccounts")?;
                Ok(accounts)
            }
            Wallet::LocalKey { signer, .. } => Ok(vec![signer.address()]),
        }
    }
}

/// Outcome of a connect attempt. Never an error: failures are folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(Address),
    NotInstalled,
    Rejected(String),
}

/// Ask the wallet for account access and take the first account.
pub async fn connect(wallet: Option<&dyn WalletConnector>) -> ConnectOutcome {
    let Some(wallet) = wallet else {
        return ConnectOutcome::NotInstalled;
    };

    match wallet.request_accounts().await {
        Ok(accounts) => match accounts.first() {
            Some(account) => {
                tracing::info!(%account, "wallet connected");
                ConnectOutcome::Connected(*account)
            }
            None => {
                tracing::error!("wallet returned no accounts");
                ConnectOutcome::Rejected("Wallet returned no accounts".to_string())
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "error connecting wallet");
            ConnectOutcome::Rejected(format!("{e:#}"))
        }
    }
}
