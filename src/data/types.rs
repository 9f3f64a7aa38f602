use alloy::primitives::{Address, B256, U256};

/// A catalog entry as shown on a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    /// Price in the display unit (ETH), e.g. "0.015".
    pub price: String,
    pub image: String,
    pub description: String,
    pub is_active: bool,
}

/// The raw tuple returned by `getProduct` / `products`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainProduct {
    pub id: U256,
    pub name: String,
    pub price: U256,
    pub is_active: bool,
}

impl OnChainProduct {
    /// The contract returns a zeroed struct for ids it never assigned.
    pub fn exists(&self) -> bool {
        !self.id.is_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    OnChain,
    Fallback,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::OnChain => write!(f, "on-chain"),
            CatalogSource::Fallback => write!(f, "offline catalog"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub source: CatalogSource,
}

/// Decoded `ProductPurchased` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseEvent {
    pub buyer: Address,
    pub product_id: U256,
    pub amount: U256,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub event: Option<PurchaseEvent>,
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub symbol: String,
    pub explorer_url: Option<String>,
    pub explorer_api_url: Option<String>,
}
