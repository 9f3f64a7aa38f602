use alloy::primitives::Address;

use crate::data::types::{Catalog, Product, PurchaseReceipt};

/// Events sent from background tasks and components to the main app loop
#[derive(Debug)]
pub enum AppEvent {
    // Catalog
    ProductsLoaded(Catalog),

    // Wallet
    WalletConnected(Address),
    WalletMissing,
    WalletRejected(String),

    // Purchase flow (from components)
    PurchaseIntent(Product),
    ConfirmPurchase,
    CancelPurchase,

    // Purchase flow (from the chain)
    PurchaseConfirmed { product: String, receipt: PurchaseReceipt },
    PurchaseFailed(String),

    // Status
    Error(String),
    Connected(u64), // chain_id
    NodeUnreachable(String),
}
