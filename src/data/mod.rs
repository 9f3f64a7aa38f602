pub mod catalog;
pub mod chains;
pub mod contract;
pub mod provider;
pub mod types;
pub mod verify;
pub mod wallet;

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use tokio::sync::mpsc;

use crate::data::contract::{ProductPurchaser, ProductReader};
use crate::data::types::Product;
use crate::data::wallet::{ConnectOutcome, WalletConnector};
use crate::events::AppEvent;
use crate::utils;

/// Runs contract and wallet calls off the UI loop and reports back as `AppEvent`s.
pub struct StoreService {
    reader: Arc<dyn ProductReader>,
    wallet: Option<Arc<dyn WalletConnector>>,
    purchaser: Option<Arc<dyn ProductPurchaser>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl StoreService {
    pub fn new(
        reader: Arc<dyn ProductReader>,
        wallet: Option<Arc<dyn WalletConnector>>,
        purchaser: Option<Arc<dyn ProductPurchaser>>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            reader,
            wallet,
            purchaser,
            event_tx,
        }
    }

    /// Load the catalog (ids 1..=5, or the offline list on failure).
    pub fn load_products(&self) {
        let reader = Arc::clone(&self.reader);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let catalog = catalog::load_catalog(reader.as_ref()).await;
            let _ = tx.send(AppEvent::ProductsLoaded(catalog));
        });
    }

    /// Request account access from the configured wallet.
    pub fn connect_wallet(&self) {
        let wallet = self.wallet.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let event = match wallet::connect(wallet.as_deref()).await {
                ConnectOutcome::Connected(account) => AppEvent::WalletConnected(account),
                ConnectOutcome::NotInstalled => AppEvent::WalletMissing,
                ConnectOutcome::Rejected(reason) => AppEvent::WalletRejected(reason),
            };
            let _ = tx.send(event);
        });
    }

    /// Convert the display price to wei and send the payable call.
    pub fn purchase(&self, product: Product, buyer: Address) {
        let purchaser = self.purchaser.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let event = match purchaser {
                Some(purchaser) => match submit_purchase(purchaser.as_ref(), &product, buyer).await {
                    Ok(receipt) => AppEvent::PurchaseConfirmed {
                        product: product.name,
                        receipt,
                    },
                    Err(e) => {
                        tracing::error!(error = %e, product = %product.name, "error processing purchase");
                        AppEvent::PurchaseFailed(format!("{e:#}"))
                    }
                },
                None => {
                    tracing::error!("purchase requested without a signing wallet");
                    AppEvent::PurchaseFailed("No signing wallet configured".to_string())
                }
            };
            let _ = tx.send(event);
        });
    }
}

async fn submit_purchase(
    purchaser: &dyn ProductPurchaser,
    product: &Product,
    buyer: Address,
) -> color_eyre::Result<types::PurchaseReceipt> {
    let value = utils::to_wei(&product.price)?;
    tracing::info!(product_id = product.id, %value, %buyer, "submitting purchase");
    let receipt = purchaser
        .purchase_product(U256::from(product.id), value, buyer)
        .await?;
    match &receipt.event {
        Some(event) => tracing::info!(
            tx_hash = %receipt.tx_hash,
            buyer = %event.buyer,
            product_id = %event.product_id,
            amount = %event.amount,
            "ProductPurchased"
        ),
        None => tracing::warn!(tx_hash = %receipt.tx_hash, "purchase confirmed without a ProductPurchased log"),
    }
    Ok(receipt)
}
