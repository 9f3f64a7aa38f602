use alloy::primitives::Address;

use crate::data::types::Product;

/// Where the single pending purchase stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PurchaseState {
    #[default]
    Idle,
    Selected(Product),
    Confirming(Product),
}

/// Wallet and purchase state for one run of the storefront. Nothing persists.
#[derive(Debug, Default)]
pub struct Session {
    pub connected: bool,
    pub account: Option<Address>,
    pub purchase: PurchaseState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet_connected(&mut self, account: Address) {
        self.connected = true;
        self.account = Some(account);
    }

    /// User picked a product. Returns false (and changes nothing) when no
    /// wallet is connected.
    pub fn select(&mut self, product: Product) -> bool {
        if !self.connected {
            return false;
        }
        if matches!(self.purchase, PurchaseState::Confirming(_)) {
            return false;
        }
        self.purchase = PurchaseState::Selected(product);
        true
    }

    /// Close the modal. A submitted transaction cannot be cancelled.
    pub fn cancel(&mut self) {
        if let PurchaseState::Selected(_) = self.purchase {
            self.purchase = PurchaseState::Idle;
        }
    }

    /// Move `Selected` to `Confirming` and hand back what to buy and who pays.
    /// `None` means the payable call must not be made.
    pub fn begin_confirm(&mut self) -> Option<(Product, Address)> {
        if !self.connected {
            return None;
        }
        let account = self.account?;
        let PurchaseState::Selected(product) = &self.purchase else {
            return None;
        };
        let product = product.clone();
        self.purchase = PurchaseState::Confirming(product.clone());
        Some((product, account))
    }

    pub fn purchase_succeeded(&mut self) {
        self.purchase = PurchaseState::Idle;
    }

    /// The selection survives a failed attempt so the user can retry or cancel.
    pub fn purchase_failed(&mut self) {
        if let PurchaseState::Confirming(product) = std::mem::take(&mut self.purchase) {
            self.purchase = PurchaseState::Selected(product);
        }
    }

    /// Product the modal should show, if any.
    pub fn modal_product(&self) -> Option<&Product> {
        match &self.purchase {
            PurchaseState::Idle => None,
            PurchaseState::Selected(p) | PurchaseState::Confirming(p) => Some(p),
        }
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self.purchase, PurchaseState::Confirming(_))
    }
}
