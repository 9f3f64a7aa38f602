use alloy::json_abi::JsonAbi;
use alloy::network::TransactionBuilder;
use alloy::primitives::{address, Address, Bytes, U256};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use color_eyre::eyre::{eyre, Result};

use crate::data::provider::ProviderHandle;
use crate::data::types::{OnChainProduct, PurchaseEvent, PurchaseReceipt};

/// Deployed JengawizeStore contract.
pub const STORE_ADDRESS: Address = address!("8Ad48B3394729D5Af73a02548B2F3297b232EDe3");

/// Human-readable interface of the store contract.
pub const STORE_ABI: [&str; 4] = [
    "function purchaseProduct(uint256 _productId) external payable",
    "function getProduct(uint256 _productId) external view returns (uint256 id, string memory name, uint256 price, bool isActive)",
    "function products(uint256) external view returns (uint256 id, string memory name, uint256 price, bool isActive)",
    "event ProductPurchased(address indexed buyer, uint256 indexed productId, uint256 amount, uint256 timestamp)",
];

sol! {
    #[allow(missing_docs)]
    function purchaseProduct(uint256 _productId) external payable;
    #[allow(missing_docs)]
    function getProduct(uint256 _productId) external view returns (uint256 id, string memory name, uint256 price, bool isActive);
    #[allow(missing_docs)]
    function products(uint256) external view returns (uint256 id, string memory name, uint256 price, bool isActive);
    #[allow(missing_docs)]
    event ProductPurchased(address indexed buyer, uint256 indexed productId, uint256 amount, uint256 timestamp);
}

/// Read side of the store. Errors are passed through untouched.
#[async_trait]
pub trait ProductReader: Send + Sync {
    async fn get_product(&self, id: U256) -> Result<OnChainProduct>;
}

/// Write side of the store.
#[async_trait]
pub trait ProductPurchaser: Send + Sync {
    /// Send `purchaseProduct(id)` carrying `value` wei and wait for one confirmation.
    async fn purchase_product(&self, id: U256, value: U256, buyer: Address)
    -> Result<PurchaseReceipt>;
}

/// Proxy bound to the store contract through a provider or signing provider.
#[derive(Clone)]
pub struct StoreContract {
    provider: ProviderHandle,
    address: Address,
}

/// Bind `provider` to the deployed store.
pub fn get_contract(provider: ProviderHandle) -> StoreContract {
    StoreContract::at(provider, STORE_ADDRESS)
}

impl StoreContract {
    /// Bind `provider` to a store at an arbitrary address, e.g. a fresh deployment.
    pub fn at(provider: ProviderHandle, address: Address) -> Self {
        Self { provider, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The four-entry interface this proxy speaks.
    pub fn interface(&self) -> Result<JsonAbi> {
        JsonAbi::parse(STORE_ABI).map_err(|e| eyre!("Invalid store ABI: {e}"))
    }

    /// Read the public `products` mapping directly.
    pub async fn products(&self, id: U256) -> Result<OnChainProduct> {
        let data = self.call(productsCall { _0: id }.abi_encode()).await?;
        let ret = productsCall::abi_decode_returns(&data, true)?;
        Ok(OnChainProduct {
            id: ret.id,
            name: ret.name,
            price: ret.price,
            is_active: ret.isActive,
        })
    }

    async fn call(&self, calldata: Vec<u8>) -> Result<Bytes> {
        let tx = TransactionRequest::default()
            .to(self.address)
            .input(Bytes::from(calldata).into());
        let data = self.provider.call(tx).await?;
        Ok(data)
    }
}

#[async_trait]
impl ProductReader for StoreContract {
    async fn get_product(&self, id: U256) -> Result<OnChainProduct> {
        let data = self
            .call(getProductCall { _productId: id }.abi_encode())
            .await?;
        let ret = getProductCall::abi_decode_returns(&data, true)?;
        Ok(OnChainProduct {
            id: ret.id,
            name: ret.name,
            price: ret.price,
            is_active: ret.isActive,
        })
    }
}

#[async_trait]
impl ProductPurchaser for StoreContract {
    async fn purchase_product(
        &self,
        id: U256,
        value: U256,
        buyer: Address,
    ) -> Result<PurchaseReceipt> {
        let calldata = purchaseProductCall { _productId: id }.abi_encode();
        let tx = TransactionRequest::default()
            .with_from(buyer)
            .with_to(self.address)
            .with_value(value)
            .with_input(calldata);

        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(%tx_hash, product_id = %id, %value, "purchase submitted");

        let receipt = pending.with_required_confirmations(1).get_receipt().await?;
        if !receipt.status() {
            return Err(eyre!("Transaction {tx_hash} reverted"));
        }

        Ok(PurchaseReceipt {
            tx_hash,
            block_number: receipt.block_number,
            event: decode_purchase_event(&receipt),
        })
    }
}

/// Pull the first `ProductPurchased` log out of a receipt, if any.
fn decode_purchase_event(receipt: &TransactionReceipt) -> Option<PurchaseEvent> {
    receipt.inner.logs().iter().find_map(|log| {
        let decoded = log.log_decode::<ProductPurchased>().ok()?;
        let event = decoded.inner.data;
        Some(PurchaseEvent {
            buyer: event.buyer,
            product_id: event.productId,
            amount: event.amount,
            timestamp: event.timestamp.saturating_to::<u64>(),
        })
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use alloy::primitives::{keccak256, LogData, B256};
    use alloy::sol_types::SolEvent;

    use super::*;
    use crate::data::provider;

    #[test]
    fn test_factory_binds_fixed_address() {
        let handle = provider::read_only("http://127.0.0.1:8545").unwrap();
        let first = get_contract(Arc::clone(&handle));
        let second = get_contract(handle);

        assert_eq!(first.address(), STORE_ADDRESS);
        assert_eq!(first.address(), second.address());
        assert_eq!(first.interface().unwrap(), second.interface().unwrap());
    }

    #[test]
    fn test_interface_has_three_functions_and_one_event() {
        let handle = provider::read_only("http://127.0.0.1:8545").unwrap();
        let abi = get_contract(handle).interface().unwrap();

        assert_eq!(abi.functions().count(), 3);
        assert_eq!(abi.events().count(), 1);
        assert!(abi.function("purchaseProduct").is_some());
        assert!(abi.function("getProduct").is_some());
        assert!(abi.function("products").is_some());
        assert!(abi.event("ProductPurchased").is_some());
    }

    #[test]
    fn test_selectors_match_human_readable_abi() {
        let handle = provider::read_only("http://127.0.0.1:8545").unwrap();
        let abi = get_contract(handle).interface().unwrap();

        let get_product = &abi.function("getProduct").unwrap()[0];
        assert_eq!(get_product.selector().0, getProductCall::SELECTOR);

        let purchase = &abi.function("purchaseProduct").unwrap()[0];
        assert_eq!(purchase.selector().0, purchaseProductCall::SELECTOR);
    }

    #[test]
    fn test_event_signature() {
        let expected = keccak256("ProductPurchased(address,uint256,uint256,uint256)");
        assert_eq!(ProductPurchased::SIGNATURE_HASH, expected);
    }

    #[test]
    fn test_get_product_return_decoding() {
        let encoded = getProductCall::abi_encode_returns(&(
            U256::from(3),
            "Stone".to_string(),
            U256::from(15_000_000_000_000_000u64),
            true,
        ));
        let ret = getProductCall::abi_decode_returns(&encoded, true).unwrap();
        assert_eq!(ret.id, U256::from(3));
        assert_eq!(ret.name, "Stone");
        assert_eq!(ret.price, U256::from(15_000_000_000_000_000u64));
        assert!(ret.isActive);
    }

    #[test]
    fn test_purchase_event_roundtrip_through_log_data() {
        let buyer: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".parse().unwrap();
        let event = ProductPurchased {
            buyer,
            productId: U256::from(2),
            amount: U256::from(5u64),
            timestamp: U256::from(1_700_000_000u64),
        };
        let data: LogData = event.encode_log_data();
        assert_eq!(data.topics().len(), 3);
        assert_eq!(data.topics()[0], ProductPurchased::SIGNATURE_HASH);
        assert_eq!(data.topics()[1], B256::left_padding_from(buyer.as_slice()));
    }
}
