use std::ops::RangeInclusive;

use alloy::primitives::U256;
use color_eyre::eyre::{eyre, Result};

use crate::data::contract::ProductReader;
use crate::data::types::{Catalog, CatalogSource, OnChainProduct, Product};
use crate::utils;

/// Ids queried on start. The store never lists more than this.
pub const PRODUCT_IDS: RangeInclusive<u64> = 1..=5;

const GENERIC_DESCRIPTION: &str = "Quality construction material from the Jengawize store";

/// (name, price in ETH, description)
const STATIC_ITEMS: [(&str, &str, &str); 5] = [
    ("Cement", "0.01", "Ordinary Portland cement, 50 kg bag"),
    ("Sand", "0.005", "Washed river sand for plaster and concrete, per tonne"),
    ("Stone", "0.015", "Machine-cut building stone, 9 x 9 inch blocks"),
    ("Bricks", "0.02", "Kiln-fired clay bricks, pallet of 500"),
    ("Steel", "0.025", "Y12 reinforcement bars, bundle of 10"),
];

/// The catalog shown when the contract cannot be read.
pub fn fallback_catalog() -> Vec<Product> {
    STATIC_ITEMS
        .iter()
        .enumerate()
        .map(|(i, (name, price, description))| Product {
            id: i as u64 + 1,
            name: name.to_string(),
            price: price.to_string(),
            image: image_for(name),
            description: description.to_string(),
            is_active: true,
        })
        .collect()
}

/// Image reference derived from the lower-cased product name.
pub fn image_for(name: &str) -> String {
    format!("images/{}.png", name.to_lowercase())
}

fn description_for(name: &str) -> String {
    STATIC_ITEMS
        .iter()
        .find(|(n, _, _)| n.eq_ignore_ascii_case(name.trim()))
        .map(|(_, _, d)| d.to_string())
        .unwrap_or_else(|| GENERIC_DESCRIPTION.to_string())
}

/// Map a contract entry into the card shape.
pub fn to_product(entry: OnChainProduct) -> Result<Product> {
    let id = u64::try_from(entry.id).map_err(|_| eyre!("Product id {} out of range", entry.id))?;
    Ok(Product {
        id,
        price: utils::format_price(entry.price),
        image: image_for(&entry.name),
        description: description_for(&entry.name),
        is_active: entry.is_active,
        name: entry.name,
    })
}

/// Query ids 1..=5 one after another. The first error aborts the whole load.
async fn load_on_chain(reader: &dyn ProductReader) -> Result<Vec<Product>> {
    let mut products = Vec::new();
    for id in PRODUCT_IDS {
        let entry = reader.get_product(U256::from(id)).await?;
        if !entry.exists() {
            tracing::debug!(id, "product slot empty, skipping");
            continue;
        }
        products.push(to_product(entry)?);
    }
    Ok(products)
}

/// Load the catalog from the contract, or the static list if any read fails.
/// Products read before the failure are discarded.
pub async fn load_catalog(reader: &dyn ProductReader) -> Catalog {
    match load_on_chain(reader).await {
        Ok(products) => {
            tracing::info!(count = products.len(), "catalog loaded from contract");
            Catalog {
                products,
                source: CatalogSource::OnChain,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "contract read failed, using offline catalog");
            Catalog {
                products: fallback_catalog(),
                source: CatalogSource::Fallback,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use color_eyre::eyre::bail;

    use super::*;

    struct MockReader {
        entries: HashMap<u64, (String, u64, bool)>,
        fail_on: Option<u64>,
        calls: Mutex<Vec<u64>>,
    }

    impl MockReader {
        fn new(entries: &[(u64, &str, u64)]) -> Self {
            Self {
                entries: entries
                    .iter()
                    .map(|(id, name, price)| (*id, (name.to_string(), *price, true)))
                    .collect(),
                fail_on: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, id: u64) -> Self {
            self.fail_on = Some(id);
            self
        }
    }

    #[async_trait]
    impl ProductReader for MockReader {
        async fn get_product(&self, id: U256) -> Result<OnChainProduct> {
            let id = id.to::<u64>();
            self.calls.lock().unwrap().push(id);
            if self.fail_on == Some(id) {
                bail!("execution reverted");
            }
            Ok(match self.entries.get(&id) {
                Some((name, price, active)) => OnChainProduct {
                    id: U256::from(id),
                    name: name.clone(),
                    price: U256::from(*price),
                    is_active: *active,
                },
                None => OnChainProduct {
                    id: U256::ZERO,
                    name: String::new(),
                    price: U256::ZERO,
                    is_active: false,
                },
            })
        }
    }

    #[test]
    fn test_fallback_catalog_is_fixed() {
        let items = fallback_catalog();
        let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Cement", "Sand", "Stone", "Bricks", "Steel"]);
        let ids: Vec<_> = items.iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
        assert_eq!(items[2].image, "images/stone.png");
    }

    #[test]
    fn test_image_for_lowercases_name() {
        assert_eq!(image_for("Stone"), "images/stone.png");
        assert_eq!(image_for("River Sand"), "images/river sand.png");
    }

    #[test]
    fn test_to_product_formats_price() {
        let product = to_product(OnChainProduct {
            id: U256::from(3),
            name: "Stone".to_string(),
            price: U256::from(15_000_000_000_000_000u64),
            is_active: true,
        })
        .unwrap();
        assert_eq!(product.id, 3);
        assert_eq!(product.price, "0.015");
        assert_eq!(product.image, "images/stone.png");
        assert_eq!(product.description, "Machine-cut building stone, 9 x 9 inch blocks");
    }

    #[test]
    fn test_unknown_name_gets_generic_description() {
        let product = to_product(OnChainProduct {
            id: U256::from(9),
            name: "Gravel".to_string(),
            price: U256::from(1u64),
            is_active: true,
        })
        .unwrap();
        assert_eq!(product.description, GENERIC_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_load_on_chain_skips_missing_ids() {
        let reader = MockReader::new(&[(1, "Cement", 10_000_000_000_000_000), (3, "Stone", 15_000_000_000_000_000)]);
        let catalog = load_catalog(&reader).await;

        assert_eq!(catalog.source, CatalogSource::OnChain);
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.products[1].name, "Stone");
        assert_eq!(catalog.products[1].price, "0.015");
    }

    #[tokio::test]
    async fn test_load_queries_ids_in_order() {
        let reader = MockReader::new(&[]);
        let catalog = load_catalog(&reader).await;

        assert_eq!(*reader.calls.lock().unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(catalog.source, CatalogSource::OnChain);
        assert!(catalog.products.is_empty());
    }

    #[tokio::test]
    async fn test_failure_discards_partial_results() {
        let reader = MockReader::new(&[(1, "Cement", 1), (2, "Sand", 2), (3, "Stone", 3)])
            .failing_on(3);
        let catalog = load_catalog(&reader).await;

        assert_eq!(catalog.source, CatalogSource::Fallback);
        assert_eq!(catalog.products, fallback_catalog());
        assert_eq!(*reader.calls.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_on_any_id_uses_fallback() {
        for id in PRODUCT_IDS {
            let reader = MockReader::new(&[(1, "Cement", 1)]).failing_on(id);
            let catalog = load_catalog(&reader).await;
            assert_eq!(catalog.products, fallback_catalog(), "failing id {id}");
        }
    }
}
