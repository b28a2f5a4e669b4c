//! WooCommerce product source for the KB growth cron.
//!
//! Pulls recently modified products through the WooCommerce REST API
//! (`/wp-json/wc/v3/products`) using consumer-key basic auth. Product name,
//! description, and price are flattened into one text block per product.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use super::strip_html;
use crate::domain::foundation::{BotId, Timestamp};
use crate::domain::knowledge::{CandidateEntry, SourceKind};
use crate::ports::{KnowledgeSource, SourceError};

/// Connection details for one bot's WooCommerce store.
#[derive(Clone)]
pub struct WoocommerceStore {
    /// Site root, e.g. "https://shop.example.com".
    pub base_url: String,
    pub consumer_key: String,
    pub consumer_secret: Secret<String>,
}

/// WooCommerce REST API implementation of KnowledgeSource.
pub struct WoocommerceSource {
    client: Client,
    stores: RwLock<HashMap<BotId, WoocommerceStore>>,
}

impl WoocommerceSource {
    /// Creates a source with no connected stores.
    pub fn new() -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SourceError::unavailable(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            stores: RwLock::new(HashMap::new()),
        })
    }

    /// Connects a bot to a store.
    pub fn connect(&self, bot_id: BotId, store: WoocommerceStore) {
        self.stores.write().unwrap().insert(bot_id, store);
    }

    fn store_for(&self, bot_id: &BotId) -> Option<WoocommerceStore> {
        self.stores.read().unwrap().get(bot_id).cloned()
    }
}

#[async_trait]
impl KnowledgeSource for WoocommerceSource {
    fn kind(&self) -> SourceKind {
        SourceKind::WoocommerceProduct
    }

    async fn fetch_since(
        &self,
        bot_id: &BotId,
        since: Timestamp,
    ) -> Result<Vec<CandidateEntry>, SourceError> {
        let Some(store) = self.store_for(bot_id) else {
            return Ok(Vec::new());
        };

        let url = format!(
            "{}/wp-json/wc/v3/products",
            store.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .get(&url)
            .basic_auth(
                &store.consumer_key,
                Some(store.consumer_secret.expose_secret()),
            )
            .query(&[
                ("modified_after", since.as_datetime().to_rfc3339()),
                ("per_page", "100".to_string()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::unavailable(format!("woocommerce request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::unavailable(format!(
                "woocommerce returned {}",
                response.status()
            )));
        }

        let products: Vec<WcProduct> = response
            .json()
            .await
            .map_err(|e| SourceError::malformed(format!("woocommerce payload: {}", e)))?;

        Ok(products
            .into_iter()
            .map(|product| {
                let content = format!(
                    "{}\n\nPrezzo: {}\n\n{}",
                    product.name,
                    product.price,
                    strip_html(&product.description),
                );
                CandidateEntry {
                    bot_id: *bot_id,
                    source: SourceKind::WoocommerceProduct,
                    title: product.name,
                    content,
                    captured_at: Timestamp::now(),
                }
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct WcProduct {
    name: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    description: String,
}
