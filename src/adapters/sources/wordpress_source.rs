//! WordPress content source for the KB growth cron.
//!
//! Pulls recently modified posts and pages through the WordPress REST API
//! (`/wp-json/wp/v2/posts`). Bots without a connected site yield no
//! candidates rather than an error, so the cron stays quiet for them.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use super::strip_html;
use crate::domain::foundation::{BotId, Timestamp};
use crate::domain::knowledge::{CandidateEntry, SourceKind};
use crate::ports::{KnowledgeSource, SourceError};

/// Connection details for one bot's WordPress site.
#[derive(Debug, Clone)]
pub struct WordpressSite {
    /// Site root, e.g. "https://shop.example.com".
    pub base_url: String,
}

/// WordPress REST API implementation of KnowledgeSource.
pub struct WordpressSource {
    client: Client,
    sites: RwLock<HashMap<BotId, WordpressSite>>,
}

impl WordpressSource {
    /// Creates a source with no connected sites.
    pub fn new() -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SourceError::unavailable(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            sites: RwLock::new(HashMap::new()),
        })
    }

    /// Connects a bot to a site.
    pub fn connect(&self, bot_id: BotId, site: WordpressSite) {
        self.sites.write().unwrap().insert(bot_id, site);
    }

    fn site_for(&self, bot_id: &BotId) -> Option<WordpressSite> {
        self.sites.read().unwrap().get(bot_id).cloned()
    }
}

#[async_trait]
impl KnowledgeSource for WordpressSource {
    fn kind(&self) -> SourceKind {
        SourceKind::WordpressContent
    }

    async fn fetch_since(
        &self,
        bot_id: &BotId,
        since: Timestamp,
    ) -> Result<Vec<CandidateEntry>, SourceError> {
        let Some(site) = self.site_for(bot_id) else {
            return Ok(Vec::new());
        };

        let url = format!("{}/wp-json/wp/v2/posts", site.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[
                ("modified_after", since.as_datetime().to_rfc3339()),
                ("per_page", "100".to_string()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::unavailable(format!("wordpress request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::unavailable(format!(
                "wordpress returned {}",
                response.status()
            )));
        }

        let posts: Vec<WpPost> = response
            .json()
            .await
            .map_err(|e| SourceError::malformed(format!("wordpress payload: {}", e)))?;

        Ok(posts
            .into_iter()
            .map(|post| CandidateEntry {
                bot_id: *bot_id,
                source: SourceKind::WordpressContent,
                title: strip_html(&post.title.rendered),
                content: strip_html(&post.content.rendered),
                captured_at: Timestamp::now(),
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct WpPost {
    title: WpRendered,
    content: WpRendered,
}

#[derive(Debug, Deserialize)]
struct WpRendered {
    rendered: String,
}
