pub mod models;

use std::time::Duration;

use common::{WatchError, WatchResult};
pub use models::{Article, Entity, NewsItem, NewsResponse};

const MARKETAUX_API_BASE: &str = "https://api.marketaux.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the Marketaux `/v1/news/all` endpoint.
#[derive(Clone)]
pub struct MarketauxClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl MarketauxClient {
    pub fn new(api_token: &str) -> WatchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_token: api_token.to_string(),
            base_url: MARKETAUX_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetches the latest English-language articles, entity-filtered, and
    /// reshapes them into `NewsItem`s.
    pub async fn latest_news(
        &self,
        symbols: &[String],
        search: Option<&str>,
        limit: usize,
    ) -> WatchResult<Vec<NewsItem>> {
        let url = format!("{}/v1/news/all", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("api_token", self.api_token.clone()),
            ("language", "en".to_string()),
            ("filter_entities", "true".to_string()),
            ("limit", limit.to_string()),
        ];
        if !symbols.is_empty() {
            params.push(("symbols", symbols.join(",")));
        }
        if let Some(search) = search {
            params.push(("search", search.to_string()));
        }

        let response = self.client.get(&url).query(&params).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WatchError::Upstream { status, body });
        }

        let parsed: NewsResponse = response.json().await?;
        Ok(parsed.data.into_iter().map(NewsItem::from_article).collect())
    }
}
