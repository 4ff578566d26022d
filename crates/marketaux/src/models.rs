use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub data: Vec<Article>,
}

/// One article as Marketaux delivers it.
#[derive(Debug, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
}

/// The reshaped item the rest of the service consumes, read-only.
#[derive(Debug, Clone, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub url: String,
    /// Publication timestamp exactly as received (RFC 3339 with trailing Z).
    pub published_at: String,
    pub sentiment: Option<f64>,
    pub symbols: Vec<String>,
    pub snippet: String,
}

impl NewsItem {
    pub fn from_article(article: Article) -> Self {
        let sentiment = article.entities.iter().find_map(|e| e.sentiment_score);
        let symbols = article
            .entities
            .into_iter()
            .filter_map(|e| e.symbol)
            .collect();
        Self {
            title: article.title,
            source: article.source.unwrap_or_default(),
            url: article.url,
            published_at: article.published_at.unwrap_or_default(),
            sentiment,
            symbols,
            snippet: article.description.or(article.snippet).unwrap_or_default(),
        }
    }
}
