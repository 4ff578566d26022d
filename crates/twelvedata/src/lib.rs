pub mod models;

use std::time::Duration;

use common::{WatchError, WatchResult};
pub use models::{Bar, TimeSeriesResponse};

const TWELVEDATA_API_BASE: &str = "https://api.twelvedata.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the TwelveData `/time_series` endpoint.
#[derive(Clone)]
pub struct TwelveDataClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TwelveDataClient {
    pub fn new(api_key: &str) -> WatchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: TWELVEDATA_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Most recent bars first, as the API returns them.
    pub async fn time_series(
        &self,
        symbol: &str,
        interval: &str,
        outputsize: usize,
    ) -> WatchResult<Vec<Bar>> {
        let url = format!("{}/time_series", self.base_url);
        let params: Vec<(&str, String)> = vec![
            ("symbol", symbol.to_string()),
            ("interval", interval.to_string()),
            ("outputsize", outputsize.to_string()),
            ("apikey", self.api_key.clone()),
        ];

        let response = self.client.get(&url).query(&params).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WatchError::Upstream { status, body });
        }

        let parsed: TimeSeriesResponse = response.json().await?;
        if parsed.status.as_deref() == Some("error") {
            return Err(WatchError::Api(
                parsed
                    .message
                    .unwrap_or_else(|| format!("TwelveData error for {symbol}")),
            ));
        }
        Ok(parsed.values)
    }

    /// Fractional change of the latest close against the previous close
    /// (+0.006 = +0.6%).
    pub async fn percent_change(&self, symbol: &str, interval: &str) -> WatchResult<f64> {
        let bars = self.time_series(symbol, interval, 2).await?;
        if bars.len() < 2 {
            return Err(WatchError::Api(format!(
                "not enough bars for {symbol}: got {}",
                bars.len()
            )));
        }
        let latest = bars[0].close_price()?;
        let previous = bars[1].close_price()?;
        if previous == 0.0 {
            return Err(WatchError::Parse(format!(
                "previous close for {symbol} is zero"
            )));
        }
        Ok((latest - previous) / previous)
    }
}
