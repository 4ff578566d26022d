use common::{WatchError, WatchResult};
use serde::{Deserialize, Serialize};

/// `/time_series` reply. TwelveData reports request-level failures inside a
/// 200 body with `"status": "error"`, so both shapes live in one struct.
#[derive(Debug, Deserialize)]
pub struct TimeSeriesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub values: Vec<Bar>,
}

/// One price bar; the API delivers OHLC as strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Bar {
    pub datetime: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    #[serde(default)]
    pub volume: Option<String>,
}

impl Bar {
    pub fn close_price(&self) -> WatchResult<f64> {
        self.close.trim().parse().map_err(|_| {
            WatchError::Parse(format!(
                "bad close value {:?} at {}",
                self.close, self.datetime
            ))
        })
    }
}
