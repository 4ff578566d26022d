pub mod config;
pub mod error;
pub mod notify;

pub use config::Config;
pub use error::{WatchError, WatchResult};
pub use notify::{DeliveryReport, Notifier, NotifierSet};
