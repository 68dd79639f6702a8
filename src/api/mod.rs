pub mod client;
pub mod types;

pub use client::{DuckyClient, MarketApi};
pub use types::*;

#[cfg(test)]
pub use client::MockMarketApi;
