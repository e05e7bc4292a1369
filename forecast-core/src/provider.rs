use crate::{
    Config, ForecastRequest, ForecastResponse, provider::forecastio::ForecastIoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod forecastio;

/// Anything that can hand over a complete raw provider response.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, request: &ForecastRequest) -> anyhow::Result<ForecastResponse>;
}

/// Construct the forecast provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastSource>> {
    let api_key = config.api_key()?;

    Ok(Box::new(ForecastIoProvider::new(api_key.to_owned())))
}
