use std::time::Duration;

use async_trait::async_trait;
use shared::DataLayerObject;

use super::AnalyticsSink;
use crate::core::error::SinkError;

/// Posts each dispatch as JSON to a collector endpoint
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
}

impl HttpSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AnalyticsSink for HttpSink {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn push(&self, object: &DataLayerObject) -> Result<(), SinkError> {
        let response = self.client.post(&self.url).json(object).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, url = %self.url, "Collector rejected event");
            return Err(SinkError::Status(status.as_u16()));
        }
        Ok(())
    }
}
