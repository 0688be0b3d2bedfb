use crate::core::financial_year::financial_year_from_resource_id;
use crate::core::{ConfigProvider, PharmacyCount, Pipeline};
use crate::utils::error::{ReportError, Result};
use reqwest::{Client, StatusCode};
use url::Url;

/// `limit=0` asks the datastore for the record count only.
const RECORD_LIMIT: &str = "0";
const TOTAL_POINTER: &str = "/result/total";

/// Fetches the pharmacy count of one consolidated-list release from the
/// CKAN `datastore_search` endpoint.
pub struct PharmacyCountPipeline<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> PharmacyCountPipeline<C> {
    pub fn new(config: C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            config,
            client: builder.build()?,
        })
    }

    pub fn request_url(&self) -> Result<Url> {
        Url::parse_with_params(
            self.config.api_endpoint(),
            &[
                ("resource_id", self.config.resource_id()),
                ("limit", RECORD_LIMIT),
            ],
        )
        .map_err(|e| ReportError::InvalidConfigValueError {
            field: "source.endpoint".to_string(),
            value: self.config.api_endpoint().to_string(),
            reason: format!("Invalid URL format: {}", e),
        })
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> Pipeline for PharmacyCountPipeline<C> {
    type Extracted = serde_json::Value;
    type Transformed = PharmacyCount;

    async fn extract(&self) -> Result<serde_json::Value> {
        let url = self.request_url()?;
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if response.status() != StatusCode::OK {
            return Err(ReportError::ApiStatusError {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn transform(&self, data: serde_json::Value) -> Result<PharmacyCount> {
        let total = data
            .pointer(TOTAL_POINTER)
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| ReportError::MissingFieldError {
                path: "result.total".to_string(),
            })?;

        Ok(PharmacyCount {
            financial_year: financial_year_from_resource_id(self.config.resource_id())?,
            total,
        })
    }

    async fn load(&self, result: PharmacyCount) -> Result<String> {
        tracing::info!(
            financial_year = %result.financial_year,
            total = result.total,
            "💊 Pharmacy count retrieved"
        );
        Ok(result.to_string())
    }
}
