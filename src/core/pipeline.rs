use crate::core::filter::{filter_catalog, FilterContext};
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{LensProduct, MatchResult, Prescription};
use crate::domain::ports::Pipeline;
use crate::utils::error::{LensError, Result};
use reqwest::Client;

/// Catalog fetch → compatibility filter → file outputs.
pub struct MatchPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    context: FilterContext,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> MatchPipeline<S, C> {
    /// Fails early when the configured lens or frame type does not parse.
    pub fn new(storage: S, config: C, prescription: Prescription) -> Result<Self> {
        let context = FilterContext::new(prescription, config.lens_type(), config.frame_type())?;
        Ok(Self {
            storage,
            config,
            context,
            client: Client::new(),
        })
    }

    async fn fetch_catalog_document(&self) -> Result<serde_json::Value> {
        let source = self.config.catalog_source();
        if source.starts_with("http://") || source.starts_with("https://") {
            tracing::debug!("Fetching catalog from: {}", source);
            let mut request = self.client.get(source);
            if let Some(timeout) = self.config.timeout_seconds() {
                request = request.timeout(std::time::Duration::from_secs(timeout));
            }
            let response = request.send().await?;
            tracing::debug!("Catalog response status: {}", response.status());
            if !response.status().is_success() {
                return Err(LensError::ProcessingError {
                    message: format!("catalog fetch returned HTTP {}", response.status()),
                });
            }
            Ok(response.json().await?)
        } else {
            tracing::debug!("Reading catalog file: {}", source);
            let bytes = tokio::fs::read(source).await?;
            Ok(serde_json::from_slice(&bytes)?)
        }
    }

    fn build_csv(matched: &[LensProduct]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "id",
            "name",
            "brand",
            "lensType",
            "srp",
            "specialPrice",
            "deliveryTime",
        ])?;
        for lens in matched {
            let srp = lens.srp.to_string();
            let special_price = lens.special_price.to_string();
            writer.write_record([
                lens.id.as_str(),
                lens.name.as_str(),
                lens.brand.as_str(),
                lens.lens_type.as_str(),
                srp.as_str(),
                special_price.as_str(),
                lens.time.as_str(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| LensError::ProcessingError {
                message: format!("CSV buffer error: {}", e),
            })?;
        String::from_utf8(bytes).map_err(|e| LensError::ProcessingError {
            message: format!("CSV output was not UTF-8: {}", e),
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MatchPipeline<S, C> {
    /// Loads the catalog document and parses it record by record.
    /// Malformed entries are logged and skipped; a single bad record
    /// never aborts the pass.
    async fn extract(&self) -> Result<Vec<LensProduct>> {
        let document = self.fetch_catalog_document().await?;

        let items = match document {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(LensError::ProcessingError {
                    message: format!(
                        "catalog document must be a JSON array, got {}",
                        match other {
                            serde_json::Value::Object(_) => "an object",
                            serde_json::Value::String(_) => "a string",
                            _ => "a scalar",
                        }
                    ),
                })
            }
        };

        let mut catalog = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<LensProduct>(item) {
                Ok(lens) => catalog.push(lens),
                Err(e) => {
                    tracing::warn!("Skipping malformed catalog entry #{}: {}", index, e);
                }
            }
        }
        Ok(catalog)
    }

    async fn transform(&self, catalog: Vec<LensProduct>) -> Result<MatchResult> {
        let total_considered = catalog.len();
        let matched = filter_catalog(&self.context, &catalog);
        let csv_output = Self::build_csv(&matched)?;

        Ok(MatchResult {
            matched,
            total_considered,
            csv_output,
        })
    }

    async fn load(&self, result: MatchResult) -> Result<String> {
        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let json_name = format!("matched_{}.json", stamp);
        let csv_name = format!("matched_{}.csv", stamp);

        let json_bytes = serde_json::to_vec_pretty(&result.matched)?;
        self.storage.write_file(&json_name, &json_bytes).await?;
        self.storage
            .write_file(&csv_name, result.csv_output.as_bytes())
            .await?;

        let output = std::path::Path::new(self.config.output_path())
            .join(&json_name)
            .to_string_lossy()
            .into_owned();
        Ok(output)
    }
}
