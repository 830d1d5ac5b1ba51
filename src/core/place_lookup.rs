use crate::domain::model::{first_place_id, normalize_query, provider_status, PLACES_STATUS_OK};
use crate::domain::ports::PlacesProvider;
use crate::utils::error::{LookupStage, ProxyError};
use serde_json::Value;
use std::sync::Arc;

/// Two-step place lookup: text search for a place id, then fetch its details.
///
/// Stateless; every call issues at most two sequential upstream requests and
/// never retries.
#[derive(Clone)]
pub struct PlaceLookupService {
    provider: Arc<dyn PlacesProvider>,
}

impl PlaceLookupService {
    pub fn new(provider: Arc<dyn PlacesProvider>) -> Self {
        Self { provider }
    }

    /// Returns the provider's detail response unchanged on success.
    pub async fn get_place_details(&self, query: Option<&str>) -> Result<Value, ProxyError> {
        let search = self.search(query).await?;

        let place_id = first_place_id(&search).ok_or_else(|| ProxyError::NoResultsFound {
            details: search.clone(),
        })?;
        tracing::debug!(place_id, "Text search matched, fetching details");

        let details = self
            .provider
            .place_details(place_id)
            .await
            .map_err(|e| {
                tracing::warn!("Places details request failed: {}", e);
                ProxyError::NetworkFailure {
                    stage: LookupStage::Details,
                    details: e.message().to_string(),
                }
            })?;

        if provider_status(&details) != Some(PLACES_STATUS_OK) {
            tracing::warn!(
                status = provider_status(&details).unwrap_or("<missing>"),
                "Places details returned non-OK status"
            );
            return Err(ProxyError::ProviderError { details });
        }

        Ok(details)
    }

    /// Text search only. Fails with `NoResultsFound` when nothing matched.
    pub async fn search_places(&self, query: Option<&str>) -> Result<Value, ProxyError> {
        let search = self.search(query).await?;
        if first_place_id(&search).is_none() {
            return Err(ProxyError::NoResultsFound { details: search });
        }
        Ok(search)
    }

    async fn search(&self, query: Option<&str>) -> Result<Value, ProxyError> {
        let query = normalize_query(query).ok_or(ProxyError::MissingQuery)?;
        tracing::debug!(query, "Running places text search");

        self.provider.text_search(query).await.map_err(|e| {
            tracing::warn!("Places text search request failed: {}", e);
            ProxyError::NetworkFailure {
                stage: LookupStage::TextSearch,
                details: e.message().to_string(),
            }
        })
    }
}
