use crate::core::history::sort_newest_first;
use crate::domain::model::{HistoryRecord, NewHistoryRecord};
use crate::domain::ports::HistoryStore;
use crate::utils::error::{MaintenanceError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use url::Url;

pub const DEFAULT_TABLE: &str = "maintenance_history";

/// History table on a hosted database exposing a PostgREST-style API.
#[derive(Debug, Clone)]
pub struct RestHistoryStore {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl RestHistoryStore {
    pub fn new(base_url: &str, table: &str, api_key: Option<String>) -> Result<Self> {
        crate::utils::validation::validate_url("store.url", base_url)?;

        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)
            .and_then(|url| url.join(&format!("rest/v1/{}", table)))
            .map_err(|e| MaintenanceError::InvalidConfigValue {
                field: "store.url".to_string(),
                value: base_url.to_string(),
                reason: format!("Invalid URL format: {}", e),
            })?;

        Ok(Self {
            client: Client::new(),
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    async fn check(response: Response, action: &str) -> Result<Response> {
        let status = response.status();
        tracing::debug!("{} response status: {}", action, status);
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(MaintenanceError::store(format!(
            "{} failed with status {}: {}",
            action, status, body
        )))
    }
}

#[async_trait]
impl HistoryStore for RestHistoryStore {
    async fn create(&self, record: NewHistoryRecord) -> Result<HistoryRecord> {
        tracing::debug!("POST {}", self.endpoint);
        let request = self
            .client
            .post(self.endpoint.clone())
            .header("Prefer", "return=representation")
            .json(&record);
        let response = Self::check(self.authorize(request).send().await?, "insert").await?;

        let rows: Vec<HistoryRecord> = response.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| MaintenanceError::store("insert returned no row"))
    }

    async fn list(&self) -> Result<Vec<HistoryRecord>> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "calculation_date.desc");

        tracing::debug!("GET {}", url);
        let response = Self::check(
            self.authorize(self.client.get(url)).send().await?,
            "list",
        )
        .await?;

        let mut rows: Vec<HistoryRecord> = response.json().await?;
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));

        tracing::debug!("DELETE {}", url);
        let request = self
            .client
            .delete(url)
            .header("Prefer", "return=representation");
        let response = Self::check(self.authorize(request).send().await?, "delete").await?;

        let deleted: Vec<HistoryRecord> = response.json().await?;
        if deleted.is_empty() {
            return Err(MaintenanceError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
