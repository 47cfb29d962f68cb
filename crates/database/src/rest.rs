use crate::error::StoreError;
use crate::store::SchoolStore;
use async_trait::async_trait;
use configuration::StoreSettings;
use core_types::{NewSchool, School};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Media type that makes PostgREST answer with a single object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// The error body PostgREST returns on failure.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// A `SchoolStore` backed by a Supabase project's REST API (PostgREST).
#[derive(Clone)]
pub struct RestRepository {
    client: reqwest::Client,
    table_url: String,
}

impl RestRepository {
    /// Builds a client that sends the service key with every request.
    pub fn new(settings: &StoreSettings) -> Result<Self, StoreError> {
        let key = HeaderValue::from_str(&settings.key)
            .map_err(|e| StoreError::ConnectionConfigError(format!("Invalid store key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.key))
            .map_err(|e| StoreError::ConnectionConfigError(format!("Invalid store key: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            table_url: format!(
                "{}/rest/v1/{}",
                settings.url.trim_end_matches('/'),
                settings.table
            ),
        })
    }

    /// Reads the body and either decodes it or turns it into a `StoreError::Remote`.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str::<T>(&text)?);
        }

        let message = match serde_json::from_str::<PostgrestError>(&text) {
            Ok(err) => {
                tracing::debug!(code = ?err.code, "PostgREST rejected the request.");
                err.message
            }
            Err(_) if !text.trim().is_empty() => text,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl SchoolStore for RestRepository {
    async fn insert(&self, school: &NewSchool) -> Result<School, StoreError> {
        let response = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(school)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn list_all(&self) -> Result<Vec<School>, StoreError> {
        let response = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*")])
            .send()
            .await?;

        Self::decode(response).await
    }
}
