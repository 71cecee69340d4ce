use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store document already exists")]
    Conflict,

    #[error("store document not found")]
    NotFound,

    #[error("store rejected credentials")]
    Unauthorized,

    #[error("store returned HTTP {0}")]
    Status(u16),

    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store response did not parse: {0}")]
    Decode(String),
}

/// Filter, ordering and paging operators understood by the document API,
/// serialized into its JSON query-string format.
#[derive(Clone, Debug)]
pub enum Query {
    Equal(&'static str, serde_json::Value),
    OrderDesc(&'static str),
    Limit(usize),
}

impl Query {
    pub fn equal(attribute: &'static str, value: impl Into<serde_json::Value>) -> Self {
        Query::Equal(attribute, value.into())
    }

    fn to_json(&self) -> String {
        match self {
            Query::Equal(attribute, value) => {
                json!({ "method": "equal", "attribute": attribute, "values": [value] }).to_string()
            },
            Query::OrderDesc(attribute) => {
                json!({ "method": "orderDesc", "attribute": attribute }).to_string()
            },
            Query::Limit(n) => json!({ "method": "limit", "values": [n] }).to_string(),
        }
    }
}

// No `default` on `documents`: serde_derive would infer a `T: Default`
// bound for it, which plain payload types do not carry.
#[derive(Debug, Deserialize)]
pub struct DocumentList<T> {
    #[serde(default)]
    pub total: u64,
    pub documents: Vec<T>,
}

/// Client for one collection of an Appwrite-compatible document backend.
pub struct AppwriteClient {
    client: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    collection_id: String,
}

impl AppwriteClient {
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        project_id: String,
        api_key: String,
        database_id: String,
        collection_id: String,
    ) -> Self {
        if project_id.trim().is_empty() {
            tracing::warn!("no APPWRITE_PROJECT_ID provided; search tracking will be disabled");
        }

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id,
            api_key,
            database_id,
            collection_id,
        }
    }

    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        queries: &[Query],
    ) -> Result<DocumentList<T>, StoreError> {
        let params: Vec<(&str, String)> =
            queries.iter().map(|q| ("queries[]", q.to_json())).collect();

        let response =
            self.request(Method::GET, self.documents_url()).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Creates a document under the caller-chosen id. The backend enforces id
    /// uniqueness, so a duplicate create surfaces as [`StoreError::Conflict`].
    pub async fn create_document<D: Serialize>(
        &self,
        document_id: &str,
        data: &D,
    ) -> Result<(), StoreError> {
        let body = json!({ "documentId": document_id, "data": data });
        let response = self.request(Method::POST, self.documents_url()).json(&body).send().await?;
        expect_success(&response)
    }

    /// Partial update: only the attributes present in `data` change.
    pub async fn update_document<D: Serialize>(
        &self,
        document_id: &str,
        data: &D,
    ) -> Result<(), StoreError> {
        let body = json!({ "data": data });
        let response =
            self.request(Method::PATCH, self.document_url(document_id)).json(&body).send().await?;
        expect_success(&response)
    }

    /// Server-side atomic add on a numeric attribute; no client-side
    /// read-modify-write is involved.
    pub async fn increment_attribute(
        &self,
        document_id: &str,
        attribute: &str,
        value: i64,
    ) -> Result<(), StoreError> {
        let url = format!("{}/{}/increment", self.document_url(document_id), attribute);
        let body = json!({ "value": value });
        let response = self.request(Method::PATCH, url).json(&body).send().await?;
        expect_success(&response)
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, self.collection_id
        )
    }

    fn document_url(&self, document_id: &str) -> String {
        format!("{}/{}", self.documents_url(), document_id)
    }

    fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
    }
}

fn expect_success(response: &reqwest::Response) -> Result<(), StoreError> {
    let status = response.status();
    if status.is_success() { Ok(()) } else { Err(status_error(status)) }
}

fn status_error(status: StatusCode) -> StoreError {
    match status {
        StatusCode::CONFLICT => StoreError::Conflict,
        StatusCode::NOT_FOUND => StoreError::NotFound,
        StatusCode::UNAUTHORIZED => StoreError::Unauthorized,
        status => StoreError::Status(status.as_u16()),
    }
}
