//! Client library for the WorkOn RBGA REST API.
//!
//! Constructs payloads matching the fixed external schema, authenticates
//! via the static `KeyId` header and deserializes responses. Works against
//! the real API and against the bundled mock server.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{json, Map, Value};

use crate::auth::KEY_ID_HEADER;
use crate::models::{CreatedKey, DetailQuery, StatusResponse, ISSUE_TYPE, PRIORITY, PROJECT_KEY};

/// Wire value of `approvalHistory` requesting the history list.
pub const APPROVAL_HISTORY_YES: &str = "yes";

/// Client-side error: either the transport failed or the API answered with
/// a non-2xx status. The raw body text is preserved for diagnostics.
#[derive(Debug)]
pub enum ClientError {
    Transport(reqwest::Error),
    Api { status: StatusCode, body: String },
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(err) => write!(f, "transport error: {}", err),
            ClientError::Api { status, body } => {
                write!(f, "API error {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(err) => Some(err),
            ClientError::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err)
    }
}

/// Which attachments to fetch.
#[derive(Debug, Clone)]
pub enum AttachmentSelector {
    All,
    Named(String),
}

/// Client for the WorkOn RBGA API.
pub struct WorkOnClient {
    http: reqwest::Client,
    base_url: String,
}

impl WorkOnClient {
    /// Build a client for `base_url`, attaching the `KeyId` header to every
    /// request when a key is given.
    pub fn new(base_url: &str, key_id: Option<&str>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = key_id {
            let value = HeaderValue::from_str(key).map_err(|_| ClientError::Api {
                status: StatusCode::BAD_REQUEST,
                body: "KeyId contains invalid header characters".to_string(),
            })?;
            headers.insert(KEY_ID_HEADER, value);
        }

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new request with full validation.
    ///
    /// `source_system` is injected into `data["rbga.field.sourceSystem"]`,
    /// not supplied at the top level; `applicant` is lowercased per the
    /// NT-id convention.
    pub async fn create_request(
        &self,
        summary: &str,
        applicant: &str,
        data: Map<String, Value>,
        source_system: &str,
    ) -> Result<CreatedKey, ClientError> {
        let payload = self.build_payload(summary, applicant, data, source_system, false);
        let response = self
            .http
            .put(format!("{}/createrequest/create", self.base_url))
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?.json().await.map_err(Into::into)
    }

    /// Create a draft request (partial data allowed).
    pub async fn create_draft_request(
        &self,
        summary: &str,
        applicant: &str,
        data: Map<String, Value>,
        source_system: &str,
    ) -> Result<CreatedKey, ClientError> {
        let payload = self.build_payload(summary, applicant, data, source_system, true);
        let response = self
            .http
            .put(format!("{}/createdraftrequest/draft", self.base_url))
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?.json().await.map_err(Into::into)
    }

    /// Fetch the internationalized status of a request.
    pub async fn request_status(&self, request_key: &str) -> Result<StatusResponse, ClientError> {
        let response = self
            .http
            .get(format!("{}/status/{}", self.base_url, request_key))
            .send()
            .await?;
        Self::check(response).await?.json().await.map_err(Into::into)
    }

    /// Fetch detailed request information, filtered by the query.
    pub async fn workitem_detail(
        &self,
        request_key: &str,
        query: &DetailQuery,
    ) -> Result<Value, ClientError> {
        let response = self
            .http
            .post(format!("{}/workitemdetails/{}", self.base_url, request_key))
            .json(query)
            .send()
            .await?;
        Self::check(response).await?.json().await.map_err(Into::into)
    }

    /// Fetch attachment content for a request.
    pub async fn attachments(
        &self,
        request_key: &str,
        user: &str,
        selector: AttachmentSelector,
    ) -> Result<Value, ClientError> {
        let payload = match selector {
            AttachmentSelector::All => json!({ "user": user, "sendAll": "true" }),
            AttachmentSelector::Named(name) => json!({
                "user": user,
                "sendAll": "false",
                "attachmentName": name,
            }),
        };

        let response = self
            .http
            .post(format!(
                "{}/workitemattachments/{}",
                self.base_url, request_key
            ))
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?.json().await.map_err(Into::into)
    }

    fn build_payload(
        &self,
        summary: &str,
        applicant: &str,
        mut data: Map<String, Value>,
        source_system: &str,
        draft: bool,
    ) -> Value {
        data.insert(
            "rbga.field.sourceSystem".to_string(),
            json!(source_system),
        );

        let mut payload = json!({
            "summary": summary,
            "pkey": PROJECT_KEY,
            "issuetype": ISSUE_TYPE,
            "applicant": applicant.to_lowercase(),
            "priority": PRIORITY,
            "data": data,
        });
        if draft {
            payload["draft"] = json!(true);
        }
        payload
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Api { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_data;

    #[test]
    fn test_payload_injects_source_system_and_lowercases_applicant() {
        let client = WorkOnClient::new("http://localhost:5001/", Some("key")).unwrap();
        let payload = client.build_payload(
            "Summary",
            "John.Doe",
            sample_data(),
            "Rust API Client",
            false,
        );

        assert_eq!(payload["applicant"], "john.doe");
        assert_eq!(payload["pkey"], "RBGA");
        assert_eq!(payload["data"]["rbga.field.sourceSystem"], "Rust API Client");
        assert!(payload.get("sourceSystem").is_none());
        assert!(payload.get("draft").is_none());
    }

    #[test]
    fn test_draft_payload_sets_flag() {
        let client = WorkOnClient::new("http://localhost:5001", None).unwrap();
        let payload =
            client.build_payload("Summary", "ntid", Map::new(), "Rust API Client", true);
        assert_eq!(payload["draft"], true);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = WorkOnClient::new("http://localhost:5001///", None).unwrap();
        assert_eq!(client.base_url, "http://localhost:5001");
    }
}
