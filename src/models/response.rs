//! Response payloads and query bodies for the workitem endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RequestRecord, StoredAttachment, STATUS_LOCALES};

/// Success body of both create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedKey {
    pub key: String,
}

/// One internationalized status value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedStatus {
    pub i8n_value: String,
    pub locale_name: String,
}

/// Body of GET /status/{key}: the full fixed locale set, not selected by
/// the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: Vec<LocalizedStatus>,
    pub request_key: String,
    pub resolution: Option<String>,
}

impl StatusResponse {
    pub fn for_record(record: &RequestRecord) -> Self {
        let status = STATUS_LOCALES
            .iter()
            .map(|locale| LocalizedStatus {
                i8n_value: record.status.localized(locale).to_string(),
                locale_name: locale.to_string(),
            })
            .collect();

        Self {
            status,
            request_key: record.key.clone(),
            resolution: record.resolution().map(str::to_string),
        }
    }
}

/// Body of POST /workitemdetails/{key}.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_fields: Option<Vec<String>>,
    /// `"yes"` to include the approval history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_history: Option<String>,
}

impl DetailQuery {
    pub fn wants_history(&self) -> bool {
        self.approval_history.as_deref() == Some("yes")
    }
}

/// `sendAll` arrives either as a JSON bool or as the string
/// `"true"`/`"false"` (the original clients send the string form).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireBool {
    Bool(bool),
    Text(String),
}

impl WireBool {
    pub fn as_bool(&self) -> bool {
        match self {
            WireBool::Bool(b) => *b,
            WireBool::Text(s) => s.eq_ignore_ascii_case("true"),
        }
    }
}

impl Default for WireBool {
    fn default() -> Self {
        WireBool::Bool(false)
    }
}

/// Body of POST /workitemattachments/{key}.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentQuery {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub send_all: WireBool,
    #[serde(default)]
    pub attachment_name: Option<String>,
    #[serde(default)]
    pub attachment_id: Option<String>,
}

/// Success body when all attachments are requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentsResponse {
    pub attachments: Vec<StoredAttachment>,
    pub count: usize,
}

/// Success body when a single attachment is requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleAttachmentResponse {
    pub attachment: StoredAttachment,
}

/// One entry of GET /requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSummary {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub applicant: String,
    pub created_at: DateTime<Utc>,
}

/// Body of GET /requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestListResponse {
    pub requests: Vec<RequestSummary>,
    pub count: usize,
}
