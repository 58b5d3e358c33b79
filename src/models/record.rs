//! Stored request records and status localization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// The five locales every status response enumerates, in wire order.
pub const STATUS_LOCALES: [&str; 5] = ["es_ES", "ja_JP", "ko_KR", "en_UK", "de_DE"];

/// Lifecycle status of a stored request.
///
/// There is no production transition logic in the mock; records are created
/// as `Pending` (or `Draft`) and only test fixtures move them further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Draft,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Draft => "Draft",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(RequestStatus::Pending),
            "Approved" => Some(RequestStatus::Approved),
            "Rejected" => Some(RequestStatus::Rejected),
            "Draft" => Some(RequestStatus::Draft),
            _ => None,
        }
    }

    /// Human-readable status text for one of the five supported locales.
    pub fn localized(&self, locale: &str) -> &'static str {
        match (self, locale) {
            (RequestStatus::Pending, "es_ES") => "Pendiente",
            (RequestStatus::Pending, "ja_JP") => "保留中",
            (RequestStatus::Pending, "ko_KR") => "대기 중",
            (RequestStatus::Pending, "de_DE") => "Ausstehend",
            (RequestStatus::Pending, _) => "Pending",
            (RequestStatus::Approved, "es_ES") => "Aprobado",
            (RequestStatus::Approved, "ja_JP") => "承認済み",
            (RequestStatus::Approved, "ko_KR") => "승인됨",
            (RequestStatus::Approved, "de_DE") => "Genehmigt",
            (RequestStatus::Approved, _) => "Approved",
            (RequestStatus::Rejected, "es_ES") => "Rechazado",
            (RequestStatus::Rejected, "ja_JP") => "却下済み",
            (RequestStatus::Rejected, "ko_KR") => "거부됨",
            (RequestStatus::Rejected, "de_DE") => "Abgelehnt",
            (RequestStatus::Rejected, _) => "Rejected",
            (RequestStatus::Draft, "es_ES") => "Borrador",
            (RequestStatus::Draft, "ja_JP") => "下書き",
            (RequestStatus::Draft, "ko_KR") => "임시 저장",
            (RequestStatus::Draft, "de_DE") => "Entwurf",
            (RequestStatus::Draft, _) => "Draft",
        }
    }
}

/// An attachment extracted from `rbga.field.attach` at create time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAttachment {
    pub id: Uuid,
    pub filename: String,
    pub file: String,
    pub created_at: DateTime<Utc>,
}

/// One approval-history entry. The mock never advances workflows, so these
/// are placeholders seeded on the sample record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub action: String,
    pub user: String,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

/// A stored RBGA request: the only persisted entity.
///
/// Immutable once created except for status transitions driven by test
/// fixtures; never deleted within the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    pub key: String,
    pub summary: String,
    pub pkey: String,
    pub issuetype: String,
    /// NT-id, always stored lowercase regardless of input case
    pub applicant: String,
    pub priority: String,
    pub source_system: String,
    pub data: Map<String, Value>,
    pub attachments: Vec<StoredAttachment>,
    pub status: RequestStatus,
    pub approvals: Vec<ApprovalEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RequestRecord {
    /// Resolution shown to clients: only set once a terminal status is
    /// reached.
    pub fn resolution(&self) -> Option<&'static str> {
        match self.status {
            RequestStatus::Approved => Some("Approved"),
            RequestStatus::Rejected => Some("Rejected"),
            RequestStatus::Pending | RequestStatus::Draft => None,
        }
    }
}
