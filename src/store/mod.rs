//! In-memory request store.
//!
//! The only persisted entity is the [`RequestRecord`] map. The store is an
//! explicitly owned instance injected into the handlers through `AppState`;
//! key allocation happens under the same lock as the map so concurrent
//! creates can never share a key.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::{
    sample_data, ApprovalEvent, Attachment, CreateRequestBody, RequestRecord, RequestStatus,
    StoredAttachment, DEFAULT_SOURCE_SYSTEM, ISSUE_TYPE, PRIORITY, PROJECT_KEY,
};

/// Prefix of every generated request key.
pub const KEY_PREFIX: &str = "RBGA-";

struct StoreInner {
    records: HashMap<String, RequestRecord>,
    next_id: u64,
}

pub struct RequestStore {
    inner: Mutex<StoreInner>,
}

impl RequestStore {
    /// An empty store; the first allocated key is `RBGA-1`.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                records: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// A store preloaded with the documented `RBGA-1` sample record; the
    /// counter is seeded past it.
    pub fn with_sample_data() -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock().expect("store lock poisoned");
            let record = sample_record();
            inner.next_id = 2;
            inner.records.insert(record.key.clone(), record);
        }
        store
    }

    /// Store a validated create payload and return the new record.
    pub fn create(&self, body: CreateRequestBody, draft: bool) -> RequestRecord {
        let now = Utc::now();
        let attachments = extract_attachments(&body);

        let mut inner = self.inner.lock().expect("store lock poisoned");
        let key = format!("{}{}", KEY_PREFIX, inner.next_id);
        inner.next_id += 1;

        let record = RequestRecord {
            key: key.clone(),
            summary: body.summary.unwrap_or_default(),
            pkey: body.pkey.unwrap_or_else(|| PROJECT_KEY.to_string()),
            issuetype: body.issuetype.unwrap_or_else(|| ISSUE_TYPE.to_string()),
            // Invariant: applicant is stored lowercase regardless of input case
            applicant: body.applicant.unwrap_or_default().to_lowercase(),
            priority: body.priority.unwrap_or_else(|| PRIORITY.to_string()),
            source_system: body
                .source_system
                .or_else(|| {
                    body.data
                        .get("rbga.field.sourceSystem")
                        .and_then(|v| v.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| DEFAULT_SOURCE_SYSTEM.to_string()),
            data: body.data,
            attachments,
            status: if draft {
                RequestStatus::Draft
            } else {
                RequestStatus::Pending
            },
            approvals: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        inner.records.insert(key, record.clone());
        record
    }

    pub fn get(&self, key: &str) -> Option<RequestRecord> {
        self.inner
            .lock()
            .expect("store lock poisoned")
            .records
            .get(key)
            .cloned()
    }

    /// All records, oldest first, optionally filtered by status name.
    pub fn list(&self, status: Option<&str>) -> Vec<RequestRecord> {
        let inner = self.inner.lock().expect("store lock poisoned");
        let mut records: Vec<RequestRecord> = inner
            .records
            .values()
            .filter(|r| status.map_or(true, |s| r.status.as_str() == s))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.key.cmp(&b.key)));
        records
    }

    /// Force a status transition. There is no production transition logic;
    /// this exists for test fixtures exercising the status endpoint.
    pub fn set_status(&self, key: &str, status: RequestStatus) -> bool {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        match inner.records.get_mut(key) {
            Some(record) => {
                record.status = status;
                record.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_attachments(body: &CreateRequestBody) -> Vec<StoredAttachment> {
    let now = Utc::now();
    body.data
        .get("rbga.field.attach")
        .and_then(|v| v.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| serde_json::from_value::<Attachment>(entry.clone()).ok())
                .map(|att| StoredAttachment {
                    id: Uuid::new_v4(),
                    filename: att.filename,
                    file: att.file,
                    created_at: now,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// The documented sample record served out of the box as `RBGA-1`.
fn sample_record() -> RequestRecord {
    let created = Utc::now() - Duration::hours(2);
    let data = sample_data();
    let attachments = data
        .get("rbga.field.attach")
        .and_then(|v| v.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| serde_json::from_value::<Attachment>(entry.clone()).ok())
                .map(|att| StoredAttachment {
                    id: Uuid::new_v4(),
                    filename: att.filename,
                    file: att.file,
                    created_at: created,
                })
                .collect()
        })
        .unwrap_or_default();

    RequestRecord {
        key: format!("{}1", KEY_PREFIX),
        summary: "Sample RBGA Request for Testing".to_string(),
        pkey: PROJECT_KEY.to_string(),
        issuetype: ISSUE_TYPE.to_string(),
        applicant: "test.user".to_string(),
        priority: PRIORITY.to_string(),
        source_system: DEFAULT_SOURCE_SYSTEM.to_string(),
        data,
        attachments,
        status: RequestStatus::Pending,
        approvals: vec![ApprovalEvent {
            action: "submit".to_string(),
            user: "test.user".to_string(),
            comment: "Initial submission".to_string(),
            timestamp: created,
        }],
        created_at: created,
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_data;

    fn body(applicant: &str) -> CreateRequestBody {
        CreateRequestBody {
            summary: Some("Test".to_string()),
            pkey: Some("RBGA".to_string()),
            issuetype: Some(ISSUE_TYPE.to_string()),
            applicant: Some(applicant.to_string()),
            priority: Some(PRIORITY.to_string()),
            data: sample_data(),
            ..Default::default()
        }
    }

    #[test]
    fn test_keys_are_monotonic() {
        let store = RequestStore::new();
        let first = store.create(body("a"), false);
        let second = store.create(body("b"), true);
        assert_eq!(first.key, "RBGA-1");
        assert_eq!(second.key, "RBGA-2");
        assert_eq!(second.status, RequestStatus::Draft);
    }

    #[test]
    fn test_sample_seed_reserves_first_key() {
        let store = RequestStore::with_sample_data();
        assert!(store.get("RBGA-1").is_some());
        let next = store.create(body("a"), false);
        assert_eq!(next.key, "RBGA-2");
    }

    #[test]
    fn test_applicant_is_lowercased() {
        let store = RequestStore::new();
        let record = store.create(body("John.Doe"), false);
        assert_eq!(record.applicant, "john.doe");
        assert_eq!(store.get(&record.key).unwrap().applicant, "john.doe");
    }

    #[test]
    fn test_attachments_are_extracted() {
        let store = RequestStore::new();
        let record = store.create(body("a"), false);
        assert_eq!(record.attachments.len(), 1);
        assert_eq!(record.attachments[0].filename, "example.pdf");
    }

    #[test]
    fn test_list_filters_by_status() {
        let store = RequestStore::new();
        store.create(body("a"), false);
        store.create(body("b"), true);
        assert_eq!(store.list(None).len(), 2);
        assert_eq!(store.list(Some("Draft")).len(), 1);
        assert_eq!(store.list(Some("Approved")).len(), 0);
    }

    #[test]
    fn test_get_unknown_key() {
        let store = RequestStore::new();
        assert!(store.get("RBGA-999").is_none());
    }

    #[test]
    fn test_concurrent_creates_get_unique_keys() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let store = Arc::new(RequestStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                (0..25)
                    .map(|_| store.create(body("a"), false).key)
                    .collect::<Vec<_>>()
            }));
        }

        let mut keys = HashSet::new();
        for handle in handles {
            for key in handle.join().unwrap() {
                assert!(keys.insert(key), "duplicate key allocated");
            }
        }
        assert_eq!(keys.len(), 200);
    }
}
