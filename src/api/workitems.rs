//! Status, detail and attachment endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Map, Value};

use super::request_not_found;
use crate::errors::AppError;
use crate::models::{
    AttachmentQuery, AttachmentsResponse, DetailQuery, RequestRecord, SingleAttachmentResponse,
    StatusResponse,
};
use crate::AppState;

/// GET /status/{key} - Internationalized status of a request.
pub async fn get_status(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let record = state.store.get(&key).ok_or_else(|| request_not_found(&key))?;
    Ok(Json(StatusResponse::for_record(&record)))
}

/// POST /workitemdetails/{key} - Detailed request information, filtered by
/// the requested custom/system fields.
pub async fn workitem_details(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Option<Json<DetailQuery>>,
) -> Result<Json<Value>, AppError> {
    let record = state.store.get(&key).ok_or_else(|| request_not_found(&key))?;
    let query = body.map(|Json(q)| q).unwrap_or_default();
    Ok(Json(build_detail_response(&record, &query)))
}

/// Fixed system metadata keys selectable through `systemFields`.
const SYSTEM_FIELDS: [&str; 6] = ["summary", "reporter", "created", "updated", "status", "priority"];

fn system_field_value(record: &RequestRecord, field: &str) -> Value {
    match field {
        "summary" => json!(record.summary),
        "reporter" => json!(record.applicant),
        "created" => json!(record.created_at),
        "updated" => json!(record.updated_at),
        "status" => json!(record.status.as_str()),
        "priority" => json!(record.priority),
        _ => Value::Null,
    }
}

/// Assemble the detail payload: base metadata, then the history and the
/// custom/system field subsets the caller asked for. An absent or empty
/// `customFields` list returns the full `data` map.
fn build_detail_response(record: &RequestRecord, query: &DetailQuery) -> Value {
    let mut response = json!({
        "key": record.key,
        "summary": record.summary,
        "status": record.status.as_str(),
        "resolution": record.resolution(),
        "created_at": record.created_at,
        "updated_at": record.updated_at,
    });

    if query.wants_history() {
        response["approvalHistory"] = json!(record.approvals);
    }

    match query.custom_fields.as_deref() {
        Some(fields) if !fields.is_empty() => {
            let mut custom = Map::new();
            for field in fields {
                if let Some(value) = record.data.get(field) {
                    custom.insert(field.clone(), value.clone());
                }
            }
            response["customFields"] = Value::Object(custom);
        }
        _ => {
            response["data"] = Value::Object(record.data.clone());
        }
    }

    if let Some(fields) = query.system_fields.as_deref() {
        if !fields.is_empty() {
            let mut system = Map::new();
            for field in fields {
                if SYSTEM_FIELDS.contains(&field.as_str()) {
                    system.insert(field.clone(), system_field_value(record, field));
                }
            }
            response["systemFields"] = Value::Object(system);
        }
    }

    response
}

/// POST /workitemattachments/{key} - Attachment content, all of it or one
/// block selected by filename or id.
pub async fn workitem_attachments(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Option<Json<AttachmentQuery>>,
) -> Result<Json<Value>, AppError> {
    let record = state.store.get(&key).ok_or_else(|| request_not_found(&key))?;
    let query = body.map(|Json(q)| q).unwrap_or_default();

    tracing::debug!(key = %record.key, user = %query.user, "attachment lookup");

    if query.send_all.as_bool() {
        let count = record.attachments.len();
        return Ok(Json(json!(AttachmentsResponse {
            attachments: record.attachments,
            count,
        })));
    }

    let target = record.attachments.into_iter().find(|att| {
        query
            .attachment_name
            .as_deref()
            .is_some_and(|name| att.filename == name)
            || query
                .attachment_id
                .as_deref()
                .is_some_and(|id| att.id.to_string() == id)
    });

    match target {
        Some(attachment) => Ok(Json(json!(SingleAttachmentResponse { attachment }))),
        None => Err(AppError::NotFound("Attachment not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_data, CreateRequestBody};
    use crate::store::RequestStore;

    fn record() -> RequestRecord {
        let store = RequestStore::new();
        store.create(
            CreateRequestBody {
                summary: Some("Test".to_string()),
                pkey: Some("RBGA".to_string()),
                applicant: Some("john.doe".to_string()),
                data: sample_data(),
                ..Default::default()
            },
            false,
        )
    }

    #[test]
    fn test_detail_returns_full_data_without_filter() {
        let record = record();
        let detail = build_detail_response(&record, &DetailQuery::default());
        assert_eq!(detail["key"], "RBGA-1");
        assert_eq!(detail["data"]["rbga.field.termCheck"], "yes");
        assert!(detail.get("customFields").is_none());
        assert!(detail.get("approvalHistory").is_none());
    }

    #[test]
    fn test_detail_custom_fields_filter_is_exact() {
        let record = record();
        let query = DetailQuery {
            custom_fields: Some(vec![
                "rbga.field.description".to_string(),
                "common.field.employee.companycode".to_string(),
            ]),
            ..Default::default()
        };
        let detail = build_detail_response(&record, &query);

        let custom = detail["customFields"].as_object().unwrap();
        assert_eq!(custom.len(), 1);
        assert_eq!(
            custom["rbga.field.description"],
            "Request for new software licenses"
        );
        assert!(detail.get("data").is_none());
    }

    #[test]
    fn test_detail_system_fields_subset() {
        let record = record();
        let query = DetailQuery {
            system_fields: Some(vec![
                "summary".to_string(),
                "reporter".to_string(),
                "nonsense".to_string(),
            ]),
            ..Default::default()
        };
        let detail = build_detail_response(&record, &query);

        let system = detail["systemFields"].as_object().unwrap();
        assert_eq!(system.len(), 2);
        assert_eq!(system["reporter"], "john.doe");
    }

    #[test]
    fn test_detail_history_flag() {
        let record = record();
        let query = DetailQuery {
            approval_history: Some("yes".to_string()),
            ..Default::default()
        };
        let detail = build_detail_response(&record, &query);
        assert!(detail["approvalHistory"].is_array());
    }

    #[test]
    fn test_status_response_enumerates_five_locales() {
        let record = record();
        let status = StatusResponse::for_record(&record);
        assert_eq!(status.status.len(), 5);
        assert_eq!(status.request_key, "RBGA-1");
        assert!(status.resolution.is_none());

        let locales: Vec<&str> = status.status.iter().map(|s| s.locale_name.as_str()).collect();
        assert_eq!(locales, vec!["es_ES", "ja_JP", "ko_KR", "en_UK", "de_DE"]);
    }
}
