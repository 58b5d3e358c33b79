//! RBGA template endpoint: the field schema published to integrators.

use axum::Json;
use serde_json::{json, Map, Value};

use crate::models::{sample_data, ISSUE_TYPE, PROJECT_KEY};
use crate::validate::{FieldKind, RBGA_FIELDS};

/// GET /rbga/template - Template structure and field definitions.
pub async fn rbga_template() -> Json<Value> {
    let mut data_fields = Map::new();
    for spec in RBGA_FIELDS {
        let mut field = Map::new();
        field.insert("type".to_string(), json!(spec.kind.type_name()));
        field.insert("required".to_string(), json!(spec.required));
        if let FieldKind::Enum(options) = spec.kind {
            field.insert("options".to_string(), json!(options));
        }
        data_fields.insert(spec.key.to_string(), Value::Object(field));
    }

    let sample_payload = json!({
        "summary": "Request for Substitution",
        "pkey": PROJECT_KEY,
        "issuetype": ISSUE_TYPE,
        "applicant": "ntid",
        "priority": "default",
        "data": sample_data(),
    });

    Json(json!({
        "template_name": "RBGA",
        "description": "Request for Budget, Governance & Approval template",
        "version": "1.0",
        "application_key": PROJECT_KEY,
        "issue_type": ISSUE_TYPE,
        "required_fields": {
            "summary": {
                "type": "string",
                "description": "Summary of the Workitem"
            },
            "pkey": {
                "type": "string",
                "value": PROJECT_KEY,
                "description": "Application Key"
            },
            "issuetype": {
                "type": "string",
                "value": ISSUE_TYPE,
                "description": "IssueType of Workitem"
            },
            "applicant": {
                "type": "string",
                "description": "NT id of the applicant who creates the request in lower case"
            },
            "priority": {
                "type": "string",
                "value": "default",
                "description": "Priority of Workitem : default in workon"
            }
        },
        "data_fields": data_fields,
        "sample_payload": sample_payload,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_template_lists_every_registry_field() {
        let Json(template) = rbga_template().await;
        let data_fields = template["data_fields"].as_object().unwrap();
        assert_eq!(data_fields.len(), RBGA_FIELDS.len());
        assert_eq!(data_fields["rbga.field.termCheck"]["type"], "enum");
        assert_eq!(
            data_fields["rbga.field.termCheck"]["options"],
            json!(["yes", "no"])
        );
        assert_eq!(data_fields["rbga.field.approver1"]["required"], true);
    }
}
