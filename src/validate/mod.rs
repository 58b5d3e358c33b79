//! Field validation for RBGA create payloads.
//!
//! A static registry drives the checks and the `/rbga/template` schema.
//! Validation is pure: errors are collected in check order and returned as
//! one list, never short-circuited.

use serde_json::Value;

use crate::models::CreateRequestBody;

/// Value shape of a data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Enum(&'static [&'static str]),
    Array,
    /// Approver block: object with a non-empty `approvers` array
    ApproverBlock,
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Enum(_) => "enum",
            FieldKind::Array => "array",
            FieldKind::ApproverBlock => "object",
        }
    }
}

/// One entry of the RBGA field registry.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const WORKFLOW_TYPES: &[&str] = &["Parallel", "Serial"];
const PARALLEL_SELECTIONS: &[&str] = &[
    "One approver approves the request",
    "All the Approvers has to approve",
];

/// RBGA field registry from the published template documentation.
pub const RBGA_FIELDS: &[FieldSpec] = &[
    // Common employee fields
    FieldSpec { key: "common.field.employee.firstname", kind: FieldKind::Text, required: false },
    FieldSpec { key: "common.field.employee.lastname", kind: FieldKind::Text, required: false },
    FieldSpec { key: "common.field.employee.department", kind: FieldKind::Text, required: false },
    FieldSpec { key: "common.field.employee.costcenter", kind: FieldKind::Text, required: false },
    FieldSpec { key: "common.field.employee.location", kind: FieldKind::Text, required: false },
    // RBGA-specific fields
    FieldSpec { key: "rbga.field.termCheck", kind: FieldKind::Enum(&["yes", "no"]), required: true },
    FieldSpec { key: "rbga.field.description", kind: FieldKind::Text, required: true },
    FieldSpec { key: "rbga.field.comments", kind: FieldKind::Text, required: false },
    FieldSpec { key: "rbga.field.workflowType", kind: FieldKind::Enum(WORKFLOW_TYPES), required: true },
    FieldSpec { key: "rbga.field.wf2", kind: FieldKind::Enum(WORKFLOW_TYPES), required: false },
    FieldSpec { key: "rbga.field.wf3", kind: FieldKind::Enum(WORKFLOW_TYPES), required: false },
    FieldSpec { key: "rbga.field.parallelWorkflowSel", kind: FieldKind::Enum(PARALLEL_SELECTIONS), required: false },
    FieldSpec { key: "rbga.field.parallelWorkflowSel2", kind: FieldKind::Enum(PARALLEL_SELECTIONS), required: false },
    FieldSpec { key: "rbga.field.parallelWorkflowSel3", kind: FieldKind::Enum(PARALLEL_SELECTIONS), required: false },
    FieldSpec { key: "rbga.field.tempNew", kind: FieldKind::Enum(&["New Request"]), required: false },
    FieldSpec { key: "rbga.field.approvalstep", kind: FieldKind::Enum(&["One Step Approval", "Multi Step Approval"]), required: false },
    FieldSpec { key: "rbga.field.externalLink", kind: FieldKind::Text, required: false },
    FieldSpec { key: "rbga.field.sourceSystem", kind: FieldKind::Text, required: false },
    FieldSpec { key: "rbga.field.additionalFields", kind: FieldKind::Array, required: false },
    FieldSpec { key: "rbga.field.approver1", kind: FieldKind::ApproverBlock, required: true },
    FieldSpec { key: "rbga.field.whenApproved", kind: FieldKind::ApproverBlock, required: false },
    FieldSpec { key: "rbga.field.whenDeclined", kind: FieldKind::ApproverBlock, required: false },
    FieldSpec { key: "rbga.field.attach", kind: FieldKind::Array, required: false },
    FieldSpec { key: "rbga.field.item", kind: FieldKind::Array, required: false },
    FieldSpec { key: "rbga.field.grid", kind: FieldKind::Array, required: false },
];

fn missing(errors: &mut Vec<String>, field: &str) {
    errors.push(format!("Missing required field: {}", field));
}

/// Validate a create payload.
///
/// `strict = true` is the full-create contract: required fields must be
/// present, fixed values must match, enum fields must hold an allowed
/// option. `strict = false` is the draft contract: summary, applicant and
/// pkey are still required, but data fields are only type-checked when
/// present and enum membership is not enforced.
///
/// Returns the collected error messages in stable check order; an empty
/// list means the payload is valid.
pub fn validate(body: &CreateRequestBody, strict: bool) -> Vec<String> {
    let mut errors = Vec::new();

    if body.summary.as_deref().map_or(true, |s| s.trim().is_empty()) {
        missing(&mut errors, "summary");
    }
    if body.applicant.as_deref().map_or(true, |s| s.trim().is_empty()) {
        missing(&mut errors, "applicant");
    }
    match body.pkey.as_deref() {
        Some("RBGA") => {}
        Some(_) => errors.push("pkey must be 'RBGA'".to_string()),
        None => missing(&mut errors, "pkey"),
    }

    if strict {
        match body.issuetype.as_deref() {
            Some("rbga.issuetype.default") => {}
            Some(_) => errors.push("issuetype must be 'rbga.issuetype.default'".to_string()),
            None => missing(&mut errors, "issuetype"),
        }
        match body.priority.as_deref() {
            Some("default") => {}
            Some(_) => errors.push("priority must be 'default'".to_string()),
            None => missing(&mut errors, "priority"),
        }

        for spec in RBGA_FIELDS.iter().filter(|s| s.required) {
            if !body.data.contains_key(spec.key) {
                missing(&mut errors, spec.key);
            }
        }
    } else if let Some(issuetype) = body.issuetype.as_deref() {
        if issuetype != "rbga.issuetype.default" {
            errors.push("issuetype must be 'rbga.issuetype.default'".to_string());
        }
    }

    for spec in RBGA_FIELDS {
        if let Some(value) = body.data.get(spec.key) {
            check_field(spec, value, strict, &mut errors);
        }
    }

    errors
}

fn check_field(spec: &FieldSpec, value: &Value, strict: bool, errors: &mut Vec<String>) {
    match spec.kind {
        FieldKind::Text => {
            if !value.is_string() {
                errors.push(format!("{} must be a string", spec.key));
            }
        }
        FieldKind::Enum(options) => match value.as_str() {
            None => errors.push(format!("{} must be a string", spec.key)),
            Some(s) if strict && !options.contains(&s) => {
                errors.push(format!("{} must be one of: {}", spec.key, options.join(", ")));
            }
            Some(_) => {}
        },
        FieldKind::Array => {
            if !value.is_array() {
                errors.push(format!("{} must be an array", spec.key));
            }
        }
        FieldKind::ApproverBlock => check_approver_block(spec.key, value, errors),
    }
}

fn check_approver_block(key: &str, value: &Value, errors: &mut Vec<String>) {
    let approvers = match value.as_object().and_then(|o| o.get("approvers")) {
        Some(Value::Array(approvers)) if !approvers.is_empty() => approvers,
        _ => {
            errors.push(format!("{} must contain a non-empty 'approvers' array", key));
            return;
        }
    };

    for (i, approver) in approvers.iter().enumerate() {
        let Some(obj) = approver.as_object() else {
            errors.push(format!("{}: approver {} must be an object", key, i));
            continue;
        };
        for required in ["userid", "description"] {
            if !obj.contains_key(required) {
                errors.push(format!(
                    "{}: approver {} missing required field: {}",
                    key, i, required
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_data;
    use serde_json::json;

    fn full_body() -> CreateRequestBody {
        CreateRequestBody {
            summary: Some("Request for Software License Approval".to_string()),
            pkey: Some("RBGA".to_string()),
            issuetype: Some("rbga.issuetype.default".to_string()),
            applicant: Some("john.doe".to_string()),
            priority: Some("default".to_string()),
            source_system: None,
            data: sample_data(),
            draft: None,
        }
    }

    #[test]
    fn test_valid_full_body_passes() {
        assert!(validate(&full_body(), true).is_empty());
    }

    #[test]
    fn test_missing_fields_are_collected_in_order() {
        let mut body = full_body();
        body.data.remove("rbga.field.termCheck");
        body.data.remove("rbga.field.workflowType");

        let errors = validate(&body, true);
        assert_eq!(
            errors,
            vec![
                "Missing required field: rbga.field.termCheck",
                "Missing required field: rbga.field.workflowType",
            ]
        );
    }

    #[test]
    fn test_missing_summary_and_applicant() {
        let mut body = full_body();
        body.summary = None;
        body.applicant = Some("   ".to_string());

        let errors = validate(&body, true);
        assert_eq!(errors[0], "Missing required field: summary");
        assert_eq!(errors[1], "Missing required field: applicant");
    }

    #[test]
    fn test_invalid_enums() {
        let mut body = full_body();
        body.data
            .insert("rbga.field.termCheck".to_string(), json!("maybe"));
        body.data
            .insert("rbga.field.workflowType".to_string(), json!("Circular"));

        let errors = validate(&body, true);
        assert!(errors.contains(&"rbga.field.termCheck must be one of: yes, no".to_string()));
        assert!(errors
            .contains(&"rbga.field.workflowType must be one of: Parallel, Serial".to_string()));
    }

    #[test]
    fn test_wrong_pkey() {
        let mut body = full_body();
        body.pkey = Some("OTHER".to_string());
        assert_eq!(validate(&body, true), vec!["pkey must be 'RBGA'"]);
    }

    #[test]
    fn test_draft_allows_missing_required_data_fields() {
        let body = CreateRequestBody {
            summary: Some("Draft: Software License Request".to_string()),
            pkey: Some("RBGA".to_string()),
            applicant: Some("john.doe".to_string()),
            data: serde_json::Map::new(),
            ..Default::default()
        };
        assert!(validate(&body, false).is_empty());
    }

    #[test]
    fn test_draft_tolerates_enum_deviation_but_not_type_errors() {
        let mut body = full_body();
        body.data
            .insert("rbga.field.workflowType".to_string(), json!("Circular"));
        body.data
            .insert("rbga.field.description".to_string(), json!(42));

        let errors = validate(&body, false);
        assert_eq!(errors, vec!["rbga.field.description must be a string"]);
    }

    #[test]
    fn test_draft_still_requires_summary() {
        let body = CreateRequestBody {
            pkey: Some("RBGA".to_string()),
            applicant: Some("john.doe".to_string()),
            ..Default::default()
        };
        assert_eq!(validate(&body, false), vec!["Missing required field: summary"]);
    }

    #[test]
    fn test_approver_block_structure() {
        let mut body = full_body();
        body.data
            .insert("rbga.field.approver1".to_string(), json!({ "approvers": [] }));
        let errors = validate(&body, true);
        assert_eq!(
            errors,
            vec!["rbga.field.approver1 must contain a non-empty 'approvers' array"]
        );

        body.data.insert(
            "rbga.field.approver1".to_string(),
            json!({ "approvers": [{ "userid": "ntid" }], "maxApprover": "20" }),
        );
        let errors = validate(&body, true);
        assert_eq!(
            errors,
            vec!["rbga.field.approver1: approver 0 missing required field: description"]
        );
    }
}
