//! Inbound request payloads matching the WorkOn RBGA schema.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Fixed application key for the RBGA template.
pub const PROJECT_KEY: &str = "RBGA";
/// Fixed issue type for RBGA workitems.
pub const ISSUE_TYPE: &str = "rbga.issuetype.default";
/// Fixed priority; WorkOn only supports "default" here.
pub const PRIORITY: &str = "default";
/// Default source system name when the caller supplies none.
pub const DEFAULT_SOURCE_SYSTEM: &str = "WorkON";

/// Body of PUT /createrequest/create and /createdraftrequest/draft.
///
/// Every top-level field is optional so the validator can report all
/// missing fields in one pass instead of failing at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub pkey: Option<String>,
    #[serde(default)]
    pub issuetype: Option<String>,
    #[serde(default)]
    pub applicant: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub source_system: Option<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub draft: Option<bool>,
}

/// One approver inside an approver block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approver {
    pub userid: String,
    pub description: String,
    #[serde(default)]
    pub cc_list: String,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub removable: bool,
    #[serde(default)]
    pub add_after_enabled: bool,
    #[serde(default)]
    pub delete_flag: String,
}

/// Workflow approver block (`rbga.field.approver1`, `whenApproved`,
/// `whenDeclined`). The bool/int values arrive as strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproverBlock {
    pub approvers: Vec<Approver>,
    #[serde(default)]
    pub check_duplicate: String,
    #[serde(default)]
    pub max_approver: String,
    #[serde(rename = "type", default)]
    pub block_type: String,
}

/// One `rbga.field.attach` entry: filename plus base64 content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub file: String,
}

/// One `rbga.field.additionalFields` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalField {
    pub fields: String,
    pub details: String,
}

/// The documented sample `data` map, used by the template endpoint, the
/// seeded record and the tests.
pub fn sample_data() -> Map<String, Value> {
    let value = json!({
        "common.field.employee.firstname": "John",
        "common.field.employee.lastname": "Doe",
        "common.field.employee.department": "IT",
        "common.field.employee.costcenter": "CC001",
        "common.field.employee.location": "Stuttgart",
        "rbga.field.termCheck": "yes",
        "rbga.field.description": "Request for new software licenses",
        "rbga.field.comments": "Urgent approval needed for project",
        "rbga.field.workflowType": "Serial",
        "rbga.field.wf2": "Serial",
        "rbga.field.wf3": "Serial",
        "rbga.field.parallelWorkflowSel": "One approver approves the request",
        "rbga.field.parallelWorkflowSel2": "All the Approvers has to approve",
        "rbga.field.parallelWorkflowSel3": "All the Approvers has to approve",
        "rbga.field.tempNew": "New Request",
        "rbga.field.approvalstep": "One Step Approval",
        "rbga.field.externalLink": "https://www.example.com",
        "rbga.field.additionalFields": [
            { "fields": "Target revision", "details": "Value1" },
            { "fields": "Preview link", "details": "https://www.example.com" }
        ],
        "rbga.field.approver1": {
            "approvers": [
                {
                    "addAfterEnabled": true,
                    "deleteFlag": "Yes",
                    "description": "Manager",
                    "fixed": false,
                    "removable": true,
                    "userid": "manager.test",
                    "ccList": ""
                }
            ],
            "checkDuplicate": "false",
            "maxApprover": "20",
            "type": "1"
        },
        "rbga.field.attach": [
            { "filename": "example.pdf", "file": "Base64EncodedString" }
        ]
    });

    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}
