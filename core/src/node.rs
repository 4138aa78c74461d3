//! Host-facing description of the node and its credential.

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::{API_KEY_HEADER, PROJECTS_PATH};
use crate::executor::ScanType;

pub const NODE_NAME: &str = "testSavantGuard";
pub const CREDENTIAL_NAME: &str = "testSavantGuardApi";

pub const LOAD_PROJECTS: &str = "getProjects";
pub const LOAD_INPUT_SCANNERS: &str = "getInputScanners";
pub const LOAD_OUTPUT_SCANNERS: &str = "getOutputScanners";

pub const OUTPUT_VALID: &str = "valid";
pub const OUTPUT_NOT_VALID: &str = "not valid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
    String,
    Options,
    MultiOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticOption {
    pub name: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub default: Value,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<StaticOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_options_method: Option<&'static str>,
    /// Only shown when the scan type parameter has this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_for_scan_type: Option<ScanType>,
}

impl NodeProperty {
    fn new(
        display_name: &'static str,
        name: &'static str,
        kind: PropertyKind,
        default: Value,
        description: &'static str,
    ) -> Self {
        Self {
            display_name,
            name,
            kind,
            default,
            description,
            hint: None,
            placeholder: None,
            options: Vec::new(),
            load_options_method: None,
            show_for_scan_type: None,
        }
    }

    fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    fn load_options(mut self, method: &'static str) -> Self {
        self.load_options_method = Some(method);
        self
    }

    fn shown_for(mut self, scan_type: ScanType) -> Self {
        self.show_for_scan_type = Some(scan_type);
        self
    }

    /// Whether the host should render this field for the given scan type.
    pub fn is_visible(&self, scan_type: ScanType) -> bool {
        self.show_for_scan_type.map_or(true, |s| s == scan_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: &'static str,
    pub name: &'static str,
    pub version: u32,
    pub description: &'static str,
    pub subtitle: &'static str,
    pub credentials: Vec<&'static str>,
    pub output_names: Vec<&'static str>,
    pub properties: Vec<NodeProperty>,
}

pub fn node_description() -> NodeDescription {
    NodeDescription {
        display_name: "TestSavant.AI",
        name: NODE_NAME,
        version: 1,
        description: "Validates a prompt or output using TestSavant.AI Guard API",
        subtitle: "Validate prompts and outputs for safety",
        credentials: vec![CREDENTIAL_NAME],
        output_names: vec![OUTPUT_VALID, OUTPUT_NOT_VALID],
        properties: vec![
            NodeProperty::new(
                "Prompt",
                "prompt",
                PropertyKind::String,
                json!(""),
                "Prompt to scan; can be blank if coming from input",
            )
            .hint("The input prompt to the LLM, required for input scans")
            .placeholder("Enter prompt text here"),
            NodeProperty::new(
                "Output",
                "output",
                PropertyKind::String,
                json!(""),
                "Output to scan (optional)",
            )
            .hint("The output of the LLM, required for output scans")
            .placeholder("Enter output text here"),
            NodeProperty::new(
                "Project Name or ID",
                "projectId",
                PropertyKind::Options,
                json!(""),
                "Project whose saved scanners are used when none are selected",
            )
            .load_options(LOAD_PROJECTS),
            NodeProperty {
                options: vec![
                    StaticOption {
                        name: "Input",
                        value: "input",
                    },
                    StaticOption {
                        name: "Output",
                        value: "output",
                    },
                ],
                ..NodeProperty::new(
                    "Scan Type",
                    "scanType",
                    PropertyKind::Options,
                    json!("input"),
                    "Whether this is an input or output scan",
                )
            },
            NodeProperty::new(
                "Scanners",
                "scannersInput",
                PropertyKind::MultiOptions,
                json!([]),
                "Select scanners to run for input scans",
            )
            .load_options(LOAD_INPUT_SCANNERS)
            .shown_for(ScanType::Input),
            NodeProperty::new(
                "Scanners",
                "scannersOutput",
                PropertyKind::MultiOptions,
                json!([]),
                "Select scanners to run for output scans",
            )
            .load_options(LOAD_OUTPUT_SCANNERS)
            .shown_for(ScanType::Output),
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTestRequest {
    pub method: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescription {
    pub name: &'static str,
    pub display_name: &'static str,
    pub documentation_url: &'static str,
    pub properties: Vec<NodeProperty>,
    /// Header name -> credential property it is filled from.
    pub auth_headers: Vec<(&'static str, &'static str)>,
    pub test: CredentialTestRequest,
}

pub fn credential_description() -> CredentialDescription {
    CredentialDescription {
        name: CREDENTIAL_NAME,
        display_name: "TestSavant.AI API",
        documentation_url: "https://docs.testsavant.ai",
        properties: vec![NodeProperty::new(
            "API Key",
            "apiKey",
            PropertyKind::String,
            json!(""),
            "Create an API key in app.testsavant.ai under Settings, API Keys",
        )],
        auth_headers: vec![(API_KEY_HEADER, "apiKey")],
        test: CredentialTestRequest {
            method: "GET",
            url: PROJECTS_PATH,
        },
    }
}
