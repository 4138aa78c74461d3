use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::GUARD_PATH_PREFIX;
use crate::scanner::{ScannerCategory, ScannerUse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    #[default]
    Input,
    Output,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Input => "input",
            ScanType::Output => "output",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ScanType::Input => "prompt-input",
            ScanType::Output => "prompt-output",
        }
    }

    pub fn path(&self) -> String {
        format!("{GUARD_PATH_PREFIX}{}", self.endpoint())
    }

    pub fn category(&self) -> ScannerCategory {
        match self {
            ScanType::Input => ScannerCategory::Input,
            ScanType::Output => ScannerCategory::Output,
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" => Ok(ScanType::Input),
            "output" => Ok(ScanType::Output),
            other => Err(format!("unknown scan type: {other}")),
        }
    }
}

/// Node parameters as resolved for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanParameters {
    #[serde(default)]
    pub scan_type: ScanType,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub scanners_input: Vec<String>,
    #[serde(default)]
    pub scanners_output: Vec<String>,
}

impl ScanParameters {
    /// Tokens of the scanner field that is visible for the scan type.
    pub fn selected_tokens(&self) -> &[String] {
        match self.scan_type {
            ScanType::Input => &self.scanners_input,
            ScanType::Output => &self.scanners_output,
        }
    }
}

/// One input item: its parameters plus the item's own JSON, which supplies
/// `prompt`/`output` when the parameters leave them blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub params: ScanParameters,
    pub json: Value,
}

impl ScanRecord {
    pub fn new(params: ScanParameters, json: Value) -> Self {
        Self { params, json }
    }

    fn item_text(&self, key: &str) -> String {
        self.json
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn effective_prompt(&self) -> String {
        if self.params.prompt.is_empty() {
            self.item_text("prompt")
        } else {
            self.params.prompt.clone()
        }
    }

    pub fn effective_output(&self) -> String {
        if self.params.output.is_empty() {
            self.item_text("output")
        } else {
            self.params.output.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanCache {
    pub enabled: bool,
    pub ttl: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub project_id: Option<String>,
    pub fail_fast: bool,
    pub cache: ScanCache,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanMetadata {
    #[serde(rename = "project-type")]
    pub project_type: String,
    pub session: String,
    pub file: String,
    pub tags: Vec<String>,
    pub name: String,
}

/// Body of `POST /guard/prompt-{input,output}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPayload {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub output: Option<String>,
    pub config: ScanConfig,
    pub metadata: ScanMetadata,
    #[serde(rename = "use")]
    pub scanners: Vec<ScannerUse>,
}

/// A classified record. Exactly one of `result`/`error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
    pub item: usize,
    pub valid: bool,
    pub prompt: String,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanOutcome {
    pub fn scanned(item: usize, prompt: String, output: String, result: Value) -> Self {
        let valid = result.get("is_valid") == Some(&Value::Bool(true));
        Self {
            item,
            valid,
            prompt,
            output,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(item: usize, prompt: String, output: String, error: String) -> Self {
        Self {
            item,
            valid: false,
            prompt,
            output,
            result: None,
            error: Some(error),
        }
    }
}

/// The two output channels, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanOutputs {
    pub valid: Vec<ScanOutcome>,
    #[serde(rename = "not valid")]
    pub not_valid: Vec<ScanOutcome>,
}

impl ScanOutputs {
    pub fn push(&mut self, outcome: ScanOutcome) {
        if outcome.valid {
            self.valid.push(outcome);
        } else {
            self.not_valid.push(outcome);
        }
    }

    pub fn len(&self) -> usize {
        self.valid.len() + self.not_valid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
