use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScannerCategory {
    Input,
    Output,
    Unknown,
}

impl ScannerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScannerCategory::Input => "input",
            ScannerCategory::Output => "output",
            ScannerCategory::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ScannerCategory::Unknown)
    }
}

impl fmt::Display for ScannerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive match against `input`/`output`; anything else is `Unknown`.
pub fn normalize_category(raw: Option<&str>) -> ScannerCategory {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
        Some(s) if s == "input" => ScannerCategory::Input,
        Some(s) if s == "output" => ScannerCategory::Output,
        _ => ScannerCategory::Unknown,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerSelection {
    pub id: Option<String>,
    pub name: String,
    pub kind: String,
    pub category: ScannerCategory,
}

impl ScannerSelection {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: kind.into(),
            category: ScannerCategory::Unknown,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_category(mut self, category: ScannerCategory) -> Self {
        self.category = category;
        self
    }
}

/// Serialized form of a [`ScannerSelection`].
///
/// Key order is fixed as `id, name, type, category`; absent fields are
/// omitted and an `Unknown` category is never written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScannerToken(String);

impl ScannerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn decode(&self) -> Option<ScannerSelection> {
        decode_token(&self.0)
    }
}

impl From<String> for ScannerToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ScannerToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ScannerToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScannerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize)]
struct TokenRepr<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
}

pub fn encode(selection: &ScannerSelection) -> ScannerToken {
    let repr = TokenRepr {
        id: selection.id.as_deref(),
        name: &selection.name,
        kind: &selection.kind,
        category: selection
            .category
            .is_known()
            .then(|| selection.category.as_str()),
    };
    ScannerToken(serde_json::to_string(&repr).unwrap_or_default())
}

/// Parses one token. Anything that is not an object with string `name` and
/// string `type` yields `None`.
pub fn decode_token(raw: &str) -> Option<ScannerSelection> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let obj = value.as_object()?;
    let name = obj.get("name")?.as_str()?;
    let kind = obj.get("type")?.as_str()?;

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let category = normalize_category(obj.get("category").and_then(Value::as_str));

    Some(ScannerSelection {
        id,
        name: name.to_string(),
        kind: kind.to_string(),
        category,
    })
}

/// Decodes a list of tokens, silently dropping malformed entries and keeping
/// the order of the valid ones.
pub fn decode_tokens<I, S>(tokens: I) -> Vec<ScannerSelection>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .filter_map(|t| decode_token(t.as_ref()))
        .collect()
}

/// Entry of the request's `use` list. The category is UI-only and never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerUse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<ScannerSelection> for ScannerUse {
    fn from(s: ScannerSelection) -> Self {
        Self {
            id: s.id,
            name: s.name,
            kind: s.kind,
        }
    }
}
