use serde::{Deserialize, Serialize};

use super::codec::{encode, ScannerCategory, ScannerSelection, ScannerToken};

/// A scanner offered in a dropdown. `value` is the token the host stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerOption {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: ScannerCategory,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tag: Option<String>,
    pub value: ScannerToken,
}

impl ScannerOption {
    pub fn from_selection(selection: ScannerSelection) -> Self {
        let value = encode(&selection);
        Self {
            id: selection.id,
            name: selection.name,
            kind: selection.kind,
            category: selection.category,
            description: None,
            tag: None,
            value,
        }
    }

    pub fn selection(&self) -> ScannerSelection {
        ScannerSelection {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind.clone(),
            category: self.category,
        }
    }

    /// Dedup key: id when present, otherwise the name.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}
