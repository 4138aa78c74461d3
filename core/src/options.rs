//! Read-only option lists built from a metadata bundle.

use serde::{Deserialize, Serialize};

use crate::config::{CacheConfig, UnresolvedCategory};
use crate::metadata::{MetadataBundle, ProjectScannerDefaults};
use crate::scanner::{builtin_options, ScannerCategory, ScannerOption};

pub const NO_PROJECT_NAME: &str = "(No Project)";
pub const NO_PROJECT_DESCRIPTION: &str = "Skip project defaults and manage scanners manually";
pub const DEFAULT_FOR_PROJECT: &str = "default for project";

/// `{name, value, description}` as the host renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Projects sorted by name, behind a sentinel whose empty value means
/// "no project defaults".
pub fn list_projects(bundle: &MetadataBundle) -> Vec<DropdownOption> {
    let sentinel = DropdownOption {
        name: NO_PROJECT_NAME.to_string(),
        value: String::new(),
        description: Some(NO_PROJECT_DESCRIPTION.to_string()),
    };
    std::iter::once(sentinel)
        .chain(bundle.projects.iter().map(|p| DropdownOption {
            name: p.name.clone(),
            value: p.id.clone(),
            description: p.description.clone(),
        }))
        .collect()
}

fn offered_in(option: &ScannerOption, category: ScannerCategory, policy: UnresolvedCategory) -> bool {
    option.category == category
        || (category == ScannerCategory::Input
            && option.category == ScannerCategory::Unknown
            && policy == UnresolvedCategory::AsInput)
}

/// Scanner options for one category, falling back to the built-in catalog
/// when the metadata has none and the fallback is enabled.
pub fn scanner_options(
    bundle: &MetadataBundle,
    category: ScannerCategory,
    cfg: &CacheConfig,
) -> Vec<ScannerOption> {
    let options: Vec<ScannerOption> = bundle
        .scanner_options
        .iter()
        .filter(|o| offered_in(o, category, cfg.unresolved_category))
        .cloned()
        .collect();

    if options.is_empty() && cfg.builtin_fallback {
        tracing::debug!(
            target: "guard.metadata",
            category = %category,
            "no scanners in metadata, using built-in catalog"
        );
        return builtin_options(category);
    }
    options
}

/// Like [`scanner_options`], rendered for the host. Options that belong to the
/// selected project's defaults get a suffix on their description; the value is
/// untouched.
pub fn list_scanners(
    bundle: &MetadataBundle,
    category: ScannerCategory,
    selected_project: Option<&str>,
    cfg: &CacheConfig,
) -> Vec<DropdownOption> {
    let defaults = selected_project
        .filter(|p| !p.is_empty())
        .and_then(|p| bundle.project_defaults.get(p));

    scanner_options(bundle, category, cfg)
        .into_iter()
        .map(|o| {
            let base = o.description.clone().unwrap_or_else(|| o.kind.clone());
            let description = match defaults {
                Some(d) if d.contains(&o.value) => format!("{base} ({DEFAULT_FOR_PROJECT})"),
                _ => base,
            };
            DropdownOption {
                name: o.name,
                value: o.value.into_string(),
                description: Some(description),
            }
        })
        .collect()
}

pub fn defaults_for(bundle: &MetadataBundle, project_id: &str) -> ProjectScannerDefaults {
    if project_id.is_empty() {
        return ProjectScannerDefaults::default();
    }
    bundle
        .project_defaults
        .get(project_id)
        .cloned()
        .unwrap_or_default()
}
