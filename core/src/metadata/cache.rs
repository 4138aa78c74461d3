use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::extract::{extract_catalog, RawCatalog};
use super::models::{ApiProject, ApiScanner};
use crate::client::GuardApi;
use crate::config::{CacheConfig, UnresolvedCategory};
use crate::errors::ApiError;
use crate::scanner::{normalize_category, ScannerCategory, ScannerOption, ScannerSelection, ScannerToken};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOption {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Scanner tokens saved in a project's active configuration, by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectScannerDefaults {
    pub input: Vec<ScannerToken>,
    pub output: Vec<ScannerToken>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unresolved: Vec<ScannerToken>,
}

impl ProjectScannerDefaults {
    pub fn for_category(&self, category: ScannerCategory) -> &[ScannerToken] {
        match category {
            ScannerCategory::Input => &self.input,
            ScannerCategory::Output => &self.output,
            ScannerCategory::Unknown => &self.unresolved,
        }
    }

    pub fn contains(&self, token: &ScannerToken) -> bool {
        self.input.contains(token) || self.output.contains(token) || self.unresolved.contains(token)
    }

    fn push_unique(&mut self, category: ScannerCategory, token: &ScannerToken) {
        let bucket = match category {
            ScannerCategory::Input => &mut self.input,
            ScannerCategory::Output => &mut self.output,
            ScannerCategory::Unknown => &mut self.unresolved,
        };
        if !bucket.contains(token) {
            bucket.push(token.clone());
        }
    }

    fn retain_known(&mut self, available: &HashSet<&ScannerToken>) {
        self.input.retain(|t| available.contains(t));
        self.output.retain(|t| available.contains(t));
        self.unresolved.retain(|t| available.contains(t));
    }
}

/// One fetch of the project listing, normalised.
#[derive(Debug, Clone, Serialize)]
pub struct MetadataBundle {
    pub projects: Vec<ProjectOption>,
    pub scanner_options: Vec<ScannerOption>,
    pub project_defaults: HashMap<String, ProjectScannerDefaults>,
    pub fetched_at: DateTime<Utc>,
}

/// Case-insensitive first; on a tie lowercase sorts before uppercase.
pub(crate) fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Dedup map of scanner options. The first record for a key wins; later
/// records only fill in a missing description or tag.
#[derive(Debug, Default)]
struct OptionSet {
    options: Vec<ScannerOption>,
    index: HashMap<String, usize>,
}

impl OptionSet {
    fn upsert(&mut self, raw: &ApiScanner, type_override: Option<&str>) -> Option<usize> {
        let name = raw.name.as_deref().unwrap_or("");
        let key = raw.id.as_deref().unwrap_or(name);
        let existing = if key.is_empty() {
            None
        } else {
            self.index.get(key).copied()
        };

        let kind = non_empty(type_override)
            .or_else(|| non_empty(raw.default_config.as_ref().and_then(|c| c.kind.as_deref())))
            .or_else(|| non_empty(raw.kind.as_deref()));

        let kind = match kind {
            Some(k) if !name.is_empty() => k,
            _ => return existing,
        };

        if let Some(idx) = existing {
            let opt = &mut self.options[idx];
            if opt.description.as_deref().map_or(true, str::is_empty) {
                opt.description = raw.description.clone();
            }
            if opt.tag.as_deref().map_or(true, str::is_empty) {
                opt.tag = raw.tag.clone();
            }
            return Some(idx);
        }

        let mut selection = ScannerSelection::new(name, kind)
            .with_category(normalize_category(raw.category.as_deref()));
        selection.id = raw.id.clone();

        let mut opt = ScannerOption::from_selection(selection);
        opt.description = raw.description.clone();
        opt.tag = raw.tag.clone();

        let idx = self.options.len();
        self.index.insert(key.to_string(), idx);
        self.options.push(opt);
        Some(idx)
    }
}

fn to_project_option(project: &ApiProject) -> Option<ProjectOption> {
    let id = non_empty(project.id.as_deref()).or(non_empty(project.name.as_deref()))?;
    let name = non_empty(project.name.as_deref()).or(non_empty(project.id.as_deref()))?;
    Some(ProjectOption {
        id: id.to_string(),
        name: name.to_string(),
        description: project.description.clone(),
    })
}

/// Builds a bundle from the raw lists: top-level scanner catalog first, then
/// each project's active configuration, all feeding one dedup map.
pub fn build_bundle(
    catalog: &RawCatalog,
    policy: UnresolvedCategory,
    fetched_at: DateTime<Utc>,
) -> MetadataBundle {
    let mut set = OptionSet::default();
    let mut project_defaults: HashMap<String, ProjectScannerDefaults> = HashMap::new();

    for scanner in &catalog.scanners {
        set.upsert(scanner, None);
    }

    for project in &catalog.projects {
        let Some(project_id) = project.id.clone() else {
            continue;
        };

        let mut defaults = ProjectScannerDefaults::default();
        let configured = project
            .active_configuration
            .as_ref()
            .map(|c| c.scanners.as_slice())
            .unwrap_or_default();

        for entry in configured {
            let Some(meta) = entry.scanner.as_ref() else {
                continue;
            };
            let type_override = entry.config.as_ref().and_then(|c| c.kind.as_deref());
            let Some(idx) = set.upsert(meta, type_override) else {
                continue;
            };
            let opt = &set.options[idx];
            defaults.push_unique(opt.category, &opt.value);
            if opt.category == ScannerCategory::Unknown && policy == UnresolvedCategory::AsInput {
                defaults.push_unique(ScannerCategory::Input, &opt.value);
            }
        }

        project_defaults.entry(project_id).or_insert(defaults);
    }

    let mut scanner_options = set.options;
    scanner_options.sort_by(|a, b| locale_cmp(&a.name, &b.name));

    for opt in scanner_options.iter().filter(|o| !o.category.is_known()) {
        tracing::warn!(
            target: "guard.metadata",
            scanner = %opt.name,
            kind = %opt.kind,
            policy = ?policy,
            "scanner category could not be resolved"
        );
    }

    let available: HashSet<&ScannerToken> = scanner_options.iter().map(|o| &o.value).collect();
    for defaults in project_defaults.values_mut() {
        defaults.retain_known(&available);
    }

    let mut seen = HashSet::new();
    let mut projects: Vec<ProjectOption> = catalog
        .projects
        .iter()
        .filter_map(to_project_option)
        .filter(|p| seen.insert(p.id.clone()))
        .collect();
    projects.sort_by(|a, b| locale_cmp(&a.name, &b.name));

    MetadataBundle {
        projects,
        scanner_options,
        project_defaults,
        fetched_at,
    }
}

/// Time-boxed copy of the project listing. A refresh replaces the whole
/// bundle; a failed refresh leaves the previous one in place.
pub struct MetadataCache {
    bundle: Option<Arc<MetadataBundle>>,
    ttl: Duration,
    policy: UnresolvedCategory,
    clock: Arc<dyn Clock>,
}

impl MetadataCache {
    pub fn new(cfg: &CacheConfig) -> Self {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    pub fn with_clock(cfg: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            bundle: None,
            ttl: i64::try_from(cfg.ttl_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
            policy: cfg.unresolved_category,
            clock,
        }
    }

    /// Last built bundle, fresh or not.
    pub fn current(&self) -> Option<Arc<MetadataBundle>> {
        self.bundle.clone()
    }

    fn fresh(&self) -> Option<Arc<MetadataBundle>> {
        let bundle = self.bundle.as_ref()?;
        let age = self.clock.now() - bundle.fetched_at;
        (age <= self.ttl).then(|| bundle.clone())
    }

    pub async fn ensure_fresh(&mut self, api: &dyn GuardApi) -> Result<Arc<MetadataBundle>, ApiError> {
        if let Some(bundle) = self.fresh() {
            tracing::debug!(
                target: "guard.metadata",
                fetched_at = %bundle.fetched_at,
                "metadata cache hit"
            );
            return Ok(bundle);
        }

        tracing::debug!(target: "guard.metadata", api = api.name(), "metadata cache miss, fetching");
        let started = Instant::now();
        let response = api.fetch_projects().await?;
        let catalog = extract_catalog(&response);
        let bundle = Arc::new(build_bundle(&catalog, self.policy, self.clock.now()));

        tracing::info!(
            target: "guard.metadata",
            projects = bundle.projects.len(),
            scanners = bundle.scanner_options.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "metadata cache refreshed"
        );

        self.bundle = Some(bundle.clone());
        Ok(bundle)
    }
}
