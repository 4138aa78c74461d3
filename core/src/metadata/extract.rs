//! Locating the project and scanner lists inside a listing response.
//!
//! The response may be a bare array of projects or an envelope object. Each
//! list has an ordered set of sources; the first source holding a non-empty
//! array wins, and if every array is empty the first source holding any
//! array is used, so an explicitly empty list beats a missing field.

use serde_json::Value;

use super::models::{parse_items, ApiProject, ApiScanner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// The response itself.
    Root,
    /// A nested field, e.g. `["data", "projects"]`.
    Field(&'static [&'static str]),
}

impl ListSource {
    fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Vec<Value>> {
        let mut cur = root;
        if let ListSource::Field(path) = self {
            for key in path.iter() {
                cur = cur.as_object()?.get(*key)?;
            }
        }
        cur.as_array()
    }
}

pub const PROJECT_SOURCES: &[ListSource] = &[
    ListSource::Root,
    ListSource::Field(&["projects"]),
    ListSource::Field(&["data", "projects"]),
    ListSource::Field(&["data"]),
];

pub const SCANNER_SOURCES: &[ListSource] = &[
    ListSource::Field(&["scanners"]),
    ListSource::Field(&["data", "scanners"]),
];

pub fn pick_array<'a>(root: &'a Value, sources: &[ListSource]) -> Option<&'a Vec<Value>> {
    sources
        .iter()
        .filter_map(|s| s.resolve(root))
        .find(|items| !items.is_empty())
        .or_else(|| sources.iter().find_map(|s| s.resolve(root)))
}

#[derive(Debug, Clone, Default)]
pub struct RawCatalog {
    pub projects: Vec<ApiProject>,
    pub scanners: Vec<ApiScanner>,
}

/// Unrecognised shapes produce empty lists rather than errors.
pub fn extract_catalog(response: &Value) -> RawCatalog {
    let projects = pick_array(response, PROJECT_SOURCES)
        .map(|items| parse_items(items.clone()))
        .unwrap_or_default();
    let scanners = pick_array(response, SCANNER_SOURCES)
        .map(|items| parse_items(items.clone()))
        .unwrap_or_default();
    RawCatalog { projects, scanners }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(c: &RawCatalog) -> Vec<String> {
        c.projects.iter().filter_map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_bare_array_is_project_list() {
        let c = extract_catalog(&json!([{"id": "p1", "name": "One"}]));
        assert_eq!(names(&c), vec!["One"]);
        assert!(c.scanners.is_empty());
    }

    #[test]
    fn test_envelope_shapes() {
        let c = extract_catalog(&json!({
            "projects": [{"id": "p1", "name": "Top"}],
            "scanners": [{"name": "Regex:default", "type": "Regex"}]
        }));
        assert_eq!(names(&c), vec!["Top"]);
        assert_eq!(c.scanners.len(), 1);

        let c = extract_catalog(&json!({
            "data": {
                "projects": [{"id": "p2", "name": "Nested"}],
                "scanners": [{"name": "Bias:base", "type": "Bias"}]
            }
        }));
        assert_eq!(names(&c), vec!["Nested"]);
        assert_eq!(c.scanners[0].name.as_deref(), Some("Bias:base"));

        let c = extract_catalog(&json!({"data": [{"id": "p3", "name": "DataArray"}]}));
        assert_eq!(names(&c), vec!["DataArray"]);
    }

    #[test]
    fn test_non_empty_candidate_beats_earlier_empty_one() {
        let c = extract_catalog(&json!({
            "projects": [],
            "data": {"projects": [{"id": "p1", "name": "Later"}]}
        }));
        assert_eq!(names(&c), vec!["Later"]);
    }

    #[test]
    fn test_empty_array_beats_missing_field() {
        let v = json!({"projects": [], "data": "nope"});
        let picked = pick_array(&v, PROJECT_SOURCES).unwrap();
        assert!(picked.is_empty());
        assert!(pick_array(&json!({"other": 1}), PROJECT_SOURCES).is_none());
    }

    #[test]
    fn test_unknown_shape_degrades_to_empty() {
        let c = extract_catalog(&json!("unexpected"));
        assert!(c.projects.is_empty());
        assert!(c.scanners.is_empty());
        let c = extract_catalog(&Value::Null);
        assert!(c.projects.is_empty());
    }
}
