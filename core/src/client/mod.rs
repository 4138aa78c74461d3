mod r#trait;

pub use r#trait::GuardApi;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Project + scanner listing on the metadata host. Also used as the
/// credential test request.
pub const PROJECTS_PATH: &str = "/projects/api-key/projects/";

/// Scan endpoint prefix on the guard host; the scan type supplies the last segment.
pub const GUARD_PATH_PREFIX: &str = "/guard/";
