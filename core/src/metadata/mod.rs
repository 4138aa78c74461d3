//! Project and scanner metadata fetched from the Guard API.

mod cache;
mod clock;
mod extract;
mod models;

pub use cache::{build_bundle, MetadataBundle, MetadataCache, ProjectOption, ProjectScannerDefaults};
pub use clock::{Clock, SystemClock};
pub use extract::{extract_catalog, pick_array, ListSource, RawCatalog, PROJECT_SOURCES, SCANNER_SOURCES};
pub use models::{ApiActiveConfiguration, ApiProject, ApiProjectScannerConfig, ApiScanner, ApiTypedConfig};

pub(crate) use cache::locale_cmp;
