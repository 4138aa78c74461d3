//! Per-record prompt/output validation against the Guard API.

mod run;
mod types;

pub use run::ValidationExecutor;
pub use types::{
    ScanCache, ScanConfig, ScanMetadata, ScanOutcome, ScanOutputs, ScanParameters, ScanPayload,
    ScanRecord, ScanType,
};
