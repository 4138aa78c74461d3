//! Shared fakes for the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use guard_core::api::{ApiError, AppConfig, AppContext, GuardApi, ScanPayload, ScanType};
use guard_core::metadata::Clock;
use serde_json::{json, Value};

/// In-memory Guard API. The listing can be swapped between fetches and scan
/// results are served in order.
#[derive(Default)]
pub struct FakeApi {
    listing: Mutex<Value>,
    fail_listing: Mutex<bool>,
    fetches: AtomicUsize,
    scan_results: Mutex<VecDeque<Result<Value, ApiError>>>,
    scans: Mutex<Vec<(ScanType, ScanPayload)>>,
}

impl FakeApi {
    pub fn with_listing(listing: Value) -> Arc<Self> {
        let api = Self::default();
        *api.listing.lock().unwrap() = listing;
        Arc::new(api)
    }

    pub fn set_listing(&self, listing: Value) {
        *self.listing.lock().unwrap() = listing;
    }

    pub fn fail_listing(&self, fail: bool) {
        *self.fail_listing.lock().unwrap() = fail;
    }

    pub fn push_scan(&self, result: Result<Value, ApiError>) {
        self.scan_results.lock().unwrap().push_back(result);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn scans(&self) -> Vec<(ScanType, ScanPayload)> {
        self.scans.lock().unwrap().clone()
    }
}

#[async_trait]
impl GuardApi for FakeApi {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_projects(&self) -> Result<Value, ApiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if *self.fail_listing.lock().unwrap() {
            return Err(ApiError::Unauthorized);
        }
        Ok(self.listing.lock().unwrap().clone())
    }

    async fn scan(&self, scan_type: ScanType, payload: &ScanPayload) -> Result<Value, ApiError> {
        self.scans.lock().unwrap().push((scan_type, payload.clone()));
        self.scan_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"is_valid": true})))
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()))
}

pub fn context(api: &Arc<FakeApi>, clock: &Arc<ManualClock>, cfg: AppConfig) -> AppContext {
    AppContext::with_clock(cfg, api.clone(), clock.clone())
}

/// Two projects, three scanners: A uses X and Y (input), B uses Z (output).
pub fn two_project_listing() -> Value {
    json!({
        "projects": [
            {
                "id": "proj-b",
                "name": "Billing Bot",
                "active_configuration": {"scanners": [
                    {"scanner": {"id": "z", "name": "Zeta Toxicity", "type": "Toxicity", "category": "output"}}
                ]}
            },
            {
                "id": "proj-a",
                "name": "Assistant",
                "description": "support assistant",
                "active_configuration": {"scanners": [
                    {"scanner": {"id": "x", "name": "Xray Injection", "type": "PromptInjection", "category": "input"}},
                    {"config": {"type": "Secrets"},
                     "scanner": {"id": "y", "name": "Yankee Secrets", "type": "Raw", "category": "INPUT"}}
                ]}
            }
        ]
    })
}
