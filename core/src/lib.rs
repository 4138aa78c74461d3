//! Core of the TestSavant.AI Guard node: scanner tokens, the project/scanner
//! metadata cache, option loaders and the validation executor.

pub mod api;
pub mod client;
pub mod config;
pub mod context;
pub mod errors;
pub mod executor;
pub mod metadata;
pub mod node;
pub mod options;
pub mod scanner;

pub use context::AppContext;
