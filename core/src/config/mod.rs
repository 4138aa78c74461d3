//! Configuration.
//!
//! - `types.rs` (data structures + defaults)
//! - `load.rs`  (IO: load_default + env overrides)

mod load;
mod types;

pub use load::{load, load_default, load_from_path};
pub use types::*;
