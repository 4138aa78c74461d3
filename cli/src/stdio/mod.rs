pub mod input;

pub use input::{parse_records, read_input_text};
