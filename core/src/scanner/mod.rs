//! Scanner selections and their token form.
//!
//! A scanner selection is stored in a dropdown option value as an opaque
//! JSON string (the token). The same token travels back from the host when
//! the user picks scanners and is decoded into the `use` list of a scan
//! request.

mod catalog;
mod codec;
mod option;

pub use catalog::{builtin_options, builtin_scanners, BuiltinScanner};
pub use codec::{
    decode_token, decode_tokens, encode, normalize_category, ScannerCategory, ScannerSelection,
    ScannerToken, ScannerUse,
};
pub use option::ScannerOption;
