use std::io::Read;

use encoding_rs::Encoding;
use guard_core::api::CliError;
use serde_json::Value;

/// Reads record input from a file, or from stdin when `path` is `-`.
pub fn read_input_text(path: &str) -> Result<String, CliError> {
    let bytes = if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(path)?
    };
    Ok(decode_input_bytes(&bytes))
}

/// `GUARD_INPUT_ENCODING` wins, then a BOM, then UTF-8 (lossy as a last resort).
pub fn decode_input_bytes(bytes: &[u8]) -> String {
    decode_with_label(bytes, std::env::var("GUARD_INPUT_ENCODING").ok().as_deref())
}

fn decode_with_label(bytes: &[u8], label: Option<&str>) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    if let Some(enc) = label.and_then(|l| Encoding::for_label(l.as_bytes())) {
        tracing::debug!(target: "guard.cli", encoding = enc.name(), bytes = bytes.len(), "using GUARD_INPUT_ENCODING");
        let (cow, _, _) = enc.decode(bytes);
        return cow.into_owned();
    }

    if let Some((enc, bom_len)) = Encoding::for_bom(bytes) {
        tracing::debug!(target: "guard.cli", encoding = enc.name(), bytes = bytes.len(), "detected BOM encoding");
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        return cow.into_owned();
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            tracing::debug!(target: "guard.cli", bytes = bytes.len(), "using UTF-8 lossy conversion");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Items are either one JSON array or one JSON value per line (blank lines
/// skipped). Every item must be an object.
pub fn parse_records(text: &str) -> Result<Vec<Value>, CliError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let items = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<Value>>(trimmed)
            .map_err(|e| CliError::Input(format!("invalid JSON array: {e}")))?
    } else {
        trimmed
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(n, l)| {
                serde_json::from_str::<Value>(l)
                    .map_err(|e| CliError::Input(format!("line {}: {e}", n + 1)))
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    if let Some(pos) = items.iter().position(|v| !v.is_object()) {
        return Err(CliError::Input(format!("item {pos} is not a JSON object")));
    }
    Ok(items)
}
