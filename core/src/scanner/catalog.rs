//! Scanners the Guard API ships with, used when the account metadata does not
//! list any for a category.

use super::codec::{ScannerCategory, ScannerSelection};
use super::option::ScannerOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinScanner {
    pub name: &'static str,
    pub kind: &'static str,
}

const fn s(name: &'static str, kind: &'static str) -> BuiltinScanner {
    BuiltinScanner { name, kind }
}

const INPUT_SCANNERS: &[BuiltinScanner] = &[
    s("PromptInjection:base", "PromptInjection"),
    s("Regex:default", "Regex"),
    s("Gibberish:base", "Gibberish"),
    s("BanSubstrings:default", "BanSubstrings"),
    s("BanTopics:base", "BanTopics"),
    s("Language:base", "Language"),
    s("Toxicity:base", "Toxicity"),
    s("Anonymize:base", "Anonymize"),
    s("InvisibleText:default", "InvisibleText"),
    s("Secrets:default", "Secrets"),
    s("LLM:default", "LLM"),
    s("TokenLimit:default", "TokenLimit"),
];

const OUTPUT_SCANNERS: &[BuiltinScanner] = &[
    s("Toxicity:base", "Toxicity"),
    s("Bias:base", "Bias"),
    s("Anonymize:base", "Anonymize"),
    s("BanCode:small", "BanCode"),
    s("BanSubstrings:default", "BanSubstrings"),
    s("LanguageSame:base", "LanguageSame"),
    s("Language:base", "Language"),
    s("BanCompetitors:base", "BanCompetitors"),
    s("FactualConsistency:base", "FactualConsistency"),
    s("ReadingTime:default", "ReadingTime"),
    s("MaliciousURLs:base", "MaliciousURLs"),
    s("JSON:default", "JSON"),
    s("NoRefusalLight:default", "NoRefusalLight"),
    s("NoRefusal:base", "NoRefusal"),
    s("Sentiment:default", "Sentiment"),
];

pub fn builtin_scanners(category: ScannerCategory) -> &'static [BuiltinScanner] {
    match category {
        ScannerCategory::Input => INPUT_SCANNERS,
        ScannerCategory::Output => OUTPUT_SCANNERS,
        ScannerCategory::Unknown => &[],
    }
}

/// Catalog entries as dropdown options, in catalog order. The description is
/// the scanner type.
pub fn builtin_options(category: ScannerCategory) -> Vec<ScannerOption> {
    builtin_scanners(category)
        .iter()
        .map(|b| {
            let mut opt = ScannerOption::from_selection(
                ScannerSelection::new(b.name, b.kind).with_category(category),
            );
            opt.description = Some(b.kind.to_string());
            opt
        })
        .collect()
}
