//! Language utilities for display names
//!
//! The translation service reports codes such as `fr`, `haw`, `zh-CN` or
//! `mni-Mtei`. Codes are compared verbatim everywhere else in the crate; this
//! module only derives human-readable names for progress output.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Primary subtag of a BCP-47 style code (`zh-CN` -> `zh`)
pub fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code).trim()
}

/// Get the English language name from an ISO 639-1 or 639-3 code
pub fn get_language_name(code: &str) -> Result<String> {
    let primary = primary_subtag(code).to_lowercase();

    let lang = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Unknown language code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Pick the name shown next to a code: the service's own name when it sent
/// one, otherwise the ISO name when the code is recognised
pub fn resolve_display_name(code: &str, service_name: Option<&str>) -> Option<String> {
    match service_name.map(str::trim) {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => get_language_name(code).ok(),
    }
}
