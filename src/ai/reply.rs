//! Decoding of structured JSON replies from the language model.

use crate::{Error, Result};
use serde::de::DeserializeOwned;

/// Body of the first markdown code fence in `text`, if any.
///
/// The language hint on the opening fence line is skipped.
pub fn extract_code_block(text: &str) -> Option<&str> {
    let fence_start = text.find("```")?;
    let after_backticks = fence_start + 3;
    let line_end = text[after_backticks..].find('\n')?;
    let content_start = after_backticks + line_end + 1;
    let close_offset = text[content_start..].find("```")?;
    Some(text[content_start..content_start + close_offset].trim())
}

/// Parse a model reply into `T`, unwrapping a code fence when the model
/// wrapped its JSON in one.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str, what: &str) -> Result<T> {
    let trimmed = text.trim();
    let direct_err = match serde_json::from_str::<T>(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if let Some(block) = extract_code_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<T>(block) {
            return Ok(value);
        }
    }

    tracing::error!("Failed to parse {} reply: {}\nReply: {}", what, direct_err, text);
    Err(Error::AiProvider(format!(
        "Failed to parse {} reply: {}",
        what, direct_err
    )))
}
