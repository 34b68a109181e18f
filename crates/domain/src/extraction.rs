use crate::remind_at::parse_remind_at;
use chrono::FixedOffset;
use serde::Deserialize;
use thiserror::Error;

/// Instruction sent together with the image to the extraction service.
/// `remindAt` is requested as local time without an offset, which is then
/// interpreted in the configured offset by `parse_remind_at`.
pub const EXTRACTION_INSTRUCTION: &str = "Analyze the image and extract the reminder message and date/time information. Return a JSON object with exactly the following fields:
- 'reminderMsg' for the reminder message.
- 'remindAt' for the reminder time.

Ensure the following when generating the output:
1. The 'remindAt' field should be in ISO 8601 format (YYYY-MM-DDTHH:mm:ss.sss) in local time and without a timezone suffix like 'Z'.
2. If a date is mentioned but no year is specified, assume the current year.
3. If no time is mentioned, assume 09:00 AM by default.
4. If the time is provided, ensure it reflects exactly what is mentioned (e.g., if '7 AM' is mentioned, it should be represented as 07:00:00).

Return only the JSON object, without any additional text or markdown.";

/// The reminder candidate returned by the extraction service
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExtractedReminder {
    pub reminder_msg: String,
    pub remind_at: String,
}

#[derive(Error, Debug, PartialEq)]
pub enum ExtractionParseError {
    #[error("Extraction response is not a valid reminder object: {0}")]
    MalformedJson(String),
    #[error("Extraction response contains an empty reminder message")]
    EmptyMessage,
    #[error("Extraction response contains an invalid remindAt: {0}")]
    InvalidRemindAt(String),
}

/// Removes a surrounding markdown code fence (```` ```json ... ``` ````) if present
fn strip_code_fence(content: &str) -> &str {
    let mut content = content.trim();
    if let Some(rest) = content.strip_prefix("```") {
        content = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }
    if let Some(rest) = content.trim_end().strip_suffix("```") {
        content = rest;
    }
    content.trim()
}

impl ExtractedReminder {
    /// Parses the raw text content of the extraction service as a strict
    /// two field JSON object and validates it against the `remindAt` convention.
    pub fn parse(content: &str, local_offset: &FixedOffset) -> Result<Self, ExtractionParseError> {
        let json = strip_code_fence(content);
        let extracted: Self = serde_json::from_str(json)
            .map_err(|e| ExtractionParseError::MalformedJson(e.to_string()))?;

        if extracted.reminder_msg.trim().is_empty() {
            return Err(ExtractionParseError::EmptyMessage);
        }
        if parse_remind_at(&extracted.remind_at, local_offset).is_none() {
            return Err(ExtractionParseError::InvalidRemindAt(extracted.remind_at));
        }

        Ok(extracted)
    }
}
