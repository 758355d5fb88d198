//! Recovery of the judgment object from raw model text

use serde_json::Value;
use thiserror::Error;

use super::verdict::Judgment;

/// Model output that could not be turned into a [`Judgment`]
#[derive(Debug, Clone, Error)]
#[error("Unparseable judgment response: {reason}")]
pub struct ResponseParseError {
    pub reason: String,
}

impl ResponseParseError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Remove a surrounding markdown code fence from model output.
///
/// Leading and trailing whitespace is dropped first. A leading "```json"
/// or "```" marker is removed together with a trailing "```". Text without
/// a leading fence is only trimmed, and applying this twice gives the same
/// result as applying it once.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();

    let inner = if let Some(rest) = text.strip_prefix("```json") {
        rest
    } else if let Some(rest) = text.strip_prefix("```") {
        rest
    } else {
        return text;
    };

    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Strip any code fence and parse what remains as a judgment object.
///
/// Fails only when the text is not JSON or is JSON other than an object.
pub fn parse_judgment(raw: &str) -> Result<Judgment, ResponseParseError> {
    let cleaned = strip_code_fence(raw);

    let value: Value =
        serde_json::from_str(cleaned).map_err(|e| ResponseParseError::new(e.to_string()))?;

    if !value.is_object() {
        return Err(ResponseParseError::new("expected a JSON object"));
    }

    serde_json::from_value(value).map_err(|e| ResponseParseError::new(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fact_check::Verdict;

    const BODY: &str = r#"{"verdict": "True", "reasoning": "r", "evidence_used": []}"#;

    #[test]
    fn test_strip_json_fence() {
        let raw = format!("```json\n{}\n```", BODY);
        assert_eq!(strip_code_fence(&raw), BODY);
    }

    #[test]
    fn test_strip_plain_fence() {
        let raw = format!("```\n{}\n```", BODY);
        assert_eq!(strip_code_fence(&raw), BODY);
    }

    #[test]
    fn test_unfenced_text_is_trimmed() {
        let raw = format!("  \n{}\n ", BODY);
        assert_eq!(strip_code_fence(&raw), BODY);
    }

    #[test]
    fn test_strip_is_idempotent() {
        let cases = [
            format!("```json\n{}\n```", BODY),
            format!("```\n{}\n```", BODY),
            BODY.to_string(),
            "```json".to_string(),
            "``".to_string(),
        ];

        for raw in cases {
            let once = strip_code_fence(&raw);
            assert_eq!(strip_code_fence(once), once, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_short_fence_does_not_panic() {
        assert_eq!(strip_code_fence("```json"), "");
        assert_eq!(strip_code_fence("```"), "");
        assert_eq!(strip_code_fence("```json```"), "");
    }

    #[test]
    fn test_parse_fenced_judgment() {
        let judgment = parse_judgment(&format!("```json\n{}\n```\n", BODY)).unwrap();

        assert_eq!(judgment.verdict, Verdict::True);
        assert_eq!(judgment.reasoning, "r");
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_judgment("{verdict: True").is_err());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = parse_judgment("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn test_parse_accepts_loosely_typed_object() {
        let judgment =
            parse_judgment(r#"{"verdict": false, "reasoning": null, "evidence_used": "one"}"#)
                .unwrap();

        assert_eq!(judgment.verdict, Verdict::Other("false".to_string()));
        assert_eq!(judgment.reasoning, "");
        assert_eq!(judgment.evidence_used, vec!["one".to_string()]);
    }
}
