//! Verdict values and the judgment parsed from model output

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Verdict on a claim.
///
/// The model is asked for `True`, `False` or `Unverifiable`; `Error` marks a
/// degraded report. Any other string the model produces is kept verbatim
/// in `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    True,
    False,
    Unverifiable,
    Error,
    Other(String),
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unverifiable => "Unverifiable",
            Self::Error => "Error",
            Self::Other(value) => value,
        }
    }

    /// Verdict used when the model omits the field
    fn missing() -> Self {
        Self::Error
    }
}

impl From<String> for Verdict {
    fn from(value: String) -> Self {
        match value.as_str() {
            "True" => Self::True,
            "False" => Self::False,
            "Unverifiable" => Self::Unverifiable,
            "Error" => Self::Error,
            _ => Self::Other(value),
        }
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The JSON object the judgment model is asked to produce.
///
/// Field types are not enforced: any JSON object is a judgment. A non-string
/// verdict becomes `Other` holding its JSON text, a null or missing verdict
/// becomes `Error`, and non-string reasoning or evidence is rendered as JSON
/// text. Keys beyond the three requested ones are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    #[serde(default = "Verdict::missing", deserialize_with = "any_verdict")]
    pub verdict: Verdict,
    #[serde(default, deserialize_with = "any_text")]
    pub reasoning: String,
    #[serde(default, deserialize_with = "any_text_list")]
    pub evidence_used: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn any_verdict<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Verdict, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Verdict::missing(),
        Value::String(text) => Verdict::from(text),
        other => Verdict::Other(other.to_string()),
    })
}

fn any_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        other => value_text(other),
    })
}

/// Evidence as a list of strings; a lone value becomes a one-element list
fn any_text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(value_text)
            .collect(),
        other => vec![value_text(other)],
    })
}
