//! Judgment prompt construction

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

use crate::domain::DomainError;

/// Build the prompt asking the judgment model to verify `claim` against
/// the retrieved `facts`.
///
/// The facts are embedded as a JSON array in the compact style
/// `["a", "b"]`, with non-ASCII characters written as `\uXXXX` escapes.
pub fn build_judgment_prompt(claim: &str, facts: &[String]) -> Result<String, DomainError> {
    let known_facts = facts_as_json(facts)?;

    Ok(format!(
        r#"
        Act as an objective Fact Checker.
        
        CLAIM: "{claim}"
        
        KNOWN FACTS:
        {known_facts}
        
        Task:
        1. Check if the claim contradicts or is supported by the KNOWN FACTS.
        2. Output valid JSON only.
        
        Format:
        {{
            "verdict": "True" | "False" | "Unverifiable",
            "reasoning": "One short sentence explaining why.",
            "evidence_used": ["Quote the exact fact used"]
        }}
        "#
    ))
}

fn facts_as_json(facts: &[String]) -> Result<String, DomainError> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedAsciiFormatter);
    facts
        .serialize(&mut serializer)
        .map_err(|e| DomainError::internal(format!("Failed to encode facts: {}", e)))?;

    String::from_utf8(buffer)
        .map_err(|e| DomainError::internal(format!("Failed to encode facts: {}", e)))
}

/// Single-line JSON with `", "` and `": "` separators and ASCII-only output
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}
