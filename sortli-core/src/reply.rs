//! Turns the assistant text returned by the upstream model into a verdict.
//!
//! Models are asked for a single-line JSON object but regularly wrap it in
//! Markdown fences or answer in prose. Nothing in here fails: anything that
//! cannot be read becomes [`ParsedReply::Fallback`].

use serde_json::{Map, Value};

use crate::model::WasteCategory;

/// Confidence reported when the reply could not be read.
pub const FALLBACK_CONFIDENCE: u8 = 75;
/// Reasoning reported when the reply could not be read.
pub const FALLBACK_REASONING: &str = "Unable to classify precisely";

/// Classification as stated by the model, before taxonomy mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelVerdict {
    /// Raw `type` value; may be outside the known categories.
    pub label: String,
    /// Confidence clamped to 0..=100.
    pub confidence: u8,
    /// Model explanation.
    pub reasoning: String,
}

impl ModelVerdict {
    /// The fixed verdict substituted for unreadable replies.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            label: WasteCategory::DEFAULT.slug().to_owned(),
            confidence: FALLBACK_CONFIDENCE,
            reasoning: FALLBACK_REASONING.to_owned(),
        }
    }
}

/// Outcome of reading a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    /// The reply was a JSON object.
    Verdict(ModelVerdict),
    /// The reply could not be read; `reason` is kept for diagnostics.
    Fallback {
        /// Why the reply was rejected.
        reason: String,
    },
}

impl ParsedReply {
    /// Collapse into a verdict, substituting the fallback when needed.
    #[must_use]
    pub fn into_verdict(self) -> ModelVerdict {
        match self {
            Self::Verdict(verdict) => verdict,
            Self::Fallback { .. } => ModelVerdict::fallback(),
        }
    }

    /// Whether the fallback verdict will be used.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Remove Markdown code fences surrounding a reply.
///
/// Opening and closing fences are stripped independently, so a reply that
/// only carries one of them is still read.
#[must_use]
pub fn strip_code_fences(content: &str) -> &str {
    let mut body = content.trim();
    if let Some(opened) = body.strip_prefix("```") {
        body = opened
            .strip_prefix("json")
            .or_else(|| opened.strip_prefix("JSON"))
            .unwrap_or(opened);
    }
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Read the assistant text of a completion.
#[must_use]
pub fn parse_reply(content: &str) -> ParsedReply {
    let cleaned = strip_code_fences(content);

    let value = match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => value,
        Err(err) => {
            return ParsedReply::Fallback {
                reason: format!("invalid JSON: {err}"),
            };
        }
    };

    let Value::Object(fields) = value else {
        return ParsedReply::Fallback {
            reason: String::from("reply is not a JSON object"),
        };
    };

    ParsedReply::Verdict(ModelVerdict {
        label: fields
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        confidence: read_confidence(&fields).unwrap_or(FALLBACK_CONFIDENCE),
        reasoning: fields
            .get("reasoning")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_REASONING)
            .to_owned(),
    })
}

fn read_confidence(fields: &Map<String, Value>) -> Option<u8> {
    let raw = match fields.get("confidence")? {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().trim_end_matches('%').parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is rounded and clamped to 0..=100"
    )]
    let confidence = raw.round().clamp(0.0, 100.0) as u8;
    Some(confidence)
}
