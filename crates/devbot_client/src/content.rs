//! Reply content decoding: envelope detection and prose / code segmentation.
//!
//! [`decode`] turns one raw assistant reply into renderable blocks. A reply
//! may arrive as plain text or as a JSON envelope carrying the display text
//! plus follow-up questions; either way the effective text is split into
//! prose, inline code, and fenced code blocks in source order.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::highlight::{self, Token};
use crate::messages::ReplyEnvelope;

/// One renderable span of a decoded reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Prose {
        text: String,
    },
    InlineCode {
        text: String,
    },
    FencedCode {
        language: Option<String>,
        code: String,
        tokens: Vec<Token>,
    },
}

/// Decoded reply: ordered blocks plus any suggested follow-up prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedMessage {
    pub blocks: Vec<ContentBlock>,
    pub suggested_prompts: Vec<String>,
}

/// Fenced spans (triple backticks, language tag on the opening line) or
/// inline spans (single backticks). Fenced wins where both could start.
fn code_span_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```.*?```|`[^`]+`").expect("code span pattern is valid")
    })
}

/// Decode one raw assistant reply.
///
/// A payload that parses as [`ReplyEnvelope`] contributes its `response`
/// text and `questions`; any parse or shape failure silently falls back to
/// treating the whole payload as plain text. Pure: identical input yields
/// identical output.
pub fn decode(raw: &str) -> DecodedMessage {
    let (effective, suggested_prompts) = match serde_json::from_str::<ReplyEnvelope>(raw) {
        Ok(envelope) => (envelope.response, envelope.questions),
        Err(_) => (raw.to_string(), Vec::new()),
    };

    let mut blocks = Vec::new();
    let mut tail = 0;
    for span in code_span_re().find_iter(&effective) {
        if span.start() > tail {
            blocks.push(ContentBlock::Prose {
                text: effective[tail..span.start()].to_string(),
            });
        }
        blocks.push(code_block(span.as_str()));
        tail = span.end();
    }
    if tail < effective.len() {
        blocks.push(ContentBlock::Prose {
            text: effective[tail..].to_string(),
        });
    }

    DecodedMessage {
        blocks,
        suggested_prompts,
    }
}

/// Build the block for one matched code span (delimiters still attached).
fn code_block(span: &str) -> ContentBlock {
    if span.starts_with("```") {
        // First line carries the language tag; the body is everything
        // strictly between the marker lines.
        let lines: Vec<&str> = span.split('\n').collect();
        let tag = lines[0][3..].trim();
        let code = if lines.len() > 2 {
            lines[1..lines.len() - 1].join("\n")
        } else {
            String::new()
        };
        let tokens = if tag.is_empty() {
            Vec::new()
        } else {
            highlight::classify(&code)
        };
        let language = (!tag.is_empty()).then(|| tag.to_string());
        return ContentBlock::FencedCode {
            language,
            code,
            tokens,
        };
    }
    ContentBlock::InlineCode {
        text: span[1..span.len() - 1].to_string(),
    }
}
