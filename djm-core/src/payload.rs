//! Job payload handling
//!
//! A job payload is markdown holding one or more fenced code blocks. The
//! service executes each block with the runtime named by its fence language,
//! so the dashboard checks fences before submitting.

use thiserror::Error;

/// Language used when the user submits bare code without a fence
pub const DEFAULT_LANGUAGE: &str = "go";

/// Languages the workers can execute, with the source file extension they use
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("go", ".go"),
    ("python", ".py"),
    ("javascript", ".js"),
    ("typescript", ".ts"),
    ("bash", ".sh"),
];

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Payload cannot be empty")]
    Empty,

    #[error("Code block starting on line {0} is never closed")]
    Unterminated(usize),

    #[error("Code block starting on line {0} has no language")]
    MissingLanguage(usize),

    #[error("{0} is not a supported code language")]
    UnsupportedLanguage(String),

    #[error("Payload contains no code blocks")]
    NoCodeBlocks,
}

/// A fenced block extracted from a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: String,
    pub content: String,
    /// 1-based line of the opening fence
    pub line: usize,
}

/// Source file extension for a supported language
pub fn extension_for(language: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, ext)| *ext)
}

pub fn is_supported(language: &str) -> bool {
    extension_for(language).is_some()
}

/// Whether the input already contains a code fence
pub fn is_fenced(input: &str) -> bool {
    input.lines().any(|line| line.trim_start().starts_with(FENCE))
}

/// Wrap bare code in a fence for `language`
pub fn wrap(code: &str, language: &str) -> String {
    format!("{FENCE}{language}\n{}\n{FENCE}", code.trim_matches('\n'))
}

/// Extract every fenced code block
///
/// Text outside fences is ignored. The fence language is the first word after
/// the backticks, lowercased.
pub fn code_blocks(input: &str) -> Result<Vec<CodeBlock>, PayloadError> {
    let mut blocks = Vec::new();
    let mut open: Option<(String, usize, Vec<&str>)> = None;

    for (idx, line) in input.lines().enumerate() {
        let trimmed = line.trim_start();
        match open.take() {
            None => {
                if let Some(info) = trimmed.strip_prefix(FENCE) {
                    let language = info
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_lowercase();
                    open = Some((language, idx + 1, Vec::new()));
                }
            }
            Some((language, start, mut body)) => {
                if trimmed.starts_with(FENCE) && trimmed.trim_end() == FENCE {
                    blocks.push(CodeBlock {
                        language,
                        content: body.join("\n"),
                        line: start,
                    });
                } else {
                    body.push(line);
                    open = Some((language, start, body));
                }
            }
        }
    }

    if let Some((_, start, _)) = open {
        return Err(PayloadError::Unterminated(start));
    }

    Ok(blocks)
}

/// Normalize user input into a payload the service accepts
///
/// Bare code is fenced with [`DEFAULT_LANGUAGE`]; every block must name a
/// supported language.
pub fn normalize(input: &str) -> Result<String, PayloadError> {
    if input.trim().is_empty() {
        return Err(PayloadError::Empty);
    }

    let payload = if is_fenced(input) {
        input.trim_matches('\n').to_string()
    } else {
        wrap(input, DEFAULT_LANGUAGE)
    };

    let blocks = code_blocks(&payload)?;
    if blocks.is_empty() {
        return Err(PayloadError::NoCodeBlocks);
    }

    for block in &blocks {
        if block.language.is_empty() {
            return Err(PayloadError::MissingLanguage(block.line));
        }
        if !is_supported(&block.language) {
            return Err(PayloadError::UnsupportedLanguage(block.language.clone()));
        }
    }

    Ok(payload)
}
