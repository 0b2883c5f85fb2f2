//! Hero name validation and log-safe rendering of player-supplied text.

/// Hero name validation errors with helpful messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("Hero name cannot be empty")]
    Empty,

    #[error("Hero name is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("Hero name contains invalid characters: {chars}")]
    InvalidCharacters { chars: String },
}

/// Hero name validation rules
#[derive(Debug, Clone)]
pub struct NameRules {
    pub max_length: usize,
    pub allow_unicode: bool,
}

impl Default for NameRules {
    fn default() -> Self {
        NameRules {
            max_length: 32,
            allow_unicode: true,
        }
    }
}

/// Validate a hero name, returning the trimmed form that should be stored.
///
/// Surrounding whitespace is dropped rather than rejected, matching what a
/// text field on a creation screen would hand us.
pub fn validate_hero_name(name: &str, rules: &NameRules) -> Result<String, NameError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if trimmed.chars().count() > rules.max_length {
        return Err(NameError::TooLong {
            max: rules.max_length,
        });
    }

    let invalid: Vec<String> = trimmed
        .chars()
        .filter(|c| c.is_control() || (!rules.allow_unicode && !c.is_ascii()))
        .map(|c| format!("\\u{{{:04x}}}", c as u32))
        .collect();
    if !invalid.is_empty() {
        return Err(NameError::InvalidCharacters {
            chars: invalid.join(", "),
        });
    }

    Ok(trimmed.to_string())
}

/// Render player-supplied text on a single log line, capped at 64 characters.
pub fn escape_for_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 64;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
