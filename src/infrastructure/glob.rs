//! Case-insensitive `fnmatch`-style glob patterns.
//!
//! Patterns are translated once into an anchored regular expression:
//! `*` matches any run of characters (slashes included), `?` a single
//! character, `[seq]` / `[!seq]` a character class. An unclosed `[` is a
//! literal bracket.

use regex::{Regex, RegexBuilder};

use crate::domain::{AppError, Result};

/// A compiled, case-insensitive glob.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compiles a glob pattern.
    ///
    /// # Errors
    /// Returns a configuration error if the translated expression is invalid
    /// (for example a reversed character range such as `[z-a]`).
    pub fn new(pattern: &str) -> Result<Self> {
        let translated = translate(pattern);
        let regex = RegexBuilder::new(&translated)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| AppError::Config {
                message: format!("Invalid glob pattern '{pattern}': {e}"),
            })?;

        tracing::trace!(pattern, regex = %translated, "Compiled glob");

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Whether `name` matches the whole pattern, ignoring case.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Translates a glob into an anchored regular expression.
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                // Collapse runs of stars.
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i..end]);
                    i = end + 1;
                }
                None => out.push_str(r"\["),
            },
            _ => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            }
        }
    }

    out.push('$');
    out
}

/// Index of the `]` closing a class that starts at `start`, if any.
///
/// A `]` directly after `[` or `[!` is part of the class.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

fn push_class(out: &mut String, body: &[char]) {
    out.push('[');
    let body = match body.split_first() {
        Some((&'!', rest)) => {
            out.push('^');
            rest
        }
        _ => body,
    };
    for &c in body {
        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob(pattern: &str) -> GlobPattern {
        GlobPattern::new(pattern).unwrap()
    }

    #[test]
    fn test_default_zip_pattern() {
        let pattern = glob("*icloud*.zip");
        assert!(pattern.matches("iCloud Photos Part 1 of 2.zip"));
        assert!(pattern.matches("ICLOUD.ZIP"));
        assert!(pattern.matches("my_icloud_export.Zip"));
        assert!(!pattern.matches("unrelated.zip"));
        assert!(!pattern.matches("icloud.zip.bak"));
        assert!(!pattern.matches("icloud.tar"));
    }

    #[test]
    fn test_heic_pattern_ignores_case() {
        let pattern = glob("*.heic");
        assert!(pattern.matches("IMG_001.HEIC"));
        assert!(pattern.matches("IMG_002.heic"));
        assert!(pattern.matches(".heic"));
        assert!(!pattern.matches("notes.txt"));
        assert!(!pattern.matches("photo.heic.txt"));
    }

    #[test]
    fn test_question_mark_and_classes() {
        assert!(glob("img_?.heic").matches("IMG_1.HEIC"));
        assert!(!glob("img_?.heic").matches("IMG_10.HEIC"));
        assert!(glob("img_[0-9].png").matches("img_7.png"));
        assert!(!glob("img_[!0-9].png").matches("img_7.png"));
        assert!(glob("img_[!0-9].png").matches("img_x.png"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let pattern = glob("photos (1).zip");
        assert!(pattern.matches("Photos (1).zip"));
        assert!(!pattern.matches("Photos 1.zip"));
        assert!(glob("a+b.zip").matches("a+b.zip"));
        assert!(!glob("a+b.zip").matches("aab.zip"));
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        assert!(glob("[abc").matches("[abc"));
        assert!(!glob("[abc").matches("a"));
    }

    #[test]
    fn test_leading_bracket_in_class() {
        assert!(glob("[]x]").matches("]"));
        assert!(glob("[!]x]").matches("y"));
        assert!(!glob("[!]x]").matches("]"));
    }

    #[test]
    fn test_reversed_range_is_config_error() {
        let err = GlobPattern::new("[z-a]").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_as_str_keeps_source() {
        assert_eq!(glob("*ICLOUD*.zip").as_str(), "*ICLOUD*.zip");
    }
}
