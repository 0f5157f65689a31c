//! Root-list splitting, path normalization and report naming.
//!
//! A raw `-paths` value is split into tokens, each token is normalized into
//! the path that will be scanned, and every normalized path maps to a
//! deterministic report file name (its *identity*):
//!
//! | root            | normalized     | identity  |
//! |-----------------|----------------|-----------|
//! | `C:`            | `C:\`          | `C.csv`   |
//! | `C:\Users\Bob\` | `C:\Users\Bob` | `Bob.csv` |
//! | `/var/log/`     | `/var/log`     | `log.csv` |
//!
//! Two roots with the same final component share an identity; the later
//! report overwrites the earlier one.

use std::fmt;
use std::path::Path;

/// Extension appended to every report identity.
pub const REPORT_EXTENSION: &str = ".csv";

const TRIM_CHARS: &[char] = &[' ', '\t', '\r', '\n'];

/// Which separator and root conventions apply to user-supplied paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStyle {
    /// `\` or `/` separators, drive specifiers like `C:`.
    Windows,
    /// `/` separators only, no drive specifiers.
    Unix,
}

impl PathStyle {
    /// Style of the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Unix
        }
    }

    pub fn is_separator(self, c: char) -> bool {
        match self {
            PathStyle::Windows => c == '\\' || c == '/',
            PathStyle::Unix => c == '/',
        }
    }

    fn separator(self) -> char {
        match self {
            PathStyle::Windows => '\\',
            PathStyle::Unix => '/',
        }
    }

    /// Length (in chars) below which a trailing separator belongs to the root.
    fn root_len(self) -> usize {
        match self {
            PathStyle::Windows => 3,
            PathStyle::Unix => 1,
        }
    }
}

/// A trimmed, non-empty path with redundant trailing separator removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    text: String,
    style: PathStyle,
}

impl NormalizedPath {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.text)
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    /// The bare drive letter if this path is a drive root (`X:` or `X:\`).
    fn drive_letter(&self) -> Option<char> {
        if self.style != PathStyle::Windows {
            return None;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let is_drive = match chars.as_slice() {
            [_, ':'] => true,
            [_, ':', sep] => self.style.is_separator(*sep),
            _ => false,
        };
        if is_drive { chars.first().copied() } else { None }
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Splits a comma-separated root list into raw, untrimmed tokens.
///
/// Consecutive commas produce no token, so `",,"` yields nothing while
/// `" , "` yields two whitespace tokens (which [`normalize`] later rejects).
pub fn split_roots(list: &str) -> Vec<&str> {
    list.split(',').filter(|token| !token.is_empty()).collect()
}

/// Normalizes one raw root token.
///
/// # Behavior
/// * Surrounding spaces, tabs, CR and LF are trimmed
/// * Empty results are rejected with `None`
/// * A bare drive specifier `X:` gains a separator (`X:\`)
/// * Exactly one trailing separator is removed unless it belongs to the root
///   (`X:\` on Windows, `/` on Unix)
pub fn normalize(raw: &str, style: PathStyle) -> Option<NormalizedPath> {
    let trimmed = raw.trim_matches(TRIM_CHARS);
    if trimmed.is_empty() {
        return None;
    }

    let mut text = trimmed.to_string();
    if style == PathStyle::Windows {
        let mut chars = text.chars();
        if let (Some(_), Some(':'), None) = (chars.next(), chars.next(), chars.next()) {
            text.push(style.separator());
        }
    }

    if text.chars().count() > style.root_len()
        && text.ends_with(|c: char| style.is_separator(c))
    {
        text.pop();
    }

    Some(NormalizedPath { text, style })
}

/// Derives the report file name for a normalized root.
///
/// Drive roots map to their uppercased letter. Other paths map to their final
/// component; if that component is empty (the path still ends in a separator)
/// the previous component is used instead. A path made only of separators
/// yields an identity with an empty stem.
pub fn derive_identity(path: &NormalizedPath) -> String {
    if let Some(letter) = path.drive_letter() {
        return format!("{}{REPORT_EXTENSION}", letter.to_uppercase());
    }

    let style = path.style();
    let text = path.as_str();
    let mut stem = last_segment(text, style);
    if stem.is_empty() {
        if let Some(stripped) = text.strip_suffix(|c: char| style.is_separator(c)) {
            stem = last_segment(stripped, style);
        }
    }
    format!("{stem}{REPORT_EXTENSION}")
}

fn last_segment(text: &str, style: PathStyle) -> &str {
    match text.rfind(|c: char| style.is_separator(c)) {
        Some(idx) => &text[idx + 1..],
        None => text,
    }
}
