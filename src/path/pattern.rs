//! Wildcard search patterns.

use globset::{GlobBuilder, GlobMatcher};

use super::{ALT_DIRECTORY_SEPARATOR, DIRECTORY_SEPARATOR};
use crate::FsError;

/// Matches any run of characters, including none.
pub const WILDCARD_MATCH_ALL: char = '*';

/// Matches exactly one character.
pub const WILDCARD_MATCH_ONE: char = '?';

/// A wildcard pattern applied to a single path segment.
///
/// Supports `*` and `?` only, never regular expressions. `*.*` matches every
/// name, including names without a dot.
///
/// # Example
///
/// ```rust
/// use unifs::SearchPattern;
///
/// let pattern = SearchPattern::new("*.TXT", false)?;
/// assert!(pattern.matches("notes.txt"));
/// assert!(!pattern.matches("notes.md"));
///
/// let exact = SearchPattern::new("log?.txt", true)?;
/// assert!(exact.matches("log1.txt"));
/// assert!(!exact.matches("LOG1.txt"));
/// # Ok::<(), unifs::FsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SearchPattern {
    raw: String,
    case_sensitive: bool,
    /// `None` for match-all patterns.
    matcher: Option<GlobMatcher>,
}

impl SearchPattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// [`FsError::InvalidPath`] if the pattern is empty or contains a
    /// directory separator.
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self, FsError> {
        if pattern.is_empty() {
            return Err(FsError::invalid_path(pattern, "search pattern is empty"));
        }
        if pattern.contains([DIRECTORY_SEPARATOR, ALT_DIRECTORY_SEPARATOR]) {
            return Err(FsError::invalid_path(
                pattern,
                "search pattern must not contain directory separators",
            ));
        }

        let matcher = if pattern == "*" || pattern == "*.*" {
            None
        } else {
            let glob = GlobBuilder::new(&glob_source(pattern))
                .literal_separator(true)
                .case_insensitive(!case_sensitive)
                .backslash_escape(false)
                .build()
                .map_err(|err| FsError::invalid_path(pattern, err.to_string()))?;
            Some(glob.compile_matcher())
        };

        Ok(Self {
            raw: pattern.to_owned(),
            case_sensitive,
            matcher,
        })
    }

    /// A pattern matching every name.
    pub fn match_all() -> Self {
        Self {
            raw: WILDCARD_MATCH_ALL.to_string(),
            case_sensitive: false,
            matcher: None,
        }
    }

    /// The pattern as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if the pattern matches every name.
    pub fn is_match_all(&self) -> bool {
        self.matcher.is_none()
    }

    /// Test one segment name against the pattern.
    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.is_match(name),
            None => true,
        }
    }
}

impl PartialEq for SearchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.case_sensitive == other.case_sensitive
    }
}

impl Eq for SearchPattern {}

/// Rewrite a Win32 wildcard into glob syntax where only `*` and `?` are special.
fn glob_source(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            // Runs of `*` mean the same as one; globset rejects `**` inside a segment.
            WILDCARD_MATCH_ALL if out.ends_with(WILDCARD_MATCH_ALL) => {}
            '[' | ']' | '{' | '}' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    out
}
