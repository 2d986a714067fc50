//! # Paths
//!
//! Lexical handling of Windows-style paths: relative, drive-rooted, UNC and
//! extended-length (`\\?\`) forms.
//!
//! ## Responsibility
//! - Canonical representation ([`NormalizedPath`])
//! - Converting between regular and extended-length forms
//! - Extracting the root segment
//!
//! Nothing in this module touches a filesystem. The normalization pipeline
//! lives in [`PathNormalizer`], wildcard matching in [`SearchPattern`].

mod normalize;
mod pattern;

pub use normalize::PathNormalizer;
pub use pattern::{SearchPattern, WILDCARD_MATCH_ALL, WILDCARD_MATCH_ONE};

use std::fmt;

/// Extended-length prefix for drive-rooted paths.
pub const LONG_PATH_PREFIX: &str = r"\\?\";

/// Extended-length prefix for UNC paths.
pub const LONG_PATH_UNC_PREFIX: &str = r"\\?\UNC\";

/// Prefix of a regular UNC path.
pub const UNC_PREFIX: &str = r"\\";

/// Primary directory separator.
pub const DIRECTORY_SEPARATOR: char = '\\';

/// Alternate directory separator, accepted on input.
pub const ALT_DIRECTORY_SEPARATOR: char = '/';

/// Length at which a regular path must switch to the extended-length form.
pub const MAX_PATH: usize = 260;

/// Longest path representable even in extended-length form.
pub const MAX_LONG_PATH: usize = 32_767;

/// How much normalization work a caller's path string needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathFormat {
    /// Path may be relative; it is resolved against the working directory.
    #[default]
    RelativePath,
    /// Path is fully qualified; it is still validated and collapsed.
    FullPath,
    /// Path is already canonical extended-length form; used as-is.
    LongFullPath,
}

/// Returns `true` if `path` starts with the extended-length prefix.
pub fn is_long_path(path: &str) -> bool {
    path.starts_with(LONG_PATH_PREFIX)
}

/// Returns `true` if `path` is a UNC path in either regular or extended form.
pub fn is_unc_path(path: &str) -> bool {
    if is_long_path(path) {
        path.get(..LONG_PATH_UNC_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(LONG_PATH_UNC_PREFIX))
    } else {
        path.starts_with(UNC_PREFIX)
    }
}

/// Strip the extended-length prefix, restoring the regular form.
///
/// ```rust
/// use unifs::regular_path;
///
/// assert_eq!(regular_path(r"\\?\C:\data"), r"C:\data");
/// assert_eq!(regular_path(r"\\?\UNC\server\share\x"), r"\\server\share\x");
/// assert_eq!(regular_path(r"C:\data"), r"C:\data");
/// ```
pub fn regular_path(path: &str) -> String {
    if !is_long_path(path) {
        return path.to_owned();
    }
    if is_unc_path(path) {
        format!("{UNC_PREFIX}{}", &path[LONG_PATH_UNC_PREFIX.len()..])
    } else {
        path[LONG_PATH_PREFIX.len()..].to_owned()
    }
}

/// Add the extended-length prefix to a regular absolute path.
///
/// ```rust
/// use unifs::long_path;
///
/// assert_eq!(long_path(r"C:\data"), r"\\?\C:\data");
/// assert_eq!(long_path(r"\\server\share"), r"\\?\UNC\server\share");
/// assert_eq!(long_path(r"\\?\C:\data"), r"\\?\C:\data");
/// ```
pub fn long_path(path: &str) -> String {
    if is_long_path(path) {
        path.to_owned()
    } else if let Some(rest) = path.strip_prefix(UNC_PREFIX) {
        format!("{LONG_PATH_UNC_PREFIX}{rest}")
    } else {
        format!("{LONG_PATH_PREFIX}{path}")
    }
}

/// Extract the root segment of a path, lexically.
///
/// Drive-rooted paths yield `"<letter>:\"`, UNC paths `"\\host\share\"`.
/// Returns `None` when the path has no recognizable root.
///
/// ```rust
/// use unifs::path_root;
///
/// assert_eq!(path_root(r"C:\data\file.txt").as_deref(), Some(r"C:\"));
/// assert_eq!(path_root(r"\\server\share\dir").as_deref(), Some(r"\\server\share\"));
/// assert_eq!(path_root(r"\\?\D:\x").as_deref(), Some(r"D:\"));
/// assert_eq!(path_root("relative"), None);
/// ```
pub fn path_root(path: &str) -> Option<String> {
    let regular = regular_path(path);
    if let Some(rest) = regular.strip_prefix(UNC_PREFIX) {
        let mut parts = rest.split(DIRECTORY_SEPARATOR);
        let host = parts.next().filter(|s| !s.is_empty())?;
        let share = parts.next().filter(|s| !s.is_empty())?;
        return Some(format!("{UNC_PREFIX}{host}{DIRECTORY_SEPARATOR}{share}{DIRECTORY_SEPARATOR}"));
    }
    let drive = drive_letter(&regular)?;
    Some(format!("{drive}:{DIRECTORY_SEPARATOR}"))
}

/// Length as the OS counts it, in UTF-16 code units.
pub(crate) fn path_len(path: &str) -> usize {
    path.encode_utf16().count()
}

/// The drive letter of a `X:` prefixed path.
pub(crate) fn drive_letter(path: &str) -> Option<char> {
    let mut chars = path.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    (chars.next() == Some(':')).then_some(letter)
}

/// A path in canonical form.
///
/// Produced by [`PathNormalizer::normalize`]. Absolute, free of `.`/`..`
/// segments and duplicate separators, and carrying the extended-length prefix
/// whenever the regular form would reach [`MAX_PATH`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
    unc: bool,
}

impl NormalizedPath {
    /// Wrap a string that is already canonical.
    pub(crate) fn from_canonical(inner: String) -> Self {
        let unc = is_unc_path(&inner);
        Self { inner, unc }
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Consume into the canonical string form.
    pub fn into_string(self) -> String {
        self.inner
    }

    /// Returns `true` for `\\host\share` paths.
    pub fn is_unc(&self) -> bool {
        self.unc
    }

    /// Returns `true` if the canonical form carries the extended-length prefix.
    pub fn is_long(&self) -> bool {
        is_long_path(&self.inner)
    }

    /// The regular (non-prefixed) representation.
    pub fn to_regular(&self) -> String {
        regular_path(&self.inner)
    }

    /// The same path forced into extended-length form.
    pub fn to_long(&self) -> NormalizedPath {
        NormalizedPath {
            inner: long_path(&self.inner),
            unc: self.unc,
        }
    }

    /// The root segment, if any.
    pub fn root(&self) -> Option<String> {
        path_root(&self.inner)
    }

    /// The final segment, or `None` for a root.
    pub fn file_name(&self) -> Option<&str> {
        let name = self
            .inner
            .rsplit(DIRECTORY_SEPARATOR)
            .next()
            .filter(|name| !name.is_empty())?;
        let is_root = self.root().is_some_and(|root| {
            regular_path(&self.inner).trim_end_matches(DIRECTORY_SEPARATOR)
                == root.trim_end_matches(DIRECTORY_SEPARATOR)
        });
        (!is_root).then_some(name)
    }

    /// Append one segment.
    ///
    /// The child keeps the extended-length form if the parent has it, and
    /// switches to it when its regular form reaches [`MAX_PATH`].
    pub fn join(&self, name: &str) -> NormalizedPath {
        let regular = self.to_regular();
        let child = if regular.ends_with(DIRECTORY_SEPARATOR) {
            format!("{regular}{name}")
        } else {
            format!("{regular}{DIRECTORY_SEPARATOR}{name}")
        };
        let inner = if self.is_long() || path_len(&child) >= MAX_PATH {
            long_path(&child)
        } else {
            child
        };
        NormalizedPath {
            inner,
            unc: self.unc,
        }
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unc_detection() {
        assert!(is_unc_path(r"\\server\share"));
        assert!(is_unc_path(r"\\?\UNC\server\share"));
        assert!(is_unc_path(r"\\?\unc\server\share"));
        assert!(!is_unc_path(r"\\?\C:\x"));
        assert!(!is_unc_path(r"C:\x"));
    }

    #[test]
    fn root_requires_host_and_share() {
        assert_eq!(path_root(r"\\server"), None);
        assert_eq!(path_root(r"\\server\"), None);
        assert_eq!(
            path_root(r"\\?\UNC\server\share").as_deref(),
            Some(r"\\server\share\")
        );
    }

    #[test]
    fn root_of_extended_non_drive_path_is_none() {
        assert_eq!(path_root(r"\\?\GLOBALROOT\Device\Harddisk0"), None);
    }

    #[test]
    fn drive_letter_detection() {
        assert_eq!(drive_letter(r"c:\x"), Some('c'));
        assert_eq!(drive_letter("c:"), Some('c'));
        assert_eq!(drive_letter(r"1:\x"), None);
        assert_eq!(drive_letter("cx"), None);
    }

    #[test]
    fn join_appends_segment() {
        let root = NormalizedPath::from_canonical(r"C:\".into());
        assert_eq!(root.join("data").as_str(), r"C:\data");
        assert_eq!(root.join("data").join("a.txt").as_str(), r"C:\data\a.txt");
    }

    #[test]
    fn join_keeps_unc_flag() {
        let share = NormalizedPath::from_canonical(r"\\server\share".into());
        let child = share.join("dir");
        assert!(child.is_unc());
        assert_eq!(child.as_str(), r"\\server\share\dir");
    }

    #[test]
    fn join_switches_to_long_form_at_ceiling() {
        let base = NormalizedPath::from_canonical(format!(r"C:\{}", "a".repeat(250)));
        let child = base.join("0123456789");
        assert!(child.is_long());
        assert!(child.as_str().starts_with(r"\\?\C:\"));
    }

    #[test]
    fn join_measures_utf16_length() {
        let base = NormalizedPath::from_canonical(format!(r"C:\{}", "\u{6587}".repeat(200)));
        assert!(!base.join("x").is_long());
    }

    #[test]
    fn join_preserves_long_form() {
        let base = NormalizedPath::from_canonical(r"\\?\UNC\server\share".into());
        let child = base.join("x");
        assert_eq!(child.as_str(), r"\\?\UNC\server\share\x");
        assert!(child.is_unc());
    }

    #[test]
    fn file_name_of_root_is_none() {
        assert_eq!(NormalizedPath::from_canonical(r"C:\".into()).file_name(), None);
        assert_eq!(
            NormalizedPath::from_canonical(r"\\server\share".into()).file_name(),
            None
        );
        assert_eq!(
            NormalizedPath::from_canonical(r"C:\data\a.txt".into()).file_name(),
            Some("a.txt")
        );
    }

    #[test]
    fn to_long_and_back() {
        let p = NormalizedPath::from_canonical(r"\\server\share\x".into());
        let long = p.to_long();
        assert_eq!(long.as_str(), r"\\?\UNC\server\share\x");
        assert_eq!(long.to_regular(), p.as_str());
    }
}
