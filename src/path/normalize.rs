//! The path normalization pipeline.

use tracing::debug;

use super::{
    ALT_DIRECTORY_SEPARATOR, DIRECTORY_SEPARATOR, MAX_LONG_PATH, MAX_PATH, NormalizedPath,
    PathFormat, UNC_PREFIX, drive_letter, is_long_path, long_path, path_len, regular_path,
};
use crate::FsError;

/// Where a path is anchored before resolution.
#[derive(Debug)]
enum Anchor<'a> {
    /// `\\host\share\rest`
    Unc {
        host: &'a str,
        share: &'a str,
        rest: &'a str,
    },
    /// `C:\rest`
    Drive { letter: char, rest: &'a str },
    /// `C:rest`
    DriveRelative { letter: char, rest: &'a str },
    /// `\rest`
    Rooted(&'a str),
    /// `rest`
    Relative(&'a str),
}

/// Turns caller-supplied path strings into [`NormalizedPath`]s.
///
/// The pipeline, in order:
/// 1. reject empty input and illegal characters,
/// 2. classify the anchor (UNC, drive, drive-relative, rooted, relative),
/// 3. resolve relative forms against the working directory,
/// 4. collapse `.`, `..` and duplicate separators,
/// 5. add the extended-length prefix when the result reaches [`MAX_PATH`],
///    when the input already had it, or when long form is forced.
///
/// The working directory is explicit state of the normalizer; nothing is read
/// from the process environment.
///
/// # Example
///
/// ```rust
/// use unifs::{PathFormat, PathNormalizer};
///
/// let normalizer = PathNormalizer::new().with_working_dir(r"C:\work");
/// let path = normalizer.normalize(r"..\data\.\report.txt", PathFormat::RelativePath)?;
/// assert_eq!(path.as_str(), r"C:\data\report.txt");
///
/// let unc = normalizer.normalize("//server/share/dir/..", PathFormat::FullPath)?;
/// assert_eq!(unc.as_str(), r"\\server\share");
/// assert!(unc.is_unc());
/// # Ok::<(), unifs::FsError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathNormalizer {
    working_dir: Option<String>,
    force_long: bool,
}

impl PathNormalizer {
    /// A normalizer with no working directory; relative input is rejected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative input against `dir`, which must be fully qualified.
    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Always produce the extended-length form.
    pub fn force_long_path(mut self, force: bool) -> Self {
        self.force_long = force;
        self
    }

    /// The configured working directory.
    pub fn working_dir(&self) -> Option<&str> {
        self.working_dir.as_deref()
    }

    /// Normalize `path` according to `format`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPath`] for empty input, illegal characters, a
    ///   relative path where a full one was required, or a path beyond
    ///   [`MAX_LONG_PATH`](super::MAX_LONG_PATH)
    /// - [`FsError::NotSupported`] for UNC paths without host or share,
    ///   device-namespace paths, and extended paths that are neither drive
    ///   nor UNC rooted
    pub fn normalize(&self, path: &str, format: PathFormat) -> Result<NormalizedPath, FsError> {
        if path.trim().is_empty() {
            return Err(FsError::invalid_path(path, "path is empty or whitespace"));
        }
        if format == PathFormat::LongFullPath {
            return Ok(NormalizedPath::from_canonical(path.to_owned()));
        }

        let unified = path.replace(ALT_DIRECTORY_SEPARATOR, "\\");
        let had_prefix = is_long_path(&unified);
        let unified = regular_path(&unified);

        check_invalid_chars(path, &unified)?;
        let anchor = classify(path, &unified, had_prefix)?;
        let (root, tail) = self.resolve(path, anchor, format)?;
        let regular = collapse(&root, &tail);

        let canonical = if had_prefix || self.force_long || path_len(&regular) >= MAX_PATH {
            long_path(&regular)
        } else {
            regular
        };
        if path_len(&canonical) > MAX_LONG_PATH {
            return Err(FsError::invalid_path(
                path,
                format!("path exceeds {MAX_LONG_PATH} characters"),
            ));
        }

        debug!(input = path, normalized = %canonical, "normalized path");
        Ok(NormalizedPath::from_canonical(canonical))
    }

    /// Split the anchored input into a root (`C:` or `\\host\share`) and a tail.
    fn resolve(
        &self,
        original: &str,
        anchor: Anchor<'_>,
        format: PathFormat,
    ) -> Result<(String, String), FsError> {
        match anchor {
            Anchor::Unc { host, share, rest } => {
                Ok((format!("{UNC_PREFIX}{host}\\{share}"), rest.to_owned()))
            }
            Anchor::Drive { letter, rest } => Ok((format!("{letter}:"), rest.to_owned())),
            _ if format == PathFormat::FullPath => {
                Err(FsError::invalid_path(original, "path is not fully qualified"))
            }
            Anchor::Relative(rest) => {
                let (root, cwd_tail) = self.working_root(original)?;
                Ok((root, format!("{cwd_tail}\\{rest}")))
            }
            Anchor::Rooted(rest) => {
                let (root, _) = self.working_root(original)?;
                Ok((root, rest.to_owned()))
            }
            Anchor::DriveRelative { letter, rest } => {
                let (root, cwd_tail) = self.working_root(original)?;
                let same_drive =
                    drive_letter(&root).is_some_and(|cwd| cwd.eq_ignore_ascii_case(&letter));
                if same_drive {
                    Ok((root, format!("{cwd_tail}\\{rest}")))
                } else {
                    Ok((format!("{letter}:"), rest.to_owned()))
                }
            }
        }
    }

    fn working_root(&self, original: &str) -> Result<(String, String), FsError> {
        let dir = self.working_dir.as_deref().ok_or_else(|| {
            FsError::invalid_path(original, "relative path without a working directory")
        })?;
        let cwd = PathNormalizer::new().normalize(dir, PathFormat::FullPath)?;
        Ok(split_root(&cwd.to_regular()))
    }
}

fn check_invalid_chars(original: &str, path: &str) -> Result<(), FsError> {
    match path
        .chars()
        .find(|c| matches!(c, '"' | '<' | '>' | '|' | '*' | '?') || c.is_ascii_control())
    {
        Some(c) => Err(FsError::invalid_path(
            original,
            format!("illegal character {c:?}"),
        )),
        None => Ok(()),
    }
}

fn check_no_colon(original: &str, part: &str) -> Result<(), FsError> {
    if part.contains(':') {
        Err(FsError::invalid_path(
            original,
            "':' is only allowed after a drive letter",
        ))
    } else {
        Ok(())
    }
}

fn classify<'a>(original: &str, path: &'a str, had_prefix: bool) -> Result<Anchor<'a>, FsError> {
    if let Some(unc) = path.strip_prefix(UNC_PREFIX) {
        let mut parts = unc.splitn(3, DIRECTORY_SEPARATOR);
        let host = parts.next().unwrap_or_default();
        if host == "." {
            return Err(FsError::not_supported(
                original,
                "device namespace paths are not supported",
            ));
        }
        let share = parts.next().unwrap_or_default();
        if host.is_empty() || share.is_empty() {
            return Err(FsError::not_supported(
                original,
                "UNC path must name a host and a share",
            ));
        }
        let rest = parts.next().unwrap_or_default();
        check_no_colon(original, unc)?;
        return Ok(Anchor::Unc { host, share, rest });
    }

    if let Some(letter) = drive_letter(path) {
        let after = &path[2..];
        check_no_colon(original, after)?;
        return Ok(match after.strip_prefix(DIRECTORY_SEPARATOR) {
            Some(rest) => Anchor::Drive { letter, rest },
            None => Anchor::DriveRelative {
                letter,
                rest: after,
            },
        });
    }

    if had_prefix {
        return Err(FsError::not_supported(
            original,
            "extended-length path is neither drive nor UNC rooted",
        ));
    }
    check_no_colon(original, path)?;
    Ok(match path.strip_prefix(DIRECTORY_SEPARATOR) {
        Some(rest) => Anchor::Rooted(rest),
        None => Anchor::Relative(path),
    })
}

/// Split a regular absolute path into its root and the remainder.
fn split_root(regular: &str) -> (String, String) {
    if let Some(unc) = regular.strip_prefix(UNC_PREFIX) {
        let mut parts = unc.splitn(3, DIRECTORY_SEPARATOR);
        let host = parts.next().unwrap_or_default();
        let share = parts.next().unwrap_or_default();
        let tail = parts.next().unwrap_or_default();
        (format!("{UNC_PREFIX}{host}\\{share}"), tail.to_owned())
    } else {
        let tail = regular.get(3..).unwrap_or_default();
        (regular[..2].to_owned(), tail.to_owned())
    }
}

/// Collapse `.`/`..`/empty segments; `..` never climbs above the root.
fn collapse(root: &str, tail: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in tail.split(DIRECTORY_SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name => segments.push(name),
        }
    }

    if root.starts_with(UNC_PREFIX) && segments.is_empty() {
        root.to_owned()
    } else {
        format!("{root}{DIRECTORY_SEPARATOR}{}", segments.join("\\"))
    }
}
