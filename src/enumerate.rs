//! # Enumeration Engine
//!
//! Lazy, optionally recursive, wildcard-filtered directory traversal.
//!
//! ## Traversal
//!
//! One provider search is open at a time. Subdirectories found while reading
//! a directory are remembered; once that directory is exhausted and its
//! search closed, they are pushed onto an explicit stack in provider order.
//! Popping from the stack yields depth-first order: a subdirectory's
//! descendants are all produced before its next sibling is entered.
//!
//! ```text
//! Start -> Open(root) -> Yield* -> Close -> pending? Open(next) : Done
//!                           \-> error -> per-directory && continue_on_error? Close, skip : Failed
//! ```
//!
//! ## Cleanup
//!
//! The open search lives in a guard that closes it on drop. Exhaustion,
//! failure, skipping a directory and dropping the [`Enumeration`] half-way
//! all release it the same way.

use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace, warn};

use crate::{
    DirEntry, EnumerationOptions, FindData, FsError, FsSearch, MAX_PATH, NormalizedPath,
    OperationConfig, SearchHandle, SearchPattern, Transaction, path::path_len,
};

/// Enumerate the entries of `path` matching `pattern`.
///
/// The directory itself is opened before this function returns, so a missing
/// or inaccessible start directory is reported here, before any entry exists,
/// regardless of `continue_on_error`. Everything after that happens lazily as
/// the returned iterator is pulled.
///
/// # Errors
///
/// - [`FsError::InvalidPath`] / [`FsError::NotSupported`] from normalization
///   or from an invalid pattern
/// - whatever the provider's `open_search` reports for the start directory
///
/// # Example
///
/// ```rust
/// use unifs::{enumerate, DirEntry, FsError, FsSearch, OperationConfig, EnumerationOptions};
///
/// fn text_files<P: FsSearch>(provider: &P) -> Result<Vec<DirEntry>, FsError> {
///     let config = OperationConfig::new()
///         .with_enumeration(EnumerationOptions::FILES.recursive());
///     enumerate(provider, r"C:\data", "*.txt", &config)?.collect_all()
/// }
/// ```
pub fn enumerate<'a, P>(
    provider: &'a P,
    path: &str,
    pattern: &str,
    config: &OperationConfig,
) -> Result<Enumeration<'a, P>, FsError>
where
    P: FsSearch + ?Sized,
{
    let options = config.enumeration;
    let pattern = SearchPattern::new(pattern, options.case_sensitive)?;
    let dir = config.normalizer().normalize(path, config.path_format)?;
    Enumeration::start(provider, dir, pattern, options, config.transaction)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Done,
    Failed,
}

/// An open provider search; closed when dropped.
struct OpenSearch<'a, P: FsSearch + ?Sized> {
    provider: &'a P,
    handle: SearchHandle,
    dir: NormalizedPath,
    subdirs: Vec<NormalizedPath>,
}

impl<'a, P: FsSearch + ?Sized> OpenSearch<'a, P> {
    fn open(
        provider: &'a P,
        dir: NormalizedPath,
        transaction: Option<Transaction>,
    ) -> Result<Self, FsError> {
        let handle = provider.open_search(&dir, transaction)?;
        debug!(dir = %dir, handle = handle.0, "opened search");
        Ok(Self {
            provider,
            handle,
            dir,
            subdirs: Vec::new(),
        })
    }
}

impl<P: FsSearch + ?Sized> Drop for OpenSearch<'_, P> {
    fn drop(&mut self) {
        match self.provider.close_search(self.handle) {
            Ok(()) => debug!(dir = %self.dir, handle = self.handle.0, "closed search"),
            Err(err) => warn!(dir = %self.dir, error = %err, "failed to close search"),
        }
    }
}

/// Lazy, single-pass sequence of directory entries.
///
/// Produced by [`enumerate`]. Not restartable: enumerating again starts an
/// independent traversal. After an `Err` item the sequence is finished.
pub struct Enumeration<'a, P: FsSearch + ?Sized> {
    provider: &'a P,
    pattern: SearchPattern,
    options: EnumerationOptions,
    transaction: Option<Transaction>,
    current: Option<OpenSearch<'a, P>>,
    pending: Vec<NormalizedPath>,
    state: State,
}

impl<'a, P: FsSearch + ?Sized> Enumeration<'a, P> {
    /// Open `dir` and prepare a traversal.
    ///
    /// `dir` is used as-is; callers holding a raw string should go through
    /// [`enumerate`].
    pub fn start(
        provider: &'a P,
        dir: NormalizedPath,
        pattern: SearchPattern,
        options: EnumerationOptions,
        transaction: Option<Transaction>,
    ) -> Result<Self, FsError> {
        let root = OpenSearch::open(provider, dir, transaction)?;
        Ok(Self {
            provider,
            pattern,
            options,
            transaction,
            current: Some(root),
            pending: Vec::new(),
            state: State::Running,
        })
    }

    /// Collect all entries, short-circuiting on the first error.
    pub fn collect_all(self) -> Result<Vec<DirEntry>, FsError> {
        self.collect()
    }

    /// Turn a raw record into an entry, recording subdirectories to descend.
    fn accept(&mut self, data: FindData) -> Option<DirEntry> {
        if data.is_dot_entry() {
            return None;
        }
        let search = self.current.as_mut()?;
        let child = search.dir.join(&data.name);

        let is_dir = data.attributes.is_directory();
        if is_dir && self.options.recursive {
            if data.attributes.is_reparse_point() && self.options.skip_reparse_points {
                trace!(path = %child, "not descending into reparse point");
            } else {
                search.subdirs.push(child.clone());
            }
        }

        let wanted = if is_dir {
            self.options.includes_folders()
        } else {
            self.options.includes_files()
        };
        if !wanted || !self.pattern.matches(&data.name) {
            return None;
        }

        let regular = child.to_regular();
        let path = if self.options.as_long_path || path_len(&regular) >= MAX_PATH {
            child.to_long().into_string()
        } else {
            regular
        };
        trace!(path = %path, "yielding entry");
        Some(DirEntry::from_find_data(data, path))
    }

    /// Close the current directory and queue its subdirectories.
    fn finish_current(&mut self) {
        if let Some(mut search) = self.current.take() {
            let subdirs = std::mem::take(&mut search.subdirs);
            drop(search);
            self.pending.extend(subdirs.into_iter().rev());
        }
    }

    /// Handle a failure in a directory other than opening the start directory.
    ///
    /// Under `continue_on_error` a per-directory failure closes the directory
    /// but still queues the subdirectories it had already produced. Anything
    /// else, a rejected transaction in particular, ends the sequence.
    fn fail_or_skip(&mut self, dir: &NormalizedPath, err: FsError) -> Option<FsError> {
        if self.options.continue_on_error && is_per_directory(&err) {
            warn!(dir = %dir, error = %err, "skipping directory");
            self.finish_current();
            None
        } else {
            self.current = None;
            self.pending.clear();
            self.state = State::Failed;
            Some(err)
        }
    }
}

/// Failures confined to one directory of the walk.
fn is_per_directory(err: &FsError) -> bool {
    matches!(
        err,
        FsError::NotFound { .. }
            | FsError::NotADirectory { .. }
            | FsError::PermissionDenied { .. }
            | FsError::Io { .. }
    )
}

impl<P: FsSearch + ?Sized> Iterator for Enumeration<'_, P> {
    type Item = Result<DirEntry, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.state == State::Running {
            let Some(search) = self.current.as_ref() else {
                match self.pending.pop() {
                    Some(dir) => match OpenSearch::open(self.provider, dir.clone(), self.transaction)
                    {
                        Ok(search) => self.current = Some(search),
                        Err(err) => {
                            if let Some(err) = self.fail_or_skip(&dir, err) {
                                return Some(Err(err));
                            }
                        }
                    },
                    None => self.state = State::Done,
                }
                continue;
            };

            match self.provider.next_entry(search.handle) {
                Ok(Some(data)) => {
                    if let Some(entry) = self.accept(data) {
                        return Some(Ok(entry));
                    }
                }
                Ok(None) => self.finish_current(),
                Err(err) => {
                    let dir = search.dir.clone();
                    if let Some(err) = self.fail_or_skip(&dir, err) {
                        return Some(Err(err));
                    }
                }
            }
        }
        None
    }
}

impl<P: FsSearch + ?Sized> FusedIterator for Enumeration<'_, P> {}

impl<P: FsSearch + ?Sized> fmt::Debug for Enumeration<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumeration")
            .field("pattern", &self.pattern.as_str())
            .field("options", &self.options)
            .field("current", &self.current.as_ref().map(|search| &search.dir))
            .field("pending", &self.pending.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
