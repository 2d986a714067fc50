//! Handle-based directory search.
//!
//! The [`FsSearch`] trait is the provider side of enumeration. The workflow
//! mirrors the native find-first/find-next API:
//!
//! 1. `open_search()` - open a directory and get a [`SearchHandle`]
//! 2. `next_entry()` - pull raw records until `Ok(None)`
//! 3. `close_search()` - release the handle
//!
//! Callers inside this crate always release handles through a scope guard,
//! so every successful `open_search` is paired with exactly one
//! `close_search`, whether iteration completes, fails, or is abandoned.

use crate::{FindData, FsError, NormalizedPath, SearchHandle, Transaction};

/// Directory search operations of a filesystem access provider.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self`; providers
/// keep open searches behind interior mutability.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsSearch`.
///
/// # Example
///
/// ```rust
/// use unifs::{FsError, FsSearch, NormalizedPath};
///
/// fn count_raw_entries<B: FsSearch>(backend: &B, dir: &NormalizedPath) -> Result<usize, FsError> {
///     let handle = backend.open_search(dir, None)?;
///     let mut count = 0;
///     let result = loop {
///         match backend.next_entry(handle) {
///             Ok(Some(_)) => count += 1,
///             Ok(None) => break Ok(count),
///             Err(e) => break Err(e),
///         }
///     };
///     backend.close_search(handle)?;
///     result
/// }
/// ```
pub trait FsSearch: Send + Sync {
    /// Open a search over the entries of `dir`.
    ///
    /// When `transaction` is `Some`, the search must observe that
    /// transaction's view of the directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `dir` does not exist
    /// - [`FsError::NotADirectory`] if `dir` is not a directory
    /// - [`FsError::PermissionDenied`] if listing is refused
    /// - [`FsError::Transaction`] if the transaction is no longer usable
    fn open_search(
        &self,
        dir: &NormalizedPath,
        transaction: Option<Transaction>,
    ) -> Result<SearchHandle, FsError>;

    /// Read the next raw record, or `Ok(None)` once the directory is exhausted.
    ///
    /// Providers may return the `.` and `..` pseudo-entries; the enumeration
    /// engine drops them.
    fn next_entry(&self, handle: SearchHandle) -> Result<Option<FindData>, FsError>;

    /// Release a search handle.
    fn close_search(&self, handle: SearchHandle) -> Result<(), FsError>;
}
