//! # Provider Traits
//!
//! The interface the core needs from the underlying filesystem.
//!
//! ## Capabilities
//!
//! | Trait | Operations | Used by |
//! |-------|------------|---------|
//! | [`FsSearch`] | `open_search`, `next_entry`, `close_search` | Enumeration |
//! | [`FsTimes`] | `set_times`, `file_time` | Timestamp mutation |
//! | [`FsRoot`] | `root` (lexical default) | Root resolution |
//!
//! [`FsProvider`] combines all three and has a blanket implementation:
//!
//! ```rust
//! use std::time::SystemTime;
//! use unifs::{
//!     FileTimes, FindData, FsError, FsProvider, FsRoot, FsSearch, FsTimes, NormalizedPath,
//!     SearchHandle, TimestampKind, Transaction,
//! };
//!
//! struct EmptyVolume;
//!
//! impl FsSearch for EmptyVolume {
//!     fn open_search(&self, _: &NormalizedPath, _: Option<Transaction>) -> Result<SearchHandle, FsError> {
//!         Ok(SearchHandle(1))
//!     }
//!     fn next_entry(&self, _: SearchHandle) -> Result<Option<FindData>, FsError> {
//!         Ok(None)
//!     }
//!     fn close_search(&self, _: SearchHandle) -> Result<(), FsError> {
//!         Ok(())
//!     }
//! }
//!
//! impl FsTimes for EmptyVolume {
//!     fn set_times(&self, _: &NormalizedPath, _: &FileTimes, _: Option<Transaction>) -> Result<(), FsError> {
//!         Ok(())
//!     }
//!     fn file_time(&self, _: &NormalizedPath, _: TimestampKind, _: Option<Transaction>) -> Result<SystemTime, FsError> {
//!         Ok(SystemTime::UNIX_EPOCH)
//!     }
//! }
//!
//! impl FsRoot for EmptyVolume {}
//!
//! fn use_provider<P: FsProvider>(_provider: &P) {}
//! use_provider(&EmptyVolume);
//! ```
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` and take `&self`.
//!
//! ## Transactions
//!
//! Every call that can observe or change filesystem state accepts an
//! `Option<Transaction>`. `None` is the "no transaction" sentinel. The
//! provider alone interprets the handle.

mod fs_root;
mod fs_search;
mod fs_times;

pub use fs_root::FsRoot;
pub use fs_search::FsSearch;
pub use fs_times::FsTimes;

/// A complete filesystem access provider.
///
/// Automatically implemented for any type implementing [`FsSearch`],
/// [`FsTimes`] and [`FsRoot`].
pub trait FsProvider: FsSearch + FsTimes + FsRoot {}

impl<T: FsSearch + FsTimes + FsRoot + ?Sized> FsProvider for T {}
