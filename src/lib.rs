//! # unifs
//!
//! Windows-style path handling, lazy directory enumeration and timestamp
//! mutation over a **pluggable filesystem access provider**.
//!
//! The crate never touches the host filesystem. Everything that reads or
//! changes state goes through the provider traits; everything else (path
//! normalization, root resolution, wildcard matching) is purely lexical and
//! behaves the same on every platform.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use unifs::{EnumerationOptions, FsError, FsProvider, FsProviderExt, OperationConfig};
//!
//! fn log_files<P: FsProvider>(provider: &P) -> Result<usize, FsError> {
//!     let config = OperationConfig::new()
//!         .with_working_dir(r"C:\projects")
//!         .with_enumeration(EnumerationOptions::FILES.recursive().continue_on_error());
//!
//!     let mut count = 0;
//!     for entry in provider.enumerate_entries("logs", "*.log", &config)? {
//!         println!("{}", entry?.path);
//!         count += 1;
//!     }
//!     Ok(count)
//! }
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`PathNormalizer`] | Turns raw input into a [`NormalizedPath`] |
//! | [`NormalizedPath`] | Absolute, separator-normalized, `.`/`..`-free path |
//! | [`SearchPattern`] | `*` / `?` wildcard matched against one name segment |
//! | [`Enumeration`] | Lazy, depth-first directory walk |
//! | [`OperationConfig`] | Path format, transaction and enumeration flags for one call |
//! | [`Transaction`] | Opaque provider-interpreted transaction handle |
//! | [`FsError`] | Error type with the offending path as context |
//!
//! ---
//!
//! ## Operations
//!
//! | Function | Provider trait |
//! |----------|----------------|
//! | [`enumerate`] | [`FsSearch`] |
//! | [`get_root`] | [`FsRoot`] |
//! | [`set_timestamp`], [`set_timestamps`], [`get_timestamp`] | [`FsTimes`] |
//!
//! [`FsProviderExt`] exposes the same operations as methods on any
//! [`FsProvider`].
//!
//! ---
//!
//! ## Path Forms
//!
//! ```text
//! C:\dir\file            drive absolute
//! \\server\share\file    UNC
//! \\?\C:\dir\file        long (extended-length) drive
//! \\?\UNC\server\share   long UNC
//! ```
//!
//! Paths of [`MAX_PATH`] characters or more are emitted in long form. Device
//! namespace paths (`\\.\`) and volume GUID paths are rejected with
//! [`FsError::NotSupported`].
//!
//! ---
//!
//! ## Error Handling
//!
//! ```rust
//! use unifs::FsError;
//!
//! let err = FsError::NotFound { path: r"C:\missing".into() };
//! assert_eq!(err.to_string(), r"not found: C:\missing");
//! assert!(err.is_not_found());
//! ```
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`OperationConfig`], [`EnumerationOptions`], [`DirEntry`], etc. |

// Private modules
mod config;
mod enumerate;
mod error;
mod ext;
mod options;
mod path;
mod root;
mod timestamps;
mod traits;
mod types;

// Public re-exports - error types
pub use error::FsError;

// Public re-exports - core types
pub use types::{
    DirEntry, FileAttributes, FileTimes, FileType, FindData, SearchHandle, TIME_RESOLUTION,
    TimestampKind, Transaction, truncate_to_resolution,
};

// Public re-exports - paths
pub use path::{
    ALT_DIRECTORY_SEPARATOR, DIRECTORY_SEPARATOR, LONG_PATH_PREFIX, LONG_PATH_UNC_PREFIX,
    MAX_LONG_PATH, MAX_PATH, NormalizedPath, PathFormat, PathNormalizer, SearchPattern,
    UNC_PREFIX, WILDCARD_MATCH_ALL, WILDCARD_MATCH_ONE, is_long_path, is_unc_path, long_path,
    path_root, regular_path,
};

// Public re-exports - configuration
pub use config::OperationConfig;
pub use options::EnumerationOptions;

// Public re-exports - provider traits
pub use traits::{FsProvider, FsRoot, FsSearch, FsTimes};

// Public re-exports - operations
pub use enumerate::{Enumeration, enumerate};
pub use root::get_root;
pub use timestamps::{get_timestamp, set_timestamp, set_timestamps};

// Public re-exports - infrastructure
pub use ext::FsProviderExt;
