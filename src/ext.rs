//! # Extension Traits
//!
//! Thin convenience wrappers over the core operations.
//!
//! ## Available Methods
//!
//! | Method | Forwards to |
//! |--------|-------------|
//! | [`enumerate_entries`](FsProviderExt::enumerate_entries) | [`enumerate`] |
//! | [`enumerate_files`](FsProviderExt::enumerate_files) | [`enumerate`], files only |
//! | [`enumerate_directories`](FsProviderExt::enumerate_directories) | [`enumerate`], folders only |
//! | [`directory_root`](FsProviderExt::directory_root) | [`get_root`] |
//! | [`set_creation_time`](FsProviderExt::set_creation_time) | [`set_timestamp`] |
//! | [`set_last_access_time`](FsProviderExt::set_last_access_time) | [`set_timestamp`] |
//! | [`set_last_write_time`](FsProviderExt::set_last_write_time) | [`set_timestamp`] |
//! | [`last_write_time`](FsProviderExt::last_write_time) | [`get_timestamp`] |

use std::time::SystemTime;

use crate::{
    Enumeration, FsError, FsProvider, OperationConfig, TimestampKind, enumerate, get_root,
    get_timestamp, set_timestamp,
};

/// Convenience methods for any [`FsProvider`].
///
/// # Example
///
/// ```rust
/// use unifs::{FsError, FsProvider, FsProviderExt, OperationConfig};
///
/// fn subdirectory_names<P: FsProvider>(provider: &P, dir: &str) -> Result<Vec<String>, FsError> {
///     let config = OperationConfig::new().with_working_dir(r"C:\");
///     provider
///         .enumerate_directories(dir, "*", &config)?
///         .map(|entry| entry.map(|e| e.name))
///         .collect()
/// }
/// ```
pub trait FsProviderExt: FsProvider {
    /// Enumerate with the flags in `config.enumeration`.
    fn enumerate_entries<'a>(
        &'a self,
        path: &str,
        pattern: &str,
        config: &OperationConfig,
    ) -> Result<Enumeration<'a, Self>, FsError> {
        enumerate(self, path, pattern, config)
    }

    /// Enumerate files only; other flags come from `config.enumeration`.
    fn enumerate_files<'a>(
        &'a self,
        path: &str,
        pattern: &str,
        config: &OperationConfig,
    ) -> Result<Enumeration<'a, Self>, FsError> {
        let mut config = config.clone();
        config.enumeration.files = true;
        config.enumeration.folders = false;
        enumerate(self, path, pattern, &config)
    }

    /// Enumerate directories only; other flags come from `config.enumeration`.
    fn enumerate_directories<'a>(
        &'a self,
        path: &str,
        pattern: &str,
        config: &OperationConfig,
    ) -> Result<Enumeration<'a, Self>, FsError> {
        let mut config = config.clone();
        config.enumeration.files = false;
        config.enumeration.folders = true;
        enumerate(self, path, pattern, &config)
    }

    /// The root of `path`, or `None` if it has none.
    fn directory_root(&self, path: &str, config: &OperationConfig) -> Result<Option<String>, FsError> {
        get_root(self, path, config)
    }

    /// Set the creation time.
    fn set_creation_time(
        &self,
        path: &str,
        value: SystemTime,
        config: &OperationConfig,
    ) -> Result<(), FsError> {
        set_timestamp(self, path, TimestampKind::Creation, value, config)
    }

    /// Set the last access time.
    fn set_last_access_time(
        &self,
        path: &str,
        value: SystemTime,
        config: &OperationConfig,
    ) -> Result<(), FsError> {
        set_timestamp(self, path, TimestampKind::LastAccess, value, config)
    }

    /// Set the last write time.
    fn set_last_write_time(
        &self,
        path: &str,
        value: SystemTime,
        config: &OperationConfig,
    ) -> Result<(), FsError> {
        set_timestamp(self, path, TimestampKind::LastWrite, value, config)
    }

    /// Read the last write time.
    fn last_write_time(&self, path: &str, config: &OperationConfig) -> Result<SystemTime, FsError> {
        get_timestamp(self, path, TimestampKind::LastWrite, config)
    }
}

impl<P: FsProvider + ?Sized> FsProviderExt for P {}
