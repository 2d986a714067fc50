//! Timestamp operations.

use std::time::SystemTime;

use crate::{FileTimes, FsError, NormalizedPath, TimestampKind, Transaction};

/// Timestamp get/set operations of a filesystem access provider.
///
/// Values arriving at [`set_times`](FsTimes::set_times) through this crate are
/// already truncated to [`TIME_RESOLUTION`](crate::TIME_RESOLUTION).
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`.
pub trait FsTimes: Send + Sync {
    /// Apply every `Some` value in `times` to the object at `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `path` does not exist
    /// - [`FsError::PermissionDenied`] if the change is refused
    /// - [`FsError::Transaction`] if the transaction is no longer usable
    fn set_times(
        &self,
        path: &NormalizedPath,
        times: &FileTimes,
        transaction: Option<Transaction>,
    ) -> Result<(), FsError>;

    /// Read one timestamp of the object at `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `path` does not exist
    fn file_time(
        &self,
        path: &NormalizedPath,
        kind: TimestampKind,
        transaction: Option<Transaction>,
    ) -> Result<SystemTime, FsError>;
}
