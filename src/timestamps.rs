//! Timestamp mutation.

use std::time::SystemTime;

use tracing::debug;

use crate::{FileTimes, FsError, FsTimes, OperationConfig, TimestampKind};

/// Set one timestamp of the object at `path`.
///
/// The value is truncated to [`TIME_RESOLUTION`](crate::TIME_RESOLUTION) and
/// applied with exactly one provider call, inside `config.transaction` if set.
/// Setting the same value twice leaves the same observable state.
///
/// # Errors
///
/// - [`FsError::InvalidPath`] / [`FsError::NotSupported`] from normalization
/// - [`FsError::NotFound`], [`FsError::PermissionDenied`],
///   [`FsError::Transaction`] from the provider
pub fn set_timestamp<P>(
    provider: &P,
    path: &str,
    kind: TimestampKind,
    value: SystemTime,
    config: &OperationConfig,
) -> Result<(), FsError>
where
    P: FsTimes + ?Sized,
{
    set_timestamps(provider, path, FileTimes::default().with(kind, value), config)
}

/// Set any combination of timestamps with a single provider call.
pub fn set_timestamps<P>(
    provider: &P,
    path: &str,
    times: FileTimes,
    config: &OperationConfig,
) -> Result<(), FsError>
where
    P: FsTimes + ?Sized,
{
    let normalized = config.normalizer().normalize(path, config.path_format)?;
    let times = times.truncated();
    debug!(path = %normalized, ?times, transacted = config.transaction.is_some(), "setting timestamps");
    provider.set_times(&normalized, &times, config.transaction)
}

/// Read one timestamp of the object at `path`.
pub fn get_timestamp<P>(
    provider: &P,
    path: &str,
    kind: TimestampKind,
    config: &OperationConfig,
) -> Result<SystemTime, FsError>
where
    P: FsTimes + ?Sized,
{
    let normalized = config.normalizer().normalize(path, config.path_format)?;
    provider.file_time(&normalized, kind, config.transaction)
}
