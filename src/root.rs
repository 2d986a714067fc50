//! Root resolution.

use tracing::debug;

use crate::{FsError, FsRoot, OperationConfig};

/// The root of `path`: `"C:\"` for drive paths, `"\\host\share\"` for UNC.
///
/// The path is normalized first and then reduced to its regular form, so
/// `"C:\data\.."` and `"\\?\C:\data"` both resolve to `"C:\"`. A path without
/// a root segment yields `Ok(None)`, not an error.
///
/// # Errors
///
/// [`FsError::InvalidPath`] / [`FsError::NotSupported`] from normalization.
///
/// # Example
///
/// ```rust
/// use unifs::{get_root, FsRoot, OperationConfig, PathFormat};
///
/// struct Lexical;
/// impl FsRoot for Lexical {}
///
/// let config = OperationConfig::new().with_working_dir(r"\\server\share\dir");
/// assert_eq!(get_root(&Lexical, r"C:\data\..", &config)?.as_deref(), Some(r"C:\"));
/// assert_eq!(get_root(&Lexical, "file.txt", &config)?.as_deref(), Some(r"\\server\share\"));
///
/// let raw = config.with_path_format(PathFormat::LongFullPath);
/// assert_eq!(get_root(&Lexical, r"\\?\Volume{0}\x", &raw)?, None);
/// # Ok::<(), unifs::FsError>(())
/// ```
pub fn get_root<P>(
    provider: &P,
    path: &str,
    config: &OperationConfig,
) -> Result<Option<String>, FsError>
where
    P: FsRoot + ?Sized,
{
    let normalized = config.normalizer().normalize(path, config.path_format)?;
    let root = provider
        .root(&normalized)
        .filter(|root| !root.trim().is_empty());
    debug!(path, root = ?root, "resolved root");
    Ok(root)
}
