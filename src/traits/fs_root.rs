//! Volume root lookup.

use crate::NormalizedPath;

/// Root/volume lookup of a filesystem access provider.
///
/// The default implementation is purely lexical (`"C:\"` or
/// `"\\host\share\"`) and never touches the filesystem. Providers that know
/// about mounted folders may override it.
pub trait FsRoot: Send + Sync {
    /// The root of `path`, or `None` if it has no root segment.
    fn root(&self, path: &NormalizedPath) -> Option<String> {
        path.root()
    }
}
