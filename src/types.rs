//! Core types shared by the normalizer, the enumeration engine and providers.

use std::ops::BitOr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Resolution at which timestamps are stored (100 ns, the NTFS tick).
pub const TIME_RESOLUTION: Duration = Duration::from_nanos(100);

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Reparse point (symbolic link, junction, mount point).
    ReparsePoint,
}

/// Attribute flags of a filesystem entry, stored as the Win32 bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileAttributes(u32);

impl FileAttributes {
    /// Entry is read-only.
    pub const READ_ONLY: Self = Self(0x0001);
    /// Entry is hidden.
    pub const HIDDEN: Self = Self(0x0002);
    /// Entry is used by the operating system.
    pub const SYSTEM: Self = Self(0x0004);
    /// Entry is a directory.
    pub const DIRECTORY: Self = Self(0x0010);
    /// Entry is marked for archiving.
    pub const ARCHIVE: Self = Self(0x0020);
    /// Entry has no other attributes set.
    pub const NORMAL: Self = Self(0x0080);
    /// Entry is a reparse point.
    pub const REPARSE_POINT: Self = Self(0x0400);

    /// Create attributes from a raw bitmask.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get the raw bitmask.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns `true` if every flag in `other` is set.
    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if the directory flag is set.
    #[inline]
    pub const fn is_directory(&self) -> bool {
        self.contains(Self::DIRECTORY)
    }

    /// Returns `true` if the reparse-point flag is set.
    #[inline]
    pub const fn is_reparse_point(&self) -> bool {
        self.contains(Self::REPARSE_POINT)
    }
}

impl BitOr for FileAttributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Which of the three timestamps an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimestampKind {
    /// Creation time.
    Creation,
    /// Last access time.
    LastAccess,
    /// Last write time.
    LastWrite,
}

/// Timestamps to apply in a single provider call; `None` leaves a value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileTimes {
    /// New creation time.
    pub created: Option<SystemTime>,
    /// New last access time.
    pub accessed: Option<SystemTime>,
    /// New last write time.
    pub modified: Option<SystemTime>,
}

impl FileTimes {
    /// Set one timestamp.
    pub fn with(mut self, kind: TimestampKind, value: SystemTime) -> Self {
        *self.slot(kind) = Some(value);
        self
    }

    /// Get the value for one timestamp, if set.
    pub fn get(&self, kind: TimestampKind) -> Option<SystemTime> {
        match kind {
            TimestampKind::Creation => self.created,
            TimestampKind::LastAccess => self.accessed,
            TimestampKind::LastWrite => self.modified,
        }
    }

    /// Returns `true` if no timestamp is set.
    pub fn is_empty(&self) -> bool {
        self.created.is_none() && self.accessed.is_none() && self.modified.is_none()
    }

    /// Truncate every value to [`TIME_RESOLUTION`].
    pub fn truncated(self) -> Self {
        Self {
            created: self.created.map(truncate_to_resolution),
            accessed: self.accessed.map(truncate_to_resolution),
            modified: self.modified.map(truncate_to_resolution),
        }
    }

    fn slot(&mut self, kind: TimestampKind) -> &mut Option<SystemTime> {
        match kind {
            TimestampKind::Creation => &mut self.created,
            TimestampKind::LastAccess => &mut self.accessed,
            TimestampKind::LastWrite => &mut self.modified,
        }
    }
}

/// Truncate a time value toward negative infinity to [`TIME_RESOLUTION`].
pub fn truncate_to_resolution(time: SystemTime) -> SystemTime {
    let tick = TIME_RESOLUTION.subsec_nanos();
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            let nanos = after.subsec_nanos() / tick * tick;
            UNIX_EPOCH + Duration::new(after.as_secs(), nanos)
        }
        Err(err) => {
            let before = err.duration();
            let rem = before.subsec_nanos() % tick;
            if rem == 0 {
                time
            } else {
                // Duration::new carries nanosecond overflow into seconds.
                let nanos = before.subsec_nanos() - rem + tick;
                UNIX_EPOCH - Duration::new(before.as_secs(), nanos)
            }
        }
    }
}

/// Raw record returned by a provider for one directory entry.
#[derive(Debug, Clone)]
pub struct FindData {
    /// Name of the entry (no directory component).
    pub name: String,
    /// Attribute flags.
    pub attributes: FileAttributes,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Creation time.
    pub created: SystemTime,
    /// Last access time.
    pub accessed: SystemTime,
    /// Last write time.
    pub modified: SystemTime,
}

impl FindData {
    /// Returns `true` for the `.` and `..` pseudo-entries.
    pub fn is_dot_entry(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// An entry yielded by directory enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirEntry {
    /// Name of the entry (filename only, not full path).
    pub name: String,
    /// Normalized full path to the entry.
    pub path: String,
    /// Kind of the entry.
    pub file_type: FileType,
    /// Size in bytes.
    pub size: u64,
    /// Attribute flags.
    pub attributes: FileAttributes,
    /// Creation time.
    #[cfg_attr(feature = "serde", serde(with = "system_time_serde"))]
    pub created: SystemTime,
    /// Last access time.
    #[cfg_attr(feature = "serde", serde(with = "system_time_serde"))]
    pub accessed: SystemTime,
    /// Last write time.
    #[cfg_attr(feature = "serde", serde(with = "system_time_serde"))]
    pub modified: SystemTime,
}

impl DirEntry {
    pub(crate) fn from_find_data(data: FindData, path: String) -> Self {
        let file_type = if data.attributes.is_reparse_point() {
            FileType::ReparsePoint
        } else if data.attributes.is_directory() {
            FileType::Directory
        } else {
            FileType::File
        };
        Self {
            name: data.name,
            path,
            file_type,
            size: data.size,
            attributes: data.attributes,
            created: data.created,
            accessed: data.accessed,
            modified: data.modified,
        }
    }

    /// Returns `true` if the entry is a directory (including directory reparse points).
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.attributes.is_directory()
    }

    /// Returns `true` if the entry is not a directory.
    #[inline]
    pub fn is_file(&self) -> bool {
        !self.attributes.is_directory()
    }

    /// Returns `true` if the entry is a reparse point.
    #[inline]
    pub fn is_reparse_point(&self) -> bool {
        self.file_type == FileType::ReparsePoint
    }
}

/// Opaque handle for an open directory search.
///
/// The internal value is provider-defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchHandle(pub u64);

/// Opaque kernel-transaction handle.
///
/// Owned by the caller. The crate never begins, commits or rolls back a
/// transaction; it only forwards the handle to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transaction(u64);

impl Transaction {
    /// Wrap a provider-defined transaction identifier.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the provider-defined identifier.
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

#[cfg(feature = "serde")]
mod system_time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    /// Stored as signed whole seconds since the epoch plus non-negative nanoseconds.
    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => (after.as_secs() as i64, after.subsec_nanos()),
            Err(err) => {
                let before = err.duration();
                match before.subsec_nanos() {
                    0 => (-(before.as_secs() as i64), 0),
                    n => (-(before.as_secs() as i64) - 1, 1_000_000_000 - n),
                }
            }
        };
        (secs, nanos).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (secs, nanos): (i64, u32) = Deserialize::deserialize(deserializer)?;
        let whole = Duration::from_secs(secs.unsigned_abs());
        let base = if secs >= 0 {
            UNIX_EPOCH.checked_add(whole)
        } else {
            UNIX_EPOCH.checked_sub(whole)
        };
        base.and_then(|t| t.checked_add(Duration::from_nanos(u64::from(nanos))))
            .ok_or_else(|| serde::de::Error::custom("timestamp out of range"))
    }
}
