//! Flags controlling directory enumeration.

/// Flags controlling what an enumeration yields and how it walks.
///
/// When neither `files` nor `folders` is set, both are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnumerationOptions {
    /// Yield file entries.
    pub files: bool,
    /// Yield directory entries.
    pub folders: bool,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Skip directories that fail to open or read instead of failing the sequence.
    pub continue_on_error: bool,
    /// Yield reparse points but never descend into them.
    pub skip_reparse_points: bool,
    /// Match the search pattern case-sensitively.
    pub case_sensitive: bool,
    /// Report entry paths in extended-length form.
    pub as_long_path: bool,
}

impl EnumerationOptions {
    /// Files only.
    pub const FILES: Self = Self {
        files: true,
        folders: false,
        recursive: false,
        continue_on_error: false,
        skip_reparse_points: false,
        case_sensitive: false,
        as_long_path: false,
    };

    /// Directories only.
    pub const FOLDERS: Self = Self {
        files: false,
        folders: true,
        ..Self::FILES
    };

    /// Files and directories.
    pub const FILES_AND_FOLDERS: Self = Self {
        files: true,
        folders: true,
        ..Self::FILES
    };

    /// Enable recursion.
    pub const fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Skip failing subdirectories.
    pub const fn continue_on_error(mut self) -> Self {
        self.continue_on_error = true;
        self
    }

    /// Never descend into reparse points.
    pub const fn skip_reparse_points(mut self) -> Self {
        self.skip_reparse_points = true;
        self
    }

    /// Match case-sensitively.
    pub const fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Report extended-length paths.
    pub const fn as_long_path(mut self) -> Self {
        self.as_long_path = true;
        self
    }

    /// Whether file entries are surfaced, after the "neither means both" rule.
    pub const fn includes_files(&self) -> bool {
        self.files || !self.folders
    }

    /// Whether directory entries are surfaced, after the "neither means both" rule.
    pub const fn includes_folders(&self) -> bool {
        self.folders || !self.files
    }
}
