//! Per-call configuration shared by every core operation.

use crate::{EnumerationOptions, PathFormat, PathNormalizer, Transaction};

/// Every option a core operation recognizes.
///
/// Replaces a family of overloads (transacted or not, relative or full path,
/// with or without options) with one value passed to each operation.
///
/// # Example
///
/// ```rust
/// use unifs::{EnumerationOptions, OperationConfig, PathFormat, Transaction};
///
/// let config = OperationConfig::new()
///     .with_working_dir(r"C:\work")
///     .with_transaction(Transaction::from_raw(42))
///     .with_enumeration(EnumerationOptions::FILES.recursive());
///
/// assert_eq!(config.path_format, PathFormat::RelativePath);
/// assert!(config.enumeration.recursive);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OperationConfig {
    /// How much normalization the input path needs.
    pub path_format: PathFormat,
    /// Transaction every provider call is issued against, if any.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub transaction: Option<Transaction>,
    /// Enumeration flags; ignored by non-enumerating operations.
    pub enumeration: EnumerationOptions,
    /// Directory that relative input is resolved against.
    pub working_dir: Option<String>,
    /// Always use the extended-length path form.
    pub force_long_path: bool,
}

impl OperationConfig {
    /// Defaults: relative paths, no transaction, files and folders, not recursive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path format.
    pub fn with_path_format(mut self, format: PathFormat) -> Self {
        self.path_format = format;
        self
    }

    /// Issue every provider call against `transaction`.
    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transaction = Some(transaction);
        self
    }

    /// Set the enumeration flags.
    pub fn with_enumeration(mut self, options: EnumerationOptions) -> Self {
        self.enumeration = options;
        self
    }

    /// Resolve relative input against `dir`.
    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Always use the extended-length path form.
    pub fn with_force_long_path(mut self, force: bool) -> Self {
        self.force_long_path = force;
        self
    }

    /// The normalizer described by this configuration.
    pub fn normalizer(&self) -> PathNormalizer {
        let normalizer = PathNormalizer::new().force_long_path(self.force_long_path);
        match &self.working_dir {
            Some(dir) => normalizer.with_working_dir(dir.clone()),
            None => normalizer,
        }
    }
}

#[cfg(feature = "serde")]
impl OperationConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`FsError::Deserialization`](crate::FsError::Deserialization) if the
    /// document is malformed.
    pub fn from_json(json: &str) -> Result<Self, crate::FsError> {
        serde_json::from_str(json).map_err(|e| crate::FsError::Deserialization(e.to_string()))
    }

    /// Serialize to JSON. The transaction handle is never serialized.
    ///
    /// # Errors
    ///
    /// [`FsError::Serialization`](crate::FsError::Serialization) if encoding fails.
    pub fn to_json(&self) -> Result<String, crate::FsError> {
        serde_json::to_string(self).map_err(|e| crate::FsError::Serialization(e.to_string()))
    }
}
