//! Error types for `L2Data`

use thiserror::Error;

use crate::formats::block::BlockKind;

/// The error type for `L2Data` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Block File Errors ====================
    /// Another record of the same kind already uses this identity.
    #[error("{kind} {key} already exists")]
    DuplicateIdentity {
        /// Record family the clash happened in.
        kind: BlockKind,
        /// Human-readable identity (e.g. `1000 level 1 sublevel 0`).
        key: String,
    },

    /// No record with this identity exists.
    #[error("{kind} {key} not found")]
    RecordNotFound {
        /// Record family that was searched.
        kind: BlockKind,
        /// Human-readable identity.
        key: String,
    },

    /// An identity field was given an empty value.
    #[error("{field} cannot be empty")]
    EmptyIdentity {
        /// The identity field name.
        field: String,
    },

    // ==================== Set Generation Errors ====================
    /// The armor set document contains no `<set>` elements.
    #[error("No sets found in armor_sets.xml")]
    NoArmorSets,

    // ==================== Parsing Errors ====================
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// `l2data.toml` could not be parsed.
    #[error("layout config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    // ==================== Generic/Fallback Errors ====================
    /// Invalid format error (use specific variants when possible).
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

// Add conversion from quick_xml::events::attributes::AttrError
impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `L2Data` operations.
pub type Result<T> = std::result::Result<T, Error>;
