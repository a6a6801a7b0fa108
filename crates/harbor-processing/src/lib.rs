//! Upload validation and ingestion for Harbor.
//!
//! The validator vets multipart uploads against an [`UploadConfiguration`];
//! the ingestors copy plain files or resize and re-encode images into their
//! destination directory.

pub mod mime;
pub mod sanitize;
pub mod upload;
pub mod validator;

#[cfg(feature = "image")]
pub mod image;

pub use mime::{is_dangerous, ImageMime, DANGEROUS_MIME_TYPES};
pub use sanitize::sanitize_file_name;
pub use upload::{
    ingest_files, FormFields, ImageDimensions, ImageUploadConfiguration, IncomingFile, MaxFiles,
    MaxSizeMb, OutOfRange, UploadConfiguration, UploadFiles, UploadOutcome, UploadSettings,
    ValidationResult, VettedUpload,
};
pub use validator::{validate_upload, UploadValidator, ValidationError};

#[cfg(feature = "image")]
pub use upload::ingest_images;
