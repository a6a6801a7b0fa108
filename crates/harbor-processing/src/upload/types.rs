use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::mime::ImageMime;

/// Default per-file size limit when none is configured
pub const DEFAULT_MAX_SIZE_MB: u32 = 100;

/// A file received in a multipart request, already spooled to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    pub temporary_path: PathBuf,
    pub original_name: Option<String>,
    pub declared_mime: Option<String>,
    pub declared_size: u64,
}

/// Uploaded files grouped by form field name
pub type UploadFiles = BTreeMap<String, Vec<IncomingFile>>;

/// Text form values grouped by field name
pub type FormFields = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value {value} is outside the allowed range {min}..={max}")]
pub struct OutOfRange {
    pub value: u32,
    pub min: u32,
    pub max: u32,
}

/// Integer checked against `[MIN, MAX]` on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Bounded<const MIN: u32, const MAX: u32>(u32);

impl<const MIN: u32, const MAX: u32> Bounded<MIN, MAX> {
    pub fn try_new(value: u32) -> Result<Self, OutOfRange> {
        if (MIN..=MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(OutOfRange {
                value,
                min: MIN,
                max: MAX,
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl<const MIN: u32, const MAX: u32> TryFrom<u32> for Bounded<MIN, MAX> {
    type Error = OutOfRange;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl<const MIN: u32, const MAX: u32> From<Bounded<MIN, MAX>> for u32 {
    fn from(value: Bounded<MIN, MAX>) -> Self {
        value.0
    }
}

/// Maximum number of files per upload
pub type MaxFiles = Bounded<1, 100>;

/// Maximum size of a single file, in megabytes
pub type MaxSizeMb = Bounded<1, 100>;

/// Settings shared by plain file and image uploads
#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Only files under this form field are considered; all fields otherwise.
    pub field_name: Option<String>,
    /// Destination directory.
    pub location: PathBuf,
    pub max_files: MaxFiles,
    pub max_size: Option<MaxSizeMb>,
    /// Requested base name, used only when a single file is uploaded.
    pub file_name: Option<String>,
}

impl UploadSettings {
    pub fn new(location: impl Into<PathBuf>, max_files: MaxFiles) -> Self {
        Self {
            field_name: None,
            location: location.into(),
            max_files,
            max_size: None,
            file_name: None,
        }
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn with_max_size(mut self, max_size: MaxSizeMb) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Size limit in bytes; files must be strictly smaller.
    pub fn max_size_bytes(&self) -> u64 {
        let mb = self.max_size.map(MaxSizeMb::get).unwrap_or(DEFAULT_MAX_SIZE_MB);
        u64::from(mb) * 1024 * 1024
    }
}

/// Configuration for a plain file upload
#[derive(Debug, Clone)]
pub struct UploadConfiguration {
    pub settings: UploadSettings,
    /// Accepted MIME types; any type when `None`.
    pub allowed_types: Option<BTreeSet<String>>,
}

impl UploadConfiguration {
    pub fn new(settings: UploadSettings) -> Self {
        Self {
            settings,
            allowed_types: None,
        }
    }

    pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = Some(types.into_iter().map(Into::into).collect());
        self
    }
}

/// Target size of stored images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageDimensions {
    #[default]
    Unset,
    Exact { width: u32, height: u32 },
}

/// Configuration for an image upload
#[derive(Debug, Clone)]
pub struct ImageUploadConfiguration {
    pub settings: UploadSettings,
    /// Accepted image types; [`ImageMime::ALL`] when `None`.
    pub allowed_types: Option<BTreeSet<ImageMime>>,
    pub preserve_ratio: bool,
    pub dimensions: ImageDimensions,
    pub max_width: Option<u32>,
}

impl ImageUploadConfiguration {
    pub fn new(settings: UploadSettings) -> Self {
        Self {
            settings,
            allowed_types: None,
            preserve_ratio: false,
            dimensions: ImageDimensions::Unset,
            max_width: None,
        }
    }

    pub fn with_allowed_types(mut self, types: impl IntoIterator<Item = ImageMime>) -> Self {
        self.allowed_types = Some(types.into_iter().collect());
        self
    }

    pub fn with_preserve_ratio(mut self, preserve_ratio: bool) -> Self {
        self.preserve_ratio = preserve_ratio;
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = ImageDimensions::Exact { width, height };
        self
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Plain upload configuration the validator checks images against.
    pub fn validation_config(&self) -> UploadConfiguration {
        let allowed: Vec<ImageMime> = match &self.allowed_types {
            Some(types) => types.iter().copied().collect(),
            None => ImageMime::ALL.to_vec(),
        };
        UploadConfiguration::new(self.settings.clone())
            .with_allowed_types(allowed.into_iter().map(ImageMime::as_str))
    }
}

/// Files that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VettedUpload {
    pub files: Vec<IncomingFile>,
    pub sanitized_file_name: Option<String>,
}

/// Result of validating one upload group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub success: bool,
    pub message: String,
    pub sanitized_file_name: Option<String>,
    #[serde(skip)]
    pub vetted_files: Option<Vec<IncomingFile>>,
}

/// Aggregated result of ingesting one upload group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub success: bool,
    pub message: String,
    pub total_files: usize,
    pub files_uploaded: usize,
    pub uploaded_file_names: Vec<String>,
}

impl UploadOutcome {
    /// Outcome of a group that never reached ingestion
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Default::default()
        }
    }
}
