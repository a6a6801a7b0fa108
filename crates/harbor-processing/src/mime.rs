//! MIME type classification.

/// MIME types that are never accepted, whatever the upload's allow-list says.
pub const DANGEROUS_MIME_TYPES: &[&str] = &[
    "application/x-msdownload",
    "application/x-sh",
    "application/x-perl",
    "application/x-php",
    "application/x-python",
    "application/x-ruby",
    "application/x-msdos-program",
    "application/x-java-archive",
    "application/x-mswinurl",
    "text/x-script.sh",
    "text/x-php",
    "text/x-python",
    "text/x-ruby",
    "text/html",
    "text/javascript",
    "text/css",
    "text/xml",
    "text/x-csrc",
    "text/x-c++src",
    "application/x-ns-proxy-autoconfig",
    "application/x-httpd-php",
    "application/x-httpd-cgi",
    "application/x-cgi",
    "application/x-bat",
    "application/x-ms-dos-executable",
    "application/sql",
    "application/x-sql",
];

/// Lowercase a MIME type and drop any parameters (`; charset=...`).
pub fn normalize_mime_type(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

pub fn is_dangerous(mime: &str) -> bool {
    let normalized = normalize_mime_type(mime);
    DANGEROUS_MIME_TYPES.contains(&normalized.as_str())
}

/// Image types the image ingestor can decode and re-encode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageMime {
    Png,
    Jpeg,
    /// Non-standard `image/jpg`, still sent by some clients.
    Jpg,
    Webp,
}

impl ImageMime {
    pub const ALL: [ImageMime; 4] = [
        ImageMime::Png,
        ImageMime::Jpeg,
        ImageMime::Jpg,
        ImageMime::Webp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Jpg => "image/jpg",
            ImageMime::Webp => "image/webp",
        }
    }

    pub fn parse(mime: &str) -> Option<Self> {
        let normalized = normalize_mime_type(mime);
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == normalized)
    }
}

impl std::fmt::Display for ImageMime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
