//! Error types for the icon pack pipeline.
//!
//! Each stage owns its own error enum. Per-icon failures are folded into
//! [`IconError`] and surfaced by the exporter as [`ExportError::Icon`], which
//! always names the icon that broke the batch.

use thiserror::Error;

/// A compound icon identifier could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IconIdError {
    #[error("icon id `{0}` is missing the `:` separator")]
    MissingSeparator(String),

    #[error("icon id `{0}` has an empty collection prefix")]
    EmptyCollection(String),

    #[error("icon id `{0}` has an empty icon name")]
    EmptyName(String),
}

/// The icon data provider could not satisfy a request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected response from {url}: {message}")]
    Body { url: String, message: String },

    #[error("icon `{prefix}:{name}` not found")]
    NotFound { prefix: String, name: String },
}

/// A cache storage operation failed.
///
/// The cache recovers from these locally; they never reach callers.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache entry could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage quota exceeded writing {needed} bytes ({available} available)")]
    QuotaExceeded { needed: usize, available: usize },
}

/// A [`StyleConfig`](crate::StyleConfig) value is out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("unrecognized color `{0}`")]
    InvalidColor(String),

    #[error("padding must be within 0..100 percent, got {0}")]
    Padding(f32),

    #[error("stroke width must be a positive number, got {0}")]
    StrokeWidth(f32),

    #[error("icon size must be greater than zero")]
    ZeroSize,
}

/// Rasterizing a single icon failed.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load SVG for `{icon}`: {reason}")]
    RasterLoad { icon: String, reason: String },

    #[error("cannot allocate a {size}x{size} raster for `{icon}`")]
    Canvas { icon: String, size: u32 },

    #[error("failed to encode PNG for `{icon}`: {source}")]
    Encoding {
        icon: String,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Any failure while processing one icon of an export batch.
#[derive(Debug, Error)]
pub enum IconError {
    #[error(transparent)]
    Id(#[from] IconIdError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// An export run was aborted.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to export icon: {id}")]
    Icon {
        id: String,
        #[source]
        source: IconError,
    },

    #[error("no icons selected")]
    EmptySelection,

    #[error("invalid style: {0}")]
    Style(#[from] StyleError),

    #[error("invalid icon id: {0}")]
    InvalidId(#[from] IconIdError),

    #[error("failed to serialize pack manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("failed to write pack archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to deliver pack `{file_name}`: {source}")]
    Delivery {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Returns the identifier of the icon that aborted the export, if any.
    pub fn icon_id(&self) -> Option<&str> {
        match self {
            Self::Icon { id, .. } => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_failure_message_names_the_icon() {
        let err = ExportError::Icon {
            id: "lucide:home".into(),
            source: IconError::Fetch(FetchError::Status {
                url: "https://api.iconify.design/lucide/home.svg".into(),
                status: 404,
            }),
        };
        assert_eq!(err.to_string(), "Failed to export icon: lucide:home");
        assert_eq!(err.icon_id(), Some("lucide:home"));
    }

    #[test]
    fn non_icon_errors_have_no_icon_id() {
        assert_eq!(ExportError::EmptySelection.icon_id(), None);
    }
}
