//! Composition error types.
//!
//! Every failure of the compositing pipeline is one of three kinds. Callers
//! match on the variant to decide what to log; none of them is meant to be
//! shown to an end user verbatim.

use std::path::PathBuf;

/// Boxed underlying cause of a rendering failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while composing a card.
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    /// The background image is absent, unreadable or not a decodable image.
    #[error("base image unavailable at '{}': {reason}", path.display())]
    MissingBaseImage { path: PathBuf, reason: String },

    /// The font file is absent, unreadable or not a valid TrueType/OpenType font.
    #[error("font unavailable at '{}': {reason}", path.display())]
    MissingFont { path: PathBuf, reason: String },

    /// Any other failure during measuring, layering, rotation, blending or encoding.
    #[error("rendering failed: {message}")]
    Rendering {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl CompositionError {
    pub fn missing_base_image(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::MissingBaseImage {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn missing_font(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::MissingFont {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn rendering(reason: impl ToString) -> Self {
        Self::Rendering {
            message: reason.to_string(),
            source: None,
        }
    }

    /// A rendering failure caused by a lower-level error, kept as the source.
    pub fn rendering_caused_by(
        reason: impl ToString,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Rendering {
            message: reason.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Short machine-friendly label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingBaseImage { .. } => "missing_base_image",
            Self::MissingFont { .. } => "missing_font",
            Self::Rendering { .. } => "rendering_error",
        }
    }
}
