//! Form submission handling, independent of the HTTP stack.
//!
//! Validates the submitted text, runs the renderer, and turns the outcome
//! into a [`PageModel`]. Failures are logged here with their full cause; the
//! page only ever receives a user-safe message.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::compositor::{CardRenderer, CompositionError};
use crate::constants::MSG_EMPTY_TEXT;
use crate::error::ServiceError;
use crate::page::PageModel;

/// Check submitted text and return it trimmed.
///
/// Missing, empty and whitespace-only text are all treated as empty. Length
/// is only checked when a `max_chars` cap is configured.
pub fn validate_text(raw: Option<&str>, max_chars: Option<usize>) -> Result<&str, ServiceError> {
    let text = raw.map(str::trim).unwrap_or_default();

    if text.is_empty() {
        return Err(ServiceError::InvalidInput(MSG_EMPTY_TEXT.to_string()));
    }

    if let Some(limit) = max_chars {
        if text.chars().count() > limit {
            return Err(ServiceError::InvalidInput(format!(
                "please keep it under {} characters",
                limit
            )));
        }
    }

    Ok(text)
}

/// `data:` URI for inline display of PNG bytes.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

fn log_failure(err: &ServiceError) {
    match err {
        ServiceError::InvalidInput(msg) => {
            tracing::info!(reason = %msg, "Rejected card request");
        }
        ServiceError::Composition(CompositionError::MissingFont { path, reason }) => {
            tracing::error!(
                error_kind = "missing_font",
                font_path = %path.display(),
                error = %reason,
                "Font file could not be loaded"
            );
        }
        ServiceError::Composition(CompositionError::MissingBaseImage { path, reason }) => {
            tracing::error!(
                error_kind = "missing_base_image",
                image_path = %path.display(),
                error = %reason,
                "Base image could not be loaded"
            );
        }
        ServiceError::Composition(e @ CompositionError::Rendering { source, .. }) => {
            match source {
                Some(cause) => tracing::error!(
                    error_kind = e.kind(),
                    error = %e,
                    cause = %cause,
                    "Card rendering failed"
                ),
                None => tracing::error!(error_kind = e.kind(), error = %e, "Card rendering failed"),
            }
        }
    }
}

/// Run a submission through validation and rendering.
pub fn render_card(
    renderer: &dyn CardRenderer,
    raw: Option<&str>,
    max_chars: Option<usize>,
) -> Result<String, ServiceError> {
    let text = validate_text(raw, max_chars)?;
    tracing::debug!(text = %text, chars = text.chars().count(), "Composing card");

    let png = renderer.render(text)?;
    Ok(png_data_uri(&png))
}

/// Handle a `POST /` form submission and build the response page.
///
/// The submitted text is echoed back into the input field in every case.
pub fn handle_submission(
    renderer: &dyn CardRenderer,
    raw: Option<&str>,
    max_chars: Option<usize>,
) -> PageModel {
    let echoed = raw.unwrap_or_default();

    match render_card(renderer, raw, max_chars) {
        Ok(uri) => {
            tracing::info!(png_data_uri_len = uri.len(), "Card created");
            PageModel::with_image(echoed, uri)
        }
        Err(err) => {
            log_failure(&err);
            PageModel::with_error(echoed, err.user_message())
        }
    }
}
