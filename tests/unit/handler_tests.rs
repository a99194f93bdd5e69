// Form handling tests with stand-in renderers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use greetcard::compositor::{CardRenderer, CompositionError};
use greetcard::constants::{MSG_EMPTY_TEXT, MSG_GENERIC_FAILURE};
use greetcard::form::form_field;
use greetcard::handler::handle_submission;
use greetcard::page::render_page;

/// Returns fixed bytes and remembers what it was asked to draw
struct RecordingRenderer {
    png: Vec<u8>,
    seen: Mutex<Vec<String>>,
}

impl RecordingRenderer {
    fn new(png: &[u8]) -> Self {
        Self {
            png: png.to_vec(),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl CardRenderer for RecordingRenderer {
    fn render(&self, text: &str) -> Result<Vec<u8>, CompositionError> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(self.png.clone())
    }
}

/// Always fails with a missing font
struct BrokenFontRenderer {
    calls: AtomicUsize,
}

impl CardRenderer for BrokenFontRenderer {
    fn render(&self, _text: &str) -> Result<Vec<u8>, CompositionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CompositionError::missing_font(
            "/srv/fonts/DancingScript.ttf",
            "No such file or directory",
        ))
    }
}

#[test]
fn test_name_becomes_inline_png() {
    let renderer = RecordingRenderer::new(b"\x89PNG fake");
    let page = handle_submission(&renderer, Some("Anna"), None);

    assert_eq!(renderer.seen(), vec!["Anna".to_string()]);
    assert_eq!(page.user_text, "Anna");
    assert!(page.error.is_none());

    let uri = page.image_data_uri.unwrap();
    let encoded = uri.strip_prefix("data:image/png;base64,").unwrap();
    assert_eq!(STANDARD.decode(encoded).unwrap(), b"\x89PNG fake");
}

#[test]
fn test_empty_submissions_never_reach_renderer() {
    let renderer = RecordingRenderer::new(b"png");

    for raw in [None, Some(""), Some("    ")] {
        let page = handle_submission(&renderer, raw, None);
        assert_eq!(page.error.as_deref(), Some(MSG_EMPTY_TEXT));
        assert!(page.image_data_uri.is_none());
    }
    assert!(renderer.seen().is_empty());
}

#[test]
fn test_overlong_text_is_rejected() {
    let renderer = RecordingRenderer::new(b"png");
    let text = "x".repeat(11);

    let page = handle_submission(&renderer, Some(&text), Some(10));
    assert_eq!(
        page.error.as_deref(),
        Some("please keep it under 10 characters")
    );
    assert_eq!(page.user_text, text);
    assert!(renderer.seen().is_empty());
}

#[test]
fn test_length_limit_counts_characters_not_bytes() {
    let renderer = RecordingRenderer::new(b"png");
    let page = handle_submission(&renderer, Some("ÅÄÖåäö"), Some(6));
    assert!(page.error.is_none());
    assert_eq!(renderer.seen(), vec!["ÅÄÖåäö".to_string()]);
}

#[test]
fn test_surrounding_whitespace_is_not_drawn() {
    let renderer = RecordingRenderer::new(b"png");
    let page = handle_submission(&renderer, Some("  Anna  "), None);

    assert_eq!(renderer.seen(), vec!["Anna".to_string()]);
    assert_eq!(page.user_text, "  Anna  ");
}

#[test]
fn test_composition_failure_shows_generic_message() {
    let renderer = BrokenFontRenderer {
        calls: AtomicUsize::new(0),
    };
    let page = handle_submission(&renderer, Some("Anna"), None);

    assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(page.error.as_deref(), Some(MSG_GENERIC_FAILURE));
    assert_eq!(page.user_text, "Anna");

    let html = render_page(&page);
    assert!(!html.contains("DancingScript"));
    assert!(!html.contains("<img"));
}

#[test]
fn test_form_body_to_page() {
    let renderer = RecordingRenderer::new(b"png");
    let body = b"user_text=Happy+birthday%2C+%3Cb%3EBo%3C%2Fb%3E%21";

    let text = form_field(body, "user_text");
    let page = handle_submission(&renderer, text.as_deref(), None);
    assert_eq!(renderer.seen(), vec!["Happy birthday, <b>Bo</b>!".to_string()]);

    let html = render_page(&page);
    assert!(html.contains("Happy birthday, &lt;b&gt;Bo&lt;/b&gt;!"));
    assert!(!html.contains("<b>Bo</b>"));
    assert!(html.contains("data:image/png;base64,"));
}

#[test]
fn test_long_message_reaches_renderer_when_uncapped() {
    let renderer = RecordingRenderer::new(b"png");
    let message = "Congratulations on your graduation, ".repeat(8);

    let page = handle_submission(&renderer, Some(&message), None);
    assert!(page.error.is_none());
    assert_eq!(renderer.seen(), vec![message.trim().to_string()]);
}
