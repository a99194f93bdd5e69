// Server module - Pingora ProxyHttp implementation serving the card form
//
// Every request is answered from `request_filter`; nothing is ever proxied
// upstream. Composition is CPU bound and runs on the blocking thread pool.

use async_trait::async_trait;
use bytes::Bytes;
use pingora_core::upstreams::peer::HttpPeer;
use pingora_core::Result;
use pingora_http::ResponseHeader;
use pingora_proxy::{ProxyHttp, Session};
use std::sync::Arc;
use std::time::Instant;

use crate::compositor::{CardRenderer, Compositor};
use crate::config::{Config, ConfigError};
use crate::constants::MSG_GENERIC_FAILURE;
use crate::form::form_field;
use crate::handler::handle_submission;
use crate::page::{render_page, render_status_page, PageModel};
use crate::pipeline::RequestContext;

/// Name of the form field carrying the user's text
pub const TEXT_FIELD: &str = "user_text";

const HTML: &str = "text/html; charset=utf-8";
const JSON: &str = "application/json";

/// What a request maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /` (and `HEAD /`)
    ShowForm,
    /// `POST /`
    SubmitForm,
    /// `GET /health`
    Health,
    /// Known path, unsupported method
    MethodNotAllowed,
    NotFound,
}

/// Route a request by method and path
pub fn route(method: &str, path: &str) -> Route {
    match (method, path) {
        ("GET" | "HEAD", "/") => Route::ShowForm,
        ("POST", "/") => Route::SubmitForm,
        ("GET" | "HEAD", "/health") => Route::Health,
        (_, "/" | "/health") => Route::MethodNotAllowed,
        _ => Route::NotFound,
    }
}

/// The greeting card HTTP service
pub struct GreetcardService {
    renderer: Arc<dyn CardRenderer>,
    max_body_size: usize,
    max_text_chars: Option<usize>,
    /// Service start time (for uptime in /health)
    start_time: Instant,
}

impl GreetcardService {
    /// Create a service around any renderer
    pub fn new(
        renderer: Arc<dyn CardRenderer>,
        max_body_size: usize,
        max_text_chars: Option<usize>,
    ) -> Self {
        Self {
            renderer,
            max_body_size,
            max_text_chars,
            start_time: Instant::now(),
        }
    }

    /// Create the production service: a `Compositor` with the configured style
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        let style = Arc::new(config.style_config()?);
        Ok(Self::new(
            Arc::new(Compositor::new(style)),
            config.server.max_body_size,
            config.server.max_text_chars,
        ))
    }

    async fn submit_form(&self, session: &mut Session, ctx: &RequestContext) -> Result<()> {
        let body = match read_body(session, self.max_body_size).await? {
            Some(body) => body,
            None => {
                tracing::warn!(
                    request_id = %ctx.request_id(),
                    limit = self.max_body_size,
                    "Rejecting form submission: body too large"
                );
                let page = render_status_page(413, "The submitted form is too large.");
                return send_response(session, 413, HTML, page, &[]).await;
            }
        };

        let user_text = form_field(&body, TEXT_FIELD);
        tracing::info!(
            request_id = %ctx.request_id(),
            text_chars = user_text.as_deref().map(|t| t.chars().count()).unwrap_or(0),
            "Received card request"
        );

        let renderer = Arc::clone(&self.renderer);
        let max_text_chars = self.max_text_chars;
        let submitted = user_text.clone();
        let page = match tokio::task::spawn_blocking(move || {
            handle_submission(renderer.as_ref(), submitted.as_deref(), max_text_chars)
        })
        .await
        {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(
                    request_id = %ctx.request_id(),
                    error = %e,
                    panicked = e.is_panic(),
                    "Card composition task failed"
                );
                PageModel::with_error(user_text.unwrap_or_default(), MSG_GENERIC_FAILURE)
            }
        };

        send_response(session, 200, HTML, render_page(&page), &[]).await
    }

    fn health_body(&self) -> String {
        serde_json::json!({
            "status": "healthy",
            "uptime_seconds": self.start_time.elapsed().as_secs(),
            "version": env!("CARGO_PKG_VERSION")
        })
        .to_string()
    }
}

/// Read the whole request body, or `None` if it exceeds `limit` bytes
async fn read_body(session: &mut Session, limit: usize) -> Result<Option<Vec<u8>>> {
    let mut body = Vec::new();
    while let Some(chunk) = session.read_request_body().await? {
        if body.len() + chunk.len() > limit {
            return Ok(None);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(Some(body))
}

/// Write a complete response with a fixed body
async fn send_response(
    session: &mut Session,
    status: u16,
    content_type: &str,
    body: String,
    extra_headers: &[(&'static str, &'static str)],
) -> Result<()> {
    let mut header = ResponseHeader::build(status, None)?;
    header.insert_header("Content-Type", content_type)?;
    header.insert_header("Content-Length", body.len().to_string())?;
    header.insert_header("Cache-Control", "no-store")?;
    for (name, value) in extra_headers {
        header.insert_header(*name, *value)?;
    }

    let head_only = session.req_header().method == "HEAD";
    session
        .write_response_header(Box::new(header), head_only)
        .await?;
    if !head_only {
        session
            .write_response_body(Some(Bytes::from(body)), true)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl ProxyHttp for GreetcardService {
    type CTX = RequestContext;

    /// Create a new request context for each incoming request
    fn new_ctx(&self) -> Self::CTX {
        RequestContext::default()
    }

    /// Never reached: `request_filter` answers every request
    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> Result<Box<HttpPeer>> {
        Err(pingora_core::Error::explain(
            pingora_core::ErrorType::InternalError,
            "greetcard does not proxy requests upstream",
        ))
    }

    /// Route and answer the request; always short-circuits
    async fn request_filter(&self, session: &mut Session, ctx: &mut Self::CTX) -> Result<bool> {
        let req = session.req_header();
        let method = req.method.as_str().to_string();
        let path = req.uri.path().to_string();
        ctx.set_request(method, path);

        match route(ctx.method(), ctx.path()) {
            Route::ShowForm => {
                let page = render_page(&PageModel::default());
                send_response(session, 200, HTML, page, &[]).await?;
            }
            Route::SubmitForm => {
                self.submit_form(session, ctx).await?;
            }
            Route::Health => {
                send_response(session, 200, JSON, self.health_body(), &[]).await?;
            }
            Route::MethodNotAllowed => {
                let page = render_status_page(405, "Method not allowed.");
                let allow = if ctx.path() == "/" { "GET, HEAD, POST" } else { "GET, HEAD" };
                send_response(session, 405, HTML, page, &[("Allow", allow)]).await?;
            }
            Route::NotFound => {
                let page = render_status_page(404, "There is nothing here.");
                send_response(session, 404, HTML, page, &[]).await?;
            }
        }

        Ok(true) // Response already sent
    }

    /// Log request completion
    async fn logging(
        &self,
        session: &mut Session,
        e: Option<&pingora_core::Error>,
        ctx: &mut Self::CTX,
    ) {
        let status_code = session
            .response_written()
            .map(|resp| resp.status.as_u16())
            .unwrap_or(500);
        let duration_ms = ctx.elapsed().as_secs_f64() * 1000.0;

        if let Some(error) = e {
            tracing::warn!(
                request_id = %ctx.request_id(),
                method = %ctx.method(),
                path = %ctx.path(),
                status = status_code,
                duration_ms = duration_ms,
                error = %error,
                "Request failed"
            );
        } else {
            tracing::info!(
                request_id = %ctx.request_id(),
                method = %ctx.method(),
                path = %ctx.path(),
                status = status_code,
                duration_ms = duration_ms,
                "Request completed"
            );
        }
    }
}
