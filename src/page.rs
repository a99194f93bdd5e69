//! HTML rendering of the card form page.

use std::fmt::Write as _;

/// Everything the form page can show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageModel {
    /// Text to pre-fill into the input field (the last submission).
    pub user_text: String,
    /// Message shown above the form.
    pub error: Option<String>,
    /// `data:image/png;base64,...` URI of the composed card.
    pub image_data_uri: Option<String>,
}

impl PageModel {
    pub fn with_error(user_text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            error: Some(error.into()),
            image_data_uri: None,
        }
    }

    pub fn with_image(user_text: impl Into<String>, image_data_uri: String) -> Self {
        Self {
            user_text: user_text.into(),
            error: None,
            image_data_uri: Some(image_data_uri),
        }
    }
}

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Greeting card</title>
<style>
body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
form { display: flex; gap: .5rem; margin-bottom: 1rem; }
input[type=text] { flex: 1; padding: .5rem; font-size: 1rem; }
.error { color: #b00020; }
.card img { max-width: 100%; height: auto; box-shadow: 0 2px 8px rgba(0,0,0,.2); }
</style>
</head>
<body>
<h1>Make your greeting card</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Render the full form page.
pub fn render_page(model: &PageModel) -> String {
    let mut html = String::from(PAGE_HEAD);

    if let Some(error) = &model.error {
        let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(error));
    }

    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"/\">\n\
         <input type=\"text\" name=\"user_text\" placeholder=\"Name or message\" value=\"{}\" autofocus>\n\
         <button type=\"submit\">Create card</button>\n\
         </form>",
        escape_html(&model.user_text)
    );

    if let Some(uri) = &model.image_data_uri {
        let _ = writeln!(
            html,
            "<div class=\"card\">\n\
             <img src=\"{uri}\" alt=\"Greeting card for {alt}\">\n\
             <p><a href=\"{uri}\" download=\"greeting-card.png\">Download</a></p>\n\
             </div>",
            uri = uri,
            alt = escape_html(&model.user_text)
        );
    }

    html.push_str(PAGE_TAIL);
    html
}

/// Minimal page for errors outside the form flow (404, 405, 413).
pub fn render_status_page(status: u16, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{status}</title></head>\n\
         <body><h1>{status}</h1><p>{}</p><p><a href=\"/\">Back to the form</a></p></body>\n</html>\n",
        escape_html(message),
        status = status
    )
}
