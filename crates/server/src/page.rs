//! HTML rendering for the lookup page.
//!
//! The page is a single static document with three variants: the bare form, the form with
//! a found-file panel, and the form with a not-found panel.

/// What the lookup page should show under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView<'a> {
    Form,
    Found { hash: &'a str, file_name: &'a str },
    NotFound { hash: &'a str },
}

pub const NOT_FOUND_MESSAGE: &str = "No file matches this hash.";

const STYLE: &str = r#"
    body { font-family: sans-serif; background: #f4f7f8; color: #333; }
    .container { width: 90%; max-width: 600px; margin: 40px auto;
                 background: #fff; padding: 30px; border-radius: 8px;
                 box-shadow: 0 2px 8px rgba(0,0,0,0.1); }
    h1 { margin-top: 0; }
    form { margin-bottom: 20px; }
    input[type=text] { width: 100%; padding: 8px; font-size: 14px;
                       border: 1px solid #ccc; border-radius: 4px; }
    input[type=submit] { margin-top: 8px; padding: 8px 16px; font-size: 14px;
                         background: #28a745; color: #fff; border: none;
                         border-radius: 4px; cursor: pointer; }
    input[type=submit]:hover { background: #218838; }
    .result { padding: 12px; background: #e9ecef; border-radius: 4px; }
    .error { color: #c00; }
    a { color: #007bff; text-decoration: none; }
    a:hover { text-decoration: underline; }
"#;

pub fn render(view: &PageView<'_>) -> String {
    let value = match view {
        PageView::Form => "",
        PageView::Found { hash, .. } | PageView::NotFound { hash } => *hash,
    };

    let panel = match view {
        PageView::Form => String::new(),
        PageView::Found { hash, file_name } => format!(
            "    <div class=\"result\">\n      Found file: <strong>{}</strong><br>\n      <a href=\"/download?hash={}\">Download</a>\n    </div>\n",
            escape_html(file_name),
            escape_html(&urlencoding::encode(hash)),
        ),
        PageView::NotFound { .. } => format!(
            "    <div class=\"result error\">\n      {NOT_FOUND_MESSAGE}\n    </div>\n"
        ),
    };

    document(
        "File SHA-256 Lookup",
        &format!(
            r#"    <h1>File SHA-256 Lookup</h1>
    <form method="get" action="/">
      <label for="hash">SHA-256 hash:</label>
      <input type="text" id="hash" name="hash"
             placeholder="e.g. e3b0c44298fc1c149af..." required
             value="{}">
      <input type="submit" value="Look up">
    </form>
{panel}"#,
            escape_html(value)
        ),
    )
}

/// Minimal error document used for non-200 responses.
pub fn render_error(title: &str, message: &str) -> String {
    document(
        title,
        &format!(
            "    <h1>{}</h1>\n    <div class=\"result error\">{}</div>\n    <p><a href=\"/\">Back to lookup</a></p>\n",
            escape_html(title),
            escape_html(message)
        ),
    )
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{}</title>
  <style>{STYLE}  </style>
</head>
<body>
  <div class="container">
{body}  </div>
</body>
</html>
"#,
        escape_html(title)
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
