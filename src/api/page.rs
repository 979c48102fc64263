//! HTML Page
//!
//! Server-rendered form for shortening a URL without the JSON API.

/// What the form page shows after a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    pub status: String,
    pub original_url: Option<String>,
    pub short_url: Option<String>,
    /// Human readable time left, e.g. `6d 23h 59m 59s`
    pub expires_in: Option<String>,
}

impl PageResult {
    pub fn message(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }
}

/// Renders the form page, with the outcome of the last submission if any.
pub fn render(result: Option<&PageResult>) -> String {
    let mut body = String::from(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>URL Shortener</title>
</head>
<body>
<h1>URL Shortener</h1>
<form method="post" action="/">
<input type="text" name="url" placeholder="https://example.com" required>
<button type="submit">Shorten</button>
</form>
"#,
    );

    if let Some(result) = result {
        body.push_str("<section class=\"result\">\n");
        body.push_str(&format!("<p class=\"status\">{}</p>\n", escape_html(&result.status)));
        if let Some(original) = &result.original_url {
            body.push_str(&format!("<p>Original: {}</p>\n", escape_html(original)));
        }
        if let Some(short) = &result.short_url {
            let short = escape_html(short);
            body.push_str(&format!("<p>Short link: <a href=\"{0}\">{0}</a></p>\n", short));
        }
        if let Some(expires_in) = &result.expires_in {
            body.push_str(&format!("<p>Expires in: {}</p>\n", escape_html(expires_in)));
        }
        body.push_str("</section>\n");
    }

    body.push_str("</body>\n</html>\n");
    body
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
