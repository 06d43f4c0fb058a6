//! Page shell shared by the embed and export renderers.

/// Inputs for one standalone HTML document.
#[derive(Debug, Clone, Copy)]
pub struct PageTemplate<'a> {
    /// Plain text; escaped on render.
    pub title: &'a str,
    pub stylesheet: &'a str,
    /// Already-rendered markup placed inside `<body>`.
    pub body: &'a str,
}

pub fn render_page(page: &PageTemplate<'_>) -> String {
    let mut html = String::with_capacity(page.stylesheet.len() + page.body.len() + 512);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>{}</title>\n", escape_html(page.title)));
    html.push_str("    <style>\n");
    html.push_str(page.stylesheet.trim_end());
    html.push_str("\n    </style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    html.push_str(page.body.trim_end());
    html.push_str("\n</body>\n");
    html.push_str("</html>\n");
    html
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
