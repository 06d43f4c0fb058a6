//! Standalone HTML pages that embed a design through Figma's hosted viewer.

use crate::clock::{format_timestamp, Clock};
use crate::design_ref::DesignReference;
use crate::template::{escape_html, render_page, PageTemplate};

pub const EMBED_URL_PREFIX: &str = "https://www.figma.com/embed?embed_host=share&url=";
pub const FILE_URL_PREFIX: &str = "https://www.figma.com/file/";

const EMBED_STYLESHEET: &str = r#"
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        html, body {
            height: 100%;
        }

        body {
            font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
            background: #f5f5f5;
            color: #333;
        }

        .figma-container {
            display: flex;
            flex-direction: column;
            width: 100%;
            min-height: 100vh;
        }

        .figma-embed {
            flex: 1;
            width: 100%;
            min-height: 70vh;
            border: none;
            background: #fff;
        }

        .figma-meta {
            padding: 12px 20px;
            font-size: 13px;
            line-height: 1.6;
            color: #666;
            background: #fff;
            border-top: 1px solid #e5e5e5;
            word-break: break-all;
        }

        .figma-meta strong {
            color: #333;
        }

        @media (max-width: 600px) {
            .figma-embed {
                min-height: 60vh;
            }

            .figma-meta {
                padding: 10px 12px;
                font-size: 12px;
            }
        }
"#;

/// The canonical file URL. The embed viewer only understands `/file/`.
pub fn file_url(file_key: &str) -> String {
    format!("{FILE_URL_PREFIX}{file_key}")
}

pub fn embed_url(design: &DesignReference) -> String {
    format!("{EMBED_URL_PREFIX}{}", file_url(&design.file_key))
}

/// Render a complete HTML document holding a live embed of `design`.
pub fn render_embed(design: &DesignReference, clock: &dyn Clock) -> String {
    let embed = embed_url(design);
    let generated_at = format_timestamp(clock.now());

    let mut body = String::new();
    body.push_str("    <div class=\"figma-container\">\n");
    body.push_str(&format!(
        "        <iframe class=\"figma-embed\" src=\"{}\" title=\"Figma design {}\" allowfullscreen></iframe>\n",
        escape_html(&embed),
        escape_html(&design.file_key),
    ));
    body.push_str("        <footer class=\"figma-meta\">\n");
    body.push_str(&format!(
        "            <p><strong>File Key:</strong> {}</p>\n",
        escape_html(&design.file_key)
    ));
    body.push_str(&format!(
        "            <p><strong>Original URL:</strong> {}</p>\n",
        escape_html(design.raw_url.trim())
    ));
    body.push_str(&format!(
        "            <p><strong>Generated:</strong> <time datetime=\"{generated_at}\">{generated_at}</time></p>\n"
    ));
    body.push_str("        </footer>\n");
    body.push_str("    </div>\n");

    render_page(&PageTemplate {
        title: "Figma Design",
        stylesheet: EMBED_STYLESHEET,
        body: &body,
    })
}
