//! Translation of a Figma node tree into absolutely positioned HTML/CSS.
//!
//! Every visible node becomes a `div` whose box is expressed relative to its
//! parent's bounding box; the selected roots are placed relative to the
//! top-left corner of their union. A node with a rendered image is drawn as
//! that image and its subtree is not expanded, since the render already
//! contains it.

use std::fmt::Write as FmtWrite;

use crate::template::{escape_html, render_page, PageTemplate};

use super::api_types::{FigmaBoundingBox, FigmaNodeData, FigmaTypeStyle, ImageMap};

const LAYOUT_STYLESHEET: &str = r#"
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
            background: #e5e5e5;
            padding: 20px;
        }

        .figma-canvas {
            position: relative;
            margin: 0 auto;
        }

        .figma-node {
            position: absolute;
            overflow: hidden;
        }

        .figma-text {
            overflow: visible;
            white-space: pre-wrap;
            word-wrap: break-word;
        }

        .figma-render > img {
            display: block;
            width: 100%;
            height: 100%;
            object-fit: contain;
        }
"#;

const ZERO_BOX: FigmaBoundingBox = FigmaBoundingBox {
    x: 0.0,
    y: 0.0,
    width: 0.0,
    height: 0.0,
};

/// Ids of the nodes exported when the caller names none.
///
/// These are the frames on each page: children of `CANVAS` nodes directly
/// under the document root. Non-page children of the root are taken as-is.
pub fn top_level_ids(document: &FigmaNodeData) -> Vec<String> {
    let mut ids = Vec::new();
    for child in &document.children {
        if child.is_canvas() {
            ids.extend(child.children.iter().map(|frame| frame.id.clone()));
        } else {
            ids.push(child.id.clone());
        }
    }
    ids
}

/// Depth-first lookup of a node by id.
pub fn find_node<'a>(node: &'a FigmaNodeData, id: &str) -> Option<&'a FigmaNodeData> {
    if node.id == id {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_node(child, id))
}

/// The nodes for `ids`, in order. Ids missing from the tree are skipped.
///
/// A node already rendered as part of another selected node is dropped, as
/// are repeated ids, so every node appears at most once in the page.
pub fn select_nodes<'a>(document: &'a FigmaNodeData, ids: &[String]) -> Vec<&'a FigmaNodeData> {
    let found: Vec<&FigmaNodeData> = ids.iter().filter_map(|id| find_node(document, id)).collect();

    found
        .iter()
        .enumerate()
        .filter(|(i, node)| {
            let repeated = found[..*i].iter().any(|prior| prior.id == node.id);
            let nested = found
                .iter()
                .any(|other| other.id != node.id && find_node(other, &node.id).is_some());
            !repeated && !nested
        })
        .map(|(_, node)| *node)
        .collect()
}

/// The node's absolute box, or a zero-size box at the origin when absent.
pub fn bounding_box(node: &FigmaNodeData) -> FigmaBoundingBox {
    node.absolute_bounding_box.unwrap_or(ZERO_BOX)
}

/// Render `roots` as a standalone HTML document.
pub fn render_layout(title: &str, roots: &[&FigmaNodeData], images: &ImageMap) -> String {
    let visible: Vec<&FigmaNodeData> = roots.iter().copied().filter(|n| n.visible).collect();
    let extent = union_box(&visible);

    let mut body = String::new();
    writeln!(
        body,
        "    <main class=\"figma-canvas\" style=\"width: {}; height: {};\">",
        px(extent.width),
        px(extent.height)
    )
    .ok();
    for node in &visible {
        render_node(node, &extent, images, &mut body, 2);
    }
    body.push_str("    </main>\n");

    render_page(&PageTemplate {
        title,
        stylesheet: LAYOUT_STYLESHEET,
        body: &body,
    })
}

fn union_box(nodes: &[&FigmaNodeData]) -> FigmaBoundingBox {
    let mut boxes = nodes.iter().map(|n| bounding_box(n));
    let Some(first) = boxes.next() else {
        return ZERO_BOX;
    };

    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.x + first.width, first.y + first.height);
    for bb in boxes {
        min_x = min_x.min(bb.x);
        min_y = min_y.min(bb.y);
        max_x = max_x.max(bb.x + bb.width);
        max_y = max_y.max(bb.y + bb.height);
    }

    FigmaBoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

fn render_node(
    node: &FigmaNodeData,
    parent: &FigmaBoundingBox,
    images: &ImageMap,
    out: &mut String,
    depth: usize,
) {
    if !node.visible {
        return;
    }

    let indent = "    ".repeat(depth);
    let bb = bounding_box(node);
    let mut style = vec![
        format!("left: {}", px(bb.x - parent.x)),
        format!("top: {}", px(bb.y - parent.y)),
        format!("width: {}", px(bb.width)),
        format!("height: {}", px(bb.height)),
    ];
    if let Some(opacity) = node.opacity.filter(|o| *o < 1.0) {
        style.push(format!("opacity: {}", round2(opacity.max(0.0))));
    }

    let image = images
        .get(&node.id)
        .and_then(|url| url.as_deref())
        .filter(|url| !url.is_empty());

    if let Some(url) = image {
        writeln!(
            out,
            "{indent}<div {} style=\"{}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></div>",
            node_attributes(node, "figma-render"),
            style.join("; "),
            escape_html(url),
            escape_html(&node.name),
        )
        .ok();
        return;
    }

    if node.is_text() {
        style.extend(text_style(node));
        let text = node.characters.as_deref().unwrap_or_default();
        writeln!(
            out,
            "{indent}<div {} style=\"{}\">{}</div>",
            node_attributes(node, "figma-text"),
            style.join("; "),
            escape_html(text),
        )
        .ok();
        return;
    }

    style.extend(box_style(node));
    let attributes = node_attributes(node, "");
    if node.children.is_empty() {
        writeln!(out, "{indent}<div {attributes} style=\"{}\"></div>", style.join("; ")).ok();
        return;
    }

    writeln!(out, "{indent}<div {attributes} style=\"{}\">", style.join("; ")).ok();
    for child in &node.children {
        render_node(child, &bb, images, out, depth + 1);
    }
    writeln!(out, "{indent}</div>").ok();
}

fn node_attributes(node: &FigmaNodeData, extra_class: &str) -> String {
    let mut class = format!("figma-node figma-{}", type_class(&node.node_type));
    if !extra_class.is_empty() {
        class.push(' ');
        class.push_str(extra_class);
    }
    format!(
        "class=\"{}\" data-node-id=\"{}\" data-name=\"{}\"",
        class,
        escape_html(&node.id),
        escape_html(&node.name)
    )
}

fn type_class(node_type: &str) -> String {
    node_type
        .chars()
        .filter_map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' => Some(c.to_ascii_lowercase()),
            '_' | '-' => Some('-'),
            _ => None,
        })
        .collect()
}

/// Background, border and radius for non-text nodes.
fn box_style(node: &FigmaNodeData) -> Vec<String> {
    let mut style = Vec::new();
    if let Some(color) = node.fills.iter().find_map(|fill| fill.solid_css()) {
        style.push(format!("background-color: {color}"));
    }
    if let Some(color) = node.strokes.iter().find_map(|stroke| stroke.solid_css()) {
        let weight = node.stroke_weight.unwrap_or(1.0);
        if weight > 0.0 {
            style.push(format!("border: {} solid {color}", px(weight)));
        }
    }
    if let Some(radius) = node.corner_radius.filter(|r| *r > 0.0) {
        style.push(format!("border-radius: {}", px(radius)));
    }
    style
}

/// Typography for text nodes; the first solid fill is the text color.
fn text_style(node: &FigmaNodeData) -> Vec<String> {
    let mut style = Vec::new();
    if let Some(color) = node.fills.iter().find_map(|fill| fill.solid_css()) {
        style.push(format!("color: {color}"));
    }
    if let Some(type_style) = &node.style {
        style.extend(typography(type_style));
    }
    style
}

fn typography(style: &FigmaTypeStyle) -> Vec<String> {
    let mut css = Vec::new();
    if let Some(family) = style.font_family.as_deref().filter(|f| !f.is_empty()) {
        let family = family.replace(['\'', '"', ';', '<', '>'], "");
        css.push(format!("font-family: '{family}', sans-serif"));
    }
    if let Some(size) = style.font_size {
        css.push(format!("font-size: {}", px(size)));
    }
    if let Some(weight) = style.font_weight {
        css.push(format!("font-weight: {}", weight.round()));
    }
    if let Some(line_height) = style.line_height_px {
        css.push(format!("line-height: {}", px(line_height)));
    }
    if let Some(spacing) = style.letter_spacing.filter(|s| *s != 0.0) {
        css.push(format!("letter-spacing: {}", px(spacing)));
    }
    if style.italic == Some(true) {
        css.push("font-style: italic".to_string());
    }
    let align = match style.text_align_horizontal.as_deref() {
        Some("CENTER") => Some("center"),
        Some("RIGHT") => Some("right"),
        Some("JUSTIFIED") => Some("justify"),
        _ => None,
    };
    if let Some(align) = align {
        css.push(format!("text-align: {align}"));
    }
    css
}

fn round2(value: f32) -> f32 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn px(value: f32) -> String {
    format!("{}px", round2(value))
}
