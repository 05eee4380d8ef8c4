//! Style normalization for third-party SVG markup.
//!
//! Icons from different collections paint themselves in different ways:
//! outline sets rely on strokes, solid sets on fills, and some mix both. The
//! normalizer rewrites paint attributes so every icon renders in a single
//! foreground color following its collection's [`DrawingConvention`].
//!
//! The document is parsed with `roxmltree` and rewritten by byte range, so
//! everything an edit does not touch (comments, path data, attribute order,
//! quoting) is carried over verbatim.
//!
//! Markup that cannot be parsed, or that has no `svg` element, is returned
//! unchanged. Callers still have to handle the rasterizer rejecting it.

use std::ops::Range;

use roxmltree::{Document, Node, ParsingOptions};

use crate::library::DrawingConvention;
use crate::style::StyleConfig;

/// Rewrites `svg` so that it renders in the style's foreground color at
/// `pixel_size` × `pixel_size`.
///
/// `convention` is the drawing convention of the icon's collection, or
/// `None` when unknown (treated like [`DrawingConvention::Mixed`]).
pub fn normalize_svg(
    svg: &str,
    style: &StyleConfig,
    pixel_size: f32,
    convention: Option<DrawingConvention>,
) -> String {
    match try_normalize(svg, style, pixel_size, convention) {
        Ok(normalized) => normalized,
        Err(reason) => {
            log::debug!("leaving SVG unmodified: {reason}");
            svg.to_string()
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum MarkupError {
    #[error("malformed markup: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("no <svg> element")]
    NoSvgElement,
}

fn try_normalize(
    svg: &str,
    style: &StyleConfig,
    pixel_size: f32,
    convention: Option<DrawingConvention>,
) -> Result<String, MarkupError> {
    let doc = parse_document(svg)?;
    let root = doc
        .descendants()
        .find(|node| node.is_element() && node.has_tag_name("svg"))
        .ok_or(MarkupError::NoSvgElement)?;

    let elements: Vec<Node> = root.descendants().filter(Node::is_element).collect();
    let uses_stroke = elements.iter().any(|node| Paint::read(node).has_stroke());

    let rules = Rules {
        foreground: &style.foreground_color,
        stroke_width: format_number(style.stroke_width),
        convention,
        uses_stroke,
    };
    let size = format_number(pixel_size);

    let mut edits = Vec::new();
    for node in &elements {
        let original = Paint::read(node);
        let mut paint = original.clone();
        if *node == root {
            paint.width = Some(size.clone());
            paint.height = Some(size.clone());
            paint.fill = Some(rules.foreground.to_string());
            paint.color = Some(rules.foreground.to_string());
        }
        rules.apply(&mut paint);
        diff_attributes(svg, node, &original, &paint, &mut edits);
    }

    Ok(apply_edits(svg, edits))
}

/// Parses with DTDs allowed, matching what usvg accepts.
fn parse_document(svg: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(svg, options)
}

// ============================================================================
// Paint rules
// ============================================================================

/// Paint-related presentation attributes of one element.
#[derive(Debug, Clone, Default, PartialEq)]
struct Paint {
    width: Option<String>,
    height: Option<String>,
    fill: Option<String>,
    color: Option<String>,
    stroke: Option<String>,
    stroke_width: Option<String>,
}

impl Paint {
    const ATTRIBUTES: [&'static str; 6] =
        ["width", "height", "fill", "color", "stroke", "stroke-width"];

    fn read(node: &Node) -> Self {
        let get = |name| attribute(node, name).map(|attr| attr.value().to_string());
        Self {
            width: get("width"),
            height: get("height"),
            fill: get("fill"),
            color: get("color"),
            stroke: get("stroke"),
            stroke_width: get("stroke-width"),
        }
    }

    fn get(&self, name: &str) -> Option<&str> {
        match name {
            "width" => self.width.as_deref(),
            "height" => self.height.as_deref(),
            "fill" => self.fill.as_deref(),
            "color" => self.color.as_deref(),
            "stroke" => self.stroke.as_deref(),
            "stroke-width" => self.stroke_width.as_deref(),
            _ => None,
        }
    }

    fn has_stroke(&self) -> bool {
        self.stroke.is_some() || self.stroke_width.is_some()
    }

    /// A fill that is present, not `none`, and not a paint server reference.
    fn has_solid_fill(&self) -> bool {
        self.fill
            .as_deref()
            .is_some_and(|fill| fill != "none" && !fill.starts_with("url("))
    }

    fn strip_stroke(&mut self) {
        self.stroke = None;
        self.stroke_width = None;
    }
}

struct Rules<'a> {
    foreground: &'a str,
    stroke_width: String,
    convention: Option<DrawingConvention>,
    /// Whether any element of the document carries a stroke.
    uses_stroke: bool,
}

impl Rules<'_> {
    fn apply(&self, paint: &mut Paint) {
        match self.convention {
            Some(DrawingConvention::Stroke) => {
                if paint.has_stroke() {
                    self.paint_stroke(paint);
                    if paint.has_solid_fill() {
                        paint.fill = Some("none".to_string());
                    }
                }
            }
            Some(DrawingConvention::Fill) => {
                self.paint_fill(paint);
                paint.strip_stroke();
            }
            Some(DrawingConvention::Mixed) | None => {
                self.paint_fill(paint);
                if !self.uses_stroke {
                    paint.strip_stroke();
                } else if paint.has_stroke() {
                    self.paint_stroke(paint);
                }
            }
        }
    }

    fn paint_fill(&self, paint: &mut Paint) {
        if paint.has_solid_fill() {
            paint.fill = Some(self.foreground.to_string());
        }
    }

    fn paint_stroke(&self, paint: &mut Paint) {
        paint.stroke = Some(self.foreground.to_string());
        paint.stroke_width = Some(self.stroke_width.clone());
    }
}

// ============================================================================
// Byte-range editing
// ============================================================================

struct Edit {
    range: Range<usize>,
    text: String,
}

fn attribute<'a, 'input>(
    node: &Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Attribute<'a, 'input>> {
    node.attributes()
        .find(|attr| attr.namespace().is_none() && attr.name() == name)
}

/// Records the edits turning `before` into `after` on `node`.
fn diff_attributes(src: &str, node: &Node, before: &Paint, after: &Paint, edits: &mut Vec<Edit>) {
    let mut inserted = String::new();

    for name in Paint::ATTRIBUTES {
        match (before.get(name), after.get(name)) {
            (Some(old), Some(new)) if old != new => {
                if let Some(attr) = attribute(node, name) {
                    edits.push(Edit {
                        range: attr.range_value(),
                        text: escape_attribute(new),
                    });
                }
            }
            (None, Some(new)) => {
                inserted.push_str(&format!(" {name}=\"{}\"", escape_attribute(new)));
            }
            (Some(_), None) => {
                if let Some(attr) = attribute(node, name) {
                    edits.push(Edit {
                        range: attribute_span(src, attr.range_qname().start, attr.range_value().end),
                        text: String::new(),
                    });
                }
            }
            _ => {}
        }
    }

    if !inserted.is_empty() {
        let at = tag_name_end(src, node.range().start);
        edits.push(Edit {
            range: at..at,
            text: inserted,
        });
    }
}

/// Span of a whole attribute including its closing quote and the
/// whitespace that separates it from the previous token.
fn attribute_span(src: &str, name_start: usize, value_end: usize) -> Range<usize> {
    let start = src[..name_start].trim_end().len();
    start..value_end + 1
}

/// Byte offset just past the element name of the start tag at `tag_start`.
fn tag_name_end(src: &str, tag_start: usize) -> usize {
    let name_start = tag_start + 1;
    src[name_start..]
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .map_or(src.len(), |offset| name_start + offset)
}

fn apply_edits(src: &str, mut edits: Vec<Edit>) -> String {
    // Back to front so earlier offsets stay valid. A removal starting where an
    // insertion lands must run first or it would swallow the inserted text.
    edits.sort_by(|a, b| {
        b.range
            .start
            .cmp(&a.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });

    let mut out = src.to_string();
    for edit in edits {
        out.replace_range(edit.range, &edit.text);
    }
    out
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

/// Formats a length without trailing zeros (`2`, `86.4`).
fn format_number(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

// ============================================================================
// Tests
// ============================================================================
