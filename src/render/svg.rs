//! Box-and-arrow SVG diagrams.
//!
//! Layout works in abstract units (one unit is [`UNIT_PX`] pixels) with y
//! growing downward. Structures are stacked top to bottom in detection
//! order, followed by the info box.

use anyhow::Context;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{chart, RenderRequest, Renderer, DEFAULT_RENDER_ARRAY};
use crate::complexity::ComplexityEstimate;
use crate::infer::{DataStructureSet, SamplePayload, StructureKind};

const UNIT_PX: f64 = 40.0;
const MARGIN: f64 = 1.0;
const GAP: f64 = 0.8;
const TREE_WIDTH: f64 = 8.0;

struct Palette {
    stroke: &'static str,
    fill: &'static str,
}

fn palette(kind: StructureKind) -> Palette {
    let (stroke, fill) = match kind {
        StructureKind::Array => ("#2E86AB", "#A23B72"),
        StructureKind::LinkedList => ("#F18F01", "#C73E1D"),
        StructureKind::Stack => ("#FF6B35", "#F7931E"),
        StructureKind::Queue => ("#8E44AD", "#9B59B6"),
        StructureKind::BinaryTree => ("#3A86FF", "#06FFA5"),
        StructureKind::HashTable => ("#16537E", "#1F77B4"),
    };
    Palette { stroke, fill }
}

/// Renders diagrams as standalone SVG documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgRenderer;

impl SvgRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Build the growth-curve chart for `estimate`.
    pub fn complexity_chart(&self, estimate: &ComplexityEstimate) -> String {
        chart::complexity_chart(estimate)
    }

    /// Build the SVG document text.
    pub fn to_svg(&self, request: &RenderRequest<'_>) -> String {
        let fallback;
        let structures = if request.structures.is_empty() {
            let mut set = DataStructureSet::new();
            set.insert(
                StructureKind::Array,
                SamplePayload::Integers(DEFAULT_RENDER_ARRAY.to_vec()),
            );
            fallback = set;
            &fallback
        } else {
            request.structures
        };

        let mut canvas = Canvas::default();
        let title = format!(
            "{} - Data Structure Visualization",
            request.language.display_name().to_uppercase()
        );
        canvas.text(MARGIN, 0.9, &title, 18.0, Anchor::Start, true, "#222");

        let mut width: f64 = 0.0;
        let mut cursor = 1.6;
        for entry in structures.iter() {
            let values = entry.sample.labels();
            let (w, h) = match entry.kind {
                StructureKind::Array => draw_array(&mut canvas, MARGIN, cursor, &values),
                StructureKind::LinkedList => {
                    draw_linked_list(&mut canvas, MARGIN, cursor, &values)
                }
                StructureKind::Stack => draw_stack(&mut canvas, MARGIN, cursor, &values),
                StructureKind::Queue => draw_queue(&mut canvas, MARGIN, cursor, &values),
                StructureKind::BinaryTree => draw_tree(&mut canvas, MARGIN, cursor, &values),
                StructureKind::HashTable => {
                    draw_hash_table(&mut canvas, MARGIN, cursor, &values)
                }
            };
            debug!(kind = %entry.kind, width = w, height = h, "laid out structure");
            width = width.max(w);
            cursor += h + GAP;
        }

        let (w, h) = draw_info_box(&mut canvas, MARGIN, cursor, request.summary);
        width = width.max(w).max(title.len() as f64 * 0.3);
        cursor += h;

        canvas.finish(width + 2.0 * MARGIN, cursor + MARGIN)
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, request: &RenderRequest<'_>, path: &Path) -> anyhow::Result<PathBuf> {
        write_document(path, &self.to_svg(request))
    }

    fn render_complexity_chart(
        &self,
        estimate: &ComplexityEstimate,
        path: &Path,
    ) -> anyhow::Result<PathBuf> {
        write_document(path, &self.complexity_chart(estimate))
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

fn write_document(path: &Path, document: &str) -> anyhow::Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, document)
        .with_context(|| format!("failed to write diagram to {}", path.display()))?;
    Ok(path.to_path_buf())
}

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    Middle,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
        }
    }
}

#[derive(Default)]
struct Canvas {
    body: String,
}

fn px(units: f64) -> String {
    format!("{:.1}", units * UNIT_PX)
}

impl Canvas {
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, colors: &Palette) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="2" fill-opacity="0.8"/>"#,
            px(x),
            px(y),
            px(w),
            px(h),
            colors.fill,
            colors.stroke
        );
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, colors: &Palette) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="2" fill-opacity="0.8"/>"#,
            px(cx),
            px(cy),
            px(r),
            colors.fill,
            colors.stroke
        );
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, arrow: bool) {
        let marker = if arrow {
            r#" marker-end="url(#arrow)""#
        } else {
            ""
        };
        let _ = writeln!(
            self.body,
            r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#333" stroke-width="2"{}/>"##,
            px(x1),
            px(y1),
            px(x2),
            px(y2),
            marker
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn text(&mut self, x: f64, y: f64, s: &str, size: f64, anchor: Anchor, bold: bool, color: &str) {
        let weight = if bold { "bold" } else { "normal" };
        let _ = writeln!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="{}" dominant-baseline="middle" font-weight="{}" fill="{}">{}</text>"#,
            px(x),
            px(y),
            size,
            anchor.as_str(),
            weight,
            color,
            escape(s)
        );
    }

    fn finish(self, width: f64, height: f64) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = px(width),
            h = px(height)
        );
        out.push_str(
            "<defs><marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" \
             markerWidth=\"6\" markerHeight=\"6\" orient=\"auto\">\
             <path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"#333\"/></marker></defs>\n",
        );
        out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

pub(super) fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn title(canvas: &mut Canvas, cx: f64, y: f64, kind: StructureKind) {
    canvas.text(cx, y + 0.4, kind.title(), 14.0, Anchor::Middle, true, "#222");
}

fn draw_array(canvas: &mut Canvas, x: f64, y: f64, values: &[String]) -> (f64, f64) {
    const BOX_W: f64 = 1.5;
    const BOX_H: f64 = 0.8;
    let colors = palette(StructureKind::Array);
    let n = values.len() as f64;

    title(canvas, x + n * BOX_W / 2.0, y, StructureKind::Array);
    for (i, value) in values.iter().enumerate() {
        let bx = x + i as f64 * BOX_W;
        canvas.rect(bx, y + 0.8, BOX_W, BOX_H, &colors);
        canvas.text(bx + BOX_W / 2.0, y + 0.8 + BOX_H / 2.0, value, 12.0, Anchor::Middle, true, "white");
        canvas.text(bx + BOX_W / 2.0, y + 1.9, &format!("[{}]", i), 10.0, Anchor::Middle, false, "#666");
    }
    (n * BOX_W, 2.2)
}

fn draw_linked_list(canvas: &mut Canvas, x: f64, y: f64, values: &[String]) -> (f64, f64) {
    const RADIUS: f64 = 0.6;
    const SPACING: f64 = 3.0;
    let colors = palette(StructureKind::LinkedList);
    let cy = y + 1.6;
    let first = x + RADIUS;
    let last = first + values.len().saturating_sub(1) as f64 * SPACING;
    let null_x = last + 2.0;

    title(canvas, (first + last) / 2.0, y, StructureKind::LinkedList);
    for (i, value) in values.iter().enumerate() {
        let cx = first + i as f64 * SPACING;
        canvas.circle(cx, cy, RADIUS, &colors);
        canvas.text(cx, cy, value, 12.0, Anchor::Middle, true, "white");
        let next = if i + 1 < values.len() {
            cx + SPACING - RADIUS
        } else {
            null_x - 0.6
        };
        canvas.line(cx + RADIUS, cy, next, cy, true);
    }
    canvas.text(null_x, cy, "NULL", 10.0, Anchor::Middle, false, "#666");
    (null_x - x + 0.8, 2.4)
}

fn draw_stack(canvas: &mut Canvas, x: f64, y: f64, values: &[String]) -> (f64, f64) {
    const BOX_W: f64 = 2.0;
    const BOX_H: f64 = 0.8;
    let colors = palette(StructureKind::Stack);
    let n = values.len();
    let base = y + 0.8;

    title(canvas, x + BOX_W / 2.0, y, StructureKind::Stack);
    // Last pushed value is drawn on top.
    for (i, value) in values.iter().enumerate() {
        let by = base + (n - 1 - i) as f64 * BOX_H;
        canvas.rect(x, by, BOX_W, BOX_H, &colors);
        canvas.text(x + BOX_W / 2.0, by + BOX_H / 2.0, value, 12.0, Anchor::Middle, true, "#222");
    }
    canvas.text(x + BOX_W + 0.3, base + BOX_H / 2.0, "← TOP", 10.0, Anchor::Start, true, "red");
    (BOX_W + 1.5, 0.8 + n as f64 * BOX_H)
}

fn draw_queue(canvas: &mut Canvas, x: f64, y: f64, values: &[String]) -> (f64, f64) {
    const BOX_W: f64 = 1.5;
    const BOX_H: f64 = 1.0;
    let colors = palette(StructureKind::Queue);
    let n = values.len() as f64;
    let by = y + 1.3;

    title(canvas, x + n * BOX_W / 2.0, y, StructureKind::Queue);
    for (i, value) in values.iter().enumerate() {
        let bx = x + i as f64 * BOX_W;
        canvas.rect(bx, by, BOX_W, BOX_H, &colors);
        canvas.text(bx + BOX_W / 2.0, by + BOX_H / 2.0, value, 12.0, Anchor::Middle, true, "white");
    }
    canvas.text(x + BOX_W / 2.0, y + 1.0, "FRONT", 10.0, Anchor::Middle, true, "green");
    canvas.text(
        x + (n - 1.0) * BOX_W + BOX_W / 2.0,
        y + 1.0,
        "REAR",
        10.0,
        Anchor::Middle,
        true,
        "red",
    );
    (n * BOX_W, 2.3)
}

/// Zero-based level of level-order index `i`.
fn tree_level(i: usize) -> u32 {
    usize::BITS - (i + 1).leading_zeros() - 1
}

/// Center of level-order node `i` relative to the tree origin.
fn tree_position(i: usize) -> (f64, f64) {
    let level = tree_level(i);
    let first_in_level = (1usize << level) - 1;
    let level_width = TREE_WIDTH / f64::from(1u32 << level);
    let pos = (i - first_in_level) as f64;
    (pos * level_width + level_width / 2.0, f64::from(level) * 2.0)
}

fn draw_tree(canvas: &mut Canvas, x: f64, y: f64, values: &[String]) -> (f64, f64) {
    const RADIUS: f64 = 0.5;
    let colors = palette(StructureKind::BinaryTree);
    let n = values.len();
    let top = y + 1.4;

    title(canvas, x + TREE_WIDTH / 2.0, y, StructureKind::BinaryTree);
    for i in 0..n {
        let (nx, ny) = tree_position(i);
        for child in [2 * i + 1, 2 * i + 2] {
            if child < n {
                let (cx, cy) = tree_position(child);
                canvas.line(x + nx, top + ny + RADIUS, x + cx, top + cy - RADIUS, false);
            }
        }
    }
    for (i, value) in values.iter().enumerate() {
        let (nx, ny) = tree_position(i);
        canvas.circle(x + nx, top + ny, RADIUS, &colors);
        canvas.text(x + nx, top + ny, value, 10.0, Anchor::Middle, true, "#222");
    }

    let levels = if n == 0 { 0 } else { tree_level(n - 1) + 1 };
    (TREE_WIDTH, 1.0 + f64::from(levels) * 2.0)
}

fn draw_hash_table(canvas: &mut Canvas, x: f64, y: f64, values: &[String]) -> (f64, f64) {
    const BUCKET_W: f64 = 3.0;
    const BUCKET_H: f64 = 0.8;
    let colors = palette(StructureKind::HashTable);
    let bx = x + 0.8;

    title(canvas, bx + BUCKET_W / 2.0, y, StructureKind::HashTable);
    for (i, entry) in values.iter().enumerate() {
        let by = y + 0.8 + i as f64 * BUCKET_H;
        canvas.rect(bx, by, BUCKET_W, BUCKET_H, &colors);
        canvas.text(bx + BUCKET_W / 2.0, by + BUCKET_H / 2.0, entry, 11.0, Anchor::Middle, true, "white");
        canvas.text(x + 0.3, by + BUCKET_H / 2.0, &format!("[{}]", i), 10.0, Anchor::Middle, false, "#666");
    }
    (BUCKET_W + 0.8, 0.8 + values.len() as f64 * BUCKET_H)
}

fn draw_info_box(canvas: &mut Canvas, x: f64, y: f64, summary: &str) -> (f64, f64) {
    const LINE_H: f64 = 0.45;
    let lines: Vec<&str> = summary.lines().collect();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let w = longest as f64 * 0.22 + 0.8;
    let h = lines.len() as f64 * LINE_H + 0.6;

    let _ = writeln!(
        canvas.body,
        r##"<rect x="{}" y="{}" width="{}" height="{}" rx="8" fill="#2d2d2d" stroke="gray"/>"##,
        px(x),
        px(y),
        px(w),
        px(h)
    );
    for (i, line) in lines.iter().enumerate() {
        let _ = writeln!(
            canvas.body,
            r#"<text x="{}" y="{}" font-size="11" font-family="monospace" dominant-baseline="middle" fill="white">{}</text>"#,
            px(x + 0.4),
            px(y + 0.5 + i as f64 * LINE_H),
            escape(line)
        );
    }
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use tempfile::tempdir;

    fn svg_for(set: &DataStructureSet) -> String {
        SvgRenderer::new().to_svg(&RenderRequest {
            language: Language::Cpp,
            structures: set,
            summary: "CODE ANALYSIS SUMMARY\nTime Complexity: O(n²)",
        })
    }

    #[test]
    fn test_empty_set_draws_default_array() {
        let svg = svg_for(&DataStructureSet::new());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("C++ - Data Structure Visualization"));
        assert!(svg.contains(">Array</text>"));
        assert!(svg.contains(">[4]</text>"));
        assert!(!svg.contains(">[5]</text>"));
        assert!(svg.contains(">CODE ANALYSIS SUMMARY</text>"));
    }

    #[test]
    fn test_structures_are_stacked_in_order() {
        let mut set = DataStructureSet::new();
        set.insert(StructureKind::Queue, SamplePayload::Labels(vec!["A".into(), "B".into()]));
        set.insert(StructureKind::LinkedList, SamplePayload::Integers(vec![1, 2, 3]));
        set.insert(StructureKind::Stack, SamplePayload::Integers(vec![1, 2]));
        let svg = svg_for(&set);

        let queue = svg.find(">Queue</text>").unwrap();
        let list = svg.find(">Linked List</text>").unwrap();
        let stack = svg.find(">Stack</text>").unwrap();
        assert!(queue < list && list < stack);
        assert!(svg.contains(">FRONT</text>"));
        assert!(svg.contains(">REAR</text>"));
        assert!(svg.contains(">NULL</text>"));
        assert!(svg.contains("TOP</text>"));
        assert_eq!(svg.matches("marker-end").count(), 3);
    }

    #[test]
    fn test_tree_layout() {
        assert_eq!(tree_level(0), 0);
        assert_eq!(tree_level(2), 1);
        assert_eq!(tree_level(3), 2);
        assert_eq!(tree_position(0), (4.0, 0.0));
        assert_eq!(tree_position(1), (2.0, 2.0));
        assert_eq!(tree_position(2), (6.0, 2.0));
        assert_eq!(tree_position(6), (7.0, 4.0));

        let mut set = DataStructureSet::new();
        set.insert(StructureKind::BinaryTree, SamplePayload::LevelOrder(vec![1, 2, 3, 4, 5, 6, 7]));
        let svg = svg_for(&set);
        assert_eq!(svg.matches("<circle").count(), 7);
        assert_eq!(svg.matches("<line").count(), 6);
    }

    #[test]
    fn test_text_is_escaped() {
        let set = DataStructureSet::new();
        let svg = SvgRenderer::new().to_svg(&RenderRequest {
            language: Language::Java,
            structures: &set,
            summary: "a < b & c",
        });
        assert!(svg.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("diagram.svg");
        let set = DataStructureSet::new();
        let request = RenderRequest {
            language: Language::Rust,
            structures: &set,
            summary: "",
        };

        let written = SvgRenderer::new().render(&request, &path).unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("RUST - Data Structure Visualization"));
    }

    #[test]
    fn test_render_complexity_chart_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("charts").join("complexity.svg");
        let unit = crate::parse::parse("for (;;) { }", Language::C);
        let estimate = crate::complexity::estimate("for (;;) { }", &unit);

        let written = SvgRenderer::new()
            .render_complexity_chart(&estimate, &path)
            .unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Algorithm Complexity Analysis"));
        assert!(content.contains("Detected: O(n)"));
    }
}
