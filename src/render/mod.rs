//! Diagram rendering for inferred data structures and complexity.

mod chart;
mod svg;

pub use svg::SvgRenderer;

use std::path::{Path, PathBuf};

use crate::complexity::ComplexityEstimate;
use crate::infer::DataStructureSet;
use crate::language::Language;

/// Array drawn when nothing was inferred.
pub const DEFAULT_RENDER_ARRAY: [i64; 5] = [5, 2, 8, 1, 9];

/// Everything a renderer needs for one diagram.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub language: Language,
    pub structures: &'a DataStructureSet,
    /// Text for the info box, normally `ComplexityEstimate::summary`.
    pub summary: &'a str,
}

/// Turns a [`RenderRequest`] into an image file.
pub trait Renderer {
    /// Write the diagram to `path` and return the path written.
    fn render(&self, request: &RenderRequest<'_>, path: &Path) -> anyhow::Result<PathBuf>;

    /// Write a chart placing `estimate` among the common growth rates.
    fn render_complexity_chart(
        &self,
        estimate: &ComplexityEstimate,
        path: &Path,
    ) -> anyhow::Result<PathBuf>;

    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &'static str;
}
