//! Markdown conversion of flagged display blocks.
//!
//! Parsing markdown is delegated to a [`MarkdownRenderer`]; this module only
//! guarantees that each flagged block is converted exactly once, at load.

/// External collaborator that turns markdown into HTML.
///
/// The output is trusted as-is; sanitisation is the renderer's concern.
pub trait MarkdownRenderer: Send + Sync {
    /// Renders `raw` markdown to HTML.
    fn render(&self, raw: &str) -> String;
}

/// A display block whose raw text is flagged for markdown conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownBlock {
    raw: String,
    html: Option<String>,
}

impl MarkdownBlock {
    /// Creates an unrendered block.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            html: None,
        }
    }

    /// Returns the raw markdown.
    #[must_use]
    pub const fn raw(&self) -> &str {
        self.raw.as_str()
    }

    /// Returns the rendered HTML, once converted.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Returns what the block currently displays.
    #[must_use]
    pub fn display(&self) -> &str {
        self.html.as_deref().unwrap_or(&self.raw)
    }

    /// Converts the block unless it was already converted.
    ///
    /// Returns `true` when the renderer was invoked.
    pub fn render_once(&mut self, renderer: &dyn MarkdownRenderer) -> bool {
        if self.html.is_some() {
            return false;
        }
        self.html = Some(renderer.render(&self.raw));
        true
    }
}

/// Converts every pending block and returns how many were rendered.
pub fn render_all(blocks: &mut [MarkdownBlock], renderer: &dyn MarkdownRenderer) -> usize {
    blocks
        .iter_mut()
        .map(|block| block.render_once(renderer))
        .filter(|rendered| *rendered)
        .count()
}
