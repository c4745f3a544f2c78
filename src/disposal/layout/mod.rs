//! Page model for the disposal certificate.
//!
//! Layout happens in PDF points on an A4 sheet with the origin at the top-left
//! corner and `y` growing downwards; the PDF writer flips the axis. Text
//! widths are estimated from average Helvetica glyph widths, which is enough
//! for wrapping and truncation at the sizes used here.

mod composer;
mod footer;

pub use composer::{compose, reason_box_height, LayoutInput, HISTORY_ROW_LIMIT, REASON_MIN_HEIGHT};
pub use footer::stamp_footers;

use super::raster::RasterImage;

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 40.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Top of the footer band; page content must end above it.
pub const FOOTER_TOP: f32 = PAGE_HEIGHT - 58.0;

const AVG_GLYPH_EM: f32 = 0.5;
const AVG_BOLD_GLYPH_EM: f32 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BRAND: Rgb = Rgb(127, 29, 29);
    pub const MUTED: Rgb = Rgb(100, 100, 100);
    pub const RULE: Rgb = Rgb(190, 190, 190);
    pub const SHADE: Rgb = Rgb(243, 243, 243);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Rgb,
    pub align: Align,
}

impl TextStyle {
    pub const fn regular(size: f32) -> Self {
        Self {
            size,
            bold: false,
            color: Rgb::BLACK,
            align: Align::Left,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            size,
            bold: true,
            color: Rgb::BLACK,
            align: Align::Left,
        }
    }

    pub const fn colored(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub const fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `x` is the anchor for the alignment, `y` the baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
    /// `image` indexes [`Document::images`].
    Image {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        image: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Header,
    AssetInfo,
    Reason,
    RequestApproval,
    TicketHistory,
    ChangeHistory,
    Signatures,
    Verification,
    AssetQr,
    DocumentQr,
    Footer,
}

/// Vertical extent of one section on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub top: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn has_block(&self, kind: BlockKind) -> bool {
        self.blocks.iter().any(|b| b.kind == kind)
    }

    pub fn block(&self, kind: BlockKind) -> Option<&Block> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    /// All text drawn on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn image_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Image { .. }))
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
    pub images: Vec<RasterImage>,
}

impl Document {
    pub fn has_block(&self, kind: BlockKind) -> bool {
        self.pages.iter().any(|p| p.has_block(kind))
    }
}

/// Estimated rendered width of `text` in points.
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let em = if bold { AVG_BOLD_GLYPH_EM } else { AVG_GLYPH_EM };
    text.chars().count() as f32 * size * em
}

/// Greedy word wrap. Words longer than the line are split by character.
/// Always returns at least one line.
pub fn wrap_text(text: &str, max_width: f32, size: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if text_width(&candidate, size, bold) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            for ch in word.chars() {
                current.push(ch);
                if text_width(&current, size, bold) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Truncate `text` with an ellipsis so it fits in `max_width`.
pub fn fit_text(text: &str, max_width: f32, size: f32, bold: bool) -> String {
    if text_width(text, size, bold) <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if text_width(&out, size, bold) + text_width("…", size, bold) > max_width {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text_is_single_line() {
        let lines = wrap_text("hola mundo", 200.0, 10.0, false);
        assert_eq!(lines, vec!["hola mundo"]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "uno dos tres cuatro cinco seis siete ocho nueve diez";
        let lines = wrap_text(text, 60.0, 10.0, false);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, false) <= 60.0, "{line} too wide");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap_text(&"A".repeat(40), 50.0, 10.0, false);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.chars().count() == 10));
    }

    #[test]
    fn test_wrap_keeps_explicit_line_breaks() {
        let lines = wrap_text("primera\nsegunda", 500.0, 10.0, false);
        assert_eq!(lines, vec!["primera", "segunda"]);
    }

    #[test]
    fn test_wrap_empty_text_yields_one_line() {
        assert_eq!(wrap_text("", 100.0, 10.0, false), vec![String::new()]);
    }

    #[test]
    fn test_fit_text_truncates_with_ellipsis() {
        assert_eq!(fit_text("corto", 100.0, 10.0, false), "corto");
        let fitted = fit_text(&"x".repeat(100), 50.0, 10.0, false);
        assert!(fitted.ends_with('…'));
        assert!(text_width(&fitted, 10.0, false) <= 50.0);
    }
}
