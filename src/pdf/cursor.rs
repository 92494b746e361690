use crate::assets::EmbeddedImage;
use crate::fonts::FontFace;

use super::page::{Align, DocumentInfo, DrawOp, LayoutEvent, Page, RenderedDocument, Rgb, Stroke, TextRun};
use super::text::wrap_text;

/// Fixed page geometry. The bottom `reserved_footer` points of every page are
/// never used by content; the finalizer stamps footers there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub reserved_footer: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::A4
    }
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width: 595.0,
        height: 842.0,
        margin_left: 50.0,
        margin_right: 50.0,
        margin_top: 50.0,
        reserved_footer: 80.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn right_edge(&self) -> f32 {
        self.width - self.margin_right
    }

    /// Lowest y that content may reach.
    pub fn usable_bottom(&self) -> f32 {
        self.height - self.reserved_footer
    }
}

/// Current page and vertical position. `y` only moves down, except when a new
/// page resets it to the top margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageCursor {
    pub page: usize,
    pub y: f32,
}

/// Owns the growing page list for one generation and hands out drawing
/// primitives at absolute top-down coordinates on the current page.
pub struct LayoutEngine {
    pub geometry: PageGeometry,
    pub cursor: PageCursor,
    pages: Vec<Page>,
    images: Vec<EmbeddedImage>,
    events: Vec<LayoutEvent>,
}

impl LayoutEngine {
    pub fn new(geometry: PageGeometry) -> LayoutEngine {
        LayoutEngine {
            geometry,
            cursor: PageCursor {
                page: 0,
                y: geometry.margin_top,
            },
            pages: vec![Page::new(geometry.width, geometry.height)],
            images: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn y(&self) -> f32 {
        self.cursor.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.cursor.y = y;
    }

    pub fn page_index(&self) -> usize {
        self.cursor.page
    }

    /// True when a block of `height` starting at the cursor stays clear of the
    /// reserved footer band.
    pub fn fits(&self, height: f32) -> bool {
        self.cursor.y + height <= self.geometry.usable_bottom()
    }

    /// Append a blank page and move the cursor to its top margin.
    pub fn advance_page(&mut self) {
        self.pages
            .push(Page::new(self.geometry.width, self.geometry.height));
        self.cursor = PageCursor {
            page: self.pages.len() - 1,
            y: self.geometry.margin_top,
        };
        log::debug!("advance_page → page {}", self.cursor.page + 1);
    }

    pub fn record(&mut self, event: LayoutEvent) {
        self.events.push(event);
    }

    /// Register an image for embedding; returns the index draw ops refer to.
    pub fn add_image(&mut self, image: EmbeddedImage) -> usize {
        self.images.push(image);
        self.images.len() - 1
    }

    fn push(&mut self, op: DrawOp) {
        // The current page always exists: `new` creates page 0 and pages are never removed.
        if let Some(page) = self.pages.get_mut(self.cursor.page) {
            page.ops.push(op);
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill: Some(color),
            stroke: None,
        });
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Option<Rgb>, stroke: Stroke) {
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke: Some(stroke),
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, width: f32) {
        self.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: Stroke { color, width },
        });
    }

    pub fn image(&mut self, image: usize, x: f32, y: f32, width: f32, height: f32, clip_radius: Option<f32>) {
        self.push(DrawOp::Image {
            image,
            x,
            y,
            width,
            height,
            clip_radius,
        });
    }

    /// One unwrapped line. With `Center`/`Right` the text is positioned inside
    /// the box `[x, x + box_width]`.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        box_width: f32,
        font: FontFace,
        font_size: f32,
        color: Rgb,
        align: Align,
    ) {
        if text.is_empty() {
            return;
        }
        let w = font.text_width(text, font_size);
        let tx = match align {
            Align::Left => x,
            Align::Center => x + (box_width - w) / 2.0,
            Align::Right => x + box_width - w,
        };
        self.push(DrawOp::Text(TextRun {
            text: text.to_string(),
            x: tx,
            y,
            font,
            font_size,
            color,
        }));
    }

    /// Wrapped text inside `[x, x + width]`, first line top at `y`. Returns the
    /// height consumed.
    #[allow(clippy::too_many_arguments)]
    pub fn text_block(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        width: f32,
        font: FontFace,
        font_size: f32,
        color: Rgb,
        align: Align,
    ) -> f32 {
        let lh = font.line_height(font_size);
        let lines = wrap_text(text, font, font_size, width);
        for (i, line) in lines.iter().enumerate() {
            self.text(&line.text, x, y + i as f32 * lh, width, font, font_size, color, align);
        }
        lines.len() as f32 * lh
    }

    pub fn into_document(self, info: DocumentInfo) -> RenderedDocument {
        RenderedDocument {
            pages: self.pages,
            images: self.images,
            events: self.events,
            info,
        }
    }
}
