use crate::assets::EmbeddedImage;
use crate::fonts::FontFace;

/// RGB colour, one byte per channel.
pub type Rgb = [u8; 3];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

/// One line of text. `y` is the top of the line box in top-down page
/// coordinates; the writer converts to a baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: FontFace,
    pub font_size: f32,
    pub color: Rgb,
}

/// A single drawing operation. All coordinates are top-down (y grows towards
/// the bottom of the page), matching the layout cursor.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
    Text(TextRun),
    Image {
        /// Index into [`RenderedDocument::images`].
        image: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Corner radius of a rounded clip path, if any.
        clip_radius: Option<f32>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Page {
        Page {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.text.contains(needle))
    }
}

/// Structural record of what the layout placed where. Written alongside the
/// draw operations so pagination decisions can be inspected after the fact.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutEvent {
    TableHeader { page: usize, y: f32 },
    TableRow { serial: usize, page: usize, y: f32, height: f32 },
    Totals { page: usize, y: f32 },
    TermsCards { page: usize, y: f32, height: f32 },
    ShowcaseBanner { page: usize, y: f32 },
    CardRow { page: usize, y: f32, first_product: usize, continued: bool },
    Card { product: usize, page: usize, column: usize, y: f32, end_y: f32 },
}

#[derive(Clone, Debug, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

/// Every page of one generation, in order, plus the images they reference.
/// Pages are only ever appended; finalization revisits them in place.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    pub pages: Vec<Page>,
    pub images: Vec<EmbeddedImage>,
    pub events: Vec<LayoutEvent>,
    pub info: DocumentInfo,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Table rows in the order they were placed: `(serial, page)`.
    pub fn table_rows(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                LayoutEvent::TableRow { serial, page, .. } => Some((*serial, *page)),
                _ => None,
            })
            .collect()
    }
}
