use crate::assets::ProductVisual;
use crate::fonts::FontFace;
use crate::model::AdvertisedProduct;

use super::cursor::LayoutEngine;
use super::page::{Align, LayoutEvent, Stroke};
use super::text::{ellipsize, wrap_clamped};
use super::{ACCENT, BORDER, LIGHT, MUTED, PRIMARY, SECTION_GAP, TEXT, WHITE};

const COLUMNS: usize = 3;
const BANNER_HEIGHT: f32 = 30.0;
const CARD_HEIGHT: f32 = 150.0;
const COLUMN_GAP: f32 = 10.0;
const ROW_GAP: f32 = 12.0;
const ACCENT_BAR: f32 = 4.0;
const CONTINUED_HEIGHT: f32 = 16.0;
const END_MARGIN: f32 = 10.0;

const IMAGE_SIZE: f32 = 56.0;
const IMAGE_INSET: f32 = 8.0;
const IMAGE_TOP: f32 = 14.0;
const CARD_PAD: f32 = 8.0;

const NAME_SIZE: f32 = 8.5;
const DESC_SIZE: f32 = 7.0;
const SPEC_SIZE: f32 = 6.5;
const MAX_SPECS: usize = 3;

fn card_width(content_width: f32) -> f32 {
    (content_width - (COLUMNS as f32 - 1.0) * COLUMN_GAP) / COLUMNS as f32
}

/// "We Also Provide" banner and the product card grid. `visuals[i]` is the
/// prefetched image state for `products[i]`. Skipped entirely without products.
pub fn render_showcase(
    engine: &mut LayoutEngine,
    products: &[AdvertisedProduct],
    visuals: &[ProductVisual],
) -> f32 {
    if products.is_empty() {
        return engine.y();
    }

    let g = engine.geometry;
    if !engine.fits(BANNER_HEIGHT + SECTION_GAP + CARD_HEIGHT) {
        engine.advance_page();
    }

    let banner_y = engine.y();
    engine.fill_rect(g.margin_left, banner_y, g.content_width(), BANNER_HEIGHT, PRIMARY);
    engine.fill_rect(g.margin_left, banner_y + BANNER_HEIGHT - 2.0, g.content_width(), 2.0, ACCENT);
    let banner_text_y = banner_y + (BANNER_HEIGHT - FontFace::Bold.line_height(12.0)) / 2.0;
    engine.text(
        "We Also Provide",
        g.margin_left,
        banner_text_y,
        g.content_width(),
        FontFace::Bold,
        12.0,
        WHITE,
        Align::Center,
    );
    let page = engine.page_index();
    engine.record(LayoutEvent::ShowcaseBanner { page, y: banner_y });
    engine.set_y(banner_y + BANNER_HEIGHT + SECTION_GAP);

    let width = card_width(g.content_width());
    let mut row_y = engine.y();
    let mut row_end = row_y;

    for (index, product) in products.iter().enumerate() {
        let column = index % COLUMNS;
        if column == 0 {
            let mut continued = false;
            if index > 0 {
                engine.set_y(row_end + ROW_GAP);
                if !engine.fits(CARD_HEIGHT) {
                    engine.advance_page();
                    let y = engine.y();
                    engine.text("(continued)", g.margin_left, y, g.content_width(), FontFace::Regular, 8.0, MUTED, Align::Left);
                    engine.set_y(y + CONTINUED_HEIGHT);
                    continued = true;
                }
            }
            row_y = engine.y();
            row_end = row_y;
            let page = engine.page_index();
            engine.record(LayoutEvent::CardRow {
                page,
                y: row_y,
                first_product: index,
                continued,
            });
            log::debug!("SHOWCASE row from product {} at page={} y={:.1}", index, page + 1, row_y);
        }

        let x = g.margin_left + column as f32 * (width + COLUMN_GAP);
        let visual = visuals.get(index).unwrap_or(&ProductVisual::Unavailable);
        let end_y = draw_card(engine, product, visual, x, row_y, width);
        row_end = row_end.max(end_y);

        let page = engine.page_index();
        engine.record(LayoutEvent::Card {
            product: index,
            page,
            column,
            y: row_y,
            end_y,
        });
    }

    let end = row_end + END_MARGIN;
    engine.set_y(end);
    end
}

/// One card; returns the lowest Y it occupies.
fn draw_card(
    engine: &mut LayoutEngine,
    product: &AdvertisedProduct,
    visual: &ProductVisual,
    x: f32,
    y: f32,
    width: f32,
) -> f32 {
    engine.stroke_rect(x, y, width, CARD_HEIGHT, Some(WHITE), Stroke { color: BORDER, width: 0.75 });
    engine.fill_rect(x, y, width, ACCENT_BAR, ACCENT);

    let img_x = x + IMAGE_INSET;
    let img_y = y + IMAGE_TOP;
    match visual {
        ProductVisual::Image(image) => {
            engine.image(*image, img_x, img_y, IMAGE_SIZE, IMAGE_SIZE, None);
        }
        ProductVisual::NoImage | ProductVisual::Unavailable => {
            let label = if *visual == ProductVisual::NoImage {
                "No Image"
            } else {
                "Image Unavailable"
            };
            engine.stroke_rect(img_x, img_y, IMAGE_SIZE, IMAGE_SIZE, Some(LIGHT), Stroke { color: BORDER, width: 0.5 });
            let ty = img_y + (IMAGE_SIZE - FontFace::Regular.line_height(SPEC_SIZE)) / 2.0;
            engine.text(label, img_x, ty, IMAGE_SIZE, FontFace::Regular, SPEC_SIZE, MUTED, Align::Center);
        }
    }

    let card_bottom = y + CARD_HEIGHT - CARD_PAD;
    let text_x = img_x + IMAGE_SIZE + CARD_PAD;
    let text_w = x + width - CARD_PAD - text_x;
    let mut ty = y + ACCENT_BAR + CARD_PAD;

    // The name is never shortened; only the card itself bounds it.
    let name_lh = FontFace::Bold.line_height(NAME_SIZE);
    let name_room = ((card_bottom - ty) / name_lh).floor() as usize;
    for line in wrap_clamped(&product.name, FontFace::Bold, NAME_SIZE, text_w, name_room) {
        engine.text(&line, text_x, ty, text_w, FontFace::Bold, NAME_SIZE, PRIMARY, Align::Left);
        ty += name_lh;
    }
    ty += 3.0;

    // Specifications are anchored to the bottom of the text slot and give way
    // to the name when it runs long.
    let title_lh = FontFace::Bold.line_height(SPEC_SIZE);
    let spec_lh = FontFace::Regular.line_height(SPEC_SIZE);
    let spec_room = ((card_bottom - ty - title_lh) / spec_lh).floor().max(0.0) as usize;
    let shown = product.specifications.len().min(MAX_SPECS).min(spec_room);
    if shown < product.specifications.len().min(MAX_SPECS) {
        log::debug!("SHOWCASE {:?}: room for {} of the specifications", product.name, shown);
    }
    let specs_top = if shown == 0 {
        card_bottom
    } else {
        card_bottom - title_lh - shown as f32 * spec_lh
    };

    if let Some(description) = product.display_description() {
        let desc_lh = FontFace::Regular.line_height(DESC_SIZE);
        let room = (specs_top - 2.0 - ty).max(0.0);
        let max_lines = (room / desc_lh).floor() as usize;
        for line in wrap_clamped(description, FontFace::Regular, DESC_SIZE, text_w, max_lines) {
            engine.text(&line, text_x, ty, text_w, FontFace::Regular, DESC_SIZE, TEXT, Align::Left);
            ty += desc_lh;
        }
    }

    if shown > 0 {
        let mut sy = specs_top;
        engine.text("Specifications:", text_x, sy, text_w, FontFace::Bold, SPEC_SIZE, TEXT, Align::Left);
        sy += title_lh;
        for (key, value) in product.specifications.iter().take(shown) {
            let bullet = ellipsize(&format!("\u{2022} {key}: {value}"), FontFace::Regular, SPEC_SIZE, text_w);
            engine.text(&bullet, text_x, sy, text_w, FontFace::Regular, SPEC_SIZE, MUTED, Align::Left);
            sy += spec_lh;
        }
        ty = ty.max(sy);
    }

    (y + CARD_HEIGHT).max(ty)
}
