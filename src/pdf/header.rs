use crate::config::CompanyProfile;
use crate::fonts::FontFace;

use super::cursor::LayoutEngine;
use super::page::Align;
use super::text::wrap_clamped;
use super::{ACCENT, MUTED, PRIMARY, TEXT};

const BANNER_HEIGHT: f32 = 8.0;
const LOGO_TOP: f32 = 28.0;
const LOGO_SIZE: f32 = 70.0;
const LOGO_RADIUS: f32 = 10.0;
const LOGO_TEXT_GAP: f32 = 15.0;
const TITLE_Y: f32 = 112.0;
const HEADER_END: f32 = 145.0;

/// Branding zone at the top of page 1. The zone has a fixed height, so this
/// never consults the overflow check. Returns the Y where the details start.
pub fn render_header(engine: &mut LayoutEngine, company: &CompanyProfile, logo: Option<usize>) -> f32 {
    let g = engine.geometry;

    engine.fill_rect(0.0, 0.0, g.width, BANNER_HEIGHT, PRIMARY);

    let text_x = match logo {
        Some(image) => {
            engine.image(image, g.margin_left, LOGO_TOP, LOGO_SIZE, LOGO_SIZE, Some(LOGO_RADIUS));
            g.margin_left + LOGO_SIZE + LOGO_TEXT_GAP
        }
        None => g.margin_left,
    };
    let text_w = g.right_edge() - text_x;

    engine.text(&company.name, text_x, 32.0, text_w, FontFace::Bold, 18.0, PRIMARY, Align::Left);
    engine.text(&company.tagline, text_x, 54.0, text_w, FontFace::Regular, 9.0, MUTED, Align::Left);

    let address_lh = FontFace::Regular.line_height(8.5);
    for (i, line) in wrap_clamped(&company.address, FontFace::Regular, 8.5, text_w, 2)
        .iter()
        .enumerate()
    {
        engine.text(line, text_x, 68.0 + i as f32 * address_lh, text_w, FontFace::Regular, 8.5, TEXT, Align::Left);
    }

    let title = company.document_title.to_uppercase();
    engine.text(&title, 0.0, TITLE_Y, g.width, FontFace::Bold, 16.0, PRIMARY, Align::Center);
    let rule_w = FontFace::Bold.text_width(&title, 16.0) + 40.0;
    let rule_x = (g.width - rule_w) / 2.0;
    engine.line(rule_x, TITLE_Y + 20.0, rule_x + rule_w, TITLE_Y + 20.0, ACCENT, 1.5);

    engine.set_y(HEADER_END);
    HEADER_END
}
