use crate::config::CompanyProfile;
use crate::fonts::FontFace;
use crate::format::format_currency;
use crate::model::Quotation;

use super::cursor::LayoutEngine;
use super::page::{Align, LayoutEvent, Stroke};
use super::terms::cards_height;
use super::{BORDER, LIGHT, PRIMARY, SECTION_GAP, TEXT};

const TOTALS_HEIGHT: f32 = 30.0;
const BOX_WIDTH: f32 = 240.0;

/// Subtotal box, right-anchored under the table. GST is not summed here since
/// rates differ per line.
///
/// Pagination is reluctant: a new page is started only when the
/// totals plus the terms cards cannot fit *and* the cursor is already past the
/// middle of the page. After that, the box itself must still fit.
pub fn render_totals(engine: &mut LayoutEngine, quotation: &Quotation, company: &CompanyProfile) -> f32 {
    let g = engine.geometry;
    let required = TOTALS_HEIGHT + SECTION_GAP + cards_height(&g, quotation, company);

    if !engine.fits(required) && engine.y() > g.height / 2.0 {
        log::debug!(
            "TOTALS need {:.1}pt at y={:.1} past mid-page, advancing",
            required,
            engine.y()
        );
        engine.advance_page();
    }
    if !engine.fits(TOTALS_HEIGHT) {
        engine.advance_page();
    }

    let y = engine.y();
    let x = g.right_edge() - BOX_WIDTH;
    engine.stroke_rect(x, y, BOX_WIDTH, TOTALS_HEIGHT, Some(LIGHT), Stroke { color: BORDER, width: 0.75 });

    let label_y = y + (TOTALS_HEIGHT - FontFace::Bold.line_height(10.0)) / 2.0;
    engine.text("Total (Excl GST)", x + 10.0, label_y, BOX_WIDTH - 20.0, FontFace::Bold, 10.0, TEXT, Align::Left);

    let amount = format_currency(quotation.subtotal());
    let amount_y = y + (TOTALS_HEIGHT - FontFace::Bold.line_height(11.0)) / 2.0;
    engine.text(&amount, x + 10.0, amount_y, BOX_WIDTH - 20.0, FontFace::Bold, 11.0, PRIMARY, Align::Right);

    let page = engine.page_index();
    engine.record(LayoutEvent::Totals { page, y });

    let end = y + TOTALS_HEIGHT + SECTION_GAP;
    engine.set_y(end);
    end
}
