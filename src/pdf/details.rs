use crate::fonts::FontFace;
use crate::format::format_date;
use crate::model::Quotation;

use super::cursor::LayoutEngine;
use super::page::{Align, Stroke};
use super::text::ellipsize;
use super::{BORDER, LIGHT, SECTION_GAP, TEXT};

const STRIP_HEIGHT: f32 = 28.0;
const FONT_SIZE: f32 = 9.0;
/// Label offsets from the left margin for reference, date and client.
const ANCHORS: [f32; 3] = [10.0, 180.0, 320.0];

/// Reference / date / client strip. Fixed height.
pub fn render_details(engine: &mut LayoutEngine, quotation: &Quotation) -> f32 {
    let g = engine.geometry;
    let y = engine.y();

    engine.stroke_rect(
        g.margin_left,
        y,
        g.content_width(),
        STRIP_HEIGHT,
        Some(LIGHT),
        Stroke { color: BORDER, width: 0.5 },
    );

    let text_y = y + (STRIP_HEIGHT - FontFace::Regular.line_height(FONT_SIZE)) / 2.0;
    let fields = [
        ("Ref No: ", quotation.reference_number.clone()),
        ("Date: ", format_date(quotation.date)),
        ("To: ", quotation.client_name.clone()),
    ];
    for (i, (label, value)) in fields.iter().enumerate() {
        let x = g.margin_left + ANCHORS[i];
        let label_w = FontFace::Bold.text_width(label, FONT_SIZE);
        let value_x = x + label_w;
        let limit = match ANCHORS.get(i + 1) {
            Some(next) => g.margin_left + next - 10.0 - value_x,
            None => g.right_edge() - 10.0 - value_x,
        };
        let value = ellipsize(value, FontFace::Regular, FONT_SIZE, limit);
        engine.text(label, x, text_y, label_w, FontFace::Bold, FONT_SIZE, TEXT, Align::Left);
        engine.text(&value, value_x, text_y, limit, FontFace::Regular, FONT_SIZE, TEXT, Align::Left);
    }

    let end = y + STRIP_HEIGHT + SECTION_GAP;
    engine.set_y(end);
    end
}
