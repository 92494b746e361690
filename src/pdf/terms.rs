use crate::config::CompanyProfile;
use crate::fonts::FontFace;
use crate::model::Quotation;

use super::cursor::{LayoutEngine, PageGeometry};
use super::page::{Align, LayoutEvent, Rgb, Stroke};
use super::text::measure;
use super::{ACCENT, BORDER, PRIMARY, SECTION_GAP, TEXT, WHITE};

const MIN_CARD_HEIGHT: f32 = 90.0;
const CARD_GAP: f32 = 15.0;
const ACCENT_WIDTH: f32 = 4.0;
const PAD: f32 = 10.0;
const TITLE_SIZE: f32 = 9.5;
const BODY_SIZE: f32 = 8.5;
/// Cards that miss the page only paginate once the cursor is this far below
/// the top margin; closer to the top they are pulled up instead.
const NEAR_TOP: f32 = 120.0;

struct Card {
    title: &'static str,
    lines: Vec<String>,
    accent: Rgb,
}

impl Card {
    fn inner_width(width: f32) -> f32 {
        width - ACCENT_WIDTH - 2.0 * PAD
    }

    fn height(&self, width: f32) -> f32 {
        let inner = Card::inner_width(width);
        let body: f32 = self
            .lines
            .iter()
            .map(|l| measure(l, FontFace::Regular, BODY_SIZE, inner).height)
            .sum();
        let h = PAD + FontFace::Bold.line_height(TITLE_SIZE) + 4.0 + body + PAD;
        h.max(MIN_CARD_HEIGHT)
    }

    fn draw(&self, engine: &mut LayoutEngine, x: f32, y: f32, width: f32, height: f32) {
        engine.stroke_rect(x, y, width, height, Some(WHITE), Stroke { color: BORDER, width: 0.75 });
        engine.fill_rect(x, y, ACCENT_WIDTH, height, self.accent);

        let tx = x + ACCENT_WIDTH + PAD;
        let inner = Card::inner_width(width);
        let mut ty = y + PAD;
        engine.text(self.title, tx, ty, inner, FontFace::Bold, TITLE_SIZE, self.accent, Align::Left);
        ty += FontFace::Bold.line_height(TITLE_SIZE) + 4.0;
        for line in &self.lines {
            ty += engine.text_block(line, tx, ty, inner, FontFace::Regular, BODY_SIZE, TEXT, Align::Left);
        }
    }
}

fn labelled(label: &str, value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| format!("{label}: {value}"))
}

fn bank_card(company: &CompanyProfile) -> Card {
    let lines = [
        labelled("Bank", &company.bank_name),
        labelled("A/C No", &company.account_number),
        labelled("IFSC", &company.ifsc),
    ];
    Card {
        title: "Bank Details",
        lines: lines.into_iter().flatten().collect(),
        accent: PRIMARY,
    }
}

fn terms_card(quotation: &Quotation) -> Card {
    let lines = [
        Some("GST: Extra as applicable per item".to_string()),
        labelled("Payment", &quotation.payment_terms),
        labelled("Validity", &quotation.offer_validity),
        Some("Transport: Extra".to_string()),
    ];
    Card {
        title: "Terms & Conditions",
        lines: lines.into_iter().flatten().collect(),
        accent: ACCENT,
    }
}

fn card_width(g: &PageGeometry) -> f32 {
    (g.content_width() - CARD_GAP) / 2.0
}

fn shared_height(cards: &[Card], card_w: f32) -> f32 {
    cards.iter().map(|c| c.height(card_w)).fold(MIN_CARD_HEIGHT, f32::max)
}

/// Height the card pair will take; the totals block plans around it.
pub(crate) fn cards_height(g: &PageGeometry, quotation: &Quotation, company: &CompanyProfile) -> f32 {
    shared_height(&[bank_card(company), terms_card(quotation)], card_width(g))
}

/// Bank details and terms, side by side at equal width and height.
pub fn render_terms(engine: &mut LayoutEngine, quotation: &Quotation, company: &CompanyProfile) -> f32 {
    let g = engine.geometry;
    let card_w = card_width(&g);
    let cards = [bank_card(company), terms_card(quotation)];
    let height = shared_height(&cards, card_w);

    if !engine.fits(height) {
        if engine.y() > g.margin_top + NEAR_TOP {
            engine.advance_page();
        } else {
            let clamped = (g.usable_bottom() - height).max(g.margin_top);
            log::debug!("TERMS clamp y {:.1} → {:.1}", engine.y(), clamped);
            engine.set_y(clamped);
        }
    }

    let y = engine.y();
    for (i, card) in cards.iter().enumerate() {
        let x = g.margin_left + i as f32 * (card_w + CARD_GAP);
        card.draw(engine, x, y, card_w, height);
    }

    let page = engine.page_index();
    engine.record(LayoutEvent::TermsCards { page, y, height });

    let end = y + height + SECTION_GAP;
    engine.set_y(end);
    end
}
