mod common;

use quotation_pdf::FontFace;
use quotation_pdf::pdf::text::{ellipsize, measure, wrap_text};
use quotation_pdf::pdf::{LayoutEngine, LayoutEvent, PageGeometry, render_terms, render_totals};

use common::{company, quotation, short_items};

/// Short page: usable bottom at 220, midpoint at 150.
fn short_page() -> PageGeometry {
    PageGeometry {
        height: 300.0,
        ..PageGeometry::A4
    }
}

fn events_of(engine: LayoutEngine) -> Vec<LayoutEvent> {
    engine.into_document(Default::default()).events
}

#[test]
fn fits_stops_at_reserved_footer() {
    let engine = LayoutEngine::new(PageGeometry::A4);
    assert_eq!(engine.y(), 50.0);
    assert!(engine.fits(712.0));
    assert!(!engine.fits(712.5));
}

#[test]
fn advance_page_resets_to_top_margin() {
    let mut engine = LayoutEngine::new(PageGeometry::A4);
    engine.set_y(600.0);
    engine.advance_page();
    assert_eq!(engine.page_index(), 1);
    assert_eq!(engine.y(), 50.0);
    let doc = engine.into_document(Default::default());
    assert_eq!(doc.page_count(), 2);
    assert!(doc.pages.iter().all(|p| p.width == 595.0 && p.height == 842.0));
}

#[test]
fn totals_paginate_when_tight_past_midpoint() {
    let q = quotation(short_items(1), Vec::new());
    let mut engine = LayoutEngine::new(PageGeometry::A4);
    engine.set_y(700.0);
    let end = render_totals(&mut engine, &q, &company());
    assert_eq!(engine.page_index(), 1);
    assert_eq!(end, 50.0 + 30.0 + 15.0);
}

#[test]
fn totals_stay_put_when_tight_above_midpoint() {
    let q = quotation(short_items(1), Vec::new());
    let mut engine = LayoutEngine::new(short_page());
    engine.set_y(120.0);
    assert!(!engine.fits(135.0));
    render_totals(&mut engine, &q, &company());
    assert_eq!(engine.page_index(), 0);
    assert!(events_of(engine).contains(&LayoutEvent::Totals { page: 0, y: 120.0 }));
}

#[test]
fn totals_box_itself_always_fits() {
    let q = quotation(short_items(1), Vec::new());
    let mut engine = LayoutEngine::new(short_page());
    engine.set_y(145.0);
    // Below the midpoint threshold of 150, but only 75pt of room for a 30pt box
    // plus cards: no early break. Then the box alone fits at 145..175.
    render_totals(&mut engine, &q, &company());
    assert_eq!(engine.page_index(), 0);

    let mut engine = LayoutEngine::new(short_page());
    engine.set_y(195.0);
    render_totals(&mut engine, &q, &company());
    assert_eq!(engine.page_index(), 1);
}

#[test]
fn terms_clamp_upward_near_page_top() {
    let q = quotation(short_items(1), Vec::new());
    let mut engine = LayoutEngine::new(short_page());
    engine.set_y(150.0);
    render_terms(&mut engine, &q, &company());
    assert_eq!(engine.page_index(), 0);
    let events = events_of(engine);
    assert!(events.contains(&LayoutEvent::TermsCards { page: 0, y: 130.0, height: 90.0 }));
}

#[test]
fn terms_paginate_further_down() {
    let q = quotation(short_items(1), Vec::new());
    let mut engine = LayoutEngine::new(short_page());
    engine.set_y(200.0);
    render_terms(&mut engine, &q, &company());
    assert_eq!(engine.page_index(), 1);
    let events = events_of(engine);
    assert!(events.contains(&LayoutEvent::TermsCards { page: 1, y: 50.0, height: 90.0 }));
}

#[test]
fn empty_text_measures_zero() {
    let m = measure("", FontFace::Regular, 10.0, 100.0);
    assert_eq!(m.lines, 0);
    assert_eq!(m.height, 0.0);
}

#[test]
fn explicit_newlines_start_lines() {
    let m = measure("Line one\nLine two", FontFace::Regular, 10.0, 500.0);
    assert_eq!(m.lines, 2);
    assert!((m.height - 2.0 * FontFace::Regular.line_height(10.0)).abs() < 0.001);
}

#[test]
fn wrapped_lines_respect_width() {
    let text = "SS316L-FLANGE-ASSEMBLY-WITH-GASKET-AND-FASTENERS fitted to pump casing as per drawing";
    let lines = wrap_text(text, FontFace::Regular, 8.5, 80.0);
    assert!(lines.len() > 2);
    assert!(lines.iter().all(|l| l.width <= 80.0 + 0.01));
    let rejoined: String = lines.iter().map(|l| l.text.as_str()).collect::<Vec<_>>().join("");
    assert_eq!(rejoined.replace(' ', ""), text.replace(' ', ""));
}

#[test]
fn helvetica_widths_match_afm() {
    assert!((FontFace::Regular.text_width("Hello", 10.0) - 22.78).abs() < 0.01);
    assert!((FontFace::Bold.text_width("Hello", 10.0) - 24.45).abs() < 0.01);
}

#[test]
fn ellipsize_only_when_needed() {
    assert_eq!(ellipsize("Short", FontFace::Regular, 8.0, 100.0), "Short");
    let cut = ellipsize("A rather long specification value", FontFace::Regular, 8.0, 60.0);
    assert!(cut.ends_with('\u{2026}'));
    assert!(FontFace::Regular.text_width(&cut, 8.0) <= 60.0 + 0.01);
}

#[test]
fn totals_make_room_for_tall_terms_cards() {
    let mut q = quotation(short_items(1), Vec::new());
    q.payment_terms = "50% advance along with purchase order, balance against proforma invoice \
                       before dispatch of material from our works, subject to realisation. "
        .repeat(3);

    // 600 + 30 + 15 + 90 would fit; the real cards are taller than 90.
    let mut engine = LayoutEngine::new(PageGeometry::A4);
    engine.set_y(600.0);
    render_totals(&mut engine, &q, &company());
    render_terms(&mut engine, &q, &company());
    assert_eq!(engine.page_index(), 1);

    let events = events_of(engine);
    assert!(events.contains(&LayoutEvent::Totals { page: 1, y: 50.0 }));
    assert!(events.iter().any(|e| matches!(e,
        LayoutEvent::TermsCards { page: 1, y, height } if *y == 95.0 && *height > 90.0)));
}
