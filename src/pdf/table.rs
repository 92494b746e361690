use crate::fonts::FontFace;
use crate::format::{format_currency, format_gst, format_quantity};
use crate::model::LineItem;

use super::cursor::LayoutEngine;
use super::page::{Align, LayoutEvent};
use super::text::{measure, wrap_clamped};
use super::{BAND, BORDER, PRIMARY, SECTION_GAP, TEXT, WHITE};

struct Column {
    label: &'static str,
    width: f32,
    align: Align,
}

/// Fixed column layout; the widths add up to the A4 content width.
const COLUMNS: [Column; 7] = [
    Column { label: "S.No", width: 30.0, align: Align::Center },
    Column { label: "Description", width: 175.0, align: Align::Left },
    Column { label: "Qty", width: 45.0, align: Align::Center },
    Column { label: "Unit", width: 45.0, align: Align::Center },
    Column { label: "Rate", width: 70.0, align: Align::Right },
    Column { label: "GST", width: 45.0, align: Align::Center },
    Column { label: "Amount", width: 85.0, align: Align::Right },
];

const HEADER_HEIGHT: f32 = 22.0;
const HEADER_FONT_SIZE: f32 = 8.0;
const CELL_FONT_SIZE: f32 = 8.5;
const CELL_PAD_X: f32 = 5.0;
const ROW_PADDING: f32 = 10.0;
const MIN_CONTENT_HEIGHT: f32 = 12.0;
const MIN_ROW_HEIGHT: f32 = 22.0;

fn table_width() -> f32 {
    COLUMNS.iter().map(|c| c.width).sum()
}

fn cell_texts(index: usize, item: &LineItem) -> [String; 7] {
    [
        (index + 1).to_string(),
        item.description.clone(),
        format_quantity(item.quantity),
        item.unit.clone(),
        format_currency(&item.rate),
        format_gst(item.gst_percent),
        format_currency(&item.amount),
    ]
}

/// Height of one row: the tallest wrapped cell, floored at the minimum content
/// height, plus vertical padding.
fn row_height(cells: &[String; 7]) -> f32 {
    let content = cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(text, col)| {
            measure(text, FontFace::Regular, CELL_FONT_SIZE, col.width - 2.0 * CELL_PAD_X).height
        })
        .fold(MIN_CONTENT_HEIGHT, f32::max);
    (content + ROW_PADDING).max(MIN_ROW_HEIGHT)
}

/// Tallest row a fresh continuation page can hold under its header.
fn max_row_height(engine: &LayoutEngine) -> f32 {
    let g = engine.geometry;
    g.usable_bottom() - g.margin_top - HEADER_HEIGHT
}

/// Cut any cell taller than `max_row_h` allows down to the lines that fit,
/// ellipsizing the last one. Kept lines are joined with newlines so the
/// renderer lays them out exactly as measured.
fn clamp_cells(serial: usize, mut cells: [String; 7], max_row_h: f32) -> [String; 7] {
    let line_h = FontFace::Regular.line_height(CELL_FONT_SIZE);
    let max_lines = ((max_row_h - ROW_PADDING) / line_h).floor().max(1.0) as usize;
    for (text, col) in cells.iter_mut().zip(COLUMNS.iter()) {
        let inner_w = col.width - 2.0 * CELL_PAD_X;
        let lines = measure(text, FontFace::Regular, CELL_FONT_SIZE, inner_w).lines;
        if lines > max_lines {
            log::warn!(
                "Row {serial}: {} cell wraps to {lines} lines, cut to {max_lines} to fit one page",
                col.label
            );
            *text = wrap_clamped(text, FontFace::Regular, CELL_FONT_SIZE, inner_w, max_lines).join("\n");
        }
    }
    cells
}

fn draw_header_row(engine: &mut LayoutEngine) {
    let x0 = engine.geometry.margin_left;
    let y = engine.y();
    engine.fill_rect(x0, y, table_width(), HEADER_HEIGHT, PRIMARY);

    let text_y = y + (HEADER_HEIGHT - FontFace::Bold.line_height(HEADER_FONT_SIZE)) / 2.0;
    let mut x = x0;
    for col in &COLUMNS {
        engine.text(
            &col.label.to_uppercase(),
            x + CELL_PAD_X,
            text_y,
            col.width - 2.0 * CELL_PAD_X,
            FontFace::Bold,
            HEADER_FONT_SIZE,
            WHITE,
            col.align,
        );
        x += col.width;
    }

    let page = engine.page_index();
    engine.record(LayoutEvent::TableHeader { page, y });
    engine.set_y(y + HEADER_HEIGHT);
}

fn draw_row(engine: &mut LayoutEngine, index: usize, cells: &[String; 7], row_h: f32, is_last: bool) {
    let x0 = engine.geometry.margin_left;
    let y = engine.y();
    let width = table_width();

    if index % 2 == 0 {
        engine.fill_rect(x0, y, width, row_h, BAND);
    }

    let mut x = x0;
    engine.line(x, y, x, y + row_h, BORDER, 0.5);
    for (text, col) in cells.iter().zip(COLUMNS.iter()) {
        let inner_w = col.width - 2.0 * CELL_PAD_X;
        let cell_h = measure(text, FontFace::Regular, CELL_FONT_SIZE, inner_w).height;
        let text_y = y + (row_h - cell_h) / 2.0;
        engine.text_block(
            text,
            x + CELL_PAD_X,
            text_y,
            inner_w,
            FontFace::Regular,
            CELL_FONT_SIZE,
            TEXT,
            col.align,
        );
        x += col.width;
        engine.line(x, y, x, y + row_h, BORDER, 0.5);
    }

    if !is_last {
        engine.line(x0, y + row_h, x0 + width, y + row_h, BORDER, 0.5);
    }
}

/// Item table. Rows are atomic: a row that does not fit moves whole to a new
/// page, and the header row is redrawn there first. Serial numbers are the
/// 1-based position in `items`.
pub fn render_item_table(engine: &mut LayoutEngine, items: &[LineItem]) -> f32 {
    let max_row_h = max_row_height(engine);
    let rows: Vec<([String; 7], f32)> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let cells = clamp_cells(index + 1, cell_texts(index, item), max_row_h);
            let row_h = row_height(&cells);
            (cells, row_h)
        })
        .collect();

    // Keep the header with the first row.
    let first_row = rows.first().map(|(_, h)| *h).unwrap_or(MIN_ROW_HEIGHT);
    if !engine.fits(HEADER_HEIGHT + first_row) {
        engine.advance_page();
    }
    draw_header_row(engine);
    let mut rows_on_page = 0;

    for (index, (cells, row_h)) in rows.iter().enumerate() {
        let row_h = *row_h;

        log::debug!(
            "TABLE row={} row_h={:.2} page={} y={:.2}",
            index + 1,
            row_h,
            engine.page_index() + 1,
            engine.y()
        );

        // A row directly under a freshly drawn header stays put; moving it
        // again would strand that header.
        if rows_on_page > 0 && !engine.fits(row_h) {
            engine.advance_page();
            draw_header_row(engine);
            rows_on_page = 0;
        }

        let y = engine.y();
        draw_row(engine, index, cells, row_h, index + 1 == items.len());
        let page = engine.page_index();
        engine.record(LayoutEvent::TableRow {
            serial: index + 1,
            page,
            y,
            height: row_h,
        });
        engine.set_y(y + row_h);
        rows_on_page += 1;
    }

    let end = engine.y() + SECTION_GAP;
    engine.set_y(end);
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;

    #[test]
    fn columns_span_content_width() {
        assert!((table_width() - 495.0).abs() < 0.01);
    }

    #[test]
    fn single_line_row_is_minimum_height() {
        let item = LineItem::new("Bolt", 2.0, "Nos", 10, 0.18, 20);
        assert_eq!(row_height(&cell_texts(0, &item)), MIN_ROW_HEIGHT);
    }

    #[test]
    fn wrapped_description_grows_row() {
        let long = "Heavy duty industrial centrifugal pump with stainless steel impeller and motor";
        let item = LineItem::new(long, 1.0, "Nos", 125000, 18.0, 125000);
        let cells = cell_texts(0, &item);
        let lines = measure(&cells[1], FontFace::Regular, CELL_FONT_SIZE, 165.0).lines;
        assert!(lines >= 2);
        let expected = lines as f32 * FontFace::Regular.line_height(CELL_FONT_SIZE) + ROW_PADDING;
        assert!((row_height(&cells) - expected).abs() < 0.01);
    }

    #[test]
    fn oversized_cell_is_cut_to_page_height() {
        let item = LineItem::new("word ".repeat(2500), 1.0, "Nos", 10, 18.0, 10);
        let max_row_h = 762.0 - 50.0 - HEADER_HEIGHT;
        let cells = clamp_cells(1, cell_texts(0, &item), max_row_h);
        assert!(row_height(&cells) <= max_row_h);
        assert!(cells[1].ends_with('\u{2026}'));
        assert_eq!(cells[2], "1");
    }

    #[test]
    fn serial_comes_from_position() {
        let item = LineItem::new("7. Pipe", 1.0, "m", 5, 18.0, 5);
        assert_eq!(cell_texts(6, &item)[0], "7");
        assert_eq!(cell_texts(0, &item)[0], "1");
    }
}
