//! Fixed textual representations for money, dates, quantities and GST rates.

use chrono::NaiveDate;

use crate::model::Amount;

/// `"Rs "` followed by the amount rounded to a whole rupee, with `,` thousands
/// separators. Anything unparsable renders as `Rs 0`.
///
/// Strings are cleaned before parsing, so re-formatting an already formatted
/// value gives the same string back.
pub fn format_currency<A: Into<Amount>>(value: A) -> String {
    let amount: Amount = value.into();
    let n = amount.value().unwrap_or_else(|| {
        if let Amount::Text(ref s) = amount {
            log::warn!("Unparsable money value {s:?}, rendering Rs 0");
        }
        0.0
    });
    format!("Rs {}", group_thousands(n.round() as i64))
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Zero-padded `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// GST as a whole percentage. Fractions below 1 are taken as already divided
/// by 100, so `0.18` and `18` both give `18`.
pub fn normalize_gst(gst: f64) -> i64 {
    if !gst.is_finite() {
        return 0;
    }
    if gst < 1.0 {
        (gst * 100.0).round() as i64
    } else {
        gst.round() as i64
    }
}

pub fn format_gst(gst: f64) -> String {
    format!("{}%", normalize_gst(gst))
}

/// Whole quantities print without decimals; fractional ones keep up to two.
pub fn format_quantity(quantity: f64) -> String {
    if !quantity.is_finite() {
        return "0".to_string();
    }
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        let s = format!("{quantity:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
