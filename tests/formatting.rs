use chrono::NaiveDate;
use quotation_pdf::Amount;
use quotation_pdf::format::{format_currency, format_date, format_gst, format_quantity, normalize_gst};

#[test]
fn currency_groups_thousands() {
    assert_eq!(format_currency(1234567), "Rs 1,234,567");
    assert_eq!(format_currency(999), "Rs 999");
    assert_eq!(format_currency(1000), "Rs 1,000");
    assert_eq!(format_currency(0), "Rs 0");
}

#[test]
fn currency_strips_symbols_from_strings() {
    assert_eq!(format_currency("₹250000"), "Rs 250,000");
    assert_eq!(format_currency("₹2,50,000.00"), "Rs 250,000");
    assert_eq!(format_currency(" 12 500 "), "Rs 12,500");
}

#[test]
fn currency_rounds_to_whole_units() {
    assert_eq!(format_currency(1499.5), "Rs 1,500");
    assert_eq!(format_currency(1499.49), "Rs 1,499");
    assert_eq!(format_currency(-2500.0), "Rs -2,500");
}

#[test]
fn missing_or_garbage_money_is_zero() {
    assert_eq!(format_currency(None::<f64>), "Rs 0");
    assert_eq!(format_currency(Amount::Missing), "Rs 0");
    assert_eq!(format_currency("n/a"), "Rs 0");
    assert_eq!(format_currency(f64::NAN), "Rs 0");
}

#[test]
fn currency_is_idempotent() {
    for value in [0.0, 7.0, 1234567.0, 98765.4, 250000.0] {
        let once = format_currency(value);
        assert_eq!(format_currency(once.as_str()), once, "value {value}");
    }
}

#[test]
fn gst_fraction_and_percentage_render_alike() {
    assert_eq!(format_gst(0.18), "18%");
    assert_eq!(format_gst(18.0), "18%");
    assert_eq!(format_gst(0.05), "5%");
    assert_eq!(format_gst(12.4), "12%");
    assert_eq!(normalize_gst(0.0), 0);
    assert_eq!(normalize_gst(1.0), 1);
}

#[test]
fn dates_are_zero_padded() {
    let d = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert_eq!(format_date(d), "07/03/2024");
    let d = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
    assert_eq!(format_date(d), "31/12/1999");
}

#[test]
fn quantities_drop_needless_decimals() {
    assert_eq!(format_quantity(4.0), "4");
    assert_eq!(format_quantity(2.5), "2.5");
    assert_eq!(format_quantity(1.25), "1.25");
    assert_eq!(format_quantity(0.333), "0.33");
}
