mod common;

use rayon::prelude::*;

use quotation_pdf::pdf::{LayoutEvent, PageGeometry, text::measure};
use quotation_pdf::{
    CompanyProfile, FontFace, GenerateOptions, LineItem, convert_json_to_pdf,
    generate_quotation_bytes, render_quotation, write_quotation,
};

use common::{
    FailingSource, LONG_DESCRIPTION, PngSource, company, long_item, options, output_dir,
    pdf_page_count, products, quotation, short_items,
};

fn long_items(n: usize) -> Vec<LineItem> {
    (0..n).map(|_| long_item()).collect()
}

#[test]
fn long_descriptions_wrap_to_two_lines() {
    let m = measure(LONG_DESCRIPTION, FontFace::Regular, 8.5, 165.0);
    assert_eq!(m.lines, 2);
}

#[test]
fn twenty_five_wrapped_items_and_nine_products() {
    let _ = env_logger::try_init();
    let q = quotation(long_items(25), products(9));
    let source = PngSource::new();
    let doc = render_quotation(&q, &company(), &options(), &source).unwrap();
    assert!(doc.page_count() >= 2);

    // Table breaks come only from cumulative row heights.
    let g = PageGeometry::A4;
    let rows: Vec<(usize, f32, f32)> = doc
        .events
        .iter()
        .filter_map(|e| match e {
            LayoutEvent::TableRow { page, y, height, .. } => Some((*page, *y, *height)),
            _ => None,
        })
        .collect();
    assert_eq!(rows.len(), 25);
    let mut expected_page = 0;
    let mut expected_y = rows[0].1;
    for (page, y, h) in &rows {
        if expected_y + h > g.usable_bottom() {
            expected_page += 1;
            expected_y = g.margin_top + 22.0;
        }
        assert_eq!(*page, expected_page);
        assert!((y - expected_y).abs() < 0.01);
        expected_y += h;
    }

    // The grid starts on the page where the banner plus one card row fit.
    let banner = doc
        .events
        .iter()
        .find_map(|e| match e {
            LayoutEvent::ShowcaseBanner { page, y } => Some((*page, *y)),
            _ => None,
        })
        .unwrap();
    let terms = doc
        .events
        .iter()
        .find_map(|e| match e {
            LayoutEvent::TermsCards { page, y, height } => Some((*page, *y + *height + 15.0)),
            _ => None,
        })
        .unwrap();
    if terms.1 + 30.0 + 15.0 + 150.0 <= g.usable_bottom() {
        assert_eq!(banner, terms);
    } else {
        assert_eq!(banner, (terms.0 + 1, g.margin_top));
    }

    let bytes = generate_quotation_bytes(&q, &company(), &options(), &source).unwrap();
    assert_eq!(pdf_page_count(&bytes), doc.page_count());

    let dir = output_dir("twenty_five_items").unwrap();
    std::fs::write(dir.join("generated.pdf"), &bytes).unwrap();
}

#[test]
fn resave_keeps_a_valid_document() {
    let q = quotation(short_items(40), products(4));
    let plain = generate_quotation_bytes(&q, &company(), &options(), &FailingSource).unwrap();
    let opts = GenerateOptions {
        resave: true,
        ..options()
    };
    let resaved = generate_quotation_bytes(&q, &company(), &opts, &FailingSource).unwrap();
    assert!(resaved.starts_with(b"%PDF-"));
    assert_eq!(pdf_page_count(&resaved), pdf_page_count(&plain));
}

#[test]
fn metadata_names_quotation_and_company() {
    let q = quotation(short_items(1), Vec::new());
    let bytes = generate_quotation_bytes(&q, &company(), &options(), &FailingSource).unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    let info_ref = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = doc.get_dictionary(info_ref).unwrap();
    assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Quotation QT-2024-0042");
    assert_eq!(info.get(b"Author").unwrap().as_str().unwrap(), b"Shakti Engineering Works");
}

#[test]
fn writes_into_any_writer() {
    let q = quotation(short_items(3), Vec::new());
    let mut out: Vec<u8> = Vec::new();
    write_quotation(&q, &company(), &options(), &FailingSource, &mut out).unwrap();
    assert!(out.starts_with(b"%PDF-"));
    assert_eq!(pdf_page_count(&out), 1);
}

#[test]
fn json_file_to_pdf_file() {
    let dir = output_dir("json_roundtrip").unwrap();
    let input = dir.join("quotation.json");
    let output = dir.join("generated.pdf");
    let json = serde_json::json!({
        "referenceNumber": "QT-77",
        "date": "2024-02-29",
        "clientName": "Sahyadri Mills",
        "items": [
            { "description": "Chain conveyor", "quantity": 1, "unit": "Nos",
              "rate": "₹3,40,000", "gstPercent": 0.18, "amount": "₹3,40,000" }
        ],
        "paymentTerms": "Against delivery",
        "offerValidity": "7 days",
        "products": [ { "name": "Elevator", "images": [] } ]
    });
    std::fs::write(&input, json.to_string()).unwrap();

    let profile = dir.join("company.json");
    std::fs::write(
        &profile,
        serde_json::json!({ "name": "Sahyadri Engineering", "gstNumber": "27XYZ", "ifsc": "HDFC0001234" })
            .to_string(),
    )
    .unwrap();
    let company = CompanyProfile::from_json_file(&profile).unwrap();
    assert_eq!(company.name, "Sahyadri Engineering");
    assert_eq!(company.ifsc, "HDFC0001234");
    assert_eq!(company.document_title, CompanyProfile::default().document_title);

    convert_json_to_pdf(&input, &output, &company, &options()).unwrap();
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(pdf_page_count(&bytes), 1);
}

#[test]
fn write_failure_is_fatal() {
    let q = quotation(short_items(1), Vec::new());
    let missing = std::path::Path::new("tests/output/no/such/dir/out.pdf");
    let opts = options();
    let err = quotation_pdf::generate_quotation_pdf(&q, &company(), &opts, missing).unwrap_err();
    assert!(matches!(err, quotation_pdf::Error::Io(_)));
}

#[test]
fn parallel_generations_are_independent() {
    let _ = env_logger::try_init();
    let sizes = [0usize, 5, 30, 60, 90];
    let counts: Vec<(usize, usize)> = sizes
        .par_iter()
        .map(|&n| {
            let q = quotation(short_items(n), products(n % 7));
            let bytes = generate_quotation_bytes(&q, &company(), &options(), &FailingSource).unwrap();
            (n, pdf_page_count(&bytes))
        })
        .collect();

    for (n, pages) in counts {
        let q = quotation(short_items(n), products(n % 7));
        let doc = render_quotation(&q, &company(), &options(), &FailingSource).unwrap();
        assert_eq!(pages, doc.page_count(), "n={n}");
    }
}
