#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Mutex;
use std::{fs, io};

use chrono::NaiveDate;
use quotation_pdf::pdf::{LayoutEvent, Page, RenderedDocument};
use quotation_pdf::{
    AdvertisedProduct, AssetError, CompanyProfile, GenerateOptions, ImageSource, LineItem,
    Quotation,
};

/// Two lines in the description column at 8.5pt.
pub const LONG_DESCRIPTION: &str =
    "Heavy duty industrial centrifugal pump with stainless steel impeller and motor";

pub fn company() -> CompanyProfile {
    CompanyProfile {
        name: "Shakti Engineering Works".into(),
        gst_number: "27ABCDE1234F1Z5".into(),
        phone: "+91 98200 00000".into(),
        email: "sales@shakti.example".into(),
        ..CompanyProfile::default()
    }
}

/// No logo, no network, no re-save: fully deterministic.
pub fn options() -> GenerateOptions {
    GenerateOptions {
        logo_candidates: Vec::new(),
        fetch_images: false,
        resave: false,
        ..GenerateOptions::default()
    }
}

pub fn short_item(i: usize) -> LineItem {
    LineItem::new(format!("Flange bolt M{}", 10 + i % 10), 4.0, "Nos", 1250, 0.18, 5000)
}

pub fn long_item() -> LineItem {
    LineItem::new(LONG_DESCRIPTION, 1.0, "Set", "₹1,25,000", 18.0, 125000)
}

pub fn quotation(items: Vec<LineItem>, products: Vec<AdvertisedProduct>) -> Quotation {
    Quotation {
        reference_number: "QT-2024-0042".into(),
        date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        client_name: "Acme Process Industries".into(),
        items,
        payment_terms: "50% advance, balance before dispatch".into(),
        offer_validity: "30 days".into(),
        products,
    }
}

pub fn short_items(n: usize) -> Vec<LineItem> {
    (0..n).map(short_item).collect()
}

pub fn product(i: usize) -> AdvertisedProduct {
    AdvertisedProduct::new(format!("Product {}", i + 1))
        .with_description("Compact unit for small plants")
        .with_specifications([("Power", "2 HP"), ("Head", "30 m")])
        .with_image(format!("https://img.example/p{}.png", i + 1), true)
}

pub fn products(n: usize) -> Vec<AdvertisedProduct> {
    (0..n).map(product).collect()
}

/// Every fetch fails as if the server answered 404.
pub struct FailingSource;

impl ImageSource for FailingSource {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, AssetError> {
        Err(AssetError::Status(404))
    }
}

/// Serves one small PNG for every URL and remembers the request order.
pub struct PngSource {
    png: Vec<u8>,
    pub requested: Mutex<Vec<String>>,
}

impl PngSource {
    pub fn new() -> PngSource {
        PngSource {
            png: tiny_png(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl ImageSource for PngSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(self.png.clone())
    }
}

/// 8×8 opaque PNG.
pub fn tiny_png() -> Vec<u8> {
    let img = image::RgbImage::from_fn(8, 8, |x, y| image::Rgb([(x * 30) as u8, (y * 30) as u8, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn pdf_page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("generated PDF parses")
        .get_pages()
        .len()
}

/// Decompressed content stream of every page, in page order.
pub fn pdf_page_contents(bytes: &[u8]) -> Vec<String> {
    let doc = lopdf::Document::load_mem(bytes).expect("generated PDF parses");
    doc.get_pages()
        .values()
        .map(|&id| String::from_utf8_lossy(&doc.get_page_content(id).unwrap()).into_owned())
        .collect()
}

pub fn page_texts(page: &Page) -> Vec<String> {
    page.texts().map(|t| t.text.clone()).collect()
}

pub fn header_pages(doc: &RenderedDocument) -> Vec<(usize, f32)> {
    doc.events
        .iter()
        .filter_map(|e| match e {
            LayoutEvent::TableHeader { page, y } => Some((*page, *y)),
            _ => None,
        })
        .collect()
}

/// Output directory: tests/output/<case>/
pub fn output_dir(case: &str) -> io::Result<PathBuf> {
    let dir = PathBuf::from("tests/output").join(case);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
