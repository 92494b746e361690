mod cursor;
mod details;
mod finalize;
mod header;
mod page;
mod showcase;
mod table;
mod terms;
pub mod text;
mod totals;

pub use cursor::{LayoutEngine, PageCursor, PageGeometry};
pub use details::render_details;
pub use finalize::{COMPUTER_GENERATED_NOTICE, contact_line, finalize, stamp_footers};
pub use header::render_header;
pub use page::{
    Align, DocumentInfo, DrawOp, LayoutEvent, Page, RenderedDocument, Rgb, Stroke, TextRun,
};
pub use showcase::render_showcase;
pub use table::render_item_table;
pub use terms::render_terms;
pub use totals::render_totals;

use crate::assets::{
    AssetError, ImageSource, ProductVisual, find_logo, load_logo, prefetch_product_images,
};
use crate::config::{CompanyProfile, GenerateOptions};
use crate::error::Error;
use crate::model::Quotation;

pub const PRIMARY: Rgb = [0x1F, 0x3A, 0x5F];
pub const ACCENT: Rgb = [0xE8, 0x7B, 0x1E];
pub const LIGHT: Rgb = [0xF4, 0xF6, 0xF8];
pub const BAND: Rgb = [0xF9, 0xFA, 0xFB];
pub const BORDER: Rgb = [0xD1, 0xD5, 0xDB];
pub const TEXT: Rgb = [0x1F, 0x29, 0x37];
pub const MUTED: Rgb = [0x6B, 0x72, 0x80];
pub const WHITE: Rgb = [0xFF, 0xFF, 0xFF];

/// Vertical gap between consecutive sections.
pub(crate) const SECTION_GAP: f32 = 15.0;

/// Lay out a quotation into pages. Sections run in a fixed order, each starting
/// where the previous one finished; images are fetched up front so the layout
/// itself never waits on the network.
pub fn render(
    quotation: &Quotation,
    company: &CompanyProfile,
    options: &GenerateOptions,
    source: &dyn ImageSource,
) -> Result<RenderedDocument, Error> {
    let geometry = options.geometry;
    if geometry.content_width() <= 0.0 || geometry.usable_bottom() <= geometry.margin_top {
        return Err(Error::InvalidInput(format!(
            "page geometry leaves no room for content: {geometry:?}"
        )));
    }

    let t0 = std::time::Instant::now();

    let logo = find_logo(&options.logo_candidates).and_then(|path| match load_logo(path) {
        Ok(img) => Some(img),
        Err(e) => {
            log::warn!("Logo {} unreadable ({e}), rendering header without logo", path.display());
            None
        }
    });
    let fetched = prefetch_product_images(&quotation.products, source);
    let t_assets = t0.elapsed();

    let mut engine = LayoutEngine::new(geometry);
    let logo = logo.map(|img| engine.add_image(img));
    let visuals: Vec<ProductVisual> = fetched
        .into_iter()
        .map(|result| match result {
            Ok(img) => ProductVisual::Image(engine.add_image(img)),
            Err(AssetError::NoUrl) => ProductVisual::NoImage,
            Err(_) => ProductVisual::Unavailable,
        })
        .collect();

    let y = render_header(&mut engine, company, logo);
    log::debug!("header end y={y:.1}");
    render_details(&mut engine, quotation);
    let y = render_item_table(&mut engine, &quotation.items);
    log::debug!("table end y={y:.1} page={}", engine.page_index() + 1);
    render_totals(&mut engine, quotation, company);
    render_terms(&mut engine, quotation, company);
    let y = render_showcase(&mut engine, &quotation.products, &visuals);
    log::debug!("content end y={y:.1} page={}", engine.page_index() + 1);
    let t_layout = t0.elapsed();

    let info = DocumentInfo {
        title: format!("Quotation {}", quotation.reference_number),
        author: company.name.clone(),
    };
    let doc = engine.into_document(info);

    log::info!(
        "Layout phases: assets={:.1}ms, layout={:.1}ms ({} items, {} products, {} page(s))",
        t_assets.as_secs_f64() * 1000.0,
        (t_layout - t_assets).as_secs_f64() * 1000.0,
        quotation.items.len(),
        quotation.products.len(),
        doc.page_count(),
    );

    Ok(doc)
}
