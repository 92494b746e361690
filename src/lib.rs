pub mod assets;
pub mod config;
mod error;
mod fonts;
pub mod format;
pub mod model;
pub mod pdf;
mod postprocess;

pub use assets::{AssetError, HttpImageSource, ImageSource, OfflineImageSource};
pub use config::{CompanyProfile, GenerateOptions};
pub use error::Error;
pub use fonts::FontFace;
pub use model::{AdvertisedProduct, Amount, LineItem, ProductImage, Quotation, Specifications};
pub use pdf::{PageGeometry, RenderedDocument};

use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Layout only: the pages as draw operations, before footers are stamped.
pub fn render_quotation(
    quotation: &Quotation,
    company: &CompanyProfile,
    options: &GenerateOptions,
    source: &dyn ImageSource,
) -> Result<RenderedDocument, Error> {
    pdf::render(quotation, company, options, source)
}

/// Full generation into an in-memory PDF.
pub fn generate_quotation_bytes(
    quotation: &Quotation,
    company: &CompanyProfile,
    options: &GenerateOptions,
    source: &dyn ImageSource,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let doc = pdf::render(quotation, company, options, source)?;
    let t_layout = t0.elapsed();

    let bytes = pdf::finalize(doc, company, &options.geometry)?;
    let t_finalize = t0.elapsed();

    let bytes = if options.resave {
        postprocess::resave(bytes)
    } else {
        bytes
    };
    let t_total = t0.elapsed();

    log::info!(
        "Timing: layout={:.1}ms, finalize={:.1}ms, postprocess={:.1}ms, total={:.1}ms (output {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_finalize - t_layout).as_secs_f64() * 1000.0,
        (t_total - t_finalize).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(bytes)
}

pub fn write_quotation<W: Write>(
    quotation: &Quotation,
    company: &CompanyProfile,
    options: &GenerateOptions,
    source: &dyn ImageSource,
    mut out: W,
) -> Result<(), Error> {
    let bytes = generate_quotation_bytes(quotation, company, options, source)?;
    out.write_all(&bytes)?;
    out.flush()?;
    Ok(())
}

/// Generate and write to `output`, fetching product images as `options` says.
pub fn generate_quotation_pdf(
    quotation: &Quotation,
    company: &CompanyProfile,
    options: &GenerateOptions,
    output: &Path,
) -> Result<(), Error> {
    let source = options.image_source();
    let bytes = generate_quotation_bytes(quotation, company, options, source.as_ref())?;
    std::fs::write(output, &bytes).map_err(Error::Io)?;
    log::info!("Wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

/// JSON in, PDF file out.
pub fn convert_json_to_pdf(
    input: &Path,
    output: &Path,
    company: &CompanyProfile,
    options: &GenerateOptions,
) -> Result<(), Error> {
    let t0 = Instant::now();
    let json = std::fs::read_to_string(input)?;
    let quotation = Quotation::from_json(&json)?;
    log::info!(
        "Parsed {} in {:.1}ms: {} items, {} products",
        input.display(),
        t0.elapsed().as_secs_f64() * 1000.0,
        quotation.items.len(),
        quotation.products.len(),
    );
    generate_quotation_pdf(&quotation, company, options, output)
}
