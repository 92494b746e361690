//! Asset resolution: the local logo probe, remote product image fetches, and
//! turning fetched bytes into something the PDF writer can embed.
//!
//! Nothing in here is fatal. Callers get an [`AssetError`] they log and then
//! replace with a placeholder.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::{ColorType, ImageFormat, ImageReader};
use thiserror::Error;

use crate::model::AdvertisedProduct;

/// Upper bound for a single product image download.
const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("no image URL")]
    NoUrl,

    #[error("remote fetching disabled")]
    Offline,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] image::ImageError),
}

/// Where product image bytes come from. The HTTP implementation is the normal
/// one; tests and offline runs substitute their own.
pub trait ImageSource: Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError>;
}

/// Blocking HTTP(S) GET through a shared `ureq` agent.
pub struct HttpImageSource {
    agent: ureq::Agent,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> HttpImageSource {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        HttpImageSource { agent }
    }
}

impl ImageSource for HttpImageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => AssetError::Status(code),
            other => AssetError::Request(other.to_string()),
        })?;
        if response.status() != 200 {
            return Err(AssetError::Status(response.status()));
        }
        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_IMAGE_BYTES)
            .read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Refuses every fetch; products render with the "Image Unavailable" placeholder.
pub struct OfflineImageSource;

impl ImageSource for OfflineImageSource {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, AssetError> {
        Err(AssetError::Offline)
    }
}

/// First candidate path that exists as a file. Existence checks only; absence
/// is not an error.
pub fn find_logo(candidates: &[PathBuf]) -> Option<&Path> {
    let found = candidates
        .iter()
        .map(PathBuf::as_path)
        .find(|path| path.is_file());
    match found {
        Some(path) => log::debug!("Logo found at {}", path.display()),
        None => log::warn!(
            "No logo found among {} candidate path(s), rendering header without logo",
            candidates.len()
        ),
    }
    found
}

/// Image bytes in the form the PDF writer embeds.
#[derive(Clone, Debug)]
pub enum ImageData {
    /// Baseline RGB JPEG, embedded as-is with DCTDecode.
    Jpeg(Vec<u8>),
    /// Decoded pixels: `width * height * 3` RGB bytes plus optional alpha.
    Raw { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

#[derive(Clone, Debug)]
pub struct EmbeddedImage {
    pub data: ImageData,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Prepare fetched bytes for embedding. RGB JPEGs pass straight through; every
/// other format is decoded to RGB with a separate alpha channel.
pub fn decode_image(bytes: &[u8]) -> Result<EmbeddedImage, AssetError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format();
    let decoded = reader.decode()?;
    let (w, h) = (decoded.width(), decoded.height());

    if format == Some(ImageFormat::Jpeg) && decoded.color() == ColorType::Rgb8 {
        return Ok(EmbeddedImage {
            data: ImageData::Jpeg(bytes.to_vec()),
            pixel_width: w,
            pixel_height: h,
        });
    }

    let rgba = decoded.to_rgba8();
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
    let rgb: Vec<u8> = rgba
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());

    Ok(EmbeddedImage {
        data: ImageData::Raw { rgb, alpha },
        pixel_width: w,
        pixel_height: h,
    })
}

pub fn load_logo(path: &Path) -> Result<EmbeddedImage, AssetError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// What a product card shows in its image slot.
#[derive(Clone, Debug, PartialEq)]
pub enum ProductVisual {
    /// Index into the document's embedded images.
    Image(usize),
    /// The product has no image URL at all.
    NoImage,
    /// Fetching or decoding failed.
    Unavailable,
}

/// Fetch and decode one product image. Failures are logged here; the caller
/// only decides which placeholder to show.
pub fn fetch_product_image(
    index: usize,
    url: Option<&str>,
    source: &dyn ImageSource,
) -> Result<EmbeddedImage, AssetError> {
    let url = url.ok_or(AssetError::NoUrl)?;
    let t0 = std::time::Instant::now();
    let result = source.fetch(url).and_then(|bytes| decode_image(&bytes));
    match &result {
        Ok(img) => log::debug!(
            "product[{index}] image {url} → {}x{} in {:.1}ms",
            img.pixel_width,
            img.pixel_height,
            t0.elapsed().as_secs_f64() * 1000.0,
        ),
        Err(e) => log::warn!("product[{index}] image {url} unavailable: {e}"),
    }
    result
}

/// Fetch every product's display image, in product order, before layout starts.
/// Layout reads the results by index, so ordering is deterministic no matter how
/// long each fetch took.
pub fn prefetch_product_images(
    products: &[AdvertisedProduct],
    source: &dyn ImageSource,
) -> Vec<Result<EmbeddedImage, AssetError>> {
    products
        .iter()
        .enumerate()
        .map(|(i, product)| fetch_product_image(i, product.display_image_url(), source))
        .collect()
}
