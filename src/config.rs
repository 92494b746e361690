use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::assets::{HttpImageSource, ImageSource, OfflineImageSource};
use crate::error::Error;
use crate::pdf::PageGeometry;

/// Issuer identity printed in the header, the bank card, and the page footer.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub gst_number: String,
    pub phone: String,
    pub email: String,
    pub bank_name: String,
    pub account_number: String,
    pub ifsc: String,
    pub document_title: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "Your Company Pvt. Ltd.".to_string(),
            tagline: "Industrial Equipment & Solutions".to_string(),
            address: "Plot 12, Industrial Area, Phase II, City - 000000".to_string(),
            gst_number: "00AAAAA0000A0Z0".to_string(),
            phone: "+91 00000 00000".to_string(),
            email: "sales@example.com".to_string(),
            bank_name: "State Bank".to_string(),
            account_number: "000000000000".to_string(),
            ifsc: "SBIN0000000".to_string(),
            document_title: "QUOTATION".to_string(),
        }
    }
}

impl CompanyProfile {
    pub fn from_json_file(path: &Path) -> Result<CompanyProfile, Error> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Environment variable with extra logo paths, tried before the defaults.
pub const LOGO_ENV_VAR: &str = "QUOTATION_LOGO";

const DEFAULT_LOGO_CANDIDATES: [&str; 5] = [
    "assets/logo.png",
    "assets/logo.jpg",
    "public/logo.png",
    "public/images/logo.png",
    "logo.png",
];

/// Knobs for one generation run.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Probed in order; the first existing file is the logo.
    pub logo_candidates: Vec<PathBuf>,
    /// When false, product images are never requested and render as placeholders.
    pub fetch_images: bool,
    pub http_timeout: Duration,
    /// Re-read and re-save the finished PDF with `lopdf` (best-effort).
    pub resave: bool,
    pub geometry: PageGeometry,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            logo_candidates: default_logo_candidates(),
            fetch_images: true,
            http_timeout: Duration::from_secs(10),
            resave: true,
            geometry: PageGeometry::A4,
        }
    }
}

impl GenerateOptions {
    /// Image source matching these options.
    pub fn image_source(&self) -> Box<dyn ImageSource> {
        if self.fetch_images {
            Box::new(HttpImageSource::new(self.http_timeout))
        } else {
            Box::new(OfflineImageSource)
        }
    }
}

/// `QUOTATION_LOGO` entries first, then the built-in relative paths.
pub fn default_logo_candidates() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(val) = std::env::var(LOGO_ENV_VAR) {
        let sep = if cfg!(windows) { ';' } else { ':' };
        for part in val.split(sep) {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                candidates.push(PathBuf::from(trimmed));
            }
        }
    }
    candidates.extend(DEFAULT_LOGO_CANDIDATES.iter().map(PathBuf::from));
    candidates
}
