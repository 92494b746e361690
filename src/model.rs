use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

/// A money value as it arrives from upstream: a number, a pre-formatted string
/// (e.g. `"₹2,50,000"`), or nothing at all.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Amount {
    /// Numeric value, or `None` when the input is missing or unparsable.
    /// Strings keep only digits, `.` and `-` before parsing.
    pub fn value(&self) -> Option<f64> {
        match self {
            Amount::Number(n) if n.is_finite() => Some(*n),
            Amount::Number(_) | Amount::Missing => None,
            Amount::Text(s) => {
                let cleaned: String = s
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
    }
}

impl From<f64> for Amount {
    fn from(v: f64) -> Self {
        Amount::Number(v)
    }
}

impl From<i32> for Amount {
    fn from(v: i32) -> Self {
        Amount::Number(v as f64)
    }
}

impl From<i64> for Amount {
    fn from(v: i64) -> Self {
        Amount::Number(v as f64)
    }
}

impl From<u32> for Amount {
    fn from(v: u32) -> Self {
        Amount::Number(v as f64)
    }
}

impl From<&str> for Amount {
    fn from(v: &str) -> Self {
        Amount::Text(v.to_string())
    }
}

impl From<String> for Amount {
    fn from(v: String) -> Self {
        Amount::Text(v)
    }
}

impl From<&Amount> for Amount {
    fn from(v: &Amount) -> Self {
        v.clone()
    }
}

impl<T: Into<Amount>> From<Option<T>> for Amount {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Amount::Missing)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub rate: Amount,
    /// Either a fraction (`0.18`) or a whole percentage (`18`).
    pub gst_percent: f64,
    pub amount: Amount,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        rate: impl Into<Amount>,
        gst_percent: f64,
        amount: impl Into<Amount>,
    ) -> LineItem {
        LineItem {
            description: description.into(),
            quantity,
            unit: unit.into(),
            rate: rate.into(),
            gst_percent,
            amount: amount.into(),
        }
    }
}

/// Ordered key/value specification entries. Keys starting with `$` are
/// framework metadata and are dropped on construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Specifications(Vec<(String, String)>);

impl Specifications {
    pub fn from_pairs<K, V, I>(pairs: I) -> Specifications
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Specifications(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(k, _)| !k.starts_with('$'))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductImage {
    pub url: String,
    pub is_primary: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdvertisedProduct {
    pub name: String,
    pub description: Option<String>,
    pub specifications: Specifications,
    pub images: Vec<ProductImage>,
}

impl AdvertisedProduct {
    pub fn new(name: impl Into<String>) -> AdvertisedProduct {
        AdvertisedProduct {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_specifications<K, V, I>(mut self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.specifications = Specifications::from_pairs(pairs);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>, is_primary: bool) -> Self {
        self.images.push(ProductImage {
            url: url.into(),
            is_primary,
        });
        self
    }

    /// The primary image URL, else the first one. Blank URLs count as absent.
    pub fn display_image_url(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
            .map(|img| img.url.trim())
            .filter(|url| !url.is_empty())
    }

    /// Description trimmed, or `None` when blank.
    pub fn display_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Quotation {
    pub reference_number: String,
    pub date: NaiveDate,
    pub client_name: String,
    pub items: Vec<LineItem>,
    pub payment_terms: String,
    pub offer_validity: String,
    pub products: Vec<AdvertisedProduct>,
}

impl Quotation {
    /// Sum of line amounts before tax. Unparsable amounts count as zero.
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.amount.value().unwrap_or(0.0))
            .sum()
    }

    pub fn from_json(json: &str) -> Result<Quotation, Error> {
        let raw: RawQuotation = serde_json::from_str(json)?;
        Quotation::try_from(raw)
    }
}

// JSON input shape, as exported by the dashboard API.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuotation {
    #[serde(default, alias = "quotationNumber")]
    reference_number: String,
    date: Option<String>,
    #[serde(default)]
    client_name: String,
    #[serde(default)]
    items: Vec<RawLineItem>,
    #[serde(default)]
    payment_terms: String,
    #[serde(default)]
    offer_validity: String,
    #[serde(default, alias = "advertisements")]
    products: Vec<RawProduct>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLineItem {
    #[serde(default)]
    description: String,
    #[serde(default)]
    quantity: Amount,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    rate: Amount,
    #[serde(default, alias = "gst")]
    gst_percent: Amount,
    #[serde(default)]
    amount: Amount,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(default)]
    name: String,
    description: Option<String>,
    specifications: Option<RawSpecifications>,
    #[serde(default)]
    images: Vec<RawImage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawImage {
    #[serde(default)]
    url: String,
    #[serde(default)]
    is_primary: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpecifications {
    Object(serde_json::Map<String, Value>),
    Pairs(Vec<(String, Value)>),
    Entries(Vec<RawSpecEntry>),
}

#[derive(Deserialize)]
struct RawSpecEntry {
    key: String,
    value: Value,
}

fn spec_value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl From<RawSpecifications> for Specifications {
    fn from(raw: RawSpecifications) -> Self {
        let pairs: Vec<(String, Value)> = match raw {
            RawSpecifications::Object(map) => map.into_iter().collect(),
            RawSpecifications::Pairs(pairs) => pairs,
            RawSpecifications::Entries(entries) => {
                entries.into_iter().map(|e| (e.key, e.value)).collect()
            }
        };
        Specifications::from_pairs(
            pairs
                .into_iter()
                .filter_map(|(k, v)| spec_value_text(v).map(|v| (k, v))),
        )
    }
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .or_else(|| s.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
        .or_else(|| NaiveDate::parse_from_str(s, "%d/%m/%Y").ok())
}

impl TryFrom<RawQuotation> for Quotation {
    type Error = Error;

    fn try_from(raw: RawQuotation) -> Result<Self, Self::Error> {
        let date_text = raw
            .date
            .ok_or_else(|| Error::InvalidInput("missing quotation date".to_string()))?;
        let date = parse_date(&date_text)
            .ok_or_else(|| Error::InvalidInput(format!("unrecognised date: {date_text}")))?;

        let items = raw
            .items
            .into_iter()
            .map(|item| LineItem {
                description: item.description,
                quantity: item.quantity.value().unwrap_or(0.0),
                unit: item.unit,
                rate: item.rate,
                gst_percent: item.gst_percent.value().unwrap_or(0.0),
                amount: item.amount,
            })
            .collect();

        let products = raw
            .products
            .into_iter()
            .map(|p| AdvertisedProduct {
                name: p.name,
                description: p.description,
                specifications: p.specifications.map(Into::into).unwrap_or_default(),
                images: p
                    .images
                    .into_iter()
                    .map(|img| ProductImage {
                        url: img.url,
                        is_primary: img.is_primary,
                    })
                    .collect(),
            })
            .collect();

        Ok(Quotation {
            reference_number: raw.reference_number,
            date,
            client_name: raw.client_name,
            items,
            payment_terms: raw.payment_terms,
            offer_validity: raw.offer_validity,
            products,
        })
    }
}
