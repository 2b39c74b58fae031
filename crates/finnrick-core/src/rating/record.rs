use serde::{Deserialize, Serialize};

use crate::rating::grade::{Grade, classify_score};

pub const DEFAULT_COMPANY_NAME: &str = "Unknown Brand";
pub const DEFAULT_PRODUCT_NAME: &str = "Product";

/// One catalog entry as returned by the remote API.
///
/// Only the fields the widget consumes are modelled; anything else in the
/// response body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Normalized view consumed by the renderer.
///
/// Always fully populated: either derived from a [`RawProduct`] or the
/// constant [`RatingRecord::fallback`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    pub grade: Grade,
    pub label: String,
    pub company_name: String,
    pub product_name: String,
    pub test_count: u32,
    pub last_test_date: String,
}

impl RatingRecord {
    /// Builds a record from a fetched product.
    ///
    /// Blank brand/title strings count as absent.
    pub fn from_product(product: &RawProduct, test_count: u32, last_test_date: String) -> Self {
        let grade = classify_score(product.rating);
        Self {
            grade,
            label: grade.label().to_string(),
            company_name: non_blank(product.brand.as_deref(), DEFAULT_COMPANY_NAME),
            product_name: non_blank(product.title.as_deref(), DEFAULT_PRODUCT_NAME),
            test_count,
            last_test_date,
        }
    }

    /// Placeholder shown when the catalog cannot be reached.
    pub fn fallback() -> Self {
        Self {
            grade: Grade::B,
            label: Grade::B.label().to_string(),
            company_name: "Sample Company".to_string(),
            product_name: "Sample Product".to_string(),
            test_count: 5,
            last_test_date: "19 Feb 2025".to_string(),
        }
    }
}

fn non_blank(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
