//! Column vocabulary of the item catalog and the literal values the rules
//! compare against.

use serde::Serialize;

/// 0-based position of a data row (the header is not counted).
pub type RowIndex = usize;

// ---------------------------------------------------------------------------
// Literal values
// ---------------------------------------------------------------------------

/// `seller_name` value required for rows whose `blocked` is `unavailable`.
pub const UNDEFINED_SELLER: &str = "undefined";

pub const BLOCKED_IN_STOCK: &str = "in_stock";
pub const BLOCKED_UNAVAILABLE: &str = "unavailable";

pub const AVAILABILITY_IN_STOCK: &str = "in_stock";
pub const AVAILABILITY_OUT_OF_STOCK: &str = "out_of_stock";

pub const LONGTAIL_YES: &str = "Y";
pub const LONGTAIL_NO: &str = "N";

/// Separator between levels of a category path, e.g. `Women>Shoes>Sneakers`.
pub const CATEGORY_SEPARATOR: char = '>';

/// Cell texts the loader treats as "no value".
///
/// The usual NA spellings dataframe exports write for empty cells.
/// Comparison is exact; no trimming or case folding.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns `true` if the raw cell text denotes an absent value.
pub fn is_missing_marker(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

// ---------------------------------------------------------------------------
// Catalog columns
// ---------------------------------------------------------------------------

/// One of the 17 columns an item catalog must declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogField {
    Id,
    SellerId,
    SellerName,
    Title,
    NormalPrice,
    PricePc,
    Link,
    ImageLink,
    Category,
    ReviewCount,
    Rating,
    Shipping,
    Brand,
    LongtailYn,
    UpdatedAt,
    Availability,
    Blocked,
}

impl CatalogField {
    /// Every required column, in the canonical catalog order.
    pub const ALL: [CatalogField; 17] = [
        Self::Id,
        Self::SellerId,
        Self::SellerName,
        Self::Title,
        Self::NormalPrice,
        Self::PricePc,
        Self::Link,
        Self::ImageLink,
        Self::Category,
        Self::ReviewCount,
        Self::Rating,
        Self::Shipping,
        Self::Brand,
        Self::LongtailYn,
        Self::UpdatedAt,
        Self::Availability,
        Self::Blocked,
    ];

    /// Column name as it appears in the catalog header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::SellerId => "seller_id",
            Self::SellerName => "seller_name",
            Self::Title => "title",
            Self::NormalPrice => "normal_price",
            Self::PricePc => "price_pc",
            Self::Link => "link",
            Self::ImageLink => "image_link",
            Self::Category => "category",
            Self::ReviewCount => "review_count",
            Self::Rating => "rating",
            Self::Shipping => "shipping",
            Self::Brand => "brand",
            Self::LongtailYn => "longtail_yn",
            Self::UpdatedAt => "updated_at",
            Self::Availability => "availability",
            Self::Blocked => "blocked",
        }
    }

    /// Look up a column by its header name (exact, case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl std::fmt::Display for CatalogField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
