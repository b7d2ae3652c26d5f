//! The item catalog rule table.
//!
//! One [`RowRule`] per required column. The evaluator walks this table
//! uniformly, so adding a rule means adding an entry here and nothing else.

use crate::catalog::RowRef;
use crate::types::{
    CatalogField, AVAILABILITY_IN_STOCK, AVAILABILITY_OUT_OF_STOCK, BLOCKED_IN_STOCK,
    BLOCKED_UNAVAILABLE, LONGTAIL_NO, LONGTAIL_YES, UNDEFINED_SELLER,
};

use super::checks::{
    is_catalog_timestamp, is_category_path, is_float_literal, is_https_link, is_integer_literal,
    is_one_of, within_length,
};
use super::rules::RowRule;

pub const MAX_ID_LEN: u64 = 50;
pub const MAX_SELLER_ID_LEN: u64 = 50;
pub const MAX_SELLER_NAME_LEN: u64 = 200;
pub const MAX_TITLE_LEN: u64 = 200;
pub const MAX_LINK_LEN: u64 = 2000;
pub const MAX_CATEGORY_LEN: u64 = 750;
pub const MAX_BRAND_LEN: u64 = 70;

const LONGTAIL_VALUES: &[&str] = &[LONGTAIL_YES, LONGTAIL_NO];
const AVAILABILITY_VALUES: &[&str] = &[AVAILABILITY_IN_STOCK, AVAILABILITY_OUT_OF_STOCK];
const BLOCKED_VALUES: &[&str] = &[BLOCKED_IN_STOCK, BLOCKED_UNAVAILABLE];

/// Rules in catalog column order.
static CATALOG_RULES: [RowRule; 17] = [
    RowRule {
        name: "wellformed_id",
        field: CatalogField::Id,
        description: "id is required and at most 50 characters",
        check: check_id,
    },
    RowRule {
        name: "wellformed_seller_id",
        field: CatalogField::SellerId,
        description: "seller_id is required and at most 50 characters",
        check: check_seller_id,
    },
    RowRule {
        name: "wellformed_seller_name",
        field: CatalogField::SellerName,
        description: "seller_name is required (at most 200 characters) unless blocked is \
                      'unavailable', in which case it must be 'undefined'",
        check: check_seller_name,
    },
    RowRule {
        name: "wellformed_title",
        field: CatalogField::Title,
        description: "title is required and at most 200 characters",
        check: check_title,
    },
    RowRule {
        name: "wellformed_normal_price",
        field: CatalogField::NormalPrice,
        description: "normal_price is empty or an integer",
        check: check_normal_price,
    },
    RowRule {
        name: "wellformed_price_pc",
        field: CatalogField::PricePc,
        description: "price_pc is empty or a float",
        check: check_price_pc,
    },
    RowRule {
        name: "wellformed_link",
        field: CatalogField::Link,
        description: "link is a required https URL of at most 2000 characters",
        check: check_link,
    },
    RowRule {
        name: "wellformed_image_link",
        field: CatalogField::ImageLink,
        description: "image_link is a required https URL of at most 2000 characters",
        check: check_image_link,
    },
    RowRule {
        name: "wellformed_category",
        field: CatalogField::Category,
        description: "category is required, at most 750 characters, with '>' between levels",
        check: check_category,
    },
    RowRule {
        name: "wellformed_review_count",
        field: CatalogField::ReviewCount,
        description: "review_count is empty or an integer",
        check: check_review_count,
    },
    RowRule {
        name: "wellformed_rating",
        field: CatalogField::Rating,
        description: "rating is empty or a float",
        check: check_rating,
    },
    RowRule {
        name: "wellformed_shipping",
        field: CatalogField::Shipping,
        description: "shipping is empty or a float",
        check: check_shipping,
    },
    RowRule {
        name: "wellformed_brand",
        field: CatalogField::Brand,
        description: "brand is required and at most 70 characters",
        check: check_brand,
    },
    RowRule {
        name: "wellformed_longtail_yn",
        field: CatalogField::LongtailYn,
        description: "longtail_yn is 'Y' or 'N'",
        check: check_longtail_yn,
    },
    RowRule {
        name: "wellformed_updated_at",
        field: CatalogField::UpdatedAt,
        description: "updated_at is formatted as YYYY-MM-DD HH:MM:SS.ffffff",
        check: check_updated_at,
    },
    RowRule {
        name: "wellformed_availability",
        field: CatalogField::Availability,
        description: "availability is empty, 'in_stock' or 'out_of_stock'",
        check: check_availability,
    },
    RowRule {
        name: "wellformed_blocked",
        field: CatalogField::Blocked,
        description: "blocked is empty, 'in_stock' or 'unavailable'",
        check: check_blocked,
    },
];

/// The full rule table for item catalogs.
pub fn catalog_rules() -> &'static [RowRule] {
    &CATALOG_RULES
}

/// Look up the rule for one column.
pub fn rule_for(field: CatalogField) -> Option<&'static RowRule> {
    CATALOG_RULES.iter().find(|r| r.field == field)
}

// ---------------------------------------------------------------------------
// Shared shapes
// ---------------------------------------------------------------------------

fn required_within(row: &RowRef<'_>, field: CatalogField, max: u64) -> bool {
    row.value(field).is_some_and(|v| within_length(v, max))
}

fn optional_integer(row: &RowRef<'_>, field: CatalogField) -> bool {
    row.value(field).map_or(true, is_integer_literal)
}

fn optional_float(row: &RowRef<'_>, field: CatalogField) -> bool {
    row.value(field).map_or(true, is_float_literal)
}

fn required_link(row: &RowRef<'_>, field: CatalogField) -> bool {
    row.value(field)
        .is_some_and(|v| is_https_link(v, MAX_LINK_LEN))
}

fn optional_one_of(row: &RowRef<'_>, field: CatalogField, allowed: &[&str]) -> bool {
    row.value(field).map_or(true, |v| is_one_of(v, allowed))
}

// ---------------------------------------------------------------------------
// Per-column checks
// ---------------------------------------------------------------------------

fn check_id(row: &RowRef<'_>) -> bool {
    required_within(row, CatalogField::Id, MAX_ID_LEN)
}

fn check_seller_id(row: &RowRef<'_>) -> bool {
    required_within(row, CatalogField::SellerId, MAX_SELLER_ID_LEN)
}

/// Depends on `blocked`: an unavailable seller is recorded under the
/// `undefined` sentinel. Any other `blocked` value is the `blocked` rule's
/// problem, so this rule lets it through.
fn check_seller_name(row: &RowRef<'_>) -> bool {
    // A missing-marker `blocked` resolves to `None`: the row is not blocked.
    match row.value(CatalogField::Blocked) {
        None | Some(BLOCKED_IN_STOCK) => {
            required_within(row, CatalogField::SellerName, MAX_SELLER_NAME_LEN)
        }
        Some(BLOCKED_UNAVAILABLE) => row.value(CatalogField::SellerName) == Some(UNDEFINED_SELLER),
        Some(_) => true,
    }
}

fn check_title(row: &RowRef<'_>) -> bool {
    required_within(row, CatalogField::Title, MAX_TITLE_LEN)
}

fn check_normal_price(row: &RowRef<'_>) -> bool {
    optional_integer(row, CatalogField::NormalPrice)
}

fn check_price_pc(row: &RowRef<'_>) -> bool {
    optional_float(row, CatalogField::PricePc)
}

fn check_link(row: &RowRef<'_>) -> bool {
    required_link(row, CatalogField::Link)
}

fn check_image_link(row: &RowRef<'_>) -> bool {
    required_link(row, CatalogField::ImageLink)
}

fn check_category(row: &RowRef<'_>) -> bool {
    row.value(CatalogField::Category)
        .is_some_and(|v| within_length(v, MAX_CATEGORY_LEN) && is_category_path(v))
}

fn check_review_count(row: &RowRef<'_>) -> bool {
    optional_integer(row, CatalogField::ReviewCount)
}

fn check_rating(row: &RowRef<'_>) -> bool {
    optional_float(row, CatalogField::Rating)
}

fn check_shipping(row: &RowRef<'_>) -> bool {
    optional_float(row, CatalogField::Shipping)
}

fn check_brand(row: &RowRef<'_>) -> bool {
    required_within(row, CatalogField::Brand, MAX_BRAND_LEN)
}

fn check_longtail_yn(row: &RowRef<'_>) -> bool {
    row.value(CatalogField::LongtailYn)
        .is_some_and(|v| is_one_of(v, LONGTAIL_VALUES))
}

fn check_updated_at(row: &RowRef<'_>) -> bool {
    row.value(CatalogField::UpdatedAt)
        .is_some_and(is_catalog_timestamp)
}

fn check_availability(row: &RowRef<'_>) -> bool {
    optional_one_of(row, CatalogField::Availability, AVAILABILITY_VALUES)
}

fn check_blocked(row: &RowRef<'_>) -> bool {
    optional_one_of(row, CatalogField::Blocked, BLOCKED_VALUES)
}
