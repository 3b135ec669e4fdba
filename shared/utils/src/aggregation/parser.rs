//! Legacy order summary parsing.
//!
//! Submissions created before structured order rows existed carry their
//! line items only as a display string:
//!
//! `"A업체 - [보장분석] 일반 (서울/인천/경기) (수량: 1, 금액: 80,000원)<br>..."`
//!
//! This is best-effort recovery of a semi-structured legacy encoding, not a
//! validated schema: anything the pattern does not recognize is skipped.

use regex::Regex;
use std::sync::LazyLock;

use leadform_models::NormalizedItem;

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>\s*").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// One encoded line item:
/// `<vendor> - [<category>] <name> (<region>) (수량: <qty>, 금액: <amount>원)`.
/// The vendor capture stops at the `|` separator so items after the first
/// do not swallow it.
static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([^-|]+)\s*-\s*\[([^\]]+)\]\s*([^(|]+)\s*\(([^)]+)\)\s*\(수량:\s*(\d+),\s*금액:\s*([\d,]+)원\)",
    )
    .unwrap()
});

/// Extract normalized line items from a legacy `items_summary` string.
///
/// Markup is reduced to plain text first: `<br>` variants become a `" | "`
/// separator, remaining tags are dropped, whitespace is collapsed. The item
/// pattern is then applied repeatedly over the cleaned text.
///
/// The category capture is used as the canonical product name; the
/// free-form tier text after it varies too much between historical entries
/// to group on. The vendor type is stored with its `업체` suffix removed.
///
/// Never fails: unparseable input yields an empty Vec.
pub fn parse_items_summary(items_summary: &str) -> Vec<NormalizedItem> {
    let with_separators = LINE_BREAK_RE.replace_all(items_summary, " | ");
    let without_tags = TAG_RE.replace_all(&with_separators, " ");
    let clean_text = WHITESPACE_RE.replace_all(&without_tags, " ");
    let clean_text = clean_text.trim();

    ITEM_RE
        .captures_iter(clean_text)
        .filter_map(|caps| {
            let quantity: i64 = caps[5].parse().ok()?;
            let total_price: i64 = caps[6].replace(',', "").parse().ok()?;

            let db_type = caps[1].trim();
            let db_type = db_type.strip_suffix("업체").unwrap_or(db_type);

            Some(NormalizedItem {
                db_type: db_type.to_string(),
                product_name: caps[2].trim().to_string(),
                region: caps[4].trim().to_string(),
                quantity,
                total_price,
            })
        })
        .collect()
}
