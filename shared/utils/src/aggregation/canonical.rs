//! Product name canonicalization.
//!
//! Historical product names embed the vendor type and the region redundantly
//! in several inconsistent formats (`"A업체 - 보장분석 (서울/인천/경기)"`,
//! `"A - 보장분석"`, plain `"보장분석"`). These helpers reduce any of them to
//! one core name usable as a grouping key.

/// Vendor type in its suffixed display form: `"A"` -> `"A업체"`,
/// `"A업체"` unchanged.
pub fn with_vendor_suffix(db_type: &str) -> String {
    let trimmed = db_type.trim();
    if trimmed.ends_with("업체") {
        trimmed.to_string()
    } else {
        format!("{trimmed}업체")
    }
}

/// Vendor type with the `업체` suffix removed, if present.
pub fn without_vendor_suffix(db_type: &str) -> &str {
    let trimmed = db_type.trim();
    trimmed.strip_suffix("업체").unwrap_or(trimmed)
}

/// Strip a leading `"<vendor> - "` prefix, matching the vendor token
/// case-insensitively (ASCII only; the Korean suffix has no case). The
/// hyphen separator is required for the prefix to be recognized.
pub fn strip_vendor_prefix(name: &str, vendor: &str) -> String {
    let trimmed = name.trim();
    if vendor.is_empty() {
        return trimmed.to_string();
    }

    let mut rest = trimmed.chars();
    for expected in vendor.chars() {
        match rest.next() {
            Some(actual) if actual.eq_ignore_ascii_case(&expected) => {}
            _ => return trimmed.to_string(),
        }
    }

    match rest.as_str().trim_start().strip_prefix('-') {
        Some(after) => after.trim_start().to_string(),
        None => trimmed.to_string(),
    }
}

/// Reduce a raw product name to its canonical core.
///
/// Steps: drop a trailing `"(<region>)"` suffix, drop a leading
/// `"<vendor>업체 - "` prefix, then split on hyphens and drop any segment
/// that is just the vendor type again (in suffixed, unsuffixed, or
/// suffix-stripped form). Surviving segments are rejoined with `" - "`.
/// Empty input yields an empty string.
pub fn core_product_name(raw_name: &str, region: &str, db_type: &str) -> String {
    let mut name = raw_name.trim().to_string();

    let region = region.trim();
    if !region.is_empty() {
        let suffix = format!("({region})");
        if let Some(stripped) = name.strip_suffix(&suffix) {
            name = stripped.trim_end().to_string();
        }
    }

    let suffixed = with_vendor_suffix(db_type);
    name = strip_vendor_prefix(&name, &suffixed);

    let db_type = db_type.trim();
    let unsuffixed = without_vendor_suffix(db_type);

    name.split('-')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter(|part| *part != db_type && *part != suffixed && *part != unsuffixed)
        .collect::<Vec<_>>()
        .join(" - ")
}
