//! Price text extraction and display formatting.
//!
//! Retailer markup mixes currency signs, thousands separators, decimals and
//! stray labels (`"Ex Tax: ৳50"`) into price cells. Extraction reduces that
//! to a whole-taka integer and rejects values outside the plausible window.

/// Smallest price accepted as a real listing. Lower values are placeholders
/// such as `"0"` or `"1"`.
pub const MIN_VALID_PRICE: u64 = 100;

/// Largest price accepted as a real listing. Higher values come from
/// mis-parsed markup, e.g. a sale and an original price read as one number.
pub const MAX_VALID_PRICE: u64 = 10_000_000;

const CURRENCY_PREFIX: &str = "৳ ";

/// Extracts a whole-taka price from raw price text.
///
/// Returns `0` when the text holds no number or the number falls outside
/// [`MIN_VALID_PRICE`]..=[`MAX_VALID_PRICE`]. A trailing one- or two-digit
/// decimal fraction (`"12,500.00"`) is discarded; every other `,` or `.` is a
/// grouping separator.
#[must_use]
pub fn extract_price(text: &str) -> u64 {
    if text.is_empty() {
        return 0;
    }

    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.'))
        .collect();

    let digits: String = strip_decimal_fraction(&kept)
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    // Empty or overflowing digit runs both land here.
    let Ok(value) = digits.parse::<u64>() else {
        return 0;
    };

    if (MIN_VALID_PRICE..=MAX_VALID_PRICE).contains(&value) {
        value
    } else {
        0
    }
}

/// Drops a trailing `.N` / `.NN` fraction, leaving grouping separators alone.
fn strip_decimal_fraction(kept: &str) -> &str {
    if let Some(dot) = kept.rfind('.') {
        let fraction = &kept[dot + 1..];
        if (1..=2).contains(&fraction.len()) && fraction.bytes().all(|b| b.is_ascii_digit()) {
            return &kept[..dot];
        }
    }
    kept
}

/// Formats a taka amount for display using South Asian digit grouping.
///
/// The last three digits form one group and the rest are grouped in pairs,
/// matching the `en-BD` locale: `125000` becomes `"৳ 1,25,000"`.
#[must_use]
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("{CURRENCY_PREFIX}{digits}");
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    groups.push(head);
    groups.reverse();

    format!("{CURRENCY_PREFIX}{},{tail}", groups.join(","))
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
