//! Pure conversions from a single argument token to a typed value.
//!
//! These never know which option they serve; mapping a failure to a
//! user-facing message is the caller's job.

use std::ops::RangeInclusive;

/// Separator between the bounds of a range token, as in `1..5`.
pub const RANGE_SEPARATOR: &str = "..";

/// Most integers a single range token may expand to.
pub const MAX_RANGE_LEN: usize = 1 << 20;

/// Separator between key and value of a map token.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Signed decimal integer. An optional leading `+` or `-` is accepted.
pub fn to_int(token: &str) -> Option<i64> {
    token.parse().ok()
}

/// 64-bit float, including exponents and `inf`/`NaN` spellings.
pub fn to_float(token: &str) -> Option<f64> {
    token.parse().ok()
}

pub fn to_bool(token: &str) -> Option<bool> {
    match token {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Split `lo..hi` at the first separator. `None` if the token is not a range.
pub fn split_range(token: &str) -> Option<(&str, &str)> {
    token.split_once(RANGE_SEPARATOR)
}

/// Parse both bounds of a range token. Reversed ranges and ranges longer
/// than [`MAX_RANGE_LEN`] are rejected.
pub fn expand_range(lo: &str, hi: &str) -> Option<RangeInclusive<i64>> {
    let lo = to_int(lo)?;
    let hi = to_int(hi)?;
    if lo > hi {
        return None;
    }
    range_len(lo, hi).filter(|&n| n <= MAX_RANGE_LEN)?;
    Some(lo..=hi)
}

/// Number of integers in `lo..=hi`, `None` if it does not fit a `usize`.
fn range_len(lo: i64, hi: i64) -> Option<usize> {
    let span = hi.checked_sub(lo)?;
    usize::try_from(span).ok()?.checked_add(1)
}

/// Convert one integer-list token: either a single integer or an inclusive
/// ascending range.
pub fn to_ints(token: &str) -> Option<Vec<i64>> {
    match split_range(token) {
        Some((lo, hi)) => {
            let range = expand_range(lo, hi)?;
            let mut out = Vec::new();
            out.try_reserve_exact(range_len(*range.start(), *range.end())?)
                .ok()?;
            out.extend(range);
            Some(out)
        }
        None => to_int(token).map(|n| vec![n]),
    }
}

/// Split `key=value` at the first `=`. The value may itself contain `=` or
/// be empty.
pub fn split_key_value(token: &str) -> Option<(&str, &str)> {
    token.split_once(KEY_VALUE_SEPARATOR)
}
