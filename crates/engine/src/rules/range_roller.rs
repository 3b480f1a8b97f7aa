//! Uniform sampling from textual numeric ranges.
//!
//! Benchmark tables write ranges as "12-14", "5/7", "3–5" (en dash) or
//! signed as "+1/+3", "-2/+2". A single number is a fixed value.

use std::sync::OnceLock;

use crate::infrastructure::ports::RandomPort;

static SIGNED_INT_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();

fn signed_int_regex() -> &'static regex_lite::Regex {
    SIGNED_INT_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"[+-]?\d+").expect("SIGNED_INT_REGEX pattern is invalid")
    })
}

/// Split an unsigned range on `/`, `-` or an en dash into its endpoints.
fn endpoints(range: &str) -> Option<Vec<i32>> {
    let parts: Vec<&str> = range
        .split(['/', '-', '–'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    parts.iter().map(|p| p.parse::<i32>().ok()).collect()
}

/// Roll an unsigned range.
///
/// Two endpoints give a uniform value in `[min, max]`, one endpoint is
/// returned as is, anything else is `None`.
pub fn roll_uniform(range: &str, rng: &dyn RandomPort) -> Option<i32> {
    match endpoints(range)?.as_slice() {
        [value] => Some(*value),
        [a, b] => Some(rng.gen_range(*a.min(b), *a.max(b))),
        _ => None,
    }
}

/// Roll a signed range by sampling between the smallest and largest
/// signed integer found in the text.
pub fn roll_signed(range: &str, rng: &dyn RandomPort) -> Option<i32> {
    let mut values: Vec<i32> = signed_int_regex()
        .find_iter(range)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    values.sort_unstable();
    let (min, max) = (*values.first()?, *values.last()?);
    Some(rng.gen_range(min, max))
}

/// Parse a `"<major>/<severe>"` threshold pair.
pub fn parse_pair(text: &str) -> Option<(i32, i32)> {
    let (major, severe) = text.split_once('/')?;
    Some((major.trim().parse().ok()?, severe.trim().parse().ok()?))
}
