//! Sort key normalisation for fiscal-year strings.
//!
//! Assessment years are stored as `"YYYY-YY"`, with digits written either in
//! ASCII (`"2022-23"`) or in Bengali numerals (`"২০২২-২৩"`). Ordering uses the
//! starting year only, so both spellings of the same year sort together.
//!
//! The key is used for ordering and never replaces the displayed string.

const BENGALI_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

/// Map a Bengali digit glyph to its ASCII counterpart.
fn bengali_to_ascii(c: char) -> Option<char> {
    BENGALI_DIGITS
        .iter()
        .position(|&b| b == c)
        .map(|i| (b'0' + i as u8) as char)
}

/// Compute the ordering key of an assessment year.
///
/// Input: `"2022-23"`, `"২০২১-২২"`, `" 2019 -20"`, `"FY2020-21"`
/// Output: `2022`, `2021`, `2019`, `2020`
///
/// # Algorithm
///
/// 1. Take the text before the first `-` (the whole string if none).
/// 2. Translate Bengali digits `০`–`৯` to `0`–`9`.
/// 3. Drop every character that is not an ASCII digit.
/// 4. Parse; no digits left (or a value too large to represent) gives `0`.
pub fn fiscal_year_key(assessment_year: &str) -> u64 {
    let head = assessment_year.split('-').next().unwrap_or("");
    let digits: String = head
        .chars()
        .map(|c| bengali_to_ascii(c).unwrap_or(c))
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Render ASCII digits as Bengali numerals, leaving other characters alone.
pub fn to_bengali_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => BENGALI_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

/// Assessment years offered by the article form.
///
/// ASCII years `2015-16` through `2022-23`, followed by Bengali-digit years
/// `২০২২-২৩` through `২০৫০-৫১`.
pub fn assessment_year_options() -> Vec<String> {
    let span = |y: u32| format!("{}-{:02}", y, (y + 1) % 100);
    let mut years: Vec<String> = (2015..2023).map(span).collect();
    years.extend((2022..2051).map(|y| to_bengali_digits(&span(y))));
    years
}
