//! `YYMMDD` date helpers.
//!
//! The parser never guesses a century; it only checks that the six digits
//! form a calendar date in the 1900s or the 2000s. Resolving the century is
//! left to callers, and the resolvers here are one opt-in policy for doing so.

use chrono::{Datelike, Months, NaiveDate};

/// Split `YYMMDD` into two-digit year, month and day
fn split(yymmdd: &str) -> Option<(i32, u32, u32)> {
    if yymmdd.len() != 6 || !yymmdd.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = yymmdd[0..2].parse().ok()?;
    let month = yymmdd[2..4].parse().ok()?;
    let day = yymmdd[4..6].parse().ok()?;
    Some((year, month, day))
}

fn in_century(yymmdd: &str, century: i32) -> Option<NaiveDate> {
    let (year, month, day) = split(yymmdd)?;
    NaiveDate::from_ymd_opt(century + year, month, day)
}

/// Whether `yymmdd` is a real date in at least one of 19YY or 20YY
pub fn is_calendar_date(yymmdd: &str) -> bool {
    in_century(yymmdd, 1900).is_some() || in_century(yymmdd, 2000).is_some()
}

/// Resolve a birth date: the latest candidate not after `today`
pub fn resolve_birth_date(yymmdd: &str, today: NaiveDate) -> Option<NaiveDate> {
    match in_century(yymmdd, 2000) {
        Some(date) if date <= today => Some(date),
        _ => in_century(yymmdd, 1900),
    }
}

/// Resolve an expiry date: 20YY unless that lies more than `window_years`
/// beyond `today`, in which case 19YY
pub fn resolve_expiry_date(yymmdd: &str, today: NaiveDate, window_years: i32) -> Option<NaiveDate> {
    let horizon = u32::try_from(window_years.max(0))
        .ok()
        .and_then(|years| years.checked_mul(12))
        .and_then(|months| today.checked_add_months(Months::new(months)))
        .unwrap_or(NaiveDate::MAX);
    match in_century(yymmdd, 2000) {
        Some(date) if date <= horizon => Some(date),
        Some(date) => in_century(yymmdd, 1900).or(Some(date)),
        None => in_century(yymmdd, 1900),
    }
}

/// Whole years between `birth` and `on`
pub fn age_on(birth: NaiveDate, on: NaiveDate) -> Option<u32> {
    let mut years = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
