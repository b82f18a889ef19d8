//! Cell-level cleaning: string normalization, date parsing, URL sanity, list splitting.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{CordataError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    #[default]
    Keep,
    Upper,
    Lower,
}

/// Trim, apply NFKC and collapse inner whitespace runs to one space.
pub fn std_string(value: &str, case: Case) -> String {
    let normalized: String = value.trim().nfkc().collect();
    let collapsed = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
    match case {
        Case::Keep => collapsed,
        Case::Upper => collapsed.to_uppercase(),
        Case::Lower => collapsed.to_lowercase(),
    }
}

fn month_year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(0?[1-9]|1[0-2])/((?:19|20)[0-9]{2})$").expect("month/year pattern")
    })
}

fn year_month_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^((?:19|20)[0-9]{2})-(0?[1-9]|1[0-2])$").expect("year-month pattern")
    })
}

fn pub_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{4}$").expect("pub date pattern"))
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:https?://|ftp://|did:)[^\s/$.?#]+\.[^\s]*").expect("url pattern")
    })
}

fn first_of_month(year: &str, month: &str, raw: &str) -> Result<NaiveDate> {
    let malformed = || CordataError::MalformedDate {
        value: raw.to_string(),
    };
    let year: i32 = year.parse().map_err(|_| malformed())?;
    let month: u32 = month.parse().map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(malformed)
}

/// Normalize a month-precision date written `M/YYYY`, `MM/YYYY`, `YYYY-M` or `YYYY-MM`
/// to `YYYY-MM`. Blank input is `None`; anything else is a [`CordataError::MalformedDate`].
pub fn std_date(value: &str) -> Result<Option<String>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date = if let Some(caps) = month_year_pattern().captures(trimmed) {
        first_of_month(&caps[2], &caps[1], value)?
    } else if let Some(caps) = year_month_pattern().captures(trimmed) {
        first_of_month(&caps[1], &caps[2], value)?
    } else {
        return Err(CordataError::MalformedDate {
            value: value.to_string(),
        });
    };
    Ok(Some(date.format("%Y-%m").to_string()))
}

/// Publication dates are stored as `MM/YYYY`; returns the first day of that month.
pub fn parse_pub_date(value: &str) -> Result<NaiveDate> {
    let malformed = || CordataError::MalformedDate {
        value: value.to_string(),
    };
    if !pub_date_pattern().is_match(value) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(&format!("01/{value}"), "%d/%m/%Y").map_err(|_| malformed())
}

/// Record dates are `YYYY-MM-DD`.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CordataError::MalformedDate {
        value: value.to_string(),
    })
}

/// True when something is written but it does not look like a link.
pub fn is_bad_url(value: Option<&str>) -> bool {
    match value {
        Some(url) if !url.is_empty() => !url_pattern().is_match(url),
        _ => false,
    }
}

/// Split on `delimiter`, trimming each piece and dropping empty ones.
pub fn split_delimited(value: &str, delimiter: char) -> Vec<String> {
    value
        .split(delimiter)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_string_collapses_whitespace_and_normalizes() {
        assert_eq!(std_string("  Fonte   Boa\t(AM) ", Case::Keep), "Fonte Boa (AM)");
        assert_eq!(std_string("ﬁnanças", Case::Upper), "FINANÇAS");
        assert_eq!(std_string(" SAÚDE ", Case::Lower), "saúde");
    }

    #[test]
    fn std_date_accepts_both_layouts() {
        assert_eq!(std_date("3/2021").unwrap().as_deref(), Some("2021-03"));
        assert_eq!(std_date(" 11/1999 ").unwrap().as_deref(), Some("1999-11"));
        assert_eq!(std_date("2020-7").unwrap().as_deref(), Some("2020-07"));
        assert_eq!(std_date("").unwrap(), None);
    }

    #[test]
    fn std_date_rejects_unknown_layouts() {
        for raw in ["13/2020", "2020/05", "05/1850", "ontem"] {
            assert!(
                matches!(std_date(raw), Err(CordataError::MalformedDate { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn pub_date_requires_two_digit_month() {
        assert_eq!(
            parse_pub_date("04/2023").unwrap(),
            NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
        );
        assert!(parse_pub_date("4/2023").is_err());
        assert!(parse_pub_date("2023-04").is_err());
        assert!(parse_pub_date("4/20230").is_err());
        assert!(parse_pub_date("13/2023").is_err());
        assert!(parse_pub_date(" 04/2023").is_err());
    }

    #[test]
    fn bad_url_flags_text_without_scheme() {
        assert!(is_bad_url(Some("www.exemplo.gov.br")));
        assert!(!is_bad_url(Some("https://dados.gov.br/x")));
        assert!(!is_bad_url(Some("")));
        assert!(!is_bad_url(None));
    }

    #[test]
    fn split_drops_empty_entries() {
        assert_eq!(split_delimited(" a ; b;;c ;", ';'), vec!["a", "b", "c"]);
    }
}
