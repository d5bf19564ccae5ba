//! Form field coercion
//!
//! Admin and auth forms arrive as `application/x-www-form-urlencoded`
//! key/value pairs. These helpers apply the fixed coercion rules:
//!
//! | Kind | Missing | Rule |
//! |---|---|---|
//! | text | `""` | value as given |
//! | optional text | NULL | `""` becomes NULL |
//! | optional number | NULL | non-numeric or 0 becomes NULL |
//! | number-or-zero | 0 | non-numeric becomes 0 |
//! | checkbox | false | true iff value is `"on"` |
//!
//! Dates and enumerated values are parsed strictly; a bad value is a 400.

use chrono::NaiveDate;
use metamusic_common::db::Socials;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{ApiError, ApiResult};

/// Raw submitted form fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Required-looking text; missing becomes `""`
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn optional_text(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn optional_number(&self, key: &str) -> Option<i64> {
        self.get(key)
            .and_then(parse_number)
            .filter(|n| *n != 0)
    }

    pub fn number_or_zero(&self, key: &str) -> i64 {
        self.get(key).and_then(parse_number).unwrap_or(0)
    }

    pub fn checkbox(&self, key: &str) -> bool {
        self.get(key) == Some("on")
    }

    /// Optional `YYYY-MM-DD` date; empty is NULL
    pub fn optional_date(&self, key: &str) -> ApiResult<Option<NaiveDate>> {
        match self.optional_text(key) {
            None => Ok(None),
            Some(raw) => parse_date(key, &raw).map(Some),
        }
    }

    pub fn date(&self, key: &str) -> ApiResult<NaiveDate> {
        let raw = self.text(key);
        parse_date(key, &raw)
    }

    /// Enumerated field parsed via `FromStr`
    pub fn parsed<T>(&self, key: &str) -> ApiResult<T>
    where
        T: FromStr<Err = metamusic_common::Error>,
    {
        self.text(key).parse::<T>().map_err(ApiError::from)
    }

    /// Optional JSON object text, e.g. `{"instagram":"@x"}`
    pub fn optional_socials(&self, key: &str) -> ApiResult<Option<Socials>> {
        match self.optional_text(key) {
            None => Ok(None),
            Some(raw) => serde_json::from_str::<Socials>(&raw)
                .map(Some)
                .map_err(|e| ApiError::BadRequest(format!("Invalid {}: {}", key, e))),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FormFields {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Numeric parse that accepts integral floats like "2019.0"
fn parse_number(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
    })
}

fn parse_date(key: &str, raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid {}: {:?}", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use metamusic_common::db::{EntityKind, PlatformName};

    #[test]
    fn test_text_missing_is_empty() {
        let form = FormFields::default();
        assert_eq!(form.text("name"), "");
    }

    #[test]
    fn test_optional_text() {
        let form = FormFields::from([("bio", ""), ("country", "KR")]);
        assert_eq!(form.optional_text("bio"), None);
        assert_eq!(form.optional_text("country"), Some("KR".to_string()));
        assert_eq!(form.optional_text("image_url"), None);
    }

    #[test]
    fn test_optional_number() {
        let form = FormFields::from([("a", "2019"), ("b", "0"), ("c", "abc"), ("d", "")]);
        assert_eq!(form.optional_number("a"), Some(2019));
        assert_eq!(form.optional_number("b"), None);
        assert_eq!(form.optional_number("c"), None);
        assert_eq!(form.optional_number("d"), None);
        assert_eq!(form.optional_number("missing"), None);
    }

    #[test]
    fn test_number_or_zero() {
        let form = FormFields::from([("rank", "3"), ("bad", "x")]);
        assert_eq!(form.number_or_zero("rank"), 3);
        assert_eq!(form.number_or_zero("bad"), 0);
        assert_eq!(form.number_or_zero("missing"), 0);
    }

    #[test]
    fn test_checkbox_only_on_is_true() {
        let form = FormFields::from([("a", "on"), ("b", "true"), ("c", "")]);
        assert!(form.checkbox("a"));
        assert!(!form.checkbox("b"));
        assert!(!form.checkbox("c"));
        assert!(!form.checkbox("missing"));
    }

    #[test]
    fn test_dates() {
        let form = FormFields::from([("ok", "2024-03-01"), ("bad", "03/01/2024"), ("empty", "")]);
        assert_eq!(
            form.optional_date("ok").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(form.optional_date("empty").unwrap(), None);
        assert!(form.optional_date("bad").is_err());
        assert!(form.date("empty").is_err());
    }

    #[test]
    fn test_enums() {
        let form = FormFields::from([("type", "album"), ("platform_name", "Apple Music")]);
        assert_eq!(form.parsed::<EntityKind>("type").unwrap(), EntityKind::Album);
        assert_eq!(
            form.parsed::<PlatformName>("platform_name").unwrap(),
            PlatformName::AppleMusic
        );
        assert!(form.parsed::<EntityKind>("missing").is_err());
    }

    #[test]
    fn test_socials() {
        let form = FormFields::from([("socials", r#"{"instagram":"@band"}"#), ("bad", "nope")]);
        let socials = form.optional_socials("socials").unwrap().unwrap();
        assert_eq!(socials.get("instagram").map(String::as_str), Some("@band"));
        assert!(form.optional_socials("bad").is_err());
        assert_eq!(form.optional_socials("missing").unwrap(), None);
    }
}
