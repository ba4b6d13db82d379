//! Pagination parsing from raw query strings.
//!
//! Every recognized key is checked independently so a caller sees all the
//! bad fields in one response rather than fixing them one at a time.

use url::form_urlencoded;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Page selection for listing operations. Both fields are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Parse `page` and `limit` out of a raw query string.
///
/// Absent or empty keys take their defaults. Unknown keys are ignored and
/// the first occurrence of a repeated key wins. On failure the returned
/// list holds one message per offending key, prefixed with the key name.
pub fn parse_pagination(raw_query: Option<&str>) -> Result<Pagination, Vec<String>> {
    let mut page: Option<String> = None;
    let mut limit: Option<String> = None;

    for (key, value) in form_urlencoded::parse(raw_query.unwrap_or_default().as_bytes()) {
        let slot = match key.as_ref() {
            "page" => &mut page,
            "limit" => &mut limit,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    let mut errors = Vec::new();
    let page = parse_positive("page", page.as_deref(), DEFAULT_PAGE, &mut errors);
    let limit = parse_positive("limit", limit.as_deref(), DEFAULT_LIMIT, &mut errors);

    if errors.is_empty() {
        Ok(Pagination { page, limit })
    } else {
        Err(errors)
    }
}

fn parse_positive(key: &str, raw: Option<&str>, default: u64, errors: &mut Vec<String>) -> u64 {
    let raw = match raw.map(str::trim) {
        None | Some("") => return default,
        Some(raw) => raw,
    };
    match raw.parse::<u64>() {
        Ok(0) => {
            errors.push(format!("{key}: must be a positive integer, got 0"));
            default
        }
        Ok(value) => value,
        Err(e) => {
            errors.push(format!("{key}: invalid value {raw:?}: {e}"));
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(parse_pagination(None).unwrap(), Pagination::default());
        assert_eq!(parse_pagination(Some("")).unwrap(), Pagination::default());
        assert_eq!(
            parse_pagination(Some("sort=desc")).unwrap(),
            Pagination { page: 1, limit: 10 }
        );
    }

    #[test]
    fn test_parses_both_keys() {
        assert_eq!(
            parse_pagination(Some("page=3&limit=25")).unwrap(),
            Pagination { page: 3, limit: 25 }
        );
    }

    #[test]
    fn test_one_key_defaults_the_other() {
        assert_eq!(
            parse_pagination(Some("limit=50")).unwrap(),
            Pagination { page: 1, limit: 50 }
        );
        assert_eq!(
            parse_pagination(Some("page=4&limit=")).unwrap(),
            Pagination { page: 4, limit: 10 }
        );
    }

    #[test]
    fn test_non_numeric_limit_is_reported() {
        let errors = parse_pagination(Some("page=2&limit=ten")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("limit: "));
    }

    #[test]
    fn test_all_bad_fields_reported_together() {
        let errors = parse_pagination(Some("page=abc&limit=-5")).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("page: "));
        assert!(errors[1].starts_with("limit: "));
    }

    #[test]
    fn test_zero_rejected() {
        let errors = parse_pagination(Some("page=0")).unwrap_err();
        assert_eq!(errors, vec!["page: must be a positive integer, got 0".to_string()]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(
            parse_pagination(Some("page=2&page=nope")).unwrap(),
            Pagination { page: 2, limit: 10 }
        );
    }

    #[test]
    fn test_percent_encoded_values() {
        assert_eq!(
            parse_pagination(Some("page=%32&limit=%35")).unwrap(),
            Pagination { page: 2, limit: 5 }
        );
    }
}
