use serde::Deserialize;

use crate::error::AssetListError;

pub const DEFAULT_LIMIT: i32 = 10;
pub const DEFAULT_OFFSET: i32 = 0;

/// A validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParam {
    pub limit: i32,
    pub offset: i32,
    pub count: bool,
    pub filter: Option<String>,
}

impl Default for ListParam {
    fn default() -> Self {
        ListParam {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            count: true,
            filter: None,
        }
    }
}

impl ListParam {
    pub fn new(limit: i32, offset: i32) -> Self {
        ListParam {
            limit,
            offset,
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_owned());
        self
    }

    pub fn with_count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    pub fn validate(&self) -> Result<(), AssetListError> {
        if self.limit <= 0 {
            return Err(AssetListError::InvalidListParam(format!(
                "limit must be greater than 0, got {}",
                self.limit
            )));
        }
        if self.offset < 0 {
            return Err(AssetListError::InvalidListParam(format!(
                "offset must not be negative, got {}",
                self.offset
            )));
        }
        Ok(())
    }
}

/// Listing parameters as they arrive from a query string or command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawListParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub count: Option<String>,
    pub filter: Option<String>,
}

impl RawListParams {
    /// Lenient coercion: anything unusable falls back to the default, so the
    /// result always passes `ListParam::validate`.
    pub fn resolve(&self) -> ListParam {
        ListParam {
            limit: Self::positive_or(self.limit.as_deref(), DEFAULT_LIMIT),
            offset: Self::positive_or(self.offset.as_deref(), DEFAULT_OFFSET),
            count: Self::flag_or(self.count.as_deref(), true),
            filter: self.filter.clone(),
        }
    }

    fn positive_or(raw: Option<&str>, default: i32) -> i32 {
        match raw.map(str::parse::<i32>) {
            Some(Ok(n)) if n > 0 => n,
            _ => default,
        }
    }

    fn flag_or(raw: Option<&str>, default: bool) -> bool {
        match raw {
            Some(s) if !s.is_empty() => {
                matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1")
            }
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(limit: Option<&str>, offset: Option<&str>, count: Option<&str>) -> RawListParams {
        RawListParams {
            limit: limit.map(str::to_owned),
            offset: offset.map(str::to_owned),
            count: count.map(str::to_owned),
            filter: None,
        }
    }

    #[test]
    fn test_validate() {
        assert!(ListParam::new(1, 0).validate().is_ok());
        assert!(matches!(
            ListParam::new(0, 0).validate(),
            Err(AssetListError::InvalidListParam(_))
        ));
        assert!(matches!(
            ListParam::new(10, -1).validate(),
            Err(AssetListError::InvalidListParam(_))
        ));
    }

    #[test]
    fn test_absent_values_use_defaults() {
        let param = RawListParams::default().resolve();
        assert_eq!(param, ListParam::default());
        assert_eq!((param.limit, param.offset, param.count), (10, 0, true));
    }

    #[test]
    fn test_numbers() {
        let param = raw(Some("25"), Some("50"), None).resolve();
        assert_eq!((param.limit, param.offset), (25, 50));

        for bad in ["", "0", "-5", "abc", " 5", "1.5", "99999999999"] {
            let param = raw(Some(bad), Some(bad), None).resolve();
            assert_eq!((param.limit, param.offset), (10, 0), "input {bad:?}");
        }
    }

    #[test]
    fn test_count_flag() {
        for yes in ["true", "TRUE", " yes ", "1"] {
            assert!(raw(None, None, Some(yes)).resolve().count, "{yes:?}");
        }
        for no in ["false", "no", "0", "on", "2"] {
            assert!(!raw(None, None, Some(no)).resolve().count, "{no:?}");
        }
        assert!(raw(None, None, Some("")).resolve().count);
    }

    #[test]
    fn test_filter_passes_through() {
        let params = RawListParams {
            filter: Some("  version > 1 ".into()),
            ..Default::default()
        };
        assert_eq!(params.resolve().filter.as_deref(), Some("  version > 1 "));
    }

    #[test]
    fn test_deserialize_partial() {
        let params: RawListParams = serde_json::from_str(r#"{"limit": "5"}"#).unwrap();
        assert_eq!(params.limit.as_deref(), Some("5"));
        assert!(params.offset.is_none());
    }

    proptest! {
        #[test]
        fn prop_resolved_params_always_validate(
            limit in proptest::option::of(".{0,12}"),
            offset in proptest::option::of(".{0,12}"),
            count in proptest::option::of(".{0,6}"),
        ) {
            let params = RawListParams { limit, offset, count, filter: None };
            prop_assert!(params.resolve().validate().is_ok());
        }
    }
}
