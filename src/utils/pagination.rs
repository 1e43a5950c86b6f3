use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, params: &PaginationParams) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        Self {
            total,
            limit,
            offset,
            has_more: offset + limit < total,
        }
    }
}

/// Query-string pagination. Values arrive as strings because these params are
/// flattened into filter structs.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(20),
            offset: Some(0),
            page: None,
        }
    }
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page {
            (page.max(1) - 1) * self.limit()
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_and_offset() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        let params = PaginationParams {
            limit: Some(1000),
            offset: None,
            page: None,
        };
        assert_eq!(params.limit(), 100);

        let params = PaginationParams {
            limit: Some(0),
            offset: None,
            page: None,
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_page_overrides_offset() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(55),
            page: Some(3),
        };
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn test_meta_has_more() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(0),
            page: None,
        };
        let meta = PaginationMeta::new(25, &params);
        assert!(meta.has_more);

        let params = PaginationParams {
            limit: Some(10),
            offset: Some(20),
            page: None,
        };
        let meta = PaginationMeta::new(25, &params);
        assert!(!meta.has_more);
    }
}
