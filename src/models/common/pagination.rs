use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 列表默认每页条数
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// 每页条数上限，超出按上限截断
pub const MAX_PAGE_SIZE: i64 = 100;

// 分页查询参数，page/size 兼容字符串形式（如 ?page=2&size=50）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub size: Option<i64>,
}

impl PaginationQuery {
    /// 归一化为合法区间：page >= 1，1 <= size <= MAX_PAGE_SIZE
    pub fn normalized(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let size = self
            .size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, size)
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: None,
            size: None,
        }
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total as u64).div_ceil(page_size.max(1) as u64) as i64
        };
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }
}

/// 宽容的 i64 反序列化：同时接受数字与数字字符串
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("无法解析分页参数: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(flatten)]
        pagination: PaginationQuery,
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let w: Wrapper = serde_json::from_str(r#"{"page": 2, "size": "50"}"#).unwrap();
        assert_eq!(w.pagination.normalized(), (2, 50));
    }

    #[test]
    fn test_defaults_when_absent() {
        let w: Wrapper = serde_json::from_str("{}").unwrap();
        assert_eq!(w.pagination.normalized(), (1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_clamps_out_of_range() {
        let w: Wrapper = serde_json::from_str(r#"{"page": "-3", "size": 9999}"#).unwrap();
        assert_eq!(w.pagination.normalized(), (1, MAX_PAGE_SIZE));
    }

    #[test]
    fn test_rejects_garbage_string() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"page": "abc"}"#).is_err());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationInfo::new(1, 20, 0).total_pages, 0);
        assert_eq!(PaginationInfo::new(1, 20, 20).total_pages, 1);
        assert_eq!(PaginationInfo::new(1, 20, 21).total_pages, 2);
    }
}
