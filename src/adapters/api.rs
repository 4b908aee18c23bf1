//! 對外 API 契約：查詢參數解析與回應格式。
//!
//! HTTP 伺服器與雲函數兩種轉接層都經過這裡，核心函式不接觸任何線路格式。
//! 查無植物時回傳 200 與空陣列，而不是 404。

use crate::core::matcher::GuideLimit;
use crate::core::service::GuideService;
use crate::domain::model::{PlantGuide, PlantingSeason, ResolvedTerm};
use crate::utils::error::{Result, TogrowError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolarTermQuery {
    pub date: Option<String>,
}

/// `term` 與 `season` 兩個名稱都接受，`term` 優先。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantGuideQuery {
    pub term: Option<String>,
    pub season: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarTermResponse {
    pub date: String,
    pub solar_term: String,
    pub date_range: String,
    pub description: String,
    pub next_planting: PlantingSeason,
}

impl SolarTermResponse {
    pub fn new(date: NaiveDate, resolved: ResolvedTerm) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            solar_term: resolved.name,
            date_range: resolved.date_range,
            description: resolved.description,
            next_planting: resolved.season,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantGuideDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: i64,
    pub suitable_season: Vec<String>,
    pub image_url: Option<String>,
}

impl From<PlantGuide> for PlantGuideDto {
    fn from(guide: PlantGuide) -> Self {
        Self {
            id: guide.id,
            name: guide.name,
            description: guide.description,
            difficulty: guide.difficulty,
            suitable_season: guide.suitable_terms,
            image_url: guide.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

pub fn health() -> HealthResponse {
    HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

/// 以狀態碼加訊息表示的錯誤，各轉接層再轉成自己的回應型別。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_INTERNAL_ERROR,
            message: message.into(),
        }
    }

    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "message": self.message })
    }
}

impl From<TogrowError> for ApiError {
    fn from(err: TogrowError) -> Self {
        if err.is_client_error() {
            Self::bad_request(err.to_string())
        } else {
            tracing::error!("Request failed: {} (Category: {:?})", err, err.category());
            Self::internal(err.user_friendly_message())
        }
    }
}

/// `YYYY-MM-DD`，也接受 ISO 時間戳 (只取日期部分)。
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| TogrowError::InvalidQueryError {
        field: "date".to_string(),
        value: raw.to_string(),
        reason: format!("expected YYYY-MM-DD ({})", e),
    })
}

/// 缺省時使用 `default`；`all` 表示不限筆數；<= 0 得到空結果。
pub fn parse_limit(raw: Option<&str>, default: GuideLimit) -> Result<GuideLimit> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(default);
    };

    if raw.eq_ignore_ascii_case("all") {
        return Ok(GuideLimit::Unbounded);
    }

    raw.parse::<i64>()
        .map(GuideLimit::from_signed)
        .map_err(|_| TogrowError::InvalidQueryError {
            field: "limit".to_string(),
            value: raw.to_string(),
            reason: "expected an integer or 'all'".to_string(),
        })
}

pub fn solar_term(
    service: &GuideService,
    query: &SolarTermQuery,
) -> std::result::Result<SolarTermResponse, ApiError> {
    let date = match query.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => parse_date(raw)?,
        None => service.today(),
    };

    Ok(SolarTermResponse::new(date, service.term_for(date)))
}

pub async fn plant_guides(
    service: &GuideService,
    query: &PlantGuideQuery,
) -> std::result::Result<Vec<PlantGuideDto>, ApiError> {
    let term = query
        .term
        .as_deref()
        .or(query.season.as_deref())
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required query parameter: term"))?;

    let limit = parse_limit(query.limit.as_deref(), service.default_limit())?;
    let guides = service.guides_for_term(term, limit).await?;

    Ok(guides.into_iter().map(PlantGuideDto::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::InMemoryCatalog;
    use std::sync::Arc;

    fn service() -> GuideService {
        GuideService::new(Arc::new(InMemoryCatalog::seeded().unwrap()))
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-04-05").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 5).unwrap()
        );
        assert_eq!(
            parse_date("2025-04-05T10:00:00.000Z").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 5).unwrap()
        );
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_parse_limit() {
        let default = GuideLimit::default();
        assert_eq!(parse_limit(None, default).unwrap(), default);
        assert_eq!(parse_limit(Some(""), default).unwrap(), default);
        assert_eq!(parse_limit(Some("3"), default).unwrap(), GuideLimit::Bounded(3));
        assert_eq!(parse_limit(Some("0"), default).unwrap(), GuideLimit::Bounded(0));
        assert_eq!(parse_limit(Some("-2"), default).unwrap(), GuideLimit::Bounded(0));
        assert_eq!(parse_limit(Some("ALL"), default).unwrap(), GuideLimit::Unbounded);
        assert!(parse_limit(Some("six"), default).is_err());
    }

    #[test]
    fn test_solar_term_response_shape() {
        let query = SolarTermQuery {
            date: Some("2024-12-22".to_string()),
        };
        let response = solar_term(&service(), &query).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["date"], "2024-12-22");
        assert_eq!(json["solarTerm"], "冬至");
        assert_eq!(json["dateRange"], "12月22日-1月4日");
        assert_eq!(json["nextPlanting"], "冬季休整期");
    }

    #[test]
    fn test_solar_term_rejects_bad_date() {
        let query = SolarTermQuery {
            date: Some("2024-13-01".to_string()),
        };
        let err = solar_term(&service(), &query).unwrap_err();
        assert_eq!(err.status, STATUS_BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_plant_guides_requires_term() {
        let err = plant_guides(&service(), &PlantGuideQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.status, STATUS_BAD_REQUEST);
        assert_eq!(err.message, "Missing required query parameter: term");
    }

    #[tokio::test]
    async fn test_plant_guides_accepts_season_alias() {
        let query = PlantGuideQuery {
            season: Some("清明".to_string()),
            ..Default::default()
        };
        let guides = plant_guides(&service(), &query).await.unwrap();
        let names: Vec<&str> = guides.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["番茄", "草莓"]);

        let json = serde_json::to_value(&guides[0]).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["suitableSeason"], serde_json::json!(["春分", "清明", "谷雨"]));
    }

    #[tokio::test]
    async fn test_plant_guides_no_match_is_empty_list() {
        let query = PlantGuideQuery {
            term: Some("不存在的节气".to_string()),
            ..Default::default()
        };
        assert!(plant_guides(&service(), &query).await.unwrap().is_empty());
    }
}
