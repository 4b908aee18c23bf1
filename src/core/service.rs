use crate::core::calendar::SolarTermCalendar;
use crate::core::matcher::{match_guides, GuideLimit};
use crate::domain::model::{PlantGuide, ResolvedTerm};
use crate::domain::ports::{ConfigProvider, PlantCatalog};
use crate::utils::error::{Result, TogrowError};
use crate::utils::validation::validate_utc_offset;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use std::sync::Arc;

/// 中國標準時間 (UTC+8)。
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// 節氣日曆 + 植物目錄的組合，供 HTTP / 雲函數等轉接層共用。
pub struct GuideService {
    calendar: SolarTermCalendar,
    catalog: Arc<dyn PlantCatalog>,
    offset: FixedOffset,
    default_limit: GuideLimit,
}

impl GuideService {
    pub fn new(catalog: Arc<dyn PlantCatalog>) -> Self {
        Self {
            calendar: SolarTermCalendar::new(),
            catalog,
            offset: china_standard_time(),
            default_limit: GuideLimit::default(),
        }
    }

    pub fn from_config<C: ConfigProvider>(catalog: Arc<dyn PlantCatalog>, config: &C) -> Result<Self> {
        let limit = config.default_guide_limit();
        Ok(Self::new(catalog)
            .with_utc_offset_hours(config.utc_offset_hours())?
            .with_default_limit(GuideLimit::Bounded(limit)))
    }

    pub fn with_calendar(mut self, calendar: SolarTermCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_utc_offset_hours(mut self, hours: i32) -> Result<Self> {
        validate_utc_offset("utc_offset_hours", hours)?;
        self.offset = FixedOffset::east_opt(hours * 3600).ok_or_else(|| TogrowError::ConfigError {
            message: format!("Invalid UTC offset: {} hours", hours),
        })?;
        Ok(self)
    }

    pub fn with_default_limit(mut self, limit: GuideLimit) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn calendar(&self) -> &SolarTermCalendar {
        &self.calendar
    }

    pub fn default_limit(&self) -> GuideLimit {
        self.default_limit
    }

    /// 以設定的時區取得今天日期。
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }

    pub fn current_term(&self) -> ResolvedTerm {
        self.term_for(self.today())
    }

    pub fn term_for(&self, date: NaiveDate) -> ResolvedTerm {
        self.calendar.resolve_date(date)
    }

    /// 每次呼叫都重新讀取目錄，不做快取。
    pub async fn guides_for_term(&self, term: &str, limit: GuideLimit) -> Result<Vec<PlantGuide>> {
        let catalog = self.catalog.load_guides().await?;
        let guides: Vec<PlantGuide> = match_guides(term, &catalog, limit)
            .into_iter()
            .cloned()
            .collect();

        tracing::info!("Found {} plants for term: {}", guides.len(), term);
        Ok(guides)
    }

    pub async fn guides_for_date(
        &self,
        date: NaiveDate,
        limit: GuideLimit,
    ) -> Result<(ResolvedTerm, Vec<PlantGuide>)> {
        let resolved = self.term_for(date);
        let guides = self.guides_for_term(&resolved.name, limit).await?;
        Ok((resolved, guides))
    }
}

fn china_standard_time() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::InMemoryCatalog;

    fn guide(name: &str, difficulty: i64, terms: &[&str]) -> PlantGuide {
        PlantGuide {
            id: name.to_string(),
            name: name.to_string(),
            description: String::new(),
            difficulty,
            suitable_terms: terms.iter().map(|t| t.to_string()).collect(),
            image_url: None,
        }
    }

    fn service() -> GuideService {
        let catalog = InMemoryCatalog::new(vec![
            guide("番茄", 2, &["春分", "清明", "谷雨"]),
            guide("草莓", 3, &["惊蛰", "春分", "清明"]),
            guide("生菜", 1, &["立春", "雨水", "惊蛰"]),
        ]);
        GuideService::new(Arc::new(catalog))
    }

    #[test]
    fn test_guides_for_date_resolves_then_matches() {
        let service = service();
        let date = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();

        let (resolved, guides) =
            tokio_test::block_on(service.guides_for_date(date, GuideLimit::default())).unwrap();

        assert_eq!(resolved.name, "清明");
        let names: Vec<&str> = guides.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["番茄", "草莓"]);
    }

    #[test]
    fn test_guides_for_term_respects_limit() {
        let service = service();
        let guides =
            tokio_test::block_on(service.guides_for_term("春分", GuideLimit::Bounded(1))).unwrap();
        assert_eq!(guides.len(), 1);
        assert_eq!(guides[0].name, "番茄");
    }

    #[test]
    fn test_utc_offset_is_validated() {
        assert!(service().with_utc_offset_hours(-5).is_ok());
        assert!(service().with_utc_offset_hours(20).is_err());
    }

    #[test]
    fn test_current_term_matches_today() {
        let service = service();
        assert_eq!(service.current_term(), service.term_for(service.today()));
    }
}
