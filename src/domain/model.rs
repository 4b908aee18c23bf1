use crate::utils::error::{Result, TogrowError};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// 與年份無關的月/日，依日曆順序比較 (先月後日)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// 建立並驗證月/日；二月允許 29 日。
    pub fn new(month: u32, day: u32) -> Result<Self> {
        match days_in_month(month) {
            Some(max_day) if (1..=max_day).contains(&day) => Ok(Self { month, day }),
            _ => Err(TogrowError::InvalidDate { month, day }),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// 前一天 (跨月、跨年)。區間標籤只用在節氣起始日上，
    /// 二月以平年 28 日計。
    pub fn previous_day(&self) -> Self {
        if self.day > 1 {
            return Self {
                month: self.month,
                day: self.day - 1,
            };
        }

        let month = if self.month == 1 { 12 } else { self.month - 1 };
        let day = match month {
            2 => 28,
            m => days_in_month(m).unwrap_or(31),
        };
        Self { month, day }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}月{}日", self.month, self.day)
    }
}

fn days_in_month(month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => Some(29),
        _ => None,
    }
}

/// 二十四節氣之一：名稱、起始月日與說明文字。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolarTerm {
    pub name: String,
    pub start: MonthDay,
    pub description: String,
}

impl SolarTerm {
    pub fn new(name: impl Into<String>, start: MonthDay, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start,
            description: description.into(),
        }
    }
}

/// 節氣對應的種植季節 (回應中的 `nextPlanting`)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlantingSeason {
    #[serde(rename = "春季种植季节")]
    Spring,
    #[serde(rename = "夏季种植季节")]
    Summer,
    #[serde(rename = "秋季种植季节")]
    Autumn,
    #[serde(rename = "冬季休整期")]
    WinterRest,
}

impl PlantingSeason {
    const SPRING_TERMS: [&'static str; 6] = ["立春", "雨水", "惊蛰", "春分", "清明", "谷雨"];
    const SUMMER_TERMS: [&'static str; 6] = ["立夏", "小满", "芒种", "夏至", "小暑", "大暑"];
    const AUTUMN_TERMS: [&'static str; 6] = ["立秋", "处暑", "白露", "秋分", "寒露", "霜降"];

    /// 未列入春夏秋的名稱 (含未知名稱) 一律歸為冬季休整期。
    pub fn for_term(term_name: &str) -> Self {
        if Self::SPRING_TERMS.contains(&term_name) {
            Self::Spring
        } else if Self::SUMMER_TERMS.contains(&term_name) {
            Self::Summer
        } else if Self::AUTUMN_TERMS.contains(&term_name) {
            Self::Autumn
        } else {
            Self::WinterRest
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Spring => "春季种植季节",
            Self::Summer => "夏季种植季节",
            Self::Autumn => "秋季种植季节",
            Self::WinterRest => "冬季休整期",
        }
    }
}

/// 某日期所屬的節氣，每次查詢重新計算。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTerm {
    pub name: String,
    pub date_range: String,
    pub description: String,
    pub season: PlantingSeason,
}

/// 植物指南目錄中的一筆記錄；由儲存層擁有，核心只讀。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantGuide {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: i64,
    pub suitable_terms: Vec<String>,
    pub image_url: Option<String>,
}

impl PlantGuide {
    /// 精確比對節氣名稱，不做同義詞轉換。
    pub fn suits(&self, term_name: &str) -> bool {
        self.suitable_terms.iter().any(|term| term == term_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_day_validation() {
        assert!(MonthDay::new(2, 29).is_ok());
        assert!(MonthDay::new(4, 30).is_ok());
        assert!(MonthDay::new(12, 31).is_ok());

        assert!(matches!(
            MonthDay::new(2, 30),
            Err(TogrowError::InvalidDate { month: 2, day: 30 })
        ));
        assert!(MonthDay::new(4, 31).is_err());
        assert!(MonthDay::new(0, 10).is_err());
        assert!(MonthDay::new(13, 1).is_err());
        assert!(MonthDay::new(6, 0).is_err());
    }

    #[test]
    fn test_month_day_ordering_follows_calendar() {
        let jan_31 = MonthDay::new(1, 31).unwrap();
        let feb_1 = MonthDay::new(2, 1).unwrap();
        let dec_22 = MonthDay::new(12, 22).unwrap();

        assert!(jan_31 < feb_1);
        assert!(feb_1 < dec_22);
    }

    #[test]
    fn test_previous_day_wraps_month_and_year() {
        let jan_5 = MonthDay::new(1, 5).unwrap();
        assert_eq!(jan_5.previous_day(), MonthDay::new(1, 4).unwrap());

        let jan_1 = MonthDay::new(1, 1).unwrap();
        assert_eq!(jan_1.previous_day(), MonthDay::new(12, 31).unwrap());

        let mar_1 = MonthDay::new(3, 1).unwrap();
        assert_eq!(mar_1.previous_day(), MonthDay::new(2, 28).unwrap());

        let may_1 = MonthDay::new(5, 1).unwrap();
        assert_eq!(may_1.previous_day(), MonthDay::new(4, 30).unwrap());
    }

    #[test]
    fn test_month_day_display() {
        assert_eq!(MonthDay::new(12, 22).unwrap().to_string(), "12月22日");
    }

    #[test]
    fn test_planting_season_for_term() {
        assert_eq!(PlantingSeason::for_term("清明"), PlantingSeason::Spring);
        assert_eq!(PlantingSeason::for_term("大暑"), PlantingSeason::Summer);
        assert_eq!(PlantingSeason::for_term("霜降"), PlantingSeason::Autumn);
        assert_eq!(PlantingSeason::for_term("冬至"), PlantingSeason::WinterRest);
        assert_eq!(PlantingSeason::for_term("不存在的节气"), PlantingSeason::WinterRest);
        assert_eq!(PlantingSeason::Autumn.label(), "秋季种植季节");
    }
}
