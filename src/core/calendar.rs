use crate::domain::model::{MonthDay, PlantingSeason, ResolvedTerm, SolarTerm};
use crate::utils::error::{Result, TogrowError};
use chrono::NaiveDate;

/// 標準節氣表：(名稱, 起始月, 起始日, 說明)，依日曆順序排列。
/// 每個節氣涵蓋 `[起始日, 下一節氣起始日)`，冬至跨年延續到小寒前一天。
const STANDARD_TERMS: [(&str, u32, u32, &str); 24] = [
    ("小寒", 1, 5, "开始进入寒冷季节"),
    ("大寒", 1, 20, "一年中最冷的时期"),
    ("立春", 2, 4, "春季的开始，万物复苏"),
    ("雨水", 2, 19, "降雨开始，雨量渐增"),
    ("惊蛰", 3, 5, "春雷乍动，惊醒蛰伏的昆虫"),
    ("春分", 3, 20, "昼夜平分，春季中期"),
    ("清明", 4, 5, "天气清爽明朗，祭祀祖先"),
    ("谷雨", 4, 20, "雨生百谷，播种好时节"),
    ("立夏", 5, 5, "夏季的开始，气温升高"),
    ("小满", 5, 21, "夏熟作物籽粒开始饱满"),
    ("芒种", 6, 5, "有芒的谷物可以种植"),
    ("夏至", 6, 21, "一年中白昼最长的一天"),
    ("小暑", 7, 7, "开始进入炎热季节"),
    ("大暑", 7, 22, "一年中最热的时期"),
    ("立秋", 8, 7, "秋季的开始，暑去凉来"),
    ("处暑", 8, 23, "炎热天气结束"),
    ("白露", 9, 7, "天气转凉，开始有露水"),
    ("秋分", 9, 23, "昼夜平分，秋季中期"),
    ("寒露", 10, 8, "露水更冷，将要结霜"),
    ("霜降", 10, 23, "开始有霜，气温下降"),
    ("立冬", 11, 7, "冬季的开始，万物收藏"),
    ("小雪", 11, 22, "开始下雪，但雪量不大"),
    ("大雪", 12, 7, "雪量增大，地面可能积雪"),
    ("冬至", 12, 22, "一年中白昼最短的一天"),
];

/// 二十四節氣日曆。建構後不可變，可在多個請求間共享。
#[derive(Debug, Clone)]
pub struct SolarTermCalendar {
    terms: Vec<SolarTerm>,
}

impl SolarTermCalendar {
    pub fn new() -> Self {
        let mut terms: Vec<SolarTerm> = STANDARD_TERMS
            .iter()
            .filter_map(|&(name, month, day, description)| {
                MonthDay::new(month, day)
                    .ok()
                    .map(|start| SolarTerm::new(name, start, description))
            })
            .collect();
        terms.sort_by_key(|term| term.start);

        Self { terms }
    }

    /// 以自訂節氣表建立日曆；表不可為空，起始日不可重複。
    pub fn from_terms(mut terms: Vec<SolarTerm>) -> Result<Self> {
        if terms.is_empty() {
            return Err(TogrowError::ConfigError {
                message: "Solar term table cannot be empty".to_string(),
            });
        }

        terms.sort_by_key(|term| term.start);

        if let Some(pair) = terms.windows(2).find(|pair| pair[0].start == pair[1].start) {
            return Err(TogrowError::ConfigError {
                message: format!(
                    "Solar terms '{}' and '{}' share the start date {}",
                    pair[0].name, pair[1].name, pair[0].start
                ),
            });
        }

        Ok(Self { terms })
    }

    /// 依起始日排序的節氣。
    pub fn terms(&self) -> &[SolarTerm] {
        &self.terms
    }

    pub fn term(&self, name: &str) -> Option<&SolarTerm> {
        self.terms.iter().find(|term| term.name == name)
    }

    /// 緊接在 `name` 之後的節氣 (最後一個之後回到第一個)。
    pub fn next_term(&self, name: &str) -> Option<&SolarTerm> {
        let index = self.terms.iter().position(|term| term.name == name)?;
        Some(&self.terms[(index + 1) % self.terms.len()])
    }

    pub fn resolve(&self, date: MonthDay) -> ResolvedTerm {
        let index = self.active_index(date);
        let term = &self.terms[index];

        tracing::debug!("Resolved {} to solar term {}", date, term.name);

        ResolvedTerm {
            name: term.name.clone(),
            date_range: self.date_range_label(index),
            description: term.description.clone(),
            season: PlantingSeason::for_term(&term.name),
        }
    }

    /// 忽略年份，只看月/日。
    pub fn resolve_date(&self, date: NaiveDate) -> ResolvedTerm {
        self.resolve(MonthDay::from_date(date))
    }

    /// 起始日 <= date 的最後一個節氣；早於第一個起始日時回到表尾 (跨年的節氣)。
    fn active_index(&self, date: MonthDay) -> usize {
        let started = self.terms.partition_point(|term| term.start <= date);
        if started == 0 {
            self.terms.len() - 1
        } else {
            started - 1
        }
    }

    fn date_range_label(&self, index: usize) -> String {
        let start = self.terms[index].start;
        let next_start = self.terms[(index + 1) % self.terms.len()].start;
        format!("{}-{}", start, next_start.previous_day())
    }
}

impl Default for SolarTermCalendar {
    fn default() -> Self {
        Self::new()
    }
}
