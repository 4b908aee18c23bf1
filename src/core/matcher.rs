use crate::domain::model::PlantGuide;

pub const DEFAULT_GUIDE_LIMIT: usize = 6;

/// 回傳筆數上限。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideLimit {
    Bounded(usize),
    Unbounded,
}

impl GuideLimit {
    /// 來自外部的有號數值：<= 0 視為空結果。
    pub fn from_signed(limit: i64) -> Self {
        if limit <= 0 {
            Self::Bounded(0)
        } else {
            Self::Bounded(usize::try_from(limit).unwrap_or(usize::MAX))
        }
    }
}

impl Default for GuideLimit {
    fn default() -> Self {
        Self::Bounded(DEFAULT_GUIDE_LIMIT)
    }
}

/// 篩出適合 `term` 的指南，依難度由低到高穩定排序後截斷。
///
/// 難度相同時保留目錄原本的順序；輸入記錄不會被修改。
pub fn match_guides<'a>(
    term: &str,
    catalog: &'a [PlantGuide],
    limit: GuideLimit,
) -> Vec<&'a PlantGuide> {
    if limit == GuideLimit::Bounded(0) {
        return Vec::new();
    }

    let mut matched: Vec<&PlantGuide> = catalog.iter().filter(|guide| guide.suits(term)).collect();
    matched.sort_by_key(|guide| guide.difficulty);

    if let GuideLimit::Bounded(max) = limit {
        matched.truncate(max);
    }

    tracing::debug!(
        "Matched {} of {} plant guides for term {}",
        matched.len(),
        catalog.len(),
        term
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide(id: &str, name: &str, difficulty: i64, terms: &[&str]) -> PlantGuide {
        PlantGuide {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            difficulty,
            suitable_terms: terms.iter().map(|t| t.to_string()).collect(),
            image_url: None,
        }
    }

    fn sample_catalog() -> Vec<PlantGuide> {
        vec![
            guide("1", "番茄", 2, &["春分", "清明", "谷雨"]),
            guide("2", "生菜", 1, &["立春", "雨水", "惊蛰"]),
        ]
    }

    #[test]
    fn test_matches_only_suitable_guides() {
        let catalog = sample_catalog();
        let result = match_guides("清明", &catalog, GuideLimit::default());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "番茄");
        assert_eq!(result[0].difficulty, 2);
    }

    #[test]
    fn test_unknown_term_and_empty_catalog_yield_empty() {
        let catalog = sample_catalog();
        assert!(match_guides("不存在的节气", &catalog, GuideLimit::default()).is_empty());
        assert!(match_guides("清明", &[], GuideLimit::default()).is_empty());
    }

    #[test]
    fn test_term_match_is_exact() {
        let catalog = vec![guide("1", "韭菜", 1, &["清明 ", "Qingming"])];
        assert!(match_guides("清明", &catalog, GuideLimit::Unbounded).is_empty());
        assert!(match_guides("qingming", &catalog, GuideLimit::Unbounded).is_empty());
    }

    #[test]
    fn test_sort_is_stable_for_equal_difficulty() {
        let catalog = vec![
            guide("a", "甲", 3, &["春分"]),
            guide("b", "乙", 1, &["春分"]),
            guide("c", "丙", 3, &["春分"]),
            guide("d", "丁", 1, &["春分"]),
        ];
        let names: Vec<&str> = match_guides("春分", &catalog, GuideLimit::Unbounded)
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, vec!["乙", "丁", "甲", "丙"]);
    }

    #[test]
    fn test_limit_truncates() {
        let catalog: Vec<PlantGuide> = (0..10)
            .map(|i| guide(&i.to_string(), &format!("plant-{}", i), 10 - i, &["谷雨"]))
            .collect();

        let result = match_guides("谷雨", &catalog, GuideLimit::default());
        assert_eq!(result.len(), DEFAULT_GUIDE_LIMIT);
        assert_eq!(result[0].difficulty, 1);

        assert_eq!(match_guides("谷雨", &catalog, GuideLimit::Bounded(3)).len(), 3);
        assert_eq!(match_guides("谷雨", &catalog, GuideLimit::Unbounded).len(), 10);
        assert!(match_guides("谷雨", &catalog, GuideLimit::Bounded(0)).is_empty());
    }

    #[test]
    fn test_limit_from_signed() {
        assert_eq!(GuideLimit::from_signed(-3), GuideLimit::Bounded(0));
        assert_eq!(GuideLimit::from_signed(0), GuideLimit::Bounded(0));
        assert_eq!(GuideLimit::from_signed(4), GuideLimit::Bounded(4));
    }

    #[test]
    fn test_catalog_is_not_mutated() {
        let catalog = vec![
            guide("1", "草莓", 3, &["清明"]),
            guide("2", "番茄", 2, &["清明"]),
        ];
        let before = catalog.clone();
        let _ = match_guides("清明", &catalog, GuideLimit::default());
        assert_eq!(catalog, before);
    }
}
