use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use togrow::core::MonthDay;
use togrow::SolarTermCalendar;

/// 2024 是閏年，涵蓋全部 366 個月/日組合。
fn every_day_of_leap_year() -> Vec<MonthDay> {
    let mut days = Vec::new();
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    while date.year() == 2024 {
        days.push(MonthDay::new(date.month(), date.day()).unwrap());
        date = date.succ_opt().unwrap();
    }
    days
}

#[test]
fn test_every_day_resolves_to_exactly_one_term() {
    let calendar = SolarTermCalendar::new();
    let days = every_day_of_leap_year();
    assert_eq!(days.len(), 366);

    let mut counts: HashMap<String, usize> = HashMap::new();
    for day in &days {
        let resolved = calendar.resolve(*day);
        assert!(
            calendar.term(&resolved.name).is_some(),
            "{} resolved to unknown term {}",
            day,
            resolved.name
        );
        *counts.entry(resolved.name).or_default() += 1;
    }

    // 每個節氣至少涵蓋一天，且總天數剛好是一整年
    assert_eq!(counts.len(), 24);
    assert_eq!(counts.values().sum::<usize>(), 366);
}

#[test]
fn test_ranges_are_contiguous_without_gaps_or_overlap() {
    let calendar = SolarTermCalendar::new();
    let days = every_day_of_leap_year();

    // 依日期走一遍，節氣只能在起始日切換，且依表中順序前進
    let mut transitions = 0;
    for pair in days.windows(2) {
        let today = calendar.resolve(pair[0]).name;
        let tomorrow = calendar.resolve(pair[1]).name;
        if today != tomorrow {
            transitions += 1;
            let next = calendar.next_term(&today).unwrap();
            assert_eq!(next.name, tomorrow);
            assert_eq!(next.start, pair[1]);
        }
    }

    // 12/31 -> 1/1 不換節氣 (冬至跨年)，所以一年內只有 24 次切換
    assert_eq!(transitions, 24);
}

#[test]
fn test_each_start_date_belongs_to_its_own_term() {
    let calendar = SolarTermCalendar::new();
    for term in calendar.terms() {
        assert_eq!(calendar.resolve(term.start).name, term.name);
        assert_ne!(
            calendar.resolve(term.start.previous_day()).name,
            term.name,
            "day before {} should belong to the previous term",
            term.name
        );
    }
}

#[test]
fn test_early_january_wraps_to_last_term() {
    let calendar = SolarTermCalendar::new();
    let last = calendar.terms().last().unwrap().name.clone();
    assert_eq!(last, "冬至");

    for day in 1..=4 {
        let resolved = calendar.resolve(MonthDay::new(1, day).unwrap());
        assert_eq!(resolved.name, last);
        assert_eq!(resolved.date_range, "12月22日-1月4日");
    }
}

#[test]
fn test_winter_solstice_boundaries() {
    let calendar = SolarTermCalendar::new();
    assert_eq!(calendar.resolve(MonthDay::new(12, 22).unwrap()).name, "冬至");
    assert_eq!(calendar.resolve(MonthDay::new(1, 4).unwrap()).name, "冬至");
    assert_eq!(calendar.resolve(MonthDay::new(1, 5).unwrap()).name, "小寒");
}

#[test]
fn test_invalid_dates_are_rejected() {
    assert!(MonthDay::new(2, 30).is_err());
    assert!(MonthDay::new(11, 31).is_err());
    assert!(MonthDay::new(0, 1).is_err());
    assert!(MonthDay::new(12, 32).is_err());
}
