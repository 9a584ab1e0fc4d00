//! Dashboard feedback derived from a day's emissions and the trailing week.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::activity::EmissionResult;
use crate::models::log_entry::LogEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rating {
    Excellent,
    Good,
    Moderate,
    High,
}

impl Rating {
    pub fn for_total(total: f64) -> Self {
        if total < 5.0 {
            Rating::Excellent
        } else if total < 10.0 {
            Rating::Good
        } else if total < 15.0 {
            Rating::Moderate
        } else {
            Rating::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Badge {
    Streak3,
    Streak7,
    Streak30,
    LowFootprint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyComparison {
    pub dates: Vec<NaiveDate>,
    pub totals: Vec<f64>,
    pub change_percent: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub rating: Rating,
    pub suggestions: Vec<&'static str>,
    pub badges: Vec<Badge>,
    pub weekly: WeeklyComparison,
}

pub fn suggestions(co2: &EmissionResult) -> Vec<&'static str> {
    let mut tips = Vec::new();
    if co2.travel > 5.0 {
        tips.push("Try walking or using public transport more often.");
    }
    if co2.energy > 5.0 {
        tips.push("Limit AC and washing machine time where possible.");
    }
    if co2.diet > 10.0 {
        tips.push("Swap one meat or dairy meal for a plant-based alternative tomorrow.");
    }
    if co2.total < 5.0 {
        tips.push("Super low footprint! Keep it up!");
    }
    if tips.is_empty() {
        tips.push("You're on track. Small steps matter!");
    }
    tips
}

pub fn badges(streak: u32, today_total: f64) -> Vec<Badge> {
    let mut earned = Vec::new();
    if streak >= 3 {
        earned.push(Badge::Streak3);
    }
    if streak >= 7 {
        earned.push(Badge::Streak7);
    }
    if streak >= 30 {
        earned.push(Badge::Streak30);
    }
    if today_total < 5.0 {
        earned.push(Badge::LowFootprint);
    }
    earned
}

/// Compares the last three days of the week ending `today` against the four before them.
/// Positive `change_percent` means the footprint went down.
pub fn weekly_comparison(today: NaiveDate, logs: &[LogEntry]) -> WeeklyComparison {
    let dates: Vec<NaiveDate> = (0..7).rev().map(|i| today - Duration::days(i)).collect();
    let totals: Vec<f64> = dates
        .iter()
        .map(|date| {
            logs.iter()
                .find(|log| log.date == *date)
                .map_or(0.0, |log| log.co2.total)
        })
        .collect();

    let (older, recent) = totals.split_at(4);
    let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;
    let older_avg = mean(older);
    let change_percent = if older_avg == 0.0 {
        0
    } else {
        ((older_avg - mean(recent)) / older_avg * 100.0).round() as i64
    };

    WeeklyComparison {
        dates,
        totals,
        change_percent,
    }
}

pub fn build(today: NaiveDate, today_co2: &EmissionResult, streak: u32, weekly_logs: &[LogEntry]) -> Insights {
    Insights {
        rating: Rating::for_total(today_co2.total),
        suggestions: suggestions(today_co2),
        badges: badges(streak, today_co2.total),
        weekly: weekly_comparison(today, weekly_logs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::ActivityRecord;
    use chrono::Utc;
    use uuid::Uuid;

    fn result(travel: f64, energy: f64, diet: f64) -> EmissionResult {
        EmissionResult {
            travel,
            energy,
            diet,
            total: travel + energy + diet,
        }
    }

    fn log_on(date: NaiveDate, total: f64) -> LogEntry {
        LogEntry {
            user_id: Uuid::nil(),
            date,
            activity: ActivityRecord::default(),
            co2: result(total, 0.0, 0.0),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn rating_thresholds() {
        assert_eq!(Rating::for_total(0.0), Rating::Excellent);
        assert_eq!(Rating::for_total(4.99), Rating::Excellent);
        assert_eq!(Rating::for_total(5.0), Rating::Good);
        assert_eq!(Rating::for_total(10.0), Rating::Moderate);
        assert_eq!(Rating::for_total(15.0), Rating::High);
    }

    #[test]
    fn suggestions_follow_each_category() {
        let tips = suggestions(&result(6.0, 6.0, 11.0));
        assert_eq!(tips.len(), 3);
        assert!(tips[0].contains("public transport"));

        let tips = suggestions(&result(1.0, 1.0, 1.0));
        assert_eq!(tips, vec!["Super low footprint! Keep it up!"]);

        let tips = suggestions(&result(3.0, 3.0, 3.0));
        assert_eq!(tips, vec!["You're on track. Small steps matter!"]);
    }

    #[test]
    fn badges_by_streak_and_footprint() {
        assert!(badges(0, 12.0).is_empty());
        assert_eq!(badges(7, 12.0), vec![Badge::Streak3, Badge::Streak7]);
        assert_eq!(
            badges(30, 1.0),
            vec![Badge::Streak3, Badge::Streak7, Badge::Streak30, Badge::LowFootprint]
        );
    }

    #[test]
    fn weekly_comparison_reports_reduction() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let logs: Vec<LogEntry> = (0..7)
            .map(|i| {
                let date = today - Duration::days(i);
                // last three days at 5, earlier four at 10
                log_on(date, if i < 3 { 5.0 } else { 10.0 })
            })
            .collect();

        let weekly = weekly_comparison(today, &logs);
        assert_eq!(weekly.dates.first(), Some(&(today - Duration::days(6))));
        assert_eq!(weekly.dates.last(), Some(&today));
        assert_eq!(weekly.change_percent, 50);
    }

    #[test]
    fn weekly_comparison_fills_missing_days_with_zero() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let weekly = weekly_comparison(today, &[log_on(today, 8.0)]);
        assert_eq!(weekly.totals, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 8.0]);
        assert_eq!(weekly.change_percent, 0);
    }
}
