use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub streak: u32,
    pub total_days: usize,
    pub avg_daily: f64,
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Summarizes a user's history from their stored streak and every day's total.
pub fn summarize(streak: u32, daily_totals: &[f64]) -> Stats {
    let total_days = daily_totals.len();
    let avg_daily = if total_days == 0 {
        0.0
    } else {
        round_to_tenth(daily_totals.iter().sum::<f64>() / total_days as f64)
    };

    Stats {
        streak,
        total_days,
        avg_daily,
    }
}
