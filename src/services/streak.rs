use chrono::NaiveDate;

/// Consecutive-day streak ending at the most recent log.
///
/// `dates` must be sorted most recent first. Repeated dates are collapsed into one day, and
/// the walk stops at the first gap longer than a day.
pub fn current_streak(dates: &[NaiveDate]) -> u32 {
    let Some(first) = dates.first() else {
        return 0;
    };

    let mut streak = 1;
    let mut current = *first;
    for previous in &dates[1..] {
        match (current - *previous).num_days() {
            0 => continue,
            1 => {
                streak += 1;
                current = *previous;
            }
            _ => break,
        }
    }
    streak
}
