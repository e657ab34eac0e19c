use crate::models::TrackerView;
use crate::stats::build_totals;
use crate::tracker::{Tracker, UndoGate, DAILY_GOAL_ML, DEFAULT_INPUT_ML, FLOWER_ICON, FLOWER_THRESHOLD_ML};
use chrono::{DateTime, TimeZone};

const EMPTY_GARDEN_MESSAGE: &str = "Your garden is still empty, go drink some water!";

/// Derives everything the page shows. Never mutates the tracker.
pub fn build_view<Tz: TimeZone>(tracker: &Tracker, now: &DateTime<Tz>) -> TrackerView {
    let totals = build_totals(tracker.records(), now);
    let bucket = tracker.bucket_level();
    let can_water = tracker.can_water();

    let water_hint = if can_water {
        format!("Ready! Water the flower ({FLOWER_THRESHOLD_ML} ml) to grow a new one")
    } else {
        format!("{} ml still needed to grow a new flower", FLOWER_THRESHOLD_ML - bucket)
    };

    let garden_message = tracker
        .garden()
        .is_empty()
        .then(|| EMPTY_GARDEN_MESSAGE.to_string());

    TrackerView {
        daily_ml: totals.daily,
        weekly_ml: totals.weekly,
        monthly_ml: totals.monthly,
        yearly_ml: totals.yearly,
        daily_goal_ml: DAILY_GOAL_ML,
        daily_goal_percent: capped_percent(totals.daily, DAILY_GOAL_ML),
        bucket_level_ml: bucket,
        bucket_fill_percent: capped_percent(bucket, FLOWER_THRESHOLD_ML * 2),
        can_water,
        water_hint,
        flower_icon: FLOWER_ICON.to_string(),
        flowers: tracker.garden().to_vec(),
        garden_message,
        can_undo: tracker.undo_gate() == UndoGate::Armed,
        input_default: DEFAULT_INPUT_ML,
    }
}

fn capped_percent(value: u64, capacity: u64) -> f64 {
    (value as f64 / capacity as f64).min(1.0) * 100.0
}
