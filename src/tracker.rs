use crate::models::{FlowerEntry, IntakeRecord, PersistedState};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use thiserror::Error;

/// Water needed to grow one flower (ml).
pub const FLOWER_THRESHOLD_ML: u64 = 1000;
/// Value the intake field is reset to after every recorded drink.
pub const DEFAULT_INPUT_ML: u64 = 250;
pub const DAILY_GOAL_ML: u64 = 2000;
pub const FLOWER_ICON: &str = "🌸";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("please enter a valid amount of water")]
    InvalidAmount,
    #[error("only the immediately preceding single entry may be undone; record a new drink first")]
    UndoNotAllowed,
    #[error("there is no record to undo")]
    NothingToUndo,
    #[error("not enough water in the bucket yet, {missing} ml still needed")]
    BucketTooLow { missing: u64 },
}

/// Whether the last action may be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndoGate {
    #[default]
    Blocked,
    Armed,
}

/// Owns the intake log, the bucket and the garden.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    records: Vec<IntakeRecord>,
    bucket_level: u64,
    garden: Vec<FlowerEntry>,
    undo: UndoGate,
}

impl Tracker {
    /// Undo permission never survives a load.
    pub fn load(state: PersistedState) -> Self {
        Self {
            records: state.records,
            bucket_level: state.bucket_level,
            garden: state.garden,
            undo: UndoGate::Blocked,
        }
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            records: self.records.clone(),
            bucket_level: self.bucket_level,
            garden: self.garden.clone(),
        }
    }

    pub fn records(&self) -> &[IntakeRecord] {
        &self.records
    }

    pub fn bucket_level(&self) -> u64 {
        self.bucket_level
    }

    pub fn garden(&self) -> &[FlowerEntry] {
        &self.garden
    }

    pub fn undo_gate(&self) -> UndoGate {
        self.undo
    }

    pub fn can_water(&self) -> bool {
        self.bucket_level >= FLOWER_THRESHOLD_ML
    }

    pub fn add_intake<Tz>(&mut self, input: &str, now: &DateTime<Tz>) -> Result<IntakeRecord, TrackerError>
    where
        Tz: TimeZone,
    {
        let amount = parse_amount(input)?;
        let record = IntakeRecord {
            timestamp: now.timestamp_millis(),
            amount,
        };
        self.records.push(record);
        self.bucket_level = self.bucket_level.saturating_add(amount);
        self.undo = UndoGate::Armed;
        Ok(record)
    }

    pub fn undo_last(&mut self) -> Result<IntakeRecord, TrackerError> {
        if self.undo != UndoGate::Armed {
            return Err(TrackerError::UndoNotAllowed);
        }
        let record = self.records.pop().ok_or(TrackerError::NothingToUndo)?;
        // A conversion may have drained the bucket since the add.
        self.bucket_level = self.bucket_level.saturating_sub(record.amount);
        self.undo = UndoGate::Blocked;
        Ok(record)
    }

    pub fn water_flower<Tz>(&mut self, now: &DateTime<Tz>) -> Result<FlowerEntry, TrackerError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if !self.can_water() {
            return Err(TrackerError::BucketTooLow {
                missing: FLOWER_THRESHOLD_ML - self.bucket_level,
            });
        }
        self.bucket_level -= FLOWER_THRESHOLD_ML;
        let flower = FlowerEntry {
            date: now.format("%a %b %d %Y").to_string(),
            timestamp: now.timestamp_millis(),
        };
        self.garden.push(flower.clone());
        Ok(flower)
    }
}

/// Accepts a trimmed positive integer, nothing else.
pub fn parse_amount(input: &str) -> Result<u64, TrackerError> {
    match input.trim().parse::<u64>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(TrackerError::InvalidAmount),
    }
}
