use serde::{Deserialize, Serialize};

/// One logged drinking event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRecord {
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Millilitres.
    pub amount: u64,
}

/// One grown flower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerEntry {
    pub date: String,
    pub timestamp: i64,
}

/// Everything that survives a reload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedState {
    pub records: Vec<IntakeRecord>,
    pub bucket_level: u64,
    pub garden: Vec<FlowerEntry>,
}

/// Raw quantity typed by the user. Browsers send text, scripts may send
/// numbers; anything else is kept so it can be refused as an invalid amount.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl Default for AmountInput {
    fn default() -> Self {
        AmountInput::Other(serde_json::Value::Null)
    }
}

impl AmountInput {
    pub fn into_text(self) -> String {
        match self {
            AmountInput::Text(text) => text,
            AmountInput::Number(value) => value.to_string(),
            AmountInput::Other(_) => String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IntakeRequest {
    #[serde(default)]
    pub amount: AmountInput,
}

#[derive(Debug, Deserialize)]
pub struct IntakeForm {
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackerView {
    pub daily_ml: u64,
    pub weekly_ml: u64,
    pub monthly_ml: u64,
    pub yearly_ml: u64,
    pub daily_goal_ml: u64,
    pub daily_goal_percent: f64,
    pub bucket_level_ml: u64,
    pub bucket_fill_percent: f64,
    pub can_water: bool,
    pub water_hint: String,
    pub flower_icon: String,
    pub flowers: Vec<FlowerEntry>,
    pub garden_message: Option<String>,
    pub can_undo: bool,
    pub input_default: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub message: Option<String>,
    pub view: TrackerView,
}
