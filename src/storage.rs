use crate::errors::AppError;
use crate::models::{FlowerEntry, IntakeRecord, PersistedState};
use std::{
    collections::BTreeMap,
    io::Write,
    path::Path,
};
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{error, warn};

pub const RECORDS_KEY: &str = "waterRecords";
pub const BUCKET_KEY: &str = "bucketAmount";
pub const GARDEN_KEY: &str = "flowerGarden";

/// On-disk key-value store: every slot holds a string, like browser local storage.
pub type Slots = BTreeMap<String, String>;

pub async fn load_data(path: &Path) -> PersistedState {
    decode_slots(&read_slots(path).await)
}

pub async fn persist_data(path: &Path, state: &PersistedState) -> Result<(), AppError> {
    let slots = encode_slots(state)?;
    let payload = serde_json::to_vec_pretty(&slots).map_err(AppError::internal)?;

    // All slots go out in one file swap, so the log and the bucket can
    // never be saved out of step.
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || atomic_write(&path, &payload))
        .await
        .map_err(AppError::internal)?
        .map_err(AppError::internal)
}

/// Temp file in the target's directory, synced, then renamed over the target.
fn atomic_write(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(payload)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

async fn read_slots(path: &Path) -> Slots {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(slots) => slots,
            Err(err) => {
                error!("failed to parse data file: {err}");
                Slots::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Slots::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Slots::default()
        }
    }
}

/// Each slot falls back to its empty value on its own.
pub fn decode_slots(slots: &Slots) -> PersistedState {
    PersistedState {
        records: decode_list::<IntakeRecord>(slots, RECORDS_KEY),
        bucket_level: slots
            .get(BUCKET_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0),
        garden: decode_list::<FlowerEntry>(slots, GARDEN_KEY),
    }
}

pub fn encode_slots(state: &PersistedState) -> Result<Slots, AppError> {
    let mut slots = Slots::new();
    slots.insert(
        RECORDS_KEY.to_string(),
        serde_json::to_string(&state.records).map_err(AppError::internal)?,
    );
    slots.insert(BUCKET_KEY.to_string(), state.bucket_level.to_string());
    slots.insert(
        GARDEN_KEY.to_string(),
        serde_json::to_string(&state.garden).map_err(AppError::internal)?,
    );
    Ok(slots)
}

fn decode_list<T: serde::de::DeserializeOwned>(slots: &Slots, key: &str) -> Vec<T> {
    let Some(raw) = slots.get(key) else {
        return Vec::new();
    };
    serde_json::from_str(raw).unwrap_or_else(|err| {
        warn!("discarding unreadable {key} slot: {err}");
        Vec::new()
    })
}
