//! The minimal run-result record submitted at GameOver/Victory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lastlight_core::enums::Difficulty;

use crate::run_state::RunState;

/// Everything the leaderboard needs about a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub score: u32,
    pub nights_reached: u32,
    pub kills: u32,
    pub difficulty: Difficulty,
    pub victory: bool,
    pub seed: u64,
    pub timestamp: u64,
}

impl RunRecord {
    pub fn from_run(run: &RunState, seed: u64, victory: bool) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self {
            score: run.final_score(),
            nights_reached: run.night,
            kills: run.kill_count,
            difficulty: run.difficulty,
            victory,
            seed,
            timestamp,
        }
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to access records directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize run record: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn record_path(dir: &Path, record: &RunRecord) -> PathBuf {
    dir.join(format!("run_{}_{}.json", record.timestamp, record.seed))
}

/// Write a record as pretty JSON under `dir`, creating it if needed.
pub fn save_record(dir: &Path, record: &RunRecord) -> Result<PathBuf, RecordError> {
    fs::create_dir_all(dir)?;
    let path = record_path(dir, record);
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Load every readable record under `dir`, best score first. Unreadable
/// or foreign files are skipped.
pub fn list_records(dir: &Path) -> Vec<RunRecord> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut records = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            if let Ok(json) = fs::read_to_string(&path) {
                if let Ok(record) = serde_json::from_str::<RunRecord>(&json) {
                    records.push(record);
                }
            }
        }
    }
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records
}
