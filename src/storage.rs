//! Local high score persistence under `~/.goobi/`. Missing or corrupt
//! data loads as the default so the game never refuses to start.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

const DATA_DIR: &str = ".goobi";
const HIGH_SCORE_FILE: &str = "highscore.json";

/// The device-local best run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalHighScore {
    pub score: u32,
    /// Unix timestamp of the run that set it.
    pub updated_at: i64,
}

/// `~/.goobi`, or a working-directory fallback when no home exists.
pub fn goobi_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR)
}

fn high_score_path() -> PathBuf {
    goobi_dir().join(HIGH_SCORE_FILE)
}

/// Load the stored best, defaulting on any problem.
pub fn load_high_score() -> LocalHighScore {
    load_record(&high_score_path())
}

/// Persist `score` if it beats the stored best. Returns whichever record
/// is current afterwards.
pub fn record_high_score(score: u32) -> LocalHighScore {
    record_high_score_at(&high_score_path(), score)
}

fn load_record(path: &Path) -> LocalHighScore {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => LocalHighScore::default(),
    }
}

fn record_high_score_at(path: &Path, score: u32) -> LocalHighScore {
    let current = load_record(path);
    if score <= current.score {
        return current;
    }
    let record = LocalHighScore {
        score,
        updated_at: Utc::now().timestamp(),
    };
    save_record(path, &record);
    record
}

fn save_record(path: &Path, record: &LocalHighScore) {
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            eprintln!("Could not create {}: {}", parent.display(), err);
            return;
        }
    }
    match serde_json::to_string_pretty(record) {
        Ok(json) => {
            if let Err(err) = fs::write(path, json) {
                eprintln!("Could not save high score: {}", err);
            }
        }
        Err(err) => eprintln!("Could not serialize high score: {}", err),
    }
}
