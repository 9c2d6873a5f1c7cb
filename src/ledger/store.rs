use super::FeedbackLedger;
use crate::error::{RadarError, Result};
use crate::session::STATE_DIR;
use std::fs;
use std::path::{Path, PathBuf};

pub const LEDGER_FILE: &str = "ledger.json";

pub fn ledger_path(root: &Path) -> PathBuf {
    root.join(STATE_DIR).join(LEDGER_FILE)
}

pub fn load(root: &Path) -> Result<FeedbackLedger> {
    let path = ledger_path(root);
    if !path.exists() {
        return Ok(FeedbackLedger::default());
    }
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content)
        .map_err(|e| RadarError::Data(format!("{}: {}", path.display(), e)))
}

pub fn save(root: &Path, ledger: &FeedbackLedger) -> Result<PathBuf> {
    let path = ledger_path(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(RadarError::Io)?;
    }
    let json = serde_json::to_string_pretty(ledger)?;
    fs::write(&path, json).map_err(RadarError::Io)?;
    Ok(path)
}
