use crate::error::{RadarError, Result};
use crate::types::profile::Profile;
use std::fs;
use std::path::{Path, PathBuf};

pub const STATE_DIR: &str = ".toolradar";
pub const PROFILE_FILE: &str = "profile.json";

pub fn profile_path(root: &Path) -> PathBuf {
    root.join(STATE_DIR).join(PROFILE_FILE)
}

/// `None` means no active user.
pub fn load_profile(root: &Path) -> Result<Option<Profile>> {
    let path = profile_path(root);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let profile = serde_json::from_str(&content)
        .map_err(|e| RadarError::Data(format!("{}: {}", path.display(), e)))?;
    Ok(Some(profile))
}

pub fn save_profile(root: &Path, profile: &Profile) -> Result<PathBuf> {
    let path = profile_path(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(RadarError::Io)?;
    }
    fs::write(&path, serde_json::to_string_pretty(profile)?).map_err(RadarError::Io)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_profile_means_no_active_user() {
        let dir = TempDir::new().expect("temp dir should be created");
        assert!(load_profile(dir.path()).expect("load should not fail").is_none());
    }

    #[test]
    fn profile_round_trips_through_session_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let profile = Profile::new(" Ada ", "Analytical", "founder");
        save_profile(dir.path(), &profile).expect("profile should save");
        let loaded = load_profile(dir.path())
            .expect("load should not fail")
            .expect("profile should exist");
        assert_eq!(loaded.name, "Ada");
        assert!(loaded.id.starts_with("user-"));
        assert_eq!(loaded, profile);
    }
}
