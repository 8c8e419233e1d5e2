//! Save/load for the night checkpoint.
//!
//! The entire save state is one integer: the furthest night reached.
//! It lives in a small RON file; a missing or corrupt file means a
//! fresh save, never a failure.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Location of the checkpoint file. Tests point this at a scratch file.
#[derive(Resource, Clone)]
pub struct CheckpointPath(pub PathBuf);

impl Default for CheckpointPath {
    fn default() -> Self {
        Self(PathBuf::from("saves/checkpoint.ron"))
    }
}

/// On-disk checkpoint contents.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub night: u32,
}

/// Errors that can occur while writing the checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to create save directory '{path}': {details}")]
    CreateDir { path: String, details: String },

    #[error("Failed to write checkpoint '{path}': {details}")]
    Write { path: String, details: String },

    #[error("Failed to serialize checkpoint: {0}")]
    Serialize(#[from] ron::Error),
}

/// Read the saved night, clamped to `[1, max_nights]`.
pub fn load_night(path: &Path, max_nights: u32) -> u32 {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return 1,
    };

    match ron::from_str::<Checkpoint>(&contents) {
        Ok(checkpoint) => checkpoint.night.clamp(1, max_nights),
        Err(e) => {
            warn!("Corrupt checkpoint {:?}: {} - starting over", path, e);
            1
        }
    }
}

/// Persist the night counter, clamped to `[1, max_nights]`.
pub fn save_night(path: &Path, night: u32, max_nights: u32) -> Result<(), CheckpointError> {
    let checkpoint = Checkpoint {
        night: night.clamp(1, max_nights),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| CheckpointError::CreateDir {
                path: parent.display().to_string(),
                details: e.to_string(),
            })?;
        }
    }

    let contents = ron::to_string(&checkpoint)?;
    fs::write(path, contents).map_err(|e| CheckpointError::Write {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nightshift-checkpoint-{name}.ron"))
    }

    #[test]
    fn round_trip() {
        let path = scratch("round-trip");
        save_night(&path, 4, 7).unwrap();
        assert_eq!(load_night(&path, 7), 4);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_clamps_to_the_session_bounds() {
        let path = scratch("clamp");
        fs::write(&path, "Checkpoint(night: 99)").unwrap();
        assert_eq!(load_night(&path, 7), 7);
        fs::write(&path, "Checkpoint(night: 0)").unwrap();
        assert_eq!(load_night(&path, 7), 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_a_fresh_save() {
        assert_eq!(load_night(&scratch("does-not-exist"), 7), 1);
    }

    #[test]
    fn corrupt_file_is_a_fresh_save() {
        let path = scratch("corrupt");
        fs::write(&path, "not ron at all {{{").unwrap();
        assert_eq!(load_night(&path, 7), 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_clamps_before_writing() {
        let path = scratch("save-clamp");
        save_night(&path, 40, 7).unwrap();
        assert_eq!(load_night(&path, 20), 7);
        let _ = fs::remove_file(&path);
    }
}
