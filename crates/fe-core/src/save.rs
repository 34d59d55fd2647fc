//! Saving and loading the player.
//!
//! Saves are JSON documents tagged with a schema version. The version is read
//! before the rest of the document so files from other schema versions are
//! rejected with a clear error instead of a field mismatch.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::player::Player;

/// Schema version written by this build.
pub const SAVE_VERSION: u32 = 1;

/// The on-disk save document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    /// Schema version.
    pub version: u32,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// The saved player.
    pub player: Player,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Write the player to `path`, replacing any previous save.
pub fn save_player(path: &Path, player: &Player) -> GameResult<()> {
    let file = SaveFile {
        version: SAVE_VERSION,
        saved_at: Utc::now(),
        player: player.clone(),
    };
    let json = serde_json::to_string_pretty(&file).map_err(|e| GameError::SaveFailed {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    write_replacing(path, &json).map_err(|source| GameError::SaveFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `contents` next to `path`, then rename it into place, so a failed
/// write leaves the previous save intact.
fn write_replacing(path: &Path, contents: &str) -> std::io::Result<()> {
    let name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("save path has no file name"))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(format!(".tmp-{}", std::process::id()));
    let tmp_path = path.with_file_name(tmp_name);

    let mut tmp = File::create(&tmp_path)?;
    let written = tmp
        .write_all(contents.as_bytes())
        .and_then(|()| tmp.sync_all());
    drop(tmp);
    if let Err(e) = written.and_then(|()| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

/// Read and check the save document at `path`.
pub fn read_save(path: &Path) -> GameResult<SaveFile> {
    let json = fs::read_to_string(path).map_err(|source| GameError::LoadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let probe: VersionProbe = serde_json::from_str(&json)?;
    if probe.version != SAVE_VERSION {
        return Err(GameError::UnsupportedSaveVersion {
            found: probe.version,
            expected: SAVE_VERSION,
        });
    }

    let file: SaveFile = serde_json::from_str(&json)?;
    file.player.validate().map_err(GameError::CorruptSave)?;
    Ok(file)
}

/// Read the player saved at `path`.
pub fn load_player(path: &Path) -> GameResult<Player> {
    read_save(path).map(|file| file.player)
}
