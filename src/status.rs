//! Cross-process status snapshot
//!
//! The simulation writes this record once per frame; the `ringfall-info`
//! viewer polls it at its own rate. Plain whole-file JSON with no locking
//! or versioning: a torn or stale read shows slightly wrong numbers for a
//! frame, which is fine for cosmetic stats. The path and field names are a
//! frozen contract with the viewer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The shared record: bounce count and current boundary radius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub bounces: u64,
    #[serde(default)]
    pub radius: f32,
}

/// Well-known location of the snapshot (`/tmp/ball_info.json` on Linux)
pub fn status_path() -> PathBuf {
    std::env::temp_dir().join("ball_info.json")
}

/// Best-effort write. Errors are logged and swallowed here, at the call
/// site, rather than propagated; the simulation never stalls on stats.
pub fn publish(path: &Path, snapshot: &StatusSnapshot) {
    let json = match serde_json::to_string(snapshot) {
        Ok(json) => json,
        Err(err) => {
            log::debug!("Status serialize failed: {err}");
            return;
        }
    };
    if let Err(err) = std::fs::write(path, json) {
        log::debug!("Status write to {} failed: {err}", path.display());
    }
}

/// Tolerant read: a missing, unreadable, or malformed record yields zeros.
pub fn poll(path: &Path) -> StatusSnapshot {
    match std::fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
            log::debug!("Status parse failed: {err}");
            StatusSnapshot::default()
        }),
        Err(_) => StatusSnapshot::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ringfall-test-{}-{name}", std::process::id()))
    }

    #[test]
    fn snapshot_round_trips() {
        let path = scratch_path("roundtrip.json");
        let written = StatusSnapshot {
            bounces: 7,
            radius: 123.4,
        };

        publish(&path, &written);
        let read = poll(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(read.bounces, 7);
        assert!((read.radius - 123.4).abs() < 1e-4);
    }

    #[test]
    fn missing_file_yields_zeros() {
        let path = scratch_path("nonexistent.json");
        assert_eq!(poll(&path), StatusSnapshot::default());
    }

    #[test]
    fn malformed_file_yields_zeros() {
        let path = scratch_path("garbage.json");
        std::fs::write(&path, "{not json").unwrap();
        let read = poll(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(read, StatusSnapshot::default());
    }

    #[test]
    fn partial_record_fills_defaults() {
        let path = scratch_path("partial.json");
        std::fs::write(&path, r#"{"bounces": 3}"#).unwrap();
        let read = poll(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(read.bounces, 3);
        assert_eq!(read.radius, 0.0);
    }
}
