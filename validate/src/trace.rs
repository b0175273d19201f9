//! Recorded poll traces.
//!
//! One JSON object per line:
//!
//! ```text
//! {"t": 3.05, "subject": {"mp": 101.0, "statuses": [{"id": 496, "param": 6}],
//!  "cooldowns": [{"ability_id": 2259, "remaining": 12.5, "charges": 1}]}}
//! ```
//!
//! `subject` may be `null` or omitted for frames where the subject was absent.
//! Blank lines and lines starting with `#` are ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use phasewatch_core::{StatusEffect, Subject};
use phasewatch_types::ResourceKind;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RecordedFrame {
    pub t: f64,
    #[serde(default)]
    pub subject: Option<RecordedSubject>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSubject {
    mp: Option<f64>,
    cp: Option<f64>,
    gp: Option<f64>,
    #[serde(default)]
    statuses: Vec<RawStatus>,
    #[serde(default)]
    cooldowns: Vec<RawCooldown>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawStatus {
    id: u32,
    #[serde(default)]
    param: u32,
    #[serde(default)]
    remaining: f32,
}

#[derive(Debug, Clone, Deserialize)]
struct RawCooldown {
    ability_id: u32,
    remaining: f32,
    charges: i32,
}

/// Subject state captured for one frame
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawSubject")]
pub struct RecordedSubject {
    resources: HashMap<ResourceKind, f64>,
    statuses: Vec<StatusEffect>,
    cooldowns: HashMap<u32, (f32, i32)>,
}

impl From<RawSubject> for RecordedSubject {
    fn from(raw: RawSubject) -> Self {
        let resources = [
            (ResourceKind::Mp, raw.mp),
            (ResourceKind::Cp, raw.cp),
            (ResourceKind::Gp, raw.gp),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|v| (kind, v)))
        .collect();

        let statuses = raw
            .statuses
            .into_iter()
            .map(|s| StatusEffect {
                status_id: s.id,
                param: s.param,
                remaining_secs: s.remaining,
            })
            .collect();

        let cooldowns = raw
            .cooldowns
            .into_iter()
            .map(|c| (c.ability_id, (c.remaining, c.charges)))
            .collect();

        Self {
            resources,
            statuses,
            cooldowns,
        }
    }
}

impl Subject for RecordedSubject {
    fn resource(&self, kind: ResourceKind) -> Option<f64> {
        self.resources.get(&kind).copied()
    }

    fn statuses(&self) -> &[StatusEffect] {
        &self.statuses
    }

    fn cooldown_remaining(&self, ability_id: u32) -> f32 {
        self.cooldowns.get(&ability_id).map_or(0.0, |c| c.0)
    }

    fn charges(&self, ability_id: u32) -> i32 {
        self.cooldowns.get(&ability_id).map_or(0, |c| c.1)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid frame on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub fn read_trace(path: &Path) -> Result<Vec<RecordedFrame>, TraceError> {
    let file = File::open(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trace(BufReader::new(file)).map_err(|e| match e {
        TraceError::Io { source, .. } => TraceError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

pub fn parse_trace(reader: impl BufRead) -> Result<Vec<RecordedFrame>, TraceError> {
    let mut frames = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| TraceError::Io {
            path: PathBuf::new(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let frame = serde_json::from_str(line).map_err(|source| TraceError::Parse {
            line: idx + 1,
            source,
        })?;
        frames.push(frame);
    }

    Ok(frames)
}
