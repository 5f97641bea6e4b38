//! JSON memory profile loader
//!
//! Turns the raw profile (a list of snapshots, each a list of malloc/free
//! resources) into a [`HeapModel`] where every snapshot holds the allocations
//! that are live at that point in time.

use super::{AllocationRecord, AllocationSite, HeapModel, HeatTable, Snapshot};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a profile
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("cannot read profile '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed profile: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid timestamp '{0}' in snapshot {1}")]
    Timestamp(String, usize),

    #[error("profile contains no snapshots and no heat table")]
    NoSnapshots,

    #[error("profile covers an empty address range ({min}..{max})")]
    EmptyRange { min: u64, max: u64 },
}

#[derive(Debug, Deserialize)]
struct RawProfile {
    #[serde(default)]
    header: RawHeader,
    #[serde(default)]
    snapshots: Vec<RawSnapshot>,
    #[serde(default)]
    heat: Option<RawHeat>,
}

#[derive(Debug, Default, Deserialize)]
struct RawHeader {
    #[serde(default)]
    units: RawUnits,
}

#[derive(Debug, Deserialize)]
struct RawUnits {
    #[serde(default = "default_unit")]
    memory: String,
}

impl Default for RawUnits {
    fn default() -> Self {
        RawUnits {
            memory: default_unit(),
        }
    }
}

fn default_unit() -> String {
    String::from("B")
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTime {
    Seconds(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    time: RawTime,
    #[serde(default)]
    resources: Vec<RawResource>,
}

#[derive(Debug, Deserialize)]
struct RawResource {
    address: u64,
    amount: u64,
    #[serde(default)]
    subtype: String,
    #[serde(default)]
    uid: Option<RawUid>,
}

#[derive(Debug, Deserialize)]
struct RawUid {
    function: String,
    source: String,
    #[serde(default)]
    line: u32,
}

#[derive(Debug, Deserialize)]
struct RawHeat {
    base_address: u64,
    counts: Vec<u32>,
}

/// Read and parse a profile from disk
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<HeapModel, ProfileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_profile(&text)
}

/// Parse a profile from its JSON text
pub fn parse_profile(text: &str) -> Result<HeapModel, ProfileError> {
    let raw: RawProfile = serde_json::from_str(text)?;

    if raw.snapshots.is_empty() && raw.heat.is_none() {
        return Err(ProfileError::NoSnapshots);
    }

    let mut snapshots = build_snapshots(raw.snapshots)?;
    if snapshots.is_empty() {
        // heat-only profile
        snapshots.push(Snapshot::new(1, 0.0, Vec::new()));
    }

    let mut min_address = u64::MAX;
    let mut max_address = 0;
    for record in snapshots.iter().flat_map(|s| s.records()) {
        min_address = min_address.min(record.address);
        max_address = max_address.max(record.address.saturating_add(record.amount));
    }
    let heat = raw
        .heat
        .map(|heat| HeatTable::new(heat.base_address, heat.counts));
    if let Some(heat) = &heat {
        min_address = min_address.min(heat.base_address());
        max_address = max_address.max(heat.end_address());
    }

    if max_address <= min_address {
        return Err(ProfileError::EmptyRange {
            min: min_address,
            max: max_address,
        });
    }

    let mut model = HeapModel::new(snapshots, min_address, max_address, raw.header.units.memory);
    if let Some(heat) = heat {
        model = model.with_heat(heat);
    }

    info!(
        snapshots = model.len(),
        min_address,
        max_address,
        has_heat = model.heat().is_some(),
        "Loaded memory profile"
    );
    Ok(model)
}

/// Replay malloc/free resources so each snapshot holds its live allocations
fn build_snapshots(raw: Vec<RawSnapshot>) -> Result<Vec<Snapshot>, ProfileError> {
    let mut live: FxHashMap<u64, AllocationRecord> = FxHashMap::default();
    let mut snapshots = Vec::with_capacity(raw.len());

    for (i, snap) in raw.into_iter().enumerate() {
        let index = i + 1;
        let timestamp = match snap.time {
            RawTime::Seconds(t) => t,
            RawTime::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ProfileError::Timestamp(text.clone(), index))?,
        };

        for res in snap.resources {
            let Some(uid) = res.uid else {
                continue;
            };
            if res.subtype == "free" {
                live.remove(&res.address);
            } else {
                let site = Rc::new(AllocationSite::new(uid.function, uid.source, uid.line));
                live.insert(
                    res.address,
                    AllocationRecord::new(res.address, res.amount, Some(site)),
                );
            }
        }

        debug!(index, live = live.len(), "Replayed snapshot");
        snapshots.push(Snapshot::new(index, timestamp, live.values().cloned().collect()));
    }

    Ok(snapshots)
}
