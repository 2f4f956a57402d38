use crate::unit::UnitType;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Version of the persisted document format.
///
/// Bumped on any structural change (e.g. adding per-terminal identity to
/// edges) so older readers reject newer files instead of misparsing them.
pub const FORMAT_VERSION: u32 = 1;

/// The complete serializable state of a flowsheet graph at one instant:
/// structure plus every visual attribute needed to resume a session exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowsheetSnapshot {
    pub version: u32,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    #[serde(rename = "unitType")]
    pub unit_type: UnitType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Parses persisted bytes into a snapshot without touching any graph state.
pub fn parse(bytes: &[u8]) -> Result<FlowsheetSnapshot> {
    let snapshot: FlowsheetSnapshot = serde_json::from_slice(bytes)?;
    if snapshot.version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion {
            found: snapshot.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(snapshot)
}

/// Canonical encoding of a snapshot: pretty-printed JSON with fields in
/// declaration order.
pub fn encode(snapshot: &FlowsheetSnapshot) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(snapshot)?;
    bytes.push(b'\n');
    Ok(bytes)
}
