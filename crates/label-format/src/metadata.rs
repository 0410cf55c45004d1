use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swarf_types::FeatureKind;
use uuid::Uuid;

/// Current sidecar metadata format version.
pub const FORMAT_VERSION: u32 = 1;

/// Metadata stored alongside each generated part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartMetadata {
    /// Human-readable part name.
    pub name: String,
    /// Unique part identifier.
    pub id: Uuid,
    /// RNG seed the part was generated from.
    pub seed: u64,
    /// Applied features, in application order.
    pub features: Vec<String>,
    /// When the part was generated.
    pub created: DateTime<Utc>,
}

impl PartMetadata {
    pub fn new(name: impl Into<String>, seed: u64, applied: &[FeatureKind]) -> Self {
        Self {
            name: name.into(),
            id: Uuid::new_v4(),
            seed,
            features: applied.iter().map(|k| k.name().to_string()).collect(),
            created: Utc::now(),
        }
    }
}

/// The top-level metadata file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PartFile {
    format: String,
    version: u32,
    part: PartMetadata,
}

/// Serialize part metadata to a pretty-printed JSON string.
pub fn save_metadata(metadata: &PartMetadata) -> String {
    let file = PartFile {
        format: "swarf-part".to_string(),
        version: FORMAT_VERSION,
        part: metadata.clone(),
    };
    serde_json::to_string_pretty(&file).expect("PartMetadata serialization should never fail")
}
