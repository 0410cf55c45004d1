use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// Valid only for the current kernel session, never persisted.
#[derive(Debug, Clone)]
pub struct SolidHandle(pub(crate) u64);

impl SolidHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Transient kernel face identifier. Stable between edits but renumbered
/// by every modeling operation; labels carried across edits must be
/// remapped through the `EditOutcome` of that edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceKey(pub u64);

/// Transient kernel edge identifier, same lifetime rules as `FaceKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub u64);

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("{op} failed: {reason}")]
    OperationFailed { op: String, reason: String },

    #[error("face not found: {0:?}")]
    FaceNotFound(FaceKey),

    #[error("edge not found: {0:?}")]
    EdgeNotFound(EdgeKey),

    #[error("solid not found: handle {0}")]
    SolidNotFound(u64),

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("export failed: {reason}")]
    ExportFailed { reason: String },
}

impl KernelError {
    pub fn op(op: &str, reason: impl Into<String>) -> Self {
        KernelError::OperationFailed {
            op: op.to_string(),
            reason: reason.into(),
        }
    }
}

/// Face correspondence reported by a modeling edit: maps each surviving
/// face the kernel modified (trimmed or re-bounded) from its new key to
/// the key it had before the edit. Faces the edit left untouched are not
/// listed and are matched by signature instead.
pub type FaceCorrespondence = HashMap<FaceKey, FaceKey>;

/// Result of a modeling edit.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub solid: SolidHandle,
    pub correspondence: FaceCorrespondence,
}

impl Serialize for FaceKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FaceKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(FaceKey)
    }
}

impl Serialize for EdgeKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EdgeKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(EdgeKey)
    }
}
