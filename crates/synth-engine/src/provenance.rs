//! Face-label provenance across destructive edits.
//!
//! Every kernel edit renumbers the topology. The kernel reports a
//! correspondence only for faces it modified; everything else has to be
//! recovered by geometric matching. One matching pass per edit feeds
//! all three label payloads so they can never drift apart.

use std::collections::{HashMap, HashSet};

use kernel_api::{FaceCorrespondence, FaceKey, KernelIntrospect};

use crate::types::ApplyError;

/// Result of matching the post-edit face set against the pre-edit one.
#[derive(Debug, Clone)]
pub struct FaceMatch {
    /// new face -> the old face it continues.
    pub pairs: HashMap<FaceKey, FaceKey>,
    /// Faces with no pre-edit ancestor: born in this edit.
    pub unmatched_new: Vec<FaceKey>,
}

impl FaceMatch {
    /// old face -> new face, for remapping stored key collections.
    pub fn forward(&self) -> HashMap<FaceKey, FaceKey> {
        self.pairs.iter().map(|(n, o)| (*o, *n)).collect()
    }
}

/// Match new faces to old ones: the kernel's modified-face
/// correspondence is authoritative and consumed first, then the
/// remaining new faces are probed against the still-unmatched old pool.
/// Each old face is matched at most once.
pub fn match_faces(
    introspect: &dyn KernelIntrospect,
    old_faces: &[FaceKey],
    new_faces: &[FaceKey],
    correspondence: &FaceCorrespondence,
) -> Result<FaceMatch, ApplyError> {
    let old_set: HashSet<FaceKey> = old_faces.iter().copied().collect();
    let new_set: HashSet<FaceKey> = new_faces.iter().copied().collect();

    let mut pairs: HashMap<FaceKey, FaceKey> = HashMap::new();
    let mut claimed_old: HashSet<FaceKey> = HashSet::new();

    for (&new, &old) in correspondence {
        if !new_set.contains(&new) {
            return Err(ApplyError::InconsistentCorrespondence {
                reason: format!("{new:?} is not a face of the result"),
            });
        }
        if !old_set.contains(&old) {
            return Err(ApplyError::InconsistentCorrespondence {
                reason: format!("{old:?} is not a face of the input"),
            });
        }
        if !claimed_old.insert(old) {
            return Err(ApplyError::InconsistentCorrespondence {
                reason: format!("{old:?} mapped to more than one result face"),
            });
        }
        pairs.insert(new, old);
    }

    let mut pool: Vec<FaceKey> = old_faces
        .iter()
        .copied()
        .filter(|f| !claimed_old.contains(f))
        .collect();

    let mut unmatched_new = Vec::new();
    for &new in new_faces {
        if pairs.contains_key(&new) {
            continue;
        }
        match introspect.same_face(new, &pool) {
            Some(old) => {
                pool.retain(|f| *f != old);
                pairs.insert(new, old);
            }
            None => unmatched_new.push(new),
        }
    }

    Ok(FaceMatch {
        pairs,
        unmatched_new,
    })
}

/// Carry a per-face payload across an edit: continued faces inherit
/// (falling back to `fill` if the old face had no entry), new faces get
/// `fill`. The result is total over the new face set.
pub fn carry<T: Copy>(map: &HashMap<FaceKey, T>, fm: &FaceMatch, fill: T) -> HashMap<FaceKey, T> {
    let mut out = HashMap::with_capacity(fm.pairs.len() + fm.unmatched_new.len());
    for (&new, &old) in &fm.pairs {
        out.insert(new, map.get(&old).copied().unwrap_or(fill));
    }
    for &new in &fm.unmatched_new {
        out.insert(new, fill);
    }
    out
}
