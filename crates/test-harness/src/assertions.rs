//! Assertion helpers with diagnostic output.
//!
//! Every failure includes a `[ctx]` marker plus expected vs actual, so
//! multi-step scenarios report which step broke.

use std::collections::HashSet;

use kernel_api::{FaceKey, KernelIntrospect, SolidHandle};
use swarf_types::FeatureKind;
use synth_engine::PartState;

use crate::helpers::HarnessError;

/// Assert the handle points at exactly one connected solid shell.
pub fn assert_single_solid(
    introspect: &dyn KernelIntrospect,
    solid: &SolidHandle,
    ctx: &str,
) -> Result<(), HarnessError> {
    let shards = introspect.solid_count(solid);
    if shards == 1 {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] expected 1 solid shell, got {shards}"),
        })
    }
}

/// Assert labels and bottom flags are total over the solid's face set,
/// with no stale keys left from earlier topology.
pub fn assert_label_domain(
    introspect: &dyn KernelIntrospect,
    state: &PartState,
    ctx: &str,
) -> Result<(), HarnessError> {
    let faces: HashSet<FaceKey> = introspect.list_faces(&state.solid).into_iter().collect();
    let labeled: HashSet<FaceKey> = state.labels.keys().copied().collect();
    let flagged: HashSet<FaceKey> = state.bottoms.keys().copied().collect();

    if labeled != faces {
        return Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{ctx}] label domain mismatch: {} faces, {} labels, stale: {:?}, missing: {:?}",
                faces.len(),
                labeled.len(),
                labeled.difference(&faces).collect::<Vec<_>>(),
                faces.difference(&labeled).collect::<Vec<_>>(),
            ),
        });
    }
    if flagged != faces {
        return Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{ctx}] bottom domain mismatch: {} faces, {} flags",
                faces.len(),
                flagged.len(),
            ),
        });
    }
    Ok(())
}

/// Assert every face still carries the stock label and no feature was
/// recorded as applied.
pub fn assert_all_stock(state: &PartState, ctx: &str) -> Result<(), HarnessError> {
    let stock_id = FeatureKind::Stock.label_id();
    if let Some((face, id)) = state.labels.iter().find(|(_, &id)| id != stock_id) {
        return Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] face {face:?} carries class {id}, expected stock"),
        });
    }
    if !state.applied.is_empty() {
        return Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] expected no applied features, got {:?}", state.applied),
        });
    }
    Ok(())
}

/// Assert a 0/1 relation matrix is symmetric with the expected diagonal.
pub fn assert_relation_matrix(
    matrix: &[Vec<u8>],
    instance_faces: &HashSet<usize>,
    ctx: &str,
) -> Result<(), HarnessError> {
    let n = matrix.len();
    for (a, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(HarnessError::AssertionFailed {
                detail: format!("[{ctx}] row {a} has {} entries, expected {n}", row.len()),
            });
        }
        for b in 0..n {
            if matrix[a][b] != matrix[b][a] {
                return Err(HarnessError::AssertionFailed {
                    detail: format!(
                        "[{ctx}] asymmetry at ({a},{b}): {} vs {}",
                        matrix[a][b], matrix[b][a],
                    ),
                });
            }
        }
        let want = u8::from(instance_faces.contains(&a));
        if matrix[a][a] != want {
            return Err(HarnessError::AssertionFailed {
                detail: format!("[{ctx}] diagonal [{a}] is {}, expected {want}", matrix[a][a]),
            });
        }
    }
    Ok(())
}
