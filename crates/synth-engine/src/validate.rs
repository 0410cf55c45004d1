use kernel_api::{KernelIntrospect, SolidHandle};

use crate::types::ApplyError;

/// An edit must leave exactly one connected solid shell; anything else
/// (a split body, or an emptied one) discards the edit.
pub fn validate_edit(
    introspect: &dyn KernelIntrospect,
    solid: &SolidHandle,
) -> Result<(), ApplyError> {
    let shards = introspect.solid_count(solid);
    if shards == 1 {
        Ok(())
    } else {
        Err(ApplyError::TopologyInvalid { shards })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_api::{Kernel, MockAnomaly, MockKernel};
    use nalgebra::{Point3, Vector3};
    use swarf_types::SketchLoop;

    #[test]
    fn split_result_is_invalid() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        assert!(validate_edit(&k, &solid).is_ok());

        let profile = SketchLoop::Circle {
            center: Point3::new(10.0, 10.0, 10.0),
            radius: 3.0,
            normal: Vector3::z(),
        };
        let face = k.make_planar_face(&profile).unwrap();
        k.push_anomaly(MockAnomaly::SplitSolid);
        let out = k
            .apply_prism(&solid, face, [0.0, 0.0, -1.0], None, false)
            .unwrap();
        let err = validate_edit(&k, &out.solid).unwrap_err();
        assert!(matches!(err, ApplyError::TopologyInvalid { shards: 2 }));
    }
}
