//! Generation scenarios against the mock kernel.
//!
//! End-to-end checks of the pipeline invariants: topology, label
//! domains, extraction stability, and the documented sampler bands.

use std::collections::HashSet;

use feature_ops::Stage;
use label_format::{export_labeled_geometry, relation_matrix, save_metadata, PartMetadata};
use swarf_types::{FeatureKind, SketchLoop};
use test_harness::assertions::{
    assert_all_stock, assert_label_domain, assert_relation_matrix, assert_single_solid,
};
use test_harness::PartBuilder;

#[test]
fn generated_parts_hold_core_invariants() {
    for seed in 0..6 {
        let mut b = PartBuilder::mock(seed);
        let part = b.generate().expect("generation exhausted its budget");
        let ctx = format!("seed {seed}");
        assert_single_solid(&b.kernel, &part.state.solid, &ctx).unwrap();
        assert_label_domain(&b.kernel, &part.state, &ctx).unwrap();
    }
}

#[test]
fn sidecar_reextraction_is_byte_identical() {
    let mut b = PartBuilder::mock(5);
    b.stock([25.0, 25.0, 12.0]).unwrap();
    assert!(b.apply(FeatureKind::ThroughHole).unwrap());
    assert!(b.apply(FeatureKind::Chamfer).unwrap());

    let first = b.sidecar().unwrap();
    let second = b.sidecar().unwrap();
    assert_eq!(first, second);

    let doc: serde_json::Value = serde_json::from_str(&first).unwrap();
    let n = b.labels().unwrap().cls.len();
    assert_eq!(doc["cls"].as_object().unwrap().len(), n);
    assert_eq!(doc["bottom"].as_object().unwrap().len(), n);
}

#[test]
fn relation_matrix_is_symmetric_with_instance_diagonal() {
    let mut b = PartBuilder::mock(9);
    let part = b.generate().unwrap();
    let labels = label_format::extract_labels(&b.kernel, &part.state);

    let matrix = relation_matrix(&labels.seg, labels.cls.len());
    let instance_faces: HashSet<usize> = labels.seg.iter().flatten().copied().collect();
    assert_relation_matrix(&matrix, &instance_faces, "generated part").unwrap();
}

#[test]
fn counterbore_radii_keep_nested_clearance() {
    for seed in 0..16 {
        let mut b = PartBuilder::mock(seed);
        b.stock([30.0, 30.0, 30.0]).unwrap();
        let plan = b
            .sample(FeatureKind::Counterbore)
            .unwrap()
            .expect("counterbore fits 30mm cube stock");
        let radii: Vec<f64> = plan
            .stages
            .iter()
            .map(|s| match s {
                Stage::Prism {
                    profile: SketchLoop::Circle { radius, .. },
                    ..
                } => *radius,
                other => panic!("[seed {seed}] unexpected stage {other:?}"),
            })
            .collect();
        assert_eq!(radii.len(), 2);
        assert!(
            radii[0] >= radii[1] + b.cfg.clearance,
            "[seed {seed}] outer {} vs inner {}",
            radii[0],
            radii[1],
        );
    }
}

#[test]
fn boss_radius_stays_inside_documented_band() {
    for seed in 0..16 {
        let mut b = PartBuilder::mock(seed);
        b.stock([20.0, 20.0, 10.0]).unwrap();
        let plan = b
            .sample(FeatureKind::Boss)
            .unwrap()
            .expect("boss fits 20x20 stock");
        let Stage::Prism {
            profile: SketchLoop::Circle { radius, .. },
            additive,
            ..
        } = &plan.stages[0]
        else {
            panic!("[seed {seed}] boss plan is a circular prism");
        };
        assert!(*additive);
        assert!(
            (1.0..=9.0).contains(radius),
            "[seed {seed}] radius {radius} outside [1, 9]",
        );
    }
}

#[test]
fn infeasible_spur_gear_returns_the_untouched_part() {
    // 8x8 regions cannot host the smallest gear (8 teeth, module 1).
    let mut b = PartBuilder::mock(3);
    b.stock([8.0, 8.0, 8.0]).unwrap();
    assert!(!b.apply(FeatureKind::SpurGear).unwrap());
    assert_all_stock(b.state().unwrap(), "spur gear skipped").unwrap();
}

#[test]
fn chamfer_on_tiny_box_leaves_all_stock() {
    let mut b = PartBuilder::mock(4);
    b.stock([1.5, 1.5, 1.5]).unwrap();
    assert!(b.usable_edges().unwrap().is_empty());
    assert!(!b.apply(FeatureKind::Chamfer).unwrap());
    assert_all_stock(b.state().unwrap(), "chamfer skipped").unwrap();
    assert_label_domain(&b.kernel, b.state().unwrap(), "chamfer skipped").unwrap();
}

#[test]
fn export_and_metadata_round_trip() {
    let mut b = PartBuilder::mock(21);
    let part = b.generate().unwrap();

    let bytes = export_labeled_geometry(&mut b.kernel, &part.state).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let faces = doc["faces"].as_array().unwrap();
    assert_eq!(faces.len(), part.state.labels.len());
    assert!(faces.iter().all(|f| f["name"].is_string()));

    let meta = PartMetadata::new("part_0021", 21, &part.state.applied);
    let text = save_metadata(&meta);
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["format"], "swarf-part");
    assert_eq!(
        parsed["part"]["features"].as_array().unwrap().len(),
        part.state.applied.len(),
    );
}
