// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end table generation and validation tests

use approx::assert_relative_eq;
use polytable::table::{leg_mesh_height, z_touch_tolerance, COLLECTION_NAME};
use polytable::{
    build_and_validate, create_low_poly_table, validate_table, BuildError, InMemoryScene,
    ParameterError, SceneHost, TableParameters, ValidationOutcome,
};
use std::collections::BTreeSet;

fn scenario_a() -> TableParameters {
    TableParameters {
        top_width: 1.2,
        top_depth: 1.2,
        top_thickness: 0.08,
        table_height: 0.75,
        leg_thickness: 0.10,
        inset: 0.08,
        top_taper: 0.90,
        leg_taper: 0.82,
        leg_splay_deg: 5.0,
        top_warp: 0.008,
        ..Default::default()
    }
}

fn leg_xy(scene: &InMemoryScene, legs: &[polytable::ObjectId]) -> BTreeSet<(i64, i64)> {
    legs.iter()
        .map(|&leg| {
            let location = scene.world_location(leg).unwrap();
            ((location.x * 1e4).round() as i64, (location.y * 1e4).round() as i64)
        })
        .collect()
}

#[test]
fn test_scenario_a_passes() {
    let params = scenario_a();
    let mut scene = InMemoryScene::new();
    let assembly = create_low_poly_table(&mut scene, &params).unwrap();

    assert_relative_eq!(assembly.leg_height, 0.67, epsilon = 1e-12);
    assert_eq!(assembly.legs.len(), 4);

    // 0.6 - 0.08 - 0.05
    let expected: BTreeSet<(i64, i64)> =
        [(4700, 4700), (4700, -4700), (-4700, 4700), (-4700, -4700)].into_iter().collect();
    assert_eq!(leg_xy(&scene, &assembly.legs), expected);

    let issues = validate_table(&scene, &assembly, &params);
    assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
}

#[test]
fn test_scenario_b_reports_missing_style() {
    let params = TableParameters {
        leg_splay_deg: 0.0,
        top_taper: 1.0,
        leg_taper: 1.0,
        top_warp: 0.0,
        ..scenario_a()
    };
    let (_, _, outcome) = build_and_validate(&params).unwrap();

    assert_eq!(
        outcome,
        ValidationOutcome::Fail(vec![
            "Non-boxy rule failed: leg_splay_deg=0.0 (expected >= 3.0)".to_string(),
            "Non-boxy rule failed: no taper/warp signal (top_taper too high, leg_taper too high, top_warp=0)"
                .to_string(),
        ])
    );
}

#[test]
fn test_scenario_c_legs_as_wide_as_top() {
    let params = TableParameters {
        top_width: 0.5,
        top_depth: 0.5,
        leg_thickness: 0.5,
        inset: 0.0,
        ..scenario_a()
    };
    let mut scene = InMemoryScene::new();
    let err = create_low_poly_table(&mut scene, &params).unwrap_err();

    assert!(matches!(
        err,
        BuildError::Parameters(ParameterError::LegsWiderThanTop { .. })
    ));
    assert!(scene.is_empty());
}

#[test]
fn test_narrow_top_rejects_large_inset() {
    let params = TableParameters {
        top_width: 0.5,
        top_depth: 0.5,
        leg_thickness: 0.3,
        inset: 0.15,
        ..scenario_a()
    };
    let mut scene = InMemoryScene::new();
    let err = create_low_poly_table(&mut scene, &params).unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid table parameters: inset is too large for given dimensions; max inset is 0.1000"
    );
    assert!(scene.is_empty());
}

#[test]
fn test_failed_rebuild_keeps_previous_table() {
    let mut scene = InMemoryScene::new();
    let first = create_low_poly_table(&mut scene, &scenario_a()).unwrap();

    let bad = TableParameters {
        top_taper: 0.5,
        ..scenario_a()
    };
    assert!(create_low_poly_table(&mut scene, &bad).is_err());

    assert_eq!(scene.len(), 5);
    for id in first.objects() {
        assert!(scene.object(id).is_ok());
    }
    assert!(validate_table(&scene, &first, &scenario_a()).is_empty());
}

#[test]
fn test_rebuild_is_idempotent() {
    let params = scenario_a();
    let mut scene = InMemoryScene::new();
    let first = create_low_poly_table(&mut scene, &params).unwrap();
    let first_boxes: Vec<_> = first
        .objects()
        .iter()
        .map(|&id| scene.world_bounding_box(id).unwrap())
        .collect();

    let second = create_low_poly_table(&mut scene, &params).unwrap();
    assert_eq!(scene.objects_in_collection(COLLECTION_NAME).len(), 5);
    assert!(scene.object(first.table_top).is_err());

    for (id, before) in second.objects().iter().zip(&first_boxes) {
        let after = scene.world_bounding_box(*id).unwrap();
        assert!(after.approx_eq(before, 1e-3), "{:?} != {:?}", after, before);
    }
    assert_eq!(first.leg_mesh_height, second.leg_mesh_height);
    assert_eq!(first.style_metrics, second.style_metrics);
}

#[test]
fn test_repeated_rebuilds_reuse_scene_storage() {
    let params = scenario_a();
    let mut scene = InMemoryScene::new();
    let first = create_low_poly_table(&mut scene, &params).unwrap();
    let slots = scene.slot_count();

    let mut last = first.clone();
    for _ in 0..1000 {
        last = create_low_poly_table(&mut scene, &params).unwrap();
    }

    assert_eq!(scene.len(), 5);
    assert_eq!(scene.slot_count(), slots);
    for id in first.objects() {
        assert!(scene.object(id).is_err(), "stale handle {} still resolves", id);
    }
    assert!(validate_table(&scene, &last, &params).is_empty());
}

#[test]
fn test_legs_form_symmetric_rectangle() {
    for (width, depth, inset) in [(1.6, 0.9, 0.05), (0.8, 1.4, 0.1), (2.0, 2.0, 0.0)] {
        let params = TableParameters {
            top_width: width,
            top_depth: depth,
            inset,
            ..scenario_a()
        };
        let mut scene = InMemoryScene::new();
        let assembly = create_low_poly_table(&mut scene, &params).unwrap();

        let half_x = width / 2.0 - inset - params.leg_thickness / 2.0;
        let half_y = depth / 2.0 - inset - params.leg_thickness / 2.0;
        let mut seen = Vec::new();
        for &leg in &assembly.legs {
            let location = scene.world_location(leg).unwrap();
            assert_relative_eq!(location.x.abs(), half_x, epsilon = 1e-9);
            assert_relative_eq!(location.y.abs(), half_y, epsilon = 1e-9);
            seen.push((location.x.signum() as i32, location.y.signum() as i32));
        }
        seen.sort();
        assert_eq!(seen, vec![(-1, -1), (-1, 1), (1, -1), (1, 1)]);
    }
}

#[test]
fn test_leg_mesh_height_never_shorter_than_gap() {
    for splay in [0.0, 0.5, 3.0, 10.0, 20.0] {
        let params = TableParameters {
            leg_splay_deg: splay,
            ..scenario_a()
        };
        let mut scene = InMemoryScene::new();
        let assembly = create_low_poly_table(&mut scene, &params).unwrap();

        assert_eq!(assembly.leg_height, params.table_height - params.top_thickness);
        if splay == 0.0 {
            assert_eq!(assembly.leg_mesh_height, assembly.leg_height);
        } else {
            assert!(assembly.leg_mesh_height > assembly.leg_height);
        }
    }
}

#[test]
fn test_splay_monotonicity() {
    let splays = [3.0, 5.0, 8.0, 12.0, 16.0, 20.0];
    for pair in splays.windows(2) {
        assert!(z_touch_tolerance(0.10, pair[1]) > z_touch_tolerance(0.10, pair[0]));
        assert!(leg_mesh_height(0.67, pair[1]) > leg_mesh_height(0.67, pair[0]));
    }
}

#[test]
fn test_splayed_legs_stay_in_contact() {
    for splay in [3.0, 10.0, 20.0] {
        let params = TableParameters {
            leg_splay_deg: splay,
            ..scenario_a()
        };
        let (_, _, outcome) = build_and_validate(&params).unwrap();
        assert!(outcome.is_pass(), "splay {}: {:?}", splay, outcome.issues());
    }
}

#[test]
fn test_parameter_boundaries() {
    let base = scenario_a();

    let at_max_inset = TableParameters {
        inset: base.max_inset(),
        ..base
    };
    assert!(at_max_inset.validate().is_ok());
    let past_max_inset = TableParameters {
        inset: base.max_inset() + 1e-6,
        ..base
    };
    assert!(past_max_inset.validate().is_err());

    let at_max_warp = TableParameters {
        top_warp: 0.45 * base.top_thickness,
        ..base
    };
    assert!(at_max_warp.validate().is_ok());
    let past_max_warp = TableParameters {
        top_warp: 0.45 * base.top_thickness * 1.001,
        ..base
    };
    assert!(past_max_warp.validate().is_err());
}

#[test]
fn test_legs_have_independent_vertex_buffers() {
    let mut scene = InMemoryScene::new();
    let assembly = create_low_poly_table(&mut scene, &scenario_a()).unwrap();
    let untouched = scene.object(assembly.legs[1]).unwrap().mesh.clone();

    for vertex in &mut scene.object_mut(assembly.legs[0]).unwrap().mesh.vertices {
        vertex.x += 1.0;
    }

    assert_eq!(scene.object(assembly.legs[1]).unwrap().mesh, untouched);
}

#[test]
fn test_objects_are_flat_shaded_and_parented() {
    let mut scene = InMemoryScene::new();
    let assembly = create_low_poly_table(&mut scene, &scenario_a()).unwrap();

    for id in assembly.objects() {
        let object = scene.object(id).unwrap();
        assert!(object.mesh.is_flat_shaded(), "{} is smooth shaded", object.name);
        assert_eq!(object.mesh.vertex_count(), 8);
        assert_eq!(object.polygon_count(), 6);
    }
    for &leg in &assembly.legs {
        assert_eq!(scene.object(leg).unwrap().parent, Some(assembly.table_top));
    }
}

#[test]
fn test_downward_warp_is_flagged_as_z_mismatch() {
    // Warp moves alternate corners both ways, but only an upward warp is
    // allowed for in the expected tabletop thickness
    let params = TableParameters {
        top_warp: -0.01,
        ..scenario_a()
    };
    let (scene, assembly, outcome) = build_and_validate(&params).unwrap();

    let top = scene.object(assembly.table_top).unwrap();
    assert_relative_eq!(top.dimensions().z, 0.09, epsilon = 1e-9);
    assert_eq!(outcome.issues().len(), 1);
    assert!(outcome.issues()[0].starts_with("TableTop local Z mismatch"));
}
