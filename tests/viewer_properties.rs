use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use configurator::config::RotationConfig;
use configurator::scene_graph::SceneModel;
use configurator::viewer::{RotationPhase, SlideDirection, SlideStep};
use configurator::{Material, Object3D, ObjectId, Scene, Viewer, ViewerConfig, ViewerError};
use glam::{Quat, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Primary model with indicator hosts, rotation-tagged doors, a repeated
/// group and an unnamed part.
fn cabinet(scene: &mut Scene) -> ObjectId {
    let model = scene.add_model(SceneModel::new("panel", 1));
    let root = scene.add_object(Object3D::new("cabinet"));
    let body = scene.add_child(root, Object3D::new("body"));

    for (i, name) in ["3DGeom-4", "3DGeom-4_1", "3DGeom-4_2", "3DGeom-4_3"]
        .into_iter()
        .enumerate()
    {
        let mut led = Object3D::mesh(name, model, Material::new(name, Vec3::splat(0.9)));
        led.transform.set_translation(Vec3::new(i as f32, 3.0, 0.0));
        scene.add_child(body, led);
    }

    for name in ["3DGeom-26", "3DGeom-26_1"] {
        scene.add_child(body, Object3D::mesh(name, model, Material::new("door", Vec3::X)));
    }

    for y in [0.5, 1.5, 2.5] {
        let mut shelf = Object3D::mesh("shelf", model, Material::new("wood", Vec3::Y));
        shelf.transform.set_translation(Vec3::new(0.0, y, 0.0));
        scene.add_child(root, shelf);
    }

    scene.add_child(root, Object3D::mesh("", model, Material::new("misc", Vec3::Z)));
    root
}

fn glasses(scene: &mut Scene) -> ObjectId {
    let model = scene.add_model(SceneModel::new("pane", 1));
    let root = scene.add_object(Object3D::new("glasses"));
    for name in ["3DGeom-20_2", "3DGeom-20_1", "3DGeom-20", "3DGeom-20_3"] {
        scene.add_child(root, Object3D::mesh(name, model, Material::new("glass", Vec3::ONE)));
    }
    root
}

fn loaded_viewer(config: ViewerConfig) -> (Scene, Viewer) {
    let mut scene = Scene::new();
    let primary = cabinet(&mut scene);
    let left = glasses(&mut scene);
    let right = scene.clone_subtree(left).unwrap();
    scene.set_object_translation(right, Vec3::new(0.0, 0.0, -7.4));

    let mut viewer = Viewer::new(config);
    viewer.load_primary_model(&mut scene, primary);
    viewer.load_side_model(&mut scene, left);
    viewer.load_side_model(&mut scene, right);

    (scene, viewer)
}

fn highlighted_count(scene: &Scene, viewer: &Viewer) -> usize {
    let index = viewer.index();
    index
        .parts()
        .iter()
        .filter(|id| !index.snapshots().matches(scene, **id))
        .count()
}

#[test]
fn indexing_twice_keeps_cardinality() {
    let mut scene = Scene::new();
    let primary = cabinet(&mut scene);

    let mut viewer = Viewer::new(ViewerConfig::default());
    let first = viewer.load_primary_model(&mut scene, primary);
    let parts = viewer.index().parts().len();
    let groups = viewer.index().groups().len();
    let members = viewer.index().groups().member_count();
    let indicators = viewer.index().indicators().len();
    let tagged = viewer.index().rotation_tagged().len();

    let second = viewer.load_primary_model(&mut scene, primary);

    assert_eq!(first.parts.len(), 10);
    assert!(second.parts.is_empty());
    assert_eq!(viewer.index().parts().len(), parts);
    assert_eq!(viewer.index().groups().len(), groups);
    assert_eq!(viewer.index().groups().member_count(), members);
    assert_eq!(viewer.index().indicators().len(), indicators);
    assert_eq!(viewer.index().rotation_tagged().len(), tagged);
    assert_eq!(viewer.rotation().tracked().count(), 2);
}

#[test]
fn at_most_one_part_is_highlighted() {
    let (mut scene, mut viewer) = loaded_viewer(ViewerConfig::default());
    let parts = viewer.index().parts().to_vec();
    let stray = scene.add_object(Object3D::new("not indexed"));
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let picked = match rng.gen_range(0..4) {
            0 => None,
            1 => Some(stray),
            _ => Some(parts[rng.gen_range(0..parts.len())]),
        };

        if rng.gen_bool(0.3) {
            if let Some(id) = picked {
                let _ = viewer.select_part(&mut scene, id);
            }
        } else {
            viewer.on_pick(&mut scene, picked);
        }

        assert!(highlighted_count(&scene, &viewer) <= 1);
        if let Some(id) = viewer.highlighted() {
            assert!(!viewer.index().snapshots().matches(&scene, id));
        }
    }
}

#[test]
fn empty_pick_restores_every_snapshot() {
    let (mut scene, mut viewer) = loaded_viewer(ViewerConfig::default());
    let parts = viewer.index().parts().to_vec();

    viewer.on_pick(&mut scene, Some(parts[3]));
    viewer.select_part(&mut scene, parts[7]).unwrap();
    assert_eq!(highlighted_count(&scene, &viewer), 1);

    assert_eq!(viewer.on_pick(&mut scene, None), None);

    for &id in &parts {
        let live = scene.get_object(id).unwrap().material.as_ref();
        assert_eq!(live, viewer.index().snapshots().get(id));
    }
}

#[test]
fn group_resize_is_absolute_and_idempotent() {
    let (mut scene, mut viewer) = loaded_viewer(ViewerConfig::default());

    viewer.resize_group(&mut scene, "shelf", 2.0, 3.0, 4.0).unwrap();
    viewer.resize_group(&mut scene, "shelf", 2.0, 3.0, 4.0).unwrap();

    let shelves = viewer.index().groups().get("shelf").unwrap();
    assert_eq!(shelves.len(), 3);
    for &id in shelves {
        assert_eq!(
            scene.get_object_transform(id).unwrap().scale(),
            Vec3::new(2.0, 3.0, 4.0)
        );
    }

    let before: Vec<Vec3> = viewer
        .index()
        .parts()
        .iter()
        .map(|id| scene.get_object_transform(*id).unwrap().scale())
        .collect();

    let result = viewer.resize_group(&mut scene, "missing", 1.0, 1.0, 1.0);
    assert!(matches!(result, Err(ViewerError::UnknownGroup(_))));

    let after: Vec<Vec3> = viewer
        .index()
        .parts()
        .iter()
        .map(|id| scene.get_object_transform(*id).unwrap().scale())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn slide_reverses_at_bounds_and_stops_at_cutoff() {
    let (mut scene, mut viewer) = loaded_viewer(ViewerConfig::default());
    let tracked: Vec<ObjectId> = viewer.slide().lanes().concat();
    assert_eq!(tracked.len(), 8);

    let t0 = ms(1000);
    viewer.start_slide(t0);

    let mut now = t0;
    let mut reversals = 0;
    loop {
        now += ms(16);
        let before = viewer.slide().direction();
        let events = viewer.update(&mut scene, now);

        if now - t0 > ms(5000) {
            assert!(events.slide_stopped());
            break;
        }

        let exited = tracked.iter().any(|id| {
            let x = scene.get_object_transform(*id).unwrap().translation().x;
            !(-5.0..=5.0).contains(&x)
        });
        let after = viewer.slide().direction();

        assert_eq!(events.slide, SlideStep::Moved { reversed: exited });
        if exited {
            assert_eq!(after, before.reversed());
            reversals += 1;
        } else {
            assert_eq!(after, before);
        }
    }

    assert!(reversals >= 2);
    assert_eq!(viewer.slide().direction(), SlideDirection::Stopped);
    assert_eq!(viewer.slide().state().start_time, None);

    let events = viewer.update(&mut scene, now + ms(16));
    assert_eq!(events.slide, SlideStep::Idle);
}

#[test]
fn slide_moves_on_the_frame_that_hits_the_cutoff() {
    let (mut scene, mut viewer) = loaded_viewer(ViewerConfig::default());
    let pane = viewer.slide().lanes()[0][0];
    let x = |scene: &Scene| scene.get_object_transform(pane).unwrap().translation().x;

    viewer.start_slide(ms(0));
    let before = x(&scene);
    let events = viewer.update(&mut scene, ms(5001));

    assert!(events.slide_stopped());
    assert!((x(&scene) - before - 0.1).abs() < 1e-6);
    assert!(!viewer.slide().is_sliding());
}

#[test]
fn explicit_stop_halts_slide_before_next_frame() {
    let (mut scene, mut viewer) = loaded_viewer(ViewerConfig::default());
    let part = viewer.slide().lanes()[0][0];

    viewer.start_slide(ms(0));
    viewer.update(&mut scene, ms(16));
    let x = scene.get_object_transform(part).unwrap().translation().x;

    viewer.stop_slide();
    viewer.update(&mut scene, ms(32));

    assert_eq!(scene.get_object_transform(part).unwrap().translation().x, x);
}

#[test]
fn rotation_opens_then_closes() {
    let config = ViewerConfig {
        rotation: RotationConfig {
            duration_ms: 1000,
            ..RotationConfig::default()
        },
        ..ViewerConfig::default()
    };
    let (mut scene, mut viewer) = loaded_viewer(config);
    let doors = viewer.index().rotation_tagged().to_vec();
    assert_eq!(doors.len(), 2);

    assert!(viewer.start_rotation(ms(0)));

    let mut now = ms(0);
    while now < ms(1000) {
        now += ms(100);
        viewer.update(&mut scene, now);
    }

    assert_eq!(viewer.rotation().phase(), RotationPhase::Backward);
    assert_eq!(viewer.rotation().angle(), FRAC_PI_2);
    for &door in &doors {
        let rotation = scene.get_object_transform(door).unwrap().rotation();
        assert!(rotation.abs_diff_eq(Quat::from_rotation_y(FRAC_PI_2), 1e-6));
    }

    // Restarting mid-cycle must not disturb it.
    assert!(!viewer.start_rotation(now));

    while now < ms(2000) {
        now += ms(100);
        viewer.update(&mut scene, now);
    }

    assert_eq!(viewer.rotation().phase(), RotationPhase::Idle);
    assert_eq!(viewer.rotation().start_time(), None);
    assert_eq!(viewer.rotation().angle(), 0.0);
    for &door in &doors {
        let rotation = scene.get_object_transform(door).unwrap().rotation();
        assert!(rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    assert!(viewer.start_rotation(now));
}

#[test]
fn toggling_one_indicator_leaves_everything_else() {
    let (scene, mut viewer) = loaded_viewer(ViewerConfig::default());
    let hosts: Vec<ObjectId> = viewer
        .index()
        .indicators()
        .iter()
        .map(|indicator| indicator.host)
        .collect();
    assert_eq!(hosts.len(), 4);

    let snapshot = |scene: &Scene, viewer: &Viewer| -> Vec<(Option<Material>, Vec3)> {
        viewer
            .index()
            .parts()
            .iter()
            .map(|id| {
                let object = scene.get_object(*id).unwrap();
                (object.material.clone(), object.transform.translation())
            })
            .collect()
    };

    let before = snapshot(&scene, &viewer);
    viewer.set_indicator_enabled(hosts[1], false).unwrap();

    for (i, &host) in hosts.iter().enumerate() {
        let enabled = viewer.index().indicators().get(host).unwrap().is_enabled();
        assert_eq!(enabled, i != 1);
    }
    assert_eq!(snapshot(&scene, &viewer), before);

    viewer.set_indicator_enabled(hosts[1], true).unwrap();
    assert!(viewer.index().indicators().iter().all(|indicator| indicator.is_enabled()));

    let not_an_indicator = viewer.index().rotation_tagged()[0];
    assert!(matches!(
        viewer.set_indicator_enabled(not_an_indicator, false),
        Err(ViewerError::UnknownIndicator(_))
    ));
}
