// Host-side tests for scene assembly, the frame loop, layout and camera.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod anim {
    include!("../src/core/anim.rs");
}
mod layout {
    include!("../src/core/layout.rs");
}
mod camera {
    include!("../src/core/camera.rs");
}
mod scene {
    include!("../src/core/scene.rs");
}

use anim::*;
use camera::OrthoCamera;
use constants::*;
use glam::{Vec2, Vec3, Vec4};
use layout::*;
use rand::rngs::mock::StepRng;
use scene::*;

fn vp1000() -> Viewport {
    Viewport::from_height(1000.0).unwrap()
}

fn quiet_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

#[test]
fn viewport_rejects_bad_heights() {
    assert!(Viewport::from_height(0.0).is_err());
    assert!(Viewport::from_height(-5.0).is_err());
    assert!(Viewport::from_height(f32::INFINITY).is_err());
    let vp = vp1000();
    assert_eq!(vp.max_scroll_top(), 4500.0);
}

#[test]
fn built_scene_has_six_planes_and_a_pending_text_block() {
    let (scene, handles) = build_scene(&vp1000()).unwrap();
    assert_eq!(scene.len(), 7);
    assert_eq!(handles.planes.len(), 6);
    for &id in &handles.planes {
        let obj = scene.get(id).unwrap();
        assert!(obj.is_ready());
        assert_eq!(obj.rules().len(), 3);
        assert!(matches!(obj.rules()[0], AnimationRule::Move(_)));
        assert!(matches!(obj.rules()[1], AnimationRule::Rotate(_)));
        assert!(matches!(obj.rules()[2], AnimationRule::PulseScale(_)));
        assert_eq!(obj.transform.position.x, INITIAL_PARK);
        assert_eq!(obj.transform.position.y, INITIAL_PARK);
    }
    let text = scene.get(handles.text).unwrap();
    assert_eq!(text.kind, ObjectKind::TextBlock);
    assert_eq!(text.label(), "text_block");
    assert!(!text.is_ready());
    assert_eq!(text.size, Vec2::ZERO);
}

#[test]
fn plane_images_follow_the_layout_table() {
    let (scene, handles) = build_scene(&vp1000()).unwrap();
    let images: Vec<_> = handles
        .planes
        .iter()
        .map(|&id| match scene.get(id).unwrap().kind {
            ObjectKind::Plane { image } => image,
            ObjectKind::TextBlock => panic!("plane expected"),
        })
        .collect();
    assert_eq!(
        images,
        ["jx.jpg", "czw.jpg", "lxm.jpg", "gyl.jpg", "gxw.jpg", "wpf.jpg"]
    );
}

#[test]
fn plane_entry_points_and_slots() {
    let vp = vp1000();
    let side = vp.plane_size();
    assert!((side - 180.0).abs() < 1e-3);

    let first = &PLANES[0];
    let entry = first.entry_point(&vp);
    assert!((entry.x - 475.0).abs() < 1e-3);
    assert!((entry.y + 400.0).abs() < 1e-3);
    let slot = first.slot(&vp);
    assert!((slot.x + 100.0).abs() < 1e-3);
    assert!((slot.y - 250.0).abs() < 1e-3);

    // left entrants mirror into the right column, one row down
    let fourth = &PLANES[3];
    assert!((fourth.entry_point(&vp).x + 475.0).abs() < 1e-3);
    let slot = fourth.slot(&vp);
    assert!((slot.x - 100.0).abs() < 1e-3);
    assert!((slot.y - 50.0).abs() < 1e-3);
}

#[test]
fn animate_skips_pending_objects_until_activated() {
    let (mut scene, handles) = build_scene(&vp1000()).unwrap();
    let mut rng = quiet_rng();
    assert_eq!(scene.animate(0.0, &mut rng), 18);

    let layout = TextBlockLayout::new(&vp1000(), &[200.0, 260.0, 180.0]);
    assert!(scene.activate(handles.text, Vec2::new(260.0, 450.0), layout.center));
    assert!(!scene.activate(handles.text, Vec2::ONE, Vec2::ZERO));
    assert!(!scene.activate(99, Vec2::ONE, Vec2::ZERO));
    let text = scene.get(handles.text).unwrap();
    assert_eq!(text.size, Vec2::new(260.0, 450.0));
    // placed at the layout's center as soon as it becomes ready
    assert!((text.transform.position.x + 20.0).abs() < 1e-3);

    assert_eq!(scene.animate(120.0, &mut rng), 19);
    let text = scene.get(handles.text).unwrap();
    assert_eq!(text.transform.position.y, 120.0);
    assert!((text.transform.position.x + 20.0).abs() < 1e-3);
}

#[test]
fn first_frame_moves_planes_off_the_initial_park() {
    let (scene, _) = build_scene(&vp1000()).unwrap();
    let mut frames = FrameLoop::new(scene, quiet_rng());
    frames.tick(0.0, |_| {});
    for obj in frames.scene().objects().iter().filter(|o| o.is_ready()) {
        assert_eq!(obj.transform.position.x, PARK_COORD);
        assert_eq!(obj.transform.position.y, PARK_COORD);
    }
}

#[test]
fn tick_evaluates_every_rule_before_a_single_draw() {
    let mut scene = Scene::new();
    scene.add(
        ObjectKind::TextBlock,
        Vec2::ONE,
        Transform::default(),
        [AnimationRule::Follow { base_y: 10.0 }],
        Readiness::Ready,
    );
    scene.add(
        ObjectKind::Plane { image: "a.jpg" },
        Vec2::ONE,
        Transform::default(),
        [
            RotateRule::new(0.0, 100.0).unwrap().into(),
            AnimationRule::Follow { base_y: 0.0 },
        ],
        Readiness::Ready,
    );
    let mut frames = FrameLoop::new(scene, quiet_rng());
    let mut draws = 0;
    let evaluated = frames.tick(40.0, |scene| {
        draws += 1;
        // the draw sees this tick's values
        assert_eq!(scene.objects()[0].transform.position.y, 50.0);
        assert_eq!(scene.objects()[1].transform.position.y, 40.0);
    });
    assert_eq!(evaluated, 3);
    assert_eq!(draws, 1);
    assert_eq!(frames.frames(), 1);
}

#[test]
fn later_rules_on_an_object_win() {
    let mut scene = Scene::new();
    let id = scene.add(
        ObjectKind::Plane { image: "a.jpg" },
        Vec2::ONE,
        Transform::default(),
        [
            MoveRule::new(0.0, 100.0, Vec2::ZERO, Vec2::new(0.0, 100.0))
                .unwrap()
                .into(),
            AnimationRule::Follow { base_y: 1.0 },
        ],
        Readiness::Ready,
    );
    scene.animate(50.0, &mut quiet_rng());
    let t = scene.get(id).unwrap().transform;
    assert_eq!(t.position.x, 0.0);
    assert_eq!(t.position.y, 51.0);
}

#[test]
fn text_layout_stacks_lines_and_centers_block() {
    let vp = vp1000();
    let layout = TextBlockLayout::new(&vp, &[100.0, 120.0, 80.0]);
    assert!((layout.font_px - 130.0).abs() < 1e-3);
    assert_eq!(layout.line_tops.len(), 3);
    assert_eq!(layout.line_tops[0], Vec2::ZERO);
    assert!((layout.line_tops[1].y - 160.0).abs() < 1e-3);
    assert!((layout.line_tops[2].y - 320.0).abs() < 1e-3);
    assert_eq!(layout.size.x, 120.0);
    assert!((layout.size.y - 450.0).abs() < 1e-2);
    assert!((layout.center.x + 20.0).abs() < 1e-3);
    assert_eq!(layout.center.y, 0.0);

    let empty = TextBlockLayout::new(&vp, &[]);
    assert_eq!(empty.size, Vec2::ZERO);
}

#[test]
fn camera_maps_viewport_corners_to_ndc() {
    let vp = vp1000();
    let cam = OrthoCamera::for_viewport(vp.width, vp.height, 600.0, 10.0, 1000.0);
    let vp_mat = cam.view_proj();
    let top_right = vp_mat * Vec4::new(vp.width / 2.0, vp.height / 2.0, 0.0, 1.0);
    let bottom_left = vp_mat * Vec4::new(-vp.width / 2.0, -vp.height / 2.0, 0.0, 1.0);
    assert!((top_right.truncate() - Vec3::new(1.0, 1.0, top_right.z)).length() < 1e-5);
    assert!((bottom_left.truncate() - Vec3::new(-1.0, -1.0, bottom_left.z)).length() < 1e-5);
    assert!(top_right.z > 0.0 && top_right.z < 1.0);
    assert!((top_right.w - 1.0).abs() < 1e-6);
}
