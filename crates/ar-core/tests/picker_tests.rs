// Ray picking: placement gate, layer gating, nearest hit and name resolution.

mod common;

use ar_core::*;
use common::*;
use glam::Vec3;

fn pick_at(session: &ViewerSession, scene: &PartScene, world: Vec3) -> Option<OrganId> {
    let (x, y) = screen_of(world);
    SelectionPicker::new().pick(
        session.placement(),
        x,
        y,
        &camera(),
        &viewport(),
        session.layers(),
        scene,
    )
}

#[test]
fn pick_before_placement_returns_none() {
    let scene = fixture_scene();
    let placement = PlacementController::new();
    let picker = SelectionPicker::new();
    let vis = LayerVisibility::new(Layer::Organs);
    for (x, y) in [(50.0, 50.0), (0.0, 0.0), (99.0, 1.0), (-10.0, 500.0)] {
        assert_eq!(
            picker.pick(&placement, x, y, &camera(), &viewport(), &vis, &scene),
            None
        );
    }
}

#[test]
fn center_tap_on_organs_layer_picks_nearest_heart() {
    let (session, scene) = placed_session(Layer::Organs);
    // Heart_L (distance 1.9) is in front of Brain_Stem (distance 2.3).
    assert_eq!(pick_at(&session, &scene, Vec3::new(0.0, 0.0, -2.0)), Some(OrganId::Heart));
}

#[test]
fn body_layer_geometry_without_keyword_resolves_to_body() {
    let (session, scene) = placed_session(Layer::Body);
    assert_eq!(pick_at(&session, &scene, Vec3::new(0.0, 0.0, -2.0)), Some(OrganId::Body));
}

#[test]
fn hidden_layer_parts_are_never_candidates() {
    let (session, scene) = placed_session(Layer::Skeleton);
    // Only RightLung (organs) and BodySkin (body) lie on this ray.
    assert_eq!(pick_at(&session, &scene, Vec3::new(0.3, 0.0, -2.0)), None);
}

#[test]
fn lung_part_name_matches_keyword() {
    let (session, scene) = placed_session(Layer::Organs);
    assert_eq!(pick_at(&session, &scene, Vec3::new(0.3, 0.0, -2.0)), Some(OrganId::Lungs));
}

#[test]
fn owner_name_keyword_is_used_when_part_name_has_none() {
    let (session, scene) = placed_session(Layer::Skeleton);
    assert_eq!(
        pick_at(&session, &scene, Vec3::new(0.0, 0.0, -2.0)),
        Some(OrganId::Skeleton)
    );
}

#[test]
fn named_part_identity_resolves_without_keyword() {
    let (session, scene) = placed_session(Layer::Organs);
    assert_eq!(pick_at(&session, &scene, Vec3::new(0.0, 0.3, -2.0)), Some(OrganId::Heart));
}

#[test]
fn unrecognized_visible_part_falls_back_to_body() {
    let (session, scene) = placed_session(Layer::Organs);
    assert_eq!(pick_at(&session, &scene, Vec3::new(0.0, -0.3, -2.0)), Some(OrganId::Body));
}

#[test]
fn empty_space_tap_clears_selection() {
    let (mut session, scene) = placed_session(Layer::Organs);
    let (x, y) = screen_of(Vec3::new(0.0, 0.0, -2.0));
    assert_eq!(
        session.tap(x, y, &camera(), &viewport(), &scene),
        PickOutcome::Selected(OrganId::Heart)
    );
    assert!(session.selection().is_some());
    assert_eq!(
        session.tap(2.0, 2.0, &camera(), &viewport(), &scene),
        PickOutcome::Nothing
    );
    assert!(session.selection().is_none());
}

#[test]
fn yaw_rotates_parts_under_the_pointer() {
    let (mut session, mut scene) = placed_session(Layer::Organs);
    session.set_yaw_degrees(180.0, &mut scene);
    assert_eq!(pick_at(&session, &scene, Vec3::new(-0.3, 0.0, -2.0)), Some(OrganId::Lungs));
    assert_eq!(pick_at(&session, &scene, Vec3::new(0.3, 0.0, -2.0)), None);
}

#[test]
fn nearest_hit_ignores_order_and_farther_hits() {
    let hits = vec![
        RayHit { part: PartId(3), name: "far".into(), distance: 4.0 },
        RayHit { part: PartId(1), name: "near".into(), distance: 1.5 },
        RayHit { part: PartId(2), name: "mid".into(), distance: 2.0 },
    ];
    let best = nearest_hit(hits).expect("hit");
    assert_eq!(best.part, PartId(1));
    assert!(nearest_hit(Vec::new()).is_none());
}

#[test]
fn candidate_parts_follow_visible_layer() {
    let scene = fixture_scene();
    let organs = candidate_parts(&LayerVisibility::new(Layer::Organs), &scene);
    let names: Vec<&str> = organs
        .iter()
        .filter_map(|id| scene.part(*id))
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Heart_L", "RightLung", "Object_12", "Mesh_042", "Brain_Stem"]
    );
    assert!(!names.contains(&"Heart_orphan"));
}

#[test]
fn keyword_matching_is_case_insensitive_substring() {
    assert_eq!(match_keyword("Heart_L"), Some(OrganId::Heart));
    assert_eq!(match_keyword("RightLung"), Some(OrganId::Lungs));
    assert_eq!(match_keyword("OTAK_kecil"), Some(OrganId::Brain));
    assert_eq!(match_keyword("paru-paru"), Some(OrganId::Lungs));
    assert_eq!(match_keyword("Gading"), Some(OrganId::Tusk));
    assert_eq!(match_keyword("belalai_01"), Some(OrganId::Trunk));
    assert_eq!(match_keyword("TULANG"), Some(OrganId::Skeleton));
    assert_eq!(match_keyword("Mesh_042"), None);
    assert_eq!(match_keyword(""), None);
}

#[test]
fn keyword_table_order_decides_first_match() {
    // Contains both "heart" and "lung": heart is checked first.
    assert_eq!(match_keyword("lung_behind_heart"), Some(OrganId::Heart));
}
