// Viewer session: metadata degradation, layer policy and messages.

mod common;

use ar_core::*;
use common::*;
use glam::Vec3;
use std::time::Duration;

#[test]
fn metadata_failure_shows_raw_id_without_crash() {
    let (mut session, scene) = placed_session(Layer::Organs);
    session.on_metadata_result(Err(ViewerError::MetadataUnavailable("404".into())));
    assert!(session.catalog().is_empty());
    assert_eq!(
        session.message().map(|m| m.kind),
        Some(MessageKind::Warning)
    );

    let (x, y) = screen_of(Vec3::new(0.0, 0.0, -2.0));
    assert_eq!(
        session.tap(x, y, &camera(), &viewport(), &scene),
        PickOutcome::Selected(OrganId::Heart)
    );
    let tip = session.selection().expect("tooltip");
    assert_eq!(tip.title, "heart");
    assert!(tip.short_desc.is_empty());
    assert!(tip.long_desc.is_empty());
    assert_eq!(render_tooltip_html(tip), "<strong>heart</strong>");
}

#[test]
fn metadata_records_drive_tooltip_text() {
    let (mut session, scene) = placed_session(Layer::Organs);
    let catalog = OrganCatalog::from_json(
        r#"[{"id":"heart","displayName":"Jantung","shortDesc":"Pumps blood","longDesc":"Four chambers."}]"#,
    );
    session.on_metadata_result(catalog);
    let (x, y) = screen_of(Vec3::new(0.0, 0.0, -2.0));
    _ = session.tap(x, y, &camera(), &viewport(), &scene);
    let tip = session.selection().expect("tooltip");
    assert_eq!(tip.title, "Jantung");
    assert_eq!(tip.short_desc, "Pumps blood");
    assert_eq!(tip.long_desc, "Four chambers.");
}

#[test]
fn organ_without_record_borrows_body_record() {
    let (mut session, scene) = placed_session(Layer::Organs);
    let catalog = OrganCatalog::from_json(
        r#"[{"id":"body","displayName":"Elephant","shortDesc":"Whole animal"}]"#,
    );
    session.on_metadata_result(catalog);
    let (x, y) = screen_of(Vec3::new(0.0, 0.0, -2.0));
    assert_eq!(
        session.tap(x, y, &camera(), &viewport(), &scene),
        PickOutcome::Selected(OrganId::Heart)
    );
    let tip = session.selection().expect("tooltip");
    assert_eq!(tip.id, OrganId::Heart);
    assert_eq!(tip.title, "Elephant");
    assert_eq!(tip.short_desc, "Whole animal");
    assert!(tip.long_desc.is_empty());
}

#[test]
fn layer_switch_is_ignored_before_placement() {
    let mut scene = fixture_scene();
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.begin_ar(&mut scene);
    assert!(!session.select_layer(Layer::Organs, &mut scene));
    assert_eq!(session.layers().selected(), Layer::Body);
    assert!(!session.controls_enabled());
}

#[test]
fn layer_resets_to_initial_on_new_placement_by_default() {
    let (mut session, mut scene) = placed_session(Layer::Organs);
    session.end_ar(&mut scene);
    session.begin_ar(&mut scene);
    _ = session.on_candidate_pose(Some(anchor_pose()));
    session.confirm_placement(&mut scene).expect("placed again");
    assert_eq!(session.layers().selected(), Layer::Body);
    assert!(scene.layer_visible(Layer::Body));
    assert!(!scene.layer_visible(Layer::Organs));
}

#[test]
fn layer_persists_when_reset_policy_is_off() {
    let mut scene = fixture_scene();
    let config = ViewerConfig {
        reset_layer_on_place: false,
        ..ViewerConfig::default()
    };
    let mut session = ViewerSession::new(config);
    session.begin_ar(&mut scene);
    _ = session.on_candidate_pose(Some(anchor_pose()));
    session.confirm_placement(&mut scene).expect("placed");
    session.select_layer(Layer::Skeleton, &mut scene);
    session.end_ar(&mut scene);

    session.begin_ar(&mut scene);
    _ = session.on_candidate_pose(Some(anchor_pose()));
    session.confirm_placement(&mut scene).expect("placed again");
    assert_eq!(session.layers().selected(), Layer::Skeleton);
    assert!(scene.layer_visible(Layer::Skeleton));
}

#[test]
fn failed_confirmation_sets_transient_message() {
    let mut scene = fixture_scene();
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.begin_ar(&mut scene);
    assert_eq!(
        session.confirm_placement(&mut scene),
        Err(ViewerError::NoSurfaceDetected)
    );
    let msg = session.message().expect("message").clone();
    assert_eq!(msg.kind, MessageKind::Warning);
    assert_eq!(msg.text, ViewerError::NoSurfaceDetected.user_message());
    assert!(!scene.model_visible());

    assert!(!session.expire_message(msg.shown_at));
    assert!(session.expire_message(msg.shown_at + Duration::from_secs(10)));
    assert!(session.message().is_none());
}

#[test]
fn blocking_messages_do_not_expire() {
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.report(&ViewerError::EnvironmentUnsupported("no navigator.xr".into()));
    let shown = session.message().expect("message").shown_at;
    assert!(!session.expire_message(shown + Duration::from_secs(3600)));
    assert_eq!(
        session.message().map(|m| m.kind),
        Some(MessageKind::Blocking)
    );
}

#[test]
fn preview_mode_places_model_in_front_of_camera() {
    let mut scene = fixture_scene();
    let config = ViewerConfig {
        ar_placement: false,
        ..ViewerConfig::default()
    };
    let mut session = ViewerSession::new(config);
    let anchor = session.place_preview(&mut scene).expect("preview placement");
    assert!(session.placement().is_placed());
    assert!(anchor.position.z < 0.0);
    assert!(scene.model_visible());
}

#[test]
fn scale_follows_configured_range() {
    let mut scene = fixture_scene();
    let config = ViewerConfig {
        min_scale: 0.5,
        max_scale: 1.5,
        ..ViewerConfig::default()
    };
    let mut session = ViewerSession::new(config);
    session.place_preview(&mut scene).expect("placed");
    session.set_scale(5.0, &mut scene);
    assert_eq!(session.adjustments().scale, 1.5);
    assert_eq!(scene.transform().map(|t| t.scale()), Some(1.5));
}

#[test]
fn only_one_session_request_is_in_flight() {
    let mut scene = fixture_scene();
    let mut session = ViewerSession::new(ViewerConfig::default());
    assert!(session.request_ar());
    assert!(!session.request_ar(), "second tap while pending");
    assert!(session.message().is_none());

    session.begin_ar(&mut scene);
    assert!(!session.request_ar(), "session already running");

    session.end_ar(&mut scene);
    assert!(session.request_ar());
}

#[test]
fn refused_session_request_can_be_retried() {
    let mut session = ViewerSession::new(ViewerConfig::default());
    assert!(session.request_ar());
    session.ar_request_failed(&ViewerError::SessionStartFailure("NotAllowedError".into()));
    assert!(!session.ar_active());
    assert_eq!(
        session.message().map(|m| m.kind),
        Some(MessageKind::Warning)
    );
    assert!(session.request_ar());
}
