use vip25_reveal_core::{
    IntersectionRegistry, MemoryDocument, NodeId, ObserverOptions, RecordingFrames, RevealEngine,
    RevealPhase, RevealSettings, StyleProperty,
};

type Engine = RevealEngine<MemoryDocument, IntersectionRegistry<NodeId>, RecordingFrames>;

fn load(page: &str) -> Engine {
    let doc: MemoryDocument = vip25_test_fixtures::pages::load(page).unwrap();
    let eng = RevealEngine::new(
        doc,
        IntersectionRegistry::new(ObserverOptions::default()),
        RecordingFrames::new(),
        RevealSettings::default(),
    );
    eng.initialize();
    eng
}

/// One observer pass plus the frames it schedules.
fn tick(eng: &Engine) {
    let doc = eng.document();
    let batch = eng.observer().evaluate(doc.viewport(), |n| doc.rect(*n));
    eng.handle_intersections(&batch);
    while eng.frames().take_request() {
        eng.on_animation_frame();
    }
}

fn phase(eng: &Engine, key: &str) -> Option<RevealPhase> {
    eng.state_of(&eng.document().node(key).unwrap())
}

#[test]
fn threshold_and_bottom_margin_boundary() {
    let eng = load("boundary");
    tick(&eng);
    assert_eq!(phase(&eng, "eight-percent"), Some(RevealPhase::Visible));
    assert_eq!(phase(&eng, "just-under"), Some(RevealPhase::Hidden));
    // literally on screen, but inside the 60px pre-trigger band
    assert_eq!(phase(&eng, "in-margin"), Some(RevealPhase::Hidden));
}

#[test]
fn custom_observer_options_change_the_boundary() {
    let doc: MemoryDocument = vip25_test_fixtures::pages::load("boundary").unwrap();
    let options = ObserverOptions {
        threshold: 0.0,
        root_margin: "0px".parse().unwrap(),
    };
    let eng = RevealEngine::new(
        doc,
        IntersectionRegistry::new(options),
        RecordingFrames::new(),
        RevealSettings::default(),
    );
    eng.initialize();
    tick(&eng);
    assert_eq!(phase(&eng, "just-under"), Some(RevealPhase::Visible));
    assert_eq!(phase(&eng, "in-margin"), Some(RevealPhase::Visible));
}

#[test]
fn scrolling_replays_reveals() {
    let eng = load("landing");
    tick(&eng);
    assert_eq!(phase(&eng, "hero"), Some(RevealPhase::Visible));
    assert_eq!(phase(&eng, "service-1"), Some(RevealPhase::Hidden));

    eng.document().scroll_to(1800.0);
    tick(&eng);
    assert_eq!(phase(&eng, "hero"), Some(RevealPhase::Hidden));
    for key in ["service-1", "service-2", "service-3", "service-4"] {
        assert_eq!(phase(&eng, key), Some(RevealPhase::Visible), "{key}");
    }
    let s2 = eng.document().node("service-2").unwrap();
    assert_eq!(
        eng.document().style(s2, StyleProperty::Transition).as_deref(),
        Some("opacity, transform 520ms cubic-bezier(0.25, 1, 0.5, 1) 90ms")
    );

    eng.document().scroll_to(0.0);
    tick(&eng);
    assert_eq!(phase(&eng, "hero"), Some(RevealPhase::Visible));
    assert_eq!(phase(&eng, "service-2"), Some(RevealPhase::Hidden));
    assert_eq!(
        eng.document().style(s2, StyleProperty::Transition).as_deref(),
        Some("none")
    );
}
