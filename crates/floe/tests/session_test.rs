use floe::editor::{EditorSession, Error};
use floe::geom::point;
use floe::render::{PointerButton, PointerEvent, Selection, SvgRenderOptions};
use floe::{Command, FlowsheetDescription};
use futures::executor::block_on;

fn sample_description() -> FlowsheetDescription {
    serde_json::from_str(
        r#"{
            "units": {
                "M101": "Mixer",
                "H101": "Heater",
                "R101": "Reactor",
                "F101": "Flash",
                "S101": "Separator",
                "C101": "PressureChanger",
                "F102": "Flash"
            },
            "streams": {
                "M101": ["H101"],
                "H101": ["R101"],
                "R101": ["F101"],
                "F101": ["S101", "F102"],
                "S101": ["C101"],
                "C101": ["M101"]
            }
        }"#,
    )
    .unwrap()
}

fn sample_session() -> EditorSession {
    let mut session = EditorSession::new("hda demo");
    session.bootstrap(&sample_description()).unwrap();
    session
}

#[test]
fn save_then_load_resumes_the_session_exactly() {
    let mut session = sample_session();
    // Make the state visibly hand-edited before saving.
    session
        .apply(Command::MoveUnit {
            id: "R101".to_string(),
            to: point(400.0, 120.0),
        })
        .unwrap();
    let saved = session.save().unwrap();
    assert_eq!(saved.file_name, "hda-demo.floe.vis");

    let mut resumed = EditorSession::new("hda demo");
    block_on(resumed.load_from(async { Ok(saved.bytes.clone()) })).unwrap();

    assert_eq!(resumed.graph().to_snapshot(), session.graph().to_snapshot());
    assert_eq!(
        resumed.graph().node("R101").unwrap().position,
        point(400.0, 120.0)
    );
}

#[test]
fn a_failed_load_keeps_the_diagram_on_screen() {
    let mut session = sample_session();
    let before = session.graph().to_snapshot();

    let err = session.load_bytes(b"{ definitely not a snapshot").unwrap_err();
    assert!(matches!(err, Error::Model(floe::Error::Parse(_))));
    assert_eq!(session.graph().to_snapshot(), before);
    assert!(!session.load_pending());

    // The next load is admitted normally and replaces the model wholesale.
    let two_units = {
        let mut small = EditorSession::new("small");
        small
            .bootstrap(
                &serde_json::from_str(r#"{ "units": { "F201": "Feed", "P201": "Product" } }"#)
                    .unwrap(),
            )
            .unwrap();
        small.save().unwrap()
    };
    session.load_bytes(&two_units.bytes).unwrap();
    assert_eq!(session.graph().node_count(), 2);
    assert!(session.graph().node("M101").is_none());
}

#[test]
fn a_failed_file_read_aborts_the_load_and_frees_the_adapter() {
    let mut session = sample_session();
    let before = session.graph().to_snapshot();

    let err = block_on(session.load_from(async {
        Err(std::io::Error::other("connector dropped the file read"))
    }))
    .unwrap_err();
    assert!(matches!(err, Error::Read(_)));
    assert_eq!(session.graph().to_snapshot(), before);
    assert!(!session.load_pending());
}

#[test]
fn dragging_a_unit_moves_it_in_the_model_before_the_next_frame() {
    let mut session = sample_session();
    let start = session.graph().node("M101").unwrap().position;

    session
        .pointer(PointerEvent::Down {
            at: start + floe::geom::vector(10.0, 10.0),
            button: PointerButton::Primary,
        })
        .unwrap();
    session
        .pointer(PointerEvent::Moved {
            at: start + floe::geom::vector(110.0, 40.0),
        })
        .unwrap();
    let applied = session
        .pointer(PointerEvent::Up {
            at: start + floe::geom::vector(110.0, 40.0),
        })
        .unwrap();

    assert_eq!(applied.len(), 1);
    assert_eq!(
        session.graph().node("M101").unwrap().position,
        start + floe::geom::vector(100.0, 30.0)
    );
    // The gesture is over; the scene shows the model position with no offset.
    let scene = session.scene().unwrap();
    let node = scene.nodes.iter().find(|n| n.id == "M101").unwrap();
    assert_eq!(node.rect.origin, start + floe::geom::vector(100.0, 30.0));
}

#[test]
fn connecting_two_units_adds_a_directed_stream() {
    let mut session = sample_session();
    let f102 = session.graph().node("F102").unwrap().position;
    let m101 = session.graph().node("M101").unwrap().position;
    let edges_before = session.graph().edge_count();

    session
        .pointer(PointerEvent::Down {
            at: f102 + floe::geom::vector(25.0, 25.0),
            button: PointerButton::Connect,
        })
        .unwrap();
    let applied = session
        .pointer(PointerEvent::Up {
            at: m101 + floe::geom::vector(25.0, 25.0),
        })
        .unwrap();

    assert_eq!(applied.len(), 1);
    assert_eq!(session.graph().edge_count(), edges_before + 1);
    assert!(
        session
            .graph()
            .edges()
            .any(|e| e.source == "F102" && e.target == "M101")
    );
}

#[test]
fn selection_survives_rendering_but_not_a_load() {
    let mut session = sample_session();
    let at = session.graph().node("H101").unwrap().position;
    session
        .pointer(PointerEvent::Down {
            at: at + floe::geom::vector(5.0, 5.0),
            button: PointerButton::Primary,
        })
        .unwrap();
    session.pointer(PointerEvent::Up { at: at + floe::geom::vector(5.0, 5.0) }).unwrap();
    assert_eq!(
        session.view().selection,
        Some(Selection::Unit("H101".to_string()))
    );

    let svg = session.render_svg(&SvgRenderOptions::default()).unwrap();
    assert!(svg.contains("<image href=\"icons/heater.svg\""));

    let saved = session.save().unwrap();
    session.load_bytes(&saved.bytes).unwrap();
    assert_eq!(session.view().selection, None);
}

#[test]
fn bootstrap_resolves_icons_and_tolerates_boundary_units() {
    let session = sample_session();
    assert_eq!(session.graph().node_count(), 7);
    assert_eq!(session.graph().edge_count(), 7);
    for (id, icon) in [
        ("M101", "icons/mixer.svg"),
        ("H101", "icons/heater.svg"),
        ("R101", "icons/reactor.svg"),
        ("S101", "icons/splitter.svg"),
        ("C101", "icons/compressor.svg"),
        ("F102", "icons/flash.svg"),
    ] {
        assert_eq!(session.graph().node(id).unwrap().icon.as_deref(), Some(icon));
    }
}
