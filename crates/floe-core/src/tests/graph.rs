use crate::geom::{point, size};
use crate::tests::sample_graph;
use crate::{DEFAULT_NODE_SIZE, Error, FlowsheetGraph, IconRegistry, UnitType};

fn graph_with(ids: &[(&str, UnitType)]) -> FlowsheetGraph {
    let icons = IconRegistry::default();
    let mut graph = FlowsheetGraph::new();
    for (index, (id, unit_type)) in ids.iter().enumerate() {
        graph
            .add_node(
                &icons,
                *id,
                unit_type.clone(),
                FlowsheetGraph::staircase_position(index),
                DEFAULT_NODE_SIZE,
            )
            .unwrap();
    }
    graph
}

#[test]
fn add_node_rejects_duplicate_ids() {
    let icons = IconRegistry::default();
    let mut graph = graph_with(&[("M101", UnitType::Mixer)]);
    let err = graph
        .add_node(
            &icons,
            "M101",
            UnitType::Heater,
            point(0.0, 0.0),
            DEFAULT_NODE_SIZE,
        )
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateId { id } if id == "M101"));
    // The original node is untouched.
    assert_eq!(graph.node("M101").unwrap().unit_type, UnitType::Mixer);
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn add_edge_requires_both_endpoints() {
    let mut graph = graph_with(&[("M101", UnitType::Mixer)]);
    let err = graph.add_edge("M101", "H101").unwrap_err();
    assert!(matches!(err, Error::UnknownNode { id } if id == "H101"));
    let err = graph.add_edge("X999", "M101").unwrap_err();
    assert!(matches!(err, Error::UnknownNode { id } if id == "X999"));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn parallel_streams_between_the_same_pair_are_permitted() {
    let mut graph = graph_with(&[("F101", UnitType::Flash), ("S101", UnitType::Separator)]);
    let a = graph.add_edge("F101", "S101").unwrap().id.clone();
    let b = graph.add_edge("F101", "S101").unwrap().id.clone();
    assert_ne!(a, b);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edges_of("F101").count(), 2);
}

#[test]
fn edge_set_matches_the_calls_made() {
    let graph = sample_graph();
    let pairs: Vec<(&str, &str)> = graph
        .edges()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("M101", "H101"),
            ("H101", "R101"),
            ("R101", "F101"),
            ("F101", "S101"),
            ("F101", "F102"),
            ("S101", "C101"),
            ("C101", "M101"),
        ]
    );
    // Every endpoint resolves to a live node.
    for edge in graph.edges() {
        assert!(graph.has_node(&edge.source));
        assert!(graph.has_node(&edge.target));
    }
}

#[test]
fn remove_node_cascades_incident_edges() {
    let mut graph = sample_graph();
    let before = graph.edge_count();
    graph.remove_node("F101").unwrap();
    assert!(!graph.has_node("F101"));
    // R101->F101, F101->S101 and F101->F102 are gone with it.
    assert_eq!(graph.edge_count(), before - 3);
    assert_eq!(graph.edges_of("F101").count(), 0);
    assert!(
        graph
            .edges()
            .all(|e| e.source != "F101" && e.target != "F101")
    );
}

#[test]
fn remove_node_on_an_absent_id_is_an_error() {
    let mut graph = sample_graph();
    let err = graph.remove_node("Z999").unwrap_err();
    assert!(matches!(err, Error::UnknownNode { id } if id == "Z999"));
}

#[test]
fn remove_edge_keeps_the_remaining_edges_addressable() {
    let mut graph = sample_graph();
    let ids: Vec<String> = graph.edges().map(|e| e.id.clone()).collect();
    graph.remove_edge(&ids[2]).unwrap();
    assert_eq!(graph.edge_count(), ids.len() - 1);
    for id in ids.iter().filter(|id| **id != ids[2]) {
        assert!(graph.edge(id).is_some());
    }
    let err = graph.remove_edge(&ids[2]).unwrap_err();
    assert!(matches!(err, Error::UnknownEdge { .. }));
}

#[test]
fn move_and_resize_update_visual_attributes() {
    let mut graph = sample_graph();
    graph.move_node("M101", point(320.0, 40.0)).unwrap();
    graph.resize_node("M101", size(80.0, 64.0)).unwrap();
    let node = graph.node("M101").unwrap();
    assert_eq!(node.position, point(320.0, 40.0));
    assert_eq!(node.size, size(80.0, 64.0));
}

#[test]
fn set_unit_type_re_resolves_the_icon() {
    let icons = IconRegistry::default();
    let mut graph = sample_graph();
    let heater_icon = graph.node("H101").unwrap().icon.clone();
    assert_eq!(heater_icon.as_deref(), Some("icons/heater.svg"));

    graph
        .set_unit_type(&icons, "H101", UnitType::Flash)
        .unwrap();
    assert_eq!(
        graph.node("H101").unwrap().icon.as_deref(),
        Some("icons/flash.svg")
    );

    graph
        .set_unit_type(&icons, "H101", UnitType::Unknown("Electrolyzer".into()))
        .unwrap();
    assert_eq!(graph.node("H101").unwrap().icon, None);
}

#[test]
fn staircase_positions_step_diagonally_from_the_origin() {
    let graph = sample_graph();
    for (index, node) in graph.nodes().enumerate() {
        assert_eq!(node.position, FlowsheetGraph::staircase_position(index));
    }
    let p0 = FlowsheetGraph::staircase_position(0);
    let p3 = FlowsheetGraph::staircase_position(3);
    assert_eq!(p3.x - p0.x, 3.0 * crate::PLACEMENT_STEP);
    assert_eq!(p3.y - p0.y, 3.0 * crate::PLACEMENT_STEP);
}
