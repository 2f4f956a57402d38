use crate::{FlowsheetDescription, FlowsheetGraph, IconRegistry, bootstrap};

mod graph;

/// The reference flowsheet from the process-modeling side: a mixer feeding a
/// heated reactor loop with a two-way flash split and a recycle compressor.
pub(crate) fn sample_description() -> FlowsheetDescription {
    let json = r#"{
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
    }"#;
    serde_json::from_str(json).unwrap()
}

pub(crate) fn sample_graph() -> FlowsheetGraph {
    bootstrap(&sample_description(), &IconRegistry::default()).unwrap()
}
