//! Standalone SVG output for a scene.

use crate::scene::Scene;
use std::fmt::Write as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const STREAM_STROKE: &str = "#4a4a4a";
const SELECT_STROKE: &str = "#1f6feb";
const PLACEHOLDER_FILL: &str = "#f6f8fa";
const PLACEHOLDER_STROKE: &str = "#8b949e";

/// Estimated glyph advance for the label font, in canvas units.
const LABEL_CHAR_WIDTH: f64 = 7.0;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Extra space around the computed viewBox.
    pub viewbox_padding: f64,
    /// Root `id` attribute; also prefixes internal marker ids so several
    /// canvases can live in one document.
    pub canvas_id: Option<String>,
    /// When true, write unit ids under each node.
    pub include_labels: bool,
    /// When true, label stream routes with their edge ids.
    pub include_edge_ids: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 8.0,
            canvas_id: None,
            include_labels: true,
            include_edge_ids: false,
        }
    }
}

pub fn render_scene_svg(scene: &Scene, options: &SvgRenderOptions) -> String {
    let id = options.canvas_id.as_deref().unwrap_or("floe-canvas");
    let pad = options.viewbox_padding;
    let b = scene.bounds;

    let mut out = String::new();
    let _ = write!(
        out,
        "<svg id=\"{}\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">",
        escape(id),
        fmt(b.origin.x - pad),
        fmt(b.origin.y - pad),
        fmt(b.size.width + 2.0 * pad),
        fmt(b.size.height + 2.0 * pad),
    );

    let _ = write!(
        out,
        "<defs><marker id=\"{}-arrow\" viewBox=\"0 0 10 10\" refX=\"9\" refY=\"5\" \
         markerWidth=\"7\" markerHeight=\"7\" orient=\"auto-start-reverse\">\
         <path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{STREAM_STROKE}\"/></marker></defs>",
        escape(id),
    );

    for edge in &scene.edges {
        let (stroke, width) = if edge.selected {
            (SELECT_STROKE, "2.5")
        } else {
            (STREAM_STROKE, "1.5")
        };
        let _ = write!(
            out,
            "<path d=\"M {} {} L {} {}\" fill=\"none\" stroke=\"{stroke}\" \
             stroke-width=\"{width}\" marker-end=\"url(#{}-arrow)\"/>",
            fmt(edge.from.x),
            fmt(edge.from.y),
            fmt(edge.to.x),
            fmt(edge.to.y),
            escape(id),
        );
        if options.include_edge_ids {
            let mid_x = (edge.from.x + edge.to.x) / 2.0;
            let mid_y = (edge.from.y + edge.to.y) / 2.0;
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" font-size=\"9\" text-anchor=\"middle\">{}</text>",
                fmt(mid_x),
                fmt(mid_y - 3.0),
                escape(&edge.id),
            );
        }
    }

    if let Some((from, to)) = scene.connect {
        let _ = write!(
            out,
            "<path d=\"M {} {} L {} {}\" fill=\"none\" stroke=\"{SELECT_STROKE}\" \
             stroke-width=\"1.5\" stroke-dasharray=\"4 3\"/>",
            fmt(from.x),
            fmt(from.y),
            fmt(to.x),
            fmt(to.y),
        );
    }

    for node in &scene.nodes {
        let r = node.rect;
        match &node.icon {
            Some(href) => {
                let _ = write!(
                    out,
                    "<image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>",
                    escape(href),
                    fmt(r.origin.x),
                    fmt(r.origin.y),
                    fmt(r.size.width),
                    fmt(r.size.height),
                );
            }
            None => {
                let _ = write!(
                    out,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                     fill=\"{PLACEHOLDER_FILL}\" stroke=\"{PLACEHOLDER_STROKE}\"/>",
                    fmt(r.origin.x),
                    fmt(r.origin.y),
                    fmt(r.size.width),
                    fmt(r.size.height),
                );
                let tag = fit_label(&node.unit_tag, r.size.width);
                let _ = write!(
                    out,
                    "<text x=\"{}\" y=\"{}\" font-size=\"10\" text-anchor=\"middle\">{}</text>",
                    fmt(r.center().x),
                    fmt(r.center().y + 3.0),
                    escape(&tag),
                );
            }
        }
        if node.selected {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                 fill=\"none\" stroke=\"{SELECT_STROKE}\" stroke-width=\"2\"/>",
                fmt(r.origin.x - 2.0),
                fmt(r.origin.y - 2.0),
                fmt(r.size.width + 4.0),
                fmt(r.size.height + 4.0),
            );
        }
        if options.include_labels {
            let label = fit_label(&node.id, r.size.width * 2.0);
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" font-size=\"11\" text-anchor=\"middle\">{}</text>",
                fmt(r.center().x),
                fmt(r.origin.y + r.size.height + 13.0),
                escape(&label),
            );
        }
    }

    out.push_str("</svg>");
    out
}

/// Truncates a label so its estimated rendered width fits `max_width`.
fn fit_label(label: &str, max_width: f64) -> String {
    let max_cols = (max_width / LABEL_CHAR_WIDTH).max(1.0) as usize;
    if label.width() <= max_cols {
        return label.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_cols {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        format!("{}", nearest as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ViewState, build_scene};
    use floe_core::geom::point;
    use floe_core::{DEFAULT_NODE_SIZE, FlowsheetGraph, IconRegistry, UnitType};

    fn scene_with_icon_and_placeholder() -> Scene {
        let icons = IconRegistry::default();
        let mut graph = FlowsheetGraph::new();
        graph
            .add_node(
                &icons,
                "M101",
                UnitType::Mixer,
                point(0.0, 0.0),
                DEFAULT_NODE_SIZE,
            )
            .unwrap();
        graph
            .add_node(
                &icons,
                "X101",
                UnitType::from_tag("Electrolyzer"),
                point(200.0, 0.0),
                DEFAULT_NODE_SIZE,
            )
            .unwrap();
        graph.add_edge("M101", "X101").unwrap();
        build_scene(&graph, &ViewState::default()).unwrap()
    }

    #[test]
    fn resolved_icons_render_as_images() {
        let svg = render_scene_svg(&scene_with_icon_and_placeholder(), &SvgRenderOptions::default());
        assert!(svg.contains("<image href=\"icons/mixer.svg\""));
        assert!(svg.contains("marker-end=\"url(#floe-canvas-arrow)\""));
    }

    #[test]
    fn unresolved_types_render_as_placeholders_not_errors() {
        let svg = render_scene_svg(&scene_with_icon_and_placeholder(), &SvgRenderOptions::default());
        assert!(svg.contains("<rect"));
        assert!(svg.contains(">Electrolyzer</text>"));
        assert!(svg.contains(">X101</text>"));
    }

    #[test]
    fn canvas_id_prefixes_internal_marker_ids() {
        let options = SvgRenderOptions {
            canvas_id: Some("sheet-2".to_string()),
            ..SvgRenderOptions::default()
        };
        let svg = render_scene_svg(&scene_with_icon_and_placeholder(), &options);
        assert!(svg.starts_with("<svg id=\"sheet-2\""));
        assert!(svg.contains("id=\"sheet-2-arrow\""));
    }

    #[test]
    fn labels_wider_than_their_node_are_truncated() {
        assert_eq!(fit_label("M101", 50.0), "M101");
        let long = fit_label("a-very-long-unit-name", 50.0);
        assert!(long.ends_with('…'));
        assert!(long.width() <= 7);
    }

    #[test]
    fn numbers_are_written_without_float_noise() {
        assert_eq!(fmt(50.0), "50");
        assert_eq!(fmt(-0.0000000001), "0");
        assert_eq!(fmt(12.5), "12.5");
    }
}
