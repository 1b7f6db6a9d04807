use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tween_api_core::json::value_from_json;
use tween_api_core::Value;
use tween_graph_core::{NativeConfig, NodeGraph, StyleValue, TransformEntry};
use tween_interp_core::{ColorSpace, Extrapolation, InterpolationConfig};

fn close(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => (x - y).abs() < 1e-9,
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| close(a, b))
        }
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, a)| y.get(k).map_or(false, |b| close(a, b)))
        }
        _ => a == b,
    }
}

#[test]
fn export_then_import_reproduces_values() {
    let mut g = NodeGraph::new();
    let progress = g.create_value(0.25);
    g.set_offset(progress, 0.25).unwrap();
    let fade = g
        .create_interpolation(
            progress,
            InterpolationConfig::new(vec![0.0, 1.0], vec![1.0, 0.0])
                .with_extrapolate(Extrapolation::Clamp),
        )
        .unwrap();
    let tint = g
        .create_color_interpolation(
            progress,
            InterpolationConfig::new(vec![0.0, 1.0], vec!["red", "blue"]),
            ColorSpace::Hsv,
        )
        .unwrap();
    let spin = g
        .create_interpolation(progress, InterpolationConfig::new(vec![0.0, 1.0], vec!["0deg", "360deg"]))
        .unwrap();
    let transform = g
        .create_transform(vec![
            TransformEntry::animated("rotate", spin),
            TransformEntry::fixed("scale", 1.5),
        ])
        .unwrap();
    let style = g
        .create_style(IndexMap::from([
            ("opacity".to_string(), StyleValue::Node(fade)),
            ("backgroundColor".to_string(), StyleValue::Node(tint)),
            ("transform".to_string(), StyleValue::Node(transform)),
        ]))
        .unwrap();
    let badge = g.create_color("#336699");

    let exported = g.export_configs().unwrap();
    assert_eq!(exported.len(), g.len());
    let json = serde_json::to_string(&exported).unwrap();
    let configs: Vec<(u64, NativeConfig)> = serde_json::from_str(&json).unwrap();

    let mut other = NodeGraph::new();
    let map = other.import_configs(&configs).unwrap();
    assert_eq!(other.len(), g.len());

    for id in [progress, fade, tint, spin, transform, style, badge] {
        let tag = g.node_tag(id).unwrap();
        let copy = map[&tag];
        let (a, b) = (g.get_value(id).unwrap(), other.get_value(copy).unwrap());
        assert!(close(&a, &b), "{}: {a:?} vs {b:?}", g.kind_name(id).unwrap());
    }
}

#[test]
fn exported_inputs_precede_their_dependents() {
    let mut g = NodeGraph::new();
    let a = g.create_value(1.0);
    let b = g.create_value(2.0);
    let sum = g.create_addition(a, b).unwrap();
    let wrapped = g.create_modulo(sum, 2.0).unwrap();
    let order: Vec<u64> = g.export_configs().unwrap().into_iter().map(|(tag, _)| tag).collect();
    let pos = |id| {
        let tag = g.node_tag(id).unwrap();
        order.iter().position(|t| *t == tag).unwrap()
    };
    assert!(pos(a) < pos(sum) && pos(b) < pos(sum));
    assert!(pos(sum) < pos(wrapped));
}

#[derive(Deserialize)]
struct Step {
    set: (u64, f64),
    expect: BTreeMap<String, JsonValue>,
}

#[test]
fn fixture_graphs_evaluate_as_scripted() {
    for name in tween_test_fixtures::graphs::keys() {
        let configs: Vec<(u64, NativeConfig)> = tween_test_fixtures::graphs::configs(&name).unwrap();
        let mut g = NodeGraph::new();
        let nodes = g.import_configs(&configs).unwrap();
        let steps: Vec<Step> = tween_test_fixtures::graphs::steps(&name).unwrap().unwrap_or_default();
        for (i, step) in steps.iter().enumerate() {
            let (tag, value) = step.set;
            g.set_value(nodes[&tag], value).unwrap();
            for (tag, expected) in &step.expect {
                let tag: u64 = tag.parse().unwrap();
                let got = g.get_value(nodes[&tag]).unwrap();
                let want = value_from_json(expected).unwrap();
                assert!(close(&got, &want), "{name} step {i} node {tag}: {got:?} vs {want:?}");
            }
        }
    }
}
