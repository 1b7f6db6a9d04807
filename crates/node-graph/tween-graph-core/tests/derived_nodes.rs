use indexmap::IndexMap;
use tween_api_core::Value;
use tween_graph_core::{GraphError, NodeGraph, StyleValue, TransformEntry, Warning};
use tween_interp_core::{Extrapolation, InterpolationConfig};

fn division_warnings(g: &NodeGraph) -> usize {
    g.diagnostics()
        .warnings()
        .filter(|w| matches!(w, Warning::DivisionByZero { .. }))
        .count()
}

#[test]
fn modulo_stays_within_modulus() {
    let mut g = NodeGraph::new();
    for input in [-7.5, -3.0, -0.25, 0.0, 2.9, 10.0, 1.0e6] {
        for m in [0.5, 3.0, 7.25] {
            let v = g.create_value(input);
            let n = g.create_modulo(v, m).unwrap();
            let r = g.get_number(n).unwrap();
            assert!((0.0..m).contains(&r), "{input} mod {m} = {r}");
        }
    }
}

#[test]
fn zero_divisor_warns_once_per_streak() {
    let mut g = NodeGraph::new();
    let a = g.create_value(10.0);
    let b = g.create_value(5.0);
    let div = g.create_division(a, b).unwrap();

    assert_eq!(g.get_number(div).unwrap(), 2.0);
    g.set_value(b, 0.0).unwrap();
    assert_eq!(g.get_number(div).unwrap(), 0.0);
    assert_eq!(g.get_number(div).unwrap(), 0.0);
    g.set_value(b, 5.0).unwrap();
    assert_eq!(g.get_number(div).unwrap(), 2.0);
    assert_eq!(division_warnings(&g), 1);

    g.set_value(b, 0.0).unwrap();
    assert_eq!(g.get_number(div).unwrap(), 0.0);
    assert_eq!(division_warnings(&g), 2);
}

#[test]
fn diff_clamp_accumulates_within_bounds() {
    let mut g = NodeGraph::new();
    let scroll = g.create_value(0.0);
    let clamp = g.create_diff_clamp(scroll, 0.0, 10.0).unwrap();
    let mut seen = Vec::new();
    for v in [0.0, 5.0, 3.0, 20.0] {
        g.set_value(scroll, v).unwrap();
        seen.push(g.get_number(clamp).unwrap());
    }
    assert_eq!(seen, vec![0.0, 5.0, 3.0, 10.0]);

    // moving back from 20 to 15 subtracts from the clamped value
    g.set_value(scroll, 15.0).unwrap();
    assert_eq!(g.get_number(clamp).unwrap(), 5.0);

    assert!(matches!(
        g.create_diff_clamp(scroll, 3.0, 1.0),
        Err(GraphError::InvalidBounds { .. })
    ));
}

#[test]
fn style_snapshot_mixes_nodes_and_constants() {
    let mut g = NodeGraph::new();
    let progress = g.create_value(0.5);
    let opacity = g
        .create_interpolation(
            progress,
            InterpolationConfig::new(vec![0.0, 1.0], vec![0.0, 1.0])
                .with_extrapolate(Extrapolation::Clamp),
        )
        .unwrap();
    let rotate = g
        .create_interpolation(progress, InterpolationConfig::new(vec![0.0, 1.0], vec!["0deg", "180deg"]))
        .unwrap();
    let transform = g
        .create_transform(vec![
            TransformEntry::animated("rotate", rotate),
            TransformEntry::fixed("scale", 2.0),
        ])
        .unwrap();
    let style = g
        .create_style(IndexMap::from([
            ("opacity".to_string(), StyleValue::Node(opacity)),
            ("transform".to_string(), StyleValue::Node(transform)),
            ("color".to_string(), StyleValue::Static(Value::from("red"))),
            (
                "shadowOffset".to_string(),
                StyleValue::Map(IndexMap::from([
                    ("width".to_string(), StyleValue::Static(Value::Number(0.0))),
                    ("height".to_string(), StyleValue::Node(progress)),
                ])),
            ),
        ]))
        .unwrap();

    let expected = Value::map([
        ("opacity", Value::Number(0.5)),
        (
            "transform",
            Value::List(vec![
                Value::map([("rotate", Value::from("90deg"))]),
                Value::map([("scale", Value::Number(2.0))]),
            ]),
        ),
        ("color", Value::from("red")),
        (
            "shadowOffset",
            Value::map([("width", Value::Number(0.0)), ("height", Value::Number(0.5))]),
        ),
    ]);
    assert_eq!(g.get_value(style).unwrap(), expected);

    g.set_value(progress, 1.0).unwrap();
    let snapshot = g.get_value(style).unwrap();
    assert_eq!(snapshot.as_map().unwrap()["opacity"], Value::Number(1.0));
}

#[test]
fn released_nodes_are_collected_with_their_parents() {
    let mut g = NodeGraph::new();
    let a = g.create_value(1.0);
    let b = g.create_value(2.0);
    let sum = g.create_addition(a, b).unwrap();
    g.release(a).unwrap();
    // still an input of `sum`
    assert!(g.contains(a));
    g.release(sum).unwrap();
    assert!(!g.contains(sum));
    assert!(!g.contains(a));
    assert!(g.contains(b));
    assert!(matches!(g.get_value(sum), Err(GraphError::UnknownNode(_))));
}
