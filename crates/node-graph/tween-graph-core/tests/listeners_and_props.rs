use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use tween_api_core::Value;
use tween_graph_core::{NodeGraph, StyleValue, Warning};
use tween_interp_core::InterpolationConfig;

fn recorder() -> (Rc<RefCell<Vec<Value>>>, impl FnMut(&Value) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |v: &Value| sink.borrow_mut().push(v.clone()))
}

#[test]
fn attached_derived_nodes_hear_upstream_changes() {
    let mut g = NodeGraph::new();
    let v = g.create_value(0.0);
    let scaled = g
        .create_interpolation(v, InterpolationConfig::new(vec![0.0, 1.0], vec![0.0, 10.0]))
        .unwrap();
    let (seen, listener) = recorder();
    g.add_listener(scaled, listener).unwrap();

    // not attached yet: nothing propagates
    g.set_value(v, 0.5).unwrap();
    assert!(seen.borrow().is_empty());

    g.attach(scaled).unwrap();
    g.set_value(v, 0.25).unwrap();
    g.set_value(v, 1.0).unwrap();
    assert_eq!(*seen.borrow(), vec![Value::Number(2.5), Value::Number(10.0)]);
}

#[test]
fn shared_descendant_fires_once_per_change() {
    let mut g = NodeGraph::new();
    let v = g.create_value(1.0);
    let doubled = g.create_addition(v, v).unwrap();
    let squared = g.create_multiplication(doubled, doubled).unwrap();
    g.attach(squared).unwrap();
    let (seen, listener) = recorder();
    g.add_listener(squared, listener).unwrap();
    g.set_value(v, 2.0).unwrap();
    assert_eq!(*seen.borrow(), vec![Value::Number(16.0)]);
}

#[test]
fn suspended_changes_are_reported_once() {
    let mut g = NodeGraph::new();
    let v = g.create_value(0.0);
    let (seen, listener) = recorder();
    let id = g.add_listener(v, listener).unwrap();
    {
        let mut guard = g.suspend_listeners(v).unwrap();
        guard.set_value(v, 1.0).unwrap();
        {
            let mut inner = guard.suspend_listeners(v).unwrap();
            inner.set_value(v, 2.0).unwrap();
        }
        assert!(seen.borrow().is_empty());
        guard.set_value(v, 3.0).unwrap();
    }
    assert_eq!(*seen.borrow(), vec![Value::Number(3.0)]);

    assert!(g.remove_listener(v, id).unwrap());
    g.set_value(v, 4.0).unwrap();
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn props_receive_snapshots_while_attached() {
    let mut g = NodeGraph::new();
    let opacity = g.create_value(1.0);
    let updates = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&updates);
    let props = g
        .create_props(
            IndexMap::from([
                ("opacity".to_string(), StyleValue::Node(opacity)),
                ("testID".to_string(), StyleValue::Static(Value::from("card"))),
            ]),
            Some(Box::new(move |v: &Value| sink.borrow_mut().push(v.clone()))),
        )
        .unwrap();

    g.set_value(opacity, 0.8).unwrap();
    assert!(updates.borrow().is_empty());

    g.attach(props).unwrap();
    g.set_value(opacity, 0.5).unwrap();
    assert_eq!(
        *updates.borrow(),
        vec![Value::map([
            ("opacity", Value::Number(0.5)),
            ("testID", Value::from("card")),
        ])]
    );

    g.detach(props).unwrap();
    g.set_value(opacity, 0.0).unwrap();
    assert_eq!(updates.borrow().len(), 1);
}

#[test]
fn color_listeners_fire_once_per_set() {
    let mut g = NodeGraph::new();
    let color = g.create_color("red");
    let (seen, listener) = recorder();
    g.add_listener(color, listener).unwrap();

    g.set_color(color, "blue").unwrap();
    assert_eq!(*seen.borrow(), vec![Value::from("rgba(0, 0, 255, 1)")]);

    g.attach(color).unwrap();
    g.set_color(color, "#00ff00").unwrap();
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(seen.borrow()[1], Value::from("rgba(0, 255, 0, 1)"));
}

#[test]
fn unparseable_color_keeps_previous_value() {
    let mut g = NodeGraph::new();
    let color = g.create_color("red");
    g.set_color(color, "definitely not a color").unwrap();
    assert_eq!(g.get_value(color).unwrap(), Value::from("rgba(255, 0, 0, 1)"));
    assert!(g
        .diagnostics()
        .warnings()
        .any(|w| matches!(w, Warning::UnparseableColor { node, .. } if *node == color)));
}
