//! Node kinds stored in the graph arena.

use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tween_api_core::{Value, ValueMap};
use tween_color_core::Rgba;
use tween_interp_core::{ColorInterpolator, ColorSpace, InterpolationConfig, Interpolator};

use crate::animation::AnimationConfig;
use crate::ids::{AnimationId, ListenerId, NodeId};

pub type Listener = Box<dyn FnMut(&Value)>;

/// Called with the props snapshot whenever an upstream value changes.
pub type PropsCallback = Box<dyn FnMut(&Value)>;

pub(crate) type NodeList = SmallVec<[NodeId; 4]>;

/// Nested style/props structure whose leaves may be nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StyleValue {
    Node(NodeId),
    Static(Value),
    Map(IndexMap<String, StyleValue>),
    List(Vec<StyleValue>),
}

impl StyleValue {
    pub(crate) fn collect_nodes(&self, out: &mut NodeList) {
        match self {
            StyleValue::Node(id) => out.push(*id),
            StyleValue::Static(_) => {}
            StyleValue::Map(map) => map.values().for_each(|v| v.collect_nodes(out)),
            StyleValue::List(list) => list.iter().for_each(|v| v.collect_nodes(out)),
        }
    }

    pub(crate) fn snapshot(&self, values: &HashMap<NodeId, Value>) -> Value {
        match self {
            StyleValue::Node(id) => values.get(id).cloned().unwrap_or_default(),
            StyleValue::Static(v) => v.clone(),
            StyleValue::Map(map) => Value::Map(snapshot_map(map, values)),
            StyleValue::List(list) => Value::List(list.iter().map(|v| v.snapshot(values)).collect()),
        }
    }
}

impl From<NodeId> for StyleValue {
    fn from(id: NodeId) -> Self {
        StyleValue::Node(id)
    }
}

impl From<Value> for StyleValue {
    fn from(v: Value) -> Self {
        StyleValue::Static(v)
    }
}

pub(crate) fn snapshot_map(map: &IndexMap<String, StyleValue>, values: &HashMap<NodeId, Value>) -> ValueMap {
    map.iter()
        .map(|(k, v)| (k.clone(), v.snapshot(values)))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransformValue {
    Node(NodeId),
    Static(Value),
}

/// One `{property: value}` entry of a transform list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformEntry {
    pub property: String,
    pub value: TransformValue,
}

impl TransformEntry {
    pub fn animated(property: impl Into<String>, node: NodeId) -> Self {
        TransformEntry {
            property: property.into(),
            value: TransformValue::Node(node),
        }
    }

    pub fn fixed(property: impl Into<String>, value: impl Into<Value>) -> Self {
        TransformEntry {
            property: property.into(),
            value: TransformValue::Static(value.into()),
        }
    }
}

/// What a color node can be set to.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorInput {
    Rgba(Rgba),
    /// Any CSS-like color text.
    Css(String),
    /// Opaque platform color, reported as-is.
    Native(u32),
}

impl From<Rgba> for ColorInput {
    fn from(c: Rgba) -> Self {
        ColorInput::Rgba(c)
    }
}

impl From<&str> for ColorInput {
    fn from(s: &str) -> Self {
        ColorInput::Css(s.to_owned())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ValueNode {
    pub value: f64,
    pub offset: f64,
    /// Restored by `reset_animation`.
    pub initial: f64,
    pub animation: Option<AnimationId>,
    pub tracking: Option<NodeId>,
}

impl ValueNode {
    pub fn new(value: f64) -> Self {
        ValueNode {
            value,
            offset: 0.0,
            initial: value,
            animation: None,
            tracking: None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum NodeInterpolator {
    Plain(Interpolator),
    Color(ColorInterpolator),
}

impl NodeInterpolator {
    pub fn evaluate(&self, x: f64) -> Value {
        match self {
            NodeInterpolator::Plain(f) => f.evaluate(x).into(),
            NodeInterpolator::Color(f) => Value::Text(f.evaluate(x).to_rgba_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct InterpolationNode {
    pub parent: NodeId,
    pub config: InterpolationConfig,
    pub color_space: Option<ColorSpace>,
    pub eval: NodeInterpolator,
}

#[derive(Clone, Debug)]
pub(crate) struct DivisionNode {
    pub input: [NodeId; 2],
    /// Set while the divisor stays zero, so the warning is logged once.
    pub warned: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct DiffClampNode {
    pub input: NodeId,
    pub min: f64,
    pub max: f64,
    pub last: f64,
    pub value: f64,
}

#[derive(Clone, Debug)]
pub(crate) struct TrackingNode {
    pub parent: NodeId,
    pub value: NodeId,
    pub config: AnimationConfig,
}

pub(crate) struct PropsNode {
    pub props: IndexMap<String, StyleValue>,
    pub on_update: Option<PropsCallback>,
}

#[derive(Clone, Debug)]
pub(crate) struct ColorNode {
    /// r, g, b, a value nodes owned by this color.
    pub channels: [NodeId; 4],
    pub native: Option<u32>,
}

pub(crate) enum NodeKind {
    Value(ValueNode),
    Interpolation(InterpolationNode),
    Addition([NodeId; 2]),
    Subtraction([NodeId; 2]),
    Multiplication([NodeId; 2]),
    Division(DivisionNode),
    Modulo { input: NodeId, modulus: f64 },
    DiffClamp(DiffClampNode),
    Transform(Vec<TransformEntry>),
    Tracking(TrackingNode),
    Style(IndexMap<String, StyleValue>),
    Props(PropsNode),
    Color(ColorNode),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Value(_) => "value",
            NodeKind::Interpolation(_) => "interpolation",
            NodeKind::Addition(_) => "addition",
            NodeKind::Subtraction(_) => "subtraction",
            NodeKind::Multiplication(_) => "multiplication",
            NodeKind::Division(_) => "division",
            NodeKind::Modulo { .. } => "modulus",
            NodeKind::DiffClamp(_) => "diffclamp",
            NodeKind::Transform(_) => "transform",
            NodeKind::Tracking(_) => "tracking",
            NodeKind::Style(_) => "style",
            NodeKind::Props(_) => "props",
            NodeKind::Color(_) => "color",
        }
    }

    /// Nodes this one registers itself with as a child when attached.
    pub fn inputs(&self) -> NodeList {
        let mut out = NodeList::new();
        match self {
            NodeKind::Value(_) => {}
            NodeKind::Interpolation(n) => out.push(n.parent),
            NodeKind::Addition(ab) | NodeKind::Subtraction(ab) | NodeKind::Multiplication(ab) => {
                out.extend_from_slice(ab)
            }
            NodeKind::Division(d) => out.extend_from_slice(&d.input),
            NodeKind::Modulo { input, .. } => out.push(*input),
            NodeKind::DiffClamp(d) => out.push(d.input),
            NodeKind::Transform(entries) => {
                for entry in entries {
                    if let TransformValue::Node(id) = &entry.value {
                        out.push(*id);
                    }
                }
            }
            NodeKind::Tracking(t) => out.push(t.parent),
            NodeKind::Style(style) => style.values().for_each(|v| v.collect_nodes(&mut out)),
            NodeKind::Props(p) => p.props.values().for_each(|v| v.collect_nodes(&mut out)),
            NodeKind::Color(c) => out.extend_from_slice(&c.channels),
        }
        out
    }

    /// Every node this one keeps alive.
    pub fn parents(&self) -> NodeList {
        let mut out = self.inputs();
        if let NodeKind::Tracking(t) = self {
            out.push(t.value);
        }
        out
    }

    /// Props and tracking nodes react to upstream changes instead of being
    /// pulled.
    pub fn is_updatable(&self) -> bool {
        matches!(self, NodeKind::Props(_) | NodeKind::Tracking(_))
    }
}

pub(crate) struct NodeEntry {
    pub kind: NodeKind,
    /// Attached dependents, notified on change.
    pub children: NodeList,
    pub listeners: IndexMap<ListenerId, Listener>,
    pub attached: bool,
    /// Nodes holding this one as a parent.
    pub dependents: u32,
    /// Held by the host until released.
    pub retained: bool,
    pub suspend_depth: u32,
    pub pending_notify: bool,
}

impl NodeEntry {
    pub fn new(kind: NodeKind) -> Self {
        NodeEntry {
            kind,
            children: NodeList::new(),
            listeners: IndexMap::new(),
            attached: false,
            dependents: 0,
            retained: true,
            suspend_depth: 0,
            pending_notify: false,
        }
    }
}
