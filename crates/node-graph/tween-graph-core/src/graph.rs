//! The node arena: creation, lifetime, attachment and pull evaluation.

use hashbrown::{HashMap, HashSet};
use indexmap::IndexMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use tween_api_core::{Value, ValueMap};
use tween_color_core::Rgba;
use tween_interp_core::{
    ColorInterpolator, ColorSpace, InterpContext, InterpolationConfig, Interpolator, OutputRange,
};

use crate::animation::driver::RunningAnimation;
use crate::animation::{AnimationConfig, FrameRequests};
use crate::config::GraphConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::GraphError;
use crate::ids::{AnimationId, IdAllocator, NodeId};
use crate::nodes::{
    snapshot_map, DiffClampNode, DivisionNode, InterpolationNode, NodeEntry, NodeInterpolator,
    NodeKind, NodeList, PropsCallback, PropsNode, StyleValue, TrackingNode, TransformEntry,
    TransformValue, ValueNode,
};

/// Owns every node of one evaluation context.
///
/// Nodes reference their parents by [`NodeId`]; parents must exist when a
/// node is created, so the graph is acyclic by construction.
pub struct NodeGraph {
    pub(crate) nodes: SlotMap<NodeId, NodeEntry>,
    pub(crate) ctx: InterpContext,
    pub(crate) config: GraphConfig,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) ids: IdAllocator,
    pub(crate) frames: FrameRequests,
    pub(crate) animations: HashMap<AnimationId, RunningAnimation>,
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        NodeGraph {
            nodes: SlotMap::with_key(),
            ctx: InterpContext::new(),
            diagnostics: Diagnostics::new(config.diagnostics),
            config,
            ids: IdAllocator::new(),
            frames: FrameRequests::default(),
            animations: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn context(&self) -> &InterpContext {
        &self.ctx
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Wire name of the node's kind (`"value"`, `"interpolation"`, ...).
    pub fn kind_name(&self, id: NodeId) -> Result<&'static str, GraphError> {
        Ok(self.entry(id)?.kind.name())
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.nodes.get(id).map_or(false, |e| e.attached)
    }

    /// Attached dependents of `id`, in attachment order.
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        Ok(self.entry(id)?.children.to_vec())
    }

    pub(crate) fn entry(&self, id: NodeId) -> Result<&NodeEntry, GraphError> {
        self.nodes.get(id).ok_or(GraphError::UnknownNode(id))
    }

    pub(crate) fn entry_mut(&mut self, id: NodeId) -> Result<&mut NodeEntry, GraphError> {
        self.nodes.get_mut(id).ok_or(GraphError::UnknownNode(id))
    }

    pub(crate) fn value_node(&self, id: NodeId) -> Result<&ValueNode, GraphError> {
        match &self.entry(id)?.kind {
            NodeKind::Value(v) => Ok(v),
            other => Err(GraphError::WrongKind {
                node: id,
                expected: "value",
                found: other.name(),
            }),
        }
    }

    pub(crate) fn value_node_mut(&mut self, id: NodeId) -> Result<&mut ValueNode, GraphError> {
        match &mut self.entry_mut(id)?.kind {
            NodeKind::Value(v) => Ok(v),
            other => Err(GraphError::WrongKind {
                node: id,
                expected: "value",
                found: other.name(),
            }),
        }
    }

    fn require_all(&self, ids: &[NodeId]) -> Result<(), GraphError> {
        for id in ids {
            self.entry(*id)?;
        }
        Ok(())
    }

    pub(crate) fn insert(&mut self, kind: NodeKind) -> NodeId {
        for parent in kind.parents() {
            if let Some(entry) = self.nodes.get_mut(parent) {
                entry.dependents += 1;
            }
        }
        let name = kind.name();
        let id = self.nodes.insert(NodeEntry::new(kind));
        log::debug!("created {name} node {id:?}");
        id
    }

    // ---- creation ------------------------------------------------------

    pub fn create_value(&mut self, value: f64) -> NodeId {
        self.insert(NodeKind::Value(ValueNode::new(value)))
    }

    /// Numeric or string interpolation of `parent`. Ranges are validated
    /// here; evaluation never fails on them.
    pub fn create_interpolation(
        &mut self,
        parent: NodeId,
        config: InterpolationConfig,
    ) -> Result<NodeId, GraphError> {
        self.entry(parent)?;
        let eval = NodeInterpolator::Plain(Interpolator::new(&config, &self.ctx)?);
        Ok(self.insert(NodeKind::Interpolation(InterpolationNode {
            parent,
            config,
            color_space: None,
            eval,
        })))
    }

    /// Interpolation between color stops in `space`, blended with the
    /// graph's [`GraphConfig::color`] options. Channels clamp at both ends.
    pub fn create_color_interpolation(
        &mut self,
        parent: NodeId,
        config: InterpolationConfig,
        space: ColorSpace,
    ) -> Result<NodeId, GraphError> {
        self.entry(parent)?;
        let (input, options) = (config.input_range.clone(), self.config.color);
        // numeric stops are packed 0xRRGGBBAA colors
        let eval = match &config.output_range {
            OutputRange::Strings(stops) => ColorInterpolator::from_sources(
                &self.ctx,
                input,
                stops.iter().map(String::as_str),
                space,
                options,
            )?,
            OutputRange::Numbers(stops) => {
                ColorInterpolator::from_sources(&self.ctx, input, stops.iter().copied(), space, options)?
            }
        };
        Ok(self.insert(NodeKind::Interpolation(InterpolationNode {
            parent,
            config,
            color_space: Some(space),
            eval: NodeInterpolator::Color(eval),
        })))
    }

    pub fn create_addition(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        self.require_all(&[a, b])?;
        Ok(self.insert(NodeKind::Addition([a, b])))
    }

    pub fn create_subtraction(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        self.require_all(&[a, b])?;
        Ok(self.insert(NodeKind::Subtraction([a, b])))
    }

    pub fn create_multiplication(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        self.require_all(&[a, b])?;
        Ok(self.insert(NodeKind::Multiplication([a, b])))
    }

    /// `a / b`; a zero divisor evaluates to 0 and is reported once per run
    /// of zero divisors.
    pub fn create_division(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        self.require_all(&[a, b])?;
        Ok(self.insert(NodeKind::Division(DivisionNode {
            input: [a, b],
            warned: false,
        })))
    }

    /// Non-negative remainder for a positive `modulus`.
    pub fn create_modulo(&mut self, input: NodeId, modulus: f64) -> Result<NodeId, GraphError> {
        self.entry(input)?;
        if modulus == 0.0 || !modulus.is_finite() {
            return Err(GraphError::InvalidModulus(modulus));
        }
        Ok(self.insert(NodeKind::Modulo { input, modulus }))
    }

    /// Accumulates the parent's changes, clamped to `[min, max]`. Starts
    /// from the parent's current value.
    pub fn create_diff_clamp(&mut self, input: NodeId, min: f64, max: f64) -> Result<NodeId, GraphError> {
        if !(min <= max) {
            return Err(GraphError::InvalidBounds { min, max });
        }
        let start = self.get_number(input)?;
        Ok(self.insert(NodeKind::DiffClamp(DiffClampNode {
            input,
            min,
            max,
            last: start,
            value: start,
        })))
    }

    pub fn create_transform(&mut self, entries: Vec<TransformEntry>) -> Result<NodeId, GraphError> {
        for entry in &entries {
            if let TransformValue::Node(id) = &entry.value {
                self.entry(*id)?;
            }
        }
        Ok(self.insert(NodeKind::Transform(entries)))
    }

    pub fn create_style(&mut self, style: IndexMap<String, StyleValue>) -> Result<NodeId, GraphError> {
        let kind = NodeKind::Style(style);
        self.require_all(&kind.inputs())?;
        Ok(self.insert(kind))
    }

    /// Like a style, and `on_update` receives the snapshot whenever an
    /// upstream value node changes while the props node is attached.
    pub fn create_props(
        &mut self,
        props: IndexMap<String, StyleValue>,
        on_update: Option<PropsCallback>,
    ) -> Result<NodeId, GraphError> {
        let kind = NodeKind::Props(PropsNode { props, on_update });
        self.require_all(&kind.inputs())?;
        Ok(self.insert(kind))
    }

    /// Drive `value` towards `parent` with `config` every time `parent`
    /// changes. The tracking node is attached and starts right away.
    pub fn create_tracking(
        &mut self,
        parent: NodeId,
        value: NodeId,
        config: AnimationConfig,
    ) -> Result<NodeId, GraphError> {
        config.validate()?;
        self.entry(parent)?;
        let previous = self.value_node(value)?.tracking;
        if let Some(old) = previous {
            self.detach(old)?;
        }
        let id = self.insert(NodeKind::Tracking(TrackingNode {
            parent,
            value,
            config,
        }));
        self.value_node_mut(value)?.tracking = Some(id);
        self.attach(id)?;
        self.update_tracking(id);
        Ok(id)
    }

    // ---- lifetime ------------------------------------------------------

    /// Register `id` as a child of each input, attaching inputs that had no
    /// children yet. Idempotent.
    pub fn attach(&mut self, id: NodeId) -> Result<(), GraphError> {
        let entry = self.entry_mut(id)?;
        if entry.attached {
            return Ok(());
        }
        entry.attached = true;
        let inputs = entry.kind.inputs();
        log::debug!("attached {} node {id:?}", entry.kind.name());
        for parent in inputs {
            self.add_child(parent, id)?;
        }
        Ok(())
    }

    /// Inverse of [`attach`](Self::attach). Inputs left without children are
    /// detached too; listeners are cleared and animations stopped.
    pub fn detach(&mut self, id: NodeId) -> Result<(), GraphError> {
        let entry = self.entry_mut(id)?;
        if !entry.attached {
            return Ok(());
        }
        entry.attached = false;
        let inputs = entry.kind.inputs();
        log::debug!("detached {} node {id:?}", entry.kind.name());
        for parent in inputs {
            self.remove_child(parent, id)?;
        }
        self.remove_all_listeners(id)?;
        if self.value_node(id).is_ok() {
            self.end_animation(id, false);
        }
        Ok(())
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), GraphError> {
        if self.entry(parent)?.children.is_empty() {
            self.attach(parent)?;
        }
        self.entry_mut(parent)?.children.push(child);
        Ok(())
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), GraphError> {
        let Some(entry) = self.nodes.get_mut(parent) else {
            return Ok(());
        };
        if let Some(pos) = entry.children.iter().position(|c| *c == child) {
            entry.children.remove(pos);
        }
        if entry.children.is_empty() {
            self.detach(parent)?;
        }
        Ok(())
    }

    /// Take the host's hold back after a [`release`](Self::release).
    pub fn retain(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.entry_mut(id)?.retained = true;
        Ok(())
    }

    /// Drop the host's hold on `id`. The node is removed once no other node
    /// depends on it, and released parents follow.
    pub fn release(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.entry_mut(id)?.retained = false;
        self.collect(id);
        Ok(())
    }

    /// Release and collect a batch of nodes, regardless of creation order.
    pub(crate) fn discard(&mut self, ids: impl IntoIterator<Item = NodeId> + Clone) {
        for id in ids.clone() {
            if let Some(entry) = self.nodes.get_mut(id) {
                entry.retained = false;
            }
        }
        for id in ids {
            self.collect(id);
        }
    }

    fn collect(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            match self.nodes.get(id) {
                Some(entry) if !entry.retained && entry.dependents == 0 => {}
                _ => continue,
            }
            if let Err(err) = self.detach(id) {
                log::debug!("detaching {id:?} before collection failed: {err}");
            }
            if self.value_node(id).is_ok() {
                self.end_animation(id, false);
            }
            let Some(entry) = self.nodes.remove(id) else {
                continue;
            };
            if let NodeKind::Tracking(t) = &entry.kind {
                if let Ok(v) = self.value_node_mut(t.value) {
                    if v.tracking == Some(id) {
                        v.tracking = None;
                    }
                }
            }
            for parent in entry.kind.parents() {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.dependents = p.dependents.saturating_sub(1);
                    pending.push(parent);
                }
            }
            log::debug!("collected {} node {id:?}", entry.kind.name());
        }
    }

    // ---- value nodes ---------------------------------------------------

    /// Set a value node, stopping its animation first. Updatable
    /// descendants are flushed, then listeners fire.
    pub fn set_value(&mut self, id: NodeId, value: f64) -> Result<(), GraphError> {
        self.value_node(id)?;
        self.end_animation(id, false);
        self.update_value(id, value);
        Ok(())
    }

    pub fn set_offset(&mut self, id: NodeId, offset: f64) -> Result<(), GraphError> {
        self.value_node_mut(id)?.offset = offset;
        Ok(())
    }

    /// Fold the offset into the value.
    pub fn flatten_offset(&mut self, id: NodeId) -> Result<(), GraphError> {
        let v = self.value_node_mut(id)?;
        v.value += v.offset;
        v.offset = 0.0;
        Ok(())
    }

    /// Move the value into the offset.
    pub fn extract_offset(&mut self, id: NodeId) -> Result<(), GraphError> {
        let v = self.value_node_mut(id)?;
        v.offset += v.value;
        v.value = 0.0;
        Ok(())
    }

    pub(crate) fn update_value(&mut self, id: NodeId, value: f64) {
        match self.value_node_mut(id) {
            Ok(v) => v.value = value,
            Err(_) => return,
        }
        self.flush(id);
        self.notify_from(id);
    }

    /// Value plus offset of a value node.
    pub(crate) fn current(&self, id: NodeId) -> f64 {
        self.value_node(id).map_or(0.0, |v| v.value + v.offset)
    }

    /// Update every props and tracking node reachable from `root` without
    /// passing through another updatable node.
    pub(crate) fn flush(&mut self, root: NodeId) {
        let mut seen = HashSet::new();
        let mut updatable = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(root) {
            Some(entry) => entry.children.iter().rev().copied().collect(),
            None => return,
        };
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(entry) = self.nodes.get(id) else {
                continue;
            };
            if entry.kind.is_updatable() {
                updatable.push(id);
            } else {
                stack.extend(entry.children.iter().rev().copied());
            }
        }
        for id in updatable {
            self.update_node(id);
        }
    }

    fn update_node(&mut self, id: NodeId) {
        let is_tracking = matches!(
            self.nodes.get(id).map(|e| &e.kind),
            Some(NodeKind::Tracking(_))
        );
        if is_tracking {
            self.update_tracking(id);
            return;
        }
        let snapshot = match self.get_value(id) {
            Ok(v) => v,
            Err(err) => {
                log::warn!("props node {id:?} could not be evaluated: {err}");
                return;
            }
        };
        if let Some(NodeEntry {
            kind: NodeKind::Props(p),
            ..
        }) = self.nodes.get_mut(id)
        {
            if let Some(on_update) = p.on_update.as_mut() {
                on_update(&snapshot);
            }
        }
    }

    // ---- evaluation ----------------------------------------------------

    /// Current value of any node, pulling parents recursively.
    pub fn get_value(&mut self, id: NodeId) -> Result<Value, GraphError> {
        let inputs = self.entry(id)?.kind.inputs();
        let mut values: SmallVec<[Value; 4]> = SmallVec::with_capacity(inputs.len());
        for input in &inputs {
            values.push(self.get_value(*input)?);
        }
        let entry = self.nodes.get_mut(id).ok_or(GraphError::UnknownNode(id))?;
        evaluate(id, &mut entry.kind, &inputs, &values, &mut self.diagnostics)
    }

    /// [`get_value`](Self::get_value) for nodes that must produce a number.
    pub fn get_number(&mut self, id: NodeId) -> Result<f64, GraphError> {
        let value = self.get_value(id)?;
        value.as_number().ok_or(GraphError::NotANumber {
            node: id,
            found: value.kind(),
        })
    }
}

fn evaluate(
    id: NodeId,
    kind: &mut NodeKind,
    inputs: &NodeList,
    values: &[Value],
    diagnostics: &mut Diagnostics,
) -> Result<Value, GraphError> {
    let number = |i: usize| -> Result<f64, GraphError> {
        values[i].as_number().ok_or(GraphError::NotANumber {
            node: inputs[i],
            found: values[i].kind(),
        })
    };
    let lookup = || -> HashMap<NodeId, Value> {
        inputs.iter().copied().zip(values.iter().cloned()).collect()
    };

    let value = match kind {
        NodeKind::Value(v) => Value::Number(v.value + v.offset),
        NodeKind::Interpolation(n) => n.eval.evaluate(number(0)?),
        NodeKind::Addition(_) => Value::Number(number(0)? + number(1)?),
        NodeKind::Subtraction(_) => Value::Number(number(0)? - number(1)?),
        NodeKind::Multiplication(_) => Value::Number(number(0)? * number(1)?),
        NodeKind::Division(d) => {
            let (a, b) = (number(0)?, number(1)?);
            if b == 0.0 {
                if !d.warned {
                    d.warned = true;
                    log::warn!("division node {id:?} has a zero divisor, evaluating to 0");
                    diagnostics.record(Warning::DivisionByZero { node: id });
                }
                Value::Number(0.0)
            } else {
                d.warned = false;
                Value::Number(a / b)
            }
        }
        NodeKind::Modulo { modulus, .. } => {
            let m = *modulus;
            Value::Number(((number(0)? % m) + m) % m)
        }
        NodeKind::DiffClamp(d) => {
            let v = number(0)?;
            let diff = v - d.last;
            d.last = v;
            d.value = (d.value + diff).clamp(d.min, d.max);
            Value::Number(d.value)
        }
        NodeKind::Transform(entries) => {
            let mut next = 0;
            let list = entries
                .iter()
                .map(|entry| {
                    let v = match &entry.value {
                        TransformValue::Node(_) => {
                            next += 1;
                            values[next - 1].clone()
                        }
                        TransformValue::Static(v) => v.clone(),
                    };
                    Value::Map(ValueMap::from([(entry.property.clone(), v)]))
                })
                .collect();
            Value::List(list)
        }
        NodeKind::Tracking(_) => values[0].clone(),
        NodeKind::Style(style) => Value::Map(snapshot_map(style, &lookup())),
        NodeKind::Props(p) => Value::Map(snapshot_map(&p.props, &lookup())),
        NodeKind::Color(c) => match c.native {
            Some(native) => Value::Number(native as f64),
            None => Value::Text(
                Rgba::new(number(0)?, number(1)?, number(2)?, number(3)?).to_rgba_string(),
            ),
        },
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tween_interp_core::Extrapolation;

    #[test]
    fn arithmetic_nodes() {
        let mut g = NodeGraph::new();
        let a = g.create_value(6.0);
        let b = g.create_value(3.0);
        let add = g.create_addition(a, b).unwrap();
        let sub = g.create_subtraction(a, b).unwrap();
        let mul = g.create_multiplication(a, b).unwrap();
        let div = g.create_division(a, b).unwrap();
        assert_eq!(g.get_number(add).unwrap(), 9.0);
        assert_eq!(g.get_number(sub).unwrap(), 3.0);
        assert_eq!(g.get_number(mul).unwrap(), 18.0);
        assert_eq!(g.get_number(div).unwrap(), 2.0);
    }

    #[test]
    fn offsets() {
        let mut g = NodeGraph::new();
        let v = g.create_value(10.0);
        g.set_offset(v, 5.0).unwrap();
        assert_eq!(g.get_number(v).unwrap(), 15.0);
        g.flatten_offset(v).unwrap();
        assert_eq!(g.value_node(v).unwrap().value, 15.0);
        assert_eq!(g.value_node(v).unwrap().offset, 0.0);
        g.extract_offset(v).unwrap();
        assert_eq!(g.value_node(v).unwrap().value, 0.0);
        assert_eq!(g.get_number(v).unwrap(), 15.0);
    }

    #[test]
    fn modulo_wraps_negative_inputs() {
        let mut g = NodeGraph::new();
        let v = g.create_value(-7.0);
        let m = g.create_modulo(v, 3.0).unwrap();
        assert_eq!(g.get_number(m).unwrap(), 2.0);
        assert!(matches!(g.create_modulo(v, 0.0), Err(GraphError::InvalidModulus(_))));
    }

    #[test]
    fn interpolation_node_reads_parent() {
        let mut g = NodeGraph::new();
        let v = g.create_value(15.0);
        let cfg = InterpolationConfig::new(vec![0.0, 10.0], vec![0.0, 100.0])
            .with_extrapolate(Extrapolation::Clamp);
        let i = g.create_interpolation(v, cfg).unwrap();
        assert_eq!(g.get_value(i).unwrap(), Value::Number(100.0));
    }

    #[test]
    fn text_parent_is_not_a_number() {
        let mut g = NodeGraph::new();
        let v = g.create_value(0.5);
        let s = g
            .create_interpolation(v, InterpolationConfig::new(vec![0.0, 1.0], vec!["0deg", "90deg"]))
            .unwrap();
        let sum = g.create_addition(s, v).unwrap();
        match g.get_value(sum) {
            Err(GraphError::NotANumber { node, .. }) => assert_eq!(node, s),
            other => panic!("unexpected {other:?}"),
        }
        // the failing node does not disturb its siblings
        assert_eq!(g.get_value(s).unwrap(), Value::Text("45deg".into()));
    }

    #[test]
    fn wrong_kind_is_reported() {
        let mut g = NodeGraph::new();
        let v = g.create_value(1.0);
        let sum = g.create_addition(v, v).unwrap();
        assert!(matches!(
            g.set_value(sum, 2.0),
            Err(GraphError::WrongKind { expected: "value", found: "addition", .. })
        ));
    }

    #[test]
    fn attach_cascades_and_detach_unwinds() {
        let mut g = NodeGraph::new();
        let a = g.create_value(1.0);
        let b = g.create_value(2.0);
        let sum = g.create_addition(a, b).unwrap();
        let twice = g.create_multiplication(sum, sum).unwrap();

        g.attach(twice).unwrap();
        assert!(g.is_attached(sum) && g.is_attached(a) && g.is_attached(b));
        assert_eq!(g.children(sum).unwrap(), vec![twice, twice]);
        assert_eq!(g.children(a).unwrap(), vec![sum]);

        g.detach(twice).unwrap();
        assert!(!g.is_attached(sum));
        assert!(!g.is_attached(a));
        assert!(g.children(a).unwrap().is_empty());
    }

    #[test]
    fn release_collects_unreferenced_chains() {
        let mut g = NodeGraph::new();
        let a = g.create_value(1.0);
        let b = g.create_value(2.0);
        let sum = g.create_addition(a, b).unwrap();

        g.release(a).unwrap();
        assert!(g.contains(a), "still a parent of sum");
        g.release(sum).unwrap();
        assert!(!g.contains(sum));
        assert!(!g.contains(a));
        assert!(g.contains(b), "b is still retained by the host");
        assert!(matches!(g.get_value(sum), Err(GraphError::UnknownNode(_))));
    }
}
