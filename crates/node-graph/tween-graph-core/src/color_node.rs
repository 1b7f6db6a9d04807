//! Color nodes: four channel value nodes (r, g, b in 0..255, a in 0..1)
//! plus an optional opaque platform color.

use tween_color_core::Rgba;

use crate::diagnostics::Warning;
use crate::error::GraphError;
use crate::graph::NodeGraph;
use crate::ids::NodeId;
use crate::nodes::{ColorInput, ColorNode, NodeKind};

enum ResolvedColor {
    Channels(Rgba),
    Native(u32),
}

impl NodeGraph {
    /// Unparseable input leaves the color opaque black and is reported as
    /// a warning.
    pub fn create_color(&mut self, input: impl Into<ColorInput>) -> NodeId {
        let input = input.into();
        let resolved = self.resolve_color(&input);
        let (rgba, native) = match &resolved {
            Some(ResolvedColor::Channels(c)) => (*c, None),
            Some(ResolvedColor::Native(n)) => (Rgba::default(), Some(*n)),
            None => (Rgba::default(), None),
        };
        let channels = [rgba.r, rgba.g, rgba.b, rgba.a].map(|c| self.create_channel(c));
        let id = self.insert(NodeKind::Color(ColorNode { channels, native }));
        if resolved.is_none() {
            self.report_unparseable(id, &input);
        }
        id
    }

    /// Color over existing value nodes, as rebuilt from a native config.
    pub(crate) fn create_color_from_channels(
        &mut self,
        channels: [NodeId; 4],
        native: Option<u32>,
    ) -> Result<NodeId, GraphError> {
        for channel in channels {
            self.value_node(channel)?;
        }
        Ok(self.insert(NodeKind::Color(ColorNode { channels, native })))
    }

    /// Owned by the color: collected with it unless retained.
    fn create_channel(&mut self, value: f64) -> NodeId {
        let id = self.create_value(value);
        if let Some(entry) = self.nodes.get_mut(id) {
            entry.retained = false;
        }
        id
    }

    /// r, g, b, a value nodes, e.g. to animate a single channel.
    pub fn color_channels(&self, id: NodeId) -> Result<[NodeId; 4], GraphError> {
        Ok(self.color_node(id)?.channels)
    }

    /// Update all four channels; listeners of the color fire once.
    pub fn set_color(&mut self, id: NodeId, input: impl Into<ColorInput>) -> Result<(), GraphError> {
        let input = input.into();
        let channels = self.color_node(id)?.channels;
        match self.resolve_color(&input) {
            None => self.report_unparseable(id, &input),
            Some(ResolvedColor::Native(n)) => {
                self.color_node_mut(id)?.native = Some(n);
                self.notify_from(id);
            }
            Some(ResolvedColor::Channels(c)) => {
                self.color_node_mut(id)?.native = None;
                let mut guard = self.suspend_listeners(id)?;
                for (channel, v) in channels.into_iter().zip([c.r, c.g, c.b, c.a]) {
                    guard.set_value(channel, v)?;
                }
                guard.mark_changed();
            }
        }
        Ok(())
    }

    fn color_node(&self, id: NodeId) -> Result<&ColorNode, GraphError> {
        match &self.entry(id)?.kind {
            NodeKind::Color(c) => Ok(c),
            other => Err(GraphError::WrongKind {
                node: id,
                expected: "color",
                found: other.name(),
            }),
        }
    }

    fn color_node_mut(&mut self, id: NodeId) -> Result<&mut ColorNode, GraphError> {
        match &mut self.entry_mut(id)?.kind {
            NodeKind::Color(c) => Ok(c),
            other => Err(GraphError::WrongKind {
                node: id,
                expected: "color",
                found: other.name(),
            }),
        }
    }

    fn resolve_color(&self, input: &ColorInput) -> Option<ResolvedColor> {
        match input {
            ColorInput::Rgba(c) => Some(ResolvedColor::Channels(*c)),
            ColorInput::Css(text) => self
                .ctx
                .colors()
                .normalize(text.as_str())
                .map(|packed| ResolvedColor::Channels(Rgba::from_packed(packed))),
            ColorInput::Native(n) => Some(ResolvedColor::Native(*n)),
        }
    }

    fn report_unparseable(&mut self, id: NodeId, input: &ColorInput) {
        let text = match input {
            ColorInput::Css(text) => text.clone(),
            other => format!("{other:?}"),
        };
        log::warn!("color node {id:?}: {text:?} is not a color, keeping previous value");
        self.diagnostics.record(Warning::UnparseableColor { node: id, input: text });
    }
}
