//! Starting, stopping and stepping animations.
//!
//! A running animation asks for its next frame through [`FrameRequests`];
//! the host calls [`NodeGraph::advance_frame`] with a monotonic clock. A
//! request whose animation was stopped in the meantime is dropped.

use crate::diagnostics::Warning;
use crate::error::GraphError;
use crate::graph::NodeGraph;
use crate::ids::{AnimationId, NodeId};
use crate::nodes::NodeKind;

use super::{AnimationConfig, AnimationResult, AnimationState, EndCallback};

/// Animations waiting for the next frame, in request order.
#[derive(Debug, Default)]
pub struct FrameRequests {
    pending: Vec<AnimationId>,
}

impl FrameRequests {
    pub(crate) fn request(&mut self, id: AnimationId) {
        self.pending.push(id);
    }

    pub(crate) fn take(&mut self) -> Vec<AnimationId> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

pub(crate) struct RunningAnimation {
    node: NodeId,
    state: AnimationState,
    on_end: Option<EndCallback>,
}

impl NodeGraph {
    /// Animate a value node. Tracking on the node is detached and a
    /// running animation is stopped first (its callback gets
    /// `finished: false`).
    pub fn animate(
        &mut self,
        node: NodeId,
        config: impl Into<AnimationConfig>,
        on_end: Option<EndCallback>,
    ) -> Result<AnimationId, GraphError> {
        let config = config.into();
        config.validate()?;
        let tracking = self.value_node_mut(node)?.tracking.take();
        if let Some(tracking) = tracking {
            self.detach(tracking)?;
        }
        self.start_animation(node, config, on_end)
    }

    pub(crate) fn start_animation(
        &mut self,
        node: NodeId,
        config: AnimationConfig,
        on_end: Option<EndCallback>,
    ) -> Result<AnimationId, GraphError> {
        config.validate()?;
        let from = self.value_node(node)?.value;
        self.end_animation(node, false);

        let state = AnimationState::new(&config, from);
        let id = self.ids.alloc_animation();
        log::debug!("starting {} animation {id:?} on {node:?}", state.kind());

        if let Some(to) = state.immediate() {
            self.update_value(node, to);
            if let Some(on_end) = on_end {
                on_end(AnimationResult {
                    finished: true,
                    value: self.current(node),
                });
            }
            return Ok(id);
        }

        self.value_node_mut(node)?.animation = Some(id);
        self.animations.insert(id, RunningAnimation { node, state, on_end });
        self.frames.request(id);
        Ok(id)
    }

    /// Stop the node's animation and tracking; returns the current value.
    pub fn stop_animation(&mut self, node: NodeId) -> Result<f64, GraphError> {
        let tracking = self.value_node_mut(node)?.tracking.take();
        if let Some(tracking) = tracking {
            self.detach(tracking)?;
        }
        self.end_animation(node, false);
        Ok(self.current(node))
    }

    /// Stop, then return to the value the node was created with.
    pub fn reset_animation(&mut self, node: NodeId) -> Result<f64, GraphError> {
        self.stop_animation(node)?;
        let initial = self.value_node(node)?.initial;
        self.update_value(node, initial);
        Ok(self.current(node))
    }

    pub fn is_animating(&self, node: NodeId) -> bool {
        self.value_node(node).map_or(false, |v| v.animation.is_some())
    }

    pub fn running_animations(&self) -> usize {
        self.animations.len()
    }

    pub fn pending_frames(&self) -> &FrameRequests {
        &self.frames
    }

    /// Step every animation that requested a frame. Returns how many were
    /// stepped.
    pub fn advance_frame(&mut self, now_ms: f64) -> usize {
        let mut stepped = 0;
        for anim in self.frames.take() {
            let Some(mut running) = self.animations.remove(&anim) else {
                log::debug!("dropping stale frame for animation {anim:?}");
                self.diagnostics.record(Warning::StaleFrame { animation: anim });
                continue;
            };
            let node = running.node;
            let step = running
                .state
                .step(now_ms, self.config.spring_max_step_ms);
            log::trace!("animation {anim:?} at {now_ms}ms: {step:?}");
            stepped += 1;

            if let Some(value) = step.value {
                self.update_value(node, value);
            }

            // a flush may have replaced this animation
            let still_current = self
                .value_node(node)
                .map_or(false, |v| v.animation == Some(anim));
            if !still_current {
                finish(running.on_end, false, self.current(node));
                continue;
            }

            if step.finished {
                if let Ok(v) = self.value_node_mut(node) {
                    v.animation = None;
                }
                log::debug!("{} animation {anim:?} finished", running.state.kind());
                finish(running.on_end, true, self.current(node));
            } else {
                self.animations.insert(anim, running);
                self.frames.request(anim);
            }
        }
        stepped
    }

    /// Remove the node's animation, if any, and report it as ended.
    pub(crate) fn end_animation(&mut self, node: NodeId, finished: bool) {
        let Some(anim) = self
            .value_node_mut(node)
            .ok()
            .and_then(|v| v.animation.take())
        else {
            return;
        };
        if let Some(running) = self.animations.remove(&anim) {
            log::debug!("stopped {} animation {anim:?} on {node:?}", running.state.kind());
            finish(running.on_end, finished, self.current(node));
        }
    }

    /// Restart the tracked value's animation towards the parent's value.
    pub(crate) fn update_tracking(&mut self, id: NodeId) {
        let Some(NodeKind::Tracking(t)) = self.nodes.get(id).map(|e| &e.kind) else {
            return;
        };
        let (parent, value, config) = (t.parent, t.value, t.config.clone());
        let target = match self.get_number(parent) {
            Ok(n) => n,
            Err(err) => {
                log::warn!("tracking node {id:?} cannot follow {parent:?}: {err}");
                return;
            }
        };
        if let Err(err) = self.start_animation(value, config.with_to_value(target), None) {
            log::warn!("tracking node {id:?} cannot animate {value:?}: {err}");
        }
    }
}

fn finish(on_end: Option<EndCallback>, finished: bool, value: f64) {
    if let Some(on_end) = on_end {
        on_end(AnimationResult { finished, value });
    }
}
