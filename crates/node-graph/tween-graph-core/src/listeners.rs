//! Change listeners, their propagation to attached descendants, and
//! scoped suspension.

use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};

use hashbrown::HashSet;
use tween_api_core::Value;

use crate::error::GraphError;
use crate::graph::NodeGraph;
use crate::ids::{ListenerId, NodeId};

impl NodeGraph {
    /// `callback` receives the node's value each time it changes.
    pub fn add_listener(
        &mut self,
        id: NodeId,
        callback: impl FnMut(&Value) + 'static,
    ) -> Result<ListenerId, GraphError> {
        self.entry(id)?;
        let listener = self.ids.alloc_listener();
        self.entry_mut(id)?.listeners.insert(listener, Box::new(callback));
        Ok(listener)
    }

    /// Returns whether the listener was registered.
    pub fn remove_listener(&mut self, id: NodeId, listener: ListenerId) -> Result<bool, GraphError> {
        Ok(self.entry_mut(id)?.listeners.shift_remove(&listener).is_some())
    }

    pub fn remove_all_listeners(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.entry_mut(id)?.listeners.clear();
        Ok(())
    }

    pub fn has_listeners(&self, id: NodeId) -> bool {
        self.nodes.get(id).map_or(false, |e| !e.listeners.is_empty())
    }

    /// Hold back listeners of `id` (and everything downstream of it) until
    /// the returned guard and every guard nested inside it are dropped.
    /// Changes made meanwhile are reported once, on release.
    pub fn suspend_listeners(&mut self, id: NodeId) -> Result<SuspendedListeners<'_>, GraphError> {
        self.entry_mut(id)?.suspend_depth += 1;
        Ok(SuspendedListeners { graph: self, node: id })
    }

    /// Fire listeners of `start` and of its attached descendants, each once.
    pub(crate) fn notify_from(&mut self, start: NodeId) {
        let mut queue = VecDeque::from([start]);
        let mut seen = HashSet::new();
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            let Some(entry) = self.nodes.get_mut(id) else {
                continue;
            };
            if entry.suspend_depth > 0 {
                entry.pending_notify = true;
                continue;
            }
            queue.extend(entry.children.iter().copied());
            if entry.listeners.is_empty() {
                continue;
            }
            match self.get_value(id) {
                Ok(value) => self.fire(id, &value),
                Err(err) => log::debug!("listeners of {id:?} skipped: {err}"),
            }
        }
    }

    fn fire(&mut self, id: NodeId, value: &Value) {
        if let Some(entry) = self.nodes.get_mut(id) {
            for listener in entry.listeners.values_mut() {
                listener(value);
            }
        }
    }
}

/// Scope guard returned by [`NodeGraph::suspend_listeners`]. Derefs to the
/// graph so the suspended node can be mutated through it.
pub struct SuspendedListeners<'g> {
    graph: &'g mut NodeGraph,
    node: NodeId,
}

impl SuspendedListeners<'_> {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Report a change on release even if no upstream notification reached
    /// the node (e.g. it is not attached).
    pub fn mark_changed(&mut self) {
        if let Some(entry) = self.graph.nodes.get_mut(self.node) {
            entry.pending_notify = true;
        }
    }
}

impl Deref for SuspendedListeners<'_> {
    type Target = NodeGraph;

    fn deref(&self) -> &NodeGraph {
        self.graph
    }
}

impl DerefMut for SuspendedListeners<'_> {
    fn deref_mut(&mut self) -> &mut NodeGraph {
        self.graph
    }
}

impl Drop for SuspendedListeners<'_> {
    fn drop(&mut self) {
        let Some(entry) = self.graph.nodes.get_mut(self.node) else {
            return;
        };
        entry.suspend_depth = entry.suspend_depth.saturating_sub(1);
        if entry.suspend_depth == 0 && entry.pending_notify {
            entry.pending_notify = false;
            self.graph.notify_from(self.node);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<Value>>>, impl FnMut(&Value) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v: &Value| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn listeners_fire_on_set_and_can_be_removed() {
        let mut g = NodeGraph::new();
        let v = g.create_value(0.0);
        let (seen, cb) = recorder();
        let l = g.add_listener(v, cb).unwrap();
        g.set_value(v, 1.0).unwrap();
        g.set_value(v, 2.0).unwrap();
        assert!(g.remove_listener(v, l).unwrap());
        assert!(!g.remove_listener(v, l).unwrap());
        g.set_value(v, 3.0).unwrap();
        assert_eq!(*seen.borrow(), vec![Value::Number(1.0), Value::Number(2.0)]);
    }

    #[test]
    fn attached_descendants_are_notified_once() {
        let mut g = NodeGraph::new();
        let v = g.create_value(1.0);
        let left = g.create_addition(v, v).unwrap();
        let right = g.create_multiplication(v, v).unwrap();
        let top = g.create_addition(left, right).unwrap();
        let (seen, cb) = recorder();
        g.add_listener(top, cb).unwrap();

        g.set_value(v, 2.0).unwrap();
        assert!(seen.borrow().is_empty(), "not attached yet");

        g.attach(top).unwrap();
        g.set_value(v, 3.0).unwrap();
        assert_eq!(*seen.borrow(), vec![Value::Number(15.0)]);
    }

    #[test]
    fn nested_suspension_fires_once_on_outermost_release() {
        let mut g = NodeGraph::new();
        let v = g.create_value(0.0);
        let (seen, cb) = recorder();
        g.add_listener(v, cb).unwrap();
        {
            let mut outer = g.suspend_listeners(v).unwrap();
            outer.set_value(v, 1.0).unwrap();
            {
                let mut inner = outer.suspend_listeners(v).unwrap();
                inner.set_value(v, 2.0).unwrap();
            }
            assert!(seen.borrow().is_empty());
            outer.set_value(v, 3.0).unwrap();
        }
        assert_eq!(*seen.borrow(), vec![Value::Number(3.0)]);
        g.set_value(v, 4.0).unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn suspension_without_changes_is_silent() {
        let mut g = NodeGraph::new();
        let v = g.create_value(0.0);
        let (seen, cb) = recorder();
        g.add_listener(v, cb).unwrap();
        drop(g.suspend_listeners(v).unwrap());
        assert!(seen.borrow().is_empty());
    }
}
