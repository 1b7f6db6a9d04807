//! Handles for nodes, listeners and running animations.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, Key};

new_key_type! {
    /// Stable handle of a node inside one [`NodeGraph`](crate::NodeGraph).
    pub struct NodeId;
}

impl NodeId {
    /// Numeric tag used in native configs. Unique per graph for the
    /// lifetime of the node.
    #[inline]
    pub fn tag(self) -> u64 {
        self.data().as_ffi()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u32);

/// Monotonic allocator for listener and animation ids.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_listener: u32,
    next_animation: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_animation(&mut self) -> AnimationId {
        let id = AnimationId(self.next_animation);
        self.next_animation = self.next_animation.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_listener(), ListenerId(0));
        assert_eq!(alloc.alloc_listener(), ListenerId(1));
        assert_eq!(alloc.alloc_animation(), AnimationId(0));
        assert_eq!(alloc.alloc_animation(), AnimationId(1));
    }

    #[test]
    fn tags_distinguish_reused_slots() {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = map.insert(());
        map.remove(a);
        let b = map.insert(());
        assert_ne!(a.tag(), b.tag());
        assert_eq!(NodeId::from(slotmap::KeyData::from_ffi(b.tag())), b);
    }
}
