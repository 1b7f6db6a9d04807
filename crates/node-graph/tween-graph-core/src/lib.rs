//! tween-graph-core: a graph of animated values.
//!
//! Value nodes hold numbers that hosts set directly or drive with timing,
//! spring and decay animations. Derived nodes (interpolation, arithmetic,
//! modulo, diff-clamp, color) compute from their parents on demand, and
//! aggregate nodes (transform, style, props) snapshot many nodes into one
//! [`Value`](tween_api_core::Value). Listeners on value and derived nodes
//! fire whenever an upstream value changes.
//!
//! ```
//! use tween_graph_core::NodeGraph;
//! use tween_interp_core::InterpolationConfig;
//!
//! let mut graph = NodeGraph::new();
//! let progress = graph.create_value(0.5);
//! let width = graph
//!     .create_interpolation(progress, InterpolationConfig::new(vec![0.0, 1.0], vec![0.0, 200.0]))
//!     .unwrap();
//! assert_eq!(graph.get_number(width).unwrap(), 100.0);
//! ```

pub mod animation;
pub mod color_node;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod ids;
pub mod listeners;
pub mod native;
mod nodes;
pub mod topo;

pub use animation::{
    AnimationConfig, AnimationResult, DecayConfig, EndCallback, FrameRequests, SpringConfig,
    TimingConfig,
};
pub use config::{DiagnosticsCfg, GraphConfig};
pub use diagnostics::{Diagnostics, Warning};
pub use error::GraphError;
pub use graph::NodeGraph;
pub use ids::{AnimationId, ListenerId, NodeId};
pub use listeners::SuspendedListeners;
pub use native::{NativeConfig, NativeTransform, OutputType};
pub use nodes::{ColorInput, Listener, PropsCallback, StyleValue, TransformEntry, TransformValue};
pub use topo::topo_order;
