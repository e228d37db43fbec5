//! Force-directed view of player clusters.

pub mod builder;
mod component;
pub mod config;
mod render;
pub mod scale;
pub mod simulation;
pub mod state;
pub mod types;

pub use builder::build;
pub use component::ForceGraphCanvas;
pub use config::LayoutConfig;
pub use simulation::{DragEvent, Force, Phase, Simulation};
pub use state::{ForceGraphState, ViewTransform};
pub use types::{ClusterCenter, GraphData, GraphLink, GraphNode, LinkSegment, NodePosition, Viewport};
