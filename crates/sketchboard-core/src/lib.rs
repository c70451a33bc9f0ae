//! Sketchboard Core Library
//!
//! Platform-agnostic interaction engine for the Sketchboard whiteboard:
//! nodes, the view transform, selection, resize and pen authoring, all
//! driven by one pointer/keyboard event stream through [`Canvas`].

pub mod camera;
pub mod canvas;
pub mod config;
pub mod input;
pub mod interaction;
pub mod nodes;
pub mod resize;
pub mod selection;
pub mod store;
pub mod suggestions;
pub mod tools;

pub use camera::Camera;
pub use canvas::Canvas;
pub use config::{ConfigError, EngineConfig};
pub use input::{Key, Modifiers, MouseButton, PointerEvent};
pub use interaction::{Mode, SelectionRect};
pub use nodes::{Node, NodeBody, NodeId, NodeKind, NodePatch, PathPoint};
pub use resize::{ParseHandleError, ResizeHandle};
pub use selection::Selection;
pub use store::NodeStore;
pub use suggestions::Suggestion;
pub use tools::{PathBuilder, ToolKind};
