//! Sketchboard headless driver.
//!
//! Replays a recorded input script through the engine. A script is a JSON
//! array of steps, each tagged by `step`:
//!
//! ```json
//! [
//!   { "step": "tool", "tool": "line" },
//!   { "step": "down", "x": 10, "y": 10 },
//!   { "step": "move", "x": 110, "y": 60 },
//!   { "step": "up", "x": 110, "y": 60 }
//! ]
//! ```
//!
//! Pointer coordinates are in screen space.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use sketchboard_core::{Canvas, ConfigError, EngineConfig, Key, Modifiers, MouseButton, NodePatch, PointerEvent, ToolKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Driver errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum Step {
    Tool {
        tool: ToolKind,
    },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Leave,
    Wheel {
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Key by platform name, e.g. `"Delete"` or `"Escape"`.
    Key {
        key: String,
    },
    /// Text-field focus outside the canvas.
    Focus {
        focused: bool,
    },
    /// Style edit applied to the current selection.
    Patch {
        patch: NodePatch,
    },
    /// Image dropped at a screen point.
    Image {
        src: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl Step {
    /// The pointer event this step stands for, if it is one.
    pub fn pointer_event(&self) -> Option<PointerEvent> {
        let event = match *self {
            Step::Down {
                x,
                y,
                button,
                modifiers,
            } => PointerEvent::Down {
                position: Point::new(x, y),
                button,
                modifiers,
            },
            Step::Move { x, y, modifiers } => PointerEvent::Move {
                position: Point::new(x, y),
                modifiers,
            },
            Step::Up { x, y, modifiers } => PointerEvent::Up {
                position: Point::new(x, y),
                modifiers,
            },
            Step::Leave => PointerEvent::Leave,
            Step::Wheel {
                x,
                y,
                dx,
                dy,
                modifiers,
            } => PointerEvent::Wheel {
                position: Point::new(x, y),
                delta: Vec2::new(dx, dy),
                modifiers,
            },
            _ => return None,
        };
        Some(event)
    }
}

fn read(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate an engine configuration file.
pub fn load_config(path: &Path) -> Result<EngineConfig, AppError> {
    Ok(EngineConfig::from_json(&read(path)?)?)
}

/// Load a script file.
pub fn load_script(path: &Path) -> Result<Vec<Step>, AppError> {
    Ok(serde_json::from_str(&read(path)?)?)
}

/// Apply every step to `canvas`. Returns how many steps were applied;
/// unknown keys are skipped with a warning.
pub fn run_script(canvas: &mut Canvas, steps: &[Step]) -> usize {
    let mut applied = 0;
    for (index, step) in steps.iter().enumerate() {
        if let Some(event) = step.pointer_event() {
            canvas.handle_pointer(event);
            applied += 1;
            continue;
        }
        match step {
            Step::Tool { tool } => canvas.set_tool(*tool),
            Step::Key { key } => match Key::from_name(key) {
                Some(key) => {
                    canvas.handle_key(key);
                }
                None => {
                    log::warn!("step {index}: unknown key {key:?}, skipped");
                    continue;
                }
            },
            Step::Focus { focused } => canvas.set_text_focus(*focused),
            Step::Patch { patch } => {
                canvas.patch_selected(patch);
            }
            Step::Image {
                src,
                x,
                y,
                width,
                height,
            } => {
                let center = canvas.camera.screen_to_world(Point::new(*x, *y));
                canvas.place_image(src.clone(), center, Size::new(*width, *height));
            }
            _ => {}
        }
        applied += 1;
    }
    applied
}

/// Serialize the board.
pub fn board_json(canvas: &Canvas, pretty: bool) -> Result<String, AppError> {
    let json = if pretty {
        canvas.store.to_json()?
    } else {
        serde_json::to_string(&canvas.store)?
    };
    Ok(json)
}
