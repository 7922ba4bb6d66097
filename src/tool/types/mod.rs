pub mod brush;
pub mod eraser;

pub use brush::BrushTool;
pub use eraser::EraserTool;

use serde::{Deserialize, Serialize};

/// The closed set of paint tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::Brush, ToolKind::Eraser];

    pub fn name(self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
        }
    }
}
