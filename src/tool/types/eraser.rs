use crate::blend::BlendMode;
use crate::cel::Cel;
use crate::color::Rgba;
use crate::tool::trait_def::Tool;
use crate::tool::{StrokeRecorder, ToolContext};

/// Clears pixels to fully transparent black.
///
/// A brush with a zero-alpha color under src-over would leave the
/// destination untouched, so the eraser writes with [`BlendMode::Replace`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EraserTool;

impl EraserTool {
    pub const COLOR: Rgba = Rgba::TRANSPARENT;

    pub fn new() -> Self {
        Self
    }
}

impl Tool for EraserTool {
    fn name(&self) -> &'static str {
        "Eraser"
    }

    fn paint_point(&self, stroke: &mut StrokeRecorder, cel: &mut Cel, x: i32, y: i32, _ctx: &ToolContext) {
        stroke.apply_pixel(cel, x, y, Self::COLOR, BlendMode::Replace);
    }
}
