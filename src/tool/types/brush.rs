use crate::blend::BlendMode;
use crate::cel::Cel;
use crate::tool::trait_def::Tool;
use crate::tool::{Point, StrokeRecorder, ToolContext};

/// Freehand brush painting the context color with src-over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrushTool {
    /// Where the previous stroke started; the origin of a constrained line
    anchor: Option<Point>,
}

impl BrushTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_anchor(&mut self) {
        self.anchor = None;
    }
}

impl Tool for BrushTool {
    fn name(&self) -> &'static str {
        "Brush"
    }

    fn paint_point(&self, stroke: &mut StrokeRecorder, cel: &mut Cel, x: i32, y: i32, ctx: &ToolContext) {
        stroke.apply_pixel(cel, x, y, ctx.color, BlendMode::SourceOver);
    }

    fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    fn set_anchor(&mut self, point: Point) {
        self.anchor = Some(point);
    }
}
