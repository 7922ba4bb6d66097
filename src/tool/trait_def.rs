use super::{Point, StrokeRecorder, ToolContext};
use crate::cel::Cel;

/// A paint tool. Tools only decide how a single pixel is painted; stroke
/// bookkeeping, line rasterization and history are shared by
/// [`ToolBox`](super::ToolBox).
pub trait Tool {
    fn name(&self) -> &'static str;

    /// Paint the pixel at (x, y) as part of `stroke`.
    fn paint_point(&self, stroke: &mut StrokeRecorder, cel: &mut Cel, x: i32, y: i32, ctx: &ToolContext);

    /// Last anchor for constrained straight lines. Tools without one never
    /// draw constrained lines.
    fn anchor(&self) -> Option<Point> {
        None
    }

    fn set_anchor(&mut self, _point: Point) {}
}
