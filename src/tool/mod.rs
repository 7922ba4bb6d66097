pub mod types;
mod context;
mod line;
mod mask;
mod stroke;
mod trait_def;

pub use context::ToolContext;
pub use line::{bresenham, stamp, stamp_line};
pub use mask::brush_mask;
pub use stroke::StrokeRecorder;
pub use trait_def::Tool;
pub use types::{BrushTool, EraserTool, ToolKind};

use crate::command::{CompositeCommand, History};
use crate::sprite::Sprite;

/// A pixel coordinate on the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pointer state of the active tool.
#[derive(Debug, Default)]
pub enum ToolState {
    #[default]
    Idle,
    Stroking {
        stroke: StrokeRecorder,
        /// Last visited point, the start of the next line segment
        last: Point,
    },
}

/// Holds one instance of every tool plus the shared stroke machinery.
///
/// Idle -> Stroking on pointer-down, back to Idle on pointer-up. Tools keep
/// their own state (the brush anchor) across switches.
#[derive(Debug, Default)]
pub struct ToolBox {
    brush: BrushTool,
    eraser: EraserTool,
    active: ToolKind,
    state: ToolState,
    /// Strokes cut off by a pointer-down that arrived without a pointer-up,
    /// oldest first
    interrupted: Vec<CompositeCommand>,
}

fn tool_ref<'a>(active: ToolKind, brush: &'a BrushTool, eraser: &'a EraserTool) -> &'a dyn Tool {
    match active {
        ToolKind::Brush => brush,
        ToolKind::Eraser => eraser,
    }
}

impl ToolBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    pub fn active_tool(&self) -> &dyn Tool {
        tool_ref(self.active, &self.brush, &self.eraser)
    }

    fn active_tool_mut(&mut self) -> &mut dyn Tool {
        match self.active {
            ToolKind::Brush => &mut self.brush,
            ToolKind::Eraser => &mut self.eraser,
        }
    }

    pub fn brush(&self) -> &BrushTool {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut BrushTool {
        &mut self.brush
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, ToolState::Stroking { .. })
    }

    /// Switches tools. An open stroke is finalized into `history` first;
    /// returns whether that pushed anything.
    pub fn select(&mut self, kind: ToolKind, history: &mut History) -> bool {
        if self.active == kind {
            return false;
        }
        let pushed = self.on_up(history);
        log::debug!("tool: {} -> {}", self.active.name(), kind.name());
        self.active = kind;
        pushed
    }

    /// Starts a stroke at (x, y) in the active layer and frame.
    pub fn on_down(&mut self, sprite: &mut Sprite, x: i32, y: i32, ctx: &mut ToolContext) {
        if let ToolState::Stroking { stroke, .. } = std::mem::take(&mut self.state) {
            log::warn!("pointer down while stroke {} was open; closing it", stroke.id());
            let command = stroke.finish();
            if !command.is_empty() {
                self.interrupted.push(command);
            }
        }

        let id = ctx.begin_stroke();
        let ctx = &*ctx;
        let Some((key, cel)) = sprite.active_cel_or_insert() else {
            log::debug!("no layer or frame to paint into");
            return;
        };

        let point = Point::new(x, y);
        let mask = brush_mask(ctx.brush_size);
        let mut stroke = StrokeRecorder::new(id, key);
        let tool = self.active_tool_mut();
        log::trace!("{} stroke {id} down at ({x}, {y})", tool.name());

        match tool.anchor() {
            Some(anchor) if ctx.constrain => {
                stamp_line(anchor, point, &mask, |px, py| {
                    tool.paint_point(&mut stroke, cel, px, py, ctx)
                });
            }
            _ => stamp(point, &mask, |px, py| {
                tool.paint_point(&mut stroke, cel, px, py, ctx)
            }),
        }
        tool.set_anchor(point);

        self.state = ToolState::Stroking { stroke, last: point };
    }

    /// Continues the open stroke with a line from the last visited point, so
    /// fast pointer motion still leaves continuous coverage.
    pub fn on_move(&mut self, sprite: &mut Sprite, x: i32, y: i32, ctx: &ToolContext) {
        let ToolState::Stroking { stroke, last } = &mut self.state else {
            return;
        };
        let point = Point::new(x, y);
        let Some(cel) = sprite.cel_mut(stroke.cel_key()) else {
            log::warn!("stroke {} lost its cel", stroke.id());
            *last = point;
            return;
        };

        let tool = tool_ref(self.active, &self.brush, &self.eraser);
        let mask = brush_mask(ctx.brush_size);
        stamp_line(*last, point, &mask, |px, py| {
            tool.paint_point(stroke, cel, px, py, ctx)
        });
        *last = point;
    }

    /// Ends the stroke. Pushes it to `history` when it painted anything;
    /// returns whether something was pushed.
    ///
    /// Also the path for abnormal ends (pointer released off-canvas, focus
    /// lost), so it is safe to call while idle.
    pub fn on_up(&mut self, history: &mut History) -> bool {
        let mut pushed = !self.interrupted.is_empty();
        for command in self.interrupted.drain(..) {
            history.push(command);
        }

        if let ToolState::Stroking { stroke, .. } = std::mem::take(&mut self.state) {
            let id = stroke.id();
            let command = stroke.finish();
            if command.is_empty() {
                log::trace!("stroke {id} painted nothing");
            } else {
                log::debug!("stroke {id} committed: {} pixels", command.len());
                history.push(command);
                pushed = true;
            }
        }
        pushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    const RED: Rgba = Rgba::opaque(255, 0, 0);

    fn setup() -> (Sprite, ToolBox, ToolContext, History) {
        (Sprite::blank(8, 8), ToolBox::new(), ToolContext::new(1, RED), History::new())
    }

    fn pixel(sprite: &Sprite, x: i32, y: i32) -> Rgba {
        let key = sprite.active_cel_key().unwrap();
        sprite.cel(key).map_or(Rgba::TRANSPARENT, |c| c.get_pixel(x, y))
    }

    #[test]
    fn down_paints_a_dab_and_up_records_it() {
        let (mut sprite, mut tools, mut ctx, mut history) = setup();
        tools.on_down(&mut sprite, 2, 2, &mut ctx);
        assert!(tools.is_stroking());
        assert_eq!(pixel(&sprite, 2, 2), RED);

        assert!(tools.on_up(&mut history));
        assert!(!tools.is_stroking());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn move_fills_gaps_between_samples() {
        let (mut sprite, mut tools, mut ctx, mut history) = setup();
        tools.on_down(&mut sprite, 0, 0, &mut ctx);
        tools.on_move(&mut sprite, 6, 0, &ctx);
        tools.on_up(&mut history);
        for x in 0..=6 {
            assert_eq!(pixel(&sprite, x, 0), RED, "x = {x}");
        }
        assert_eq!(pixel(&sprite, 7, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn move_while_idle_does_nothing() {
        let (mut sprite, mut tools, ctx, mut history) = setup();
        tools.on_move(&mut sprite, 3, 3, &ctx);
        assert!(sprite.current_frame().unwrap().cel_count() == 0);
        assert!(!tools.on_up(&mut history));
    }

    #[test]
    fn zig_zag_blends_each_pixel_once() {
        let (mut sprite, mut tools, mut ctx, mut history) = setup();
        ctx.color = Rgba::new(0, 0, 255, 100);
        ctx.brush_size = 3;
        tools.on_down(&mut sprite, 3, 3, &mut ctx);
        tools.on_move(&mut sprite, 5, 3, &ctx);
        tools.on_move(&mut sprite, 3, 3, &ctx);
        tools.on_move(&mut sprite, 5, 3, &ctx);
        tools.on_up(&mut history);

        assert_eq!(pixel(&sprite, 4, 3), Rgba::new(0, 0, 255, 100));
        assert_eq!(pixel(&sprite, 3, 3), Rgba::new(0, 0, 255, 100));
    }

    #[test]
    fn constrained_down_draws_from_anchor() {
        let (mut sprite, mut tools, mut ctx, mut history) = setup();
        tools.on_down(&mut sprite, 1, 1, &mut ctx);
        tools.on_up(&mut history);

        ctx.constrain = true;
        tools.on_down(&mut sprite, 5, 1, &mut ctx);
        tools.on_up(&mut history);
        for x in 1..=5 {
            assert_eq!(pixel(&sprite, x, 1), RED);
        }
        assert_eq!(tools.brush().anchor(), Some(Point::new(5, 1)));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn constrain_without_anchor_paints_a_dab() {
        let (mut sprite, mut tools, mut ctx, mut history) = setup();
        ctx.constrain = true;
        tools.on_down(&mut sprite, 4, 4, &mut ctx);
        tools.on_up(&mut history);
        assert_eq!(pixel(&sprite, 4, 4), RED);
        assert_eq!(pixel(&sprite, 3, 4), Rgba::TRANSPARENT);
    }

    #[test]
    fn eraser_clears_to_transparent_and_ignores_constrain() {
        let (mut sprite, mut tools, mut ctx, mut history) = setup();
        tools.on_down(&mut sprite, 1, 1, &mut ctx);
        tools.on_move(&mut sprite, 4, 1, &ctx);
        tools.on_up(&mut history);

        tools.select(ToolKind::Eraser, &mut history);
        ctx.constrain = true;
        tools.on_down(&mut sprite, 4, 1, &mut ctx);
        tools.on_up(&mut history);
        assert_eq!(pixel(&sprite, 4, 1), Rgba::TRANSPARENT);
        assert_eq!(pixel(&sprite, 3, 1), RED);

        history.undo(&mut sprite);
        assert_eq!(pixel(&sprite, 4, 1), RED);
    }

    #[test]
    fn switching_tools_mid_stroke_commits_it() {
        let (mut sprite, mut tools, mut ctx, mut history) = setup();
        tools.on_down(&mut sprite, 0, 0, &mut ctx);
        tools.select(ToolKind::Eraser, &mut history);
        assert!(!tools.is_stroking());
        assert_eq!(history.len(), 1);
        assert_eq!(tools.active(), ToolKind::Eraser);
    }

    #[test]
    fn missed_pointer_up_is_recovered_on_next_up() {
        let (mut sprite, mut tools, mut ctx, mut history) = setup();
        tools.on_down(&mut sprite, 0, 0, &mut ctx);
        tools.on_down(&mut sprite, 5, 5, &mut ctx);
        tools.on_up(&mut history);
        assert_eq!(history.len(), 2);

        history.undo(&mut sprite);
        assert_eq!(pixel(&sprite, 0, 0), RED);
        assert_eq!(pixel(&sprite, 5, 5), Rgba::TRANSPARENT);
    }

    #[test]
    fn every_stroke_missing_its_pointer_up_stays_undoable() {
        let (mut sprite, mut tools, mut ctx, mut history) = setup();
        tools.on_down(&mut sprite, 0, 0, &mut ctx);
        tools.on_down(&mut sprite, 3, 3, &mut ctx);
        tools.on_down(&mut sprite, 6, 6, &mut ctx);
        assert!(tools.on_up(&mut history));
        assert_eq!(history.len(), 3);

        while history.undo(&mut sprite) {}
        for (x, y) in [(0, 0), (3, 3), (6, 6)] {
            assert_eq!(pixel(&sprite, x, y), Rgba::TRANSPARENT, "({x}, {y})");
        }

        history.redo(&mut sprite);
        assert_eq!(pixel(&sprite, 0, 0), RED);
        assert_eq!(pixel(&sprite, 3, 3), Rgba::TRANSPARENT);
    }

    #[test]
    fn stroke_entirely_off_canvas_records_nothing() {
        let (mut sprite, mut tools, mut ctx, mut history) = setup();
        tools.on_down(&mut sprite, -5, -5, &mut ctx);
        tools.on_move(&mut sprite, -9, -2, &ctx);
        assert!(!tools.on_up(&mut history));
        assert!(history.is_empty());
    }

    #[test]
    fn painting_without_layers_is_ignored() {
        let mut sprite = Sprite::new(4, 4);
        sprite.add_frame(false);
        let mut tools = ToolBox::new();
        let mut ctx = ToolContext::default();
        tools.on_down(&mut sprite, 1, 1, &mut ctx);
        assert!(!tools.is_stroking());
    }
}
