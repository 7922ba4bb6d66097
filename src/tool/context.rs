use std::sync::atomic::{AtomicU32, Ordering};

use crate::cel::StrokeId;
use crate::color::Rgba;
use crate::config::EngineConfig;

/// Stroke ids are process-wide so a sprite can move between contexts without
/// a stale tag matching a fresh stroke.
static NEXT_STROKE_ID: AtomicU32 = AtomicU32::new(1);

fn next_stroke_id(counter: &AtomicU32) -> StrokeId {
    loop {
        let id = counter.fetch_add(1, Ordering::Relaxed);
        if id != 0 {
            return id;
        }
    }
}

/// Session state handed to every tool call.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Brush footprint size in pixels
    pub brush_size: u32,
    /// "Constrain" modifier held (straight line from the last anchor)
    pub constrain: bool,
    /// Active paint color
    pub color: Rgba,
    stroke_id: StrokeId,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(1, Rgba::BLACK)
    }
}

impl ToolContext {
    pub fn new(brush_size: u32, color: Rgba) -> Self {
        Self {
            brush_size,
            constrain: false,
            color,
            stroke_id: 0,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.brush_size, config.brush_color)
    }

    /// Maps egui modifier state onto the constrain flag (Shift).
    pub fn set_modifiers(&mut self, modifiers: egui::Modifiers) {
        self.constrain = modifiers.shift;
    }

    /// Id of the most recently started stroke.
    pub fn stroke_id(&self) -> StrokeId {
        self.stroke_id
    }

    /// Issues the id for a new stroke. Never returns 0, which is the tag of
    /// untouched pixels.
    pub(crate) fn begin_stroke(&mut self) -> StrokeId {
        self.stroke_id = next_stroke_id(&NEXT_STROKE_ID);
        self.stroke_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_ids_skip_zero_on_wrap() {
        let counter = AtomicU32::new(StrokeId::MAX);
        assert_eq!(next_stroke_id(&counter), StrokeId::MAX);
        assert_eq!(next_stroke_id(&counter), 1);
        assert_eq!(next_stroke_id(&counter), 2);
    }

    #[test]
    fn separate_contexts_never_share_an_id() {
        let mut a = ToolContext::default();
        let mut b = ToolContext::default();
        let first = a.begin_stroke();
        let second = b.begin_stroke();
        assert_ne!(first, second);
        assert_ne!(first, 0);
        assert_eq!(b.stroke_id(), second);
    }

    #[test]
    fn shift_sets_constrain() {
        let mut ctx = ToolContext::default();
        ctx.set_modifiers(egui::Modifiers::SHIFT);
        assert!(ctx.constrain);
        ctx.set_modifiers(egui::Modifiers::NONE);
        assert!(!ctx.constrain);
    }
}
