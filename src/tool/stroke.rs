use crate::blend::BlendMode;
use crate::cel::{Cel, StrokeId};
use crate::color::Rgba;
use crate::command::{CompositeCommand, PixelCommand};
use crate::sprite::CelKey;

/// Collects the pixel edits of one in-progress stroke.
///
/// Every pixel is blended at most once per stroke: the first touch tags it
/// with the stroke id, later touches by the same stroke are skipped.
#[derive(Debug)]
pub struct StrokeRecorder {
    id: StrokeId,
    cel: CelKey,
    command: CompositeCommand,
}

impl StrokeRecorder {
    pub fn new(id: StrokeId, cel: CelKey) -> Self {
        Self {
            id,
            cel,
            command: CompositeCommand::new(),
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// The cel this stroke paints into. Fixed for the stroke's lifetime.
    pub fn cel_key(&self) -> CelKey {
        self.cel
    }

    pub fn len(&self) -> usize {
        self.command.len()
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }

    /// Paints one pixel. Returns `false` when the pixel is out of bounds or
    /// was already painted by this stroke.
    pub fn apply_pixel(&mut self, cel: &mut Cel, x: i32, y: i32, color: Rgba, mode: BlendMode) -> bool {
        if !cel.mark_stroke(x, y, self.id) {
            return false;
        }
        let before = cel.get_pixel(x, y);
        let after = mode.apply(before, color);
        self.command
            .add(PixelCommand::new(self.cel, x, y, before, after));
        cel.set_pixel_direct(x, y, after);
        true
    }

    pub fn finish(self) -> CompositeCommand {
        self.command
    }
}
