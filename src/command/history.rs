use super::{Command, CompositeCommand};
use crate::sprite::Sprite;

/// Linear undo/redo over recorded strokes.
///
/// `cursor` counts the entries currently applied; everything at or past it
/// is the redo tail.
#[derive(Debug, Default)]
pub struct History {
    stack: Vec<CompositeCommand>,
    cursor: usize,
}

impl History {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a stroke that has already been applied. Discards any redo
    /// tail.
    pub fn push(&mut self, command: CompositeCommand) {
        let discarded = self.stack.len() - self.cursor;
        if discarded > 0 {
            log::debug!("dropping {discarded} redo entries");
        }
        self.stack.truncate(self.cursor);
        self.stack.push(command);
        self.cursor = self.stack.len();
    }

    /// Reverts the most recent applied entry. Returns `false` when there was
    /// nothing to undo.
    pub fn undo(&mut self, sprite: &mut Sprite) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let command = &self.stack[self.cursor];
        log::debug!("undo: {} pixels", command.len());
        command.undo(sprite);
        true
    }

    /// Re-applies the next undone entry. Returns `false` when there was
    /// nothing to redo.
    pub fn redo(&mut self, sprite: &mut Sprite) -> bool {
        let Some(command) = self.stack.get(self.cursor) else {
            return false;
        };
        log::debug!("redo: {} pixels", command.len());
        command.execute(sprite);
        self.cursor += 1;
        true
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        self.cursor < self.stack.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.stack.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::command::PixelCommand;
    use crate::sprite::CelKey;

    fn paint(sprite: &mut Sprite, key: CelKey, x: i32, color: Rgba) -> CompositeCommand {
        let cel = sprite.cel_mut(key).unwrap();
        let before = cel.get_pixel(x, 0);
        cel.set_pixel_direct(x, 0, color);
        let mut stroke = CompositeCommand::new();
        stroke.add(PixelCommand::new(key, x, 0, before, color));
        stroke
    }

    #[test]
    fn undo_redo_on_empty_history_are_no_ops() {
        let mut sprite = Sprite::blank(2, 2);
        let mut history = History::new();
        assert!(!history.undo(&mut sprite));
        assert!(!history.redo(&mut sprite));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn push_truncates_redo_tail() {
        let mut sprite = Sprite::blank(4, 1);
        let key = sprite.active_cel_or_insert().unwrap().0;
        let mut history = History::new();

        let first = paint(&mut sprite, key, 0, Rgba::BLACK);
        history.push(first);
        let second = paint(&mut sprite, key, 1, Rgba::BLACK);
        history.push(second);
        assert!(history.undo(&mut sprite));
        assert!(history.can_redo());

        let third = paint(&mut sprite, key, 2, Rgba::WHITE);
        history.push(third);
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert!(!history.redo(&mut sprite));
        assert_eq!(sprite.cel(key).unwrap().get_pixel(1, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn cursor_tracks_applied_entries() {
        let mut sprite = Sprite::blank(2, 1);
        let key = sprite.active_cel_or_insert().unwrap().0;
        let mut history = History::new();
        let stroke = paint(&mut sprite, key, 0, Rgba::BLACK);
        history.push(stroke);
        assert_eq!(history.cursor(), 1);
        history.undo(&mut sprite);
        assert_eq!(history.cursor(), 0);
        history.redo(&mut sprite);
        assert_eq!(history.cursor(), 1);

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), 0);
    }
}
