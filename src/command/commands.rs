use super::Command;
use crate::color::Rgba;
use crate::sprite::{CelKey, Sprite};

/// One pixel's before/after values at one coordinate in one cel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCommand {
    pub cel: CelKey,
    pub x: i32,
    pub y: i32,
    pub before: Rgba,
    pub after: Rgba,
}

impl PixelCommand {
    pub fn new(cel: CelKey, x: i32, y: i32, before: Rgba, after: Rgba) -> Self {
        Self {
            cel,
            x,
            y,
            before,
            after,
        }
    }

    fn write(&self, sprite: &mut Sprite, color: Rgba) {
        match sprite.cel_mut(self.cel) {
            Some(cel) => cel.set_pixel_direct(self.x, self.y, color),
            None => log::warn!(
                "pixel ({}, {}) targets a cel that no longer exists (frame {}, layer {})",
                self.x,
                self.y,
                self.cel.frame,
                self.cel.layer
            ),
        }
    }
}

impl Command for PixelCommand {
    fn execute(&self, sprite: &mut Sprite) {
        self.write(sprite, self.after);
    }

    fn undo(&self, sprite: &mut Sprite) {
        self.write(sprite, self.before);
    }
}

/// The ordered pixel edits of one stroke, undone and redone as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeCommand {
    commands: Vec<PixelCommand>,
}

impl CompositeCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, command: PixelCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[PixelCommand] {
        &self.commands
    }
}

impl Command for CompositeCommand {
    fn execute(&self, sprite: &mut Sprite) {
        for command in &self.commands {
            command.execute(sprite);
        }
    }

    /// Reverse order, so a pixel edited twice ends at its earliest snapshot.
    fn undo(&self, sprite: &mut Sprite) {
        for command in self.commands.iter().rev() {
            command.undo(sprite);
        }
    }
}
