mod commands;
mod history;

use crate::sprite::Sprite;

pub use commands::{CompositeCommand, PixelCommand};
pub use history::History;

/// An edit that can be replayed forwards and backwards against a sprite.
///
/// Both directions write stored snapshots; nothing is re-derived at replay
/// time.
pub trait Command {
    /// Apply the edit.
    fn execute(&self, sprite: &mut Sprite);

    /// Revert the edit.
    fn undo(&self, sprite: &mut Sprite);
}
