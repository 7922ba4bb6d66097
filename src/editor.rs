//! The editing session the surrounding shell drives.
//!
//! `Editor` owns the sprite, the undo history, the tools and their context,
//! and the file state, and exposes one method per shell event. Everything
//! runs synchronously on the caller's thread, so a render between two
//! events never sees a half-applied stroke.

use crate::command::History;
use crate::config::EngineConfig;
use crate::error::SpriteError;
use crate::frame::Frame;
use crate::layer::Layer;
use crate::persistence::{PersistenceResult, SpriteStore};
use crate::renderer::{PixelBuffer, Renderer};
use crate::sprite::Sprite;
use crate::tool::{ToolBox, ToolContext, ToolKind};

/// Which project the session is bound to and whether it has unsaved edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileState {
    pub id: Option<String>,
    pub dirty: bool,
}

/// Result of [`Editor::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The project has never been saved; ask for a name and call
    /// [`Editor::save_as`].
    NeedsName,
}

#[derive(Debug)]
pub struct Editor {
    sprite: Sprite,
    history: History,
    tools: ToolBox,
    context: ToolContext,
    renderer: Renderer,
    file: FileState,
}

impl Editor {
    /// A session on a blank sprite sized by `config`.
    pub fn new(config: &EngineConfig) -> Self {
        let mut sprite = Sprite::new(config.sprite_width, config.sprite_height);
        sprite.set_default_frame_duration(config.frame_duration);
        sprite.add_layer("Layer 1");
        sprite.add_frame(false);
        Self::with_sprite(sprite, config)
    }

    /// A session on an existing sprite. Stroke tags left by earlier
    /// sessions are cleared.
    pub fn with_sprite(mut sprite: Sprite, config: &EngineConfig) -> Self {
        sprite.reset_stroke_tags();
        Self {
            sprite,
            history: History::new(),
            tools: ToolBox::new(),
            context: ToolContext::from_config(config),
            renderer: Renderer::from_config(config),
            file: FileState::default(),
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tools(&self) -> &ToolBox {
        &self.tools
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    /// Brush size, color and modifier flags live here.
    pub fn context_mut(&mut self) -> &mut ToolContext {
        &mut self.context
    }

    pub fn file(&self) -> &FileState {
        &self.file
    }

    pub fn is_dirty(&self) -> bool {
        self.file.dirty
    }

    fn touch(&mut self) {
        self.file.dirty = true;
    }

    // --- tools -------------------------------------------------------------

    pub fn select_tool(&mut self, kind: ToolKind) {
        if self.tools.select(kind, &mut self.history) {
            self.touch();
        }
    }

    /// Whether the active layer is locked. The engine paints regardless; the
    /// shell decides whether to forward pointer events.
    pub fn is_active_layer_locked(&self) -> bool {
        self.sprite
            .layer(self.sprite.active_layer())
            .is_some_and(|l| l.locked)
    }

    pub fn pointer_down(&mut self, x: i32, y: i32) {
        self.tools.on_down(&mut self.sprite, x, y, &mut self.context);
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) {
        self.tools.on_move(&mut self.sprite, x, y, &self.context);
    }

    pub fn pointer_up(&mut self) {
        if self.tools.on_up(&mut self.history) {
            self.touch();
        }
    }

    /// Pointer left the window or focus was lost. The open stroke is kept
    /// and committed like a normal pointer-up.
    pub fn interrupt(&mut self) {
        self.context.constrain = false;
        self.pointer_up();
    }

    // --- history -----------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        self.pointer_up();
        let changed = self.history.undo(&mut self.sprite);
        if changed {
            self.touch();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.pointer_up();
        let changed = self.history.redo(&mut self.sprite);
        if changed {
            self.touch();
        }
        changed
    }

    // --- structure ---------------------------------------------------------

    pub fn add_layer(&mut self, name: &str) -> &mut Layer {
        self.pointer_up();
        self.touch();
        self.sprite.add_layer(name)
    }

    pub fn remove_layer(&mut self, index: usize) -> Result<Layer, SpriteError> {
        self.pointer_up();
        let layer = self.sprite.remove_layer(index)?;
        self.touch();
        Ok(layer)
    }

    pub fn select_layer(&mut self, index: usize) -> Result<(), SpriteError> {
        self.pointer_up();
        self.sprite.select_layer(index)
    }

    pub fn add_frame(&mut self, copy_previous: bool) -> &mut Frame {
        self.pointer_up();
        self.touch();
        self.sprite.add_frame(copy_previous)
    }

    pub fn insert_frame_after(&mut self, index: usize, copy: bool) -> &mut Frame {
        self.pointer_up();
        self.touch();
        self.sprite.insert_frame_after(index, copy)
    }

    pub fn remove_frame(&mut self, index: usize) -> Result<Frame, SpriteError> {
        self.pointer_up();
        let frame = self.sprite.remove_frame(index)?;
        self.touch();
        Ok(frame)
    }

    pub fn select_frame(&mut self, index: usize) -> Result<(), SpriteError> {
        self.pointer_up();
        self.sprite.select_frame(index)
    }

    /// Changes layer properties (name, visibility, opacity, lock). Returns
    /// `false` when there is no layer at `index`.
    pub fn edit_layer(&mut self, index: usize, edit: impl FnOnce(&mut Layer)) -> bool {
        self.pointer_up();
        let Some(layer) = self.sprite.layer_mut(index) else {
            return false;
        };
        let before = layer.clone();
        edit(layer);
        if *layer != before {
            self.touch();
        }
        true
    }

    // --- rendering ---------------------------------------------------------

    /// Active frame over the checkerboard, for display.
    pub fn render_preview(&self) -> Option<PixelBuffer> {
        let frame = self.sprite.current_frame()?;
        Some(self.renderer.render_frame(&self.sprite, frame))
    }

    /// Active frame over transparency, for export.
    pub fn render_export(&self) -> Option<PixelBuffer> {
        let frame = self.sprite.current_frame()?;
        Some(self.renderer.render_frame_to_image_data(&self.sprite, frame))
    }

    // --- persistence -------------------------------------------------------

    /// Overwrites the bound project, or reports that a name is needed.
    pub fn save(&mut self, store: &mut dyn SpriteStore) -> PersistenceResult<SaveOutcome> {
        let Some(id) = self.file.id.clone() else {
            return Ok(SaveOutcome::NeedsName);
        };
        self.save_as(store, &id)?;
        Ok(SaveOutcome::Saved)
    }

    /// Saves under `id` and binds the session to it.
    pub fn save_as(&mut self, store: &mut dyn SpriteStore, id: &str) -> PersistenceResult<()> {
        self.pointer_up();
        store.save(id, &self.sprite)?;
        self.file.id = Some(id.to_string());
        self.file.dirty = false;
        Ok(())
    }

    /// Replaces the sprite with the stored project `id`. On error the
    /// current sprite, history and file state are left as they were.
    pub fn open(&mut self, store: &dyn SpriteStore, id: &str) -> PersistenceResult<()> {
        let sprite = store.load(id)?;
        self.pointer_up();
        self.sprite = sprite;
        self.history.clear();
        self.tools.brush_mut().clear_anchor();
        self.file = FileState {
            id: Some(id.to_string()),
            dirty: false,
        };
        log::info!("opened project {id:?}");
        Ok(())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::persistence::{MemoryStore, PersistenceError};
    use crate::tool::Tool;

    fn active_pixel(editor: &Editor, x: i32, y: i32) -> Rgba {
        let sprite = editor.sprite();
        let key = sprite.active_cel_key().unwrap();
        sprite.cel(key).map_or(Rgba::TRANSPARENT, |c| c.get_pixel(x, y))
    }

    #[test]
    fn new_editor_uses_config() {
        let config = EngineConfig {
            sprite_width: 8,
            sprite_height: 4,
            frame_duration: 60,
            ..EngineConfig::default()
        };
        let editor = Editor::new(&config);
        assert_eq!(editor.sprite().width(), 8);
        assert_eq!(editor.sprite().frames()[0].duration, 60);
        assert_eq!(editor.context().color, config.brush_color);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn stroke_marks_dirty_and_save_clears_it() {
        let mut editor = Editor::default();
        let mut store = MemoryStore::new();
        editor.pointer_down(1, 1);
        editor.pointer_up();
        assert!(editor.is_dirty());

        assert_eq!(editor.save(&mut store).unwrap(), SaveOutcome::NeedsName);
        assert!(editor.is_dirty());

        editor.save_as(&mut store, "doodle").unwrap();
        assert!(!editor.is_dirty());
        assert_eq!(editor.file().id.as_deref(), Some("doodle"));

        editor.undo();
        assert!(editor.is_dirty());
        assert_eq!(editor.save(&mut store).unwrap(), SaveOutcome::Saved);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn failed_open_keeps_current_session() {
        let mut editor = Editor::default();
        editor.pointer_down(0, 0);
        editor.pointer_up();

        let mut store = MemoryStore::new();
        store.insert_raw("broken", "{ \"version\": 1 }");
        assert!(matches!(editor.open(&store, "missing"), Err(PersistenceError::NotFound(_))));
        assert!(editor.open(&store, "broken").is_err());

        assert_eq!(editor.history().len(), 1);
        assert_eq!(active_pixel(&editor, 0, 0), editor.context().color);
        assert!(editor.is_dirty());
    }

    #[test]
    fn open_replaces_sprite_and_clears_history() {
        let mut store = MemoryStore::new();
        store.save("tiny", &Sprite::blank(2, 2)).unwrap();

        let mut editor = Editor::default();
        editor.pointer_down(0, 0);
        editor.pointer_up();
        editor.open(&store, "tiny").unwrap();

        assert_eq!(editor.sprite().width(), 2);
        assert!(!editor.history().can_undo());
        assert!(!editor.is_dirty());
        assert!(editor.tools().brush().anchor().is_none());
    }

    #[test]
    fn interrupt_commits_open_stroke() {
        let mut editor = Editor::default();
        editor.context_mut().constrain = true;
        editor.pointer_down(2, 2);
        editor.pointer_move(4, 2);
        editor.interrupt();
        assert!(!editor.context().constrain);
        assert!(!editor.tools().is_stroking());
        assert_eq!(editor.history().len(), 1);

        editor.undo();
        assert_eq!(active_pixel(&editor, 3, 2), Rgba::TRANSPARENT);
    }

    #[test]
    fn locked_layer_is_reported_not_enforced() {
        let mut editor = Editor::default();
        assert!(editor.edit_layer(0, |l| l.locked = true));
        assert!(editor.is_active_layer_locked());
        editor.pointer_down(0, 0);
        editor.pointer_up();
        assert_eq!(active_pixel(&editor, 0, 0), editor.context().color);
    }

    #[test]
    fn layer_edits_mark_dirty_only_on_change() {
        let mut editor = Editor::default();
        assert!(editor.edit_layer(0, |l| l.visible = true));
        assert!(!editor.is_dirty());
        assert!(editor.edit_layer(0, |l| l.set_opacity(0.5)));
        assert!(editor.is_dirty());
        assert!(!editor.edit_layer(3, |l| l.visible = false));
    }

    #[test]
    fn adding_a_layer_commits_the_open_stroke() {
        let mut editor = Editor::default();
        editor.pointer_down(1, 1);
        editor.add_layer("Top");
        assert!(!editor.tools().is_stroking());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn sprite_from_another_session_can_be_painted_again() {
        let mut sprite = Sprite::blank(4, 4);
        let mut tools = ToolBox::new();
        let mut ctx = ToolContext::new(1, Rgba::opaque(255, 0, 0));
        let mut history = History::new();
        tools.on_down(&mut sprite, 1, 1, &mut ctx);
        tools.on_up(&mut history);

        let config = EngineConfig {
            brush_color: Rgba::opaque(0, 255, 0),
            ..EngineConfig::default()
        };
        let mut editor = Editor::with_sprite(sprite, &config);
        editor.pointer_down(1, 1);
        editor.pointer_up();
        assert_eq!(active_pixel(&editor, 1, 1), Rgba::opaque(0, 255, 0));
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn renders_active_frame() {
        let mut editor = Editor::default();
        editor.context_mut().color = Rgba::opaque(0, 0, 255);
        editor.pointer_down(3, 3);
        editor.pointer_up();
        assert_eq!(editor.render_preview().unwrap().get_pixel(3, 3), Rgba::opaque(0, 0, 255));
        assert_eq!(editor.render_export().unwrap().get_pixel(0, 0), Rgba::TRANSPARENT);
    }
}
