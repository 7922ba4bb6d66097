use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A unique identifier for a layer. Stable across reordering and removal
/// of other layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub Uuid);

impl LayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One depth slice of a sprite. Holds no pixels itself; those live in the
/// per-frame [`Cel`](crate::cel::Cel)s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layer {
    /// Unique identifier for the layer
    pub id: LayerId,
    /// Display name of the layer
    pub name: String,
    /// Whether the layer takes part in compositing
    pub visible: bool,
    /// Multiplied into every pixel's alpha when compositing, in [0, 1]
    opacity: f32,
    /// Edit lock. Stored only; enforcing it is up to the editor shell.
    pub locked: bool,
}

impl Layer {
    pub fn new(name: &str) -> Self {
        Self::with_id(LayerId::new(), name)
    }

    pub fn with_id(id: LayerId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            visible: true,
            opacity: 1.0,
            locked: false,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Sets the opacity, clamped to [0, 1]. NaN becomes fully transparent.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// True when compositing this layer can change the output.
    pub fn contributes(&self) -> bool {
        self.visible && self.opacity > 0.0
    }
}
