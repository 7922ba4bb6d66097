use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::cel::Cel;
use crate::layer::LayerId;

/// Default frame duration in milliseconds.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(pub Uuid);

impl FrameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FrameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One point in time of a sprite.
///
/// Cels are sparse: a layer that was never painted in this frame simply has
/// no entry, and that is a normal state rather than an error.
#[derive(Debug, Clone)]
pub struct Frame {
    pub id: FrameId,
    /// Display duration in milliseconds
    pub duration: u32,
    cels: HashMap<LayerId, Cel>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_DURATION_MS)
    }
}

impl Frame {
    pub fn new(duration: u32) -> Self {
        Self {
            id: FrameId::new(),
            duration,
            cels: HashMap::new(),
        }
    }

    /// A new frame holding copies of every cel in `self` ("hold" frame).
    pub fn duplicate(&self) -> Self {
        Self {
            id: FrameId::new(),
            duration: self.duration,
            cels: self.cels.clone(),
        }
    }

    pub fn has_cel(&self, layer: LayerId) -> bool {
        self.cels.contains_key(&layer)
    }

    pub fn cel(&self, layer: LayerId) -> Option<&Cel> {
        self.cels.get(&layer)
    }

    pub fn cel_mut(&mut self, layer: LayerId) -> Option<&mut Cel> {
        self.cels.get_mut(&layer)
    }

    /// Returns the cel for `layer`, creating a transparent one on first use.
    pub fn cel_or_insert(&mut self, layer: LayerId, width: u32, height: u32) -> &mut Cel {
        self.cels.entry(layer).or_insert_with(|| {
            log::trace!("creating cel for layer {layer}");
            Cel::new(width, height)
        })
    }

    pub fn insert_cel(&mut self, layer: LayerId, cel: Cel) -> Option<Cel> {
        self.cels.insert(layer, cel)
    }

    pub fn remove_cel(&mut self, layer: LayerId) -> Option<Cel> {
        self.cels.remove(&layer)
    }

    pub fn cel_count(&self) -> usize {
        self.cels.len()
    }

    pub fn cels(&self) -> impl Iterator<Item = (LayerId, &Cel)> {
        self.cels.iter().map(|(id, cel)| (*id, cel))
    }

    pub(crate) fn cels_mut(&mut self) -> impl Iterator<Item = &mut Cel> {
        self.cels.values_mut()
    }
}
