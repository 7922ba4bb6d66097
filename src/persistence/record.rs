use serde::{Deserialize, Serialize};

use super::{PersistenceError, PersistenceResult};
use crate::cel::Cel;
use crate::frame::{DEFAULT_FRAME_DURATION_MS, Frame};
use crate::layer::{Layer, LayerId};
use crate::sprite::Sprite;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub version: u64,
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub active_frame: usize,
    #[serde(default)]
    pub active_layer: usize,
    pub layers: Vec<LayerRecord>,
    pub frames: Vec<FrameRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub opacity: f32,
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub duration: u32,
    pub cels: Vec<CelRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelRecord {
    pub layer: LayerId,
    pub pixels: Vec<u8>,
}

impl ProjectRecord {
    pub fn from_sprite(id: &str, sprite: &Sprite) -> Self {
        let layers = sprite
            .layers()
            .iter()
            .map(|layer| LayerRecord {
                id: layer.id,
                name: layer.name.clone(),
                visible: layer.visible,
                opacity: layer.opacity(),
                locked: layer.locked,
            })
            .collect();

        // cels in layer order keep the output stable
        let frames = sprite
            .frames()
            .iter()
            .map(|frame| FrameRecord {
                duration: frame.duration,
                cels: sprite
                    .layers()
                    .iter()
                    .filter_map(|layer| {
                        frame.cel(layer.id).map(|cel| CelRecord {
                            layer: layer.id,
                            pixels: cel.pixels().to_vec(),
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            version: SCHEMA_VERSION,
            id: id.to_string(),
            width: sprite.width(),
            height: sprite.height(),
            active_frame: sprite.active_frame(),
            active_layer: sprite.active_layer(),
            layers,
            frames,
        }
    }

    /// Rebuilds the sprite, validating every cel against the declared size
    /// and layer list.
    pub fn into_sprite(self) -> PersistenceResult<Sprite> {
        let mut sprite = Sprite::new(self.width, self.height);
        for record in self.layers {
            if sprite.layer_index(record.id).is_some() {
                return Err(PersistenceError::InvalidRecord(format!(
                    "duplicate layer id {}",
                    record.id
                )));
            }
            let layer = sprite.push_layer(Layer::with_id(record.id, &record.name));
            layer.visible = record.visible;
            layer.set_opacity(record.opacity);
            layer.locked = record.locked;
        }

        for (index, record) in self.frames.into_iter().enumerate() {
            let mut frame = Frame::new(record.duration);
            for cel in record.cels {
                if sprite.layer_index(cel.layer).is_none() {
                    return Err(PersistenceError::InvalidRecord(format!(
                        "frame {index} has a cel for unknown layer {}",
                        cel.layer
                    )));
                }
                let pixels = Cel::from_pixels(self.width, self.height, cel.pixels).ok_or_else(|| {
                    PersistenceError::InvalidRecord(format!(
                        "frame {index}: cel size does not match {}x{}",
                        self.width, self.height
                    ))
                })?;
                frame.insert_cel(cel.layer, pixels);
            }
            sprite.push_frame(frame);
        }

        sprite.restore_active(self.active_layer, self.active_frame);
        Ok(sprite)
    }
}

/// The unversioned layout: every frame carries its own per-layer entries,
/// matched up by position.
#[derive(Debug, Deserialize)]
struct LegacyRecord {
    #[serde(default)]
    id: String,
    width: u32,
    height: u32,
    #[serde(default, alias = "activeFrame")]
    active_frame: usize,
    frames: Vec<LegacyFrame>,
}

#[derive(Debug, Deserialize)]
struct LegacyFrame {
    #[serde(default)]
    layers: Vec<LegacyLayer>,
}

#[derive(Debug, Deserialize)]
struct LegacyLayer {
    width: u32,
    height: u32,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default = "default_opacity")]
    opacity: f32,
    pixels: Vec<u8>,
}

fn default_visible() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

impl LegacyRecord {
    fn upgrade(self) -> PersistenceResult<ProjectRecord> {
        let layer_count = self.frames.iter().map(|f| f.layers.len()).max().unwrap_or(0);

        // layer properties come from the first frame that has the entry
        let layers: Vec<LayerRecord> = (0..layer_count)
            .map(|i| {
                let entry = self.frames.iter().find_map(|f| f.layers.get(i));
                LayerRecord {
                    id: LayerId::new(),
                    name: format!("Layer {}", i + 1),
                    visible: entry.is_none_or(|l| l.visible),
                    opacity: entry.map_or(1.0, |l| l.opacity),
                    locked: false,
                }
            })
            .collect();

        let mut frames = Vec::with_capacity(self.frames.len());
        for (index, frame) in self.frames.into_iter().enumerate() {
            let mut cels = Vec::with_capacity(frame.layers.len());
            for (i, entry) in frame.layers.into_iter().enumerate() {
                if entry.width != self.width || entry.height != self.height {
                    return Err(PersistenceError::InvalidRecord(format!(
                        "frame {index} layer {i} is {}x{}, sprite is {}x{}",
                        entry.width, entry.height, self.width, self.height
                    )));
                }
                cels.push(CelRecord {
                    layer: layers[i].id,
                    pixels: entry.pixels,
                });
            }
            frames.push(FrameRecord {
                duration: DEFAULT_FRAME_DURATION_MS,
                cels,
            });
        }

        log::info!(
            "upgraded unversioned project {:?} ({} layers, {} frames)",
            self.id,
            layers.len(),
            frames.len()
        );

        Ok(ProjectRecord {
            version: SCHEMA_VERSION,
            id: self.id,
            width: self.width,
            height: self.height,
            active_frame: self.active_frame,
            active_layer: 0,
            layers,
            frames,
        })
    }
}

/// Parses either layout into the current one.
pub(super) fn parse(json: &str) -> PersistenceResult<ProjectRecord> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value.get("version") {
        None => {
            let legacy: LegacyRecord = serde_json::from_value(value)?;
            legacy.upgrade()
        }
        Some(tag) => {
            let version = tag.as_u64().ok_or_else(|| {
                PersistenceError::InvalidRecord(format!("version tag {tag} is not a number"))
            })?;
            if version != SCHEMA_VERSION {
                return Err(PersistenceError::UnsupportedVersion(version));
            }
            Ok(serde_json::from_value(value)?)
        }
    }
}
