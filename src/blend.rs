//! Per-pixel alpha compositing.
//!
//! All math works on straight alpha. The same operator is used for live
//! painting into a [`Cel`](crate::cel::Cel) and for flattening layers in the
//! [`Renderer`](crate::renderer::Renderer).

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// How a painted color is combined with what is already in the cel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// Standard src-over compositing.
    #[default]
    SourceOver,
    /// Overwrite the destination with the source as-is.
    Replace,
}

impl BlendMode {
    pub fn apply(self, dst: Rgba, src: Rgba) -> Rgba {
        match self {
            Self::SourceOver => blend_over(dst, src),
            Self::Replace => src,
        }
    }
}

/// Places `src` over `dst`.
///
/// A fully transparent result is always the zero pixel, so color channels
/// never linger under zero alpha.
pub fn blend_over(dst: Rgba, src: Rgba) -> Rgba {
    blend_over_with_opacity(dst, src, 1.0)
}

/// Places `src` over `dst` with `opacity` multiplied into the source alpha.
pub fn blend_over_with_opacity(dst: Rgba, src: Rgba, opacity: f32) -> Rgba {
    let sa = f64::from(src.a) / 255.0 * f64::from(opacity.clamp(0.0, 1.0));
    let da = f64::from(dst.a) / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= 0.0 {
        return Rgba::TRANSPARENT;
    }

    let channel = |s: u8, d: u8| -> u8 {
        let v = (f64::from(s) * sa + f64::from(d) * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };

    Rgba {
        r: channel(src.r, dst.r),
        g: channel(src.g, dst.g),
        b: channel(src.b, dst.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}
