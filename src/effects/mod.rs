mod blur;
mod convolve;
mod hdr_anime;
mod pointwise;

pub use blur::box_blur;
pub use convolve::{edge_detect, sharpen};
pub use hdr_anime::hdr_anime;
pub use pointwise::{negative, sepia};

use crate::foundation::error::{PrismError, PrismResult};

/// Closed set of frame effects.
///
/// The discriminants are part of the public contract: a UI layer selects
/// effects by index, and [`EffectId::from_index`] rejects anything outside
/// `0..=5`. Adding an effect means adding a variant here plus an
/// implementation in every engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EffectId {
    /// Three-stage composite: HDR enhancement, posterization, edge boost.
    /// The most compute-intensive effect and the primary benchmark basis.
    HdrAnime = 0,
    /// Two-pass box-average blur. Named for continuity with the original
    /// effect set; the kernel is a box, not a Gaussian.
    GaussianBlur = 1,
    /// Sobel gradient magnitude on luma, written to all three color channels.
    EdgeDetection = 2,
    /// Fixed 3x3 color-matrix sepia toning.
    Sepia = 3,
    /// Per-channel inversion. Exact involution.
    Negative = 4,
    /// 3x3 sharpening convolution over the frame interior.
    Sharpen = 5,
}

impl EffectId {
    /// All effects, in index order.
    pub const ALL: [EffectId; 6] = [
        EffectId::HdrAnime,
        EffectId::GaussianBlur,
        EffectId::EdgeDetection,
        EffectId::Sepia,
        EffectId::Negative,
        EffectId::Sharpen,
    ];

    /// Stable index of this effect.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Look an effect up by index, rejecting values outside the closed set.
    pub fn from_index(idx: u32) -> PrismResult<Self> {
        EffectId::ALL
            .get(idx as usize)
            .copied()
            .ok_or_else(|| PrismError::validation(format!("unknown effect index {idx}")))
    }

    /// Canonical lowercase name, as used by configuration layers.
    pub fn name(self) -> &'static str {
        match self {
            EffectId::HdrAnime => "hdr_anime",
            EffectId::GaussianBlur => "gaussian_blur",
            EffectId::EdgeDetection => "edge_detection",
            EffectId::Sepia => "sepia",
            EffectId::Negative => "negative",
            EffectId::Sharpen => "sharpen",
        }
    }

    /// Parse an effect from its string form. Accepts `snake_case`,
    /// `kebab-case` and case-insensitive spellings.
    pub fn parse(s: &str) -> PrismResult<Self> {
        let kind = s.trim().to_ascii_lowercase().replace('-', "_");
        if kind.is_empty() {
            return Err(PrismError::validation("effect name must be non-empty"));
        }
        for id in EffectId::ALL {
            if kind == id.name() {
                return Ok(id);
            }
        }
        Err(PrismError::validation(format!(
            "unknown effect name '{kind}'"
        )))
    }
}

/// Effect parameters shared by both engines.
///
/// The blur workload (radius and iteration count) is deliberately
/// configuration rather than a per-engine constant: a throughput comparison
/// is only meaningful when both engines run the same algorithmic load per
/// frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectParams {
    /// Box-blur radius in pixels. Values `<= 0` make the blur a no-op.
    pub blur_radius: f32,
    /// Number of two-pass blur sequences per [`EffectId::GaussianBlur`] call.
    pub blur_iterations: u32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            blur_radius: 3.0,
            blur_iterations: 3,
        }
    }
}

impl EffectParams {
    /// Validate parameter ranges.
    pub fn validate(&self) -> PrismResult<()> {
        if !self.blur_radius.is_finite() {
            return Err(PrismError::validation("blur_radius must be finite"));
        }
        if self.blur_radius > 256.0 {
            return Err(PrismError::validation("blur_radius must be <= 256"));
        }
        if self.blur_iterations == 0 {
            return Err(PrismError::validation("blur_iterations must be >= 1"));
        }
        Ok(())
    }

    /// Parse parameters from a JSON value, as handed over by a UI or
    /// configuration layer. Missing fields keep their defaults.
    pub fn from_json(value: &serde_json::Value) -> PrismResult<Self> {
        let params: EffectParams = serde_json::from_value(value.clone())
            .map_err(|e| PrismError::validation(format!("invalid effect params: {e}")))?;
        params.validate()?;
        Ok(params)
    }
}

/// Clamp to `[0, 255]` and truncate back to an 8-bit sample.
#[inline]
pub(crate) fn clamp_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Truncated 8-bit luma of the pixel starting at `idx`.
///
/// Rec. 601 weights, truncated to `u8` before any kernel arithmetic so that
/// both engines feed identical integer luma into the Sobel kernels.
#[inline]
pub(crate) fn luma_u8(data: &[u8], idx: usize) -> u8 {
    let r = data[idx] as f32;
    let g = data[idx + 1] as f32;
    let b = data[idx + 2] as f32;
    (r * 0.299 + g * 0.587 + b * 0.114) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_index_covers_the_closed_set() {
        for (i, id) in EffectId::ALL.iter().enumerate() {
            assert_eq!(EffectId::from_index(i as u32).unwrap(), *id);
            assert_eq!(id.index(), i as u32);
        }
        assert!(EffectId::from_index(6).is_err());
        assert!(EffectId::from_index(u32::MAX).is_err());
    }

    #[test]
    fn parse_accepts_kebab_and_mixed_case() {
        assert_eq!(EffectId::parse("HDR-Anime").unwrap(), EffectId::HdrAnime);
        assert_eq!(EffectId::parse(" sepia ").unwrap(), EffectId::Sepia);
        assert!(EffectId::parse("vignette").is_err());
        assert!(EffectId::parse("").is_err());
    }

    #[test]
    fn params_json_roundtrip_with_defaults() {
        let p = EffectParams::from_json(&serde_json::json!({ "blur_radius": 1.5 })).unwrap();
        assert_eq!(p.blur_radius, 1.5);
        assert_eq!(p.blur_iterations, 3);

        assert!(EffectParams::from_json(&serde_json::json!({ "blur_iterations": 0 })).is_err());
    }

    #[test]
    fn luma_orders_primaries_by_brightness() {
        let data = [255u8, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255];
        let red = luma_u8(&data, 0);
        let green = luma_u8(&data, 4);
        let blue = luma_u8(&data, 8);
        assert!(green > red);
        assert!(red > blue);
    }
}
