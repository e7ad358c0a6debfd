//! Pointwise color maps: per-pixel transforms with no neighbor access.

use crate::effects::clamp_u8;
use crate::foundation::frame::Frame;

/// Invert each color channel: `out = 255 - in`.
///
/// Applying the effect twice restores the original buffer byte-for-byte.
pub fn negative(frame: &mut Frame) {
    for px in frame.data_mut().chunks_exact_mut(4) {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
}

/// Sepia toning via a fixed 3x3 color matrix, clamped to `[0, 255]`.
pub fn sepia(frame: &mut Frame) {
    for px in frame.data_mut().chunks_exact_mut(4) {
        let r = px[0] as f32;
        let g = px[1] as f32;
        let b = px[2] as f32;

        px[0] = clamp_u8(r * 0.393 + g * 0.769 + b * 0.189);
        px[1] = clamp_u8(r * 0.349 + g * 0.686 + b * 0.168);
        px[2] = clamp_u8(r * 0.272 + g * 0.534 + b * 0.131);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_is_an_involution() {
        let mut f = Frame::from_data(2, 1, vec![255, 0, 128, 255, 100, 200, 50, 7]).unwrap();
        let original = f.clone();
        negative(&mut f);
        assert_ne!(f, original);
        negative(&mut f);
        assert_eq!(f, original);
    }

    #[test]
    fn sepia_clamps_white_and_preserves_alpha() {
        let mut f = Frame::filled(2, 2, [255, 255, 255, 255]).unwrap();
        sepia(&mut f);
        for px in f.data().chunks_exact(4) {
            // 0.393 + 0.769 + 0.189 > 1, so white saturates red.
            assert_eq!(px[0], 255);
            assert!(px[1] < 255);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn sepia_maps_black_to_black() {
        let mut f = Frame::filled(1, 1, [0, 0, 0, 42]).unwrap();
        sepia(&mut f);
        assert_eq!(f.data(), [0, 0, 0, 42]);
    }
}
