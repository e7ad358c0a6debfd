//! 3x3 neighborhood effects: sharpen and Sobel edge detection.
//!
//! Both kernels need a full 3x3 neighborhood, so they only write the frame
//! interior; the first and last row and column pass through unchanged. Source
//! pixels are always read from a snapshot taken before the pass, so neighbor
//! reads never observe partially updated values.

use crate::effects::{clamp_u8, luma_u8};
use crate::foundation::frame::Frame;

const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

const SOBEL_X: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
const SOBEL_Y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

/// Sharpen the frame interior with the kernel `[0,-1,0; -1,5,-1; 0,-1,0]`,
/// applied independently per color channel.
pub fn sharpen(frame: &mut Frame, scratch: &mut Vec<u8>) {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let data = frame.data_mut();
    scratch.resize(data.len(), 0);
    scratch.copy_from_slice(data);

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = (y * width + x) * 4;
            for c in 0..3 {
                let mut sum = 0.0f32;
                for (k, &weight) in SHARPEN_KERNEL.iter().enumerate() {
                    let sx = x + (k % 3) - 1;
                    let sy = y + (k / 3) - 1;
                    sum += scratch[(sy * width + sx) * 4 + c] as f32 * weight;
                }
                data[idx + c] = clamp_u8(sum);
            }
        }
    }
}

/// Replace the frame interior with the Sobel gradient magnitude of its luma,
/// written identically to R, G and B.
pub fn edge_detect(frame: &mut Frame, scratch: &mut Vec<u8>) {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let data = frame.data_mut();
    scratch.resize(data.len(), 0);
    scratch.copy_from_slice(data);

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let (gx, gy) = sobel_gradients(scratch, x, y, width);
            let magnitude = clamp_u8(((gx * gx + gy * gy) as f32).sqrt());

            let idx = (y * width + x) * 4;
            data[idx] = magnitude;
            data[idx + 1] = magnitude;
            data[idx + 2] = magnitude;
        }
    }
}

/// Horizontal and vertical Sobel responses over the 8-bit luma of the 3x3
/// neighborhood centered at `(x, y)`. Caller guarantees the neighborhood is
/// in bounds.
pub(crate) fn sobel_gradients(data: &[u8], x: usize, y: usize, width: usize) -> (i32, i32) {
    let mut gx = 0i32;
    let mut gy = 0i32;
    for k in 0..9 {
        let sx = x + (k % 3) - 1;
        let sy = y + (k / 3) - 1;
        let gray = luma_u8(data, (sy * width + sx) * 4) as i32;
        gx += gray * SOBEL_X[k];
        gy += gray * SOBEL_Y[k];
    }
    (gx, gy)
}
