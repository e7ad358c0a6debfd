//! Two-pass box-average blur.
//!
//! Each iteration averages horizontally and then vertically over a window of
//! `floor(radius * 2) + 1` samples centered on the pixel. Edge pixels average
//! over the in-bounds samples only; there is no wraparound and no replication,
//! so the window simply shrinks near the borders.

use crate::foundation::frame::Frame;

/// Apply `iterations` two-pass box blurs of the given radius in place.
///
/// `radius <= 0` or `iterations == 0` leaves the frame untouched. Alpha bytes
/// are never modified. `scratch` holds the per-pass snapshot and is resized as
/// needed; passing the same vector across calls keeps the steady state free of
/// allocations.
pub fn box_blur(frame: &mut Frame, radius: f32, iterations: u32, scratch: &mut Vec<u8>) {
    if radius <= 0.0 || iterations == 0 {
        return;
    }

    let width = frame.width() as usize;
    let height = frame.height() as usize;
    // Window offsets relative to the pixel: lo..=hi, always containing 0.
    let lo = -(radius as i32);
    let hi = (radius * 2.0) as i32 + lo;

    let data = frame.data_mut();
    for _ in 0..iterations {
        blur_axis(data, scratch, width, height, lo, hi, Axis::Horizontal);
        blur_axis(data, scratch, width, height, lo, hi, Axis::Vertical);
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn blur_axis(
    data: &mut [u8],
    scratch: &mut Vec<u8>,
    width: usize,
    height: usize,
    lo: i32,
    hi: i32,
    axis: Axis,
) {
    scratch.resize(data.len(), 0);
    scratch.copy_from_slice(data);

    let span = match axis {
        Axis::Horizontal => width as i32,
        Axis::Vertical => height as i32,
    };

    for y in 0..height {
        for x in 0..width {
            let pos = match axis {
                Axis::Horizontal => x as i32,
                Axis::Vertical => y as i32,
            };
            let from = (pos + lo).max(0);
            let to = (pos + hi).min(span - 1);
            let count = (to - from + 1) as f32;

            let mut sum = [0.0f32; 3];
            for s in from..=to {
                let idx = match axis {
                    Axis::Horizontal => (y * width + s as usize) * 4,
                    Axis::Vertical => (s as usize * width + x) * 4,
                };
                sum[0] += scratch[idx] as f32;
                sum[1] += scratch[idx + 1] as f32;
                sum[2] += scratch[idx + 2] as f32;
            }

            let idx = (y * width + x) * 4;
            data[idx] = (sum[0] / count) as u8;
            data[idx + 1] = (sum[1] / count) as u8;
            data[idx + 2] = (sum[2] / count) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_radius_is_identity() {
        let mut f = Frame::from_data(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let original = f.clone();
        box_blur(&mut f, 0.0, 3, &mut Vec::new());
        assert_eq!(f, original);
        box_blur(&mut f, -1.5, 3, &mut Vec::new());
        assert_eq!(f, original);
    }

    #[test]
    fn uniform_frame_is_a_fixed_point() {
        let mut f = Frame::filled(3, 3, [10, 20, 30, 255]).unwrap();
        let original = f.clone();
        box_blur(&mut f, 1.0, 1, &mut Vec::new());
        assert_eq!(f, original);
    }

    #[test]
    fn blur_spreads_energy_and_keeps_alpha() {
        let mut f = Frame::new(5, 5).unwrap();
        {
            let data = f.data_mut();
            for px in data.chunks_exact_mut(4) {
                px[3] = 255;
            }
            let center = (2 * 5 + 2) * 4;
            data[center] = 255;
        }

        box_blur(&mut f, 2.0, 1, &mut Vec::new());

        let lit = f.data().chunks_exact(4).filter(|px| px[0] > 0).count();
        assert!(lit > 1);
        for px in f.data().chunks_exact(4) {
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn scratch_is_reused_across_calls() {
        let mut f = Frame::filled(4, 4, [50, 100, 150, 255]).unwrap();
        let mut scratch = Vec::new();
        box_blur(&mut f, 1.0, 1, &mut scratch);
        let cap = scratch.capacity();
        box_blur(&mut f, 1.0, 2, &mut scratch);
        assert_eq!(scratch.capacity(), cap);
    }
}
