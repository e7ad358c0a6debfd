use tracing::debug;

use crate::effects::{EffectId, EffectParams};
use crate::engine::{Engine, EngineKind, check_apply, validate_dimensions};
use crate::foundation::error::PrismResult;
use crate::foundation::frame::Frame;

/// Baseline engine: a deliberately plain implementation of the effect set.
///
/// Every neighbor-reading pass copies the frame into a fresh temporary, and
/// the loops index pixels directly with no hoisting. It carries no
/// per-resolution state beyond the configured size, which makes it the fixed
/// point the native engine's throughput is compared against.
#[derive(Debug, Default)]
pub struct ReferenceEngine {
    size: Option<(u32, u32)>,
}

impl ReferenceEngine {
    /// Create an unconfigured engine.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for ReferenceEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Reference
    }

    fn configured_size(&self) -> Option<(u32, u32)> {
        self.size
    }

    fn configure(&mut self, width: u32, height: u32) -> PrismResult<()> {
        validate_dimensions(width, height)?;
        if self.size != Some((width, height)) {
            debug!(width, height, "reference engine reconfigured");
            self.size = Some((width, height));
        }
        Ok(())
    }

    fn apply(
        &mut self,
        effect: EffectId,
        frame: &mut Frame,
        params: &EffectParams,
    ) -> PrismResult<()> {
        check_apply(self.kind(), self.size, frame)?;
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let data = frame.data_mut();
        match effect {
            EffectId::Negative => negative(data),
            EffectId::Sepia => sepia(data),
            EffectId::Sharpen => sharpen(data, width, height),
            EffectId::EdgeDetection => edge_detection(data, width, height),
            EffectId::GaussianBlur => {
                if params.blur_radius > 0.0 {
                    for _ in 0..params.blur_iterations {
                        blur_horizontal(data, width, height, params.blur_radius);
                        blur_vertical(data, width, height, params.blur_radius);
                    }
                }
            }
            EffectId::HdrAnime => {
                hdr_enhancement(data);
                posterization(data);
                edge_enhancement(data, width, height);
            }
        }
        Ok(())
    }
}

fn negative(data: &mut [u8]) {
    for i in (0..data.len()).step_by(4) {
        data[i] = 255 - data[i];
        data[i + 1] = 255 - data[i + 1];
        data[i + 2] = 255 - data[i + 2];
    }
}

fn sepia(data: &mut [u8]) {
    for i in (0..data.len()).step_by(4) {
        let r = data[i] as f32;
        let g = data[i + 1] as f32;
        let b = data[i + 2] as f32;

        data[i] = (r * 0.393 + g * 0.769 + b * 0.189).min(255.0) as u8;
        data[i + 1] = (r * 0.349 + g * 0.686 + b * 0.168).min(255.0) as u8;
        data[i + 2] = (r * 0.272 + g * 0.534 + b * 0.131).min(255.0) as u8;
    }
}

fn sharpen(data: &mut [u8], width: usize, height: usize) {
    let kernel = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0f32];
    let snapshot = data.to_vec();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = (y * width + x) * 4;
            for c in 0..3 {
                let mut sum = 0.0f32;
                for ky in 0..3 {
                    for kx in 0..3 {
                        let pidx = ((y + ky - 1) * width + (x + kx - 1)) * 4 + c;
                        sum += snapshot[pidx] as f32 * kernel[ky * 3 + kx];
                    }
                }
                data[idx + c] = sum.clamp(0.0, 255.0) as u8;
            }
        }
    }
}

fn edge_detection(data: &mut [u8], width: usize, height: usize) {
    let snapshot = data.to_vec();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let gx = sobel_x(&snapshot, x, y, width);
            let gy = sobel_y(&snapshot, x, y, width);
            let magnitude = ((gx * gx + gy * gy) as f32).sqrt().min(255.0) as u8;

            let idx = (y * width + x) * 4;
            data[idx] = magnitude;
            data[idx + 1] = magnitude;
            data[idx + 2] = magnitude;
        }
    }
}

fn blur_horizontal(data: &mut [u8], width: usize, height: usize, radius: f32) {
    let kernel_size = (radius * 2.0) as usize + 1;
    let snapshot = data.to_vec();

    for y in 0..height {
        for x in 0..width {
            let mut sums = [0.0f32; 3];
            let mut count = 0.0f32;
            for kx in 0..kernel_size {
                let px = x as i32 + kx as i32 - radius as i32;
                if px >= 0 && px < width as i32 {
                    let idx = (y * width + px as usize) * 4;
                    sums[0] += snapshot[idx] as f32;
                    sums[1] += snapshot[idx + 1] as f32;
                    sums[2] += snapshot[idx + 2] as f32;
                    count += 1.0;
                }
            }
            let idx = (y * width + x) * 4;
            data[idx] = (sums[0] / count) as u8;
            data[idx + 1] = (sums[1] / count) as u8;
            data[idx + 2] = (sums[2] / count) as u8;
        }
    }
}

fn blur_vertical(data: &mut [u8], width: usize, height: usize, radius: f32) {
    let kernel_size = (radius * 2.0) as usize + 1;
    let snapshot = data.to_vec();

    for y in 0..height {
        for x in 0..width {
            let mut sums = [0.0f32; 3];
            let mut count = 0.0f32;
            for ky in 0..kernel_size {
                let py = y as i32 + ky as i32 - radius as i32;
                if py >= 0 && py < height as i32 {
                    let idx = (py as usize * width + x) * 4;
                    sums[0] += snapshot[idx] as f32;
                    sums[1] += snapshot[idx + 1] as f32;
                    sums[2] += snapshot[idx + 2] as f32;
                    count += 1.0;
                }
            }
            let idx = (y * width + x) * 4;
            data[idx] = (sums[0] / count) as u8;
            data[idx + 1] = (sums[1] / count) as u8;
            data[idx + 2] = (sums[2] / count) as u8;
        }
    }
}

fn gray_value(data: &[u8], x: usize, y: usize, width: usize) -> u8 {
    let idx = (y * width + x) * 4;
    let r = data[idx] as f32;
    let g = data[idx + 1] as f32;
    let b = data[idx + 2] as f32;
    (r * 0.299 + g * 0.587 + b * 0.114) as u8
}

fn sobel_x(data: &[u8], x: usize, y: usize, width: usize) -> i32 {
    let kernel = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
    let mut sum = 0;
    for ky in 0..3 {
        for kx in 0..3 {
            let gray = gray_value(data, x + kx - 1, y + ky - 1, width);
            sum += gray as i32 * kernel[ky * 3 + kx];
        }
    }
    sum
}

fn sobel_y(data: &[u8], x: usize, y: usize, width: usize) -> i32 {
    let kernel = [-1, -2, -1, 0, 0, 0, 1, 2, 1];
    let mut sum = 0;
    for ky in 0..3 {
        for kx in 0..3 {
            let gray = gray_value(data, x + kx - 1, y + ky - 1, width);
            sum += gray as i32 * kernel[ky * 3 + kx];
        }
    }
    sum
}

fn hdr_enhancement(data: &mut [u8]) {
    let gamma = 0.7f32;
    let saturation_boost = 1.8f32;

    for i in (0..data.len()).step_by(4) {
        let r = (data[i] as f32 / 255.0).powf(gamma);
        let g = (data[i + 1] as f32 / 255.0).powf(gamma);
        let b = (data[i + 2] as f32 / 255.0).powf(gamma);

        let gray = r * 0.299 + g * 0.587 + b * 0.114;

        data[i] = ((gray + (r - gray) * saturation_boost) * 255.0).clamp(0.0, 255.0) as u8;
        data[i + 1] = ((gray + (g - gray) * saturation_boost) * 255.0).clamp(0.0, 255.0) as u8;
        data[i + 2] = ((gray + (b - gray) * saturation_boost) * 255.0).clamp(0.0, 255.0) as u8;
    }
}

fn posterization(data: &mut [u8]) {
    let levels = 6u32;
    let step = 255.0 / (levels - 1) as f32;

    for i in (0..data.len()).step_by(4) {
        for c in 0..3 {
            let level = (data[i + c] as f32 / step).round();
            data[i + c] = (level * step).min(255.0) as u8;
        }
    }
}

fn edge_enhancement(data: &mut [u8], width: usize, height: usize) {
    let snapshot = data.to_vec();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let gx = sobel_x(&snapshot, x, y, width);
            let gy = sobel_y(&snapshot, x, y, width);
            let strength = ((gx * gx + gy * gy) as f32).sqrt() / 255.0;
            let enhancement = 1.0 + strength * 0.5;

            let idx = (y * width + x) * 4;
            for c in 0..3 {
                data[idx + c] = (snapshot[idx + c] as f32 * enhancement).min(255.0) as u8;
            }
        }
    }
}
