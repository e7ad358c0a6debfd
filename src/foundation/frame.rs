use crate::foundation::error::{PrismError, PrismResult};

/// One RGBA8 image buffer plus its dimensions.
///
/// `data` is tightly packed, row-major, interleaved `(R,G,B,A)` per pixel and
/// its length is always exactly `width * height * 4`. The constructors check
/// this invariant and [`Frame::data_mut`] hands out a slice rather than the
/// vector, so an effect can mutate pixels in place but can never resize the
/// buffer.
///
/// Frame sizes in this domain are not fixed: a camera switch can change them
/// between calls, which is why engines compare against the incoming frame's
/// dimensions rather than assuming a constant resolution.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Create a frame filled with transparent black.
    pub fn new(width: u32, height: u32) -> PrismResult<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Create a frame with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> PrismResult<Self> {
        let len = checked_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / 4 {
            data.extend_from_slice(&rgba);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing RGBA8 buffer, validating its length against the
    /// dimensions.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> PrismResult<Self> {
        let len = checked_len(width, height)?;
        if data.len() != len {
            return Err(PrismError::frame(format!(
                "frame data length {} does not match {}x{}x4 = {}",
                data.len(),
                width,
                height,
                len
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame width in pixels. Always > 0.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels. Always > 0.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height as a pair, for comparison against an engine's
    /// configured size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Read-only view of the RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view of the RGBA8 bytes. The slice cannot be resized, which
    /// keeps the length invariant intact across every effect call.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame, returning the raw buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Validate dimensions and compute `width * height * 4` without overflow.
pub(crate) fn checked_len(width: u32, height: u32) -> PrismResult<usize> {
    if width == 0 || height == 0 {
        return Err(PrismError::validation(format!(
            "frame dimensions must be > 0, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PrismError::validation("frame buffer size overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_data_rejects_length_mismatch() {
        let err = Frame::from_data(2, 2, vec![0u8; 15]).unwrap_err();
        assert!(matches!(err, PrismError::Frame(_)));
        assert!(Frame::from_data(2, 2, vec![0u8; 16]).is_ok());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(Frame::new(0, 4).is_err());
        assert!(Frame::new(4, 0).is_err());
        assert!(Frame::filled(0, 0, [0, 0, 0, 255]).is_err());
    }

    #[test]
    fn filled_repeats_the_pixel() {
        let f = Frame::filled(3, 2, [10, 20, 30, 255]).unwrap();
        assert_eq!(f.pixel_count(), 6);
        for px in f.data().chunks_exact(4) {
            assert_eq!(px, [10, 20, 30, 255]);
        }
    }
}
