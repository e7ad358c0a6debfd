use std::time::{Duration, Instant};

/// Minimum elapsed wall-clock time before a window is finalized into an FPS
/// figure.
pub const FPS_WINDOW: Duration = Duration::from_millis(1000);

/// Rolling frames-per-second measurement.
///
/// Counts processed frames against a wall-clock window. Once at least
/// [`FPS_WINDOW`] has elapsed since the window opened, the rate is finalized
/// and the window restarts. [`PerformanceSample::fps`] reports the most
/// recently finalized rate, or `None` before the first full window — the
/// "unknown" sentinel a metrics consumer must handle.
#[derive(Clone, Debug, Default)]
pub struct PerformanceSample {
    window_start: Option<Instant>,
    frames_in_window: u64,
    total_frames: u64,
    last_fps: Option<f64>,
}

impl PerformanceSample {
    /// Create an empty sample with no open window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one processed frame at the current wall-clock time.
    pub fn record(&mut self) {
        self.record_at(Instant::now());
    }

    /// Record one processed frame at an explicit timestamp.
    ///
    /// `now` values must be monotonically non-decreasing across calls; this
    /// is the deterministic entry point used by headless benchmarks and
    /// tests.
    pub fn record_at(&mut self, now: Instant) {
        self.total_frames += 1;
        match self.window_start {
            None => {
                // The opening frame marks the window boundary and is not
                // counted inside it.
                self.window_start = Some(now);
                self.frames_in_window = 0;
            }
            Some(start) => {
                self.frames_in_window += 1;
                let elapsed = now.duration_since(start);
                if elapsed >= FPS_WINDOW {
                    self.last_fps = Some(self.frames_in_window as f64 / elapsed.as_secs_f64());
                    self.window_start = Some(now);
                    self.frames_in_window = 0;
                }
            }
        }
    }

    /// Most recently finalized rate, or `None` before the first full window.
    pub fn fps(&self) -> Option<f64> {
        self.last_fps
    }

    /// Monotonically increasing count of frames recorded since creation or
    /// the last [`PerformanceSample::reset`].
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Discard all history, including the finalized rate.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_unknown_before_a_full_window() {
        let mut s = PerformanceSample::new();
        let t0 = Instant::now();
        for i in 0..10 {
            s.record_at(t0 + Duration::from_millis(i * 50));
        }
        assert_eq!(s.fps(), None);
        assert_eq!(s.total_frames(), 10);
    }

    #[test]
    fn window_finalizes_after_one_second() {
        let mut s = PerformanceSample::new();
        let t0 = Instant::now();
        // 60 frames over exactly one second after the window opens.
        for i in 0..=60u64 {
            s.record_at(t0 + Duration::from_millis(i * 1000 / 60));
        }
        let fps = s.fps().unwrap();
        assert!((fps - 60.0).abs() < 1.0, "fps = {fps}");
    }

    #[test]
    fn window_restarts_after_finalizing() {
        let mut s = PerformanceSample::new();
        let t0 = Instant::now();
        s.record_at(t0);
        s.record_at(t0 + Duration::from_millis(500));
        s.record_at(t0 + Duration::from_secs(1));
        let first = s.fps().unwrap();
        assert!((first - 2.0).abs() < 0.01);

        // A slower second window replaces the figure.
        s.record_at(t0 + Duration::from_secs(3));
        let second = s.fps().unwrap();
        assert!(second < first);
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = PerformanceSample::new();
        let t0 = Instant::now();
        s.record_at(t0);
        s.record_at(t0 + Duration::from_secs(2));
        assert!(s.fps().is_some());

        s.reset();
        assert_eq!(s.fps(), None);
        assert_eq!(s.total_frames(), 0);
    }
}
