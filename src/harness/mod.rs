mod sample;

pub use sample::{FPS_WINDOW, PerformanceSample};

use std::time::Instant;

use crate::effects::{EffectId, EffectParams};
use crate::engine::{Engine, EngineKind, NativeEngine, ReferenceEngine};
use crate::foundation::error::PrismResult;
use crate::foundation::frame::Frame;

/// Owns both engine implementations and routes frames to the active one while
/// measuring per-engine throughput.
///
/// Both engines are held concretely and stay configured once they have seen a
/// resolution, so [`DualEngineHarness::set_active_engine`] is a pure state
/// update with no re-warm-up cost. All state is mutated from a single logical
/// thread of control; the harness takes no locks.
#[derive(Debug)]
pub struct DualEngineHarness {
    native: NativeEngine,
    reference: ReferenceEngine,
    native_sample: PerformanceSample,
    reference_sample: PerformanceSample,
    active_engine: EngineKind,
    active_effect: EffectId,
    params: EffectParams,
}

impl DualEngineHarness {
    /// Create a harness with validated parameters. The native engine and the
    /// HDR anime effect start active, matching the default benchmark setup.
    pub fn new(params: EffectParams) -> PrismResult<Self> {
        params.validate()?;
        Ok(Self {
            native: NativeEngine::new(),
            reference: ReferenceEngine::new(),
            native_sample: PerformanceSample::new(),
            reference_sample: PerformanceSample::new(),
            active_engine: EngineKind::Native,
            active_effect: EffectId::HdrAnime,
            params,
        })
    }

    /// The engine kind frames are currently routed to.
    pub fn active_engine(&self) -> EngineKind {
        self.active_engine
    }

    /// Route subsequent frames to `kind`. Takes effect on the next
    /// [`DualEngineHarness::process_frame`] call; neither engine is
    /// reconfigured.
    pub fn set_active_engine(&mut self, kind: EngineKind) {
        self.active_engine = kind;
    }

    /// The effect applied to processed frames.
    pub fn active_effect(&self) -> EffectId {
        self.active_effect
    }

    /// Select the effect applied from the next processed frame on.
    pub fn set_effect(&mut self, effect: EffectId) {
        self.active_effect = effect;
    }

    /// Select an effect by its stable index, as exposed to UI layers.
    /// Unknown indices are rejected and leave the active effect unchanged.
    pub fn set_effect_index(&mut self, index: u32) -> PrismResult<()> {
        self.active_effect = EffectId::from_index(index)?;
        Ok(())
    }

    /// The effect parameters shared by both engines.
    pub fn params(&self) -> &EffectParams {
        &self.params
    }

    /// Replace the shared effect parameters after validating them.
    pub fn set_params(&mut self, params: EffectParams) -> PrismResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Process one frame through the active engine at the current wall-clock
    /// time.
    ///
    /// Reconfigures the active engine inline when the frame's dimensions
    /// differ from its configured size, applies the active effect in place,
    /// and records one throughput sample for the active engine kind.
    pub fn process_frame(&mut self, frame: &mut Frame) -> PrismResult<()> {
        self.process_frame_at(frame, Instant::now())
    }

    /// [`DualEngineHarness::process_frame`] with an explicit timestamp for
    /// the throughput sample. Deterministic entry point for headless
    /// benchmarks and tests.
    pub fn process_frame_at(&mut self, frame: &mut Frame, now: Instant) -> PrismResult<()> {
        let (engine, sample): (&mut dyn Engine, &mut PerformanceSample) = match self.active_engine {
            EngineKind::Native => (&mut self.native, &mut self.native_sample),
            EngineKind::Reference => (&mut self.reference, &mut self.reference_sample),
        };

        if engine.configured_size() != Some(frame.size()) {
            engine.configure(frame.width(), frame.height())?;
        }
        engine.apply(self.active_effect, frame, &self.params)?;
        sample.record_at(now);
        Ok(())
    }

    /// Most recently finalized frames-per-second figure for an engine kind,
    /// or `None` before its first full measurement window.
    pub fn fps(&self, kind: EngineKind) -> Option<f64> {
        self.sample(kind).fps()
    }

    /// Total frames processed by an engine kind since creation or the last
    /// [`DualEngineHarness::reset_metrics`].
    pub fn frames_processed(&self, kind: EngineKind) -> u64 {
        self.sample(kind).total_frames()
    }

    /// `fps(Native) / fps(Reference)`, or `None` while either side is
    /// unknown or the reference rate is zero.
    pub fn speed_ratio(&self) -> Option<f64> {
        let native = self.fps(EngineKind::Native)?;
        let reference = self.fps(EngineKind::Reference)?;
        if reference <= 0.0 {
            return None;
        }
        Some(native / reference)
    }

    /// Drop all throughput history for both engines. Engine configuration is
    /// untouched.
    pub fn reset_metrics(&mut self) {
        self.native_sample.reset();
        self.reference_sample.reset();
    }

    fn sample(&self, kind: EngineKind) -> &PerformanceSample {
        match kind {
            EngineKind::Native => &self.native_sample,
            EngineKind::Reference => &self.reference_sample,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn invalid_effect_index_leaves_active_effect_unchanged() {
        let mut h = DualEngineHarness::new(EffectParams::default()).unwrap();
        h.set_effect(EffectId::Sepia);
        assert!(h.set_effect_index(6).is_err());
        assert_eq!(h.active_effect(), EffectId::Sepia);
        h.set_effect_index(4).unwrap();
        assert_eq!(h.active_effect(), EffectId::Negative);
    }

    #[test]
    fn samples_are_tracked_per_engine_kind() {
        let mut h = DualEngineHarness::new(EffectParams::default()).unwrap();
        h.set_effect(EffectId::Negative);
        let mut frame = Frame::filled(2, 2, [1, 2, 3, 255]).unwrap();

        let t0 = Instant::now();
        h.process_frame_at(&mut frame, t0).unwrap();
        h.set_active_engine(EngineKind::Reference);
        h.process_frame_at(&mut frame, t0 + Duration::from_millis(10))
            .unwrap();
        h.process_frame_at(&mut frame, t0 + Duration::from_millis(20))
            .unwrap();

        assert_eq!(h.frames_processed(EngineKind::Native), 1);
        assert_eq!(h.frames_processed(EngineKind::Reference), 2);
    }

    #[test]
    fn speed_ratio_needs_both_windows() {
        let mut h = DualEngineHarness::new(EffectParams::default()).unwrap();
        h.set_effect(EffectId::Negative);
        let mut frame = Frame::filled(2, 2, [1, 2, 3, 255]).unwrap();
        let t0 = Instant::now();

        // Finalize a native window only.
        h.process_frame_at(&mut frame, t0).unwrap();
        h.process_frame_at(&mut frame, t0 + Duration::from_secs(1))
            .unwrap();
        assert!(h.fps(EngineKind::Native).is_some());
        assert_eq!(h.speed_ratio(), None);

        // Now the reference side as well.
        h.set_active_engine(EngineKind::Reference);
        h.process_frame_at(&mut frame, t0 + Duration::from_secs(2))
            .unwrap();
        h.process_frame_at(&mut frame, t0 + Duration::from_secs(3))
            .unwrap();
        assert!(h.speed_ratio().is_some());
    }

    #[test]
    fn reset_metrics_keeps_engines_configured() {
        let mut h = DualEngineHarness::new(EffectParams::default()).unwrap();
        h.set_effect(EffectId::Negative);
        let mut frame = Frame::filled(3, 3, [9, 9, 9, 255]).unwrap();
        h.process_frame(&mut frame).unwrap();

        h.reset_metrics();
        assert_eq!(h.frames_processed(EngineKind::Native), 0);
        // Next frame at the same size must not reconfigure or fail.
        h.process_frame(&mut frame).unwrap();
        assert_eq!(h.frames_processed(EngineKind::Native), 1);
    }
}
