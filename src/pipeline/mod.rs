//! Cooperative render loop driving frames from a source, through the
//! harness, to a presenter.
//!
//! The loop is a single logical thread of control: a frame is captured,
//! processed synchronously, and presented before the next iteration starts.
//! `process_frame` never suspends, so a step either completes or it does not;
//! there is no partial-frame state to recover. Cancellation is a flag checked
//! at the top of each step, never an interrupt: the in-flight frame finishes
//! and the next iteration is simply not taken.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::foundation::error::PrismResult;
use crate::foundation::frame::Frame;
use crate::harness::DualEngineHarness;

/// Produces frames for the loop, one per iteration.
///
/// Implementations sit at the platform boundary (camera, decoder, synthetic
/// generator). Returning `Ok(None)` means "no frame yet, skip this
/// iteration"; it is not an end-of-stream marker.
pub trait FrameSource {
    /// Produce the next frame, or `None` to skip this iteration.
    fn next_frame(&mut self) -> PrismResult<Option<Frame>>;
}

/// Receives processed frames.
///
/// The loop makes no assumption about how or when pixels reach a display.
pub trait FramePresenter {
    /// Accept one processed frame.
    fn present(&mut self, frame: &Frame) -> PrismResult<()>;
}

/// What a single loop step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A frame was processed and presented.
    Processed,
    /// The source had no frame, or the frame was dropped on a processing
    /// error.
    Skipped,
    /// The cancel flag was set; no work was attempted.
    Cancelled,
}

/// Cooperative stop flag for a [`RenderLoop`].
///
/// Clones share the flag, so a UI layer can hold one and cancel a running
/// loop at the next iteration boundary. This is the only piece of shared
/// state in the crate.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the loop stop at the next iteration boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters accumulated by [`RenderLoop::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Frames processed and presented.
    pub frames_processed: u64,
    /// Iterations where the source had no frame.
    pub frames_skipped: u64,
    /// Frames dropped because processing failed.
    pub frames_dropped: u64,
}

/// Drives frames from a [`FrameSource`] through the [`DualEngineHarness`] to
/// a [`FramePresenter`].
#[derive(Debug)]
pub struct RenderLoop {
    harness: DualEngineHarness,
    cancel: CancelToken,
    stats: LoopStats,
}

impl RenderLoop {
    /// Wrap a harness in a loop with a fresh cancel token.
    pub fn new(harness: DualEngineHarness) -> Self {
        Self {
            harness,
            cancel: CancelToken::new(),
            stats: LoopStats::default(),
        }
    }

    /// The token that stops this loop. Clone it into whatever layer owns
    /// shutdown.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Read access to the harness, for metrics polling.
    pub fn harness(&self) -> &DualEngineHarness {
        &self.harness
    }

    /// Mutable access to the harness, for engine/effect selection between
    /// steps.
    pub fn harness_mut(&mut self) -> &mut DualEngineHarness {
        &mut self.harness
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Run one iteration: check the cancel flag, pull a frame, process it,
    /// present it.
    ///
    /// A frame the harness rejects is dropped for this iteration and the
    /// error is logged; the loop is expected to continue with the next frame.
    /// Source and presenter errors propagate to the caller, since recovering
    /// from a failing collaborator is its owner's concern.
    pub fn step(
        &mut self,
        source: &mut dyn FrameSource,
        presenter: &mut dyn FramePresenter,
    ) -> PrismResult<StepOutcome> {
        if self.cancel.is_cancelled() {
            return Ok(StepOutcome::Cancelled);
        }

        let Some(mut frame) = source.next_frame()? else {
            self.stats.frames_skipped += 1;
            return Ok(StepOutcome::Skipped);
        };

        match self.harness.process_frame(&mut frame) {
            Ok(()) => {
                presenter.present(&frame)?;
                self.stats.frames_processed += 1;
                Ok(StepOutcome::Processed)
            }
            Err(e) => {
                warn!(error = %e, "dropping frame");
                self.stats.frames_dropped += 1;
                Ok(StepOutcome::Skipped)
            }
        }
    }

    /// Run steps until the cancel token is set, then return the accumulated
    /// counters.
    ///
    /// The caller provides pacing by way of the source (a real frame source
    /// blocks or skips at display cadence); this function adds none.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        presenter: &mut dyn FramePresenter,
    ) -> PrismResult<LoopStats> {
        debug!("render loop started");
        loop {
            if self.step(source, presenter)? == StepOutcome::Cancelled {
                break;
            }
        }
        debug!(
            processed = self.stats.frames_processed,
            skipped = self.stats.frames_skipped,
            dropped = self.stats.frames_dropped,
            "render loop stopped"
        );
        Ok(self.stats)
    }

    /// Prepare a stopped loop for another [`RenderLoop::run`].
    ///
    /// Installs a fresh cancel token and discards loop counters and
    /// throughput history; scheduling restarts from scratch. Engine
    /// configuration survives, so resuming at the same resolution has no
    /// warm-up cost.
    pub fn restart(&mut self) {
        self.cancel = CancelToken::new();
        self.stats = LoopStats::default();
        self.harness.reset_metrics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectId, EffectParams};

    struct ScriptedSource {
        remaining: u32,
        size: (u32, u32),
        cancel: CancelToken,
    }

    impl FrameSource for ScriptedSource {
        fn next_frame(&mut self) -> PrismResult<Option<Frame>> {
            if self.remaining == 0 {
                self.cancel.cancel();
                return Ok(None);
            }
            self.remaining -= 1;
            Ok(Some(Frame::filled(self.size.0, self.size.1, [8, 16, 32, 255]).unwrap()))
        }
    }

    struct CountingPresenter {
        presented: u32,
        last_size: Option<(u32, u32)>,
    }

    impl FramePresenter for CountingPresenter {
        fn present(&mut self, frame: &Frame) -> PrismResult<()> {
            self.presented += 1;
            self.last_size = Some(frame.size());
            Ok(())
        }
    }

    fn test_loop() -> RenderLoop {
        let mut harness = DualEngineHarness::new(EffectParams::default()).unwrap();
        harness.set_effect(EffectId::Negative);
        RenderLoop::new(harness)
    }

    #[test]
    fn run_processes_until_cancelled() {
        let mut rl = test_loop();
        let mut source = ScriptedSource {
            remaining: 5,
            size: (4, 4),
            cancel: rl.cancel_token(),
        };
        let mut presenter = CountingPresenter {
            presented: 0,
            last_size: None,
        };

        let stats = rl.run(&mut source, &mut presenter).unwrap();
        assert_eq!(stats.frames_processed, 5);
        assert_eq!(stats.frames_skipped, 1);
        assert_eq!(stats.frames_dropped, 0);
        assert_eq!(presenter.presented, 5);
    }

    #[test]
    fn cancelled_loop_does_no_work() {
        let mut rl = test_loop();
        rl.cancel_token().cancel();
        let mut source = ScriptedSource {
            remaining: 3,
            size: (4, 4),
            cancel: rl.cancel_token(),
        };
        let mut presenter = CountingPresenter {
            presented: 0,
            last_size: None,
        };

        let outcome = rl.step(&mut source, &mut presenter).unwrap();
        assert_eq!(outcome, StepOutcome::Cancelled);
        assert_eq!(presenter.presented, 0);
    }

    #[test]
    fn restart_allows_a_second_run() {
        let mut rl = test_loop();
        let mut source = ScriptedSource {
            remaining: 2,
            size: (4, 4),
            cancel: rl.cancel_token(),
        };
        let mut presenter = CountingPresenter {
            presented: 0,
            last_size: None,
        };
        rl.run(&mut source, &mut presenter).unwrap();

        rl.restart();
        assert_eq!(rl.stats(), LoopStats::default());
        let mut source = ScriptedSource {
            remaining: 3,
            size: (4, 4),
            cancel: rl.cancel_token(),
        };
        let stats = rl.run(&mut source, &mut presenter).unwrap();
        assert_eq!(stats.frames_processed, 3);
    }
}
