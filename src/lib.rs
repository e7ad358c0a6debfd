//! Prism applies deterministic pixel effects to a stream of RGBA8 video
//! frames and compares the throughput of two interchangeable effect engines
//! at runtime.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: a [`FrameSource`] hands the loop one [`Frame`] per
//!    iteration (or signals "no frame yet").
//! 2. **Process**: the [`DualEngineHarness`] routes the frame through the
//!    active [`Engine`], applying the active [`EffectId`] in place and
//!    recording one throughput sample.
//! 3. **Present**: the mutated frame goes to a [`FramePresenter`].
//!
//! The two engines — [`NativeEngine`] (optimized, allocation-free in steady
//! state) and [`ReferenceEngine`] (plain baseline) — implement the same
//! closed effect set and must agree per channel within a small epsilon for
//! identical inputs, so switching engines changes speed, never pictures.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single thread of control**: all frame, engine and harness state is
//!   touched from one logical thread; the only shared state is the loop's
//!   cancel flag.
//! - **In-place, bounded-time effects**: every effect mutates the frame
//!   buffer synchronously, preserves its length, and never touches alpha.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod effects;
mod engine;
mod foundation;
mod harness;
mod pipeline;

pub use effects::{
    EffectId, EffectParams, box_blur, edge_detect, hdr_anime, negative, sepia, sharpen,
};
pub use engine::{Engine, EngineKind, NativeEngine, ReferenceEngine, create_engine};
pub use foundation::error::{PrismError, PrismResult};
pub use foundation::frame::Frame;
pub use harness::{DualEngineHarness, FPS_WINDOW, PerformanceSample};
pub use pipeline::{CancelToken, FramePresenter, FrameSource, LoopStats, RenderLoop, StepOutcome};
