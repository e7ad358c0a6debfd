mod native;
mod reference;

pub use native::NativeEngine;
pub use reference::ReferenceEngine;

use crate::effects::{EffectId, EffectParams};
use crate::foundation::error::{PrismError, PrismResult};
use crate::foundation::frame::{Frame, checked_len};

/// Available engine implementations.
///
/// Both kinds expose the same effect set and must produce per-channel output
/// within a small epsilon of each other for identical inputs. `Native` is the
/// optimized implementation; `Reference` is the straightforward baseline it
/// is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EngineKind {
    /// Optimized implementation: per-resolution scratch buffers, no
    /// allocations in steady state.
    Native,
    /// Baseline implementation: allocates temporaries per call.
    Reference,
}

impl EngineKind {
    /// Both kinds, native first.
    pub const ALL: [EngineKind; 2] = [EngineKind::Native, EngineKind::Reference];

    /// Human-readable label for metrics output.
    pub fn label(self) -> &'static str {
        match self {
            EngineKind::Native => "native",
            EngineKind::Reference => "reference",
        }
    }
}

/// One implementation variant exposing the full effect set.
///
/// An engine owns the `(width, height)` it was last configured for plus any
/// per-resolution scratch state. It does not auto-detect size changes: the
/// caller must [`Engine::configure`] before [`Engine::apply`] whenever the
/// incoming frame's dimensions differ from the configured size.
pub trait Engine {
    /// Which implementation variant this is.
    fn kind(&self) -> EngineKind;

    /// The size this engine is currently configured for, if any.
    fn configured_size(&self) -> Option<(u32, u32)>;

    /// (Re)configure for a resolution.
    ///
    /// Idempotent and cheap when the size is unchanged, so it is safe to call
    /// every frame. On an actual change, per-resolution scratch state is
    /// dropped and rebuilt wholesale. Zero dimensions fail fast and leave the
    /// previous configuration in place.
    fn configure(&mut self, width: u32, height: u32) -> PrismResult<()>;

    /// Apply one effect to `frame` in place.
    ///
    /// Fails if the engine is unconfigured or the frame's dimensions disagree
    /// with the configured size.
    fn apply(
        &mut self,
        effect: EffectId,
        frame: &mut Frame,
        params: &EffectParams,
    ) -> PrismResult<()>;
}

/// Create an engine implementation of the requested kind.
pub fn create_engine(kind: EngineKind) -> Box<dyn Engine> {
    match kind {
        EngineKind::Native => Box::new(NativeEngine::new()),
        EngineKind::Reference => Box::new(ReferenceEngine::new()),
    }
}

/// Shared `configure` precondition: positive dimensions.
pub(crate) fn validate_dimensions(width: u32, height: u32) -> PrismResult<()> {
    checked_len(width, height).map(|_| ())
}

/// Shared `apply` precondition: engine configured and frame matching it.
pub(crate) fn check_apply(
    kind: EngineKind,
    configured: Option<(u32, u32)>,
    frame: &Frame,
) -> PrismResult<()> {
    let Some((width, height)) = configured else {
        return Err(PrismError::validation(format!(
            "{} engine has not been configured",
            kind.label()
        )));
    };
    if frame.size() != (width, height) {
        return Err(PrismError::frame(format!(
            "frame is {}x{} but the {} engine is configured for {}x{}",
            frame.width(),
            frame.height(),
            kind.label(),
            width,
            height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_engine_returns_the_requested_kind() {
        for kind in EngineKind::ALL {
            assert_eq!(create_engine(kind).kind(), kind);
        }
    }

    #[test]
    fn apply_requires_configuration() {
        let mut frame = Frame::filled(2, 2, [1, 2, 3, 255]).unwrap();
        for kind in EngineKind::ALL {
            let mut engine = create_engine(kind);
            let err = engine
                .apply(EffectId::Negative, &mut frame, &EffectParams::default())
                .unwrap_err();
            assert!(matches!(err, PrismError::Validation(_)));
        }
    }

    #[test]
    fn apply_rejects_mismatched_frames() {
        let mut frame = Frame::filled(3, 2, [1, 2, 3, 255]).unwrap();
        for kind in EngineKind::ALL {
            let mut engine = create_engine(kind);
            engine.configure(2, 3).unwrap();
            let err = engine
                .apply(EffectId::Negative, &mut frame, &EffectParams::default())
                .unwrap_err();
            assert!(matches!(err, PrismError::Frame(_)));
        }
    }

    #[test]
    fn configure_rejects_zero_and_keeps_previous_size() {
        for kind in EngineKind::ALL {
            let mut engine = create_engine(kind);
            engine.configure(4, 4).unwrap();
            assert!(engine.configure(0, 4).is_err());
            assert!(engine.configure(4, 0).is_err());
            assert_eq!(engine.configured_size(), Some((4, 4)));
        }
    }
}
