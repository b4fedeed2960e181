use drawerkit::{AnimationRequest, TransitionId};

use crate::{Easing, Tween, secs_to_ms};

/// One step of a running transition.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimatorSample {
    pub id: TransitionId,
    /// Eased progress in `[0, 1]`, ready for `Drawer::apply_animation_progress`.
    pub progress: f32,
    pub done: bool,
}

/// The interpolation strategy behind [`crate::Controller`]: runs at most one transition at a
/// time and reports eased progress on demand.
pub trait Animator {
    /// Starts running `request`, replacing whatever was running.
    fn start(&mut self, request: &AnimationRequest, now_ms: u64);

    fn sample(&self, now_ms: u64) -> Option<AnimatorSample>;

    /// Stops the running transition and returns its id.
    fn stop(&mut self) -> Option<TransitionId>;

    fn is_animating(&self) -> bool;
}

/// Tween-based [`Animator`] with the easing chosen by the request's timing curve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TweenAnimator {
    running: Option<(TransitionId, Tween)>,
}

impl TweenAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tween(&self) -> Option<&Tween> {
        self.running.as_ref().map(|(_, tween)| tween)
    }
}

impl Animator for TweenAnimator {
    fn start(&mut self, request: &AnimationRequest, now_ms: u64) {
        let tween = Tween::new(
            0.0,
            1.0,
            now_ms,
            secs_to_ms(request.duration_secs()),
            Easing::from(request.info.timing_curve),
        );
        self.running = Some((request.id, tween));
    }

    fn sample(&self, now_ms: u64) -> Option<AnimatorSample> {
        let (id, tween) = self.running?;
        Some(AnimatorSample {
            id,
            progress: tween.progress(now_ms),
            done: tween.is_done(now_ms),
        })
    }

    fn stop(&mut self) -> Option<TransitionId> {
        self.running.take().map(|(id, _)| id)
    }

    fn is_animating(&self) -> bool {
        self.running.is_some()
    }
}
