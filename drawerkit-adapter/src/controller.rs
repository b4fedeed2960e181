use drawerkit::{
    AnimatingPosition, AnimationRequest, ContainerLayout, CornerRadiusAnimation, DragSource,
    Drawer, DrawerOptions, DrawerState, TapEvent, TransitionId, normalized_velocity,
};

use crate::{Animator, Easing, Tween, TweenAnimator, secs_to_ms};

/// A framework-neutral controller that wraps a `drawerkit::Drawer` and runs its transitions.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_container_layout` when the container is laid out
/// - `on_drag_*` / `on_tap` when gesture recognizers fire
/// - `tick(now_ms)` each frame/timer tick while `is_animating()`
///
/// After each call, read `drawer().current_y()` and `drawer().cosmetics()` to place the drawer.
#[derive(Debug)]
pub struct Controller<A = TweenAnimator> {
    drawer: Drawer,
    animator: A,
    corner: Option<(CornerRadiusAnimation, Tween)>,
}

impl Controller<TweenAnimator> {
    pub fn new(options: DrawerOptions, layout: ContainerLayout) -> Self {
        Self::from_drawer(Drawer::new(options, layout))
    }

    pub fn from_drawer(drawer: Drawer) -> Self {
        Self::with_animator(drawer, TweenAnimator::new())
    }
}

impl<A: Animator> Controller<A> {
    pub fn with_animator(drawer: Drawer, animator: A) -> Self {
        Self {
            drawer,
            animator,
            corner: None,
        }
    }

    pub fn drawer(&self) -> &Drawer {
        &self.drawer
    }

    /// Direct access to the drawer, e.g. for a `drawerkit::PullToDismiss` coordinator. Requests
    /// it returns must be handed to [`Controller::run`].
    pub fn drawer_mut(&mut self) -> &mut Drawer {
        &mut self.drawer
    }

    pub fn into_drawer(self) -> Drawer {
        self.drawer
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating() || self.corner.is_some()
    }

    /// Starts animating a request obtained from the drawer directly.
    ///
    /// A running corner radius animation stops where it is; the transition owns the radius.
    pub fn run(&mut self, request: AnimationRequest, now_ms: u64) -> AnimationRequest {
        self.finish_corner_radius_animation(AnimatingPosition::Current);
        self.animator.start(&request, now_ms);
        request
    }

    /// Presents the drawer, with a corner radius animation ending at the initial state.
    pub fn present(&mut self, now_ms: u64) -> AnimationRequest {
        let request = self.drawer.present();
        let request = self.run(request, now_ms);
        self.start_corner_radius_animation(request.target_state(), now_ms);
        request
    }

    pub fn partly_expand(&mut self, now_ms: u64) -> AnimationRequest {
        let request = self.drawer.partly_expand();
        self.run(request, now_ms)
    }

    pub fn expand(&mut self, now_ms: u64) -> AnimationRequest {
        let request = self.drawer.expand();
        self.run(request, now_ms)
    }

    pub fn collapse(&mut self, now_ms: u64) -> AnimationRequest {
        let request = self.drawer.collapse();
        self.run(request, now_ms)
    }

    /// Collapses the drawer ahead of teardown, with a corner radius animation ending collapsed.
    pub fn prepare_for_dismissal(&mut self, now_ms: u64) -> AnimationRequest {
        let request = self.drawer.prepare_for_dismissal();
        let request = self.run(request, now_ms);
        self.start_corner_radius_animation(DrawerState::Collapsed, now_ms);
        request
    }

    pub fn animate_to(
        &mut self,
        target: DrawerState,
        now_ms: u64,
    ) -> drawerkit::Result<AnimationRequest> {
        let request = self.drawer.animate_transition(target)?;
        Ok(self.run(request, now_ms))
    }

    pub fn on_container_layout(&mut self, layout: ContainerLayout) {
        self.drawer.set_container_layout(layout);
    }

    /// Call this when the drawer's pan gesture begins. Any running transition stops where it is.
    pub fn on_drag_began(&mut self) -> drawerkit::Result<()> {
        if self.drawer.drag_began(DragSource::Pan)?.is_some() {
            self.animator.stop();
        }
        self.finish_corner_radius_animation(AnimatingPosition::Current);
        Ok(())
    }

    /// Moves the drawer by an incremental translation. `velocity_y` is in points per second.
    pub fn on_drag_changed(&mut self, translation_y: f32, velocity_y: f32) -> drawerkit::Result<f32> {
        let velocity = normalized_velocity(velocity_y, self.drawer.layout().height);
        self.drawer.drag_changed(translation_y, velocity)
    }

    /// Releases the drag. `velocity_y` is in points per second.
    ///
    /// Besides the settling transition, starts a corner radius animation towards the target so
    /// the radius only resolves to zero once the drawer settles at an extreme.
    pub fn on_drag_ended(
        &mut self,
        velocity_y: f32,
        now_ms: u64,
    ) -> drawerkit::Result<AnimationRequest> {
        let velocity = normalized_velocity(velocity_y, self.drawer.layout().height);
        let request = self.drawer.drag_ended(velocity)?;
        let request = self.run(request, now_ms);
        self.start_corner_radius_animation(request.target_state(), now_ms);
        Ok(request)
    }

    pub fn on_drag_cancelled(&mut self, now_ms: u64) -> drawerkit::Result<AnimationRequest> {
        let request = self.drawer.drag_cancelled()?;
        Ok(self.run(request, now_ms))
    }

    pub fn on_tap(&mut self, tap: TapEvent, now_ms: u64) -> Option<AnimationRequest> {
        let request = self.drawer.handle_tap(tap)?;
        Some(self.run(request, now_ms))
    }

    /// Starts an independent corner radius animation ending at `ending_state`.
    ///
    /// Returns false when the drawer has nothing to animate.
    pub fn start_corner_radius_animation(&mut self, ending_state: DrawerState, now_ms: u64) -> bool {
        self.finish_corner_radius_animation(AnimatingPosition::Current);
        let Some(animation) = self.drawer.add_corner_radius_animation_ending(ending_state) else {
            return false;
        };
        let tween = Tween::new(
            0.0,
            1.0,
            now_ms,
            secs_to_ms(animation.duration_secs),
            Easing::from(animation.timing_curve),
        );
        self.corner = Some((animation, tween));
        true
    }

    fn finish_corner_radius_animation(&mut self, position: AnimatingPosition) {
        if let Some((animation, _)) = self.corner.take() {
            let _ = self
                .drawer
                .complete_corner_radius_animation(animation.id, position);
        }
    }

    /// Stops the running animations where they are.
    pub fn interrupt(&mut self) -> Option<TransitionId> {
        self.animator.stop();
        self.finish_corner_radius_animation(AnimatingPosition::Current);
        self.drawer.interrupt_transition()
    }

    /// Abandons the running transition and snaps back to where it started.
    pub fn reverse(&mut self) -> Option<DrawerState> {
        let id = self.animator.stop()?;
        self.finish_corner_radius_animation(AnimatingPosition::Start);
        self.drawer
            .complete_transition(id, AnimatingPosition::Start)
            .ok()
    }

    /// Advances the running animations.
    ///
    /// Returns the drawer's new position while a transition is running, `None` otherwise.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        let position = self.tick_transition(now_ms);
        self.tick_corner_radius(now_ms);
        position
    }

    fn tick_transition(&mut self, now_ms: u64) -> Option<f32> {
        let sample = self.animator.sample(now_ms)?;
        if self
            .drawer
            .apply_animation_progress(sample.id, sample.progress)
            .is_err()
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "drawerkit_adapter",
                id = sample.id.0,
                "Controller::tick: dropping stale transition"
            );
            self.animator.stop();
            return None;
        }

        if sample.done {
            self.animator.stop();
            if self
                .drawer
                .complete_transition(sample.id, AnimatingPosition::End)
                .is_err()
            {
                return None;
            }
        }
        Some(self.drawer.current_y())
    }

    fn tick_corner_radius(&mut self, now_ms: u64) {
        let Some((animation, tween)) = self.corner else {
            return;
        };
        let applied = self
            .drawer
            .apply_corner_radius_progress(animation.id, tween.progress(now_ms));
        if applied.is_err() || tween.is_done(now_ms) {
            self.finish_corner_radius_animation(AnimatingPosition::End);
        }
    }
}
