use alloc::boxed::Box;

use crate::geometry::{DrawerGeometry, POSITION_EPSILON, abs, actual_transition_duration, clamped};
use crate::policy::{self, DragSession};
use crate::state::{GestureAvailability, NestedScrollState, StateMachine};
use crate::transition::{
    AnimationFrame, AnimationPlan, AnimationRequest, CornerRadiusAnimation, TransitionGeometry,
    TransitionInfo, corner_radius_at, cosmetics_at, is_extreme,
};
use crate::{
    AnimatingPosition, ContainerLayout, CornerAnimationOption, Cosmetics, DebugMarks, DragSource,
    DrawerConfiguration, DrawerError, DrawerOptions, DrawerState, Frame, Result, TapEvent,
    TransitionId,
};

/// Per-frame closure attached to a single transition.
pub type AlongsideFn = Box<dyn FnMut(&AnimationFrame) + Send>;

/// Completion closure attached to a single transition.
pub type CompletionFn = Box<dyn FnOnce(AnimatingPosition) + Send>;

struct ActiveTransition {
    info: TransitionInfo,
    plan: AnimationPlan,
    alongside: Option<AlongsideFn>,
    completion: Option<CompletionFn>,
}

/// A headless bottom drawer.
///
/// This type holds no UI objects. The host drives it:
/// - layout changes via `set_container_layout`
/// - gestures via `drag_*` and `handle_tap` (or a [`crate::PullToDismiss`] coordinator)
/// - animations by running each returned [`AnimationRequest`], reporting frames with
///   `apply_animation_progress` and the outcome with `complete_transition`
///
/// For a tick-driven controller that runs the animations itself, see the `drawerkit-adapter`
/// crate.
pub struct Drawer {
    options: DrawerOptions,
    layout: ContainerLayout,
    state: StateMachine,
    transition: Option<ActiveTransition>,
    corner_animation: Option<CornerRadiusAnimation>,
    presented: bool,
    next_id: u64,
    last_notified: (DrawerState, DrawerState),
}

impl Drawer {
    /// Creates a drawer sitting collapsed (off-screen) below `layout`.
    ///
    /// The target state starts at the configuration's initial state; call [`Drawer::present`]
    /// to animate there.
    pub fn new(options: DrawerOptions, layout: ContainerLayout) -> Self {
        let configuration = &options.configuration;
        let target_state = configuration.initial_state();
        let geometry = geometry_for(&options, layout);
        let current_y = geometry.container_height;
        let mut state = StateMachine::new(current_y, target_state, configuration);
        state.cosmetics = cosmetics_at(current_y, Cosmetics::default(), &geometry, configuration);
        ddebug!(
            height = geometry.container_height,
            partial_height = geometry.partial_height,
            ?target_state,
            "Drawer::new"
        );
        Self {
            last_notified: (geometry.state_for(current_y), target_state),
            options,
            layout,
            state,
            transition: None,
            corner_animation: None,
            presented: false,
            next_id: 0,
        }
    }

    pub fn options(&self) -> &DrawerOptions {
        &self.options
    }

    pub fn configuration(&self) -> &DrawerConfiguration {
        &self.options.configuration
    }

    pub fn layout(&self) -> ContainerLayout {
        self.layout
    }

    pub fn state(&self) -> &StateMachine {
        &self.state
    }

    /// The geometry for the current layout and presented content.
    pub fn geometry(&self) -> DrawerGeometry {
        geometry_for(&self.options, self.layout)
    }

    pub fn debug_marks(&self) -> DebugMarks {
        self.geometry().debug_marks()
    }

    pub fn current_y(&self) -> f32 {
        self.state.current_y
    }

    /// The state matching the drawer's actual position.
    pub fn current_state(&self) -> DrawerState {
        self.geometry().state_for(self.state.current_y)
    }

    /// Where the drawer is headed. Equal to `current_state` when nothing is moving.
    pub fn target_state(&self) -> DrawerState {
        self.state.target_state
    }

    pub fn cosmetics(&self) -> Cosmetics {
        self.state.cosmetics
    }

    pub fn gestures(&self) -> GestureAvailability {
        self.state.gestures
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.state.drag.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn active_transition(&self) -> Option<&TransitionInfo> {
        self.transition.as_ref().map(|t| &t.info)
    }

    pub fn is_presented(&self) -> bool {
        self.presented
    }

    /// The drawer's frame for its current position.
    pub fn frame(&self) -> Frame {
        frame_at(self.state.current_y, self.layout, &self.geometry())
    }

    fn notify(&mut self) {
        let now = (self.current_state(), self.state.target_state);
        if now == self.last_notified {
            return;
        }
        self.last_notified = now;
        dtrace!(current = ?now.0, target = ?now.1, "Drawer::notify");
        if let Some(cb) = self.options.on_change.clone() {
            cb(self);
        }
    }

    fn allocate_id(&mut self) -> TransitionId {
        self.next_id = self.next_id.wrapping_add(1);
        TransitionId(self.next_id)
    }

    /// Call this when the container is laid out again (rotation, keyboard, resize).
    ///
    /// A resting drawer is re-seated at its target state's position in the new geometry.
    pub fn set_container_layout(&mut self, layout: ContainerLayout) {
        if self.layout == layout {
            return;
        }
        dtrace!(
            width = layout.width,
            height = layout.height,
            "Drawer::set_container_layout"
        );
        self.layout = layout;
        self.reseat();
    }

    /// Call this when the presented content's partial height changed.
    pub fn invalidate_partial_height(&mut self) {
        self.reseat();
    }

    fn reseat(&mut self) {
        if self.transition.is_some() || self.state.drag.is_some() {
            self.notify();
            return;
        }
        let geometry = self.geometry();
        let resting = if self.presented {
            self.state.target_state
        } else {
            DrawerState::Collapsed
        };
        let y = geometry
            .position_for(resting)
            .unwrap_or_else(|| geometry.clamp_y(self.state.current_y));
        self.state.current_y = y;
        self.state.cosmetics = cosmetics_at(
            y,
            self.state.cosmetics,
            &geometry,
            &self.options.configuration,
        );
        self.notify();
    }

    /// Starts the presentation transition from collapsed to the initial state.
    ///
    /// Falls back to full expansion when the content has no distinct partial position.
    pub fn present(&mut self) -> AnimationRequest {
        self.presented = true;
        let initial = if self.options.configuration.supports_partial_expansion
            && self.geometry().has_distinct_partial()
        {
            DrawerState::PartiallyExpanded
        } else {
            DrawerState::FullyExpanded
        };
        self.begin_transition(initial, None, None)
    }

    pub fn partly_expand(&mut self) -> AnimationRequest {
        self.begin_transition(DrawerState::PartiallyExpanded, None, None)
    }

    pub fn expand(&mut self) -> AnimationRequest {
        self.begin_transition(DrawerState::FullyExpanded, None, None)
    }

    pub fn collapse(&mut self) -> AnimationRequest {
        self.begin_transition(DrawerState::Collapsed, None, None)
    }

    /// Collapses the drawer ahead of the host tearing the presentation down.
    pub fn prepare_for_dismissal(&mut self) -> AnimationRequest {
        self.collapse()
    }

    /// Animates to `target`. Shorthand for [`Drawer::animate_transition_with`] without closures.
    pub fn animate_transition(&mut self, target: DrawerState) -> Result<AnimationRequest> {
        self.animate_transition_with(target, None, None)
    }

    /// Plans a transition to `target` and returns the request the host must run.
    ///
    /// Any transition in flight is interrupted first (its cleanup fires with
    /// [`AnimatingPosition::Current`]). Prepare hooks fire before anything is mutated, then the
    /// target state is updated immediately so gesture availability reflects the destination.
    pub fn animate_transition_with(
        &mut self,
        target: DrawerState,
        alongside: Option<AlongsideFn>,
        completion: Option<CompletionFn>,
    ) -> Result<AnimationRequest> {
        if !target.is_resting() {
            dwarn!(?target, "Drawer::animate_transition: not a resting state");
            return Err(DrawerError::InvalidTarget(target));
        }
        Ok(self.begin_transition(target, alongside, completion))
    }

    fn begin_transition(
        &mut self,
        target: DrawerState,
        alongside: Option<AlongsideFn>,
        completion: Option<CompletionFn>,
    ) -> AnimationRequest {
        let interrupted = self.interrupt_transition();
        let id = self.allocate_id();

        let configuration = &self.options.configuration;
        let geometry = self.geometry();
        let start_y = self.state.current_y;
        let start_state = geometry.state_for(start_y);
        let end_y = geometry.position_for(target).unwrap_or(start_y);
        let duration_secs =
            actual_transition_duration(start_y, end_y, geometry.container_height, configuration);

        let info = TransitionInfo {
            id,
            start_state,
            target_state: target,
            duration_secs,
            timing_curve: configuration.timing_curve,
            geometry: TransitionGeometry {
                container: self.layout,
                drawer: geometry,
                starting_frame: frame_at(start_y, self.layout, &geometry),
                ending_frame: frame_at(end_y, self.layout, &geometry),
            },
            is_expanding: end_y < start_y,
        };

        let live = self.state.cosmetics;
        let mut start_cosmetics = cosmetics_at(start_y, live, &geometry, configuration);
        start_cosmetics.corner_radius = live.corner_radius;
        let plan = AnimationPlan {
            duration_secs,
            start: AnimationFrame {
                y: start_y,
                cosmetics: start_cosmetics,
            },
            end: AnimationFrame {
                y: end_y,
                cosmetics: cosmetics_at(end_y, live, &geometry, configuration),
            },
        };

        ddebug!(
            id = id.0,
            ?start_state,
            ?target,
            start_y,
            end_y,
            duration_secs,
            "Drawer::animate_transition"
        );

        self.options.presenting_actions.fire_prepare(&info);
        self.options.presented_actions.fire_prepare(&info);

        self.state
            .set_target_state(target, &self.options.configuration);
        self.state.cosmetics = start_cosmetics;
        self.transition = Some(ActiveTransition {
            info,
            plan,
            alongside,
            completion,
        });
        self.notify();

        AnimationRequest {
            id,
            interrupted,
            plan,
            info,
        }
    }

    /// Applies the transition's values at `progress` (already eased, `0..=1`) and fires the
    /// animate-alongside hooks.
    pub fn apply_animation_progress(
        &mut self,
        id: TransitionId,
        progress: f32,
    ) -> Result<AnimationFrame> {
        let Some(active) = self.transition.as_mut().filter(|t| t.info.id == id) else {
            dwarn!(id = id.0, "Drawer::apply_animation_progress: transition not in flight");
            return Err(DrawerError::StaleTransition(id));
        };

        let frame = active.plan.sample(progress);
        self.state.current_y = frame.y;
        self.state.cosmetics = frame.cosmetics;
        self.options
            .presenting_actions
            .fire_animate_along(&active.info, &frame);
        self.options
            .presented_actions
            .fire_animate_along(&active.info, &frame);
        if let Some(alongside) = active.alongside.as_mut() {
            alongside(&frame);
        }
        dtrace!(id = id.0, progress, y = frame.y, "Drawer::apply_animation_progress");

        self.notify();
        Ok(frame)
    }

    /// Reports how a transition ended. Must be called exactly once per request.
    ///
    /// Unless the transition reached its end, the target state is re-derived from the actual
    /// position so later gesture decisions match reality. Returns the resulting current state.
    pub fn complete_transition(
        &mut self,
        id: TransitionId,
        position: AnimatingPosition,
    ) -> Result<DrawerState> {
        let Some(active) = self.transition.take_if(|t| t.info.id == id) else {
            dwarn!(id = id.0, ?position, "Drawer::complete_transition: transition not in flight");
            return Err(DrawerError::StaleTransition(id));
        };
        let ActiveTransition {
            info,
            plan,
            completion,
            ..
        } = active;

        match position {
            AnimatingPosition::End => {
                self.state.current_y = plan.end.y;
                self.state.cosmetics = plan.end.cosmetics;
            }
            AnimatingPosition::Start => {
                self.state.current_y = plan.start.y;
                self.state.cosmetics = plan.start.cosmetics;
            }
            AnimatingPosition::Current => {
                self.state.cosmetics.dimming_alpha = plan.start.cosmetics.dimming_alpha;
            }
        }

        let configuration = &self.options.configuration;
        let rests_at_extreme = (position == AnimatingPosition::End
            && is_extreme(info.target_state))
            || (position == AnimatingPosition::Start && is_extreme(info.start_state));
        if rests_at_extreme
            && configuration.maximum_corner_radius > 0.0
            && configuration.corner_animation_option != CornerAnimationOption::Always
        {
            self.state.cosmetics.corner_radius = 0.0;
        }

        let reached = self.current_state();
        if position != AnimatingPosition::End {
            self.state
                .set_target_state(reached, &self.options.configuration);
        }
        ddebug!(id = id.0, ?position, ?reached, "Drawer::complete_transition");

        self.options
            .presenting_actions
            .fire_cleanup(position, &info);
        self.options
            .presented_actions
            .fire_cleanup(position, &info);

        let dismissed = (position == AnimatingPosition::End
            && info.target_state == DrawerState::Collapsed)
            || (position == AnimatingPosition::Start && info.start_state == DrawerState::Collapsed);
        if dismissed && self.presented {
            self.presented = false;
            ddebug!(id = id.0, "Drawer: dismissed");
            if let Some(cb) = self.options.on_dismiss.clone() {
                cb();
            }
        }

        if let Some(completion) = completion {
            completion(position);
        }

        self.notify();
        Ok(reached)
    }

    /// Cuts the in-flight transition short where it is.
    ///
    /// Returns the interrupted transition's id so the host can stop animating it.
    pub fn interrupt_transition(&mut self) -> Option<TransitionId> {
        let id = self.transition.as_ref()?.info.id;
        ddebug!(id = id.0, "Drawer::interrupt_transition");
        self.complete_transition(id, AnimatingPosition::Current)
            .ok()
            .map(|_| id)
    }

    /// Starts a corner radius animation towards `ending_state` that runs independently of
    /// (and may overlap) the position transition.
    ///
    /// The radius resolves to zero when the animation settles on the collapsed or fully
    /// expanded extremes, so an interrupted drag never snaps it. Returns `None` when there is
    /// nothing to animate.
    pub fn add_corner_radius_animation_ending(
        &mut self,
        ending_state: DrawerState,
    ) -> Option<CornerRadiusAnimation> {
        let geometry = self.geometry();
        let starting_state = geometry.state_for(self.state.current_y);
        let configuration = &self.options.configuration;
        if configuration.maximum_corner_radius <= 0.0
            || abs(geometry.partial_y() - geometry.drawer_full_y) <= POSITION_EPSILON
            || ending_state == starting_state
        {
            return None;
        }
        let end_y = geometry.position_for(ending_state)?;
        let duration_secs = actual_transition_duration(
            self.state.current_y,
            end_y,
            geometry.container_height,
            configuration,
        );
        let zeroes = configuration.corner_animation_option != CornerAnimationOption::Always;
        let to = corner_radius_at(end_y, &geometry, configuration);
        let timing_curve = configuration.timing_curve;

        let animation = CornerRadiusAnimation {
            id: self.allocate_id(),
            from: self.state.cosmetics.corner_radius,
            to,
            duration_secs,
            timing_curve,
            zero_on_end: zeroes && is_extreme(ending_state),
            zero_on_start: zeroes && is_extreme(starting_state),
        };
        ddebug!(id = animation.id.0, ?ending_state, "Drawer::add_corner_radius_animation_ending");
        self.corner_animation = Some(animation);
        Some(animation)
    }

    pub fn apply_corner_radius_progress(&mut self, id: TransitionId, progress: f32) -> Result<f32> {
        let Some(animation) = self.corner_animation.filter(|a| a.id == id) else {
            return Err(DrawerError::StaleTransition(id));
        };
        let t = clamped(progress, 0.0, 1.0);
        let radius = animation.from + (animation.to - animation.from) * t;
        self.state.cosmetics.corner_radius = radius;
        Ok(radius)
    }

    pub fn complete_corner_radius_animation(
        &mut self,
        id: TransitionId,
        position: AnimatingPosition,
    ) -> Result<()> {
        let Some(animation) = self.corner_animation.take_if(|a| a.id == id) else {
            return Err(DrawerError::StaleTransition(id));
        };
        let radius = &mut self.state.cosmetics.corner_radius;
        match position {
            AnimatingPosition::End => *radius = animation.to,
            AnimatingPosition::Start => *radius = animation.from,
            AnimatingPosition::Current => {}
        }
        if (animation.zero_on_end && position == AnimatingPosition::End)
            || (animation.zero_on_start && position == AnimatingPosition::Start)
        {
            *radius = 0.0;
        }
        Ok(())
    }

    /// Opens a drag session for `source`.
    ///
    /// An in-flight transition is interrupted first; its id is returned so the host can stop
    /// animating it.
    pub fn drag_began(&mut self, source: DragSource) -> Result<Option<TransitionId>> {
        if !self.options.configuration.is_drawer_draggable {
            dwarn!(?source, "Drawer::drag_began: dragging is disabled");
            return Err(DrawerError::DragDisabled);
        }
        if let Some(session) = &self.state.drag {
            dwarn!(?source, active = ?session.source, "Drawer::drag_began: drag already active");
            return Err(DrawerError::DragInProgress {
                active: session.source,
            });
        }

        let interrupted = self.interrupt_transition();
        let starting_state = self.current_state();
        ddebug!(?source, ?starting_state, "Drawer::drag_began");
        self.state.drag = Some(DragSession::new(
            source,
            starting_state,
            self.state.current_y,
        ));
        Ok(interrupted)
    }

    /// Moves the drawer by `translation_y` (incremental, points) with no animation.
    ///
    /// `velocity_y` is normalized (container heights per second, positive downwards). Returns
    /// the new, clamped position.
    pub fn drag_changed(&mut self, translation_y: f32, velocity_y: f32) -> Result<f32> {
        let Some(session) = self.state.drag.as_mut() else {
            dwarn!(translation_y, "Drawer::drag_changed: no active drag");
            return Err(DrawerError::NoActiveDrag);
        };
        let translation_y = if translation_y.is_finite() {
            translation_y
        } else {
            0.0
        };
        session.record(translation_y, velocity_y);

        let geometry = self.geometry();
        let configuration = &self.options.configuration;
        let y = geometry.clamp_y(self.state.current_y + translation_y);
        self.state.current_y = y;
        let live = self.state.cosmetics;
        self.state.cosmetics = Cosmetics {
            corner_radius: live.corner_radius,
            ..cosmetics_at(y, live, &geometry, configuration)
        };
        dtrace!(translation_y, y, "Drawer::drag_changed");

        self.notify();
        Ok(y)
    }

    /// Closes the drag session and starts the transition chosen by the release policy.
    pub fn drag_ended(&mut self, velocity_y: f32) -> Result<AnimationRequest> {
        let Some(session) = self.state.drag.take() else {
            dwarn!(velocity_y, "Drawer::drag_ended: no active drag");
            return Err(DrawerError::NoActiveDrag);
        };
        let velocity_y = if velocity_y.is_finite() {
            velocity_y
        } else {
            0.0
        };
        let target = policy::release_target(
            session.starting_state,
            self.state.current_y,
            velocity_y,
            &self.geometry(),
            &self.options.configuration,
        );
        ddebug!(
            source = ?session.source,
            starting_state = ?session.starting_state,
            y = self.state.current_y,
            velocity_y,
            ?target,
            "Drawer::drag_ended"
        );
        Ok(self.begin_transition(target, None, None))
    }

    /// Closes a drag session without a transition, putting the drawer back where it started.
    pub(crate) fn abandon_drag(&mut self) -> bool {
        let Some(session) = self.state.drag.take() else {
            return false;
        };
        let geometry = self.geometry();
        let live = self.state.cosmetics;
        self.state.current_y = session.starting_y;
        self.state.cosmetics = Cosmetics {
            corner_radius: live.corner_radius,
            ..cosmetics_at(
                session.starting_y,
                live,
                &geometry,
                &self.options.configuration,
            )
        };
        ddebug!(source = ?session.source, "Drawer::abandon_drag");
        self.notify();
        true
    }

    /// Closes the drag session and returns the drawer to where the drag started.
    pub fn drag_cancelled(&mut self) -> Result<AnimationRequest> {
        let Some(session) = self.state.drag.take() else {
            dwarn!("Drawer::drag_cancelled: no active drag");
            return Err(DrawerError::NoActiveDrag);
        };
        let target = if session.starting_state.is_resting() {
            session.starting_state
        } else {
            self.geometry().nearest_resting_state(session.starting_y)
        };
        ddebug!(source = ?session.source, ?target, "Drawer::drag_cancelled");
        Ok(self.begin_transition(target, None, None))
    }

    /// Handles a tap. Taps on the drawer expand it fully, taps above it collapse it; both only
    /// while partially expanded and with the configured tap count.
    pub fn handle_tap(&mut self, tap: TapEvent) -> Option<AnimationRequest> {
        if self.state.drag.is_some() {
            return None;
        }
        let gestures = self.state.gestures;
        let expansion_taps = self
            .options
            .configuration
            .number_of_taps_for_full_drawer_presentation;
        let dismissal_taps = self
            .options
            .configuration
            .number_of_taps_for_outside_drawer_dismissal;

        if tap.y >= self.state.current_y {
            if gestures.full_expansion_tap && tap.tap_count == expansion_taps {
                dtrace!(y = tap.y, "Drawer::handle_tap: expand");
                return Some(self.begin_transition(DrawerState::FullyExpanded, None, None));
            }
        } else if gestures.dismissal_tap && tap.tap_count == dismissal_taps {
            dtrace!(y = tap.y, "Drawer::handle_tap: dismiss");
            return Some(self.begin_transition(DrawerState::Collapsed, None, None));
        }
        None
    }

    pub(crate) fn attach_nested_scroll(&mut self) {
        self.state.set_nested_scroll(
            Some(NestedScrollState::default()),
            &self.options.configuration,
        );
    }

    pub(crate) fn detach_nested_scroll(&mut self) {
        self.state
            .set_nested_scroll(None, &self.options.configuration);
    }

    /// Whether over-scroll has moved the drawer and a transition is due when the scroll ends.
    pub fn pull_to_dismiss_pending(&self) -> bool {
        self.state
            .nested_scroll
            .is_some_and(|nested| nested.transition_pending)
    }

    pub(crate) fn set_pull_to_dismiss_pending(&mut self, pending: bool) {
        let Some(nested) = self.state.nested_scroll.as_mut() else {
            return;
        };
        if nested.transition_pending == pending {
            return;
        }
        nested.transition_pending = pending;
        self.state.refresh_gestures(&self.options.configuration);
    }
}

impl core::fmt::Debug for Drawer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Drawer")
            .field("layout", &self.layout)
            .field("state", &self.state)
            .field("transition", &self.transition.as_ref().map(|t| t.info.id))
            .field("corner_animation", &self.corner_animation.map(|a| a.id))
            .field("presented", &self.presented)
            .finish_non_exhaustive()
    }
}

fn geometry_for(options: &DrawerOptions, layout: ContainerLayout) -> DrawerGeometry {
    let configuration = &options.configuration;
    match &options.presentable {
        Some(presentable) => DrawerGeometry::new(
            layout.height,
            presentable.height_of_partially_expanded_drawer() + layout.safe_area_bottom,
            configuration,
        ),
        None => {
            let mut geometry = DrawerGeometry::new(layout.height, 0.0, configuration);
            geometry.supports_partial_expansion = false;
            geometry
        }
    }
}

fn frame_at(y: f32, layout: ContainerLayout, geometry: &DrawerGeometry) -> Frame {
    Frame {
        y,
        width: layout.width,
        height: geometry.container_height - geometry.drawer_full_y,
    }
}
