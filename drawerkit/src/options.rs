use alloc::sync::Arc;

use crate::drawer::Drawer;
use crate::transition::{AnimationFrame, TransitionInfo};
use crate::{AnimatingPosition, DrawerState, TimingCurve};

/// Height of the status bar the drawer may leave uncovered.
pub const STATUS_BAR_HEIGHT: f32 = 20.0;

/// How far up the drawer travels when fully expanded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FullExpansionBehaviour {
    /// The drawer covers the whole container.
    #[default]
    CoversFullScreen,
    /// The drawer stops below the status bar.
    DoesNotCoverStatusBar,
    /// The drawer stops `gap` points below the container's top edge.
    LeavesCustomGap { gap: f32 },
}

impl FullExpansionBehaviour {
    /// The drawer's `y` when fully expanded.
    pub fn drawer_full_y(self) -> f32 {
        match self {
            Self::CoversFullScreen => 0.0,
            Self::DoesNotCoverStatusBar => STATUS_BAR_HEIGHT,
            Self::LeavesCustomGap { gap } => {
                if gap.is_finite() {
                    gap.max(0.0)
                } else {
                    0.0
                }
            }
        }
    }
}

/// How the drawer's top corner radius varies with its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CornerAnimationOption {
    /// Peaks at the partially expanded position and fades towards both extremes.
    #[default]
    MaximumAtPartialY,
    /// Full radius whenever the drawer sits below the status bar.
    AlwaysShowBelowStatusBar,
    /// Constant radius.
    Always,
}

/// Behaviour of the drag handle shown at the top of the drawer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandleConfiguration {
    /// Whether the handle fades in and out as the drawer moves.
    pub auto_animates_dimming: bool,
}

impl Default for HandleConfiguration {
    fn default() -> Self {
        Self {
            auto_animates_dimming: true,
        }
    }
}

/// Immutable drawer behaviour for one presentation.
///
/// Defaults follow a typical bottom sheet: 0.4s transitions, partial expansion with staged
/// dismissal, a flick threshold of 3 container heights per second and 40pt marks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrawerConfiguration {
    /// Duration of a transition across the whole container (or of every transition when
    /// `duration_is_proportional_to_distance_traveled` is false).
    pub total_duration_secs: f32,
    pub duration_is_proportional_to_distance_traveled: bool,
    pub timing_curve: TimingCurve,
    pub full_expansion_behaviour: FullExpansionBehaviour,
    pub supports_partial_expansion: bool,
    /// When false, collapsing from fully expanded never stops at the partial position.
    pub dismisses_in_stages: bool,
    pub is_drawer_draggable: bool,
    pub is_fully_presentable_by_drawer_taps: bool,
    pub number_of_taps_for_full_drawer_presentation: u32,
    pub is_dismissable_by_outside_drawer_taps: bool,
    pub number_of_taps_for_outside_drawer_dismissal: u32,
    /// Release speed, in container heights per second, above which a drag counts as a flick.
    pub flick_speed_threshold: f32,
    /// Distance above the partial position of the mark that selects full expansion.
    pub upper_mark_gap: f32,
    /// Distance below the partial position of the mark that selects collapse.
    pub lower_mark_gap: f32,
    pub maximum_corner_radius: f32,
    pub corner_animation_option: CornerAnimationOption,
    pub handle: Option<HandleConfiguration>,
    /// Whether a dimming overlay is shown behind the drawer.
    pub dims_background: bool,
    /// Touches outside the drawer go to the presenting screen. Disables both tap gestures.
    pub forwards_touches_to_presenter: bool,
}

impl Default for DrawerConfiguration {
    fn default() -> Self {
        Self {
            total_duration_secs: 0.4,
            duration_is_proportional_to_distance_traveled: false,
            timing_curve: TimingCurve::default(),
            full_expansion_behaviour: FullExpansionBehaviour::default(),
            supports_partial_expansion: true,
            dismisses_in_stages: true,
            is_drawer_draggable: true,
            is_fully_presentable_by_drawer_taps: true,
            number_of_taps_for_full_drawer_presentation: 1,
            is_dismissable_by_outside_drawer_taps: true,
            number_of_taps_for_outside_drawer_dismissal: 1,
            flick_speed_threshold: 3.0,
            upper_mark_gap: 40.0,
            lower_mark_gap: 40.0,
            maximum_corner_radius: 15.0,
            corner_animation_option: CornerAnimationOption::default(),
            handle: Some(HandleConfiguration::default()),
            dims_background: false,
            forwards_touches_to_presenter: false,
        }
    }
}

impl DrawerConfiguration {
    pub fn drawer_full_y(&self) -> f32 {
        self.full_expansion_behaviour.drawer_full_y()
    }

    /// The state a freshly presented drawer settles in.
    pub fn initial_state(&self) -> DrawerState {
        if self.supports_partial_expansion {
            DrawerState::PartiallyExpanded
        } else {
            DrawerState::FullyExpanded
        }
    }

    pub(crate) fn handle_auto_animates(&self) -> bool {
        self.handle.is_some_and(|h| h.auto_animates_dimming)
    }

    pub fn with_total_duration_secs(mut self, secs: f32) -> Self {
        self.total_duration_secs = secs;
        self
    }

    pub fn with_duration_proportional_to_distance(mut self, proportional: bool) -> Self {
        self.duration_is_proportional_to_distance_traveled = proportional;
        self
    }

    pub fn with_timing_curve(mut self, curve: TimingCurve) -> Self {
        self.timing_curve = curve;
        self
    }

    pub fn with_full_expansion_behaviour(mut self, behaviour: FullExpansionBehaviour) -> Self {
        self.full_expansion_behaviour = behaviour;
        self
    }

    pub fn with_partial_expansion(mut self, supported: bool) -> Self {
        self.supports_partial_expansion = supported;
        self
    }

    pub fn with_dismisses_in_stages(mut self, in_stages: bool) -> Self {
        self.dismisses_in_stages = in_stages;
        self
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.is_drawer_draggable = draggable;
        self
    }

    /// Enables expanding by tapping the drawer `taps` times. Zero disables it.
    pub fn with_full_expansion_taps(mut self, taps: u32) -> Self {
        self.is_fully_presentable_by_drawer_taps = taps > 0;
        self.number_of_taps_for_full_drawer_presentation = taps;
        self
    }

    /// Enables dismissal by tapping outside the drawer `taps` times. Zero disables it.
    pub fn with_outside_dismissal_taps(mut self, taps: u32) -> Self {
        self.is_dismissable_by_outside_drawer_taps = taps > 0;
        self.number_of_taps_for_outside_drawer_dismissal = taps;
        self
    }

    pub fn with_flick_speed_threshold(mut self, threshold: f32) -> Self {
        self.flick_speed_threshold = threshold;
        self
    }

    pub fn with_mark_gaps(mut self, upper: f32, lower: f32) -> Self {
        self.upper_mark_gap = upper;
        self.lower_mark_gap = lower;
        self
    }

    pub fn with_corner_radius(mut self, maximum: f32, option: CornerAnimationOption) -> Self {
        self.maximum_corner_radius = maximum;
        self.corner_animation_option = option;
        self
    }

    pub fn with_handle(mut self, handle: Option<HandleConfiguration>) -> Self {
        self.handle = handle;
        self
    }

    pub fn with_dims_background(mut self, dims: bool) -> Self {
        self.dims_background = dims;
        self
    }

    pub fn with_forwards_touches_to_presenter(mut self, forwards: bool) -> Self {
        self.forwards_touches_to_presenter = forwards;
        self
    }
}

/// Content shown in a drawer that knows how tall it wants to be when partially expanded.
///
/// Content that does not implement this capability gets no partial expansion.
pub trait DrawerPresentable {
    fn height_of_partially_expanded_drawer(&self) -> f32;
}

/// A callback fired when the drawer's current or target state changes.
pub type OnChangeCallback = Arc<dyn Fn(&Drawer) + Send + Sync>;

/// A callback fired once a transition leaves the drawer collapsed; the host should tear the
/// presentation down.
pub type OnDismissCallback = Arc<dyn Fn() + Send + Sync>;

/// A per-transition hook receiving the transition's description.
pub type TransitionAction = Arc<dyn Fn(&TransitionInfo) + Send + Sync>;

/// A per-frame hook receiving the transition and the values just applied.
pub type AnimateAlongAction = Arc<dyn Fn(&TransitionInfo, &AnimationFrame) + Send + Sync>;

/// A hook fired after a transition completed, with where it ended up.
pub type CleanupAction = Arc<dyn Fn(AnimatingPosition, &TransitionInfo) + Send + Sync>;

/// Hooks a host attaches to drive its own view effects in lockstep with the drawer.
#[derive(Clone, Default)]
pub struct DrawerAnimationActions {
    pub prepare: Option<TransitionAction>,
    pub animate_along: Option<AnimateAlongAction>,
    pub cleanup: Option<CleanupAction>,
}

impl DrawerAnimationActions {
    pub fn with_prepare(
        mut self,
        prepare: impl Fn(&TransitionInfo) + Send + Sync + 'static,
    ) -> Self {
        self.prepare = Some(Arc::new(prepare));
        self
    }

    pub fn with_animate_along(
        mut self,
        animate_along: impl Fn(&TransitionInfo, &AnimationFrame) + Send + Sync + 'static,
    ) -> Self {
        self.animate_along = Some(Arc::new(animate_along));
        self
    }

    pub fn with_cleanup(
        mut self,
        cleanup: impl Fn(AnimatingPosition, &TransitionInfo) + Send + Sync + 'static,
    ) -> Self {
        self.cleanup = Some(Arc::new(cleanup));
        self
    }

    pub(crate) fn fire_prepare(&self, info: &TransitionInfo) {
        if let Some(f) = &self.prepare {
            f(info);
        }
    }

    pub(crate) fn fire_animate_along(&self, info: &TransitionInfo, frame: &AnimationFrame) {
        if let Some(f) = &self.animate_along {
            f(info, frame);
        }
    }

    pub(crate) fn fire_cleanup(&self, position: AnimatingPosition, info: &TransitionInfo) {
        if let Some(f) = &self.cleanup {
            f(position, info);
        }
    }
}

impl core::fmt::Debug for DrawerAnimationActions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DrawerAnimationActions")
            .field("prepare", &self.prepare.is_some())
            .field("animate_along", &self.animate_along.is_some())
            .field("cleanup", &self.cleanup.is_some())
            .finish()
    }
}

/// Configuration plus host callbacks for [`crate::Drawer`].
///
/// Cheap to clone: callbacks and the presentable are stored in `Arc`s.
pub struct DrawerOptions {
    pub configuration: DrawerConfiguration,
    /// The presented content. `None` means partial expansion is unavailable.
    pub presentable: Option<Arc<dyn DrawerPresentable + Send + Sync>>,
    /// Hooks for the view doing the presenting (behind the drawer).
    pub presenting_actions: DrawerAnimationActions,
    /// Hooks for the drawer's own content.
    pub presented_actions: DrawerAnimationActions,
    pub on_change: Option<OnChangeCallback>,
    pub on_dismiss: Option<OnDismissCallback>,
}

impl Clone for DrawerOptions {
    fn clone(&self) -> Self {
        Self {
            configuration: self.configuration.clone(),
            presentable: self.presentable.clone(),
            presenting_actions: self.presenting_actions.clone(),
            presented_actions: self.presented_actions.clone(),
            on_change: self.on_change.clone(),
            on_dismiss: self.on_dismiss.clone(),
        }
    }
}

impl Default for DrawerOptions {
    fn default() -> Self {
        Self::new(DrawerConfiguration::default())
    }
}

impl DrawerOptions {
    pub fn new(configuration: DrawerConfiguration) -> Self {
        Self {
            configuration,
            presentable: None,
            presenting_actions: DrawerAnimationActions::default(),
            presented_actions: DrawerAnimationActions::default(),
            on_change: None,
            on_dismiss: None,
        }
    }

    pub fn with_presentable(
        mut self,
        presentable: impl DrawerPresentable + Send + Sync + 'static,
    ) -> Self {
        self.presentable = Some(Arc::new(presentable));
        self
    }

    /// Convenience for content with a fixed partial height.
    pub fn with_partial_height(self, height: f32) -> Self {
        self.with_presentable(FixedPartialHeight(height))
    }

    pub fn with_presenting_actions(mut self, actions: DrawerAnimationActions) -> Self {
        self.presenting_actions = actions;
        self
    }

    pub fn with_presented_actions(mut self, actions: DrawerAnimationActions) -> Self {
        self.presented_actions = actions;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Drawer) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_dismiss(mut self, on_dismiss: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_dismiss = on_dismiss.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for DrawerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DrawerOptions")
            .field("configuration", &self.configuration)
            .field("presentable", &self.presentable.is_some())
            .field("presenting_actions", &self.presenting_actions)
            .field("presented_actions", &self.presented_actions)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug)]
struct FixedPartialHeight(f32);

impl DrawerPresentable for FixedPartialHeight {
    fn height_of_partially_expanded_drawer(&self) -> f32 {
        self.0
    }
}
