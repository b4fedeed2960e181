use crate::policy::DragSession;
use crate::{Cosmetics, DrawerConfiguration, DrawerState};

/// Which gestures the host should currently honour.
///
/// Recomputed synchronously whenever the target state (or the pull-to-dismiss bookkeeping)
/// changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureAvailability {
    /// Tapping the drawer expands it fully.
    pub full_expansion_tap: bool,
    /// Tapping outside the drawer collapses it.
    pub dismissal_tap: bool,
    pub drag: bool,
    /// `Some` when a nested scrollable is attached: whether it may scroll.
    pub nested_scroll: Option<bool>,
    /// The drawer's pan must wait for the nested scrollable's pan to fail.
    pub drag_requires_nested_scroll_failure: bool,
    /// Touches outside the drawer pass through to the presenting screen.
    pub forwards_outside_touches: bool,
}

impl GestureAvailability {
    pub fn evaluate(
        target_state: DrawerState,
        configuration: &DrawerConfiguration,
        nested_scroll: Option<&NestedScrollState>,
    ) -> Self {
        let forwards = configuration.forwards_touches_to_presenter;
        let taps = target_state == DrawerState::PartiallyExpanded && !forwards;
        let nested_scroll = nested_scroll.map(|nested| match target_state {
            DrawerState::PartiallyExpanded | DrawerState::Collapsed => false,
            DrawerState::Transitioning | DrawerState::FullyExpanded => {
                !nested.transition_pending
            }
        });
        Self {
            full_expansion_tap: taps
                && configuration.is_fully_presentable_by_drawer_taps
                && configuration.number_of_taps_for_full_drawer_presentation > 0,
            dismissal_tap: taps
                && configuration.is_dismissable_by_outside_drawer_taps
                && configuration.number_of_taps_for_outside_drawer_dismissal > 0,
            drag: configuration.is_drawer_draggable,
            drag_requires_nested_scroll_failure: nested_scroll.is_some()
                && configuration.is_drawer_draggable,
            nested_scroll,
            forwards_outside_touches: forwards,
        }
    }
}

/// Bookkeeping for an attached pull-to-dismiss coordinator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NestedScrollState {
    /// Over-scroll moved the drawer; releasing the scroll must settle it.
    pub transition_pending: bool,
}

/// The single source of truth for a drawer's dynamic state.
#[derive(Clone, Debug, PartialEq)]
pub struct StateMachine {
    pub(crate) current_y: f32,
    pub(crate) target_state: DrawerState,
    pub(crate) cosmetics: Cosmetics,
    pub(crate) drag: Option<DragSession>,
    pub(crate) nested_scroll: Option<NestedScrollState>,
    pub(crate) gestures: GestureAvailability,
}

impl StateMachine {
    pub(crate) fn new(
        current_y: f32,
        target_state: DrawerState,
        configuration: &DrawerConfiguration,
    ) -> Self {
        Self {
            current_y,
            target_state,
            cosmetics: Cosmetics::default(),
            drag: None,
            nested_scroll: None,
            gestures: GestureAvailability::evaluate(target_state, configuration, None),
        }
    }

    pub fn current_y(&self) -> f32 {
        self.current_y
    }

    pub fn target_state(&self) -> DrawerState {
        self.target_state
    }

    pub fn cosmetics(&self) -> Cosmetics {
        self.cosmetics
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn nested_scroll(&self) -> Option<&NestedScrollState> {
        self.nested_scroll.as_ref()
    }

    pub fn gestures(&self) -> GestureAvailability {
        self.gestures
    }

    pub(crate) fn set_target_state(
        &mut self,
        target_state: DrawerState,
        configuration: &DrawerConfiguration,
    ) {
        self.target_state = target_state;
        self.refresh_gestures(configuration);
    }

    pub(crate) fn set_nested_scroll(
        &mut self,
        nested_scroll: Option<NestedScrollState>,
        configuration: &DrawerConfiguration,
    ) {
        self.nested_scroll = nested_scroll;
        self.refresh_gestures(configuration);
    }

    pub(crate) fn refresh_gestures(&mut self, configuration: &DrawerConfiguration) {
        self.gestures = GestureAvailability::evaluate(
            self.target_state,
            configuration,
            self.nested_scroll.as_ref(),
        );
    }
}
