//! A headless engine for bottom drawers (sheets) with collapsed, partially expanded and fully
//! expanded resting states.
//!
//! For a tick-driven controller that runs the transitions itself, see the `drawerkit-adapter`
//! crate.
//!
//! This crate owns the parts of a drawer with real invariants: the mapping between vertical
//! position and drawer state, the release decision for drags and flicks, proportional
//! transition durations, pull-to-dismiss arbitration with a nested scrollable, and the ordering
//! of transition hooks.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - container size (and bottom safe-area inset)
//! - the presented content's partial height
//! - gesture events (drags, taps, nested scroll callbacks)
//! - an animation primitive that runs [`AnimationRequest`]s and reports how they ended
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod drawer;
mod error;
mod geometry;
mod options;
mod policy;
mod pull_to_dismiss;
mod state;
mod transition;
mod types;


pub use drawer::{AlongsideFn, CompletionFn, Drawer};
pub use error::{DrawerError, Result};
pub use geometry::{
    DrawerGeometry, POSITION_EPSILON, actual_transition_duration, drawer_partial_height,
    drawer_partial_y, drawer_position_y, drawer_state, lower_mark_y, upper_mark_y,
};
pub use options::{
    AnimateAlongAction, CleanupAction, CornerAnimationOption, DrawerAnimationActions,
    DrawerConfiguration, DrawerOptions, DrawerPresentable, FullExpansionBehaviour,
    HandleConfiguration, OnChangeCallback, OnDismissCallback, STATUS_BAR_HEIGHT, TransitionAction,
};
pub use policy::{
    DragSession, VerticalDirection, flick_direction, next_resting_state, normalized_velocity,
    release_target,
};
pub use pull_to_dismiss::{PullToDismiss, ScrollAdjustment, ScrollDelegate, ScrollMetrics};
pub use state::{GestureAvailability, NestedScrollState, StateMachine};
pub use transition::{
    AnimationFrame, AnimationPlan, AnimationRequest, CornerRadiusAnimation, TransitionGeometry,
    TransitionInfo, corner_radius_at, dimming_alpha_at, handle_alpha_at,
};
pub use types::{
    AnimatingPosition, ContainerLayout, Cosmetics, DebugMarks, DragSource, DrawerState, Frame,
    TapEvent, TimingCurve, TransitionId,
};
