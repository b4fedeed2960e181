use thiserror::Error;

use crate::{DragSource, DrawerState, TransitionId};

pub type Result<T, E = DrawerError> = core::result::Result<T, E>;

/// Contract violations reported by [`crate::Drawer`].
///
/// None of these leave the drawer inconsistent: the offending call is rejected and the state
/// is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DrawerError {
    #[error("dragging is disabled for this drawer")]
    DragDisabled,
    #[error("a {active:?} drag is already in progress")]
    DragInProgress { active: DragSource },
    #[error("no drag session is active")]
    NoActiveDrag,
    #[error("{0:?} is not a resting state and cannot be animated to")]
    InvalidTarget(DrawerState),
    #[error("transition {0:?} is not in flight")]
    StaleTransition(TransitionId),
}
