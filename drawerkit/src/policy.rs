//! Drag sessions and the release decision.

use crate::geometry::{DrawerGeometry, POSITION_EPSILON, abs};
use crate::{DragSource, DrawerConfiguration, DrawerState};

/// The live record of one drag, from began to ended/cancelled.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragSession {
    pub source: DragSource,
    /// The drawer's state when the drag began.
    pub starting_state: DrawerState,
    pub starting_y: f32,
    /// Incremental translation of the latest `drag_changed`.
    pub last_translation_y: f32,
    /// Sum of all translations applied so far (before clamping).
    pub total_translation_y: f32,
    /// Normalized velocity of the latest event.
    pub last_velocity_y: f32,
}

impl DragSession {
    pub fn new(source: DragSource, starting_state: DrawerState, starting_y: f32) -> Self {
        Self {
            source,
            starting_state,
            starting_y,
            last_translation_y: 0.0,
            total_translation_y: 0.0,
            last_velocity_y: 0.0,
        }
    }

    pub(crate) fn record(&mut self, translation_y: f32, velocity_y: f32) {
        self.last_translation_y = translation_y;
        self.total_translation_y += translation_y;
        self.last_velocity_y = velocity_y;
    }
}

/// Vertical direction in container coordinates (`y` grows downwards).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalDirection {
    Up,
    Down,
}

impl VerticalDirection {
    /// Direction of a velocity; `None` when it is zero or NaN.
    pub fn of(velocity_y: f32) -> Option<Self> {
        if velocity_y > 0.0 {
            Some(Self::Down)
        } else if velocity_y < 0.0 {
            Some(Self::Up)
        } else {
            None
        }
    }
}

/// Converts a raw velocity in points per second into container heights per second, the unit
/// of [`DrawerConfiguration::flick_speed_threshold`].
pub fn normalized_velocity(points_per_second: f32, container_height: f32) -> f32 {
    if !(container_height > 0.0) || !points_per_second.is_finite() {
        return 0.0;
    }
    points_per_second / container_height
}

/// Returns the flick direction if `velocity_y` is fast enough to override position.
pub fn flick_direction(
    velocity_y: f32,
    configuration: &DrawerConfiguration,
) -> Option<VerticalDirection> {
    let direction = VerticalDirection::of(velocity_y)?;
    (abs(velocity_y) >= configuration.flick_speed_threshold).then_some(direction)
}

/// The next resting state from `from` in `direction`.
///
/// A `Transitioning` origin uses the nearest resting position beyond `position_y`.
pub fn next_resting_state(
    from: DrawerState,
    direction: VerticalDirection,
    position_y: f32,
    geometry: &DrawerGeometry,
) -> DrawerState {
    use DrawerState::*;
    use VerticalDirection::*;

    let partial = geometry.has_distinct_partial();
    match (from, direction) {
        (FullyExpanded, Down) | (Collapsed, Up) if partial => PartiallyExpanded,
        (FullyExpanded, Down) | (PartiallyExpanded, Down) | (Collapsed, Down) => Collapsed,
        (Collapsed, Up) | (PartiallyExpanded, Up) | (FullyExpanded, Up) => FullyExpanded,
        (Transitioning, Up) => {
            if partial && position_y > geometry.partial_y() + POSITION_EPSILON {
                PartiallyExpanded
            } else {
                FullyExpanded
            }
        }
        (Transitioning, Down) => {
            if partial && position_y < geometry.partial_y() - POSITION_EPSILON {
                PartiallyExpanded
            } else {
                Collapsed
            }
        }
    }
}

/// Decides where a released drag should settle.
///
/// In priority order:
/// 1. A flick picks the next resting state in its direction, whatever the position.
/// 2. Otherwise the marks decide: at or above the upper mark expands fully, at or below the
///    lower mark collapses, and in between settles at the partial position (or snaps back to
///    `starting_state` when there is no partial position).
/// 3. Without staged dismissal, a drag that started fully expanded never stops at partial.
pub fn release_target(
    starting_state: DrawerState,
    position_y: f32,
    velocity_y: f32,
    geometry: &DrawerGeometry,
    configuration: &DrawerConfiguration,
) -> DrawerState {
    let target = match flick_direction(velocity_y, configuration) {
        Some(direction) => next_resting_state(starting_state, direction, position_y, geometry),
        None => target_from_marks(starting_state, position_y, geometry),
    };

    if !configuration.dismisses_in_stages
        && starting_state == DrawerState::FullyExpanded
        && target == DrawerState::PartiallyExpanded
    {
        return DrawerState::Collapsed;
    }
    target
}

fn target_from_marks(
    starting_state: DrawerState,
    position_y: f32,
    geometry: &DrawerGeometry,
) -> DrawerState {
    if position_y <= geometry.upper_mark_y {
        return DrawerState::FullyExpanded;
    }
    if position_y >= geometry.lower_mark_y {
        return DrawerState::Collapsed;
    }
    if geometry.has_distinct_partial() {
        return DrawerState::PartiallyExpanded;
    }
    match starting_state {
        DrawerState::Collapsed | DrawerState::FullyExpanded => starting_state,
        DrawerState::PartiallyExpanded | DrawerState::Transitioning => {
            geometry.nearest_resting_state(position_y)
        }
    }
}
