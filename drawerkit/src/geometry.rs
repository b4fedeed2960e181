//! Pure conversions between drawer position, drawer state and the partial height.
//!
//! Every function here is total: inputs are clamped rather than rejected, so a degenerate
//! configuration (e.g. a partial height equal to the container height) degrades into a
//! drawer without a distinct partial position instead of failing.

use crate::{DebugMarks, DrawerConfiguration, DrawerState};

/// Two positions closer than this are treated as the same position.
pub const POSITION_EPSILON: f32 = 0.01;

pub(crate) fn abs(v: f32) -> f32 {
    if v < 0.0 { -v } else { v }
}

/// Clamps `v` into `[lo, hi]`. If `hi < lo`, `lo` wins; NaN maps to `lo`.
pub(crate) fn clamped(v: f32, lo: f32, hi: f32) -> f32 {
    if v.is_nan() {
        return lo;
    }
    v.min(hi).max(lo)
}

fn state_for_position(
    position_y: f32,
    partial_y: f32,
    container_height: f32,
    drawer_full_y: f32,
    supports_partial_expansion: bool,
) -> DrawerState {
    if position_y >= container_height - POSITION_EPSILON {
        return DrawerState::Collapsed;
    }
    if position_y <= drawer_full_y + POSITION_EPSILON {
        return DrawerState::FullyExpanded;
    }
    if supports_partial_expansion && abs(position_y - partial_y) < POSITION_EPSILON {
        return DrawerState::PartiallyExpanded;
    }
    DrawerState::Transitioning
}

/// Maps a vertical position to the drawer state it represents.
pub fn drawer_state(
    position_y: f32,
    partial_height: f32,
    container_height: f32,
    configuration: &DrawerConfiguration,
) -> DrawerState {
    state_for_position(
        position_y,
        drawer_partial_y(partial_height, container_height),
        container_height,
        configuration.drawer_full_y(),
        configuration.supports_partial_expansion,
    )
}

/// Maps a resting state to its vertical position.
///
/// Returns `None` for [`DrawerState::Transitioning`], which has no fixed position.
pub fn drawer_position_y(
    state: DrawerState,
    partial_height: f32,
    container_height: f32,
    drawer_full_y: f32,
) -> Option<f32> {
    match state {
        DrawerState::Collapsed => Some(container_height),
        DrawerState::PartiallyExpanded => {
            Some(drawer_partial_y(partial_height, container_height))
        }
        DrawerState::FullyExpanded => Some(drawer_full_y),
        DrawerState::Transitioning => None,
    }
}

/// Clamps a requested partial height into `[0, container_height]`.
pub fn drawer_partial_height(raw_height: f32, container_height: f32) -> f32 {
    clamped(raw_height, 0.0, container_height.max(0.0))
}

pub fn drawer_partial_y(partial_height: f32, container_height: f32) -> f32 {
    container_height - partial_height
}

/// Releasing a drag at or above this position selects full expansion.
pub fn upper_mark_y(
    partial_height: f32,
    container_height: f32,
    configuration: &DrawerConfiguration,
) -> f32 {
    let partial_y = drawer_partial_y(partial_height, container_height);
    clamped(
        partial_y - configuration.upper_mark_gap,
        configuration.drawer_full_y(),
        container_height,
    )
}

/// Releasing a drag at or below this position selects collapse.
pub fn lower_mark_y(
    partial_height: f32,
    container_height: f32,
    configuration: &DrawerConfiguration,
) -> f32 {
    let partial_y = drawer_partial_y(partial_height, container_height);
    clamped(
        partial_y + configuration.lower_mark_gap,
        configuration.drawer_full_y(),
        container_height,
    )
}

/// Duration in seconds of a transition between two positions.
///
/// With proportional durations the configured duration is scaled by the fraction of the
/// container travelled, so zero distance takes zero time. Never negative or NaN.
pub fn actual_transition_duration(
    from_y: f32,
    to_y: f32,
    container_height: f32,
    configuration: &DrawerConfiguration,
) -> f32 {
    let total = configuration.total_duration_secs;
    let total = if total.is_finite() { total.max(0.0) } else { 0.0 };
    if !configuration.duration_is_proportional_to_distance_traveled {
        return total;
    }
    if !(container_height > 0.0) {
        return 0.0;
    }
    let fraction = clamped(abs(to_y - from_y) / container_height, 0.0, 1.0);
    total * fraction
}

/// A snapshot of everything needed to place the drawer for one container layout.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawerGeometry {
    pub container_height: f32,
    /// Clamped partial height (including any bottom safe-area inset).
    pub partial_height: f32,
    pub drawer_full_y: f32,
    pub supports_partial_expansion: bool,
    pub upper_mark_y: f32,
    pub lower_mark_y: f32,
}

impl DrawerGeometry {
    pub fn new(
        container_height: f32,
        raw_partial_height: f32,
        configuration: &DrawerConfiguration,
    ) -> Self {
        let container_height = if container_height.is_finite() {
            container_height.max(0.0)
        } else {
            0.0
        };
        let partial_height = drawer_partial_height(raw_partial_height, container_height);
        Self {
            container_height,
            partial_height,
            drawer_full_y: clamped(configuration.drawer_full_y(), 0.0, container_height),
            supports_partial_expansion: configuration.supports_partial_expansion,
            upper_mark_y: upper_mark_y(partial_height, container_height, configuration),
            lower_mark_y: lower_mark_y(partial_height, container_height, configuration),
        }
    }

    pub fn partial_y(&self) -> f32 {
        drawer_partial_y(self.partial_height, self.container_height)
    }

    /// True when partial expansion is enabled and its position differs from both extremes.
    pub fn has_distinct_partial(&self) -> bool {
        let partial_y = self.partial_y();
        self.supports_partial_expansion
            && partial_y > self.drawer_full_y + POSITION_EPSILON
            && partial_y < self.container_height - POSITION_EPSILON
    }

    pub fn state_for(&self, position_y: f32) -> DrawerState {
        state_for_position(
            position_y,
            self.partial_y(),
            self.container_height,
            self.drawer_full_y,
            self.supports_partial_expansion,
        )
    }

    pub fn position_for(&self, state: DrawerState) -> Option<f32> {
        drawer_position_y(
            state,
            self.partial_height,
            self.container_height,
            self.drawer_full_y,
        )
    }

    /// Clamps a position into the drawer's travel range.
    pub fn clamp_y(&self, position_y: f32) -> f32 {
        clamped(position_y, self.drawer_full_y, self.container_height)
    }

    /// The resting state whose position is closest to `position_y`.
    pub fn nearest_resting_state(&self, position_y: f32) -> DrawerState {
        let mut best = (
            DrawerState::FullyExpanded,
            abs(position_y - self.drawer_full_y),
        );
        if self.has_distinct_partial() {
            let d = abs(position_y - self.partial_y());
            if d < best.1 {
                best = (DrawerState::PartiallyExpanded, d);
            }
        }
        if abs(position_y - self.container_height) < best.1 {
            best.0 = DrawerState::Collapsed;
        }
        best.0
    }

    pub fn debug_marks(&self) -> DebugMarks {
        DebugMarks {
            upper_mark_y: self.upper_mark_y,
            lower_mark_y: self.lower_mark_y,
            partial_y: self.partial_y(),
        }
    }
}
