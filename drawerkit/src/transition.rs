use crate::geometry::{DrawerGeometry, POSITION_EPSILON, clamped};
use crate::options::STATUS_BAR_HEIGHT;
use crate::{
    ContainerLayout, CornerAnimationOption, Cosmetics, DrawerConfiguration, DrawerState, Frame,
    TimingCurve, TransitionId,
};

/// Container and frame snapshot for one transition.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionGeometry {
    pub container: ContainerLayout,
    pub drawer: DrawerGeometry,
    pub starting_frame: Frame,
    pub ending_frame: Frame,
}

/// Everything a host hook needs to know about a transition. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionInfo {
    pub id: TransitionId,
    pub start_state: DrawerState,
    pub target_state: DrawerState,
    pub duration_secs: f32,
    pub timing_curve: TimingCurve,
    pub geometry: TransitionGeometry,
    /// True when the drawer moves up (towards full expansion).
    pub is_expanding: bool,
}

/// Values applied to the drawer at one instant of a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationFrame {
    pub y: f32,
    pub cosmetics: Cosmetics,
}

/// Start and end values of a transition, interpolated by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationPlan {
    pub duration_secs: f32,
    pub start: AnimationFrame,
    pub end: AnimationFrame,
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

impl AnimationPlan {
    /// Interpolates the plan at `progress`, which is clamped to `[0, 1]`.
    pub fn sample(&self, progress: f32) -> AnimationFrame {
        let t = clamped(progress, 0.0, 1.0);
        let (a, b) = (&self.start.cosmetics, &self.end.cosmetics);
        AnimationFrame {
            y: lerp(self.start.y, self.end.y, t),
            cosmetics: Cosmetics {
                corner_radius: lerp(a.corner_radius, b.corner_radius, t),
                handle_alpha: lerp(a.handle_alpha, b.handle_alpha, t),
                dimming_alpha: lerp(a.dimming_alpha, b.dimming_alpha, t),
            },
        }
    }
}

/// What the host's animation primitive is asked to run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationRequest {
    pub id: TransitionId,
    /// A transition that was cut short to make room for this one; the host should stop
    /// driving it.
    pub interrupted: Option<TransitionId>,
    pub plan: AnimationPlan,
    pub info: TransitionInfo,
}

impl AnimationRequest {
    pub fn duration_secs(&self) -> f32 {
        self.plan.duration_secs
    }

    pub fn target_state(&self) -> DrawerState {
        self.info.target_state
    }
}

/// An independent corner radius animation, see
/// [`crate::Drawer::add_corner_radius_animation_ending`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CornerRadiusAnimation {
    pub id: TransitionId,
    pub from: f32,
    pub to: f32,
    pub duration_secs: f32,
    pub timing_curve: TimingCurve,
    pub(crate) zero_on_end: bool,
    pub(crate) zero_on_start: bool,
}

pub(crate) fn is_extreme(state: DrawerState) -> bool {
    matches!(state, DrawerState::Collapsed | DrawerState::FullyExpanded)
}

/// Fraction in `[0, 1]` that peaks at the partial position and is zero at both extremes
/// (or fades linearly from full to collapsed without a partial position).
fn triangular_value(position_y: f32, geometry: &DrawerGeometry) -> f32 {
    let full_y = geometry.drawer_full_y;
    let height = geometry.container_height;
    if height - full_y <= POSITION_EPSILON {
        return 0.0;
    }

    let fraction = if geometry.has_distinct_partial() {
        let partial_y = geometry.partial_y();
        if position_y < partial_y {
            (position_y - full_y) / (partial_y - full_y)
        } else {
            1.0 - (position_y - partial_y) / (height - partial_y)
        }
    } else {
        1.0 - (position_y - full_y) / (height - full_y)
    };
    clamped(fraction, 0.0, 1.0)
}

pub fn corner_radius_at(
    position_y: f32,
    geometry: &DrawerGeometry,
    configuration: &DrawerConfiguration,
) -> f32 {
    let maximum = configuration.maximum_corner_radius.max(0.0);
    match configuration.corner_animation_option {
        CornerAnimationOption::MaximumAtPartialY => maximum * triangular_value(position_y, geometry),
        CornerAnimationOption::AlwaysShowBelowStatusBar => {
            maximum * clamped(position_y, 0.0, STATUS_BAR_HEIGHT) / STATUS_BAR_HEIGHT
        }
        CornerAnimationOption::Always => maximum,
    }
}

pub fn handle_alpha_at(position_y: f32, geometry: &DrawerGeometry) -> f32 {
    triangular_value(position_y, geometry)
}

/// Dimming overlay opacity: opaque at full expansion, clear at the partial position and below.
pub fn dimming_alpha_at(
    position_y: f32,
    geometry: &DrawerGeometry,
    configuration: &DrawerConfiguration,
) -> f32 {
    if !configuration.dims_background {
        return 0.0;
    }
    let full_y = geometry.drawer_full_y;
    let height = geometry.container_height;
    if height - full_y <= POSITION_EPSILON {
        return 0.0;
    }

    let fraction = if geometry.has_distinct_partial() {
        let partial_y = geometry.partial_y();
        if position_y < partial_y {
            1.0 - (position_y - full_y) / (partial_y - full_y)
        } else {
            0.0
        }
    } else {
        1.0 - (position_y - full_y) / (height - full_y)
    };
    clamped(fraction, 0.0, 1.0)
}

/// Cosmetic values at `position_y`. Values the configuration does not animate keep `live`.
pub(crate) fn cosmetics_at(
    position_y: f32,
    live: Cosmetics,
    geometry: &DrawerGeometry,
    configuration: &DrawerConfiguration,
) -> Cosmetics {
    Cosmetics {
        corner_radius: if configuration.maximum_corner_radius > 0.0 {
            corner_radius_at(position_y, geometry, configuration)
        } else {
            live.corner_radius
        },
        handle_alpha: if configuration.handle_auto_animates() {
            handle_alpha_at(position_y, geometry)
        } else {
            live.handle_alpha
        },
        dimming_alpha: dimming_alpha_at(position_y, geometry, configuration),
    }
}
