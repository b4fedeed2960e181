/// The resting (or in-between) state of a drawer.
///
/// `Transitioning` is not a place the drawer can be sent to; it only describes a position that
/// does not coincide with any resting value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawerState {
    Collapsed,
    PartiallyExpanded,
    FullyExpanded,
    Transitioning,
}

impl DrawerState {
    pub fn is_resting(self) -> bool {
        !matches!(self, Self::Transitioning)
    }
}

/// Where an animation ended up when its completion was reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimatingPosition {
    /// The animation was reversed and settled on its starting values.
    Start,
    /// The animation ran to completion.
    End,
    /// The animation was cut short somewhere in between.
    Current,
}

impl AnimatingPosition {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::End)
    }
}

/// The input source that owns a drag session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragSource {
    /// The drawer's own pan gesture.
    Pan,
    /// Over-scroll forwarded from a nested scrollable (pull-to-dismiss).
    NestedScroll,
}

/// Container geometry reported by the host on layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerLayout {
    pub width: f32,
    pub height: f32,
    /// Bottom safe-area inset. Added to the content's partial height.
    pub safe_area_bottom: f32,
}

impl ContainerLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            safe_area_bottom: 0.0,
        }
    }

    pub fn with_safe_area_bottom(mut self, inset: f32) -> Self {
        self.safe_area_bottom = inset;
        self
    }
}

/// The drawer's frame inside the container. The drawer always spans the container width.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A tap delivered by the host's tap recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TapEvent {
    /// Vertical location of the tap in container coordinates.
    pub y: f32,
    pub tap_count: u32,
}

/// Identifies one `animate_transition` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionId(pub u64);

/// Timing curve hint handed to the animation primitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimingCurve {
    Linear,
    EaseInOut,
    /// Fast start with a soft landing, the closest curve to a critically damped spring.
    #[default]
    Spring,
}

/// Live cosmetic values that follow the drawer's position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cosmetics {
    pub corner_radius: f32,
    pub handle_alpha: f32,
    pub dimming_alpha: f32,
}

/// Threshold positions a host may draw while debugging drag behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugMarks {
    pub upper_mark_y: f32,
    pub lower_mark_y: f32,
    pub partial_y: f32,
}
