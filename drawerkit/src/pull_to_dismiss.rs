//! Pull-to-dismiss: turning a nested scrollable's over-scroll into a drawer drag.

use crate::geometry::POSITION_EPSILON;
use crate::policy::normalized_velocity;
use crate::{AnimationRequest, DragSource, Drawer, TransitionId};

/// Scroll position reported by a nested scrollable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub content_offset_y: f32,
    pub content_inset_top: f32,
    /// The user's finger is down on the scrollable.
    pub is_tracking: bool,
}

impl ScrollMetrics {
    /// Distance scrolled from the top boundary; negative when pulled past it.
    pub fn top_offset(&self) -> f32 {
        self.content_offset_y + self.content_inset_top
    }

    fn pinned_offset_y(&self) -> f32 {
        -self.content_inset_top
    }
}

/// What the host must do to the scrollable after a scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollAdjustment {
    /// Leave the scrollable alone.
    Passthrough,
    /// Reset the scrollable's content offset; the drawer consumed the movement.
    ///
    /// `interrupted` is set when the pull cut an in-flight transition short; the host must stop
    /// animating it.
    Pin {
        content_offset_y: f32,
        interrupted: Option<TransitionId>,
    },
}

/// The host's own scroll delegate. Every event is forwarded to it unchanged.
pub trait ScrollDelegate {
    fn will_begin_dragging(&mut self, _metrics: &ScrollMetrics) {}

    fn did_scroll(&mut self, _metrics: &ScrollMetrics) {}

    fn will_end_dragging(
        &mut self,
        _metrics: &ScrollMetrics,
        _velocity_y: f32,
        _target_content_offset_y: &mut f32,
    ) {
    }
}

impl ScrollDelegate for () {}

/// Sits between a nested scrollable and its delegate.
///
/// While the content is scrolled away from its top, events pass straight through. Pulling past
/// the top opens a [`DragSource::NestedScroll`] drag session on the drawer and feeds it the
/// excess; releasing the scroll ends the drag with the scroll's release velocity.
#[derive(Debug)]
pub struct PullToDismiss<D = ()> {
    delegate: D,
}

impl<D: ScrollDelegate> PullToDismiss<D> {
    /// Wraps `delegate` and tells `drawer` a nested scrollable is attached.
    pub fn attach(delegate: D, drawer: &mut Drawer) -> Self {
        ddebug!("PullToDismiss::attach");
        drawer.attach_nested_scroll();
        Self { delegate }
    }

    /// Hands the original delegate back.
    ///
    /// A pull in progress is cancelled; the returned request (if any) settles the drawer.
    pub fn detach(self, drawer: &mut Drawer) -> (D, Option<AnimationRequest>) {
        let settle = if owns_drag(drawer) {
            drawer.set_pull_to_dismiss_pending(false);
            drawer.drag_cancelled().ok()
        } else {
            None
        };
        drawer.detach_nested_scroll();
        ddebug!(cancelled = settle.is_some(), "PullToDismiss::detach");
        (self.delegate, settle)
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn will_begin_dragging(&mut self, metrics: &ScrollMetrics) {
        self.delegate.will_begin_dragging(metrics);
    }

    pub fn did_scroll(&mut self, drawer: &mut Drawer, metrics: &ScrollMetrics) -> ScrollAdjustment {
        self.delegate.did_scroll(metrics);
        let top_offset = metrics.top_offset();

        if owns_drag(drawer) {
            let displaced = drawer
                .drag_session()
                .is_some_and(|s| drawer.current_y() > s.starting_y + POSITION_EPSILON);
            // Scrolling back up with the drawer at rest hands control back to the content.
            if top_offset > 0.0 && !displaced {
                drawer.abandon_drag();
                drawer.set_pull_to_dismiss_pending(false);
                dtrace!(top_offset, "PullToDismiss: handed back to content");
                return ScrollAdjustment::Passthrough;
            }
            if drawer.drag_changed(-top_offset, 0.0).is_err() {
                return ScrollAdjustment::Passthrough;
            }
            return ScrollAdjustment::Pin {
                content_offset_y: metrics.pinned_offset_y(),
                interrupted: None,
            };
        }

        if !metrics.is_tracking || top_offset >= 0.0 || drawer.gestures().nested_scroll != Some(true)
        {
            return ScrollAdjustment::Passthrough;
        }
        let Ok(interrupted) = drawer.drag_began(DragSource::NestedScroll) else {
            return ScrollAdjustment::Passthrough;
        };
        dtrace!(top_offset, "PullToDismiss: pulled past top");
        drawer.set_pull_to_dismiss_pending(true);
        if drawer.drag_changed(-top_offset, 0.0).is_err() {
            return ScrollAdjustment::Passthrough;
        }
        ScrollAdjustment::Pin {
            content_offset_y: metrics.pinned_offset_y(),
            interrupted,
        }
    }

    /// Finishes a pull. `velocity_y` is the scroll velocity in points per second, in content
    /// coordinates (negative while pulling down).
    ///
    /// When a pull was in progress, the scroll's target offset is pinned to the top and the
    /// drawer's settling transition is returned.
    pub fn will_end_dragging(
        &mut self,
        drawer: &mut Drawer,
        metrics: &ScrollMetrics,
        velocity_y: f32,
        target_content_offset_y: &mut f32,
    ) -> Option<AnimationRequest> {
        self.delegate
            .will_end_dragging(metrics, velocity_y, target_content_offset_y);
        if !owns_drag(drawer) {
            return None;
        }

        *target_content_offset_y = metrics.pinned_offset_y();
        drawer.set_pull_to_dismiss_pending(false);
        let velocity = normalized_velocity(-velocity_y, drawer.layout().height);
        dtrace!(velocity, "PullToDismiss::will_end_dragging");
        drawer.drag_ended(velocity).ok()
    }
}

fn owns_drag(drawer: &Drawer) -> bool {
    drawer
        .drag_session()
        .is_some_and(|s| s.source == DragSource::NestedScroll)
}
