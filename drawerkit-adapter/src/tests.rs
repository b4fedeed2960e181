use crate::*;

use drawerkit::{
    AnimationRequest, ContainerLayout, DrawerConfiguration, DrawerOptions, DrawerState,
    TimingCurve, TransitionId,
};

fn controller() -> Controller {
    Controller::new(
        DrawerOptions::new(DrawerConfiguration::default()).with_partial_height(300.0),
        ContainerLayout::new(400.0, 800.0),
    )
}

fn run_until_idle(c: &mut Controller, mut now_ms: u64) -> u64 {
    while c.is_animating() {
        now_ms += 16;
        c.tick(now_ms);
        assert!(now_ms < 10_000, "animation never finished");
    }
    now_ms
}

#[test]
fn tween_with_zero_duration_is_done_immediately() {
    let t = Tween::new(10.0, 20.0, 100, 0, Easing::SmoothStep);
    assert!(t.is_done(100));
    assert_eq!(t.progress(100), 1.0);
    assert_eq!(t.sample(100), 20.0);
}

#[test]
fn tween_samples_between_endpoints() {
    let t = Tween::new(0.0, 100.0, 0, 100, Easing::Linear);
    assert_eq!(t.sample(0), 0.0);
    assert_eq!(t.sample(50), 50.0);
    assert_eq!(t.sample(500), 100.0);

    let mut t = t;
    t.retarget(50, 0.0, 10);
    assert_eq!(t.from, 50.0);
    assert_eq!(t.sample(60), 0.0);
}

#[test]
fn easings_hit_their_endpoints() {
    for easing in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::EaseInOutCubic,
        Easing::EaseOutCubic,
    ] {
        assert_eq!(easing.sample(0.0), 0.0, "{easing:?}");
        assert_eq!(easing.sample(1.0), 1.0, "{easing:?}");
    }
    assert!(Easing::EaseOutCubic.sample(0.5) > 0.5);
    assert_eq!(Easing::from(TimingCurve::Spring), Easing::EaseOutCubic);
    assert_eq!(Easing::from(TimingCurve::Linear), Easing::Linear);
}

#[test]
fn seconds_round_to_milliseconds() {
    assert_eq!(secs_to_ms(0.4), 400);
    assert_eq!(secs_to_ms(0.0), 0);
    assert_eq!(secs_to_ms(-1.0), 0);
    assert_eq!(secs_to_ms(f32::NAN), 0);
}

#[test]
fn controller_presents_to_partial() {
    let mut c = controller();
    let r = c.present(0);
    assert_eq!(r.target_state(), DrawerState::PartiallyExpanded);
    assert!(c.is_animating());

    let mut last = 800.0;
    for now_ms in [0u64, 50, 100, 200, 300, 399] {
        let y = c.tick(now_ms).unwrap();
        assert!(y <= last, "t={now_ms}: {y} > {last}");
        last = y;
    }
    assert_eq!(c.tick(400), Some(500.0));
    assert!(!c.is_animating());
    assert_eq!(c.drawer().current_state(), DrawerState::PartiallyExpanded);
    assert_eq!(c.tick(500), None);
}

#[test]
fn controller_drag_flick_expands_fully() {
    let mut c = controller();
    c.present(0);
    let now = run_until_idle(&mut c, 0);

    c.on_drag_began().unwrap();
    assert_eq!(c.on_drag_changed(-50.0, -4000.0), Ok(450.0));
    let r = c.on_drag_ended(-4000.0, now).unwrap();
    assert_eq!(r.target_state(), DrawerState::FullyExpanded);
    assert!(c.is_animating());

    run_until_idle(&mut c, now);
    assert_eq!(c.drawer().current_state(), DrawerState::FullyExpanded);
    assert_eq!(c.drawer().current_y(), 0.0);
    assert_eq!(c.drawer().cosmetics().corner_radius, 0.0);
}

#[test]
fn drag_began_stops_running_transition() {
    let mut c = controller();
    c.present(0);
    c.tick(200);
    c.on_drag_began().unwrap();
    assert!(!c.animator().is_animating());
    assert!(!c.drawer().is_animating());
    assert_eq!(c.tick(300), None);
}

#[test]
fn interrupt_leaves_drawer_where_it_is() {
    let mut c = controller();
    c.present(0);
    let y = c.tick(200).unwrap();
    assert!(c.interrupt().is_some());
    assert!(!c.is_animating());
    assert_eq!(c.drawer().current_y(), y);
    assert_eq!(c.drawer().target_state(), DrawerState::Transitioning);
}

#[test]
fn reverse_snaps_back_to_start() {
    let mut c = controller();
    c.present(0);
    let now = run_until_idle(&mut c, 0);
    c.expand(now);
    c.tick(now + 100);
    assert_eq!(c.reverse(), Some(DrawerState::PartiallyExpanded));
    assert_eq!(c.drawer().current_y(), 500.0);
    assert_eq!(c.reverse(), None);
}

#[test]
fn stale_animation_is_dropped() {
    let mut c = controller();
    c.present(0);
    // Bypassing the controller leaves its animator on an interrupted transition.
    let request = c.drawer_mut().collapse();
    assert_eq!(c.tick(100), None);
    assert!(!c.animator().is_animating());

    c.run(request, 100);
    run_until_idle(&mut c, 100);
    assert_eq!(c.drawer().current_state(), DrawerState::Collapsed);
}

#[test]
fn new_transition_stops_the_corner_radius_animation() {
    let configuration = DrawerConfiguration::default().with_duration_proportional_to_distance(true);
    let mut c = Controller::new(
        DrawerOptions::new(configuration).with_partial_height(300.0),
        ContainerLayout::new(400.0, 800.0),
    );
    c.present(0);
    c.tick(16);
    c.collapse(16);
    run_until_idle(&mut c, 16);
    assert_eq!(c.drawer().current_state(), DrawerState::Collapsed);
    assert_eq!(c.drawer().current_y(), 800.0);
    assert_eq!(c.drawer().cosmetics().corner_radius, 0.0);
    assert!(!c.drawer().is_presented());
}

#[test]
fn taps_run_through_the_controller() {
    let mut c = controller();
    c.present(0);
    let now = run_until_idle(&mut c, 0);
    let r = c
        .on_tap(drawerkit::TapEvent { y: 100.0, tap_count: 1 }, now)
        .unwrap();
    assert_eq!(r.target_state(), DrawerState::Collapsed);
    run_until_idle(&mut c, now);
    assert!(!c.drawer().is_presented());
}

#[derive(Debug, Default)]
struct InstantAnimator {
    running: Option<TransitionId>,
}

impl Animator for InstantAnimator {
    fn start(&mut self, request: &AnimationRequest, _now_ms: u64) {
        self.running = Some(request.id);
    }

    fn sample(&self, _now_ms: u64) -> Option<AnimatorSample> {
        Some(AnimatorSample {
            id: self.running?,
            progress: 1.0,
            done: true,
        })
    }

    fn stop(&mut self) -> Option<TransitionId> {
        self.running.take()
    }

    fn is_animating(&self) -> bool {
        self.running.is_some()
    }
}

#[test]
fn custom_animator_drives_the_controller() {
    let drawer = drawerkit::Drawer::new(
        DrawerOptions::new(DrawerConfiguration::default()).with_partial_height(300.0),
        ContainerLayout::new(400.0, 800.0),
    );
    let mut c = Controller::with_animator(drawer, InstantAnimator::default());
    c.animate_to(DrawerState::FullyExpanded, 0).unwrap();
    assert_eq!(c.tick(0), Some(0.0));
    assert!(!c.is_animating());
    assert_eq!(c.drawer().current_state(), DrawerState::FullyExpanded);
}
