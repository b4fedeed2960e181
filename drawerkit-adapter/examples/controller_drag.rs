use drawerkit::{ContainerLayout, DrawerConfiguration, DrawerOptions};
use drawerkit_adapter::Controller;

fn main() {
    // Example: a controller running the drawer's transitions from a frame loop.
    //
    // An adapter would:
    // - forward gesture events (on_drag_*, on_tap)
    // - call tick(now_ms) in a frame loop / timer while is_animating()
    // - place the drawer at drawer().current_y() with drawer().cosmetics()
    let mut c = Controller::new(
        DrawerOptions::new(DrawerConfiguration::default()).with_partial_height(320.0),
        ContainerLayout::new(390.0, 844.0),
    );

    let mut now_ms = 0u64;
    let request = c.present(now_ms);
    println!("presenting to {:?}", request.target_state());
    now_ms = animate(&mut c, now_ms);

    c.on_drag_began().expect("drag");
    for _ in 0..10 {
        now_ms += 16;
        c.on_drag_changed(-15.0, -900.0).expect("drag");
    }
    let request = c.on_drag_ended(-900.0, now_ms).expect("release");
    println!("released towards {:?}", request.target_state());
    animate(&mut c, now_ms);

    println!(
        "done: state={:?} y={} radius={}",
        c.drawer().current_state(),
        c.drawer().current_y(),
        c.drawer().cosmetics().corner_radius
    );
}

fn animate(c: &mut Controller, mut now_ms: u64) -> u64 {
    while c.is_animating() {
        now_ms += 16;
        if let Some(y) = c.tick(now_ms) {
            if now_ms % 80 == 0 {
                println!("t={now_ms} y={y:.1} state={:?}", c.drawer().current_state());
            }
        }
    }
    now_ms
}
