use drawerkit::{
    AnimatingPosition, ContainerLayout, DragSource, Drawer, DrawerAnimationActions,
    DrawerConfiguration, DrawerOptions, normalized_velocity,
};

fn main() {
    // Example: a host running the drawer's transitions with its own (here: fixed-step) animator.
    //
    // A host would:
    // - report the container layout
    // - feed gesture events into drag_* / handle_tap
    // - run every returned AnimationRequest, calling apply_animation_progress per frame and
    //   complete_transition once it ends
    let options = DrawerOptions::new(DrawerConfiguration::default().with_dims_background(true))
        .with_partial_height(320.0)
        .with_presented_actions(
            DrawerAnimationActions::default()
                .with_prepare(|info| {
                    println!("prepare {:?} -> {:?}", info.start_state, info.target_state)
                })
                .with_cleanup(|position, info| {
                    println!("cleanup {:?} at {position:?}", info.target_state)
                }),
        )
        .with_on_dismiss(Some(|| println!("dismissed")));

    let mut drawer = Drawer::new(options, ContainerLayout::new(390.0, 844.0));
    println!("marks={:?}", drawer.debug_marks());

    let request = drawer.present();
    run(&mut drawer, request);

    // Drag up by 200pt and release with a fast upward flick.
    drawer.drag_began(DragSource::Pan).expect("drag");
    drawer.drag_changed(-200.0, 0.0).expect("drag");
    let velocity = normalized_velocity(-3000.0, drawer.layout().height);
    let request = drawer.drag_ended(velocity).expect("release");
    run(&mut drawer, request);

    let request = drawer.collapse();
    run(&mut drawer, request);
}

fn run(drawer: &mut Drawer, request: drawerkit::AnimationRequest) {
    let steps = 4;
    for step in 1..=steps {
        let frame = drawer
            .apply_animation_progress(request.id, step as f32 / steps as f32)
            .expect("in flight");
        println!(
            "  y={:.1} radius={:.1} dimming={:.2}",
            frame.y, frame.cosmetics.corner_radius, frame.cosmetics.dimming_alpha
        );
    }
    let state = drawer
        .complete_transition(request.id, AnimatingPosition::End)
        .expect("in flight");
    println!("settled at {state:?} (y={})", drawer.current_y());
}
