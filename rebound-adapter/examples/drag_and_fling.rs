use rebound::{Point, ScrollOptions, Size, Viewport};
use rebound_adapter::{EventLog, MemorySurface, Simulator, Step};

fn main() {
    // Example: a 320x480 list with 40 rows of 60px, flung upwards and left to settle.
    //
    // An adapter would:
    // - forward pointer primitives to the scroller
    // - call tick() on requested frames and transition_end() when the platform reports it
    // - apply the transforms written through its Surface implementation
    let surface = MemorySurface::new(Size::new(320.0, 480.0), Size::new(320.0, 2400.0))
        .with_viewport(Viewport {
            width: 1024.0,
            height: 1024.0,
            scroll: Point::ZERO,
        });
    let mut sim = Simulator::new(surface, ScrollOptions::new());
    let log = EventLog::attach(sim.scroller());

    sim.play(&[
        Step::Down { x: 160.0, y: 700.0 },
        Step::Wait(16),
        Step::Move { x: 160.0, y: 660.0 },
        Step::Wait(16),
        Step::Move { x: 160.0, y: 600.0 },
        Step::Wait(16),
        Step::Move { x: 160.0, y: 520.0 },
        Step::Up,
    ]);
    println!(
        "released at y={} phase={:?}",
        sim.position().y,
        sim.scroller().phase()
    );

    while sim.scroller().is_animating() {
        sim.advance(80);
        println!(
            "t={} rendered_y={:.1}",
            sim.now_ms(),
            rebound::Surface::computed_transform(sim.surface()).y
        );
    }

    sim.run_until_idle(5_000);
    println!("settled at y={} events={:?}", sim.position().y, log.names());

    // Back to the top, then pull past the edge and let it rebound.
    sim.scroller_mut()
        .scroll_to(0.0, 0.0, 0, None, &rebound::ExtraTransform::default(), false);
    sim.down(160.0, 300.0);
    for i in 1..=10 {
        sim.advance(30);
        sim.move_to(160.0, 300.0 + f64::from(i) * 50.0);
    }
    println!("overscrolled to y={:.1}", sim.position().y);
    sim.up();
    sim.run_until_idle(5_000);
    println!("rebounded to y={}", sim.position().y);
}
