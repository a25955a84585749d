use rebound::{
    Capabilities, ElementId, ElementOffset, Easing, ExtraTransform, Probe, Rect, ScrollOptions,
    Size,
};
use rebound_adapter::{EventLog, MemorySurface, Simulator};

fn main() {
    // Example: scroll_to / scroll_to_element on both backends, with continuous probing so
    // every frame reports a position.
    for transition in [true, false] {
        let mut surface = MemorySurface::new(Size::new(320.0, 480.0), Size::new(320.0, 6000.0))
            .with_capabilities(Capabilities {
                touch: true,
                transition,
            });
        for i in 0..100u64 {
            surface.set_element(ElementId(i), Rect::new(0.0, i as f64 * 60.0, 320.0, 60.0));
        }

        let mut sim = Simulator::new(surface, ScrollOptions::new().with_probe(Probe::Continuous));
        let log = EventLog::attach_events(sim.scroller(), &["scroll", "scrollEnd"]);
        println!("backend={:?}", sim.scroller().animator().backend());

        sim.scroller_mut().scroll_to(
            0.0,
            -1200.0,
            400,
            Some(Easing::CubicBezier(0.25, 0.1, 0.25, 1.0)),
            &ExtraTransform::default(),
            false,
        );
        sim.run_until_idle(2_000);
        println!(
            "  scroll_to: {} scroll events, ended at {:?}",
            log.count("scroll"),
            log.last("scrollEnd").and_then(|e| e.position)
        );

        log.clear();
        let ok = sim.scroller_mut().scroll_to_element(
            ElementId(42),
            300,
            ElementOffset::Px(0.0),
            ElementOffset::Center,
            None,
        );
        sim.run_until_idle(2_000);
        println!(
            "  scroll_to_element(42, center): ok={ok} at {:?}",
            sim.position()
        );
    }
}
