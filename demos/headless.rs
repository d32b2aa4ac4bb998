use unitap::prelude::*;

/// Example of driving a tap without any browser: the headless backend
/// book-keeps listeners and pointer lock while events are fed in by hand
fn main() -> unitap::Result<()> {
    env_logger::init();

    println!("👆 unitap headless example");
    println!("==========================");

    let mut tap = Tap::new(HeadlessBackend::everything(), TapConfig::default());
    tap.activate()?;
    println!("✅ Tap active, families: {:?}", tap.active_families());

    for phase in TapPhase::ALL {
        tap.on(phase, move |e| {
            println!(
                "   {:?} at ({:.0}, {:.0}) dragging={:?}",
                e.phase, e.position.x, e.position.y, e.dragging
            );
        })?;
    }

    // One physical press surfacing through two families: the touch down is
    // suppressed because pointer registered first.
    println!("\n🎯 Simulated interaction:");
    tap.ingest(
        InputFamily::Pointer,
        TapPhase::Down,
        RawSample::from_client(120.0, 80.0),
    )?;
    tap.ingest(
        InputFamily::Touch,
        TapPhase::Down,
        RawSample::from_page(120.0, 80.0),
    )?;
    tap.ingest(
        InputFamily::Pointer,
        TapPhase::Move,
        RawSample::from_client(140.0, 95.0),
    )?;
    tap.ingest(
        InputFamily::Pointer,
        TapPhase::Up,
        RawSample::from_client(150.0, 100.0),
    )?;

    println!("\n📊 After the interaction:");
    println!("   families still active: {:?}", tap.active_families());
    println!("   current position: {:?}", tap.current_position());
    println!("   last position: {:?}", tap.last_position());
    println!("   down: {}", tap.is_down());

    tap.destroy()?;
    println!("\n🧹 Destroyed: {:?}", tap.lifecycle());

    Ok(())
}
