//! Control task and sample callback on separate threads, joined by the
//! lock-free queues from `control_channel`.

#![cfg(feature = "rtrb")]

use std::thread;

use chipstomp_platform::{
    AudioEngine, ControlEvent, Effect, Meters, SampleCallback, control_channel, standard_pedal,
};
use chipstomp_registry::standard_lineup;

#[test]
fn events_from_another_thread_reach_the_callback() {
    static METERS: Meters = Meters::new();

    let (mut handle, queues) = control_channel(16);
    let mut engine = AudioEngine::new(standard_pedal(), queues.events, queues.statuses, &METERS);

    let control = thread::spawn(move || {
        for event in [
            ControlEvent::SelectNext,
            ControlEvent::Toggle,
            ControlEvent::NextFeature,
            ControlEvent::Adjust(-2),
            ControlEvent::Report,
        ] {
            while !handle.send(event) {
                thread::yield_now();
            }
        }
        // The display keeps its own lineup to render statuses into.
        let mut display = standard_lineup();
        loop {
            if let Some(report) = handle.try_report(&mut display) {
                return report;
            }
            thread::yield_now();
        }
    });

    // Keep ticking until the control thread has its answer.
    while !control.is_finished() {
        engine.on_sample(-1200);
    }
    let report = control.join().unwrap();

    assert_eq!(report.effect, "Echo");
    assert!(report.enabled);
    let amp = report.selected().unwrap();
    assert_eq!(amp.label, "Amp");
    assert!(engine.manager().active().is_enabled());
    assert!(!METERS.clip.is_lit());
    assert_eq!(METERS.peaks.take().input, 1200);
}
