//! The sample callback and the clock that drives it.
//!
//! On the pedal a hardware timer fires once per sample period and calls the
//! [`SampleCallback`]. Off the pedal the same callback can be driven by any
//! [`SampleClock`]; [`OfflineClock`] feeds it from a buffer as fast as the
//! host allows.
//!
//! # Shared state
//!
//! [`AudioEngine`] owns the [`EffectManager`] outright. The control task
//! reaches it only through the event queue that the engine drains at the top
//! of each tick, so effect settings are never read mid-update. Answers to
//! report requests go back as integer [`EffectStatus`]es; the display math
//! runs on the control side. The only state written from the callback and
//! read elsewhere is [`Meters`]: a clip flag and two peak levels, each a
//! single atomic.
//!
//! [`EffectStatus`]: chipstomp_core::EffectStatus
//!
//! # Example
//!
//! ```rust
//! use chipstomp_platform::{
//!     AudioEngine, ControlEvent, Effect, EffectManager, Meters, OfflineClock, SampleClock,
//! };
//! use chipstomp_registry::standard_lineup;
//! use std::collections::VecDeque;
//!
//! let meters = Meters::new();
//! let events = VecDeque::from([ControlEvent::Toggle]);
//! let mut engine = AudioEngine::new(EffectManager::new(standard_lineup()), events, (), &meters);
//!
//! let input = [1000i16; 64];
//! let mut output = [0i16; 64];
//! let ticks = OfflineClock::new(&input, &mut output).run(&mut engine);
//! assert_eq!(ticks, 64);
//! assert!(engine.manager().active().is_enabled());
//! assert_eq!(meters.peaks.take().input, 1000);
//! ```

use chipstomp_core::{Effect, Sample, is_clipping, saturate, to_i16};

use crate::control::{ControlReceiver, Meters, StatusSender};
use crate::manager::EffectManager;

/// Upper bound on control events applied in one tick.
///
/// Each event is O(1), so this caps the control work a single sample period
/// can absorb. Anything left over waits for the next tick.
pub const MAX_EVENTS_PER_TICK: usize = 4;

/// Per-sample callback invoked by a [`SampleClock`].
///
/// Implementations must be bounded in time and must not allocate or block.
pub trait SampleCallback {
    /// Consume one input sample and produce one output sample.
    fn on_sample(&mut self, input: i16) -> i16;
}

/// Periodic, non-reentrant source of sample ticks.
pub trait SampleClock {
    /// Tick rate in Hz.
    fn sample_rate(&self) -> u32;

    /// Drive `callback` until the clock stops. Returns the number of ticks.
    fn run<C: SampleCallback + ?Sized>(&mut self, callback: &mut C) -> usize;
}

/// Sample callback that routes control events and audio to an
/// [`EffectManager`].
///
/// Each tick:
/// 1. applies up to [`MAX_EVENTS_PER_TICK`] pending control events, sending
///    back a status for every [`Report`](crate::ControlEvent::Report) request;
/// 2. runs the sample through the active effect;
/// 3. lights the clip meter at `CLIP_LEVEL` and saturates to `±CLIP_HARD`;
/// 4. folds input and saturated output into the peak meter.
pub struct AudioEngine<'a, E, const N: usize, R, S> {
    manager: EffectManager<E, N>,
    controls: R,
    statuses: S,
    meters: &'a Meters,
}

impl<'a, E, const N: usize, R, S> AudioEngine<'a, E, N, R, S>
where
    E: Effect,
    R: ControlReceiver,
    S: StatusSender,
{
    /// Assemble an engine from its manager, queues and meters.
    pub fn new(manager: EffectManager<E, N>, controls: R, statuses: S, meters: &'a Meters) -> Self {
        Self {
            manager,
            controls,
            statuses,
            meters,
        }
    }

    /// Process one sample.
    #[inline]
    pub fn tick(&mut self, x: Sample) -> Sample {
        self.drain_controls();
        let y = self.manager.dispatch(x);
        if is_clipping(y) {
            self.meters.clip.trip();
        }
        let y = saturate(y);
        self.meters.peaks.record(x, y);
        y
    }

    fn drain_controls(&mut self) {
        for _ in 0..MAX_EVENTS_PER_TICK {
            let Some(event) = self.controls.pop() else {
                break;
            };
            if let Some(status) = self.manager.apply(event) {
                // A full status queue drops the status; the display asks again.
                let _ = self.statuses.push(status);
            }
        }
    }

    /// The managed effects.
    pub fn manager(&self) -> &EffectManager<E, N> {
        &self.manager
    }

    /// The managed effects, mutably.
    pub fn manager_mut(&mut self) -> &mut EffectManager<E, N> {
        &mut self.manager
    }

    /// The status queue.
    pub fn statuses(&self) -> &S {
        &self.statuses
    }

    /// The meters this engine writes.
    pub fn meters(&self) -> &'a Meters {
        self.meters
    }

    /// Tear the engine down into its manager and queues.
    pub fn into_parts(self) -> (EffectManager<E, N>, R, S) {
        (self.manager, self.controls, self.statuses)
    }
}

impl<E, const N: usize, R, S> SampleCallback for AudioEngine<'_, E, N, R, S>
where
    E: Effect,
    R: ControlReceiver,
    S: StatusSender,
{
    #[inline]
    fn on_sample(&mut self, input: i16) -> i16 {
        to_i16(self.tick(Sample::from(input)))
    }
}

/// Clock that drives a callback over an input buffer, writing the output
/// buffer in place of a DAC.
///
/// Runs for `min(input.len(), output.len())` ticks.
#[derive(Debug)]
pub struct OfflineClock<'b> {
    input: &'b [i16],
    output: &'b mut [i16],
    sample_rate: u32,
}

impl<'b> OfflineClock<'b> {
    /// A clock over `input`/`output` at the pedal's sample rate.
    pub fn new(input: &'b [i16], output: &'b mut [i16]) -> Self {
        Self {
            input,
            output,
            sample_rate: chipstomp_core::SAMPLE_RATE,
        }
    }

    /// Override the reported sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }
}

impl SampleClock for OfflineClock<'_> {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn run<C: SampleCallback + ?Sized>(&mut self, callback: &mut C) -> usize {
        let mut ticks = 0;
        for (out, &x) in self.output.iter_mut().zip(self.input) {
            *out = callback.on_sample(x);
            ticks += 1;
        }
        ticks
    }
}
