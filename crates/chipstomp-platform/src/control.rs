//! Control events and the queues that carry them into the sample callback.
//!
//! The control task (encoder, buttons, display) never touches effect state
//! directly. It posts [`ControlEvent`]s; the callback pops them at the top of
//! a tick through a [`ControlReceiver`]. Report requests are answered with
//! an integer [`EffectStatus`] pushed through a [`StatusSender`]; the control
//! task turns it into display lines.
//!
//! With the `rtrb` feature, `rtrb::Consumer<ControlEvent>` and
//! `rtrb::Producer<EffectStatus>` implement both traits, and
//! [`control_channel`] builds a matched pair of wait-free queues.
//!
//! Levels travel the other way without a queue: the callback writes
//! [`Meters`] and the control task polls them.
//!
//! # Example
//!
//! ```rust
//! use chipstomp_platform::{ControlEvent, ControlReceiver};
//! use std::collections::VecDeque;
//!
//! let mut queue = VecDeque::from([ControlEvent::Toggle, ControlEvent::Adjust(3)]);
//! assert_eq!(queue.pop(), Some(ControlEvent::Toggle));
//! assert_eq!(queue.pop(), Some(ControlEvent::Adjust(3)));
//! assert_eq!(queue.pop(), None);
//! ```

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use chipstomp_core::{EffectStatus, Sample};
#[cfg(feature = "rtrb")]
use chipstomp_core::{Effect, Report};

/// One input gesture, already debounced and decoded by the input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// Encoder turned by a signed number of detents.
    Adjust(i16),
    /// Encoder pushed: move to the next tunable feature.
    NextFeature,
    /// Footswitch pressed: bypass on/off.
    Toggle,
    /// Select the next effect in the lineup.
    SelectNext,
    /// Select the previous effect in the lineup.
    SelectPrevious,
    /// Ask for the active effect's status lines.
    Report,
}

/// Source of control events, polled from the sample callback.
///
/// `pop` must be wait-free.
pub trait ControlReceiver {
    /// Next pending event, if any.
    fn pop(&mut self) -> Option<ControlEvent>;
}

/// Destination for statuses produced inside the sample callback.
///
/// `push` must be wait-free.
pub trait StatusSender {
    /// Hand over a status. Returns `false` if it was dropped.
    fn push(&mut self, status: EffectStatus) -> bool;
}

/// No control input: the engine runs with whatever settings it was built with.
impl ControlReceiver for () {
    fn pop(&mut self) -> Option<ControlEvent> {
        None
    }
}

/// Statuses are discarded.
impl StatusSender for () {
    fn push(&mut self, _status: EffectStatus) -> bool {
        false
    }
}

#[cfg(feature = "std")]
impl ControlReceiver for std::collections::VecDeque<ControlEvent> {
    fn pop(&mut self) -> Option<ControlEvent> {
        self.pop_front()
    }
}

#[cfg(feature = "std")]
impl StatusSender for Vec<EffectStatus> {
    fn push(&mut self, status: EffectStatus) -> bool {
        Vec::push(self, status);
        true
    }
}

#[cfg(feature = "rtrb")]
impl ControlReceiver for rtrb::Consumer<ControlEvent> {
    fn pop(&mut self) -> Option<ControlEvent> {
        rtrb::Consumer::pop(self).ok()
    }
}

#[cfg(feature = "rtrb")]
impl StatusSender for rtrb::Producer<EffectStatus> {
    fn push(&mut self, status: EffectStatus) -> bool {
        rtrb::Producer::push(self, status).is_ok()
    }
}

/// Control-task side of a [`control_channel`].
#[cfg(feature = "rtrb")]
pub struct ControlHandle {
    /// Events towards the sample callback.
    pub events: rtrb::Producer<ControlEvent>,
    /// Statuses coming back from the sample callback.
    pub statuses: rtrb::Consumer<EffectStatus>,
}

#[cfg(feature = "rtrb")]
impl ControlHandle {
    /// Queue an event. A full queue drops it and returns `false`.
    pub fn send(&mut self, event: ControlEvent) -> bool {
        self.events.push(event).is_ok()
    }

    /// Oldest unread status, if any.
    pub fn try_status(&mut self) -> Option<EffectStatus> {
        self.statuses.pop().ok()
    }

    /// Oldest unread status, rendered into display lines.
    ///
    /// `lineup` is the control task's own copy of the effects, in the same
    /// order as the callback's; the status is loaded into the matching slot
    /// before the report is built. A status whose slot is outside `lineup`
    /// is discarded.
    pub fn try_report<E: Effect>(&mut self, lineup: &mut [E]) -> Option<Report> {
        let status = self.try_status()?;
        let effect = lineup.get_mut(status.slot)?;
        Some(status.render(effect))
    }
}

/// Callback side of a [`control_channel`].
#[cfg(feature = "rtrb")]
pub struct CallbackQueues {
    /// Events from the control task.
    pub events: rtrb::Consumer<ControlEvent>,
    /// Statuses towards the control task.
    pub statuses: rtrb::Producer<EffectStatus>,
}

/// Build the two SPSC queues joining the control task and the callback.
///
/// `capacity` applies to each direction.
#[cfg(feature = "rtrb")]
pub fn control_channel(capacity: usize) -> (ControlHandle, CallbackQueues) {
    let (event_tx, event_rx) = rtrb::RingBuffer::new(capacity);
    let (status_tx, status_rx) = rtrb::RingBuffer::new(capacity);
    (
        ControlHandle {
            events: event_tx,
            statuses: status_rx,
        },
        CallbackQueues {
            events: event_rx,
            statuses: status_tx,
        },
    )
}

/// Clip indicator shared between the callback and the control task.
///
/// The callback calls [`trip`](ClipMeter::trip) whenever an output sample
/// reaches `CLIP_LEVEL`; the control task polls [`take`](ClipMeter::take)
/// to drive the LED. Usable as a `static` on targets without an allocator.
#[derive(Debug, Default)]
pub struct ClipMeter {
    lit: AtomicBool,
}

impl ClipMeter {
    /// An unlit meter.
    pub const fn new() -> Self {
        Self {
            lit: AtomicBool::new(false),
        }
    }

    /// Light the indicator.
    #[inline]
    pub fn trip(&self) {
        self.lit.store(true, Ordering::Relaxed);
    }

    /// Whether the indicator is lit, without clearing it.
    pub fn is_lit(&self) -> bool {
        self.lit.load(Ordering::Relaxed)
    }

    /// Read and clear the indicator.
    pub fn take(&self) -> bool {
        self.lit.swap(false, Ordering::Relaxed)
    }
}

/// Input and output peaks, as magnitudes of full scale (`32768` = 0 dBFS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeakLevels {
    /// Largest input magnitude seen.
    pub input: u16,
    /// Largest output magnitude seen, after saturation.
    pub output: u16,
}

/// Peak level meter shared between the callback and the control task.
///
/// The callback [`record`](PeakMeter::record)s every tick; the control task
/// [`take`](PeakMeter::take)s the peaks once per display refresh, which
/// starts a new window.
#[derive(Debug, Default)]
pub struct PeakMeter {
    input: AtomicU16,
    output: AtomicU16,
}

impl PeakMeter {
    /// A meter reading silence.
    pub const fn new() -> Self {
        Self {
            input: AtomicU16::new(0),
            output: AtomicU16::new(0),
        }
    }

    /// Fold one input/output pair into the window.
    #[inline]
    pub fn record(&self, input: Sample, output: Sample) {
        self.input.fetch_max(magnitude(input), Ordering::Relaxed);
        self.output.fetch_max(magnitude(output), Ordering::Relaxed);
    }

    /// Peaks of the current window, without clearing them.
    pub fn peek(&self) -> PeakLevels {
        PeakLevels {
            input: self.input.load(Ordering::Relaxed),
            output: self.output.load(Ordering::Relaxed),
        }
    }

    /// Read the peaks and start a new window.
    pub fn take(&self) -> PeakLevels {
        PeakLevels {
            input: self.input.swap(0, Ordering::Relaxed),
            output: self.output.swap(0, Ordering::Relaxed),
        }
    }
}

#[inline]
fn magnitude(x: Sample) -> u16 {
    u16::try_from(x.unsigned_abs()).unwrap_or(u16::MAX)
}

/// Everything the callback reports by writing shared atomics.
///
/// Usable as a `static`.
#[derive(Debug, Default)]
pub struct Meters {
    /// Clip LED.
    pub clip: ClipMeter,
    /// Input/output peaks.
    pub peaks: PeakMeter,
}

impl Meters {
    /// Unlit clip indicator, silent peaks.
    pub const fn new() -> Self {
        Self {
            clip: ClipMeter::new(),
            peaks: PeakMeter::new(),
        }
    }
}
