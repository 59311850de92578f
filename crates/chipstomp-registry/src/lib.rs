//! Effect registry and factory for chipstomp effects.
//!
//! This crate provides the catalogue of every effect the pedal knows and a
//! closed, allocation-free wrapper type, [`PedalEffect`], so a fixed array of
//! heterogeneous effects can be owned by the effect manager.
//!
//! # Features
//!
//! - **Effect Discovery**: List all available effects with metadata
//! - **Factory Pattern**: Create effects by id at runtime
//! - **Category System**: Effects organized by type
//! - **Feature Lookup**: Resolve preset/CLI keys to feature indices
//! - **Standard Lineup**: The pedal's power-up effect order
//!
//! # Example
//!
//! ```rust
//! use chipstomp_registry::{EffectRegistry, EffectCategory};
//! use chipstomp_core::Effect;
//!
//! let registry = EffectRegistry::new();
//!
//! // List all effects
//! for effect in registry.all_effects() {
//!     println!("{}: {}", effect.name, effect.description);
//! }
//!
//! // Create an effect by id
//! if let Some(mut echo) = registry.create("echo") {
//!     let output = echo.process(1000);
//!     assert_eq!(output, 1000);
//! }
//!
//! // Filter by category
//! for effect in registry.effects_in_category(EffectCategory::Modulation) {
//!     println!("Modulation effect: {}", effect.name);
//! }
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible and never allocates. Disable the
//! default `std` feature:
//!
//! ```toml
//! [dependencies]
//! chipstomp-registry = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

use chipstomp_core::{Effect, EffectState, FeatureDescriptor, FeatureInfo, ReportSink, Sample};
use chipstomp_effects::{Bitcrush, Dummy, Echo, Flanger, PitchShift, Tremolo};

/// Category of effect for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    /// Resolution and rate reduction
    LoFi,
    /// Delay-line effects fed at the full or a decimated rate
    TimeBased,
    /// LFO-driven effects (flanger, tremolo)
    Modulation,
    /// Pitch manipulation
    Pitch,
    /// Placeholders and pass-through utilities
    Utility,
}

impl EffectCategory {
    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            EffectCategory::LoFi => "Lo-Fi",
            EffectCategory::TimeBased => "Time-Based",
            EffectCategory::Modulation => "Modulation",
            EffectCategory::Pitch => "Pitch",
            EffectCategory::Utility => "Utility",
        }
    }

    /// Returns a description of the category.
    pub const fn description(&self) -> &'static str {
        match self {
            EffectCategory::LoFi => "Bit depth and sample rate reduction",
            EffectCategory::TimeBased => "Echo and other delay-line effects",
            EffectCategory::Modulation => "Flanger, tremolo, and other LFO-driven effects",
            EffectCategory::Pitch => "Pitch shifting",
            EffectCategory::Utility => "Placeholders and pass-through processors",
        }
    }
}

/// Every effect type the pedal can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// [`Bitcrush`]
    Bitcrush,
    /// [`Echo`]
    Echo,
    /// [`Flanger`]
    Flanger,
    /// [`PitchShift`]
    PitchShift,
    /// [`Tremolo`]
    Tremolo,
    /// [`Dummy`]
    Dummy,
}

impl EffectKind {
    /// All kinds in standard lineup order.
    pub const ALL: [EffectKind; 6] = [
        EffectKind::Bitcrush,
        EffectKind::Echo,
        EffectKind::Flanger,
        EffectKind::PitchShift,
        EffectKind::Tremolo,
        EffectKind::Dummy,
    ];

    /// Stable lowercase identifier.
    pub fn id(&self) -> &'static str {
        self.descriptor().id
    }

    /// Catalogue entry for this kind.
    pub fn descriptor(&self) -> &'static EffectDescriptor {
        &DESCRIPTORS[*self as usize]
    }

    /// Look a kind up by id (case-insensitive).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(id))
    }
}

/// Describes an effect in the registry.
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    /// Unique identifier for the effect (lowercase, no spaces).
    pub id: &'static str,
    /// Human-readable name, as shown on the display.
    pub name: &'static str,
    /// Brief description of the effect.
    pub description: &'static str,
    /// Category for organization.
    pub category: EffectCategory,
    /// Number of tunable features.
    pub feature_count: u8,
    /// The kind this descriptor belongs to.
    pub kind: EffectKind,
}

static DESCRIPTORS: [EffectDescriptor; 6] = [
    EffectDescriptor {
        id: "bitcrush",
        name: "Bitcrush",
        description: "Bit depth reduction with averaging sample-rate hold",
        category: EffectCategory::LoFi,
        feature_count: 2,
        kind: EffectKind::Bitcrush,
    },
    EffectDescriptor {
        id: "echo",
        name: "Echo",
        description: "Decimated tape echo with interpolated playback",
        category: EffectCategory::TimeBased,
        feature_count: 2,
        kind: EffectKind::Echo,
    },
    EffectDescriptor {
        id: "flanger",
        name: "Flanger",
        description: "Sine-swept short delay, wet output only",
        category: EffectCategory::Modulation,
        feature_count: 2,
        kind: EffectKind::Flanger,
    },
    EffectDescriptor {
        id: "pitchshift",
        name: "PitchShift",
        description: "Granular pitch shifter with cross-faded wrap",
        category: EffectCategory::Pitch,
        feature_count: 2,
        kind: EffectKind::PitchShift,
    },
    EffectDescriptor {
        id: "tremolo",
        name: "Tremolo",
        description: "Sine amplitude modulation",
        category: EffectCategory::Modulation,
        feature_count: 2,
        kind: EffectKind::Tremolo,
    },
    EffectDescriptor {
        id: "dummy",
        name: "Dummy",
        description: "Inert placeholder slot",
        category: EffectCategory::Utility,
        feature_count: 0,
        kind: EffectKind::Dummy,
    },
];

/// One of the pedal's effects, behind a single concrete type.
///
/// Enum dispatch keeps a fixed array of mixed effects free of boxing, so the
/// whole lineup can live in a `static` on the target.
#[derive(Debug, Clone)]
pub enum PedalEffect {
    /// Bitcrush
    Bitcrush(Bitcrush),
    /// Echo
    Echo(Echo),
    /// Flanger
    Flanger(Flanger),
    /// PitchShift
    PitchShift(PitchShift),
    /// Tremolo
    Tremolo(Tremolo),
    /// Dummy
    Dummy(Dummy),
}

macro_rules! dispatch {
    ($self:expr, $fx:ident => $body:expr) => {
        match $self {
            PedalEffect::Bitcrush($fx) => $body,
            PedalEffect::Echo($fx) => $body,
            PedalEffect::Flanger($fx) => $body,
            PedalEffect::PitchShift($fx) => $body,
            PedalEffect::Tremolo($fx) => $body,
            PedalEffect::Dummy($fx) => $body,
        }
    };
}

impl PedalEffect {
    /// Construct a fresh effect of the given kind.
    pub const fn new(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Bitcrush => PedalEffect::Bitcrush(Bitcrush::new()),
            EffectKind::Echo => PedalEffect::Echo(Echo::new()),
            EffectKind::Flanger => PedalEffect::Flanger(Flanger::new()),
            EffectKind::PitchShift => PedalEffect::PitchShift(PitchShift::new()),
            EffectKind::Tremolo => PedalEffect::Tremolo(Tremolo::new()),
            EffectKind::Dummy => PedalEffect::Dummy(Dummy::new()),
        }
    }

    /// Which kind of effect this is.
    pub const fn kind(&self) -> EffectKind {
        match self {
            PedalEffect::Bitcrush(_) => EffectKind::Bitcrush,
            PedalEffect::Echo(_) => EffectKind::Echo,
            PedalEffect::Flanger(_) => EffectKind::Flanger,
            PedalEffect::PitchShift(_) => EffectKind::PitchShift,
            PedalEffect::Tremolo(_) => EffectKind::Tremolo,
            PedalEffect::Dummy(_) => EffectKind::Dummy,
        }
    }
}

impl FeatureInfo for PedalEffect {
    fn feature_count(&self) -> u8 {
        dispatch!(self, fx => fx.feature_count())
    }

    fn feature_info(&self, index: u8) -> Option<FeatureDescriptor> {
        dispatch!(self, fx => fx.feature_info(index))
    }

    fn get_feature(&self, index: u8) -> i32 {
        dispatch!(self, fx => fx.get_feature(index))
    }

    fn set_feature(&mut self, index: u8, value: i32) {
        dispatch!(self, fx => fx.set_feature(index, value))
    }

    fn feature_display(&self, index: u8) -> f32 {
        dispatch!(self, fx => fx.feature_display(index))
    }
}

impl Effect for PedalEffect {
    fn name(&self) -> &'static str {
        dispatch!(self, fx => fx.name())
    }

    fn state(&self) -> &EffectState {
        dispatch!(self, fx => fx.state())
    }

    fn state_mut(&mut self) -> &mut EffectState {
        dispatch!(self, fx => fx.state_mut())
    }

    #[inline]
    fn process(&mut self, x: Sample) -> Sample {
        dispatch!(self, fx => fx.process(x))
    }

    fn reset(&mut self) {
        dispatch!(self, fx => fx.reset())
    }

    fn adjust_feature(&mut self, delta: i16) {
        dispatch!(self, fx => fx.adjust_feature(delta))
    }

    fn report(&self, sink: &mut dyn ReportSink) {
        dispatch!(self, fx => fx.report(sink))
    }
}

/// Number of effects in the standard lineup.
pub const LINEUP_LEN: usize = EffectKind::ALL.len();

/// The pedal's power-up lineup, in selection order.
pub const fn standard_lineup() -> [PedalEffect; LINEUP_LEN] {
    [
        PedalEffect::new(EffectKind::Bitcrush),
        PedalEffect::new(EffectKind::Echo),
        PedalEffect::new(EffectKind::Flanger),
        PedalEffect::new(EffectKind::PitchShift),
        PedalEffect::new(EffectKind::Tremolo),
        PedalEffect::new(EffectKind::Dummy),
    ]
}

/// Registry of all available effects.
///
/// The catalogue is static, so the registry is a zero-sized handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectRegistry;

impl EffectRegistry {
    /// Create a registry handle.
    pub const fn new() -> Self {
        Self
    }

    /// Returns descriptors for all registered effects.
    pub fn all_effects(&self) -> impl Iterator<Item = &'static EffectDescriptor> {
        DESCRIPTORS.iter()
    }

    /// Returns descriptors for effects in a specific category.
    pub fn effects_in_category(
        &self,
        category: EffectCategory,
    ) -> impl Iterator<Item = &'static EffectDescriptor> {
        DESCRIPTORS.iter().filter(move |d| d.category == category)
    }

    /// Get a descriptor by effect id (case-insensitive).
    pub fn get(&self, id: &str) -> Option<&'static EffectDescriptor> {
        EffectKind::from_id(id).map(|kind| kind.descriptor())
    }

    /// Create an effect instance by id.
    ///
    /// Returns `None` if the id is not found.
    pub fn create(&self, id: &str) -> Option<PedalEffect> {
        EffectKind::from_id(id).map(PedalEffect::new)
    }

    /// Find a feature index by key for a given effect id.
    ///
    /// Returns `None` if the effect or the key is unknown.
    pub fn feature_index_by_key(&self, effect_id: &str, key: &str) -> Option<u8> {
        self.create(effect_id)?.feature_index(key)
    }

    /// Returns the number of registered effects.
    pub fn len(&self) -> usize {
        DESCRIPTORS.len()
    }

    /// Returns true if no effects are registered.
    pub fn is_empty(&self) -> bool {
        DESCRIPTORS.is_empty()
    }
}
