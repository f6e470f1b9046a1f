//! The rewriting engine: iterated expansion of a symbol sequence under
//! mode-specific production rules.
//!
//! Configure an [`LSystem`] with a validated [`GrammarConfig`], then call
//! [`LSystem::generate`] with an axiom sequence. Expansion is a pure
//! function of its inputs: no randomness, no shared state, so identical
//! inputs always produce identical sequences. Branch variation comes from a
//! deterministic age-keyed gate instead of a random source, which keeps
//! every plant reproducible from its configuration alone.

use crate::symbol::{Letter, Symbol};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default turning angle in degrees, shared by configs and the interpreter.
pub const DEFAULT_ANGLE_DEG: f32 = 25.0;

/// Smallest taper factor substituted when clamping a non-positive scale.
const MIN_SCALE: f32 = 0.05;

// Branch geometry factors. Tunable constants, not invariants: the load
// bearing contrast is Tree (taller, conditional pitch) versus Bush (denser,
// shorter, unconditional pitch).
const TREE_BRANCH_SCALE: f32 = 0.85;
const BUSH_STEP_LENGTH: f32 = 0.65;
const BUSH_STEP_RADIUS: f32 = 0.95;
const BUSH_BRANCH_LENGTH: f32 = 0.85;
const BUSH_BRANCH_RADIUS: f32 = 0.80;

/// Growth habit selecting which production rule set rewrites `Forward`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantMode {
    /// Taller, hierarchical growth; pitch is gated by an age-modulo test.
    #[default]
    Tree,
    /// Denser, shorter growth; pitch applies on every eligible pass.
    Bush,
}

/// Rejected configuration, reported before any expansion work begins.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must lie in (0, 1], got {value}")]
    ScaleOutOfRange { name: &'static str, value: f32 },
    #[error("pitch_chance must lie in [0, 1], got {0}")]
    PitchChanceOutOfRange(f32),
    #[error("angle must be finite, got {0}")]
    NonFiniteAngle(f32),
    #[error("leaf_size must be finite and non-negative, got {0}")]
    InvalidLeafSize(f32),
}

/// Full parameter set for one grammar run.
///
/// `length_scale` and `radius_scale` must lie in (0, 1] so each generation
/// tapers rather than growing without bound. Sequence length grows
/// geometrically with `iterations` (roughly 9x to 14x per pass), so callers
/// should keep it small; 10 or fewer is comfortable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Number of rewrite passes. Zero returns the axiom unchanged.
    pub iterations: u32,
    /// Turning angle in degrees, consumed at interpretation time.
    pub angle: f32,
    /// Generation-over-generation length multiplier, in (0, 1].
    pub length_scale: f32,
    /// Generation-over-generation radius multiplier, in (0, 1].
    pub radius_scale: f32,
    /// Age at which branch tips start carrying leaves.
    pub leaf_start_age: u32,
    /// Size multiplier written into emitted leaf symbols.
    pub leaf_size: f32,
    /// Whether production rules insert pitch symbols at all.
    pub include_pitch: bool,
    /// Feeds the deterministic age-modulo pitch gate, in [0, 1].
    pub pitch_chance: f32,
    /// Which production rule set rewrites `Forward`.
    pub mode: PlantMode,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            iterations: 5,
            angle: DEFAULT_ANGLE_DEG,
            length_scale: 0.75,
            radius_scale: 0.70,
            leaf_start_age: 3,
            leaf_size: 1.0,
            include_pitch: false,
            pitch_chance: 0.0,
            mode: PlantMode::Tree,
        }
    }
}

impl GrammarConfig {
    /// Checks every range constraint, reporting the first violation.
    ///
    /// NaN fails every range test, so non-finite values are rejected here
    /// rather than flowing into the output sequence.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.length_scale > 0.0 && self.length_scale <= 1.0) {
            return Err(ConfigError::ScaleOutOfRange {
                name: "length_scale",
                value: self.length_scale,
            });
        }
        if !(self.radius_scale > 0.0 && self.radius_scale <= 1.0) {
            return Err(ConfigError::ScaleOutOfRange {
                name: "radius_scale",
                value: self.radius_scale,
            });
        }
        if !self.angle.is_finite() {
            return Err(ConfigError::NonFiniteAngle(self.angle));
        }
        if !(self.pitch_chance >= 0.0 && self.pitch_chance <= 1.0) {
            return Err(ConfigError::PitchChanceOutOfRange(self.pitch_chance));
        }
        if !(self.leaf_size >= 0.0 && self.leaf_size.is_finite()) {
            return Err(ConfigError::InvalidLeafSize(self.leaf_size));
        }
        Ok(())
    }

    /// Forces every field into its valid range instead of rejecting.
    ///
    /// This is the lenient path for callers feeding raw slider or file
    /// input: out-of-range scales are pinned into (0, 1], a useless angle
    /// falls back to [`DEFAULT_ANGLE_DEG`], and chance/size are pinned to
    /// their ranges. [`LSystem::new`] still validates, so pass the result of
    /// `clamped` when rejection is not an option.
    pub fn clamped(mut self) -> Self {
        self.length_scale = clamp_scale(self.length_scale);
        self.radius_scale = clamp_scale(self.radius_scale);
        if !(self.angle > 0.0) {
            self.angle = DEFAULT_ANGLE_DEG;
        }
        self.pitch_chance = if self.pitch_chance.is_finite() {
            self.pitch_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if !(self.leaf_size >= 0.0 && self.leaf_size.is_finite()) {
            self.leaf_size = 0.0;
        }
        self
    }
}

fn clamp_scale(value: f32) -> f32 {
    if !value.is_finite() || value <= 0.0 {
        MIN_SCALE
    } else if value > 1.0 {
        1.0
    } else {
        value
    }
}

/// The grammar engine: a validated configuration plus the production rules.
///
/// `generate` never mutates the engine, so one instance can serve any number
/// of concurrent calls.
#[derive(Clone, Debug)]
pub struct LSystem {
    config: GrammarConfig,
}

impl LSystem {
    /// Builds an engine, rejecting malformed configuration up front.
    pub fn new(config: GrammarConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Expands `axiom` through `iterations` rewrite passes.
    ///
    /// Each pass maps every symbol of the current sequence in order:
    /// structural letters are copied through unchanged, `Forward` is
    /// replaced by its mode-specific production. Every pass allocates a
    /// fresh sequence; the input is never mutated.
    pub fn generate(&self, axiom: &[Symbol]) -> Vec<Symbol> {
        let mut current = axiom.to_vec();
        for pass in 0..self.config.iterations {
            current = self.rewrite(&current);
            tracing::debug!(
                "pass {}/{}: {} symbols",
                pass + 1,
                self.config.iterations,
                current.len()
            );
        }
        current
    }

    fn rewrite(&self, input: &[Symbol]) -> Vec<Symbol> {
        // Worst case per growth symbol: step, two full branches, cluster leaf.
        let growth = input.iter().filter(|s| s.letter.is_growth()).count();
        let mut out = Vec::with_capacity(input.len() + growth * 13);
        for symbol in input {
            if symbol.letter.is_growth() {
                match self.config.mode {
                    PlantMode::Tree => self.expand_tree(symbol, &mut out),
                    PlantMode::Bush => self.expand_bush(symbol, &mut out),
                }
            } else {
                out.push(*symbol);
            }
        }
        out
    }

    /// Deterministic stand-in for branch randomness, keyed purely on age.
    ///
    /// True on ages whose last decimal digit falls below
    /// `floor(pitch_chance * 10)`, so a chance of 0.3 pitches the left
    /// branch on ages 0, 1, 2 of every ten and the right branch on the rest.
    fn pitch_gate(&self, age: u32) -> bool {
        (age % 10) < (self.config.pitch_chance * 10.0).floor() as u32
    }

    /// Tree rule: trunk continuation plus two bracketed side branches, with
    /// pitch on exactly one side per pass when enabled.
    fn expand_tree(&self, s: &Symbol, out: &mut Vec<Symbol>) {
        let c = &self.config;
        let age = s.age + 1;

        out.push(Symbol::forward(
            s.length * c.length_scale,
            s.radius * c.radius_scale,
            age,
        ));

        // Branches shorten from the parent segment itself, not from the
        // already-tapered continuation.
        let branch_length = s.length * TREE_BRANCH_SCALE;
        let branch_radius = s.radius * TREE_BRANCH_SCALE;
        let leafy = age >= c.leaf_start_age;
        let pitch_left = c.include_pitch && self.pitch_gate(s.age);
        let pitch_right = c.include_pitch && !self.pitch_gate(s.age);

        out.push(Symbol::bare(Letter::PushState));
        out.push(Symbol::bare(Letter::YawLeft));
        if pitch_left {
            out.push(Symbol::bare(Letter::PitchDown));
        }
        out.push(Symbol::forward(branch_length, branch_radius, age));
        if leafy {
            out.push(Symbol::leaf(c.leaf_size, branch_radius, age));
        }
        out.push(Symbol::bare(Letter::PopState));

        out.push(Symbol::bare(Letter::PushState));
        out.push(Symbol::bare(Letter::YawRight));
        if pitch_right {
            out.push(Symbol::bare(Letter::PitchUp));
        }
        out.push(Symbol::forward(branch_length, branch_radius, age));
        if leafy {
            out.push(Symbol::leaf(c.leaf_size, branch_radius, age));
        }
        out.push(Symbol::bare(Letter::PopState));
    }

    /// Bush rule: a shorter step, two branches that pitch on every eligible
    /// pass, and an extra cluster leaf for denser foliage.
    fn expand_bush(&self, s: &Symbol, out: &mut Vec<Symbol>) {
        let c = &self.config;
        let age = s.age + 1;

        let step_length = s.length * c.length_scale * BUSH_STEP_LENGTH;
        let step_radius = s.radius * c.radius_scale * BUSH_STEP_RADIUS;
        out.push(Symbol::forward(step_length, step_radius, age));

        let branch_length = s.length * BUSH_BRANCH_LENGTH;
        let branch_radius = s.radius * BUSH_BRANCH_RADIUS;
        let leafy = age >= c.leaf_start_age;

        out.push(Symbol::bare(Letter::PushState));
        out.push(Symbol::bare(Letter::YawLeft));
        if c.include_pitch {
            out.push(Symbol::bare(Letter::PitchDown));
        }
        out.push(Symbol::forward(branch_length, branch_radius, age));
        if leafy {
            out.push(Symbol::leaf(c.leaf_size, branch_radius, age));
        }
        out.push(Symbol::bare(Letter::PopState));

        out.push(Symbol::bare(Letter::PushState));
        out.push(Symbol::bare(Letter::YawRight));
        if c.include_pitch {
            out.push(Symbol::bare(Letter::PitchUp));
        }
        out.push(Symbol::forward(branch_length, branch_radius, age));
        if leafy {
            out.push(Symbol::leaf(c.leaf_size, branch_radius, age));
        }
        out.push(Symbol::bare(Letter::PopState));

        if leafy {
            out.push(Symbol::leaf(c.leaf_size, step_radius, age));
        }
    }
}
