//! # symbios-flora
//!
//! A deterministic plant-generation crate that grows parametric L-System
//! sequences and interprets them into engine-agnostic draw commands.
//!
//! It decouples the *Genotype* (a parametrized symbol sequence expanded by
//! mode-specific production rules) from the *Phenotype* (an ordered list of
//! segment and leaf draw commands with resolved world transforms), so the
//! same `PlantBlueprint` can feed a game engine mesher, an offline renderer,
//! or a plotter.
//!
//! The pipeline is `PlantPreset` (or a hand-built `GrammarConfig`) →
//! [`LSystem::generate`] → expanded [`Symbol`] sequence →
//! [`PlantInterpreter::interpret`] → draw commands into a [`GeometrySink`].
//! Every stage is a pure function of its inputs; branch variation comes from
//! a deterministic age-keyed gate, never a random source.

pub mod blueprint;
pub mod grammar;
pub mod growth;
pub mod interpreter;
pub mod presets;
pub mod symbol;
pub mod turtle;

pub use blueprint::*;
pub use grammar::*;
pub use growth::*;
pub use interpreter::*;
pub use presets::*;
pub use symbol::*;
pub use turtle::*;
