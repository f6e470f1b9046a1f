use crate::grammar::{DEFAULT_ANGLE_DEG, GrammarConfig, PlantMode};
use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};

/// A named, self-contained recipe for one plant: axiom dimensions plus the
/// grammar parameters that grow it. Pure data; callers can use a built-in
/// preset as-is or tweak fields before building the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantPreset {
    pub name: String,
    /// Trunk length of the seed symbol, at age 0.
    pub axiom_length: f32,
    /// Trunk radius of the seed symbol, at age 0.
    pub axiom_radius: f32,
    pub iterations: u32,
    pub angle: f32,
    pub length_scale: f32,
    pub radius_scale: f32,
    pub leaf_start_age: u32,
    pub leaf_size: f32,
    pub include_pitch: bool,
    pub pitch_chance: f32,
    pub mode: PlantMode,
}

impl Default for PlantPreset {
    fn default() -> Self {
        Self {
            name: "Plant".to_string(),
            axiom_length: 1.2,
            axiom_radius: 0.08,
            iterations: 5,
            angle: DEFAULT_ANGLE_DEG,
            length_scale: 0.75,
            radius_scale: 0.70,
            leaf_start_age: 3,
            leaf_size: 1.0,
            include_pitch: true,
            pitch_chance: 0.35,
            mode: PlantMode::Tree,
        }
    }
}

impl PlantPreset {
    /// Taller habit: slower length falloff, leaves held back until age 3,
    /// sparing pitch variation.
    pub fn tree() -> Self {
        Self {
            name: "Tree".to_string(),
            axiom_length: 1.4,
            axiom_radius: 0.09,
            angle: DEFAULT_ANGLE_DEG,
            length_scale: 0.78,
            radius_scale: 0.70,
            leaf_start_age: 3,
            leaf_size: 1.0,
            include_pitch: true,
            pitch_chance: 0.30,
            mode: PlantMode::Tree,
            ..Self::default()
        }
    }

    /// Denser habit: wider angle, faster length falloff, earlier and larger
    /// leaves, pitch on most passes.
    pub fn bush() -> Self {
        Self {
            name: "Bush/Vine".to_string(),
            axiom_length: 0.75,
            axiom_radius: 0.06,
            angle: 38.0,
            length_scale: 0.70,
            radius_scale: 0.80,
            leaf_start_age: 2,
            leaf_size: 1.2,
            include_pitch: true,
            pitch_chance: 0.55,
            mode: PlantMode::Bush,
            ..Self::default()
        }
    }

    /// Seed sequence: a single trunk symbol at age 0.
    pub fn axiom(&self) -> Vec<Symbol> {
        vec![Symbol::forward(self.axiom_length, self.axiom_radius, 0)]
    }

    /// Grammar parameters of this preset, ready for
    /// [`LSystem::new`](crate::grammar::LSystem::new).
    pub fn config(&self) -> GrammarConfig {
        GrammarConfig {
            iterations: self.iterations,
            angle: self.angle,
            length_scale: self.length_scale,
            radius_scale: self.radius_scale,
            leaf_start_age: self.leaf_start_age,
            leaf_size: self.leaf_size,
            include_pitch: self.include_pitch,
            pitch_chance: self.pitch_chance,
            mode: self.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::LSystem;
    use crate::symbol::Letter;

    #[test]
    fn builtin_presets_produce_valid_configs() {
        let presets = [
            PlantPreset::default(),
            PlantPreset::tree(),
            PlantPreset::bush(),
        ];
        for preset in presets {
            assert!(LSystem::new(preset.config()).is_ok(), "{}", preset.name);
        }
    }

    #[test]
    fn axiom_is_a_single_trunk_symbol() {
        let axiom = PlantPreset::tree().axiom();
        assert_eq!(axiom.len(), 1);
        assert_eq!(axiom[0].letter, Letter::Forward);
        assert_eq!(axiom[0].length, 1.4);
        assert_eq!(axiom[0].radius, 0.09);
        assert_eq!(axiom[0].age, 0);
    }

    #[test]
    fn bush_preset_selects_bush_mode_and_wider_angle() {
        let bush = PlantPreset::bush();
        assert_eq!(bush.mode, PlantMode::Bush);
        assert_eq!(bush.config().mode, PlantMode::Bush);
        assert!(bush.angle > PlantPreset::tree().angle);
    }
}
