// tests/plant_topology.rs
use glam::Vec3;
use symbios_flora::{
    DrawCommand, GrammarConfig, LSystem, Letter, PlantInterpreter, PlantPreset, Symbol,
    TurtleConfig,
};

fn grow(preset: &PlantPreset) -> Vec<Symbol> {
    let system = LSystem::new(preset.config()).unwrap();
    system.generate(&preset.axiom())
}

fn interpreter() -> PlantInterpreter {
    PlantInterpreter::new(TurtleConfig::default())
}

#[test]
fn generated_sequences_balance_their_brackets() {
    for base in [PlantPreset::tree(), PlantPreset::bush()] {
        for iterations in 0..=5 {
            let preset = PlantPreset { iterations, ..base.clone() };
            let symbols = grow(&preset);
            let pushes = symbols
                .iter()
                .filter(|s| s.letter == Letter::PushState)
                .count();
            let pops = symbols
                .iter()
                .filter(|s| s.letter == Letter::PopState)
                .count();
            assert_eq!(pushes, pops, "{} at {} iterations", preset.name, iterations);
        }
    }
}

#[test]
fn interpretation_leaves_no_dangling_branch_state() {
    // A trailing excess pop is a no-op only when the stack has already
    // drained, so identical output after the probe proves the stack empties
    // for every generated sequence.
    for preset in [PlantPreset::tree(), PlantPreset::bush()] {
        let symbols = grow(&preset);

        let mut probed = symbols.clone();
        probed.push(Symbol::bare(Letter::PopState));
        probed.push(Symbol::forward(1.0, 0.05, 0));

        let mut reference = symbols.clone();
        reference.push(Symbol::forward(1.0, 0.05, 0));

        let a = interpreter().build_blueprint(&probed, preset.angle);
        let b = interpreter().build_blueprint(&reference, preset.angle);
        assert_eq!(a.commands(), b.commands(), "{}", preset.name);
    }
}

#[test]
fn one_command_per_drawing_symbol_in_sequence_order() {
    let preset = PlantPreset::tree();
    let symbols = grow(&preset);
    let blueprint = interpreter().build_blueprint(&symbols, preset.angle);

    let forwards = symbols
        .iter()
        .filter(|s| s.letter == Letter::Forward)
        .count();
    let leaf_symbols = symbols.iter().filter(|s| s.letter == Letter::Leaf).count();
    assert_eq!(blueprint.segments().count(), forwards);
    assert_eq!(blueprint.leaves().count(), leaf_symbols);
    assert_eq!(blueprint.len(), forwards + leaf_symbols);

    // Drawing symbols and commands line up pairwise, in order.
    let drawing = symbols
        .iter()
        .filter(|s| matches!(s.letter, Letter::Forward | Letter::Leaf));
    for (symbol, command) in drawing.zip(blueprint.commands()) {
        match command {
            DrawCommand::Segment(segment) => {
                assert_eq!(symbol.letter, Letter::Forward);
                assert_eq!(segment.age, symbol.age);
            }
            DrawCommand::Leaf(leaf) => {
                assert_eq!(symbol.letter, Letter::Leaf);
                assert_eq!(leaf.age, symbol.age);
            }
        }
    }
}

#[test]
fn single_pass_reference_scenario() {
    // Axiom F(1.2, 0.08) through one no-pitch tree pass: a trunk
    // continuation with two branches.
    let system = LSystem::new(GrammarConfig {
        iterations: 1,
        length_scale: 0.78,
        ..GrammarConfig::default()
    })
    .unwrap();
    let symbols = system.generate(&[Symbol::forward(1.2, 0.08, 0)]);
    let blueprint = interpreter().build_blueprint(&symbols, 25.0);

    let segments: Vec<_> = blueprint.segments().collect();
    assert_eq!(segments.len(), 3);
    assert_eq!(blueprint.leaves().count(), 0);

    // The continuation tapers through the config scales.
    assert!((segments[0].length() - 0.936).abs() < 1e-5);
    assert!((segments[0].radius - 0.056).abs() < 1e-5);

    // Branches shorten from the raw parent by the branch factor and start at
    // the continuation tip. Yaw re-orients the lateral plane but not the
    // growth axis, so without pitch symbols they still grow straight up.
    for branch in &segments[1..] {
        assert!((branch.length() - 1.02).abs() < 1e-4);
        assert!((branch.radius - 0.068).abs() < 1e-5);
        assert!(branch.start.abs_diff_eq(segments[0].end, 1e-5));
        assert!(branch.direction().abs_diff_eq(Vec3::Y, 1e-5));
    }
}

#[test]
fn bush_pitch_tilts_branches_off_vertical() {
    let preset = PlantPreset::bush();
    let blueprint = interpreter().build_blueprint(&grow(&preset), preset.angle);

    let tilted = blueprint
        .segments()
        .filter(|segment| segment.direction().y < 0.99)
        .count();
    assert!(tilted > 0, "pitch should bend some branches off the vertical");
}

#[test]
fn tree_leaves_respect_the_leaf_age_and_sit_on_segment_tips() {
    let preset = PlantPreset::tree();
    let blueprint = interpreter().build_blueprint(&grow(&preset), preset.angle);
    assert!(blueprint.leaves().count() > 0);

    // Walking in emission order, every leaf must be anchored at the tip of
    // a segment drawn before it.
    let mut tips: Vec<Vec3> = Vec::new();
    for command in blueprint.commands() {
        match command {
            DrawCommand::Segment(segment) => tips.push(segment.end),
            DrawCommand::Leaf(leaf) => {
                assert!(leaf.age >= preset.leaf_start_age);
                assert!(
                    tips.iter().any(|tip| tip.abs_diff_eq(leaf.position, 1e-4)),
                    "leaf not anchored to any segment tip"
                );
            }
        }
    }
}

#[test]
fn pipeline_is_deterministic_end_to_end() {
    for preset in [PlantPreset::tree(), PlantPreset::bush()] {
        let first = interpreter().build_blueprint(&grow(&preset), preset.angle);
        let second = interpreter().build_blueprint(&grow(&preset), preset.angle);
        assert_eq!(first.commands(), second.commands(), "{}", preset.name);
    }
}

#[test]
fn blueprint_bounds_cover_the_grown_plant() {
    let preset = PlantPreset::tree();
    let blueprint = interpreter().build_blueprint(&grow(&preset), preset.angle);

    let (min, max) = blueprint.bounds().unwrap();
    // Radius inflation dips below the root; the trunk rises well above it.
    assert!(min.y < 0.0);
    assert!(max.y > 0.3);
    assert!(max.z - min.z > 0.2, "branches should spread laterally");
}
