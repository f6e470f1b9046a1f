//! Interpreter that converts an expanded symbol sequence into draw commands.
//!
//! The entry point is [`PlantInterpreter`]. Configure it with a
//! [`TurtleConfig`], then call [`PlantInterpreter::interpret`] with a
//! sequence and a sink, or [`PlantInterpreter::build_blueprint`] to collect
//! the commands into a [`PlantBlueprint`].
//!
//! The interpreter holds no state between calls: the cursor and the branch
//! stack live on the call's own frame, so one interpreter may serve any
//! number of concurrent interpretations. Re-interpreting a growing prefix of
//! one fixed sequence (grow-over-time playback) is therefore just a loop of
//! independent calls.

use crate::blueprint::{GeometrySink, LeafMarker, PlantBlueprint, Segment};
use crate::grammar::DEFAULT_ANGLE_DEG;
use crate::symbol::{Letter, Symbol};
use crate::turtle::TurtleState;

/// Values at or below this are treated as degenerate and floored.
const DEGENERATE_EPS: f32 = 1e-3;

/// Configuration for sequence interpretation.
#[derive(Clone, Debug)]
pub struct TurtleConfig {
    /// Turning angle in degrees used when a caller passes a non-positive one.
    pub default_angle: f32,
    /// Substituted segment length when a symbol carries a degenerate one.
    pub min_length: f32,
    /// Substituted segment radius when a symbol carries a degenerate one.
    pub min_radius: f32,
    /// Maximum depth of the branch stack.
    pub max_stack_depth: usize,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            default_angle: DEFAULT_ANGLE_DEG,
            min_length: 0.1,
            min_radius: 0.01,
            max_stack_depth: 1024,
        }
    }
}

/// Walks a symbol sequence and emits world-space draw commands.
#[derive(Clone, Debug, Default)]
pub struct PlantInterpreter {
    config: TurtleConfig,
}

impl PlantInterpreter {
    pub fn new(config: TurtleConfig) -> Self {
        Self { config }
    }

    /// Interprets `symbols` in order, emitting one draw command per drawing
    /// symbol into `sink`.
    ///
    /// The sink's prior output is discarded first (`sink.clear()`), so each
    /// call produces a complete, self-contained interpretation; emission
    /// order equals symbol order, a contract consumers may rely on to
    /// correlate a leaf with the segment emitted just before it.
    ///
    /// # Transition rules
    ///
    /// The cursor starts at the origin pointing straight up (+Y).
    ///
    /// - `Forward` emits a [`Segment`] from the cursor along its heading and
    ///   advances to the segment's end. Degenerate lengths or radii (at or
    ///   below `1e-3`) are floored to the configured minimums instead of
    ///   producing zero-size geometry.
    /// - `Leaf` emits a [`LeafMarker`] at the cursor without moving it; a
    ///   non-positive size parameter falls back to 1.
    /// - `+` / `-` yaw about the cursor's vertical axis, `&` / `^` pitch
    ///   about its lateral axis, all by the turning angle.
    /// - `[` saves the full cursor onto the branch stack, `]` restores the
    ///   most recent save. A `]` on an empty stack is a no-op, never a
    ///   failure: generated sequences always balance their brackets, but
    ///   hand-authored ones are not required to.
    ///
    /// `turn_angle_deg` is used when positive; otherwise the configured
    /// default applies (and a broken default falls back to
    /// [`DEFAULT_ANGLE_DEG`]).
    pub fn interpret<S: GeometrySink>(&self, symbols: &[Symbol], turn_angle_deg: f32, sink: &mut S) {
        sink.clear();

        let mut angle_deg = if turn_angle_deg > 0.0 {
            turn_angle_deg
        } else {
            self.config.default_angle
        };
        if !(angle_deg > 0.0) {
            angle_deg = DEFAULT_ANGLE_DEG;
        }
        let angle = angle_deg.to_radians();

        let mut turtle = TurtleState::default();
        let mut stack: Vec<TurtleState> = Vec::new();
        // Pushes refused at the depth cap; their matching pops must be
        // swallowed too, or every later restore pairs with the wrong frame.
        let mut refused: usize = 0;

        let mut segments: usize = 0;
        let mut leaves: usize = 0;

        for symbol in symbols {
            match symbol.letter {
                Letter::Forward => {
                    let length = if symbol.length <= DEGENERATE_EPS {
                        self.config.min_length
                    } else {
                        symbol.length
                    };
                    let radius = if symbol.radius <= DEGENERATE_EPS {
                        self.config.min_radius
                    } else {
                        symbol.radius
                    };
                    let start = turtle.position;
                    let end = start + turtle.up() * length;
                    sink.emit_segment(Segment {
                        start,
                        end,
                        radius,
                        age: symbol.age,
                    });
                    segments += 1;
                    turtle.position = end;
                    turtle.radius = radius;
                    turtle.age = symbol.age;
                }
                Letter::Leaf => {
                    let size = if symbol.length > 0.0 { symbol.length } else { 1.0 };
                    sink.emit_leaf(LeafMarker {
                        position: turtle.position,
                        orientation: turtle.rotation,
                        size,
                        age: symbol.age,
                    });
                    leaves += 1;
                }
                Letter::YawLeft => turtle.rotate_local_y(angle),
                Letter::YawRight => turtle.rotate_local_y(-angle),
                Letter::PitchDown => turtle.rotate_local_x(angle),
                Letter::PitchUp => turtle.rotate_local_x(-angle),
                Letter::PushState => {
                    if stack.len() < self.config.max_stack_depth {
                        stack.push(turtle);
                    } else {
                        refused += 1;
                    }
                }
                Letter::PopState => {
                    if refused > 0 {
                        refused -= 1;
                    } else if let Some(saved) = stack.pop() {
                        turtle = saved;
                    }
                }
            }
        }

        tracing::trace!(
            "interpreted {} symbols: {} segments, {} leaves",
            symbols.len(),
            segments,
            leaves
        );
    }

    /// Interprets `symbols` into a fresh [`PlantBlueprint`].
    pub fn build_blueprint(&self, symbols: &[Symbol], turn_angle_deg: f32) -> PlantBlueprint {
        let mut blueprint = PlantBlueprint::new();
        self.interpret(symbols, turn_angle_deg, &mut blueprint);
        blueprint
    }
}
