use bevy_math::primitives::Cylinder;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Half-width of the leaf outline at `size == 1.0`, in world units.
pub const DEFAULT_LEAF_WIDTH: f32 = 0.08;
/// Base-to-tip length of the leaf outline at `size == 1.0`, in world units.
pub const DEFAULT_LEAF_LENGTH: f32 = 0.16;

/// One drawn branch section: a straight run of stem between two points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
    /// Stem radius at emission time, after the degenerate floor was applied.
    pub radius: f32,
    /// Age of the symbol that produced this segment.
    pub age: u32,
}

impl Segment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Unit vector from `start` to `end`. Interpreter output never contains
    /// zero-length segments, but a hand-built one falls back to vertical.
    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).try_normalize().unwrap_or(Vec3::Y)
    }

    /// Renderable form of the segment: a cylinder primitive plus the world
    /// transform that places it. The cylinder is authored along local Y, so
    /// the rotation maps Y onto the segment direction and the translation is
    /// the segment midpoint.
    pub fn primitive(&self) -> (Cylinder, (Vec3, Quat)) {
        let cylinder = Cylinder::new(self.radius, self.length());
        let center = (self.start + self.end) * 0.5;
        let rotation = Quat::from_rotation_arc(Vec3::Y, self.direction());
        (cylinder, (center, rotation))
    }
}

/// Placement of one leaf: where it sits and which way its blade faces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeafMarker {
    pub position: Vec3,
    /// Cursor rotation at emission time. The blade extends in this frame,
    /// rolled a quarter turn so it lies flat against the stem.
    pub orientation: Quat,
    /// Scale multiplier applied to the outline dimensions.
    pub size: f32,
    /// Age of the symbol that produced this leaf.
    pub age: u32,
}

impl LeafMarker {
    /// Six-point blade outline in world space, wound base to tip and back.
    /// `base_width` and `base_length` are the size-1 dimensions; pass
    /// [`DEFAULT_LEAF_WIDTH`] and [`DEFAULT_LEAF_LENGTH`] for the stock shape.
    pub fn outline(&self, base_width: f32, base_length: f32) -> [Vec3; 6] {
        let width = base_width * self.size;
        let length = base_length * self.size;
        let rotation = self.orientation * Quat::from_rotation_z(FRAC_PI_2);
        let local = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-width, 0.0, length * 0.35),
            Vec3::new(-width * 0.6, 0.0, length * 0.8),
            Vec3::new(0.0, 0.0, length),
            Vec3::new(width * 0.6, 0.0, length * 0.8),
            Vec3::new(width, 0.0, length * 0.35),
        ];
        local.map(|point| self.position + rotation * point)
    }
}

/// A single renderable instruction produced by interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Segment(Segment),
    Leaf(LeafMarker),
}

/// Receiver for interpreter output. Commands arrive in emission order;
/// `clear` discards anything captured so far, so one sink can be reused
/// across re-interpretations without stale geometry surviving.
pub trait GeometrySink {
    fn clear(&mut self);
    fn emit_segment(&mut self, segment: Segment);
    fn emit_leaf(&mut self, leaf: LeafMarker);
}

/// Ordered draw-command list for one interpreted plant.
///
/// This is the "phenotype" handed to a renderer: a flat sequence a mesher
/// can walk front to back without knowing anything about the grammar that
/// produced it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlantBlueprint {
    commands: Vec<DrawCommand>,
}

impl PlantBlueprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in emission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Segment(segment) => Some(segment),
            DrawCommand::Leaf(_) => None,
        })
    }

    pub fn leaves(&self) -> impl Iterator<Item = &LeafMarker> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Leaf(leaf) => Some(leaf),
            DrawCommand::Segment(_) => None,
        })
    }

    /// Axis-aligned bounds of the drawn plant, or `None` when empty.
    /// Segment endpoints are inflated by their radius; leaves count as
    /// points at their anchor.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.commands.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for command in &self.commands {
            match command {
                DrawCommand::Segment(segment) => {
                    let pad = Vec3::splat(segment.radius);
                    min = min.min(segment.start - pad).min(segment.end - pad);
                    max = max.max(segment.start + pad).max(segment.end + pad);
                }
                DrawCommand::Leaf(leaf) => {
                    min = min.min(leaf.position);
                    max = max.max(leaf.position);
                }
            }
        }
        Some((min, max))
    }
}

impl GeometrySink for PlantBlueprint {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn emit_segment(&mut self, segment: Segment) {
        self.commands.push(DrawCommand::Segment(segment));
    }

    fn emit_leaf(&mut self, leaf: LeafMarker) {
        self.commands.push(DrawCommand::Leaf(leaf));
    }
}
