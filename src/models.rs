//! 3D models that can be placed in the scene, cycled through one at a time.

use anyhow::ensure;

/// How a model gets anchored in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    Disabled,
    PlaneHorizontal,
    PlaneVertical,
    PlaneHorizontalAndVertical,
    /// Use the best placement the platform supports.
    BestAvailable,
    /// Place the model immediately, without waiting for a plane.
    Instant,
}

/// Describes a 3D model asset and how to place it.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    file_location: String,
    scale_units: Option<f32>,
    placement_mode: PlacementMode,
    apply_pose_rotation: bool,
}

impl Model {
    /// Creates a model descriptor for the asset at `file_location`.
    ///
    /// The model is placed with [`PlacementMode::BestAvailable`], at its native scale, with pose
    /// rotation applied.
    pub fn new<S: Into<String>>(file_location: S) -> Self {
        Self {
            file_location: file_location.into(),
            scale_units: None,
            placement_mode: PlacementMode::BestAvailable,
            apply_pose_rotation: true,
        }
    }

    /// Scales the model so that it is `units` large.
    pub fn with_scale_units(self, units: f32) -> Self {
        Self {
            scale_units: Some(units),
            ..self
        }
    }

    pub fn with_placement_mode(self, placement_mode: PlacementMode) -> Self {
        Self {
            placement_mode,
            ..self
        }
    }

    pub fn with_pose_rotation(self, apply_pose_rotation: bool) -> Self {
        Self {
            apply_pose_rotation,
            ..self
        }
    }

    pub fn file_location(&self) -> &str {
        &self.file_location
    }

    pub fn scale_units(&self) -> Option<f32> {
        self.scale_units
    }

    pub fn placement_mode(&self) -> PlacementMode {
        self.placement_mode
    }

    pub fn apply_pose_rotation(&self) -> bool {
        self.apply_pose_rotation
    }
}

/// Cycles through a fixed, non-empty list of [`Model`]s.
#[derive(Debug, Clone)]
pub struct ModelCarousel {
    models: Vec<Model>,
    next: usize,
}

impl ModelCarousel {
    pub fn new(models: Vec<Model>) -> anyhow::Result<Self> {
        ensure!(!models.is_empty(), "model carousel needs at least one model");
        Ok(Self { models, next: 0 })
    }

    /// Returns the current model and advances to the next one, wrapping around at the end.
    pub fn next_model(&mut self) -> &Model {
        let model = &self.models[self.next];
        self.next = (self.next + 1) % self.models.len();
        model
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }
}

/// Contains only the bundled `models/UPLOGO.glb`.
impl Default for ModelCarousel {
    fn default() -> Self {
        Self {
            models: vec![Model::new("models/UPLOGO.glb")],
            next: 0,
        }
    }
}
