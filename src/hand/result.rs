use std::sync::Arc;

use itertools::Itertools;

use crate::image::{Image, Resolution};
use crate::landmark::{Landmarks, NormalizedLandmark, WorldLandmark};

use super::{Handedness, LandmarkIdx};

/// A single hand detected in a frame.
#[derive(Debug, Clone)]
pub struct HandDetection {
    landmarks: Landmarks<NormalizedLandmark>,
    world_landmarks: Option<Landmarks<WorldLandmark>>,
    handedness: Handedness,
    score: f32,
}

impl HandDetection {
    pub fn new(landmarks: Landmarks<NormalizedLandmark>, handedness: Handedness) -> Self {
        Self {
            landmarks,
            world_landmarks: None,
            handedness,
            score: 1.0,
        }
    }

    pub fn with_world_landmarks(self, world_landmarks: Landmarks<WorldLandmark>) -> Self {
        Self {
            world_landmarks: Some(world_landmarks),
            ..self
        }
    }

    /// Sets the confidence score of the handedness classification.
    pub fn with_score(self, score: f32) -> Self {
        Self { score, ..self }
    }

    #[inline]
    pub fn landmarks(&self) -> &Landmarks<NormalizedLandmark> {
        &self.landmarks
    }

    #[inline]
    pub fn world_landmarks(&self) -> Option<&Landmarks<WorldLandmark>> {
        self.world_landmarks.as_ref()
    }

    #[inline]
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    #[inline]
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Returns a named landmark.
    ///
    /// # Panics
    ///
    /// This will panic if the hand has fewer landmarks than the full hand topology.
    pub fn landmark(&self, idx: LandmarkIdx) -> &NormalizedLandmark {
        self.landmarks.get(idx as usize)
    }
}

/// The tracking output for one camera frame: the input image and every hand detected in it.
#[derive(Debug, Clone)]
pub struct FrameResult {
    image: Arc<Image>,
    hands: Vec<HandDetection>,
}

impl FrameResult {
    pub fn new(image: Arc<Image>, hands: Vec<HandDetection>) -> Self {
        Self { image, hands }
    }

    /// Assembles a result from parallel lists of landmark sets and handedness labels.
    ///
    /// The i-th landmark set belongs to the i-th handedness label.
    ///
    /// # Panics
    ///
    /// This will panic if `landmarks` and `handedness` have different lengths.
    pub fn from_parts(
        image: Arc<Image>,
        landmarks: Vec<Landmarks<NormalizedLandmark>>,
        handedness: Vec<Handedness>,
    ) -> Self {
        let hands = landmarks
            .into_iter()
            .zip_eq(handedness)
            .map(|(landmarks, handedness)| HandDetection::new(landmarks, handedness))
            .collect();
        Self { image, hands }
    }

    /// Returns the image the hands were detected in.
    #[inline]
    pub fn image(&self) -> &Arc<Image> {
        &self.image
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.image.resolution()
    }

    #[inline]
    pub fn hands(&self) -> &[HandDetection] {
        &self.hands
    }
}
