//! Recorded hand tracking results.
//!
//! Recordings are JSON files containing a list of frames:
//!
//! ```json
//! [
//!   {
//!     "hands": [
//!       {
//!         "handedness": "Left",
//!         "score": 0.97,
//!         "landmarks": [[0.51, 0.82, 0.0], ...],
//!         "world_landmarks": [[0.01, -0.07, 0.02], ...]
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! `score` defaults to 1.0 and `world_landmarks` may be omitted.

use std::{fs, path::Path, sync::Arc};

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::hand::{FrameResult, HandDetection, Handedness, NUM_LANDMARKS};
use crate::image::Image;
use crate::landmark::{NormalizedLandmark, WorldLandmark};

/// A sequence of recorded per-frame results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recording {
    frames: Vec<RecordedFrame>,
}

/// The hands recorded for a single frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub hands: Vec<RecordedHand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedHand {
    pub handedness: String,
    #[serde(default = "default_score")]
    pub score: f32,
    pub landmarks: Vec<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_landmarks: Option<Vec<[f32; 3]>>,
}

fn default_score() -> f32 {
    1.0
}

impl Recording {
    /// Loads a recording from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read recording '{}'", path.display()))?;
        Self::from_json(&json).with_context(|| format!("invalid recording '{}'", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn new(frames: Vec<RecordedFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl RecordedFrame {
    /// Turns the recorded hands into a [`FrameResult`] for `image`.
    ///
    /// Fails if a hand doesn't have exactly [`NUM_LANDMARKS`] finite landmarks.
    pub fn to_result(&self, image: Arc<Image>) -> anyhow::Result<FrameResult> {
        let hands = self
            .hands
            .iter()
            .enumerate()
            .map(|(i, hand)| hand.to_detection().with_context(|| format!("hand #{i}")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(FrameResult::new(image, hands))
    }
}

impl RecordedHand {
    fn to_detection(&self) -> anyhow::Result<HandDetection> {
        check_landmarks(&self.landmarks)?;
        let landmarks = self
            .landmarks
            .iter()
            .map(|&[x, y, z]| NormalizedLandmark::new(x, y, z))
            .collect();

        let mut detection = HandDetection::new(landmarks, Handedness::from_label(&self.handedness))
            .with_score(self.score);
        if let Some(world) = &self.world_landmarks {
            check_landmarks(world).context("world landmarks")?;
            detection = detection.with_world_landmarks(
                world
                    .iter()
                    .map(|&[x, y, z]| WorldLandmark::new(x, y, z))
                    .collect(),
            );
        }
        Ok(detection)
    }
}

fn check_landmarks(landmarks: &[[f32; 3]]) -> anyhow::Result<()> {
    ensure!(
        landmarks.len() == NUM_LANDMARKS,
        "expected {} landmarks, got {}",
        NUM_LANDMARKS,
        landmarks.len()
    );
    ensure!(
        landmarks.iter().flatten().all(|c| c.is_finite()),
        "landmark coordinates must be finite"
    );
    Ok(())
}
