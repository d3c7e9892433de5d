//! The interface to the hand tracking solution.
//!
//! Hand landmark inference is done by an external solution that is treated as a black box: it
//! accepts camera frames via [`HandsSolution::send`] and reports results and errors through
//! listener callbacks. [`ReplaySolution`] implements the interface by replaying a [`Recording`].

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use anyhow::ensure;
use pawawwewism::Worker;

use crate::hand::FrameResult;
use crate::image::Image;
use crate::record::Recording;

/// Receives the tracking result of every processed frame.
pub type ResultListener = Box<dyn FnMut(FrameResult) + Send>;

/// Receives errors reported by the solution.
pub type ErrorListener = Box<dyn FnMut(&SolutionError) + Send>;

/// Configuration for a [`HandsSolution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionOptions {
    pub max_num_hands: usize,
    pub min_detection_confidence: f32,
}

impl Default for SolutionOptions {
    fn default() -> Self {
        Self {
            max_num_hands: 2,
            min_detection_confidence: 0.5,
        }
    }
}

impl SolutionOptions {
    /// Sets the maximum number of hands reported per frame.
    ///
    /// By default, up to 2 hands are reported.
    pub fn max_num_hands(self, max_num_hands: usize) -> Self {
        Self {
            max_num_hands,
            ..self
        }
    }

    /// Sets the minimum confidence score for a hand to be reported.
    ///
    /// The default is 0.5.
    pub fn min_detection_confidence(self, confidence: f32) -> Self {
        Self {
            min_detection_confidence: confidence,
            ..self
        }
    }
}

/// An error reported by the hand tracking solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionError {
    message: String,
}

impl SolutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SolutionError {}

/// A hand tracking solution that processes frames and reports results via callbacks.
///
/// Listeners may be invoked on a thread owned by the solution.
pub trait HandsSolution: Send {
    fn options(&self) -> &SolutionOptions;

    /// Submits a frame for processing.
    ///
    /// Sending a frame to a closed solution does nothing.
    fn send(&mut self, frame: Arc<Image>);

    fn set_result_listener(&mut self, listener: ResultListener);

    fn set_error_listener(&mut self, listener: ErrorListener);

    /// Shuts the solution down. Frames that were already accepted are still processed.
    fn close(&mut self);

    fn is_closed(&self) -> bool;
}

#[derive(Default)]
struct Listeners {
    result: Option<ResultListener>,
    error: Option<ErrorListener>,
}

/// A [`HandsSolution`] that replays recorded results instead of running inference.
///
/// Every sent frame is paired with the next frame of the recording, starting over once the
/// recording is exhausted. Results are delivered on a dedicated worker thread.
pub struct ReplaySolution {
    options: SolutionOptions,
    listeners: Arc<Mutex<Listeners>>,
    worker: Option<Worker<Arc<Image>>>,
}

impl ReplaySolution {
    pub fn new(recording: Recording, options: SolutionOptions) -> anyhow::Result<Self> {
        ensure!(!recording.is_empty(), "cannot replay an empty recording");

        log::debug!(
            "replaying {} recorded frames (max. {} hands, min. confidence {})",
            recording.len(),
            options.max_num_hands,
            options.min_detection_confidence,
        );

        let listeners = Arc::new(Mutex::new(Listeners::default()));
        let mut next = 0;
        let worker = Worker::builder().name("hands replay").spawn({
            let listeners = listeners.clone();
            move |image: Arc<Image>| {
                let recorded = &recording.frames()[next];
                next = (next + 1) % recording.len();

                let mut listeners = listeners.lock().unwrap();
                match recorded.to_result(image) {
                    Ok(result) => {
                        let result = filter_hands(result, &options);
                        if let Some(listener) = &mut listeners.result {
                            listener(result);
                        }
                    }
                    Err(e) => {
                        let error = SolutionError::new(format!("{e:#}"));
                        if let Some(listener) = &mut listeners.error {
                            listener(&error);
                        }
                    }
                }
            }
        })?;

        Ok(Self {
            options,
            listeners,
            worker: Some(worker),
        })
    }
}

/// Drops hands below the confidence threshold and limits the number of hands.
fn filter_hands(result: FrameResult, options: &SolutionOptions) -> FrameResult {
    let hands = result
        .hands()
        .iter()
        .filter(|hand| hand.score() >= options.min_detection_confidence)
        .take(options.max_num_hands)
        .cloned()
        .collect();
    FrameResult::new(result.image().clone(), hands)
}

impl HandsSolution for ReplaySolution {
    fn options(&self) -> &SolutionOptions {
        &self.options
    }

    fn send(&mut self, frame: Arc<Image>) {
        match &mut self.worker {
            Some(worker) => worker.send(frame),
            None => log::warn!("dropping frame sent to closed hands solution"),
        }
    }

    fn set_result_listener(&mut self, listener: ResultListener) {
        self.listeners.lock().unwrap().result = Some(listener);
    }

    fn set_error_listener(&mut self, listener: ErrorListener) {
        self.listeners.lock().unwrap().error = Some(listener);
    }

    fn close(&mut self) {
        // Dropping the worker waits for it to finish the frame it's working on.
        if self.worker.take().is_some() {
            log::debug!("hands replay closed");
        }
    }

    fn is_closed(&self) -> bool {
        self.worker.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::hand::Handedness;
    use crate::record::{RecordedFrame, RecordedHand};

    fn recorded_hand(handedness: &str, score: f32) -> RecordedHand {
        RecordedHand {
            handedness: handedness.into(),
            score,
            landmarks: vec![[0.5, 0.5, 0.0]; 21],
            world_landmarks: None,
        }
    }

    fn recording() -> Recording {
        Recording::new(vec![
            RecordedFrame { hands: Vec::new() },
            RecordedFrame {
                hands: vec![
                    recorded_hand("Left", 0.9),
                    recorded_hand("Right", 0.2),
                    recorded_hand("Right", 0.8),
                ],
            },
        ])
    }

    #[test]
    fn replays_in_order() {
        let mut solution = ReplaySolution::new(recording(), SolutionOptions::default()).unwrap();
        let (sender, recv) = mpsc::channel();
        solution.set_result_listener(Box::new(move |result: FrameResult| {
            sender.send(result).unwrap();
        }));

        for _ in 0..3 {
            solution.send(Arc::new(Image::new(8, 8)));
        }
        solution.close();
        assert!(solution.is_closed());

        let results = recv.try_iter().collect::<Vec<_>>();
        assert_eq!(results.len(), 3);
        assert!(results[0].hands().is_empty());
        // Low-confidence hand is dropped.
        let hands = results[1].hands();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].handedness(), Handedness::Left);
        assert_eq!(hands[1].handedness(), Handedness::Right);
        assert_eq!(hands[1].score(), 0.8);
        // Starts over.
        assert!(results[2].hands().is_empty());
    }

    #[test]
    fn max_num_hands() {
        let options = SolutionOptions::default()
            .max_num_hands(1)
            .min_detection_confidence(0.0);
        let mut solution = ReplaySolution::new(recording(), options).unwrap();
        let (sender, recv) = mpsc::channel();
        solution.set_result_listener(Box::new(move |result: FrameResult| {
            sender.send(result.hands().len()).unwrap();
        }));

        solution.send(Arc::new(Image::new(8, 8)));
        solution.send(Arc::new(Image::new(8, 8)));
        solution.close();

        assert_eq!(recv.try_iter().collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn reports_errors() {
        let broken = Recording::new(vec![RecordedFrame {
            hands: vec![RecordedHand {
                landmarks: vec![[0.5, 0.5, 0.0]; 3],
                ..recorded_hand("Left", 1.0)
            }],
        }]);
        let mut solution = ReplaySolution::new(broken, SolutionOptions::default()).unwrap();
        let (sender, recv) = mpsc::channel();
        solution.set_error_listener(Box::new(move |error: &SolutionError| {
            sender.send(error.clone()).unwrap();
        }));
        solution.set_result_listener(Box::new(|_: FrameResult| panic!("unexpected result")));

        solution.send(Arc::new(Image::new(8, 8)));
        solution.close();

        let errors = recv.try_iter().collect::<Vec<_>>();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message().contains("expected 21 landmarks"));
    }

    #[test]
    fn send_after_close() {
        let mut solution = ReplaySolution::new(recording(), SolutionOptions::default()).unwrap();
        solution.close();
        solution.send(Arc::new(Image::new(8, 8)));
        assert!(solution.is_closed());
    }

    #[test]
    fn empty_recording() {
        let solution = ReplaySolution::new(Recording::new(Vec::new()), SolutionOptions::default());
        assert!(solution.is_err());
    }
}
