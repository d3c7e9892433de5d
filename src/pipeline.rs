//! Wires camera frames through the hand tracking solution into the result view.
//!
//! ```text
//! CameraInput ──frame──▶ HandsSolution ──FrameResult──▶ HandsResultView ──present──▶ Surface
//! ```
//!
//! Frames flow on the camera's capture thread into the solution. Results are rendered on the
//! thread the solution invokes its listener on, and presented from whichever thread owns the
//! surface.

use std::sync::{Arc, Mutex};

use crate::camera::{CameraFacing, CameraInput, FrameSource};
use crate::hand::{FrameResult, LandmarkIdx};
use crate::image::Image;
use crate::solution::{HandsSolution, SolutionError};
use crate::surface::Surface;
use crate::timer::{FpsCounter, Timer};
use crate::view::HandsResultView;

/// Where the pipeline currently gets its frames from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Nothing is running.
    Unknown,
    Camera,
}

type SharedSolution = Arc<Mutex<Box<dyn HandsSolution>>>;

/// Owns the running camera input and hand tracking solution.
pub struct HandsPipeline {
    input_source: InputSource,
    facing: CameraFacing,
    show_pixel_values: bool,
    view: Arc<HandsResultView>,
    solution: Option<SharedSolution>,
    camera: Option<CameraInput>,
}

impl HandsPipeline {
    pub fn new(view: HandsResultView) -> Self {
        Self {
            input_source: InputSource::Unknown,
            facing: CameraFacing::Front,
            show_pixel_values: false,
            view: Arc::new(view),
            solution: None,
            camera: None,
        }
    }

    /// Sets which way the camera faces. Takes effect the next time the camera is started.
    ///
    /// By default, the front camera is assumed.
    pub fn with_facing(mut self, facing: CameraFacing) -> Self {
        self.facing = facing;
        self
    }

    /// Log wrist positions in pixels instead of normalized coordinates.
    pub fn with_pixel_values(mut self, show_pixel_values: bool) -> Self {
        self.show_pixel_values = show_pixel_values;
        self
    }

    pub fn input_source(&self) -> InputSource {
        self.input_source
    }

    pub fn view(&self) -> &Arc<HandsResultView> {
        &self.view
    }

    /// Returns whether the camera input is still delivering frames.
    pub fn is_camera_running(&self) -> bool {
        self.camera.as_ref().map_or(false, |camera| camera.is_running())
    }

    /// Starts tracking hands in frames from `source` using `solution`.
    ///
    /// Does nothing if the camera pipeline is already running. Any other running pipeline is
    /// stopped first.
    pub fn start_camera(
        &mut self,
        source: Box<dyn FrameSource>,
        mut solution: Box<dyn HandsSolution>,
    ) -> anyhow::Result<()> {
        if self.input_source == InputSource::Camera {
            log::debug!("camera pipeline is already running");
            return Ok(());
        }
        self.stop();

        solution.set_error_listener(Box::new(|error: &SolutionError| {
            log::error!("hands solution error: {}", error.message());
        }));

        let view = self.view.clone();
        let show_pixel_values = self.show_pixel_values;
        let mut render_timer = Timer::new("render");
        let mut fps = FpsCounter::new("hands pipeline");
        solution.set_result_listener(Box::new(move |result: FrameResult| {
            log_wrist_landmark(&result, show_pixel_values);
            render_timer.time(|| view.set_result(Some(&result)));
            fps.tick_with([&render_timer]);
        }));

        log::debug!(
            "starting camera pipeline (max. {} hands)",
            solution.options().max_num_hands
        );
        self.solution = Some(Arc::new(Mutex::new(solution)));
        if let Err(e) = self.open_camera(source) {
            self.stop();
            return Err(e);
        }
        self.input_source = InputSource::Camera;
        Ok(())
    }

    fn open_camera(&mut self, source: Box<dyn FrameSource>) -> anyhow::Result<()> {
        let Some(solution) = self.solution.clone() else {
            anyhow::bail!("no hands solution to send frames to");
        };

        let mut camera = CameraInput::new(source);
        camera.set_new_frame_listener(Some(Box::new(move |frame: Arc<Image>| {
            solution.lock().unwrap().send(frame);
        })));
        camera.start(self.facing)?;
        self.camera = Some(camera);
        Ok(())
    }

    /// Stops the camera input, keeping the solution alive.
    pub fn pause(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            camera.close();
            log::debug!("camera pipeline paused");
        }
    }

    /// Restarts the camera input with frames from `source` after [`HandsPipeline::pause`].
    ///
    /// Fails if the camera pipeline isn't running. Does nothing if the camera was not paused.
    pub fn resume(&mut self, source: Box<dyn FrameSource>) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.input_source == InputSource::Camera,
            "cannot resume: camera pipeline is not running"
        );
        if self.camera.is_some() {
            return Ok(());
        }

        log::debug!("camera pipeline resumed");
        self.open_camera(source)
    }

    /// Stops the camera input and closes the solution.
    ///
    /// Frames that the solution has already accepted are still rendered into the view.
    pub fn stop(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            camera.set_new_frame_listener(None);
            camera.close();
        }
        if let Some(solution) = self.solution.take() {
            solution.lock().unwrap().close();
        }
        if self.input_source != InputSource::Unknown {
            log::debug!("{:?} pipeline stopped", self.input_source);
            self.input_source = InputSource::Unknown;
        }
    }

    /// Blocks until the camera input has delivered all of its frames.
    pub fn wait_for_camera(&mut self) {
        if let Some(camera) = &mut self.camera {
            camera.wait();
        }
    }

    /// Shows the latest annotated frame on `surface`.
    pub fn present<S: Surface + ?Sized>(&self, surface: &mut S) -> anyhow::Result<()> {
        self.view.present(surface)
    }
}

impl Drop for HandsPipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Logs the wrist position of the first hand in `result`.
///
/// The position is logged in pixels of the input image if `show_pixel_values` is set, and in
/// normalized coordinates otherwise. World coordinates are logged too, if available.
pub fn log_wrist_landmark(result: &FrameResult, show_pixel_values: bool) {
    for msg in wrist_messages(result, show_pixel_values) {
        log::info!("{msg}");
    }
}

fn wrist_messages(result: &FrameResult, show_pixel_values: bool) -> Vec<String> {
    let Some(hand) = result.hands().first() else {
        return Vec::new();
    };

    let wrist = hand.landmark(LandmarkIdx::Wrist);
    let mut messages = vec![if show_pixel_values {
        let pos = wrist.to_pixel(result.resolution());
        format!("wrist at x={:.1}px, y={:.1}px", pos.x, pos.y)
    } else {
        format!("wrist at x={:.4}, y={:.4} (normalized)", wrist.x(), wrist.y())
    }];

    if let Some(world) = hand.world_landmarks() {
        let pos = world[LandmarkIdx::Wrist as usize].position();
        messages.push(format!(
            "wrist at x={:.4}m, y={:.4}m, z={:.4}m (world)",
            pos.x, pos.y, pos.z
        ));
    }
    messages
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::hand::Handedness;
    use crate::image::Color;
    use crate::record::{RecordedFrame, RecordedHand, Recording};
    use crate::solution::{ReplaySolution, SolutionOptions};
    use crate::surface::MemorySurface;
    use crate::test::{frame, full_hand, hand, solid_image};

    struct Frames(VecDeque<Image>);

    impl FrameSource for Frames {
        fn read(&mut self) -> anyhow::Result<Option<Image>> {
            Ok(self.0.pop_front())
        }
    }

    fn frames(n: usize) -> Box<Frames> {
        Box::new(Frames(
            (0..n).map(|_| solid_image(64, 64, Color::BLACK)).collect(),
        ))
    }

    fn solution() -> Box<ReplaySolution> {
        let hand = RecordedHand {
            handedness: "Left".into(),
            score: 1.0,
            landmarks: vec![[0.5, 0.5, 0.0]; 21],
            world_landmarks: None,
        };
        let recording = Recording::new(vec![RecordedFrame { hands: vec![hand] }]);
        Box::new(ReplaySolution::new(recording, SolutionOptions::default()).unwrap())
    }

    #[test]
    fn runs_to_completion() {
        let mut pipeline =
            HandsPipeline::new(HandsResultView::default()).with_facing(CameraFacing::Back);
        assert_eq!(pipeline.input_source(), InputSource::Unknown);

        pipeline.start_camera(frames(3), solution()).unwrap();
        assert_eq!(pipeline.input_source(), InputSource::Camera);
        pipeline.wait_for_camera();
        pipeline.stop();
        assert_eq!(pipeline.input_source(), InputSource::Unknown);

        let mut surface = MemorySurface::new();
        pipeline.present(&mut surface).unwrap();
        assert_eq!(surface.presented(), 1);
        let image = surface.image().unwrap();
        // Left-hand marker at the image center.
        assert_eq!(image.get(32, 32), Color::from_rgb8(0xFF, 0x30, 0x30));
    }

    #[test]
    fn start_twice_is_noop() {
        let mut pipeline = HandsPipeline::new(HandsResultView::default());
        pipeline.start_camera(frames(1), solution()).unwrap();
        pipeline.start_camera(frames(1), solution()).unwrap();
        assert_eq!(pipeline.input_source(), InputSource::Camera);
    }

    #[test]
    fn pause_and_resume() {
        let mut pipeline = HandsPipeline::new(HandsResultView::default());
        pipeline.resume(frames(1)).unwrap_err();

        pipeline.start_camera(frames(1), solution()).unwrap();
        pipeline.pause();
        assert!(!pipeline.is_camera_running());
        assert_eq!(pipeline.input_source(), InputSource::Camera);

        pipeline.resume(frames(2)).unwrap();
        pipeline.wait_for_camera();
        pipeline.stop();
        assert!(pipeline.view().latest().is_some());
    }

    #[test]
    fn failed_camera_start_resets_pipeline() {
        struct Unplugged;

        impl FrameSource for Unplugged {
            fn prepare(&mut self) -> anyhow::Result<()> {
                anyhow::bail!("no such device")
            }

            fn read(&mut self) -> anyhow::Result<Option<Image>> {
                unreachable!()
            }
        }

        let mut pipeline = HandsPipeline::new(HandsResultView::default());
        pipeline
            .start_camera(Box::new(Unplugged), solution())
            .unwrap_err();
        assert_eq!(pipeline.input_source(), InputSource::Unknown);
        assert!(!pipeline.is_camera_running());

        // A later start is not skipped.
        pipeline.start_camera(frames(1), solution()).unwrap();
        assert_eq!(pipeline.input_source(), InputSource::Camera);
        pipeline.wait_for_camera();
        pipeline.stop();
        assert!(pipeline.view().latest().is_some());
    }

    #[test]
    fn wrist_messages_without_hands() {
        let empty = frame(Image::new(4, 4), Vec::new());
        assert!(wrist_messages(&empty, true).is_empty());
        assert!(wrist_messages(&empty, false).is_empty());
    }

    #[test]
    fn wrist_messages_with_world_landmarks() {
        // Wrist at (0.3, 0.85), world wrist at (0.0, -0.035, 0.0).
        let result = frame(Image::new(64, 48), vec![full_hand(Handedness::Right, 0.0)]);
        assert_eq!(
            wrist_messages(&result, true),
            [
                "wrist at x=19.2px, y=40.8px",
                "wrist at x=0.0000m, y=-0.0350m, z=0.0000m (world)",
            ]
        );
        assert_eq!(
            wrist_messages(&result, false),
            [
                "wrist at x=0.3000, y=0.8500 (normalized)",
                "wrist at x=0.0000m, y=-0.0350m, z=0.0000m (world)",
            ]
        );
    }

    #[test]
    fn wrist_messages_use_first_hand_only() {
        let result = frame(
            Image::new(64, 48),
            vec![
                hand(Handedness::Left, &[(0.5, 0.25); 21]),
                full_hand(Handedness::Right, 0.0),
            ],
        );
        assert_eq!(
            wrist_messages(&result, true),
            ["wrist at x=32.0px, y=12.0px"]
        );
        assert_eq!(
            wrist_messages(&result, false),
            ["wrist at x=0.5000, y=0.2500 (normalized)"]
        );
        log_wrist_landmark(&result, true);
    }
}
