use std::{fs, path::PathBuf};

use handsview::camera::{CameraFacing, DirectorySource};
use handsview::image::{Color, Image};
use handsview::pipeline::{HandsPipeline, InputSource};
use handsview::record::Recording;
use handsview::solution::{ReplaySolution, SolutionOptions};
use handsview::surface::{FileSurface, MemorySurface};
use handsview::view::HandsResultView;

const LEFT_MARKER: Color = Color::from_rgb8(0xFF, 0x30, 0x30);
const RIGHT_MARKER: Color = Color::from_rgb8(0x30, 0xFF, 0x30);

struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("handsview-{name}-{}", std::process::id()));
        fs::create_dir_all(&path).unwrap();
        Self(path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.0).ok();
    }
}

/// A recording whose only hand is all landmarks stacked at `(x, 0.5)`.
fn recording(handedness: &str, x: f32) -> Recording {
    let landmarks = vec![format!("[{x}, 0.5, 0.0]"); 21].join(", ");
    Recording::from_json(&format!(
        r#"[{{ "hands": [{{ "handedness": "{handedness}", "landmarks": [{landmarks}] }}] }}]"#
    ))
    .unwrap()
}

fn write_frames(dir: &TempDir, count: usize) {
    for i in 0..count {
        Image::new(100, 100)
            .save(dir.0.join(format!("frame{i:03}.png")))
            .unwrap();
    }
}

#[test]
fn replays_directory() {
    let dir = TempDir::new("replay");
    write_frames(&dir, 4);

    let source = DirectorySource::open(&dir.0).unwrap();
    let solution =
        ReplaySolution::new(recording("Right", 0.25), SolutionOptions::default()).unwrap();
    let mut pipeline =
        HandsPipeline::new(HandsResultView::default()).with_facing(CameraFacing::Front);
    pipeline
        .start_camera(Box::new(source), Box::new(solution))
        .unwrap();
    assert_eq!(pipeline.input_source(), InputSource::Camera);

    pipeline.wait_for_camera();
    pipeline.stop();

    let mut surface = MemorySurface::new();
    pipeline.present(&mut surface).unwrap();
    let image = surface.image().unwrap();
    assert_eq!(image.get(25, 50), RIGHT_MARKER);
    assert_eq!(image.get(75, 50), Color::NULL);
}

#[test]
fn presents_to_file() {
    let dir = TempDir::new("present");
    write_frames(&dir, 2);
    let out = dir.0.join("out.jpg");

    let source = DirectorySource::open(&dir.0).unwrap();
    let solution = ReplaySolution::new(
        recording("Left", 0.5),
        SolutionOptions::default().max_num_hands(1),
    )
    .unwrap();
    let mut pipeline = HandsPipeline::new(HandsResultView::default());
    pipeline
        .start_camera(Box::new(source), Box::new(solution))
        .unwrap();
    pipeline.wait_for_camera();
    pipeline.stop();

    let mut surface = FileSurface::new(&out);
    pipeline.present(&mut surface).unwrap();
    assert_eq!(surface.presented(), 1);

    let written = Image::load(&out).unwrap();
    assert_eq!(written.width(), 100);
    // JPEG is lossy, so only check that the marker color roughly survived.
    let center = written.get(50, 50);
    for (got, expected) in [
        (center.r(), LEFT_MARKER.r()),
        (center.g(), LEFT_MARKER.g()),
        (center.b(), LEFT_MARKER.b()),
    ] {
        assert!(got.abs_diff(expected) < 24, "{center:?}");
    }
}
