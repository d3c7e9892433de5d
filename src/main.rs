use std::{path::PathBuf, sync::Arc, thread, time::Duration};

use anyhow::{ensure, Context};
use clap::{Parser, Subcommand};
use handsview::camera::{CameraFacing, DirectorySource};
use handsview::image::Image;
use handsview::models::ModelCarousel;
use handsview::overlay::OverlayRenderer;
use handsview::pipeline::HandsPipeline;
use handsview::record::Recording;
use handsview::solution::{ReplaySolution, SolutionOptions};
use handsview::surface::FileSurface;
use handsview::view::HandsResultView;

/// Draws recorded hand landmarks on top of camera frames.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Renders one recorded frame onto an image.
    Render {
        image: PathBuf,
        recording: PathBuf,
        /// Output image (PNG or JPEG).
        out: PathBuf,
        /// Index of the recorded frame to render.
        #[arg(long, default_value_t = 0)]
        frame: usize,
    },
    /// Runs the full pipeline over a directory of frames, replaying a recording.
    Replay {
        dir: PathBuf,
        recording: PathBuf,
        /// Output image, overwritten with every presented frame.
        out: PathBuf,
        #[arg(long, default_value_t = 1)]
        max_hands: usize,
        /// Treat the frames as coming from a front camera and mirror them.
        #[arg(long)]
        mirror: bool,
        /// Log wrist positions in pixels instead of normalized coordinates.
        #[arg(long)]
        pixel_values: bool,
    },
    /// Lists the model carousel in display order.
    Models,
}

fn main() -> anyhow::Result<()> {
    handsview::init_logger!();

    match Args::parse().command {
        Command::Render {
            image,
            recording,
            out,
            frame,
        } => render(image, recording, out, frame),
        Command::Replay {
            dir,
            recording,
            out,
            max_hands,
            mirror,
            pixel_values,
        } => {
            let facing = if mirror {
                CameraFacing::Front
            } else {
                CameraFacing::Back
            };
            let pipeline = HandsPipeline::new(HandsResultView::default())
                .with_facing(facing)
                .with_pixel_values(pixel_values);
            replay(pipeline, dir, recording, out, max_hands)
        }
        Command::Models => {
            let mut carousel = ModelCarousel::default();
            for i in 0..carousel.models().len() {
                let model = carousel.next_model();
                log::info!(
                    "#{i}: {} ({:?}, scale {:?}, pose rotation {})",
                    model.file_location(),
                    model.placement_mode(),
                    model.scale_units(),
                    model.apply_pose_rotation(),
                );
            }
            Ok(())
        }
    }
}

fn render(image: PathBuf, recording: PathBuf, out: PathBuf, frame: usize) -> anyhow::Result<()> {
    let image = Image::load(&image)?;
    let recording = Recording::load(&recording)?;
    ensure!(
        frame < recording.len(),
        "frame {frame} is out of range (recording has {} frames)",
        recording.len()
    );

    let result = recording.frames()[frame]
        .to_result(Arc::new(image))
        .with_context(|| format!("invalid recorded frame {frame}"))?;
    log::debug!("rendering {} hands onto {:?}", result.hands().len(), result.image());
    OverlayRenderer::new().render(&result).save(&out)?;
    log::info!("wrote '{}'", out.display());
    Ok(())
}

fn replay(
    mut pipeline: HandsPipeline,
    dir: PathBuf,
    recording: PathBuf,
    out: PathBuf,
    max_hands: usize,
) -> anyhow::Result<()> {
    let source = DirectorySource::open(&dir)?;
    let recording = Recording::load(&recording)?;
    let options = SolutionOptions::default().max_num_hands(max_hands);
    let solution = ReplaySolution::new(recording, options)?;

    let mut surface = FileSurface::new(out);
    pipeline.start_camera(Box::new(source), Box::new(solution))?;
    while pipeline.is_camera_running() {
        pipeline.present(&mut surface)?;
        thread::sleep(Duration::from_millis(30));
    }
    pipeline.stop();
    pipeline.present(&mut surface)?;

    log::info!(
        "presented {} frames to '{}'",
        surface.presented(),
        surface.path().display()
    );
    Ok(())
}
