//! Camera input plumbing.
//!
//! A [`CameraInput`] pulls frames from a [`FrameSource`] on its own thread and hands each one to
//! the registered new-frame listener. Capturing from actual camera hardware is left to
//! [`FrameSource`] implementations.

use std::{
    fs,
    panic::resume_unwind,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread::{self, JoinHandle},
};

use anyhow::{bail, Context};

use crate::image::{self, Image};

/// Produces camera frames.
pub trait FrameSource: Send {
    /// Prepares the source for capturing, eg. by opening a device.
    ///
    /// Called once by [`CameraInput::start`] before any frame is read.
    fn prepare(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Reads the next frame.
    ///
    /// Returns `Ok(None)` when the source has no more frames.
    fn read(&mut self) -> anyhow::Result<Option<Image>>;
}

/// Which way the camera faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    /// Facing the user. Frames are mirrored so that they look like a mirror image.
    Front,
    /// Facing away from the user. Frames are passed on unchanged.
    Back,
}

/// Receives every captured frame.
pub type FrameListener = Box<dyn FnMut(Arc<Image>) + Send>;

/// Drives a [`FrameSource`] on a capture thread and forwards frames to a listener.
pub struct CameraInput {
    source: Option<Box<dyn FrameSource>>,
    listener: Arc<Mutex<Option<FrameListener>>>,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl CameraInput {
    pub fn new(source: Box<dyn FrameSource>) -> Self {
        Self {
            source: Some(source),
            listener: Arc::new(Mutex::new(None)),
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// Sets or removes the listener that receives new frames.
    ///
    /// Frames captured while no listener is set are dropped.
    pub fn set_new_frame_listener(&mut self, listener: Option<FrameListener>) {
        *self.listener.lock().unwrap() = listener;
    }

    /// Starts capturing frames on a background thread.
    ///
    /// A [`CameraInput`] can only be started once.
    pub fn start(&mut self, facing: CameraFacing) -> anyhow::Result<()> {
        let Some(mut source) = self.source.take() else {
            bail!("camera input was already started");
        };
        source.prepare().context("failed to open frame source")?;

        let listener = self.listener.clone();
        let running = self.running.clone();
        running.store(true, Ordering::SeqCst);

        let handle = thread::Builder::new()
            .name("camera input".into())
            .spawn(move || {
                log::trace!("camera input starting ({facing:?})");
                while running.load(Ordering::SeqCst) {
                    let image = match source.read() {
                        Ok(Some(image)) => image,
                        Ok(None) => {
                            log::debug!("camera input reached end of stream");
                            break;
                        }
                        Err(e) => {
                            log::error!("failed to read camera frame: {e:#}");
                            break;
                        }
                    };
                    let image = match facing {
                        CameraFacing::Front => image.flip_horizontal(),
                        CameraFacing::Back => image,
                    };

                    if let Some(listener) = &mut *listener.lock().unwrap() {
                        listener(Arc::new(image));
                    }
                }
                running.store(false, Ordering::SeqCst);
                log::trace!("camera input exiting");
            })
            .context("failed to spawn camera input thread")?;

        self.thread = Some(handle);
        Ok(())
    }

    /// Returns whether the capture thread is still delivering frames.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Blocks until the frame source is exhausted or the input is closed.
    ///
    /// If the capture thread has panicked, the panic is propagated to the caller.
    pub fn wait(&mut self) {
        if let Some(handle) = self.thread.take() {
            if let Err(payload) = handle.join() {
                if !thread::panicking() {
                    resume_unwind(payload);
                }
            }
        }
    }

    /// Stops capturing and waits for the capture thread to exit.
    pub fn close(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.wait();
    }
}

impl Drop for CameraInput {
    fn drop(&mut self) {
        self.close();
    }
}

/// A [`FrameSource`] that reads the image files in a directory, in file name order.
pub struct DirectorySource {
    paths: std::vec::IntoIter<PathBuf>,
}

impl DirectorySource {
    /// Lists all `png`, `jpg` and `jpeg` files in `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in
            fs::read_dir(dir).with_context(|| format!("failed to list '{}'", dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && image::is_supported_path(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        log::debug!("found {} frames in '{}'", paths.len(), dir.display());
        Ok(Self {
            paths: paths.into_iter(),
        })
    }

    /// Returns the number of frames that have not been read yet.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl FrameSource for DirectorySource {
    fn read(&mut self) -> anyhow::Result<Option<Image>> {
        self.paths.next().map(Image::load).transpose()
    }
}
