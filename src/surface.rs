//! Display surfaces that annotated images are presented on.

use std::path::{Path, PathBuf};

use crate::image::Image;

/// Something that can display an [`Image`].
pub trait Surface {
    /// Replaces the displayed content with `image`.
    fn show(&mut self, image: &Image) -> anyhow::Result<()>;
}

/// A [`Surface`] that writes every presented image to a file.
///
/// The file format is determined by the path's extension (`png`, `jpg` or `jpeg`).
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
    presented: usize,
}

impl FileSurface {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            presented: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of images written so far.
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Surface for FileSurface {
    fn show(&mut self, image: &Image) -> anyhow::Result<()> {
        image.save(&self.path)?;
        self.presented += 1;
        log::trace!("wrote {:?} to '{}'", image, self.path.display());
        Ok(())
    }
}

/// A [`Surface`] that keeps a copy of the last presented image in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    image: Option<Image>,
    presented: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the image that was presented last, if any.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Surface for MemorySurface {
    fn show(&mut self, image: &Image) -> anyhow::Result<()> {
        self.image = Some(image.clone());
        self.presented += 1;
        Ok(())
    }
}
