//! Keeps the latest annotated frame for display.

use std::sync::Arc;

use crate::hand::FrameResult;
use crate::image::Image;
use crate::mailbox::Latest;
use crate::overlay::OverlayRenderer;
use crate::surface::Surface;

/// Renders incoming [`FrameResult`]s and holds on to the most recent annotated image.
///
/// [`HandsResultView::set_result`] is meant to be called from the thread that delivers tracking
/// results, while [`HandsResultView::present`] is called from whichever thread owns the display.
#[derive(Default)]
pub struct HandsResultView {
    renderer: OverlayRenderer,
    latest: Latest<Image>,
}

impl HandsResultView {
    pub fn new(renderer: OverlayRenderer) -> Self {
        Self {
            renderer,
            latest: Latest::new(),
        }
    }

    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    /// Renders `result` and makes it the latest annotated image.
    ///
    /// A missing result is ignored and keeps the previous image.
    pub fn set_result(&self, result: Option<&FrameResult>) {
        let Some(result) = result else { return };

        let annotated = self.renderer.render(result);
        if self.latest.post(annotated).is_some() {
            log::trace!("replaced an annotated frame that was never presented");
        }
    }

    /// Returns the latest annotated image, if one has been rendered yet.
    pub fn latest(&self) -> Option<Arc<Image>> {
        self.latest.get()
    }

    /// Shows the latest annotated image on `surface`.
    ///
    /// Does nothing if no image has been rendered yet.
    pub fn present<S: Surface + ?Sized>(&self, surface: &mut S) -> anyhow::Result<()> {
        match self.latest.get() {
            Some(image) => surface.show(&image),
            None => Ok(()),
        }
    }
}
