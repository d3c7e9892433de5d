//! Hand landmark overlay rendering.
//!
//! The [`OverlayRenderer`] draws the skeleton of every hand in a [`FrameResult`] on top of the
//! frame's input image:
//!
//! 1. A line along every [`Connection`] of the hand topology.
//! 2. A filled marker on every landmark.
//! 3. A hollow ring around every landmark.
//!
//! Colors depend on the [`Handedness`] of each hand. Markers intentionally use the *opposite*
//! color of connections and rings, so that they stand out against the skeleton.
//!
//! Drawing goes through the [`Canvas`] trait. [`Image`] implements it by rasterizing directly, and
//! [`DrawList`] records the draw calls so that a GPU surface can replay them in its own pass.

mod canvas;

#[cfg(test)]
mod tests;

use nalgebra::Point2;

use crate::hand::{Connection, FrameResult, HandDetection, Handedness, HAND_CONNECTIONS};
use crate::image::{Color, Image, Resolution};
use crate::landmark::NormalizedLandmark;

pub use canvas::*;

/// Colors and sizes used to draw hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    pub left_connection_color: Color,
    pub right_connection_color: Color,
    pub left_landmark_color: Color,
    pub right_landmark_color: Color,
    pub left_ring_color: Color,
    pub right_ring_color: Color,
    /// Stroke width of connection lines, in pixels.
    pub connection_width: u32,
    /// Radius of the filled landmark markers, in pixels.
    pub landmark_radius: u32,
    /// Stroke width of the hollow rings, in pixels. Also the gap between marker and ring radius.
    pub ring_width: u32,
}

const GREEN: Color = Color::from_rgb8(0x30, 0xff, 0x30);
const RED: Color = Color::from_rgb8(0xff, 0x30, 0x30);

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            left_connection_color: GREEN,
            right_connection_color: RED,
            left_landmark_color: RED,
            right_landmark_color: GREEN,
            left_ring_color: GREEN,
            right_ring_color: RED,
            connection_width: 8,
            landmark_radius: 10,
            ring_width: 5,
        }
    }
}

impl OverlayStyle {
    pub fn connection_color(&self, handedness: Handedness) -> Color {
        match handedness {
            Handedness::Left => self.left_connection_color,
            Handedness::Right => self.right_connection_color,
        }
    }

    pub fn landmark_color(&self, handedness: Handedness) -> Color {
        match handedness {
            Handedness::Left => self.left_landmark_color,
            Handedness::Right => self.right_landmark_color,
        }
    }

    pub fn ring_color(&self, handedness: Handedness) -> Color {
        match handedness {
            Handedness::Left => self.left_ring_color,
            Handedness::Right => self.right_ring_color,
        }
    }

    /// Radius of the hollow rings: the marker radius plus the ring width.
    #[inline]
    pub fn ring_radius(&self) -> u32 {
        self.landmark_radius + self.ring_width
    }
}

/// Maps a normalized landmark to pixel coordinates in an image of resolution `res`.
#[inline]
pub fn denormalize(landmark: &NormalizedLandmark, res: Resolution) -> Point2<f32> {
    landmark.to_pixel(res)
}

/// Draws hand skeletons for [`FrameResult`]s.
///
/// The renderer itself is immutable, so it can be shared between threads and used from whichever
/// thread the tracking results arrive on.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    style: OverlayStyle,
    connections: &'static [Connection],
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayRenderer {
    /// Creates a renderer using the default [`OverlayStyle`] and the full hand topology.
    pub fn new() -> Self {
        Self {
            style: OverlayStyle::default(),
            connections: HAND_CONNECTIONS,
        }
    }

    pub fn with_style(self, style: OverlayStyle) -> Self {
        Self { style, ..self }
    }

    /// Replaces the skeleton topology that is drawn.
    ///
    /// Every landmark index in `connections` must exist in every rendered hand.
    pub fn with_connections(self, connections: &'static [Connection]) -> Self {
        Self {
            connections,
            ..self
        }
    }

    #[inline]
    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Renders all hands of `frame` onto a copy of its input image.
    ///
    /// The returned image has the same size and format as the input. If there are no hands, it is
    /// an exact copy.
    ///
    /// # Panics
    ///
    /// This will panic if a connection refers to a landmark index that a hand does not have.
    pub fn render(&self, frame: &FrameResult) -> Image {
        let mut out = Image::clone(frame.image());
        self.render_into(&mut out, frame);
        out
    }

    /// Issues the draw calls for all hands of `frame` against `canvas`.
    ///
    /// Landmarks are mapped to pixels using the resolution of the frame's input image.
    pub fn render_into<C: Canvas + ?Sized>(&self, canvas: &mut C, frame: &FrameResult) {
        let res = frame.resolution();
        log::trace!("drawing {} hand(s) at {}", frame.hands().len(), res);

        for hand in frame.hands() {
            self.draw_hand(canvas, hand, res);
        }
    }

    fn draw_hand<C: Canvas + ?Sized>(&self, canvas: &mut C, hand: &HandDetection, res: Resolution) {
        let style = &self.style;
        let handedness = hand.handedness();
        let landmarks = hand.landmarks();

        let color = style.connection_color(handedness);
        for c in self.connections {
            let start = denormalize(landmarks.get(c.start()), res);
            let end = denormalize(landmarks.get(c.end()), res);
            canvas.line(start, end, color, style.connection_width);
        }

        let color = style.landmark_color(handedness);
        for lm in landmarks.iter() {
            canvas.fill_circle(denormalize(lm, res), style.landmark_radius, color);
        }

        let color = style.ring_color(handedness);
        for lm in landmarks.iter() {
            canvas.stroke_circle(
                denormalize(lm, res),
                style.ring_radius(),
                style.ring_width,
                color,
            );
        }
    }
}

/// Renders `frame` with the default [`OverlayRenderer`].
pub fn render(frame: &FrameResult) -> Image {
    OverlayRenderer::new().render(frame)
}
