use nalgebra::Point2;

use crate::image::{draw, Color, Image};

/// A surface that accepts the overlay's draw calls.
///
/// All positions are in pixel coordinates of the frame being annotated.
pub trait Canvas {
    /// Draws a straight line of the given stroke width.
    fn line(&mut self, start: Point2<f32>, end: Point2<f32>, color: Color, width: u32);

    /// Draws a filled circle.
    fn fill_circle(&mut self, center: Point2<f32>, radius: u32, color: Color);

    /// Draws the outline of a circle, with the stroke centered on `radius`.
    fn stroke_circle(&mut self, center: Point2<f32>, radius: u32, width: u32, color: Color);
}

impl Canvas for Image {
    fn line(&mut self, start: Point2<f32>, end: Point2<f32>, color: Color, width: u32) {
        draw::line(self, start, end).color(color).stroke_width(width);
    }

    fn fill_circle(&mut self, center: Point2<f32>, radius: u32, color: Color) {
        draw::circle(self, center, radius).color(color).filled();
    }

    fn stroke_circle(&mut self, center: Point2<f32>, radius: u32, width: u32, color: Color) {
        draw::circle(self, center, radius)
            .color(color)
            .stroke_width(width);
    }
}

/// A single recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line {
        start: Point2<f32>,
        end: Point2<f32>,
        color: Color,
        width: u32,
    },
    FillCircle {
        center: Point2<f32>,
        radius: u32,
        color: Color,
    },
    StrokeCircle {
        center: Point2<f32>,
        radius: u32,
        width: u32,
        color: Color,
    },
}

/// A [`Canvas`] that records draw calls instead of rasterizing them.
///
/// This is the hand-off format for surfaces that do their own drawing (eg. a GPU render pass).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Issues all recorded draw calls against another [`Canvas`], in recording order.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for cmd in &self.commands {
            match *cmd {
                DrawCommand::Line {
                    start,
                    end,
                    color,
                    width,
                } => canvas.line(start, end, color, width),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => canvas.fill_circle(center, radius, color),
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    width,
                    color,
                } => canvas.stroke_circle(center, radius, width, color),
            }
        }
    }
}

impl Canvas for DrawList {
    fn line(&mut self, start: Point2<f32>, end: Point2<f32>, color: Color, width: u32) {
        self.commands.push(DrawCommand::Line {
            start,
            end,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Point2<f32>, radius: u32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point2<f32>, radius: u32, width: u32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }
}
