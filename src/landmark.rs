//! Landmark types produced by the hand tracking solution.

use std::ops::Index;

use nalgebra::{Point2, Point3};

use crate::image::Resolution;

/// A landmark with coordinates normalized to the input image.
///
/// `x` and `y` are in range `[0, 1]`, relative to the image width and height. `z` is a relative
/// depth with roughly the same scale as `x`; smaller values are closer to the camera.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct NormalizedLandmark {
    x: f32,
    y: f32,
    z: f32,
}

impl NormalizedLandmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.z
    }

    /// Maps the landmark to pixel coordinates in an image of resolution `res`.
    ///
    /// This is an exact `(x * width, y * height)`, no rounding is performed.
    #[inline]
    pub fn to_pixel(&self, res: Resolution) -> Point2<f32> {
        Point2::new(self.x * res.width() as f32, self.y * res.height() as f32)
    }
}

/// A landmark in real-world 3D coordinates.
///
/// Coordinates are in meters, with the origin at the hand's approximate geometric center.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct WorldLandmark {
    pos: Point3<f32>,
}

impl WorldLandmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Point3::new(x, y, z),
        }
    }

    #[inline]
    pub fn position(&self) -> Point3<f32> {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.pos.z
    }
}

/// An ordered, fixed-length list of landmarks of a single hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmarks<L> {
    list: Box<[L]>,
}

impl<L> Landmarks<L> {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> + Clone + '_ {
        self.list.iter()
    }

    /// Returns the landmark at `index`.
    ///
    /// # Panics
    ///
    /// This will panic if `index` is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> &L {
        &self.list[index]
    }
}

impl<L> From<Vec<L>> for Landmarks<L> {
    fn from(list: Vec<L>) -> Self {
        Self {
            list: list.into_boxed_slice(),
        }
    }
}

impl<L> FromIterator<L> for Landmarks<L> {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<L> Index<usize> for Landmarks<L> {
    type Output = L;

    #[inline]
    fn index(&self, index: usize) -> &L {
        self.get(index)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn to_pixel() {
        let lm = NormalizedLandmark::new(0.5, 0.25, -0.1);
        let pos = lm.to_pixel(Resolution::new(200, 100));
        assert_relative_eq!(pos.x, 100.0);
        assert_relative_eq!(pos.y, 25.0);

        let pos = NormalizedLandmark::new(0.0, 1.0, 0.0).to_pixel(Resolution::new(640, 480));
        assert_eq!(pos, Point2::new(0.0, 480.0));
    }

    #[test]
    fn landmarks_index() {
        let lms: Landmarks<_> = (0..3)
            .map(|i| NormalizedLandmark::new(i as f32 / 10.0, 0.0, 0.0))
            .collect();
        assert_eq!(lms.len(), 3);
        assert_relative_eq!(lms[2].x(), 0.2);
        assert_eq!(lms.iter().count(), 3);
    }

    #[test]
    #[should_panic]
    fn landmarks_out_of_bounds() {
        let lms = Landmarks::from(vec![NormalizedLandmark::default()]);
        lms.get(1);
    }
}
