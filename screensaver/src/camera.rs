//! Perspective camera and the bounds the text must stay inside.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Sub};

use serde::Serialize;

use crate::consts::{CAMERA_FOV_DEG, CAMERA_Z, DEPTH_BOUND};

/// A point or vector in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Perspective camera looking down -Z from `(0, 0, z)`.
///
/// `fov_deg` is the vertical field of view; `aspect` is width / height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_deg: f64,
    pub aspect: f64,
    pub z: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { fov_deg: CAMERA_FOV_DEG, aspect: 16.0 / 9.0, z: CAMERA_Z }
    }
}

impl Camera {
    #[must_use]
    pub fn new(fov_deg: f64, aspect: f64, z: f64) -> Self {
        Self { fov_deg, aspect, z }
    }

    /// Camera for a viewport of `width` × `height` CSS pixels.
    #[must_use]
    pub fn for_viewport(width: f64, height: f64) -> Self {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        Self { aspect, ..Self::default() }
    }

    /// Full visible width and height at world depth `depth`.
    #[must_use]
    pub fn visible_size_at(&self, depth: f64) -> (f64, f64) {
        let distance = (self.z - depth).max(0.0);
        let height = 2.0 * (self.fov_deg.to_radians() / 2.0).tan() * distance;
        (height * self.aspect, height)
    }

    /// Bounds the object's center must stay within, at the object's depth.
    ///
    /// `half_extent` is half the rendered object's size, so the object bounces
    /// at its visual edge. The planar bounds may come out zero or negative for
    /// very long text; that is left as-is.
    #[must_use]
    pub fn visible_bounds(&self, depth: f64, half_extent: Vec3) -> VisibleBounds {
        let (width, height) = self.visible_size_at(depth);
        VisibleBounds::new(width / 2.0 - half_extent.x, height / 2.0 - half_extent.y, DEPTH_BOUND)
    }
}

/// Symmetric half-extents `[-b, b]` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleBounds {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl VisibleBounds {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        within(p.x, self.x) && within(p.y, self.y) && within(p.z, self.z)
    }
}

fn within(value: f64, bound: f64) -> bool {
    let b = bound.abs();
    value >= -b && value <= b
}
