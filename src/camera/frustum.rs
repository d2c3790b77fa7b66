//! Orthographic viewing volume

/// Zoom-independent lens parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// Full vertical extent of the frustum at zoom level 1 (world units)
    pub base_size: f32,
    /// Width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Fixed downward camera tilt (degrees below horizontal)
    pub tilt_degrees: f32,
}

/// Orthographic frustum for one zoom level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub half_width: f32,
    pub half_height: f32,
    pub near: f32,
    pub far: f32,
    /// Downward tilt of the camera in radians
    pub tilt: f32,
}

impl Frustum {
    /// Derive the frustum for `level`.
    ///
    /// Panics if `level` is not strictly positive: zoom levels come from a
    /// validated positive set and are never assigned directly, so a
    /// non-positive level means the zoom state is corrupt.
    pub fn from_zoom(lens: &Lens, level: f32) -> Self {
        assert!(
            level > 0.0,
            "zoom level must stay positive, got {}",
            level
        );

        let half_height = lens.base_size / (2.0 * level);
        Self {
            half_width: half_height * lens.aspect,
            half_height,
            near: lens.near,
            far: lens.far,
            tilt: lens.tilt_degrees.to_radians(),
        }
    }

    pub fn top(&self) -> f32 {
        self.half_height
    }

    pub fn bottom(&self) -> f32 {
        -self.half_height
    }

    pub fn left(&self) -> f32 {
        -self.half_width
    }

    pub fn right(&self) -> f32 {
        self.half_width
    }

    /// Camera distance from the pivot (pivot sits mid-depth)
    pub fn pivot_distance(&self) -> f32 {
        (self.near + self.far) * 0.5
    }
}
