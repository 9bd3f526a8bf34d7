//! Camera for ray generation.

use prism_core::{RenderSettings, Scene};
use prism_math::{Channel, Point3, Ray, Vec3};
use rand::RngCore;

use crate::sampling::random_in_unit_disk;

/// Thin-lens camera mapping normalized image coordinates to world rays.
///
/// `(s, t)` run over `[0, 1]²` with the origin at the bottom-left corner of
/// the image. Everything at distance `|look_from - look_at|` is in focus.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    // Lens settings
    vfov: f64,     // Vertical field of view in degrees
    aperture: f64, // Lens diameter
    aspect_ratio: f64,

    // Cached computed values (set by initialize())
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::looking_at(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), 45.0, 0.0, 16.0 / 9.0)
    }

    /// Camera looking from the scene's `from` point to its `to` point.
    pub fn from_settings(settings: &RenderSettings, scene: &Scene) -> Self {
        Self::looking_at(
            scene.camera_from(),
            scene.camera_to(),
            settings.vfov_degrees,
            settings.aperture,
            settings.aspect_ratio(),
        )
    }

    fn looking_at(look_from: Point3, look_at: Point3, vfov: f64, aperture: f64, aspect_ratio: f64) -> Self {
        let mut camera = Self {
            look_from,
            look_at,
            vup: Vec3::Y,
            vfov,
            aperture,
            aspect_ratio,
            lower_left_corner: Point3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        };
        camera.initialize();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Recompute the image plane (must be called after changing settings).
    pub fn initialize(&mut self) {
        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = self.aspect_ratio * half_height;
        let focus_dist = (self.look_from - self.look_at).length();

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self
            .vup
            .cross(self.w)
            .try_normalize()
            // Looking straight along `vup`; any perpendicular will do
            .unwrap_or_else(|| Vec3::X.cross(self.w).normalize());
        self.v = self.w.cross(self.u);

        self.lower_left_corner = self.look_from
            - half_width * focus_dist * self.u
            - half_height * focus_dist * self.v
            - focus_dist * self.w;
        self.horizontal = 2.0 * half_width * focus_dist * self.u;
        self.vertical = 2.0 * half_height * focus_dist * self.v;
        self.lens_radius = self.aperture / 2.0;
    }

    /// Ray through image point `(s, t)`, starting from a random point on
    /// the lens and tagged with `channel`.
    pub fn get_ray(&self, s: f64, t: f64, channel: Channel, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let origin = self.look_from + offset;
        Ray::new(origin, self.image_point(s, t) - origin, channel)
    }

    /// Direction from the lens center through `(s, t)`, without jitter.
    pub fn direction_through(&self, s: f64, t: f64) -> Vec3 {
        self.image_point(s, t) - self.look_from
    }

    pub fn look_from(&self) -> Point3 {
        self.look_from
    }

    fn image_point(&self, s: f64, t: f64) -> Point3 {
        self.lower_left_corner + s * self.horizontal + t * self.vertical
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
