use crate::{Point3, Vec3};

/// Color band a ray carries radiance for.
///
/// Dispersive materials pick their refractive index from the band, so one
/// primary ray is traced once per channel when dispersion is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    Red,
    #[default]
    Green,
    Blue,
}

impl Channel {
    /// All channels in RGB order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Index of the channel inside an RGB triple.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Visible wavelength band of the channel in nanometers, `[low, high)`.
    pub fn band_nm(self) -> (f64, f64) {
        match self {
            Channel::Red => (630.0, 780.0),
            Channel::Green => (510.0, 550.0),
            Channel::Blue => (450.0, 480.0),
        }
    }
}

/// A ray in 3D space with origin, direction and wavelength channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vec3,
    channel: Channel,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Point3, direction: Vec3, channel: Channel) -> Self {
        Self {
            origin,
            direction,
            channel,
        }
    }

    /// Create a ray on the default (green) channel.
    #[inline]
    pub fn new_simple(origin: Point3, direction: Vec3) -> Self {
        Self::new(origin, direction, Channel::default())
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Direction vector, not necessarily normalized.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Same ray retagged for another channel.
    #[inline]
    pub fn with_channel(self, channel: Channel) -> Self {
        Self { channel, ..self }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}
