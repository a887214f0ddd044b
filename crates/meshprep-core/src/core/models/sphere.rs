use super::atom::AtomRecord;
use nalgebra::Point3;

/// An atomic sphere as consumed by the surface mesher: a center and a radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomSphere {
    pub center: Point3<f64>,
    pub radius: f64,
}

impl AtomSphere {
    pub fn new(center: Point3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Returns a copy with the radius multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            center: self.center,
            radius: self.radius * factor,
        }
    }

    /// Returns a copy with `offset` added to the radius, e.g. for a Stern layer.
    pub fn inflated(&self, offset: f64) -> Self {
        Self {
            center: self.center,
            radius: self.radius + offset,
        }
    }

    /// Builds a sphere from a structure record, if its coordinates are known.
    pub fn from_record(record: &AtomRecord) -> Option<Self> {
        record.position.map(|center| Self::new(center, record.radius))
    }
}
