use nalgebra::Point3;

/// An atom entry read from a structure (PQR) file.
///
/// Records are immutable once parsed. The radius is kept both as a number, used for
/// tolerance matching, and as the exact token found in the file, so that reports can
/// reproduce it byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// The atom name (e.g., "C1", "HO").
    pub name: String,
    /// The 3D coordinates in Angstroms, if they could be recovered from the record.
    pub position: Option<Point3<f64>>,
    /// The partial charge in elementary charge units, if present.
    pub charge: Option<f64>,
    /// The atomic radius in Angstroms.
    pub radius: f64,
    /// The radius exactly as written in the source file.
    pub radius_token: String,
}

impl AtomRecord {
    pub fn new(name: impl Into<String>, radius_token: impl Into<String>, radius: f64) -> Self {
        Self {
            name: name.into(),
            position: None,
            charge: None,
            radius,
            radius_token: radius_token.into(),
        }
    }

    pub fn with_position(mut self, position: Point3<f64>) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = Some(charge);
        self
    }

    /// The lowercase form of the atom name, as compared against force-field type codes.
    pub fn lookup_name(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_populate_optional_fields() {
        let atom = AtomRecord::new("C1", "1.9080", 1.908)
            .with_position(Point3::new(1.0, 2.0, 3.0))
            .with_charge(0.5);

        assert_eq!(atom.name, "C1");
        assert_eq!(atom.radius_token, "1.9080");
        assert_eq!(atom.position, Some(Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(atom.charge, Some(0.5));
    }

    #[test]
    fn lookup_name_is_lowercase() {
        let atom = AtomRecord::new("CA", "1.9080", 1.908);
        assert_eq!(atom.lookup_name(), "ca");
    }
}
