/// One row of a force-field van der Waals table.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceFieldEntry {
    /// Lowercase force-field atom type (e.g., "c3", "hc").
    pub type_code: String,
    /// The van der Waals radius in Angstroms.
    pub radius: f64,
    /// The well depth in kcal/mol.
    pub epsilon: f64,
    /// The well depth exactly as written in the table file.
    pub epsilon_token: String,
}

impl ForceFieldEntry {
    pub fn new(
        type_code: impl Into<String>,
        radius: f64,
        epsilon_token: impl Into<String>,
        epsilon: f64,
    ) -> Self {
        Self {
            type_code: type_code.into(),
            radius,
            epsilon,
            epsilon_token: epsilon_token.into(),
        }
    }

    #[inline]
    pub fn radius_matches(&self, radius: f64, tolerance: f64) -> bool {
        (radius - self.radius).abs() < tolerance
    }
}

/// An ordered collection of force-field entries.
///
/// File order is preserved; every lookup returns the first qualifying entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForceFieldTable {
    entries: Vec<ForceFieldEntry>,
}

impl ForceFieldTable {
    pub fn new(entries: Vec<ForceFieldEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ForceFieldEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first_where<F>(&self, predicate: F) -> Option<&ForceFieldEntry>
    where
        F: FnMut(&&ForceFieldEntry) -> bool,
    {
        self.entries.iter().find(predicate)
    }

    pub fn first_by_type(&self, type_code: &str) -> Option<&ForceFieldEntry> {
        self.first_where(|e| e.type_code == type_code)
    }
}

impl FromIterator<ForceFieldEntry> for ForceFieldTable {
    fn from_iter<I: IntoIterator<Item = ForceFieldEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ForceFieldTable {
        vec![
            ForceFieldEntry::new("c", 1.908, "0.0860", 0.086),
            ForceFieldEntry::new("c3", 1.908, "0.1094", 0.1094),
            ForceFieldEntry::new("c3", 2.000, "0.2000", 0.2),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn first_by_type_returns_earliest_entry() {
        let table = table();
        let entry = table.first_by_type("c3").unwrap();
        assert_eq!(entry.epsilon_token, "0.1094");
    }

    #[test]
    fn first_by_type_returns_none_for_unknown_type() {
        assert!(table().first_by_type("n4").is_none());
    }

    #[test]
    fn radius_matches_uses_strict_tolerance() {
        let entry = ForceFieldEntry::new("c", 1.908, "0.0860", 0.086);
        assert!(entry.radius_matches(1.908, 1e-8));
        assert!(entry.radius_matches(1.908 + 5e-9, 1e-8));
        assert!(!entry.radius_matches(1.9081, 1e-8));
    }
}
