use super::params::{ForceFieldEntry, ForceFieldTable};
use crate::core::models::atom::AtomRecord;
use thiserror::Error;
use tracing::{debug, warn};

/// Radius agreement required between a structure atom and a table entry.
pub const DEFAULT_RADIUS_TOLERANCE: f64 = 1e-8;

/// How a table entry was matched to an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Type code equals the lowercase atom name and the radius agrees.
    Exact,
    /// Type code is contained in the lowercase atom name and the radius agrees.
    Substring,
    /// Only the radius agrees; the type code is unrelated to the atom name.
    RadiusOnly,
    /// Type code taken from the topology file at the atom's index.
    Topology,
}

impl MatchKind {
    pub fn is_approximate(&self) -> bool {
        matches!(self, MatchKind::Substring | MatchKind::RadiusOnly)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Resolved {
        type_code: String,
        epsilon: f64,
        epsilon_token: String,
        kind: MatchKind,
    },
    Unresolved {
        /// Known when the type came from a topology file but had no table entry.
        type_code: Option<String>,
    },
}

/// The parameters assigned to one structure atom.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameter {
    pub atom_name: String,
    pub radius: f64,
    pub radius_token: String,
    pub outcome: Outcome,
}

impl ResolvedParameter {
    fn resolved(atom: &AtomRecord, entry: &ForceFieldEntry, kind: MatchKind) -> Self {
        Self {
            atom_name: atom.name.clone(),
            radius: atom.radius,
            radius_token: atom.radius_token.clone(),
            outcome: Outcome::Resolved {
                type_code: entry.type_code.clone(),
                epsilon: entry.epsilon,
                epsilon_token: entry.epsilon_token.clone(),
                kind,
            },
        }
    }

    fn unresolved(atom: &AtomRecord, type_code: Option<String>) -> Self {
        Self {
            atom_name: atom.name.clone(),
            radius: atom.radius,
            radius_token: atom.radius_token.clone(),
            outcome: Outcome::Unresolved { type_code },
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.outcome, Outcome::Resolved { .. })
    }

    pub fn match_kind(&self) -> Option<MatchKind> {
        match &self.outcome {
            Outcome::Resolved { kind, .. } => Some(*kind),
            Outcome::Unresolved { .. } => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error(
        "Topology lists {types} atom types but the structure has {atoms} atoms; every atom needs a type"
    )]
    LengthMismatch { atoms: usize, types: usize },
}

/// Assigns force-field entries to structure atoms.
///
/// Without a topology, atoms are matched by name and radius through three tiers of
/// decreasing confidence. The substring and radius-only tiers are heuristics for
/// naming differences between structure files and force-field tables; a radius-only
/// match carries no name correlation at all and may pick a chemically wrong type.
pub struct ParameterResolver<'a> {
    table: &'a ForceFieldTable,
    tolerance: f64,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(table: &'a ForceFieldTable) -> Self {
        Self {
            table,
            tolerance: DEFAULT_RADIUS_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Resolves every atom, in order.
    ///
    /// With `topology`, each atom takes the type code at its own index; a topology
    /// shorter than the structure fails before any atom is resolved.
    pub fn resolve_all(
        &self,
        atoms: &[AtomRecord],
        topology: Option<&[String]>,
    ) -> Result<Vec<ResolvedParameter>, ResolveError> {
        match topology {
            None => Ok(atoms.iter().map(|atom| self.resolve_by_name(atom)).collect()),
            Some(types) => {
                if types.len() < atoms.len() {
                    return Err(ResolveError::LengthMismatch {
                        atoms: atoms.len(),
                        types: types.len(),
                    });
                }
                if types.len() > atoms.len() {
                    warn!(
                        "Topology lists {} atom types for {} atoms; trailing types are ignored.",
                        types.len(),
                        atoms.len()
                    );
                }
                Ok(atoms
                    .iter()
                    .zip(types)
                    .map(|(atom, type_code)| self.resolve_by_type(atom, type_code))
                    .collect())
            }
        }
    }

    pub fn resolve_by_name(&self, atom: &AtomRecord) -> ResolvedParameter {
        let name = atom.lookup_name();
        let radius_ok = |e: &&ForceFieldEntry| e.radius_matches(atom.radius, self.tolerance);

        if let Some(entry) = self
            .table
            .first_where(|e| e.type_code == name && radius_ok(e))
        {
            return ResolvedParameter::resolved(atom, entry, MatchKind::Exact);
        }

        if let Some(entry) = self
            .table
            .first_where(|e| name.contains(e.type_code.as_str()) && radius_ok(e))
        {
            warn!(
                "No exact type match for atom '{}'; using closest name '{}' with matching radius {}.",
                atom.name, entry.type_code, atom.radius_token
            );
            return ResolvedParameter::resolved(atom, entry, MatchKind::Substring);
        }

        if let Some(entry) = self.table.first_where(radius_ok) {
            warn!(
                "No type name match for atom '{}'; matched type '{}' by radius {} alone. This assignment is unverified.",
                atom.name, entry.type_code, atom.radius_token
            );
            return ResolvedParameter::resolved(atom, entry, MatchKind::RadiusOnly);
        }

        warn!(
            "Could not resolve atom '{}' (radius {}): no entry matches by name or radius.",
            atom.name, atom.radius_token
        );
        ResolvedParameter::unresolved(atom, None)
    }

    pub fn resolve_by_type(&self, atom: &AtomRecord, type_code: &str) -> ResolvedParameter {
        match self.table.first_by_type(type_code) {
            Some(entry) => {
                if !entry.radius_matches(atom.radius, self.tolerance) {
                    debug!(
                        "Atom '{}' radius {} differs from type '{}' radius {}.",
                        atom.name, atom.radius_token, entry.type_code, entry.radius
                    );
                }
                ResolvedParameter::resolved(atom, entry, MatchKind::Topology)
            }
            None => {
                warn!(
                    "Could not resolve atom '{}': topology type '{}' has no force-field entry.",
                    atom.name, type_code
                );
                ResolvedParameter::unresolved(atom, Some(type_code.to_string()))
            }
        }
    }
}
