use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::resolver::ResolveError;
use crate::core::io::gaff::TableError;
use crate::core::io::msms::MsmsError;
use crate::core::io::pqr::PqrError;
use crate::core::io::prmtop::PrmtopError;
use crate::core::io::xyzr::XyzrError;

/// Failures that abort the processing of one molecule.
///
/// In a batch these are recorded against the molecule and never stop its siblings.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Required input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Failed to read structure file '{}': {source}", path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: PqrError,
    },

    #[error("Failed to read force-field table '{}': {source}", path.display())]
    ForceField {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("Failed to read topology file '{}': {source}", path.display())]
    Topology {
        path: PathBuf,
        #[source]
        source: PrmtopError,
    },

    #[error("Failed to read radii file '{}': {source}", path.display())]
    Radii {
        path: PathBuf,
        #[source]
        source: XyzrError,
    },

    #[error("Failed to read surface file '{}': {source}", path.display())]
    Mesh {
        path: PathBuf,
        #[source]
        source: MsmsError,
    },

    #[error("Atom '{atom}' in '{}' has no usable coordinates", path.display())]
    MissingCoordinates { path: PathBuf, atom: String },

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "Structure/topology length mismatch: {atoms} atoms but only {types} topology types"
    )]
    LengthMismatch { atoms: usize, types: usize },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<ResolveError> for EngineError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::LengthMismatch { atoms, types } => {
                EngineError::LengthMismatch { atoms, types }
            }
        }
    }
}

impl EngineError {
    /// Builds the error for a failed read, reporting a missing file as `MissingInput`.
    pub(crate) fn reading<E>(
        path: impl Into<PathBuf>,
        source: E,
        wrap: fn(PathBuf, E) -> EngineError,
    ) -> Self
    where
        E: NotFound,
    {
        let path = path.into();
        if source.is_not_found() {
            EngineError::MissingInput { path }
        } else {
            wrap(path, source)
        }
    }
}

/// Reader errors that can tell whether the file was absent.
pub(crate) trait NotFound {
    fn is_not_found(&self) -> bool;
}

macro_rules! impl_not_found {
    ($($error:ident),*) => {
        $(impl NotFound for $error {
            fn is_not_found(&self) -> bool {
                matches!(self, $error::Io(e) if e.kind() == io::ErrorKind::NotFound)
            }
        })*
    };
}

impl_not_found!(PqrError, TableError, PrmtopError, XyzrError, MsmsError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported_as_missing_input() {
        let source = PqrError::Io(io::Error::from(io::ErrorKind::NotFound));
        let err = EngineError::reading("mol/mol.pqr", source, |path, source| {
            EngineError::Structure { path, source }
        });
        assert!(matches!(err, EngineError::MissingInput { ref path } if path.ends_with("mol.pqr")));
    }

    #[test]
    fn other_read_failures_keep_their_source() {
        let source = PqrError::MissingRecord("ATOM".to_string());
        let err = EngineError::reading("mol/mol.pqr", source, |path, source| {
            EngineError::Structure { path, source }
        });
        assert!(matches!(err, EngineError::Structure { .. }));
        assert!(err.to_string().contains("mol/mol.pqr"));
    }

    #[test]
    fn resolve_length_mismatch_converts() {
        let err: EngineError = ResolveError::LengthMismatch { atoms: 3, types: 2 }.into();
        assert!(matches!(err, EngineError::LengthMismatch { atoms: 3, types: 2 }));
    }
}
