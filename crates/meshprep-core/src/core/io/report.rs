use super::traits::TextWriter;
use crate::core::forcefield::resolver::{Outcome, ResolvedParameter};
use serde::Deserialize;
use std::fmt;
use std::io::{self, Write};

/// Placeholder written for values an unresolved atom does not have.
pub const MISSING_VALUE: &str = "None";

/// What the parameter report contains for an atom without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedPolicy {
    /// No line is written for the atom.
    #[default]
    Omit,
    /// A line is written with `None` in place of the missing values.
    Flag,
}

impl fmt::Display for UnresolvedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedPolicy::Omit => write!(f, "omit"),
            UnresolvedPolicy::Flag => write!(f, "flag"),
        }
    }
}

/// Writes one tab-separated `name type radius epsilon` line per atom, in atom order.
///
/// Radius and epsilon are reproduced exactly as they appeared in the input files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportWriter {
    policy: UnresolvedPolicy,
}

impl ReportWriter {
    pub fn new(policy: UnresolvedPolicy) -> Self {
        Self { policy }
    }
}

impl TextWriter for ReportWriter {
    type Input = [ResolvedParameter];

    fn write_to(&self, value: &Self::Input, writer: &mut impl Write) -> io::Result<()> {
        for param in value {
            match (&param.outcome, self.policy) {
                (
                    Outcome::Resolved {
                        type_code,
                        epsilon_token,
                        ..
                    },
                    _,
                ) => writeln!(
                    writer,
                    "{}\t{}\t{}\t{}",
                    param.atom_name, type_code, param.radius_token, epsilon_token
                )?,
                (Outcome::Unresolved { type_code }, UnresolvedPolicy::Flag) => writeln!(
                    writer,
                    "{}\t{}\t{}\t{}",
                    param.atom_name,
                    type_code.as_deref().unwrap_or(MISSING_VALUE),
                    param.radius_token,
                    MISSING_VALUE
                )?,
                (Outcome::Unresolved { .. }, UnresolvedPolicy::Omit) => {}
            }
        }
        Ok(())
    }
}
