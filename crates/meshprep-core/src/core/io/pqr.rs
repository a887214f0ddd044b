use super::coords::trailing_numeric_fields;
use super::traits::TextReader;
use crate::core::models::atom::AtomRecord;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_RECORD_KEYWORDS: [&str; 2] = ["ATOM", "HETATM"];

/// Index of the first token that may hold a coordinate.
const FIRST_COORDINATE_TOKEN: usize = 5;

#[derive(Debug, Error)]
pub enum PqrError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PqrParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PqrParseErrorKind {
    #[error("Atom record has {found} fields; at least 4 are required")]
    TooFewFields { found: usize },
    #[error("Invalid radius '{value}' in last field")]
    InvalidRadius { value: String },
}

/// Reads atom records from whitespace-delimited PQR files.
///
/// For every line whose first token is a record keyword: the atom name is the third
/// token, the radius the last one, the charge the last numeric field before it and the
/// coordinates the three fields before the charge. Coordinates and charge are best
/// effort; a record whose coordinates cannot be recovered keeps `position: None`.
#[derive(Debug, Clone)]
pub struct PqrReader {
    record_keywords: Vec<String>,
}

impl Default for PqrReader {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_KEYWORDS.iter().map(|k| k.to_string()).collect())
    }
}

impl PqrReader {
    pub fn new(record_keywords: Vec<String>) -> Self {
        Self { record_keywords }
    }

    fn is_atom_record(&self, keyword: &str) -> bool {
        self.record_keywords.iter().any(|k| k == keyword)
    }

    fn parse_record(tokens: &[&str], line: usize) -> Result<AtomRecord, PqrError> {
        if tokens.len() < 4 {
            return Err(PqrError::Parse {
                line,
                kind: PqrParseErrorKind::TooFewFields {
                    found: tokens.len(),
                },
            });
        }

        let radius_token = tokens[tokens.len() - 1];
        let radius: f64 = radius_token.parse().map_err(|_| PqrError::Parse {
            line,
            kind: PqrParseErrorKind::InvalidRadius {
                value: radius_token.to_string(),
            },
        })?;
        let mut record = AtomRecord::new(tokens[2], radius_token, radius);

        let numeric = tokens
            .get(FIRST_COORDINATE_TOKEN..tokens.len() - 1)
            .unwrap_or(&[]);
        match trailing_numeric_fields(numeric, 4) {
            Ok(Some(fields)) => {
                record = record
                    .with_position(Point3::new(fields[0], fields[1], fields[2]))
                    .with_charge(fields[3]);
            }
            Ok(None) => {
                debug!(
                    "Line {}: fewer than four numeric fields before the radius; position and charge unset.",
                    line
                );
            }
            Err(e) => {
                warn!(
                    "Line {}: could not split coordinate fields ({}); position and charge unset for atom '{}'.",
                    line, e, record.name
                );
            }
        }
        Ok(record)
    }
}

impl TextReader for PqrReader {
    type Output = Vec<AtomRecord>;
    type Error = PqrError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut atoms = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.first() {
                Some(keyword) if self.is_atom_record(keyword) => {
                    atoms.push(Self::parse_record(&tokens, line_num + 1)?);
                }
                _ => continue,
            }
        }

        if atoms.is_empty() {
            return Err(PqrError::MissingRecord(format!(
                "{} records",
                self.record_keywords.join("/")
            )));
        }
        Ok(atoms)
    }
}
