use super::traits::TextReader;
use crate::core::forcefield::params::{ForceFieldEntry, ForceFieldTable};
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_START_MARKER: &str = "MOD4";
pub const DEFAULT_END_MARKER: &str = "END";

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: TableParseErrorKind },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableParseErrorKind {
    #[error("Invalid radius '{value}' for type '{type_code}'")]
    InvalidRadius { type_code: String, value: String },
    #[error("Invalid well depth '{value}' for type '{type_code}'")]
    InvalidEpsilon { type_code: String, value: String },
}

/// Scanning position relative to the van der Waals section of a parameter file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    BeforeSection,
    InSection,
    Done,
}

/// The `type radius epsilon` tokens of one row inside the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRow<'l> {
    pub type_code: &'l str,
    pub radius: &'l str,
    pub epsilon: &'l str,
}

impl RawRow<'_> {
    fn parse(&self) -> Result<ForceFieldEntry, TableParseErrorKind> {
        let radius = self
            .radius
            .parse()
            .map_err(|_| TableParseErrorKind::InvalidRadius {
                type_code: self.type_code.to_string(),
                value: self.radius.to_string(),
            })?;
        let epsilon = self
            .epsilon
            .parse()
            .map_err(|_| TableParseErrorKind::InvalidEpsilon {
                type_code: self.type_code.to_string(),
                value: self.epsilon.to_string(),
            })?;
        Ok(ForceFieldEntry::new(
            self.type_code,
            radius,
            self.epsilon,
            epsilon,
        ))
    }
}

/// Reads the van der Waals section of a GAFF-style parameter file.
///
/// Rows strictly between a line whose first token is the start marker and a line whose
/// first token is the end marker, with at least three tokens, become table entries in
/// file order. A file without the markers yields an empty table.
#[derive(Debug, Clone)]
pub struct GaffReader {
    start_marker: String,
    end_marker: String,
}

impl Default for GaffReader {
    fn default() -> Self {
        Self::new(DEFAULT_START_MARKER, DEFAULT_END_MARKER)
    }
}

impl GaffReader {
    pub fn new(start_marker: impl Into<String>, end_marker: impl Into<String>) -> Self {
        Self {
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
        }
    }

    /// Advances the section state by one line, yielding the row it carries, if any.
    pub fn step<'l>(
        &self,
        state: SectionState,
        line: &'l str,
    ) -> (SectionState, Option<RawRow<'l>>) {
        let tokens: Vec<&'l str> = line.split_whitespace().collect();
        let first = tokens.first().copied();

        match state {
            SectionState::BeforeSection if first == Some(self.start_marker.as_str()) => {
                (SectionState::InSection, None)
            }
            SectionState::BeforeSection => (SectionState::BeforeSection, None),
            SectionState::InSection if first == Some(self.end_marker.as_str()) => {
                (SectionState::Done, None)
            }
            SectionState::InSection if tokens.len() >= 3 => (
                SectionState::InSection,
                Some(RawRow {
                    type_code: tokens[0],
                    radius: tokens[1],
                    epsilon: tokens[2],
                }),
            ),
            SectionState::InSection => (SectionState::InSection, None),
            SectionState::Done => (SectionState::Done, None),
        }
    }
}

impl TextReader for GaffReader {
    type Output = ForceFieldTable;
    type Error = TableError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut state = SectionState::BeforeSection;
        let mut entries = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let (next, row) = self.step(state, &line);
            state = next;
            if let Some(row) = row {
                let entry = row.parse().map_err(|kind| TableError::Parse {
                    line: line_num + 1,
                    kind,
                })?;
                entries.push(entry);
            }
            if state == SectionState::Done {
                break;
            }
        }

        match state {
            SectionState::BeforeSection => warn!(
                "No '{}' section found in force-field file; the parameter table is empty.",
                self.start_marker
            ),
            SectionState::InSection => warn!(
                "Force-field section '{}' was not closed by '{}'; read to end of file.",
                self.start_marker, self.end_marker
            ),
            SectionState::Done => {}
        }
        debug!("Loaded {} force-field entries.", entries.len());
        Ok(ForceFieldTable::new(entries))
    }
}
