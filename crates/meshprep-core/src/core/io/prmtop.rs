use super::traits::TextReader;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_TYPE_SENTINEL: &str = "AMBER_ATOM_TYPE";

const BLOCK_BOUNDARY: &str = "%FLAG";
const BLOCK_DIRECTIVES: [&str; 2] = ["%FORMAT", "%COMMENT"];

#[derive(Debug, Error)]
pub enum PrmtopError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Missing required section: %FLAG {0}")]
    MissingSection(String),
}

/// Reads the per-atom force-field type list from an AMBER topology file.
///
/// The list is the whitespace-separated content of the block whose `%FLAG` header ends
/// with the sentinel, up to the next `%FLAG` line or end of file. `%FORMAT` and
/// `%COMMENT` lines inside the block are not part of the list.
#[derive(Debug, Clone)]
pub struct PrmtopReader {
    sentinel: String,
}

impl Default for PrmtopReader {
    fn default() -> Self {
        Self::new(DEFAULT_TYPE_SENTINEL)
    }
}

impl PrmtopReader {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    fn is_type_header(&self, line: &str) -> bool {
        line.starts_with(BLOCK_BOUNDARY)
            && line.split_whitespace().last() == Some(self.sentinel.as_str())
    }
}

impl TextReader for PrmtopReader {
    type Output = Vec<String>;
    type Error = PrmtopError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut lines = reader.lines();

        let mut found = false;
        for line in lines.by_ref() {
            if self.is_type_header(&line?) {
                found = true;
                break;
            }
        }
        if !found {
            return Err(PrmtopError::MissingSection(self.sentinel.clone()));
        }

        let mut types = Vec::new();
        for line in lines {
            let line = line?;
            if line.starts_with(BLOCK_BOUNDARY) {
                break;
            }
            if BLOCK_DIRECTIVES.iter().any(|d| line.starts_with(d)) {
                continue;
            }
            types.extend(line.split_whitespace().map(str::to_string));
        }

        debug!("Read {} atom types from topology.", types.len());
        Ok(types)
    }
}
