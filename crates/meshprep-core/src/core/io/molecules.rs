use super::traits::TextReader;
use std::io::{self, BufRead};

/// Reads a molecule list: one name per line, surrounding whitespace removed.
///
/// Blank lines and lines starting with `#` are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoleculeListReader;

impl TextReader for MoleculeListReader {
    type Output = Vec<String>;
    type Error = io::Error;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut names = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let name = line.trim();
            if name.is_empty() || name.starts_with('#') {
                continue;
            }
            names.push(name.to_string());
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn strips_newlines_and_skips_blank_and_comment_lines() {
        let content = "methane\r\n# solvated later\n\n  ethanol  \ntoluene";
        let names = MoleculeListReader
            .read_from(&mut Cursor::new(content))
            .unwrap();
        assert_eq!(names, ["methane", "ethanol", "toluene"]);
    }
}
