use super::traits::{TextReader, TextWriter};
use crate::core::models::sphere::AtomSphere;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzrError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: expected four numbers 'x y z r', found '{content}'")]
    Parse { line: usize, content: String },
    #[error("File contains no atoms")]
    Empty,
}

/// Reads `x y z r` rows. Blank lines are skipped; any other malformed row is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct XyzrReader;

impl TextReader for XyzrReader {
    type Output = Vec<AtomSphere>;
    type Error = XyzrError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut spheres = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            if line.trim().is_empty() {
                continue;
            }
            let values: Option<Vec<f64>> = line
                .split_whitespace()
                .map(|t| t.parse().ok())
                .collect();
            match values.as_deref() {
                Some(&[x, y, z, r]) => spheres.push(AtomSphere::new(Point3::new(x, y, z), r)),
                _ => {
                    return Err(XyzrError::Parse {
                        line: line_num + 1,
                        content: line,
                    });
                }
            }
        }
        if spheres.is_empty() {
            return Err(XyzrError::Empty);
        }
        Ok(spheres)
    }
}

/// Writes `x y z r` rows with a fixed number of decimals.
#[derive(Debug, Clone, Copy)]
pub struct XyzrWriter {
    precision: usize,
}

impl Default for XyzrWriter {
    fn default() -> Self {
        Self { precision: 3 }
    }
}

impl XyzrWriter {
    pub fn with_precision(precision: usize) -> Self {
        Self { precision }
    }
}

impl TextWriter for XyzrWriter {
    type Input = [AtomSphere];

    fn write_to(&self, value: &Self::Input, writer: &mut impl Write) -> io::Result<()> {
        let p = self.precision;
        for sphere in value {
            writeln!(
                writer,
                "{:.p$} {:.p$} {:.p$} {:.p$}",
                sphere.center.x,
                sphere.center.y,
                sphere.center.z,
                sphere.radius,
                p = p
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_rows_and_skips_blank_lines() {
        let content = "1.0 2.0 3.0 1.5\n\n-1.0 -2.0 -3.0 2.0\n";
        let spheres = XyzrReader.read_from(&mut Cursor::new(content)).unwrap();
        assert_eq!(spheres.len(), 2);
        assert_eq!(spheres[1].center, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(spheres[1].radius, 2.0);
    }

    #[test]
    fn rejects_rows_with_wrong_field_count() {
        let result = XyzrReader.read_from(&mut Cursor::new("1.0 2.0 3.0\n"));
        assert!(matches!(result, Err(XyzrError::Parse { line: 1, .. })));
    }

    #[test]
    fn rejects_empty_files() {
        let result = XyzrReader.read_from(&mut Cursor::new("\n"));
        assert!(matches!(result, Err(XyzrError::Empty)));
    }

    #[test]
    fn writes_three_decimals_by_default() {
        let spheres = [AtomSphere::new(Point3::new(1.0, -2.5, 3.14159), 1.9080)];
        let mut out = Vec::new();
        XyzrWriter::default().write_to(&spheres, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1.000 -2.500 3.142 1.908\n");
    }
}
