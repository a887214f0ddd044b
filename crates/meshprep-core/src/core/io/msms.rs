use super::traits::TextReader;
use crate::core::models::mesh::SurfaceMesh;
use nalgebra::Point3;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MsmsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Face {face} references vertex {index}, but only {vertices} vertices exist")]
    VertexOutOfRange {
        face: usize,
        index: usize,
        vertices: usize,
    },
}

/// Yields the data lines of an MSMS output file with their line numbers.
///
/// Files written with a header start with `#` comment lines followed by a count line;
/// both are skipped. Headerless files (`-no_header`) are read from the first line.
fn data_lines(reader: &mut impl BufRead) -> Result<Vec<(usize, String)>, MsmsError> {
    let mut lines = Vec::new();
    let mut in_header = false;
    let mut seen_data = false;

    for (i, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') {
            if !seen_data {
                in_header = true;
            }
            continue;
        }
        if in_header {
            in_header = false;
            seen_data = true;
            continue;
        }
        seen_data = true;
        lines.push((i + 1, line));
    }
    Ok(lines)
}

/// Reads vertex positions from the first three columns of an MSMS `.vert` file.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertReader;

impl TextReader for VertReader {
    type Output = Vec<Point3<f64>>;
    type Error = MsmsError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        data_lines(reader)?
            .into_iter()
            .map(|(line, content)| {
                let coords: Vec<f64> = content
                    .split_whitespace()
                    .take(3)
                    .map(str::parse::<f64>)
                    .collect::<Result<_, _>>()
                    .map_err(|e| MsmsError::Parse {
                        line,
                        message: format!("invalid vertex coordinate ({})", e),
                    })?;
                match coords.as_slice() {
                    &[x, y, z] => Ok(Point3::new(x, y, z)),
                    _ => Err(MsmsError::Parse {
                        line,
                        message: "vertex line needs three coordinates".to_string(),
                    }),
                }
            })
            .collect()
    }
}

/// Reads the one-based vertex triplets from the first three columns of a `.face` file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceReader;

impl TextReader for FaceReader {
    type Output = Vec<[usize; 3]>;
    type Error = MsmsError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        data_lines(reader)?
            .into_iter()
            .map(|(line, content)| {
                let indices: Vec<usize> = content
                    .split_whitespace()
                    .take(3)
                    .map(str::parse::<usize>)
                    .collect::<Result<_, _>>()
                    .map_err(|e| MsmsError::Parse {
                        line,
                        message: format!("invalid vertex index ({})", e),
                    })?;
                match indices.as_slice() {
                    &[a, b, c] => Ok([a, b, c]),
                    _ => Err(MsmsError::Parse {
                        line,
                        message: "face line needs three vertex indices".to_string(),
                    }),
                }
            })
            .collect()
    }
}

/// Builds a mesh with zero-based faces, checking every index against the vertex count.
pub fn assemble_mesh(
    vertices: Vec<Point3<f64>>,
    one_based_faces: Vec<[usize; 3]>,
) -> Result<SurfaceMesh, MsmsError> {
    let count = vertices.len();
    let faces = one_based_faces
        .into_iter()
        .enumerate()
        .map(|(face, indices)| {
            let mut zero_based = [0usize; 3];
            for (slot, &index) in zero_based.iter_mut().zip(indices.iter()) {
                if index == 0 || index > count {
                    return Err(MsmsError::VertexOutOfRange {
                        face: face + 1,
                        index,
                        vertices: count,
                    });
                }
                *slot = index - 1;
            }
            Ok(zero_based)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SurfaceMesh::new(vertices, faces))
}

/// The `.vert` and `.face` paths produced by MSMS for an output base name.
pub fn surface_paths(base: &Path) -> (PathBuf, PathBuf) {
    let with_ext = |ext: &str| {
        let mut path = base.as_os_str().to_owned();
        path.push(".");
        path.push(ext);
        PathBuf::from(path)
    };
    (with_ext("vert"), with_ext("face"))
}
