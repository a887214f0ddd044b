use super::traits::TextWriter;
use crate::core::models::mesh::SurfaceMesh;
use std::io::{self, Write};

/// Writes a triangulated surface in the Object File Format read by trimesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffWriter;

impl TextWriter for OffWriter {
    type Input = SurfaceMesh;

    fn write_to(&self, value: &Self::Input, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer, "OFF")?;
        writeln!(writer, "{} {} 0", value.vertex_count(), value.face_count())?;
        writeln!(writer)?;
        for v in &value.vertices {
            writeln!(writer, "{:.4}\t{:.4}\t{:.4}", v.x, v.y, v.z)?;
        }
        for [a, b, c] in &value.faces {
            writeln!(writer, "3\t{}\t{}\t{}", a, b, c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn writes_header_vertices_and_faces() {
        let mesh = SurfaceMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, -1.25, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let mut out = Vec::new();
        OffWriter.write_to(&mesh, &mut out).unwrap();

        let expected = "OFF\n3 1 0\n\n\
                        0.0000\t0.0000\t0.0000\n\
                        1.0000\t0.0000\t0.0000\n\
                        0.0000\t-1.2500\t0.0000\n\
                        3\t0\t1\t2\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
