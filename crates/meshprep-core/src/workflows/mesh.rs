use crate::core::io::msms::{FaceReader, MsmsError, VertReader, assemble_mesh, surface_paths};
use crate::core::io::off::OffWriter;
use crate::core::io::traits::{TextReader, TextWriter};
use crate::core::models::mesh::SurfaceMesh;
use crate::engine::batch::{self, BatchReport};
use crate::engine::cancel::CancellationToken;
use crate::engine::config::BatchLayout;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// The files of one molecule's mesh conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshJob {
    /// Output base of the mesher; `.vert` and `.face` are appended.
    pub surface_base: PathBuf,
    pub output_path: PathBuf,
}

impl MeshJob {
    /// Converts `surface_base.{vert,face}` into `surface_base.off`.
    pub fn new(surface_base: impl Into<PathBuf>) -> Self {
        let surface_base = surface_base.into();
        let mut output = surface_base.clone().into_os_string();
        output.push(".off");
        Self {
            surface_base,
            output_path: PathBuf::from(output),
        }
    }

    pub fn with_output(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn from_layout(layout: &BatchLayout, molecule: &str) -> Self {
        Self::new(layout.surface(molecule))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshSummary {
    pub vertices: usize,
    pub faces: usize,
}

fn mesh_error(path: &Path) -> impl FnOnce(MsmsError) -> EngineError + '_ {
    move |e| EngineError::reading(path, e, |path, source| EngineError::Mesh { path, source })
}

/// Reads the mesher's vertex and face lists for `surface_base`.
pub fn load_surface(surface_base: &Path) -> Result<SurfaceMesh, EngineError> {
    let (vert_path, face_path) = surface_paths(surface_base);
    let vertices = VertReader
        .read_from_path(&vert_path)
        .map_err(mesh_error(&vert_path))?;
    let faces = FaceReader
        .read_from_path(&face_path)
        .map_err(mesh_error(&face_path))?;
    assemble_mesh(vertices, faces).map_err(mesh_error(&face_path))
}

#[instrument(skip_all, name = "mesh_molecule", fields(surface = %job.surface_base.display()))]
pub fn convert_molecule(job: &MeshJob) -> Result<MeshSummary, EngineError> {
    let mesh = load_surface(&job.surface_base)?;
    OffWriter
        .write_to_path(&mesh, &job.output_path)
        .map_err(|source| EngineError::Write {
            path: job.output_path.clone(),
            source,
        })?;

    info!(
        "Wrote {} vertices and {} faces to '{}'.",
        mesh.vertex_count(),
        mesh.face_count(),
        job.output_path.display()
    );
    Ok(MeshSummary {
        vertices: mesh.vertex_count(),
        faces: mesh.face_count(),
    })
}

#[instrument(skip_all, name = "mesh_batch", fields(molecules = molecules.len()))]
pub fn run_batch(
    layout: &BatchLayout,
    molecules: &[String],
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> BatchReport<MeshSummary> {
    batch::run_batch("Converting meshes", molecules, reporter, cancel, |molecule| {
        convert_molecule(&MeshJob::from_layout(layout, molecule))
    })
}
