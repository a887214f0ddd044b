use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::trace;

/// Writes a file through a temporary sibling that is renamed over `path` on success.
///
/// Missing parent directories are created. If `write` fails, or the process stops
/// before the rename, the temporary file is discarded and `path` is unchanged.
pub fn write_atomically<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    trace!("Staging {:?} in {:?}", path, temp.path());
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_content_and_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mol").join("out.txt");

        write_atomically(&path, |w| writeln!(w, "hello")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn failed_write_leaves_existing_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "previous").unwrap();

        let result = write_atomically(&path, |w| {
            write!(w, "partial")?;
            Err(io::Error::new(io::ErrorKind::Interrupted, "stopped"))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_write_does_not_create_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never.txt");

        let result = write_atomically(&path, |_| Err(io::Error::other("boom")));

        assert!(result.is_err());
        assert!(!path.exists());
    }
}
