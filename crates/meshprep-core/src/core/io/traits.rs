use super::atomic::write_atomically;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Defines the interface for parsing a text file format.
///
/// Readers carry their format options (section markers, record keywords, ...) as
/// fields, so parsing is a method on a configured reader value.
pub trait TextReader {
    /// The parsed content of one file.
    type Output;

    /// The error type for parsing operations.
    type Error: Error + From<io::Error>;

    /// Parses the format from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Parses the format from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.read_from(&mut reader)
    }
}

/// Defines the interface for serializing a value to a text file format.
pub trait TextWriter {
    /// The value written by this format.
    type Input: ?Sized;

    /// Serializes `value` to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(&self, value: &Self::Input, writer: &mut impl Write) -> io::Result<()>;

    /// Serializes `value` to a file path, replacing any existing file atomically.
    ///
    /// The target is either left untouched or fully replaced, never partially written.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created, written, or renamed.
    fn write_to_path<P: AsRef<Path>>(&self, value: &Self::Input, path: P) -> io::Result<()> {
        write_atomically(path.as_ref(), |writer| self.write_to(value, writer))
    }
}
