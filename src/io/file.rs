//! Input/Output stream handling with [`InputStream`] and [`OutputStream`].
//!
//! These types abstract over reading/writing both plaintext and gzip-compressed
//! files, as well as standard input and output.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Check if a file is a gzipped by looking for the magic numbers
pub fn is_gzipped_file(file_path: impl AsRef<Path>) -> io::Result<bool> {
    let mut file = File::open(file_path.as_ref())?;
    let mut buffer = [0; 2];
    match file.read_exact(&mut buffer) {
        Ok(()) => Ok(buffer == [0x1f, 0x8b]),
        // files shorter than the magic number cannot be gzipped
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

#[derive(Clone, Debug, PartialEq)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

/// Represents an input stream.
///
/// This abstracts how data is read in, allowing for plaintext files, gzip-compressed
/// files and standard input to be read through a common interface.
#[derive(Clone, Debug)]
pub struct InputStream {
    source: InputSource,
}

impl InputStream {
    /// Constructs a new `InputStream` reading from a file.
    ///
    /// # Arguments
    ///
    /// * `filepath` - The path to the file. If the file starts with the gzip magic
    /// numbers, `InputStream` will automatically uncompress the input.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            source: InputSource::File(filepath.into()),
        }
    }

    /// Constructs a new [`InputStream`] for standard input.
    pub fn new_stdin() -> Self {
        Self {
            source: InputSource::Stdin,
        }
    }

    /// Build an [`InputStream`] from an optional path, falling back to standard input.
    pub fn from_option(filepath: Option<impl Into<PathBuf>>) -> Self {
        filepath.map_or_else(Self::new_stdin, Self::new)
    }

    /// The file path, or `None` when reading standard input.
    pub fn filepath(&self) -> Option<&Path> {
        match &self.source {
            InputSource::File(path) => Some(path),
            InputSource::Stdin => None,
        }
    }

    /// Opens the stream and returns a buffered reader.
    ///
    /// Gzip-compressed files are decompressed on the fly. Standard input is
    /// always read as plaintext.
    pub fn reader(&self) -> io::Result<BufReader<Box<dyn Read>>> {
        let reader: Box<dyn Read> = match &self.source {
            InputSource::File(path) => {
                let file = File::open(path)?;
                if is_gzipped_file(path)? {
                    Box::new(GzDecoder::new(file))
                } else {
                    Box::new(file)
                }
            }
            InputSource::Stdin => Box::new(io::stdin()),
        };
        Ok(BufReader::new(reader))
    }
}

enum OutputDestination {
    File(PathBuf),
    Stdout,
}

/// Represents an output stream.
///
/// This abstracts writing plaintext files, gzip-compressed files, and standard output.
pub struct OutputStream {
    destination: OutputDestination,
}

impl OutputStream {
    /// Constructs a new `OutputStream` writing to a file.
    ///
    /// If the file extension is `.gz`, `OutputStream` will automatically write
    /// gzip-compressed output.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            destination: OutputDestination::File(filepath.into()),
        }
    }

    /// Constructs a new [`OutputStream`] for standard output.
    pub fn new_stdout() -> Self {
        Self {
            destination: OutputDestination::Stdout,
        }
    }

    /// Build an [`OutputStream`] from an optional path, falling back to standard output.
    pub fn from_option(filepath: Option<impl Into<PathBuf>>) -> Self {
        filepath.map_or_else(Self::new_stdout, Self::new)
    }

    /// Opens the destination and returns a buffered writer.
    pub fn writer(&self) -> io::Result<Box<dyn Write>> {
        let writer: Box<dyn Write> = match &self.destination {
            OutputDestination::File(path) => {
                let is_gzip = path.extension().map_or(false, |ext| ext == "gz");
                if is_gzip {
                    Box::new(BufWriter::new(GzEncoder::new(
                        File::create(path)?,
                        Compression::default(),
                    )))
                } else {
                    Box::new(BufWriter::new(File::create(path)?))
                }
            }
            OutputDestination::Stdout => Box::new(BufWriter::new(io::stdout())),
        };
        Ok(writer)
    }
}
