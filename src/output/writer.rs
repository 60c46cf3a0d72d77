// Fri Feb 06 2026 - Alex

use crate::output::SnapshotError;
use crate::symbol::{Arity, SymbolRecord};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub const FIELD_DELIMITER: u8 = b'\t';
pub const NOT_APPLICABLE_MARKER: &str = "-1";
pub const UNKNOWN_MARKER: &str = "?";

/// Writes `name<TAB>category<TAB>arity` lines.
pub struct SnapshotWriter<W: Write> {
    inner: BufWriter<W>,
    written: usize,
}

impl SnapshotWriter<File> {
    /// Opens `path` for writing, truncating whatever an earlier run left.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|source| SnapshotError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> SnapshotWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write_record(&mut self, record: &SymbolRecord) -> Result<(), SnapshotError> {
        self.inner.write_all(&record.name)?;
        self.inner.write_all(&[FIELD_DELIMITER])?;
        write!(self.inner, "{}", record.category)?;
        self.inner.write_all(&[FIELD_DELIMITER])?;
        match record.arity {
            Arity::Count(n) => write!(self.inner, "{}", n)?,
            Arity::NotApplicable => self.inner.write_all(NOT_APPLICABLE_MARKER.as_bytes())?,
            Arity::Unknown => self.inner.write_all(UNKNOWN_MARKER.as_bytes())?,
        }
        self.inner.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize, SnapshotError> {
        self.inner.flush()?;
        Ok(self.written)
    }

    pub fn into_inner(self) -> Result<W, SnapshotError> {
        self.inner
            .into_inner()
            .map_err(|e| SnapshotError::Io(e.into_error()))
    }
}
