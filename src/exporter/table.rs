use crate::errors::{AppError, AppResult};
use flate2::write::GzEncoder;
use flate2::Compression;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output destination for one CSV table, optionally gzip-compressed.
enum Sink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}

impl Sink {
    /// Finalizes the sink; for gzip this writes the trailer.
    fn finish(self) -> AppResult<()> {
        match self {
            Sink::Plain(mut w) => w.flush()?,
            Sink::Gzip(encoder) => encoder.finish()?.flush()?,
        }
        Ok(())
    }
}

/// Buffered writer for one relational CSV table.
///
/// Rows are accumulated up to `batch_size`, then transposed into columns and
/// appended through a polars DataFrame. Buffering the batch, not the table,
/// keeps peak memory proportional to the batch size however large the dump.
/// The header is written on the first flush only; a table that never sees a
/// row still gets its header on finish.
pub(crate) struct TableWriter {
    path: PathBuf,
    columns: &'static [&'static str],
    rows: Vec<Vec<Option<String>>>,
    sink: Sink,
    header_written: bool,
    batch_size: usize,
}

impl TableWriter {
    pub fn create(
        dir: &Path,
        name: &str,
        columns: &'static [&'static str],
        batch_size: usize,
        compress: bool,
    ) -> AppResult<Self> {
        let file_name = if compress {
            format!("{name}.gz")
        } else {
            name.to_string()
        };
        let path = dir.join(file_name);
        let file = File::create(&path)
            .map_err(|e| AppError::IoError(format!("Failed to create CSV file {path:?}: {e}")))?;
        let sink = if compress {
            Sink::Gzip(GzEncoder::new(BufWriter::new(file), Compression::default()))
        } else {
            Sink::Plain(BufWriter::new(file))
        };
        Ok(Self {
            path,
            columns,
            rows: Vec::with_capacity(batch_size.min(65_536)),
            sink,
            header_written: false,
            batch_size,
        })
    }

    pub fn push(&mut self, row: Vec<Option<String>>) -> AppResult<()> {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
        if self.rows.len() >= self.batch_size {
            self.flush_batch()?;
        }
        Ok(())
    }

    fn flush_batch(&mut self) -> AppResult<()> {
        let mut columns: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(self.rows.len()); self.columns.len()];
        for row in self.rows.drain(..) {
            for (values, cell) in columns.iter_mut().zip(row) {
                values.push(cell);
            }
        }

        let series: Vec<Series> = self
            .columns
            .iter()
            .zip(columns)
            .map(|(name, values)| Series::new(name, values))
            .collect();
        let mut df = DataFrame::new(series).map_err(|e| {
            AppError::IoError(format!(
                "Failed to build DataFrame for {:?}: {e}",
                self.path
            ))
        })?;

        CsvWriter::new(&mut self.sink)
            .include_header(!self.header_written)
            .finish(&mut df)
            .map_err(|e| AppError::IoError(format!("Failed to write {:?}: {e}", self.path)))?;
        self.header_written = true;
        Ok(())
    }

    /// Flushes the remaining rows and finalizes the sink.
    pub fn finish(mut self) -> AppResult<()> {
        self.flush_batch()?;
        self.sink.finish()
    }
}
