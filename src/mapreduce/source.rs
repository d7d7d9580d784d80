//! Record suppliers
//!
//! The engine needs a finite, ordered sequence of records whose length is
//! known before partitioning. Sources produce that sequence in one go.

use crate::error::{MapReduceError, MapReduceResult};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Supplies the records of one run
pub trait RecordSource {
    fn records(&mut self) -> MapReduceResult<Vec<String>>;
}

/// The four sentences counted when no input is given
pub fn sample_corpus() -> Vec<String> {
    vec![
        "This is sentence one.".to_string(),
        "This is sentence two.".to_string(),
        "This is a sentence that ends with red.".to_string(),
        "This is a sentence that ends with blue.".to_string(),
    ]
}

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<String>,
}

impl InMemorySource {
    pub fn new<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: records.into_iter().map(Into::into).collect(),
        }
    }

    pub fn sample() -> Self {
        Self::new(sample_corpus())
    }
}

impl RecordSource for InMemorySource {
    fn records(&mut self) -> MapReduceResult<Vec<String>> {
        Ok(self.records.clone())
    }
}

/// One record per line of a buffered reader
pub struct ReaderSource<R> {
    reader: R,
    name: String,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
        }
    }
}

impl<R: BufRead> RecordSource for ReaderSource<R> {
    fn records(&mut self) -> MapReduceResult<Vec<String>> {
        read_lines(&mut self.reader, &self.name)
    }
}

fn read_lines<R: BufRead>(reader: R, name: &str) -> MapReduceResult<Vec<String>> {
    reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| MapReduceError::io(format!("reading records from {name}"), e))
}

/// One record per line across a list of files, in order
///
/// The path `-` reads standard input.
#[derive(Debug, Clone)]
pub struct FileSource {
    paths: Vec<PathBuf>,
}

impl FileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl RecordSource for FileSource {
    fn records(&mut self) -> MapReduceResult<Vec<String>> {
        let mut records = Vec::new();
        for path in &self.paths {
            if path.as_path() == Path::new("-") {
                let stdin = std::io::stdin();
                records.extend(ReaderSource::new(stdin.lock(), "stdin").records()?);
                continue;
            }

            let name = path.display().to_string();
            let file = std::fs::File::open(path)
                .map_err(|e| MapReduceError::io(format!("opening {name}"), e))?;
            records.extend(read_lines(std::io::BufReader::new(file), &name)?);
        }
        Ok(records)
    }
}
