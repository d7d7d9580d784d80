//! Report sinks for the final word totals

use super::aggregation::FinalAggregate;
use super::pure::formatting::{render_report, ReportFormat};
use crate::error::{MapReduceError, MapReduceResult};
use std::io::Write;

/// Receives the final aggregate once a run is done
pub trait ReportSink {
    fn emit(&mut self, totals: &FinalAggregate) -> MapReduceResult<()>;
}

/// Renders the report into any writer
pub struct WriterSink<W> {
    writer: W,
    format: ReportFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: ReportFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout(format: ReportFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn emit(&mut self, totals: &FinalAggregate) -> MapReduceResult<()> {
        let report = render_report(totals, self.format)?;
        self.writer
            .write_all(report.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|e| MapReduceError::io("writing report", e))
    }
}

/// Keeps the last emitted aggregate in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub emitted: Option<FinalAggregate>,
}

impl ReportSink for CollectingSink {
    fn emit(&mut self, totals: &FinalAggregate) -> MapReduceResult<()> {
        self.emitted = Some(totals.clone());
        Ok(())
    }
}
