//! Headless presentation that writes each published frame as CSV rows.

use std::io::Write;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use log::{error, warn};

use harmonic_lab::{Error, Presentation, Waveform};

pub struct CsvPresentation<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
    failure: Option<csv::Error>,
    last_error: Option<Error>,
}

impl<W: Write> CsvPresentation<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
            rows: 0,
            failure: None,
            last_error: None,
        }
    }

    fn write_frame(&mut self, raw: &Waveform, filtered: &Waveform) -> csv::Result<()> {
        if self.rows == 0 {
            self.writer.write_record(["time", "raw", "filtered"])?;
        }
        for ((t, r), f) in raw.samples().zip(filtered.values()) {
            self.writer
                .write_record([t.to_string(), r.to_string(), f.to_string()])?;
            self.rows += 1;
        }
        Ok(())
    }

    /// Flush and report the number of data rows, or the first write failure.
    pub fn finish(mut self) -> EyreResult<usize> {
        if let Some(err) = self.failure.take() {
            return Err(err).wrap_err("failed to write CSV");
        }
        if let Some(err) = self.last_error.take() {
            return Err(err).wrap_err("last frame was not exported");
        }
        self.writer.flush().wrap_err("failed to flush CSV output")?;
        Ok(self.rows)
    }
}

impl<W: Write> Presentation for CsvPresentation<W> {
    fn render(&mut self, raw: &Waveform, filtered: &Waveform) {
        if self.failure.is_some() {
            return;
        }
        if let Err(err) = self.write_frame(raw, filtered) {
            error!("csv write failed: {err}");
            self.failure = Some(err);
        }
    }

    fn show_error(&mut self, error: &Error) {
        warn!("frame not exported: {error}");
        self.last_error = Some(error.clone());
    }

    fn clear_error(&mut self) {
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_one_row_per_sample() {
        let raw = Waveform::new(vec![0.0, 0.5], vec![1.0, -1.0]).unwrap();
        let filtered = Waveform::new(vec![0.0, 0.5], vec![0.25, 0.5]).unwrap();

        let mut out = Vec::new();
        let mut csv = CsvPresentation::new(&mut out);
        csv.render(&raw, &filtered);
        assert_eq!(csv.finish().unwrap(), 2);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "time,raw,filtered\n0,1,0.25\n0.5,-1,0.5\n");
    }

    #[test]
    fn test_pipeline_error_fails_finish() {
        let mut csv = CsvPresentation::new(Vec::new());
        csv.show_error(&Error::EmptyInput { stage: "test" });
        assert!(csv.finish().is_err());
    }
}
