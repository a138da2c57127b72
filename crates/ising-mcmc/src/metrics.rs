use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::observables::ObservableSample;

/// Header row of the per-temperature observables CSV.
pub const CSV_HEADER: &str =
    "temperature,energy,magnetization,specific_heat,susceptibility,acceptance_rate";

/// Collects per-temperature observables for CSV export.
#[derive(Debug, Default, Clone)]
pub struct MetricsRecorder {
    samples: Vec<ObservableSample>,
}

impl MetricsRecorder {
    /// Creates a new recorder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the sample for the next temperature.
    pub fn push(&mut self, sample: ObservableSample) {
        self.samples.push(sample);
    }

    /// Consumes the recorder, returning its samples.
    pub fn into_samples(self) -> Vec<ObservableSample> {
        self.samples
    }

    /// Writes the samples as CSV to an arbitrary writer.
    pub fn write_csv_to<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "{CSV_HEADER}")?;
        for sample in &self.samples {
            writeln!(
                out,
                "{},{:.8},{:.8},{:.8},{:.8},{:.6}",
                sample.temperature,
                sample.energy,
                sample.magnetization,
                sample.specific_heat,
                sample.susceptibility,
                sample.acceptance_rate
            )?;
        }
        out.flush()
    }

    /// Writes the recorded samples to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        self.write_csv_to(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_header_and_one_row_per_temperature() {
        let mut recorder = MetricsRecorder::new();
        for (idx, temperature) in [1.5, 2.5].into_iter().enumerate() {
            recorder.push(ObservableSample {
                temperature,
                energy: -1.0 - idx as f64,
                magnetization: 0.5,
                specific_heat: 0.25,
                susceptibility: 0.125,
                acceptance_rate: 0.5,
            });
        }
        let mut buffer = Vec::new();
        recorder.write_csv_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "1.5,-1.00000000,0.50000000,0.25000000,0.12500000,0.500000"
        );
        assert!(lines[2].starts_with("2.5,-2.00000000,"));
    }
}
