// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends one CSV row per training epoch to metrics.csv in the
// model directory:
//
//   epoch,train_loss,val_loss,val_accuracy
//   1,0.693100,0.690200,0.500000
//   2,0.512300,0.540100,0.750000
//
// val_loss and val_accuracy are NaN when the run had no
// validation samples.

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// 1-based
    pub epoch:        usize,
    /// Mean cross-entropy over the epoch's training batches
    pub train_loss:   f64,
    /// Mean cross-entropy over validation batches; NaN if there were none
    pub val_loss:     f64,
    /// Fraction of validation questions labelled correctly, in [0, 1]
    pub val_accuracy: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: f64, val_accuracy: f64) -> Self {
        Self { epoch, train_loss, val_loss, val_accuracy }
    }

    /// True if this epoch's val_loss beats `best_val_loss`.
    /// A NaN loss (no validation samples) never counts.
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,val_loss,val_accuracy")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            f,
            "{},{:.6},{:.6},{:.6}",
            m.epoch, m.train_loss, m.val_loss, m.val_accuracy,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch, m.train_loss, m.val_loss,
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_improvement() {
        let m = EpochMetrics::new(2, 2.5, 2.3, 0.2);
        assert!(m.is_improvement(3.0));
        assert!(!m.is_improvement(2.0));

        let no_val = EpochMetrics::new(1, 0.7, f64::NAN, f64::NAN);
        assert!(!no_val.is_improvement(f64::INFINITY));
    }

    #[test]
    fn test_rows_are_appended_under_one_header() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(1, 0.7, 0.6, 0.5)).unwrap();

        // a second logger on the same dir must not rewrite the header
        let again = MetricsLogger::new(dir.path()).unwrap();
        again.log(&EpochMetrics::new(2, 0.5, 0.4, 1.0)).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "epoch,train_loss,val_loss,val_accuracy");
        assert_eq!(lines[2], "2,0.500000,0.400000,1.000000");
    }
}
