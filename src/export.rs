//! Report export
//!
//! Serializers receive a finished `Report` and only write it out; the rows
//! were already selected and rendered by the query engine.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::errors::Result;
use crate::fs;
use crate::query::Report;

/// A written report file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub path: PathBuf,
    pub rows: usize,
}

/// Turns a projected report into a file artifact
pub trait Exporter {
    fn export(&self, report: &Report, date: NaiveDate) -> Result<ExportArtifact>;
}

/// File name for a report exported on `date`
pub fn export_file_name(key: &str, date: NaiveDate, extension: &str) -> String {
    format!("reporte_{}_{}.{}", key, date.format("%Y-%m-%d"), extension)
}

/// Writes reports as pretty JSON documents
#[derive(Debug, Clone)]
pub struct JsonExporter {
    dir: PathBuf,
}

impl JsonExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonExporter { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Exporter for JsonExporter {
    fn export(&self, report: &Report, date: NaiveDate) -> Result<ExportArtifact> {
        let path = self.dir.join(export_file_name(report.key, date, "json"));
        fs::write_json(&path, report)?;
        info!(report = report.key, rows = report.rows.len(), path = %path.display(), "Exported report");
        Ok(ExportArtifact {
            path,
            rows: report.rows.len(),
        })
    }
}
