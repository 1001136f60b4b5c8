//! Export command - Write reports to the export directory

use std::path::Path;

use crate::errors::Result;
use crate::export::JsonExporter;
use crate::fs::get_exports_dir;
use crate::query::{ReportKind, REPORT_KINDS};

use super::{open_herd, parse_arg};

/// Export the named reports, or every report when none is named
pub async fn run(cwd: Option<&Path>, reports: &[String], dry_run: bool) -> Result<()> {
    let kinds: Vec<ReportKind> = if reports.is_empty() {
        REPORT_KINDS.to_vec()
    } else {
        reports
            .iter()
            .map(|r| parse_arg::<ReportKind>(r))
            .collect::<Result<_>>()?
    };

    let herd = open_herd(cwd, None).await?;
    let dir = get_exports_dir(&herd.root, &herd.config.export_dir);

    if dry_run {
        for kind in &kinds {
            println!("[DRY RUN] Would export {} to {}", kind.label(), dir.display());
        }
        return Ok(());
    }

    let exporter = JsonExporter::new(dir);
    for kind in kinds {
        let artifact = herd.session.export(kind, &exporter).await?;
        println!(
            "{}: {} rows -> {}",
            kind.label(),
            artifact.rows,
            artifact.path.display()
        );
    }
    Ok(())
}
