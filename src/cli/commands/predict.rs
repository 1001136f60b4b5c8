//! Predict and reevaluate commands - Score biometrics through the scorer

use std::path::Path;

use crate::domain::{can_reevaluate, classify, validate_biometrics, Rejection};
use crate::errors::{HerdError, Result};
use crate::schemas::{AnimalId, Biometrics};

use super::open_herd;

/// Score a new animal and add it to the herd
pub async fn run(
    cwd: Option<&Path>,
    user: Option<&str>,
    biometrics: Biometrics,
    dry_run: bool,
) -> Result<()> {
    let herd = open_herd(cwd, user).await?;
    if dry_run {
        let validation = validate_biometrics(&biometrics);
        if !validation.valid {
            return Err(HerdError::Validation(validation.reason.unwrap_or_default()));
        }
        println!("[DRY RUN] Would score '{}' and add it to the herd", biometrics.name);
        return Ok(());
    }

    let record = herd.session.submit_prediction(biometrics).await?;
    println!(
        "Added {} '{}' with score {:.2} ({})",
        record.id,
        record.name(),
        record.score,
        classify(&record).herd_label()
    );
    Ok(())
}

/// Rescore an animal that has not been inseminated
pub async fn reevaluate(
    cwd: Option<&Path>,
    user: Option<&str>,
    id: AnimalId,
    biometrics: Biometrics,
    dry_run: bool,
) -> Result<()> {
    let herd = open_herd(cwd, user).await?;

    if dry_run {
        let current = herd.session.get(id)?;
        let check = can_reevaluate(&current, &biometrics);
        if !check.valid {
            return Err(Rejection::from_validation(check).into());
        }
        println!("[DRY RUN] Would rescore {} '{}'", id, current.name());
        return Ok(());
    }

    let record = herd.session.reevaluate(id, biometrics).await?;
    println!(
        "Reevaluated {} '{}': score {:.2} ({})",
        record.id,
        record.name(),
        record.score,
        classify(&record).herd_label()
    );
    Ok(())
}
