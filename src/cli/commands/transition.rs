//! Transition commands - inseminate, pregnant, revert and delete

use std::path::Path;

use chrono::Utc;

use crate::domain::{apply_action, classify, Action, ActionKind, TransitionResult};
use crate::errors::{HerdError, Result};
use crate::schemas::AnimalId;

use super::open_herd;

fn action_for(kind: ActionKind) -> Result<Action> {
    match kind {
        ActionKind::MarkInseminated => Ok(Action::MarkInseminated),
        ActionKind::DeclarePregnant => Ok(Action::DeclarePregnant),
        ActionKind::RevertToInseminated => Ok(Action::RevertToInseminated),
        ActionKind::Delete => Ok(Action::Delete),
        ActionKind::Reevaluate => Err(HerdError::Validation(
            "reevaluate needs biometrics; use the reevaluate command".to_string(),
        )),
    }
}

/// Apply a lifecycle action to one animal
pub async fn run(
    cwd: Option<&Path>,
    user: Option<&str>,
    id: AnimalId,
    kind: ActionKind,
    dry_run: bool,
) -> Result<()> {
    let action = action_for(kind)?;
    let herd = open_herd(cwd, user).await?;
    let session = &herd.session;

    if dry_run {
        if kind == ActionKind::Delete {
            println!("[DRY RUN] Would delete {}", id);
            return Ok(());
        }
        let current = session.get(id)?;
        return match apply_action(&current, &action, Utc::now()) {
            TransitionResult::Error { rejection } => Err(rejection.into()),
            result => {
                let next = result.record().map(|r| classify(&r).herd_label());
                println!(
                    "[DRY RUN] Would {} {}: {} -> {}",
                    kind,
                    id,
                    classify(&current).herd_label(),
                    next.unwrap_or("removed")
                );
                Ok(())
            }
        };
    }

    let record = match kind {
        ActionKind::MarkInseminated => session.mark_inseminated(id).await?,
        ActionKind::DeclarePregnant => session.declare_pregnant(id).await?,
        ActionKind::RevertToInseminated => session.revert_to_inseminated(id).await?,
        _ => {
            if session.delete(id).await? {
                println!("Deleted {}", id);
            } else {
                println!("Animal {} was already absent", id);
            }
            return Ok(());
        }
    };

    println!(
        "{} '{}' is now {}",
        record.id,
        record.name(),
        classify(&record).herd_label()
    );
    Ok(())
}
