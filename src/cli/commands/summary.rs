//! Summary command - Herd counts and mean score

use std::path::Path;

use crate::errors::Result;

use super::{open_herd, print_json};

/// Show herd counts and mean score
pub async fn run(cwd: Option<&Path>, json: bool) -> Result<()> {
    let herd = open_herd(cwd, None).await?;
    let summary = herd.session.summary();

    if json {
        return print_json(&summary);
    }

    println!("Animals:          {}", summary.total);
    println!("Possible estrus:  {}", summary.possible_estrus);
    println!("Inseminated:      {}", summary.inseminated);
    println!("Pregnant:         {}", summary.pregnant);
    println!("Other:            {}", summary.other);
    println!("Mean score:       {}%", summary.mean_score_display());
    Ok(())
}
