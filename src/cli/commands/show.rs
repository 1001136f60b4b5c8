//! Show command - Show details of a specific animal

use std::path::Path;

use serde::Serialize;

use crate::domain::{allowed_actions, classify, temperature_health, ReproductiveState, TemperatureHealth};
use crate::errors::Result;
use crate::schemas::{AnimalId, AnimalRecord};

use super::{open_herd, print_json};

#[derive(Debug, Serialize)]
struct AnimalDetail<'a> {
    state: ReproductiveState,
    allowed_actions: Vec<String>,
    #[serde(flatten)]
    record: &'a AnimalRecord,
}

fn date_or_dash(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string())
}

/// Show details of a specific animal
pub async fn run(cwd: Option<&Path>, id: AnimalId, json: bool) -> Result<()> {
    let herd = open_herd(cwd, None).await?;
    let record = herd.session.get(id)?;
    let state = classify(&record);
    let actions: Vec<String> = allowed_actions(&record)
        .iter()
        .map(|a| a.to_string())
        .collect();

    if json {
        return print_json(&AnimalDetail {
            state,
            allowed_actions: actions,
            record: &record,
        });
    }

    let b = &record.biometrics;
    println!("Animal {}: {}", record.id, b.name);
    println!("  State:           {} ({})", state.herd_label(), state);
    println!("  Score:           {:.2}% at {}", record.score, record.scored_at.format("%Y-%m-%d %H:%M"));
    println!("  Breed:           {} ({})", b.breed.label(), b.breed.code());
    println!("  Activity:        {} steps/day", b.activity);
    let fever = match temperature_health(b.temperature) {
        TemperatureHealth::Healthy => "",
        TemperatureHealth::Unhealthy => "  [outside healthy range]",
    };
    println!("  Temperature:     {} °C{}", b.temperature, fever);
    println!("  Days postpartum: {}", b.days_postpartum);
    println!("  Body condition:  {}", b.body_condition);
    println!("  Assisted birth:  {}", if b.assisted_birth { "yes" } else { "no" });
    println!("  Inseminated:     {}", date_or_dash(record.insemination_date()));
    println!("  Pregnant:        {}", date_or_dash(record.pregnancy_date()));
    println!("  Actions:         {}", actions.join(", "));
    Ok(())
}
