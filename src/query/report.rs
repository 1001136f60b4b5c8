//! Report projections
//!
//! Each report is a fixed column set over rows the engine already selected.
//! Serializers receive the finished rows and never classify anything.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::schemas::{AnimalRecord, User};

use super::buckets::{select, HerdView};

/// Report that can be exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Usuarios,
    VacasGeneral,
    VacasCelo,
    VacasGestantes,
    VacasInseminadas,
}

/// All reports in menu order
pub const REPORT_KINDS: &[ReportKind] = &[
    ReportKind::Usuarios,
    ReportKind::VacasGeneral,
    ReportKind::VacasCelo,
    ReportKind::VacasGestantes,
    ReportKind::VacasInseminadas,
];

const USER_COLUMNS: &[&str] = &["Usuario", "Email", "Rol", "Finca", "Teléfono"];

const GENERAL_COLUMNS: &[&str] = &[
    "Nombre",
    "Raza",
    "Temperatura Corporal",
    "Condición Corporal",
    "Gestante",
    "Inseminada",
    "Probabilidad de celo (%)",
    "Fecha",
];

const ESTRUS_COLUMNS: &[&str] = &[
    "Nombre",
    "Probabilidad (%)",
    "Fecha",
    "Actividad Física",
    "Temperatura corporal",
];

const BREEDING_COLUMNS: &[&str] = &[
    "Nombre",
    "Fecha inseminación",
    "Días posparto",
    "Condición",
    "Raza",
];

impl ReportKind {
    /// Stable report key used in file names
    pub fn key(&self) -> &'static str {
        match self {
            ReportKind::Usuarios => "usuarios",
            ReportKind::VacasGeneral => "vacas_general",
            ReportKind::VacasCelo => "vacas_celo",
            ReportKind::VacasGestantes => "vacas_gestantes",
            ReportKind::VacasInseminadas => "vacas_inseminadas",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Usuarios => "Usuarios",
            ReportKind::VacasGeneral => "Vacas (todas)",
            ReportKind::VacasCelo => "Vacas en posible celo",
            ReportKind::VacasGestantes => "Vacas gestantes",
            ReportKind::VacasInseminadas => "Vacas inseminadas",
        }
    }

    /// Fixed column headers
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ReportKind::Usuarios => USER_COLUMNS,
            ReportKind::VacasGeneral => GENERAL_COLUMNS,
            ReportKind::VacasCelo => ESTRUS_COLUMNS,
            ReportKind::VacasGestantes | ReportKind::VacasInseminadas => BREEDING_COLUMNS,
        }
    }

    /// Herd view the rows come from; `None` for the user report
    pub fn view(&self) -> Option<HerdView> {
        match self {
            ReportKind::Usuarios => None,
            ReportKind::VacasGeneral => Some(HerdView::All),
            ReportKind::VacasCelo => Some(HerdView::PossibleEstrus),
            ReportKind::VacasGestantes => Some(HerdView::Pregnant),
            ReportKind::VacasInseminadas => Some(HerdView::InseminatedPending),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REPORT_KINDS
            .iter()
            .copied()
            .find(|k| k.key() == s)
            .ok_or_else(|| format!("Unknown report: {}", s))
    }
}

/// A projected report: headers plus pre-rendered cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub key: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn yes_no(value: bool) -> String {
    if value { "Sí" } else { "No" }.to_string()
}

fn date(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn optional_date(value: Option<DateTime<Utc>>) -> String {
    value.map(date).unwrap_or_default()
}

fn animal_row(kind: ReportKind, record: &AnimalRecord) -> Vec<String> {
    let b = &record.biometrics;
    match kind {
        ReportKind::VacasGeneral => vec![
            b.name.clone(),
            b.breed.code().to_string(),
            b.temperature.to_string(),
            b.body_condition.to_string(),
            yes_no(record.pregnant()),
            yes_no(record.inseminated()),
            format!("{:.2}", record.score),
            date(record.scored_at),
        ],
        ReportKind::VacasCelo => vec![
            b.name.clone(),
            format!("{:.2}", record.score),
            date(record.scored_at),
            b.activity.to_string(),
            b.temperature.to_string(),
        ],
        ReportKind::VacasGestantes | ReportKind::VacasInseminadas => vec![
            b.name.clone(),
            optional_date(record.insemination_date()),
            b.days_postpartum.to_string(),
            b.body_condition.to_string(),
            b.breed.code().to_string(),
        ],
        ReportKind::Usuarios => Vec::new(),
    }
}

fn user_row(user: &User) -> Vec<String> {
    vec![
        user.username.clone(),
        user.email.clone(),
        user.role.to_string(),
        user.farm.clone(),
        user.phone.clone(),
    ]
}

/// Project rows that were already selected for `kind`.
///
/// The rows are rendered in the order given.
pub fn project_rows(kind: ReportKind, rows: &[&AnimalRecord]) -> Report {
    Report {
        key: kind.key(),
        columns: kind.columns().to_vec(),
        rows: rows.iter().map(|r| animal_row(kind, r)).collect(),
    }
}

/// Build a report from the herd collection and the user directory
pub fn project_report(kind: ReportKind, records: &[AnimalRecord], users: &[User]) -> Report {
    match kind.view() {
        Some(view) => project_rows(kind, &select(records, view)),
        None => Report {
            key: kind.key(),
            columns: kind.columns().to_vec(),
            rows: users.iter().map(user_row).collect(),
        },
    }
}
