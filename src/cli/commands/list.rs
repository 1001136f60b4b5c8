//! List command - List animals in a view with filtering and sorting

use std::path::Path;

use serde::Serialize;

use crate::domain::{classify, ReproductiveState};
use crate::errors::Result;
use crate::query::{HerdView, SortConfig, SortDirection, SortKey, ViewQuery};
use crate::schemas::AnimalRecord;

use super::{open_herd, parse_arg, print_json};

/// A listed animal with its derived state
#[derive(Debug, Serialize)]
pub struct ListRow<'a> {
    pub state: ReproductiveState,
    #[serde(flatten)]
    pub record: &'a AnimalRecord,
}

/// Build the view query from the list arguments.
///
/// Without `--sort` the view's default sort applies; `--desc` alone
/// reverses that default.
pub fn build_query(
    view: &str,
    name: Option<&str>,
    sort: Option<&str>,
    desc: bool,
) -> Result<ViewQuery> {
    let view: HerdView = parse_arg(view)?;
    let mut query = ViewQuery::new(view).with_name_filter(name.unwrap_or_default());

    let direction = if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let sort = match sort {
        Some(key) => Some(SortConfig {
            key: parse_arg::<SortKey>(key)?,
            direction,
        }),
        None if desc => Some(SortConfig {
            key: query.sort.map_or(SortKey::ScoredAt, |s| s.key),
            direction,
        }),
        None => query.sort,
    };
    query = query.with_sort(sort);
    Ok(query)
}

/// One table line for an animal
pub(crate) fn format_row(record: &AnimalRecord) -> String {
    format!(
        "{:>5}  {:<24} {:<14} {:>6.2}  {}",
        record.id,
        record.name(),
        classify(record).herd_label(),
        record.score,
        record.scored_at.format("%Y-%m-%d %H:%M"),
    )
}

/// List animals in a view
pub async fn run(
    cwd: Option<&Path>,
    view: &str,
    name: Option<&str>,
    sort: Option<&str>,
    desc: bool,
    json: bool,
) -> Result<()> {
    let query = build_query(view, name, sort, desc)?;
    let herd = open_herd(cwd, None).await?;
    let rows = herd.session.view(&query);

    if json {
        let rows: Vec<ListRow<'_>> = rows
            .iter()
            .map(|record| ListRow {
                state: classify(record),
                record,
            })
            .collect();
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No animals in view '{}'", query.view);
        return Ok(());
    }

    println!(
        "{:>5}  {:<24} {:<14} {:>6}  {}",
        "ID", "NAME", "STATE", "SCORE", "SCORED"
    );
    for record in &rows {
        println!("{}", format_row(record));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_uses_view_default() {
        let query = build_query("history", None, None, false).unwrap();
        assert_eq!(query.view, HerdView::All);
        assert_eq!(query.sort, Some(SortConfig::descending(SortKey::ScoredAt)));
    }

    #[test]
    fn test_build_query_explicit_sort() {
        let query = build_query("estrus", Some("lun"), Some("score"), true).unwrap();
        assert_eq!(query.view, HerdView::PossibleEstrus);
        assert_eq!(query.name_filter, "lun");
        assert_eq!(query.sort, Some(SortConfig::descending(SortKey::Score)));
    }

    #[test]
    fn test_build_query_bucket_unsorted_by_default() {
        let query = build_query("pregnant", None, None, false).unwrap();
        assert_eq!(query.sort, None);
    }

    #[test]
    fn test_build_query_rejects_unknown_view() {
        let err = build_query("sold", None, None, false).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
