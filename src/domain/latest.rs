// Latest-value aggregation over date-tagged readings
use crate::domain::site::Site;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// One backend row: a scalar metric value observed at a site on a date.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub site: Site,
    pub date: NaiveDate,
    pub value: f64,
}

/// The most recent value per site, plus the newest publish date seen across
/// all rows. `published` is `None` when the input held no rows at all, which
/// callers must treat differently from a valid date.
#[derive(Debug, Clone, Serialize)]
pub struct LatestSnapshot {
    pub values: BTreeMap<Site, f64>,
    pub published: Option<NaiveDate>,
}

/// Reduce a historical backlog to one value per site: the value at the
/// maximum date. Rows are re-sorted descending by date first, so unsorted
/// input is handled; the sort is stable, so for duplicate dates the row that
/// appeared first in the input wins.
pub fn latest_by_site(rows: &[Reading]) -> LatestSnapshot {
    let mut sorted: Vec<&Reading> = rows.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut values = BTreeMap::new();
    for row in &sorted {
        values.entry(row.site).or_insert(row.value);
    }

    LatestSnapshot {
        values,
        published: sorted.first().map(|r| r.date),
    }
}

/// Estimate the actual observation date from a publish date by backing off
/// the satellite-to-publish latency. Calendar arithmetic, so month and year
/// boundaries roll over correctly.
pub fn estimated_observation(published: NaiveDate, offset_days: i64) -> NaiveDate {
    published - Duration::days(offset_days)
}
