// Per-site series reshaping for the chart layer
use crate::domain::severity::Metric;
use crate::domain::site::Site;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One annual value in a per-site series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// One plottable dataset: a site's values aligned to the shared label axis.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub site: Site,
    pub color: &'static str,
    pub values: Vec<f64>,
}

/// Chart-ready output: an ordered year axis plus one equal-length value array
/// per site. No entry is ever null; absent data is the 0.0 placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSlice {
    pub labels: Vec<i32>,
    pub datasets: Vec<Dataset>,
}

impl ChartSlice {
    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            datasets: Vec::new(),
        }
    }
}

/// Keep the last `n` years of every site's series, aligned to one shared
/// label axis.
///
/// The axis is the union of years across all sites so no site's data shifts
/// out of alignment; a site missing a year gets 0.0. When the input spans
/// fewer than `n` distinct years the axis is extended backwards by
/// consecutive years, so labels and datasets are always exactly `n` long.
/// An input with no data at all yields the empty slice.
pub fn slice_recent(series_by_site: &BTreeMap<Site, Vec<YearValue>>, n: usize) -> ChartSlice {
    let years: BTreeSet<i32> = series_by_site
        .values()
        .flatten()
        .map(|yv| yv.year)
        .collect();
    if years.is_empty() || n == 0 {
        return ChartSlice::empty();
    }

    let mut labels: Vec<i32> = years.iter().rev().take(n).rev().copied().collect();
    while labels.len() < n {
        let earliest = labels[0];
        labels.insert(0, earliest - 1);
    }

    let datasets = series_by_site
        .iter()
        .map(|(site, series)| {
            let values = labels
                .iter()
                .map(|year| {
                    series
                        .iter()
                        .find(|yv| yv.year == *year)
                        .map(|yv| yv.value)
                        .unwrap_or(0.0)
                })
                .collect();
            Dataset {
                site: *site,
                color: site.color(),
                values,
            }
        })
        .collect();

    ChartSlice { labels, datasets }
}

/// Map each value independently to its severity bucket color, using the same
/// threshold table as classification.
pub fn colorize(values: &[f64], metric: Metric) -> Vec<&'static str> {
    values
        .iter()
        .map(|v| metric.tier_for(*v).color())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::severity::SeverityTier;

    fn series(pairs: &[(i32, f64)]) -> Vec<YearValue> {
        pairs
            .iter()
            .map(|(year, value)| YearValue {
                year: *year,
                value: *value,
            })
            .collect()
    }

    #[test]
    fn test_last_n_alignment_and_padding() {
        let mut by_site = BTreeMap::new();
        by_site.insert(
            Site::Sesoko,
            series(&[(2018, 0.3), (2019, 0.6), (2020, 3.1), (2021, 0.8), (2022, 5.0), (2023, 2.1), (2024, 9.8)]),
        );
        // Ogasawara is missing 2022 and 2024.
        by_site.insert(Site::Ogasawara, series(&[(2020, 9.6), (2021, 3.4), (2023, 1.4)]));

        let slice = slice_recent(&by_site, 5);
        assert_eq!(slice.labels, vec![2020, 2021, 2022, 2023, 2024]);
        assert_eq!(slice.datasets.len(), 2);
        for dataset in &slice.datasets {
            assert_eq!(dataset.values.len(), 5);
        }
        let ogasawara = slice
            .datasets
            .iter()
            .find(|d| d.site == Site::Ogasawara)
            .unwrap();
        assert_eq!(ogasawara.values, vec![9.6, 3.4, 0.0, 1.4, 0.0]);
    }

    #[test]
    fn test_short_series_still_exactly_n() {
        let mut by_site = BTreeMap::new();
        by_site.insert(Site::Manza, series(&[(2023, 2.4), (2024, 10.9)]));
        let slice = slice_recent(&by_site, 5);
        assert_eq!(slice.labels, vec![2020, 2021, 2022, 2023, 2024]);
        assert_eq!(slice.datasets[0].values, vec![0.0, 0.0, 0.0, 2.4, 10.9]);
    }

    #[test]
    fn test_empty_input_yields_empty_slice() {
        let slice = slice_recent(&BTreeMap::new(), 5);
        assert!(slice.labels.is_empty());
        assert!(slice.datasets.is_empty());
    }

    #[test]
    fn test_dataset_color_is_site_color() {
        let mut by_site = BTreeMap::new();
        by_site.insert(Site::Sesoko, series(&[(2024, 1.0)]));
        let slice = slice_recent(&by_site, 1);
        assert_eq!(slice.datasets[0].color, "#2b6cb0");
    }

    #[test]
    fn test_colorize_matches_classify_boundaries() {
        let colors = colorize(&[3.9, 4.0, 8.0], Metric::DhwPeak);
        assert_eq!(
            colors,
            vec![
                SeverityTier::Safe.color(),
                SeverityTier::Watch.color(),
                SeverityTier::Alert.color(),
            ]
        );
        // Three distinct buckets.
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }
}
