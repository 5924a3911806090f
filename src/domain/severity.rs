// Severity classification for heat-stress metrics
use crate::domain::site::{Locale, Site, SITE_ORDER};
use serde::Serialize;
use std::collections::BTreeMap;

/// Ordered severity tiers. Derived `Ord` follows declaration order, so
/// `Safe < Watch < Alert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Safe,
    Watch,
    Alert,
}

impl SeverityTier {
    /// Discrete bucket color, shared by status badges and chart bars so the
    /// text and the visual never disagree.
    pub fn color(&self) -> &'static str {
        match self {
            SeverityTier::Safe => "#5b9a94",
            SeverityTier::Watch => "#c4a35a",
            SeverityTier::Alert => "#a65d5d",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            SeverityTier::Safe => "badge-safe",
            SeverityTier::Watch => "badge-watch",
            SeverityTier::Alert => "badge-alert",
        }
    }

    pub fn badge(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (SeverityTier::Safe, Locale::En) => "Normal",
            (SeverityTier::Safe, Locale::Ja) => "平常",
            (SeverityTier::Watch, Locale::En) => "Watch",
            (SeverityTier::Watch, Locale::Ja) => "注意",
            (SeverityTier::Alert, Locale::En) => "Alert",
            (SeverityTier::Alert, Locale::Ja) => "警報",
        }
    }
}

/// The heat-stress metrics the dashboard classifies.
///
/// SST is classified on its anomaly against each site's MMM baseline, not on
/// the absolute temperature, so one threshold table works for all sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    DhwPeak,
    SstAnomaly,
    HotDays,
    ColdDays,
}

/// Per-metric cutoffs. `missing_as_zero` controls whether a site absent from
/// the input counts as zero (day counts) or is excluded (temperatures).
#[derive(Debug, Clone, Copy)]
pub struct MetricThresholds {
    pub watch: f64,
    pub alert: f64,
    pub missing_as_zero: bool,
}

impl Metric {
    pub fn thresholds(&self) -> MetricThresholds {
        match self {
            Metric::DhwPeak => MetricThresholds {
                watch: 4.0,
                alert: 8.0,
                missing_as_zero: false,
            },
            Metric::SstAnomaly => MetricThresholds {
                watch: 1.0,
                alert: 2.0,
                missing_as_zero: false,
            },
            Metric::HotDays => MetricThresholds {
                watch: 20.0,
                alert: 40.0,
                missing_as_zero: true,
            },
            Metric::ColdDays => MetricThresholds {
                watch: 30.0,
                alert: 60.0,
                missing_as_zero: true,
            },
        }
    }

    /// Map a single value to its tier, checking the most severe cutoff first.
    pub fn tier_for(&self, value: f64) -> SeverityTier {
        let t = self.thresholds();
        if value >= t.alert {
            SeverityTier::Alert
        } else if value >= t.watch {
            SeverityTier::Watch
        } else {
            SeverityTier::Safe
        }
    }

    pub fn title(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Metric::DhwPeak, Locale::En) => "Degree Heating Weeks",
            (Metric::DhwPeak, Locale::Ja) => "積算熱ストレス (DHW)",
            (Metric::SstAnomaly, Locale::En) => "Sea Surface Temperature",
            (Metric::SstAnomaly, Locale::Ja) => "海水温 (SST)",
            (Metric::HotDays, Locale::En) => "Hot Days (≥30°C)",
            (Metric::HotDays, Locale::Ja) => "高水温日数 (≥30°C)",
            (Metric::ColdDays, Locale::En) => "Cold Days",
            (Metric::ColdDays, Locale::Ja) => "低水温日数",
        }
    }

    pub fn unit(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Metric::DhwPeak, _) => "°C-weeks",
            (Metric::SstAnomaly, _) => "°C",
            (Metric::HotDays | Metric::ColdDays, Locale::En) => "days",
            (Metric::HotDays | Metric::ColdDays, Locale::Ja) => "日",
        }
    }
}

/// Result of classifying one metric across sites. `dominant` names the site
/// and value that determined the tier; `None` when no site had data.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub metric: Metric,
    pub tier: SeverityTier,
    pub dominant: Option<(Site, f64)>,
}

/// Localized rendering of a classification, ready for a status badge.
#[derive(Debug, Clone, Serialize)]
pub struct StatusText {
    pub badge: &'static str,
    pub badge_class: &'static str,
    pub detail: String,
}

/// Classify a metric from its per-site values.
///
/// The dominant site is the one with the maximum value; when two sites tie,
/// the one listed first in `SITE_ORDER` wins, so the justification text is
/// deterministic across refreshes.
pub fn classify(metric: Metric, values_by_site: &BTreeMap<Site, f64>) -> Classification {
    let thresholds = metric.thresholds();

    let mut dominant: Option<(Site, f64)> = None;
    for site in SITE_ORDER {
        let value = match values_by_site.get(&site) {
            Some(v) => *v,
            None if thresholds.missing_as_zero => 0.0,
            None => continue,
        };
        match dominant {
            Some((_, best)) if value <= best => {}
            _ => dominant = Some((site, value)),
        }
    }

    let tier = match dominant {
        Some((_, value)) => metric.tier_for(value),
        None => SeverityTier::Safe,
    };

    Classification {
        metric,
        tier,
        dominant,
    }
}

impl Classification {
    pub fn status_text(&self, locale: Locale) -> StatusText {
        StatusText {
            badge: self.tier.badge(locale),
            badge_class: self.tier.badge_class(),
            detail: self.detail(locale),
        }
    }

    fn detail(&self, locale: Locale) -> String {
        let (site, value) = match self.dominant {
            Some(d) => d,
            None => {
                return match locale {
                    Locale::En => "No recent data available.".to_string(),
                    Locale::Ja => "データなし。".to_string(),
                }
            }
        };

        let name = site.name(locale);
        let unit = self.metric.unit(locale);
        let t = self.metric.thresholds();
        match (self.tier, locale) {
            (SeverityTier::Alert, Locale::En) => format!(
                "{name} reached {value:.1} {unit}, above the alert threshold ({:.0} {unit}).",
                t.alert
            ),
            (SeverityTier::Alert, Locale::Ja) => format!(
                "{name}で{value:.1} {unit}を記録。警報閾値（{:.0} {unit}）を超過。",
                t.alert
            ),
            (SeverityTier::Watch, Locale::En) => format!(
                "{name} at {value:.1} {unit} exceeds the watch threshold ({:.0} {unit}).",
                t.watch
            ),
            (SeverityTier::Watch, Locale::Ja) => format!(
                "{name}で{value:.1} {unit}。注意閾値（{:.0} {unit}）を超過。",
                t.watch
            ),
            (SeverityTier::Safe, Locale::En) => format!(
                "{name} at {value:.1} {unit} is below the watch threshold ({:.0} {unit}).",
                t.watch
            ),
            (SeverityTier::Safe, Locale::Ja) => format!(
                "{name}で{value:.1} {unit}。注意閾値（{:.0} {unit}）未満。",
                t.watch
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(Site, f64)]) -> BTreeMap<Site, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_dhw_tier_boundaries() {
        assert_eq!(Metric::DhwPeak.tier_for(3.9), SeverityTier::Safe);
        assert_eq!(Metric::DhwPeak.tier_for(4.0), SeverityTier::Watch);
        assert_eq!(Metric::DhwPeak.tier_for(7.9), SeverityTier::Watch);
        assert_eq!(Metric::DhwPeak.tier_for(8.0), SeverityTier::Alert);
    }

    #[test]
    fn test_tier_monotonic_in_dominant_value() {
        let mut previous = SeverityTier::Safe;
        for v in [0.0, 3.9, 4.0, 5.5, 8.0, 12.0] {
            let c = classify(Metric::DhwPeak, &values(&[(Site::Manza, v)]));
            assert!(c.tier >= previous, "tier regressed at value {v}");
            previous = c.tier;
        }
    }

    #[test]
    fn test_dominant_site_is_maximum() {
        let c = classify(
            Metric::DhwPeak,
            &values(&[(Site::Sesoko, 2.1), (Site::Manza, 9.8), (Site::Ogasawara, 4.1)]),
        );
        assert_eq!(c.tier, SeverityTier::Alert);
        assert_eq!(c.dominant, Some((Site::Manza, 9.8)));
    }

    #[test]
    fn test_tie_break_uses_site_order() {
        let c = classify(
            Metric::DhwPeak,
            &values(&[(Site::Manza, 5.0), (Site::Sesoko, 5.0)]),
        );
        assert_eq!(c.dominant, Some((Site::Sesoko, 5.0)));
    }

    #[test]
    fn test_empty_mapping_is_safe_fallback() {
        let c = classify(Metric::DhwPeak, &BTreeMap::new());
        assert_eq!(c.tier, SeverityTier::Safe);
        assert_eq!(c.dominant, None);
        let text = c.status_text(Locale::En);
        assert_eq!(text.badge, "Normal");
        assert!(text.detail.contains("No recent data"));
    }

    #[test]
    fn test_missing_site_excluded_for_temperatures() {
        // Only one site reporting: the others are excluded, not zeroed.
        let c = classify(Metric::SstAnomaly, &values(&[(Site::Ogasawara, 1.4)]));
        assert_eq!(c.dominant, Some((Site::Ogasawara, 1.4)));
        assert_eq!(c.tier, SeverityTier::Watch);
    }

    #[test]
    fn test_missing_site_zeroed_for_day_counts() {
        let c = classify(Metric::HotDays, &values(&[(Site::Manza, 25.0)]));
        assert_eq!(c.dominant, Some((Site::Manza, 25.0)));
        // Empty mapping with zero-default still yields a dominant site at 0.
        let c = classify(Metric::HotDays, &BTreeMap::new());
        assert_eq!(c.dominant, Some((Site::Sesoko, 0.0)));
        assert_eq!(c.tier, SeverityTier::Safe);
    }

    #[test]
    fn test_cold_day_thresholds() {
        assert_eq!(Metric::ColdDays.tier_for(29.0), SeverityTier::Safe);
        assert_eq!(Metric::ColdDays.tier_for(30.0), SeverityTier::Watch);
        assert_eq!(Metric::ColdDays.tier_for(60.0), SeverityTier::Alert);
    }

    #[test]
    fn test_localized_status_text() {
        let c = classify(Metric::DhwPeak, &values(&[(Site::Manza, 10.9)]));
        let en = c.status_text(Locale::En);
        assert_eq!(en.badge, "Alert");
        assert!(en.detail.contains("Manza"));
        assert!(en.detail.contains("10.9"));
        let ja = c.status_text(Locale::Ja);
        assert_eq!(ja.badge, "警報");
        assert!(ja.detail.contains("万座"));
    }
}
