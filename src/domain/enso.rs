// ENSO phase classification from the Oceanic Niño Index
use crate::domain::site::Locale;
use serde::Serialize;
use std::collections::BTreeMap;

/// One ONI row: a three-month season anomaly in °C.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OniReading {
    pub year: i32,
    pub season: String,
    pub anomaly: f64,
}

/// ENSO phase ladder at the standard ±0.5 / 1.0 / 1.5 / 2.0 cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsoPhase {
    VeryStrongElNino,
    StrongElNino,
    ModerateElNino,
    WeakElNino,
    Neutral,
    WeakLaNina,
    ModerateLaNina,
    StrongLaNina,
    VeryStrongLaNina,
}

/// Years with documented mass-bleaching events, flagged on the ONI chart.
pub const BLEACHING_YEARS: [i32; 8] = [1998, 2007, 2010, 2016, 2017, 2022, 2023, 2024];

pub fn is_bleaching_year(year: i32) -> bool {
    BLEACHING_YEARS.contains(&year)
}

pub fn phase(anomaly: f64) -> EnsoPhase {
    if anomaly >= 2.0 {
        EnsoPhase::VeryStrongElNino
    } else if anomaly >= 1.5 {
        EnsoPhase::StrongElNino
    } else if anomaly >= 1.0 {
        EnsoPhase::ModerateElNino
    } else if anomaly >= 0.5 {
        EnsoPhase::WeakElNino
    } else if anomaly <= -2.0 {
        EnsoPhase::VeryStrongLaNina
    } else if anomaly <= -1.5 {
        EnsoPhase::StrongLaNina
    } else if anomaly <= -1.0 {
        EnsoPhase::ModerateLaNina
    } else if anomaly <= -0.5 {
        EnsoPhase::WeakLaNina
    } else {
        EnsoPhase::Neutral
    }
}

/// Bar color: El Niño red, La Niña blue, neutral gray.
pub fn oni_color(anomaly: f64) -> &'static str {
    if anomaly >= 0.5 {
        "#ef4444"
    } else if anomaly <= -0.5 {
        "#3b82f6"
    } else {
        "#9ca3af"
    }
}

impl EnsoPhase {
    pub fn css_class(&self) -> &'static str {
        match self {
            EnsoPhase::Neutral => "neutral",
            EnsoPhase::WeakElNino
            | EnsoPhase::ModerateElNino
            | EnsoPhase::StrongElNino
            | EnsoPhase::VeryStrongElNino => "el-nino",
            EnsoPhase::WeakLaNina
            | EnsoPhase::ModerateLaNina
            | EnsoPhase::StrongLaNina
            | EnsoPhase::VeryStrongLaNina => "la-nina",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (EnsoPhase::VeryStrongElNino, Locale::En) => "Very Strong El Niño",
            (EnsoPhase::VeryStrongElNino, Locale::Ja) => "非常に強いEl Niño",
            (EnsoPhase::StrongElNino, Locale::En) => "Strong El Niño",
            (EnsoPhase::StrongElNino, Locale::Ja) => "強いEl Niño",
            (EnsoPhase::ModerateElNino, Locale::En) => "Moderate El Niño",
            (EnsoPhase::ModerateElNino, Locale::Ja) => "中程度El Niño",
            (EnsoPhase::WeakElNino, Locale::En) => "Weak El Niño",
            (EnsoPhase::WeakElNino, Locale::Ja) => "弱いEl Niño",
            (EnsoPhase::Neutral, Locale::En) => "Neutral",
            (EnsoPhase::Neutral, Locale::Ja) => "中立",
            (EnsoPhase::WeakLaNina, Locale::En) => "Weak La Niña",
            (EnsoPhase::WeakLaNina, Locale::Ja) => "弱いLa Niña",
            (EnsoPhase::ModerateLaNina, Locale::En) => "Moderate La Niña",
            (EnsoPhase::ModerateLaNina, Locale::Ja) => "中程度La Niña",
            (EnsoPhase::StrongLaNina, Locale::En) => "Strong La Niña",
            (EnsoPhase::StrongLaNina, Locale::Ja) => "強いLa Niña",
            (EnsoPhase::VeryStrongLaNina, Locale::En) => "Very Strong La Niña",
            (EnsoPhase::VeryStrongLaNina, Locale::Ja) => "非常に強いLa Niña",
        }
    }
}

/// Collapse monthly rows to one per year, keeping the row with the maximum
/// absolute anomaly. Output is ordered by year ascending.
pub fn yearly_extremes(rows: &[OniReading]) -> Vec<OniReading> {
    let mut by_year: BTreeMap<i32, &OniReading> = BTreeMap::new();
    for row in rows {
        match by_year.get(&row.year) {
            Some(existing) if row.anomaly.abs() <= existing.anomaly.abs() => {}
            _ => {
                by_year.insert(row.year, row);
            }
        }
    }
    by_year.into_values().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, season: &str, anomaly: f64) -> OniReading {
        OniReading {
            year,
            season: season.to_string(),
            anomaly,
        }
    }

    #[test]
    fn test_phase_ladder() {
        assert_eq!(phase(2.4), EnsoPhase::VeryStrongElNino);
        assert_eq!(phase(1.5), EnsoPhase::StrongElNino);
        assert_eq!(phase(1.0), EnsoPhase::ModerateElNino);
        assert_eq!(phase(0.5), EnsoPhase::WeakElNino);
        assert_eq!(phase(0.4), EnsoPhase::Neutral);
        assert_eq!(phase(-0.4), EnsoPhase::Neutral);
        assert_eq!(phase(-0.5), EnsoPhase::WeakLaNina);
        assert_eq!(phase(-1.2), EnsoPhase::ModerateLaNina);
        assert_eq!(phase(-1.7), EnsoPhase::StrongLaNina);
        assert_eq!(phase(-2.0), EnsoPhase::VeryStrongLaNina);
    }

    #[test]
    fn test_oni_colors() {
        assert_eq!(oni_color(0.5), "#ef4444");
        assert_eq!(oni_color(-0.5), "#3b82f6");
        assert_eq!(oni_color(0.0), "#9ca3af");
    }

    #[test]
    fn test_yearly_extremes_takes_max_absolute() {
        let rows = vec![
            row(1998, "DJF", 2.2),
            row(1998, "JJA", -0.8),
            row(1999, "DJF", -1.5),
            row(1999, "MAM", -0.9),
        ];
        let yearly = yearly_extremes(&rows);
        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly[0], row(1998, "DJF", 2.2));
        // Negative anomaly wins on absolute value.
        assert_eq!(yearly[1], row(1999, "DJF", -1.5));
    }

    #[test]
    fn test_bleaching_years() {
        assert!(is_bleaching_year(2016));
        assert!(!is_bleaching_year(2015));
    }
}
