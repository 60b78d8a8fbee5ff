//! Age Distributions Module
//! Kernel density estimates over athlete ages: overall, per medal class and
//! per sport for gold medallists.

use polars::prelude::*;
use rayon::prelude::*;
use statrs::distribution::{Continuous, Normal};
use std::collections::HashMap;

use super::aggregator::unique_athletes;

/// Number of evaluation points per density curve.
const GRID_POINTS: usize = 200;

/// Sports with a long enough medal history to make a per-sport age curve
/// readable.
pub const FAMOUS_SPORTS: [&str; 38] = [
    "Basketball",
    "Judo",
    "Football",
    "Tug-Of-War",
    "Athletics",
    "Swimming",
    "Badminton",
    "Sailing",
    "Gymnastics",
    "Art Competitions",
    "Handball",
    "Weightlifting",
    "Wrestling",
    "Water Polo",
    "Hockey",
    "Rowing",
    "Fencing",
    "Shooting",
    "Boxing",
    "Taekwondo",
    "Cycling",
    "Diving",
    "Canoeing",
    "Tennis",
    "Golf",
    "Softball",
    "Archery",
    "Volleyball",
    "Synchronized Swimming",
    "Table Tennis",
    "Baseball",
    "Rhythmic Gymnastics",
    "Rugby Sevens",
    "Beach Volleyball",
    "Triathlon",
    "Rugby",
    "Polo",
    "Ice Hockey",
];

/// A labelled density curve ready for plotting.
#[derive(Debug, Clone)]
pub struct DensityCurve {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// Gaussian kernel density estimate with Scott's bandwidth, evaluated on a
/// [`GRID_POINTS`]-point grid spanning the sample range padded by three
/// bandwidths. Empty input yields an empty curve.
pub fn gaussian_kde(values: &[f64]) -> Vec<[f64; 2]> {
    if values.is_empty() {
        return Vec::new();
    }
    let kernel = if let Ok(kernel) = Normal::new(0.0, 1.0) {
        kernel
    } else {
        return Vec::new();
    };

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    // Scott's rule; constant samples get a unit bandwidth so the curve
    // degrades to a single bump instead of a division by zero.
    let bandwidth = if std_dev > 0.0 {
        std_dev * n.powf(-0.2)
    } else {
        1.0
    };

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lo = min - 3.0 * bandwidth;
    let hi = max + 3.0 * bandwidth;
    let step = (hi - lo) / (GRID_POINTS - 1) as f64;

    (0..GRID_POINTS)
        .map(|i| {
            let x = lo + step * i as f64;
            let density = values
                .iter()
                .map(|v| kernel.pdf((x - v) / bandwidth))
                .sum::<f64>()
                / (n * bandwidth);
            [x, density]
        })
        .collect()
}

/// Age density curves for all athletes and for each medal class, one row per
/// athlete (first appearance). Curves without any non-null age are omitted.
pub fn medal_age_series(df: &DataFrame) -> PolarsResult<Vec<DensityCurve>> {
    let athletes = unique_athletes(df)?;
    let sets: [(&str, Option<&str>); 4] = [
        ("Overall Age", None),
        ("Gold Medalist", Some("Gold")),
        ("Silver Medalist", Some("Silver")),
        ("Bronze Medalist", Some("Bronze")),
    ];

    let mut curves = Vec::with_capacity(sets.len());
    for (label, medal) in sets {
        let values = ages(&athletes, medal)?;
        if values.is_empty() {
            continue;
        }
        curves.push(DensityCurve {
            label: label.to_string(),
            points: gaussian_kde(&values),
        });
    }
    Ok(curves)
}

/// Gold-medallist age density per famous sport, in [`FAMOUS_SPORTS`] order.
/// Sports with no aged gold medallist are omitted.
pub fn famous_sport_age_series(df: &DataFrame) -> PolarsResult<Vec<DensityCurve>> {
    let athletes = unique_athletes(df)?;
    let sports = athletes.column("Sport")?.str()?;
    let medals = athletes.column("Medal")?.str()?;
    let age_ca = athletes.column("Age")?.f64()?;

    let mut gold_ages: HashMap<&str, Vec<f64>> = HashMap::new();
    for i in 0..athletes.height() {
        if medals.get(i) != Some("Gold") {
            continue;
        }
        if let (Some(sport), Some(age)) = (sports.get(i), age_ca.get(i)) {
            gold_ages.entry(sport).or_default().push(age);
        }
    }

    let curves = FAMOUS_SPORTS
        .par_iter()
        .filter_map(|&sport| {
            let values = gold_ages.get(sport)?;
            Some(DensityCurve {
                label: sport.to_string(),
                points: gaussian_kde(values),
            })
        })
        .collect();
    Ok(curves)
}

/// Non-null ages, optionally restricted to one medal class.
fn ages(df: &DataFrame, medal: Option<&str>) -> PolarsResult<Vec<f64>> {
    let age_ca = df.column("Age")?.f64()?;
    match medal {
        None => Ok(age_ca.into_iter().flatten().collect()),
        Some(class) => {
            let medals = df.column("Medal")?.str()?;
            let mut out = Vec::new();
            for i in 0..df.height() {
                if medals.get(i) == Some(class) {
                    if let Some(age) = age_ca.get(i) {
                        out.push(age);
                    }
                }
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Six rows, one duplicate appearance (Ann) and one null age (Dov).
    fn athletes() -> DataFrame {
        df!(
            "Name"   => &["Ann", "Ann", "Bea", "Cal", "Dov", "Eve"],
            "region" => &["USA", "USA", "USA", "India", "Sweden", "Norway"],
            "Age"    => &[Some(22.0f64), Some(26.0), Some(24.0), Some(30.0), None, Some(28.0)],
            "Sport"  => &["Basketball", "Basketball", "Basketball", "Hockey", "Judo", "Croquet"],
            "Medal"  => &[Some("Gold"), Some("Gold"), Some("Silver"), Some("Gold"), Some("Gold"), Some("Gold")],
        )
        .unwrap()
    }

    #[test]
    fn test_kde_empty_input() {
        assert!(gaussian_kde(&[]).is_empty());
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let values = [20.0, 23.0, 25.0, 25.0, 28.0, 31.0, 34.0];
        let curve = gaussian_kde(&values);
        assert_eq!(curve.len(), GRID_POINTS);

        assert!(curve.iter().all(|p| p[1] >= 0.0));
        let step = curve[1][0] - curve[0][0];
        let mass: f64 = curve.iter().map(|p| p[1] * step).sum();
        assert!((mass - 1.0).abs() < 0.05, "mass = {mass}");
    }

    #[test]
    fn test_kde_peak_near_sample_mean() {
        let values = [24.0, 25.0, 26.0];
        let curve = gaussian_kde(&values);
        let peak = curve
            .iter()
            .max_by(|a, b| a[1].total_cmp(&b[1]))
            .unwrap();
        assert!((peak[0] - 25.0).abs() < 1.0);
    }

    #[test]
    fn test_kde_constant_sample() {
        let curve = gaussian_kde(&[27.0]);
        assert_eq!(curve.len(), GRID_POINTS);
        assert!(curve.iter().all(|p| p[1].is_finite()));
    }

    #[test]
    fn test_medal_age_series_omits_empty_classes() {
        let curves = medal_age_series(&athletes()).unwrap();

        let labels: Vec<&str> = curves.iter().map(|c| c.label.as_str()).collect();
        // No bronze medallist in the fixture.
        assert_eq!(labels, vec!["Overall Age", "Gold Medalist", "Silver Medalist"]);
        assert!(curves.iter().all(|c| c.points.len() == GRID_POINTS));
    }

    #[test]
    fn test_famous_sport_series_order_and_omissions() {
        let curves = famous_sport_age_series(&athletes()).unwrap();

        let labels: Vec<&str> = curves.iter().map(|c| c.label.as_str()).collect();
        // Judo's only gold medallist has no age; Croquet is not on the list;
        // Ann counts once despite two appearances.
        assert_eq!(labels, vec!["Basketball", "Hockey"]);
    }
}
