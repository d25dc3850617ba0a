// Descriptive statistics of the scores, for the report and the summary.

use std::cmp::Ordering;

use serde_json::{json, Value as JSValue};

use crate::report::*;

#[derive(PartialEq, Debug, Clone)]
pub struct SubjectStatistics {
    pub name: String,
    /// Number of voters who scored this subject.
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// The most frequent score. The smallest one wins among equally frequent scores.
    pub mode: f64,
    /// Sample standard deviation. Undefined (NaN) with fewer than two scores.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SubjectStatistics {
    pub fn to_json(&self) -> JSValue {
        json!({
            "subject": self.name,
            "count": self.count,
            "mean": rounded(self.mean),
            "median": rounded(self.median),
            "mode": rounded(self.mode),
            "stdDev": rounded(self.std_dev),
            "min": rounded(self.min),
            "max": rounded(self.max),
        })
    }
}

/// Rounds to 2 decimals. NaN values have no JSON representation and become null.
pub fn rounded(x: f64) -> Option<f64> {
    if x.is_nan() {
        None
    } else {
        Some((x * 100.0).round() / 100.0)
    }
}

/// Formats a number for the report: 2 decimals at most, `-` when undefined.
pub fn format_number(x: f64) -> String {
    match rounded(x) {
        None => "-".to_string(),
        Some(r) if r.fract() == 0.0 => format!("{:.1}", r),
        Some(r) => format!("{}", r),
    }
}

fn sorted(scores: &[f64]) -> Vec<f64> {
    let mut res = scores.to_vec();
    res.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    res
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return f64::NAN;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

fn median(sorted_scores: &[f64]) -> f64 {
    let n = sorted_scores.len();
    match n {
        0 => f64::NAN,
        _ if n % 2 == 1 => sorted_scores[n / 2],
        _ => (sorted_scores[n / 2 - 1] + sorted_scores[n / 2]) / 2.0,
    }
}

fn mode(sorted_scores: &[f64]) -> f64 {
    let mut best = f64::NAN;
    let mut best_count = 0;
    let mut idx = 0;
    while idx < sorted_scores.len() {
        let current = sorted_scores[idx];
        let run = sorted_scores[idx..]
            .iter()
            .take_while(|&&x| x == current)
            .count();
        // Strictly greater: the first (smallest) value is kept on ties.
        if run > best_count {
            best = current;
            best_count = run;
        }
        idx += run;
    }
    best
}

fn sample_std_dev(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return f64::NAN;
    }
    let m = mean(scores);
    let sq: f64 = scores.iter().map(|x| (x - m) * (x - m)).sum();
    (sq / (scores.len() - 1) as f64).sqrt()
}

pub fn subject_statistics(name: &str, scores: &[f64]) -> SubjectStatistics {
    let s = sorted(scores);
    SubjectStatistics {
        name: name.to_string(),
        count: s.len(),
        mean: mean(&s),
        median: median(&s),
        mode: mode(&s),
        std_dev: sample_std_dev(&s),
        min: s.first().cloned().unwrap_or(f64::NAN),
        max: s.last().cloned().unwrap_or(f64::NAN),
    }
}

/// The statistics of every subject, in column order.
pub fn describe(table: &ScoreTable) -> Vec<SubjectStatistics> {
    table
        .subjects()
        .iter()
        .map(|name| {
            let scores = table.column(name).unwrap_or_default();
            subject_statistics(name, &scores)
        })
        .collect()
}

/// The means rounded to 2 decimals, best first. Ties keep the column order and
/// subjects without scores come last.
pub fn sorted_averages(stats: &[SubjectStatistics]) -> Vec<(String, f64)> {
    let mut res: Vec<(String, f64)> = stats
        .iter()
        .map(|s| (s.name.clone(), rounded(s.mean).unwrap_or(f64::NAN)))
        .collect();
    res.sort_by(|(_, a), (_, b)| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(a).unwrap_or(Ordering::Equal),
    });
    debug!("sorted_averages: {:?}", res);
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use schulze_ranking::builder::Builder;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn odd_count() {
        let s = subject_statistics("Math", &[9.0, 7.0, 7.0, 5.0, 10.0]);
        assert_eq!(s.count, 5);
        assert!(close(s.mean, 7.6));
        assert_eq!(s.median, 7.0);
        assert_eq!(s.mode, 7.0);
        assert!(close(s.std_dev, 1.949358868961793));
        assert_eq!(s.min, 5.0);
        assert_eq!(s.max, 10.0);
    }

    #[test]
    fn even_count_and_mode_ties() {
        let s = subject_statistics("Art", &[8.0, 4.0, 6.0, 2.0]);
        assert_eq!(s.median, 5.0);
        // Every score appears once: the smallest one is the mode.
        assert_eq!(s.mode, 2.0);
    }

    #[test]
    fn few_scores() {
        let s = subject_statistics("Music", &[6.0]);
        assert_eq!(s.median, 6.0);
        assert!(s.std_dev.is_nan());
        let s = subject_statistics("History", &[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
        assert!(s.min.is_nan());
        assert_eq!(s.to_json()["mean"], JSValue::Null);
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(7.0), "7.0");
        assert_eq!(format_number(6.333333), "6.33");
        assert_eq!(format_number(6.5), "6.5");
        assert_eq!(format_number(f64::NAN), "-");
    }

    #[test]
    fn averages_order() {
        let mut builder = Builder::new()
            .subjects(&[
                "Math".to_string(),
                "Art".to_string(),
                "Music".to_string(),
                "History".to_string(),
            ])
            .unwrap();
        builder
            .add_voter(&[Some(7.001), Some(8.0), Some(7.0), None])
            .unwrap();
        let table = builder.build().unwrap();
        let averages = sorted_averages(&describe(&table));
        let names: Vec<&str> = averages.iter().map(|(n, _)| n.as_str()).collect();
        // Math and Music are equal once rounded and keep their column order.
        assert_eq!(names, vec!["Art", "Math", "Music", "History"]);
        assert_eq!(averages[1].1, 7.0);
    }
}
