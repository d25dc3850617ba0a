mod config;
pub mod builder;
pub mod manual;
pub mod quick_start;

use log::{debug, info};

use std::cmp::Ordering;

pub use crate::config::*;

// **** Private structures ****

type RoundId = u32;

// The position of a subject in the matrices of the current round.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct SubjectId(usize);

// Dense square matrix, stored row by row.
#[derive(PartialEq, Debug, Clone)]
struct SquareMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SquareMatrix {
    fn zeros(size: usize) -> SquareMatrix {
        SquareMatrix {
            size,
            values: vec![0.0; size * size],
        }
    }

    fn get(&self, from: SubjectId, to: SubjectId) -> f64 {
        self.values[from.0 * self.size + to.0]
    }

    fn set(&mut self, from: SubjectId, to: SubjectId, value: f64) {
        self.values[from.0 * self.size + to.0] = value;
    }

    // Strict comparison in both directions: ties and missing data make the
    // two entries independent.
    fn beats(&self, a: SubjectId, b: SubjectId) -> bool {
        self.get(a, b) > self.get(b, a)
    }

    fn ids(&self) -> impl Iterator<Item = SubjectId> {
        (0..self.size).map(SubjectId)
    }
}

/// Pairwise preferences between the subjects of a score table.
///
/// The entry `(a, b)` is the number of voters who scored `a` strictly higher
/// than `b`, or the fraction of such voters once normalized.
#[derive(PartialEq, Debug, Clone)]
pub struct PreferenceMatrix {
    subjects: Vec<String>,
    preferences: SquareMatrix,
    // The number of voters who scored both subjects of each pair.
    common_voters: Vec<u64>,
    normalized: bool,
}

impl PreferenceMatrix {
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let from = find_subject(&self.subjects, a)?;
        let to = find_subject(&self.subjects, b)?;
        Some(self.preferences.get(from, to))
    }

    /// The number of voters who scored both subjects.
    pub fn common_voters(&self, a: &str, b: &str) -> Option<u64> {
        let from = find_subject(&self.subjects, a)?;
        let to = find_subject(&self.subjects, b)?;
        Some(self.common_voters[from.0 * self.subjects.len() + to.0])
    }
}

/// Strength of the strongest path between each pair of subjects.
#[derive(PartialEq, Debug, Clone)]
pub struct StrengthMatrix {
    subjects: Vec<String>,
    strengths: SquareMatrix,
}

impl StrengthMatrix {
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let from = find_subject(&self.subjects, a)?;
        let to = find_subject(&self.subjects, b)?;
        Some(self.strengths.get(from, to))
    }

    /// True if the strongest path from `a` to `b` is stronger than the one from `b` to `a`.
    pub fn beats(&self, a: &str, b: &str) -> Option<bool> {
        let from = find_subject(&self.subjects, a)?;
        let to = find_subject(&self.subjects, b)?;
        Some(self.strengths.beats(from, to))
    }
}

fn find_subject(subjects: &[String], name: &str) -> Option<SubjectId> {
    subjects.iter().position(|s| s == name).map(SubjectId)
}

fn check_table(table: &ScoreTable) -> Result<(), RankingErrors> {
    if table.subjects.len() < 2 || table.rows.is_empty() {
        debug!(
            "check_table: {} subjects, {} voters",
            table.subjects.len(),
            table.rows.len()
        );
        return Err(RankingErrors::InsufficientData);
    }
    Ok(())
}

/// Runs the ranking with the given rules over the given scores.
///
/// Arguments:
/// * `table` the scores to process. It needs at least two subjects and one voter.
/// * `rules` the ranking procedure to apply
pub fn run_ranking(
    table: &ScoreTable,
    rules: &RankingRules,
) -> Result<RankingResult, RankingErrors> {
    info!(
        "Processing {:?} voters, subjects: {:?}, rules: {:?}",
        table.rows.len(),
        table.subjects,
        rules
    );
    check_table(table)?;

    match rules.mode {
        RankingMode::Full => {
            let (ranking, round_stats) = run_full_ranking(table, rules)?;
            Ok(RankingResult {
                ranking,
                round_stats,
                victories: Vec::new(),
            })
        }
        RankingMode::Simple => {
            let victories = run_simple_ranking(table, rules)?;
            Ok(RankingResult {
                ranking: victories.iter().map(|v| v.name.clone()).collect(),
                round_stats: Vec::new(),
                victories,
            })
        }
    }
}

/// Ranks all the subjects by successive extraction of the Schulze winner.
pub fn full_ranking(table: &ScoreTable) -> Result<Vec<String>, RankingErrors> {
    run_ranking(table, &RankingRules::DEFAULT_RULES).map(|res| res.ranking)
}

/// Ranks the subjects by number of pairwise victories, then by average score.
pub fn simple_ranking(table: &ScoreTable) -> Result<Vec<String>, RankingErrors> {
    let rules = RankingRules {
        mode: RankingMode::Simple,
        ..RankingRules::DEFAULT_RULES
    };
    run_ranking(table, &rules).map(|res| res.ranking)
}

fn run_full_ranking(
    table: &ScoreTable,
    rules: &RankingRules,
) -> Result<(Vec<String>, Vec<RoundStats>), RankingErrors> {
    let tiebreak = tiebreak_order(table);
    info!("Tiebreak order: {:?}", tiebreak);

    let mut cur_table: ScoreTable = table.clone();
    let mut ranking: Vec<String> = Vec::new();
    let mut round_stats: Vec<RoundStats> = Vec::new();

    while !cur_table.subjects.is_empty() {
        let round_id = (round_stats.len() + 1) as RoundId;
        debug!(
            "Round id: {:?} cur_subjects: {:?}",
            round_id, cur_table.subjects
        );

        // Only one subject. It is the winner by any standard.
        let (winner, dominant) = if cur_table.subjects.len() == 1 {
            (SubjectId(0), vec![SubjectId(0)])
        } else {
            let preferences = compute_preferences(&cur_table);
            let preferences = if rules.normalize_preferences {
                normalize_preferences(&preferences)?
            } else {
                preferences
            };
            let strengths = strongest_paths(&preferences);
            debug!("Round id: {:?} strengths: {:?}", round_id, strengths);
            resolve_round(&strengths.strengths, &cur_table.subjects, &tiebreak)?
        };

        let winner_name = cur_table.subjects[winner.0].clone();
        info!("Round {} -> {} elected", round_id, winner_name);
        round_stats.push(RoundStats {
            round: round_id,
            remaining: cur_table.subjects.clone(),
            winner: winner_name.clone(),
            dominant_set: dominant
                .iter()
                .map(|sid| cur_table.subjects[sid.0].clone())
                .collect(),
        });

        let next_table = cur_table.without_subject(&winner_name);
        // Invariant: the number of subjects decreased.
        assert!(
            next_table.subjects.len() < cur_table.subjects.len(),
            "The number of subjects did not decrease: {:?}",
            cur_table.subjects
        );
        cur_table = next_table;
        ranking.push(winner_name);
    }
    Ok((ranking, round_stats))
}

fn run_simple_ranking(
    table: &ScoreTable,
    rules: &RankingRules,
) -> Result<Vec<SubjectVictories>, RankingErrors> {
    let preferences = build_preferences(table)?;
    let preferences = if rules.normalize_preferences {
        normalize_preferences(&preferences)?
    } else {
        preferences
    };
    let strengths = strongest_paths(&preferences);
    debug!("run_simple_ranking: strengths: {:?}", strengths);

    let avgs = averages(table);
    let mut victories: Vec<SubjectVictories> = strengths
        .strengths
        .ids()
        .map(|sid| SubjectVictories {
            name: table.subjects[sid.0].clone(),
            victories: strengths
                .strengths
                .ids()
                .filter(|other| *other != sid && strengths.strengths.beats(sid, *other))
                .count() as u32,
            average: avgs[sid.0],
        })
        .collect();
    // Stable sort: the remaining ties keep the column order.
    victories.sort_by(|a, b| {
        b.victories
            .cmp(&a.victories)
            .then_with(|| cmp_descending(a.average, b.average))
    });
    debug!("run_simple_ranking: victories: {:?}", victories);
    Ok(victories)
}

/// Counts, for every ordered pair of subjects, the voters who scored the first one
/// strictly higher than the second.
///
/// A voter without a score for one of the two subjects does not take part in the
/// comparison of this pair.
pub fn build_preferences(table: &ScoreTable) -> Result<PreferenceMatrix, RankingErrors> {
    check_table(table)?;
    Ok(compute_preferences(table))
}

fn compute_preferences(table: &ScoreTable) -> PreferenceMatrix {
    let n = table.subjects.len();
    let mut preferences = SquareMatrix::zeros(n);
    let mut common_voters: Vec<u64> = vec![0; n * n];
    for row in table.rows.iter() {
        for (j, score_j) in row.iter().enumerate() {
            for (i, score_i) in row.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let (Some(a), Some(b)) = (score_j, score_i) {
                    common_voters[j * n + i] += 1;
                    if a > b {
                        let (from, to) = (SubjectId(j), SubjectId(i));
                        preferences.set(from, to, preferences.get(from, to) + 1.0);
                    }
                }
            }
        }
    }
    PreferenceMatrix {
        subjects: table.subjects.clone(),
        preferences,
        common_voters,
        normalized: false,
    }
}

/// Divides each preference count by the number of voters who scored both subjects.
///
/// Fails if two subjects have no voter in common.
pub fn normalize_preferences(pref: &PreferenceMatrix) -> Result<PreferenceMatrix, RankingErrors> {
    if pref.normalized {
        return Ok(pref.clone());
    }
    let n = pref.subjects.len();
    let mut preferences = pref.preferences.clone();
    for j in preferences.ids() {
        for i in preferences.ids() {
            if i == j {
                continue;
            }
            let common = pref.common_voters[j.0 * n + i.0];
            if common == 0 {
                return Err(RankingErrors::DisjointComparison {
                    first: pref.subjects[j.0].clone(),
                    second: pref.subjects[i.0].clone(),
                });
            }
            preferences.set(j, i, preferences.get(j, i) / common as f64);
        }
    }
    Ok(PreferenceMatrix {
        subjects: pref.subjects.clone(),
        preferences,
        common_voters: pref.common_voters.clone(),
        normalized: true,
    })
}

/// Computes the strength of the strongest path between all the pairs of subjects.
///
/// This is the Floyd-Warshall algorithm over the (max, min) semiring. The
/// strength of a path is its weakest link.
pub fn strongest_paths(pref: &PreferenceMatrix) -> StrengthMatrix {
    let mut strengths = pref.preferences.clone();
    let ids: Vec<SubjectId> = strengths.ids().collect();
    for &k in ids.iter() {
        for &j in ids.iter() {
            if j == k {
                continue;
            }
            for &i in ids.iter() {
                if i == k || i == j {
                    continue;
                }
                let through_k = strengths.get(j, k).min(strengths.get(k, i));
                if through_k > strengths.get(j, i) {
                    strengths.set(j, i, through_k);
                }
            }
        }
    }
    StrengthMatrix {
        subjects: pref.subjects.clone(),
        strengths,
    }
}

/// Finds the winner among the subjects of a strength matrix.
///
/// The Condorcet winner is returned if there is one. Otherwise, the winner is
/// the first subject of `tiebreak_order` that belongs to the smallest dominant set.
pub fn resolve_winner(
    strength: &StrengthMatrix,
    tiebreak_order: &[String],
) -> Result<String, RankingErrors> {
    if strength.subjects.is_empty() {
        return Err(RankingErrors::InsufficientData);
    }
    let (winner, _) = resolve_round(&strength.strengths, &strength.subjects, tiebreak_order)?;
    Ok(strength.subjects[winner.0].clone())
}

/// The smallest set of subjects such that every member beats every subject outside of it.
pub fn dominant_set(strength: &StrengthMatrix) -> Result<Vec<String>, RankingErrors> {
    let set = find_dominant_set(&strength.strengths).ok_or_else(|| {
        RankingErrors::InvariantViolation(format!(
            "no dominant set among {:?}",
            strength.subjects
        ))
    })?;
    Ok(set
        .iter()
        .map(|sid| strength.subjects[sid.0].clone())
        .collect())
}

// Returns the winner and the dominant set it was taken from.
fn resolve_round(
    strengths: &SquareMatrix,
    names: &[String],
    tiebreak: &[String],
) -> Result<(SubjectId, Vec<SubjectId>), RankingErrors> {
    if let Some(winner) = find_condorcet_winner(strengths) {
        debug!("resolve_round: condorcet winner: {:?}", names[winner.0]);
        return Ok((winner, vec![winner]));
    }

    let cycle = find_dominant_set(strengths).ok_or_else(|| {
        RankingErrors::InvariantViolation(format!("no dominant set among {:?}", names))
    })?;
    let cycle_names: Vec<&String> = cycle.iter().map(|sid| &names[sid.0]).collect();
    info!("Found cycle with: {:?}", cycle_names);

    for name in tiebreak {
        if let Some(sid) = find_subject(names, name) {
            if cycle.contains(&sid) {
                debug!("resolve_round: tiebreak winner: {:?}", name);
                return Ok((sid, cycle));
            }
        }
    }
    Err(RankingErrors::InvariantViolation(format!(
        "no member of {:?} in the tiebreak order {:?}",
        cycle_names, tiebreak
    )))
}

fn find_condorcet_winner(strengths: &SquareMatrix) -> Option<SubjectId> {
    strengths.ids().find(|&w| {
        strengths
            .ids()
            .all(|other| other == w || strengths.beats(w, other))
    })
}

// Subsets are tried by increasing size, and in lexicographic order for a given size.
fn find_dominant_set(strengths: &SquareMatrix) -> Option<Vec<SubjectId>> {
    let n = strengths.size;
    for size in 1..=n {
        let mut comb: Vec<usize> = (0..size).collect();
        loop {
            if dominates(strengths, &comb) {
                return Some(comb.into_iter().map(SubjectId).collect());
            }
            if !next_combination(&mut comb, n) {
                break;
            }
        }
    }
    None
}

fn dominates(strengths: &SquareMatrix, subset: &[usize]) -> bool {
    let mut inside = vec![false; strengths.size];
    for &idx in subset {
        inside[idx] = true;
    }
    subset.iter().all(|&member| {
        strengths
            .ids()
            .filter(|other| !inside[other.0])
            .all(|other| strengths.beats(SubjectId(member), other))
    })
}

// Advances to the next combination in lexicographic order. Returns false after the last one.
fn next_combination(comb: &mut [usize], n: usize) -> bool {
    let k = comb.len();
    let mut pos = k;
    while pos > 0 {
        pos -= 1;
        if comb[pos] < n - k + pos {
            comb[pos] += 1;
            for p in pos + 1..k {
                comb[p] = comb[p - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// The average score of every subject, in column order.
///
/// The average is NaN for a subject that no voter scored.
pub fn averages(table: &ScoreTable) -> Vec<f64> {
    (0..table.subjects.len())
        .map(|idx| {
            let scores: Vec<f64> = table.rows.iter().filter_map(|row| row[idx]).collect();
            if scores.is_empty() {
                f64::NAN
            } else {
                scores.iter().sum::<f64>() / scores.len() as f64
            }
        })
        .collect()
}

/// The subjects sorted by decreasing average score, rounded to two decimals.
///
/// Subjects with the same rounded average keep their column order, and the
/// subjects without any score come last.
pub fn tiebreak_order(table: &ScoreTable) -> Vec<String> {
    let mut rounded: Vec<(String, f64)> = table
        .subjects
        .iter()
        .cloned()
        .zip(averages(table).into_iter().map(round2))
        .collect();
    rounded.sort_by(|a, b| cmp_descending(a.1, b.1));
    rounded.into_iter().map(|(name, _)| name).collect()
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// Descending order, NaN last.
fn cmp_descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn table(subjects: &[&str], rows: &[&[Option<f64>]]) -> ScoreTable {
        ScoreTable::new(
            subjects.iter().map(|s| s.to_string()).collect(),
            rows.iter().map(|r| r.to_vec()).collect(),
        )
        .unwrap()
    }

    fn names(l: &[&str]) -> Vec<String> {
        l.iter().map(|s| s.to_string()).collect()
    }

    fn math_art() -> ScoreTable {
        table(
            &["Math", "Art"],
            &[
                &[Some(8.0), Some(5.0)],
                &[Some(6.0), Some(7.0)],
                &[None, Some(9.0)],
            ],
        )
    }

    // A beats B, B beats C, C beats A, each by 2 voters out of 3.
    // The last voter only scored C, which gives C the highest average.
    fn cycle() -> ScoreTable {
        table(
            &["A", "B", "C"],
            &[
                &[Some(3.0), Some(2.0), Some(1.0)],
                &[Some(1.0), Some(3.0), Some(2.0)],
                &[Some(2.0), Some(1.0), Some(3.0)],
                &[None, None, Some(10.0)],
            ],
        )
    }

    // The same cycle, with a fourth subject beaten by everyone.
    fn cycle_with_loser() -> ScoreTable {
        table(
            &["A", "B", "C", "D"],
            &[
                &[Some(3.0), Some(2.0), Some(1.0), Some(0.0)],
                &[Some(1.0), Some(3.0), Some(2.0), Some(0.0)],
                &[Some(2.0), Some(1.0), Some(3.0), Some(0.0)],
                &[None, None, Some(10.0), None],
            ],
        )
    }

    fn condorcet() -> ScoreTable {
        table(
            &["B", "A", "C"],
            &[
                &[Some(5.0), Some(9.0), Some(1.0)],
                &[Some(6.0), Some(8.0), Some(1.0)],
                &[Some(7.0), Some(7.0), Some(1.0)],
            ],
        )
    }

    #[test]
    fn preferences_math_art() {
        init();
        let pref = build_preferences(&math_art()).unwrap();
        assert_eq!(pref.get("Math", "Art"), Some(1.0));
        assert_eq!(pref.get("Art", "Math"), Some(1.0));
        assert_eq!(pref.get("Math", "Math"), Some(0.0));
        assert_eq!(pref.common_voters("Math", "Art"), Some(2));
        assert!(!pref.is_normalized());

        let norm = normalize_preferences(&pref).unwrap();
        assert_eq!(norm.get("Math", "Art"), Some(0.5));
        assert_eq!(norm.get("Art", "Math"), Some(0.5));
        assert!(norm.is_normalized());
        // Normalizing twice does not divide twice.
        assert_eq!(normalize_preferences(&norm).unwrap(), norm);
    }

    #[test]
    fn ties_count_for_nobody() {
        let pref = build_preferences(&condorcet()).unwrap();
        assert_eq!(pref.get("A", "B"), Some(2.0));
        assert_eq!(pref.get("B", "A"), Some(0.0));
    }

    #[test]
    fn ranking_math_art() {
        init();
        assert_eq!(full_ranking(&math_art()).unwrap(), names(&["Math", "Art"]));
        assert_eq!(simple_ranking(&math_art()).unwrap(), names(&["Math", "Art"]));
    }

    #[test]
    fn math_art_resolved_by_tiebreak() {
        let res = run_ranking(&math_art(), &RankingRules::DEFAULT_RULES).unwrap();
        assert_eq!(res.round_stats.len(), 2);
        assert_eq!(res.round_stats[0].dominant_set, names(&["Math", "Art"]));
        assert_eq!(res.round_stats[1].remaining, names(&["Art"]));
        assert_eq!(res.round_stats[1].dominant_set, names(&["Art"]));
    }

    #[test]
    fn strongest_paths_never_decrease() {
        for t in [math_art(), cycle(), cycle_with_loser(), condorcet()] {
            let pref = normalize_preferences(&build_preferences(&t).unwrap()).unwrap();
            let strengths = strongest_paths(&pref);
            for a in t.subjects() {
                for b in t.subjects() {
                    if a != b {
                        assert!(strengths.get(a, b).unwrap() >= pref.get(a, b).unwrap());
                    }
                }
            }
        }
    }

    #[test]
    fn strongest_paths_cycle() {
        let pref = normalize_preferences(&build_preferences(&cycle()).unwrap()).unwrap();
        assert_eq!(pref.get("B", "A"), Some(1.0 / 3.0));
        let strengths = strongest_paths(&pref);
        // B reaches A through C with strength 2/3.
        assert_eq!(strengths.get("B", "A"), Some(2.0 / 3.0));
        assert_eq!(strengths.beats("A", "B"), Some(false));
    }

    #[test]
    fn condorcet_winner_ranks_first() {
        init();
        let pref = normalize_preferences(&build_preferences(&condorcet()).unwrap()).unwrap();
        let strengths = strongest_paths(&pref);
        assert_eq!(dominant_set(&strengths).unwrap(), names(&["A"]));
        // The tiebreak order is not used for a Condorcet winner.
        assert_eq!(
            resolve_winner(&strengths, &names(&["C", "B", "A"])).unwrap(),
            "A"
        );
        assert_eq!(full_ranking(&condorcet()).unwrap(), names(&["A", "B", "C"]));
        assert_eq!(simple_ranking(&condorcet()).unwrap(), names(&["A", "B", "C"]));
    }

    #[test]
    fn cycle_resolved_by_highest_average() {
        init();
        let t = cycle();
        assert_eq!(tiebreak_order(&t), names(&["C", "A", "B"]));
        let pref = normalize_preferences(&build_preferences(&t).unwrap()).unwrap();
        let strengths = strongest_paths(&pref);
        assert_eq!(dominant_set(&strengths).unwrap(), names(&["A", "B", "C"]));
        assert_eq!(resolve_winner(&strengths, &tiebreak_order(&t)).unwrap(), "C");
        // Another tiebreak order picks another member of the cycle.
        assert_eq!(
            resolve_winner(&strengths, &names(&["B", "A", "C"])).unwrap(),
            "B"
        );
        assert_eq!(full_ranking(&t).unwrap(), names(&["C", "A", "B"]));
    }

    #[test]
    fn smallest_dominant_set_excludes_loser() {
        init();
        let t = cycle_with_loser();
        let pref = normalize_preferences(&build_preferences(&t).unwrap()).unwrap();
        let strengths = strongest_paths(&pref);
        assert_eq!(dominant_set(&strengths).unwrap(), names(&["A", "B", "C"]));

        let res = run_ranking(&t, &RankingRules::DEFAULT_RULES).unwrap();
        assert_eq!(res.ranking, names(&["C", "A", "B", "D"]));
        assert_eq!(res.round_stats[0].winner, "C");
        assert_eq!(res.round_stats[0].dominant_set, names(&["A", "B", "C"]));
        assert_eq!(res.round_stats[1].remaining, names(&["A", "B", "D"]));
        assert_eq!(res.round_stats[1].dominant_set, names(&["A"]));
    }

    #[test]
    fn simple_ranking_counts_victories() {
        let rules = RankingRules {
            mode: RankingMode::Simple,
            normalize_preferences: true,
        };
        let res = run_ranking(&cycle_with_loser(), &rules).unwrap();
        assert_eq!(res.ranking, names(&["C", "A", "B", "D"]));
        assert!(res.round_stats.is_empty());
        let victories: Vec<u32> = res.victories.iter().map(|v| v.victories).collect();
        assert_eq!(victories, vec![1, 1, 1, 0]);
        assert_eq!(res.victories[0].average, 4.0);
    }

    #[test]
    fn rankings_are_permutations() {
        for t in [math_art(), cycle(), cycle_with_loser(), condorcet()] {
            for r in [full_ranking(&t).unwrap(), simple_ranking(&t).unwrap()] {
                let mut sorted = r.clone();
                sorted.sort();
                let mut expected = t.subjects().to_vec();
                expected.sort();
                assert_eq!(sorted, expected);
            }
        }
    }

    #[test]
    fn rankings_are_deterministic() {
        let t = cycle_with_loser();
        let first = run_ranking(&t, &RankingRules::DEFAULT_RULES).unwrap();
        for _ in 0..5 {
            assert_eq!(run_ranking(&t, &RankingRules::DEFAULT_RULES).unwrap(), first);
            assert_eq!(simple_ranking(&t).unwrap(), simple_ranking(&t).unwrap());
        }
    }

    #[test]
    fn single_subject_is_insufficient() {
        let t = table(&["Math"], &[&[Some(1.0)]]);
        assert_eq!(full_ranking(&t), Err(RankingErrors::InsufficientData));
        assert_eq!(simple_ranking(&t), Err(RankingErrors::InsufficientData));
        assert_eq!(
            build_preferences(&t).err(),
            Some(RankingErrors::InsufficientData)
        );
    }

    #[test]
    fn no_voters_is_insufficient() {
        let t = table(&["Math", "Art"], &[]);
        assert_eq!(full_ranking(&t), Err(RankingErrors::InsufficientData));
    }

    #[test]
    fn disjoint_subjects() {
        let t = table(&["A", "B"], &[&[Some(1.0), None], &[None, Some(2.0)]]);
        let expected = Err(RankingErrors::DisjointComparison {
            first: "A".to_string(),
            second: "B".to_string(),
        });
        assert_eq!(full_ranking(&t), expected);
        assert_eq!(simple_ranking(&t), expected);
    }

    #[test]
    fn disjoint_subjects_with_raw_counts() {
        let t = table(&["A", "B"], &[&[Some(1.0), None], &[None, Some(2.0)]]);
        let rules = RankingRules {
            mode: RankingMode::Full,
            normalize_preferences: false,
        };
        // Nobody compares the two subjects: the higher average wins.
        let res = run_ranking(&t, &rules).unwrap();
        assert_eq!(res.ranking, names(&["B", "A"]));
    }

    #[test]
    fn unscored_subject_comes_last_in_tiebreak() {
        let t = table(
            &["A", "B", "C"],
            &[&[Some(1.0), None, Some(1.0)], &[Some(2.0), None, Some(3.0)]],
        );
        assert!(averages(&t)[1].is_nan());
        assert_eq!(tiebreak_order(&t), names(&["C", "A", "B"]));
    }

    #[test]
    fn tiebreak_uses_rounded_averages() {
        // 7.001 and 7.004 both round to 7.00: column order decides.
        let t = table(&["A", "B"], &[&[Some(7.001), Some(7.004)]]);
        assert_eq!(tiebreak_order(&t), names(&["A", "B"]));
    }

    #[test]
    fn combinations_in_lexicographic_order() {
        let mut comb = vec![0, 1];
        let mut all = vec![comb.clone()];
        while next_combination(&mut comb, 4) {
            all.push(comb.clone());
        }
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        let mut full = vec![0, 1, 2];
        assert!(!next_combination(&mut full, 3));
    }
}
