// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.6: a human-presentable snapshot of one round, the form CSV/JSON result sheets
//! and audit tables are built from.

use crate::ballot_metadata::CandidateIndex;
use crate::candidate_state::{CandidateState, CandidateStateKind};
use crate::error::RaceError;
use crate::race::Race;
use crate::round::StateSide;
use std::cmp::Ordering;

/// One row of a result table: a candidate's standing as of a given round.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub name: String,
    pub party: String,
    pub status: String,
    pub score_display: String,
    pub quota_fraction: String,
}

/// Build the result table for `round_number` (1-based), grouped WON / RUNNING /
/// ELIMINATED and sorted within each group per §4.6.
pub fn build_result_table(race: &mut Race, round_number: usize) -> Result<Vec<ResultRow>, RaceError> {
    let quota = race.quota()? as f64;
    let round_idx = round_number - 1;
    let num_candidates = race.candidates().len();

    let round_complete = race.rounds()[round_idx].is_complete();
    let side = if round_complete { StateSide::Post } else { StateSide::Pre };
    let states: Vec<CandidateState> = race.rounds()[round_idx].get_candidates_state(side).to_vec();

    let previously_changed: Vec<CandidateIndex> = if round_idx == 0 {
        Vec::new()
    } else {
        race.rounds()[round_idx - 1].get_candidates_changed()
    };

    let current_scores: Vec<f64> = race.rounds_mut()[round_idx].get_candidates_score().to_vec();

    // WON/ELIMINATED candidates display the score frozen at the round their
    // transition happened in (`state.round`), not the current round's score.
    let mut transition_score = vec![0.0_f64; num_candidates];
    for (i, state) in states.iter().enumerate() {
        if !matches!(state.kind, CandidateStateKind::Running) {
            let r = state.round.0;
            transition_score[i] = race.rounds_mut()[r].get_candidate_score(CandidateIndex(i));
        }
    }

    let mut won = Vec::new();
    let mut running = Vec::new();
    let mut eliminated = Vec::new();
    for (i, state) in states.iter().enumerate() {
        match state.kind {
            CandidateStateKind::Won => won.push(CandidateIndex(i)),
            CandidateStateKind::Running => running.push(CandidateIndex(i)),
            CandidateStateKind::Eliminated => eliminated.push(CandidateIndex(i)),
        }
    }

    let by_recency_then_score_then_name = |a: CandidateIndex, b: CandidateIndex| -> Ordering {
        states[b.0]
            .round
            .0
            .cmp(&states[a.0].round.0)
            .then_with(|| cmp_f64_desc(transition_score[a.0], transition_score[b.0]))
            .then_with(|| race.candidate(a).party.cmp(&race.candidate(b).party))
            .then_with(|| race.candidate(a).name.cmp(&race.candidate(b).name))
    };
    won.sort_by(|&a, &b| by_recency_then_score_then_name(a, b));
    eliminated.sort_by(|&a, &b| by_recency_then_score_then_name(a, b));

    running.sort_by(|&a, &b| {
        cmp_f64_desc(current_scores[a.0], current_scores[b.0])
            .then_with(|| race.candidate(a).party.cmp(&race.candidate(b).party))
            .then_with(|| race.candidate(a).name.cmp(&race.candidate(b).name))
    });

    let mut rows = Vec::with_capacity(num_candidates);

    for c in won {
        let cand = race.candidate(c);
        let score = transition_score[c.0];
        rows.push(ResultRow {
            name: cand.name.clone(),
            party: cand.party.clone(),
            status: "WON".to_string(),
            score_display: format!("{} ({})", quota as usize, format_truncated(score)),
            quota_fraction: format_truncated(score / quota),
        });
    }

    for c in running {
        let cand = race.candidate(c);
        let score = current_scores[c.0];
        rows.push(ResultRow {
            name: cand.name.clone(),
            party: cand.party.clone(),
            status: "RUNNING".to_string(),
            score_display: format_truncated(score),
            quota_fraction: format_truncated(score / quota),
        });
    }

    for c in eliminated {
        let cand = race.candidate(c);
        let score = transition_score[c.0];
        let transferring = !round_complete && previously_changed.contains(&c);
        rows.push(ResultRow {
            name: cand.name.clone(),
            party: cand.party.clone(),
            status: if transferring { "TRANSFERRING".to_string() } else { "ELIMINATED".to_string() },
            score_display: format!("0 ({})", format_truncated(score)),
            quota_fraction: "0".to_string(),
        });
    }

    Ok(rows)
}

fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Floor (never round) to 4 decimal places, matching §4.6's display rule.
fn truncate4(v: f64) -> f64 {
    (v * 10_000.0).floor() / 10_000.0
}

fn format_truncated(v: f64) -> String {
    format!("{}", truncate4(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_zero_not_nearest() {
        assert_eq!(truncate4(1.0 / 3.0), 0.3333);
        assert_eq!(format_truncated(1.0 / 3.0), "0.3333");
    }
}
