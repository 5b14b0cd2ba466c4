// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.4: a single STV round, its candidate state snapshots and ballot buckets.

use crate::ballot::{Ballot, Destination};
use crate::ballot_metadata::CandidateIndex;
use crate::candidate_state::{CandidateState, CandidateStateKind, RoundIndex};

/// Which of a round's two candidate-state snapshots is being asked about (§4.4).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StateSide {
    Pre,
    Post,
}

/// A single round of tabulation: every candidate's pre- and post-state, the ballots
/// currently assigned to each candidate (plus the exhausted bucket), and a lazily
/// computed, explicitly invalidated score cache (§9 Design Notes).
#[derive(Clone, Debug)]
pub struct Round {
    number: usize,
    pre_state: Vec<CandidateState>,
    post_state: Vec<CandidateState>,
    candidate_ballots: Vec<Vec<Ballot>>,
    exhausted_ballots: Vec<Ballot>,
    score_cache: Option<Vec<f64>>,
    complete: bool,
}

impl Round {
    pub fn new(number: usize) -> Self {
        Round {
            number,
            pre_state: Vec::new(),
            post_state: Vec::new(),
            candidate_ballots: Vec::new(),
            exhausted_ballots: Vec::new(),
            score_cache: None,
            complete: false,
        }
    }

    /// 1-based round number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Idempotent: marking an already-complete round complete again is a no-op.
    pub fn complete(&mut self) {
        self.complete = true;
    }

    /// Installs `pre_state` for the next candidate in ballot-paper order; the
    /// post-state starts out equal to it until `set_candidate_state` says otherwise.
    pub fn add_candidate(&mut self, candidate: CandidateIndex, pre_state: CandidateState) {
        debug_assert_eq!(candidate.0, self.pre_state.len());
        self.pre_state.push(pre_state);
        self.post_state.push(pre_state);
        self.candidate_ballots.push(Vec::new());
        self.score_cache = None;
    }

    /// Classifies `ballot` by its current `top()` and appends it to that bucket.
    pub fn add_ballot(&mut self, ballot: Ballot) {
        match ballot.top() {
            Destination::Candidate(c) => self.candidate_ballots[c.0].push(ballot),
            Destination::Exhausted => self.exhausted_ballots.push(ballot),
        }
        self.score_cache = None;
    }

    /// Legal transitions are RUNNING -> WON and RUNNING -> ELIMINATED (§4.4); WON and
    /// ELIMINATED are sticky and may not be reassigned.
    pub fn set_candidate_state(&mut self, candidate: CandidateIndex, new_state: CandidateState) {
        assert!(
            self.post_state[candidate.0].is_running(),
            "candidate {:?} is no longer RUNNING in this round's post-state",
            candidate
        );
        assert!(
            !matches!(new_state.kind, CandidateStateKind::Running),
            "set_candidate_state may only move a candidate out of RUNNING"
        );
        self.post_state[candidate.0] = new_state;
        self.score_cache = None;
    }

    pub fn get_candidate_score(&mut self, candidate: CandidateIndex) -> f64 {
        self.get_candidates_score()[candidate.0]
    }

    /// Memoized sum of ballot values per candidate, recomputed lazily after any
    /// mutation invalidates the cache.
    pub fn get_candidates_score(&mut self) -> &[f64] {
        if self.score_cache.is_none() {
            let scores = self
                .candidate_ballots
                .iter()
                .map(|ballots| ballots.iter().map(|b| b.value()).sum())
                .collect();
            self.score_cache = Some(scores);
        }
        self.score_cache.as_deref().unwrap()
    }

    pub fn get_candidate_state(&self, side: StateSide, candidate: CandidateIndex) -> CandidateState {
        match side {
            StateSide::Pre => self.pre_state[candidate.0],
            StateSide::Post => self.post_state[candidate.0],
        }
    }

    pub fn get_candidates_state(&self, side: StateSide) -> &[CandidateState] {
        match side {
            StateSide::Pre => &self.pre_state,
            StateSide::Post => &self.post_state,
        }
    }

    /// Candidates in `kind`, in ballot-paper (candidate index) order.
    pub fn get_candidates_by_state(&self, side: StateSide, kind: CandidateStateKind) -> Vec<CandidateIndex> {
        self.get_candidates_state(side)
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.candidate)
            .collect()
    }

    /// Candidates whose pre- and post-state differ this round.
    pub fn get_candidates_changed(&self) -> Vec<CandidateIndex> {
        self.pre_state
            .iter()
            .zip(self.post_state.iter())
            .filter(|(pre, post)| pre.kind != post.kind)
            .map(|(pre, _)| pre.candidate)
            .collect()
    }

    pub fn get_candidate_ballots(&self, candidate: CandidateIndex) -> &[Ballot] {
        &self.candidate_ballots[candidate.0]
    }

    pub fn get_exhausted_ballots(&self) -> &[Ballot] {
        &self.exhausted_ballots
    }

    pub fn num_candidates(&self) -> usize {
        self.pre_state.len()
    }

    pub fn round_index(&self) -> RoundIndex {
        RoundIndex(self.number - 1)
    }
}
