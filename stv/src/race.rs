// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.5: the STV state machine. `Race` is the only writer of voter transfer values and
//! the only thing that advances `Round`s; it drives the ADDING -> TABULATING -> COMPLETE
//! state machine one micro-step per `run()` call (§4.5).

use crate::ballot::Ballot;
use crate::ballot_metadata::{Candidate, CandidateIndex, NumberOfCandidates, Voter, VoterIndex};
use crate::candidate_state::{CandidateState, CandidateStateKind, RoundIndex};
use crate::error::RaceError;
use crate::event_sink::{NullEventSink, RaceEventSink};
use crate::quota::{self, QuotaAlgorithm};
use crate::round::{Round, StateSide};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::VecDeque;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RaceState {
    Adding,
    Tabulating,
    Complete,
}

/// The STV state machine for a single race (§3, §4.5).
pub struct Race {
    id: String,
    position: String,
    extended_data: Value,
    max_winners: NumberOfCandidates,
    quota_algorithm: QuotaAlgorithm,
    candidates: Vec<Candidate>,
    voters: Vec<Voter>,
    rounds: Vec<Round>,
    winners: Vec<CandidateIndex>,
    transfer_queue: VecDeque<VoterIndex>,
    /// Current per-(race, round) transfer value for each voter (§3), indexed by `VoterIndex`.
    transfer_values: Vec<f64>,
    state: RaceState,
    sink: Box<dyn RaceEventSink>,
}

impl Race {
    pub fn new(id: impl Into<String>, position: impl Into<String>, max_winners: usize, quota_algorithm: QuotaAlgorithm) -> Self {
        Race {
            id: id.into(),
            position: position.into(),
            extended_data: Value::Null,
            max_winners: NumberOfCandidates(max_winners),
            quota_algorithm,
            candidates: Vec::new(),
            voters: Vec::new(),
            rounds: Vec::new(),
            winners: Vec::new(),
            transfer_queue: VecDeque::new(),
            transfer_values: Vec::new(),
            state: RaceState::Adding,
            sink: Box::new(NullEventSink),
        }
    }

    pub fn with_extended_data(mut self, extended_data: Value) -> Self {
        self.extended_data = extended_data;
        self
    }

    pub fn with_event_sink(mut self, sink: Box<dyn RaceEventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn position(&self) -> &str {
        &self.position
    }
    pub fn extended_data(&self) -> &Value {
        &self.extended_data
    }
    pub fn max_winners(&self) -> usize {
        self.max_winners.0
    }
    pub fn state(&self) -> RaceState {
        self.state
    }
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Mutable access to rounds, needed by callers (e.g. `result_table`) that must
    /// force the lazily memoized score cache (§4.4) of a round other than the latest.
    pub fn rounds_mut(&mut self) -> &mut [Round] {
        &mut self.rounds
    }
    pub fn winners(&self) -> &[CandidateIndex] {
        &self.winners
    }

    pub fn candidate(&self, index: CandidateIndex) -> &Candidate {
        &self.candidates[index.0]
    }

    pub fn get_candidate(&self, id: &str) -> Option<(CandidateIndex, &Candidate)> {
        self.candidates
            .iter()
            .enumerate()
            .find(|(_, c)| c.id == id)
            .map(|(i, c)| (CandidateIndex(i), c))
    }

    /// §Invariant 1: no candidate may be added once the race has left ADDING.
    /// §Error taxonomy: duplicate candidate ids are fatal to the call, race stays usable.
    pub fn add_candidate(&mut self, candidate: Candidate) -> Result<CandidateIndex, RaceError> {
        if self.state != RaceState::Adding {
            return Err(RaceError::PhaseViolation);
        }
        if let Some(existing) = self.candidates.iter().position(|c| c.id == candidate.id) {
            return Err(RaceError::DuplicateCandidate(CandidateIndex(existing)));
        }
        let index = CandidateIndex(self.candidates.len());
        self.candidates.push(candidate);
        Ok(index)
    }

    /// Duplicate voters (by id) are silently ignored (§7): the existing index is returned.
    pub fn add_voter(&mut self, voter: Voter) -> Result<VoterIndex, RaceError> {
        if self.state != RaceState::Adding {
            return Err(RaceError::PhaseViolation);
        }
        if let Some(existing) = self.voters.iter().position(|v| v.id == voter.id) {
            return Ok(VoterIndex(existing));
        }
        let index = VoterIndex(self.voters.len());
        self.voters.push(voter);
        self.transfer_values.push(1.0);
        Ok(index)
    }

    /// §4.1, §3 invariant 7: computed from the current voter count, not cached across rounds.
    pub fn quota(&self) -> Result<usize, RaceError> {
        quota::quota(self.voters.len(), self.max_winners.0, self.quota_algorithm)
    }

    /// Advance the state machine by one micro-step (§4.5). A no-op once COMPLETE.
    pub fn run(&mut self) -> Result<(), RaceError> {
        if self.state == RaceState::Complete {
            return Ok(());
        }
        self.state = RaceState::Tabulating;

        if self.rounds.is_empty() {
            self.initialize_first_round();
            return Ok(());
        }

        let round_idx = self.rounds.len() - 1;
        if self.rounds[round_idx].is_complete() {
            self.rollover(round_idx);
            return Ok(());
        }

        if let Some(voter) = self.transfer_queue.pop_front() {
            self.cast_ballot(round_idx, voter);
            return Ok(());
        }

        self.tabulate(round_idx)
    }

    /// Runs `run()` until the race reaches COMPLETE. Idempotent thereafter (§8).
    pub fn run_complete(&mut self) -> Result<(), RaceError> {
        while self.state != RaceState::Complete {
            self.run()?;
        }
        Ok(())
    }

    fn initialize_first_round(&mut self) {
        let mut round = Round::new(1);
        let round_index = RoundIndex(0);
        for i in 0..self.candidates.len() {
            let c = CandidateIndex(i);
            round.add_candidate(c, CandidateState::new(round_index, c, CandidateStateKind::Running));
        }
        self.rounds.push(round);
        self.transfer_queue = (0..self.voters.len()).map(VoterIndex).collect();
        self.sink.round_started(1);
    }

    fn rollover(&mut self, round_idx: usize) {
        let changed: Vec<CandidateIndex> = self.rounds[round_idx].get_candidates_changed();
        let post_states: Vec<CandidateState> = self.rounds[round_idx].get_candidates_state(StateSide::Post).to_vec();
        let mut ballots_to_migrate: Vec<Ballot> = Vec::new();
        for i in 0..self.candidates.len() {
            let c = CandidateIndex(i);
            if !changed.contains(&c) {
                ballots_to_migrate.extend(self.rounds[round_idx].get_candidate_ballots(c).iter().cloned());
            }
        }
        ballots_to_migrate.extend(self.rounds[round_idx].get_exhausted_ballots().iter().cloned());

        let new_number = self.rounds[round_idx].number() + 1;
        let mut new_round = Round::new(new_number);
        for (i, state) in post_states.into_iter().enumerate() {
            new_round.add_candidate(CandidateIndex(i), state);
        }
        for ballot in ballots_to_migrate {
            new_round.add_ballot(ballot);
        }
        self.rounds.push(new_round);
        self.sink.round_started(new_number);
    }

    fn cast_ballot(&mut self, round_idx: usize, voter: VoterIndex) {
        let running: std::collections::HashSet<CandidateIndex> = self.rounds[round_idx]
            .get_candidates_by_state(StateSide::Pre, CandidateStateKind::Running)
            .into_iter()
            .collect();
        let value = self.transfer_values[voter.0];
        let ballot = Ballot::cast(voter, value, &self.voters[voter.0].preferences, &running);
        self.sink.ballot_cast(self.rounds[round_idx].number(), voter, value);
        self.rounds[round_idx].add_ballot(ballot);
    }

    fn tabulate(&mut self, round_idx: usize) -> Result<(), RaceError> {
        let scores: Vec<f64> = self.rounds[round_idx].get_candidates_score().to_vec();
        let running: Vec<CandidateIndex> = self.rounds[round_idx].get_candidates_by_state(StateSide::Pre, CandidateStateKind::Running);

        let mut terminated = false;
        if running.is_empty() {
            self.rounds[round_idx].complete();
            self.state = RaceState::Complete;
            terminated = true;
        }
        if self.voters.is_empty() {
            self.rounds[round_idx].complete();
            self.state = RaceState::Complete;
            terminated = true;
        }
        if terminated {
            self.sink.race_completed(&self.winners, self.rounds.len());
            return Ok(());
        }

        let quota = self.quota()? as f64;
        let max_round_winners = self.max_winners.0 - self.winners.len();

        let mut round_winners: Vec<CandidateIndex> = if running.len() <= max_round_winners {
            running.clone()
        } else {
            let mut sorted_running = running.clone();
            sorted_running.sort_by(|&a, &b| cmp_score_desc(&scores, a, b));
            sorted_running
                .into_iter()
                .filter(|&c| scores[c.0] >= quota)
                .collect()
        };
        round_winners.sort_by(|&a, &b| cmp_score_desc(&scores, a, b));

        // Overflow resolution (§4.5): only ever triggers when rule B over-selected.
        while round_winners.len() > max_round_winners {
            let last = round_winners[round_winners.len() - 1];
            let second_last = round_winners[round_winners.len() - 2];
            if scores[last.0] != scores[second_last.0] {
                round_winners.pop();
                continue;
            }

            let tie_score = scores[last.0];
            let mut tied: Vec<CandidateIndex> = round_winners
                .iter()
                .copied()
                .filter(|&c| scores[c.0] == tie_score)
                .collect();

            let mut prior_round_idx = if round_idx == 0 { None } else { Some(round_idx - 1) };
            loop {
                let p = match prior_round_idx {
                    Some(p) => p,
                    None => return Err(RaceError::UnresolvableTie(tied)),
                };
                let prior_scores: Vec<f64> = self.rounds[p].get_candidates_score().to_vec();
                tied.sort_by(|&a, &b| cmp_score_desc(&prior_scores, a, b));
                let worst = tied[tied.len() - 1];
                let second_worst = tied[tied.len() - 2];
                if prior_scores[worst.0] != prior_scores[second_worst.0] {
                    self.sink.tie_resolved(self.rounds[round_idx].number(), &tied, worst);
                    round_winners.retain(|&c| c != worst);
                    break;
                } else {
                    prior_round_idx = if p == 0 { None } else { Some(p - 1) };
                }
            }
        }

        if !round_winners.is_empty() {
            for c in round_winners.iter().copied() {
                let round_index = self.rounds[round_idx].round_index();
                self.rounds[round_idx].set_candidate_state(c, CandidateState::new(round_index, c, CandidateStateKind::Won));
                let s = scores[c.0];
                let surplus = (s - quota).max(0.0);
                let t = if surplus > 0.0 { surplus / s } else { 1.0 };
                let ballots: Vec<(VoterIndex, f64)> = self.rounds[round_idx]
                    .get_candidate_ballots(c)
                    .iter()
                    .map(|b| (b.voter, b.value()))
                    .collect();
                for (voter, value) in ballots {
                    self.transfer_values[voter.0] = value * t;
                    self.transfer_queue.push_back(voter);
                }
                self.winners.push(c);
                self.sink.candidate_elected(self.rounds[round_idx].number(), c, s);
            }

            if self.winners.len() == self.max_winners.0 {
                let still_running = self.rounds[round_idx].get_candidates_by_state(StateSide::Post, CandidateStateKind::Running);
                for c in still_running.iter().copied() {
                    let round_index = self.rounds[round_idx].round_index();
                    self.rounds[round_idx].set_candidate_state(c, CandidateState::new(round_index, c, CandidateStateKind::Eliminated));
                }
                if !still_running.is_empty() {
                    self.sink.candidates_eliminated(self.rounds[round_idx].number(), &still_running);
                }
            }
            self.rounds[round_idx].complete();
            if self.rounds[round_idx]
                .get_candidates_by_state(StateSide::Post, CandidateStateKind::Running)
                .is_empty()
            {
                self.state = RaceState::Complete;
                self.sink.race_completed(&self.winners, self.rounds.len());
            }
            return Ok(());
        }

        // No winner was committed this round: eliminate zero-scorers plus the
        // lowest-scoring non-zero tier, all in the same pass (§4.5, §9 open question).
        let zero_scorers: Vec<CandidateIndex> = running.iter().copied().filter(|&c| scores[c.0] == 0.0).collect();
        let remaining: Vec<CandidateIndex> = running.iter().copied().filter(|c| !zero_scorers.contains(c)).collect();
        let mut eliminated = zero_scorers;
        if !remaining.is_empty() {
            let min_score = remaining.iter().map(|&c| scores[c.0]).fold(f64::INFINITY, f64::min);
            eliminated.extend(remaining.into_iter().filter(|&c| scores[c.0] == min_score));
        }

        for c in eliminated.iter().copied() {
            let round_index = self.rounds[round_idx].round_index();
            self.rounds[round_idx].set_candidate_state(c, CandidateState::new(round_index, c, CandidateStateKind::Eliminated));
            let voters: Vec<VoterIndex> = self.rounds[round_idx].get_candidate_ballots(c).iter().map(|b| b.voter).collect();
            for v in voters {
                self.transfer_queue.push_back(v);
            }
        }
        if !eliminated.is_empty() {
            self.sink.candidates_eliminated(self.rounds[round_idx].number(), &eliminated);
        }
        self.rounds[round_idx].complete();
        Ok(())
    }
}

fn cmp_score_desc(scores: &[f64], a: CandidateIndex, b: CandidateIndex) -> Ordering {
    scores[b.0].partial_cmp(&scores[a.0]).unwrap_or(Ordering::Equal)
}
