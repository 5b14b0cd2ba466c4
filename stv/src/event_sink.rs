// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.7: an optional structured trace of race progress. The core has no logging
//! dependency of its own (§9 Design Notes); a caller that wants round-by-round
//! traces passes a sink that does, such as the `log`-backed one the `cli` driver uses.

use crate::ballot_metadata::{CandidateIndex, VoterIndex};

pub trait RaceEventSink {
    fn round_started(&mut self, _round_number: usize) {}
    fn ballot_cast(&mut self, _round_number: usize, _voter: VoterIndex, _value: f64) {}
    fn candidate_elected(&mut self, _round_number: usize, _candidate: CandidateIndex, _score: f64) {}
    fn candidates_eliminated(&mut self, _round_number: usize, _candidates: &[CandidateIndex]) {}
    fn tie_resolved(&mut self, _round_number: usize, _tied: &[CandidateIndex], _dropped: CandidateIndex) {}
    fn race_completed(&mut self, _winners: &[CandidateIndex], _num_rounds: usize) {}
}

/// The default sink: observes nothing. Used when a caller has no interest in tracing.
#[derive(Default)]
pub struct NullEventSink;

impl RaceEventSink for NullEventSink {}
