// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.7/§4.8: wires the core's `RaceEventSink` trait to the `log` facade. The core
//! itself never depends on `log`; this is the driver supplying observability.

use stv::{CandidateIndex, RaceEventSink, VoterIndex};

pub struct LoggingEventSink {
    race_id: String,
}

impl LoggingEventSink {
    pub fn new(race_id: impl Into<String>) -> Self {
        LoggingEventSink { race_id: race_id.into() }
    }
}

impl RaceEventSink for LoggingEventSink {
    fn round_started(&mut self, round_number: usize) {
        log::debug!("race {}: round {} started", self.race_id, round_number);
    }

    fn ballot_cast(&mut self, round_number: usize, voter: VoterIndex, value: f64) {
        log::trace!("race {}: round {}: voter {:?} cast at value {}", self.race_id, round_number, voter, value);
    }

    fn candidate_elected(&mut self, round_number: usize, candidate: CandidateIndex, score: f64) {
        log::info!("race {}: round {}: candidate {:?} elected with score {}", self.race_id, round_number, candidate, score);
    }

    fn candidates_eliminated(&mut self, round_number: usize, candidates: &[CandidateIndex]) {
        log::debug!("race {}: round {}: eliminated {:?}", self.race_id, round_number, candidates);
    }

    fn tie_resolved(&mut self, round_number: usize, tied: &[CandidateIndex], dropped: CandidateIndex) {
        log::warn!("race {}: round {}: tie among {:?} resolved by dropping {:?}", self.race_id, round_number, tied, dropped);
    }

    fn race_completed(&mut self, winners: &[CandidateIndex], num_rounds: usize) {
        log::info!("race {}: completed after {} rounds, winners {:?}", self.race_id, num_rounds, winners);
    }
}
