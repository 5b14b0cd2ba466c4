// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! A Single Transferable Vote tabulation engine for one multi-winner race at a time
//! (one quota algorithm, one fixed rule set — no per-jurisdiction pluggability). The
//! core has no I/O, no logging dependency, and no configuration format of its own;
//! those are the `cli` crate's concern.

pub mod ballot;
pub mod ballot_metadata;
pub mod candidate_state;
pub mod error;
pub mod event_sink;
pub mod quota;
pub mod race;
pub mod result_table;
pub mod round;

pub use ballot::{Ballot, Destination};
pub use ballot_metadata::{Candidate, CandidateIndex, NumberOfCandidates, Voter, VoterIndex};
pub use candidate_state::{CandidateState, CandidateStateKind, RoundIndex};
pub use error::RaceError;
pub use event_sink::{NullEventSink, RaceEventSink};
pub use quota::QuotaAlgorithm;
pub use race::{Race, RaceState};
pub use result_table::{build_result_table, ResultRow};
pub use round::{Round, StateSide};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn build_two_seat_race() -> Race {
        let mut race = Race::new("race-1", "Council", 2, QuotaAlgorithm::Droop);
        let a = race
            .add_candidate(Candidate {
                id: "a".into(),
                name: "Alice".into(),
                party: "Red".into(),
            })
            .unwrap();
        let b = race
            .add_candidate(Candidate {
                id: "b".into(),
                name: "Bob".into(),
                party: "Blue".into(),
            })
            .unwrap();
        let c = race
            .add_candidate(Candidate {
                id: "c".into(),
                name: "Cara".into(),
                party: "Green".into(),
            })
            .unwrap();

        // 4 ballots [A,B,C], 1 ballot [B], 1 ballot [C]: matches spec scenario S2.
        for i in 0..4 {
            race.add_voter(Voter {
                id: format!("v{}", i),
                preferences: vec![a, b, c],
            })
            .unwrap();
        }
        race.add_voter(Voter {
            id: "v4".into(),
            preferences: vec![b],
        })
        .unwrap();
        race.add_voter(Voter {
            id: "v5".into(),
            preferences: vec![c],
        })
        .unwrap();
        race
    }

    #[test]
    fn s2_surplus_transfer_elects_both_seats() {
        let mut race = build_two_seat_race();
        race.run_complete().unwrap();
        assert_eq!(race.state(), RaceState::Complete);
        let winners: HashSet<&str> = race.winners().iter().map(|&c| race.candidate(c).id.as_str()).collect();
        assert_eq!(winners, HashSet::from(["a", "b"]));
    }

    #[test]
    fn run_complete_is_idempotent_once_complete() {
        let mut race = build_two_seat_race();
        race.run_complete().unwrap();
        let winners_before = race.winners().to_vec();
        race.run().unwrap();
        race.run().unwrap();
        assert_eq!(race.winners(), winners_before.as_slice());
    }

    #[test]
    fn duplicate_candidate_id_is_rejected() {
        let mut race = Race::new("r", "Seat", 1, QuotaAlgorithm::Hare);
        race.add_candidate(Candidate {
            id: "a".into(),
            name: "Alice".into(),
            party: "Red".into(),
        })
        .unwrap();
        let err = race
            .add_candidate(Candidate {
                id: "a".into(),
                name: "Alice Clone".into(),
                party: "Red".into(),
            })
            .unwrap_err();
        assert!(matches!(err, RaceError::DuplicateCandidate(_)));
    }

    #[test]
    fn cannot_add_candidates_after_tabulation_starts() {
        let mut race = Race::new("r", "Seat", 1, QuotaAlgorithm::Hare);
        let a = race
            .add_candidate(Candidate {
                id: "a".into(),
                name: "Alice".into(),
                party: "Red".into(),
            })
            .unwrap();
        race.add_voter(Voter {
            id: "v0".into(),
            preferences: vec![a],
        })
        .unwrap();
        race.run().unwrap(); // initialization step
        let err = race
            .add_candidate(Candidate {
                id: "b".into(),
                name: "Bob".into(),
                party: "Blue".into(),
            })
            .unwrap_err();
        assert!(matches!(err, RaceError::PhaseViolation));
    }

    #[test]
    fn no_voters_completes_immediately_with_no_winners() {
        let mut race = Race::new("r", "Seat", 1, QuotaAlgorithm::Hare);
        race.add_candidate(Candidate {
            id: "a".into(),
            name: "Alice".into(),
            party: "Red".into(),
        })
        .unwrap();
        race.run_complete().unwrap();
        assert_eq!(race.state(), RaceState::Complete);
        assert!(race.winners().is_empty());
    }

    #[test]
    fn result_table_groups_and_truncates() {
        let mut race = build_two_seat_race();
        race.run_complete().unwrap();
        let rows = build_result_table(&mut race, race.rounds().len()).unwrap();
        assert_eq!(rows.len(), 3);
        let won = rows.iter().filter(|r| r.status == "WON").count();
        let eliminated = rows.iter().filter(|r| r.status == "ELIMINATED").count();
        assert_eq!(won, 2);
        assert_eq!(eliminated, 1);
    }
}
