// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! The literal scenarios from the testable-properties section: small, hand-computed
//! elections whose winners and per-round scores are known in advance.

use stv::{Candidate, CandidateIndex, CandidateStateKind, QuotaAlgorithm, Race, RaceError, RaceState, StateSide, Voter};

fn candidate(race: &mut Race, id: &str, name: &str) -> CandidateIndex {
    race.add_candidate(Candidate {
        id: id.to_string(),
        name: name.to_string(),
        party: "Ind".to_string(),
    })
    .unwrap()
}

fn voter(race: &mut Race, id: &str, preferences: Vec<CandidateIndex>) {
    race.add_voter(Voter {
        id: id.to_string(),
        preferences,
    })
    .unwrap();
}

fn winner_ids(race: &Race) -> Vec<&str> {
    race.winners().iter().map(|&c| race.candidate(c).id.as_str()).collect()
}

/// S1: trivial majority, Droop, 1 seat. quota = floor((5+1)/2) = 3. A wins 5-0.
#[test]
fn s1_trivial_majority() {
    let mut race = Race::new("s1", "Seat", 1, QuotaAlgorithm::Droop);
    let a = candidate(&mut race, "a", "Alice");
    let b = candidate(&mut race, "b", "Bob");
    for i in 0..5 {
        voter(&mut race, &format!("v{i}"), vec![a, b]);
    }
    assert_eq!(race.quota().unwrap(), 3);
    race.run_complete().unwrap();
    assert_eq!(race.state(), RaceState::Complete);
    assert_eq!(winner_ids(&race), vec!["a"]);
}

/// S3: collapse rule. 3 candidates, 3 seats: all three win round 1 with no quota check.
#[test]
fn s3_collapse_rule_elects_everyone_with_no_quota_check() {
    let mut race = Race::new("s3", "Seat", 3, QuotaAlgorithm::Droop);
    let a = candidate(&mut race, "a", "Alice");
    let b = candidate(&mut race, "b", "Bob");
    let c = candidate(&mut race, "c", "Cara");
    voter(&mut race, "v0", vec![a]);
    voter(&mut race, "v1", vec![b]);
    voter(&mut race, "v2", vec![c]);
    race.run_complete().unwrap();
    assert_eq!(race.state(), RaceState::Complete);
    let winners: std::collections::HashSet<&str> = winner_ids(&race).into_iter().collect();
    assert_eq!(winners, std::collections::HashSet::from(["a", "b", "c"]));
    assert_eq!(race.rounds().len(), 1);
}

/// S4: 4 candidates, 2 seats, nobody ranks D. Hare quota = floor(12/2) = 6, so nobody
/// meets quota in round 1 (scores 5/4/3/0). D (score 0) is eliminated along with the
/// single lowest non-zero scorer (C, score 3) in the same pass.
#[test]
fn s4_eliminates_zero_scorer_and_lowest_nonzero_together() {
    let mut race = Race::new("s4", "Seat", 2, QuotaAlgorithm::Hare);
    let a = candidate(&mut race, "a", "Alice");
    let b = candidate(&mut race, "b", "Bob");
    let c = candidate(&mut race, "c", "Cara");
    let d = candidate(&mut race, "d", "Dana");
    for i in 0..5 {
        voter(&mut race, &format!("va{i}"), vec![a]);
    }
    for i in 0..4 {
        voter(&mut race, &format!("vb{i}"), vec![b]);
    }
    for i in 0..3 {
        voter(&mut race, &format!("vc{i}"), vec![c]);
    }
    assert_eq!(race.quota().unwrap(), 6);
    race.run_complete().unwrap();
    assert_eq!(race.state(), RaceState::Complete);

    let round1_post = race.rounds()[0].get_candidates_state(StateSide::Post);
    assert_eq!(round1_post[c.0].kind, CandidateStateKind::Eliminated);
    assert_eq!(round1_post[d.0].kind, CandidateStateKind::Eliminated);
    assert_eq!(round1_post[a.0].kind, CandidateStateKind::Running);
    assert_eq!(round1_post[b.0].kind, CandidateStateKind::Running);

    // With only A and B left running and 2 seats remaining, the collapse rule elects both.
    let winners: std::collections::HashSet<&str> = winner_ids(&race).into_iter().collect();
    assert_eq!(winners, std::collections::HashSet::from(["a", "b"]));
}

/// S5: Hare quota, single seat, 10 voters => quota = 10 (unanimity required).
#[test]
fn s5_hare_quota_single_seat_requires_unanimity() {
    let mut race = Race::new("s5", "Seat", 1, QuotaAlgorithm::Hare);
    let a = candidate(&mut race, "a", "Alice");
    let b = candidate(&mut race, "b", "Bob");
    for i in 0..9 {
        voter(&mut race, &format!("va{i}"), vec![a, b]);
    }
    voter(&mut race, "vb0", vec![b]);
    assert_eq!(race.quota().unwrap(), 10);
    race.run_complete().unwrap();
    assert_eq!(race.state(), RaceState::Complete);
    // Neither candidate reaches 10; B(score 1) is eliminated as the lower scorer after A
    // is the only one left, collapsing onto the single remaining seat.
    assert_eq!(winner_ids(&race), vec!["a"]);
}

/// S6: two candidates tied 50/50 forever, one seat. Overflow resolution exhausts every
/// prior round without breaking the tie and must raise UnresolvableTie.
#[test]
fn s6_unbreakable_tie_is_an_error() {
    let mut race = Race::new("s6", "Seat", 1, QuotaAlgorithm::Droop);
    let a = candidate(&mut race, "a", "Alice");
    let b = candidate(&mut race, "b", "Bob");
    for i in 0..3 {
        voter(&mut race, &format!("va{i}"), vec![a]);
    }
    for i in 0..3 {
        voter(&mut race, &format!("vb{i}"), vec![b]);
    }
    let err = race.run_complete().unwrap_err();
    assert!(matches!(err, RaceError::UnresolvableTie(_)));
}

/// §8 boundary: zero voters completes round 1 immediately with no winners.
#[test]
fn zero_voters_completes_with_no_winners() {
    let mut race = Race::new("empty", "Seat", 1, QuotaAlgorithm::Hare);
    candidate(&mut race, "a", "Alice");
    race.run_complete().unwrap();
    assert_eq!(race.state(), RaceState::Complete);
    assert!(race.winners().is_empty());
}
