// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.3: a ballot is one voter's contribution to one round.

use crate::ballot_metadata::{CandidateIndex, VoterIndex};
use std::collections::HashSet;

/// Where a ballot's weight currently sits: with a still-running candidate, or exhausted
/// because none of its remaining preferences are still running.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Destination {
    Candidate(CandidateIndex),
    Exhausted,
}

/// One voter's contribution to a single round: a transfer value and the ranked list of
/// still-relevant candidates as of the moment it was cast into the round.
#[derive(Clone, Debug)]
pub struct Ballot {
    pub voter: VoterIndex,
    value: f64,
    /// Preferences already filtered to candidates that were RUNNING when this ballot
    /// was cast (§4.3): the first entry, if any, is this ballot's `top()`.
    preferences: Vec<CandidateIndex>,
}

impl Ballot {
    /// Restrict `full_preferences` to the subset of `running` candidates, preserving
    /// order, and pair it with `value` to produce the ballot a voter casts into a round.
    pub fn cast(
        voter: VoterIndex,
        value: f64,
        full_preferences: &[CandidateIndex],
        running: &HashSet<CandidateIndex>,
    ) -> Self {
        let preferences = full_preferences
            .iter()
            .copied()
            .filter(|c| running.contains(c))
            .collect();
        Ballot {
            voter,
            value,
            preferences,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn preferences(&self) -> &[CandidateIndex] {
        &self.preferences
    }

    /// The first preference that is still running, or `Exhausted` if none remain.
    pub fn top(&self) -> Destination {
        match self.preferences.first() {
            Some(&c) => Destination::Candidate(c),
            None => Destination::Exhausted,
        }
    }

    /// Produce the ballot this one becomes in the next round: same preference list
    /// (already filtered to what was running when cast), scaled transfer value.
    pub fn with_value(&self, value: f64) -> Self {
        Ballot {
            voter: self.voter,
            value,
            preferences: self.preferences.clone(),
        }
    }
}
