// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Information about the contest: candidates, voters, and the indices used to refer to them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate, referred to by position in `Race::candidates`, 0 being first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd)]
pub struct CandidateIndex(pub usize);

impl fmt::Display for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Debug for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A voter, referred to by position in `Race::voters`, 0 being first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd)]
pub struct VoterIndex(pub usize);

impl fmt::Display for VoterIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Debug for VoterIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "V{}", self.0)
    }
}

/// Represents a number of candidates, e.g. seats or remaining seats.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd)]
pub struct NumberOfCandidates(pub usize);

impl fmt::Display for NumberOfCandidates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Debug for NumberOfCandidates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Information about a candidate in the contest. Immutable after creation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Candidate {
    /// A stable string id, unique within the race, as provided by the candidate roster.
    pub id: String,
    pub name: String,
    pub party: String,
}

/// A voter's identity. The ranked preferences and per-round transfer values the voter
/// contributes are held by the `Race`/`Round` machinery (§3, §4.3), not here: a `Voter`
/// is immutable once added to a race.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Voter {
    pub id: String,
    /// Ranked preference list of candidate ids, most preferred first.
    pub preferences: Vec<CandidateIndex>,
}
