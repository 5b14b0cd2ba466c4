// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.2: the tagged state a candidate holds at the boundary of a round.

use crate::ballot_metadata::CandidateIndex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The index of a round within `Race::rounds`. 0 means the first round.
/// `CandidateState` keeps one of these rather than a pointer back to the round itself:
/// an arena-by-index avoids the round <-> state <-> round cycle the original design has.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RoundIndex(pub usize);

impl fmt::Display for RoundIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CandidateStateKind {
    Running,
    Won,
    Eliminated,
}

/// An immutable snapshot: a candidate was in `kind` as of `round`. Transitions are
/// recorded by installing a new `CandidateState`, never by mutating one in place.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CandidateState {
    pub round: RoundIndex,
    pub candidate: CandidateIndex,
    pub kind: CandidateStateKind,
}

impl CandidateState {
    pub fn new(round: RoundIndex, candidate: CandidateIndex, kind: CandidateStateKind) -> Self {
        CandidateState {
            round,
            candidate,
            kind,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.kind, CandidateStateKind::Running)
    }
    pub fn is_won(&self) -> bool {
        matches!(self.kind, CandidateStateKind::Won)
    }
    pub fn is_eliminated(&self) -> bool {
        matches!(self.kind, CandidateStateKind::Eliminated)
    }
}
