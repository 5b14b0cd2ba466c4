// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! The error taxonomy of §7: conditions a `Race` can raise, as a closed `thiserror` enum.

use crate::ballot_metadata::CandidateIndex;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RaceError {
    #[error("add_voter/add_candidate called while race is not in the ADDING phase")]
    PhaseViolation,

    #[error("candidate {0:?} was already added to this race")]
    DuplicateCandidate(CandidateIndex),

    #[error("overflow resolution exhausted all prior rounds without breaking a tie among {0:?}")]
    UnresolvableTie(Vec<CandidateIndex>),

    #[error("quota computation requires max_winners >= 1, got voters={voters} max_winners={max_winners}")]
    QuotaInputInvalid { voters: usize, max_winners: usize },
}
