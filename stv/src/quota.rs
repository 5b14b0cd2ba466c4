// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! The two quota algorithms a race may be configured with (§4.1).

use crate::error::RaceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which quota algorithm to use. A closed, two-variant set: a tagged enum with a pure
/// function per variant, rather than open polymorphism (§9 Design Notes).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaAlgorithm {
    Hare,
    Droop,
}

impl fmt::Display for QuotaAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuotaAlgorithm::Hare => write!(f, "hare"),
            QuotaAlgorithm::Droop => write!(f, "droop"),
        }
    }
}

/// Compute the integer vote threshold for winning, given the number of formal voters
/// and the number of seats to be filled. Pure; no side effects. Always returns at
/// least 1, even if the underlying formula would yield 0.
pub fn quota(voters: usize, max_winners: usize, algorithm: QuotaAlgorithm) -> Result<usize, RaceError> {
    if max_winners < 1 {
        return Err(RaceError::QuotaInputInvalid {
            voters,
            max_winners,
        });
    }
    let raw = match algorithm {
        QuotaAlgorithm::Hare => voters / max_winners,
        QuotaAlgorithm::Droop => {
            if max_winners > 1 {
                voters / (max_winners + 1) + 1
            } else {
                (voters + 1) / 2
            }
        }
    };
    Ok(raw.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hare_quota() {
        assert_eq!(quota(10, 1, QuotaAlgorithm::Hare).unwrap(), 10);
        assert_eq!(quota(9, 2, QuotaAlgorithm::Hare).unwrap(), 4);
        assert_eq!(quota(0, 3, QuotaAlgorithm::Hare).unwrap(), 1);
    }

    #[test]
    fn droop_quota() {
        assert_eq!(quota(6, 2, QuotaAlgorithm::Droop).unwrap(), 3);
        // max_winners == 1 boundary behavior (§8): quota = floor((voters+1)/2).
        assert_eq!(quota(5, 1, QuotaAlgorithm::Droop).unwrap(), 3);
        assert_eq!(quota(4, 1, QuotaAlgorithm::Droop).unwrap(), 2);
        assert_eq!(quota(0, 1, QuotaAlgorithm::Droop).unwrap(), 1);
    }

    #[test]
    fn rejects_zero_seats() {
        assert!(matches!(
            quota(10, 0, QuotaAlgorithm::Hare),
            Err(RaceError::QuotaInputInvalid { .. })
        ));
    }
}
