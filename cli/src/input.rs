// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.8: candidate roster and ballot CSV loading. Grouped by race id, in file order
//! (candidate row order becomes `CandidateIndex` assignment order for that race).

use anyhow::{bail, Context};
use std::collections::HashMap;
use std::path::Path;

pub struct CandidateRecord {
    pub candidate_id: String,
    pub name: String,
    pub party: String,
}

pub struct BallotRecord {
    pub voter_id: String,
    /// Preference ranks in order, trailing empty cells already stripped.
    pub ranks: Vec<String>,
}

/// `race_id, candidate_id, name, party`.
pub fn load_candidates(path: &Path) -> anyhow::Result<HashMap<String, Vec<CandidateRecord>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening candidate file {}", path.display()))?;

    let mut by_race: HashMap<String, Vec<CandidateRecord>> = HashMap::new();
    for result in reader.records() {
        let record = result.with_context(|| format!("reading a row of candidate file {}", path.display()))?;
        let race_id = record.get(0).unwrap_or_default().to_string();
        let candidate_id = record.get(1).unwrap_or_default().to_string();
        let name = record.get(2).unwrap_or_default().to_string();
        let party = record.get(3).unwrap_or_default().to_string();
        by_race.entry(race_id).or_default().push(CandidateRecord {
            candidate_id,
            name,
            party,
        });
    }
    Ok(by_race)
}

/// `race_id, voter_id, rank_1, rank_2, ...`. Rows may be ragged; trailing empty cells
/// are ignored rather than treated as an exhausted preference.
pub fn load_ballots(path: &Path) -> anyhow::Result<HashMap<String, Vec<BallotRecord>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening ballot file {}", path.display()))?;

    let mut by_race: HashMap<String, Vec<BallotRecord>> = HashMap::new();
    for result in reader.records() {
        let record = result.with_context(|| format!("reading a row of ballot file {}", path.display()))?;
        if record.len() < 2 {
            bail!("ballot row in {} has fewer than the required race_id, voter_id columns", path.display());
        }
        let race_id = record.get(0).unwrap_or_default().to_string();
        let voter_id = record.get(1).unwrap_or_default().to_string();
        let ranks = record
            .iter()
            .skip(2)
            .map(|cell| cell.trim().to_string())
            .filter(|cell| !cell.is_empty())
            .collect();
        by_race.entry(race_id).or_default().push(BallotRecord { voter_id, ranks });
    }
    Ok(by_race)
}
