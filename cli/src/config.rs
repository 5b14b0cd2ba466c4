// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.8: the race-configuration JSON document.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use stv::QuotaAlgorithm;

#[derive(Debug, Clone, Deserialize)]
pub struct RaceConfig {
    pub id: String,
    pub position: String,
    pub max_winners: usize,
    pub quota_algorithm: QuotaAlgorithm,
    #[serde(default)]
    pub extended_data: serde_json::Value,
}

/// Parse the race configuration document: a JSON array of race descriptors.
pub fn load_race_configs(path: &Path) -> anyhow::Result<Vec<RaceConfig>> {
    let file = std::fs::File::open(path).with_context(|| format!("opening race configuration {}", path.display()))?;
    let configs: Vec<RaceConfig> = serde_json::from_reader(file)
        .with_context(|| format!("parsing race configuration {}", path.display()))?;
    Ok(configs)
}
