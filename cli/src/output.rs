// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.8: result CSV sheets, one per race position, plus the raw JSON round transcript.

use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use stv::{CandidateIndex, CandidateState, Race};

use crate::result::ResultRowOwned;

#[derive(Serialize)]
struct RoundTranscript {
    number: usize,
    complete: bool,
    pre_state: Vec<CandidateState>,
    post_state: Vec<CandidateState>,
    scores: Vec<f64>,
}

#[derive(Serialize)]
struct Transcript<'a> {
    race_id: &'a str,
    position: &'a str,
    quota: usize,
    winners: &'a [CandidateIndex],
    rounds: Vec<RoundTranscript>,
}

pub fn write_result_csv(position: &str, rows: &[ResultRowOwned], out_dir: &Path) -> anyhow::Result<()> {
    let path = out_dir.join(format!("{}.csv", position));
    let mut writer = csv::Writer::from_path(&path).with_context(|| format!("creating result sheet {}", path.display()))?;
    writer
        .write_record(["name", "party", "status", "score", "quota_fraction"])
        .with_context(|| format!("writing header of {}", path.display()))?;
    for row in rows {
        writer
            .write_record([&row.name, &row.party, &row.status, &row.score_display, &row.quota_fraction])
            .with_context(|| format!("writing a row of {}", path.display()))?;
    }
    writer.flush().with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

pub fn write_transcript_json(race: &mut Race, out_dir: &Path) -> anyhow::Result<()> {
    let quota = race.quota()?;
    let num_rounds = race.rounds().len();
    let mut rounds = Vec::with_capacity(num_rounds);
    for i in 0..num_rounds {
        let pre_state = race.rounds()[i].get_candidates_state(stv::StateSide::Pre).to_vec();
        let post_state = race.rounds()[i].get_candidates_state(stv::StateSide::Post).to_vec();
        let complete = race.rounds()[i].is_complete();
        let scores = race.rounds_mut()[i].get_candidates_score().to_vec();
        rounds.push(RoundTranscript {
            number: i + 1,
            complete,
            pre_state,
            post_state,
            scores,
        });
    }
    let transcript = Transcript {
        race_id: race.id(),
        position: race.position(),
        quota,
        winners: race.winners(),
        rounds,
    };
    let path = out_dir.join(format!("{}.transcript.json", race.position()));
    let file = std::fs::File::create(&path).with_context(|| format!("creating transcript {}", path.display()))?;
    serde_json::to_writer_pretty(file, &transcript).with_context(|| format!("writing transcript {}", path.display()))?;
    Ok(())
}
