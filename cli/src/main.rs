// Copyright 2021-2022 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! §4.8: the ambient driver. Loads a race configuration document, a candidate
//! roster, and a ballot file, tabulates every race to completion, and writes one
//! result sheet plus one JSON transcript per race position.

mod config;
mod event_log;
mod input;
mod output;
mod result;

use crate::config::{load_race_configs, RaceConfig};
use crate::event_log::LoggingEventSink;
use crate::input::{load_ballots, load_candidates, BallotRecord, CandidateRecord};
use crate::result::ResultRowOwned;
use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use stv::{build_result_table, Candidate, Race, Voter};

#[derive(Parser)]
#[clap(version = "0.1", author = "Andrew Conway", name = "stv-count")]
/// Tabulate one or more multi-winner STV races from a race configuration document,
/// a candidate roster, and a ballot file, and write one result sheet per race.
struct Opts {
    /// Race configuration: a JSON array of {id, position, max_winners, quota_algorithm, extended_data}.
    #[clap(long, value_parser)]
    config: PathBuf,

    /// Candidate roster CSV: race_id, candidate_id, name, party.
    #[clap(long, value_parser)]
    candidates: PathBuf,

    /// Ballot CSV: race_id, voter_id, rank_1, rank_2, ...
    #[clap(long, value_parser)]
    ballots: PathBuf,

    /// Directory results are written to; created if absent.
    #[clap(short, long, value_parser, default_value = "out")]
    out: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let race_configs = load_race_configs(&opts.config)?;
    let mut candidates_by_race = load_candidates(&opts.candidates)?;
    let mut ballots_by_race = load_ballots(&opts.ballots)?;
    std::fs::create_dir_all(&opts.out).with_context(|| format!("creating output directory {}", opts.out.display()))?;

    for race_config in &race_configs {
        let candidate_records = candidates_by_race.remove(&race_config.id).unwrap_or_default();
        let ballot_records = ballots_by_race.remove(&race_config.id).unwrap_or_default();
        let mut race = build_race(race_config, candidate_records, ballot_records)
            .with_context(|| format!("setting up race {} ({})", race_config.id, race_config.position))?;

        race.run_complete().with_context(|| format!("tabulating race {} ({})", race_config.id, race_config.position))?;

        let rows: Vec<ResultRowOwned> = build_result_table(&mut race, race.rounds().len())
            .with_context(|| format!("building result table for race {} ({})", race_config.id, race_config.position))?
            .into_iter()
            .map(ResultRowOwned::from)
            .collect();

        output::write_result_csv(&race_config.position, &rows, &opts.out)
            .with_context(|| format!("writing result sheet for race {} ({})", race_config.id, race_config.position))?;
        output::write_transcript_json(&mut race, &opts.out)
            .with_context(|| format!("writing transcript for race {} ({})", race_config.id, race_config.position))?;

        log::info!(
            "race {} ({}): {} rounds, winners: {:?}",
            race_config.id,
            race_config.position,
            race.rounds().len(),
            race.winners().iter().map(|&c| race.candidate(c).id.as_str()).collect::<Vec<_>>()
        );
    }

    Ok(())
}

fn build_race(race_config: &RaceConfig, candidate_records: Vec<CandidateRecord>, ballot_records: Vec<BallotRecord>) -> anyhow::Result<Race> {
    if candidate_records.is_empty() {
        bail!("no candidates found for race {}", race_config.id);
    }

    let mut race = Race::new(race_config.id.clone(), race_config.position.clone(), race_config.max_winners, race_config.quota_algorithm)
        .with_extended_data(race_config.extended_data.clone())
        .with_event_sink(Box::new(LoggingEventSink::new(race_config.id.clone())));

    for record in candidate_records {
        race.add_candidate(Candidate {
            id: record.candidate_id,
            name: record.name,
            party: record.party,
        })
        .with_context(|| "adding a candidate".to_string())?;
    }

    for record in ballot_records {
        let mut preferences = Vec::with_capacity(record.ranks.len());
        for rank in &record.ranks {
            match race.get_candidate(rank) {
                Some((index, _)) => preferences.push(index),
                None => bail!("ballot from voter {} ranks unknown candidate {}", record.voter_id, rank),
            }
        }
        race.add_voter(Voter {
            id: record.voter_id,
            preferences,
        })
        .with_context(|| "adding a voter".to_string())?;
    }

    Ok(race)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stv::QuotaAlgorithm;

    fn candidate(id: &str, name: &str, party: &str) -> CandidateRecord {
        CandidateRecord {
            candidate_id: id.to_string(),
            name: name.to_string(),
            party: party.to_string(),
        }
    }

    fn ballot(voter_id: &str, ranks: &[&str]) -> BallotRecord {
        BallotRecord {
            voter_id: voter_id.to_string(),
            ranks: ranks.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn build_race_maps_ranks_to_candidate_indices() {
        let race_config = RaceConfig {
            id: "r1".to_string(),
            position: "Council".to_string(),
            max_winners: 1,
            quota_algorithm: QuotaAlgorithm::Droop,
            extended_data: serde_json::Value::Null,
        };
        let candidates = vec![candidate("a", "Alice", "Red"), candidate("b", "Bob", "Blue")];
        let ballots = vec![ballot("v0", &["a", "b"]), ballot("v1", &["b", "a"])];
        let mut race = build_race(&race_config, candidates, ballots).unwrap();
        assert_eq!(race.voters().len(), 2);
        race.run_complete().unwrap();
        assert!(!race.winners().is_empty());
    }

    #[test]
    fn build_race_rejects_unknown_candidate_on_a_ballot() {
        let race_config = RaceConfig {
            id: "r1".to_string(),
            position: "Council".to_string(),
            max_winners: 1,
            quota_algorithm: QuotaAlgorithm::Droop,
            extended_data: serde_json::Value::Null,
        };
        let candidates = vec![candidate("a", "Alice", "Red")];
        let ballots = vec![ballot("v0", &["z"])];
        assert!(build_race(&race_config, candidates, ballots).is_err());
    }
}
