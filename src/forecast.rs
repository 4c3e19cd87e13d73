use log::{debug, info, warn};

use seat_forecast::builder::Builder;
use seat_forecast::rng::{entropy_rng, seeded_rng};
use seat_forecast::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::forecast::config_reader::*;

pub mod config_reader;
pub mod io_csv;
pub mod io_json;

#[derive(Debug, Snafu)]
pub enum CastError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display(""))]
    ParsingJsonNumber {},
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display(""))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: cannot read a seat count from {value:?}"))]
    CsvBadCount { lineno: usize, value: String },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type CastResult<T> = Result<T, CastError>;

/// A single party line, as parsed by the snapshot readers.
/// This is before validation against the declared party set.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedSeatRow {
    pub party: String,
    pub seats: u32,
}

fn read_live_rows(path: &str, input_type: &Option<String>) -> CastResult<Vec<ParsedSeatRow>> {
    let itype: String = match input_type {
        Some(x) => x.clone(),
        None if path.ends_with(".json") => "json".to_string(),
        None => "csv".to_string(),
    };
    info!("Attempting to read live snapshot {:?} as {:?}", path, itype);
    match itype.as_str() {
        "csv" => io_csv::read_live_csv(path.to_string()),
        "json" => io_json::read_live_json(path.to_string()),
        x => whatever!("Input type not implemented {:?}", x),
    }
}

/// Folds the parsed rows into a tally, validating every code against the
/// declared party set. Rows repeating a party accumulate.
fn validate_tally(rows: &[ParsedSeatRow], parties: &[Party]) -> CastResult<SeatTally> {
    let mut builder = match Builder::new(parties) {
        Result::Ok(b) => b,
        Result::Err(e) => whatever!("Cannot initialize the tally builder: {:?}", e),
    };
    for row in rows.iter() {
        if let Err(e) = builder.add_leading_seats(&row.party, row.seats) {
            whatever!("Invalid live tally row {:?}: {}", row, e)
        }
    }
    Ok(builder.tally())
}

fn needle_label(band: NeedleBand) -> &'static str {
    match band {
        NeedleBand::FirstMajority => "firstMajority",
        NeedleBand::FirstLead => "firstLead",
        NeedleBand::SecondLead => "secondLead",
        NeedleBand::SecondMajority => "secondMajority",
    }
}

fn build_summary_js(setup: &ForecastSetup, live: &SeatTally, result: &ForecastResult) -> JSValue {
    let mut live_tally: JSMap<String, JSValue> = JSMap::new();
    for (code, _) in result.projection.iter() {
        live_tally.insert(code.clone(), json!(live.get(code).copied().unwrap_or(0)));
    }

    // The projection table, most seats first. The sort is stable, so ties
    // keep the declared party order.
    let mut sorted = result.projection.clone();
    sorted.sort_by_key(|(_, seats)| std::cmp::Reverse(*seats));
    let projection: Vec<JSValue> = sorted
        .iter()
        .map(|(party, seats)| json!({"party": party, "seats": seats}))
        .collect();

    let winner = match &result.winner {
        Some((party, seats)) => json!({
            "party": party,
            "seats": seats,
            "majority": *seats >= setup.rules.majority_threshold,
        }),
        None => JSValue::Null,
    };

    let mut odds: JSMap<String, JSValue> = JSMap::new();
    odds.insert(
        setup.races.primary.0.clone(),
        json!({"majority": result.odds.first_majority, "minority": result.odds.first_minority}),
    );
    odds.insert(
        setup.races.primary.1.clone(),
        json!({"majority": result.odds.second_majority, "minority": result.odds.second_minority}),
    );
    let minor_entry = odds
        .entry(setup.races.minor_party.clone())
        .or_insert(json!({}));
    minor_entry["officialStatus"] = json!(result.odds.minor_official_status);

    let mut spread: JSMap<String, JSValue> = JSMap::new();
    for (party, s) in result.spread.iter() {
        spread.insert(
            party.clone(),
            json!({
                "mean": s.mean,
                "stdDev": s.std_dev,
                "p05": s.p05,
                "median": s.median,
                "p95": s.p95,
            }),
        );
    }

    json!({
        "config": {
            "contest": setup.contest_name,
            "date": setup.contest_date,
            "totalSeats": setup.rules.total_seats,
            "majorityThreshold": setup.rules.majority_threshold,
            "minorPartyThreshold": setup.rules.minor_party_threshold,
            "trialCount": setup.rules.trial_count,
        },
        "totalReported": result.total_reported,
        "uncertainty": result.uncertainty,
        "liveTally": live_tally,
        "projection": projection,
        "projectedWinner": winner,
        "needle": needle_label(result.needle),
        "odds": odds,
        "spread": spread,
    })
}

pub fn run_forecast(args: &Args) -> CastResult<()> {
    let config = match &args.config {
        Some(path) => read_config(path.clone())?,
        None => default_config(),
    };
    info!("config: {:?}", config);
    let setup = validate_config(&config)?;

    let rows = match &args.input {
        Some(path) => read_live_rows(path, &args.input_type)?,
        None => {
            warn!("No live input provided; the projection falls back to the baseline");
            Vec::new()
        }
    };
    debug!("live rows: {:?}", rows);
    let live = validate_tally(&rows, &setup.parties)?;

    // The generator seed: the command line wins over the configuration.
    // With neither, the batch is drawn from operating-system entropy.
    let mut rng = match args.seed.or(setup.random_seed) {
        Some(s) => seeded_rng(s),
        None => entropy_rng(),
    };

    let res = run_forecast_stats(
        &live,
        &setup.baseline,
        &setup.parties,
        &setup.rules,
        &setup.races,
        &mut rng,
    );
    info!("res {:?}", res);
    let result = match res {
        Result::Ok(x) => x,
        Result::Err(x) => {
            whatever!("Forecast error: {:?}", x)
        }
    };

    // Assemble the final json
    let summary_js = build_summary_js(&setup, &live, &result);
    let pretty_js_summary = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;

    match &args.out {
        Some(path) if path != "stdout" => {
            fs::write(path, &pretty_js_summary).context(WritingSummarySnafu { path: path.clone() })?;
        }
        _ => println!("{}", pretty_js_summary),
    }

    // The reference summary, if provided for comparison
    if let Some(reference_p) = &args.reference {
        let reference = read_summary(reference_p.clone())?;
        info!("reference: {:?}", reference);
        let pretty_js_reference =
            serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
        if pretty_js_reference != pretty_js_summary {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_reference.as_str(),
                pretty_js_summary.as_ref(),
                "\n",
            );
            whatever!("Difference detected between the calculated summary and the reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_setup() -> ForecastSetup {
        validate_config(&default_config()).unwrap()
    }

    #[test]
    fn tally_validation_accumulates_and_rejects_strays() {
        let setup = default_setup();
        let rows = vec![
            ParsedSeatRow {
                party: "LPC".to_string(),
                seats: 12,
            },
            ParsedSeatRow {
                party: "CPC".to_string(),
                seats: 9,
            },
            ParsedSeatRow {
                party: "LPC".to_string(),
                seats: 3,
            },
        ];
        let tally = validate_tally(&rows, &setup.parties).unwrap();
        assert_eq!(tally.get("LPC"), Some(&15));
        assert_eq!(tally.get("CPC"), Some(&9));

        let stray = vec![ParsedSeatRow {
            party: "XYZ".to_string(),
            seats: 1,
        }];
        assert!(validate_tally(&stray, &setup.parties).is_err());
    }

    #[test]
    fn summary_carries_the_reference_projection() {
        let setup = default_setup();
        let rows = vec![
            ParsedSeatRow {
                party: "LPC".to_string(),
                seats: 30,
            },
            ParsedSeatRow {
                party: "CPC".to_string(),
                seats: 10,
            },
        ];
        let live = validate_tally(&rows, &setup.parties).unwrap();
        let mut rng = seeded_rng(42);
        let result = run_forecast_stats(
            &live,
            &setup.baseline,
            &setup.parties,
            &setup.rules,
            &setup.races,
            &mut rng,
        )
        .unwrap();
        let js = build_summary_js(&setup, &live, &result);

        assert_eq!(js["totalReported"], json!(40));
        assert_eq!(js["projectedWinner"]["party"], json!("LPC"));
        assert_eq!(js["projectedWinner"]["seats"], json!(194));
        assert_eq!(js["projectedWinner"]["majority"], json!(true));
        assert_eq!(js["needle"], json!("firstMajority"));
        assert_eq!(js["liveTally"]["LPC"], json!(30));
        assert_eq!(js["liveTally"]["BQ"], json!(0));
        // Most seats first.
        assert_eq!(js["projection"][0]["party"], json!("LPC"));
        assert_eq!(js["projection"][0]["seats"], json!(194));
        assert_eq!(js["config"]["totalSeats"], json!(338));
        assert!(js["odds"]["LPC"]["majority"].is_number());
        assert!(js["odds"]["NDP"]["officialStatus"].is_number());
        assert!(js["spread"]["LPC"]["mean"].is_number());
    }

    #[test]
    fn seeded_runs_reproduce_the_same_summary() {
        let setup = default_setup();
        let rows = vec![ParsedSeatRow {
            party: "LPC".to_string(),
            seats: 25,
        }];
        let live = validate_tally(&rows, &setup.parties).unwrap();
        let summary = |seed: u64| {
            let mut rng = seeded_rng(seed);
            let result = run_forecast_stats(
                &live,
                &setup.baseline,
                &setup.parties,
                &setup.rules,
                &setup.races,
                &mut rng,
            )
            .unwrap();
            serde_json::to_string_pretty(&build_summary_js(&setup, &live, &result)).unwrap()
        };
        assert_eq!(summary(7), summary(7));
        assert_ne!(summary(7), summary(8));
    }

    #[test]
    fn unknown_input_types_are_rejected() {
        let res = read_live_rows("whatever.dat", &Some("xlsx".to_string()));
        assert!(res.is_err());
    }
}
