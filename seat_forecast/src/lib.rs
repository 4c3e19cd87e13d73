mod config;
pub mod builder;
pub mod manual;
pub mod quick_start;
pub mod rng;

use log::{debug, info};

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand_distr::StandardNormal;

pub use crate::config::*;

// **** Private helpers ****

fn seats_for(tally: &SeatTally, code: &str) -> SeatCount {
    tally.get(code).copied().unwrap_or(0)
}

fn check_party_keys(tally: &SeatTally, parties: &[Party]) -> Result<(), ForecastErrors> {
    let declared: HashSet<&str> = parties.iter().map(|p| p.code.as_str()).collect();
    for code in tally.keys() {
        if !declared.contains(code.as_str()) {
            return Err(ForecastErrors::UnknownParty(code.clone()));
        }
    }
    Ok(())
}

fn check_tracked_races(races: &TrackedRaces, parties: &[Party]) -> Result<(), ForecastErrors> {
    for code in [&races.primary.0, &races.primary.1, &races.minor_party] {
        if !parties.iter().any(|p| p.code == *code) {
            return Err(ForecastErrors::UnknownParty(code.clone()));
        }
    }
    Ok(())
}

// **** Projection blending ****

/// Combines a partial live tally with a pre-election baseline into an
/// estimated final seat count per party.
///
/// The estimate is a linear interpolation between the extrapolation of the
/// currently reported seat shares to the full legislature and the baseline,
/// weighted by how much of the election has reported: with nothing reported
/// the baseline is returned unchanged, and the weight grows linearly to 1 as
/// `sum(live)` approaches `total_seats` (capping at 1 if reporting noise
/// pushes the sum beyond it). The model is deliberately crude; there is no
/// riding-level or regional refinement.
///
/// Arguments:
/// * `live` seats currently led or won per party; parties may be missing
///   (counted as zero) but every key must be a declared party code
/// * `baseline` the pre-election projection, same key constraints; it does
///   not need to sum to `total_seats`
/// * `parties` the declared party set, which also fixes the output order
///   used downstream
/// * `total_seats` the size of the legislature
pub fn blend_projection(
    live: &SeatTally,
    baseline: &SeatTally,
    parties: &[Party],
    total_seats: SeatCount,
) -> Result<SeatTally, ForecastErrors> {
    if total_seats == 0 {
        return Err(ForecastErrors::InvalidTotalSeats);
    }
    check_party_keys(live, parties)?;
    check_party_keys(baseline, parties)?;

    let total_reported: SeatCount = live.values().sum();
    if total_reported == 0 {
        // No information yet: trust the prior entirely.
        return Ok(baseline.clone());
    }

    let weight_live = (total_reported as f64 / total_seats as f64).min(1.0);
    debug!(
        "blend_projection: total_reported: {:?} weight_live: {:?}",
        total_reported, weight_live
    );

    let mut prediction: SeatTally = HashMap::new();
    for p in parties.iter() {
        let live_seats = seats_for(live, &p.code);
        let base_seats = seats_for(baseline, &p.code);
        let share = live_seats as f64 / total_reported.max(1) as f64;
        let predicted =
            share * total_seats as f64 * weight_live + base_seats as f64 * (1.0 - weight_live);
        prediction.insert(p.code.clone(), predicted.round().max(0.0) as SeatCount);
    }
    Ok(prediction)
}

/// The sampling spread to use for a simulation batch:
/// `max(1 - total_reported / total_seats, floor)`.
///
/// The floor keeps the spread from collapsing to zero at full reporting,
/// which models residual recount and model error. `total_seats` must be
/// positive.
pub fn uncertainty_scale(total_reported: SeatCount, total_seats: SeatCount, floor: f64) -> f64 {
    (1.0 - total_reported as f64 / total_seats as f64).max(floor)
}

// **** Outcome simulation ****

/// Draws `trial_count` randomized final seat distributions around a blended
/// projection.
///
/// Each party's count is sampled independently from
/// `Normal(projection[party], max(5 * uncertainty_scale, 1))`, rounded to the
/// nearest integer and clamped at zero. No cross-party covariance is
/// modeled, so the seats in one trial need not sum to the legislature size;
/// this is the documented contract of the model, not an accident.
///
/// The generator is injected so that runs can be reproduced; see
/// [`crate::rng::seeded_rng`]. Parties are drawn in declared order, making a
/// seeded batch byte-stable across runs.
pub fn simulate_outcomes<R: Rng>(
    projection: &SeatTally,
    parties: &[Party],
    uncertainty_scale: f64,
    trial_count: u32,
    rng: &mut R,
) -> Result<Vec<SimulationTrial>, ForecastErrors> {
    if trial_count == 0 {
        return Err(ForecastErrors::InvalidTrialCount);
    }
    check_party_keys(projection, parties)?;

    let std_dev = (5.0 * uncertainty_scale).max(1.0);
    debug!(
        "simulate_outcomes: trial_count: {:?} std_dev: {:?}",
        trial_count, std_dev
    );

    let mut trials: Vec<SimulationTrial> = Vec::with_capacity(trial_count as usize);
    for _ in 0..trial_count {
        let mut trial: SimulationTrial = HashMap::new();
        for p in parties.iter() {
            let mean = seats_for(projection, &p.code);
            let z: f64 = rng.sample(StandardNormal);
            let seats = (mean as f64 + std_dev * z).round().max(0.0);
            trial.insert(p.code.clone(), seats as SeatCount);
        }
        trials.push(trial);
    }
    Ok(trials)
}

/// Classifies a batch of trials into the tracked outcomes and reports each
/// as a fraction of the batch.
///
/// Per trial: a primary party reaches a majority when its seats meet the
/// majority threshold, and leads with a minority when it falls short of the
/// threshold but outseats the other primary party. The minor party achieves
/// official status when it meets the recognition threshold. Parties missing
/// from a trial count as zero seats.
pub fn aggregate_trials(
    trials: &[SimulationTrial],
    rules: &ForecastRules,
    races: &TrackedRaces,
) -> Result<OutcomeOdds, ForecastErrors> {
    if trials.is_empty() {
        return Err(ForecastErrors::EmptyTrialBatch);
    }

    let mut first_majority: u32 = 0;
    let mut first_minority: u32 = 0;
    let mut second_majority: u32 = 0;
    let mut second_minority: u32 = 0;
    let mut minor_official: u32 = 0;

    for trial in trials.iter() {
        let first = seats_for(trial, &races.primary.0);
        let second = seats_for(trial, &races.primary.1);
        let minor = seats_for(trial, &races.minor_party);

        if first >= rules.majority_threshold {
            first_majority += 1;
        } else if first > second {
            first_minority += 1;
        }

        if second >= rules.majority_threshold {
            second_majority += 1;
        } else if second > first {
            second_minority += 1;
        }

        if minor >= rules.minor_party_threshold {
            minor_official += 1;
        }
    }

    let total = trials.len() as f64;
    Ok(OutcomeOdds {
        first_majority: first_majority as f64 / total,
        first_minority: first_minority as f64 / total,
        second_majority: second_majority as f64 / total,
        second_minority: second_minority as f64 / total,
        minor_official_status: minor_official as f64 / total,
    })
}

// **** Derived classifications ****

/// The party with the most projected seats, together with its count. Ties go
/// to the earliest declared party. `None` only when `parties` is empty.
pub fn projected_winner(projection: &SeatTally, parties: &[Party]) -> Option<(String, SeatCount)> {
    let mut winner: Option<(String, SeatCount)> = None;
    for p in parties.iter() {
        let seats = seats_for(projection, &p.code);
        match winner {
            Some((_, best)) if best >= seats => {}
            _ => winner = Some((p.code.clone(), seats)),
        }
    }
    winner
}

/// Places a blended projection on the four-band needle scale: first-party
/// majority, first-party lead, second-party lead, second-party majority.
pub fn needle_band(
    projection: &SeatTally,
    rules: &ForecastRules,
    races: &TrackedRaces,
) -> NeedleBand {
    let first = seats_for(projection, &races.primary.0);
    let second = seats_for(projection, &races.primary.1);
    if first >= rules.majority_threshold {
        NeedleBand::FirstMajority
    } else if first > second {
        NeedleBand::FirstLead
    } else if second >= rules.majority_threshold {
        NeedleBand::SecondMajority
    } else {
        NeedleBand::SecondLead
    }
}

/// Per-party mean, standard deviation and central interval over a trial
/// batch, in declared party order.
pub fn seat_spreads(
    trials: &[SimulationTrial],
    parties: &[Party],
) -> Result<Vec<(String, SeatSpread)>, ForecastErrors> {
    if trials.is_empty() {
        return Err(ForecastErrors::EmptyTrialBatch);
    }

    let mut res: Vec<(String, SeatSpread)> = Vec::with_capacity(parties.len());
    for p in parties.iter() {
        let mut counts: Vec<SeatCount> = trials.iter().map(|t| seats_for(t, &p.code)).collect();
        counts.sort_unstable();
        let n = counts.len() as f64;
        let mean = counts.iter().map(|c| *c as f64).sum::<f64>() / n;
        let variance = counts
            .iter()
            .map(|c| {
                let d = *c as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        res.push((
            p.code.clone(),
            SeatSpread {
                mean,
                std_dev: variance.sqrt(),
                p05: percentile(&counts, 0.05),
                median: percentile(&counts, 0.5),
                p95: percentile(&counts, 0.95),
            },
        ));
    }
    Ok(res)
}

fn percentile(sorted: &[SeatCount], q: f64) -> SeatCount {
    let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
    sorted[idx]
}

// **** Entry point ****

/// Runs one full forecast cycle: blend the live tally with the baseline,
/// simulate a batch of trials around the projection, and aggregate the batch
/// into outcome odds and per-party spreads.
///
/// Arguments:
/// * `live` the seats currently led or won, as supplied by the data source
///   for this polling cycle
/// * `baseline` the fixed pre-election projection
/// * `parties` the declared party set; declaration order drives output order
/// * `rules` the numeric configuration (legislature size, thresholds, trial
///   count, uncertainty floor)
/// * `races` the parties whose outcomes are classified
/// * `rng` the injected randomness source for the trial batch
///
/// The function is pure apart from the generator state: it keeps no state
/// across invocations and may be called on every polling tick.
pub fn run_forecast_stats<R: Rng>(
    live: &SeatTally,
    baseline: &SeatTally,
    parties: &[Party],
    rules: &ForecastRules,
    races: &TrackedRaces,
    rng: &mut R,
) -> Result<ForecastResult, ForecastErrors> {
    info!(
        "run_forecast_stats: processing a live tally over {:?} parties, rules: {:?}",
        parties.len(),
        rules
    );
    check_tracked_races(races, parties)?;

    let projection = blend_projection(live, baseline, parties, rules.total_seats)?;
    let total_reported: SeatCount = live.values().sum();
    let uncertainty = uncertainty_scale(total_reported, rules.total_seats, rules.uncertainty_floor);
    let trials = simulate_outcomes(&projection, parties, uncertainty, rules.trial_count, rng)?;
    let odds = aggregate_trials(&trials, rules, races)?;
    let spread = seat_spreads(&trials, parties)?;
    let winner = projected_winner(&projection, parties);
    let needle = needle_band(&projection, rules, races);

    let ordered: Vec<(String, SeatCount)> = parties
        .iter()
        .map(|p| (p.code.clone(), seats_for(&projection, &p.code)))
        .collect();

    if let Some((code, seats)) = &winner {
        info!(
            "run_forecast_stats: projected winner: {} with {} seats ({:?})",
            code, seats, needle
        );
    }

    Ok(ForecastResult {
        projection: ordered,
        winner,
        needle,
        odds,
        spread,
        total_reported,
        uncertainty,
        trial_count: rules.trial_count,
    })
}
