// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// Seats are counted in whole units throughout.
pub type SeatCount = u32;

/// A mapping from party code to a seat count.
///
/// The same shape is used for the live tally (seats currently led or won,
/// partial), for the pre-election baseline, and for the blended projection.
/// Parties missing from a tally are treated as holding zero seats.
pub type SeatTally = HashMap<String, SeatCount>;

/// One sampled final seat distribution, drawn around a blended projection.
pub type SimulationTrial = SeatTally;

/// A party contesting the election.
///
/// The `code` is the stable identifier used as the key in every tally. The
/// declared order of the parties drives the iteration order of the simulator
/// and of all outputs, so that seeded runs are reproducible.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Party {
    pub code: String,
    pub name: Option<String>,
}

/// The races whose outcomes are classified by the aggregation step.
///
/// `primary` is the pair of parties contending to form a government (in
/// order: first, second); `minor_party` is the party tracked against the
/// official-status threshold.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TrackedRaces {
    pub primary: (String, String),
    pub minor_party: String,
}

// ********* Configuration **********

/// The numeric knobs of the forecast model.
///
/// All of them are static configuration, supplied at startup and never
/// mutated by the model itself.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ForecastRules {
    /// Size of the legislature. A complete final tally sums to this.
    pub total_seats: SeatCount,
    /// Minimum seats for a single party to govern alone.
    pub majority_threshold: SeatCount,
    /// Minimum seats for the tracked minor party to keep official status.
    pub minor_party_threshold: SeatCount,
    /// Number of randomized trials per simulation batch.
    pub trial_count: u32,
    /// Lower bound on the uncertainty scale, so the sampling spread never
    /// collapses to zero even at full reporting.
    pub uncertainty_floor: f64,
}

impl ForecastRules {
    pub const DEFAULT_RULES: ForecastRules = ForecastRules {
        total_seats: 338,
        majority_threshold: 172,
        minor_party_threshold: 12,
        trial_count: 1000,
        uncertainty_floor: 0.2,
    };
}

// ******** Output data structures *********

/// Fractions of trials falling into each tracked outcome.
///
/// `first_*` and `second_*` refer to the two primary parties of the
/// [`TrackedRaces`], in order. A minority here means leading the other
/// primary party without reaching the majority threshold; the two
/// classifications for one party are mutually exclusive but not exhaustive
/// (trailing below the threshold matches neither).
#[derive(PartialEq, Debug, Clone)]
pub struct OutcomeOdds {
    pub first_majority: f64,
    pub first_minority: f64,
    pub second_majority: f64,
    pub second_minority: f64,
    pub minor_official_status: f64,
}

/// Summary of one party's simulated seat counts over a trial batch.
#[derive(PartialEq, Debug, Clone)]
pub struct SeatSpread {
    pub mean: f64,
    pub std_dev: f64,
    /// 5th, 50th and 95th percentiles of the sampled counts.
    pub p05: SeatCount,
    pub median: SeatCount,
    pub p95: SeatCount,
}

/// The four-way classification of a blended projection, as displayed by the
/// needle gauge: which primary party is ahead, and whether it clears the
/// majority threshold.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NeedleBand {
    FirstMajority,
    FirstLead,
    SecondLead,
    SecondMajority,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ForecastResult {
    /// Blended projection in declared party order.
    pub projection: Vec<(String, SeatCount)>,
    /// The party with the most projected seats, with its count. `None` only
    /// when no party is declared.
    pub winner: Option<(String, SeatCount)>,
    pub needle: NeedleBand,
    pub odds: OutcomeOdds,
    /// Per-party spread over the trial batch, in declared party order.
    pub spread: Vec<(String, SeatSpread)>,
    /// Sum of the live tally that produced this forecast.
    pub total_reported: SeatCount,
    /// The sampling spread used for the trial batch.
    pub uncertainty: f64,
    pub trial_count: u32,
}

/// Errors that prevent a forecast from completing. All of them are input or
/// configuration problems; there is no recoverable runtime failure in the
/// model itself.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ForecastErrors {
    /// The legislature size must be strictly positive.
    InvalidTotalSeats,
    /// A tally carries a key outside the declared party set.
    UnknownParty(String),
    /// The trial count must be strictly positive.
    InvalidTrialCount,
    /// Statistics were requested over an empty trial batch.
    EmptyTrialBatch,
}

impl Error for ForecastErrors {}

impl Display for ForecastErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastErrors::InvalidTotalSeats => {
                write!(f, "the total number of seats must be positive")
            }
            ForecastErrors::UnknownParty(code) => {
                write!(f, "unknown party code: {}", code)
            }
            ForecastErrors::InvalidTrialCount => {
                write!(f, "the trial count must be positive")
            }
            ForecastErrors::EmptyTrialBatch => {
                write!(f, "cannot aggregate an empty batch of trials")
            }
        }
    }
}
