use crate::forecast::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::collections::HashMap;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CastParty {
    pub code: String,
    pub name: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CastRules {
    #[serde(rename = "totalSeats")]
    _total_seats: Option<JSValue>,
    #[serde(rename = "majorityThreshold")]
    _majority_threshold: Option<JSValue>,
    #[serde(rename = "minorPartyThreshold")]
    _minor_party_threshold: Option<JSValue>,
    #[serde(rename = "trialCount")]
    _trial_count: Option<JSValue>,
    #[serde(rename = "uncertaintyFloor")]
    pub uncertainty_floor: Option<f64>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<String>,
    #[serde(rename = "primaryParties")]
    pub primary_parties: Option<Vec<String>>,
    #[serde(rename = "minorParty")]
    pub minor_party: Option<String>,
}

impl CastRules {
    pub fn total_seats(&self) -> CastResult<SeatCount> {
        read_js_int_or(
            &self._total_seats,
            ForecastRules::DEFAULT_RULES.total_seats as usize,
        )
        .map(|x| x as SeatCount)
    }

    pub fn majority_threshold(&self) -> CastResult<SeatCount> {
        read_js_int_or(
            &self._majority_threshold,
            ForecastRules::DEFAULT_RULES.majority_threshold as usize,
        )
        .map(|x| x as SeatCount)
    }

    pub fn minor_party_threshold(&self) -> CastResult<SeatCount> {
        read_js_int_or(
            &self._minor_party_threshold,
            ForecastRules::DEFAULT_RULES.minor_party_threshold as usize,
        )
        .map(|x| x as SeatCount)
    }

    pub fn trial_count(&self) -> CastResult<u32> {
        read_js_int_or(
            &self._trial_count,
            ForecastRules::DEFAULT_RULES.trial_count as usize,
        )
        .map(|x| x as u32)
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CastConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    pub parties: Option<Vec<CastParty>>,
    pub baseline: Option<HashMap<String, u32>>,
    pub rules: Option<CastRules>,
}

/// The validated configuration, lowered into the library types.
#[derive(PartialEq, Debug, Clone)]
pub struct ForecastSetup {
    pub contest_name: String,
    pub contest_date: Option<String>,
    pub parties: Vec<Party>,
    pub baseline: SeatTally,
    pub rules: ForecastRules,
    pub races: TrackedRaces,
    pub random_seed: Option<u64>,
}

pub fn read_config(path: String) -> CastResult<CastConfig> {
    let contents = fs::read_to_string(path.clone()).context(OpeningFileSnafu { path })?;
    let config: CastConfig = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn default_config() -> CastConfig {
    CastConfig {
        output_settings: None,
        parties: None,
        baseline: None,
        rules: None,
    }
}

/// The canonical party set, in display order.
pub fn default_parties() -> Vec<CastParty> {
    [
        ("LPC", "Liberal"),
        ("CPC", "Conservative"),
        ("NDP", "New Democratic"),
        ("BQ", "Bloc Québécois"),
        ("GPC", "Green"),
        ("PPC", "People's"),
    ]
    .iter()
    .map(|(code, name)| CastParty {
        code: code.to_string(),
        name: Some(name.to_string()),
    })
    .collect()
}

/// The canonical pre-election baseline. It is a prior, not a result, and
/// does not need to sum to the legislature size.
pub fn default_baseline() -> HashMap<String, u32> {
    [
        ("LPC", 186),
        ("CPC", 124),
        ("BQ", 23),
        ("NDP", 9),
        ("GPC", 1),
        ("PPC", 0),
    ]
    .iter()
    .map(|(code, seats)| (code.to_string(), *seats))
    .collect()
}

fn default_rules() -> CastRules {
    CastRules {
        _total_seats: None,
        _majority_threshold: None,
        _minor_party_threshold: None,
        _trial_count: None,
        uncertainty_floor: None,
        random_seed: None,
        primary_parties: None,
        minor_party: None,
    }
}

pub fn validate_config(config: &CastConfig) -> CastResult<ForecastSetup> {
    let cast_parties = config.parties.clone().unwrap_or_else(default_parties);
    if cast_parties.is_empty() {
        whatever!("The party set cannot be empty");
    }
    let parties: Vec<Party> = cast_parties
        .iter()
        .map(|p| Party {
            code: p.code.clone(),
            name: match p.name.clone() {
                Some(x) if x.is_empty() => None,
                x => x,
            },
        })
        .collect();

    let baseline: SeatTally = config.baseline.clone().unwrap_or_else(default_baseline);
    for code in baseline.keys() {
        if !parties.iter().any(|p| p.code == *code) {
            whatever!("The baseline mentions an undeclared party code {:?}", code);
        }
    }

    let cast_rules = config.rules.clone().unwrap_or_else(default_rules);
    let rules = ForecastRules {
        total_seats: cast_rules.total_seats()?,
        majority_threshold: cast_rules.majority_threshold()?,
        minor_party_threshold: cast_rules.minor_party_threshold()?,
        trial_count: cast_rules.trial_count()?,
        uncertainty_floor: cast_rules
            .uncertainty_floor
            .unwrap_or(ForecastRules::DEFAULT_RULES.uncertainty_floor),
    };
    if rules.total_seats == 0 {
        whatever!("totalSeats must be positive");
    }
    if rules.trial_count == 0 {
        whatever!("trialCount must be positive");
    }

    let primary = match &cast_rules.primary_parties {
        None => ("LPC".to_string(), "CPC".to_string()),
        Some(pair) => match pair.as_slice() {
            [first, second] => (first.clone(), second.clone()),
            x => {
                whatever!("primaryParties must name exactly two parties, got {:?}", x)
            }
        },
    };
    let races = TrackedRaces {
        primary,
        minor_party: cast_rules
            .minor_party
            .clone()
            .unwrap_or_else(|| "NDP".to_string()),
    };
    for code in [&races.primary.0, &races.primary.1, &races.minor_party] {
        if !parties.iter().any(|p| p.code == *code) {
            whatever!(
                "The tracked races mention an undeclared party code {:?}",
                code
            );
        }
    }

    let random_seed = match cast_rules.random_seed.clone().map(|s| s.parse::<u64>()) {
        None => None,
        Some(Result::Ok(x)) => Some(x),
        x => {
            whatever!("Cannot parse randomSeed {:?}", x)
        }
    };

    let (contest_name, contest_date) = match &config.output_settings {
        Some(os) => (os.contest_name.clone(), os.contest_date.clone()),
        None => ("Untitled contest".to_string(), None),
    };

    Ok(ForecastSetup {
        contest_name,
        contest_date,
        parties,
        baseline,
        rules,
        races,
        random_seed,
    })
}

pub fn read_summary(path: String) -> CastResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_int_or(x: &Option<JSValue>, default: usize) -> CastResult<usize> {
    match x {
        None => Ok(default),
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
