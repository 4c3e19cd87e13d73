// Reader for JSON snapshots of live seat counts.

use crate::forecast::*;
use std::collections::HashMap;

/// Reads a single JSON object mapping party codes to seat counts.
pub fn read_live_json(path: String) -> CastResult<Vec<ParsedSeatRow>> {
    let contents = fs::read_to_string(path.clone()).context(OpeningFileSnafu { path })?;
    let counts: HashMap<String, u32> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;

    let mut res: Vec<ParsedSeatRow> = counts
        .into_iter()
        .map(|(party, seats)| ParsedSeatRow { party, seats })
        .collect();
    // Stable order for logging and error reporting.
    res.sort_by(|a, b| a.party.cmp(&b.party));
    Ok(res)
}
