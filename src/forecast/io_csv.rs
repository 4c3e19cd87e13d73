// Primitives for reading CSV snapshots of live seat counts.

use crate::forecast::*;

/// Reads a two-column `party code, seat count` file, the format written by
/// typical results scrapers. A first row whose count column is not numeric
/// is treated as a header and skipped.
pub fn read_live_csv(path: String) -> CastResult<Vec<ParsedSeatRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path.clone())
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<ParsedSeatRow> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_live_csv: lineno: {:?} row: {:?}", lineno, line);
        let party = line
            .get(0)
            .context(CsvLineTooShortSnafu { lineno })?
            .trim()
            .to_string();
        let value = line
            .get(1)
            .context(CsvLineTooShortSnafu { lineno })?
            .trim()
            .to_string();
        match value.parse::<u32>() {
            Result::Ok(seats) => res.push(ParsedSeatRow { party, seats }),
            Result::Err(_) if lineno == 1 => {
                debug!("read_live_csv: skipping header row {:?}", line);
            }
            Result::Err(_) => {
                return None.context(CsvBadCountSnafu { lineno, value });
            }
        }
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_snapshot(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!("seatcast_{}_{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn reads_a_scraper_snapshot_with_a_header() {
        let path = write_snapshot(
            "header.csv",
            "Party,Projected Seats\nLPC,30\nCPC,10\nLPC,5\n",
        );
        let rows = read_live_csv(path.clone()).unwrap();
        fs::remove_file(path).unwrap();
        assert_eq!(
            rows,
            vec![
                ParsedSeatRow {
                    party: "LPC".to_string(),
                    seats: 30
                },
                ParsedSeatRow {
                    party: "CPC".to_string(),
                    seats: 10
                },
                // Duplicate rows are kept; the tally accumulates them later.
                ParsedSeatRow {
                    party: "LPC".to_string(),
                    seats: 5
                },
            ]
        );
    }

    #[test]
    fn reads_a_headerless_snapshot() {
        let path = write_snapshot("bare.csv", "NDP,7\n");
        let rows = read_live_csv(path.clone()).unwrap();
        fs::remove_file(path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].seats, 7);
    }

    #[test]
    fn rejects_a_bad_count_past_the_header() {
        let path = write_snapshot("bad.csv", "Party,Seats\nLPC,thirty\n");
        let res = read_live_csv(path.clone());
        fs::remove_file(path).unwrap();
        assert!(res.is_err());
    }
}
