pub use crate::config::*;

/// A builder for assembling a live tally from individual seat reports.
///
/// Data sources often report a party's seats split over several rows;
/// repeated reports for the same party accumulate.
///
/// ```
/// pub use seat_forecast::builder::Builder;
/// pub use seat_forecast::Party;
/// # use seat_forecast::ForecastErrors;
///
/// let parties = vec![
///     Party { code: "LPC".to_string(), name: None },
///     Party { code: "CPC".to_string(), name: None },
/// ];
/// let mut builder = Builder::new(&parties)?;
/// builder.add_leading_seats("LPC", 12)?;
/// builder.add_leading_seats("LPC", 3)?;
/// builder.add_leading_seats("CPC", 9)?;
///
/// assert_eq!(builder.tally().get("LPC"), Some(&15));
/// # Ok::<(), ForecastErrors>(())
/// ```
pub struct Builder {
    pub(crate) _parties: Vec<Party>,
    pub(crate) _tally: SeatTally,
}

impl Builder {
    pub fn new(parties: &[Party]) -> Result<Builder, ForecastErrors> {
        Ok(Builder {
            _parties: parties.to_vec(),
            _tally: SeatTally::new(),
        })
    }

    /// Records seats currently led or won by a party. The code must belong
    /// to the declared party set.
    pub fn add_leading_seats(&mut self, code: &str, seats: SeatCount) -> Result<(), ForecastErrors> {
        if !self._parties.iter().any(|p| p.code == code) {
            return Err(ForecastErrors::UnknownParty(code.to_string()));
        }
        *self._tally.entry(code.to_string()).or_insert(0) += seats;
        Ok(())
    }

    /// The tally assembled so far.
    pub fn tally(&self) -> SeatTally {
        self._tally.clone()
    }
}
