//! Free-text query classification.
//!
//! A term shaped like a flight number (`BA456`, `ual12`) becomes a
//! `flight_iata` filter; anything else is taken as an airport code and
//! becomes `dep_iata`.

/// Upstream parameter used for flight-number searches.
pub const FLIGHT_PARAM: &str = "flight_iata";
/// Upstream parameter used for airport/location searches.
pub const AIRPORT_PARAM: &str = "dep_iata";

/// How a search term was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTerm {
    /// Two or three letters followed by digits.
    FlightNumber(String),
    /// Any other non-empty term.
    Location(String),
}

impl QueryTerm {
    /// Classify a raw query. Returns `None` for empty input.
    pub fn classify(raw: &str) -> Option<Self> {
        let term = raw.trim();
        if term.is_empty() {
            return None;
        }

        let normalized = term.to_ascii_uppercase();
        if is_flight_number(term) {
            Some(QueryTerm::FlightNumber(normalized))
        } else {
            Some(QueryTerm::Location(normalized))
        }
    }

    /// The upstream query parameter this term populates.
    pub fn param(&self) -> (&'static str, &str) {
        match self {
            QueryTerm::FlightNumber(v) => (FLIGHT_PARAM, v),
            QueryTerm::Location(v) => (AIRPORT_PARAM, v),
        }
    }
}

/// Case-insensitive match of `^[A-Z]{2,3}[0-9]+$`.
pub fn is_flight_number(term: &str) -> bool {
    let letters = term.bytes().take_while(u8::is_ascii_alphabetic).count();
    if !(2..=3).contains(&letters) {
        return false;
    }
    let digits = &term.as_bytes()[letters..];
    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}
