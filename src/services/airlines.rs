//! Airline reference data.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Carrier display names keyed by ICAO operator code (what the flight
/// lookup returns) and IATA code (what people type by hand).
static AIRLINE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("AAL", "American Airlines"),
        ("AA", "American Airlines"),
        ("ACA", "Air Canada"),
        ("AC", "Air Canada"),
        ("AFR", "Air France"),
        ("AF", "Air France"),
        ("ANA", "All Nippon Airways"),
        ("NH", "All Nippon Airways"),
        ("ASA", "Alaska Airlines"),
        ("AS", "Alaska Airlines"),
        ("BAW", "British Airways"),
        ("BA", "British Airways"),
        ("CPA", "Cathay Pacific"),
        ("CX", "Cathay Pacific"),
        ("DAL", "Delta Air Lines"),
        ("DL", "Delta Air Lines"),
        ("DLH", "Lufthansa"),
        ("LH", "Lufthansa"),
        ("EIN", "Aer Lingus"),
        ("EI", "Aer Lingus"),
        ("ETD", "Etihad Airways"),
        ("EY", "Etihad Airways"),
        ("FFT", "Frontier Airlines"),
        ("F9", "Frontier Airlines"),
        ("HAL", "Hawaiian Airlines"),
        ("HA", "Hawaiian Airlines"),
        ("IBE", "Iberia"),
        ("IB", "Iberia"),
        ("JAL", "Japan Airlines"),
        ("JL", "Japan Airlines"),
        ("JBU", "JetBlue"),
        ("B6", "JetBlue"),
        ("KLM", "KLM"),
        ("KL", "KLM"),
        ("KAL", "Korean Air"),
        ("KE", "Korean Air"),
        ("QFA", "Qantas"),
        ("QF", "Qantas"),
        ("QTR", "Qatar Airways"),
        ("QR", "Qatar Airways"),
        ("SIA", "Singapore Airlines"),
        ("SQ", "Singapore Airlines"),
        ("SWA", "Southwest Airlines"),
        ("WN", "Southwest Airlines"),
        ("SWR", "Swiss"),
        ("LX", "Swiss"),
        ("TAP", "TAP Air Portugal"),
        ("TP", "TAP Air Portugal"),
        ("UAE", "Emirates"),
        ("EK", "Emirates"),
        ("UAL", "United Airlines"),
        ("UA", "United Airlines"),
        ("VIR", "Virgin Atlantic"),
        ("VS", "Virgin Atlantic"),
        ("NKS", "Spirit Airlines"),
        ("NK", "Spirit Airlines"),
        ("TUR", "Turkish Airlines"),
        ("TK", "Turkish Airlines"),
    ])
});

/// Display name for a carrier code, if recognized.
pub fn name_for(code: &str) -> Option<&'static str> {
    let code = code.trim().to_ascii_uppercase();
    AIRLINE_NAMES.get(code.as_str()).copied()
}

/// Display name for a carrier code, falling back to the code itself.
pub fn display_name(code: &str) -> String {
    name_for(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knows_icao_and_iata_codes() {
        assert_eq!(name_for("DAL"), Some("Delta Air Lines"));
        assert_eq!(name_for("DL"), Some("Delta Air Lines"));
        assert_eq!(name_for("vir"), Some("Virgin Atlantic"));
    }

    #[test]
    fn unknown_code_falls_back_to_itself() {
        assert_eq!(name_for("ZZZ"), None);
        assert_eq!(display_name("ZZZ"), "ZZZ");
        assert_eq!(display_name(" X9 "), "X9");
    }
}
