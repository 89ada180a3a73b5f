// Static IATA carrier code -> display name table.

/// Resolves a carrier code to its display name. Codes outside the table are
/// returned unchanged so an unknown carrier still renders as something.
pub fn airline_name(code: &str) -> &str {
    match code {
        "AA" => "American Airlines",
        "UA" => "United Airlines",
        "DL" => "Delta Air Lines",
        "WN" => "Southwest Airlines",
        "B6" => "JetBlue Airways",
        "AS" => "Alaska Airlines",
        "NK" => "Spirit Airlines",
        "F9" => "Frontier Airlines",
        "G4" => "Allegiant Air",
        "BA" => "British Airways",
        "AF" => "Air France",
        "LH" => "Lufthansa",
        "KL" => "KLM",
        "IB" => "Iberia",
        "EK" => "Emirates",
        "QR" => "Qatar Airways",
        "SQ" => "Singapore Airlines",
        "CX" => "Cathay Pacific",
        "JL" => "Japan Airlines",
        "NH" => "ANA",
        "AC" => "Air Canada",
        "QF" => "Qantas",
        "VS" => "Virgin Atlantic",
        "TK" => "Turkish Airlines",
        "LX" => "Swiss International",
        "AY" => "Finnair",
        "SK" => "SAS",
        "TP" => "TAP Portugal",
        "AZ" => "ITA Airways",
        "EI" => "Aer Lingus",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_to_names() {
        assert_eq!(airline_name("DL"), "Delta Air Lines");
        assert_eq!(airline_name("LH"), "Lufthansa");
    }

    #[test]
    fn unknown_codes_pass_through() {
        assert_eq!(airline_name("ZZ"), "ZZ");
        assert_eq!(airline_name(""), "");
    }
}
