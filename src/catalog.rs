//! Static catalog of simulated server locations.
//!
//! The catalog is a fixed, ordered list compiled into the binary. The first
//! entry is the recommended default selection.

/// A selectable simulated endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServerLocation {
    /// Stable identifier.
    pub id: &'static str,
    /// Country name, also the key the suggestion resolver matches on.
    pub country: &'static str,
    /// City name.
    pub city: &'static str,
    /// Flag glyph shown next to the name.
    pub flag: &'static str,
    /// First three octets of generated session addresses.
    pub ip_prefix: &'static str,
}

const fn server(
    id: &'static str,
    country: &'static str,
    city: &'static str,
    flag: &'static str,
    ip_prefix: &'static str,
) -> ServerLocation {
    ServerLocation {
        id,
        country,
        city,
        flag,
        ip_prefix,
    }
}

/// All known server locations, in display order.
pub const SERVERS: &[ServerLocation] = &[
    server("us-ny", "United States", "New York", "🇺🇸", "104.28.14"),
    server("ca-tor", "Canada", "Toronto", "🇨🇦", "149.56.31"),
    server("gb-lon", "United Kingdom", "London", "🇬🇧", "185.195.232"),
    server("de-fra", "Germany", "Frankfurt", "🇩🇪", "193.176.86"),
    server("nl-ams", "Netherlands", "Amsterdam", "🇳🇱", "89.39.107"),
    server("fr-par", "France", "Paris", "🇫🇷", "51.158.22"),
    server("se-sto", "Sweden", "Stockholm", "🇸🇪", "45.83.220"),
    server("ch-zrh", "Switzerland", "Zurich", "🇨🇭", "179.43.128"),
    server("es-mad", "Spain", "Madrid", "🇪🇸", "37.120.142"),
    server("jp-tyo", "Japan", "Tokyo", "🇯🇵", "138.199.21"),
    server("sg-sin", "Singapore", "Singapore", "🇸🇬", "156.146.56"),
    server("au-syd", "Australia", "Sydney", "🇦🇺", "103.137.12"),
    server("br-sao", "Brazil", "Sao Paulo", "🇧🇷", "177.54.150"),
    server("in-bom", "India", "Mumbai", "🇮🇳", "103.26.204"),
    server("za-jnb", "South Africa", "Johannesburg", "🇿🇦", "154.47.30"),
];

/// Returns the default selection.
pub fn recommended() -> &'static ServerLocation {
    &SERVERS[0]
}

/// Country names in catalog order.
pub fn countries() -> Vec<&'static str> {
    SERVERS.iter().map(|s| s.country).collect()
}

/// Finds a server by exact (case-insensitive) country name.
pub fn find_by_country(country: &str) -> Option<&'static ServerLocation> {
    let needle = country.to_lowercase();
    SERVERS.iter().find(|s| s.country.to_lowercase() == needle)
}

/// Filters servers whose country or city contains `term`, ignoring case.
///
/// An empty term matches every server.
pub fn filter(servers: &'static [ServerLocation], term: &str) -> Vec<&'static ServerLocation> {
    let term = term.to_lowercase();
    servers
        .iter()
        .filter(|s| s.country.to_lowercase().contains(&term) || s.city.to_lowercase().contains(&term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids: Vec<_> = SERVERS.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SERVERS.len());
    }

    #[test]
    fn test_prefixes_have_three_octets() {
        for s in SERVERS {
            let octets: Vec<_> = s.ip_prefix.split('.').collect();
            assert_eq!(octets.len(), 3, "{}", s.id);
            assert!(octets.iter().all(|o| o.parse::<u8>().is_ok()), "{}", s.id);
        }
    }

    #[test]
    fn test_recommended_is_first() {
        assert_eq!(recommended(), &SERVERS[0]);
        assert_eq!(countries()[0], SERVERS[0].country);
    }

    #[test]
    fn test_find_by_country_ignores_case() {
        assert_eq!(find_by_country("germany").map(|s| s.id), Some("de-fra"));
        assert_eq!(find_by_country("GERMANY").map(|s| s.id), Some("de-fra"));
        assert!(find_by_country("Atlantis").is_none());
    }

    #[test]
    fn test_filter_matches_country_or_city() {
        let by_city: Vec<_> = filter(SERVERS, "tok").iter().map(|s| s.id).collect();
        assert_eq!(by_city, vec!["jp-tyo"]);

        let by_country: Vec<_> = filter(SERVERS, "KINGDOM").iter().map(|s| s.id).collect();
        assert_eq!(by_country, vec!["gb-lon"]);
    }

    #[test]
    fn test_filter_empty_term_returns_all() {
        assert_eq!(filter(SERVERS, "").len(), SERVERS.len());
    }

    #[test]
    fn test_filter_no_match() {
        assert!(filter(SERVERS, "atlantis").is_empty());
    }
}
