//! Static reference tables: known ports, country centres, major gateways.
//!
//! Keys are stored pre-normalized (uppercase, trimmed). Table order is the
//! tie-break for partial matches, so reordering entries changes results.

/// A known port keyed by `"CITY, COUNTRY"`.
#[derive(Debug, Clone, Copy)]
pub struct PortEntry {
    pub key: &'static str,
    pub code: Option<&'static str>,
    pub lat: f64,
    pub lng: f64,
}

impl PortEntry {
    /// The city part of the key (first comma segment).
    pub fn city(&self) -> &'static str {
        self.key.split(',').next().unwrap_or(self.key).trim()
    }

    /// The country part of the key (last comma segment).
    pub fn country(&self) -> Option<&'static str> {
        self.key.rsplit_once(',').map(|(_, country)| country.trim())
    }
}

const fn port(key: &'static str, code: &'static str, lat: f64, lng: f64) -> PortEntry {
    PortEntry {
        key,
        code: Some(code),
        lat,
        lng,
    }
}

pub static PORTS: &[PortEntry] = &[
    // Asia
    port("SHANGHAI, CHINA", "CNSHA", 31.2304, 121.4737),
    port("NINGBO, CHINA", "CNNGB", 29.8683, 121.5440),
    port("SHENZHEN, CHINA", "CNSZX", 22.5431, 114.0579),
    port("QINGDAO, CHINA", "CNTAO", 36.0671, 120.3826),
    port("TIANJIN, CHINA", "CNTSN", 38.9860, 117.7240),
    port("XIAMEN, CHINA", "CNXMN", 24.4798, 118.0894),
    port("HONG KONG, HONG KONG", "HKHKG", 22.3193, 114.1694),
    port("SINGAPORE, SINGAPORE", "SGSIN", 1.2644, 103.8200),
    port("BUSAN, SOUTH KOREA", "KRPUS", 35.1028, 129.0403),
    port("TOKYO, JAPAN", "JPTYO", 35.6528, 139.8394),
    port("YOKOHAMA, JAPAN", "JPYOK", 35.4437, 139.6380),
    port("KAOHSIUNG, TAIWAN", "TWKHH", 22.6163, 120.3133),
    port("PORT KLANG, MALAYSIA", "MYPKG", 3.0000, 101.4000),
    port("LAEM CHABANG, THAILAND", "THLCH", 13.0827, 100.8833),
    port("HO CHI MINH CITY, VIETNAM", "VNSGN", 10.7769, 106.7009),
    port("HAIPHONG, VIETNAM", "VNHPH", 20.8449, 106.6881),
    port("MANILA, PHILIPPINES", "PHMNL", 14.5995, 120.9842),
    port("JAKARTA, INDONESIA", "IDJKT", -6.1045, 106.8865),
    port("NHAVA SHEVA, INDIA", "INNSA", 18.9490, 72.9512),
    port("MUMBAI, INDIA", "INBOM", 18.9388, 72.8354),
    port("CHENNAI, INDIA", "INMAA", 13.0827, 80.2707),
    port("COLOMBO, SRI LANKA", "LKCMB", 6.9497, 79.8428),
    port("CHITTAGONG, BANGLADESH", "BDCGP", 22.3569, 91.7832),
    port("KARACHI, PAKISTAN", "PKKHI", 24.8465, 66.9784),
    // Middle East
    port("JEBEL ALI, UAE", "AEJEA", 25.0112, 55.0612),
    port("DUBAI, UAE", "AEDXB", 25.2048, 55.2708),
    port("JEDDAH, SAUDI ARABIA", "SAJED", 21.4858, 39.1925),
    // Europe
    port("ROTTERDAM, NETHERLANDS", "NLRTM", 51.9244, 4.4777),
    port("ANTWERP, BELGIUM", "BEANR", 51.2194, 4.4025),
    port("HAMBURG, GERMANY", "DEHAM", 53.5511, 9.9937),
    port("BREMERHAVEN, GERMANY", "DEBRV", 53.5396, 8.5809),
    port("FELIXSTOWE, UK", "GBFXT", 51.9540, 1.3511),
    port("SOUTHAMPTON, UK", "GBSOU", 50.9097, -1.4044),
    port("LE HAVRE, FRANCE", "FRLEH", 49.4944, 0.1079),
    port("VALENCIA, SPAIN", "ESVLC", 39.4699, -0.3763),
    port("ALGECIRAS, SPAIN", "ESALG", 36.1408, -5.4562),
    port("BARCELONA, SPAIN", "ESBCN", 41.3851, 2.1734),
    port("GENOA, ITALY", "ITGOA", 44.4056, 8.9463),
    port("PIRAEUS, GREECE", "GRPIR", 37.9420, 23.6465),
    port("GDANSK, POLAND", "PLGDN", 54.3520, 18.6466),
    port("GOTHENBURG, SWEDEN", "SEGOT", 57.7089, 11.9746),
    port("ISTANBUL, TURKEY", "TRIST", 41.0082, 28.9784),
    // Africa
    port("TANGER MED, MOROCCO", "MAPTM", 35.8853, -5.5036),
    port("PORT SAID, EGYPT", "EGPSD", 31.2653, 32.3019),
    port("DURBAN, SOUTH AFRICA", "ZADUR", -29.8587, 31.0218),
    port("LAGOS, NIGERIA", "NGLOS", 6.4531, 3.3958),
    port("MOMBASA, KENYA", "KEMBA", -4.0435, 39.6682),
    // Americas
    port("LOS ANGELES, USA", "USLAX", 33.7405, -118.2775),
    port("LONG BEACH, USA", "USLGB", 33.7701, -118.1937),
    port("OAKLAND, USA", "USOAK", 37.7955, -122.2790),
    port("SEATTLE, USA", "USSEA", 47.6062, -122.3321),
    port("NEW YORK, USA", "USNYC", 40.6840, -74.0440),
    port("SAVANNAH, USA", "USSAV", 32.0809, -81.0912),
    port("HOUSTON, USA", "USHOU", 29.7604, -95.3698),
    port("MIAMI, USA", "USMIA", 25.7617, -80.1918),
    port("VANCOUVER, CANADA", "CAVAN", 49.2827, -123.1207),
    port("MONTREAL, CANADA", "CAMTR", 45.5017, -73.5673),
    port("MANZANILLO, MEXICO", "MXZLO", 19.0522, -104.3158),
    port("COLON, PANAMA", "PAONX", 9.3547, -79.9001),
    port("CARTAGENA, COLOMBIA", "COCTG", 10.3910, -75.4794),
    port("SANTOS, BRAZIL", "BRSSZ", -23.9608, -46.3336),
    port("BUENOS AIRES, ARGENTINA", "ARBUE", -34.6037, -58.3816),
    port("CALLAO, PERU", "PECLL", -12.0464, -77.1428),
    port("SAN ANTONIO, CHILE", "CLSAI", -33.5933, -71.6217),
    // Oceania
    port("SYDNEY, AUSTRALIA", "AUSYD", -33.8688, 151.2093),
    port("MELBOURNE, AUSTRALIA", "AUMEL", -37.8136, 144.9631),
    port("AUCKLAND, NEW ZEALAND", "NZAKL", -36.8485, 174.7633),
];

/// A country's approximate geographic centre.
#[derive(Debug, Clone, Copy)]
pub struct CountryEntry {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

const fn country(name: &'static str, lat: f64, lng: f64) -> CountryEntry {
    CountryEntry { name, lat, lng }
}

pub static COUNTRY_CENTERS: &[CountryEntry] = &[
    country("CHINA", 35.8617, 104.1954),
    country("HONG KONG", 22.3193, 114.1694),
    country("SINGAPORE", 1.3521, 103.8198),
    country("SOUTH KOREA", 35.9078, 127.7669),
    country("JAPAN", 36.2048, 138.2529),
    country("TAIWAN", 23.6978, 120.9605),
    country("MALAYSIA", 4.2105, 101.9758),
    country("THAILAND", 15.8700, 100.9925),
    country("VIETNAM", 14.0583, 108.2772),
    country("PHILIPPINES", 12.8797, 121.7740),
    country("INDONESIA", -0.7893, 113.9213),
    country("INDIA", 20.5937, 78.9629),
    country("SRI LANKA", 7.8731, 80.7718),
    country("BANGLADESH", 23.6850, 90.3563),
    country("PAKISTAN", 30.3753, 69.3451),
    country("UAE", 23.4241, 53.8478),
    country("SAUDI ARABIA", 23.8859, 45.0792),
    country("NETHERLANDS", 52.1326, 5.2913),
    country("BELGIUM", 50.5039, 4.4699),
    country("GERMANY", 51.1657, 10.4515),
    country("UK", 55.3781, -3.4360),
    country("UNITED KINGDOM", 55.3781, -3.4360),
    country("FRANCE", 46.2276, 2.2137),
    country("SPAIN", 40.4637, -3.7492),
    country("ITALY", 41.8719, 12.5674),
    country("GREECE", 39.0742, 21.8243),
    country("POLAND", 51.9194, 19.1451),
    country("SWEDEN", 60.1282, 18.6435),
    country("TURKEY", 38.9637, 35.2433),
    country("MOROCCO", 31.7917, -7.0926),
    country("EGYPT", 26.8206, 30.8025),
    country("SOUTH AFRICA", -30.5595, 22.9375),
    country("NIGERIA", 9.0820, 8.6753),
    country("KENYA", -0.0236, 37.9062),
    country("USA", 37.0902, -95.7129),
    country("UNITED STATES", 37.0902, -95.7129),
    country("CANADA", 56.1304, -106.3468),
    country("MEXICO", 23.6345, -102.5528),
    country("PANAMA", 8.5380, -80.7821),
    country("COLOMBIA", 4.5709, -74.2973),
    country("BRAZIL", -14.2350, -51.9253),
    country("ARGENTINA", -38.4161, -63.6167),
    country("PERU", -9.1900, -75.0152),
    country("CHILE", -35.6751, -71.5430),
    country("AUSTRALIA", -25.2744, 133.7751),
    country("NEW ZEALAND", -40.9006, 174.8860),
];

/// Country → the port key of its main container gateway.
pub static MAJOR_PORTS: &[(&str, &str)] = &[
    ("CHINA", "SHANGHAI, CHINA"),
    ("HONG KONG", "HONG KONG, HONG KONG"),
    ("SINGAPORE", "SINGAPORE, SINGAPORE"),
    ("SOUTH KOREA", "BUSAN, SOUTH KOREA"),
    ("JAPAN", "TOKYO, JAPAN"),
    ("TAIWAN", "KAOHSIUNG, TAIWAN"),
    ("VIETNAM", "HO CHI MINH CITY, VIETNAM"),
    ("INDIA", "NHAVA SHEVA, INDIA"),
    ("UAE", "JEBEL ALI, UAE"),
    ("NETHERLANDS", "ROTTERDAM, NETHERLANDS"),
    ("BELGIUM", "ANTWERP, BELGIUM"),
    ("GERMANY", "HAMBURG, GERMANY"),
    ("UK", "FELIXSTOWE, UK"),
    ("UNITED KINGDOM", "FELIXSTOWE, UK"),
    ("FRANCE", "LE HAVRE, FRANCE"),
    ("SPAIN", "VALENCIA, SPAIN"),
    ("ITALY", "GENOA, ITALY"),
    ("USA", "LOS ANGELES, USA"),
    ("UNITED STATES", "LOS ANGELES, USA"),
    ("CANADA", "VANCOUVER, CANADA"),
    ("MEXICO", "MANZANILLO, MEXICO"),
    ("BRAZIL", "SANTOS, BRAZIL"),
    ("AUSTRALIA", "SYDNEY, AUSTRALIA"),
];

/// Exact lookup of a normalized port key.
pub fn find_port(key: &str) -> Option<&'static PortEntry> {
    PORTS.iter().find(|entry| entry.key == key)
}

/// Exact lookup of a normalized country name.
pub fn find_country(name: &str) -> Option<&'static CountryEntry> {
    COUNTRY_CENTERS.iter().find(|entry| entry.name == name)
}

/// The gateway port for a normalized country name.
pub fn major_port_for(country: &str) -> Option<&'static PortEntry> {
    MAJOR_PORTS
        .iter()
        .find(|(name, _)| *name == country)
        .and_then(|(_, key)| find_port(key))
}
