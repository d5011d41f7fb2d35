//! Timezone resolution for TZID display names.
//!
//! Calendar producers emit either IANA identifiers ("Europe/Oslo") or
//! vendor display names ("Eastern Standard Time"). Vendor names are
//! translated through a static alias table before IANA lookup.

use std::collections::HashMap;
use std::str::FromStr;

use chrono_tz::Tz;

/// Vendor (Windows) timezone display names mapped to IANA identifiers.
///
/// Pure data. Names not listed here are assumed to already be IANA
/// identifiers and are looked up as-is.
const VENDOR_TZ: &[(&str, &str)] = &[
    ("AUS Central Standard Time", "Australia/Darwin"),
    ("AUS Eastern Standard Time", "Australia/Melbourne"),
    ("Afghanistan Standard Time", "Asia/Kabul"),
    ("Alaskan Standard Time", "America/Juneau"),
    ("Arab Standard Time", "Asia/Kuwait"),
    ("Arabian Standard Time", "Asia/Muscat"),
    ("Arabic Standard Time", "Asia/Baghdad"),
    ("Argentina Standard Time", "America/Argentina/Buenos_Aires"),
    ("Atlantic Standard Time", "America/Halifax"),
    ("Azerbaijan Standard Time", "Asia/Baku"),
    ("Azores Standard Time", "Atlantic/Azores"),
    ("Bahia Standard Time", "America/Bahia"),
    ("Bangladesh Standard Time", "Asia/Dhaka"),
    ("Belarus Standard Time", "Europe/Minsk"),
    ("Canada Central Standard Time", "America/Regina"),
    ("Cape Verde Standard Time", "Atlantic/Cape_Verde"),
    ("Caucasus Standard Time", "Asia/Yerevan"),
    ("Cen. Australia Standard Time", "Australia/Adelaide"),
    ("Central America Standard Time", "America/Guatemala"),
    ("Central Asia Standard Time", "Asia/Almaty"),
    ("Central Brazilian Standard Time", "America/Cuiaba"),
    ("Central Europe Standard Time", "Europe/Belgrade"),
    ("Central European Standard Time", "Europe/Warsaw"),
    ("Central Pacific Standard Time", "Pacific/Guadalcanal"),
    ("Central Standard Time (Mexico)", "America/Mexico_City"),
    ("Central Standard Time", "America/Chicago"),
    ("China Standard Time", "Asia/Shanghai"),
    ("Dateline Standard Time", "Etc/GMT+12"),
    ("E. Africa Standard Time", "Africa/Nairobi"),
    ("E. Australia Standard Time", "Australia/Brisbane"),
    ("E. Europe Standard Time", "Etc/GMT-2"),
    ("E. South America Standard Time", "America/Sao_Paulo"),
    ("Eastern Standard Time (Mexico)", "America/Cancun"),
    ("Eastern Standard Time", "America/New_York"),
    ("Egypt Standard Time", "Africa/Cairo"),
    ("Ekaterinburg Standard Time", "Asia/Yekaterinburg"),
    ("FLE Standard Time", "Europe/Helsinki"),
    ("Fiji Standard Time", "Pacific/Fiji"),
    ("GMT Standard Time", "Etc/GMT"),
    ("GTB Standard Time", "Europe/Bucharest"),
    ("Georgian Standard Time", "Asia/Tbilisi"),
    ("Greenland Standard Time", "America/Godthab"),
    ("Greenwich Standard Time", "Etc/GMT"),
    ("Hawaiian Standard Time", "Pacific/Honolulu"),
    ("India Standard Time", "Asia/Kolkata"),
    ("Iran Standard Time", "Asia/Tehran"),
    ("Israel Standard Time", "Asia/Jerusalem"),
    ("Jordan Standard Time", "Asia/Amman"),
    ("Kaliningrad Standard Time", "Europe/Kaliningrad"),
    ("Korea Standard Time", "Asia/Seoul"),
    ("Libya Standard Time", "Africa/Tripoli"),
    ("Line Islands Standard Time", "Pacific/Kiritimati"),
    ("Magadan Standard Time", "Asia/Magadan"),
    ("Mauritius Standard Time", "Indian/Mauritius"),
    ("Middle East Standard Time", "Asia/Beirut"),
    ("Montevideo Standard Time", "America/Montevideo"),
    ("Morocco Standard Time", "Africa/Casablanca"),
    ("Mountain Standard Time (Mexico)", "America/Mazatlan"),
    ("Mountain Standard Time", "America/Denver"),
    ("Myanmar Standard Time", "Asia/Rangoon"),
    ("N. Central Asia Standard Time", "Asia/Novosibirsk"),
    ("Namibia Standard Time", "Africa/Windhoek"),
    ("Nepal Standard Time", "Asia/Kathmandu"),
    ("New Zealand Standard Time", "Pacific/Auckland"),
    ("Newfoundland Standard Time", "America/St_Johns"),
    ("North Asia East Standard Time", "Asia/Irkutsk"),
    ("North Asia Standard Time", "Asia/Krasnoyarsk"),
    ("Pacific SA Standard Time", "America/Santiago"),
    ("Pacific Standard Time (Mexico)", "America/Santa_Isabel"),
    ("Pacific Standard Time", "America/Los_Angeles"),
    ("Pakistan Standard Time", "Asia/Karachi"),
    ("Paraguay Standard Time", "America/Asuncion"),
    ("Romance Standard Time", "Europe/Paris"),
    ("Russia Time Zone 10", "Asia/Srednekolymsk"),
    ("Russia Time Zone 11", "Asia/Kamchatka"),
    ("Russia Time Zone 3", "Europe/Samara"),
    ("Russian Standard Time", "Europe/Moscow"),
    ("SA Eastern Standard Time", "America/Cayenne"),
    ("SA Pacific Standard Time", "America/Bogota"),
    ("SA Western Standard Time", "America/Guyana"),
    ("SE Asia Standard Time", "Asia/Bangkok"),
    ("Samoa Standard Time", "Pacific/Apia"),
    ("Singapore Standard Time", "Asia/Singapore"),
    ("South Africa Standard Time", "Africa/Johannesburg"),
    ("Sri Lanka Standard Time", "Asia/Colombo"),
    ("Syria Standard Time", "Asia/Damascus"),
    ("Taipei Standard Time", "Asia/Taipei"),
    ("Tasmania Standard Time", "Australia/Hobart"),
    ("Tokyo Standard Time", "Asia/Tokyo"),
    ("Tonga Standard Time", "Pacific/Tongatapu"),
    ("Turkey Standard Time", "Europe/Istanbul"),
    ("US Eastern Standard Time", "America/Indiana/Indianapolis"),
    ("US Mountain Standard Time", "America/Phoenix"),
    ("UTC", "Etc/UTC"),
    ("Ulaanbaatar Standard Time", "Asia/Ulaanbaatar"),
    ("Venezuela Standard Time", "America/Caracas"),
    ("Vladivostok Standard Time", "Asia/Vladivostok"),
    ("W. Australia Standard Time", "Australia/Perth"),
    ("W. Central Africa Standard Time", "Africa/Algiers"),
    ("W. Europe Standard Time", "Europe/Berlin"),
    ("West Asia Standard Time", "Asia/Tashkent"),
    ("West Pacific Standard Time", "Pacific/Guam"),
    ("Yakutsk Standard Time", "Asia/Yakutsk"),
];

/// Translates a vendor timezone display name to its IANA identifier.
///
/// Returns the input unchanged when it is not a known vendor name.
#[must_use]
pub fn vendor_to_iana(name: &str) -> &str {
    VENDOR_TZ
        .iter()
        .find(|(vendor, _)| *vendor == name)
        .map_or(name, |(_, iana)| iana)
}

/// Resolver for timezone display names.
///
/// Wraps the vendor alias table and the IANA timezone database behind an
/// availability query, with a cache of successful resolutions. Built once
/// per process and read-only afterwards; the disabled mode stands in for a
/// missing timezone database so conversion degrades to raw wall-clock
/// strings.
#[derive(Debug)]
pub struct TzResolver {
    enabled: bool,
    cache: std::sync::Mutex<HashMap<String, Tz>>,
}

impl TzResolver {
    /// Creates a resolver backed by the bundled timezone database.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            cache: std::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Creates a resolver with no timezone database available.
    ///
    /// Every lookup fails, so callers fall back to unconverted strings.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            cache: std::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Returns whether timezone conversion is available at all.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.enabled
    }

    /// Resolves a TZID display name to a timezone ruleset.
    ///
    /// Vendor names go through the alias table first. Returns `None` when
    /// the resolver is disabled or the name is unknown; the caller keeps
    /// raw wall-clock strings in that case.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Tz> {
        if !self.enabled {
            return None;
        }

        if let Ok(cache) = self.cache.lock()
            && let Some(tz) = cache.get(name)
        {
            return Some(*tz);
        }

        let iana = vendor_to_iana(name);
        match Tz::from_str(iana) {
            Ok(tz) => {
                if let Ok(mut cache) = self.cache.lock() {
                    cache.insert(name.to_string(), tz);
                }
                Some(tz)
            }
            Err(_) => {
                tracing::debug!(tzid = name, "Unresolvable timezone, keeping raw times");
                None
            }
        }
    }
}

impl Default for TzResolver {
    fn default() -> Self {
        Self::new()
    }
}
