//! Conversion of UTC instants into the session's time zone.

use crate::i18n::CultureState;
use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct TimeZoneConverter {
    culture: Arc<CultureState>,
}

impl TimeZoneConverter {
    pub fn new(culture: Arc<CultureState>) -> Self {
        Self { culture }
    }

    /// Convert `utc` into the currently selected time zone.
    pub fn convert(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        let zone = self.culture.time_zone();
        utc.with_timezone(&zone).fixed_offset()
    }

    /// Convert `utc` into the zone named `zone_id`.
    ///
    /// Unknown ids leave the instant in UTC.
    pub fn convert_to(zone_id: &str, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match Tz::from_str_insensitive(zone_id.trim()) {
            Ok(zone) => utc.with_timezone(&zone).fixed_offset(),
            Err(_) => {
                warn!(zone = %zone_id, "Unknown time zone, keeping UTC");
                utc.fixed_offset()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CultureConfig;
    use crate::i18n::LanguageRegistry;
    use chrono::{TimeZone, Timelike};

    fn converter() -> TimeZoneConverter {
        let state = CultureState::new(&CultureConfig::default(), LanguageRegistry::builtin())
            .expect("Valid config");
        TimeZoneConverter::new(Arc::new(state))
    }

    #[test]
    fn test_convert_uses_default_zone() {
        let converter = converter();
        // Warsaw is UTC+1 in January
        let utc = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let local = converter.convert(utc);

        assert_eq!(local.hour(), 13);
        assert_eq!(local.offset().local_minus_utc(), 3600);
        assert_eq!(local, utc);
    }

    #[test]
    fn test_convert_follows_time_zone_changes() {
        let converter = converter();
        converter.culture.set_time_zone("America/New_York");

        // New York is UTC-4 in July
        let utc = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(converter.convert(utc).hour(), 8);
    }

    #[test]
    fn test_convert_handles_dst() {
        let converter = converter();
        let summer = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(converter.convert(summer).offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_convert_to_unknown_zone_keeps_utc() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let result = TimeZoneConverter::convert_to("Not/AZone", utc);

        assert_eq!(result.hour(), 12);
        assert_eq!(result.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_convert_to_known_zone() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let result = TimeZoneConverter::convert_to("Asia/Tokyo", utc);
        assert_eq!(result.hour(), 21);
    }
}
