//! DateTime display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a `Timestamp` in the system timezone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_date_time_shape() {
        let timestamp = Timestamp::from_second(1_640_995_200).unwrap();
        let output = LocalDateTime(&timestamp).to_string();

        // Date and time parts are fixed width; the zone abbreviation varies.
        let (date_time, zone) = output.split_at(19);
        assert_eq!(date_time.len(), 19);
        assert_eq!(&date_time[4..5], "-");
        assert_eq!(&date_time[13..14], ":");
        assert!(zone.starts_with(' '));
    }
}
