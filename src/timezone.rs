//! Conversion of instants into the viewer's time zone.

use std::fmt;

use time::OffsetDateTime;
use time_tz::{OffsetDateTimeExt, TimeZone, Tz, timezones};

use crate::Error;

/// A validated IANA time zone, e.g. "Asia/Jakarta".
#[derive(Clone, Copy)]
pub struct ViewerTimeZone(&'static Tz);

impl ViewerTimeZone {
    /// Look up the time zone for `canonical_timezone`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the name is not a known IANA
    /// time zone.
    pub fn from_name(canonical_timezone: &str) -> Result<Self, Error> {
        timezones::get_by_name(canonical_timezone)
            .map(Self)
            .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))
    }

    /// The canonical name of the time zone.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Express `instant` in this time zone.
    pub fn convert(&self, instant: OffsetDateTime) -> OffsetDateTime {
        instant.to_timezone(self.0)
    }
}

impl fmt::Debug for ViewerTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewerTimeZone").field(&self.name()).finish()
    }
}

impl PartialEq for ViewerTimeZone {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for ViewerTimeZone {}
