/// Availability calculator - which dates and times a venue can be booked
use super::clock::{Clock, SystemClock};
use crate::domain::base::{DomainError, DomainResult, Entity};
use crate::domain::entities::Venue;
use crate::domain::value_objects::BlockedDateRange;
use chrono::{Days, NaiveDate, NaiveDateTime};

/// Upper bound on the number of days scanned for the earliest open date
pub const DEFAULT_MAX_SCAN_DAYS: u32 = 3650;

/// Answers "is this date available?" and "when is the first open date?" for a venue
///
/// Every answer fails closed: past dates, blocked dates, closed days and
/// unparseable input are all reported as unavailable.
#[derive(Debug, Clone)]
pub struct AvailabilityCalculator<C: Clock = SystemClock> {
    clock: C,
    max_scan_days: u32,
}

impl AvailabilityCalculator<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> AvailabilityCalculator<C> {
    pub fn new(clock: C) -> Self {
        AvailabilityCalculator {
            clock,
            max_scan_days: DEFAULT_MAX_SCAN_DAYS,
        }
    }

    /// At least one day is always scanned
    pub fn with_max_scan_days(mut self, max_scan_days: u32) -> Self {
        self.max_scan_days = max_scan_days.max(1);
        self
    }

    pub fn max_scan_days(&self) -> u32 {
        self.max_scan_days
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The blocked range covering `date`, if any
    pub fn blocking_range<'v>(&self, venue: &'v Venue, date: NaiveDate) -> Option<&'v BlockedDateRange> {
        venue.blocked_dates().iter().find(|range| range.contains(date))
    }

    /// A date is available iff it is not in the past and matches no blocked range
    pub fn is_date_available(&self, venue: &Venue, date: NaiveDate) -> bool {
        if date < self.today() {
            return false;
        }
        self.blocking_range(venue, date).is_none()
    }

    /// Availability of the calendar date of `date_time`
    pub fn is_available_at(&self, venue: &Venue, date_time: NaiveDateTime) -> bool {
        self.is_date_available(venue, date_time.date())
    }

    /// Availability of an ISO `YYYY-MM-DD` date string; unparseable input is unavailable
    pub fn is_raw_date_available(&self, venue: &Venue, raw: &str) -> bool {
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => self.is_date_available(venue, date),
            Err(e) => {
                tracing::warn!("Unparseable date '{}' treated as unavailable: {}", raw, e);
                false
            }
        }
    }

    /// First available date on or after today
    ///
    /// Scans at most `max_scan_days` days and reports `NoAvailability` rather
    /// than searching forever for a venue that is blocked for years.
    pub fn earliest_available_date(&self, venue: &Venue) -> DomainResult<NaiveDate> {
        let today = self.today();

        for offset in 0..self.max_scan_days {
            let Some(candidate) = today.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            if self.is_date_available(venue, candidate) {
                if offset > 0 {
                    tracing::debug!(
                        "Venue {} first available on {} ({} days after today)",
                        venue.id(),
                        candidate,
                        offset
                    );
                }
                return Ok(candidate);
            }
        }

        tracing::warn!(
            "Venue {} has no availability within {} days of {}",
            venue.id(),
            self.max_scan_days,
            today
        );
        Err(DomainError::NoAvailability {
            venue_id: venue.id().to_string(),
            searched_days: self.max_scan_days,
        })
    }

    /// Whether the time of day of `date_time` falls inside the venue's window
    /// for that weekday; no entry or a closed entry means closed
    pub fn is_within_operating_hours(&self, venue: &Venue, date_time: NaiveDateTime) -> bool {
        venue.operating_hours().is_open_at(date_time)
    }
}
