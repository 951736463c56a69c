/// Booking validator - field-addressable diagnostics for a draft against a venue
use super::availability::AvailabilityCalculator;
use super::clock::Clock;
use crate::domain::aggregates::BookingDraft;
use crate::domain::base::Entity;
use crate::domain::entities::Venue;
use crate::domain::value_objects::{BookingField, ContactField, DaySchedule, ValidationErrors};
use chrono::{Datelike, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Basic `local@domain.tld` shape
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

/// Validates a booking draft against a venue
///
/// All checks run on every call; nothing short-circuits. The result is a pure
/// function of the draft, the venue and today's date.
pub struct BookingValidator<'a, C: Clock> {
    availability: &'a AvailabilityCalculator<C>,
}

impl<'a, C: Clock> BookingValidator<'a, C> {
    pub fn new(availability: &'a AvailabilityCalculator<C>) -> Self {
        Self { availability }
    }

    pub fn validate(&self, venue: &Venue, draft: &BookingDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        self.check_start(venue, draft, &mut errors);
        self.check_end(venue, draft, &mut errors);
        Self::check_guests(venue, draft, &mut errors);
        Self::check_contact_info(draft, &mut errors);

        tracing::debug!(
            "Validated draft {} for venue {}: {} error(s)",
            draft.id(),
            venue.id(),
            errors.len()
        );
        errors
    }

    fn check_start(&self, venue: &Venue, draft: &BookingDraft, errors: &mut ValidationErrors) {
        let Some(start) = draft.start() else {
            errors.add(BookingField::StartDate, "Start date is required");
            return;
        };

        if let Some(message) = self.date_problem(venue, start, "Start") {
            errors.add(BookingField::StartDate, message);
        }
        if !self.availability.is_within_operating_hours(venue, start) {
            errors.add(BookingField::StartTime, Self::hours_message(venue, start, "Start"));
        }
    }

    fn check_end(&self, venue: &Venue, draft: &BookingDraft, errors: &mut ValidationErrors) {
        let Some(end) = draft.end() else {
            errors.add(BookingField::EndDate, "End date is required");
            return;
        };

        if let Some(start) = draft.start() {
            if end <= start {
                errors.add(BookingField::EndDate, "End date must be after start date");
            }
        }
        if let Some(message) = self.date_problem(venue, end, "End") {
            errors.add(BookingField::EndDate, message);
        }
        if !self.availability.is_within_operating_hours(venue, end) {
            errors.add(BookingField::EndTime, Self::hours_message(venue, end, "End"));
        }
    }

    fn check_guests(venue: &Venue, draft: &BookingDraft, errors: &mut ValidationErrors) {
        let capacity = venue.capacity();
        let guests = draft.guest_count();

        if guests < capacity.min() {
            errors.add(
                BookingField::Guests,
                format!("Minimum {} guests required", capacity.min()),
            );
        } else if guests > capacity.max() {
            errors.add(
                BookingField::Guests,
                format!("Maximum {} guests allowed", capacity.max()),
            );
        }
    }

    fn check_contact_info(draft: &BookingDraft, errors: &mut ValidationErrors) {
        let contact = draft.contact_info();

        if contact.get(ContactField::FirstName).trim().is_empty() {
            errors.add_contact(ContactField::FirstName, "First name is required");
        }
        if contact.get(ContactField::LastName).trim().is_empty() {
            errors.add_contact(ContactField::LastName, "Last name is required");
        }

        let email = contact.get(ContactField::Email);
        if email.trim().is_empty() {
            errors.add_contact(ContactField::Email, "Email is required");
        } else if !is_valid_email(email) {
            errors.add_contact(ContactField::Email, "Email address is invalid");
        }

        if contact.get(ContactField::Phone).trim().is_empty() {
            errors.add_contact(ContactField::Phone, "Phone number is required");
        }
    }

    fn date_problem(&self, venue: &Venue, date_time: NaiveDateTime, label: &str) -> Option<String> {
        let date = date_time.date();
        if date < self.availability.today() {
            return Some(format!("{} date cannot be in the past", label));
        }
        if let Some(range) = self.availability.blocking_range(venue, date) {
            return Some(format!(
                "{} date {} is unavailable (blocked {})",
                label, date, range
            ));
        }
        None
    }

    fn hours_message(venue: &Venue, date_time: NaiveDateTime, label: &str) -> String {
        let weekday = date_time.weekday();
        match venue.operating_hours().schedule_for(weekday) {
            Some(DaySchedule::Open(window)) => format!(
                "{} time must be within operating hours ({})",
                label, window
            ),
            Some(DaySchedule::Closed) | None => {
                format!("Venue is closed on {}", weekday_name(weekday))
            }
        }
    }
}

fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}
