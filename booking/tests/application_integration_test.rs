use chrono::{NaiveDate, NaiveDateTime};
use venue_booking::application::{
    repositories::{InMemoryKeyValueStore, VenueRepository},
    services::{BookingSession, InMemoryBookingGateway, SubmissionError, SubmitBooking},
    use_cases::{FavoriteVenues, FindAvailableVenues, QuoteBooking},
    BookingRequestDto,
};
use venue_booking::domain::{
    base::Entity,
    services::{AvailabilityCalculator, FixedClock},
    value_objects::{BookingField, ContactField, ServiceId, VenueId},
};
use venue_booking::infrastructure::{BookingConfig, JsonVenueCatalog};

const CATALOG: &str = r#"{
    "services": [
        {"id": "catering", "name": {"en": "Catering", "ar": "ضيافة"}, "price": {"amount": 20, "currency": "SAR", "model": "per_person"}},
        {"id": "dj", "name": "DJ", "price": {"amount": 80, "currency": "SAR", "model": "hourly"}, "durationMinutes": 240},
        {"id": "flowers", "name": "Flowers", "price": {"amount": 250, "currency": "SAR", "model": "fixed"}}
    ],
    "venues": [
        {
            "id": "grand-hall",
            "name": {"en": "Grand Hall", "ar": "القاعة الكبرى"},
            "address": "King Fahd Road",
            "capacity": {"min": 50, "max": 300, "recommended": 200},
            "price": {"amount": 500, "currency": "SAR", "model": "hourly"},
            "operatingHours": {
                "monday": "9:00 AM - 11:00 PM",
                "tuesday": "9:00 AM - 11:00 PM",
                "wednesday": "9:00 AM - 11:00 PM",
                "thursday": "9:00 AM - 12:00 AM",
                "friday": "4:00 PM - 2:00 AM",
                "saturday": "Closed"
            },
            "blockedDates": ["2030-06-05", {"start": "2030-06-10", "end": "2030-06-12"}],
            "services": ["catering", "dj"]
        },
        {
            "id": "rose-garden",
            "name": "Rose Garden",
            "capacity": {"min": 10, "max": 80},
            "price": {"amount": 3000, "currency": "SAR", "model": "fixed"},
            "operatingHours": {
                "monday": {"open": "8:00 AM", "close": "10:00 PM"},
                "tuesday": {"open": "8:00 AM", "close": "10:00 PM"},
                "wednesday": {"open": "8:00 AM", "close": "10:00 PM"},
                "sunday": {"closed": true}
            },
            "blockedDates": ["2030-06-04T00:00:00Z"],
            "services": ["catering", "flowers"]
        }
    ]
}"#;

// Monday 2030-06-03
fn calculator() -> AvailabilityCalculator<FixedClock> {
    AvailabilityCalculator::new(FixedClock::new(NaiveDate::from_ymd_opt(2030, 6, 3).unwrap()))
}

fn catalog() -> JsonVenueCatalog {
    JsonVenueCatalog::from_json_str(CATALOG).unwrap()
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 6, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn session_for(catalog: &JsonVenueCatalog, id: &str) -> BookingSession<FixedClock> {
    let venue_id = VenueId::new(id).unwrap();
    let venue = catalog.find_by_id(&venue_id).unwrap().unwrap();
    let services = catalog.find_services(&venue_id).unwrap();
    BookingSession::new(venue, services, calculator())
}

fn fill_contact(session: &mut BookingSession<FixedClock>) {
    session.set_contact_field(ContactField::FirstName, "Noura").unwrap();
    session.set_contact_field(ContactField::LastName, "Al-Saud").unwrap();
    session.set_contact_field(ContactField::Email, "noura@example.com").unwrap();
    session.set_contact_field(ContactField::Phone, "+966 55 000 0000").unwrap();
}

#[test]
fn test_browse_available_venues() {
    let catalog = catalog();
    let calc = calculator();
    let browse = FindAvailableVenues::new(&catalog, &calc);

    let ids = |date: NaiveDate, guests: u32| -> Vec<String> {
        browse
            .execute(date, guests)
            .unwrap()
            .iter()
            .map(|v| v.id().to_string())
            .collect()
    };

    let june = |d: u32| NaiveDate::from_ymd_opt(2030, 6, d).unwrap();
    assert_eq!(ids(june(3), 60), vec!["grand-hall", "rose-garden"]);
    assert_eq!(ids(june(4), 60), vec!["grand-hall"]);
    assert_eq!(ids(june(5), 60), vec!["rose-garden"]);
    assert_eq!(ids(june(3), 100), vec!["grand-hall"]);
    assert!(ids(june(2), 60).is_empty());
}

#[test]
fn test_quote_request_end_to_end() {
    let catalog = catalog();
    let calc = calculator();
    let request: BookingRequestDto = serde_json::from_str(
        r#"{
            "venueId": "grand-hall",
            "start": "2030-06-06T18:00:00",
            "end": "2030-06-06T22:30:00",
            "guests": 120,
            "services": {"catering": 1, "dj": 1},
            "contactInfo": {
                "firstName": "Noura",
                "lastName": "Al-Saud",
                "email": "noura@example.com",
                "phone": "+966 55 000 0000"
            }
        }"#,
    )
    .unwrap();

    let quote = QuoteBooking::new(&catalog, &calc).execute_request(request).unwrap();

    assert!(quote.is_bookable(), "unexpected errors: {:?}", quote.errors);
    assert_eq!(quote.breakdown.duration_hours, 5);
    assert_eq!(quote.breakdown.venue_cost, 2500.0);
    assert_eq!(quote.breakdown.services_cost, 2400.0 + 400.0);
    assert_eq!(quote.breakdown.total, 5300.0);
    assert_eq!(quote.breakdown.currency.as_str(), "SAR");

    let json = serde_json::to_value(&quote).unwrap();
    assert_eq!(json["errors"], serde_json::json!({}));
    assert_eq!(json["breakdown"]["services"][0]["serviceId"], "catering");
}

#[test]
fn test_quote_reports_field_errors() {
    let catalog = catalog();
    let calc = calculator();
    let request: BookingRequestDto = serde_json::from_str(
        r#"{
            "venueId": "grand-hall",
            "start": "2030-06-08T12:00:00",
            "end": "2030-06-08T11:00:00",
            "guests": 20,
            "contactInfo": {"email": "nope"}
        }"#,
    )
    .unwrap();

    let quote = QuoteBooking::new(&catalog, &calc).execute_request(request).unwrap();
    let json = serde_json::to_value(&quote.errors).unwrap();

    // Saturday is closed
    assert_eq!(json["startTime"], "Venue is closed on Saturday");
    assert_eq!(json["endDate"], "End date must be after start date");
    assert_eq!(json["guests"], "Minimum 50 guests required");
    assert_eq!(json["contactInfo"]["email"], "Email address is invalid");
    assert_eq!(json["contactInfo"]["firstName"], "First name is required");
    assert!(!quote.errors.has(BookingField::StartDate));
}

#[test]
fn test_late_night_windows_from_catalog() {
    let catalog = catalog();
    let mut session = session_for(&catalog, "grand-hall");
    fill_contact(&mut session);
    session.set_guest_count(100).unwrap();

    // Thursday closes at midnight, Friday runs past midnight
    session.set_start_date(at(6, 21)).unwrap();
    session.set_end_date(at(6, 23)).unwrap();
    assert!(session.validate().is_valid());

    session.set_start_date(at(7, 22)).unwrap();
    session.set_end_date(NaiveDate::from_ymd_opt(2030, 6, 8).unwrap().and_hms_opt(1, 0, 0).unwrap()).unwrap();
    let errors = session.validate();
    // 01:00 Saturday is checked against Saturday's own entry, which is closed
    assert!(errors.has(BookingField::EndTime));
    assert!(!errors.has(BookingField::StartTime));
}

#[tokio::test]
async fn test_session_to_submission() {
    let catalog = catalog();
    let mut session = session_for(&catalog, "rose-garden");

    // June 3 is open; June 4 is blocked
    assert_eq!(session.draft().start(), Some(at(3, 10)));
    assert_eq!(session.draft().guest_count(), 10);

    session.set_start_date(at(4, 12)).unwrap();
    session.set_end_date(at(4, 16)).unwrap();
    session.set_guest_count(40).unwrap();
    session
        .adjust_service_quantity(&ServiceId::new("flowers").unwrap(), 2)
        .unwrap();

    let gateway = InMemoryBookingGateway::new();
    let submit = SubmitBooking::new(&gateway);

    match submit.execute(&mut session).await {
        Err(SubmissionError::Rejected(errors)) => {
            assert!(errors.has(BookingField::StartDate));
            assert!(errors.has_contact(ContactField::Phone));
        }
        other => panic!("expected rejection, got {:?}", other),
    }

    session.clear_start_date().unwrap();
    session.clear_end_date().unwrap();
    fill_contact(&mut session);
    assert!(session.errors().is_valid());

    let confirmation = submit.execute(&mut session).await.unwrap();
    assert_eq!(&confirmation.draft_id, session.draft().id());

    let accepted = gateway.accepted().await;
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].start, at(3, 10));
    assert_eq!(accepted[0].end, at(3, 13));
    assert_eq!(accepted[0].price.venue_cost, 3000.0);
    assert_eq!(accepted[0].price.services_cost, 500.0);
}

#[test]
fn test_replace_venue_after_catalog_refresh() {
    let catalog = catalog();
    let mut session = session_for(&catalog, "grand-hall");
    session.set_start_date(at(6, 18)).unwrap();
    session.set_end_date(at(6, 21)).unwrap();
    session
        .adjust_service_quantity(&ServiceId::new("dj").unwrap(), 1)
        .unwrap();

    let refreshed = JsonVenueCatalog::from_json_str(
        &CATALOG
            .replace(r#""blockedDates": ["2030-06-05","#, r#""blockedDates": ["2030-06-05", "2030-06-06","#)
            .replace(r#""services": ["catering", "dj"]"#, r#""services": ["catering"]"#),
    )
    .unwrap();
    let venue_id = VenueId::new("grand-hall").unwrap();
    session
        .replace_venue(
            refreshed.find_by_id(&venue_id).unwrap().unwrap(),
            refreshed.find_services(&venue_id).unwrap(),
        )
        .unwrap();

    assert_eq!(session.draft().start(), Some(at(3, 18)));
    assert_eq!(session.draft().end(), Some(at(3, 21)));
    assert_eq!(session.draft().quantity(&ServiceId::new("dj").unwrap()), 0);
}

#[test]
fn test_favorites_in_memory() {
    let mut store = InMemoryKeyValueStore::new();
    let mut favorites = FavoriteVenues::new(&mut store);
    let hall = VenueId::new("grand-hall").unwrap();

    assert!(favorites.toggle(&hall).unwrap());
    assert!(favorites.is_favorite(&hall).unwrap());
    assert!(!favorites.toggle(&hall).unwrap());
    assert!(favorites.list().unwrap().is_empty());
}

#[test]
fn test_config_drives_session_defaults() {
    let config = BookingConfig::from_toml_str(
        r#"
        default_duration_hours = 2
        default_start_hour = 16
        minimum_billable_hours = 4
        "#,
    )
    .unwrap();
    let catalog = catalog();
    let venue_id = VenueId::new("grand-hall").unwrap();

    let session = BookingSession::with_options(
        catalog.find_by_id(&venue_id).unwrap().unwrap(),
        catalog.find_services(&venue_id).unwrap(),
        config.availability(FixedClock::new(NaiveDate::from_ymd_opt(2030, 6, 3).unwrap())),
        config.session_options(),
    );

    assert_eq!(session.draft().start(), Some(at(3, 16)));
    assert_eq!(session.draft().end(), Some(at(3, 18)));
    assert_eq!(session.price().duration_hours, 4);
    assert_eq!(session.price().venue_cost, 2000.0);
}
