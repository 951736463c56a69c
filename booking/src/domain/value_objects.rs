/// Value objects for the booking domain
use super::base::{DomainError, DomainResult, ValueObject};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a Venue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VenueId(String);

impl VenueId {
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidValue("VenueId cannot be empty".to_string()));
        }
        Ok(VenueId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for VenueId {}

impl TryFrom<String> for VenueId {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        VenueId::new(value)
    }
}

impl From<VenueId> for String {
    fn from(id: VenueId) -> Self {
        id.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an add-on Service
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidValue("ServiceId cannot be empty".to_string()));
        }
        Ok(ServiceId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ServiceId {}

impl TryFrom<String> for ServiceId {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        ServiceId::new(value)
    }
}

impl From<ServiceId> for String {
    fn from(id: ServiceId) -> Self {
        id.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an in-progress booking draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftId(Uuid);

impl DraftId {
    pub fn generate() -> Self {
        DraftId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl ValueObject for DraftId {}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text available in several languages, keyed by language code ("en", "ar", ...)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub const FALLBACK_LANGUAGE: &'static str = "en";

    /// Create text with a single entry in the fallback language
    pub fn new(text: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(Self::FALLBACK_LANGUAGE.to_string(), text.into());
        LocalizedText(entries)
    }

    pub fn with_translation(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(language.into(), text.into());
        self
    }

    /// Text for `language`, falling back to English and then to any entry
    pub fn get(&self, language: &str) -> Option<&str> {
        self.0
            .get(language)
            .or_else(|| self.0.get(Self::FALLBACK_LANGUAGE))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|text| text.trim().is_empty())
    }
}

impl ValueObject for LocalizedText {}

impl From<BTreeMap<String, String>> for LocalizedText {
    fn from(entries: BTreeMap<String, String>) -> Self {
        LocalizedText(entries)
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get(Self::FALLBACK_LANGUAGE).unwrap_or_default())
    }
}

/// ISO-style currency code; amounts are never converted between currencies
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into().trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(DomainError::InvalidValue("Currency code cannot be empty".to_string()));
        }
        Ok(Currency(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Currency {}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Determines the cost formula applied to a price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    Hourly,
    PerPerson,
    PerDay,
    Fixed,
    Custom,
}

impl ValueObject for PricingModel {}

impl FromStr for PricingModel {
    type Err = DomainError;

    /// Accepts `per-person`, `per_person`, `perPerson` and friends
    fn from_str(s: &str) -> DomainResult<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "hourly" | "perhour" => Ok(PricingModel::Hourly),
            "perperson" | "perguest" => Ok(PricingModel::PerPerson),
            "perday" | "daily" => Ok(PricingModel::PerDay),
            "fixed" | "flat" => Ok(PricingModel::Fixed),
            "custom" => Ok(PricingModel::Custom),
            _ => Err(DomainError::InvalidValue(format!("Unknown pricing model: {}", s))),
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PricingModel::Hourly => "hourly",
            PricingModel::PerPerson => "per-person",
            PricingModel::PerDay => "per-day",
            PricingModel::Fixed => "fixed",
            PricingModel::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

/// A price: an amount in a currency under a pricing model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    amount: f64,
    currency: Currency,
    model: PricingModel,
}

impl Price {
    pub fn new(amount: f64, currency: Currency, model: PricingModel) -> DomainResult<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::InvalidValue(format!(
                "Price amount must be a non-negative number, got {}",
                amount
            )));
        }
        Ok(Price {
            amount,
            currency,
            model,
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn model(&self) -> PricingModel {
        self.model
    }
}

impl ValueObject for Price {}

/// Guest capacity of a venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRange {
    min: u32,
    max: u32,
    recommended: u32,
}

impl CapacityRange {
    /// A minimum of 0 is a configuration error: every booking has at least one guest
    pub fn new(min: u32, max: u32, recommended: Option<u32>) -> DomainResult<Self> {
        if min < 1 {
            return Err(DomainError::InvalidValue(
                "Capacity minimum must be at least 1".to_string(),
            ));
        }
        if max < min {
            return Err(DomainError::InvalidValue(format!(
                "Capacity maximum {} is below minimum {}",
                max, min
            )));
        }
        let recommended = recommended.unwrap_or(max);
        if recommended < min || recommended > max {
            return Err(DomainError::InvalidValue(format!(
                "Recommended capacity {} is outside {}..={}",
                recommended, min, max
            )));
        }
        Ok(CapacityRange {
            min,
            max,
            recommended,
        })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn recommended(&self) -> u32 {
        self.recommended
    }

    pub fn contains(&self, guests: u32) -> bool {
        guests >= self.min && guests <= self.max
    }
}

impl ValueObject for CapacityRange {}

impl fmt::Display for CapacityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} guests", self.min, self.max)
    }
}

/// A closed interval of calendar dates during which a venue cannot be booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl BlockedDateRange {
    /// A missing end blocks the start date only; an inverted range is swapped
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        let end = end.unwrap_or(start);
        if end < start {
            BlockedDateRange {
                start: end,
                end: start,
            }
        } else {
            BlockedDateRange { start, end }
        }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        BlockedDateRange::new(date, None)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start-of-day lower bound, end-of-day upper bound
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl ValueObject for BlockedDateRange {}

impl fmt::Display for BlockedDateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Parse a time of day such as `9:00 AM`, `12:30pm` or `21:00`
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let normalized = raw.trim().to_ascii_uppercase();
    ["%I:%M %p", "%I:%M%p", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
}

/// Open/close window for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    open: NaiveTime,
    close: NaiveTime,
}

impl TimeWindow {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        TimeWindow { open, close }
    }

    /// Parse an `"open - close"` window, e.g. `"9:00 AM - 10:00 PM"`
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(|c| c == '-' || c == '–');
        let open = parse_time_of_day(parts.next()?)?;
        let close = parse_time_of_day(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(TimeWindow::new(open, close))
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// A close of 12:00 AM means midnight of the following day
    pub fn closes_at_midnight(&self) -> bool {
        self.close.num_seconds_from_midnight() == 0
    }

    /// Inclusive on both ends; a close before open wraps past midnight
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.closes_at_midnight() {
            time >= self.open
        } else if self.close < self.open {
            time >= self.open || time <= self.close
        } else {
            time >= self.open && time <= self.close
        }
    }
}

impl ValueObject for TimeWindow {}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.open.format("%-I:%M %p"),
            self.close.format("%-I:%M %p")
        )
    }
}

/// Schedule for a single weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySchedule {
    Closed,
    Open(TimeWindow),
}

impl DaySchedule {
    /// Malformed input degrades to `Closed`
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("closed") {
            return DaySchedule::Closed;
        }
        match TimeWindow::parse(trimmed) {
            Some(window) => DaySchedule::Open(window),
            None => {
                tracing::warn!("Unparseable operating hours '{}', treating day as closed", raw);
                DaySchedule::Closed
            }
        }
    }

    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        match self {
            DaySchedule::Closed => false,
            DaySchedule::Open(window) => window.contains(time),
        }
    }
}

impl ValueObject for DaySchedule {}

/// Per-weekday operating hours of a venue; a weekday without an entry is closed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperatingHours {
    days: HashMap<Weekday, DaySchedule>,
}

impl OperatingHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same window on every day of the week
    pub fn every_day(window: TimeWindow) -> Self {
        let mut hours = Self::new();
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            hours.set(weekday, DaySchedule::Open(window));
        }
        hours
    }

    pub fn with_day(mut self, weekday: Weekday, schedule: DaySchedule) -> Self {
        self.set(weekday, schedule);
        self
    }

    pub fn set(&mut self, weekday: Weekday, schedule: DaySchedule) {
        self.days.insert(weekday, schedule);
    }

    pub fn schedule_for(&self, weekday: Weekday) -> Option<&DaySchedule> {
        self.days.get(&weekday)
    }

    pub fn is_open_at(&self, date_time: NaiveDateTime) -> bool {
        self.schedule_for(date_time.weekday())
            .map(|schedule| schedule.is_open_at(date_time.time()))
            .unwrap_or(false)
    }
}

impl ValueObject for OperatingHours {}

/// Contact fields collected with a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactField::FirstName => "firstName",
            ContactField::LastName => "lastName",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        };
        write!(f, "{}", name)
    }
}

/// Contact details of the person making the booking
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
}

impl ContactInfo {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        ContactInfo {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::FirstName => self.first_name = value,
            ContactField::LastName => self.last_name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
        }
    }
}

impl ValueObject for ContactInfo {}

/// Top-level booking form fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    StartDate,
    StartTime,
    EndDate,
    EndTime,
    Guests,
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingField::StartDate => "startDate",
            BookingField::StartTime => "startTime",
            BookingField::EndDate => "endDate",
            BookingField::EndTime => "endTime",
            BookingField::Guests => "guests",
        };
        write!(f, "{}", name)
    }
}

/// Field-addressable validation messages; empty means valid
///
/// Serializes to the shape the booking form highlights inputs from:
/// `{"startDate": "...", "guests": "...", "contactInfo": {"email": "..."}}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    #[serde(flatten)]
    fields: BTreeMap<BookingField, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    contact_info: BTreeMap<ContactField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.contact_info.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len() + self.contact_info.len()
    }

    /// Record an error; the first message reported for a field wins
    pub fn add(&mut self, field: BookingField, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn add_contact(&mut self, field: ContactField, message: impl Into<String>) {
        self.contact_info.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: BookingField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn get_contact(&self, field: ContactField) -> Option<&str> {
        self.contact_info.get(&field).map(String::as_str)
    }

    pub fn has(&self, field: BookingField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn has_contact(&self, field: ContactField) -> bool {
        self.contact_info.contains_key(&field)
    }

    pub fn clear(&mut self, field: BookingField) {
        self.fields.remove(&field);
    }

    pub fn clear_contact(&mut self, field: ContactField) {
        self.contact_info.remove(&field);
    }

    pub fn fields(&self) -> impl Iterator<Item = (BookingField, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn contact_fields(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.contact_info
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl ValueObject for ValidationErrors {}
