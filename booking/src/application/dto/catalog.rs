use crate::domain::{
    base::DomainError,
    entities::{Service, Venue},
    value_objects::{
        parse_time_of_day, BlockedDateRange, CapacityRange, Currency, DaySchedule, LocalizedText,
        OperatingHours, Price, PricingModel, ServiceId, TimeWindow, VenueId,
    },
    DomainResult,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Weekday};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Currency assumed when a price omits one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Whole catalog document: venues plus the services they reference
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDto {
    #[serde(default)]
    pub venues: Vec<VenueDto>,
    #[serde(default)]
    pub services: Vec<ServiceDto>,
}

/// Either a plain string or a `{language: text}` map
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LocalizedTextDto {
    Plain(String),
    Translations(BTreeMap<String, String>),
}

impl From<LocalizedTextDto> for LocalizedText {
    fn from(dto: LocalizedTextDto) -> Self {
        match dto {
            LocalizedTextDto::Plain(text) => LocalizedText::new(text),
            LocalizedTextDto::Translations(map) => LocalizedText::from(map),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityDto {
    pub min: u32,
    pub max: u32,
    #[serde(default)]
    pub recommended: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDto {
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, alias = "type", alias = "pricingModel")]
    pub model: Option<String>,
}

impl PriceDto {
    pub fn to_price(&self) -> DomainResult<Price> {
        let currency = Currency::new(self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))?;
        Price::new(self.amount, currency, pricing_model(self.model.as_deref()))
    }
}

/// Unknown or missing models price as `Custom` (flat amount)
fn pricing_model(raw: Option<&str>) -> PricingModel {
    match raw {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown pricing model '{}', pricing as custom", raw);
            PricingModel::Custom
        }),
        None => PricingModel::Custom,
    }
}

/// A blocked date as it appears in venue data
///
/// Accepts `"2030-06-10"`, RFC 3339 date-times and `{start, end?}` objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BlockedDateDto {
    Single(String),
    Range {
        start: String,
        #[serde(default)]
        end: Option<String>,
    },
}

impl BlockedDateDto {
    /// `None` when any endpoint fails to parse
    pub fn to_range(&self) -> Option<BlockedDateRange> {
        match self {
            BlockedDateDto::Single(raw) => parse_calendar_date(raw).map(BlockedDateRange::single_day),
            BlockedDateDto::Range { start, end } => {
                let start = parse_calendar_date(start)?;
                let end = match end {
                    Some(raw) => Some(parse_calendar_date(raw)?),
                    None => None,
                };
                Some(BlockedDateRange::new(start, end))
            }
        }
    }
}

/// Calendar date of `YYYY-MM-DD`, an RFC 3339 timestamp or a naive ISO date-time
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|date_time| date_time.date())
}

/// Operating hours for one weekday
///
/// Accepts `"9:00 AM - 10:00 PM"`, `"Closed"` or `{open, close, closed}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DayHoursDto {
    Text(String),
    Window {
        #[serde(default)]
        open: Option<String>,
        #[serde(default)]
        close: Option<String>,
        #[serde(default)]
        closed: bool,
    },
}

impl DayHoursDto {
    pub fn to_schedule(&self) -> DaySchedule {
        match self {
            DayHoursDto::Text(raw) => DaySchedule::parse(raw),
            DayHoursDto::Window { closed: true, .. } => DaySchedule::Closed,
            DayHoursDto::Window { open, close, .. } => {
                let window = open
                    .as_deref()
                    .and_then(parse_time_of_day)
                    .zip(close.as_deref().and_then(parse_time_of_day));
                match window {
                    Some((open, close)) => DaySchedule::Open(TimeWindow::new(open, close)),
                    None => {
                        tracing::warn!(
                            "Incomplete operating hours {:?}, treating day as closed",
                            self
                        );
                        DaySchedule::Closed
                    }
                }
            }
        }
    }
}

fn operating_hours(days: &BTreeMap<String, DayHoursDto>) -> OperatingHours {
    let mut hours = OperatingHours::new();
    for (name, day) in days {
        match name.parse::<Weekday>() {
            Ok(weekday) => hours.set(weekday, day.to_schedule()),
            Err(_) => tracing::warn!("Ignoring operating hours for unknown weekday '{}'", name),
        }
    }
    hours
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueDto {
    pub id: String,
    pub name: LocalizedTextDto,
    #[serde(default)]
    pub description: Option<LocalizedTextDto>,
    #[serde(default)]
    pub address: String,
    pub capacity: CapacityDto,
    pub price: PriceDto,
    #[serde(default)]
    pub operating_hours: BTreeMap<String, DayHoursDto>,
    #[serde(default)]
    pub blocked_dates: Vec<BlockedDateDto>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, alias = "services")]
    pub service_ids: Vec<String>,
}

impl TryFrom<VenueDto> for Venue {
    type Error = DomainError;

    fn try_from(dto: VenueDto) -> DomainResult<Self> {
        let id = VenueId::new(dto.id)?;
        let capacity = CapacityRange::new(
            dto.capacity.min,
            dto.capacity.max,
            dto.capacity.recommended,
        )
        .map_err(|e| DomainError::InvalidValue(format!("Venue {}: {}", id, e)))?;
        let price = dto.price.to_price()?;

        let blocked_dates = dto
            .blocked_dates
            .iter()
            .filter_map(|blocked| {
                let range = blocked.to_range();
                if range.is_none() {
                    tracing::warn!("Venue {}: skipping unparseable blocked date {:?}", id, blocked);
                }
                range
            })
            .collect();

        let service_ids = dto
            .service_ids
            .into_iter()
            .map(ServiceId::new)
            .collect::<DomainResult<Vec<_>>>()?;

        let mut venue = Venue::new(id, dto.name.into(), capacity, price)
            .with_address(dto.address)
            .with_operating_hours(operating_hours(&dto.operating_hours))
            .with_blocked_dates(blocked_dates)
            .with_amenities(dto.amenities)
            .with_service_ids(service_ids);
        if let Some(description) = dto.description {
            venue = venue.with_description(description.into());
        }
        Ok(venue)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub id: String,
    pub name: LocalizedTextDto,
    pub price: PriceDto,
    #[serde(default, alias = "duration")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub max_capacity: Option<u32>,
}

impl TryFrom<ServiceDto> for Service {
    type Error = DomainError;

    fn try_from(dto: ServiceDto) -> DomainResult<Self> {
        let mut service = Service::new(ServiceId::new(dto.id)?, dto.name.into(), dto.price.to_price()?);
        if let Some(minutes) = dto.duration_minutes {
            service = service.with_duration_minutes(minutes);
        }
        if let Some(capacity) = dto.max_capacity {
            service = service.with_max_capacity(capacity);
        }
        Ok(service)
    }
}
