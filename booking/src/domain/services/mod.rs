// Domain services: stateless computations over venues and drafts
pub mod clock;
pub mod availability;
pub mod validation;
pub mod pricing;

pub use clock::{Clock, FixedClock, SystemClock};
pub use availability::{AvailabilityCalculator, DEFAULT_MAX_SCAN_DAYS};
pub use validation::{is_valid_email, BookingValidator};
pub use pricing::{PriceBreakdown, PricingEngine, ServiceLineItem, DEFAULT_MINIMUM_BILLABLE_HOURS};
