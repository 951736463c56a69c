pub mod browse;
pub mod favorites;
pub mod quote;

pub use browse::FindAvailableVenues;
pub use favorites::{FavoriteVenues, FAVORITES_KEY};
pub use quote::QuoteBooking;
