pub mod booking_session;
pub mod submission;

pub use booking_session::{BookingSession, SessionOptions, DEFAULT_START_HOUR};
pub use submission::{
    BookingConfirmation, BookingGateway, InMemoryBookingGateway, SubmissionError,
    SubmissionResult, SubmitBooking,
};
