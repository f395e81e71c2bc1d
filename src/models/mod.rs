// Models module - Domain records

pub mod booking;
pub mod person;
pub mod segment;
pub mod traveler;

pub use booking::{Booking, BookingBundle, BookingDraft, BookingType, PaymentType};
pub use person::Person;
pub use segment::{Segment, SegmentDraft, DEFAULT_SEGMENT_GROUP};
pub use traveler::{
    TravelerBooking, TravelerDetail, TravelerDraft, TravelerStatus, TravelerUpdate,
};
