pub mod booking;
pub mod space;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use space::{ParkingSpace, RateSheet, SlotCounts, SpaceDraft, SpacePricing, VehicleType};
pub use user::{ProfileDraft, UserProfile, UserRole};
