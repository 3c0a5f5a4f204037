pub mod booking;
pub mod event;
pub mod event_view;
pub mod preferences;
pub mod profile;

pub use booking::{Booking, BookingStats, BookingWithEvent, NewBooking};
pub use event::{Event, NewEvent, KNOWN_CATEGORIES};
pub use event_view::EventView;
pub use preferences::UserPreferences;
pub use profile::Profile;
