//! ICS export of the event.

mod generate;

pub use generate::generate_ics;
