//! Value Objects - immutable domain data

mod barcode;
mod count_status;
mod item_id;
mod venue_id;

pub use barcode::Barcode;
pub use count_status::CountStatus;
pub use item_id::ItemId;
pub use venue_id::VenueId;
