//! Domain entities

mod count_item;

pub use count_item::CountItem;
