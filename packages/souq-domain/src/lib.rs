pub mod geo;
pub mod listing;
pub mod price;
pub mod tier;
