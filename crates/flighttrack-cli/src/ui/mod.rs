pub mod card;
pub mod tracker;
