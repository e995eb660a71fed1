pub mod bug;
pub mod card;
