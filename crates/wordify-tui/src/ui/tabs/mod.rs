pub mod collection;
pub mod define;
