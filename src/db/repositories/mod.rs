pub mod category;
pub mod favorite;
pub mod ingredient;
pub mod recipe;
pub mod user;
