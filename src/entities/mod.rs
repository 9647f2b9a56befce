pub mod prelude;

pub mod categories;
pub mod favorites;
pub mod ingredients;
pub mod recipe_categories;
pub mod recipe_ingredients;
pub mod recipe_steps;
pub mod recipes;
pub mod users;
