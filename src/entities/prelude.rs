pub use super::categories::Entity as Categories;
pub use super::favorites::Entity as Favorites;
pub use super::ingredients::Entity as Ingredients;
pub use super::recipe_categories::Entity as RecipeCategories;
pub use super::recipe_ingredients::Entity as RecipeIngredients;
pub use super::recipe_steps::Entity as RecipeSteps;
pub use super::recipes::Entity as Recipes;
pub use super::users::Entity as Users;
