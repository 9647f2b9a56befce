pub mod category_service;
pub mod category_service_impl;
pub mod favorite_service;
pub mod favorite_service_impl;
pub mod ingredient_service;
pub mod ingredient_service_impl;
pub mod recipe_service;
pub mod recipe_service_impl;
pub mod user_service;
pub mod user_service_impl;

pub use category_service::{CategoryDto, CategoryError, CategoryService};
pub use category_service_impl::SeaOrmCategoryService;
pub use favorite_service::{FavoriteError, FavoriteService};
pub use favorite_service_impl::SeaOrmFavoriteService;
pub use ingredient_service::{IngredientDto, IngredientError, IngredientService};
pub use ingredient_service_impl::SeaOrmIngredientService;
pub use recipe_service::{
    IngredientRef, RecipeDetails, RecipeError, RecipeInput, RecipeService, compose_details,
};
pub use recipe_service_impl::SeaOrmRecipeService;
pub use user_service::{UserDto, UserError, UserService};
pub use user_service_impl::SeaOrmUserService;
