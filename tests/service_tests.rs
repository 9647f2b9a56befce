use ladle::db::Store;
use ladle::services::{
    CategoryError, CategoryService, FavoriteError, FavoriteService, IngredientService,
    IngredientRef, RecipeError, RecipeInput, RecipeService, SeaOrmCategoryService,
    SeaOrmFavoriteService, SeaOrmIngredientService, SeaOrmRecipeService, SeaOrmUserService,
    UserError, UserService,
};

struct TestEnv {
    store: Store,
    users: SeaOrmUserService,
    ingredients: SeaOrmIngredientService,
    categories: SeaOrmCategoryService,
    recipes: SeaOrmRecipeService,
    favorites: SeaOrmFavoriteService,
}

async fn spawn_env() -> TestEnv {
    let store = Store::new("sqlite::memory:")
        .await
        .expect("Failed to create store");

    TestEnv {
        users: SeaOrmUserService::new(store.clone()),
        ingredients: SeaOrmIngredientService::new(store.clone()),
        categories: SeaOrmCategoryService::new(store.clone()),
        recipes: SeaOrmRecipeService::new(store.clone()),
        favorites: SeaOrmFavoriteService::new(store.clone()),
        store,
    }
}

fn recipe_input(name: &str, ingredient_id: &str, category_id: &str, steps: &[&str]) -> RecipeInput {
    RecipeInput {
        name: name.to_string(),
        description: "A test recipe".to_string(),
        ingredients: vec![IngredientRef {
            ingredient_id: ingredient_id.to_string(),
            quantity: "1 cup".to_string(),
        }],
        category_ids: vec![category_id.to_string()],
        steps: steps.iter().map(ToString::to_string).collect(),
    }
}

/// Seeds a user, an ingredient and a category; returns their ids.
async fn seed_basics(env: &TestEnv) -> (String, String, String) {
    let user = env.users.register("alice", "hunter2").await.unwrap();
    let ingredient = env.ingredients.create("Flour").await.unwrap();
    let category = env.categories.create("Dessert").await.unwrap();
    (user.id, ingredient.id, category.id)
}

#[tokio::test]
async fn register_rejects_duplicate_username() {
    let env = spawn_env().await;

    env.users.register("alice", "hunter2").await.unwrap();
    let err = env.users.register("alice", "other").await.unwrap_err();

    assert!(matches!(err, UserError::Conflict(_)));
    assert_eq!(env.store.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn authenticate_checks_password() {
    let env = spawn_env().await;
    env.users.register("alice", "hunter2").await.unwrap();

    let ok = env.users.authenticate("alice", "hunter2").await.unwrap();
    assert!(ok.is_some());
    assert_eq!(ok.unwrap().username, "alice");

    let wrong = env.users.authenticate("alice", "wrong").await.unwrap();
    assert!(wrong.is_none());

    let unknown = env.users.authenticate("bob", "hunter2").await.unwrap();
    assert!(unknown.is_none());
}

#[tokio::test]
async fn ingredient_names_are_unique() {
    let env = spawn_env().await;

    env.ingredients.create("Flour").await.unwrap();
    let err = env.ingredients.create("Flour").await.unwrap_err();
    assert!(matches!(err, ladle::services::IngredientError::Conflict(_)));

    // get_or_create returns the existing row instead of erroring.
    let first = env.ingredients.get_by_name("Flour").await.unwrap().unwrap();
    let again = env.ingredients.get_or_create("Flour").await.unwrap();
    assert_eq!(first.id, again.id);
}

#[tokio::test]
async fn category_update_and_delete() {
    let env = spawn_env().await;

    let cat = env.categories.create("Desert").await.unwrap();
    let renamed = env.categories.update(&cat.id, "Dessert").await.unwrap();
    assert_eq!(renamed.name, "Dessert");

    // Renaming to its own current name is not a conflict.
    env.categories.update(&cat.id, "Dessert").await.unwrap();

    let other = env.categories.create("Breakfast").await.unwrap();
    let err = env.categories.update(&other.id, "Dessert").await.unwrap_err();
    assert!(matches!(err, CategoryError::Conflict(_)));

    env.categories.delete(&cat.id).await.unwrap();
    assert!(env.categories.get_by_id(&cat.id).await.unwrap().is_none());

    let err = env.categories.delete(&cat.id).await.unwrap_err();
    assert!(matches!(err, CategoryError::NotFound(_)));
}

#[tokio::test]
async fn recipe_names_are_unique() {
    let env = spawn_env().await;
    let (user_id, ingredient_id, category_id) = seed_basics(&env).await;

    env.recipes
        .create(
            &user_id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix", "Cook"]),
        )
        .await
        .unwrap();

    let err = env
        .recipes
        .create(
            &user_id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RecipeError::Conflict(_)));
    assert_eq!(env.store.recipe_count().await.unwrap(), 1);
}

#[tokio::test]
async fn recipe_requires_each_child_collection() {
    let env = spawn_env().await;
    let (user_id, ingredient_id, category_id) = seed_basics(&env).await;

    let mut no_ingredients = recipe_input("One", &ingredient_id, &category_id, &["Mix"]);
    no_ingredients.ingredients.clear();
    let err = env.recipes.create(&user_id, no_ingredients).await.unwrap_err();
    assert!(matches!(err, RecipeError::Validation(_)));

    let mut no_categories = recipe_input("Two", &ingredient_id, &category_id, &["Mix"]);
    no_categories.category_ids.clear();
    let err = env.recipes.create(&user_id, no_categories).await.unwrap_err();
    assert!(matches!(err, RecipeError::Validation(_)));

    let mut no_steps = recipe_input("Three", &ingredient_id, &category_id, &["Mix"]);
    no_steps.steps.clear();
    let err = env.recipes.create(&user_id, no_steps).await.unwrap_err();
    assert!(matches!(err, RecipeError::Validation(_)));

    // Nothing was half-written.
    assert_eq!(env.store.recipe_count().await.unwrap(), 0);
}

#[tokio::test]
async fn recipe_create_rejects_unknown_references() {
    let env = spawn_env().await;
    let (user_id, ingredient_id, category_id) = seed_basics(&env).await;

    let err = env
        .recipes
        .create(
            "no-such-user",
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::NotFound(_)));

    let err = env
        .recipes
        .create(
            &user_id,
            recipe_input("Pancakes", "no-such-ingredient", &category_id, &["Mix"]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::NotFound(_)));

    let err = env
        .recipes
        .create(
            &user_id,
            recipe_input("Pancakes", &ingredient_id, "no-such-category", &["Mix"]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::NotFound(_)));

    assert_eq!(env.store.recipe_count().await.unwrap(), 0);
}

#[tokio::test]
async fn update_renumbers_steps_from_one() {
    let env = spawn_env().await;
    let (user_id, ingredient_id, category_id) = seed_basics(&env).await;

    let created = env
        .recipes
        .create(
            &user_id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Old 1", "Old 2"]),
        )
        .await
        .unwrap();

    let updated = env
        .recipes
        .update(
            &created.id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["a", "b", "c"]),
        )
        .await
        .unwrap();

    let numbers: Vec<i32> = updated.steps.iter().map(|s| s.step_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    let texts: Vec<&str> = updated.steps.iter().map(|s| s.description.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn update_replaces_children_instead_of_merging() {
    let env = spawn_env().await;
    let (user_id, flour_id, category_id) = seed_basics(&env).await;
    let sugar = env.ingredients.create("Sugar").await.unwrap();
    let butter = env.ingredients.create("Butter").await.unwrap();
    let breakfast = env.categories.create("Breakfast").await.unwrap();

    let mut input = recipe_input("Pancakes", &flour_id, &category_id, &["Mix"]);
    input.ingredients.push(IngredientRef {
        ingredient_id: sugar.id.clone(),
        quantity: "2 tbsp".to_string(),
    });
    let created = env.recipes.create(&user_id, input).await.unwrap();
    assert_eq!(created.ingredients.len(), 2);

    let mut replacement = recipe_input("Pancakes", &butter.id, &breakfast.id, &["Melt", "Mix"]);
    replacement.ingredients[0].quantity = "50g".to_string();
    let updated = env.recipes.update(&created.id, replacement).await.unwrap();

    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.ingredients[0].ingredient_id, butter.id);
    assert_eq!(updated.ingredients[0].name, "Butter");
    assert_eq!(updated.ingredients[0].quantity, "50g");

    assert_eq!(updated.categories.len(), 1);
    assert_eq!(updated.categories[0].category_id, breakfast.id);
}

#[tokio::test]
async fn update_rejects_empty_child_collections() {
    let env = spawn_env().await;
    let (user_id, ingredient_id, category_id) = seed_basics(&env).await;

    let created = env
        .recipes
        .create(
            &user_id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix", "Cook"]),
        )
        .await
        .unwrap();

    let mut no_ingredients = recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]);
    no_ingredients.ingredients.clear();
    let err = env.recipes.update(&created.id, no_ingredients).await.unwrap_err();
    assert!(matches!(err, RecipeError::Validation(_)));

    let mut no_categories = recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]);
    no_categories.category_ids.clear();
    let err = env.recipes.update(&created.id, no_categories).await.unwrap_err();
    assert!(matches!(err, RecipeError::Validation(_)));

    let mut no_steps = recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]);
    no_steps.steps.clear();
    let err = env.recipes.update(&created.id, no_steps).await.unwrap_err();
    assert!(matches!(err, RecipeError::Validation(_)));

    // Validation runs before the delete steps, so the children are intact.
    let survivor = env.recipes.get_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(survivor.ingredients.len(), 1);
    assert_eq!(survivor.ingredients[0].ingredient_id, ingredient_id);
    assert_eq!(survivor.categories.len(), 1);
    assert_eq!(survivor.steps.len(), 2);
}

#[tokio::test]
async fn over_limit_fields_are_rejected() {
    let env = spawn_env().await;
    let (user_id, ingredient_id, category_id) = seed_basics(&env).await;

    let err = env.users.register(&"u".repeat(101), "hunter2").await.unwrap_err();
    assert!(matches!(err, UserError::Validation(_)));

    let err = env.ingredients.create(&"i".repeat(101)).await.unwrap_err();
    assert!(matches!(err, ladle::services::IngredientError::Validation(_)));

    let err = env.categories.create(&"c".repeat(101)).await.unwrap_err();
    assert!(matches!(err, CategoryError::Validation(_)));

    let long_name = recipe_input(&"n".repeat(201), &ingredient_id, &category_id, &["Mix"]);
    let err = env.recipes.create(&user_id, long_name).await.unwrap_err();
    assert!(matches!(err, RecipeError::Validation(_)));

    let mut long_description = recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]);
    long_description.description = "d".repeat(2001);
    let err = env.recipes.create(&user_id, long_description).await.unwrap_err();
    assert!(matches!(err, RecipeError::Validation(_)));

    let mut long_quantity = recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]);
    long_quantity.ingredients[0].quantity = "q".repeat(51);
    let err = env.recipes.create(&user_id, long_quantity).await.unwrap_err();
    assert!(matches!(err, RecipeError::Validation(_)));

    let long_step = "s".repeat(1001);
    let steps = [long_step.as_str()];
    let payload = recipe_input("Pancakes", &ingredient_id, &category_id, &steps);
    let err = env.recipes.create(&user_id, payload).await.unwrap_err();
    assert!(matches!(err, RecipeError::Validation(_)));

    // Values exactly at the limit pass.
    let max_name = recipe_input(&"m".repeat(200), &ingredient_id, &category_id, &["Mix"]);
    env.recipes.create(&user_id, max_name).await.unwrap();

    assert_eq!(env.store.recipe_count().await.unwrap(), 1);
}

#[tokio::test]
async fn update_rejects_name_taken_by_another_recipe() {
    let env = spawn_env().await;
    let (user_id, ingredient_id, category_id) = seed_basics(&env).await;

    env.recipes
        .create(
            &user_id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap();
    let waffles = env
        .recipes
        .create(
            &user_id,
            recipe_input("Waffles", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap();

    let err = env
        .recipes
        .update(
            &waffles.id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::Conflict(_)));

    // Keeping its own name is fine.
    env.recipes
        .update(
            &waffles.id,
            recipe_input("Waffles", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn update_missing_recipe_is_not_found() {
    let env = spawn_env().await;
    let (_, ingredient_id, category_id) = seed_basics(&env).await;

    let err = env
        .recipes
        .update(
            "no-such-recipe",
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::NotFound(_)));
}

#[tokio::test]
async fn recipe_lifecycle_end_to_end() {
    let env = spawn_env().await;
    let (user_id, ingredient_id, category_id) = seed_basics(&env).await;

    let created = env
        .recipes
        .create(
            &user_id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix", "Cook"]),
        )
        .await
        .unwrap();

    let fetched = env.recipes.get_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Pancakes");
    assert_eq!(fetched.owner.username, "alice");
    assert_eq!(fetched.ingredients[0].name, "Flour");
    assert_eq!(fetched.categories[0].name, "Dessert");
    assert_eq!(fetched.steps.len(), 2);

    let by_user = env.recipes.list_by_user(&user_id).await.unwrap();
    assert_eq!(by_user.len(), 1);
    let by_category = env.recipes.list_by_category(&category_id).await.unwrap();
    assert_eq!(by_category.len(), 1);
    let by_ingredient = env.recipes.list_by_ingredient(&ingredient_id).await.unwrap();
    assert_eq!(by_ingredient.len(), 1);

    env.recipes.delete(&created.id).await.unwrap();
    assert!(env.recipes.get_by_id(&created.id).await.unwrap().is_none());
    assert!(env.recipes.list_all().await.unwrap().is_empty());

    let err = env.recipes.delete(&created.id).await.unwrap_err();
    assert!(matches!(err, RecipeError::NotFound(_)));
}

#[tokio::test]
async fn self_favorite_is_rejected() {
    let env = spawn_env().await;
    let (user_id, ingredient_id, category_id) = seed_basics(&env).await;

    let recipe = env
        .recipes
        .create(
            &user_id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap();

    let err = env.favorites.add(&user_id, &recipe.id).await.unwrap_err();
    assert!(matches!(err, FavoriteError::Conflict(_)));
    assert_eq!(env.store.favorite_count().await.unwrap(), 0);
}

#[tokio::test]
async fn favorite_add_and_remove_are_guarded() {
    let env = spawn_env().await;
    let (alice_id, ingredient_id, category_id) = seed_basics(&env).await;
    let bob = env.users.register("bob", "hunter2").await.unwrap();

    let recipe = env
        .recipes
        .create(
            &alice_id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap();

    assert!(!env.favorites.is_favorite(&bob.id, &recipe.id).await.unwrap());

    env.favorites.add(&bob.id, &recipe.id).await.unwrap();
    assert!(env.favorites.is_favorite(&bob.id, &recipe.id).await.unwrap());

    let err = env.favorites.add(&bob.id, &recipe.id).await.unwrap_err();
    assert!(matches!(err, FavoriteError::Conflict(_)));
    assert_eq!(env.store.favorite_count().await.unwrap(), 1);

    let listed = env.favorites.list_for_user(&bob.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, recipe.id);

    env.favorites.remove(&bob.id, &recipe.id).await.unwrap();
    assert!(!env.favorites.is_favorite(&bob.id, &recipe.id).await.unwrap());

    let err = env.favorites.remove(&bob.id, &recipe.id).await.unwrap_err();
    assert!(matches!(err, FavoriteError::NotFound(_)));
}

#[tokio::test]
async fn favorite_requires_existing_user_and_recipe() {
    let env = spawn_env().await;
    let (alice_id, ingredient_id, category_id) = seed_basics(&env).await;

    let recipe = env
        .recipes
        .create(
            &alice_id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap();

    let err = env.favorites.add("no-such-user", &recipe.id).await.unwrap_err();
    assert!(matches!(err, FavoriteError::NotFound(_)));

    let err = env.favorites.add(&alice_id, "no-such-recipe").await.unwrap_err();
    assert!(matches!(err, FavoriteError::NotFound(_)));
}

#[tokio::test]
async fn deleting_recipe_clears_favorites() {
    let env = spawn_env().await;
    let (alice_id, ingredient_id, category_id) = seed_basics(&env).await;
    let bob = env.users.register("bob", "hunter2").await.unwrap();

    let recipe = env
        .recipes
        .create(
            &alice_id,
            recipe_input("Pancakes", &ingredient_id, &category_id, &["Mix"]),
        )
        .await
        .unwrap();
    env.favorites.add(&bob.id, &recipe.id).await.unwrap();

    env.recipes.delete(&recipe.id).await.unwrap();

    assert_eq!(env.store.favorite_count().await.unwrap(), 0);
    assert!(env.favorites.list_for_user(&bob.id).await.unwrap().is_empty());
}
