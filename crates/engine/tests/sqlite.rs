// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::path::Path;

use kondate_engine::{
	Engine, EngineConfig,
	request::{MenuQuery, NewAllergen, NewCity, NewDish, NewMenu},
};
use kondate_store_sqlite::{SqliteConfig, SqliteStore};
use kondate_testing::tempdir::temp_dir;
use kondate_type::ErrorKind;
use tokio::runtime::Builder;

fn with_engine<F, Fut>(f: F)
where
	F: FnOnce(Engine) -> Fut,
	Fut: Future<Output = ()>,
{
	temp_dir(|path: &Path| {
		let store = SqliteStore::open(SqliteConfig::fast(path)).unwrap();
		let engine = Engine::new(store, EngineConfig::default());
		Builder::new_current_thread().enable_all().build().unwrap().block_on(f(engine));
	})
}

fn new_menu(offered_at: &str) -> NewMenu {
	NewMenu {
		offered_at: offered_at.to_string(),
		photo_url: None,
		elementary_school_calories: 610,
		junior_high_school_calories: 820,
		city_code: 131016,
	}
}

#[test]
fn test_menu_lifecycle() {
	with_engine(|engine| async move {
		let menu = engine.create_menu(new_menu("2024-04-08")).await.unwrap();
		let menu_id = menu.id.to_string();

		engine.create_dish(&menu_id, NewDish::named("Curry rice")).await.unwrap();
		engine.create_dishes(&menu_id, vec![NewDish::named("Salad"), NewDish::named("Milk")]).await.unwrap();

		let found = engine.get_menu_with_dishes(&menu_id, None).await.unwrap();
		let names: Vec<_> = found.dishes.iter().map(|dish| dish.name.as_str()).collect();
		assert_eq!(names, ["Curry rice", "Salad", "Milk"]);

		let listed = engine.list_menus_with_dishes(MenuQuery::default()).await.unwrap();
		assert_eq!(listed, vec![found]);

		let err = engine.get_menu_with_dishes(&menu_id, Some(1)).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::NotFound);
	})
}

#[test]
fn test_resubmitted_dish_is_conflict() {
	with_engine(|engine| async move {
		let menu = engine.create_menu(new_menu("2024-04-08")).await.unwrap();
		let menu_id = menu.id.to_string();

		let dish = engine.create_dish(&menu_id, NewDish::named("Curry rice")).await.unwrap();
		let again = NewDish {
			id: Some(dish.id.to_string()),
			name: dish.name.clone(),
		};

		let err = engine.create_dishes(&menu_id, vec![NewDish::named("Salad"), again]).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Conflict);
		assert_eq!(err.message(), format!("Duplicate entry '{}' for key 'dishes.PRIMARY'", dish.id));

		assert_eq!(engine.list_dishes_by_menu(&menu_id).await.unwrap(), vec![dish]);
	})
}

#[test]
fn test_catalog() {
	with_engine(|engine| async move {
		let city = engine
			.create_city(NewCity {
				city_code: 131016,
				prefecture_code: 13,
				city_name: "Chiyoda".to_string(),
				prefecture_name: "Tokyo".to_string(),
				school_lunch_info_available: true,
			})
			.await
			.unwrap();
		assert_eq!(engine.get_city(131016).await.unwrap(), city);

		let menu = engine.create_menu(new_menu("2024-04-08")).await.unwrap();
		let dish = engine.create_dish(&menu.id.to_string(), NewDish::named("Omelette")).await.unwrap();
		let egg = engine
			.create_allergen(NewAllergen {
				name: "Egg".to_string(),
			})
			.await
			.unwrap();

		let assigned = engine.assign_allergens(&dish.id.to_string(), vec![egg.id.0]).await.unwrap();
		assert_eq!(assigned, vec![egg.clone()]);
		assert_eq!(engine.list_allergens().await.unwrap(), vec![egg]);
	})
}
