// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::{sync::Arc, thread, time::Duration};

use kondate_core::{
	Allergen, AllergenId, AllergenRepository, City, CityCode, CityFilter, CityRepository, Dish, DishFilter,
	DishRepository, Menu, MenuFilter, MenuRepository, MenuWithDishes,
};
use kondate_engine::{
	Engine, EngineConfig,
	request::{DishQuery, MenuQuery, NewDish},
};
use kondate_type::{Deadline, DishId, ErrorKind, MenuId, Result, error::diagnostic::runtime::internal, return_error};
use parking_lot::Mutex;

#[derive(Default)]
struct Seen {
	menu_filters: Mutex<Vec<MenuFilter>>,
	dish_batches: Mutex<Vec<Vec<Dish>>>,
}

/// Records what reaches the repositories and optionally stalls or panics.
#[derive(Clone, Default)]
struct Recorder {
	seen: Arc<Seen>,
	stall: Option<Duration>,
	panic: bool,
}

impl Recorder {
	fn behave(&self, deadline: Deadline) -> Result<()> {
		if self.panic {
			panic!("repository exploded");
		}
		if let Some(stall) = self.stall {
			thread::sleep(stall);
		}
		deadline.check("fake")
	}
}

impl MenuRepository for Recorder {
	fn create(&self, deadline: Deadline, _menu: &Menu) -> Result<()> {
		self.behave(deadline)
	}

	fn get_with_dishes(&self, deadline: Deadline, _id: MenuId, _filter: &MenuFilter) -> Result<MenuWithDishes> {
		self.behave(deadline)?;
		return_error!(internal("not stubbed"))
	}

	fn list_with_dishes(&self, deadline: Deadline, filter: &MenuFilter) -> Result<Vec<MenuWithDishes>> {
		self.behave(deadline)?;
		self.seen.menu_filters.lock().push(filter.clone());
		Ok(vec![])
	}

	fn list(&self, deadline: Deadline, _filter: &MenuFilter) -> Result<Vec<Menu>> {
		self.behave(deadline)?;
		Ok(vec![])
	}
}

impl DishRepository for Recorder {
	fn create_dish(&self, deadline: Deadline, _menu_id: MenuId, dish: &Dish) -> Result<()> {
		self.behave(deadline)?;
		self.seen.dish_batches.lock().push(vec![dish.clone()]);
		Ok(())
	}

	fn create_dishes(&self, deadline: Deadline, _menu_id: MenuId, dishes: &[Dish]) -> Result<()> {
		self.behave(deadline)?;
		self.seen.dish_batches.lock().push(dishes.to_vec());
		Ok(())
	}

	fn get(&self, deadline: Deadline, _id: DishId) -> Result<Dish> {
		self.behave(deadline)?;
		return_error!(internal("not stubbed"))
	}

	fn list_by_menu(&self, deadline: Deadline, _menu_id: MenuId) -> Result<Vec<Dish>> {
		self.behave(deadline)?;
		Ok(vec![])
	}

	fn list(&self, deadline: Deadline, _filter: &DishFilter) -> Result<Vec<Dish>> {
		self.behave(deadline)?;
		Ok(vec![])
	}
}

impl CityRepository for Recorder {
	fn create(&self, deadline: Deadline, _city: &City) -> Result<()> {
		self.behave(deadline)
	}

	fn get(&self, deadline: Deadline, _code: CityCode) -> Result<City> {
		self.behave(deadline)?;
		return_error!(internal("not stubbed"))
	}

	fn list(&self, deadline: Deadline, _filter: &CityFilter) -> Result<Vec<City>> {
		self.behave(deadline)?;
		Ok(vec![])
	}
}

impl AllergenRepository for Recorder {
	fn create(&self, deadline: Deadline, name: &str) -> Result<Allergen> {
		self.behave(deadline)?;
		Ok(Allergen {
			id: AllergenId(1),
			name: name.to_string(),
		})
	}

	fn list(&self, deadline: Deadline) -> Result<Vec<Allergen>> {
		self.behave(deadline)?;
		Ok(vec![])
	}

	fn list_by_dish(&self, deadline: Deadline, _dish_id: DishId) -> Result<Vec<Allergen>> {
		self.behave(deadline)?;
		Ok(vec![])
	}

	fn assign_allergens(&self, deadline: Deadline, _dish_id: DishId, _allergen_ids: &[AllergenId]) -> Result<()> {
		self.behave(deadline)
	}
}

fn engine(recorder: Recorder, config: EngineConfig) -> (Engine, Arc<Seen>) {
	let seen = recorder.seen.clone();
	(Engine::new(recorder, config), seen)
}

#[tokio::test]
async fn test_menu_query_becomes_filter() {
	let (engine, seen) = engine(Recorder::default(), EngineConfig::default());

	engine
		.list_menus_with_dishes(MenuQuery {
			offered_from: Some("2024-01-01".to_string()),
			offered_until: Some("2024-01-31".to_string()),
			city_code: Some(131016),
			limit: Some(5),
			offset: Some(5),
		})
		.await
		.unwrap();

	let filters = seen.menu_filters.lock();
	assert_eq!(filters.len(), 1);
	assert_eq!(filters[0].offered_from.unwrap().to_string(), "2024-01-01");
	assert_eq!(filters[0].offered_until.unwrap().to_string(), "2024-01-31");
	assert_eq!(filters[0].city_code, Some(CityCode(131016)));
	assert_eq!((filters[0].page.limit, filters[0].page.offset), (5, 5));
}

#[tokio::test]
async fn test_invalid_query_never_reaches_repository() {
	let (engine, seen) = engine(Recorder::default(), EngineConfig::default());

	let err = engine
		.list_menus_with_dishes(MenuQuery {
			offered_from: Some("2024-02-01".to_string()),
			offered_until: Some("2024-01-01".to_string()),
			..MenuQuery::default()
		})
		.await
		.unwrap_err();
	assert_eq!(err.code(), "VALIDATION_005");

	let err = engine
		.list_dishes(DishQuery {
			limit: Some(1000),
			..DishQuery::default()
		})
		.await
		.unwrap_err();
	assert_eq!(err.code(), "VALIDATION_004");

	let err = engine.get_menu_with_dishes("nope", None).await.unwrap_err();
	assert_eq!(err.code(), "ID_001");

	assert!(seen.menu_filters.lock().is_empty());
}

#[tokio::test]
async fn test_dishes_without_id_get_fresh_ulids() {
	let (engine, seen) = engine(Recorder::default(), EngineConfig::default());
	let menu_id = MenuId::generate().to_string();
	let supplied = DishId::generate();

	let created = engine
		.create_dishes(
			&menu_id,
			vec![
				NewDish::named("Rice"),
				NewDish {
					id: Some(supplied.to_string()),
					name: " Soup ".to_string(),
				},
			],
		)
		.await
		.unwrap();

	assert_eq!(created.len(), 2);
	assert_ne!(created[0].id, supplied);
	assert_eq!(created[1].id, supplied);
	assert_eq!(created[1].name, "Soup");
	assert_eq!(seen.dish_batches.lock().as_slice(), [created]);
}

#[tokio::test]
async fn test_batch_limits() {
	let (engine, seen) = engine(Recorder::default(), EngineConfig::default().max_batch_size(2));
	let menu_id = MenuId::generate().to_string();

	let err = engine.create_dishes(&menu_id, vec![]).await.unwrap_err();
	assert_eq!(err.code(), "VALIDATION_006");

	let batch = vec![NewDish::named("A"), NewDish::named("B"), NewDish::named("C")];
	let err = engine.create_dishes(&menu_id, batch).await.unwrap_err();
	assert_eq!(err.code(), "VALIDATION_006");

	let batch = vec![NewDish::named("A"), NewDish::named("")];
	let err = engine.create_dishes(&menu_id, batch).await.unwrap_err();
	assert_eq!(err.code(), "VALIDATION_001");

	assert!(seen.dish_batches.lock().is_empty());
}

#[tokio::test]
async fn test_slow_repository_times_out() {
	let recorder = Recorder {
		stall: Some(Duration::from_millis(100)),
		..Recorder::default()
	};
	let (engine, _) = engine(recorder, EngineConfig::default().query_timeout(Duration::from_millis(20)));

	let err = engine.list_allergens().await.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_panicking_repository_is_internal() {
	let recorder = Recorder {
		panic: true,
		..Recorder::default()
	};
	let (engine, _) = engine(recorder, EngineConfig::default());

	let err = engine.list_allergens().await.unwrap_err();
	assert_eq!(err.code(), "INTERNAL_002");
	assert_eq!(err.kind(), ErrorKind::Internal);
}
