// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::{ops::Deref, sync::Arc};

use kondate_core::{
	Allergen, AllergenId, AllergenRepository, City, CityCode, CityFilter, CityRepository, Dish, DishFilter,
	DishRepository, Menu, MenuFilter, MenuRepository, MenuWithDishes,
};
use kondate_type::{
	Deadline, DishId, MenuId, Result, error,
	error::diagnostic::{query::invalid_batch_size, runtime::task_failed},
	return_error,
};
use tokio::task::spawn_blocking;
use tracing::instrument;

use crate::{
	EngineConfig,
	request::{CityQuery, DishQuery, MenuQuery, NewAllergen, NewCity, NewDish, NewMenu},
	validate,
};

/// Use-case entry points over the repositories.
///
/// Every call validates its input, then runs the repository work on the
/// blocking pool under a deadline of `now + query_timeout`.
pub struct Engine(Arc<EngineInner>);

pub struct EngineInner {
	menus: Arc<dyn MenuRepository>,
	dishes: Arc<dyn DishRepository>,
	cities: Arc<dyn CityRepository>,
	allergens: Arc<dyn AllergenRepository>,
	config: EngineConfig,
}

impl Clone for Engine {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl Deref for Engine {
	type Target = EngineInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Engine {
	/// Serves every repository from one store.
	pub fn new<S>(store: S, config: EngineConfig) -> Self
	where
		S: MenuRepository + DishRepository + CityRepository + AllergenRepository + 'static,
	{
		let store = Arc::new(store);
		Self(Arc::new(EngineInner {
			menus: store.clone(),
			dishes: store.clone(),
			cities: store.clone(),
			allergens: store,
			config,
		}))
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	async fn run<T, F>(&self, operation: &'static str, f: F) -> Result<T>
	where
		T: Send + 'static,
		F: FnOnce(Deadline) -> Result<T> + Send + 'static,
	{
		let deadline = Deadline::after(self.config.query_timeout);
		match spawn_blocking(move || f(deadline)).await {
			Ok(result) => result,
			Err(err) => {
				tracing::error!(operation, error = %err, "blocking task failed");
				Err(error!(task_failed(err.to_string())))
			}
		}
	}

	#[instrument(name = "engine::create_menu", level = "debug", skip(self, request))]
	pub async fn create_menu(&self, request: NewMenu) -> Result<Menu> {
		let menu = validate::menu(request)?;
		let menus = self.menus.clone();
		self.run("create menu", move |deadline| {
			menus.create(deadline, &menu)?;
			Ok(menu)
		})
		.await
	}

	#[instrument(name = "engine::list_menus_with_dishes", level = "debug", skip(self))]
	pub async fn list_menus_with_dishes(&self, query: MenuQuery) -> Result<Vec<MenuWithDishes>> {
		let filter = self.menu_filter(&query)?;
		let menus = self.menus.clone();
		self.run("list menus", move |deadline| menus.list_with_dishes(deadline, &filter)).await
	}

	#[instrument(name = "engine::get_menu_with_dishes", level = "debug", skip(self))]
	pub async fn get_menu_with_dishes(&self, id: &str, city_code: Option<i32>) -> Result<MenuWithDishes> {
		let id = MenuId::parse(id)?;
		let filter = MenuFilter {
			city_code: city_code.map(CityCode),
			..MenuFilter::default()
		};
		let menus = self.menus.clone();
		self.run("get menu", move |deadline| menus.get_with_dishes(deadline, id, &filter)).await
	}

	#[instrument(name = "engine::list_dishes_by_menu", level = "debug", skip(self))]
	pub async fn list_dishes_by_menu(&self, menu_id: &str) -> Result<Vec<Dish>> {
		let menu_id = MenuId::parse(menu_id)?;
		let dishes = self.dishes.clone();
		self.run("list dishes by menu", move |deadline| dishes.list_by_menu(deadline, menu_id)).await
	}

	#[instrument(name = "engine::create_dish", level = "debug", skip(self, request))]
	pub async fn create_dish(&self, menu_id: &str, request: NewDish) -> Result<Dish> {
		let menu_id = MenuId::parse(menu_id)?;
		let dish = validate::dish(request)?;
		let dishes = self.dishes.clone();
		self.run("create dish", move |deadline| {
			dishes.create_dish(deadline, menu_id, &dish)?;
			Ok(dish)
		})
		.await
	}

	#[instrument(name = "engine::create_dishes", level = "debug", skip(self, requests), fields(count = requests.len()))]
	pub async fn create_dishes(&self, menu_id: &str, requests: Vec<NewDish>) -> Result<Vec<Dish>> {
		let menu_id = MenuId::parse(menu_id)?;
		validate::batch_size(requests.len(), &self.config)?;
		let batch = requests.into_iter().map(validate::dish).collect::<Result<Vec<_>>>()?;

		let dishes = self.dishes.clone();
		self.run("create dishes", move |deadline| {
			dishes.create_dishes(deadline, menu_id, &batch)?;
			Ok(batch)
		})
		.await
	}

	#[instrument(name = "engine::list_dishes", level = "debug", skip(self))]
	pub async fn list_dishes(&self, query: DishQuery) -> Result<Vec<Dish>> {
		let filter = DishFilter {
			name_prefix: query.name_prefix.map(|prefix| prefix.trim().to_string()).filter(|prefix| !prefix.is_empty()),
			page: validate::page(query.limit, query.offset, &self.config)?,
		};
		let dishes = self.dishes.clone();
		self.run("list dishes", move |deadline| dishes.list(deadline, &filter)).await
	}

	#[instrument(name = "engine::get_dish", level = "debug", skip(self))]
	pub async fn get_dish(&self, id: &str) -> Result<Dish> {
		let id = DishId::parse(id)?;
		let dishes = self.dishes.clone();
		self.run("get dish", move |deadline| dishes.get(deadline, id)).await
	}

	#[instrument(name = "engine::list_allergens_by_dish", level = "debug", skip(self))]
	pub async fn list_allergens_by_dish(&self, dish_id: &str) -> Result<Vec<Allergen>> {
		let dish_id = DishId::parse(dish_id)?;
		let allergens = self.allergens.clone();
		self.run("list allergens by dish", move |deadline| allergens.list_by_dish(deadline, dish_id)).await
	}

	/// Replaces the allergens of a dish and returns the new set.
	#[instrument(name = "engine::assign_allergens", level = "debug", skip(self, allergen_ids))]
	pub async fn assign_allergens(&self, dish_id: &str, allergen_ids: Vec<i64>) -> Result<Vec<Allergen>> {
		let dish_id = DishId::parse(dish_id)?;
		// an empty list clears the set
		if allergen_ids.len() > self.config.max_batch_size {
			return_error!(invalid_batch_size(allergen_ids.len(), self.config.max_batch_size));
		}
		let allergen_ids: Vec<_> = allergen_ids.into_iter().map(AllergenId).collect();

		let allergens = self.allergens.clone();
		self.run("assign allergens", move |deadline| {
			allergens.assign_allergens(deadline, dish_id, &allergen_ids)?;
			allergens.list_by_dish(deadline, dish_id)
		})
		.await
	}

	#[instrument(name = "engine::list_allergens", level = "debug", skip(self))]
	pub async fn list_allergens(&self) -> Result<Vec<Allergen>> {
		let allergens = self.allergens.clone();
		self.run("list allergens", move |deadline| allergens.list(deadline)).await
	}

	#[instrument(name = "engine::create_allergen", level = "debug", skip(self, request))]
	pub async fn create_allergen(&self, request: NewAllergen) -> Result<Allergen> {
		let name = validate::name("name", &request.name)?;
		let allergens = self.allergens.clone();
		self.run("create allergen", move |deadline| allergens.create(deadline, &name)).await
	}

	#[instrument(name = "engine::list_cities", level = "debug", skip(self))]
	pub async fn list_cities(&self, query: CityQuery) -> Result<Vec<City>> {
		let filter = CityFilter {
			prefecture_code: query.prefecture_code,
			school_lunch_info_available: query.available,
			page: validate::page(query.limit, query.offset, &self.config)?,
		};
		let cities = self.cities.clone();
		self.run("list cities", move |deadline| cities.list(deadline, &filter)).await
	}

	#[instrument(name = "engine::get_city", level = "debug", skip(self))]
	pub async fn get_city(&self, code: i32) -> Result<City> {
		let cities = self.cities.clone();
		self.run("get city", move |deadline| cities.get(deadline, CityCode(code))).await
	}

	#[instrument(name = "engine::create_city", level = "debug", skip(self, request))]
	pub async fn create_city(&self, request: NewCity) -> Result<City> {
		let city = validate::city(request)?;
		let cities = self.cities.clone();
		self.run("create city", move |deadline| {
			cities.create(deadline, &city)?;
			Ok(city)
		})
		.await
	}

	fn menu_filter(&self, query: &MenuQuery) -> Result<MenuFilter> {
		let (from, until) = validate::range(query.offered_from.as_deref(), query.offered_until.as_deref())?;
		let page = validate::page(query.limit, query.offset, &self.config)?;

		let mut filter = MenuFilter::default().with_range(from, until).with_page(page);
		if let Some(code) = query.city_code {
			filter = filter.with_city(CityCode(code));
		}
		Ok(filter)
	}
}
