// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! HTTP endpoint handlers.
//!
//! Reads are open. Writes pass through [`AppState::authorize`] first.

use axum::{
	Json,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::{HeaderMap, StatusCode},
	response::IntoResponse,
};
use kondate_core::{Allergen, City, Dish, Menu, MenuWithDishes};
use kondate_engine::request::{CityQuery, DishQuery, MenuQuery, NewAllergen, NewCity, NewDish, NewMenu};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
}

/// Body of `POST /v1/menus/{id}/dishes`: one dish, or a batch under
/// `"dishes"` that commits all or nothing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DishPayload {
	Batch {
		dishes: Vec<NewDish>,
	},
	Single(NewDish),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DishBatch {
	pub dishes: Vec<Dish>,
}

#[derive(Debug, Deserialize)]
pub struct AllergenAssignment {
	pub allergen_ids: Vec<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CityScope {
	pub city_code: Option<i32>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
	payload.map(|Json(value)| value).map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn query<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
	params.map(|Query(value)| value).map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn path<T>(segment: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
	segment.map(|Path(value)| value).map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Returns 200 OK while the server is running.
pub async fn health() -> impl IntoResponse {
	(StatusCode::OK, Json(HealthResponse {
		status: "ok",
	}))
}

pub async fn list_menus(
	State(state): State<AppState>,
	params: Result<Query<MenuQuery>, QueryRejection>,
) -> Result<Json<Vec<MenuWithDishes>>, AppError> {
	let menus = state.engine().list_menus_with_dishes(query(params)?).await?;
	Ok(Json(menus))
}

pub async fn create_menu(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<NewMenu>, JsonRejection>,
) -> Result<(StatusCode, Json<Menu>), AppError> {
	state.authorize(&headers)?;
	let menu = state.engine().create_menu(body(payload)?).await?;
	Ok((StatusCode::CREATED, Json(menu)))
}

pub async fn get_menu(
	State(state): State<AppState>,
	id: Result<Path<String>, PathRejection>,
	params: Result<Query<CityScope>, QueryRejection>,
) -> Result<Json<MenuWithDishes>, AppError> {
	let id = path(id)?;
	let scope = query(params)?;
	let menu = state.engine().get_menu_with_dishes(&id, scope.city_code).await?;
	Ok(Json(menu))
}

pub async fn list_menu_dishes(
	State(state): State<AppState>,
	id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Dish>>, AppError> {
	let dishes = state.engine().list_dishes_by_menu(&path(id)?).await?;
	Ok(Json(dishes))
}

/// Creates one dish or a batch, depending on the body shape.
///
/// ```json
/// {"name": "Curry rice"}
/// {"dishes": [{"name": "Salad"}, {"id": "01HV...", "name": "Milk"}]}
/// ```
pub async fn create_menu_dishes(
	State(state): State<AppState>,
	headers: HeaderMap,
	id: Result<Path<String>, PathRejection>,
	payload: Result<Json<DishPayload>, JsonRejection>,
) -> Result<axum::response::Response, AppError> {
	state.authorize(&headers)?;
	let menu_id = path(id)?;

	let response = match body(payload)? {
		DishPayload::Single(dish) => {
			let dish = state.engine().create_dish(&menu_id, dish).await?;
			(StatusCode::CREATED, Json(dish)).into_response()
		}
		DishPayload::Batch {
			dishes,
		} => {
			let dishes = state.engine().create_dishes(&menu_id, dishes).await?;
			(StatusCode::CREATED, Json(DishBatch {
				dishes,
			}))
				.into_response()
		}
	};
	Ok(response)
}

pub async fn list_dishes(
	State(state): State<AppState>,
	params: Result<Query<DishQuery>, QueryRejection>,
) -> Result<Json<Vec<Dish>>, AppError> {
	let dishes = state.engine().list_dishes(query(params)?).await?;
	Ok(Json(dishes))
}

pub async fn get_dish(
	State(state): State<AppState>,
	id: Result<Path<String>, PathRejection>,
) -> Result<Json<Dish>, AppError> {
	let dish = state.engine().get_dish(&path(id)?).await?;
	Ok(Json(dish))
}

pub async fn list_dish_allergens(
	State(state): State<AppState>,
	id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Allergen>>, AppError> {
	let allergens = state.engine().list_allergens_by_dish(&path(id)?).await?;
	Ok(Json(allergens))
}

/// Replaces the dish's allergens with `allergen_ids`.
pub async fn assign_dish_allergens(
	State(state): State<AppState>,
	headers: HeaderMap,
	id: Result<Path<String>, PathRejection>,
	payload: Result<Json<AllergenAssignment>, JsonRejection>,
) -> Result<Json<Vec<Allergen>>, AppError> {
	state.authorize(&headers)?;
	let dish_id = path(id)?;
	let assignment = body(payload)?;
	let allergens = state.engine().assign_allergens(&dish_id, assignment.allergen_ids).await?;
	Ok(Json(allergens))
}

pub async fn list_allergens(State(state): State<AppState>) -> Result<Json<Vec<Allergen>>, AppError> {
	let allergens = state.engine().list_allergens().await?;
	Ok(Json(allergens))
}

pub async fn create_allergen(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<NewAllergen>, JsonRejection>,
) -> Result<(StatusCode, Json<Allergen>), AppError> {
	state.authorize(&headers)?;
	let allergen = state.engine().create_allergen(body(payload)?).await?;
	Ok((StatusCode::CREATED, Json(allergen)))
}

pub async fn list_cities(
	State(state): State<AppState>,
	params: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<Vec<City>>, AppError> {
	let cities = state.engine().list_cities(query(params)?).await?;
	Ok(Json(cities))
}

pub async fn get_city(
	State(state): State<AppState>,
	code: Result<Path<i32>, PathRejection>,
) -> Result<Json<City>, AppError> {
	let city = state.engine().get_city(path(code)?).await?;
	Ok(Json(city))
}

pub async fn create_city(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<NewCity>, JsonRejection>,
) -> Result<(StatusCode, Json<City>), AppError> {
	state.authorize(&headers)?;
	let city = state.engine().create_city(body(payload)?).await?;
	Ok((StatusCode::CREATED, Json(city)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_single_dish_payload() {
		let payload: DishPayload = serde_json::from_str(r#"{"name": "Curry rice"}"#).unwrap();
		assert!(matches!(payload, DishPayload::Single(dish) if dish.name == "Curry rice" && dish.id.is_none()));
	}

	#[test]
	fn test_batch_dish_payload() {
		let payload: DishPayload = serde_json::from_str(r#"{"dishes": [{"name": "Salad"}, {"name": "Milk"}]}"#).unwrap();
		assert!(matches!(payload, DishPayload::Batch { dishes } if dishes.len() == 2));
	}

	#[test]
	fn test_empty_batch_payload_is_a_batch() {
		let payload: DishPayload = serde_json::from_str(r#"{"dishes": []}"#).unwrap();
		assert!(matches!(payload, DishPayload::Batch { dishes } if dishes.is_empty()));
	}
}
