// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use axum::{Router, routing::get};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::HttpConfig, handlers, state::AppState};

pub fn router(state: AppState, config: &HttpConfig) -> Router {
	Router::new()
		.route("/health", get(handlers::health))
		.route("/v1/menus", get(handlers::list_menus).post(handlers::create_menu))
		.route("/v1/menus/{id}", get(handlers::get_menu))
		.route("/v1/menus/{id}/dishes", get(handlers::list_menu_dishes).post(handlers::create_menu_dishes))
		.route("/v1/dishes", get(handlers::list_dishes))
		.route("/v1/dishes/{id}", get(handlers::get_dish))
		.route(
			"/v1/dishes/{id}/allergens",
			get(handlers::list_dish_allergens).put(handlers::assign_dish_allergens),
		)
		.route("/v1/allergens", get(handlers::list_allergens).post(handlers::create_allergen))
		.route("/v1/cities", get(handlers::list_cities).post(handlers::create_city))
		.route("/v1/cities/{code}", get(handlers::get_city))
		.layer(TimeoutLayer::new(config.request_timeout))
		.layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}
