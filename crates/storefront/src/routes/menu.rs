//! Menu route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::{MenuFilter, MenuItem, PriceBand};
use crate::filters;
use crate::state::AppState;

/// Menu item display data for templates.
#[derive(Clone)]
pub struct MenuItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: String,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.as_i64(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.fixed2(),
            category: item.category.clone(),
            image: item.image.clone(),
        }
    }
}

/// Menu filter query parameters.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/index.html")]
pub struct MenuIndexTemplate {
    pub items: Vec<MenuItemView>,
    pub categories: Vec<String>,
    pub search_value: String,
    pub category_value: String,
    pub price_value: String,
    pub cart_count: u32,
}

/// Display the menu, filtered by the query parameters.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> MenuIndexTemplate {
    let search_value = query.search.unwrap_or_default();
    let category_value = query.category.unwrap_or_default();
    let price_value = query.price.unwrap_or_default();

    let filter = MenuFilter {
        search: match search_value.trim() {
            "" => None,
            s => Some(s.to_owned()),
        },
        category: match category_value.as_str() {
            "" | "all" => None,
            c => Some(c.to_owned()),
        },
        price: PriceBand::parse(&price_value),
    };

    let items = state
        .catalog()
        .filter(&filter)
        .into_iter()
        .map(MenuItemView::from)
        .collect();
    let categories = state
        .catalog()
        .categories()
        .into_iter()
        .map(str::to_owned)
        .collect();
    let cart_count = state.cart().lock().await.item_count();

    MenuIndexTemplate {
        items,
        categories,
        search_value,
        category_value,
        price_value,
        cart_count,
    }
}
