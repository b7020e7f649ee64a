/// Storefront views
///
/// - `GET /` - Home
/// - `GET /menu` - Full menu
/// - `GET /customize` - Cakes and add-ons for a custom order
/// - `GET /contact` - Store contact details

use crate::{
    app::{store_defaults, AppState},
    error::ApiResult,
};
use axum::{extract::State, Json};
use bakery_shared::{
    catalog::{MenuCategory, MenuItem},
    models::settings::StoreSettings,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub store_name: String,
    pub categories: Vec<String>,
    pub item_count: usize,
    pub addon_count: usize,
}

pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    Json(HomeView {
        store_name: state.config.store.name.clone(),
        categories: state
            .catalog
            .categories()
            .iter()
            .map(|c| c.name.clone())
            .collect(),
        item_count: state.catalog.items().count(),
        addon_count: state.catalog.addons().count(),
    })
}

#[derive(Debug, Serialize)]
pub struct MenuView {
    pub menu_categories: Vec<MenuCategory>,
}

pub async fn menu(State(state): State<AppState>) -> Json<MenuView> {
    Json(MenuView {
        menu_categories: state.catalog.categories().to_vec(),
    })
}

#[derive(Debug, Serialize)]
pub struct CustomizeView {
    /// Items that can serve as the base of a custom order
    pub cakes: Vec<MenuItem>,

    /// Add-ons that modify a cake
    pub addons: Vec<MenuItem>,
}

pub async fn customize(State(state): State<AppState>) -> Json<CustomizeView> {
    let (addons, cakes): (Vec<MenuItem>, Vec<MenuItem>) = state
        .catalog
        .items()
        .cloned()
        .partition(|item| item.is_addon);

    Json(CustomizeView { cakes, addons })
}

/// Contact page. Falls back to the configured details if the settings row
/// has not been seeded.
pub async fn contact(State(state): State<AppState>) -> ApiResult<Json<StoreSettings>> {
    let settings = match StoreSettings::get(&state.db).await? {
        Some(settings) => settings,
        None => {
            let defaults = store_defaults(&state.config.store);
            StoreSettings {
                id: 0,
                store_name: defaults.store_name,
                store_email: defaults.store_email,
                store_phone: defaults.store_phone,
                store_address: defaults.store_address,
            }
        }
    };

    Ok(Json(settings))
}
