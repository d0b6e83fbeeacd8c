use axum::{Router, routing::get};

use crate::modules::contact_details::controller::{
    create_detail, delete_detail, get_detail, list_details, update_detail,
};
use crate::state::AppState;

/// Mounted under `/users/{user_id}/contacts/{contact_id}/details`.
pub fn init_contact_details_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_details).post(create_detail))
        .route(
            "/{detail_id}",
            get(get_detail).put(update_detail).delete(delete_detail),
        )
}
