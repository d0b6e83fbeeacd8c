use axum::{Router, routing::get};

use crate::modules::contact_details::router::init_contact_details_router;
use crate::modules::contacts::controller::{
    create_contact, delete_contact, get_contact, list_contacts, update_contact,
};
use crate::state::AppState;

/// Mounted under `/users/{user_id}/contacts`.
pub fn init_contacts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route(
            "/{contact_id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .nest("/{contact_id}/details", init_contact_details_router())
}
