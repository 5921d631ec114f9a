//! Handlers for ticket offers (admin side).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use voyago_core::error::CoreError;
use voyago_core::normalize::parse_amount;
use voyago_core::types::DbId;
use voyago_db::models::ticket::{CreateTicket, Ticket, UpdateTicket};

use crate::error::AppResult;
use crate::form::{FormData, MAX_IMAGES};
use crate::middleware::auth::{AdminPage, AdminSession};
use crate::path::Path;
use crate::response::{ApiResponse, ViewModel};
use crate::state::AppState;
use crate::uploads::{append_images, upload_images};

#[derive(Debug, Serialize)]
pub struct TicketsView {
    pub tickets: Vec<Ticket>,
}

/// Parse an optional money field.
fn amount(form: &FormData, field: &str) -> Result<Option<f64>, CoreError> {
    form.non_blank(field)
        .map(|raw| parse_amount(field, &raw))
        .transpose()
}

/// `offPercentage` is a non-negative number no greater than 100.
fn percentage(form: &FormData) -> Result<Option<f64>, CoreError> {
    let value = amount(form, "offPercentage")?;
    if value.is_some_and(|v| v > 100.0) {
        return Err(CoreError::Validation(
            "offPercentage must be between 0 and 100".to_string(),
        ));
    }
    Ok(value)
}

/// GET /admin/alltickets
pub async fn all_tickets_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
) -> AppResult<ViewModel<TicketsView>> {
    let tickets = state.repos.tickets.list().await?;
    Ok(ViewModel::new("admin/alltickets", TicketsView { tickets }))
}

/// POST /admin/tickets
///
/// The name may be sent as `name` or `ticketName`.
pub async fn create_ticket(
    session: AdminSession,
    State(state): State<AppState>,
    mut form: FormData,
) -> AppResult<(StatusCode, Json<ApiResponse<Ticket>>)> {
    let files = form.take_images(MAX_IMAGES)?;

    let name = form
        .non_blank("name")
        .or_else(|| form.non_blank("ticketName"))
        .ok_or_else(|| CoreError::Validation("Ticket name is required".to_string()))?;
    let input = CreateTicket {
        name,
        description: form.text("description").unwrap_or_default(),
        offer_price: amount(&form, "offerPrice")?.unwrap_or_default(),
        actual_price: amount(&form, "actualPrice")?.unwrap_or_default(),
        off_percentage: percentage(&form)?.unwrap_or_default(),
        images: upload_images(&state, &files).await?,
    };

    let ticket = state.repos.tickets.create(&input).await?;
    tracing::info!(ticket_id = ticket.id, admin_id = session.admin_id, "Ticket created");
    Ok(ApiResponse::created("Ticket created successfully.", ticket))
}

/// PUT /admin/tickets/{id}
pub async fn update_ticket(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut form: FormData,
) -> AppResult<ApiResponse<Ticket>> {
    let files = form.take_images(MAX_IMAGES)?;
    let existing = state
        .repos
        .tickets
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Ticket", id))?;

    let offer_price = amount(&form, "offerPrice")?;
    let actual_price = amount(&form, "actualPrice")?;
    let off_percentage = percentage(&form)?;

    let input = UpdateTicket {
        name: form
            .non_blank("name")
            .or_else(|| form.non_blank("ticketName")),
        description: form.text("description"),
        offer_price,
        actual_price,
        off_percentage,
        images: append_images(&state, &existing.images, &files).await?,
    };
    let ticket = state
        .repos
        .tickets
        .update(id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Ticket", id))?;
    tracing::info!(ticket_id = id, admin_id = session.admin_id, "Ticket updated");
    Ok(ApiResponse::ok("Ticket updated successfully", ticket))
}

/// DELETE /admin/tickets/{id}
pub async fn delete_ticket(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Ticket>> {
    let ticket = state
        .repos
        .tickets
        .delete(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Ticket", id))?;
    tracing::info!(ticket_id = id, admin_id = session.admin_id, "Ticket deleted");
    Ok(ApiResponse::ok("Ticket deleted successfully", ticket))
}
