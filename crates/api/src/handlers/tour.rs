//! Handlers for tours: admin pages, multipart create / update, flag
//! toggles, priority, soft delete and single-image removal.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use voyago_core::error::CoreError;
use voyago_core::media_list::remove_exact;
use voyago_core::normalize::parse_integer;
use voyago_core::tour::{parse_contact, parse_itinerary, parse_payment_details, parse_priority, Contact};
use voyago_core::trip_time::parse_trip_time;
use voyago_core::types::DbId;
use voyago_db::models::category::Category;
use voyago_db::models::tour::{CreateTour, Tour, TourFlag, UpdateTour};

use super::{existing_category_id, required_image_url};
use crate::error::{AppError, AppResult};
use crate::form::{FormBody, FormData, MAX_TOUR_IMAGES};
use crate::middleware::auth::{AdminPage, AdminSession};
use crate::path::Path;
use crate::query::{require_id, IdQuery, ImageUrlQuery};
use crate::response::{ApiResponse, ViewModel};
use crate::state::AppState;
use crate::uploads::{append_images, upload_images};

const REQUIRED_FIELDS_MESSAGE: &str = "Title, tour place and price are required";

#[derive(Debug, Serialize)]
pub struct ToursView {
    pub tours: Vec<Tour>,
}

#[derive(Debug, Serialize)]
pub struct TourFormView {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct TourEditView {
    pub tour: Tour,
    pub categories: Vec<Category>,
}

/// Body of `PUT /admin/tours/{id}/priority`. The value is checked by
/// [`parse_priority`].
#[derive(Debug, Deserialize)]
pub struct PriorityRequest {
    #[serde(default)]
    pub priority: Value,
}

/// Optional body of `PUT /admin/tours/{id}/status`.
#[derive(Debug, Default, Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    pub status: Option<Value>,
}

async fn find_tour(state: &AppState, id: DbId) -> AppResult<Tour> {
    state
        .repos
        .tours
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id).into())
}

/// `contact` as one serialized object, or as separate `whatsapp` / `email`
/// fields layered over `base`.
fn contact_from(form: &FormData, base: Contact) -> Option<Contact> {
    if let Some(raw) = form.text("contact") {
        return Some(parse_contact(&raw));
    }
    if !form.contains("whatsapp") && !form.contains("email") {
        return None;
    }
    Some(Contact {
        whatsapp: form.text("whatsapp").unwrap_or(base.whatsapp),
        email: form.text("email").unwrap_or(base.email),
    })
}

/// `groupSize` must be a whole number when given.
fn group_size_from(form: &FormData) -> Result<Option<i32>, CoreError> {
    form.non_blank("groupSize")
        .map(|raw| parse_integer("groupSize", &raw))
        .transpose()
}

fn status_from(value: &Value) -> Result<bool, CoreError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => super::parse_flag("status", s),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(CoreError::Validation("Invalid status value".to_string())),
        },
        _ => Err(CoreError::Validation("Invalid status value".to_string())),
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /admin/addtour
pub async fn add_tour_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
) -> AppResult<ViewModel<TourFormView>> {
    let categories = state.repos.categories.list_active().await?;
    Ok(ViewModel::new("admin/addtour", TourFormView { categories }))
}

/// GET /admin/alltour
pub async fn all_tours_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
) -> AppResult<ViewModel<ToursView>> {
    let tours = state.repos.tours.list().await?;
    Ok(ViewModel::new("admin/Alltours", ToursView { tours }))
}

/// GET /admin/tours?id=
///
/// The edit form works in 24-hour time, so `tripTime` is converted back.
pub async fn edit_tour_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<ViewModel<TourEditView>> {
    let id = require_id(query.id.as_deref(), "Tour ID is required")?;
    let mut tour = find_tour(&state, id).await?;
    tour.trip_time = tour.trip_time.map(|t| t.to_24_hour());

    let categories = state.repos.categories.list_active().await?;
    Ok(ViewModel::new(
        "admin/edit-tour-page",
        TourEditView { tour, categories },
    ))
}

// ---------------------------------------------------------------------------
// Create / update
// ---------------------------------------------------------------------------

/// POST /admin/tours
pub async fn create_tour(
    session: AdminSession,
    State(state): State<AppState>,
    mut form: FormData,
) -> AppResult<(StatusCode, Json<ApiResponse<Tour>>)> {
    let files = form.take_images(MAX_TOUR_IMAGES)?;

    let (Some(title), Some(tour_place), Some(price)) = (
        form.non_blank("title"),
        form.non_blank("tourPlace"),
        form.non_blank("price"),
    ) else {
        return Err(CoreError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()).into());
    };

    let group_size = group_size_from(&form)?;
    let itinerary = parse_itinerary(&form.text("itinerary").unwrap_or_default())?;
    let trip_time = form
        .non_blank("tripTime")
        .map(|raw| parse_trip_time(&raw))
        .transpose()?;
    let category_id = match form.non_blank("categoryId") {
        Some(raw) => Some(existing_category_id(&state, &raw).await?),
        None => None,
    };

    let images = upload_images(&state, &files).await?;
    let input = CreateTour {
        category_id,
        title,
        subtitle: form.text("subtitle").unwrap_or_default(),
        tour_place,
        duration: form.text("duration").unwrap_or_default(),
        group_size,
        people_type: form.list("peopleType"),
        price,
        addons: form.text("addons").unwrap_or_default(),
        kids_policy: form.text("kidsPolicy").unwrap_or_default(),
        airport: form.text("airport").unwrap_or_default(),
        flight_suggestion: form.text("flightSuggestion").unwrap_or_default(),
        why_travel_with_us: form.list("whyTravelWithUs"),
        trip_overview: form.text("tripOverview").unwrap_or_default(),
        itinerary,
        included: form.list("included"),
        not_included: form.list("notIncluded"),
        payment_details: parse_payment_details(&form.text("paymentDetails").unwrap_or_default()),
        contact: contact_from(&form, Contact::default()).unwrap_or_default(),
        trip_time,
        images,
    };

    let tour = state.repos.tours.create(&input).await?;
    tracing::info!(
        tour_id = tour.id,
        images = tour.images.len(),
        admin_id = session.admin_id,
        "Tour created"
    );
    Ok(ApiResponse::created("Tour added successfully", tour))
}

/// PUT /admin/tours/{id}
///
/// Absent fields are left alone; present list fields replace the stored
/// ones after normalization; new images are merged without duplicates.
pub async fn update_tour(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut form: FormData,
) -> AppResult<ApiResponse<Tour>> {
    let files = form.take_images(MAX_TOUR_IMAGES)?;
    let existing = find_tour(&state, id).await?;

    let list_if_present = |name: &str| form.contains(name).then(|| form.list(name));

    let group_size = group_size_from(&form)?;
    let itinerary = form
        .text("itinerary")
        .map(|raw| parse_itinerary(&raw))
        .transpose()?;
    let trip_time = form
        .non_blank("tripTime")
        .map(|raw| parse_trip_time(&raw))
        .transpose()?;
    let priority = form
        .text("priority")
        .map(|raw| parse_priority(&Value::String(raw)))
        .transpose()?;
    let category_id = match form.non_blank("categoryId") {
        Some(raw) => Some(existing_category_id(&state, &raw).await?),
        None => None,
    };

    let images = append_images(&state, &existing.images, &files).await?;
    let input = UpdateTour {
        category_id,
        title: form.non_blank("title"),
        subtitle: form.text("subtitle"),
        tour_place: form.non_blank("tourPlace"),
        duration: form.text("duration"),
        group_size,
        people_type: list_if_present("peopleType"),
        price: form.non_blank("price"),
        addons: form.text("addons"),
        kids_policy: form.text("kidsPolicy"),
        airport: form.text("airport"),
        flight_suggestion: form.text("flightSuggestion"),
        why_travel_with_us: list_if_present("whyTravelWithUs"),
        trip_overview: form.text("tripOverview"),
        itinerary,
        included: list_if_present("included"),
        not_included: list_if_present("notIncluded"),
        payment_details: form.text("paymentDetails").map(|raw| parse_payment_details(&raw)),
        contact: contact_from(&form, existing.contact.clone()),
        trip_time,
        images,
        priority,
        is_active: None,
    };

    let tour = state
        .repos
        .tours
        .update(id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;
    tracing::info!(tour_id = id, admin_id = session.admin_id, "Tour updated");
    Ok(ApiResponse::ok("Tour updated successfully", tour))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// PUT /admin/tours/delete/{id}
pub async fn delete_tour(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Tour>> {
    let tour = state
        .repos
        .tours
        .soft_delete(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;
    tracing::info!(tour_id = id, admin_id = session.admin_id, "Tour soft-deleted");
    Ok(ApiResponse::ok("Tour deleted successfully", tour))
}

/// PUT /admin/tours/{id}/status
///
/// With `{"status": bool}` the flag is set; with no status it is flipped.
pub async fn update_status(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<ApiResponse<Tour>> {
    let request: StatusRequest = if body.iter().all(u8::is_ascii_whitespace) {
        StatusRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
    };

    let updated = match request.status.as_ref().filter(|v| !v.is_null()) {
        Some(value) => {
            let input = UpdateTour {
                is_active: Some(status_from(value)?),
                ..Default::default()
            };
            state.repos.tours.update(id, &input).await?
        }
        None => state.repos.tours.toggle(id, TourFlag::Active).await?,
    };
    let tour = updated.ok_or_else(|| CoreError::not_found("Tour", id))?;

    tracing::info!(
        tour_id = id,
        is_active = tour.is_active,
        admin_id = session.admin_id,
        "Tour status updated"
    );
    Ok(ApiResponse::ok("Tour status updated", tour))
}

async fn toggle_flag(
    state: &AppState,
    session: &AdminSession,
    id: DbId,
    flag: TourFlag,
) -> AppResult<Tour> {
    let tour = state
        .repos
        .tours
        .toggle(id, flag)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;
    tracing::info!(
        tour_id = id,
        flag = flag.column(),
        admin_id = session.admin_id,
        "Tour flag toggled"
    );
    Ok(tour)
}

/// PUT /admin/tours/{id}/bestseller
pub async fn toggle_bestseller(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Tour>> {
    let tour = toggle_flag(&state, &session, id, TourFlag::Bestseller).await?;
    Ok(ApiResponse::ok("Bestseller status updated", tour))
}

/// PUT /admin/tours/{id}/offer
pub async fn toggle_offer(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Tour>> {
    let tour = toggle_flag(&state, &session, id, TourFlag::Offer).await?;
    Ok(ApiResponse::ok("Offer status updated", tour))
}

/// PUT /admin/tours/{id}/priority
pub async fn update_priority(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormBody(input): FormBody<PriorityRequest>,
) -> AppResult<ApiResponse<Tour>> {
    let priority = parse_priority(&input.priority)?;
    let update = UpdateTour {
        priority: Some(priority),
        ..Default::default()
    };
    let tour = state
        .repos
        .tours
        .update(id, &update)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;

    tracing::info!(tour_id = id, priority, admin_id = session.admin_id, "Tour priority updated");
    Ok(ApiResponse::ok("Tour priority updated successfully", tour))
}

/// DELETE /admin/tours/{id}/image?imageUrl=
pub async fn delete_tour_image(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ImageUrlQuery>,
) -> AppResult<ApiResponse<Tour>> {
    let image_url = required_image_url(query)?;
    let existing = find_tour(&state, id).await?;
    let images = remove_exact(&existing.images, &image_url)
        .ok_or_else(|| CoreError::not_found("Image", &image_url))?;

    let input = UpdateTour {
        images: Some(images),
        ..Default::default()
    };
    let tour = state
        .repos
        .tours
        .update(id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;
    tracing::info!(tour_id = id, admin_id = session.admin_id, "Tour image removed");
    Ok(ApiResponse::ok("Image deleted successfully", tour))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn status_accepts_bools_strings_and_bits() {
        assert!(status_from(&json!(true)).unwrap());
        assert!(!status_from(&json!("false")).unwrap());
        assert!(status_from(&json!(1)).unwrap());
        assert_matches!(status_from(&json!(7)), Err(CoreError::Validation(_)));
        assert_matches!(status_from(&json!([])), Err(CoreError::Validation(_)));
    }
}
