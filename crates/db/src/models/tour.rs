//! Tour entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use voyago_core::tour::{Contact, ItineraryDay, PaymentDetails};
use voyago_core::trip_time::TripTime;
use voyago_core::types::{DbId, Timestamp};

/// A row from the `tours` table.
///
/// Structured fields live in JSONB columns; `trip_time` is stored as JSON
/// `null` when unset.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub title: String,
    pub subtitle: String,
    pub tour_place: String,
    pub duration: String,
    pub group_size: Option<i32>,
    pub people_type: Vec<String>,
    pub price: String,
    pub addons: String,
    pub kids_policy: String,
    pub airport: String,
    pub flight_suggestion: String,
    pub why_travel_with_us: Vec<String>,
    pub trip_overview: String,
    #[sqlx(json)]
    pub itinerary: Vec<ItineraryDay>,
    pub included: Vec<String>,
    pub not_included: Vec<String>,
    #[sqlx(json)]
    pub payment_details: PaymentDetails,
    #[sqlx(json)]
    pub contact: Contact,
    #[sqlx(json)]
    pub trip_time: Option<TripTime>,
    pub images: Vec<String>,
    pub is_bestseller: bool,
    pub is_offer: bool,
    pub priority: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tour.
#[derive(Debug, Clone, Default)]
pub struct CreateTour {
    pub category_id: Option<DbId>,
    pub title: String,
    pub subtitle: String,
    pub tour_place: String,
    pub duration: String,
    pub group_size: Option<i32>,
    pub people_type: Vec<String>,
    pub price: String,
    pub addons: String,
    pub kids_policy: String,
    pub airport: String,
    pub flight_suggestion: String,
    pub why_travel_with_us: Vec<String>,
    pub trip_overview: String,
    pub itinerary: Vec<ItineraryDay>,
    pub included: Vec<String>,
    pub not_included: Vec<String>,
    pub payment_details: PaymentDetails,
    pub contact: Contact,
    pub trip_time: Option<TripTime>,
    pub images: Vec<String>,
}

/// DTO for updating a tour. All fields are optional; present list fields
/// replace the stored list.
#[derive(Debug, Clone, Default)]
pub struct UpdateTour {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub tour_place: Option<String>,
    pub duration: Option<String>,
    pub group_size: Option<i32>,
    pub people_type: Option<Vec<String>>,
    pub price: Option<String>,
    pub addons: Option<String>,
    pub kids_policy: Option<String>,
    pub airport: Option<String>,
    pub flight_suggestion: Option<String>,
    pub why_travel_with_us: Option<Vec<String>>,
    pub trip_overview: Option<String>,
    pub itinerary: Option<Vec<ItineraryDay>>,
    pub included: Option<Vec<String>>,
    pub not_included: Option<Vec<String>>,
    pub payment_details: Option<PaymentDetails>,
    pub contact: Option<Contact>,
    pub trip_time: Option<TripTime>,
    pub images: Option<Vec<String>>,
    pub priority: Option<i32>,
    pub is_active: Option<bool>,
}

/// Boolean tour columns that can be flipped in one atomic statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourFlag {
    Active,
    Bestseller,
    Offer,
}

impl TourFlag {
    pub fn column(self) -> &'static str {
        match self {
            TourFlag::Active => "is_active",
            TourFlag::Bestseller => "is_bestseller",
            TourFlag::Offer => "is_offer",
        }
    }
}
