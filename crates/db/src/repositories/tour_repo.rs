//! Repository for the `tours` table.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use voyago_core::types::DbId;

use crate::error::StoreResult;
use crate::models::tour::{CreateTour, Tour, TourFlag, UpdateTour};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, title, subtitle, tour_place, duration, group_size, \
                       people_type, price, addons, kids_policy, airport, flight_suggestion, \
                       why_travel_with_us, trip_overview, itinerary, included, not_included, \
                       payment_details, contact, trip_time, images, is_bestseller, is_offer, \
                       priority, is_active, created_at, updated_at";

/// Listing order for visitor-facing tour lists.
const PUBLIC_ORDER: &str = "ORDER BY priority ASC, created_at DESC, id DESC";

#[async_trait]
pub trait TourRepo: Send + Sync {
    async fn create(&self, input: &CreateTour) -> StoreResult<Tour>;

    /// Find a tour by id, active or not.
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Tour>>;

    /// All tours, newest first.
    async fn list(&self) -> StoreResult<Vec<Tour>>;

    /// Active tours, priority ascending then newest.
    async fn list_active(&self) -> StoreResult<Vec<Tour>>;

    /// One page of a category's active tours, in public order.
    async fn list_active_by_category(
        &self,
        category_id: DbId,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Tour>>;

    async fn count_active_by_category(&self, category_id: DbId) -> StoreResult<i64>;

    /// Active tours whose title contains `term`, case-insensitively.
    async fn search_active(&self, term: &str) -> StoreResult<Vec<Tour>>;

    /// Apply the non-`None` fields. Returns `None` if the row does not exist.
    async fn update(&self, id: DbId, input: &UpdateTour) -> StoreResult<Option<Tour>>;

    /// Flip one boolean column in a single statement.
    async fn toggle(&self, id: DbId, flag: TourFlag) -> StoreResult<Option<Tour>>;

    /// Mark a tour inactive, returning the updated row.
    async fn soft_delete(&self, id: DbId) -> StoreResult<Option<Tour>>;

    async fn count(&self) -> StoreResult<i64>;
}

/// Escape `LIKE` wildcards so a search term is matched literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// PostgreSQL-backed [`TourRepo`].
pub struct PgTourRepo {
    pool: PgPool,
}

impl PgTourRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourRepo for PgTourRepo {
    async fn create(&self, input: &CreateTour) -> StoreResult<Tour> {
        let query = format!(
            "INSERT INTO tours (
                category_id, title, subtitle, tour_place, duration, group_size, people_type,
                price, addons, kids_policy, airport, flight_suggestion, why_travel_with_us,
                trip_overview, itinerary, included, not_included, payment_details, contact,
                trip_time, images)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                     $16, $17, $18, $19, $20, $21)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Tour>(&query)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.tour_place)
            .bind(&input.duration)
            .bind(input.group_size)
            .bind(&input.people_type)
            .bind(&input.price)
            .bind(&input.addons)
            .bind(&input.kids_policy)
            .bind(&input.airport)
            .bind(&input.flight_suggestion)
            .bind(&input.why_travel_with_us)
            .bind(&input.trip_overview)
            .bind(Json(&input.itinerary))
            .bind(&input.included)
            .bind(&input.not_included)
            .bind(Json(&input.payment_details))
            .bind(Json(&input.contact))
            .bind(Json(&input.trip_time))
            .bind(&input.images)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Tour>> {
        let query = format!("SELECT {COLUMNS} FROM tours WHERE id = $1");
        let row = sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> StoreResult<Vec<Tour>> {
        let query = format!("SELECT {COLUMNS} FROM tours ORDER BY created_at DESC, id DESC");
        Ok(sqlx::query_as::<_, Tour>(&query).fetch_all(&self.pool).await?)
    }

    async fn list_active(&self) -> StoreResult<Vec<Tour>> {
        let query = format!("SELECT {COLUMNS} FROM tours WHERE is_active = true {PUBLIC_ORDER}");
        Ok(sqlx::query_as::<_, Tour>(&query).fetch_all(&self.pool).await?)
    }

    async fn list_active_by_category(
        &self,
        category_id: DbId,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Tour>> {
        let query = format!(
            "SELECT {COLUMNS} FROM tours
             WHERE is_active = true AND category_id = $1
             {PUBLIC_ORDER}
             LIMIT $2 OFFSET $3"
        );
        Ok(sqlx::query_as::<_, Tour>(&query)
            .bind(category_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn count_active_by_category(&self, category_id: DbId) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tours WHERE is_active = true AND category_id = $1",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn search_active(&self, term: &str) -> StoreResult<Vec<Tour>> {
        let query = format!(
            "SELECT {COLUMNS} FROM tours
             WHERE is_active = true AND title ILIKE '%' || $1 || '%'
             {PUBLIC_ORDER}"
        );
        Ok(sqlx::query_as::<_, Tour>(&query)
            .bind(escape_like(term))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update(&self, id: DbId, input: &UpdateTour) -> StoreResult<Option<Tour>> {
        let query = format!(
            "UPDATE tours SET
                category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                subtitle = COALESCE($4, subtitle),
                tour_place = COALESCE($5, tour_place),
                duration = COALESCE($6, duration),
                group_size = COALESCE($7, group_size),
                people_type = COALESCE($8, people_type),
                price = COALESCE($9, price),
                addons = COALESCE($10, addons),
                kids_policy = COALESCE($11, kids_policy),
                airport = COALESCE($12, airport),
                flight_suggestion = COALESCE($13, flight_suggestion),
                why_travel_with_us = COALESCE($14, why_travel_with_us),
                trip_overview = COALESCE($15, trip_overview),
                itinerary = COALESCE($16, itinerary),
                included = COALESCE($17, included),
                not_included = COALESCE($18, not_included),
                payment_details = COALESCE($19, payment_details),
                contact = COALESCE($20, contact),
                trip_time = COALESCE($21, trip_time),
                images = COALESCE($22, images),
                priority = COALESCE($23, priority),
                is_active = COALESCE($24, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.tour_place)
            .bind(&input.duration)
            .bind(input.group_size)
            .bind(&input.people_type)
            .bind(&input.price)
            .bind(&input.addons)
            .bind(&input.kids_policy)
            .bind(&input.airport)
            .bind(&input.flight_suggestion)
            .bind(&input.why_travel_with_us)
            .bind(&input.trip_overview)
            .bind(input.itinerary.as_ref().map(Json))
            .bind(&input.included)
            .bind(&input.not_included)
            .bind(input.payment_details.as_ref().map(Json))
            .bind(input.contact.as_ref().map(Json))
            .bind(input.trip_time.as_ref().map(Json))
            .bind(&input.images)
            .bind(input.priority)
            .bind(input.is_active)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn toggle(&self, id: DbId, flag: TourFlag) -> StoreResult<Option<Tour>> {
        let column = flag.column();
        let query =
            format!("UPDATE tours SET {column} = NOT {column} WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn soft_delete(&self, id: DbId) -> StoreResult<Option<Tour>> {
        let query = format!("UPDATE tours SET is_active = false WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tours")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
