//! In-process implementation of every repository trait.
//!
//! Enforces the same constraints the Postgres schema does (unique category
//! names and usernames, category references from packages and tours) so
//! handler behaviour is identical against either backend. Used by the HTTP
//! test-suite and as the fallback store when no database is configured.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use voyago_core::password::HashedPassword;
use voyago_core::types::DbId;

use crate::error::{StoreError, StoreResult};
use crate::models::admin::{Admin, CreateAdmin, ADMIN_STATUS_ACTIVE};
use crate::models::blog::{Blog, CreateBlog, UpdateBlog};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::package::{CreatePackage, Package, PackageWithCategory, UpdatePackage};
use crate::models::ticket::{CreateTicket, Ticket, UpdateTicket};
use crate::models::tour::{CreateTour, Tour, TourFlag, UpdateTour};
use crate::repositories::{AdminRepo, BlogRepo, CategoryRepo, PackageRepo, TicketRepo, TourRepo};

#[derive(Default)]
struct Tables {
    next_id: DbId,
    categories: Vec<Category>,
    packages: Vec<Package>,
    tours: Vec<Tour>,
    blogs: Vec<Blog>,
    tickets: Vec<Ticket>,
    admins: Vec<Admin>,
}

impl Tables {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn category_exists(&self, id: DbId) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    fn require_category(&self, id: DbId, constraint: &str) -> StoreResult<()> {
        if self.category_exists(id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation {
                constraint: constraint.to_string(),
            })
        }
    }
}

/// Shared in-memory tables. Clone the surrounding `Arc` to hand the same
/// store to every repository slot.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn unique_violation(constraint: &str) -> StoreError {
    StoreError::UniqueViolation {
        constraint: constraint.to_string(),
    }
}

/// Newest first, ties broken by id so insertion order is stable.
fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, DbId)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn public_tour_order(tours: &mut [Tour]) {
    tours.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(b.created_at.cmp(&a.created_at))
            .then(b.id.cmp(&a.id))
    });
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[async_trait]
impl CategoryRepo for MemoryStore {
    async fn create(&self, input: &CreateCategory) -> StoreResult<Category> {
        let mut tables = self.lock();
        if tables.categories.iter().any(|c| c.name == input.name) {
            return Err(unique_violation("uq_categories_name"));
        }
        let now = Utc::now();
        let category = Category {
            id: tables.allocate_id(),
            name: input.name.clone(),
            slug: input.slug.clone(),
            description: input.description.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Category>> {
        let mut rows = self.lock().categories.clone();
        newest_first(&mut rows, |c| (c.created_at, c.id));
        Ok(rows)
    }

    async fn list_active(&self) -> StoreResult<Vec<Category>> {
        let mut rows: Vec<Category> = self
            .lock()
            .categories
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn update(&self, id: DbId, input: &UpdateCategory) -> StoreResult<Option<Category>> {
        let mut tables = self.lock();
        if let Some(name) = &input.name {
            if tables.categories.iter().any(|c| c.id != id && &c.name == name) {
                return Err(unique_violation("uq_categories_name"));
            }
        }
        let Some(category) = tables.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            category.name = name.clone();
        }
        if let Some(slug) = &input.slug {
            category.slug = slug.clone();
        }
        if let Some(description) = &input.description {
            category.description = description.clone();
        }
        category.updated_at = Utc::now();
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Category>> {
        let mut tables = self.lock();
        if tables.packages.iter().any(|p| p.category_id == id) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "fk_packages_category".to_string(),
            });
        }
        if tables.tours.iter().any(|t| t.category_id == Some(id)) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "fk_tours_category".to_string(),
            });
        }
        let Some(pos) = tables.categories.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        Ok(Some(tables.categories.remove(pos)))
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.lock().categories.len() as i64)
    }
}

// ---------------------------------------------------------------------------
// Packages
// ---------------------------------------------------------------------------

#[async_trait]
impl PackageRepo for MemoryStore {
    async fn create(&self, input: &CreatePackage) -> StoreResult<Package> {
        let mut tables = self.lock();
        tables.require_category(input.category_id, "fk_packages_category")?;
        let now = Utc::now();
        let package = Package {
            id: tables.allocate_id(),
            category_id: input.category_id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            currency: input.currency.clone(),
            features: input.features.clone(),
            images: input.images.clone(),
            videos: input.videos.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.packages.push(package.clone());
        Ok(package)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Package>> {
        Ok(self.lock().packages.iter().find(|p| p.id == id).cloned())
    }

    async fn list_with_category(&self) -> StoreResult<Vec<PackageWithCategory>> {
        let tables = self.lock();
        let mut rows: Vec<PackageWithCategory> = tables
            .packages
            .iter()
            .map(|p| PackageWithCategory {
                package: p.clone(),
                category_name: tables
                    .categories
                    .iter()
                    .find(|c| c.id == p.category_id)
                    .map(|c| c.name.clone()),
            })
            .collect();
        newest_first(&mut rows, |r| (r.package.created_at, r.package.id));
        Ok(rows)
    }

    async fn list_active(&self) -> StoreResult<Vec<Package>> {
        let mut rows: Vec<Package> = self
            .lock()
            .packages
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        newest_first(&mut rows, |p| (p.created_at, p.id));
        Ok(rows)
    }

    async fn update(&self, id: DbId, input: &UpdatePackage) -> StoreResult<Option<Package>> {
        let mut tables = self.lock();
        if let Some(category_id) = input.category_id {
            tables.require_category(category_id, "fk_packages_category")?;
        }
        let Some(package) = tables.packages.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(v) = input.category_id {
            package.category_id = v;
        }
        if let Some(v) = &input.name {
            package.name = v.clone();
        }
        if let Some(v) = &input.description {
            package.description = v.clone();
        }
        if let Some(v) = input.price {
            package.price = v;
        }
        if let Some(v) = &input.currency {
            package.currency = v.clone();
        }
        if let Some(v) = &input.features {
            package.features = v.clone();
        }
        if let Some(v) = &input.images {
            package.images = v.clone();
        }
        if let Some(v) = &input.videos {
            package.videos = v.clone();
        }
        if let Some(v) = input.is_active {
            package.is_active = v;
        }
        package.updated_at = Utc::now();
        Ok(Some(package.clone()))
    }

    async fn soft_delete(&self, id: DbId) -> StoreResult<Option<Package>> {
        let input = UpdatePackage {
            is_active: Some(false),
            ..Default::default()
        };
        PackageRepo::update(self, id, &input).await
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.lock().packages.len() as i64)
    }
}

// ---------------------------------------------------------------------------
// Tours
// ---------------------------------------------------------------------------

#[async_trait]
impl TourRepo for MemoryStore {
    async fn create(&self, input: &CreateTour) -> StoreResult<Tour> {
        let mut tables = self.lock();
        if let Some(category_id) = input.category_id {
            tables.require_category(category_id, "fk_tours_category")?;
        }
        let now = Utc::now();
        let tour = Tour {
            id: tables.allocate_id(),
            category_id: input.category_id,
            title: input.title.clone(),
            subtitle: input.subtitle.clone(),
            tour_place: input.tour_place.clone(),
            duration: input.duration.clone(),
            group_size: input.group_size,
            people_type: input.people_type.clone(),
            price: input.price.clone(),
            addons: input.addons.clone(),
            kids_policy: input.kids_policy.clone(),
            airport: input.airport.clone(),
            flight_suggestion: input.flight_suggestion.clone(),
            why_travel_with_us: input.why_travel_with_us.clone(),
            trip_overview: input.trip_overview.clone(),
            itinerary: input.itinerary.clone(),
            included: input.included.clone(),
            not_included: input.not_included.clone(),
            payment_details: input.payment_details.clone(),
            contact: input.contact.clone(),
            trip_time: input.trip_time.clone(),
            images: input.images.clone(),
            is_bestseller: false,
            is_offer: false,
            priority: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.tours.push(tour.clone());
        Ok(tour)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Tour>> {
        Ok(self.lock().tours.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Tour>> {
        let mut rows = self.lock().tours.clone();
        newest_first(&mut rows, |t| (t.created_at, t.id));
        Ok(rows)
    }

    async fn list_active(&self) -> StoreResult<Vec<Tour>> {
        let mut rows: Vec<Tour> = self
            .lock()
            .tours
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        public_tour_order(&mut rows);
        Ok(rows)
    }

    async fn list_active_by_category(
        &self,
        category_id: DbId,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Tour>> {
        let mut rows: Vec<Tour> = self
            .lock()
            .tours
            .iter()
            .filter(|t| t.is_active && t.category_id == Some(category_id))
            .cloned()
            .collect();
        public_tour_order(&mut rows);
        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_active_by_category(&self, category_id: DbId) -> StoreResult<i64> {
        Ok(self
            .lock()
            .tours
            .iter()
            .filter(|t| t.is_active && t.category_id == Some(category_id))
            .count() as i64)
    }

    async fn search_active(&self, term: &str) -> StoreResult<Vec<Tour>> {
        let needle = term.to_lowercase();
        let mut rows: Vec<Tour> = self
            .lock()
            .tours
            .iter()
            .filter(|t| t.is_active && t.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        public_tour_order(&mut rows);
        Ok(rows)
    }

    async fn update(&self, id: DbId, input: &UpdateTour) -> StoreResult<Option<Tour>> {
        let mut tables = self.lock();
        if let Some(category_id) = input.category_id {
            tables.require_category(category_id, "fk_tours_category")?;
        }
        let Some(tour) = tables.tours.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = &input.$field {
                    tour.$field = v.clone();
                })*
            };
        }
        apply!(
            title,
            subtitle,
            tour_place,
            duration,
            people_type,
            price,
            addons,
            kids_policy,
            airport,
            flight_suggestion,
            why_travel_with_us,
            trip_overview,
            itinerary,
            included,
            not_included,
            payment_details,
            contact,
            images,
            priority,
            is_active,
        );
        if input.category_id.is_some() {
            tour.category_id = input.category_id;
        }
        if input.group_size.is_some() {
            tour.group_size = input.group_size;
        }
        if input.trip_time.is_some() {
            tour.trip_time = input.trip_time.clone();
        }
        tour.updated_at = Utc::now();
        Ok(Some(tour.clone()))
    }

    async fn toggle(&self, id: DbId, flag: TourFlag) -> StoreResult<Option<Tour>> {
        let mut tables = self.lock();
        let Some(tour) = tables.tours.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        let field = match flag {
            TourFlag::Active => &mut tour.is_active,
            TourFlag::Bestseller => &mut tour.is_bestseller,
            TourFlag::Offer => &mut tour.is_offer,
        };
        *field = !*field;
        tour.updated_at = Utc::now();
        Ok(Some(tour.clone()))
    }

    async fn soft_delete(&self, id: DbId) -> StoreResult<Option<Tour>> {
        let input = UpdateTour {
            is_active: Some(false),
            ..Default::default()
        };
        TourRepo::update(self, id, &input).await
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.lock().tours.len() as i64)
    }
}

// ---------------------------------------------------------------------------
// Blogs
// ---------------------------------------------------------------------------

#[async_trait]
impl BlogRepo for MemoryStore {
    async fn create(&self, input: &CreateBlog) -> StoreResult<Blog> {
        let mut tables = self.lock();
        let now = Utc::now();
        let blog = Blog {
            id: tables.allocate_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            mini_description: input.mini_description.clone(),
            images: input.images.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Blog>> {
        Ok(self.lock().blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Blog>> {
        let mut rows = self.lock().blogs.clone();
        newest_first(&mut rows, |b| (b.created_at, b.id));
        Ok(rows)
    }

    async fn update(&self, id: DbId, input: &UpdateBlog) -> StoreResult<Option<Blog>> {
        let mut tables = self.lock();
        let Some(blog) = tables.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &input.name {
            blog.name = v.clone();
        }
        if let Some(v) = &input.description {
            blog.description = v.clone();
        }
        if let Some(v) = &input.mini_description {
            blog.mini_description = v.clone();
        }
        if let Some(v) = &input.images {
            blog.images = v.clone();
        }
        blog.updated_at = Utc::now();
        Ok(Some(blog.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Blog>> {
        let mut tables = self.lock();
        let Some(pos) = tables.blogs.iter().position(|b| b.id == id) else {
            return Ok(None);
        };
        Ok(Some(tables.blogs.remove(pos)))
    }
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[async_trait]
impl TicketRepo for MemoryStore {
    async fn create(&self, input: &CreateTicket) -> StoreResult<Ticket> {
        let mut tables = self.lock();
        let now = Utc::now();
        let ticket = Ticket {
            id: tables.allocate_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            offer_price: input.offer_price,
            actual_price: input.actual_price,
            off_percentage: input.off_percentage,
            images: input.images.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Ticket>> {
        Ok(self.lock().tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Ticket>> {
        let mut rows = self.lock().tickets.clone();
        newest_first(&mut rows, |t| (t.created_at, t.id));
        Ok(rows)
    }

    async fn update(&self, id: DbId, input: &UpdateTicket) -> StoreResult<Option<Ticket>> {
        let mut tables = self.lock();
        let Some(ticket) = tables.tickets.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &input.name {
            ticket.name = v.clone();
        }
        if let Some(v) = &input.description {
            ticket.description = v.clone();
        }
        if let Some(v) = input.offer_price {
            ticket.offer_price = v;
        }
        if let Some(v) = input.actual_price {
            ticket.actual_price = v;
        }
        if let Some(v) = input.off_percentage {
            ticket.off_percentage = v;
        }
        if let Some(v) = &input.images {
            ticket.images = v.clone();
        }
        ticket.updated_at = Utc::now();
        Ok(Some(ticket.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Ticket>> {
        let mut tables = self.lock();
        let Some(pos) = tables.tickets.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        Ok(Some(tables.tickets.remove(pos)))
    }
}

// ---------------------------------------------------------------------------
// Admins
// ---------------------------------------------------------------------------

#[async_trait]
impl AdminRepo for MemoryStore {
    async fn create(&self, input: &CreateAdmin) -> StoreResult<Admin> {
        let mut tables = self.lock();
        if tables.admins.iter().any(|a| a.username == input.username) {
            return Err(unique_violation("uq_admins_username"));
        }
        let now = Utc::now();
        let admin = Admin {
            id: tables.allocate_id(),
            username: input.username.clone(),
            password_hash: input.password.as_str().to_string(),
            status: ADMIN_STATUS_ACTIVE.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.admins.push(admin.clone());
        Ok(admin)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Admin>> {
        Ok(self.lock().admins.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Admin>> {
        Ok(self
            .lock()
            .admins
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn update_password(&self, id: DbId, password: &HashedPassword) -> StoreResult<bool> {
        let mut tables = self.lock();
        let Some(admin) = tables.admins.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };
        admin.password_hash = password.as_str().to_string();
        admin.updated_at = Utc::now();
        Ok(true)
    }
}

impl MemoryStore {
    /// Set an admin's status directly. The HTTP surface has no endpoint for
    /// this; it exists for seeding and tests.
    pub fn set_admin_status(&self, id: DbId, status: &str) -> bool {
        let mut tables = self.lock();
        match tables.admins.iter_mut().find(|a| a.id == id) {
            Some(admin) => {
                admin.status = status.to_string();
                true
            }
            None => false,
        }
    }
}
