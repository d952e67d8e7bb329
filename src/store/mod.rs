//! In-memory storage for saved attractions and routes

use chrono::Local;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::error::{AppError, Result};
use crate::transport::PathStep;

/// Items that carry a store-assigned id
pub trait Identified {
    fn id(&self) -> u64;
}

struct Inner<T> {
    items: Vec<T>,
    next_id: u64,
}

/// Ordered list with a monotonic id counter behind one lock.
///
/// Ids start at 1 and are never reused within the process lifetime.
pub struct SavedStore<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Identified + Clone> SavedStore<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Build an item from the next id and append it
    pub fn add(&self, build: impl FnOnce(u64) -> T) -> T {
        let mut inner = self.inner.lock();
        let item = build(inner.next_id);
        inner.next_id += 1;
        inner.items.push(item.clone());
        item
    }

    /// Like [`add`](Self::add), but `check` sees the current items first
    pub fn try_add(
        &self,
        check: impl FnOnce(&[T]) -> Result<()>,
        build: impl FnOnce(u64) -> T,
    ) -> Result<T> {
        let mut inner = self.inner.lock();
        check(&inner.items)?;
        let item = build(inner.next_id);
        inner.next_id += 1;
        inner.items.push(item.clone());
        Ok(item)
    }

    pub fn list(&self) -> Vec<T> {
        self.inner.lock().items.clone()
    }

    /// Returns whether an item was removed
    pub fn remove(&self, id: u64) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.items.len();
        inner.items.retain(|item| item.id() != id);
        inner.items.len() != before
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Identified + Clone> Default for SavedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A saved attraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SavedSpot {
    pub id: u64,
    pub name: String,
}

impl Identified for SavedSpot {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A saved route, as chosen by the user from a search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SavedRoute {
    pub id: u64,
    pub city: String,
    pub origin: String,
    pub destination: String,
    /// Travel mode name, e.g. `transit`
    #[serde(rename = "type")]
    pub route_type: String,
    pub duration: Option<u64>,
    pub distance: Option<f64>,
    pub path: Vec<PathStep>,
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub saved_at: String,
}

impl Identified for SavedRoute {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Fields of a route to save
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct NewRoute {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(rename = "type", default)]
    pub route_type: String,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub path: Vec<PathStep>,
}

pub type SpotStore = SavedStore<SavedSpot>;
pub type RouteStore = SavedStore<SavedRoute>;

impl SavedStore<SavedSpot> {
    /// Save an attraction by name. Duplicate names are refused when `reject_duplicates` is set.
    pub fn add_spot(&self, name: &str, reject_duplicates: bool) -> Result<SavedSpot> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidRequest("spot name must not be empty".into()));
        }

        let spot = self.try_add(
            |spots| {
                if reject_duplicates && spots.iter().any(|s| s.name == name) {
                    return Err(AppError::Conflict(format!("spot '{}' is already saved", name)));
                }
                Ok(())
            },
            |id| SavedSpot {
                id,
                name: name.to_string(),
            },
        )?;

        info!(id = spot.id, name = %spot.name, "Saved spot");
        Ok(spot)
    }
}

impl SavedStore<SavedRoute> {
    pub fn add_route(&self, route: NewRoute) -> SavedRoute {
        let saved = self.add(|id| SavedRoute {
            id,
            city: route.city,
            origin: route.origin,
            destination: route.destination,
            route_type: route.route_type,
            duration: route.duration,
            distance: route.distance,
            path: route.path,
            saved_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });

        info!(id = saved.id, route_type = %saved.route_type, "Saved route");
        saved
    }
}
