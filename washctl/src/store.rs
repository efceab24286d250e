//! In-memory data store.
//!
//! The upstream application recreates its schema on every boot, so records
//! only live for the lifetime of the process. Each entity gets a [`Table`]:
//! a concurrent map keyed by integer ids handed out from a per-table
//! counter, mimicking autoincrement primary keys.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::types::{AppointmentId, PaymentId};

/// A booked carwash appointment.
#[derive(Debug, Clone)]
pub struct Appointment {
    pub id: AppointmentId,
    pub user_id: i64,
    pub vehicle_id: i64,
    pub service_type: String,
    pub appointment_date: DateTime<Utc>,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A payment recorded against an appointment.
///
/// `receipt_filename` is set once a receipt image has been uploaded; the
/// file itself lives in the configured uploads directory.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: PaymentId,
    pub appointment_id: AppointmentId,
    pub amount: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub transaction_date: DateTime<Utc>,
    pub receipt_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single entity table.
pub struct Table<T> {
    rows: DashMap<i64, T>,
    next_id: AtomicI64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Allocate the next id, build the row with it, and insert it.
    pub fn insert_with_id(&self, make: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let row = make(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).map(|row| row.clone())
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    /// All rows in id order.
    pub fn list(&self) -> Vec<T> {
        let mut rows: Vec<(i64, T)> = self.rows.iter().map(|entry| (*entry.key(), entry.value().clone())).collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    /// Apply an in-place update and return the new row, or `None` for an unknown id.
    pub fn update(&self, id: i64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut entry = self.rows.get_mut(&id)?;
        apply(entry.value_mut());
        Some(entry.value().clone())
    }

    pub fn remove(&self, id: i64) -> Option<T> {
        self.rows.remove(&id).map(|(_, row)| row)
    }
}

/// All tables, shared behind the application state.
pub struct Store {
    pub appointments: Table<Appointment>,
    pub payments: Table<Payment>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            appointments: Table::new(),
            payments: Table::new(),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
