pub mod json_backend;

use crate::{core::errors::CostError, domain::Garage};

pub type Result<T> = std::result::Result<T, CostError>;

/// Abstraction over persistence backends capable of storing garages and snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, garage: &Garage, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Garage>;
    fn exists(&self, name: &str) -> bool;
    fn list_garages(&self) -> Result<Vec<String>>;
    /// Backup file names, newest first.
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    /// Writes a snapshot and returns its file name.
    fn backup(&self, garage: &Garage, name: &str, note: Option<&str>) -> Result<String>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Garage>;
}

pub use json_backend::{canonical_name, JsonStorage};
