mod error;
mod loader;
mod resolver;
mod schema;
mod types;

pub use error::{InventoryError, ValidationError, ValidationResult, format_validation_errors};
pub use loader::{load_from_path, load_from_reader, load_from_str};
pub use resolver::{Resolution, resolve, resolve_host};
pub use schema::{schema, validate, validate_with};
pub use types::{CommonArgs, ConnectionType, Defaults, HostRecord, Inventory, RawHost};
