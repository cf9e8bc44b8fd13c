mod error;
mod settings;
mod sources;

pub use error::SettingsError;
pub use settings::{Settings, expand_tilde};
pub use sources::config::{default_json, schema, validate};
