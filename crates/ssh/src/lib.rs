mod block;
mod error;
mod hosts;
mod options;
mod render;
mod write;

pub use block::{ConfigBlock, Extracted, SECURITY_DEFAULTS, aggregate};
pub use error::{HostsError, TranslateError, WriteError};
pub use hosts::{list_hosts, list_hosts_from_str, verify_block, verify_blocks};
pub use options::{TranslatedOption, tokenize, translate, translate_args};
pub use render::{HEADER, render};
pub use write::write_atomic;
