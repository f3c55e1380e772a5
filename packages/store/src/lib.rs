//! Local state for the GatorPool client: the device/username session pair
//! kept in persistent key/value storage, and the `gatorpool.toml` app config.

pub mod config;
pub mod kv;
pub mod session;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::{ConfigError, GatorPoolConfig};
pub use kv::KeyValueStore;
pub use session::{Session, SessionInfo, DEVICE_ID_KEY, USERNAME_KEY};
