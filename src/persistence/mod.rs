pub mod files;
pub mod snapshot;
pub mod store;

pub use files::{
    atomic_write, ensure_data_dir, init_local_data_dir, log_file,
};
pub use snapshot::{
    load_history, load_session, load_settings, save_history, save_session, save_settings,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};
