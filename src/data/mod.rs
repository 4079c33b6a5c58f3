mod store;

pub use store::{DocumentStore, JsonFileStore, StoreError, DEFAULT_DATA_PATH};
