pub mod client;
pub mod error;
pub mod memory;
pub mod range;
pub mod store;

pub use client::SupabaseStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use range::RecordRange;
pub use store::{PageQuery, ProductStore};
