//! Services shared by every client

mod store;

pub use store::Store;
