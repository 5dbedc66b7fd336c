pub mod initialize;
pub mod log;
pub mod migrate;
pub mod reports;
pub mod stats;
pub mod store;
pub mod watch;
pub mod workers;

pub use store::Store;
pub use watch::{Subscription, Table};
