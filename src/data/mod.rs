mod observation;
mod store;

pub use observation::Observation;
pub use store::{DataError, DataStore};
