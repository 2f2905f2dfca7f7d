//! Conditions and collection queries over runtime data.

mod collection;
mod condition;
mod request;

pub use collection::{Limit, SortDescriptor, query_collection};
pub use condition::{Condition, Predicate, all_hold};
pub use request::DataRequest;
