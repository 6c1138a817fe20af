mod filter;
mod record;
mod relational;

pub use filter::ListFilter;
pub use record::{ID_FIELD, ListFields, ListRecord, TEXT_FIELD, TextField};
pub use relational::RelationalList;
