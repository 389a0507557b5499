pub mod dates;
pub mod mapping;
pub mod normalizer;

pub use dates::{days_between, parse_date, parse_datetime, parse_timestamp};
pub use mapping::to_raw;
pub use normalizer::{derive_transit_days, normalize, normalize_at};
