pub mod aliases;
pub mod resolver;

pub use resolver::{
    as_bool, as_number, is_present, lookup, resolve, to_number, to_safe_string, FieldResolver,
};
