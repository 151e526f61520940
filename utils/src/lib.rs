pub mod map;
pub mod serialization;
