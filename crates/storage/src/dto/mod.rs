pub mod common;
pub mod field;
pub mod matches;
pub mod review;
pub mod user;
pub mod venue;
