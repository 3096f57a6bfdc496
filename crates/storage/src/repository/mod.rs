pub mod access_token;
pub mod field;
pub mod matches;
pub mod review;
pub mod slot;
pub mod user;
pub mod venue;
