pub mod invite_code;
pub mod membership;
pub mod reviews;
pub mod schedule;
