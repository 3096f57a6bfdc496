pub mod field;
pub mod match_player;
pub mod matches;
pub mod review;
pub mod slot;
pub mod user;
pub mod venue;

pub use field::Field;
pub use match_player::{MatchPlayer, PlayerStatus};
pub use matches::{Match, MatchStatus};
pub use review::{PlayerReview, ReviewType};
pub use slot::{SlotStatus, TimeSlot};
pub use user::User;
pub use venue::Venue;
