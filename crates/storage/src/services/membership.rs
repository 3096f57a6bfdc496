//! Match lifecycle and roster state machine.
//!
//! A [`Roster`] is the in-memory view of one match's membership. Repositories
//! load it under a row lock, apply exactly one transition, and persist the
//! outcome in the same transaction, so every rule here is enforced against a
//! serialized view of the match.

use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Match, MatchPlayer, MatchStatus, PlayerStatus};

/// Where a member sits in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Roster,
    Waitlist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub left: Placement,
    /// Waitlisted user moved into the vacated seat, if any.
    pub promoted: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    captain_id: Uuid,
    max_players: usize,
    waitlist_enabled: bool,
    status: MatchStatus,
    players: Vec<Uuid>,
    waitlist: Vec<Uuid>,
}

impl Roster {
    /// A freshly created match: the captain holds the first seat.
    pub fn new(captain_id: Uuid, max_players: usize, waitlist_enabled: bool) -> Self {
        Self {
            captain_id,
            max_players,
            waitlist_enabled,
            status: MatchStatus::Active,
            players: vec![captain_id],
            waitlist: Vec::new(),
        }
    }

    /// Rebuilds the roster from stored rows, ordered by seat.
    pub fn from_records(record: &Match, entries: &[MatchPlayer]) -> Self {
        let mut entries: Vec<&MatchPlayer> = entries.iter().collect();
        entries.sort_by_key(|entry| entry.seat_order);

        let (players, waitlist): (Vec<&MatchPlayer>, Vec<&MatchPlayer>) = entries
            .into_iter()
            .partition(|entry| entry.status.holds_seat());

        Self {
            captain_id: record.captain_id,
            max_players: usize::try_from(record.max_players).unwrap_or(0),
            waitlist_enabled: record.waitlist_enabled,
            status: record.status,
            players: players.into_iter().map(|entry| entry.user_id).collect(),
            waitlist: waitlist.into_iter().map(|entry| entry.user_id).collect(),
        }
    }

    pub fn captain_id(&self) -> Uuid {
        self.captain_id
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn players(&self) -> &[Uuid] {
        &self.players
    }

    pub fn waitlist(&self) -> &[Uuid] {
        &self.waitlist
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    pub fn placement_of(&self, user_id: Uuid) -> Option<Placement> {
        if self.players.contains(&user_id) {
            Some(Placement::Roster)
        } else if self.waitlist.contains(&user_id) {
            Some(Placement::Waitlist)
        } else {
            None
        }
    }

    pub fn ensure_captain(&self, actor_id: Uuid) -> Result<()> {
        if actor_id == self.captain_id {
            Ok(())
        } else {
            Err(StorageError::NotCaptain)
        }
    }

    fn ensure_active(&self) -> Result<()> {
        if self.status == MatchStatus::Active {
            Ok(())
        } else {
            Err(StorageError::MatchNotActive)
        }
    }

    /// Seats the user, or queues them when the roster is full and the match
    /// keeps a waitlist.
    pub fn join(&mut self, user_id: Uuid) -> Result<Placement> {
        self.ensure_active()?;

        if self.placement_of(user_id).is_some() {
            return Err(StorageError::AlreadyJoined);
        }

        if !self.is_full() {
            self.players.push(user_id);
            return Ok(Placement::Roster);
        }

        if !self.waitlist_enabled {
            return Err(StorageError::MatchFull);
        }

        self.waitlist.push(user_id);
        Ok(Placement::Waitlist)
    }

    /// Removes the user. A vacated roster seat goes to the head of the
    /// waitlist, who takes the leaver's position in the roster.
    pub fn leave(&mut self, user_id: Uuid) -> Result<LeaveOutcome> {
        if user_id == self.captain_id {
            return Err(StorageError::CaptainCannotLeave);
        }
        self.ensure_active()?;

        if let Some(index) = self.players.iter().position(|p| *p == user_id) {
            self.players.remove(index);
            let promoted = if self.waitlist.is_empty() {
                None
            } else {
                let next = self.waitlist.remove(0);
                self.players.insert(index, next);
                Some(next)
            };
            return Ok(LeaveOutcome {
                left: Placement::Roster,
                promoted,
            });
        }

        if let Some(index) = self.waitlist.iter().position(|p| *p == user_id) {
            self.waitlist.remove(index);
            return Ok(LeaveOutcome {
                left: Placement::Waitlist,
                promoted: None,
            });
        }

        Err(StorageError::NotMember)
    }

    pub fn complete(&mut self, actor_id: Uuid) -> Result<()> {
        self.ensure_captain(actor_id)?;
        self.ensure_active()?;
        self.status = MatchStatus::Completed;
        Ok(())
    }

    /// Cancels the match. The caller must release the claimed slot in the
    /// same transaction.
    pub fn cancel(&mut self, actor_id: Uuid) -> Result<()> {
        self.ensure_captain(actor_id)?;
        self.ensure_active()?;
        self.status = MatchStatus::Cancelled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn users(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn test_captain_holds_first_seat() {
        let captain = Uuid::new_v4();
        let roster = Roster::new(captain, 4, false);
        assert_eq!(roster.players(), &[captain]);
        assert!(roster.waitlist().is_empty());
        assert_eq!(roster.status(), MatchStatus::Active);
    }

    #[test]
    fn test_join_appends_in_arrival_order() {
        let u = users(3);
        let mut roster = Roster::new(u[0], 4, false);
        assert_eq!(roster.join(u[1]).unwrap(), Placement::Roster);
        assert_eq!(roster.join(u[2]).unwrap(), Placement::Roster);
        assert_eq!(roster.players(), &[u[0], u[1], u[2]]);
    }

    #[test]
    fn test_join_twice_is_rejected() {
        let u = users(2);
        let mut roster = Roster::new(u[0], 4, true);
        roster.join(u[1]).unwrap();
        assert!(matches!(roster.join(u[1]), Err(StorageError::AlreadyJoined)));
        assert!(matches!(roster.join(u[0]), Err(StorageError::AlreadyJoined)));
    }

    #[test]
    fn test_join_waitlisted_user_again_is_rejected() {
        let u = users(3);
        let mut roster = Roster::new(u[0], 2, true);
        roster.join(u[1]).unwrap();
        assert_eq!(roster.join(u[2]).unwrap(), Placement::Waitlist);
        assert!(matches!(roster.join(u[2]), Err(StorageError::AlreadyJoined)));
    }

    #[test]
    fn test_full_match_without_waitlist() {
        let u = users(3);
        let mut roster = Roster::new(u[0], 2, false);
        roster.join(u[1]).unwrap();
        assert!(matches!(roster.join(u[2]), Err(StorageError::MatchFull)));
        assert_eq!(roster.players().len(), 2);
        assert!(roster.waitlist().is_empty());
    }

    #[test]
    fn test_waitlist_promotion_is_fifo() {
        let u = users(5);
        let mut roster = Roster::new(u[0], 2, true);
        roster.join(u[1]).unwrap();
        roster.join(u[2]).unwrap();
        roster.join(u[3]).unwrap();
        assert_eq!(roster.waitlist(), &[u[2], u[3]]);

        let outcome = roster.leave(u[1]).unwrap();
        assert_eq!(outcome.left, Placement::Roster);
        assert_eq!(outcome.promoted, Some(u[2]));
        assert_eq!(roster.players(), &[u[0], u[2]]);
        assert_eq!(roster.waitlist(), &[u[3]]);
    }

    #[test]
    fn test_promoted_player_takes_vacated_position() {
        let u = users(5);
        let mut roster = Roster::new(u[0], 3, true);
        roster.join(u[1]).unwrap();
        roster.join(u[2]).unwrap();
        roster.join(u[3]).unwrap();

        roster.leave(u[1]).unwrap();
        assert_eq!(roster.players(), &[u[0], u[3], u[2]]);
    }

    #[test]
    fn test_leaving_waitlist_promotes_nobody() {
        let u = users(4);
        let mut roster = Roster::new(u[0], 2, true);
        roster.join(u[1]).unwrap();
        roster.join(u[2]).unwrap();
        roster.join(u[3]).unwrap();

        let outcome = roster.leave(u[2]).unwrap();
        assert_eq!(outcome.left, Placement::Waitlist);
        assert_eq!(outcome.promoted, None);
        assert_eq!(roster.players(), &[u[0], u[1]]);
        assert_eq!(roster.waitlist(), &[u[3]]);
    }

    #[test]
    fn test_captain_cannot_leave_in_any_state() {
        let u = users(2);
        let mut roster = Roster::new(u[0], 2, true);
        assert!(matches!(roster.leave(u[0]), Err(StorageError::CaptainCannotLeave)));
        roster.join(u[1]).unwrap();
        assert!(matches!(roster.leave(u[0]), Err(StorageError::CaptainCannotLeave)));
        roster.complete(u[0]).unwrap();
        assert!(matches!(roster.leave(u[0]), Err(StorageError::CaptainCannotLeave)));
    }

    #[test]
    fn test_leave_unknown_user() {
        let u = users(2);
        let mut roster = Roster::new(u[0], 2, true);
        assert!(matches!(roster.leave(u[1]), Err(StorageError::NotMember)));
    }

    #[test]
    fn test_only_captain_completes_or_cancels() {
        let u = users(2);
        let mut roster = Roster::new(u[0], 4, true);
        roster.join(u[1]).unwrap();
        assert!(matches!(roster.complete(u[1]), Err(StorageError::NotCaptain)));
        assert!(matches!(roster.cancel(u[1]), Err(StorageError::NotCaptain)));
        assert_eq!(roster.status(), MatchStatus::Active);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let u = users(3);
        let mut completed = Roster::new(u[0], 4, true);
        completed.join(u[1]).unwrap();
        completed.complete(u[0]).unwrap();
        assert!(matches!(completed.cancel(u[0]), Err(StorageError::MatchNotActive)));
        assert!(matches!(completed.complete(u[0]), Err(StorageError::MatchNotActive)));
        assert!(matches!(completed.join(u[2]), Err(StorageError::MatchNotActive)));
        assert!(matches!(completed.leave(u[1]), Err(StorageError::MatchNotActive)));

        let mut cancelled = Roster::new(u[0], 4, true);
        cancelled.cancel(u[0]).unwrap();
        assert_eq!(cancelled.status(), MatchStatus::Cancelled);
        assert!(matches!(cancelled.join(u[2]), Err(StorageError::MatchNotActive)));
    }

    #[test]
    fn test_from_records_orders_by_seat() {
        let u = users(4);
        let now = chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let record = Match {
            match_id: Uuid::new_v4(),
            title: "Pickup".into(),
            slot_id: Uuid::new_v4(),
            field_id: Uuid::new_v4(),
            captain_id: u[0],
            starts_at: now,
            max_players: 2,
            waitlist_enabled: true,
            is_private: false,
            invite_code: None,
            status: MatchStatus::Active,
            created_at: now,
        };
        let entry = |user_id, status, seat_order| MatchPlayer {
            match_id: record.match_id,
            user_id,
            status,
            seat_order,
            joined_at: now,
        };
        let entries = vec![
            entry(u[3], PlayerStatus::Waitlist, 4),
            entry(u[1], PlayerStatus::Confirmed, 2),
            entry(u[2], PlayerStatus::Waitlist, 3),
            entry(u[0], PlayerStatus::Confirmed, 1),
        ];

        let roster = Roster::from_records(&record, &entries);
        assert_eq!(roster.players(), &[u[0], u[1]]);
        assert_eq!(roster.waitlist(), &[u[2], u[3]]);
        assert!(roster.is_full());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Join(usize),
        Leave(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..8).prop_map(Op::Join),
            (0usize..8).prop_map(Op::Leave),
        ]
    }

    proptest! {
        #[test]
        fn prop_roster_invariants_hold(
            max_players in 2usize..5,
            waitlist_enabled in any::<bool>(),
            ops in proptest::collection::vec(op(), 0..40),
        ) {
            let u = users(8);
            let mut roster = Roster::new(u[0], max_players, waitlist_enabled);

            for op in ops {
                let before = roster.clone();
                let result = match op {
                    Op::Join(i) => roster.join(u[i]).map(|_| ()),
                    Op::Leave(i) => roster.leave(u[i]).map(|_| ()),
                };
                if result.is_err() {
                    prop_assert_eq!(&roster, &before);
                }

                prop_assert!(roster.players().len() <= max_players);
                prop_assert!(roster.players().contains(&u[0]));
                prop_assert!(!roster.waitlist().contains(&u[0]));
                for p in roster.players() {
                    prop_assert!(!roster.waitlist().contains(p));
                    prop_assert_eq!(roster.players().iter().filter(|q| *q == p).count(), 1);
                }
                if !roster.waitlist().is_empty() {
                    prop_assert!(waitlist_enabled);
                    prop_assert!(roster.is_full());
                }
            }
        }
    }
}
