//! Turn order within a challenge.
//!
//! A round gives every standing player one turn. `pending` holds the seats
//! still owed a turn this round; `passed` and `conceded` record how they
//! used it. The challenge ends when every standing player passes in the
//! same round, or when all but one player has conceded.

use serde::{Deserialize, Serialize};

use crate::core::bits::SeatMask;
use crate::core::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    player_count: u8,
    all: SeatMask,
    pending: SeatMask,
    passed: SeatMask,
    conceded: SeatMask,
    current: u8,
    challenger: u8,
    challenge_finished: bool,
    game_over: bool,
}

impl Round {
    /// Start a challenge with `challenger` to move first.
    #[must_use]
    pub fn new(player_count: usize, challenger: PlayerId) -> Self {
        assert!(
            (1..=8).contains(&player_count),
            "Round supports 1 to 8 seats, got {player_count}"
        );
        let all = SeatMask::fill(player_count);
        Self {
            player_count: player_count as u8,
            all,
            pending: all,
            passed: SeatMask::default(),
            conceded: SeatMask::default(),
            current: challenger.0,
            challenger: challenger.0,
            challenge_finished: false,
            game_over: false,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count as usize
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current(&self) -> PlayerId {
        PlayerId(self.current)
    }

    /// Seat that opened the current challenge.
    #[must_use]
    pub fn challenger(&self) -> PlayerId {
        PlayerId(self.challenger)
    }

    #[must_use]
    pub fn pending(&self) -> SeatMask {
        self.pending
    }

    #[must_use]
    pub fn passed(&self) -> SeatMask {
        self.passed
    }

    #[must_use]
    pub fn conceded(&self) -> SeatMask {
        self.conceded
    }

    #[must_use]
    pub fn has_conceded(&self, player: PlayerId) -> bool {
        self.conceded.contains(player.index())
    }

    /// Seats that have not conceded this challenge.
    #[must_use]
    pub fn standing(&self) -> SeatMask {
        self.all.without(self.conceded)
    }

    /// The current player has taken their turn; move to the next pending
    /// seat, wrapping around the table.
    pub fn step(&mut self) {
        self.pending.clear(self.current as usize);
        self.advance();
    }

    /// The current player passes.
    pub fn pass(&mut self) {
        self.passed.set(self.current as usize);
        if self.passed == self.standing() {
            self.challenge_finished = true;
        }
    }

    /// The current player drops out of the challenge.
    pub fn concede(&mut self) {
        self.conceded.set(self.current as usize);
        self.pending.clear(self.current as usize);
        if self.conceded.count() + 1 >= u32::from(self.player_count) {
            self.challenge_finished = true;
        }
    }

    /// Re-arm every standing seat for another round of the same
    /// challenge. Does nothing once the challenge has ended.
    pub fn reset(&mut self) {
        if !self.challenge_finished() {
            self.passed = SeatMask::default();
            self.pending = self.standing();
            self.current = (self.current + 1) % self.player_count;
            self.advance();
        }
    }

    /// Start a new challenge: clear concessions and hand the opening turn
    /// to the next challenger seat.
    pub fn hard_reset(&mut self) {
        self.challenge_finished = false;
        self.conceded = SeatMask::default();
        self.passed = SeatMask::default();
        self.pending = self.all;
        self.challenger = (self.challenger + 1) % self.player_count;
        self.current = self.challenger;
    }

    /// No seat is owed a turn, or the challenge is over.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.pending.is_empty() || self.challenge_finished()
    }

    #[must_use]
    pub fn challenge_finished(&self) -> bool {
        self.challenge_finished || self.game_over
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn set_game_over(&mut self) {
        self.game_over = true;
    }

    fn advance(&mut self) {
        while !self.pending.is_empty() && !self.pending.contains(self.current as usize) {
            self.current = (self.current + 1) % self.player_count;
        }
    }

    /// Pending seats never include a conceded player.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.pending.is_subset_of(self.standing()) && self.all == SeatMask::fill(self.player_count())
    }
}
