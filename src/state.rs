//! Game session module.
//!
//! This module contains [`GameSession`], the single owner of everything that changes while a game
//! is played: the maze, the player, the level timer and the score. The session never draws
//! anything; it queues [`SessionEvent`] values that the terminal shell drains after every input or
//! clock step.

use std::time::Instant;

use color_eyre::eyre::Result;
use log::{debug, info};
use rand::{rngs::StdRng, Rng as _, SeedableRng as _};

use crate::{
    countdown::Countdown,
    grid::{Direction, Grid, Position},
    maze,
};

/// Time limit of the first level, in seconds.
pub const BASE_TIME_LIMIT: u32 = 120;

/// Seconds removed from the time limit for every level after the first.
pub const TIME_LIMIT_DECAY: u32 = 10;

/// Lowest time limit any level can have, in seconds.
pub const MIN_TIME_LIMIT: u32 = 30;

/// Returns the time limit of a level: `max(120 - (level - 1) * 10, 30)`.
#[must_use]
pub const fn time_limit(level: u32) -> u32 {
    let decay = level.saturating_sub(1).saturating_mul(TIME_LIMIT_DECAY);
    let limit = BASE_TIME_LIMIT.saturating_sub(decay);

    if limit > MIN_TIME_LIMIT {
        limit
    } else {
        MIN_TIME_LIMIT
    }
}

/// Returns the score earned by clearing a level: `(level - 1) * 10 + time_left * 2`.
#[must_use]
pub fn earned_score(level: u32, time_left: u32) -> u64 {
    u64::from(level.saturating_sub(1)) * 10 + u64::from(time_left) * 2
}

/// Mode of the current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The player is moving and the countdown is pending.
    Running,
    /// The player reached the goal; the next level starts right away.
    LevelCleared,
    /// The countdown reached zero; only a restart leaves this phase.
    TimeExpired,
}

/// Notification raised by the session for the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Visible state changed and should be drawn again.
    Render,
    /// The goal was reached.
    LevelCleared {
        /// Score earned for the cleared level.
        earned_score: u64,
        /// Level that starts next.
        level: u32,
    },
    /// The countdown reached zero.
    TimeExpired,
    /// The game went back to level one with a zero score.
    Restarted,
}

/// State of a single game, from level one until the player quits.
///
/// This structure is owned by the shell for its whole lifetime. Its mutators are synchronous and
/// never re-enter each other except through the level transition, which starts the next level
/// before returning.
#[derive(Debug)]
pub struct GameSession {
    /// Current maze, regenerated at the start of every level.
    grid: Grid,
    /// Player position, reset to the top-left corner at the start of every level.
    player: Position,
    /// Goal position, the bottom-right corner of the grid.
    goal: Position,
    /// Current level, starting at one.
    level: u32,
    /// Cumulative score, only reset by a restart.
    score: u64,
    /// Seconds left on the current level.
    time_left: u32,
    /// Mode of the current level.
    phase: Phase,
    /// Pending countdown.
    ///
    /// This field is `Some` exactly while the level is running. Starting a level replaces it and
    /// leaving the running phase clears it, so at most one countdown ever exists.
    countdown: Option<Countdown>,
    /// Random source used for maze generation.
    rng: StdRng,
    /// Events raised since the shell last drained them.
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Creates a session on a `width` x `height` grid and starts level one.
    ///
    /// When `seed` is `None` a seed is drawn from the thread random source. The seed in use is
    /// logged so a maze can be replayed.
    ///
    /// # Errors
    ///
    /// This function returns an error if either dimension is zero.
    pub fn new(width: usize, height: usize, seed: Option<u64>) -> Result<Self> {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        info!("creating {width}x{height} session with seed {seed}");

        // Level one carves the first maze, so the seed maps straight to it
        let grid = Grid::filled(width, height)?;

        let mut session = Self {
            goal: grid.bottom_right(),
            grid,
            player: Position::new(0, 0),
            level: 1,
            score: 0,
            time_left: time_limit(1),
            phase: Phase::Running,
            countdown: None,
            rng: StdRng::seed_from_u64(seed),
            events: Vec::new(),
        };
        session.start_level(1);

        Ok(session)
    }

    /// Starts a level with a fresh maze and a full timer.
    ///
    /// Any pending countdown is replaced by a new one. Levels below one are treated as level one.
    pub fn start_level(&mut self, level: u32) {
        self.level = level.max(1);
        self.time_left = time_limit(self.level);
        self.player = Position::new(0, 0);
        maze::regenerate(&mut self.grid, &mut self.rng);
        self.phase = Phase::Running;
        self.countdown = Some(Countdown::start(Instant::now()));

        info!(
            "starting level {} with {}s on the clock",
            self.level, self.time_left
        );
        self.events.push(SessionEvent::Render);
    }

    /// Tries to move the player one cell in the given direction.
    ///
    /// Moves into a wall or off the grid leave the player where it is; they are not errors. Once
    /// the player stands on the goal the level is cleared, the score is credited and the next
    /// level starts. Moves are ignored unless the level is running.
    pub fn attempt_move(&mut self, direction: Direction) {
        if self.phase != Phase::Running {
            return;
        }

        let from = self.player;
        if let Some(target) = from
            .step(direction)
            .filter(|target| self.grid.is_open(*target))
        {
            self.player = target;
        }
        debug!(
            "move {direction:?} from ({}, {}) to ({}, {})",
            from.x, from.y, self.player.x, self.player.y
        );
        self.events.push(SessionEvent::Render);

        if self.player == self.goal {
            self.clear_level();
        }
    }

    /// Advances the level timer by one second.
    ///
    /// When the timer reaches zero the level expires and the countdown is cancelled. Ticks are
    /// ignored unless the level is running.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        self.time_left = self.time_left.saturating_sub(1);
        self.events.push(SessionEvent::Render);

        if self.time_left == 0 {
            self.phase = Phase::TimeExpired;
            self.countdown = None;

            info!("time expired on level {} with score {}", self.level, self.score);
            self.events.push(SessionEvent::TimeExpired);
        }
    }

    /// Delivers every countdown tick that became due up to `now`.
    pub fn advance_clock(&mut self, now: Instant) {
        let due = self
            .countdown
            .as_mut()
            .map_or(0, |countdown| countdown.due_ticks(now));

        for _ in 0..due {
            self.tick();
        }
    }

    /// Throws the current game away and starts again from level one with a zero score.
    pub fn restart(&mut self) {
        info!("restarting from level {} with score {}", self.level, self.score);

        self.countdown = None;
        self.level = 1;
        self.score = 0;
        self.events.push(SessionEvent::Restarted);
        self.start_level(1);
    }

    /// Returns and forgets the events raised since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the current maze.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the player position.
    #[must_use]
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Returns the goal position.
    #[must_use]
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Returns the current level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns the cumulative score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Returns the seconds left on the current level.
    #[must_use]
    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Returns the mode of the current level.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` while a countdown is pending.
    #[must_use]
    pub const fn has_active_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    /// Credits the cleared level and moves on to the next one.
    fn clear_level(&mut self) {
        self.phase = Phase::LevelCleared;
        self.countdown = None;

        let earned = earned_score(self.level, self.time_left);
        self.score += earned;
        let next = self.level.saturating_add(1);

        info!(
            "level {} cleared with {}s left, earned {earned}, total {}",
            self.level, self.time_left, self.score
        );
        self.events.push(SessionEvent::LevelCleared {
            earned_score: earned,
            level: next,
        });

        self.start_level(next);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::seq::IndexedRandom as _;

    use super::*;
    use crate::maze::tests::shortest_path;

    /// Creates a reference 20x20 session with a fixed seed.
    fn create_test_session(seed: u64) -> GameSession {
        GameSession::new(20, 20, Some(seed)).expect("failed to create session")
    }

    /// Walks the player from its current position to the goal.
    fn walk_to_goal(session: &mut GameSession) {
        let path = shortest_path(session.grid(), session.player(), session.goal())
            .expect("goal should be reachable");
        for direction in path {
            session.attempt_move(direction);
        }
    }

    #[test]
    fn test_time_limit_decay() {
        assert_eq!(time_limit(0), 120);
        assert_eq!(time_limit(1), 120);
        assert_eq!(time_limit(2), 110);
        assert_eq!(time_limit(5), 80);
        assert_eq!(time_limit(10), 30);
        assert_eq!(time_limit(11), 30);
        assert_eq!(time_limit(u32::MAX), 30);
    }

    #[test]
    fn test_earned_score() {
        assert_eq!(earned_score(1, 100), 200);
        assert_eq!(earned_score(3, 0), 20);
        assert_eq!(earned_score(4, 50), 130);
    }

    #[test]
    fn test_new_session_starts_level_one() {
        let mut session = create_test_session(1);

        assert_eq!(session.level(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_left(), 120);
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.player(), Position::new(0, 0));
        assert_eq!(session.goal(), Position::new(19, 19));
        assert!(session.has_active_countdown(), "level one should be counting down");
        assert!(session.grid().is_open(session.player()), "player should stand on an open cell");
        assert!(session.grid().is_open(session.goal()), "goal should be open");
        assert_eq!(session.take_events(), vec![SessionEvent::Render]);
        assert!(session.take_events().is_empty(), "events should be drained");
    }

    #[test]
    fn test_new_session_uses_first_maze_of_seed() {
        let session = create_test_session(13);
        let mut rng: StdRng = rand::SeedableRng::seed_from_u64(13);
        let expected = maze::generate(20, 20, &mut rng).expect("failed to generate");

        assert_eq!(session.grid(), &expected, "level one should get the seed's first maze");
    }

    #[test]
    fn test_new_session_rejects_zero_dimensions() {
        assert!(GameSession::new(0, 20, Some(1)).is_err(), "zero width should fail");
        assert!(GameSession::new(20, 0, None).is_err(), "zero height should fail");
    }

    #[test]
    fn test_move_off_grid_is_ignored() {
        let mut session = create_test_session(2);
        let _ = session.take_events();

        // Up and left from the origin always leave the grid.
        session.attempt_move(Direction::Up);
        assert_eq!(session.player(), Position::new(0, 0));
        session.attempt_move(Direction::Left);
        assert_eq!(session.player(), Position::new(0, 0));

        assert_eq!(
            session.take_events(),
            vec![SessionEvent::Render, SessionEvent::Render]
        );
        assert_eq!(session.phase(), Phase::Running);
    }

    #[test]
    fn test_move_into_wall_is_ignored() {
        let mut session = create_test_session(12);

        // (1, 1) has two odd coordinates and is never carved.
        session.grid.set(Position::new(1, 0), crate::grid::Cell::Open);
        session.player = Position::new(1, 0);
        session.attempt_move(Direction::Down);

        assert_eq!(session.player(), Position::new(1, 0));
    }

    #[test]
    fn test_moves_are_single_open_steps() {
        for seed in 0..10 {
            let mut session = create_test_session(seed);
            let mut rng: StdRng = rand::SeedableRng::seed_from_u64(seed);

            for _ in 0..500 {
                let direction = *Direction::ALL
                    .choose(&mut rng)
                    .expect("direction list is not empty");
                let before = session.player();
                let level = session.level();
                session.attempt_move(direction);

                if session.level() != level {
                    continue;
                }
                let after = session.player();
                assert!(session.grid().is_open(after), "player should never stand on a wall");
                match before.step(direction) {
                    Some(target) if session.grid().is_open(target) => {
                        assert_eq!(after, target, "open target should be entered");
                    }
                    _ => assert_eq!(after, before, "blocked move should be a no-op"),
                }
            }
        }
    }

    #[test]
    fn test_scenario_clear_first_level() {
        let mut session = create_test_session(3);
        for _ in 0..20 {
            session.tick();
        }
        assert_eq!(session.time_left(), 100);
        let _ = session.take_events();

        walk_to_goal(&mut session);

        let events = session.take_events();
        assert!(
            events.contains(&SessionEvent::LevelCleared {
                earned_score: 200,
                level: 2,
            }),
            "clearing level one with 100s left should earn 200"
        );
        assert_eq!(session.score(), 200);
        assert_eq!(session.level(), 2);
        assert_eq!(session.time_left(), 110);
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.player(), Position::new(0, 0));
        assert!(session.has_active_countdown(), "level two should be counting down");
    }

    #[test]
    fn test_score_accumulates_across_levels() {
        let mut session = create_test_session(4);
        let mut last_score = 0;

        for level in 1..=4 {
            assert_eq!(session.level(), level);
            let time_left = session.time_left();
            walk_to_goal(&mut session);

            assert_eq!(session.score(), last_score + earned_score(level, time_left));
            assert!(session.score() >= last_score, "score should never decrease");
            last_score = session.score();
        }
    }

    #[test]
    fn test_scenario_time_expires() {
        let mut session = create_test_session(5);
        session.start_level(5);
        assert_eq!(session.time_left(), 80);
        let _ = session.take_events();

        let mut previous = session.time_left();
        for _ in 0..80 {
            session.tick();
            assert_eq!(session.time_left(), previous - 1, "each tick should remove one second");
            previous = session.time_left();
        }

        assert_eq!(session.time_left(), 0);
        assert_eq!(session.phase(), Phase::TimeExpired);
        assert!(!session.has_active_countdown(), "expired level should not count down");

        session.tick();
        session.attempt_move(Direction::Down);
        session.attempt_move(Direction::Right);
        assert_eq!(session.time_left(), 0);
        assert_eq!(session.player(), Position::new(0, 0));

        let expirations = session
            .take_events()
            .into_iter()
            .filter(|event| *event == SessionEvent::TimeExpired)
            .count();
        assert_eq!(expirations, 1, "time should expire exactly once");
    }

    #[test]
    fn test_scenario_restart() {
        let mut session = create_test_session(6);
        session.start_level(7);
        session.score = 900;
        let _ = session.take_events();

        session.restart();

        assert_eq!(session.level(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_left(), 120);
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.player(), Position::new(0, 0));
        assert!(session.has_active_countdown(), "restart should start a countdown");
        assert_eq!(
            session.take_events(),
            vec![SessionEvent::Restarted, SessionEvent::Render]
        );
    }

    #[test]
    fn test_restart_after_expiry() {
        let mut session = create_test_session(7);
        for _ in 0..120 {
            session.tick();
        }
        assert_eq!(session.phase(), Phase::TimeExpired);

        session.restart();

        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.time_left(), 120);
    }

    #[test]
    fn test_start_level_replaces_countdown() {
        let mut session = create_test_session(8);
        let now = Instant::now();
        let stale = now
            .checked_sub(Duration::from_secs(5))
            .expect("clock should reach five seconds back");
        session.countdown = Some(Countdown::start(stale));

        session.start_level(3);
        session.advance_clock(now);

        assert_eq!(session.level(), 3);
        assert_eq!(
            session.time_left(),
            100,
            "the earlier countdown should not tick the new level"
        );
        assert!(session.has_active_countdown(), "new level should count down");
    }

    #[test]
    fn test_start_level_zero_is_level_one() {
        let mut session = create_test_session(9);
        session.start_level(0);

        assert_eq!(session.level(), 1);
        assert_eq!(session.time_left(), 120);
    }

    #[test]
    fn test_advance_clock_delivers_due_ticks() {
        let mut session = create_test_session(10);
        session.start_level(1);
        let later = Instant::now() + Duration::from_millis(3500);

        session.advance_clock(later);

        assert_eq!(session.time_left(), 117);
    }

    #[test]
    fn test_advance_clock_stops_at_expiry() {
        let mut session = create_test_session(11);
        session.start_level(10);
        let later = Instant::now() + Duration::from_secs(600);

        session.advance_clock(later);

        assert_eq!(session.time_left(), 0);
        assert_eq!(session.phase(), Phase::TimeExpired);
        assert!(!session.has_active_countdown(), "expired level should not count down");
    }
}
