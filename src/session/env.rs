//! The step/reset environment driven by a training loop.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{
    ActionId, ActionMask, Board, ConfigError, EnvConfig, GameRng, GameRngState, SessionError,
    Side,
};
use crate::oracle::{consult, Oracle};
use crate::rules::{apply, evaluate, has_legal_action, legal_action_mask};

use super::observation::{Observation, StepInfo, StepResult};

/// Lifecycle of a session between resets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    InProgress,
    Terminated,
}

/// One episode of play on a single board.
///
/// Without an opponent the caller plays both sides in turn. With one, the
/// caller plays the side to move at reset and the opponent answers for the
/// other side inside [`GameSession::step`]. That is Blue after
/// [`GameSession::reset`] and whichever side [`GameSession::reset_to`] names.
pub struct GameSession {
    config: EnvConfig,
    board: Board,
    turn: Side,
    turn_count: u32,
    state: SessionState,
    rng: GameRng,
    opponent: Option<Box<dyn Oracle>>,
}

impl GameSession {
    /// Create a session positioned at the opening.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`EnvConfig::validate`]. Use
    /// [`GameSession::try_new`] for configs built by hand.
    #[must_use]
    pub fn new(config: EnvConfig) -> Self {
        match Self::try_new(config) {
            Ok(session) => session,
            Err(err) => panic!("invalid environment config: {err}"),
        }
    }

    /// Create a session positioned at the opening, rejecting unusable configs.
    ///
    /// # Errors
    ///
    /// Whatever [`EnvConfig::validate`] reports.
    pub fn try_new(config: EnvConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = GameRng::new(config.seed);
        let mut session = Self {
            config,
            board: Board::empty(),
            turn: Side::FIRST,
            turn_count: 0,
            state: SessionState::InProgress,
            rng,
            opponent: None,
        };
        session.reset(None);
        Ok(session)
    }

    /// Let `oracle` reply for the side the caller is not playing.
    #[must_use]
    pub fn with_opponent(mut self, oracle: Box<dyn Oracle>) -> Self {
        self.opponent = Some(oracle);
        self
    }

    /// Replace or remove the opponent. Takes effect on the next step.
    pub fn set_opponent(&mut self, oracle: Option<Box<dyn Oracle>>) {
        self.opponent = oracle;
    }

    /// Start a new episode.
    ///
    /// `seed` reseeds the session RNG so randomized openings can be replayed.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        if let Some(seed) = seed {
            self.rng = GameRng::new(seed);
        }

        let randomize =
            self.config.random_start && !self.rng.gen_bool(self.config.fixed_start_probability);
        self.board = if randomize {
            Board::random_start(&mut self.rng)
        } else {
            Board::starting()
        };
        self.turn = Side::FIRST;
        self.turn_count = 0;
        self.state = SessionState::InProgress;

        log::debug!("reset (random start: {randomize})");
        self.observation()
    }

    /// Checkpoint of the session RNG, for replaying the next randomized resets.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Rewind the session RNG to a checkpoint from [`GameSession::rng_state`].
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
    }

    /// Start a new episode from an arbitrary position with `turn` to move.
    pub fn reset_to(&mut self, board: Board, turn: Side) -> Observation {
        self.board = board;
        self.turn = turn;
        self.turn_count = 0;
        self.state = SessionState::InProgress;
        self.observation()
    }

    /// Play `raw` for the side to move.
    ///
    /// # Errors
    ///
    /// [`SessionError::Terminated`] after the episode ended, and
    /// [`SessionError::Action`] when `raw` is not an action id. Neither
    /// changes the session.
    pub fn step(&mut self, raw: u32) -> Result<StepResult, SessionError> {
        if self.state == SessionState::Terminated {
            return Err(SessionError::Terminated);
        }
        let action = ActionId::new(raw)?;
        let mover = self.turn;
        let mut info = StepInfo::default();

        match apply(&mut self.board, action, mover) {
            Some(outcome) => {
                info.applied = true;
                info.converted = outcome.converted.len();
                self.advance();
            }
            None if has_legal_action(&self.board, mover) => {
                log::warn!("{mover} played illegal action {action} ({})", action.decode());
                info.illegal_action = true;
                self.state = SessionState::Terminated;
                return Ok(StepResult {
                    observation: self.observation(),
                    reward: self.config.rewards.illegal_action,
                    terminated: true,
                    truncated: false,
                    info,
                });
            }
            None => {
                log::debug!("{mover} has no legal action and passes");
                info.passed = true;
                self.turn = mover.opponent();
            }
        }

        let mut evaluation = evaluate(&self.board, mover, &self.config.rewards);

        if !evaluation.terminated {
            if let Some(oracle) = self.opponent.as_mut() {
                let replier = self.turn;
                let reply = consult(oracle.as_mut(), &self.board, self.config.opponent_depth, replier);
                match reply.and_then(|action| apply(&mut self.board, action, replier)) {
                    Some(outcome) => {
                        info.opponent_action = Some(outcome.action);
                        self.advance();
                    }
                    None => {
                        log::debug!("opponent {replier} passes");
                        info.opponent_passed = true;
                        self.turn = replier.opponent();
                    }
                }
                evaluation = evaluate(&self.board, mover, &self.config.rewards);
            }
        }

        let terminated = evaluation.terminated;
        let truncated = !terminated && self.turn_count >= self.config.turn_limit;
        let reward = if terminated {
            evaluation.reward
        } else {
            self.config.rewards.non_terminal(self.turn_count)
        };

        if terminated || truncated {
            self.state = SessionState::Terminated;
            log::debug!(
                "episode over after {} turns: {:?} {:?}",
                self.turn_count,
                evaluation.result,
                evaluation.reason
            );
        }

        info.result = evaluation.result;
        info.reason = evaluation.reason;

        Ok(StepResult {
            observation: self.observation(),
            reward,
            terminated,
            truncated,
            info,
        })
    }

    fn advance(&mut self) {
        self.turn_count += 1;
        self.turn = self.turn.opponent();
    }

    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation {
            board: self.board,
            turn: self.turn,
            turn_count: self.turn_count,
        }
    }

    /// Legal actions for the side to move.
    #[must_use]
    pub fn action_mask(&self) -> ActionMask {
        legal_action_mask(&self.board, self.turn)
    }

    /// Text preview of the board with the side to move and turn count.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{}turn {} ({} to move)\n",
            self.board, self.turn_count, self.turn
        )
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Whether an opponent answers inside `step`.
    #[must_use]
    pub fn has_opponent(&self) -> bool {
        self.opponent.is_some()
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("turn", &self.turn)
            .field("turn_count", &self.turn_count)
            .field("state", &self.state)
            .field("opponent", &self.opponent.as_ref().map(|o| o.name()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encode;

    #[test]
    fn test_new_session_is_at_opening() {
        let session = GameSession::new(EnvConfig::default());
        assert_eq!(session.board(), &Board::starting());
        assert_eq!(session.turn(), Side::Blue);
        assert_eq!(session.turn_count(), 0);
        assert_eq!(session.state(), SessionState::InProgress);
        assert!(!session.has_opponent());
    }

    #[test]
    fn test_step_clone_advances() {
        let mut session = GameSession::new(EnvConfig::default());
        let action = encode(0, 0, 1, 1).unwrap();

        let result = session.step(action.raw()).unwrap();
        assert!(result.info.applied);
        assert!(!result.done());
        assert_eq!(result.reward, 0.0);
        assert_eq!(result.observation.turn, Side::Green);
        assert_eq!(result.observation.turn_count, 1);
        assert_eq!(session.board().count(Side::Blue), 3);
    }

    #[test]
    fn test_action_mask_follows_turn() {
        let mut session = GameSession::new(EnvConfig::default());
        let blue_move = encode(0, 0, 1, 1).unwrap();
        assert!(session.action_mask().contains(blue_move));

        session.step(blue_move.raw()).unwrap();
        assert!(!session.action_mask().contains(encode(0, 0, 0, 1).unwrap()));
        assert!(session.action_mask().contains(encode(6, 0, 5, 1).unwrap()));
    }

    #[test]
    fn test_turn_decay() {
        let config = EnvConfig::default()
            .with_rewards(crate::core::RewardConfig::default().with_turn_decay(0.5));
        let mut session = GameSession::new(config);
        let result = session.step(encode(0, 0, 1, 1).unwrap().raw()).unwrap();
        assert_eq!(result.reward, -0.5);
    }

    #[test]
    fn test_render_mentions_turn() {
        let session = GameSession::new(EnvConfig::default());
        let text = session.render();
        assert!(text.contains("turn 0"));
        assert!(text.contains("Blue to move"));
    }

    #[test]
    fn test_debug_names_opponent() {
        let session = GameSession::new(EnvConfig::default())
            .with_opponent(Box::new(crate::oracle::FirstLegalOracle));
        assert!(format!("{session:?}").contains("first-legal"));
    }
}
