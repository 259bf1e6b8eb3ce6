//! Environment bindings for Python.

use numpy::{PyArray1, PyArrayMethods};
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

use crate::core::{EnvConfig, RewardConfig, Side, BOARD_SIZE};
use crate::oracle::{FirstLegalOracle, MinimaxOracle, Oracle, RandomOracle};
use crate::rules::{GameResult, Termination};
use crate::session::{GameSession, Observation, SessionState, StepInfo};

use super::value_error;

fn make_opponent(name: Option<&str>, seed: u64) -> PyResult<Option<Box<dyn Oracle>>> {
    let oracle: Box<dyn Oracle> = match name {
        None => return Ok(None),
        Some("first") => Box::new(FirstLegalOracle),
        Some("random") => Box::new(RandomOracle::for_session(seed)),
        Some("minimax") => Box::new(MinimaxOracle::new()),
        Some(other) => {
            return Err(value_error(format!(
                "unknown opponent {other:?}, expected \"first\", \"random\" or \"minimax\""
            )))
        }
    };
    Ok(Some(oracle))
}

fn observation_dict<'py>(py: Python<'py>, obs: &Observation) -> PyResult<Bound<'py, PyDict>> {
    let cells: Vec<bool> = obs.board.to_bytes().iter().map(|&b| b == 1).collect();
    let board = PyArray1::from_vec_bound(py, cells)
        .reshape([BOARD_SIZE, BOARD_SIZE, 2])
        .map_err(value_error)?;

    let dict = PyDict::new_bound(py);
    dict.set_item("board", board)?;
    dict.set_item("turn", obs.turn.is_blue())?;
    dict.set_item("turns", obs.turn_count)?;
    Ok(dict)
}

fn info_dict<'py>(py: Python<'py>, info: &StepInfo) -> PyResult<Bound<'py, PyDict>> {
    let winner = info.result.map(|result| match result {
        GameResult::Winner(Side::Blue) => "blue",
        GameResult::Winner(Side::Green) => "green",
        GameResult::Draw => "draw",
    });
    let reason = info.reason.map(|reason| match reason {
        Termination::Stalemate => "stalemate",
        Termination::Elimination => "elimination",
    });

    let dict = PyDict::new_bound(py);
    dict.set_item("applied", info.applied)?;
    dict.set_item("illegal_action", info.illegal_action)?;
    dict.set_item("passed", info.passed)?;
    dict.set_item("converted", info.converted)?;
    dict.set_item("opponent_action", info.opponent_action.map(|a| a.raw()))?;
    dict.set_item("opponent_passed", info.opponent_passed)?;
    dict.set_item("winner", winner)?;
    dict.set_item("reason", reason)?;
    Ok(dict)
}

/// Python wrapper for GameSession.
///
/// Observations are dicts with a `(7, 7, 2)` boolean `board` in
/// `[green, blue]` channel order, `turn` (True for Blue) and `turns`.
#[pyclass(name = "MicroscopeEnv")]
pub struct PyMicroscopeEnv {
    session: GameSession,
}

#[pymethods]
impl PyMicroscopeEnv {
    /// Create a new environment.
    ///
    /// # Arguments
    /// - turn_limit: half-moves before truncation
    /// - random_start: randomize the opening placement
    /// - seed: RNG seed for openings and the random opponent
    /// - opponent: None, "first", "random" or "minimax"
    /// - opponent_depth: search depth handed to the opponent
    /// - illegal_action_reward: penalty for an illegal move
    #[new]
    #[pyo3(signature = (
        turn_limit = 100,
        random_start = false,
        seed = 42,
        opponent = None,
        opponent_depth = 3,
        illegal_action_reward = -5.0
    ))]
    fn new(
        turn_limit: u32,
        random_start: bool,
        seed: u64,
        opponent: Option<&str>,
        opponent_depth: u32,
        illegal_action_reward: f32,
    ) -> PyResult<Self> {
        let mut config = EnvConfig::new()
            .with_random_start(random_start)
            .with_seed(seed)
            .with_opponent_depth(opponent_depth)
            .with_rewards(RewardConfig::default().with_illegal_action(illegal_action_reward));
        config.turn_limit = turn_limit;

        let mut session = GameSession::try_new(config).map_err(value_error)?;
        session.set_opponent(make_opponent(opponent, seed)?);
        Ok(Self { session })
    }

    /// Start a new episode.
    ///
    /// Returns `(observation, info)`; `info` is empty at reset.
    #[pyo3(signature = (seed = None))]
    fn reset<'py>(
        &mut self,
        py: Python<'py>,
        seed: Option<u64>,
    ) -> PyResult<(Bound<'py, PyDict>, Bound<'py, PyDict>)> {
        let obs = self.session.reset(seed);
        Ok((observation_dict(py, &obs)?, PyDict::new_bound(py)))
    }

    /// Play an action id.
    ///
    /// Returns `(observation, reward, terminated, truncated, info)`.
    /// Raises `ValueError` for ids outside `[0, 1225)` or after the episode
    /// has ended.
    #[allow(clippy::type_complexity)]
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: u32,
    ) -> PyResult<(Bound<'py, PyDict>, f32, bool, bool, Bound<'py, PyDict>)> {
        let result = self.session.step(action).map_err(value_error)?;
        Ok((
            observation_dict(py, &result.observation)?,
            result.reward,
            result.terminated,
            result.truncated,
            info_dict(py, &result.info)?,
        ))
    }

    /// Legal actions for the side to move as a boolean array.
    fn action_masks<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_vec_bound(py, self.session.action_mask().to_bools())
    }

    /// Current observation without stepping.
    fn observation<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        observation_dict(py, &self.session.observation())
    }

    /// Text preview of the board.
    fn render(&self) -> String {
        self.session.render()
    }

    /// The board in the 98-byte wire format.
    fn board_bytes<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        PyBytes::new_bound(py, &self.session.board().to_bytes())
    }

    /// True when Blue is to move.
    #[getter]
    fn turn(&self) -> bool {
        self.session.turn().is_blue()
    }

    /// Completed half-moves since reset.
    #[getter]
    fn turns(&self) -> u32 {
        self.session.turn_count()
    }

    /// Whether the episode has ended.
    #[getter]
    fn done(&self) -> bool {
        self.session.state() == SessionState::Terminated
    }

    /// Number of discrete actions.
    #[getter]
    fn action_count(&self) -> usize {
        crate::core::ACTION_COUNT
    }

    fn __repr__(&self) -> String {
        format!(
            "MicroscopeEnv(turns={}, turn={}, done={})",
            self.session.turn_count(),
            self.session.turn(),
            self.done()
        )
    }
}
