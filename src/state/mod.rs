pub mod game;
pub mod state_machine;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::config::AppConfig;
use crate::state::game::{Move, Outcome, RoundRecord};

pub use self::state_machine::{GameState, LockedRound, RoundInProgress, RoundPhase};

/// Shared handle to the application state, cloned into every task and route.
pub type SharedState = Arc<AppState>;

/// Central application state owning the single shared game store.
///
/// One lock guards all reads and writes; every method acquires it only for
/// the duration of one discrete mutation or copy, so high-frequency detection
/// updates, snapshot pollers, and the round task never block each other for
/// longer than that.
pub struct AppState {
    game: RwLock<GameState>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            game: RwLock::new(GameState::new()),
            config,
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Overwrite the live detection unless a round has locked it.
    pub async fn update_detection(&self, label: Move, confidence: f64) {
        let changed = {
            let mut game = self.game.write().await;
            game.update_detection(label, confidence)
        };
        if changed {
            info!(label = label.label(), confidence, "detection updated");
        }
    }

    /// Admission-check a round start and enter the countdown, freezing the
    /// current detection as the round's human-move source.
    ///
    /// The check and the transition happen under one lock acquisition, so at
    /// most one caller can move the store out of idle.
    pub async fn begin_round(&self, arduino: Move) -> Result<LockedRound, RoundInProgress> {
        let mut game = self.game.write().await;
        game.begin_round(arduino, self.config.countdown_ticks)
    }

    /// Publish the next countdown tick.
    pub async fn set_countdown(&self, tick: u8) {
        self.game.write().await.set_countdown(tick);
    }

    /// Move the in-flight round from countdown to evaluation.
    pub async fn begin_evaluation(&self) {
        self.game.write().await.begin_evaluation();
    }

    /// Score the in-flight round and make its record visible.
    pub async fn complete_round(&self, locked: &LockedRound, winner: Outcome) -> RoundRecord {
        self.game.write().await.complete_round(locked, winner)
    }

    /// End the result hold and return the store to idle.
    pub async fn finish_round(&self) {
        self.game.write().await.finish_round();
    }

    /// Zero scores and history, force idle, release the detection lock.
    pub async fn reset(&self) {
        self.game.write().await.reset();
    }

    /// Deep, point-in-time copy of the entire game state.
    pub async fn snapshot(&self) -> GameState {
        self.game.read().await.clone()
    }
}
