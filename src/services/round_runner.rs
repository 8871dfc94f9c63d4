//! Background task driving a round's timed countdown, evaluation, and result
//! hold.

use tokio::time::sleep;
use tracing::info;

use crate::state::{LockedRound, SharedState, game};

/// Spawn the background sequence for an accepted round.
///
/// The single spawn point for round tasks, so a cancellation token could be
/// threaded through later without touching callers.
pub fn spawn(state: SharedState, locked: LockedRound) {
    tokio::spawn(run(state, locked));
}

/// Drive one accepted round to completion.
///
/// The shared lock is only taken for each discrete mutation, never across a
/// sleep, so detection updates and snapshot reads proceed freely while the
/// round runs. A concurrent reset is not cancelled against: this task keeps
/// writing from its frozen inputs and its tail writes may land on the fresh
/// state.
async fn run(state: SharedState, locked: LockedRound) {
    let ticks = state.config().countdown_ticks;
    let tick_duration = state.config().tick_duration;

    // The first tick was published when the round was admitted; hold it, then
    // publish the remaining ones.
    sleep(tick_duration).await;
    for tick in (1..ticks).rev() {
        state.set_countdown(tick).await;
        sleep(tick_duration).await;
    }

    state.begin_evaluation().await;
    let winner = game::resolve(locked.human, locked.arduino);
    let record = state.complete_round(&locked, winner).await;
    info!(
        round = record.round,
        human = record.human_move.map(game::Move::label).unwrap_or("?"),
        arduino = record.arduino_move.label(),
        winner = ?record.winner,
        "round resolved"
    );

    sleep(state.config().result_hold).await;
    state.finish_round().await;
}
