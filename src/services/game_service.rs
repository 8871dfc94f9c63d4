use tracing::info;

use crate::{
    dto::{common::CommandAck, game::GameStateResponse},
    error::ServiceError,
    services::round_runner,
    state::{SharedState, game::Move},
};

/// Accept a round start request and spawn the timed round sequence.
///
/// The admission check and the idle-to-countdown transition happen atomically
/// in [`AppState::begin_round`]; a request while a round is active is rejected
/// with no state change. The caller only observes that the round was accepted,
/// the multi-second remainder runs on its own task.
///
/// [`AppState::begin_round`]: crate::state::AppState::begin_round
pub async fn start_round(state: &SharedState) -> Result<CommandAck, ServiceError> {
    let arduino = Move::random();
    let locked = state.begin_round(arduino).await?;

    match locked.human {
        Some(human) => info!(
            human = human.label(),
            confidence = locked.confidence,
            arduino = arduino.label(),
            "round locked in"
        ),
        None => info!(arduino = arduino.label(), "round locked in with no detection"),
    }

    round_runner::spawn(state.clone(), locked);
    Ok(CommandAck::ok("Round started"))
}

/// Zero scores and history and force the store back to idle.
///
/// Always succeeds, in any phase. An in-flight round task is not cancelled
/// and its remaining writes may land after this reset.
pub async fn reset(state: &SharedState) -> CommandAck {
    state.reset().await;
    info!("scores reset");
    CommandAck::ok_bare()
}

/// Produce the flat state snapshot served to pollers.
pub async fn current_state(state: &SharedState) -> GameStateResponse {
    state.snapshot().await.into()
}
