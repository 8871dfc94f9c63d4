use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the rock-paper-scissors backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::get_state,
        crate::routes::game::play,
        crate::routes::game::reset,
        crate::routes::game::push_detections,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::CommandAck,
            crate::dto::game::GameStateResponse,
            crate::dto::detection::ConfidenceValue,
            crate::state::game::Move,
            crate::state::game::Outcome,
            crate::state::game::RoundRecord,
            crate::state::RoundPhase,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Round lifecycle and state polling"),
        (name = "detections", description = "Gesture classifier ingest"),
    )
)]
pub struct ApiDoc;
