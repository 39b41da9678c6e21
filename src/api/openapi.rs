//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EncodeLab Server",
        version = "0.3.0",
        description = "Data management backend for video encoding experiments: experiment aggregates with sequences, result file storage, and the network/encoder/video catalogs"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Experiment endpoints
        api::experiments::create_experiment,
        api::experiments::list_experiments,
        api::experiments::get_experiment,
        api::experiments::get_experiment_status,
        api::experiments::update_experiment,
        api::experiments::delete_experiment,
        // Result file endpoints
        api::results::upload_result,
        api::results::download_results,
        // Catalog endpoints
        api::networks::list_networks,
        api::networks::get_network,
        api::networks::create_network,
        api::networks::update_network,
        api::networks::delete_network,
        api::encoders::list_encoders,
        api::encoders::get_encoder,
        api::encoders::create_encoder,
        api::encoders::update_encoder,
        api::encoders::delete_encoder,
        api::videos::list_videos,
        api::videos::upload_video,
        api::videos::get_video,
        api::videos::download_video,
        api::videos::delete_video,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::Ack,
            models::Role,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Experiments
            models::ExperimentStatus,
            models::SequenceInput,
            models::SequenceResponse,
            models::CreateExperimentRequest,
            models::UpdateExperimentRequest,
            models::ExperimentResponse,
            models::ExperimentStatusResponse,
            // Catalogs
            models::NetworkInput,
            models::NetworkResponse,
            models::EncoderInput,
            models::EncoderResponse,
            models::VideoResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Experiments", description = "Experiment aggregate management"),
        (name = "Results", description = "Result file upload and bulk download"),
        (name = "Networks", description = "Network profile catalog"),
        (name = "Encoders", description = "Encoder catalog"),
        (name = "Videos", description = "Source video catalog")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add the bearer token security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
