//! API endpoint modules.

pub mod encoders;
pub mod experiments;
pub mod health;
pub mod networks;
pub mod openapi;
pub mod results;
pub mod videos;

pub use encoders::configure_routes as configure_encoder_routes;
pub use experiments::configure_routes as configure_experiment_routes;
pub use health::configure_health_routes;
pub use networks::configure_routes as configure_network_routes;
pub use openapi::ApiDoc;
pub use results::configure_routes as configure_result_routes;
pub use videos::configure_routes as configure_video_routes;

use actix_multipart::Multipart;
use futures_util::StreamExt;

use crate::error::{AppError, AppResult};

/// Read the first file field out of a multipart form.
///
/// Returns the client-supplied filename and the collected bytes; the size
/// cap is enforced while the stream is read, not after.
pub(crate) async fn read_file_field(
    payload: &mut Multipart,
    max_size: usize,
) -> AppResult<(String, Vec<u8>)> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        let filename = match field.content_disposition().and_then(|cd| cd.get_filename()) {
            Some(name) => name.to_string(),
            // Not a file field, skip it.
            None => continue,
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
            if data.len() + chunk.len() > max_size {
                return Err(AppError::InvalidInput(format!(
                    "File exceeds the maximum upload size of {} bytes",
                    max_size
                )));
            }
            data.extend_from_slice(&chunk);
        }

        return Ok((filename, data));
    }

    Err(AppError::InvalidInput(
        "Missing file in multipart form".to_string(),
    ))
}
