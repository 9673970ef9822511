mod constants;
mod fs_utils;

pub mod backend;
#[cfg(feature = "desktop")]
mod commands;
pub mod compositor;
pub mod config;
pub mod error;
pub mod models;
pub mod prompts;
pub mod session;
pub mod styles;
pub mod uploads;

pub use backend::{composition_image_config, GeminiBackend, GenerativeBackend, Synthesis};
pub use compositor::Compositor;
pub use config::AppConfig;
pub use constants::{
    API_KEY_ENV, DEFAULT_DESCRIBE_MODEL, DEFAULT_GEMINI_ENDPOINT, DEFAULT_IMAGE_MODEL,
    DESCRIBE_INSTRUCTION, OUTPUT_ASPECT_RATIO, OUTPUT_IMAGE_MIME, PREVIEW_SCHEME,
};
pub use error::{ComposeError, ConfigError, UploadError};
pub use fs_utils::{decode_upload, read_image_file};
pub use models::{
    GeneratedImage, GenerationResult, ImagePayload, ImageSet, RequestState, SessionSnapshot, Slot,
    UploadImagePayload,
};
pub use session::ComposerSession;
pub use styles::{StyleSelection, PHOTO_STYLES};
pub use uploads::{PreviewRegistry, UploadManager, UploadOutcome};

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a subscriber may already be installed by an embedding host
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Arc;
    use tauri::Manager;

    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "refusing to start");
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        describe_model = %config.describe_model,
        image_model = %config.image_model,
        "starting fashion compositor"
    );

    let registry = PreviewRegistry::new();
    let backend = Arc::new(GeminiBackend::new(&config));
    let session = ComposerSession::new(backend, registry.clone());

    tauri::Builder::default()
        .manage(session)
        .register_uri_scheme_protocol(PREVIEW_SCHEME, move |_ctx, request| {
            commands::preview::preview_response(&registry, request.uri().path())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Destroyed = event {
                window.state::<ComposerSession>().shutdown();
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::generate::list_styles,
            commands::generate::select_style,
            commands::generate::generate_compositions,
            commands::uploads::get_session,
            commands::uploads::upload_image,
            commands::uploads::upload_image_file,
            commands::uploads::clear_image
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
