//! `clothswap` -- command-line client for the ClothSwap relay.
//!
//! Drives a single transformation job: loads the images, validates
//! them, submits once to the relay, and prints the result URL or the
//! failure message.
//!
//! Usage: `clothswap <source-image> [reference-garment]`
//!
//! # Environment variables
//!
//! | Variable           | Required | Default                                | Description              |
//! |--------------------|----------|----------------------------------------|--------------------------|
//! | `RELAY_URL`        | no       | `http://localhost:3000/api/clothswap`  | Relay endpoint           |
//! | `CLOTHSWAP_PROMPT` | no       | --                                     | Garment description text |

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clothswap_client::controller::JobController;
use clothswap_client::relay::{HttpRelay, DEFAULT_RELAY_URL};
use clothswap_client::upload::read_image_upload;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clothswap_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let source_path: PathBuf = match args.next() {
        Some(path) => path.into(),
        None => {
            eprintln!("Usage: clothswap <source-image> [reference-garment]");
            std::process::exit(1);
        }
    };
    let garment_path: Option<PathBuf> = args.next().map(Into::into);

    let relay_url = std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.into());
    let prompt = std::env::var("CLOTHSWAP_PROMPT").unwrap_or_default();

    tracing::info!(
        relay_url = %relay_url,
        source = %source_path.display(),
        has_garment = garment_path.is_some(),
        "Starting clothswap job"
    );

    let mut controller = JobController::new();

    select_file(&mut controller, &source_path, Selection::Source);
    if let Some(path) = &garment_path {
        select_file(&mut controller, path, Selection::Garment);
    }
    controller.set_prompt(prompt);

    let relay = HttpRelay::new(relay_url);
    controller.submit(&relay).await;

    match controller.download_target() {
        Some((url, filename)) => {
            println!("{url}");
            tracing::info!(url, suggested_filename = filename, "Transformation complete");
        }
        None => {
            let message = controller.error().unwrap_or("An error occurred");
            eprintln!("Error: {message}");
            std::process::exit(2);
        }
    }
}

enum Selection {
    Source,
    Garment,
}

/// Load a file and hand it to the controller's selection path,
/// exiting on I/O or validation failure (a CLI has no re-select loop).
fn select_file(controller: &mut JobController, path: &std::path::Path, slot: Selection) {
    let upload = read_image_upload(path).unwrap_or_else(|e| {
        eprintln!("Error: cannot read {}: {e}", path.display());
        std::process::exit(1);
    });

    match slot {
        Selection::Source => controller.select_source_image(upload),
        Selection::Garment => controller.select_reference_garment(upload),
    }

    if let Some(message) = controller.error() {
        eprintln!("Error: {}: {message}", path.display());
        std::process::exit(1);
    }
}
