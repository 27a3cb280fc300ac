// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use keeppim::{
    keeppim_version,
    modules::{
        decode::{decode_records, load_records, render},
        error::{code::ErrorCode, ApiError, PimResult},
        item::factory::ItemFactory,
        logger,
        settings::cli::{PimConfig, SETTINGS},
    },
    raise_error,
};
use mimalloc::MiMalloc;
use tracing::{error, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> PimResult<()> {
    logger::initialize_logging();
    info!("Starting keeppim {}", keeppim_version!());

    if let Err(error) = run().await {
        error!("{:?}", error);
        eprintln!("{}", ApiError::from(&error));
        return Err(error);
    }
    Ok(())
}

async fn run() -> PimResult<()> {
    let input = SETTINGS.keeppim_decode_input.as_deref().ok_or_else(|| {
        raise_error!(
            "No input given, pass --keeppim-decode-input <file>".into(),
            ErrorCode::MissingConfiguration
        )
    })?;
    let config = PimConfig::from(&*SETTINGS);
    let factory = ItemFactory::new(config.default_calendar_id);

    let records = load_records(input).await?;
    let items = decode_records(
        &factory,
        &records,
        SETTINGS.keeppim_decode_view.as_deref(),
    );
    println!("{}", render(&items)?);
    Ok(())
}
