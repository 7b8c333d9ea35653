use clap::Parser;
use image_variants::config::cli::Command;
use image_variants::utils::error::ErrorSeverity;
use image_variants::utils::{logger, validation::Validate};
use image_variants::{
    CliArgs, ContentHandle, FsContentResolver, LocalStorage, VariantConfig, VariantEngine,
    VariantError, VariantPipeline,
};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,      // warning only
        ErrorSeverity::Medium => 2,   // bad input
        ErrorSeverity::High => 1,     // processing failed
        ErrorSeverity::Critical => 3, // configuration or system
    }
}

fn report_failure(handle: &str, e: &VariantError) {
    tracing::error!(
        handle,
        category = ?e.category(),
        severity = ?e.severity(),
        "❌ {}",
        e
    );
    eprintln!("❌ {}: {}", handle, e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("Starting image-variants");

    let mut config = match VariantConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_failure("config", &e);
            std::process::exit(exit_code(e.severity()));
        }
    };
    args.apply_to(&mut config);

    if let Err(e) = config.validate() {
        report_failure("config", &e);
        std::process::exit(exit_code(e.severity()));
    }
    tracing::debug!("Effective config: {:?}", config);

    let monitor_enabled = config.monitoring_enabled();
    let storage = LocalStorage::from_config(&config);
    let pipeline = VariantPipeline::new(FsContentResolver::new(), storage, config);
    let engine = VariantEngine::new_with_monitoring(pipeline, monitor_enabled);

    let mut worst: Option<ErrorSeverity> = None;
    match &args.command {
        Command::Image { handles } => {
            let results = engine
                .derive_all(handles.iter().map(|h| ContentHandle::new(h.as_str())).collect())
                .await;
            let mut reports = Vec::with_capacity(results.len());
            for (handle, result) in handles.iter().zip(results) {
                match result {
                    Ok(report) => {
                        if !args.json {
                            println!("{}\t{}", report.paths.original, report.paths.preview);
                        }
                        reports.push(report);
                    }
                    Err(e) => {
                        report_failure(handle, &e);
                        worst = worst.max(Some(e.severity()));
                    }
                }
            }
            if args.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }
        }
        Command::Video { handles } => {
            let mut copied = Vec::with_capacity(handles.len());
            for handle in handles {
                match engine.copy_video(ContentHandle::new(handle.as_str())).await {
                    Ok(path) => {
                        let path = path.to_string_lossy().into_owned();
                        if !args.json {
                            println!("{}", path);
                        }
                        copied.push(path);
                    }
                    Err(e) => {
                        report_failure(handle, &e);
                        worst = worst.max(Some(e.severity()));
                    }
                }
            }
            if args.json {
                println!("{}", serde_json::to_string_pretty(&copied)?);
            }
        }
    }

    engine.monitor().log_final_stats();

    if let Some(severity) = worst {
        let code = exit_code(severity);
        if code > 0 {
            std::process::exit(code);
        }
    }
    Ok(())
}
