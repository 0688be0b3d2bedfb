use clap::Parser;
use nhs_insights::config::Command;
use nhs_insights::core::Pipeline;
use nhs_insights::utils::error::{ErrorSeverity, ReportError};
use nhs_insights::utils::{logger, validation::Validate};
use nhs_insights::{
    CliConfig, EtlEngine, LocalStorage, PharmacyCountPipeline, PlottersBackend, ProjectionPipeline,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting nhs-insights");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.load_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let result = match &cli.command {
        Command::PharmacyCount { .. } => match PharmacyCountPipeline::new(config) {
            Ok(pipeline) => run(pipeline, cli.monitor).await,
            Err(e) => Err(e),
        },
        Command::Chart { .. } => {
            let storage = LocalStorage::new(".");
            let pipeline = ProjectionPipeline::new(storage, config, PlottersBackend::new());
            run(pipeline, cli.monitor)
                .await
                .map(|path| format!("📁 Chart saved to: {}", path))
        }
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => exit_with(e),
    }
}

async fn run<P: Pipeline>(pipeline: P, monitor: bool) -> nhs_insights::Result<String> {
    EtlEngine::new_with_monitoring(pipeline, monitor).run().await
}

fn exit_with(e: ReportError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
