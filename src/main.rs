use chrono::Datelike;
use clap::Parser;
use flat_maintenance::adapters::{open_history_store, storage::LocalStorage};
use flat_maintenance::config::{AppConfig, CalculateArgs, CliConfig, Command, HistoryAction};
use flat_maintenance::core::breakdown::render_breakdown;
use flat_maintenance::core::clock::SystemClock;
use flat_maintenance::core::export::write_export;
use flat_maintenance::core::history::HistoryService;
use flat_maintenance::core::reminders::{events_on, upcoming};
use flat_maintenance::core::share::{build_share_link_with_base, ShareMessageBuilder};
use flat_maintenance::core::{Clock, ConfigProvider, HistoryStore};
use flat_maintenance::utils::error::{MaintenanceError, Result};
use flat_maintenance::utils::validation::{parse_form, RawForm, Validate};
use flat_maintenance::utils::logger;
use flat_maintenance::{Calculator, CurrencyFormatter};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }
}

async fn run(command: Command, config: AppConfig) -> Result<()> {
    let formatter = CurrencyFormatter::new(config.locale().clone());
    let clock = SystemClock;

    match command {
        Command::Calculate(args) => calculate(args, &config, &formatter, &clock).await,
        Command::History { action } => {
            let service = HistoryService::new(open_store(&config)?);
            match action {
                HistoryAction::List => {
                    let records = service.list().await?;
                    if records.is_empty() {
                        println!("No calculations yet. Save one with `calculate --save`.");
                    }
                    for r in &records {
                        println!(
                            "{}  {}  flats: {:>3}  total: {:>12}  per flat: {:>10}  surplus: {:>10}",
                            r.id,
                            r.calculation_date.format("%b %Y"),
                            r.number_of_flats,
                            formatter.format_currency(r.total_expense),
                            formatter.format_currency(r.cost_per_flat),
                            formatter.format_currency(r.surplus),
                        );
                    }
                    Ok(())
                }
                HistoryAction::Delete { id } => {
                    service.delete(&id).await?;
                    println!("✅ Record deleted");
                    Ok(())
                }
                HistoryAction::Export { file } => {
                    let records = service.list().await?;
                    let dir = file
                        .parent()
                        .filter(|p| !p.as_os_str().is_empty())
                        .map(|p| p.to_path_buf())
                        .unwrap_or_else(|| ".".into());
                    let name = file
                        .file_name()
                        .and_then(|n| n.to_str())
                        .ok_or_else(|| MaintenanceError::InvalidConfigValue {
                            field: "file".to_string(),
                            value: file.display().to_string(),
                            reason: "Export path must name a file".to_string(),
                        })?;
                    let count = write_export(&LocalStorage::new(dir), name, &records).await?;
                    println!("📁 Exported {} records to {}", count, file.display());
                    Ok(())
                }
            }
        }
        Command::Reminders { limit, on } => {
            let today = clock.today();
            let events = config.reminder_events(today.year());
            match on {
                Some(day) => {
                    for event in events_on(&events, day) {
                        println!("{}  {} ({})", day, event.title, event.kind.label());
                    }
                }
                None => {
                    for (date, event) in upcoming(&events, today, limit) {
                        println!(
                            "{}  {} ({}){}",
                            formatter.format_date(date),
                            event.title,
                            event.kind.label(),
                            event
                                .description
                                .as_deref()
                                .map(|d| format!(" - {}", d))
                                .unwrap_or_default()
                        );
                    }
                }
            }
            Ok(())
        }
    }
}

async fn calculate(
    args: CalculateArgs,
    config: &AppConfig,
    formatter: &CurrencyFormatter,
    clock: &dyn Clock,
) -> Result<()> {
    let form = RawForm {
        electricity: args.electricity,
        water: args.water,
        watchman: args.watchman,
        garbage: args.garbage,
        number_of_flats: args.flats,
    };
    let input = match parse_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            for e in &errors {
                if let MaintenanceError::Validation { field, message } = e {
                    eprintln!("❌ {}: {}", field, message);
                }
            }
            std::process::exit(1);
        }
    };

    let calculator = Calculator::new(config.rounding_unit())?;
    let result = calculator.calculate(&input)?;
    print!(
        "{}",
        render_breakdown(&input, &result, calculator.rounding_unit(), formatter)
    );

    if args.share {
        let message = ShareMessageBuilder::new(formatter, clock)
            .with_due_in_days(config.share().due_in_days)
            .build(&input, &result, args.due_date);
        let phone = args.phone.as_deref().or(config.share().default_phone.as_deref());
        let link = build_share_link_with_base(&config.share().base_url, &message, phone)?;
        println!("\n{}\n\n🔗 {}", message, link);
    }

    if args.save {
        // the result above stays valid even if the store is unreachable
        let saved = match open_store(config) {
            Ok(store) => HistoryService::new(store).save(&input, &result, clock.today()).await,
            Err(e) => Err(e),
        };
        match saved {
            Ok(record) => println!("\n✅ Saved calculation {}", record.id),
            Err(e) => {
                tracing::warn!("⚠️ Failed to save calculation: {}", e);
                eprintln!("⚠️ {}; the calculation was not saved", e.user_friendly_message());
            }
        }
    }

    Ok(())
}

fn open_store(config: &AppConfig) -> Result<Box<dyn HistoryStore>> {
    let location = config
        .store_location()
        .ok_or_else(|| MaintenanceError::MissingConfig {
            field: "store.location".to_string(),
        })?;
    open_history_store(location, &config.store.table, config.store.api_key.clone())
}
