use anyhow::Result;
use notedir_core::{AppointmentSource, DateRange, SubprocessSource};

use crate::config;
use crate::pipeline::{self, ErrorPolicy};
use crate::templates::TemplateSet;
use crate::vault::Vault;

pub async fn run(from: Option<String>, to: Option<String>, keep_going: bool) -> Result<()> {
    let cfg = config::load_config()?;

    let range = DateRange::from_args(from.as_deref(), to.as_deref(), cfg.window_days)
        .map_err(|e| anyhow::anyhow!(e))?;

    let source = SubprocessSource::new(&cfg.source.provider, config::source_params(&cfg)?);

    log::info!(
        "Fetching appointments from {} to {}",
        range.from.to_rfc3339(),
        range.to.to_rfc3339()
    );
    let appointments = source.list_appointments(&range).await?;
    println!("Fetched {} appointments", appointments.len());

    let vault = Vault::new(config::vault_path(&cfg));
    let templates = TemplateSet::load(&config::templates_path(&cfg)?)?;

    let policy = if keep_going {
        ErrorPolicy::Continue
    } else {
        ErrorPolicy::FailFast
    };

    let report = pipeline::run(&vault, &templates, &appointments, policy)?;

    println!(
        "\n{} notes written, {} series created, {} series appended",
        report.stats.notes_written, report.stats.series_created, report.stats.series_appended
    );

    for failure in report.failures() {
        if let Err(cause) = &failure.result {
            println!(
                "  failed: {} ({}): {}",
                failure.subject,
                failure.start.format("%Y-%m-%d %H:%M"),
                cause
            );
        }
    }

    if report.stats.failed > 0 {
        anyhow::bail!("{} appointment(s) failed", report.stats.failed);
    }

    Ok(())
}
