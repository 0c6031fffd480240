//! Cycle wiring: fetch, evaluate, deliver.

use chrono::Utc;
use notify::{alert_message, status_message, SlackNotifier, StatusSummary};
use resorts::Resort;
use snowfall::{
    canonical, classify, needs_secondary, AlertDecision, Confidence, CooldownStore, CycleReport,
    Engine, EngineConfig, JsonFileCooldownStore, LocationReading, MemoryCooldownStore, SnowRecord,
    Source, VerifierConfig,
};
use tracing::{info, warn};
use weather::{OpenWeatherClient, WeatherApiClient};
use weather_spi::WeatherProvider;

use crate::settings::Settings;
use crate::CliResult;

/// Run one evaluation cycle: fetch, decide, deliver, report.
pub fn check(dry_run: bool, json: bool) -> CliResult<()> {
    let settings = Settings::from_env();
    let missing = settings.missing();
    if !missing.is_empty() {
        return Err(format!(
            "missing required environment variables: {}",
            missing.join(", ")
        ));
    }

    let config = EngineConfig::from_env().map_err(|e| e.to_string())?;
    let store: Box<dyn CooldownStore> = match &settings.cooldown_state_path {
        Some(path) => Box::new(JsonFileCooldownStore::open(path).map_err(|e| e.to_string())?),
        None => Box::new(MemoryCooldownStore::new()),
    };
    let mut engine = Engine::new(config, store).map_err(|e| e.to_string())?;
    let verifier = engine.config().verifier;

    let all = resorts::builtin();
    let selected = resorts::enabled(&all);
    if selected.is_empty() {
        return Err("no resorts enabled".to_string());
    }

    let primary = OpenWeatherClient::new(&settings.openweather_api_key);
    let secondary = WeatherApiClient::new(&settings.weatherapi_key);

    info!(resorts = selected.len(), "starting evaluation cycle");
    let readings: Vec<LocationReading> = selected
        .iter()
        .map(|resort| gather(resort, &primary, &secondary, &verifier))
        .collect();

    let report = engine.run_cycle(&readings, Utc::now());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?
        );
    } else {
        for decision in &report.decisions {
            match decision.suppress_reason {
                None => println!(
                    "{}: {} alert at {:.1}\"",
                    decision.location_id, decision.tier, decision.verified_snow_in
                ),
                Some(reason) => {
                    println!("{}: no alert ({})", decision.location_id, reason)
                }
            }
        }
    }

    deliver(&settings, dry_run, &report, &selected)
}

/// Fetch both sources for one resort.
///
/// Any fetch failure degrades to a missing payload; the engine turns that
/// into a non-notifying decision (primary) or a single-source verification
/// (secondary) without aborting the batch.
fn gather(
    resort: &Resort,
    primary: &OpenWeatherClient,
    secondary: &WeatherApiClient,
    verifier: &VerifierConfig,
) -> LocationReading {
    let coordinates = resort.coordinates;

    let primary_raw = match primary.observe(&coordinates) {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!(resort = %resort.name, error = %e, "primary fetch failed");
            None
        }
    };

    // Secondary quota guard: only spend the verification call on readings
    // above the noise floor.
    let secondary_raw = primary_raw.as_ref().and_then(|raw| {
        let worth_verifying = canonical(&resort.name, raw)
            .map(|record| needs_secondary(record.observed_snow_in, verifier))
            .unwrap_or(false);
        if !worth_verifying {
            return None;
        }
        match secondary.observe(&coordinates) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(
                    resort = %resort.name,
                    error = %e,
                    "secondary fetch failed, proceeding single-source"
                );
                None
            }
        }
    });

    LocationReading::new(resort.name.clone(), primary_raw, secondary_raw)
}

fn deliver(
    settings: &Settings,
    dry_run: bool,
    report: &CycleReport,
    selected: &[Resort],
) -> CliResult<()> {
    let mut notifier = SlackNotifier::new(&settings.slack_webhook_url);
    if let Some(url) = &settings.slack_monitoring_webhook_url {
        notifier = notifier.with_monitoring(url);
    }
    let notifier = notifier.disabled(dry_run || settings.disable_notifications);

    let now = Utc::now();
    let mut delivered = 0usize;
    for decision in report.alerts() {
        let resort = selected.iter().find(|r| r.name == decision.location_id);
        match notifier.send_alert(&alert_message(decision, resort, now)) {
            Ok(()) => delivered += 1,
            Err(e) => {
                warn!(location = %decision.location_id, error = %e, "alert delivery failed")
            }
        }
    }

    let summary = StatusSummary::from_report(report);
    if let Err(e) = notifier.send_status(&status_message(&summary, now)) {
        warn!(error = %e, "status delivery failed");
    }

    info!(
        alerts = report.alerts_triggered,
        delivered,
        errors = report.errors,
        "cycle finished"
    );
    Ok(())
}

/// Run cycles on an interval until interrupted.
pub fn watch(interval_hours: u64, dry_run: bool) -> CliResult<()> {
    if interval_hours == 0 {
        return Err("interval must be at least one hour".to_string());
    }
    loop {
        // A failed cycle must not kill the watcher; the environment is
        // re-read on the next pass.
        if let Err(message) = check(dry_run, false) {
            warn!(error = %message, "cycle failed");
        }
        info!(hours = interval_hours, "sleeping until next cycle");
        std::thread::sleep(std::time::Duration::from_secs(interval_hours * 3600));
    }
}

/// Send a synthetic alert to verify Slack wiring end to end.
pub fn test_alert(resort_name: &str, inches: f64) -> CliResult<()> {
    let settings = Settings::from_env();
    if settings.slack_webhook_url.is_empty() {
        return Err("missing required environment variables: SLACK_WEBHOOK_URL".to_string());
    }

    let config = EngineConfig::from_env().map_err(|e| e.to_string())?;
    let tier = classify(inches, &config.thresholds);
    let now = Utc::now();

    let decision = AlertDecision {
        location_id: resort_name.to_string(),
        tier,
        verified_snow_in: inches,
        should_notify: true,
        suppress_reason: None,
        confidence: Some(Confidence::SingleSource),
        record: Some(SnowRecord {
            location_id: resort_name.to_string(),
            source: Source::OpenWeatherMap,
            observed_snow_in: inches,
            forecast_snow_in: 0.0,
            observed_at: now,
            temperature_f: 25.0,
            conditions: Some("Test notification".to_string()),
        }),
    };

    let all = resorts::builtin();
    let resort = all.iter().find(|r| r.name == resort_name);

    let notifier =
        SlackNotifier::new(&settings.slack_webhook_url).disabled(settings.disable_notifications);
    notifier
        .send_alert(&alert_message(&decision, resort, now))
        .map_err(|e| e.to_string())?;

    println!("test alert sent for {} ({:.1}\", {})", resort_name, inches, tier);
    Ok(())
}
