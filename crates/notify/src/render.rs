//! Slack Block Kit message rendering.

use chrono::{DateTime, Utc};
use resorts::Resort;
use serde_json::{json, Value};
use snowfall_spi::{Confidence, CycleReport, Severity, SuppressReason};

/// Longest list rendered into a status section before truncating.
const MAX_LISTED: usize = 5;

fn tier_emoji(tier: Severity) -> &'static str {
    match tier {
        Severity::Heavy => "🏔️",
        Severity::Moderate => "🏂",
        _ => "❄️",
    }
}

fn tier_title(tier: Severity) -> &'static str {
    match tier {
        Severity::Heavy => "Heavy",
        Severity::Moderate => "Moderate",
        Severity::Light => "Light",
        Severity::None => "No",
    }
}

/// Render a snow alert message for a notifying decision.
///
/// Resort metadata and the forecast line are included when available; a
/// single-source disclosure is appended when the reading was not
/// cross-verified.
pub fn alert_message(
    decision: &snowfall_spi::AlertDecision,
    resort: Option<&Resort>,
    now: DateTime<Utc>,
) -> Value {
    let title = format!(
        "{} {} Snow Alert: {}",
        tier_emoji(decision.tier),
        tier_title(decision.tier),
        decision.location_id
    );

    let mut blocks = vec![
        json!({
            "type": "header",
            "text": {"type": "plain_text", "text": title}
        }),
        json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!(
                    "*{:.1} inches* of fresh snow at *{}*!",
                    decision.verified_snow_in, decision.location_id
                )
            }
        }),
    ];

    if let Some(resort) = resort {
        let mut metadata = vec![format!("Elevation: {} ft", resort.elevation_ft)];
        if !resort.region.is_empty() {
            metadata.push(format!("Region: {}", resort.region));
        }
        if !resort.website.is_empty() {
            metadata.push(format!("<{}|Resort Website>", resort.website));
        }
        blocks.push(json!({
            "type": "section",
            "text": {"type": "mrkdwn", "text": metadata.join(" | ")}
        }));
    }

    if let Some(record) = &decision.record {
        if record.forecast_snow_in > 0.0 {
            blocks.push(json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!(
                        "*Forecast*: Additional {:.1} inches expected in the next 24 hours.",
                        record.forecast_snow_in
                    )
                }
            }));
        }
    }

    if decision.confidence == Some(Confidence::SingleSource) {
        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": "⚠️ Single-source reading: secondary verification was unavailable."
            }
        }));
    }

    blocks.push(json!({
        "type": "context",
        "elements": [{
            "type": "mrkdwn",
            "text": format!("Recorded at: {}", now.format("%Y-%m-%d %H:%M UTC"))
        }]
    }));

    json!({"text": title, "blocks": blocks})
}

/// Summary of one cycle for the monitoring channel.
#[derive(Debug, Default)]
pub struct StatusSummary {
    /// Locations that alerted: (name, inches, tier).
    pub alerts_sent: Vec<(String, f64, Severity)>,
    /// Per-location data failures.
    pub errors: Vec<String>,
    /// Observed depths by location, highest first.
    pub snow_depths: Vec<(String, f64)>,
    /// Locations evaluated this cycle.
    pub locations_checked: usize,
}

impl StatusSummary {
    /// Build a summary from a cycle report.
    pub fn from_report(report: &CycleReport) -> Self {
        let alerts_sent = report
            .decisions
            .iter()
            .filter(|d| d.should_notify)
            .map(|d| (d.location_id.clone(), d.verified_snow_in, d.tier))
            .collect();

        let errors = report
            .decisions
            .iter()
            .filter_map(|d| match d.suppress_reason {
                Some(
                    reason @ (SuppressReason::DataUnavailable | SuppressReason::DataFormat),
                ) => Some(format!("{}: {}", d.location_id, reason)),
                _ => None,
            })
            .collect();

        let mut snow_depths: Vec<(String, f64)> = report
            .decisions
            .iter()
            .filter_map(|d| {
                d.record
                    .as_ref()
                    .map(|r| (d.location_id.clone(), r.observed_snow_in))
            })
            .collect();
        snow_depths.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            alerts_sent,
            errors,
            snow_depths,
            locations_checked: report.locations_evaluated,
        }
    }
}

/// Render the monitoring-channel status update for one cycle.
pub fn status_message(summary: &StatusSummary, now: DateTime<Utc>) -> Value {
    let status = if summary.errors.is_empty() {
        "✅ Operational"
    } else {
        "⚠️ Issues detected"
    };

    let mut blocks = vec![
        json!({
            "type": "header",
            "text": {
                "type": "plain_text",
                "text": format!("Snowfall Alert System Status: {}", status)
            }
        }),
        json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!(
                    "*{}*\n*Time:* {}\n*Resorts Checked:* {}",
                    status,
                    now.format("%Y-%m-%d %H:%M:%S UTC"),
                    summary.locations_checked
                )
            }
        }),
    ];

    if !summary.alerts_sent.is_empty() {
        let lines: Vec<String> = summary
            .alerts_sent
            .iter()
            .map(|(name, inches, tier)| format!("• {}: {:.1}\" - {} alert", name, inches, tier))
            .collect();
        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!(
                    "*Alerts Sent ({}):*\n{}",
                    summary.alerts_sent.len(),
                    truncated(&lines)
                )
            }
        }));
    }

    if !summary.errors.is_empty() {
        let lines: Vec<String> = summary.errors.iter().map(|e| format!("• {}", e)).collect();
        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!("*Errors ({}):*\n{}", summary.errors.len(), truncated(&lines))
            }
        }));
    }

    if !summary.snow_depths.is_empty() {
        let lines: Vec<String> = summary
            .snow_depths
            .iter()
            .map(|(name, inches)| format!("• {}: {:.1}\"", name, inches))
            .collect();
        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!("*Top Snow Depths:*\n{}", truncated(&lines))
            }
        }));
    }

    json!({
        "text": format!("Snowfall Alert System Status: {}", status),
        "blocks": blocks
    })
}

fn truncated(lines: &[String]) -> String {
    if lines.len() <= MAX_LISTED {
        return lines.join("\n");
    }
    let mut text = lines[..MAX_LISTED].join("\n");
    text.push_str(&format!("\n• ...and {} more", lines.len() - MAX_LISTED));
    text
}
