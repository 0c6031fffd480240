//! # notify
//!
//! Slack notification rendering and delivery for snowfall alerts.
//!
//! Message rendering is pure (Block Kit payloads as `serde_json` values)
//! and always available; webhook delivery sits behind the `webhook`
//! feature. Delivery failures are logged and returned to the caller, never
//! propagated into the decision engine.

mod render;
mod slack;

pub use render::{alert_message, status_message, StatusSummary};
pub use slack::{NotifyError, Result, SlackNotifier};
