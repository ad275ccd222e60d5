//! Server configuration, deserialised from `config.toml` and `SECRETARY_*`
//! environment variables.

use std::path::{Path, PathBuf};

use chrono::{NaiveTime, TimeDelta};
use secretary_agenda::ReminderPolicy;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub reminders:  ReminderConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_owned(),
      port:       8080,
      store_path: PathBuf::from("secretary.db"),
      reminders:  ReminderConfig::default(),
    }
  }
}

/// Reminder and digest settings. Every notification is off unless
/// configured.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
  pub poll_interval_secs: u64,
  pub event_lead_minutes: Option<i64>,
  pub task_lead_minutes:  Option<i64>,
  /// `HH:MM`, local time.
  pub digest_time:        Option<String>,
}

impl Default for ReminderConfig {
  fn default() -> Self {
    Self {
      poll_interval_secs: 60,
      event_lead_minutes: None,
      task_lead_minutes:  None,
      digest_time:        None,
    }
  }
}

impl ReminderConfig {
  /// Resolve into a [`ReminderPolicy`]. Negative leads and a malformed
  /// digest time disable the corresponding notification.
  pub fn policy(&self) -> ReminderPolicy {
    ReminderPolicy {
      event_lead: lead(self.event_lead_minutes),
      task_lead:  lead(self.task_lead_minutes),
      digest_at:  self.digest_time.as_deref().and_then(parse_digest_time),
    }
  }
}

fn lead(minutes: Option<i64>) -> Option<TimeDelta> {
  minutes
    .filter(|m| *m >= 0)
    .and_then(TimeDelta::try_minutes)
}

fn parse_digest_time(raw: &str) -> Option<NaiveTime> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }
  match NaiveTime::parse_from_str(raw, "%H:%M") {
    Ok(time) => Some(time),
    Err(e) => {
      warn!(digest_time = raw, error = %e, "malformed digest time; digest disabled");
      None
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn from_toml(text: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(text, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_file_uses_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.reminders.poll_interval_secs, 60);
    assert_eq!(cfg.reminders.policy(), ReminderPolicy::default());
  }

  #[test]
  fn reminders_section_resolves_to_policy() {
    let cfg = from_toml(
      r#"
        port = 9000
        [reminders]
        event_lead_minutes = 15
        task_lead_minutes = 60
        digest_time = "08:30"
      "#,
    );
    assert_eq!(cfg.port, 9000);
    assert_eq!(
      cfg.reminders.policy(),
      ReminderPolicy {
        event_lead: Some(TimeDelta::minutes(15)),
        task_lead:  Some(TimeDelta::minutes(60)),
        digest_at:  NaiveTime::from_hms_opt(8, 30, 0),
      }
    );
  }

  #[test]
  fn bad_values_disable_notifications() {
    let cfg = ReminderConfig {
      event_lead_minutes: Some(-5),
      digest_time: Some("8h".to_owned()),
      ..Default::default()
    };
    assert_eq!(cfg.policy(), ReminderPolicy::default());
  }

  #[test]
  fn tilde_is_expanded_only_at_the_start() {
    let plain = Path::new("/var/lib/secretary.db");
    assert_eq!(expand_tilde(plain), plain);
    let odd = Path::new("data/~/x.db");
    assert_eq!(expand_tilde(odd), odd);
  }
}
