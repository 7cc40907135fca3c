//! Step configuration
//!
//! Inputs arrive as command-line flags or as `INPUT_<NAME>` environment
//! variables, the convention CI runners use to pass step inputs. Optional
//! inputs are parsed leniently: blank values count as absent and unparsable
//! numbers fall back to their defaults.

use clap::Parser;
use simrun_core::dto::run::QueueRunRequest;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::error::ActionError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_MIN_SCORE: f64 = 80.0;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 1500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raw step inputs
#[derive(Parser, Debug, Default)]
#[command(name = "simrun")]
#[command(about = "Queue a simulation run and gate the pipeline on its score", long_about = None)]
pub struct Cli {
    /// API key for the evaluation service
    #[arg(long, env = "INPUT_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Agent to run the simulation against
    #[arg(long, env = "INPUT_AGENT_ID", default_value = "")]
    pub agent_id: String,

    /// Prompt to use
    #[arg(long, env = "INPUT_PROMPT_ID")]
    pub prompt_id: Option<String>,

    /// Knowledge base to use
    #[arg(long, env = "INPUT_KNOWLEDGE_BASE_ID")]
    pub knowledge_base_id: Option<String>,

    /// Comma-separated participant ids; empty runs all of them
    #[arg(long, env = "INPUT_PARTICIPANT_IDS")]
    pub participant_ids: Option<String>,

    /// Phone number to call
    #[arg(long, env = "INPUT_PHONE_NUMBER")]
    pub phone_number: Option<String>,

    /// SIP URI to call
    #[arg(long, env = "INPUT_SIP_URI")]
    pub sip_uri: Option<String>,

    /// Wait for the run to finish (1/true/yes/y or 0/false/no/n)
    #[arg(long, env = "INPUT_WAIT_FOR_RESULTS")]
    pub wait_for_results: Option<String>,

    /// Minimum passing score, in percent
    #[arg(long, env = "INPUT_MIN_SCORE")]
    pub min_score: Option<String>,

    /// Seconds between result queries
    #[arg(long, env = "INPUT_POLL_INTERVAL")]
    pub poll_interval: Option<String>,

    /// Seconds to wait for a terminal status
    #[arg(long, env = "INPUT_TIMEOUT")]
    pub timeout: Option<String>,

    /// Evaluation service base URL
    #[arg(long, env = "INPUT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request HTTP timeout, in seconds
    #[arg(long, env = "INPUT_REQUEST_TIMEOUT")]
    pub request_timeout: Option<String>,

    /// Print the run summary after polling
    #[arg(long, env = "INPUT_SUMMARY")]
    pub summary: Option<String>,
}

/// Validated step configuration
#[derive(Clone)]
pub struct Config {
    /// Evaluation service base URL
    pub api_url: String,

    /// Credential sent with every request
    pub api_key: String,

    /// Run to queue
    pub request: QueueRunRequest,

    /// Whether to poll until the run finishes
    pub wait_for_results: bool,

    /// Minimum score, in percent, for the step to pass
    pub min_score: f64,

    /// Sleep between result queries
    pub poll_interval: Duration,

    /// Budget for the whole polling phase
    pub timeout: Duration,

    /// Timeout applied to each HTTP request
    pub request_timeout: Duration,

    /// Print the run summary after polling
    pub print_summary: bool,
}

impl Config {
    /// Builds the configuration from raw inputs, applying defaults
    pub fn from_cli(cli: Cli) -> Self {
        let request = QueueRunRequest {
            agent_id: cli.agent_id.trim().to_string(),
            prompt_id: non_blank(cli.prompt_id),
            knowledge_base_id: non_blank(cli.knowledge_base_id),
            participant_ids: parse_participant_ids(cli.participant_ids.as_deref()),
            phone_number: non_blank(cli.phone_number),
            sip_uri: non_blank(cli.sip_uri),
        };

        let mut min_score = parse_number("min_score", cli.min_score.as_deref(), DEFAULT_MIN_SCORE);
        if !min_score.is_finite() {
            warn!("Ignoring non-finite min_score, using {}", DEFAULT_MIN_SCORE);
            min_score = DEFAULT_MIN_SCORE;
        }

        let mut poll_interval = parse_seconds(
            "poll_interval",
            cli.poll_interval.as_deref(),
            DEFAULT_POLL_INTERVAL_SECS,
        );
        if poll_interval < MIN_POLL_INTERVAL {
            warn!(
                "poll_interval {:?} is too short, using {:?}",
                poll_interval, MIN_POLL_INTERVAL
            );
            poll_interval = MIN_POLL_INTERVAL;
        }

        Self {
            api_url: cli.api_url.trim().to_string(),
            api_key: cli.api_key.trim().to_string(),
            request,
            wait_for_results: parse_bool(cli.wait_for_results.as_deref(), true),
            min_score,
            poll_interval,
            timeout: parse_seconds("timeout", cli.timeout.as_deref(), DEFAULT_TIMEOUT_SECS),
            request_timeout: parse_seconds(
                "request_timeout",
                cli.request_timeout.as_deref(),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            print_summary: parse_bool(cli.summary.as_deref(), true),
        }
    }

    /// Validates the configuration
    ///
    /// Runs before any network call.
    pub fn validate(&self) -> Result<(), ActionError> {
        if self.api_key.is_empty() {
            return Err(ActionError::Configuration(
                "api_key is required".to_string(),
            ));
        }

        if self.request.agent_id.is_empty() {
            return Err(ActionError::Configuration(
                "agent_id is required".to_string(),
            ));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ActionError::Configuration(
                "api_url must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("request", &self.request)
            .field("wait_for_results", &self.wait_for_results)
            .field("min_score", &self.min_score)
            .field("poll_interval", &self.poll_interval)
            .field("timeout", &self.timeout)
            .field("request_timeout", &self.request_timeout)
            .field("print_summary", &self.print_summary)
            .finish()
    }
}

/// Parses a boolean input
///
/// Recognizes `1`, `true`, `yes`, `y` and `0`, `false`, `no`, `n` in any case.
/// Anything else, including an absent value, yields `default`.
pub fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => true,
        "0" | "false" | "no" | "n" => false,
        _ => default,
    }
}

/// Parses a comma-separated participant id list
///
/// Entries are trimmed and empty ones dropped. No remaining entries means no
/// restriction, which is `None` rather than an empty list.
pub fn parse_participant_ids(raw: Option<&str>) -> Option<Vec<String>> {
    let ids: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() { None } else { Some(ids) }
}

fn parse_number<T>(name: &str, raw: Option<&str>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };

    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!("Invalid {} '{}', using default {}", name, raw, default);
            default
        }
    }
}

/// Parses a duration given in seconds, fractions allowed
///
/// Negative, non-finite and unparsable values yield `default_secs`.
fn parse_seconds(name: &str, raw: Option<&str>, default_secs: u64) -> Duration {
    let default = Duration::from_secs(default_secs);
    let secs = parse_number(name, raw, default_secs as f64);

    Duration::try_from_secs_f64(secs).unwrap_or_else(|_| {
        warn!("Invalid {} '{}', using default {:?}", name, secs, default);
        default
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
