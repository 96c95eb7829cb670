use std::str::FromStr;

use contribstats_core::scoring::{
    ScoringPolicy, ACCEPTED_WEIGHT, ACCEPTED_WITH_EDITS_WEIGHT, RECENT_REVIEW_OUTCOMES_LIMIT,
    REJECTED_PENALTY,
};
use contribstats_pipeline::JobKind;

/// Why the worker configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error(transparent)]
    Rejected(#[from] contribstats_core::error::CoreError),
}

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    /// Maximum pool connections (default: `20`).
    pub max_connections: u32,
    pub job: JobKind,
    pub policy: ScoringPolicy,
}

impl WorkerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                      | Default              |
    /// |------------------------------|----------------------|
    /// | `DATABASE_URL`               | required             |
    /// | `JOB_NAME`                   | first CLI argument   |
    /// | `DB_MAX_CONNECTIONS`         | `20`                 |
    /// | `RECENT_OUTCOMES_LIMIT`      | `100`                |
    /// | `ACCEPTED_WEIGHT`            | `1`                  |
    /// | `ACCEPTED_WITH_EDITS_WEIGHT` | `1`                  |
    /// | `REJECTED_PENALTY`           | `2`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        let cli_job = std::env::args().nth(1);
        Self::from_lookup(|name| match name {
            "JOB_NAME" => std::env::var(name).ok().or_else(|| cli_job.clone()),
            _ => std::env::var(name).ok(),
        })
    }

    /// Load configuration through `lookup`, which returns `None` for unset
    /// variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let job_name = lookup("JOB_NAME").ok_or(ConfigError::Missing("JOB_NAME"))?;
        let job: JobKind = job_name.parse()?;

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", "u32", 20u32)?;

        let policy = ScoringPolicy {
            recent_outcomes_limit: parse_or(
                &lookup,
                "RECENT_OUTCOMES_LIMIT",
                "usize",
                RECENT_REVIEW_OUTCOMES_LIMIT,
            )?,
            accepted_weight: parse_or(&lookup, "ACCEPTED_WEIGHT", "i64", ACCEPTED_WEIGHT)?,
            accepted_with_edits_weight: parse_or(
                &lookup,
                "ACCEPTED_WITH_EDITS_WEIGHT",
                "i64",
                ACCEPTED_WITH_EDITS_WEIGHT,
            )?,
            rejected_penalty: parse_or(&lookup, "REJECTED_PENALTY", "i64", REJECTED_PENALTY)?,
        };
        policy.validate()?;

        Ok(Self {
            database_url,
            max_connections,
            job,
            policy,
        })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
