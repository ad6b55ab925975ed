//! Runtime configuration, read once per cold start from the environment

use crate::errors::{Error, Result};
use crate::merge::MergePolicy;

const TABLE_NAME_ENV: &str = "TODOS_TABLE";
const TODO_ID_INDEX_ENV: &str = "TODO_ID_INDEX";
const BUCKET_NAME_ENV: &str = "ATTACHMENTS_BUCKET";
const SIGNED_URL_EXPIRATION_ENV: &str = "SIGNED_URL_EXPIRATION";
const MERGE_POLICY_ENV: &str = "TODO_MERGE_POLICY";
const OFFLINE_ENV: &str = "IS_OFFLINE";

const DEFAULT_TABLE_NAME: &str = "todos";
const DEFAULT_TODO_ID_INDEX: &str = "TodoIdIndex";
const DEFAULT_BUCKET_NAME: &str = "todo-attachments";
const DEFAULT_SIGNED_URL_EXPIRATION: u64 = 300;

/// S3 refuses to presign for longer than one week
const MAX_SIGNED_URL_EXPIRATION: u64 = 7 * 24 * 60 * 60;

/// Endpoint of DynamoDB Local, used when running offline
pub const OFFLINE_DYNAMODB_ENDPOINT: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    /// Global secondary index keyed on `todoId`
    pub todo_id_index: String,
    pub bucket_name: String,
    /// Lifetime of presigned upload URLs, in seconds
    pub signed_url_expiration: u64,
    pub merge_policy: MergePolicy,
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            todo_id_index: DEFAULT_TODO_ID_INDEX.to_string(),
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            signed_url_expiration: DEFAULT_SIGNED_URL_EXPIRATION,
            merge_policy: MergePolicy::default(),
            offline: false,
        }
    }
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let signed_url_expiration = match lookup(SIGNED_URL_EXPIRATION_ENV) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("{} must be a number of seconds, got {:?}", SIGNED_URL_EXPIRATION_ENV, raw))
            })?,
            None => defaults.signed_url_expiration,
        };
        if !(1..=MAX_SIGNED_URL_EXPIRATION).contains(&signed_url_expiration) {
            return Err(Error::Config(format!(
                "{} must be between 1 and {} seconds, got {}",
                SIGNED_URL_EXPIRATION_ENV, MAX_SIGNED_URL_EXPIRATION, signed_url_expiration
            )));
        }

        let merge_policy = match lookup(MERGE_POLICY_ENV) {
            Some(raw) => raw.parse()?,
            None => defaults.merge_policy,
        };

        let offline = lookup(OFFLINE_ENV)
            .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(false);

        Ok(Self {
            table_name: name(&lookup, TABLE_NAME_ENV, defaults.table_name)?,
            todo_id_index: name(&lookup, TODO_ID_INDEX_ENV, defaults.todo_id_index)?,
            bucket_name: name(&lookup, BUCKET_NAME_ENV, defaults.bucket_name)?,
            signed_url_expiration,
            merge_policy,
            offline,
        })
    }
}

/// Resource name from `var`, falling back to `default` when unset; blank is an error
fn name<F>(lookup: &F, var: &str, default: String) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Err(Error::Config(format!("{} must not be empty", var))),
        Some(value) => Ok(value),
    }
}
