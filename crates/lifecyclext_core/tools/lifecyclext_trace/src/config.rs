use std::env;

use lifecyclext_core::error::{CoreError, Result};
use lifecyclext_core::lifecycle::{State, StateId};

pub const DEFAULT_OWNER: &str = "lifecyclext_trace";
pub const DEFAULT_OBSERVERS: usize = 3;
pub const DEFAULT_STATES: &str = "created,started,resumed,started,created,destroyed";

/// Raw settings as given on the command line / environment.
///
/// Values stay strings until `validate()` so a typo is reported with its key
/// instead of silently falling back to a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub owner_name: String,
    pub initial_state: String,
    pub observers: String,
    pub detach_after: Option<String>,
    pub states: String,
}

/// Validated replay settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayPlan {
    pub owner_name: String,
    pub initial_state: StateId,
    pub observers: usize,
    pub detach_after: Option<usize>,
    pub states: Vec<StateId>,
}

impl Config {
    pub fn from_args() -> Self {
        Self::from_args_iter(env::args())
    }

    pub fn from_args_iter<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut owner_name =
            env::var("LIFECYCLEXT_OWNER").unwrap_or_else(|_| DEFAULT_OWNER.to_string());
        let mut initial_state = env::var("LIFECYCLEXT_INITIAL_STATE")
            .unwrap_or_else(|_| State::Initialized.label().to_string());
        let mut observers =
            env::var("LIFECYCLEXT_OBSERVERS").unwrap_or_else(|_| DEFAULT_OBSERVERS.to_string());
        let mut detach_after = env::var("LIFECYCLEXT_DETACH_AFTER").ok();
        let mut states = DEFAULT_STATES.to_string();

        let mut args = iter.into_iter();
        let _ = args.next();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            match arg {
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                "--owner" => {
                    if let Some(value) = args.next() {
                        owner_name = value.as_ref().to_string();
                    }
                }
                "--initial" => {
                    if let Some(value) = args.next() {
                        initial_state = value.as_ref().to_string();
                    }
                }
                "--observers" => {
                    if let Some(value) = args.next() {
                        observers = value.as_ref().to_string();
                    }
                }
                "--detach-after" => {
                    if let Some(value) = args.next() {
                        detach_after = Some(value.as_ref().to_string());
                    }
                }
                "--states" => {
                    if let Some(value) = args.next() {
                        states = value.as_ref().to_string();
                    }
                }
                _ if arg.starts_with("--owner=") => {
                    owner_name = arg["--owner=".len()..].to_string();
                }
                _ if arg.starts_with("--initial=") => {
                    initial_state = arg["--initial=".len()..].to_string();
                }
                _ if arg.starts_with("--observers=") => {
                    observers = arg["--observers=".len()..].to_string();
                }
                _ if arg.starts_with("--detach-after=") => {
                    detach_after = Some(arg["--detach-after=".len()..].to_string());
                }
                _ if arg.starts_with("--states=") => {
                    states = arg["--states=".len()..].to_string();
                }
                _ => {}
            }
        }

        Self {
            owner_name,
            initial_state,
            observers,
            detach_after,
            states,
        }
    }

    pub fn validate(&self) -> Result<ReplayPlan> {
        let initial_state = parse_state(&self.initial_state)?;
        let observers = parse_count("observers", &self.observers)?;
        let detach_after = self
            .detach_after
            .as_deref()
            .map(|value| parse_count("detach_after", value))
            .transpose()?;
        let states = self
            .states
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_state)
            .collect::<Result<Vec<_>>>()?;

        Ok(ReplayPlan {
            owner_name: self.owner_name.clone(),
            initial_state,
            observers,
            detach_after,
            states,
        })
    }
}

/// A `State` label or a raw integer id.
pub fn parse_state(value: &str) -> Result<StateId> {
    let value = value.trim();
    match value.parse::<StateId>() {
        Ok(id) => Ok(id),
        Err(_) => State::parse(value).map(State::id),
    }
}

fn parse_count(key: &'static str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::invalid_config(key, value))
}

fn print_usage() {
    println!(
        "lifecyclext_trace [--owner <name>] [--initial <state>] [--observers <n>] [--detach-after <n>] [--states a,b,c]"
    );
}
