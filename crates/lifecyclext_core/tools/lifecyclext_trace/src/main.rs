use anyhow::{Context, Result};
use tracing::info;

use lifecyclext_core::logging::log_core_error;
use lifecyclext_trace::config::Config;
use lifecyclext_trace::replay::{label, replay};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_args();
    let plan = config
        .validate()
        .inspect_err(log_core_error)
        .context("invalid lifecyclext_trace configuration")?;

    info!(
        owner = plan.owner_name.as_str(),
        observers = plan.observers,
        transitions = plan.states.len(),
        "replaying lifecycle states"
    );

    let report = replay(&plan)
        .inspect_err(log_core_error)
        .context("lifecycle replay aborted")?;

    for delivery in &report.deliveries {
        println!(
            "observer {} : {} -> {}",
            delivery.observer,
            label(delivery.previous),
            label(delivery.current)
        );
    }
    println!(
        "final state {} with {} observer(s) registered",
        label(report.final_state),
        report.remaining_observers
    );

    Ok(())
}
