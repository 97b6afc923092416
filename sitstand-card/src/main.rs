//! Replay a recorded height trace through a desk card
//!
//! ```text
//! sitstand-sim --config demos/desk.toml --trace demos/rise.trace
//! RUST_LOG=debug sitstand-sim --config demos/desk.toml --trace demos/rise.trace --press stand@0
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sitstand_card::states::EntityState;
use sitstand_card::trace::{load_trace, TraceSample};
use sitstand_card::{config, Card, CardError, MemoryStore, RecordingSink};
use sitstand_core::DeskConfig;

/// Button press scheduled during the replay
#[derive(Debug, Clone, Copy)]
enum Press {
    Sit(u64),
    Stand(u64),
}

impl Press {
    fn at_ms(&self) -> u64 {
        match self {
            Press::Sit(at) | Press::Stand(at) => *at,
        }
    }
}

fn parse_press(value: &str) -> Result<Press, String> {
    let (button, at) = value
        .split_once('@')
        .ok_or_else(|| format!("expected <sit|stand>@<ms>, got {value:?}"))?;
    let at = at
        .parse::<u64>()
        .map_err(|e| format!("invalid press time {at:?}: {e}"))?;

    match button {
        "sit" => Ok(Press::Sit(at)),
        "stand" => Ok(Press::Stand(at)),
        other => Err(format!("unknown button {other:?}")),
    }
}

#[derive(Debug, Parser)]
#[command(name = "sitstand-sim", about = "Replay a desk height trace through the card state engine")]
struct Args {
    /// Card configuration (TOML)
    #[arg(long)]
    config: PathBuf,

    /// Height trace: `<t_ms> <height> [on|off]` per line
    #[arg(long)]
    trace: PathBuf,

    /// Height sensor unit
    #[arg(long, default_value = "cm")]
    unit: String,

    /// Button presses, e.g. `stand@1500`
    #[arg(long, value_parser = parse_press)]
    press: Vec<Press>,
}

fn store_for(config: &DeskConfig, unit: &str, sample: &TraceSample) -> MemoryStore {
    let mut store = MemoryStore::new()
        .with(config.desk.as_str(), EntityState::new("open"))
        .with(
            config.height_sensor.as_str(),
            EntityState::new(sample.height.to_string()).with_unit(unit),
        );

    if let (Some(sensor), Some(moving)) = (&config.moving_sensor, sample.moving) {
        store.insert(
            sensor.as_str(),
            EntityState::new(if moving { "on" } else { "off" }),
        );
    }

    store
}

fn run(args: Args) -> Result<(), CardError> {
    let config = config::load_config(&args.config)?;
    let samples = load_trace(&args.trace)?;

    let Some(first) = samples.first() else {
        info!("trace is empty");
        return Ok(());
    };

    let mut presses = args.press.clone();
    presses.sort_by_key(Press::at_ms);
    let mut presses = presses.into_iter().peekable();

    let store = store_for(&config, &args.unit, first);
    let mut card = Card::new(config.clone(), store, RecordingSink::new(), first.at_ms)?;
    info!(at_ms = first.at_ms, height = first.height, state = card.state().as_str(), "sample");

    for sample in &samples[1..] {
        // Fire the single outstanding deadline before the next sample
        while let Some(wakeup) = card.next_wakeup().filter(|w| *w <= sample.at_ms) {
            if card.on_timer(wakeup) {
                info!(at_ms = wakeup, state = card.state().as_str(), "timer");
            }
        }

        while let Some(press) = presses.next_if(|p| p.at_ms() <= sample.at_ms) {
            match press {
                Press::Sit(at) => card.press_sit(at),
                Press::Stand(at) => card.press_stand(at),
            };
        }

        let store = store_for(&config, &args.unit, sample);
        card.on_states(store, sample.at_ms);
        info!(
            at_ms = sample.at_ms,
            height = sample.height,
            state = card.state().as_str(),
            "sample"
        );
    }

    while let Some(wakeup) = card.next_wakeup() {
        if card.on_timer(wakeup) {
            info!(at_ms = wakeup, state = card.state().as_str(), "timer");
        }
    }

    let (_, sink) = card.dispose();
    for call in &sink.calls {
        info!(call = %call.to_json(), "dispatched");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
