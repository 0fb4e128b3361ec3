//! desk-runner: headless front desk capacity runner.
//!
//! Usage:
//!   desk-runner --time 14:30 --lobby 3 --shift-type standard
//!   desk-runner --time 10:00 --shift-type thursday
//!   desk-runner --state desk.json --data-dir ./data --ipc-mode

use anyhow::{Context, Result};
use frontdesk_core::{
    capacity::{CapacityResult, CapacityState},
    config::DeskConfig,
    schedule::{ShiftSlot, ShiftType},
    types::ProviderId,
    DeskCommand, DeskEngine, DeskSnapshot, TimeOfDay,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command { command: DeskCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct SlotView {
    slot:        ShiftSlot,
    title:       &'static str,
    assigned:    Vec<ProviderView>,
    selectable:  Vec<ProviderView>,
}

#[derive(serde::Serialize)]
struct ProviderView {
    id:                ProviderId,
    name:              String,
    patients_per_hour: f64,
    locked:            bool,
    house:             bool,
}

#[derive(serde::Serialize)]
struct UiState {
    shift_type:        ShiftType,
    current_time:      Option<TimeOfDay>,
    patients_in_lobby: u32,
    closing_time:      String,
    providers:         Vec<ProviderView>,
    slots:             Vec<SlotView>,
    capacity:          Option<CapacityResult>,
    css_class:         Option<&'static str>,
    over_capacity:     bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");
    let state_path = flag_value(&args, "--state");

    let config = DeskConfig::load_or_default(data_dir)?;
    let mut engine = match state_path {
        Some(path) if Path::new(path).exists() => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read {path}"))?;
            let snapshot = DeskSnapshot::from_json(&json)?;
            DeskEngine::from_snapshot(config, snapshot)
        }
        _ => DeskEngine::new(config),
    };

    if let Some(shift_type) = flag_value(&args, "--shift-type") {
        let shift_type = shift_type.parse::<ShiftType>().map_err(anyhow::Error::msg)?;
        engine.apply(DeskCommand::SetShiftType { shift_type })?;
    }
    if let Some(count) = flag_value(&args, "--lobby") {
        let count = count.parse().with_context(|| format!("Invalid --lobby value '{count}'"))?;
        engine.apply(DeskCommand::SetLobby { count })?;
    }
    match flag_value(&args, "--time") {
        Some(time) => { engine.apply(DeskCommand::SetTime { time: time.to_string() })?; }
        None if engine.current_time().is_none() => { engine.apply(DeskCommand::SetTimeNow)?; }
        None => {}
    }

    if ipc_mode {
        run_ipc_loop(&mut engine, state_path)?;
    } else {
        print_report(&engine);
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut DeskEngine, state_path: Option<&str>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(engine))?)?;
            }
            IpcCommand::Command { command } => match engine.apply(command) {
                Ok(_) => {
                    if let Some(path) = state_path {
                        save_state(engine, path)?;
                    }
                    writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(engine))?)?;
                }
                Err(e) => write_error(&mut stdout, &e.to_string())?,
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{}", err_json)?;
    stdout.flush()?;
    Ok(())
}

fn save_state(engine: &DeskEngine, path: &str) -> Result<()> {
    let json = engine.snapshot().to_json()?;
    std::fs::write(path, json).with_context(|| format!("Cannot write {path}"))?;
    log::debug!("state written to {path}");
    Ok(())
}

fn provider_view(p: &frontdesk_core::Provider) -> ProviderView {
    ProviderView {
        id:                p.id,
        name:              p.display_name().to_string(),
        patients_per_hour: p.patients_per_hour,
        locked:            p.locked,
        house:             p.is_house(),
    }
}

fn build_ui_state(engine: &DeskEngine) -> UiState {
    let roster = engine.roster();
    let assignments = engine.assignments();

    let slots = engine
        .shift_type()
        .slots()
        .iter()
        .map(|&slot| SlotView {
            slot,
            title: slot.title(),
            assigned: assignments
                .in_slot(slot)
                .iter()
                .filter_map(|&id| roster.get(id))
                .map(provider_view)
                .collect(),
            selectable: assignments
                .selectable(slot, roster)
                .into_iter()
                .map(provider_view)
                .collect(),
        })
        .collect();

    let capacity = engine.projection();
    let css_class = capacity.as_ref().map(|c| match c.state {
        CapacityState::Closed { .. } => "closed",
        CapacityState::NoProvidersAssigned { .. } => "no-providers",
        CapacityState::Computed { tier, .. } => tier.css_class(),
    });
    let over_capacity = capacity.as_ref().is_some_and(|c| c.is_over_capacity());

    UiState {
        shift_type:        engine.shift_type(),
        current_time:      engine.current_time(),
        patients_in_lobby: engine.patients_in_lobby(),
        closing_time:      TimeOfDay::display_decimal_12h(engine.shift_type().latest_close()),
        providers:         roster.display_order().into_iter().map(provider_view).collect(),
        slots,
        capacity,
        css_class,
        over_capacity,
    }
}

fn print_report(engine: &DeskEngine) {
    println!("Front desk capacity");
    println!("  shift type: {}", engine.shift_type());
    println!("  lobby:      {}", engine.patients_in_lobby());
    println!("  last-hour floor: {}", engine.model().last_hour_floor);
    println!("  house providers: {}", engine.config().house_providers.len());

    let Some(now) = engine.current_time() else {
        println!("  no time set, nothing to project");
        return;
    };
    println!("  time:       {} ({now})", now.display_12h());
    println!();

    let Some(result) = engine.projection() else {
        return;
    };

    match result.state {
        CapacityState::Closed { latest_close } => {
            println!("=== CLOSED ===");
            println!(
                "  The clinic closed at {}. No remaining capacity after closing time.",
                TimeOfDay::display_decimal_12h(latest_close)
            );
        }
        CapacityState::NoProvidersAssigned { value } => {
            println!("=== NO PROVIDERS SELECTED: {value} ===");
            println!("  Assign a provider to a shift to project remaining capacity.");
            if result.is_over_capacity() {
                println!("  Over capacity: encourage waiting patients to leave.");
            }
        }
        CapacityState::Computed { value, tier } => {
            println!("=== ACCEPT {value} MORE ({tier:?}) ===");
            println!("  provider capacity: {:.2}", result.total_capacity);
            if result.is_over_capacity() {
                println!("  Over capacity: encourage waiting patients to leave.");
            }
            println!();
            println!("Breakdown:");
            if result.all_shifts_completed() {
                println!("  All assigned providers have completed their shifts.");
            }
            for entry in &result.breakdown {
                println!(
                    "  {} ({}): {} patients ({:.2} hrs remaining)",
                    entry.provider_name, entry.shift_label, entry.remaining_patients, entry.remaining_hours
                );
            }
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
