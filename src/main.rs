use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process;

use anyhow::{bail, Context, Result};

use microsim::{
    backend::{terminal::Host, Surface, TextSurface},
    config::HostConfig,
    engine::Engine,
    input::Command,
    scene::SketchConfig,
    sketch::{self, BUILTINS},
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const LIST_USAGE: &str = "microsim list";
const CHECK_USAGE: &str = "microsim check <sketch.json>";
const SNAPSHOT_USAGE: &str = "microsim snapshot <name|sketch.json> [seconds of playback]";
const PLAY_USAGE: &str = "microsim play <name|sketch.json>";

/// Fixed step used to simulate time for snapshots.
const SNAPSHOT_STEP: f64 = 1.0 / 30.0;
const MAX_SNAPSHOT_SECONDS: f64 = 3600.0;

fn run() -> Result<()> {
    let host = HostConfig::load();
    init_logging(&host)?;

    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("list") => {
            list();
            Ok(())
        }
        Some("check") => {
            let path = args.next().context(CHECK_USAGE)?;
            check(&path)
        }
        Some("snapshot") => {
            let target = args.next().context(SNAPSHOT_USAGE)?;
            let seconds = match args.next() {
                Some(s) => parse_seconds(&s)?,
                None => 0.0,
            };
            snapshot(&target, seconds)
        }
        Some("play") => {
            let target = args.next().context(PLAY_USAGE)?;
            play(&target, host)
        }
        _ => bail!(
            "MicroSim: interactive sketches in the terminal\n\nUsage:\n  {LIST_USAGE}\n  {CHECK_USAGE}\n  {SNAPSHOT_USAGE}\n  {PLAY_USAGE}"
        ),
    }
}

/// Log to a file: the terminal host owns stdout. `MICROSIM_LOG` overrides the
/// configured path; with neither set, logging stays off.
fn init_logging(host: &HostConfig) -> Result<()> {
    let path = std::env::var_os("MICROSIM_LOG")
        .map(Into::into)
        .or_else(|| host.log_file.clone());
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn list() {
    for builtin in BUILTINS {
        println!("{:<26} {}", builtin.name, builtin.summary);
    }
}

fn read_config(path: &str) -> Result<SketchConfig> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    SketchConfig::from_json(&json).with_context(|| format!("Failed to parse {path}"))
}

/// A built-in by name, or a config file by path.
fn load_engine(target: &str) -> Result<Engine> {
    if let Some(builtin) = sketch::find(target) {
        let config = builtin
            .config()
            .with_context(|| format!("Built-in sketch {target} has an invalid config"))?;
        return Engine::init(config, builtin.sketch())
            .with_context(|| format!("Built-in sketch {target} failed validation"));
    }
    if !Path::new(target).exists() {
        bail!("No built-in sketch or file named {target}. Try `{LIST_USAGE}`.");
    }
    let config = read_config(target)?;
    Engine::from_config(config).with_context(|| format!("Invalid sketch {target}"))
}

fn check(path: &str) -> Result<()> {
    let config = read_config(path)?;
    config.validate().with_context(|| format!("Invalid sketch {path}"))?;
    eprintln!(
        "{path}: {} ok ({} regions, {} fields, {} flags)",
        config.name,
        config.regions.len(),
        config.fields.len(),
        config.flags.len(),
    );
    Ok(())
}

fn parse_seconds(s: &str) -> Result<f64> {
    let seconds: f64 = s.parse().with_context(|| format!("Invalid seconds: {s}"))?;
    if !(0.0..=MAX_SNAPSHOT_SECONDS).contains(&seconds) {
        bail!("Seconds must be between 0 and {MAX_SNAPSHOT_SECONDS}, got {s}");
    }
    Ok(seconds)
}

/// Start the clock, if any, and tick `seconds` of simulated time.
fn simulate(engine: &mut Engine, seconds: f64) {
    let stopped = engine.state().clock.as_ref().is_some_and(|c| !c.is_playing());
    if seconds > 0.0 && stopped {
        engine.apply(&Command::TogglePlay);
    }
    let mut remaining = seconds;
    while remaining > 0.0 {
        let dt = remaining.min(SNAPSHOT_STEP);
        engine.tick(dt);
        remaining -= dt;
    }
}

fn snapshot(target: &str, seconds: f64) -> Result<()> {
    let mut engine = load_engine(target)?;
    simulate(&mut engine, seconds);

    let mut surface = TextSurface::new();
    surface.present(&engine.frame())?;
    print!("{}", surface.text());
    Ok(())
}

fn play(target: &str, host: HostConfig) -> Result<()> {
    let engine = load_engine(target)?;
    Host::new(engine, host).run()
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
