use std::io::Write;
use std::time::Duration;

use clap::Args;
use pomoclock_core::{ClockDriver, Command, Config, SequenceManager};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info, warn};

use crate::panel::{ButtonAction, Debouncer, Input, Panel, PanelMode};

#[derive(Args)]
pub struct RunArgs {
    /// Logical seconds per clock tick (overrides clock.speed)
    #[arg(long)]
    speed: Option<u32>,
    /// Wall-clock tick period in milliseconds (overrides clock.tick_ms)
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Start the first interval immediately
    #[arg(long)]
    start: bool,
    /// Print each snapshot as a JSON line instead of drawing the panel
    #[arg(long)]
    json: bool,
    /// Exit after this many snapshots have been received. A snapshot can
    /// cover more than one clock tick when output falls behind.
    #[arg(long)]
    ticks: Option<u64>,
    /// Draw without ANSI colors
    #[arg(long)]
    no_color: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(speed) = args.speed {
        config.clock.speed = speed;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.clock.tick_ms = tick_ms;
    }
    config.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(serve(config, args));
    // stdin reads park a blocking thread that never wakes on its own.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn serve(config: Config, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let manager = SequenceManager::new(config.template(), config.speed()?)?;
    if args.start || config.clock.autostart {
        dispatch(&manager, Command::Start);
    }

    let handle = ClockDriver::new(manager.clone(), config.tick_period())?.spawn();
    let mut snapshots = handle.snapshots();

    let (input_tx, mut input_rx) = mpsc::channel(16);
    spawn_input_reader(input_tx);
    let mut input_open = true;

    let mut debouncer = Debouncer::new(config.debounce());
    let mut panel = Panel::new(PanelMode::Clock, !args.no_color);
    let mut refresh = time::interval(config.refresh_period());
    let mut snapshots_seen = 0u64;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = snapshots.borrow_and_update().clone();
                snapshots_seen += 1;
                if args.json {
                    println!("{}", serde_json::to_string(&snap)?);
                }
                if args.ticks.is_some_and(|limit| snapshots_seen >= limit) {
                    break;
                }
            }
            _ = refresh.tick(), if !args.json => {
                let snap = snapshots.borrow().clone();
                if panel.needs_redraw(&snap) {
                    draw(&panel.render(&snap))?;
                }
            }
            input = input_rx.recv(), if input_open => match input {
                None => input_open = false,
                Some(Input::Quit) => break,
                Some(input) => {
                    handle_input(input, &manager, &mut panel, &mut debouncer);
                    panel.force_redraw();
                }
            },
        }
    }

    handle.shutdown().await;
    Ok(())
}

fn handle_input(
    input: Input,
    manager: &SequenceManager,
    panel: &mut Panel,
    debouncer: &mut Debouncer,
) {
    match input {
        Input::Button(button) => {
            if !debouncer.accept() {
                debug!(?button, "press ignored inside debounce window");
                return;
            }
            match button.action() {
                ButtonAction::ChangeMode => {
                    let mode = panel.change_mode();
                    info!(?mode, "panel mode changed");
                }
                ButtonAction::Engine(command) => dispatch(manager, command),
            }
        }
        Input::Start => dispatch(manager, Command::Start),
        Input::Rebuild => dispatch(manager, Command::RebuildSequence),
        Input::Quit => {}
    }
}

/// Rejected commands are logged; they never stop the clock.
fn dispatch(manager: &SequenceManager, command: Command) {
    match manager.apply(command) {
        Ok(event) => info!(?command, ?event, "command applied"),
        Err(e) => warn!(?command, error = %e, "command rejected"),
    }
}

fn spawn_input_reader(tx: mpsc::Sender<Input>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Input>() {
                Ok(input) => {
                    if tx.send(input).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("{e}"),
            }
        }
    });
}

fn draw(lines: &[String]) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    write!(out, "\x1b[2J\x1b[H")?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
