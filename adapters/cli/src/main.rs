#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Word Defence session without a window.
//!
//! The session is driven through the headless rendering backend: every frame
//! the tower planner may click a cell, the engine advances by a fixed delta and
//! the scene is rebuilt from a fresh snapshot. Once every word is resolved the
//! delivered text is printed on stdout.

mod board;
mod headless;
mod planner;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use word_defence_core::SessionConfig;
use word_defence_engine::Engine;
use word_defence_rendering::{
    Color, FrameControl, FrameInput, Palette, PlacementPreview, Presentation, RenderingBackend,
    Scene, TileGridPresentation,
};

use crate::{headless::HeadlessBackend, planner::TowerPlanner};

/// World-space side length of a grid cell.
const CELL_LENGTH: f32 = 32.0;

#[derive(Debug, Parser)]
#[command(
    name = "word-defence",
    version,
    about = "Runs a Word Defence session and prints the delivered text"
)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "text"])))]
struct Cli {
    /// Text file whose words are delivered.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Words to deliver, given inline.
    #[arg(long)]
    text: Option<String>,
    /// TOML file overriding the default session tuning.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for route generation, spawning and corruption.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    dt_ms: u64,
    /// Frames simulated before giving up on completion.
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u32,
    /// Whether towers are placed automatically.
    #[arg(long, value_enum, default_value_t = TowerMode::Auto)]
    towers: TowerMode,
    /// Print the final grid after the output.
    #[arg(long)]
    board: bool,
    /// Raise log verbosity; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TowerMode {
    /// Build next to hostile routes whenever affordable.
    Auto,
    /// Never build.
    #[value(name = "none")]
    Off,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let text = read_text(cli)?;

    let mut engine = Engine::new(config).context("invalid session configuration")?;
    engine.load_input(&text);
    engine.start();

    let snapshot = engine.snapshot();
    let layout = snapshot.layout;
    let tile_grid = TileGridPresentation::new(layout.columns(), layout.rows(), CELL_LENGTH)?;
    let palette = Palette::default();
    let planner = match cli.towers {
        TowerMode::Auto => {
            let planner = TowerPlanner::new(&snapshot, &engine.config().tower);
            debug!(candidates = planner.remaining(), "tower planner ready");
            Some(planner)
        }
        TowerMode::Off => None,
    };
    let presentation = Presentation::new(
        "Word Defence",
        Color::from_rgb_u8(18, 18, 24),
        palette,
        Scene::from_snapshot(&snapshot, tile_grid, &palette),
    );

    let backend = HeadlessBackend::new(Duration::from_millis(cli.dt_ms), cli.max_ticks, planner);
    backend.run(presentation, |dt, input, scene| {
        update(&mut engine, dt, input, scene, &palette)
    })?;

    println!("{}", engine.finalize_output());
    let final_snapshot = engine.snapshot();
    if cli.board {
        print!("{}", board::render(&final_snapshot));
    }

    let summary = final_snapshot.summary;
    println!(
        "score={} balance={} delivered={} corrupted={} hostiles_destroyed={} towers={}",
        summary.score,
        summary.balance,
        summary.delivered,
        summary.corrupted,
        summary.hostiles_destroyed,
        final_snapshot.towers.len(),
    );
    if !summary.complete {
        warn!(
            words_pending = summary.words_pending,
            "session did not complete within the frame limit"
        );
    }
    Ok(())
}

fn update(
    engine: &mut Engine,
    dt: Duration,
    input: FrameInput,
    scene: &mut Scene,
    palette: &Palette,
) -> FrameControl {
    if input.toggle_pause {
        if engine.summary().paused {
            engine.start();
        } else {
            engine.pause();
        }
    }

    if let Some(cell) = input
        .click_world_space
        .and_then(|position| scene.tile_grid.cell_at(position))
    {
        match engine.can_place_tower(cell) {
            Ok(()) => {
                engine.place_tower(cell.column(), cell.row());
                info!(column = cell.column(), row = cell.row(), "tower built");
            }
            Err(reason) => debug!(?cell, %reason, "click ignored"),
        }
    }

    engine.tick(dt);
    for event in engine.take_events() {
        tracing::trace!(?event, "event");
    }

    let tile_grid = scene.tile_grid;
    *scene = Scene::from_snapshot(&engine.snapshot(), tile_grid, palette);
    scene.placement_preview = input
        .cursor_world_space
        .and_then(|position| tile_grid.cell_at(position))
        .map(|cell| PlacementPreview {
            cell,
            verdict: engine.can_place_tower(cell),
        });

    if scene.hud.summary.complete {
        FrameControl::Exit
    } else {
        FrameControl::Continue
    }
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse config {}", path.display()))
}

fn read_text(cli: &Cli) -> Result<String> {
    match (&cli.input, &cli.text) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input {}", path.display())),
        (None, Some(text)) => Ok(text.clone()),
        (None, None) => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_require_an_input_source() {
        assert!(Cli::try_parse_from(["word-defence"]).is_err());
        assert!(Cli::try_parse_from(["word-defence", "--text", "a", "--input", "b.txt"]).is_err());
    }

    #[test]
    fn defaults_drive_an_automatic_session() {
        let cli = Cli::try_parse_from(["word-defence", "--text", "hello world", "-vv"])
            .expect("valid arguments");

        assert_eq!(cli.dt_ms, 50);
        assert_eq!(cli.max_ticks, 100_000);
        assert_eq!(cli.towers, TowerMode::Auto);
        assert_eq!(cli.verbose, 2);
        assert_eq!(read_text(&cli).expect("inline text"), "hello world");
    }

    #[test]
    fn towers_can_be_disabled() {
        let cli = Cli::try_parse_from(["word-defence", "--text", "a", "--towers", "none"])
            .expect("valid arguments");

        assert_eq!(cli.towers, TowerMode::Off);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let error = load_config(Some(Path::new("/nonexistent/word-defence.toml")))
            .expect_err("missing file");

        assert!(error.to_string().contains("failed to read config"));
    }

    #[test]
    fn frames_place_towers_and_finish_the_session() {
        let mut config = SessionConfig {
            seed: Some(3),
            ..SessionConfig::default()
        };
        config.hostile.speed = 0.0;
        let mut engine = Engine::new(config).expect("valid config");
        engine.load_input("one two");
        engine.start();

        let snapshot = engine.snapshot();
        let layout = snapshot.layout;
        let grid = TileGridPresentation::new(layout.columns(), layout.rows(), CELL_LENGTH)
            .expect("valid grid");
        let palette = Palette::default();
        let mut scene = Scene::from_snapshot(&snapshot, grid, &palette);
        let mut planner = TowerPlanner::new(&snapshot, &engine.config().tower);

        let input = crate::headless::InputSource::next_input(&mut planner, &scene);
        assert!(input.click_world_space.is_some());
        let _ = update(
            &mut engine,
            Duration::from_millis(50),
            input,
            &mut scene,
            &palette,
        );
        assert_eq!(scene.towers.len(), 1);

        let mut control = FrameControl::Continue;
        for _ in 0..10_000 {
            control = update(
                &mut engine,
                Duration::from_millis(50),
                FrameInput::default(),
                &mut scene,
                &palette,
            );
            if control == FrameControl::Exit {
                break;
            }
        }

        assert_eq!(control, FrameControl::Exit);
        assert_eq!(scene.hud.status, "complete");
        assert_eq!(engine.finalize_output(), "one two");
    }
}
