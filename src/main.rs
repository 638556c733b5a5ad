//! Sigil Tracer - Seal Tracing Score Engine
//!
//! Scores recorded free-hand tracing sessions against canonical seal,
//! glyph and ring templates.

use sigil_tracer::app::cli::{Cli, Commands, ConfigAction};
use sigil_tracer::app::config::Config;
use sigil_tracer::capture::stroke::StrokeEvaluator;
use sigil_tracer::glyph::library as glyph_library;
use sigil_tracer::glyph::recognizer::Difficulty;
use sigil_tracer::seal::geometry::SealGeometry;
use sigil_tracer::seal::library as seal_library;
use sigil_tracer::workflow::recording::TraceRecording;
use sigil_tracer::workflow::scorer::SessionScorer;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Score {
            recording,
            output,
            difficulty,
        } => {
            run_score(&recording, output, difficulty, &config)?;
        }
        Commands::Inspect { recording } => {
            run_inspect(&recording, &config)?;
        }
        Commands::Validate { template } => {
            run_validate(&template)?;
        }
        Commands::Templates { detailed } => {
            run_templates(detailed);
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn run_score(
    recording_path: &Path,
    output: Option<PathBuf>,
    difficulty: Option<String>,
    config: &Config,
) -> anyhow::Result<()> {
    let recording = TraceRecording::load(recording_path)?;
    info!(
        name = %recording.metadata.name,
        seal = %recording.metadata.seal_id,
        strokes = recording.strokes.len(),
        "recording loaded"
    );

    let difficulty = match difficulty {
        Some(value) => value.parse::<Difficulty>()?,
        None => config.matching.difficulty,
    };

    let scorer = SessionScorer::new(difficulty, config.evaluator.rdp_epsilon_px);
    let report = scorer.score(&recording)?;

    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            info!(path = %path.display(), "score report written");
        }
        None => println!("{json}"),
    }

    println!(
        "{}: overall {:.3}, tier {}",
        recording.metadata.name, report.artifact.overall, report.artifact.tier
    );
    Ok(())
}

fn run_inspect(recording_path: &Path, config: &Config) -> anyhow::Result<()> {
    let recording = TraceRecording::load(recording_path)?;

    println!(
        "recording '{}' against seal '{}' ({} strokes)",
        recording.metadata.name,
        recording.metadata.seal_id,
        recording.strokes.len()
    );

    let mut evaluator = StrokeEvaluator::with_epsilon(config.evaluator.rdp_epsilon_px);
    for (index, stroke) in recording.strokes.iter().enumerate() {
        evaluator.reset();
        for event in &stroke.events {
            evaluator.push(*event);
        }
        let result = evaluator.finalize();

        println!(
            "  stroke {index}: {:?} | {} samples -> {} simplified | length {:.1}px | {:.0}ms | velocity {:.3}px/ms",
            stroke.intent,
            result.points.len(),
            result.simplified.len(),
            result.path_length,
            result.duration_ms,
            result.average_velocity,
        );
    }

    Ok(())
}

fn run_validate(template_path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(template_path)?;
    let geometry: SealGeometry = serde_json::from_str(&content)?;

    match geometry.validate() {
        Ok(()) => {
            println!(
                "seal '{}' valid: {} nodes, {} edges",
                geometry.id,
                geometry.nodes.len(),
                geometry.edges.len()
            );
            Ok(())
        }
        Err(e) => {
            warn!("validation failed: {e}");
            Err(e.into())
        }
    }
}

fn run_templates(detailed: bool) {
    println!("seals:");
    for seal in seal_library::all() {
        if detailed {
            println!(
                "  {} ({}): {} nodes, {} edges",
                seal.id,
                seal.name,
                seal.nodes.len(),
                seal.edges.len()
            );
        } else {
            println!("  {}", seal.id);
        }
    }

    println!("glyphs:");
    for glyph in glyph_library::all() {
        if detailed {
            println!(
                "  {} ({}): {} strokes, {} canonical points",
                glyph.id,
                glyph.name,
                glyph.required_strokes,
                glyph.path.len()
            );
        } else {
            println!("  {}", glyph.id);
        }
    }
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Reset { force } => {
            if !force {
                println!("pass --force to overwrite the saved configuration");
                return Ok(());
            }
            Config::default().save_default()?;
            println!("configuration reset to defaults");
        }
    }
    Ok(())
}
