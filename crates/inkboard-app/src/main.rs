//! Command-line entry point.

use clap::{Parser, Subcommand, ValueEnum};
use inkboard_app::{AppError, Session, file_ops};
use inkboard_core::{ExportFormat, ShapeKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "inkboard", about = "Infinite-canvas whiteboard engine")]
struct Cli {
    /// Canvas configuration (JSON). Missing fields use defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a scene file as JSON, SVG or PNG.
    Export {
        scene: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Png)]
        format: FormatArg,
        /// Output path; defaults to a dated file name.
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        /// Zoom and center the view on the content first.
        #[arg(long)]
        fit: bool,
    },
    /// Replay a script of input steps, then export the result.
    Replay {
        script: PathBuf,
        /// Scene to start from.
        #[arg(long)]
        scene: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = FormatArg::Png)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print layer statistics, or layers matching a query.
    Stats {
        scene: PathBuf,
        #[arg(long)]
        query: Option<String>,
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Svg,
    Png,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Svg => ExportFormat::Svg,
            FormatArg::Png => ExportFormat::Png,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Freehand,
}

impl From<KindArg> for ShapeKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Rectangle => ShapeKind::Rectangle,
            KindArg::Ellipse => ShapeKind::Ellipse,
            KindArg::Line => ShapeKind::Line,
            KindArg::Arrow => ShapeKind::Arrow,
            KindArg::Freehand => ShapeKind::Freehand,
        }
    }
}

fn open_session(config: Option<&Path>, scene: Option<&Path>) -> Result<Session, AppError> {
    let mut session = Session::new(file_ops::load_config_or_default(config)?);
    if let Some(scene) = scene {
        let count = session.load_scene(&file_ops::read_scene(scene)?)?;
        log::info!("Loaded {count} elements from: {:?}", scene);
    }
    Ok(session)
}

fn write_output(session: &mut Session, format: FormatArg, out: Option<PathBuf>) -> Result<(), AppError> {
    let format = ExportFormat::from(format);
    let path = out.unwrap_or_else(|| file_ops::default_export_path(format));
    session.export_to(format, &path)?;
    println!("{}", path.display());
    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = cli.config.as_deref();
    match cli.command {
        Command::Export {
            scene,
            format,
            out,
            width,
            height,
            fit,
        } => {
            let mut session = open_session(config, Some(&scene))?;
            session.canvas_mut().set_viewport_size(width, height);
            if fit {
                session.canvas_mut().fit_to_content();
            }
            write_output(&mut session, format, out)
        }
        Command::Replay {
            script,
            scene,
            format,
            out,
        } => {
            let mut session = open_session(config, scene.as_deref())?;
            let steps = file_ops::read_script(&script)?;
            session.run_script(&steps)?;
            write_output(&mut session, format, out)
        }
        Command::Stats { scene, query, kind } => {
            let session = open_session(config, Some(&scene))?;
            let canvas = session.canvas();
            if query.is_none() && kind.is_none() {
                println!("{}", serde_json::to_string_pretty(&canvas.layer_stats())?);
            } else {
                let query = query.unwrap_or_default();
                for element in canvas.find_layers(&query, kind.map(ShapeKind::from)) {
                    println!("{}\t{}\t{}", element.id(), element.kind(), element.name);
                }
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Inkboard");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
