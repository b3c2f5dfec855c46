//! reelkit - Programmatic sprint review videos
//!
//! Usage:
//!   reelkit gallery               Show the transition gallery schedule
//!   reelkit plan <CONFIG>         Show the sprint review schedule
//!   reelkit render <CONFIG>       Describe frames as JSON lines
//!   reelkit project <COMMAND>     Manage project.json
//!   reelkit convert <INPUT>       Convert a screen capture to 30 fps H.264

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "reelkit", about = "Frame-accurate sprint review videos", version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the transition gallery schedule
    Gallery {
        /// Print the schedule as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the sprint review schedule and audio tracks
    Plan {
        /// Sprint configuration file
        config: PathBuf,

        /// Asset root holding demos/, images/ and audio/
        #[arg(long, default_value = "public")]
        public: PathBuf,

        /// Built-in theme
        #[arg(long, default_value = "default")]
        theme: String,
    },

    /// Describe sprint review frames as JSON lines
    Render {
        /// Sprint configuration file
        config: PathBuf,

        /// Asset root holding demos/, images/ and audio/
        #[arg(long, default_value = "public")]
        public: PathBuf,

        /// Built-in theme
        #[arg(long, default_value = "default")]
        theme: String,

        /// First frame
        #[arg(long, default_value = "0")]
        from: i64,

        /// End frame, exclusive (defaults to the composition length)
        #[arg(long)]
        to: Option<i64>,
    },

    /// Manage a multi-session video project
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Convert a screen capture to constant-frame-rate H.264
    Convert {
        /// Captured video, usually WebM
        input: PathBuf,

        /// Output file (defaults to the input with an .mp4 extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target FPS
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Scale to a preset (1080p, 720p, mobile, tablet) or WIDTHxHEIGHT
        #[arg(long)]
        viewport: Option<String>,

        /// x264 constant rate factor
        #[arg(long, default_value_t = reelkit_media::DEFAULT_CRF)]
        crf: u32,

        /// Delete the input after a successful conversion
        #[arg(long)]
        remove_input: bool,
    },
}

#[derive(Subcommand)]
enum ProjectCommand {
    /// Create a project directory with a fresh project.json
    New {
        /// Project name
        name: String,

        /// Parent directory
        #[arg(short, long, default_value = "projects")]
        dir: PathBuf,

        /// Template the project follows
        #[arg(long, default_value = "sprint-review")]
        template: String,

        /// Brand profile
        #[arg(long, default_value = "default")]
        brand: String,
    },

    /// Show phase, health, blockers and next actions
    Status {
        /// Project directory
        path: PathBuf,

        /// Asset root used to refresh statuses
        #[arg(long, default_value = "public")]
        public: PathBuf,

        /// Print the scan result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record what was done today
    Log {
        /// Project directory
        path: PathBuf,

        /// Session summary
        summary: String,
    },

    /// Move the project to its next phase
    Advance {
        /// Project directory
        path: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Gallery { json } => commands::gallery::run(json),
        Commands::Plan {
            config,
            public,
            theme,
        } => commands::plan::run(config, public, theme),
        Commands::Render {
            config,
            public,
            theme,
            from,
            to,
        } => commands::render::run(config, public, theme, from, to),
        Commands::Project { command } => match command {
            ProjectCommand::New {
                name,
                dir,
                template,
                brand,
            } => commands::project::new(name, dir, template, brand),
            ProjectCommand::Status { path, public, json } => commands::project::status(path, public, json),
            ProjectCommand::Log { path, summary } => commands::project::log(path, summary),
            ProjectCommand::Advance { path } => commands::project::advance(path),
        },
        Commands::Convert {
            input,
            output,
            fps,
            viewport,
            crf,
            remove_input,
        } => commands::convert::run(input, output, fps, viewport, crf, remove_input).await,
    }
}
