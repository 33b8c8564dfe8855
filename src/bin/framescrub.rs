use std::{io::IsTerminal, path::PathBuf, time::Duration};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use fern::colors::{Color, ColoredLevelConfig};
use framescrub::{
    FfmpegDecoder, MediaProbe, ScrubConfig, Session, SessionOutcome, Strategy, Summary,
    TerminalKeys, ViuRenderer,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Controls:\n  →/←  forward/back 0.25s\n  ./,  forward/back 1 frame\n  s    save current frame\n  q    quit and list saved frames\n\nExamples:\n  framescrub input.mp4\n  framescrub input.mp4 --out-dir stills --json\n  framescrub long.mkv --seek-threshold 30 --verbose\n  framescrub --completions zsh > _framescrub";

#[derive(Debug, Parser)]
#[command(
    name = "framescrub",
    version,
    about = "Scrub through a video frame by frame and save frames as PNG",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Video file to scrub.
    video: Option<PathBuf>,

    /// Directory saved frames are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Longest video (seconds) that is decoded up front instead of seeked.
    #[arg(long, default_value_t = framescrub::config::DEFAULT_SEEK_THRESHOLD_SECONDS)]
    seek_threshold: f64,

    /// Arrow-key jump length in seconds.
    #[arg(long, default_value_t = framescrub::config::DEFAULT_JUMP_SECONDS)]
    jump: f64,

    /// ffmpeg executable.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// ffprobe executable.
    #[arg(long, default_value = "ffprobe")]
    ffprobe: PathBuf,

    /// Terminal image viewer (must accept a path or `-` for stdin, like viu).
    #[arg(long, default_value = "viu")]
    viewer: PathBuf,

    /// Print the final list of saved frames as JSON.
    #[arg(long)]
    json: bool,

    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// Print a shell completion script and exit.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    fn config(&self) -> ScrubConfig {
        ScrubConfig::new()
            .with_output_directory(&self.out_dir)
            .with_seek_threshold(self.seek_threshold)
            .with_jump_seconds(self.jump)
            .with_ffmpeg(&self.ffmpeg)
            .with_ffprobe(&self.ffprobe)
            .with_viewer(&self.viewer)
    }
}

fn init_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Cyan)
        .trace(Color::BrightBlack);
    let use_color = std::io::stderr().is_terminal();

    fern::Dispatch::new()
        .level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format(move |out, message, record| {
            if use_color {
                out.finish(format_args!("{} {}", colors.color(record.level()), message))
            } else {
                out.finish(format_args!("{} {}", record.level(), message))
            }
        })
        .chain(std::io::stderr())
        .apply()
}

fn print_controls() {
    println!("\n{}", "Controls:".bold());
    println!("→: Forward 0.25s  ←: Back 0.25s");
    println!(".: Forward 1 frame  ,: Back 1 frame");
    println!("s: Save current frame");
    println!("q: Quit and save all marked frames\n");
}

fn extraction_spinner() -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg} {elapsed}")?);
    spinner.set_message("Extracting all frames...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn summary_json(summary: &Summary) -> serde_json::Value {
    let outcome = match summary.outcome {
        SessionOutcome::Quit => "quit",
        SessionOutcome::OutOfRange => "out_of_range",
    };
    json!({
        "video": summary.video.display().to_string(),
        "strategy": summary.strategy.name(),
        "outcome": outcome,
        "count": summary.saved.len(),
        "frames": summary.saved.iter().map(|frame| json!({
            "filename": frame.filename,
            "timestamp": frame.timestamp,
        })).collect::<Vec<_>>(),
    })
}

fn run(cli: Cli, video: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(error) = init_logger(cli.verbose) {
        eprintln!("{} {error}", "warning:".yellow().bold());
    }

    let config = cli.config();
    std::fs::create_dir_all(config.output_directory())?;
    print_controls();

    let probe = MediaProbe::new(&config, &video);
    let duration = probe.duration()?;
    let frames_per_second = probe.frame_rate();

    let spinner = match Strategy::for_duration(duration, config.seek_threshold()) {
        Strategy::Indexed => Some(extraction_spinner()?),
        Strategy::Seeked => None,
    };
    let session = Session::with_decoder(
        &config,
        &video,
        duration,
        frames_per_second,
        FfmpegDecoder::new(&config, &video),
    );
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let session = session?;

    let summary = session.run(
        &mut TerminalKeys::new(),
        &mut ViuRenderer::new(&config),
        &mut std::io::stdout(),
    )?;

    if summary.outcome == SessionOutcome::OutOfRange {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            "no frame to show, session ended early".yellow()
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary_json(&summary))?);
    } else {
        println!("\n{summary}");
    }
    Ok(())
}

fn main() {
    let mut cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "framescrub", &mut std::io::stdout());
        return;
    }

    let Some(video) = cli.video.take() else {
        let program = std::env::args_os()
            .next()
            .map_or_else(|| "framescrub".to_string(), |arg| arg.to_string_lossy().into_owned());
        println!("Usage: {program} video.mp4");
        std::process::exit(1);
    };

    if let Err(error) = run(cli, video) {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
