//! OmniFeed CLI
//!
//! Usage:
//!   omnifeed --script gestures.txt           # Replay a gesture script
//!   omnifeed --interactive                   # One gesture command per line
//!   omnifeed --serve                         # HTTP + WebSocket API server
//!   omnifeed --script gestures.txt --json    # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use omnifeed::config::AppConfig;
use omnifeed::core::{
    parse_line, parse_script, run_command, run_server, FeedController, JsonFileSource,
    MockFeedSource, PostSource, RecordingFeedback, ScriptCommand,
};
use omnifeed::logging::init_logger;
use omnifeed::types::{InteractionType, LifecycleOutput};
use omnifeed::{FeedError, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "omnifeed",
    version = VERSION,
    about = "OmniFeed - Gesture-driven card feed engine",
    long_about = "OmniFeed turns raw pointer trajectories into feed interactions.\n\n\
                  Gestures:\n  \
                  swipe right  relevant\n  \
                  swipe left   irrelevant\n  \
                  swipe up     relevant + like\n  \
                  swipe down   irrelevant + dislike\n  \
                  circle       save to favorites\n\n\
                  Modes:\n  \
                  --script FILE  Replay a gesture script\n  \
                  --interactive  Read gesture commands from stdin\n  \
                  --serve        HTTP + WebSocket API server"
)]
struct Args {
    /// Gesture script to replay
    #[arg(long)]
    script: Option<PathBuf>,

    /// Interactive mode - read gesture commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the directional swipe threshold (px)
    #[arg(long)]
    threshold: Option<f64>,

    /// Read posts from a JSON file instead of the built-in mock batch
    #[arg(long)]
    posts: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logger(args.verbose, args.log_json);
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "config error:".red(), e);
            std::process::exit(2);
        }
    };

    if args.serve {
        run_serve(&args, config).await;
    } else if let Some(ref path) = args.script {
        run_script_file(path, &args, config);
    } else {
        run_interactive(&args, config);
    }
}

fn load_config(args: &Args) -> Result<AppConfig, FeedError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.gesture.directional_threshold = threshold;
    }
    if let Some(ref posts) = args.posts {
        config.feed.posts_file = Some(posts.clone());
    }
    config.gesture.validate()?;
    Ok(config)
}

fn build_feed(config: AppConfig) -> (FeedController, Arc<RecordingFeedback>) {
    let source: Box<dyn PostSource> = match &config.feed.posts_file {
        Some(path) => Box::new(JsonFileSource::new(path.clone())),
        None => Box::new(MockFeedSource::new()),
    };
    let feedback = Arc::new(RecordingFeedback::new());
    let mut feed = FeedController::new(config, source, feedback.clone());
    if let Err(e) = feed.load_more() {
        eprintln!("{} {}", "could not load posts:".yellow(), e);
    }
    (feed, feedback)
}

/// Replay a gesture script
fn run_script_file(path: &PathBuf, args: &Args, config: AppConfig) {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{} {}: {}", "cannot read script".red(), path.display(), e);
            std::process::exit(1);
        }
    };
    let commands = match parse_script(&text) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("{} {}", "script error:".red(), e);
            std::process::exit(1);
        }
    };

    let (mut feed, feedback) = build_feed(config);
    for command in &commands {
        match run_command(&mut feed, command) {
            Ok(outputs) => print_outputs(&feed, command, &outputs, args),
            Err(FeedError::NoTopCard) => {
                println!("{}", "✓ You're all caught up".green());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red(), e);
                std::process::exit(1);
            }
        }
    }
    print_summary(&feed, &feedback, args);
}

/// Read gesture commands from stdin
fn run_interactive(args: &Args, config: AppConfig) {
    let (mut feed, feedback) = build_feed(config);

    print_header("Interactive Mode");
    println!("Commands: down X Y | move X Y | up | complete | load | swipe DX DY | circle CX CY R | tick MS");
    println!("Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line_no = 0;

    loop {
        print!("{}", format_prompt(&feed));
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }
        line_no += 1;

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        let command = match parse_line(line, line_no) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{} {}", "⚠".yellow(), e);
                continue;
            }
        };

        match run_command(&mut feed, &command) {
            Ok(outputs) => print_outputs(&feed, &command, &outputs, args),
            Err(FeedError::NoTopCard) => println!("{}", "✓ You're all caught up".green()),
            Err(e) => println!("{} {}", "⚠".yellow(), e),
        }
    }

    println!();
    print_summary(&feed, &feedback, args);
}

fn print_header(mode: &str) {
    println!();
    println!("{}", format!("OmniFeed {} - {}", VERSION, mode).bold());
    println!();
}

fn format_prompt(feed: &FeedController) -> String {
    match feed.top_post() {
        Some(post) => format!(
            "[{}/{} {}] > ",
            feed.current_index() + 1,
            feed.posts().len(),
            post.author.cyan()
        ),
        None => "[caught up] > ".dimmed().to_string(),
    }
}

fn print_outputs(
    feed: &FeedController,
    command: &ScriptCommand,
    outputs: &[LifecycleOutput],
    args: &Args,
) {
    if *command == ScriptCommand::Load && !args.json {
        println!("{} {} posts queued", "↻".cyan(), feed.posts().len());
    }
    outputs.iter().for_each(|o| print_output(o, args));
}

fn print_output(output: &LifecycleOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "serialization error:".red(), e),
        }
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

fn print_summary(feed: &FeedController, feedback: &RecordingFeedback, args: &Args) {
    let summary = feed.summary();
    if args.json {
        match serde_json::to_string(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "serialization error:".red(), e),
        }
        return;
    }

    println!("{}", "Session summary".bold());
    println!("  interactions: {}", summary.total);
    for kind in InteractionType::ALL {
        let count = summary.count(kind);
        if count > 0 {
            println!("  {:<20} {}", kind.as_str(), count);
        }
    }
    println!("  favorites:    {}", summary.favorites);
    println!("  haptic pulses: {}", feedback.pulses().len());
    if let Some(ratio) = summary.relevance_ratio() {
        println!("  relevance:    {:.0}%", ratio * 100.0);
    }
    if feed.is_caught_up() {
        println!("  {}", "all caught up".green());
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: AppConfig) {
    println!();
    println!("{}", format!("OmniFeed API Server v{}", VERSION).bold());
    println!();

    if let Err(e) = run_server(&args.addr, config).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
