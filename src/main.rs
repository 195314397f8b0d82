use std::path::PathBuf;
use std::process;

use kaleidoscope::codec;
use kaleidoscope::effects::{Effect, Kaleidoscope};
use kaleidoscope::error::Result;
use kaleidoscope::{ConvolutionOrder, Settings};

const USAGE_EXIT: i32 = 1;

/// Parsed command line; `None` fields fall back to the settings file or defaults
#[derive(Debug, Default, PartialEq)]
struct Cli {
    input: PathBuf,
    output: PathBuf,
    settings: Option<PathBuf>,
    sectors: Option<u32>,
    quality: Option<i32>,
    scale: Option<i32>,
    sequential_blur: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Cli),
    Help,
}

fn print_usage() {
    println!("Usage: kaleidoscope [OPTIONS] <input> <output>");
    println!();
    println!("Options:");
    println!("  --sectors N        Number of wedges (default: 8, <4 uses 6, odd rounds up)");
    println!("  --quality Q        JPEG quality 0-100 (default: 90)");
    println!("  --scale P          Rescale the input to P percent after loading (default: 100)");
    println!("  --sequential-blur  Blur in place, column by column, like older releases");
    println!("  --settings FILE    Read defaults from a JSON settings file");
    println!("  --help             Show this help message");
}

/// Fetch the value following a flag
fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_number(flag: &str, value: &str) -> Result<i32, String> {
    value
        .parse::<i32>()
        .map_err(|_| format!("{} expects an integer, got '{}'", flag, value))
}

/// Parse arguments (without the program name)
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut cli = Cli::default();
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--sequential-blur" => cli.sequential_blur = true,
            "--sectors" => {
                let n = parse_number("--sectors", flag_value(args, &mut i, "--sectors")?)?;
                // Negative counts fall under the "fewer than 4" rule
                cli.sectors = Some(n.max(0) as u32);
            },
            "--quality" => {
                cli.quality = Some(parse_number("--quality", flag_value(args, &mut i, "--quality")?)?);
            },
            "--scale" => {
                cli.scale = Some(parse_number("--scale", flag_value(args, &mut i, "--scale")?)?);
            },
            "--settings" => {
                cli.settings = Some(PathBuf::from(flag_value(args, &mut i, "--settings")?));
            },
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            path => positional.push(PathBuf::from(path)),
        }
        i += 1;
    }

    if positional.len() < 2 {
        return Err("expected <input> and <output>".to_string());
    }
    if positional.len() > 2 {
        log::warn!("ignoring extra arguments after {}", positional[1].display());
    }

    let mut positional = positional.into_iter();
    cli.input = positional.next().unwrap_or_default();
    cli.output = positional.next().unwrap_or_default();
    Ok(Command::Run(cli))
}

/// Merge the settings file (if any) with command-line overrides
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => {
            log::info!("Settings: {}", path.display());
            Settings::load(path)?
        },
        None => Settings::default(),
    };

    if let Some(sectors) = cli.sectors {
        settings.sectors = sectors;
    }
    if let Some(scale) = cli.scale {
        settings.load_scale_percent = scale;
    }
    if cli.sequential_blur {
        settings.blur_order = ConvolutionOrder::Sequential;
    }
    Ok(settings)
}

/// Requested JPEG quality; range checking happens when saving
fn output_quality(cli: &Cli, settings: &Settings) -> i32 {
    cli.quality.unwrap_or_else(|| i32::from(settings.quality))
}

fn run(cli: &Cli) -> Result<()> {
    let settings = resolve_settings(cli)?;

    let mut buffer = codec::load(&cli.input, settings.load_scale_percent)?;
    log::info!(
        "Loaded {} ({}x{})",
        cli.input.display(),
        buffer.width(),
        buffer.height()
    );

    let effect = Kaleidoscope::new(settings.sectors).with_blur_order(settings.blur_order);
    effect.apply(&mut buffer);
    log::info!("{}: {} sectors", effect.name(), effect.sectors());

    let quality = output_quality(cli, &settings);
    codec::save(&buffer, &cli.output, quality)?;
    log::info!("Saved {} (quality {})", cli.output.display(), quality.clamp(0, 100));
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(Command::Run(cli)) => cli,
        Ok(Command::Help) => {
            print_usage();
            process::exit(0);
        },
        Err(msg) => {
            eprintln!("error: {}", msg);
            print_usage();
            process::exit(USAGE_EXIT);
        },
    };

    if let Err(err) = run(&cli) {
        eprintln!("error: {}", err);
        process::exit(err.exit_code());
    }
}
