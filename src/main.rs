use clap::{Args, Parser, Subcommand};
use log::info;
use netglobe::clock::FrameClock;
use netglobe::config::RunConfig;
use netglobe::controls::{Controls, KeyAction};
use netglobe::help::{render_help_overlay, HELP};
use netglobe::render::{render_status, GlobeRenderer, View};
use netglobe::scene::Palette;
use netglobe::settings::Settings;
use netglobe::terminal::Terminal;
use netglobe::{Globe, SceneDelta, SceneDescription};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::error::Error;
use std::f32::consts::FRAC_PI_2;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "netglobe")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Procedural network globe: nodes, arcs and traveling markers in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args)]
struct GlobeArgs {
    /// Number of nodes on the globe
    #[arg(short = 'N', long)]
    nodes: Option<usize>,

    /// Number of arcs between nodes
    #[arg(short = 'M', long)]
    arcs: Option<usize>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive animation
    Run {
        #[command(flatten)]
        globe: GlobeArgs,

        /// Seconds per frame
        #[arg(short, long)]
        time: Option<f32>,

        /// Viewer tilt in degrees
        #[arg(long, allow_hyphen_values = true)]
        tilt: Option<f32>,

        /// Color scheme (0 = scene palette, 1-9 = terminal schemes)
        #[arg(long)]
        scheme: Option<u8>,

        /// Initial time scale
        #[arg(long, default_value = "1.0")]
        speed: f32,
    },

    /// Render a single frame to stdout
    Print {
        #[command(flatten)]
        globe: GlobeArgs,

        /// Elapsed seconds of the frame to render
        #[arg(short, long, default_value = "0.0")]
        elapsed: f32,

        /// Output width in columns
        #[arg(long, default_value = "80")]
        width: u16,

        /// Output height in rows
        #[arg(long, default_value = "40")]
        height: u16,

        /// Viewer tilt in degrees
        #[arg(long, allow_hyphen_values = true)]
        tilt: Option<f32>,

        /// Color scheme (0 = scene palette, 1-9 = terminal schemes)
        #[arg(long)]
        scheme: Option<u8>,
    },

    /// Write the scene and one animation frame as JSON
    Dump {
        #[command(flatten)]
        globe: GlobeArgs,

        /// Elapsed seconds of the frame to dump
        #[arg(short, long, default_value = "0.0")]
        elapsed: f32,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },
}

#[derive(Serialize)]
struct Snapshot {
    seed: u64,
    scene: SceneDescription,
    frame: SceneDelta,
}

/// Settings file merged with command-line overrides
fn load_settings(args: &GlobeArgs) -> Result<Settings, Box<dyn Error>> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    if let Some(nodes) = args.nodes {
        settings.globe.node_count = nodes;
    }
    if let Some(arcs) = args.arcs {
        settings.globe.arc_count = arcs;
    }
    Ok(settings)
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    })
}

fn run(config: RunConfig, palette: Palette) -> Result<(), Box<dyn Error>> {
    let seed = resolve_seed(config.seed);
    info!("seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut globe = Globe::generate(config.globe.clone(), &mut rng)?;

    let mut term = Terminal::new()?;
    term.clear_screen()?;

    let (init_w, init_h) = term.size();
    let mut renderer = GlobeRenderer::new(init_w, init_h, palette);
    let mut controls = Controls::new(config.speed, config.display.color_scheme, config.display.tilt);
    let mut clock = FrameClock::new();

    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or(term.size());
        if (width, height) != term.size() {
            term.resize(width, height);
            renderer.resize(width, height);
            term.clear_screen()?;
        }

        if let Some((code, mods)) = term.check_key()? {
            match controls.handle_key(code, mods) {
                KeyAction::Quit => break,
                KeyAction::Regenerate => {
                    globe = Globe::generate(globe.config().clone(), &mut rng)?;
                    clock.reset();
                    info!("regenerated globe");
                }
                KeyAction::Continue => {}
            }
        }

        let elapsed = clock.tick(controls.time_scale, controls.paused);
        let delta = globe.update(elapsed);
        let view = View {
            tilt: controls.tilt,
            zoom: controls.zoom,
            scheme: controls.color_scheme,
        };

        renderer.draw(&mut term, &globe, &delta, &view);
        render_status(&mut term, &globe, elapsed, controls.time_scale, controls.paused);
        if controls.show_help {
            render_help_overlay(&mut term, HELP);
        }
        term.present()?;
        term.sleep(config.display.time_step);
    }

    Ok(())
}

fn print_frame(settings: &Settings, seed: Option<u64>, elapsed: f32, width: u16, height: u16, view: View) -> Result<(), Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(resolve_seed(seed));
    let globe = Globe::generate(settings.globe.clone(), &mut rng)?;
    let delta = globe.update(elapsed);

    let mut term = Terminal::headless(width, height);
    let mut renderer = GlobeRenderer::new(width, height, settings.palette.resolve());
    renderer.draw(&mut term, &globe, &delta, &view);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    term.write_ansi(&mut out)?;
    Ok(())
}

fn dump(settings: &Settings, seed: Option<u64>, elapsed: f32, pretty: bool) -> Result<(), Box<dyn Error>> {
    let seed = resolve_seed(seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let globe = Globe::generate(settings.globe.clone(), &mut rng)?;
    let snapshot = Snapshot {
        seed,
        scene: SceneDescription::new(&globe, &settings.palette.resolve()),
        frame: globe.update(elapsed),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, &snapshot)?;
    } else {
        serde_json::to_writer(&mut out, &snapshot)?;
    }
    writeln!(out)?;
    Ok(())
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { globe, time, tilt, scheme, speed } => {
            let settings = load_settings(&globe)?;
            let mut display = settings.display.clone();
            if let Some(time) = time {
                display.time_step = time;
            }
            if let Some(tilt) = tilt {
                display.tilt = tilt;
            }
            if let Some(scheme) = scheme {
                display.color_scheme = scheme;
            }
            display.validate()?;
            let config = RunConfig {
                globe: settings.globe.clone(),
                display,
                seed: globe.seed,
                speed,
            };
            run(config, settings.palette.resolve())?;
        }
        Commands::Print { globe, elapsed, width, height, tilt, scheme } => {
            let settings = load_settings(&globe)?;
            let view = View {
                tilt: tilt
                    .unwrap_or(settings.display.tilt)
                    .to_radians()
                    .clamp(-FRAC_PI_2, FRAC_PI_2),
                zoom: 1.0,
                scheme: scheme.unwrap_or(settings.display.color_scheme).min(9),
            };
            print_frame(&settings, globe.seed, elapsed, width, height, view)?;
        }
        Commands::Dump { globe, elapsed, pretty } => {
            let settings = load_settings(&globe)?;
            dump(&settings, globe.seed, elapsed, pretty)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = try_main() {
        eprintln!("netglobe: {}", e);
        std::process::exit(1);
    }
}
