use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spincube_mount::{HeadlessHost, ResizeBus, SceneMount};
use spincube_render::DebugTextRenderer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spincube-cli", about = "Headless driver for the spincube viewport")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info
    Info,
    /// Mount a headless viewport, run the frame loop, and tear it down
    Spin {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "10")]
        frames: u32,

        /// Viewport width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Viewport height in pixels
        #[arg(long, default_value = "600")]
        height: u32,

        /// Dispatch a resize halfway through, e.g. --resize 1024x768
        #[arg(long)]
        resize: Option<String>,
    },
}

fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once('x')
        .with_context(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    Ok((
        w.parse().with_context(|| format!("bad width {w:?}"))?,
        h.parse().with_context(|| format!("bad height {h:?}"))?,
    ))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("spincube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("scene: {}", spincube_scene::crate_info());
            println!("render: {}", spincube_render::crate_info());
            println!("mount: {}", spincube_mount::crate_info());
        }
        Commands::Spin {
            frames,
            width,
            height,
            resize,
        } => {
            let resize = resize.as_deref().map(parse_size).transpose()?;

            let mut host = HeadlessHost::new();
            let mut bus = ResizeBus::new();
            let renderer = DebugTextRenderer::new(width, height);
            let mut mount = SceneMount::attach(&mut host, &mut bus, renderer, width, height);
            println!("mounted: {width}x{height}, children={}", host.child_count());

            let halfway = frames / 2;
            for i in 0..frames {
                if i == halfway {
                    if let Some((w, h)) = resize {
                        bus.dispatch(w, h);
                        println!("resized: {w}x{h}");
                    }
                }
                mount.frame();
            }

            if let Some(out) = mount.with_renderer(|r| r.last_frame().to_string()) {
                println!("{out}");
            }
            if let Some((rx, ry)) = mount.rotation() {
                println!("rotation: ({rx:.3}, {ry:.3})");
            }
            if let Some(aspect) = mount.camera_aspect() {
                println!("camera aspect: {aspect:.3}");
            }

            mount.detach(&mut host, &mut bus);
            println!(
                "detached: children={}, listeners={}",
                host.child_count(),
                bus.listener_count()
            );
        }
    }

    Ok(())
}
