use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use skyscroll::config::SceneConfig;
use skyscroll::{RendererOptions, Skyscroll, SoftwareRenderer, TextureLoader};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory where the rendered frames will be written.
    output: String,
    /// Viewport resolution in form "WxH".
    #[clap(short, long = "res", default_value = "1280x720")]
    resolution: String,
    /// Number of frames to render while scrolling from the top to the bottom of the page.
    #[clap(short, long, default_value = "120")]
    frames: u32,
    /// Full height of the emulated page, in pixels.
    #[clap(short, long, default_value = "8000")]
    page_height: f32,
    /// Directory containing the planet textures.
    #[clap(short, long, default_value = ".")]
    assets: String,
    /// Seed for the placement of stars and planets.
    #[clap(short, long)]
    seed: Option<u64>,
    /// Ratio between physical and logical pixels.
    #[clap(long, default_value = "1.0")]
    pixel_ratio: f32,
    /// Animation frames advanced between two rendered frames.
    #[clap(short, long, default_value = "1")]
    ticks: u32,
    /// Number of stars in the starfield.
    #[clap(long)]
    stars: Option<usize>,
    /// Start rendering without waiting for the textures.
    #[clap(long)]
    no_wait: bool,
    /// Render over an opaque black background instead of a transparent one.
    #[clap(long)]
    opaque: bool,
}

fn main() {
    let args = Args::parse();
    env_logger::init();
    let (width, height) = match parse_resolution(&args.resolution) {
        Ok(res) => res,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    if args.frames == 0 {
        log::error!("At least one frame must be rendered");
        std::process::exit(1);
    }
    let out_dir = PathBuf::from(&args.output);
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        log::error!("The output directory can not be created: {e}");
        std::process::exit(1);
    }
    let mut config = SceneConfig {
        seed: args.seed,
        ..Default::default()
    };
    if let Some(stars) = args.stars {
        config.star_count = stars;
    }
    let options = RendererOptions {
        width,
        height,
        pixel_ratio: args.pixel_ratio,
        clear_color: if args.opaque { [0, 0, 0, 255] } else { [0, 0, 0, 0] },
    };
    print!("Setting up scene... ");
    let setup_start = Instant::now();
    let loader = TextureLoader::new(&args.assets);
    let app = SoftwareRenderer::new(options)
        .and_then(|renderer| Skyscroll::new(&config, renderer, (width, height), &loader));
    let mut app = match app {
        Ok(app) => app,
        Err(e) => {
            println!("{}", style("Failed").bold().red());
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    if !args.no_wait {
        let report = app.wait_for_textures();
        if report.failed > 0 {
            log::warn!(
                "{} textures could not be loaded from {}",
                report.failed,
                loader.root().display()
            );
        }
    }
    println!(
        "{} ({} ms)",
        style("Done").bold().green(),
        setup_start.elapsed().as_millis()
    );
    let render_start = Instant::now();
    let pb = ProgressBar::new(args.frames as u64);
    if let Ok(pb_style) = ProgressStyle::with_template(
        "Rendering @ {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
    ) {
        pb.set_style(pb_style.progress_chars("=> "));
    }
    pb.set_message(format!("{}x{}", width, height));
    let scrollable = (args.page_height - height as f32).max(0.0);
    for i in 0..args.frames {
        let progress = if args.frames > 1 {
            i as f32 / (args.frames - 1) as f32
        } else {
            0.0
        };
        app.on_scroll(progress * scrollable, args.page_height);
        // only the last tick is rendered, the others just advance the animation
        app.advance(args.ticks.saturating_sub(1) as u64);
        app.frame();
        let path = frame_path(&out_dir, i);
        if let Err(e) = app.renderer().frame().save(&path) {
            pb.abandon();
            log::error!("Failed to save {}: {}", path.display(), e);
            std::process::exit(1);
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    println!(
        "Rendered {} frames in {} ({} ms)",
        args.frames,
        out_dir.display(),
        render_start.elapsed().as_millis()
    );
    println!("All done :)");
}

/// Parses a resolution in form `WIDTHxHEIGHT`.
fn parse_resolution(resolution: &str) -> Result<(u32, u32), String> {
    let (wstr, hstr) = resolution.split_once('x').ok_or_else(|| {
        "The resolution must be specified in form WIDTHxHEIGHT, for example 1920x1080".to_string()
    })?;
    let width = wstr
        .parse::<u32>()
        .map_err(|_| "Failed to parse the requested width".to_string())?;
    let height = hstr
        .parse::<u32>()
        .map_err(|_| "Failed to parse the requested height".to_string())?;
    if width == 0 || height == 0 {
        return Err("The resolution must be greater than zero".to_string());
    }
    Ok((width, height))
}

fn frame_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("frame_{:05}.png", index))
}

#[cfg(test)]
mod tests {
    use super::{frame_path, parse_resolution};
    use std::path::Path;

    #[test]
    fn resolution() {
        assert_eq!(parse_resolution("1920x1080"), Ok((1920, 1080)));
        assert!(parse_resolution("1920").is_err());
        assert!(parse_resolution("axb").is_err());
        assert!(parse_resolution("0x100").is_err());
        assert!(parse_resolution("100x-3").is_err());
    }

    #[test]
    fn frame_names_sort() {
        let dir = Path::new("out");
        assert_eq!(frame_path(dir, 7), dir.join("frame_00007.png"));
        assert!(frame_path(dir, 9) < frame_path(dir, 10));
    }
}
