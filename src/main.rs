use std::path::PathBuf;

use anyhow::{bail, Context};
use log::info;

use mdl_render::prelude::*;

const USAGE: &str = "usage: mdl-render [OUTPUT_DIR] [SIZE]";

struct Args {
    output_dir: PathBuf,
    size: u32,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        output_dir: PathBuf::from("anim"),
        size: mdl_render::config::DEFAULT_WIDTH,
    };

    if let Some(dir) = args.next() {
        if dir == "-h" || dir == "--help" {
            println!("{USAGE}");
            std::process::exit(0);
        }
        parsed.output_dir = PathBuf::from(dir);
    }
    if let Some(size) = args.next() {
        parsed.size = size
            .parse()
            .with_context(|| format!("invalid frame size '{size}'\n{USAGE}"))?;
    }
    if args.next().is_some() {
        bail!("too many arguments\n{USAGE}");
    }
    Ok(parsed)
}

/// A spinning torus around a bouncing sphere, lit from the upper right.
fn demo_scene(size: u32) -> (Vec<Operation>, SymbolTable) {
    let mut symbols = SymbolTable::new();
    symbols.insert(
        "shiny_purple",
        Symbol::Constants(Reflectivity::from_channels(
            [0.3, 0.2, 0.8],
            [0.0, 0.0, 0.0],
            [0.3, 0.2, 0.8],
        )),
    );
    symbols.insert(
        "sun",
        Symbol::Light(Light::new(Vec3::new(0.5, 0.75, 1.0), [255.0, 255.0, 255.0])),
    );

    let center = size as f64 / 2.0;
    let zoom = size as f64 / 500.0;

    let ops = vec![
        Operation::Constants {
            name: "shiny_purple".into(),
        },
        Operation::Frames(30),
        Operation::Basename("demo".into()),
        Operation::Vary {
            knob: "spin".into(),
            start_frame: 0,
            end_frame: 29,
            start_value: 0.0,
            end_value: 1.0,
        },
        Operation::Vary {
            knob: "bounce".into(),
            start_frame: 0,
            end_frame: 14,
            start_value: 0.0,
            end_value: 1.0,
        },
        Operation::Vary {
            knob: "bounce".into(),
            start_frame: 15,
            end_frame: 29,
            start_value: 1.0,
            end_value: 0.0,
        },
        Operation::Light {
            name: "sun".into(),
            knob: None,
        },
        Operation::Push,
        Operation::translate(center, center, 0.0),
        Operation::scale(zoom, zoom, zoom),
        Operation::rotate(Axis::X, 20.0),
        Operation::Push,
        Operation::rotate(Axis::Y, 360.0).with_knob("spin"),
        Operation::torus(Vec3::ZERO, 25.0, 150.0).with_constants("shiny_purple"),
        Operation::Pop,
        Operation::Push,
        Operation::translate(0.0, 80.0, 0.0).with_knob("bounce"),
        Operation::sphere(Vec3::ZERO, 60.0),
        Operation::Pop,
        Operation::Push,
        Operation::rotate(Axis::Z, 45.0).with_knob("spin"),
        Operation::cuboid(Vec3::new(-200.0, -170.0, 30.0), 400.0, 30.0, 60.0),
        Operation::Pop,
        Operation::Pop,
    ];

    (ops, symbols)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = RenderConfig::new(args.size, args.size)
        .with_step_3d(40)
        .with_output_dir(&args.output_dir);

    let (ops, symbols) = demo_scene(args.size);
    let engine = Engine::new(config, ops, symbols);
    let summary = engine.run().context("rendering demo scene failed")?;

    info!(
        "rendered {} frame(s) into {}",
        summary.settings.num_frames,
        args.output_dir.display()
    );
    if let Some(gif) = summary.animation {
        info!("animation: {}", gif.display());
    }
    Ok(())
}
