//! Headless status bar simulator.
//!
//! Drives the widget engine against an in-memory `SimulatorDisplay` with fake
//! data feeds, then exports the final frame as a PNG.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod args;
mod assets;
mod feeds;
mod logger;
mod profiling;
mod scene;
mod timing;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use status_bar_common::colors::BLACK;
use status_bar_common::{DisplayCanvas, DisplaySession, WidgetSet};

use crate::args::Args;
use crate::feeds::Feeds;
use crate::profiling::FrameMetrics;

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logger::init(args.log_level) {
        eprintln!("failed to install logger: {e}");
        return ExitCode::FAILURE;
    }

    let config = scene::layout(args.width, assets::weather_icons());
    if args.dump_config {
        config.log_config();
    }

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(args.width, args.height));
    let mut feeds = Feeds::new();
    let mut metrics = FrameMetrics::new();

    let mut frame = 0;
    while frame < args.frames {
        // A reset drops every widget and starts again from the config.
        let mut set = WidgetSet::build(&config);
        let mut session: DisplaySession<'_> = DisplaySession::new(&mut set, &config);
        display.clear(BLACK).ok();

        let end = args.reset_every.map_or(args.frames, |n| frame.saturating_add(n.max(1)).min(args.frames));
        while frame < end {
            feeds.post(frame, &mut session);

            let render_start = Instant::now();
            let relayout = session.render(&mut DisplayCanvas::new(&mut display));
            metrics.record_frame(render_start.elapsed(), relayout);
            frame += 1;
        }

        if frame < args.frames {
            log::info!("[simulator] reset at frame {}", frame);
            metrics.inc_resets();
        }
    }

    log::info!("[simulator] {}", metrics.summary());

    let output_settings = OutputSettingsBuilder::new().scale(args.scale.max(1)).build();
    if let Err(e) = display.to_rgb_output_image(&output_settings).save_png(&args.out) {
        log::error!("[simulator] failed to write {}: {}", args.out.display(), e);
        return ExitCode::FAILURE;
    }
    log::info!("[simulator] wrote {}", args.out.display());

    eprintln!("--- recent log ---");
    for line in logger::recent() {
        eprintln!("{line}");
    }
    ExitCode::SUCCESS
}
