mod app;
mod gpu;
mod renderer;

use anyhow::{Context, Result};
use winit::event_loop::EventLoop;

use isofield_engine::logging::{LoggingConfig, init_logging};

use crate::app::ViewerApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("isofield viewer starting");

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = ViewerApp::new();

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    Ok(())
}
