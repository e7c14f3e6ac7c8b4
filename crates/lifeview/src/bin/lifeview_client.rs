//! # LIFEVIEW Client
//!
//! Opens a window, connects to the frame server and draws every frame it
//! receives.
//!
//! ```text
//! lifeview_client [config.toml]
//! ```
//!
//! Controls: mouse wheel zooms, ESC or closing the window exits.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use lifeview::{Viewer, ViewerConfig, ViewerError};
use lifeview_core::FrameMailbox;
use lifeview_networking::{FrameTransport, TransportEvent, TransportHandle};
use lifeview_rendering::{PointRenderer, WgpuBackend};
use lifeview_ui::InputEvent;
use tracing_subscriber::EnvFilter;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

fn main() -> ExitCode {
    let resolved = ViewerConfig::resolve(std::env::args_os().nth(1).map(PathBuf::from));
    let fallback = resolved
        .as_ref()
        .map_or("info", |(config, _)| config.log_filter.as_str());
    init_tracing(fallback);

    let result = resolved
        .map_err(ViewerError::from)
        .and_then(|(config, source)| run(config, source));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "lifeview exited with an error");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the config's `log_filter`.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(config: ViewerConfig, source: Option<PathBuf>) -> Result<(), ViewerError> {
    match &source {
        Some(path) => tracing::info!(path = %path.display(), "config loaded"),
        None => tracing::info!("no config file, using defaults"),
    }

    // =========================================================================
    // WINDOW + GPU
    // =========================================================================
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
            .build(&event_loop)?,
    );

    let size = window.inner_size();
    let backend = pollster::block_on(WgpuBackend::new(
        Arc::clone(&window),
        size.width,
        size.height,
    ))?;
    let renderer = PointRenderer::new(backend, size.width, size.height);

    // =========================================================================
    // TRANSPORT + VIEWER
    // =========================================================================
    let mailbox = Arc::new(FrameMailbox::new());
    let mut viewer = Viewer::new(renderer, &config, Arc::clone(&mailbox));
    let mut transport = Some(FrameTransport::spawn(config.transport.clone(), mailbox)?);
    let mut fatal: Option<ViewerError> = None;

    viewer.scheduler_mut().start(Instant::now());
    tracing::info!(
        url = %config.transport.url,
        wire = ?config.grid.wire_format,
        fps = config.render.target_fps,
        "viewer running"
    );

    // =========================================================================
    // EVENT LOOP
    // =========================================================================
    event_loop.run(|event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } => {
            if let Err(error) = viewer.tick() {
                tracing::error!(%error, "render tick failed");
                fatal = Some(error);
                elwt.exit();
            }
        }
        Event::WindowEvent { event, .. } => {
            if let Some(input) = map_window_event(&event) {
                if !viewer.handle_input(input) {
                    elwt.exit();
                }
            }
        }
        Event::AboutToWait => {
            if let Some(handle) = &transport {
                log_transport_events(handle);
            }
            if viewer.scheduler_mut().poll(Instant::now()) {
                window.request_redraw();
            }
            if let Some(deadline) = viewer.scheduler().next_deadline() {
                elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
        }
        Event::LoopExiting => {
            if let Some(mut handle) = transport.take() {
                handle.shutdown();
            }
            viewer.shutdown();
        }
        _ => {}
    })?;

    fatal.map_or(Ok(()), Err)
}

fn map_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::MouseWheel { delta, .. } => {
            // winit reports wheel-down as negative; zoom treats it as positive.
            let delta_y = match delta {
                MouseScrollDelta::LineDelta(_, y) => -*y,
                MouseScrollDelta::PixelDelta(position) => -(position.y as f32),
            };
            Some(InputEvent::Wheel { delta_y })
        }
        WindowEvent::Resized(size) => Some(InputEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed
                && event.logical_key == Key::Named(NamedKey::Escape) =>
        {
            Some(InputEvent::CloseRequested)
        }
        _ => None,
    }
}

fn log_transport_events(handle: &TransportHandle) {
    for event in handle.poll_events() {
        match event {
            TransportEvent::StateChanged(state) => tracing::info!(?state, "server connection"),
            TransportEvent::Error(message) => tracing::debug!(%message, "transport error"),
        }
    }
}
