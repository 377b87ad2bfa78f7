// File: crates/pathchart-core/src/display.rs
// Summary: Blocking on-screen window that shows a chart via RGBA blit (CPU) using winit + softbuffer.

use std::any::Any;
use std::cell::RefCell;
use std::num::NonZeroU32;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use std::thread::{self, ThreadId};

use tracing::{debug, info};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

use crate::chart::{Chart, RenderOptions};
use crate::error::{ChartError, Result};

const TARGET: &str = "display window";

// winit allows one event loop per process and it is not `Send`: the loop
// lives in the thread that first asked for it and other threads are refused.
static LOOP_THREAD: OnceLock<ThreadId> = OnceLock::new();

thread_local! {
    static EVENT_LOOP: RefCell<Option<EventLoop<()>>> = const { RefCell::new(None) };
}

/// Open a window showing `chart` and block until the user closes it
/// (close button, Escape or `q`). The chart is redrawn at the window size.
///
/// Fails with `RenderBackend` when no display server is reachable or when
/// another thread already owns the event loop.
pub fn show_blocking(chart: &Chart, opts: &RenderOptions) -> Result<()> {
    require_display_server()?;

    let me = thread::current().id();
    if *LOOP_THREAD.get_or_init(|| me) != me {
        return Err(ChartError::backend(TARGET, "the window event loop is owned by another thread"));
    }

    EVENT_LOOP.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(build_event_loop()?);
        }
        match slot.as_mut() {
            Some(event_loop) => run_window(event_loop, chart, opts),
            None => Err(ChartError::backend(TARGET, "event loop unavailable")),
        }
    })
}

#[cfg(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
))]
fn require_display_server() -> Result<()> {
    let set = |var: &str| std::env::var_os(var).is_some_and(|v| !v.is_empty());
    if set("DISPLAY") || set("WAYLAND_DISPLAY") {
        Ok(())
    } else {
        Err(ChartError::backend(TARGET, "no display server (DISPLAY and WAYLAND_DISPLAY are unset)"))
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
fn require_display_server() -> Result<()> {
    Ok(())
}

/// winit reports backend failures by panicking; turn those into errors.
fn build_event_loop() -> Result<EventLoop<()>> {
    let built = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut builder = EventLoopBuilder::new();
        #[cfg(any(
            target_os = "linux",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd"
        ))]
        {
            use winit::platform::x11::EventLoopBuilderExtX11;
            builder.with_any_thread(true);
        }
        builder.build()
    }));
    built.map_err(|payload| ChartError::backend(TARGET, panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "failed to create the window event loop".to_string()
    }
}

fn run_window(event_loop: &mut EventLoop<()>, chart: &Chart, opts: &RenderOptions) -> Result<()> {
    let title = if chart.title.is_empty() { "pathchart" } else { chart.title.as_str() };
    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(LogicalSize::new(opts.width.max(1) as f64, opts.height.max(1) as f64))
        .build(event_loop)
        .map_err(|e| ChartError::backend(TARGET, e))?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| ChartError::backend(TARGET, e))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| ChartError::backend(TARGET, e))?;

    info!("window opened; close it to continue");
    let mut failure: Option<ChartError> = None;
    event_loop.run_return(|event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape | VirtualKeyCode::Q),
                            ..
                        },
                    ..
                } => *cf = ControlFlow::Exit,
                WindowEvent::Resized(_) => window.request_redraw(),
                _ => {}
            },
            Event::RedrawRequested(id) if id == window.id() => {
                if let Err(e) = present(&window, &mut surface, chart, opts) {
                    failure = Some(e);
                    *cf = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
    debug!("window closed");

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn present(window: &Window, surface: &mut softbuffer::Surface, chart: &Chart, opts: &RenderOptions) -> Result<()> {
    let size = window.inner_size();
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        // minimised
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| ChartError::backend(TARGET, e))?;

    let mut frame_opts = opts.clone();
    frame_opts.width = size.width as i32;
    frame_opts.height = size.height as i32;
    let (rgba, _, _, _) = chart.render_to_rgba8(&frame_opts)?;

    let mut frame = surface.buffer_mut().map_err(|e| ChartError::backend(TARGET, e))?;
    for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
        // softbuffer expects 0RGB
        *dst = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
    }
    frame.present().map_err(|e| ChartError::backend(TARGET, e))
}
