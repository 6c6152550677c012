//! Four windows sharing one base context, each cleared to a cycling hue.
//!
//! A vertex buffer is uploaded once under the base context and checked from
//! every window to show that the contexts share objects.

use anyhow::{Result, ensure};
use glwin_engine::logging::{LoggingConfig, init_logging};
use glwin_engine::{ContextInit, Runtime, WindowConfig};

const LAYOUT: [(i32, i32); 4] = [(50, 50), (500, 50), (50, 500), (500, 500)];

fn main() -> Result<()> {
    init_logging(LoggingConfig {
        env_filter: Some("info".to_string()),
        ..LoggingConfig::default()
    });

    let mut runtime = Runtime::new(ContextInit::default())?;
    gl::load_with(|symbol| runtime.get_proc_address(symbol));

    let shared = upload_shared_buffer();

    let windows = LAYOUT
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            let config =
                WindowConfig::new(position, (400, 400)).with_title(format!("glwin {i}"));
            runtime.create_window(&config)
        })
        .collect::<Result<Vec<_>>>()?;

    for window in &windows {
        let _scope = window.scope()?;
        ensure!(
            unsafe { gl::IsBuffer(shared) } == gl::TRUE,
            "window {:?} cannot see the shared buffer",
            window.id()
        );
    }
    log::info!("{} windows share buffer {shared}", windows.len());

    let mut t = 0.0f32;
    while runtime.update().is_continue() {
        t += runtime.frame_time().map_or(1.0 / 60.0, |ft| ft.dt);

        for (i, window) in windows.iter().enumerate() {
            let _scope = window.scope()?;
            let [r, g, b] = hue(t * 0.1 + i as f32 / windows.len() as f32);
            unsafe {
                gl::Viewport(0, 0, window.width() as i32, window.height() as i32);
                gl::ClearColor(r, g, b, 1.0);
                gl::Clear(gl::COLOR_BUFFER_BIT);
            }
            window.swap_buffers()?;
        }
    }

    unsafe { gl::DeleteBuffers(1, &shared) };
    Ok(())
}

fn upload_shared_buffer() -> u32 {
    let quad: [f32; 8] = [0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0];
    let mut id = 0;
    unsafe {
        gl::CreateBuffers(1, &mut id);
        gl::NamedBufferData(
            id,
            size_of_val(&quad) as isize,
            quad.as_ptr().cast(),
            gl::STATIC_DRAW,
        );
    }
    id
}

/// Fully saturated color for hue `h` (wraps at 1.0), half brightness.
fn hue(h: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0) * 6.0;
    let channel = |offset: f32| ((((h + offset).rem_euclid(6.0) - 3.0).abs() - 1.0).clamp(0.0, 1.0)) * 0.5;
    [channel(0.0), channel(4.0), channel(2.0)]
}
