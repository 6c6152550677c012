//! Needs a display and an OpenGL 4.5 driver: `cargo test -- --ignored`.
//!
//! One runtime per process (the event loop cannot be recreated), so every
//! check lives in a single test.

use std::time::{Duration, Instant};

use glwin_engine::logging::{LoggingConfig, init_logging};
use glwin_engine::{ContextInit, FrameStatus, Runtime, WindowConfig};

fn runtime() -> Runtime {
    init_logging(LoggingConfig {
        env_filter: Some("glwin_engine=debug".to_string()),
        ..LoggingConfig::default()
    });

    Runtime::new(ContextInit {
        any_thread: true,
        ..ContextInit::default()
    })
    .expect("bootstrap")
}

fn make_buffer() -> u32 {
    let mut id = 0;
    unsafe {
        gl::GenBuffers(1, &mut id);
        gl::BindBuffer(gl::ARRAY_BUFFER, id);
        gl::BufferData(gl::ARRAY_BUFFER, 16, std::ptr::null(), gl::STATIC_DRAW);
        gl::BindBuffer(gl::ARRAY_BUFFER, 0);
    }
    id
}

#[test]
#[ignore = "needs a display and an OpenGL 4.5 driver"]
fn windows_share_the_base_context() {
    let mut runtime = runtime();

    // Bootstrap leaves the base context current with a policy-conforming format.
    assert!(runtime.base().is_current());
    let format = runtime.base().pixel_format();
    assert!(format.color_bits >= 32);
    assert!(format.hardware_accelerated);

    gl::load_with(|symbol| runtime.get_proc_address(symbol));

    let a = runtime
        .create_window(&WindowConfig::new((50, 50), (320, 240)))
        .unwrap();
    let b = runtime
        .create_window(&WindowConfig::new((420, 50), (200, 100)).with_title("second"))
        .unwrap();

    // Reported size is the requested client area.
    assert_eq!(a.size(), (320, 240));
    assert_eq!((b.width(), b.height()), (200, 100));
    assert_ne!(a.id(), b.id());

    // Creating windows does not steal the current context.
    assert!(runtime.base().is_current());

    a.enter_context().unwrap();
    assert!(a.is_current());
    assert!(!runtime.base().is_current());
    a.exit_context().unwrap();
    assert!(runtime.base().is_current());

    // Objects made under one window's context are valid under the other's.
    let buffer = {
        let _scope = a.scope().unwrap();
        make_buffer()
    };
    assert!(runtime.base().is_current());

    {
        let _scope = b.scope().unwrap();
        assert!(b.is_current());
        assert_eq!(unsafe { gl::IsBuffer(buffer) }, gl::TRUE);
        unsafe { gl::DeleteBuffers(1, &buffer) };
        b.swap_buffers().unwrap();
    }
    assert!(runtime.base().is_current());

    // An empty queue does not block the pump.
    let started = Instant::now();
    for _ in 0..3 {
        assert_eq!(runtime.update(), FrameStatus::Continue);
    }
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(runtime.frame_time().unwrap().frame_index, 2);

    // Dropping a window whose context is current falls back to the base.
    a.enter_context().unwrap();
    drop(a);
    assert!(runtime.base().is_current());

    let err = runtime
        .create_window(&WindowConfig::new((0, 0), (0, 10)))
        .err()
        .expect("zero-sized window must fail");
    assert!(format!("{err:#}").contains("must be positive"));

    drop(b);
}
