//! Python module `app`.
//!
//! Importing the module bootstraps the base OpenGL context on the importing
//! thread; import fails if that is impossible. Afterwards:
//!
//! ```python
//! import app
//!
//! wnd = app.window((50, 50), (400, 400))
//! while app.update():
//!     with wnd:
//!         ...  # draw with any GL loader
//! ```

use std::cell::RefCell;

use glwin_engine::logging::{LoggingConfig, init_logging};
use glwin_engine::{ContextInit, Runtime, Window, WindowConfig};
use pyo3::exceptions::PySystemError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// Every platform failure surfaces as CPython's internal-call error.
fn internal_error(err: anyhow::Error) -> PyErr {
    log::error!("{err:#}");
    PySystemError::new_err(format!("{err:#}"))
}

fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> PyResult<R>) -> PyResult<R> {
    RUNTIME.with(|slot| {
        let mut slot = slot.borrow_mut();
        let runtime = slot.as_mut().ok_or_else(|| {
            PySystemError::new_err("app is not initialized on this thread; use it from the importing thread")
        })?;
        f(runtime)
    })
}

/// A window with its own OpenGL context, usable as a context manager.
///
/// Inside `with wnd:` the window's context is current; leaving the block
/// restores the base context.
#[pyclass(module = "app", name = "Window", unsendable)]
struct PyWindow {
    inner: Window,
}

#[pymethods]
impl PyWindow {
    #[getter]
    fn width(&self) -> u32 {
        self.inner.width()
    }

    #[getter]
    fn height(&self) -> u32 {
        self.inner.height()
    }

    #[getter]
    fn size(&self) -> (u32, u32) {
        self.inner.size()
    }

    fn swap_buffers(&self) -> PyResult<()> {
        self.inner.swap_buffers().map_err(internal_error)
    }

    fn __enter__(&self) -> PyResult<()> {
        self.inner.enter_context().map_err(internal_error)
    }

    #[pyo3(signature = (*_args))]
    fn __exit__(&self, _args: &Bound<'_, PyTuple>) -> PyResult<()> {
        self.inner.exit_context().map_err(internal_error)
    }

    fn __repr__(&self) -> String {
        format!("<app.Window {}x{}>", self.inner.width(), self.inner.height())
    }
}

/// Creates a visible window at `position` with a client area of `size`.
#[pyfunction]
#[pyo3(signature = (position, size))]
fn window(position: (i32, i32), size: (i32, i32)) -> PyResult<PyWindow> {
    let config = WindowConfig::from_signed(position, size).map_err(internal_error)?;

    with_runtime(|runtime| {
        let inner = runtime.create_window(&config).map_err(internal_error)?;
        Ok(PyWindow { inner })
    })
}

/// Pumps one frame. Returns `False` once a window was asked to close.
#[pyfunction]
fn update() -> PyResult<bool> {
    with_runtime(|runtime| Ok(runtime.update().is_continue()))
}

#[pymodule]
fn app(m: &Bound<'_, PyModule>) -> PyResult<()> {
    init_logging(LoggingConfig::default());

    // The event loop can exist once per process; a re-import reuses it.
    let initialized = RUNTIME.with(|slot| slot.borrow().is_some());
    if !initialized {
        let runtime = Runtime::new(ContextInit::default()).map_err(internal_error)?;
        RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime));
    }

    m.add_class::<PyWindow>()?;
    m.add_function(wrap_pyfunction!(window, m)?)?;
    m.add_function(wrap_pyfunction!(update, m)?)?;
    Ok(())
}
