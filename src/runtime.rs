//! Runtime behind the blocking entry points and the CLI.

use once_cell::sync::Lazy;
use tokio::runtime::{Builder, Runtime};

static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    Builder::new_multi_thread()
        .thread_name("recipe-porter")
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Drive `future` to completion from synchronous code.
///
/// Must not be called from inside an async context.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    RUNTIME.block_on(future)
}
