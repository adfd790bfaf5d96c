//! Diagnostic output.
//!
//! In the browser this goes to the devtools console; native builds (tests)
//! write to stderr so failures stay visible in `cargo test` output.

pub fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("Market Runner: {message}").into());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("Market Runner: {message}");
}

pub fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&format!("Market Runner: {message}").into());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("Market Runner [warn]: {message}");
}
