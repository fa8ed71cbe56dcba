//! Build script for the Code Converter app.
//!
//! Tauri codegen only runs for the `desktop` feature; the core library
//! has nothing to generate.

fn main() {
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
