//! Host-side helper: `cargo run` builds the WASM package into `static/pkg`
//! and serves `static/` locally so the ripple scene can be opened in a
//! browser.

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: u16 = 8000;

fn port() -> u16 {
    match env::var("RIPPLE_PORT") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("RIPPLE_PORT={raw:?} is not a port number, using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    }
}

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    // 1. Compile the scene via wasm-pack into static/pkg
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {},
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    // 2. Serve `static/`; image sets are expected under static/assets
    let port = port();
    println!("Launching local server at http://127.0.0.1:{port} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    if let Err(e) = server {
        eprintln!("failed to start http server: {e}");
        std::process::exit(1);
    }

    // Keep process alive
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}
