//! HomeDash RPC server: JSON-RPC over stdin/stdout for a UI host.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"drag.drop", "params":{"column":2,"index":0}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! With `HOMEDASH_SERVER_URL` set, the dashboard is read from that server
//! and layout saves are POSTed back to it instead of the local config.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use homedash::app::App;
use homedash::logging;
use homedash::rpc_handler::handle_method;

use serde_json::{json, Value};
use tracing::{error, info};

fn respond(value: &Value) {
    let mut stdout = io::stdout().lock();
    // A closed stdout means the host is gone; the read loop ends next.
    let _ = writeln!(stdout, "{}", value);
    let _ = stdout.flush();
}

fn main() {
    if let Err(e) = logging::init_tracing(logging::verbosity_from(
        std::env::var("HOMEDASH_VERBOSE").ok().as_deref(),
    )) {
        eprintln!("{}", e);
    }

    let config_path = std::env::var("HOMEDASH_CONFIG").ok();
    let data_dir = std::env::var("HOMEDASH_DATA_DIR").ok().map(PathBuf::from);

    let server_url = std::env::var("HOMEDASH_SERVER_URL")
        .ok()
        .filter(|url| !url.trim().is_empty());

    let app = match App::new(config_path, data_dir.as_deref()) {
        Ok(mut app) => {
            if let Some(url) = server_url.as_deref() {
                app.connect(url);
            }
            Mutex::new(app)
        }
        Err(e) => {
            error!(error = %e, "failed to initialize HomeDash");
            respond(&json!({"event": "fatal", "error": e.to_string()}));
            std::process::exit(1);
        }
    };

    respond(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    info!("rpc server ready");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        respond(&response);
    }
}
