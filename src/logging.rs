// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "networth=info";

/// Installs the global subscriber: stderr always, plus `log_file` (appended)
/// when given. `RUST_LOG` overrides the default `networth=info` filter.
pub fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let file = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let f = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Open log file {}", path.display()))?;
            Some(f)
        }
        None => None,
    };

    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        // Failure here only means another subscriber is already installed.
        let _ = match file {
            Some(f) => builder
                .with_ansi(false)
                .with_writer(std::io::stderr.and(Mutex::new(f)))
                .try_init(),
            None => builder.with_writer(std::io::stderr).try_init(),
        };
    });
    Ok(())
}
