use super::models::{AppEvent, EventBus};
use colored::Colorize;
use std::sync::Arc;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn emit(&self, event: AppEvent) {
        match event {
            // Application lifecycle
            AppEvent::Starting => {
                if self.silent_mode {
                    return;
                }
                println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
                println!("  {}", "devserve - Development Asset Server".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
            }
            AppEvent::Ready { addr, namespace } => {
                if self.silent_mode {
                    tracing::info!("http server listening on: http://{}{}", addr, namespace);
                    return;
                }
                println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
                println!("  {} {}", "Server".white(), addr.cyan());
                println!(
                    "  {} {}",
                    "URL   ".white(),
                    format!("http://{}{}", addr, namespace).blue()
                );
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
            }
            AppEvent::Shutdown => {
                if !self.silent_mode {
                    println!("\n{}", "Server shutting down".red());
                }
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                if !self.silent_mode {
                    println!("  {} {}", "Loading config".dimmed(), path.cyan());
                }
            }
            AppEvent::ConfigLoaded { source_root, rewrites } => {
                if self.silent_mode {
                    return;
                }
                println!("  {} Sources {}", "✓".green(), source_root.cyan());
                if rewrites == 0 {
                    println!("  {} No extension rewrites configured", "⚠".yellow());
                } else {
                    println!(
                        "  {} {} extension rewrite(s)",
                        "✓".green(),
                        rewrites.to_string().cyan()
                    );
                }
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() && !self.silent_mode {
                    println!(
                        "  {} Config updated: {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    );
                }
            }
            AppEvent::ConfigReloaded { cleared_entries } => {
                tracing::info!(
                    "Configuration reloaded successfully ({} cached path(s) dropped)",
                    cleared_entries
                );
            }
            AppEvent::ConfigError { error } => {
                tracing::error!("Configuration error: {}", error);
            }
            AppEvent::RestartRequired { field } => {
                tracing::warn!("{} changed, restart the server to apply it", field);
            }

            // Source tree
            AppEvent::SourceRootCreated { path } => {
                if !self.silent_mode {
                    println!("  {} Created source directory {}", "+".green(), path.cyan());
                }
            }

            // Watcher
            AppEvent::WatchEnabled { path } => {
                if !self.silent_mode {
                    println!("  {} Watching {}", "↻".blue(), path.cyan());
                }
            }

            // Bind failures
            AppEvent::PortInUse { port } => {
                eprintln!(
                    "[ {} ] {}",
                    "devserve".red(),
                    format!("[Error] Port {} is already in use, server could not start!", port)
                        .yellow()
                );
                eprintln!(
                    "[ {} ] [Info] Try with a different one: {}",
                    "devserve".red(),
                    "DEVSERVE_PORT=<PORT> devserve".blue()
                );
            }

            // Errors
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
        }
    }
}
