use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` overrides the INFO default.
pub fn init_tracing() -> crate::Result<()> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with_ansi(use_ansi(std::env::var_os("NO_COLOR").is_some()))
            .with_target(false)
            .with_line_number(true)
            .with_file(true)
            .finish(),
    )?;
    Ok(())
}

// colors only on an interactive terminal, see https://no-color.org
fn use_ansi(no_color: bool) -> bool {
    !no_color && !cfg!(windows) && std::io::stdout().is_terminal()
}
