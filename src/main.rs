use clap::Parser;
use media_minmax::cli::{self, output, Cli};

fn main() {
    // handle broken pipe gracefully (e.g., when piping to `head` that exits early)
    reset_sigpipe();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;

    if let Err(e) = cli::run(cli) {
        if json {
            output::print_json_error(e.code, &e.message, e.data.as_ref());
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(e.code);
    }
}

/// warnings by default, debug with --verbose; RUST_LOG takes precedence
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// reset SIGPIPE to default behavior (terminate process) instead of panicking
/// this is the standard Unix behavior for CLI tools
fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
