use permscope::cli::commands::{CliArgs, Commands};
use permscope::cli::handlers::{
    handle_audit, handle_decode, handle_grant, handle_ls, EXIT_USAGE,
};
use permscope::util::logging::init_logging;
use permscope::{PermscopeConfig, RealFileSystem, VERSION};

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();

    let config = PermscopeConfig::default().with_args(&args);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_USAGE);
    }
    init_logging(config.logging());

    debug!("permscope v{} starting", VERSION);
    debug!("Arguments: {:?}", args);
    debug!("{}", config);

    let renderer = match config.renderer() {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_USAGE);
        }
    };

    let fs = RealFileSystem::new();
    let exit_code = match &args.command {
        Commands::Ls(ls_args) => handle_ls(&fs, &renderer, ls_args),
        Commands::Decode(decode_args) => handle_decode(&renderer, decode_args),
        Commands::Audit(audit_args) => {
            handle_audit(&fs, &renderer, audit_args, config.risk_threshold)
        }
        Commands::Grant(grant_args) => handle_grant(&fs, &renderer, grant_args),
    };

    std::process::exit(exit_code);
}
