use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for hookpoint-server
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub hook_id: Option<String>,
    pub max_request_size: Option<usize>,
    pub config_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Command::new("hookpoint-server")
            .version(hookpoint::VERSION)
            .about("HTTP registration endpoint for callback hooks")
            .long_about(
                r#"Hookpoint server accepts a single hook registration from an external
agent: the agent POSTs an XML document naming its callback URI and protocol
version, and the server stores the confirmation document under a fixed
identifier for later retrieval or removal.

The server can be configured through command line arguments, environment
variables, or a JSON config file. Command line arguments take precedence
over environment variables.

Examples:
  hookpoint-server --port 8080
  hookpoint-server --data-dir /var/lib/hookpoint --hook-id 1234
  hookpoint-server --config config.json --log-level debug"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: HOOKPOINT_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to a JSON configuration file. Values from the file are
overridden by environment variables and CLI arguments.",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("data_dir")
                    .short('d')
                    .long("data-dir")
                    .value_name("DIR")
                    .help("Data directory for durable hook storage")
                    .long_help(
                        "Directory the registered hook document is persisted in. When
not set, registrations are kept in process memory and do not survive a
restart.
Environment variable: HOOKPOINT_DATA_DIR",
                    )
                    .value_hint(ValueHint::DirPath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("hook_id")
                    .long("hook-id")
                    .value_name("ID")
                    .help("Identifier the registered hook is stored under")
                    .long_help(
                        "The fixed identifier for this deployment. The service supports
exactly one registered hook at a time, always addressed by this id. Must be
a string of digits.
Environment variable: HOOKPOINT_HOOK_ID",
                    )
                    .value_hint(ValueHint::Other),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for registration bodies. Larger requests
are rejected.
Environment variable: HOOKPOINT_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .action(ArgAction::SetTrue),
            )
            .get_matches();

        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self {
            port: matches.get_one::<u16>("port").copied(),
            data_dir: matches.get_one::<PathBuf>("data_dir").cloned(),
            hook_id: matches.get_one::<String>("hook_id").cloned(),
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("Hookpoint Server Environment Variables");
        println!("======================================");
        println!();
        println!("Server Configuration:");
        println!("  HOOKPOINT_PORT              - Server port (default: 9292)");
        println!("  HOOKPOINT_DATA_DIR          - Data directory for durable storage (default: in-memory)");
        println!("  HOOKPOINT_HOOK_ID           - Fixed hook identifier (default: 1234)");
        println!("  HOOKPOINT_MAX_REQUEST_SIZE  - Max request body size in bytes (default: 65536)");
        println!();
        println!("Logging:");
        println!("  RUST_LOG                    - Logging level (error, warn, info, debug, trace)");
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
        println!("Use --help for CLI argument documentation.");
    }
}
