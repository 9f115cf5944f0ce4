use crate::CLAP_STYLING;
use clap::{arg, command};
use pipedag_server::config::DEFAULT_HOST;
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("pipedag")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("pipedag")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Increase log verbosity (-v debug, -vv trace)")
                .required(false)
                .action(clap::ArgAction::Count)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("serve")
                .about("Serves the pipeline parser HTTP API")
                .arg(
                    arg!(--"host" <HOST>)
                        .required(false)
                        .help("Address to bind")
                        .env("PIPEDAG_HOST")
                        .default_value(DEFAULT_HOST),
                )
                .arg(
                    arg!(-p --"port" <PORT>)
                        .required(false)
                        .help("Port to listen on")
                        .env("PIPEDAG_PORT")
                        .value_parser(clap::value_parser!(u16))
                        .default_value("8000"),
                )
                .arg(
                    arg!(--"allow-origin" <ORIGIN>)
                        .required(false)
                        .help(
                            "Frontend origin allowed by CORS. Repeat for several origins; \
                        omit to allow all origins (development).",
                        )
                        .action(clap::ArgAction::Append),
                ),
        )
        .subcommand(
            command!("check")
                .about("Analyzes a pipeline JSON file locally and prints a report")
                .arg(
                    arg!([FILE])
                        .required(false)
                        .help("Pipeline JSON file, or '-' for stdin")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value("-"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            command!("submit")
                .about("Posts a pipeline JSON file to a running pipedag server")
                .arg(
                    arg!([FILE])
                        .required(false)
                        .help("Pipeline JSON file, or '-' for stdin")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value("-"),
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("Base URL of the server")
                        .value_parser(clap::value_parser!(Url))
                        .default_value("http://127.0.0.1:8000"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                ),
        )
}
