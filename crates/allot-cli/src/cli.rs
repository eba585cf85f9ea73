//! Command-line definition

use clap::{Arg, ArgAction, Command};

const MODES: [&str; 2] = ["hours", "percentage"];

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .value_name("FILE")
        .help("JSON activity array to read ('-' or absent for stdin)")
}

fn mode_arg() -> Arg {
    Arg::new("mode")
        .long("mode")
        .short('m')
        .value_parser(MODES)
        .default_value("hours")
        .help("How activity values are measured")
}

fn store_arg() -> Arg {
    Arg::new("store")
        .long("store")
        .value_name("FILE")
        .help("JSON file holding persisted charts")
}

pub(crate) fn build() -> Command {
    Command::new("allot")
        .version(allot_core::VERSION)
        .about("Encode, decode, resolve and publish weekly allocation share links")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("app-url")
                .long("app-url")
                .global(true)
                .env("ALLOT_APP_URL")
                .value_name("URL")
                .help("Public base address used in share links"),
        )
        .subcommand(
            Command::new("encode")
                .about("Encode activities into a share token")
                .arg(input_arg())
                .arg(mode_arg())
                .arg(
                    Arg::new("legacy")
                        .long("legacy")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("mode")
                        .help("Write the mode-less legacy token form"),
                ),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode a share token to JSON")
                .arg(Arg::new("token").required(true).help("Share token")),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve a share path segment (chart id or token)")
                .arg(Arg::new("segment").required(true).help("Share path segment"))
                .arg(store_arg()),
        )
        .subcommand(
            Command::new("share")
                .about("Publish activities as a share link")
                .arg(input_arg())
                .arg(mode_arg())
                .arg(
                    Arg::new("owner")
                        .long("owner")
                        .value_name("ID")
                        .help("Owner id; persists the chart instead of encoding it"),
                )
                .arg(
                    Arg::new("caller")
                        .long("caller")
                        .value_name("ADDR")
                        .help("Caller address used for rate limiting"),
                )
                .arg(store_arg()),
        )
}
