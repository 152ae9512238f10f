use clap::{CommandFactory, Parser};
use pnp_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // Without a subcommand, show help and exit cleanly
    if args.command.is_none() {
        if let Err(e) = Args::command().print_help() {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        println!();
        process::exit(0);
    }

    if let Err(error) = commands::run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}
