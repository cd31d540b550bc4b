use assetlist::cli::Cli;
use log::error;

fn main() {
    if let Err(err) = Cli::handle_command_line() {
        error!("{err:?}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
