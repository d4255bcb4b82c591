use human_panic::setup_panic;
use log::error;

fn main() {
    setup_panic!();

    if let Err(err) = solarcalc::cli::run_cli() {
        if solarcalc::log::is_logger_initialised() {
            error!("{err:?}");
        } else {
            eprintln!("Error: {err:?}");
        }

        // Terminate program, signalling an error
        std::process::exit(1);
    }
}
