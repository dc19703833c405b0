//! pybolt entry point: scaffold a project and install its dependencies.

use pybolt::{
    cli::{get_args, Args, Command},
    error::default_error_handler,
    logger::init_logger,
    runner,
};

fn main() {
    let args: Args = get_args();
    let progress = init_logger(args.verbose);

    match args.command {
        Command::Create(create) => {
            if let Err(err) = runner::create(&create, &progress) {
                default_error_handler(err);
            }
        }
    }
}
