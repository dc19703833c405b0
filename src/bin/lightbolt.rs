//! lightbolt entry point: scaffold a project, then run its development server.

use pybolt::{
    cli::{get_args, LightboltArgs, LightboltCommand},
    error::default_error_handler,
    logger::init_logger,
    runner,
};

fn main() {
    let args: LightboltArgs = get_args();
    let progress = init_logger(args.verbose);

    match args.command {
        LightboltCommand::Create(create) => {
            if let Err(err) = runner::create_and_serve(&create, &progress) {
                default_error_handler(err);
            }
        }
    }
}
