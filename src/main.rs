use std::io;
use std::process::ExitCode;

use shkit::domain::{ErrorKind, UtilError, EXIT_FAILURE};

fn main() -> ExitCode {
    let Err(e) = shkit::cli::run() else {
        return ExitCode::SUCCESS;
    };

    // The reader went away (`| head`); nothing left to report
    if is_broken_pipe(&e) {
        return ExitCode::SUCCESS;
    }

    match e.downcast_ref::<UtilError>() {
        Some(err) => {
            // A false check is an answer, not an error
            if err.kind() != ErrorKind::PredicateFalse {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::from(err.exit_code())
        }
        None => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
    })
}
