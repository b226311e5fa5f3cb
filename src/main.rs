use std::process::ExitCode;

fn main() -> ExitCode {
    match prenivdl_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("prenivdl: cannot start async runtime: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
