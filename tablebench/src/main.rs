use std::process::ExitCode;

fn main() -> ExitCode {
    match tablebench::run() {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
