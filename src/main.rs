use std::process::ExitCode;

fn main() -> ExitCode {
    region_area::cli::run()
}
