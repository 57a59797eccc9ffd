use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = perm_copy::cli::parse();
    app::run(args)
}
