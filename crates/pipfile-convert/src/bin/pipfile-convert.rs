use std::process::ExitCode;

use pipfile_convert::main as pipfile_convert_main;

fn main() -> ExitCode {
    pipfile_convert_main(std::env::args_os())
}
