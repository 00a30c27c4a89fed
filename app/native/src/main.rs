//! menubar-fix command-line entry point.
//!
//! The presentation options only take effect on macOS; elsewhere `run` still
//! supervises the command but never touches the Objective-C runtime.

fn main() {
    match menubar_fix_lib::cli::run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("menubar-fix: {err}");
            std::process::exit(1);
        }
    }
}
