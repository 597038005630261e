#![forbid(unsafe_code)]

//! bgfx binary entry point.

use bgfx_demo::cli;

fn main() {
    let opts = cli::Opts::parse();
    if let Err(e) = bgfx_demo::run(&opts) {
        eprintln!("bgfx: {e}");
        std::process::exit(1);
    }
}
