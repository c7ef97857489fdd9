// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use std::io::Write;

fn main() {
    let mut stdout = std::io::stdout();
    let code = vlsi_exact::cli::steiner_main(std::env::args_os(), &mut stdout);
    let _ = stdout.flush();
    std::process::exit(code);
}
