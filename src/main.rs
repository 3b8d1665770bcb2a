/*
 * Copyright (c) 2026 Ilya Shishov
 * Licensed under the MIT License.
 * See the LICENSE file in the project root for full license information.
 */

use std::io;

mod args;
mod error;
mod modes;
mod pattern;
mod serde_helpers;
mod sock;
mod sockets;
mod stream;
#[cfg(test)]
mod test_helpers;

use crate::args::ZcArgs;

fn main() -> io::Result<()> {
    let mut command = ZcArgs::get_scenario();
    command.execute();
    Ok(())
}
