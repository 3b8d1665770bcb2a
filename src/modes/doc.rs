use crate::sock::SockDocViewer;
use std::io::{self, Write};
use std::process;

/// Prints the socket parameters schema and a few examples.
pub struct DocCommand {
    viewer: Box<dyn SockDocViewer>,
}

impl DocCommand {
    pub fn new(viewer: Box<dyn SockDocViewer>) -> Self {
        Self { viewer }
    }

    fn render(&self) -> String {
        format!(
            "Socket parameters (JSON schema):\n{}\n\nExamples:\n{}\n",
            self.viewer.get_full_scheme(),
            self.viewer.get_examples()
        )
    }
}

impl super::Command for DocCommand {
    fn execute(&mut self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(self.render().as_bytes()).and_then(|_| stdout.flush()) {
            eprintln!("Unable to print parameters documentation: {e}");
            process::exit(1);
        }
    }
}
