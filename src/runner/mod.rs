use std::process::ExitCode;

use ratatui::Frame;

pub mod generate;
pub mod verify;

pub trait Runner {
    fn start(&mut self) -> color_eyre::Result<()>;

    fn draw(&self, frame: &mut Frame) -> color_eyre::Result<()>;

    /// Process exit status once the UI loop ends.
    fn exit_code(&self) -> ExitCode {
        ExitCode::SUCCESS
    }
}
