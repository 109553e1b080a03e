use std::{process::ExitCode, time::Duration};

use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;
use wordcount_harness::runner::{
    Runner,
    generate::{GenerateConfig, new_generate_runner},
    verify::{VerifyConfig, new_verify_runner},
};

const BASIC_WORDLIST_PATH: &str = "./data/en-basic";
const FULL_WORDLIST_PATH: &str = "./data/en";
const EXIT_KEY: KeyEvent = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: CliCommands,
}

#[derive(Subcommand, Debug)]
enum CliCommands {
    /// Fill a directory with files of randomly sampled words
    Generate {
        /// Number of files to write
        #[arg(short, long, default_value_t = 500)]
        num_files: u64,

        /// Words per generated file
        #[arg(short, long, default_value_t = 5000)]
        words_per_file: u64,

        #[arg(short, long, default_value = "test_files")]
        output_dir: String,

        /// Wordlist that gets roughly 80% of the draws
        #[arg(short, long, default_value = BASIC_WORDLIST_PATH)]
        basic_list: String,

        /// Wordlist for the remaining draws
        #[arg(short, long, default_value = FULL_WORDLIST_PATH)]
        full_list: String,

        /// Sample every word from the basic list instead of the 80/20 mix
        #[arg(long)]
        single_list: bool,
    },

    /// Recount words in a directory and diff a program's output against them
    Verify {
        /// Directory of generated files
        #[arg(short, long, default_value = "test_files")]
        dir: String,

        /// `word count` pairs written by the program under test
        #[arg(short, long, default_value = "program_output.txt")]
        output: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    color_eyre::install().expect("color_eyre works");
    let terminal = ratatui::init();
    let result = run(terminal, cli);
    ratatui::restore();
    result.expect("Terminal loop didn't break")
}

fn run(mut terminal: DefaultTerminal, cli: Cli) -> color_eyre::Result<ExitCode> {
    let mut runner: Box<dyn Runner> = match cli.cmd {
        CliCommands::Generate {
            num_files,
            words_per_file,
            output_dir,
            basic_list,
            full_list,
            single_list,
        } => {
            if num_files == 0 || words_per_file == 0 {
                return Err(clap::Error::new(clap::error::ErrorKind::InvalidValue).into());
            }
            new_generate_runner(GenerateConfig {
                num_files,
                words_per_file,
                output_dir: output_dir.into(),
                basic_list: basic_list.into(),
                full_list: (!single_list).then(|| full_list.into()),
            })
        }
        CliCommands::Verify { dir, output } => new_verify_runner(VerifyConfig {
            dir: dir.into(),
            output: output.into(),
        }),
    };

    runner.start()?;
    loop {
        terminal.draw(|f| {
            runner.draw(f).expect("Runner shouldnt fail draw");
        })?;

        let has_event = event::poll(Duration::from_millis(100))?;

        if has_event && event::read()? == Event::Key(EXIT_KEY) {
            break Ok(runner.exit_code());
        }
    }
}
