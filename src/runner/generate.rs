use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
    thread,
    time::{Duration, Instant},
};

use ratatui::{
    style::{Style, Stylize},
    text::Text,
    widgets::{Block, Gauge, Paragraph, Widget},
};

use crate::{
    generator::{SamplePool, write_sample_file},
    statistics::STATISTICS,
    wordlist::Wordlist,
};

use super::Runner;

#[derive(Clone)]
pub struct GenerateConfig {
    pub num_files: u64,
    pub words_per_file: u64,
    pub output_dir: PathBuf,
    pub basic_list: PathBuf,
    pub full_list: Option<PathBuf>,
}

struct GenerateRunner {
    config: GenerateConfig,
    info: Arc<Mutex<GenerateInfo>>,
    handle: Option<thread::JoinHandle<()>>,
}

#[derive(Clone)]
enum GenerateInfo {
    Nothing,
    Writing(u64, u64, Instant),
    Finished(GenerateSummary),
    Failed(String),
}

#[derive(Clone)]
struct GenerateSummary {
    files: u64,
    words: u64,
    full_share: f64,
    elapsed: Duration,
}

impl Runner for GenerateRunner {
    fn start(&mut self) -> color_eyre::Result<()> {
        let info = self.info.clone();
        let config = self.config.clone();
        let handle = thread::spawn(move || run(info, config));
        self.handle.replace(handle);
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame) -> color_eyre::Result<()> {
        let info = self.info.lock().unwrap().clone();

        let area = frame.area();
        let buffer = frame.buffer_mut();
        match info {
            GenerateInfo::Nothing => {
                Paragraph::new("Setting up...")
                    .block(Block::bordered().title("Progress"))
                    .render(area, buffer);
            }
            GenerateInfo::Writing(written, total, started) => Gauge::default()
                .block(Block::bordered().title(format!(
                    "Progress => files: {written}/{total} | elapsed: {}s",
                    started.elapsed().as_secs()
                )))
                .gauge_style(Style::new().white().on_black().italic())
                .percent((written as f64 / total as f64 * 100.0).round() as u16)
                .render(area, buffer),
            GenerateInfo::Finished(summary) => {
                let mut throughputs = STATISTICS.get_throughputs();
                throughputs.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
                let others = throughputs
                    .iter()
                    .map(|(name, tp)| format!("{name}: {tp:.2}/s"));

                let lines = Text::from_iter(
                    [
                        format!("Time taken: {}s", summary.elapsed.as_secs()),
                        format!("files written: {}", summary.files),
                        format!("words written: {}", summary.words),
                        format!("full-list share: {:.1}%", summary.full_share * 100.0),
                        "--- Other Metrics ---".to_string(),
                    ]
                    .into_iter()
                    .chain(others),
                );
                Paragraph::new(lines)
                    .block(Block::bordered().title("Finished!"))
                    .render(area, buffer);
            }
            GenerateInfo::Failed(message) => {
                Paragraph::new(message)
                    .style(Style::new().red())
                    .block(Block::bordered().title("Failed"))
                    .render(area, buffer);
            }
        };

        Ok(())
    }

    fn exit_code(&self) -> std::process::ExitCode {
        match &*self.info.lock().unwrap() {
            GenerateInfo::Finished(_) => std::process::ExitCode::SUCCESS,
            _ => std::process::ExitCode::FAILURE,
        }
    }
}

pub fn new_generate_runner(config: GenerateConfig) -> Box<dyn Runner> {
    Box::new(GenerateRunner {
        config,
        info: Arc::new(Mutex::new(GenerateInfo::Nothing)),
        handle: None,
    })
}

fn run(info: Arc<Mutex<GenerateInfo>>, config: GenerateConfig) {
    if let Err(report) = try_run(&info, &config) {
        *info.lock().unwrap() = GenerateInfo::Failed(format!("{report:#}"));
    }
}

fn try_run(info: &Mutex<GenerateInfo>, config: &GenerateConfig) -> color_eyre::Result<()> {
    let start = Instant::now();
    let pool = SamplePool {
        basic: Wordlist::load(&config.basic_list)?,
        full: match &config.full_list {
            Some(path) => Some(Wordlist::load(path)?),
            None => None,
        },
    };
    fs::create_dir_all(&config.output_dir)?;

    let mut rng = rand::rng();
    for i in 0..config.num_files {
        let path = config.output_dir.join(format!("file_{i}.txt"));
        write_sample_file(&path, &pool, config.words_per_file, &mut rng)?;
        *info.lock().unwrap() = GenerateInfo::Writing(i + 1, config.num_files, start);
    }

    *info.lock().unwrap() = GenerateInfo::Finished(GenerateSummary {
        files: config.num_files,
        words: config.num_files * config.words_per_file,
        full_share: STATISTICS.draws.full_share(),
        elapsed: start.elapsed(),
    });
    Ok(())
}
