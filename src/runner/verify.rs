use std::{
    path::PathBuf,
    process::ExitCode,
    sync::{Arc, Mutex},
    thread,
    time::{Duration, Instant},
};

use ratatui::{
    style::{Style, Stylize},
    text::Text,
    widgets::{Block, Gauge, Paragraph, Widget},
};

use crate::counter::{
    Mismatch, WordCounts, compare_counts, count_words_in_file, data_files, parse_program_output,
};

use super::Runner;

/// Mismatch lines shown before the report is cut off.
const MAX_SHOWN_MISMATCHES: usize = 16;

#[derive(Clone)]
pub struct VerifyConfig {
    pub dir: PathBuf,
    pub output: PathBuf,
}

struct VerifyRunner {
    config: VerifyConfig,
    info: Arc<Mutex<VerifyInfo>>,
    handle: Option<thread::JoinHandle<()>>,
}

#[derive(Clone)]
enum VerifyInfo {
    Nothing,
    Counting(u64, u64, Instant),
    Finished(VerifySummary),
    Failed(String),
}

#[derive(Clone)]
struct VerifySummary {
    files: u64,
    distinct_words: u64,
    total_words: u64,
    mismatches: Vec<Mismatch>,
    elapsed: Duration,
}

impl Runner for VerifyRunner {
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
            VerifyInfo::Nothing => {
                Paragraph::new("Setting up...")
                    .block(Block::bordered().title("Progress"))
                    .render(area, buffer);
            }
            VerifyInfo::Counting(counted, total, started) => Gauge::default()
                .block(Block::bordered().title(format!(
                    "Progress => files: {counted}/{total} | elapsed: {}s",
                    started.elapsed().as_secs()
                )))
                .gauge_style(Style::new().white().on_black().italic())
                .percent((counted as f64 / total as f64 * 100.0).round() as u16)
                .render(area, buffer),
            VerifyInfo::Finished(summary) => {
                let mut lines = vec![
                    format!("Time taken: {}s", summary.elapsed.as_secs()),
                    format!(
                        "files scanned: {}, words counted: {} ({} distinct)",
                        summary.files, summary.total_words, summary.distinct_words
                    ),
                ];
                let (title, style) = if summary.mismatches.is_empty() {
                    lines.push("All counts match.".to_string());
                    ("Verified", Style::new().green())
                } else {
                    for mismatch in summary.mismatches.iter().take(MAX_SHOWN_MISMATCHES) {
                        lines.push(mismatch.to_string());
                    }
                    if summary.mismatches.len() > MAX_SHOWN_MISMATCHES {
                        lines.push(format!(
                            "... and {} more",
                            summary.mismatches.len() - MAX_SHOWN_MISMATCHES
                        ));
                    }
                    ("Mismatched", Style::new().red())
                };
                Paragraph::new(Text::from_iter(lines))
                    .style(style)
                    .block(Block::bordered().title(title))
                    .render(area, buffer);
            }
            VerifyInfo::Failed(message) => {
                Paragraph::new(message)
                    .style(Style::new().red())
                    .block(Block::bordered().title("Failed"))
                    .render(area, buffer);
            }
        };

        Ok(())
    }

    fn exit_code(&self) -> ExitCode {
        match &*self.info.lock().unwrap() {
            VerifyInfo::Finished(summary) if summary.mismatches.is_empty() => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    }
}

pub fn new_verify_runner(config: VerifyConfig) -> Box<dyn Runner> {
    Box::new(VerifyRunner {
        config,
        info: Arc::new(Mutex::new(VerifyInfo::Nothing)),
        handle: None,
    })
}

fn run(info: Arc<Mutex<VerifyInfo>>, config: VerifyConfig) {
    if let Err(report) = try_run(&info, &config) {
        *info.lock().unwrap() = VerifyInfo::Failed(format!("{report:#}"));
    }
}

fn try_run(info: &Mutex<VerifyInfo>, config: &VerifyConfig) -> color_eyre::Result<()> {
    let start = Instant::now();
    let files = data_files(&config.dir)?;
    let total = files.len() as u64;

    let mut counts = WordCounts::new();
    for (i, path) in files.iter().enumerate() {
        count_words_in_file(path, &mut counts)?;
        *info.lock().unwrap() = VerifyInfo::Counting(i as u64 + 1, total, start);
    }

    let program_counts = parse_program_output(&config.output)?;
    let mismatches = compare_counts(&counts, &program_counts);

    *info.lock().unwrap() = VerifyInfo::Finished(VerifySummary {
        files: total,
        distinct_words: counts.len() as u64,
        total_words: counts.values().sum(),
        mismatches,
        elapsed: start.elapsed(),
    });
    Ok(())
}
