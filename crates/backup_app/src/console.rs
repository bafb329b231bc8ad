use std::io::{self, Write};

use backup_core::{download_line, poll_line};
use backup_engine::{EngineEvent, ProgressSink};

const CLEAR_LINE: &str = "\r\x1b[2K";

/// Draws progress on a single, repeatedly overwritten stdout line.
pub struct ConsoleProgressSink {
    enabled: bool,
}

impl ConsoleProgressSink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl ProgressSink for ConsoleProgressSink {
    fn emit(&self, event: EngineEvent) {
        if !self.enabled {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = out.write_all(render(&event).as_bytes());
        let _ = out.flush();
    }
}

fn render(event: &EngineEvent) -> String {
    match event {
        EngineEvent::Polling {
            percentage,
            minutes_left,
        } => format!("{CLEAR_LINE}{}", poll_line(percentage, *minutes_left)),
        EngineEvent::Downloaded { bytes } => format!("{CLEAR_LINE}{}", download_line(*bytes)),
        EngineEvent::PollingFinished | EngineEvent::DownloadFinished { .. } => "\n".to_string(),
    }
}
