const BYTES_PER_MB: f64 = 1_048_576.0;

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Console line shown while the remote job is running.
pub fn poll_line(percentage_label: &str, minutes_left: u64) -> String {
    format!("{percentage_label}. Timeout remaining: {minutes_left}m")
}

/// Console line shown while the archive streams to disk.
pub fn download_line(bytes: u64) -> String {
    format!("{:.2}MB   downloaded", megabytes(bytes))
}
