//! Progress bar utilities.

use std::io::{self, Write};

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Create the container all bars of a run are drawn in.
pub fn create_multi_progress(visible: bool) -> MultiProgress {
    if visible {
        MultiProgress::new()
    } else {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }
}

/// Create a spinner for long-running operations.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Create a spinner that counts items when the total is not known.
pub fn create_counter_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template(&format!("{{spinner:.green}} {} {{pos}}", message))
            .unwrap(),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Create a progress bar for downloads.
pub fn create_download_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg:30!} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}

/// Create a byte counter for downloads of unknown size.
pub fn create_unsized_download_bar() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg:30!} {bytes} ({bytes_per_sec})")
            .unwrap(),
    );
    bar
}

/// Create a progress bar for item counts.
pub fn create_item_bar(total: u64, message: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} {} [{{bar:40.cyan/blue}}] {{pos}}/{{len}}",
                message
            ))
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}

/// Aggregate and per-file bars of one download batch.
#[derive(Clone)]
pub struct DownloadProgress {
    multi: MultiProgress,
    total: ProgressBar,
    show_files: bool,
}

impl DownloadProgress {
    /// Add the aggregate bar for `total` files to `multi`.
    pub fn new(multi: &MultiProgress, total: u64, show_files: bool) -> Self {
        let bar = multi.add(create_item_bar(total, "Downloading media"));
        Self {
            multi: multi.clone(),
            total: bar,
            show_files,
        }
    }

    /// Bar for a single file, drawn above the aggregate bar.
    ///
    /// Hidden when per-file output is off.
    pub fn file_bar(&self, file_name: &str, size: Option<u64>) -> ProgressBar {
        if !self.show_files {
            return ProgressBar::hidden();
        }

        let bar = match size {
            Some(size) => create_download_bar(size),
            None => create_unsized_download_bar(),
        };
        bar.set_message(file_name.to_string());
        self.multi.insert_before(&self.total, bar)
    }

    /// Count one settled file.
    pub fn inc_total(&self) {
        self.total.inc(1);
    }

    /// Position of the aggregate bar.
    pub fn settled(&self) -> u64 {
        self.total.position()
    }

    pub fn finish(&self) {
        self.total.finish_and_clear();
    }
}

/// Log sink that clears the bars of `multi` while a line is written, so log
/// output and bar redraws do not interleave.
pub struct ProgressLogWriter<W> {
    multi: MultiProgress,
    inner: W,
}

impl<W: Write> ProgressLogWriter<W> {
    pub fn new(multi: MultiProgress, inner: W) -> Self {
        Self { multi, inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ProgressLogWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        self.multi.suspend(|| inner.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        let inner = &mut self.inner;
        self.multi.suspend(|| inner.flush())
    }
}
