use crate::core::types::DatasetKind;
use indicatif::{ProgressBar, ProgressStyle};

const LOADING_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} datasets {msg}";

/// Progress bar for dataset loading, drawn on stderr
pub struct ProgressReporter {
    loading: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            loading: None,
            enabled,
        }
    }

    pub fn start_loading(&mut self, total_datasets: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(total_datasets as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(LOADING_TEMPLATE) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("loading");
        self.loading = Some(pb);
    }

    pub fn dataset_loaded(&self, kind: DatasetKind) {
        if let Some(ref pb) = self.loading {
            pb.set_message(kind.name());
            pb.inc(1);
        }
    }

    pub fn finish_loading(&self) {
        if let Some(ref pb) = self.loading {
            pb.finish_and_clear();
        }
    }

    pub fn abandon(&self) {
        if let Some(ref pb) = self.loading {
            pb.abandon();
        }
    }
}
