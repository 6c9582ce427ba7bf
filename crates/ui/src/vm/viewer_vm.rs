pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.25;
pub const DEFAULT_DOCUMENT_NAME: &str = "document";

/// A study document opened in the viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyDocument {
    pub url: String,
    pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Error,
}

/// Viewer controls for an embedded PDF.
///
/// Zoom moves by a factor of `1 + ZOOM_STEP` per action and is clamped to
/// `MIN_ZOOM..=MAX_ZOOM`.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentViewerVm {
    url: String,
    title: String,
    zoom: f64,
    fullscreen: bool,
    load: LoadState,
    reloads: u32,
}

impl DocumentViewerVm {
    #[must_use]
    pub fn new(document: &StudyDocument) -> Self {
        Self {
            url: document.url.clone(),
            title: document.title.clone(),
            zoom: 1.0,
            fullscreen: false,
            load: LoadState::Loading,
            reloads: 0,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn zoom_label(&self) -> String {
        format!("{:.0}%", self.zoom * 100.0)
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * (1.0 + ZOOM_STEP)).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / (1.0 + ZOOM_STEP)).max(MIN_ZOOM);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.zoom < MAX_ZOOM
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Flip fullscreen before the window confirms; returns the new state.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.load
    }

    /// Point the viewer at a new document. Always restarts loading.
    pub fn open(&mut self, document: &StudyDocument) {
        self.url = document.url.clone();
        self.title = document.title.clone();
        self.load = LoadState::Loading;
        self.reloads = 0;
    }

    pub fn mark_loaded(&mut self) {
        self.load = LoadState::Loaded;
    }

    pub fn mark_failed(&mut self) {
        self.load = LoadState::Error;
    }

    /// Reload only the frame by changing its source.
    pub fn retry(&mut self) {
        self.reloads = self.reloads.saturating_add(1);
        self.load = LoadState::Loading;
    }

    /// Source for the embedded frame; carries a reload counter after a retry.
    #[must_use]
    pub fn frame_src(&self) -> String {
        if self.reloads == 0 {
            return self.url.clone();
        }
        let (base, fragment) = match self.url.split_once('#') {
            Some((base, fragment)) => (base, Some(fragment)),
            None => (self.url.as_str(), None),
        };
        let separator = if base.contains('?') { '&' } else { '?' };
        let mut src = format!("{base}{separator}reload={}", self.reloads);
        if let Some(fragment) = fragment {
            src.push('#');
            src.push_str(fragment);
        }
        src
    }

    #[must_use]
    pub fn download_filename(&self) -> String {
        download_filename(&self.title)
    }
}

/// File name for a downloaded copy: non-alphanumerics become `_`.
#[must_use]
pub fn download_filename(title: &str) -> String {
    let title = title.trim();
    if !title.chars().any(char::is_alphanumeric) {
        return format!("{DEFAULT_DOCUMENT_NAME}.pdf");
    }
    let stem: String = title
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { '_' })
        .collect();
    format!("{stem}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> DocumentViewerVm {
        DocumentViewerVm::new(&StudyDocument {
            url: "https://cdn.example.edu/gst101.pdf".to_string(),
            title: "GST 101: Use of English".to_string(),
        })
    }

    #[test]
    fn five_zoom_steps_clamp_at_bounds() {
        let mut vm = viewer();
        for _ in 0..5 {
            vm.zoom_in();
        }
        assert!((vm.zoom() - MAX_ZOOM).abs() < f64::EPSILON);
        assert!(!vm.can_zoom_in());

        vm.reset_zoom();
        for _ in 0..5 {
            vm.zoom_out();
        }
        assert!((vm.zoom() - MIN_ZOOM).abs() < f64::EPSILON);
        assert_eq!(vm.zoom_label(), "50%");
    }

    #[test]
    fn single_zoom_step_is_a_quarter() {
        let mut vm = viewer();
        vm.zoom_in();
        assert_eq!(vm.zoom_label(), "125%");
    }

    #[test]
    fn fullscreen_flips_optimistically() {
        let mut vm = viewer();
        assert!(vm.toggle_fullscreen());
        assert!(vm.is_fullscreen());
        assert!(!vm.toggle_fullscreen());
    }

    #[test]
    fn download_name_is_sanitized() {
        assert_eq!(viewer().download_filename(), "GST_101__Use_of_English.pdf");
        assert_eq!(download_filename("  ***  "), "document.pdf");
        assert_eq!(download_filename(""), "document.pdf");
    }

    #[test]
    fn retry_reloads_only_the_frame_source() {
        let mut vm = viewer();
        vm.mark_failed();
        assert_eq!(vm.load_state(), LoadState::Error);

        vm.retry();
        assert_eq!(vm.load_state(), LoadState::Loading);
        assert_eq!(vm.frame_src(), "https://cdn.example.edu/gst101.pdf?reload=1");
        vm.retry();
        assert_eq!(vm.frame_src(), "https://cdn.example.edu/gst101.pdf?reload=2");
    }

    #[test]
    fn reload_counter_keeps_query_and_fragment() {
        let mut vm = DocumentViewerVm::new(&StudyDocument {
            url: "https://cdn.example.edu/doc?id=4#page=2".to_string(),
            title: "Doc".to_string(),
        });
        vm.retry();
        assert_eq!(vm.frame_src(), "https://cdn.example.edu/doc?id=4&reload=1#page=2");
    }

    #[test]
    fn opening_a_new_document_restarts_loading() {
        let mut vm = viewer();
        vm.mark_loaded();
        vm.retry();
        vm.open(&StudyDocument {
            url: "https://cdn.example.edu/mth101.pdf".to_string(),
            title: "MTH 101".to_string(),
        });
        assert_eq!(vm.load_state(), LoadState::Loading);
        assert_eq!(vm.frame_src(), "https://cdn.example.edu/mth101.pdf");
    }
}
