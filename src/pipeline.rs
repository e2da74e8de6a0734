//! End-to-end translation of a presentation.
//!
//! A run moves through `Idle → Extracting → Translating → Rewriting → Done`.
//! Structural problems with the document end the run in `Failed`; a fragment
//! whose translation fails is kept in its original language and reported as a
//! warning, and the run carries on.

use crate::deck::{
    DEFAULT_FONT_SIZE_PT, DeckError, Presentation, ShapeKey, SlideFragments, extract_fragments,
    render_translated,
};
use crate::translation::{FragmentOutcome, Translator, translate_fragment};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Extracting,
    Translating { done: usize, total: usize },
    Rewriting,
    Done,
    Failed,
}

/// Receives progress of a run.
pub trait RunObserver {
    fn on_state(&mut self, _state: RunState) {}

    /// A slide's fragments are about to be translated.
    fn on_slide(&mut self, _slide: usize, _slide_count: usize) {}

    /// A fragment could not be translated and keeps its original text.
    fn on_warning(&mut self, _key: ShapeKey, _error: &anyhow::Error) {}
}

/// Observer that ignores everything.
pub struct SilentObserver;

impl RunObserver for SilentObserver {}

/// Counters describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub slides: usize,
    pub fragments: usize,
    pub translated: usize,
    pub skipped: usize,
    pub passed_through: usize,
    pub rewritten: usize,
    pub untouched: usize,
}

#[derive(Debug)]
pub struct RunOutput {
    /// The translated `.pptx` file.
    pub bytes: Vec<u8>,
    pub summary: RunSummary,
}

/// One translation run over one presentation.
pub struct DeckTranslation<'a> {
    translator: &'a dyn Translator,
    target_language: String,
    font_size_pt: u32,
    state: RunState,
}

impl<'a> DeckTranslation<'a> {
    pub fn new(translator: &'a dyn Translator, target_language: impl Into<String>) -> Self {
        Self {
            translator,
            target_language: target_language.into(),
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            state: RunState::Idle,
        }
    }

    #[must_use]
    pub const fn with_font_size(mut self, points: u32) -> Self {
        self.font_size_pt = points;
        self
    }

    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Translates the presentation in `original`.
    ///
    /// Fragments are translated one after another. The rewrite starts from
    /// `original` again, not from the document used for extraction.
    pub async fn run(
        &mut self,
        original: &[u8],
        observer: &mut dyn RunObserver,
    ) -> Result<RunOutput, DeckError> {
        self.enter(RunState::Extracting, observer);
        let extracted = match Presentation::open(original) {
            Ok(presentation) => extract_fragments(&presentation),
            Err(err) => {
                self.enter(RunState::Failed, observer);
                return Err(err);
            }
        };

        let mut summary = RunSummary {
            slides: extracted.len(),
            fragments: extracted.iter().map(Vec::len).sum(),
            ..RunSummary::default()
        };

        let translated = self.translate_all(&extracted, &mut summary, observer).await;

        self.enter(RunState::Rewriting, observer);
        match render_translated(original, &translated, self.font_size_pt) {
            Ok((bytes, report)) => {
                summary.rewritten = report.rewritten;
                summary.untouched = report.untouched;
                self.enter(RunState::Done, observer);
                Ok(RunOutput { bytes, summary })
            }
            Err(err) => {
                self.enter(RunState::Failed, observer);
                Err(err)
            }
        }
    }

    async fn translate_all(
        &mut self,
        extracted: &[SlideFragments],
        summary: &mut RunSummary,
        observer: &mut dyn RunObserver,
    ) -> Vec<SlideFragments> {
        let total = summary.fragments;
        let mut done = 0;
        self.enter(RunState::Translating { done, total }, observer);

        let mut translated = Vec::with_capacity(extracted.len());
        for (slide, fragments) in extracted.iter().enumerate() {
            observer.on_slide(slide, extracted.len());

            let mut slide_out = Vec::with_capacity(fragments.len());
            for fragment in fragments {
                let outcome =
                    translate_fragment(self.translator, &fragment.text, &self.target_language)
                        .await;
                match &outcome {
                    FragmentOutcome::Skipped => summary.skipped += 1,
                    FragmentOutcome::Translated(_) => summary.translated += 1,
                    FragmentOutcome::PassedThrough { error, .. } => {
                        summary.passed_through += 1;
                        observer.on_warning(fragment.key, error);
                    }
                }
                slide_out.push(fragment.with_text(outcome.into_text()));

                done += 1;
                self.enter(RunState::Translating { done, total }, observer);
            }
            translated.push(slide_out);
        }
        translated
    }

    fn enter(&mut self, state: RunState, observer: &mut dyn RunObserver) {
        self.state = state;
        observer.on_state(state);
    }
}
