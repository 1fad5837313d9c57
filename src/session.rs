//! Extraction session orchestration.
//!
//! A session binds one [`SiteProfile`] to one set of [`Options`]. Each call to
//! [`ExtractionSession::extract`] starts from fresh state: check the page,
//! load all messages, collect turns, read the title, stamp the document.

use dom_query::Document;
use tracing::{debug, info};

use crate::collector::collect_turns;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::page::{Clock, Page};
use crate::result::TranscriptDocument;
use crate::scroll::{self, ScrollPlan};
use crate::site::SiteProfile;

/// Extractor for a single platform.
#[derive(Debug, Clone)]
pub struct ExtractionSession {
    profile: &'static SiteProfile,
    options: Options,
}

impl ExtractionSession {
    #[must_use]
    pub fn new(profile: &'static SiteProfile, options: Options) -> Self {
        Self { profile, options }
    }

    /// Session for the built-in profile matching `url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotApplicablePage`] when no profile matches.
    pub fn for_url(url: &str, options: Options) -> Result<Self> {
        SiteProfile::for_url(url)
            .map(|profile| Self::new(profile, options))
            .ok_or_else(|| Error::NotApplicablePage { url: url.to_string() })
    }

    #[must_use]
    pub fn profile(&self) -> &'static SiteProfile {
        self.profile
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    fn scroll_plan(&self) -> ScrollPlan {
        let mut plan = self.profile.scroll;
        if let Some(config) = self.options.scroll_override {
            plan.config = config;
        }
        plan
    }

    /// Runs one extraction against `page`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotApplicablePage`] when the page URL does not belong
    /// to this session's platform. Missing DOM elements never fail the run.
    pub async fn extract<P, C>(&self, page: &P, clock: &C) -> Result<TranscriptDocument>
    where
        P: Page + ?Sized,
        C: Clock + ?Sized,
    {
        let url = page.url();
        if !self.profile.matches_url(&url) {
            return Err(Error::NotApplicablePage { url });
        }

        if self.options.scroll {
            let plan = self.scroll_plan();
            scroll::load_all_messages(page, clock, &plan, self.options.cancel.as_ref()).await;
        } else {
            debug!(platform = self.profile.name, "scroll loading disabled");
        }

        // Document is not Send; keep it out of any await
        let (title, turns) = {
            let doc = Document::from(page.html());
            let turns = collect_turns(&doc, self.profile, &self.options);
            let title = self.profile.title.resolve(&page.document_title(), &doc);
            (title, turns)
        };

        info!(
            platform = self.profile.name,
            turns = turns.len(),
            "extracted transcript"
        );

        Ok(TranscriptDocument {
            platform: self.profile.name.to_string(),
            title,
            turns,
            source_url: url,
            extracted_at: clock.now(),
        })
    }
}
