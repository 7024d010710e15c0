//! Submitted pages and the current selection

use url::Url;
use uuid::Uuid;

use crate::config::DEFAULT_SEED_URLS;
use crate::error::CoreError;
use crate::page::Page;
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct PageList {
    pages: Vec<Page>,
    selected: Option<Uuid>,
}

impl PageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        Self::seeded(DEFAULT_SEED_URLS)
    }

    /// Build a list from URL strings, skipping any that do not parse.
    pub fn seeded<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for url in urls {
            if let Err(e) = list.submit(url.as_ref()) {
                tracing::warn!(url = url.as_ref(), error = %e, "Skipping seed URL");
            }
        }
        list
    }

    /// Parse `input` as a URL and append a new page for it.
    pub fn submit(&mut self, input: &str) -> Result<&Page> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CoreError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let url = Url::parse(input).map_err(|e| CoreError::InvalidUrl(format!("{input}: {e}")))?;
        let page = Page::new(url);

        tracing::debug!(page_id = %page.id(), url = %page.url, "Submitted page");

        self.pages.push(page);
        Ok(&self.pages[self.pages.len() - 1])
    }

    pub fn select(&mut self, id: Uuid) -> Result<&Page> {
        let index = self
            .position(id)
            .ok_or_else(|| CoreError::PageNotFound(id.to_string()))?;
        self.selected = Some(id);
        Ok(&self.pages[index])
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Page> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_mut(&mut self) -> Option<&mut Page> {
        let id = self.selected?;
        self.get_mut(id)
    }

    pub fn get(&self, id: Uuid) -> Option<&Page> {
        self.pages.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id() == id)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.pages.iter().position(|p| p.id() == id)
    }
}
