//! The document synchronizer.
//!
//! Lifecycle per page load:
//! `Uninitialized → TableLoaded → LanguageResolved → Synchronized`, with a
//! `Resynchronizing` step for each explicit switch. There is no teardown.

use futures_channel::mpsc::UnboundedReceiver;

use super::notify::{LanguageChanged, LanguageNotifier};
use super::HostDocument;
use crate::config::SiteConfig;
use crate::core::storage::PreferenceStore;
use crate::i18n::{load, LoadOutcome, PageTitles, TranslationSource, TranslationStore, TranslationTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    TableLoaded,
    LanguageResolved,
    Synchronized,
    Resynchronizing,
}

pub struct Synchronizer<D: HostDocument> {
    document: D,
    store: TranslationStore,
    titles: PageTitles,
    preferences: Box<dyn PreferenceStore>,
    notifier: LanguageNotifier,
    config: SiteConfig,
    phase: Phase,
}

impl<D: HostDocument> Synchronizer<D> {
    pub fn new(document: D, preferences: Box<dyn PreferenceStore>, config: SiteConfig) -> Self {
        let titles = PageTitles::embedded().unwrap_or_else(|err| {
            tracing::warn!(%err, "Embedded page titles unreadable; titles fall back to the brand");
            PageTitles::default()
        });
        Self {
            document,
            store: TranslationStore::new(TranslationTable::default(), config.default_language.clone()),
            titles,
            preferences,
            notifier: LanguageNotifier::default(),
            config,
            phase: Phase::Uninitialized,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn preferences(&self) -> &dyn PreferenceStore {
        self.preferences.as_ref()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<LanguageChanged> {
        self.notifier.subscribe()
    }

    pub fn install_table(&mut self, outcome: LoadOutcome) {
        if let LoadOutcome::FallbackUsed { reason, .. } = &outcome {
            tracing::debug!(%reason, "Installing embedded translation table");
        }
        let default = self.store.default_language().to_string();
        self.store = TranslationStore::new(outcome.into_table(), default);
        self.transition(Phase::TableLoaded);
    }

    /// Choose the starting language from the stored preference and the
    /// host's locale hint.
    pub fn resolve_language(&mut self, locale_hint: Option<&str>) -> String {
        let persisted = self.preferences.get(&self.config.storage_key);
        let resolved = self
            .store
            .resolve_initial_language(persisted.as_deref(), locale_hint)
            .to_string();
        self.transition(Phase::LanguageResolved);
        resolved
    }

    /// Write the active-language text for one tracked element.
    ///
    /// The slot's authored value is kept in a `<key attribute>-authored`
    /// attribute before the first write. A key that resolves only to itself
    /// gets that value back, so text from the previous language never stays.
    /// Returns `false` when nothing was written.
    pub fn translate_element(&mut self, element: &D::Element) -> bool {
        let Some(key) = self.document.attribute(element, &self.config.key_attribute) else {
            return false;
        };
        if key.is_empty() {
            return false;
        }
        let slot = self.document.role(element).slot();
        let authored_attribute = format!("{}-authored", self.config.key_attribute);
        let authored = self.document.attribute(element, &authored_attribute);
        let text = self.store.lookup(&key);

        if text == key {
            let Some(authored) = authored else {
                return false;
            };
            if self.document.read(element, slot).as_deref() == Some(authored.as_str()) {
                return false;
            }
            self.document.write(element, slot, &authored);
            return true;
        }

        if authored.is_none() {
            let original = self.document.read(element, slot).unwrap_or_default();
            self.document.write_attribute(element, &authored_attribute, &original);
        }
        self.document.write(element, slot, text);
        true
    }

    /// Translate every tracked element, update the title and document
    /// language, and persist the active language. Returns the number of
    /// elements written.
    pub fn apply_full_pass(&mut self) -> usize {
        let elements = self.document.query_tracked(&self.config.key_attribute);
        let written = elements
            .iter()
            .filter(|element| self.translate_element(element))
            .count();

        self.resolve_page_title();
        let language = self.store.active_language().to_string();
        self.document.set_language(&language);
        self.persist(&language);
        self.transition(Phase::Synchronized);

        tracing::info!(%language, tracked = elements.len(), written, "Language applied");
        written
    }

    /// Set the document title for the current location and return it.
    pub fn resolve_page_title(&mut self) -> String {
        let pathname = self.document.pathname();
        let page = self.titles.page_identifier(&pathname, &self.config.root_page);
        let title = self
            .titles
            .resolve(
                &page,
                self.store.active_language(),
                self.store.default_language(),
                &self.config.brand_title,
            )
            .to_string();
        self.document.set_title(&title);
        title
    }

    /// Translate newly inserted subtrees only. Returns the number of
    /// elements written.
    pub fn translate_inserted(&mut self, roots: &[D::Element]) -> usize {
        let mut written = 0;
        for root in roots {
            for element in self.document.tracked_in_subtree(root, &self.config.key_attribute) {
                if self.translate_element(&element) {
                    written += 1;
                }
            }
        }
        if written > 0 {
            tracing::debug!(roots = roots.len(), written, "Translated inserted content");
        }
        written
    }

    /// Switch the active language. A no-op returning `false` when `code`
    /// is already active; unknown codes are accepted.
    pub fn switch_language(&mut self, code: &str) -> bool {
        if !self.store.set_active_language(code) {
            return false;
        }
        if !self.store.is_known(code) {
            tracing::warn!(language = code, "Switching to a language with no translations");
        }
        self.transition(Phase::Resynchronizing);
        self.apply_full_pass();
        self.notifier.notify(&LanguageChanged {
            language: code.to_string(),
        });
        tracing::info!(language = code, "Language switched");
        true
    }

    fn persist(&mut self, language: &str) {
        if let Err(err) = self.preferences.set(&self.config.storage_key, language) {
            tracing::warn!(%err, "Could not persist language preference");
        }
    }

    fn transition(&mut self, next: Phase) {
        tracing::debug!(from = ?self.phase, to = ?next, "Synchronizer phase");
        self.phase = next;
    }
}

/// Inserted subtree roots waiting for the synchronizer.
///
/// Hosts push roots here when the synchronizer is busy and flush once it
/// is free again, so no insertion goes untranslated.
#[derive(Debug)]
pub struct InsertionQueue<E> {
    pending: Vec<E>,
}

impl<E> Default for InsertionQueue<E> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<E> InsertionQueue<E> {
    pub fn push(&mut self, roots: impl IntoIterator<Item = E>) {
        self.pending.extend(roots);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Translate every queued root and empty the queue.
    pub fn flush<D>(&mut self, sync: &mut Synchronizer<D>) -> usize
    where
        D: HostDocument<Element = E>,
    {
        if self.pending.is_empty() {
            return 0;
        }
        let roots = std::mem::take(&mut self.pending);
        sync.translate_inserted(&roots)
    }
}

/// Run the whole startup sequence: load, resolve, first full pass.
pub async fn start<D, S>(
    document: D,
    source: &S,
    preferences: Box<dyn PreferenceStore>,
    config: SiteConfig,
    locale_hint: Option<&str>,
) -> Synchronizer<D>
where
    D: HostDocument,
    S: TranslationSource,
{
    let timeout = config.fetch_timeout();
    let mut sync = Synchronizer::new(document, preferences, config);
    sync.install_table(load(source, timeout).await);
    sync.resolve_language(locale_hint);
    sync.apply_full_pass();
    sync
}
