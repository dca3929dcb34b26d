use std::cell::RefCell;
use std::rc::Rc;

use futures::StreamExt;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, Event, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlTextAreaElement, MutationObserver, MutationObserverInit, MutationRecord,
};

use super::document::{elements, WebDocument};
use super::source::HttpSource;
use super::dom_error;
use crate::config::SiteConfig;
use crate::core::platform::{self, Platform};
use crate::core::storage::{BrowserStorage, MemoryStorage, PreferenceStore};
use crate::dom::{self, InsertionQueue, Synchronizer};
use crate::error::I18nError;
use crate::forms::{review_submission, success_message, validate_field, FieldKind, Submission};
use crate::i18n::{NoRemote, TranslationStore};

/// Name of the DOM event fired on `document` after every switch.
/// `event.detail.language` holds the new code.
pub const LANGUAGE_CHANGED_EVENT: &str = "languageChanged";

const MODAL_CLOSE_SELECTOR: &str = ".gallery-modal .modal-close";
const REQUIRED_FIELDS_SELECTOR: &str = "form [required]";
const FORM_SUCCESS_SELECTOR: &str = ".form-success";

pub type SharedSync = Rc<RefCell<Synchronizer<WebDocument>>>;
type SharedQueue = Rc<RefCell<InsertionQueue<Element>>>;

/// Boot the translation layer for this page and wire it to the document.
pub async fn start(config: SiteConfig) -> Result<SharedSync, I18nError> {
    let document = WebDocument::current()?;
    let preferences: Box<dyn PreferenceStore> = match BrowserStorage::local() {
        Ok(storage) => Box::new(storage),
        Err(err) => {
            tracing::warn!(%err, "localStorage unavailable; language choice will not persist");
            Box::new(MemoryStorage::new())
        }
    };
    let locale = platform::locale_hint();
    tracing::debug!(platform = ?Platform::current(), ?locale, "Starting translation layer");

    let sync = match config.translations_url.clone() {
        Some(url) => {
            dom::start(document, &HttpSource::new(url), preferences, config, locale.as_deref()).await
        }
        None => dom::start(document, &NoRemote, preferences, config, locale.as_deref()).await,
    };
    let shared = Rc::new(RefCell::new(sync));

    let queue = SharedQueue::default();
    watch_for_insertions(&shared, &queue)?;
    bind_form_validation(&shared)?;
    broadcast_language_changes(&shared, &queue);
    Ok(shared)
}

/// Translate every subtree added under `<body>` as it arrives. Batches that
/// land while the synchronizer is borrowed wait in `queue`.
fn watch_for_insertions(shared: &SharedSync, queue: &SharedQueue) -> Result<(), I18nError> {
    let handle = Rc::clone(shared);
    let pending = Rc::clone(queue);
    let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
        move |records: Array, _observer: MutationObserver| {
            let inserted: Vec<Element> = records
                .iter()
                .map(|record| record.unchecked_into::<MutationRecord>())
                .flat_map(|record| elements(&record.added_nodes()))
                .collect();
            if inserted.is_empty() {
                return;
            }
            let mut queue = pending.borrow_mut();
            queue.push(inserted);
            match handle.try_borrow_mut() {
                Ok(mut sync) => {
                    queue.flush(&mut *sync);
                }
                Err(_) => {
                    tracing::debug!(queued = queue.len(), "Synchronizer busy; insertions queued");
                }
            }
        },
    );

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref()).map_err(dom_error)?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    let body = shared
        .borrow()
        .document()
        .inner()
        .body()
        .ok_or_else(|| I18nError::Dom("document has no body".into()))?;
    observer.observe_with_options(&body, &options).map_err(dom_error)?;

    // The observer lives as long as the page.
    callback.forget();
    Ok(())
}

fn broadcast_language_changes(shared: &SharedSync, queue: &SharedQueue) {
    let mut events = shared.borrow_mut().subscribe();
    let document = shared.borrow().document().inner().clone();
    let handle = Rc::clone(shared);
    let pending = Rc::clone(queue);

    spawn_local(async move {
        while let Some(event) = events.next().await {
            if let Err(err) = dispatch_language_changed(&document, &event.language) {
                tracing::warn!(%err, "Could not dispatch {LANGUAGE_CHANGED_EVENT}");
            }
            let Ok(mut sync) = handle.try_borrow_mut() else {
                continue;
            };
            if let Ok(mut queue) = pending.try_borrow_mut() {
                queue.flush(&mut *sync);
            }
            refresh_modal_label(&document, sync.store());
            refresh_success_notes(&document, sync.store());
            revalidate_failed_fields(&document, sync.store());
        }
    });
}

fn dispatch_language_changed(document: &Document, language: &str) -> Result<(), I18nError> {
    let detail = Object::new();
    Reflect::set(&detail, &JsValue::from_str("language"), &JsValue::from_str(language))
        .map_err(dom_error)?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(LANGUAGE_CHANGED_EVENT, &init)
        .map_err(dom_error)?;
    document.dispatch_event(&event).map_err(dom_error)?;
    Ok(())
}

fn refresh_modal_label(document: &Document, store: &TranslationStore) {
    if let Ok(Some(close)) = document.query_selector(MODAL_CLOSE_SELECTOR) {
        log_dom_failure(
            close.set_attribute("aria-label", store.lookup("modal_close")),
            "modal label",
        );
    }
}

fn refresh_success_notes(document: &Document, store: &TranslationStore) {
    if let Ok(list) = document.query_selector_all(&format!("form {FORM_SUCCESS_SELECTOR}")) {
        for note in elements(&list) {
            note.set_text_content(Some(success_message(store)));
        }
    }
}

/// Re-run validation on fields already showing an error so the message
/// follows the new language.
fn revalidate_failed_fields(document: &Document, store: &TranslationStore) {
    if let Ok(list) = document.query_selector_all("form [required].error") {
        for field in elements(&list) {
            check_field(document, &field, store);
        }
    }
}

fn bind_form_validation(shared: &SharedSync) -> Result<(), I18nError> {
    let document = shared.borrow().document().inner().clone();
    let fields = document
        .query_selector_all(REQUIRED_FIELDS_SELECTOR)
        .map_err(dom_error)?;

    for field in elements(&fields) {
        let on_blur = {
            let handle = Rc::clone(shared);
            let document = document.clone();
            let field = field.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                if let Ok(sync) = handle.try_borrow() {
                    check_field(&document, &field, sync.store());
                }
            })
        };
        field
            .add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        on_blur.forget();

        let on_input = {
            let field = field.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| clear_field_error(&field))
        };
        field
            .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        on_input.forget();
    }

    let forms = document.query_selector_all("form").map_err(dom_error)?;
    for form in elements(&forms) {
        let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
            continue;
        };
        let on_submit = {
            let handle = Rc::clone(shared);
            let document = document.clone();
            let form = form.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                // There is no endpoint behind the forms; submission is confirmed in place.
                event.prevent_default();
                if let Ok(sync) = handle.try_borrow() {
                    submit_form(&document, &form, sync.store());
                }
            })
        };
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        on_submit.forget();
    }
    Ok(())
}

/// Check every required field; show each failure and focus the first, or
/// confirm and reset the form when all pass.
fn submit_form(document: &Document, form: &HtmlFormElement, store: &TranslationStore) {
    let fields = form
        .query_selector_all("[required]")
        .map(|list| elements(&list))
        .unwrap_or_default();
    let values: Vec<(FieldKind, String)> = fields
        .iter()
        .map(|field| (field_kind(field), field_value(field)))
        .collect();
    let review = review_submission(values.iter().map(|(kind, value)| (*kind, value.as_str())));

    match &review {
        Submission::Rejected(failures) => {
            for (index, field) in fields.iter().enumerate() {
                match failures.iter().find(|(failed, _)| *failed == index) {
                    Some((_, err)) => show_field_error(document, field, err.message(store)),
                    None => clear_field_error(field),
                }
            }
            let first = review.first_failure().and_then(|index| fields.get(index));
            if let Some(field) = first.and_then(|field| field.dyn_ref::<HtmlElement>()) {
                log_dom_failure(field.focus(), "focus invalid field");
            }
            tracing::debug!(failed = failures.len(), "Form submission blocked");
        }
        Submission::Accepted => {
            fields.iter().for_each(clear_field_error);
            show_form_success(document, form, success_message(store));
            form.reset();
            tracing::debug!("Form submission accepted");
        }
    }
}

fn show_form_success(document: &Document, form: &HtmlFormElement, message: &str) {
    if let Ok(Some(existing)) = form.query_selector(FORM_SUCCESS_SELECTOR) {
        existing.remove();
    }
    let Ok(note) = document.create_element("div") else {
        return;
    };
    note.set_class_name("form-success");
    note.set_text_content(Some(message));
    log_dom_failure(note.set_attribute("role", "status"), "success note role");
    log_dom_failure(form.append_child(&note), "success note");
}

fn field_value(field: &Element) -> String {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn field_kind(field: &Element) -> FieldKind {
    FieldKind::from_input_type(&field.get_attribute("type").unwrap_or_default())
}

fn check_field(document: &Document, field: &Element, store: &TranslationStore) -> bool {
    match validate_field(field_kind(field), true, &field_value(field)) {
        Ok(()) => {
            clear_field_error(field);
            true
        }
        Err(err) => {
            show_field_error(document, field, err.message(store));
            false
        }
    }
}

fn show_field_error(document: &Document, field: &Element, message: &str) {
    clear_field_error(field);
    log_dom_failure(field.class_list().add_1("error"), "error class");
    log_dom_failure(field.set_attribute("aria-invalid", "true"), "aria-invalid");

    let (Ok(note), Some(parent)) = (document.create_element("div"), field.parent_element()) else {
        return;
    };
    note.set_class_name("form-error");
    note.set_text_content(Some(message));
    if let Some(name) = field.get_attribute("name") {
        let id = format!("error-{name}");
        note.set_id(&id);
        log_dom_failure(field.set_attribute("aria-describedby", &id), "aria-describedby");
    }
    log_dom_failure(parent.append_child(&note), "error note");
}

fn clear_field_error(field: &Element) {
    log_dom_failure(field.class_list().remove_1("error"), "error class");
    log_dom_failure(field.remove_attribute("aria-invalid"), "aria-invalid");
    log_dom_failure(field.remove_attribute("aria-describedby"), "aria-describedby");
    if let Some(parent) = field.parent_element() {
        if let Ok(Some(existing)) = parent.query_selector(".form-error") {
            existing.remove();
        }
    }
}

fn log_dom_failure<T>(result: Result<T, JsValue>, what: &str) {
    if let Err(err) = result {
        tracing::debug!(?err, what, "DOM update failed");
    }
}
