//! One page load, start to finish, against the in-memory document.

use ui::core::storage::{MemoryStorage, PreferenceStore};
use ui::dom::{start, HostDocument, LanguageChanged, MemoryDocument, Phase};
use ui::forms::{validate_field, FieldKind};
use ui::i18n::NoRemote;
use ui::SiteConfig;

#[tokio::test]
async fn page_load_switch_and_late_content() {
    let mut doc = MemoryDocument::new("/insights/trends.html");
    let body = doc.body();
    let nav = doc.create_element("nav");
    doc.append_child(body, nav);
    let link = doc.create_element("a");
    doc.set_attribute(link, "data-i18n", "nav_trends");
    doc.set_text(link, "Market Trends");
    doc.append_child(nav, link);
    let email = doc.create_element("input");
    doc.set_attribute(email, "data-i18n", "contact_form_email");
    doc.append_child(body, email);
    doc.take_insertions();

    // A stored preference beats the browser locale.
    let mut sync = start(
        doc,
        &NoRemote,
        Box::new(MemoryStorage::with_entry("playfluence_lang", "ja")),
        SiteConfig::default(),
        Some("zh-CN"),
    )
    .await;
    assert_eq!(sync.phase(), Phase::Synchronized);
    assert_eq!(sync.store().active_language(), "ja");
    assert_eq!(sync.document().text(link), "市場動向");
    assert_eq!(
        sync.document().get_attribute(email, "placeholder"),
        Some(sync.store().lookup_in("ja", "contact_form_email"))
    );
    assert_eq!(sync.document().title(), "市場動向 - Playfluence");

    let mut events = sync.subscribe();
    assert!(sync.switch_language("zh"));
    assert_eq!(events.try_next().unwrap(), Some(LanguageChanged { language: "zh".into() }));
    assert_eq!(sync.preferences().get("playfluence_lang").as_deref(), Some("zh"));
    assert_eq!(sync.document().title(), "市场趋势 - Playfluence");

    // Content injected after the switch arrives already in Chinese.
    let doc = sync.document_mut();
    let banner = doc.create_element("div");
    doc.set_attribute(banner, "data-i18n", "trends_title");
    doc.append_child(body, banner);
    let inserted = sync.document_mut().take_insertions();
    assert_eq!(sync.translate_inserted(&inserted), 1);
    assert_eq!(sync.document().text(banner), "市场趋势与洞察");

    // Validation messages follow the same context.
    let err = validate_field(FieldKind::Email, true, "nobody").unwrap_err();
    assert_eq!(err.message(sync.store()), "请输入有效的电子邮件地址");
    assert_eq!(sync.document().query_tracked("data-i18n").len(), 3);
}
