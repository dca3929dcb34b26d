use dioxus::prelude::*;

use ui::components::LanguageSwitcher;
use ui::web::SharedSync;
use ui::SiteConfig;

pub fn launch() {
    #[cfg(feature = "web")]
    {
        let root = SiteConfig::embedded().switcher_root.clone();
        dioxus::LaunchBuilder::web()
            .with_cfg(dioxus::web::Config::new().rootname(root))
            .launch(App);
    }

    #[cfg(not(feature = "web"))]
    dioxus::launch(App);
}

/// Boots the translation layer, then renders the language switcher into the
/// page's switcher slot. Everything else on the page is static markup that
/// the synchronizer translates in place.
#[component]
fn App() -> Element {
    let config = SiteConfig::embedded();
    let mut active = use_signal(|| None::<String>);
    let mut sync = use_signal(|| None::<SharedSync>);

    use_future(move || async move {
        match ui::web::start(config.clone()).await {
            Ok(shared) => {
                let language = shared.borrow().store().active_language().to_string();
                active.set(Some(language));
                sync.set(Some(shared));
            }
            Err(err) => tracing::error!(%err, "Translation layer failed to start"),
        }
    });

    let on_select = move |code: String| {
        let switched = sync
            .read()
            .as_ref()
            .is_some_and(|shared| shared.borrow_mut().switch_language(&code));
        if switched {
            active.set(Some(code));
        }
    };

    let Some(current) = active() else {
        return rsx! {};
    };

    rsx! {
        LanguageSwitcher {
            languages: config.languages.clone(),
            active: current,
            on_select,
        }
    }
}
