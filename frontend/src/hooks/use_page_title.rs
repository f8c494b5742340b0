use gloo_utils::document;
use yew::prelude::*;

/// Sets the browser tab title while the calling page is mounted.
#[hook]
pub fn use_page_title(title: &'static str) {
    use_effect_with(title, |title| {
        document().set_title(title);
        || ()
    });
}
