use leptos::prelude::*;
use tw_merge::tw_merge;

/// Rounded pill for sentiment labels and the admin marker.
#[component]
pub fn Badge(#[prop(into, optional)] class: String, children: Children) -> impl IntoView {
    let merged_class = tw_merge!(
        "inline-flex items-center rounded-full px-2.5 py-0.5 text-xs font-medium",
        class
    );

    view! { <span data-name="Badge" class=merged_class>{children()}</span> }
}
