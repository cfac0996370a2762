use icons::Loader;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);

    view! { <Loader class=merged_class attr:role="status" attr:aria-label="Loading" /> }
}

/// Centered spinner with a caption, used while the session is being read.
#[component]
pub fn PageSpinner(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background flex items-center justify-center">
            <div class="flex flex-col items-center gap-4 text-center">
                <Spinner class="size-12 text-primary" />
                <p class="text-sm text-muted-foreground">{label}</p>
            </div>
        </div>
    }
}
