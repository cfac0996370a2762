use icons::CircleAlert;
use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::tw_merge;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm flex items-center gap-2"}
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
}

pub use components::*;

/// Inline form error, shown under the inputs it refers to.
#[component]
pub fn ErrorAlert(#[prop(into)] message: String, #[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("border-destructive/30 bg-red-50 text-destructive", class);

    view! {
        <Alert class=merged_class attr:role="alert">
            <CircleAlert class="size-4 shrink-0" />
            <AlertDescription class="text-destructive">{message}</AlertDescription>
        </Alert>
    }
}
