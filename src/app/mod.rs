use crate::components::ui::PageSpinner;
use crate::models::SessionState;
use crate::pages::{AnalyzerPage, Header, LoginPage, SignupPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;

/// Which unauthenticated form is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// What the shell renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    Loading,
    Login,
    Signup,
    Workspace,
}

impl Screen {
    pub fn select(state: &SessionState, mode: AuthMode) -> Self {
        match (state, mode) {
            (SessionState::Loading, _) => Screen::Loading,
            (SessionState::Anonymous, AuthMode::Login) => Screen::Login,
            (SessionState::Anonymous, AuthMode::Signup) => Screen::Signup,
            (SessionState::Authenticated(_), _) => Screen::Workspace,
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let app_state = AppState::new();
    provide_context(AppContext(app_state));

    let auth_mode: RwSignal<AuthMode> = RwSignal::new(AuthMode::default());

    // Runs once after mount so the first paint is the loading spinner.
    Effect::new(move |_| app_state.restore());

    let screen = Memo::new(move |_| app_state.session.with(|s| Screen::select(s, auth_mode.get())));
    let to_signup = Callback::new(move |_: ()| auth_mode.set(AuthMode::Signup));
    let to_login = Callback::new(move |_: ()| auth_mode.set(AuthMode::Login));

    move || match screen.get() {
        Screen::Loading => view! { <PageSpinner label="Loading..." /> }.into_any(),
        Screen::Login => view! { <LoginPage on_switch=to_signup /> }.into_any(),
        Screen::Signup => view! { <SignupPage on_switch=to_login /> }.into_any(),
        Screen::Workspace => view! {
            <div class="min-h-screen bg-background">
                <Header />
                <main class="py-8">
                    <AnalyzerPage />
                </main>
            </div>
        }
        .into_any(),
    }
}
