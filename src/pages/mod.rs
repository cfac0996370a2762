use crate::analyzer::{self, can_delete, AnalyzerModel, MAX_INPUT_CHARS};
use crate::components::ui::{
    Badge, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter,
    CardHeader, CardItem, CardList, CardTitle, ErrorAlert, Input, Label, Spinner, Textarea,
};
use crate::models::AnalysisRecord;
use crate::state::AppContext;
use crate::util::{char_counter, format_created_date, format_polarity};
use icons::{LogOut, MessageSquare, Shield, Trash2, User};
use leptos::prelude::*;
use leptos::task::spawn_local;

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this analysis?";

#[component]
pub fn LoginPage(on_switch: Callback<()>) -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>().0;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked();
        let password_val = password.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            // On success the shell swaps this form out; nothing else to do here.
            if let Err(e) = app_state.login(&username_val, &password_val).await {
                error.set(Some(e.to_string()));
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-md flex-col justify-center px-4 py-12">
                <Card>
                    <CardHeader class="items-center text-center">
                        <MessageSquare class="size-8 text-primary" />
                        <CardTitle class="text-2xl">"Welcome Back"</CardTitle>
                        <CardDescription>"Sign in to analyze sentiment"</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-4" on:submit=on_submit>
                            <div class="flex flex-col gap-2">
                                <Label html_for="username">"Username"</Label>
                                <Input
                                    id="username"
                                    placeholder="Enter your username"
                                    bind_value=username
                                    required=true
                                    autofocus=true
                                />
                            </div>

                            <div class="flex flex-col gap-2">
                                <Label html_for="password">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="Enter your password"
                                    bind_value=password
                                    required=true
                                />
                            </div>

                            {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}

                            <Button class="w-full" attr:disabled=move || loading.get()>
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Signing in..." } else { "Sign In" }}
                            </Button>
                        </form>
                    </CardContent>

                    <CardFooter class="text-sm text-muted-foreground">
                        "Don't have an account?"
                        <Button
                            variant=ButtonVariant::Link
                            size=ButtonSize::Inline
                            on:click=move |_| on_switch.run(())
                        >
                            "Sign up"
                        </Button>
                    </CardFooter>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn SignupPage(on_switch: Callback<()>) -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>().0;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked();
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            if let Err(e) = app_state
                .signup(&username_val, &password_val, &email_val)
                .await
            {
                error.set(Some(e.to_string()));
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-md flex-col justify-center px-4 py-12">
                <Card>
                    <CardHeader class="items-center text-center">
                        <User class="size-8 text-primary" />
                        <CardTitle class="text-2xl">"Create Account"</CardTitle>
                        <CardDescription>"Join us to start analyzing sentiment"</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-4" on:submit=on_submit>
                            <div class="flex flex-col gap-2">
                                <Label html_for="username">"Username"</Label>
                                <Input
                                    id="username"
                                    placeholder="Choose a username"
                                    bind_value=username
                                    required=true
                                    autofocus=true
                                />
                            </div>

                            <div class="flex flex-col gap-2">
                                <Label html_for="email">"Email"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    placeholder="Enter your email"
                                    bind_value=email
                                    required=true
                                />
                            </div>

                            <div class="flex flex-col gap-2">
                                <Label html_for="password">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="Create a password"
                                    bind_value=password
                                    required=true
                                />
                            </div>

                            {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}

                            <Button class="w-full" attr:disabled=move || loading.get()>
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Creating Account..." } else { "Sign Up" }}
                            </Button>
                        </form>
                    </CardContent>

                    <CardFooter class="text-sm text-muted-foreground">
                        "Already have an account?"
                        <Button
                            variant=ButtonVariant::Link
                            size=ButtonSize::Inline
                            on:click=move |_| on_switch.run(())
                        >
                            "Sign in"
                        </Button>
                    </CardFooter>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let identity = move || app_state.identity();
    let is_admin = move || identity().is_some_and(|i| i.is_admin());

    view! {
        <header class="border-b bg-card shadow-sm">
            <div class="mx-auto flex h-16 max-w-7xl items-center justify-between px-4">
                <div class="flex items-center gap-3">
                    <MessageSquare class="size-6 text-primary" />
                    <h1 class="text-xl font-bold">"Sentiment Analyzer"</h1>
                </div>

                <div class="flex items-center gap-4">
                    <div class="flex items-center gap-2 text-sm font-medium">
                        <Show when=is_admin fallback=|| view! { <User class="size-4 text-muted-foreground" /> }>
                            <Shield class="size-4 text-purple-600" />
                        </Show>
                        <span>{move || identity().map(|i| i.username).unwrap_or_default()}</span>
                        <Show when=is_admin fallback=|| ().into_view()>
                            <Badge class="bg-purple-100 text-purple-700">"Admin"</Badge>
                        </Show>
                    </div>

                    <Button
                        variant=ButtonVariant::DangerGhost
                        size=ButtonSize::Sm
                        on:click=move |_| app_state.logout()
                    >
                        <LogOut />
                        "Logout"
                    </Button>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn AnalyzerPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let api_client = app_state.api_client;
    let model: RwSignal<AnalyzerModel> = RwSignal::new(AnalyzerModel::default());

    Effect::new(move |_| {
        let Some(token) = app_state.token_untracked() else {
            return;
        };
        let api = api_client.get_value();
        spawn_local(async move {
            analyzer::refresh_history(&api, &token, &model).await;
        });
    });

    let on_analyze = move |_| {
        let Some(token) = app_state.token_untracked() else {
            return;
        };
        let api = api_client.get_value();
        spawn_local(async move {
            analyzer::submit(&api, &token, &model).await;
        });
    };

    let on_delete = Callback::new(move |id: String| {
        let confirmed = window()
            .confirm_with_message(DELETE_CONFIRMATION)
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let Some(token) = app_state.token_untracked() else {
            return;
        };
        let api = api_client.get_value();
        spawn_local(async move {
            analyzer::delete_entry(&api, &token, &id, &model).await;
        });
    });

    let input = Signal::derive(move || model.with(|m| m.input.clone()));
    let on_input = Callback::new(move |text: String| model.update(|m| m.input = text));
    let pending = move || model.with(|m| m.pending);

    view! {
        <div class="mx-auto max-w-4xl space-y-8 p-6">
            <Card>
                <CardHeader>
                    <CardTitle class="text-2xl">"Sentiment Analysis"</CardTitle>
                </CardHeader>

                <CardContent class="flex flex-col gap-4">
                    <Textarea
                        id="analysis-input"
                        placeholder="Enter text to analyze sentiment..."
                        max_length=MAX_INPUT_CHARS
                        value=input
                        on_value=on_input
                    />

                    <div class="flex items-center justify-between">
                        <span class="text-sm text-muted-foreground">
                            {move || model.with(|m| char_counter(&m.input))}
                        </span>
                        <Button
                            attr:disabled=move || !model.with(AnalyzerModel::can_submit)
                            on:click=on_analyze
                        >
                            <Show when=pending fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if pending() { "Analyzing..." } else { "Analyze Sentiment" }}
                        </Button>
                    </div>

                    {move || {
                        model
                            .with(|m| m.last_result.clone())
                            .map(|result| view! { <ResultPanel result=result /> })
                    }}
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle class="text-xl">"Analysis History"</CardTitle>
                </CardHeader>

                <CardContent>
                    <Show
                        when=move || model.with(|m| !m.history.is_empty())
                        fallback=|| view! {
                            <div class="flex flex-col items-center gap-4 py-12 text-center">
                                <MessageSquare class="size-12 text-muted-foreground" />
                                <p class="text-sm text-muted-foreground">
                                    "No analyses yet. Start by analyzing some text!"
                                </p>
                            </div>
                        }
                    >
                        <CardList>
                            {move || {
                                let show_delete = can_delete(app_state.identity().as_ref());
                                model
                                    .with(|m| m.history.clone())
                                    .into_iter()
                                    .map(|record| {
                                        view! {
                                            <HistoryEntry
                                                record=record
                                                show_delete=show_delete
                                                on_delete=on_delete
                                            />
                                        }
                                    })
                                    .collect_view()
                            }}
                        </CardList>
                    </Show>
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
fn ResultPanel(result: AnalysisRecord) -> impl IntoView {
    let badge_class = result.sentiment_kind().badge_class();

    view! {
        <div class="mt-2 rounded-lg bg-muted p-6">
            <h3 class="mb-3 font-semibold">"Analysis Result:"</h3>
            <div class="space-y-2 text-sm">
                <div class="flex items-center gap-2">
                    <span class="text-muted-foreground">"Sentiment:"</span>
                    <Badge class=badge_class>{result.sentiment}</Badge>
                </div>
                <div class="flex items-center gap-2">
                    <span class="text-muted-foreground">"Polarity Score:"</span>
                    <span class="font-medium">{format_polarity(result.polarity_score)}</span>
                </div>
            </div>
        </div>
    }
}

#[component]
fn HistoryEntry(record: AnalysisRecord, show_delete: bool, on_delete: Callback<String>) -> impl IntoView {
    let badge_class = record.sentiment_kind().badge_class();
    let author = record.author_name().to_string();
    let id = record.id.clone();

    view! {
        <CardItem>
            <div class="flex items-start justify-between">
                <div class="flex items-center gap-2">
                    <span class="text-sm font-medium text-muted-foreground">{format!("By: {author}")}</span>
                    <Badge class=badge_class>{record.sentiment}</Badge>
                </div>
                <div class="flex items-center gap-2">
                    <span class="text-xs text-muted-foreground">{format_created_date(&record.created_at)}</span>
                    {show_delete.then(|| view! {
                        <Button
                            variant=ButtonVariant::DangerGhost
                            size=ButtonSize::Icon
                            attr:title="Delete (Admin only)"
                            on:click=move |_| on_delete.run(id.clone())
                        >
                            <Trash2 />
                        </Button>
                    })}
                </div>
            </div>
            <p class="text-sm">{record.input_text}</p>
            <p class="text-xs text-muted-foreground">
                {format!("Polarity Score: {}", format_polarity(record.polarity_score))}
            </p>
        </CardItem>
    }
}
