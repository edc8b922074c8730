use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardItem, CardList, CardTitle, Input, Label, Spinner, Textarea,
};
use crate::edit::{decide_delete, decide_toggle, is_owner, should_invalidate, EditDraft, ToggleAction};
use crate::models::Post;
use crate::query::QueryStatus;
use crate::state::AppContext;
use crate::tags::{TagEditor, TagKey};
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::params::Params;
use wasm_bindgen::JsCast;

/// Board index. Thin shell around the detail view; also the landing target
/// of the delete action.
#[component]
pub fn RootPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let posts: RwSignal<Vec<Post>> = RwSignal::new(vec![]);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let load_posts = move || {
        let api = app_state.0.api_client.get_untracked();
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api.fetch_posts().await {
                Ok(list) => posts.set(list),
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_posts();
    });

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-[900px] px-4 py-8">
                <div class="mb-4 space-y-1">
                    <h1 class="text-xl font-semibold">"Corkboard"</h1>
                    <p class="text-xs text-muted-foreground">"Posts"</p>
                </div>

                <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                    {move || {
                        error.get().map(|e| view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        })
                    }}
                </Show>

                <Card>
                    <CardHeader>
                        <CardTitle>"Board"</CardTitle>
                        <CardDescription>
                            {move || format!("{} posts", posts.get().len())}
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <Show
                            when=move || !posts.get().is_empty()
                            fallback=move || view! {
                                <div class="text-xs text-muted-foreground">
                                    {move || if loading.get() { "Loading posts..." } else { "No posts yet." }}
                                </div>
                            }
                        >
                            <CardList>
                                {move || {
                                    posts
                                        .get()
                                        .into_iter()
                                        .map(|p| {
                                            let href = format!("/post/{}", p.post_id);
                                            view! {
                                                <CardItem class="flex flex-col items-start gap-1 rounded-md border px-4 py-3">
                                                    <a href=href class="text-sm font-medium hover:underline">{p.title}</a>
                                                    <div class="text-xs text-muted-foreground">
                                                        {format!("{} · {} · {}", p.category, p.name, p.date)}
                                                    </div>
                                                </CardItem>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </CardList>
                        </Show>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct PostRouteParams {
    pub id: Option<String>,
}

/// Post detail with the inline edit controller.
///
/// One control toggles between the two modes: activating it in read mode
/// seeds the draft and enters edit mode; activating it again merges the
/// draft over the canonical post, submits the update, and leaves edit mode.
/// There is deliberately no separate cancel action.
#[component]
pub fn PostDetailPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = leptos_router::hooks::use_params::<PostRouteParams>();
    let query = app_state.0.post_query;
    let navigate = StoredValue::new(use_navigate());

    // Access happens inside reactive tracking contexts via this closure.
    let route_post_id = move || params.get().ok().and_then(|p| p.id).unwrap_or_default();

    let editing: RwSignal<bool> = RwSignal::new(false);
    let draft_title: RwSignal<String> = RwSignal::new(String::new());
    let draft_body: RwSignal<String> = RwSignal::new(String::new());
    let tag_editor: RwSignal<TagEditor> = RwSignal::new(TagEditor::default());

    // Initial fetch plus invalidation-driven refetch: tracks the route id
    // and the query epoch. Responses for superseded requests are dropped
    // inside `finish`.
    Effect::new(move |_| {
        let post_id = route_post_id();
        let _epoch = query.epoch();
        if post_id.trim().is_empty() {
            return;
        }

        let api = app_state.0.api_client.get_untracked();
        let ticket = query.begin_request();
        spawn_local(async move {
            let result = api.fetch_post(&post_id).await;
            query.finish(ticket, result);
        });
    });

    let on_back = move |_| {
        if let Ok(history) = window().history() {
            let _ = history.back();
        }
    };

    // Toggle-as-save: the same control enters edit mode and commits it.
    let on_edit_toggle = move |_| {
        let Some(post) = query.post_untracked() else {
            return;
        };

        let draft = EditDraft {
            title: draft_title.get_untracked(),
            body: draft_body.get_untracked(),
            tag_editor: tag_editor.get_untracked(),
        };

        match decide_toggle(editing.get_untracked(), &post, &draft) {
            ToggleAction::Enter(seed) => {
                draft_title.set(seed.title);
                draft_body.set(seed.body);
                tag_editor.set(seed.tag_editor);
                editing.set(true);
            }
            ToggleAction::Save(updated) => {
                editing.set(false);

                let api = app_state.0.api_client.get_untracked();
                spawn_local(async move {
                    let result = api.update_post(&updated).await;
                    if should_invalidate(&result) {
                        query.invalidate();
                    } else if let Err(e) = result {
                        // Not recovered here; the edit toggle is not rolled back.
                        logging::error!("update post failed: {e}");
                    }
                });
            }
        }
    };

    let on_delete = move |_| {
        let Some(post) = query.post_untracked() else {
            return;
        };

        let confirmed = window()
            .confirm_with_message("Delete this post?")
            .unwrap_or(false);
        let decision = decide_delete(confirmed, &post);

        if let Some(post_id) = decision.submit {
            let api = app_state.0.api_client.get_untracked();
            spawn_local(async move {
                let result = api.delete_post(&post_id).await;
                if should_invalidate(&result) {
                    query.invalidate();
                } else if let Err(e) = result {
                    logging::error!("delete post failed: {e}");
                }
            });
        }

        // Dispatched independently of the delete above; we do not wait for
        // the mutation to resolve before leaving the page.
        if let Some(path) = decision.navigate_to {
            navigate.with_value(|nav| nav(path, Default::default()));
        }
    };

    view! {
        <div class="min-h-screen bg-background">
            {move || match query.status() {
                QueryStatus::Loading => view! {
                    <div class="mx-auto flex w-full max-w-[900px] items-center gap-2 px-4 py-8 text-sm text-muted-foreground">
                        <Spinner />
                        "Loading post..."
                    </div>
                }.into_any(),

                QueryStatus::Failed(e) => view! {
                    <div class="mx-auto w-full max-w-[900px] px-4 py-8">
                        <Alert class="border-destructive/30">
                            <AlertDescription class="text-destructive">
                                {format!("Could not load this post: {e}")}
                            </AlertDescription>
                        </Alert>
                    </div>
                }.into_any(),

                QueryStatus::Ready(post) => {
                    // Ownership is re-derived from current session and post
                    // state on every render, never cached.
                    let owner = is_owner(app_state.0.current_user.get().as_ref(), &post);

                    let title = post.title.clone();
                    let body = post.body.clone();
                    let read_tags = post.tags.clone();

                    view! {
                        <div class="mx-auto w-full max-w-[900px] px-4 py-8">
                            {owner.then(|| view! {
                                <div class="mb-4 flex items-center justify-between">
                                    <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=on_back>
                                        "Back"
                                    </Button>
                                    <div class="flex items-center gap-2">
                                        <Button variant=ButtonVariant::Destructive size=ButtonSize::Sm on:click=on_delete>
                                            "Delete"
                                        </Button>
                                        <Button size=ButtonSize::Sm on:click=on_edit_toggle>
                                            {move || if editing.get() { "Save" } else { "Edit" }}
                                        </Button>
                                    </div>
                                </div>
                            })}

                            <Card>
                                <CardHeader class="w-full">
                                    <div class="flex w-full items-center justify-between">
                                        <CardDescription>{post.category.clone()}</CardDescription>
                                        <CardDescription>{post.date.clone()}</CardDescription>
                                    </div>

                                    {move || if editing.get() {
                                        view! { <Input class="text-lg font-semibold" bind_value=draft_title /> }.into_any()
                                    } else {
                                        let title = title.clone();
                                        view! { <CardTitle class="text-2xl">{title}</CardTitle> }.into_any()
                                    }}

                                    <CardDescription>{post.name.clone()}</CardDescription>
                                </CardHeader>

                                <CardContent class="flex w-full flex-col gap-4">
                                    {move || if editing.get() {
                                        view! {
                                            <Textarea rows=10 bind_value=draft_body />

                                            <div class="flex flex-wrap items-center gap-2">
                                                {move || {
                                                    tag_editor
                                                        .get()
                                                        .tags
                                                        .into_iter()
                                                        .map(|tag| view! {
                                                            <span class="rounded-lg bg-primary px-2.5 py-0.5 text-xs text-primary-foreground">
                                                                {format!("#{tag}")}
                                                            </span>
                                                        })
                                                        .collect_view()
                                                }}
                                            </div>

                                            <input
                                                data-name="TagInput"
                                                type="text"
                                                class="border-input flex h-9 w-full rounded-md border bg-transparent px-3 py-1 text-sm outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
                                                placeholder="Add a hashtag and press Enter"
                                                prop:value=move || tag_editor.get().buffer
                                                on:input=move |ev: web_sys::Event| {
                                                    if let Some(target) = ev.target() {
                                                        if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                                                            let value = input.value();
                                                            tag_editor.update(|ed| ed.set_buffer(&value));
                                                        }
                                                    }
                                                }
                                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                                    if let Some(key) = TagKey::from_keyboard_event(&ev) {
                                                        let mut suppress_default = false;
                                                        tag_editor.update(|ed| suppress_default = ed.handle_key(key));
                                                        if suppress_default {
                                                            ev.prevent_default();
                                                        }
                                                    }
                                                }
                                            />
                                        }.into_any()
                                    } else {
                                        let tags = read_tags.clone();
                                        view! {
                                            <div class="whitespace-pre-wrap text-base">{body.clone()}</div>

                                            <div class="flex flex-wrap items-center gap-2">
                                                {tags
                                                    .into_iter()
                                                    .map(|tag| view! {
                                                        <span class="rounded-lg bg-primary px-2.5 py-0.5 text-xs text-primary-foreground">
                                                            {format!("#{tag}")}
                                                        </span>
                                                    })
                                                    .collect_view()}
                                            </div>
                                        }.into_any()
                                    }}
                                </CardContent>
                            </Card>
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

/// Nickname edit form; only rendered when a session snapshot exists.
#[component]
pub fn MyPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let email: RwSignal<String> = RwSignal::new(String::new());
    let nickname: RwSignal<String> = RwSignal::new(String::new());

    // Seed (and re-seed) from the session snapshot.
    Effect::new(move |_| {
        if let Some(user) = app_state.0.current_user.get() {
            email.set(user.email);
            nickname.set(user.name);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(user) = app_state.0.current_user.get_untracked() else {
            return;
        };
        let name = nickname.get_untracked();

        if user.name == name {
            let _ = window().alert_with_message("That is already your current nickname.");
            return;
        }
        if name.trim().is_empty() {
            return;
        }

        let api = app_state.0.api_client.get_untracked();
        let user_id = user.user_id.clone();
        spawn_local(async move {
            if let Err(e) = api.update_nickname(&user_id, &name).await {
                logging::error!("update nickname failed: {e}");
            }
        });

        // Fire-and-forget, like the rest of the mutations here.
        let _ = window().alert_with_message("Nickname updated.");
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-md px-4 py-8">
                <Show
                    when=move || app_state.0.current_user.get().is_some()
                    fallback=|| ().into_view()
                >
                    <Card>
                        <CardHeader>
                            <CardTitle class="text-lg">"My page"</CardTitle>
                        </CardHeader>

                        <CardContent>
                            <div class="mb-3 flex flex-col gap-1.5">
                                <Label html_for="email" class="text-xs">"Email"</Label>
                                <Input id="email" bind_value=email disabled=true class="h-8 text-sm" />
                            </div>

                            <form class="flex flex-col gap-3" on:submit=on_submit>
                                <div class="flex flex-col gap-1.5">
                                    <Label html_for="nickname" class="text-xs">"Nickname"</Label>
                                    <Input id="nickname" name="nickname" bind_value=nickname class="h-8 text-sm" />
                                </div>
                                <Button size=ButtonSize::Sm>"Update"</Button>
                            </form>
                        </CardContent>
                    </Card>
                </Show>
            </div>
        </div>
    }
}
