#![allow(dead_code)]

use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Multi-line sibling of `Input`, same manual two-way wiring.
#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,

    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] disabled: bool,
    #[prop(optional)] readonly: bool,
    #[prop(optional)] required: bool,
    #[prop(default = 6)] rows: u32,

    #[prop(into)] bind_value: RwSignal<String>,

    #[prop(optional)] node_ref: NodeRef<html::Textarea>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "placeholder:text-muted-foreground border-input flex w-full min-w-0 rounded-md border bg-transparent px-3 py-2 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm",
        "focus-visible:border-ring focus-visible:ring-ring/50",
        "focus-visible:ring-2",
        "read-only:bg-muted",
        class
    );

    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
                bind_value.set(area.value());
            }
        }
    };

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            disabled=disabled
            readonly=readonly
            required=required
            rows=rows
            prop:value=move || bind_value.get()
            on:input=on_input
            node_ref=node_ref
        ></textarea>
    }
    .into_any()
}
