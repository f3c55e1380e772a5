use dioxus::prelude::*;

#[component]
pub fn Input(
    oninput: Option<EventHandler<FormEvent>>,
    onchange: Option<EventHandler<FormEvent>>,
    onfocusout: Option<EventHandler<FocusEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = input)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        input {
            class: "input",
            oninput: move |e| _ = oninput.map(|callback| callback(e)),
            onchange: move |e| _ = onchange.map(|callback| callback(e)),
            onfocusout: move |e| _ = onfocusout.map(|callback| callback(e)),
            ..attributes,
        }
    }
}

#[component]
pub fn Label(
    html_for: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        label {
            class: "label",
            r#for: html_for,
            ..attributes,
            {children}
        }
    }
}

/// A checkbox with its label text to the right.
#[component]
pub fn Checkbox(
    id: String,
    checked: bool,
    onchange: EventHandler<bool>,
    #[props(default)] disabled: bool,
    children: Element,
) -> Element {
    rsx! {
        label {
            class: "checkbox",
            r#for: "{id}",
            input {
                id: "{id}",
                r#type: "checkbox",
                checked,
                disabled,
                onchange: move |evt: FormEvent| onchange.call(evt.checked()),
            }
            span { {children} }
        }
    }
}

/// Label, input and an optional inline error, stacked.
#[component]
pub fn Field(
    id: String,
    label: String,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] placeholder: String,
    #[props(default)] error: Option<String>,
) -> Element {
    rsx! {
        div {
            class: "field",
            Label { html_for: id.clone(), "{label}" }
            Input {
                id: id.clone(),
                r#type: kind,
                placeholder,
                value,
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            if let Some(error) = error {
                p { class: "field-error", "{error}" }
            }
        }
    }
}
