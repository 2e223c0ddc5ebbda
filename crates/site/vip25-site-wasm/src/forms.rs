//! Form validation, submission and skill-tag wiring.

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, Request, RequestInit, Response, Window,
};

use vip25_forms_core::{
    clears_error, validate, FormKind, FormValues, SkillSet, SubmitOutcome, ValidationReport,
};

use crate::dom::set_styles;

/// An attached DOM event listener. Dropping it detaches the callback.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(callback);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            warn!("detach {} listener: {e:?}", self.event);
        }
    }
}

const SKILLS_INPUT: &str = "ca-skills";
const ERROR_BORDER: &str = "#ff5555";
const ERROR_GLOW: &str = "0 0 12px rgba(255,85,85,0.15)";

/// Attach submit, live-validation and skill-tag listeners for whichever
/// forms exist on the page. Listeners stay attached while the returned
/// values are alive.
pub fn bind(window: &Window, document: &Document) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();
    for kind in [FormKind::Client, FormKind::Career] {
        let Some(form) = document.get_element_by_id(kind.form_id()) else {
            continue;
        };
        listeners.push(bind_submit(window, document, &form, kind)?);
        for rule in kind.live_fields() {
            if let Some(input) = document.get_element_by_id(rule.field) {
                listeners.push(bind_live_clear(document, &input, rule.field, rule.error)?);
            }
        }
        info!("{kind} form bound");
    }
    listeners.extend(bind_skill_tags(document)?);
    Ok(listeners)
}

fn bind_submit(
    window: &Window,
    document: &Document,
    form: &Element,
    kind: FormKind,
) -> Result<Listener, JsValue> {
    let window = window.clone();
    let document = document.clone();
    let target = form.clone();
    Listener::attach(form, "submit", move |event: Event| {
        event.prevent_default();
        let values = read_values(&document, kind);
        let report = validate(kind, &values);
        render_report(&document, &report);
        let body = match report.payload(&values).and_then(|p| p.to_json()) {
            Ok(body) => body,
            Err(e) => {
                info!("{e}");
                return;
            }
        };
        submit(window.clone(), document.clone(), target.clone(), kind, body);
    })
}

fn bind_live_clear(
    document: &Document,
    input: &Element,
    field: &'static str,
    error_id: &'static str,
) -> Result<Listener, JsValue> {
    let document = document.clone();
    Listener::attach(input, "input", move |_event: Event| {
        if clears_error(&field_value(&document, field)) {
            hide_error(&document, error_id, document.get_element_by_id(field).as_ref());
        }
    })
}

fn bind_skill_tags(document: &Document) -> Result<Vec<Listener>, JsValue> {
    let skills = Rc::new(RefCell::new(SkillSet::new()));
    let tags = document.query_selector_all("#skillTags .skill-tag")?;
    let mut listeners = Vec::new();
    for i in 0..tags.length() {
        let Some(tag) = tags.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let document = document.clone();
        let skills = skills.clone();
        let element = tag.clone();
        let listener = Listener::attach(&tag, "click", move |_event: Event| {
            let Some(value) = element.get_attribute("data-val") else {
                return;
            };
            let selected = skills.borrow_mut().toggle(&value);
            let classes = element.class_list();
            let result = if selected {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
            if let Err(e) = result {
                warn!("toggle skill tag class: {e:?}");
            }
            if let Some(input) = document
                .get_element_by_id(SKILLS_INPUT)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value(&skills.borrow().as_input_value());
            }
        })?;
        listeners.push(listener);
    }
    Ok(listeners)
}

/// Current value of an input, select or textarea; empty when missing.
fn field_value(document: &Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn read_values(document: &Document, kind: FormKind) -> FormValues {
    kind.rules()
        .iter()
        .map(|rule| (rule.field, field_value(document, rule.field)))
        .collect()
}

fn render_report(document: &Document, report: &ValidationReport) {
    for check in &report.checks {
        let input = if check.rule.highlight {
            document.get_element_by_id(check.rule.field)
        } else {
            None
        };
        if check.valid {
            hide_error(document, check.rule.error, input.as_ref());
        } else {
            show_error(document, check.rule.error, input.as_ref());
        }
    }
}

fn show_error(document: &Document, error_id: &str, input: Option<&Element>) {
    if let Some(message) = document.get_element_by_id(error_id) {
        set_styles(&message, [("display", "block")]);
    }
    if let Some(input) = input {
        set_styles(input, [("border-color", ERROR_BORDER), ("box-shadow", ERROR_GLOW)]);
    }
}

fn hide_error(document: &Document, error_id: &str, input: Option<&Element>) {
    if let Some(message) = document.get_element_by_id(error_id) {
        set_styles(&message, [("display", "none")]);
    }
    if let Some(input) = input {
        set_styles(input, [("border-color", ""), ("box-shadow", "")]);
    }
}

/// A form's `.btn-submit`, disabled and relabelled while a request is in
/// flight.
pub struct BusyButton {
    button: HtmlButtonElement,
    label: String,
}

impl BusyButton {
    pub fn engage(form: &Element, kind: FormKind) -> Option<Self> {
        let button = form
            .query_selector(".btn-submit")
            .ok()
            .flatten()?
            .dyn_into::<HtmlButtonElement>()
            .ok()?;
        let label = button.inner_html();
        button.set_inner_html(kind.busy_label());
        button.set_disabled(true);
        Some(Self { button, label })
    }

    /// Put the original label back and re-enable the button.
    pub fn restore(self) {
        self.button.set_inner_html(&self.label);
        self.button.set_disabled(false);
    }
}

/// Swap the form for its success panel.
pub fn show_success(document: &Document, form: &Element, kind: FormKind) {
    set_styles(form, [("display", "none")]);
    if let Some(panel) = document.get_element_by_id(kind.success_panel_id()) {
        set_styles(&panel, [("display", "block")]);
    }
}

fn submit(window: Window, document: Document, form: Element, kind: FormKind, body: String) {
    let busy = BusyButton::engage(&form, kind);

    wasm_bindgen_futures::spawn_local(async move {
        match post_json(&window, kind.endpoint(), &body).await {
            Ok(SubmitOutcome::Accepted(_)) => {
                show_success(&document, &form, kind);
                info!("{kind} form submitted");
            }
            Ok(SubmitOutcome::Rejected { status, message }) => {
                error!(
                    "{kind} form rejected ({status}): {}",
                    message.as_deref().unwrap_or("no detail")
                );
                alert(&window, kind.failure_message());
            }
            Err(e) => {
                error!("{kind} form submission failed: {e:?}");
                alert(&window, kind.failure_message());
            }
        }
        if let Some(busy) = busy {
            busy.restore();
        }
    });
}

async fn post_json(window: &Window, url: &str, body: &str) -> Result<SubmitOutcome, JsValue> {
    let headers = web_sys::Headers::new()?;
    headers.set("Content-Type", "application/json")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &init)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    let text = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();
    SubmitOutcome::from_response(response.status(), &text)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn alert(window: &Window, message: &str) {
    if let Err(e) = window.alert_with_message(message) {
        warn!("alert failed: {e:?}");
    }
}
