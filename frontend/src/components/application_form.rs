use log::{info, warn};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::form::controller::{FormController, SubmissionStatus, SubmitRejected, STEP_LABELS};
use crate::form::draft::{parse_experience_years, Field, FieldUpdate, Interest};
use crate::form::submit::{ApplicationClient, HttpApplicationClient, SubmissionError};

pub enum ApplicationFormMsg {
    Next,
    Back,
    Update(FieldUpdate),
    ExperienceInput(String),
    ToggleInterest(Interest),
    Submit,
    Submitted(Result<(), SubmissionError>),
}

pub struct ApplicationForm {
    controller: FormController,
    client: HttpApplicationClient,
}

impl ApplicationForm {
    fn field_error(&self, field: Field) -> Html {
        match self
            .controller
            .validation_errors()
            .iter()
            .find(|error| error.field() == field)
        {
            Some(error) => html! { <span class="field-error">{error.to_string()}</span> },
            None => html! {},
        }
    }

    fn text_input(
        &self,
        ctx: &Context<Self>,
        field: Field,
        value: &str,
        to_update: fn(String) -> FieldUpdate,
    ) -> Html {
        let (input_type, required) = match field {
            Field::Email => ("email", true),
            Field::Phone => ("tel", false),
            Field::FirstName | Field::LastName => ("text", true),
            _ => ("text", false),
        };
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ApplicationFormMsg::Update(to_update(input.value()))
        });
        html! {
            <label class="form-label">
                <span>{field.label()}</span>
                <input type={input_type} required={required} value={value.to_string()} oninput={oninput} class="form-input" />
                { self.field_error(field) }
            </label>
        }
    }

    fn view_basic(&self, ctx: &Context<Self>) -> Html {
        let draft = self.controller.draft();
        html! {
            <div class="form-grid">
                { self.text_input(ctx, Field::FirstName, &draft.first_name, FieldUpdate::FirstName) }
                { self.text_input(ctx, Field::LastName, &draft.last_name, FieldUpdate::LastName) }
                { self.text_input(ctx, Field::Email, &draft.email, FieldUpdate::Email) }
                { self.text_input(ctx, Field::Phone, &draft.phone, FieldUpdate::Phone) }
            </div>
        }
    }

    fn view_experience(&self, ctx: &Context<Self>) -> Html {
        let draft = self.controller.draft();
        let on_years = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ApplicationFormMsg::ExperienceInput(input.value())
        });
        let on_message = ctx.link().callback(|e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            ApplicationFormMsg::Update(FieldUpdate::Message(input.value()))
        });

        html! {
            <div class="form-grid">
                <label class="form-label">
                    <span>{"Years of experience"}</span>
                    <input type="number" min="0" value={draft.experience_years.to_string()} oninput={on_years} class="form-input" />
                </label>
                <div class="form-wide">
                    <span class="form-label">{"Interests"}</span>
                    <div class="interest-chips">
                        {
                            Interest::ALL.iter().map(|tag| {
                                let tag = *tag;
                                let selected = draft.has_interest(tag);
                                html! {
                                    <button
                                        type="button"
                                        key={tag.label()}
                                        class={classes!("interest-chip", selected.then(|| "selected"))}
                                        onclick={ctx.link().callback(move |_: MouseEvent| ApplicationFormMsg::ToggleInterest(tag))}
                                    >
                                        {tag.label()}
                                    </button>
                                }
                            }).collect::<Html>()
                        }
                    </div>
                </div>
                <label class="form-label form-wide">
                    <span>{"Message"}</span>
                    <textarea value={draft.message.clone()} oninput={on_message} class="form-input form-textarea" />
                </label>
            </div>
        }
    }

    fn view_confirm(&self, ctx: &Context<Self>) -> Html {
        let draft = self.controller.draft();
        let interests = if draft.interests.is_empty() {
            "None selected".to_string()
        } else {
            draft
                .interests
                .iter()
                .map(|tag| tag.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let on_consent = ctx.link().callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ApplicationFormMsg::Update(FieldUpdate::Consent(input.checked()))
        });

        html! {
            <div class="review">
                <p>{"Review your details, then submit. By submitting you agree to our terms."}</p>
                <dl class="review-list">
                    <dt>{"Name"}</dt>
                    <dd>{format!("{} {}", draft.first_name, draft.last_name)}</dd>
                    <dt>{"Email"}</dt>
                    <dd>{draft.email.clone()}</dd>
                    if !draft.phone.is_empty() {
                        <>
                            <dt>{"Phone"}</dt>
                            <dd>{draft.phone.clone()}</dd>
                        </>
                    }
                    <dt>{"Experience"}</dt>
                    <dd>{format!("{} years", draft.experience_years)}</dd>
                    <dt>{"Interests"}</dt>
                    <dd>{interests}</dd>
                </dl>
                { self.field_error(Field::FirstName) }
                { self.field_error(Field::LastName) }
                { self.field_error(Field::Email) }
                <label class="consent">
                    <input type="checkbox" checked={draft.consent} onchange={on_consent} />
                    <span>{"Keep me posted about upcoming cohorts"}</span>
                </label>
            </div>
        }
    }

    fn view_actions(&self, ctx: &Context<Self>) -> Html {
        let step = self.controller.step();
        let submitting = self.controller.status() == SubmissionStatus::Submitting;

        html! {
            <div class="form-actions">
                if step > 0 {
                    <button type="button" class="form-button back" disabled={submitting} onclick={ctx.link().callback(|_| ApplicationFormMsg::Back)}>
                        {"Back"}
                    </button>
                }
                if !self.controller.is_last_step() {
                    <button type="button" class="form-button next" onclick={ctx.link().callback(|_| ApplicationFormMsg::Next)}>
                        {"Next"}
                    </button>
                } else {
                    <button type="button" class="form-button submit" disabled={submitting} onclick={ctx.link().callback(|_| ApplicationFormMsg::Submit)}>
                        { if submitting { "Submitting..." } else { "Submit" } }
                    </button>
                }
            </div>
        }
    }
}

impl Component for ApplicationForm {
    type Message = ApplicationFormMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let client = HttpApplicationClient::from_config();
        info!("Applications go to {}", client.endpoint());
        Self {
            controller: FormController::new(),
            client,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ApplicationFormMsg::Next => {
                if let Err(errors) = self.controller.advance() {
                    info!("Can't leave step {} yet: {} field(s) invalid", self.controller.step(), errors.len());
                }
                true
            }
            ApplicationFormMsg::Back => {
                if self.controller.status() == SubmissionStatus::Submitting {
                    return false;
                }
                self.controller.retreat();
                true
            }
            ApplicationFormMsg::Update(update) => self.controller.update_field(update),
            ApplicationFormMsg::ExperienceInput(raw) => {
                let years = parse_experience_years(&raw, self.controller.draft().experience_years);
                self.controller.update_field(FieldUpdate::ExperienceYears(years))
            }
            ApplicationFormMsg::ToggleInterest(tag) => self.controller.toggle_interest(tag),
            ApplicationFormMsg::Submit => match self.controller.begin_submit() {
                Ok(body) => {
                    let client = self.client.clone();
                    ctx.link().send_future(async move {
                        ApplicationFormMsg::Submitted(client.send(&body).await)
                    });
                    true
                }
                Err(SubmitRejected::Invalid(errors)) => {
                    warn!("Application not sent, {} field(s) invalid", errors.len());
                    true
                }
                Err(rejected) => {
                    gloo_console::log!(format!("Ignoring submit: {}", rejected));
                    false
                }
            },
            ApplicationFormMsg::Submitted(outcome) => {
                self.controller.finish_submit(outcome);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let step = self.controller.step();
        let done = self.controller.status() == SubmissionStatus::Succeeded;

        html! {
            <section id="apply" class="apply-section">
                <style>
                {r#"
                    .apply-section { padding: 5rem 0; }
                    .apply-inner { max-width: 1200px; margin: 0 auto; padding: 0 1rem; }
                    .apply-section h2 { font-size: 1.875rem; font-weight: 600; margin: 0; }
                    .apply-card {
                        margin-top: 1.5rem;
                        background: rgba(255, 255, 255, 0.05);
                        border: 1px solid rgba(255, 255, 255, 0.1);
                        border-radius: 12px;
                        padding: 1.5rem;
                    }
                    .step-progress { display: flex; gap: 0.5rem; }
                    .step-segment { flex: 1; height: 4px; border-radius: 4px; background: rgba(255, 255, 255, 0.1); }
                    .step-segment.reached { background: #0E5FFF; }
                    .apply-form { margin-top: 1.5rem; display: flex; flex-direction: column; gap: 1rem; }
                    .form-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 1rem; }
                    .form-wide { grid-column: span 2; }
                    .form-label { display: block; font-size: 0.875rem; opacity: 0.9; }
                    .form-input {
                        margin-top: 0.5rem;
                        width: 100%;
                        box-sizing: border-box;
                        border-radius: 4px;
                        background: rgba(0, 0, 0, 0.4);
                        border: 1px solid rgba(255, 255, 255, 0.1);
                        color: inherit;
                        padding: 0.625rem;
                    }
                    .form-textarea { min-height: 120px; padding: 0.75rem; }
                    .field-error { display: block; margin-top: 0.25rem; color: #f87171; font-size: 0.75rem; }
                    .interest-chips { margin-top: 0.5rem; display: flex; flex-wrap: wrap; gap: 0.5rem; }
                    .interest-chip {
                        padding: 0.375rem 0.75rem;
                        border-radius: 9999px;
                        font-size: 0.75rem;
                        border: 1px solid rgba(255, 255, 255, 0.2);
                        background: transparent;
                        color: inherit;
                        cursor: pointer;
                    }
                    .interest-chip.selected { background: #00D1B2; color: #000; border-color: transparent; }
                    .review { font-size: 0.875rem; opacity: 0.9; }
                    .review-list { display: grid; grid-template-columns: max-content 1fr; gap: 0.25rem 1rem; }
                    .review-list dt { opacity: 0.6; }
                    .review-list dd { margin: 0; }
                    .consent { display: flex; align-items: center; gap: 0.5rem; margin-top: 1rem; }
                    .submit-error { color: #f87171; font-size: 0.875rem; }
                    .form-actions { display: flex; align-items: center; gap: 0.75rem; padding-top: 0.5rem; }
                    .form-button { padding: 0.5rem 1rem; border: none; border-radius: 4px; color: #fff; cursor: pointer; }
                    .form-button.back { background: rgba(255, 255, 255, 0.1); }
                    .form-button.next { background: #0E5FFF; }
                    .form-button.submit { background: #00D1B2; color: #000; }
                    .form-button:disabled { opacity: 0.6; cursor: wait; }
                    .received {
                        margin-top: 1.5rem;
                        padding: 1.5rem;
                        border-radius: 8px;
                        background: rgba(0, 0, 0, 0.4);
                        border: 1px solid rgba(255, 255, 255, 0.1);
                    }
                    .received-title { font-size: 1.125rem; font-weight: 600; }
                    @media (max-width: 640px) {
                        .form-grid { grid-template-columns: 1fr; }
                        .form-wide { grid-column: span 1; }
                    }
                "#}
                </style>
                <div class="apply-inner">
                    <h2>{"Application"}</h2>
                    <div class="apply-card">
                        <div class="step-progress" aria-label={format!("Step {} of {}: {}", step + 1, STEP_LABELS.len(), self.controller.step_label())}>
                            {
                                STEP_LABELS.iter().enumerate().map(|(i, label)| html! {
                                    <div key={*label} class={classes!("step-segment", (i <= step).then(|| "reached"))}></div>
                                }).collect::<Html>()
                            }
                        </div>

                        if done {
                            <div class="received">
                                <div class="received-title">{"Application received!"}</div>
                                {"We will get back to you shortly."}
                            </div>
                        } else {
                            <div class="apply-form">
                                {
                                    match step {
                                        0 => self.view_basic(ctx),
                                        1 => self.view_experience(ctx),
                                        _ => self.view_confirm(ctx),
                                    }
                                }
                                if let Some(error) = self.controller.last_error() {
                                    <div class="submit-error">{error.to_string()}</div>
                                }
                                { self.view_actions(ctx) }
                            </div>
                        }
                    </div>
                </div>
            </section>
        }
    }
}
