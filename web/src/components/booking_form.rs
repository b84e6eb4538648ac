use booker_core::{format_long_date, BookingData, BookingError, BookingWizard, ContactForm};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn BookingForm(
    wizard: RwSignal<BookingWizard>,
    on_submit: Callback<BookingData>,
) -> impl IntoView {
    let copy = wizard.with_untracked(|w| w.config().copy.clone());

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let missing_fields = RwSignal::new(Vec::<&'static str>::new());

    let is_submitting = Signal::derive(move || wizard.with(|w| w.is_submitting()));
    let submit_disabled = Signal::derive(move || !wizard.with(|w| w.can_continue()));

    let handle_submit = move || {
        let mut form = ContactForm::new();
        form.set_name(name.get_untracked());
        form.set_email(email.get_untracked());
        form.set_phone(phone.get_untracked());
        form.set_notes(notes.get_untracked());

        match form.validate() {
            Ok(data) => {
                missing_fields.set(Vec::new());
                on_submit.run(data);
            }
            Err(BookingError::MissingFields(fields)) => missing_fields.set(fields),
            Err(e) => leptos::logging::error!("Unexpected form error: {}", e),
        }
    };

    view! {
        <div class="booker-card booking-form">
            <div class="booking-form-header">
                <h2>{copy.booking_form_title.clone()}</h2>
                <p class="booker-muted">{copy.booking_form_subtitle.clone()}</p>
            </div>

            <div class="booking-summary">
                <div class="booking-summary-row">
                    <span class="booking-summary-icon">"📅"</span>
                    <span>{move || wizard.with(|w| w.selected_date().map(format_long_date))}</span>
                </div>
                <div class="booking-summary-row">
                    <span class="booking-summary-icon">"🕐"</span>
                    <span>{move || wizard.with(|w| w.selected_time().map(str::to_string))}</span>
                </div>
            </div>

            <form class="booking-form-content" on:submit=move |ev| {
                ev.prevent_default();
                handle_submit();
            }>
                <div class="form-group">
                    <label for="booker-name">"Full Name"</label>
                    <Input id="booker-name" placeholder="John Doe" value=name />
                </div>
                <div class="form-group">
                    <label for="booker-email">"Email Address"</label>
                    <Input
                        id="booker-email"
                        input_type=InputType::Email
                        placeholder="john@example.com"
                        value=email
                    />
                </div>
                <div class="form-group">
                    <label for="booker-phone">"Phone Number"</label>
                    <Input
                        id="booker-phone"
                        input_type=InputType::Tel
                        placeholder="+1 (555) 000-0000"
                        value=phone
                    />
                </div>
                <div class="form-group">
                    <label for="booker-notes">"Additional Notes (Optional)"</label>
                    <Textarea
                        id="booker-notes"
                        placeholder="Any special requests or information..."
                        value=notes
                    />
                </div>

                {move || {
                    let missing = missing_fields.get();
                    (!missing.is_empty()).then(|| view! {
                        <p class="form-validation">
                            {format!("Please fill in: {}", missing.join(", "))}
                        </p>
                    })
                }}

                <div class="form-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=is_submitting
                        on_click=move |_| {
                            wizard.update(|w| {
                                w.back_to_timeslot();
                            });
                        }
                    >
                        {copy.back_label.clone()}
                    </Button>
                    <Button
                        button_type=ButtonType::Submit
                        appearance=ButtonAppearance::Primary
                        disabled=submit_disabled
                        loading=is_submitting
                    >
                        {
                            let label = copy.booking_submit_label.clone();
                            move || if is_submitting.get() { "Submitting...".to_string() } else { label.clone() }
                        }
                    </Button>
                </div>
            </form>
        </div>
    }
}
