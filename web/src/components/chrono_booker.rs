use std::sync::Arc;

use booker_core::{
    complete_submission, refresh_bookings, BookingBackend, BookingConfirmationPayload,
    BookingData, BookingStep, BookingWizard, WizardConfig, WizardHandle,
};
use chrono::{Datelike, Local};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::booking_calendar::BookingCalendar;
use super::booking_confirmation::BookingConfirmation;
use super::booking_form::BookingForm;
use super::error::ErrorView;
use super::loading::LoadingView;
use super::time_slot_selector::TimeSlotSelector;
use crate::server::ServerBackend;

/// Lets the core drivers reach the wizard signal. Updates after unmount are
/// dropped.
#[derive(Clone, Copy)]
struct WizardSignal(RwSignal<BookingWizard>);

impl WizardHandle for WizardSignal {
    fn try_update<R>(&self, f: impl FnOnce(&mut BookingWizard) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

/// The four-step booking wizard.
///
/// Storage goes through `backend`, which defaults to the server functions.
/// `on_booking_confirmed` fires once per successful booking, after the
/// availability reload.
#[component]
pub fn ChronoBooker(
    config: WizardConfig,
    #[prop(optional)] backend: Option<Arc<dyn BookingBackend>>,
    #[prop(optional)] on_booking_confirmed: Option<Callback<BookingConfirmationPayload>>,
    #[prop(optional, into)] header: Option<ViewFn>,
    #[prop(optional, into)] footer: Option<ViewFn>,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let copy = config.copy.clone();
    let wizard = RwSignal::new(BookingWizard::new(config));
    let backend = StoredValue::new(backend.unwrap_or_else(|| Arc::new(ServerBackend)));
    // Server-rendered with the server's date; the browser replaces it with
    // its own local date on mount and whenever availability is reloaded.
    let today = RwSignal::new(Local::now().date_naive());
    let refresh_today = move || today.set(Local::now().date_naive());

    let step = Memo::new(move |_| wizard.with(|w| w.step()));

    let load_bookings = move || {
        refresh_today();
        let backend = backend.get_value();
        spawn_local(async move {
            refresh_bookings(&WizardSignal(wizard), &*backend).await;
        });
    };

    // Effects only run in the browser, which makes this the mount hook.
    Effect::new(move |_| {
        refresh_today();
        if wizard.with_untracked(|w| w.config().auto_fetch_on_mount) {
            load_bookings();
        }
    });

    let submit_booking = Callback::new(move |data: BookingData| {
        let input = match wizard.try_update(|w| w.begin_submit(data)) {
            Some(Ok(input)) => input,
            Some(Err(e)) => {
                leptos::logging::error!("Booking submission refused: {}", e);
                return;
            }
            None => return,
        };
        let backend = backend.get_value();

        spawn_local(async move {
            let payload = complete_submission(&WizardSignal(wizard), &*backend, input).await;
            if let (Some(payload), Some(callback)) = (payload, on_booking_confirmed) {
                callback.run(payload);
            }
        });
    });

    let start_new_booking = Callback::new(move |_: ()| {
        let needs_reload = wizard.try_update(|w| w.start_new_booking()).unwrap_or(false);
        if needs_reload {
            load_bookings();
        }
    });

    let dismiss_error = Callback::new(move |_: ()| wizard.update(BookingWizard::dismiss_error));

    let default_header = {
        let copy = copy.clone();
        move || {
            view! {
                <header class="booker-header">
                    <div class="booker-header-icon">"📅"</div>
                    <div>
                        <h1>{copy.header_title.clone()}</h1>
                        <p class="booker-muted">{copy.header_description.clone()}</p>
                    </div>
                </header>
            }
            .into_any()
        }
    };

    let default_footer = {
        let site = copy.header_title.clone();
        move || {
            view! {
                <footer class="booker-footer">
                    <p>{format!("© {} {}. All rights reserved.", today.get().year(), site)}</p>
                </footer>
            }
            .into_any()
        }
    };

    let continue_disabled = Signal::derive(move || !wizard.with(|w| w.can_continue()));

    view! {
        <div class=format!("chrono-booker {}", class)>
            {match header {
                Some(header) => header.run(),
                None => default_header(),
            }}

            <main class="booker-main">
                {move || {
                    wizard
                        .with(|w| w.error_message().map(str::to_string))
                        .map(|message| view! { <ErrorView message on_dismiss=dismiss_error /> })
                }}

                {
                    let loading = copy.loading_availability.clone();
                    move || {
                        wizard
                            .with(|w| w.is_fetching() && w.existing_bookings().is_empty())
                            .then(|| view! { <LoadingView message=loading.clone() /> })
                    }
                }

                {
                    let copy = copy.clone();
                    move || match step.get() {
                        BookingStep::Calendar => {
                        let continue_to_time = copy.continue_to_time.clone();
                        view! {
                            <section class="booker-step">
                                <div class="booker-step-heading">
                                    <h2>{copy.calendar_title.clone()}</h2>
                                    <p class="booker-muted">{copy.calendar_subtitle.clone()}</p>
                                </div>
                                <BookingCalendar wizard today />
                                <Button
                                    class="booker-continue"
                                    appearance=ButtonAppearance::Primary
                                    disabled=continue_disabled
                                    on_click=move |_| {
                                        wizard.update(|w| {
                                            w.continue_to_timeslot();
                                        });
                                    }
                                >
                                    {continue_to_time}
                                    " →"
                                </Button>
                            </section>
                        }
                        .into_any()
                        }
                        BookingStep::Timeslot => {
                        let back_label = copy.back_label.clone();
                        let continue_to_details = copy.continue_to_details.clone();
                        view! {
                            <section class="booker-step booker-step-wide">
                                <div class="booker-step-heading">
                                    <h2>{copy.time_title.clone()}</h2>
                                    <p class="booker-muted">{copy.time_subtitle.clone()}</p>
                                </div>
                                <TimeSlotSelector wizard />
                                <div class="booker-step-actions">
                                    <Button
                                        appearance=ButtonAppearance::Secondary
                                        on_click=move |_| {
                                            wizard.update(|w| {
                                                w.back_to_calendar();
                                            });
                                        }
                                    >
                                        {back_label}
                                    </Button>
                                    <Button
                                        appearance=ButtonAppearance::Primary
                                        disabled=continue_disabled
                                        on_click=move |_| {
                                            wizard.update(|w| {
                                                w.continue_to_details();
                                            });
                                        }
                                    >
                                        {continue_to_details}
                                        " →"
                                    </Button>
                                </div>
                            </section>
                        }
                        .into_any()
                        }
                        BookingStep::Details => view! {
                            <section class="booker-step">
                                <BookingForm wizard on_submit=submit_booking />
                            </section>
                        }
                        .into_any(),
                        BookingStep::Confirmation => view! {
                            <section class="booker-step">
                                <BookingConfirmation wizard on_new_booking=start_new_booking />
                            </section>
                        }
                        .into_any(),
                    }
                }
            </main>

            {match footer {
                Some(footer) => footer.run(),
                None => default_footer(),
            }}
        </div>
    }
}
