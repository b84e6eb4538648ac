use booker_core::{calendar_days, BookingWizard, Month, WEEKDAY_LABELS};
use chrono::{Local, NaiveDate};
use leptos::prelude::*;
use thaw::*;

/// Month view for the date step. Past, fully booked and pre-minimum days
/// are rendered disabled.
#[component]
pub fn BookingCalendar(
    wizard: RwSignal<BookingWizard>,
    today: RwSignal<NaiveDate>,
) -> impl IntoView {
    let month = RwSignal::new(Month::containing(
        wizard
            .with_untracked(|w| w.selected_date())
            .unwrap_or_else(|| today.get_untracked()),
    ));

    let days = Memo::new(move |_| {
        let month = month.get();
        let today = today.get();
        wizard.with(|w| {
            calendar_days(
                month,
                &w.availability(),
                today,
                w.config().min_date,
                w.selected_date(),
            )
        })
    });

    view! {
        <div class="booker-card booking-calendar">
            <div class="booking-calendar-header">
                <h3 class="booking-calendar-title">{move || month.get().title()}</h3>
                <div class="booking-calendar-nav">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| month.update(|m| *m = m.previous())
                    >
                        "‹"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| month.update(|m| *m = m.next())
                    >
                        "›"
                    </Button>
                </div>
            </div>

            <div class="booking-calendar-grid">
                {WEEKDAY_LABELS
                    .iter()
                    .map(|label| view! { <div class="booking-calendar-weekday">{*label}</div> })
                    .collect::<Vec<_>>()}

                {move || {
                    days.get()
                        .into_iter()
                        .map(|cell| match cell {
                            Some(day) => {
                                let date = day.date;
                                view! {
                                    <button
                                        class="booking-calendar-day"
                                        class:selected=day.is_selected
                                        class:booked={day.is_fully_booked && !day.is_past}
                                        disabled=day.is_disabled()
                                        title={if day.is_fully_booked { "Fully booked" } else { "" }}
                                        on:click=move |_| {
                                            // The page may have stayed open past midnight.
                                            let now = Local::now().date_naive();
                                            if now != today.get_untracked() {
                                                today.set(now);
                                            }
                                            wizard.update(|w| {
                                                w.select_date(date, now);
                                            });
                                        }
                                    >
                                        {day.day_number()}
                                    </button>
                                }
                                    .into_any()
                            }
                            None => view! { <div class="booking-calendar-day empty"></div> }.into_any(),
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
        </div>
    }
}
