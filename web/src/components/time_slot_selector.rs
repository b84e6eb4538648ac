use booker_core::{format_long_date, BookingWizard, PeriodDisplay};
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, PartialEq)]
struct SlotView {
    time: String,
    booked: bool,
    selected: bool,
}

/// Slots for the selected day, grouped by period in catalog order.
#[component]
pub fn TimeSlotSelector(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let groups = Memo::new(move |_| {
        wizard.with(|w| {
            let availability = w.availability();
            let date = w.selected_date();
            w.config()
                .time_slots
                .grouped_by_period()
                .into_iter()
                .map(|(period, slots)| {
                    let slots = slots
                        .into_iter()
                        .map(|slot| SlotView {
                            time: slot.time.clone(),
                            booked: date
                                .is_some_and(|d| availability.is_slot_booked(d, &slot.time)),
                            selected: w.selected_time() == Some(slot.time.as_str()),
                        })
                        .collect::<Vec<_>>();
                    (period.display(), slots)
                })
                .collect::<Vec<(PeriodDisplay, Vec<SlotView>)>>()
        })
    });

    view! {
        <div class="booker-card time-slot-selector">
            <div class="time-slot-selector-header">
                <h3>"Available Time Slots"</h3>
                <p class="time-slot-selector-date">
                    {move || wizard.with(|w| w.selected_date().map(format_long_date))}
                </p>
            </div>

            {move || {
                groups
                    .get()
                    .into_iter()
                    .map(|(display, slots)| {
                        view! {
                            <div class="time-slot-period">
                                <div class="time-slot-period-label">
                                    <span class="time-slot-period-icon">{display.icon}</span>
                                    <span>{display.label}</span>
                                </div>
                                <div class="time-slot-grid">
                                    {slots
                                        .into_iter()
                                        .map(|slot| {
                                            let time = slot.time.clone();
                                            let appearance = if slot.selected {
                                                ButtonAppearance::Primary
                                            } else {
                                                ButtonAppearance::Secondary
                                            };
                                            view! {
                                                <Button
                                                    class="time-slot-button"
                                                    appearance=appearance
                                                    size=ButtonSize::Small
                                                    disabled=slot.booked
                                                    on_click=move |_| {
                                                        wizard.update(|w| {
                                                            w.select_time(&time);
                                                        });
                                                    }
                                                >
                                                    {slot.time}
                                                </Button>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </div>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
