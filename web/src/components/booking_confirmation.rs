use booker_core::{format_long_date, generate_ics, BookingWizard, ICS_FILE_NAME, ICS_MIME};
use chrono::Local;
use leptos::prelude::*;
use thaw::*;

/// `data:` URI carrying the appointment as an iCalendar file.
pub fn ics_download_href(ics: &str) -> String {
    format!("data:{},{}", ICS_MIME, urlencoding::encode(ics))
}

#[component]
pub fn BookingConfirmation(
    wizard: RwSignal<BookingWizard>,
    on_new_booking: Callback<()>,
) -> impl IntoView {
    // The confirmation is a snapshot; later wizard changes don't alter it.
    let snapshot = wizard.with_untracked(|w| {
        let data = w.booking_data().cloned()?;
        let date = w.selected_date()?;
        let time = w.selected_time()?.to_string();
        Some((w.config().clone(), date, time, data))
    });

    let Some((config, date, time, data)) = snapshot else {
        leptos::logging::error!("Confirmation shown without a completed booking");
        return view! {}.into_any();
    };

    let copy = config.copy;
    let ics = generate_ics(
        date,
        &time,
        &data,
        config.slot_duration_minutes,
        Local::now().naive_local(),
    );
    let notes = data.notes_opt().map(str::to_string);

    view! {
        <div class="booker-card booking-confirmation">
            <div class="booking-confirmation-header">
                <div class="booking-confirmation-success-icon">"✓"</div>
                <h2>{copy.confirmation_title}</h2>
                <p class="booker-muted">{copy.confirmation_description}</p>
            </div>

            <div class="booking-confirmation-details">
                <h3>{copy.appointment_details_heading}</h3>
                <DetailRow icon="📅" label="Date" value=format_long_date(date) />
                <DetailRow icon="🕐" label="Time" value=time />
                <DetailRow icon="👤" label="Name" value=data.name />
                <DetailRow icon="✉" label="Email" value=data.email />
                <DetailRow icon="📞" label="Phone" value=data.phone />
                {notes.map(|notes| view! { <DetailRow icon="📝" label="Additional Notes" value=notes /> })}
            </div>

            <div class="booking-confirmation-actions">
                <a
                    class="booker-link-button"
                    href=ics_download_href(&ics)
                    download=ICS_FILE_NAME
                >
                    {copy.add_to_calendar_button}
                </a>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_new_booking.run(())
                >
                    {copy.new_booking_button}
                </Button>
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn DetailRow(icon: &'static str, label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="booking-detail-row">
            <span class="booking-detail-icon">{icon}</span>
            <div>
                <p class="booker-muted booking-detail-label">{label}</p>
                <p class="booking-detail-value">{value}</p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ics_download_href_is_percent_encoded() {
        let href = ics_download_href("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
        assert_eq!(
            href,
            "data:text/calendar;charset=utf-8,BEGIN%3AVCALENDAR%0D%0AEND%3AVCALENDAR%0D%0A"
        );
    }
}
