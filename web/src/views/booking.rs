use booker_core::BookingConfirmationPayload;
use leptos::prelude::*;
use leptos_meta::Title;

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::components::ChronoBooker;
use crate::server::get_booker_config;

#[component]
pub fn BookingPage() -> impl IntoView {
    let config_resource = Resource::new(|| (), |_| get_booker_config());

    let on_booking_confirmed = Callback::new(|payload: BookingConfirmationPayload| {
        leptos::logging::log!(
            "Booking confirmed for {} at {}",
            payload.booking_date,
            payload.booking_time
        );
    });

    view! {
        <Suspense fallback=move || view! { <LoadingView /> }>
            {move || {
                config_resource.get().map(|result| match result {
                    Ok(config) => view! {
                        <Title text=config.copy.header_title.clone() />
                        <ChronoBooker config on_booking_confirmed />
                    }
                    .into_any(),
                    Err(e) => {
                        leptos::logging::error!("Failed to load booking settings: {}", e);
                        view! { <ErrorView message="Unable to load the booking page." /> }.into_any()
                    }
                })
            }}
        </Suspense>
    }
}
