use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <div class="not-found">
            <div class="not-found-code">"404"</div>
            <h1>"Page Not Found"</h1>
            <p class="booker-muted">"The page you're looking for doesn't exist or may have been moved."</p>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| {
                    let _ = navigate("/", Default::default());
                }
            >
                "Book an Appointment"
            </Button>
        </div>
    }
}
