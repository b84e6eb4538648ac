use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, ButtonSize, MessageBar, MessageBarIntent};

#[component]
pub fn ErrorView(
    #[prop(optional, into)] message: Option<String>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <MessageBar intent=MessageBarIntent::Error>
            <div class="booker-error">
                <div class="booker-error-text">
                    <strong>"Error"</strong>
                    <span>
                        {message.unwrap_or_else(|| "An error occurred. Please try again.".to_string())}
                    </span>
                </div>
                {on_dismiss.map(|callback| view! {
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| callback.run(())
                    >
                        "Dismiss"
                    </Button>
                })}
            </div>
        </MessageBar>
    }
}
