use leptos::ev::SubmitEvent;
use leptos::prelude::*;

/// Entity search input. Submits the raw text; trimming and length checks
/// happen in the page.
#[component]
pub fn SearchBox(
	on_search: Callback<String>,
	#[prop(into)] busy: Signal<bool>,
	#[prop(into)] notice: Signal<Option<String>>,
	on_dismiss: Callback<()>,
) -> impl IntoView {
	let query = RwSignal::new(String::new());

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if busy.get_untracked() {
			return;
		}
		on_search.run(query.get_untracked());
	};

	view! {
		<div class="search-box">
			<form on:submit=on_submit>
				<input
					type="search"
					placeholder="Add a company or person…"
					prop:value=move || query.get()
					on:input=move |ev| query.set(event_target_value(&ev))
					disabled=move || busy.get()
				/>
				<button type="submit" disabled=move || busy.get()>
					{move || if busy.get() { "Searching…" } else { "Add" }}
				</button>
			</form>
			{move || {
				notice
					.get()
					.map(|message| {
						view! {
							<div class="search-notice" role="alert">
								<span>{message}</span>
								<button on:click=move |_| on_dismiss.run(())>"Dismiss"</button>
							</div>
						}
					})
			}}
		</div>
	}
}
