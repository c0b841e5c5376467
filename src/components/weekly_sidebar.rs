use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::events::{EventRecord, recent_events, short_date};

#[derive(Clone, Debug, PartialEq)]
enum Feed {
	Loading,
	Ready(Vec<EventRecord>),
	Failed(String),
}

/// This week's events, newest first.
#[component]
pub fn WeeklySidebar(on_select: Callback<EventRecord>) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let feed = RwSignal::new(Feed::Loading);

	spawn_local(async move {
		let next = match ApiClient::new(config).fetch_events().await {
			Ok(events) => Feed::Ready(recent_events(events, Utc::now())),
			Err(err) => {
				error!("loading events: {err}");
				Feed::Failed(err.user_message())
			}
		};
		let _ = feed.try_set(next);
	});

	view! {
		<aside class="weekly-sidebar">
			<h2>"This week"</h2>
			{move || match feed.get() {
				Feed::Loading => view! { <p class="muted">"Loading events…"</p> }.into_any(),
				Feed::Failed(message) => {
					view! { <p class="error">{format!("Could not load events: {message}")}</p> }
						.into_any()
				}
				Feed::Ready(events) if events.is_empty() => {
					view! { <p class="muted">"No events in the last 7 days."</p> }.into_any()
				}
				Feed::Ready(events) => {
					view! {
						<ul class="event-list">
							{events
								.into_iter()
								.map(|event| {
									let date = event.occurred().map(short_date).unwrap_or_default();
									let title = event.summary().unwrap_or_else(|| event.event_type.clone());
									let kind = event.event_type.clone();
									view! {
										<li class="event-row" on:click=move |_| on_select.run(event.clone())>
											<span class="event-date">{date}</span>
											<span class="event-type">{kind}</span>
											<span class="event-title">{title}</span>
										</li>
									}
								})
								.collect_view()}
						</ul>
					}
						.into_any()
				}
			}}
		</aside>
	}
}
