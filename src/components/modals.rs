//! Detail dialogs for entities, edges and events.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::details::EntityDetails;
use crate::events::{EventRecord, format_billions, long_date};
use crate::graph::{EdgeKey, EntityRecord, RelationshipRecord, fallback_info};

/// What the open dialog shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ModalContent {
	Entity(EntityRecord),
	Edge(EdgeKey),
	Event(EventRecord),
}

#[component]
fn ModalFrame(on_close: Callback<()>, children: Children) -> impl IntoView {
	let handle = window_event_listener(ev::keydown, move |ev| {
		if ev.key() == "Escape" {
			on_close.run(());
		}
	});
	on_cleanup(move || handle.remove());

	view! {
		<div class="modal-backdrop" on:click=move |_| on_close.run(())>
			<div class="modal" on:click=|ev| ev.stop_propagation()>
				<button class="modal-close" on:click=move |_| on_close.run(())>
					"×"
				</button>
				{children()}
			</div>
		</div>
	}
}

/// Entity dialog. Shows catalog data at once and swaps in backend data
/// when the lookup by name answers.
#[component]
pub fn EntityModal(entity: EntityRecord, on_close: Callback<()>) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let fallback = fallback_info(&entity.id);
	let details = RwSignal::new(EntityDetails::resolve(&entity, fallback, None));
	let loading = RwSignal::new(true);

	let lookup = entity.clone();
	spawn_local(async move {
		let client = ApiClient::new(config);
		match client.search_entity(&lookup.label).await {
			Ok(remote) => {
				let _ = details.try_set(EntityDetails::resolve(&lookup, fallback, Some(&remote)));
			}
			Err(err) => debug!("no remote details for {}: {err}", lookup.id),
		}
		let _ = loading.try_set(false);
	});

	let year_caption = EntityDetails::founded_caption(&entity);
	let color = format!("background: {}", entity.category.color());

	view! {
		<ModalFrame on_close=on_close>
			<header class="modal-header">
				<span class="category-dot" style=color></span>
				<h2>{entity.label.clone()}</h2>
				<span class="category-label">{entity.category.label()}</span>
			</header>
			<p class="description">{move || details.with(|d| d.description.clone())}</p>
			<Show when=move || loading.get()>
				<p class="muted">"Loading details…"</p>
			</Show>
			<dl class="facts">
				{move || {
					details
						.with(|d| d.founded)
						.map(|year| {
							view! {
								<dt>{year_caption}</dt>
								<dd>{year}</dd>
							}
						})
				}}
				{move || {
					details
						.with(|d| (!d.founders.is_empty()).then(|| (d.founders_caption(), d.founders.join(", "))))
						.map(|(caption, names)| {
							view! {
								<dt>{caption}</dt>
								<dd>{names}</dd>
							}
						})
				}}
			</dl>
			{move || {
				let acquisitions = details.with(|d| d.acquisitions.clone());
				(!acquisitions.is_empty())
					.then(|| {
						view! {
							<h3>"Acquisitions"</h3>
							<ul class="acquisitions">
								{acquisitions
									.into_iter()
									.map(|a| {
										let amount = a.amount_usd.map(format_billions).unwrap_or_default();
										view! {
											<li>
												{format!("Acquired by {}", a.acquired_by)}
												" "
												<span class="muted">{a.date.unwrap_or_default()}</span>
												" "
												<span class="amount">{amount}</span>
											</li>
										}
									})
									.collect_view()}
							</ul>
						}
					})
			}}
			{move || {
				let related = details.with(|d| d.related_events.clone());
				(!related.is_empty())
					.then(|| {
						view! {
							<h3>"Related events"</h3>
							<ul class="related-events">
								{related
									.into_iter()
									.map(|e| {
										view! {
											<li>
												<span class="event-type">{e.event_type}</span>
												" "
												{e.summary.unwrap_or_default()}
											</li>
										}
									})
									.collect_view()}
							</ul>
						}
					})
			}}
		</ModalFrame>
	}
}

/// Edge dialog. Endpoint labels fall back to ids for dangling edges.
#[component]
pub fn EdgeModal(
	edge: EdgeKey,
	relationship: Option<RelationshipRecord>,
	source_label: String,
	target_label: String,
	on_close: Callback<()>,
) -> impl IntoView {
	let (title, category, description) = match relationship {
		Some(r) => (r.label, r.category.label().to_string(), r.description),
		None => (edge.to_string(), String::new(), String::new()),
	};

	view! {
		<ModalFrame on_close=on_close>
			<header class="modal-header">
				<h2>{title}</h2>
				<span class="category-label">{category}</span>
			</header>
			<p class="edge-endpoints">
				<strong>{source_label}</strong>
				" → "
				<strong>{target_label}</strong>
			</p>
			<p class="description">{description}</p>
		</ModalFrame>
	}
}

/// Event dialog.
#[component]
pub fn EventModal(event: EventRecord, on_close: Callback<()>) -> impl IntoView {
	let summary = event
		.summary()
		.unwrap_or_else(|| format!("{} event", event.event_type));
	let occurred = event.occurred().map(long_date);
	let recorded = event.recorded().map(long_date);
	let amount = event.amount_usd().map(format_billions);
	let confidence = event.confidence_percent().map(|p| format!("{p}%"));
	let entities = event.entity_list().to_vec();
	let source = event.source_url.clone();

	view! {
		<ModalFrame on_close=on_close>
			<header class="modal-header">
				<span class="event-type">{event.event_type.clone()}</span>
				<h2>{summary}</h2>
			</header>
			<dl class="facts">
				{occurred.map(|d| view! { <dt>"Occurred"</dt><dd>{d}</dd> })}
				{recorded.map(|d| view! { <dt>"Recorded"</dt><dd>{d}</dd> })}
				{amount.map(|a| view! { <dt>"Amount"</dt><dd>{a}</dd> })}
				{confidence.map(|c| view! { <dt>"Confidence"</dt><dd>{c}</dd> })}
			</dl>
			{(!entities.is_empty())
				.then(|| {
					view! {
						<h3>"Entities"</h3>
						<ul class="event-entities">
							{entities
								.into_iter()
								.map(|e| {
									let role = e.role.map(|r| format!(" ({r})")).unwrap_or_default();
									view! { <li>{e.name}<span class="muted">{role}</span></li> }
								})
								.collect_view()}
						</ul>
					}
				})}
			{source
				.map(|url| {
					let text = url.clone();
					view! { <a class="source-link" href=url target="_blank" rel="noopener">{text}</a> }
				})}
		</ModalFrame>
	}
}
