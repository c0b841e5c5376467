use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};

use crate::api::{ApiClient, SearchSequencer, prepare_query};
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::modals::{EdgeModal, EntityModal, EventModal, ModalContent};
use crate::components::search_box::SearchBox;
use crate::components::weekly_sidebar::WeeklySidebar;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::events::EventRecord;
use crate::graph::{
	AddResult, EdgeKey, EntityRecord, HighlightState, IncrementalGraphStore, ViewportController,
};

/// Arm the camera for `id` once the layout has had `delay_ms` to start
/// placing it.
fn schedule_zoom(viewport: StoredValue<ViewportController>, id: String, delay_ms: u64) {
	set_timeout(
		move || {
			let _ = viewport.try_update_value(|v| v.request_zoom(id));
		},
		Duration::from_millis(delay_ms),
	);
}

/// Graph page. Owns the session: the store, the camera state machine and
/// the highlight, and hands them to the canvas as signals.
#[component]
pub fn Home() -> impl IntoView {
	let config = StoredValue::new(use_context::<AppConfig>().unwrap_or_default());
	let store = RwSignal::new(IncrementalGraphStore::default());
	let snapshot = Signal::derive(move || store.with(IncrementalGraphStore::snapshot));
	let highlight = RwSignal::new(HighlightState::default());
	let viewport = StoredValue::new(config.with_value(AppConfig::viewport_controller));
	let sequencer = StoredValue::new(SearchSequencer::default());
	let searching = RwSignal::new(false);
	let notice = RwSignal::new(None::<String>);
	let modal = RwSignal::new(None::<ModalContent>);

	let on_search = Callback::new(move |input: String| {
		let config = config.get_value();
		let Some(query) = prepare_query(&input, config.min_query_len) else {
			debug!("ignoring short query {input:?}");
			return;
		};
		let Some(ticket) = sequencer.try_update_value(|s| s.begin(query)) else {
			return;
		};
		searching.set(true);
		notice.set(None);

		spawn_local(async move {
			let client = ApiClient::new(config.clone());
			let result = client.search_entity(&ticket.term).await;
			if sequencer.try_with_value(|s| s.is_current(&ticket)) != Some(true) {
				return;
			}
			let _ = searching.try_set(false);

			let record = result.and_then(|r| EntityRecord::try_from(&r).map_err(ApiError::from));
			match record {
				Ok(record) => {
					let Some(outcome) = store.try_update(|s| s.add_entity(record)) else {
						return;
					};
					if let AddResult::AlreadyExists(id) = &outcome {
						debug!("{id} already in the graph, refocusing");
					}
					schedule_zoom(viewport, outcome.id().to_string(), config.zoom_delay_ms);
				}
				Err(err) => {
					warn!("search for {:?} failed: {err}", ticket.term);
					let _ = notice.try_set(Some(err.user_message()));
				}
			}
		});
	});

	let on_node_click = Callback::new(move |id: String| {
		if let Some(entity) = store.with_untracked(|s| s.node(&id).cloned()) {
			modal.set(Some(ModalContent::Entity(entity)));
		}
	});
	let on_edge_click = Callback::new(move |key: EdgeKey| modal.set(Some(ModalContent::Edge(key))));
	let on_event_select = Callback::new(move |event: EventRecord| {
		modal.set(Some(ModalContent::Event(event)))
	});
	let on_close = Callback::new(move |_: ()| {
		modal.set(None);
		highlight.update(HighlightState::clear);
	});

	let dialog = move || {
		modal.get().map(|content| match content {
			ModalContent::Entity(entity) => view! { <EntityModal entity=entity on_close=on_close /> }.into_any(),
			ModalContent::Edge(key) => {
				let (relationship, source_label, target_label) = store.with_untracked(|s| {
					(
						s.edge(&key.source, &key.target).cloned(),
						s.label_for(&key.source),
						s.label_for(&key.target),
					)
				});
				view! {
					<EdgeModal
						edge=key
						relationship=relationship
						source_label=source_label
						target_label=target_label
						on_close=on_close
					/>
				}
					.into_any()
			}
			ModalContent::Event(event) => view! { <EventModal event=event on_close=on_close /> }.into_any(),
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas
					data=snapshot
					highlight=highlight
					viewport=viewport
					on_node_click=on_node_click
					on_edge_click=on_edge_click
					fullscreen=true
				/>
				<div class="graph-overlay">
					<h1>"AIscope"</h1>
					<p class="subtitle">
						{move || {
							snapshot
								.with(|s| format!("{} entities, {} relationships", s.nodes.len(), s.edges.len()))
						}}
					</p>
					<SearchBox
						on_search=on_search
						busy=searching
						notice=notice
						on_dismiss=Callback::new(move |_: ()| notice.set(None))
					/>
				</div>
				<WeeklySidebar on_select=on_event_select />
				{dialog}
			</div>
		</ErrorBoundary>
	}
}
