use leptos::prelude::*;

use crate::components::living_network::{LivingNetwork, OverlayConfig};

/// Full-viewport overlay. Press Escape to clear highlights.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<main class="fullscreen-network">
			<LivingNetwork config=OverlayConfig::default() />
			<p class="hint">"Hover the photos and nodes. Escape clears them."</p>
		</main>
	}
}
