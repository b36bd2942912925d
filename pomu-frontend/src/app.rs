/* This file is part of the pomu project
*
*  Copyright (C) 2024-2025 pomu contributors
*
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
use std::rc::Rc;

use log::{error, LevelFilter};
use pomu_api::unsync::VideoInfo;
use pomu_frontend::backend::HttpBackend;
use pomu_frontend::contexts::{use_app_context, AppContext};
use pomu_frontend::hooks::{use_async_suspension, use_store};
use pomu_frontend::logging;
use pomu_frontend::navigation::Page;
use pomu_frontend::platform::{current_origin, current_path, WebPlatform};
use pomu_frontend::requests::find_api_error;
use pomu_frontend::settings::Settings;
use pomu_frontend::state::AppState;
use pomu_frontend::utils::{parse_timestamp, render_datetime, render_file_size, RcEq};
use pomu_frontend::video::VideoMap;
use reqwest::Url;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::window;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct RootProps {
    context: AppContext,
}

#[function_component]
fn Root(props: &RootProps) -> Html {
    html! {
        <ContextProvider<AppContext> context={props.context.clone()}>
            <Header />
            <div id="content">
                <PageContent />
            </div>
            <Notifications />
        </ContextProvider<AppContext>>
    }
}

#[function_component]
fn Header() -> Html {
    let context = use_app_context();
    let page = use_store(context.navigation.store());

    let tab = |target: Page, label: &'static str| {
        let navigation = context.navigation.clone();
        let onclick = Callback::from(move |_: MouseEvent| navigation.navigate(target));
        let class = if *page == target { "selected" } else { "" };
        html! {
            <button {class} {onclick}>{label}</button>
        }
    };

    html! {
        <div class="header">
            <h2>{"pomu"}</h2>
            <nav>
                {tab(Page::Video, "Video")}
                {tab(Page::Queue, "Queue")}
                {tab(Page::History, "History")}
            </nav>
            <Suspense fallback={html! {<span class="user">{"Loading..."}</span>}}>
                <UserBadge />
            </Suspense>
        </div>
    }
}

#[function_component]
fn UserBadge() -> HtmlResult {
    let context = use_app_context();
    let user = use_async_suspension(|context: AppContext| async move {
        context.session.user().await
    }, context)?;

    Ok(match *user {
        Ok(ref user) => html! {
            <span class="user">
                <img src={user.avatar.to_string()} alt="" />
                {user.name.to_string()}
            </span>
        },
        Err(ref err) if find_api_error(err).is_some_and(|e| e.is_unauthorized()) => html! {
            <a class="user" href="/login">{"Log in"}</a>
        },
        Err(..) => html! {
            <span class="user error">{"Failed to load the user"}</span>
        },
    })
}

#[function_component]
fn PageContent() -> Html {
    let context = use_app_context();
    let page = use_store(context.navigation.store());

    use_effect_with(*page, |page| {
        if let Some(document) = window().and_then(|w| w.document()) {
            document.set_title(page.title());
        }
    });

    match *page {
        Page::Video => html! {<VideoPage />},
        Page::Queue => html! {<QueuePage />},
        Page::History => html! {<HistoryPage />},
    }
}

#[function_component]
fn VideoPage() -> Html {
    let context = use_app_context();
    let input = use_store(&context.videos.input);
    match *input {
        None => html! {
            <p class="empty">{"Paste a link to a stream to archive it."}</p>
        },
        Some(ref info) => {
            let context = context.clone();
            let discard = Callback::from(move |_: MouseEvent| context.videos.set_input(None));
            html! {
                <div class="video-input">
                    <img src={info.thumbnail_url.to_string()} alt="" />
                    <h3>{info.title.to_string()}</h3>
                    <span>{info.uploader.to_string()}</span>
                    <button onclick={discard}>{"Discard"}</button>
                </div>
            }
        },
    }
}

#[function_component]
fn QueuePage() -> Html {
    let context = use_app_context();
    let queue = use_store(&context.videos.queue);
    render_video_list(&queue, "Nothing is queued right now.")
}

#[function_component]
fn HistoryPage() -> Html {
    let context = use_app_context();
    let history = use_store(&context.videos.history);
    render_video_list(&history, "No streams have been archived yet.")
}

fn render_video_list(videos: &VideoMap, empty: &'static str) -> Html {
    if videos.is_empty() {
        return html! {<p class="empty">{empty}</p>};
    }
    html! {
        <ul class="videos">
            {for videos.values().map(render_video)}
        </ul>
    }
}

fn optional_span(class: &'static str, value: Option<String>) -> Html {
    match value {
        Some(value) => html! {<span {class}>{value}</span>},
        None => html! {},
    }
}

fn render_video(video: &VideoInfo) -> Html {
    let title = video.title.as_deref().unwrap_or(&video.id).to_owned();
    let scheduled = video.scheduled_start.as_deref().and_then(parse_timestamp).map(render_datetime);
    let size = video.file_size().map(render_file_size);
    let class = if video.finished { "video finished" } else { "video pending" };
    html! {
        <li key={video.id.to_string()} {class}>
            <span class="title">{title}</span>
            {optional_span("channel", video.channel_name.as_deref().map(str::to_owned))}
            {optional_span("scheduled", scheduled)}
            {optional_span("size", size)}
            {optional_span("submitters", (!video.submitters.is_empty()).then(|| video.submitters.join(", ")))}
            if let Some(url) = video.download_url.as_deref() {
                <a class="download" href={url.to_owned()}>{"Download"}</a>
            }
        </li>
    }
}

#[function_component]
fn Notifications() -> Html {
    let context = use_app_context();
    let notifications = use_store(context.notifications.store());

    html! {
        <div class="notifications">
            {for notifications.iter().map(|(id, notification)| {
                let id = *id;
                let store = context.notifications.clone();
                let onclick = Callback::from(move |_: MouseEvent| store.clear(id));
                let kind: &'static str = notification.kind.into();
                html! {
                    <div key={id.to_string()} class={classes!("notification", kind)} {onclick}>
                        <b>{notification.title.to_string()}</b>
                        <p>{notification.description.to_string()}</p>
                    </div>
                }
            })}
        </div>
    }
}

fn api_base_url(settings: &Settings) -> Option<Url> {
    let base = match settings.api_base_url {
        Some(ref url) => url.to_string(),
        None => current_origin()?,
    };
    Url::parse(&base)
        .map_err(|err| error!("Invalid API base URL '{base}': {err}"))
        .ok()
}

fn stop_on_pagehide(context: AppContext) {
    let Some(window) = window() else {
        return;
    };
    let listener = Closure::<dyn Fn()>::new(move || context.shutdown());
    if let Err(err) = window.add_event_listener_with_callback("pagehide", listener.as_ref().unchecked_ref()) {
        error!("Failed to register the pagehide listener: {err:?}");
    }
    // needed for as long as the page lives
    listener.forget();
}

fn main() {
    if logging::init(LevelFilter::Debug).is_err() {
        gloo_console::warn!("A logger was already installed");
    }

    let settings = Settings::load();
    let Some(base) = api_base_url(&settings) else {
        error!("Could not determine where the API lives, not starting");
        return;
    };
    let path = current_path().unwrap_or_default();

    let context: AppContext = RcEq::new(AppState::start(
        Rc::new(WebPlatform),
        Rc::new(HttpBackend::new(base)),
        &settings,
        &path,
    ));
    stop_on_pagehide(context.clone());

    yew::Renderer::<Root>::with_props(RootProps { context }).render();
}
