/// Popup UI for CloudWatch Log Opener

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;

use crate::deep_link::{
    api_gateway_log_name, cloudwatch_info_from_url, is_cloudwatch_url, lambda_log_name,
    url_from_cloudwatch_info,
};
use crate::log_data::{CloudWatchInfo, CloudWatchQuery, CloudwatchLogItem};
use crate::storage::{StoredItems, STORAGE_KEY};
use crate::suggestions::{suggestion_lines, suggestion_value, suggestions};

const DEFAULT_REGION: &str = "ap-southeast-1";

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTabUrl() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn openTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;
}

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Error(String),
}

/// Resolve what the user asked to open: a picked suggestion wins over the
/// typed text, and gateway items build their execution-log group instead of
/// a lambda group.
fn log_name_for(selected: Option<&CloudwatchLogItem>, typed: &str) -> Option<String> {
    match selected {
        Some(CloudwatchLogItem::Lambda { lambda, .. })
        | Some(CloudwatchLogItem::Api { lambda, .. }) => Some(lambda_log_name(lambda)),
        Some(CloudwatchLogItem::Gateway {
            gateway_id, stage, ..
        }) => Some(api_gateway_log_name(gateway_id, stage)),
        None => {
            let typed = typed.trim();
            (!typed.is_empty()).then(|| lambda_log_name(typed))
        }
    }
}

/// The time range carried over from the current tab into a new link.
// TODO: carry filterPattern too once there is a setting to opt out
fn carried_query(tab_info: Option<&CloudWatchInfo>) -> Option<CloudWatchQuery> {
    tab_info
        .and_then(|info| info.query.as_ref())
        .map(|query| CloudWatchQuery {
            start: query.start,
            end: query.end,
            filter_pattern: None,
        })
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Idle);
    let tab_info = use_state(|| None::<CloudWatchInfo>);
    let items = use_state(Vec::<CloudwatchLogItem>::new);
    let value = use_state(String::new);
    let selected = use_state(|| None::<CloudwatchLogItem>);
    let matches = use_state(Vec::<CloudwatchLogItem>::new);

    // Read the active tab and the stored item list on mount
    {
        let state = state.clone();
        let tab_info = tab_info.clone();
        let items = items.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_stored_items().await {
                    Ok(stored) => items.set(stored.items),
                    Err(e) => {
                        log::error!("{e}");
                        state.set(AppState::Error(e));
                    }
                }

                tab_info.set(active_tab_info().await);
            });

            focus_input();
            || ()
        });
    }

    let on_input = {
        let items = items.clone();
        let value = value.clone();
        let selected = selected.clone();
        let matches = matches.clone();

        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let typed = input.value();

            matches.set(
                suggestions(&items, &typed)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>(),
            );
            selected.set(None);
            value.set(typed);
        })
    };

    let on_pick = {
        let value = value.clone();
        let selected = selected.clone();
        let matches = matches.clone();

        move |item: CloudwatchLogItem| {
            let value = value.clone();
            let selected = selected.clone();
            let matches = matches.clone();

            Callback::from(move |_| {
                value.set(suggestion_value(&item).to_string());
                selected.set(Some(item.clone()));
                matches.set(Vec::new());
            })
        }
    };

    let on_open = {
        let state = state.clone();
        let tab_info = tab_info.clone();
        let value = value.clone();
        let selected = selected.clone();

        move |with_filter: bool| {
            let state = state.clone();
            let tab_info = tab_info.clone();
            let value = value.clone();
            let selected = selected.clone();

            Callback::from(move |_| {
                let Some(log_name) = log_name_for(selected.as_ref(), &value) else {
                    return;
                };

                let region = tab_info
                    .as_ref()
                    .map(|info| info.region.clone())
                    .filter(|region| !region.is_empty())
                    .unwrap_or_else(|| DEFAULT_REGION.to_string());

                let mut info = CloudWatchInfo::new(region, log_name);
                if with_filter {
                    info.query = carried_query(tab_info.as_ref());
                }

                let url = url_from_cloudwatch_info(&info);
                let state = state.clone();

                state.set(AppState::Loading("Opening log view...".to_string()));
                spawn_local(async move {
                    match openTab(&url).await {
                        Ok(_) => state.set(AppState::Idle),
                        Err(e) => state.set(AppState::Error(format!("Failed to open tab: {e:?}"))),
                    }
                });
            })
        }
    };

    let has_carried_filter = tab_info
        .as_ref()
        .and_then(|info| info.query.as_ref())
        .is_some();
    let is_busy = !matches!(*state, AppState::Idle);

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"CloudWatch Log Opener"}</h1>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <div class="flex-column-gap">
                <label for="lambda_function_name" class="input-label">
                    {"Lambda Function name"}
                </label>
                <input
                    type="text"
                    id="lambda_function_name"
                    class="function-input"
                    placeholder="function-name"
                    autocomplete="off"
                    value={(*value).clone()}
                    oninput={on_input}
                />

                // Suggestion dropdown
                if !matches.is_empty() {
                    <div class="suggestion-box">
                        {for matches.iter().map(|item| html! {
                            <div class="suggestion-item" onclick={on_pick(item.clone())}>
                                {for suggestion_lines(item).into_iter().map(|(kind, label)| html! {
                                    <p class="suggestion-line">
                                        <b>{kind}{": "}</b>{label}
                                    </p>
                                })}
                            </div>
                        })}
                    </div>
                }

                <Button onclick={on_open(false)} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"Open"}
                </Button>
                if has_carried_filter {
                    <Button onclick={on_open(true)} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                        {"Open With Filter"}
                    </Button>
                }
            </div>

            <p class="footer-popup">
                {"CloudWatch Log Opener v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

async fn load_stored_items() -> Result<StoredItems, String> {
    let stored_js = getStorage(STORAGE_KEY)
        .await
        .map_err(|e| format!("Failed to get storage: {e:?}"))?;

    if stored_js.is_null() || stored_js.is_undefined() {
        // First run: seed the starter list so suggestions are not empty
        let stored = StoredItems::with_defaults();
        save_stored_items(&stored).await?;
        return Ok(stored);
    }

    serde_wasm_bindgen::from_value(stored_js).map_err(|e| format!("Failed to parse storage: {e:?}"))
}

async fn save_stored_items(stored: &StoredItems) -> Result<(), String> {
    let stored_js = serde_wasm_bindgen::to_value(stored)
        .map_err(|e| format!("Failed to serialize storage: {e:?}"))?;

    setStorage(STORAGE_KEY, stored_js)
        .await
        .map_err(|e| format!("Failed to save storage: {e:?}"))
}

async fn active_tab_info() -> Option<CloudWatchInfo> {
    match getActiveTabUrl().await {
        Ok(url_js) => url_js
            .as_string()
            .filter(|url| is_cloudwatch_url(url))
            .map(|url| cloudwatch_info_from_url(&url)),
        Err(e) => {
            log::warn!("Failed to read active tab: {e:?}");
            None
        }
    }
}

fn focus_input() {
    let input = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("lambda_function_name"));

    if let Some(input) = input {
        if let Ok(input) = input.dyn_into::<web_sys::HtmlElement>() {
            let _ = input.focus();
        }
    }
}
