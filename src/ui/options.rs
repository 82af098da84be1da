/// Options page: import and maintenance commands from an uploaded JSON file

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;

use crate::command::{apply, parse_command_file, preview, CommandInfo, CommandPreview};
use crate::log_data::CloudwatchLogItem;
use crate::storage::{StoredItems, STORAGE_KEY};

// Import JS bridge functions
#[wasm_bindgen(module = "/options.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn readSelectedFile(input_id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;
}

#[derive(Clone, PartialEq)]
enum CommandState {
    Empty,
    Loaded {
        command: CommandInfo,
        data: Vec<CloudwatchLogItem>,
        preview: CommandPreview,
    },
    Done(String),
    Failed(String),
}

#[function_component(Options)]
pub fn options() -> Html {
    let command_state = use_state(|| CommandState::Empty);

    let on_file_change = {
        let command_state = command_state.clone();

        Callback::from(move |_: Event| {
            let command_state = command_state.clone();

            spawn_local(async move {
                let content = match readSelectedFile("file_input").await {
                    Ok(content_js) => content_js.as_string().unwrap_or_default(),
                    Err(e) => {
                        command_state.set(CommandState::Failed(format!("Failed to read file: {e:?}")));
                        return;
                    }
                };

                match parse_command_file(&content) {
                    Ok((command, data)) => {
                        let preview = preview(&command, data.len());
                        command_state.set(CommandState::Loaded {
                            command,
                            data,
                            preview,
                        });
                    }
                    Err(e) => {
                        log::error!("malformed command file: {e}");
                        command_state.set(CommandState::Failed("unknown command".to_string()));
                    }
                }
            });
        })
    };

    let on_process = {
        let command_state = command_state.clone();

        Callback::from(move |_| {
            let CommandState::Loaded { command, data, .. } = (*command_state).clone() else {
                return;
            };
            let command_state = command_state.clone();

            spawn_local(async move {
                match process_command(&command, data).await {
                    Ok(true) => command_state.set(CommandState::Done("Success".to_string())),
                    Ok(false) => command_state.set(CommandState::Failed("Failed".to_string())),
                    Err(e) => {
                        log::error!("{e}");
                        command_state.set(CommandState::Failed(e));
                    }
                }
            });
        })
    };

    html! {
        <div class="options-page">
            <div class="options-upload">
                <label for="file_input" class="input-label">
                    {"Upload command file"}
                </label>
                <input
                    type="file"
                    id="file_input"
                    accept=".json"
                    onchange={on_file_change}
                />
            </div>

            {match &*command_state {
                CommandState::Empty => html! {},
                CommandState::Loaded { preview, .. } => html! {
                    <div class="command-preview">
                        <b class="command-header">{preview.header.to_uppercase()}</b>
                        <span class="command-description">{preview.description.clone()}</span>
                        if preview.processable {
                            <Button onclick={on_process} variant={ButtonVariant::Primary}>
                                {"PROCESS"}
                            </Button>
                        }
                    </div>
                },
                CommandState::Done(msg) => html! {
                    <Alert r#type={AlertType::Success} title={msg.clone()} inline={true}>
                    </Alert>
                },
                CommandState::Failed(msg) => html! {
                    <Alert r#type={AlertType::Danger} title={msg.clone()} inline={true}>
                    </Alert>
                },
            }}
        </div>
    }
}

// Helper functions

/// Load the stored list, run the command, and persist the result. Nothing is
/// written unless the command actually applied.
async fn process_command(command: &CommandInfo, data: Vec<CloudwatchLogItem>) -> Result<bool, String> {
    let mut stored = load_stored_items().await?;

    if !apply(command, data, &mut stored) {
        return Ok(false);
    }

    save_stored_items(&stored).await?;
    Ok(true)
}

async fn load_stored_items() -> Result<StoredItems, String> {
    let stored_js = getStorage(STORAGE_KEY)
        .await
        .map_err(|e| format!("Failed to get storage: {e:?}"))?;

    if stored_js.is_null() || stored_js.is_undefined() {
        return Ok(StoredItems::new());
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
