//! Hosted application content mounted inside window surfaces.
//!
//! Content is resolved from the window's [`AppId`], which the registry derives from the title once
//! at open time. Apps talk to the rest of the desktop only through the [`AppMountContext`].

use leptos::*;

use crate::event_bus::{DesktopEvent, EventBus};
use crate::model::{AppId, OpenWindowRequest, WindowId};

/// Everything a hosted app receives when its window mounts.
#[derive(Clone)]
pub struct AppMountContext {
    pub window_id: WindowId,
    pub title: String,
    /// Closes the hosting window.
    pub on_close: Callback<()>,
    pub bus: EventBus,
}

pub type AppFactory = fn(AppMountContext) -> View;

pub fn app_factory(app_id: AppId) -> AppFactory {
    match app_id {
        AppId::MyDocuments => mount_documents_folder,
        AppId::Notepad => mount_notepad,
        AppId::InternetExplorer => mount_internet_explorer,
        AppId::Calculator => mount_calculator,
        AppId::Minesweeper => mount_minesweeper,
        AppId::CommandPrompt => mount_command_prompt,
        AppId::MyPictures | AppId::MyVideos | AppId::MyBriefcase | AppId::Generic => {
            mount_generic_content
        }
    }
}

pub fn mount_app(app_id: AppId, context: AppMountContext) -> View {
    app_factory(app_id)(context)
}

const DOCUMENT_FILES: [(&str, &str); 3] = [
    ("Report.doc", "/images/doc-icon.png"),
    ("Resume.doc", "/images/doc-icon.png"),
    ("Manual.pdf", "/images/pdf-icon.png"),
];

fn mount_documents_folder(_: AppMountContext) -> View {
    view! {
        <div class="app app-folder">
            <ul class="app-folder-grid">
                {DOCUMENT_FILES
                    .iter()
                    .map(|&(name, icon)| {
                        view! {
                            <li class="app-folder-item">
                                <img src=icon alt="" width="48" height="48" />
                                <span>{name}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
    .into_view()
}

fn mount_generic_content(context: AppMountContext) -> View {
    view! {
        <div class="app app-generic">
            <p>{format!("Content for {}", context.title)}</p>
        </div>
    }
    .into_view()
}

fn placeholder_panel(context: AppMountContext, blurb: &'static str, body: View) -> View {
    let on_close = context.on_close;
    view! {
        <div class="app app-placeholder">
            <div class="app-toolbar" role="group" aria-label=format!("{} controls", context.title)>
                <button type="button" class="app-action" on:click=move |_| on_close.call(())>
                    "Close"
                </button>
            </div>
            {body}
            <div class="app-statusbar">
                <span>{blurb}</span>
            </div>
        </div>
    }
    .into_view()
}

fn mount_notepad(context: AppMountContext) -> View {
    let text = create_rw_signal(String::new());
    let body = view! {
        <textarea
            class="app-notepad-text"
            spellcheck="false"
            prop:value=move || text.get()
            on:input=move |ev| text.set(event_target_value(&ev))
        ></textarea>
    }
    .into_view();
    placeholder_panel(context, "Untitled - Notepad", body)
}

fn mount_internet_explorer(context: AppMountContext) -> View {
    let body = view! {
        <div class="app-browser">
            <label class="app-browser-address">
                "Address "
                <input type="text" readonly=true value="http://www.msn.com/" />
            </label>
            <p>"The page cannot be displayed."</p>
        </div>
    }
    .into_view();
    placeholder_panel(context, "Working offline", body)
}

fn mount_calculator(context: AppMountContext) -> View {
    let body = view! {
        <div class="app-calculator">
            <output class="app-calculator-display">"0."</output>
        </div>
    }
    .into_view();
    placeholder_panel(context, "Standard", body)
}

fn mount_minesweeper(context: AppMountContext) -> View {
    let body = view! {
        <div class="app-minesweeper">
            <p>"Beginner: 9 x 9, 10 mines"</p>
        </div>
    }
    .into_view();
    placeholder_panel(context, "Game", body)
}

/// A parsed command prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    Blank,
    /// Open a window with this title.
    Launch(&'static str),
    Exit,
    Clear,
    Unrecognized(String),
}

/// Interprets the first word of `line`, case-insensitively.
pub fn interpret_prompt_line(line: &str) -> PromptCommand {
    let Some(command) = line.split_whitespace().next() else {
        return PromptCommand::Blank;
    };
    match command.to_ascii_lowercase().as_str() {
        "calc" => PromptCommand::Launch("Calculator"),
        "notepad" => PromptCommand::Launch("Notepad"),
        "exit" => PromptCommand::Exit,
        "cls" => PromptCommand::Clear,
        other => PromptCommand::Unrecognized(other.to_string()),
    }
}

pub fn unrecognized_message(command: &str) -> String {
    format!(
        "'{command}' is not recognized as an internal or external command, operable program or batch file."
    )
}

const PROMPT: &str = "C:\\Windows\\System32>";

#[derive(Debug, Clone, PartialEq, Eq)]
struct PromptEntry {
    input: String,
    output: String,
}

fn mount_command_prompt(context: AppMountContext) -> View {
    view! { <CommandPromptApp context=context /> }.into_view()
}

#[component]
fn CommandPromptApp(context: AppMountContext) -> impl IntoView {
    let AppMountContext { bus, on_close, .. } = context;
    let entries = create_rw_signal(Vec::<PromptEntry>::new());
    let input = create_rw_signal(String::new());

    let record = move |input: String, output: String| {
        entries.update(|entries| entries.push(PromptEntry { input, output }));
    };

    let run_line = move |line: String| match interpret_prompt_line(&line) {
        PromptCommand::Blank => record(line, String::new()),
        PromptCommand::Launch(title) => {
            record(line, format!("Starting {title}..."));
            bus.publish(DesktopEvent::OpenWindow(OpenWindowRequest::new(title)));
        }
        PromptCommand::Exit => on_close.call(()),
        PromptCommand::Clear => entries.set(Vec::new()),
        PromptCommand::Unrecognized(command) => record(line, unrecognized_message(&command)),
    };

    view! {
        <div class="app app-command-prompt">
            <pre class="app-command-prompt-banner">
                "Microsoft Windows XP [Version 5.1.2600]\n(C) Copyright 1985-2001 Microsoft Corp."
            </pre>
            {move || {
                entries
                    .get()
                    .into_iter()
                    .map(|PromptEntry { input, output }| {
                        let output = (!output.is_empty()).then(|| view! { <div>{output}</div> });
                        view! {
                            <div class="app-command-prompt-entry">
                                <div>{format!("{PROMPT}{input}")}</div>
                                {output}
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <label class="app-command-prompt-input">
                <span>{PROMPT}</span>
                <input
                    type="text"
                    autofocus=true
                    spellcheck="false"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            let line = input.get_untracked();
                            input.set(String::new());
                            run_line(line);
                        }
                    }
                />
            </label>
        </div>
    }
}
