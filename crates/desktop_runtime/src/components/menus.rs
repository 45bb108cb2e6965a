use super::*;

const USER_AVATAR_ICON: &str = "/images/user-avatar.png";
const USER_NAME: &str = "User";

/// Publishes an open request for `app` when it is launchable, then closes the menu either way.
fn launch_from_menu(runtime: DesktopRuntimeContext, app: &AppEntry) {
    runtime.dispatch_action(DesktopAction::CloseStartMenu);
    if app.launchable {
        runtime.publish(DesktopEvent::OpenWindow(open_request_for(app)));
    } else {
        logging::log!("`{}` has no window to open", app.title);
    }
}

#[component]
fn StartMenuItem(runtime: DesktopRuntimeContext, app: AppEntry) -> impl IntoView {
    let class = if app.launchable {
        "start-menu-item"
    } else {
        "start-menu-item unavailable"
    };
    let icon_ref = app.icon_ref.clone();
    let title = app.title.clone();

    view! {
        <li>
            <button
                type="button"
                role="menuitem"
                class=class
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    launch_from_menu(runtime, &app);
                }
            >
                <img src=icon_ref alt="" width="24" height="24" />
                <span>{title}</span>
            </button>
        </li>
    }
}

fn section_items(runtime: DesktopRuntimeContext, section: LauncherSection) -> View {
    runtime
        .config
        .with_value(|config| config.launcher_entries(section).cloned().collect::<Vec<_>>())
        .into_iter()
        .map(|app| view! { <StartMenuItem runtime app /> })
        .collect_view()
}

#[component]
fn StartMenuSection(runtime: DesktopRuntimeContext, section: LauncherSection) -> impl IntoView {
    let heading = section
        .heading()
        .map(|heading| view! { <li class="start-menu-heading">{heading}</li> });

    view! {
        <ul class="start-menu-section" role="group">
            {heading}
            {section_items(runtime, section)}
        </ul>
    }
}

#[component]
pub(super) fn StartMenu(runtime: DesktopRuntimeContext) -> impl IntoView {
    let state = runtime.state;

    view! {
        <Show when=move || state.with(|desktop| desktop.start_menu_open) fallback=|| ()>
            <div
                id="desktop-start-menu"
                class="start-menu"
                role="menu"
                aria-label="Start menu"
                on:mousedown=move |ev| ev.stop_propagation()
            >
                <header class="start-menu-user">
                    <img src=USER_AVATAR_ICON alt="" width="48" height="48" />
                    <span>{USER_NAME}</span>
                </header>

                <div class="start-menu-columns">
                    <div class="start-menu-left">
                        <ul class="start-menu-section start-menu-pinned" role="group">
                            {section_items(runtime, LauncherSection::Pinned)}
                        </ul>
                        <hr class="start-menu-separator" />
                        <ul class="start-menu-section start-menu-programs" role="group">
                            {section_items(runtime, LauncherSection::Programs)}
                        </ul>
                    </div>
                    <div class="start-menu-right">
                        <StartMenuSection runtime section=LauncherSection::Places />
                        <StartMenuSection runtime section=LauncherSection::Computer />
                        <StartMenuSection runtime section=LauncherSection::System />
                    </div>
                </div>

                <footer class="start-menu-footer">
                    <button
                        type="button"
                        role="menuitem"
                        class="start-menu-log-off"
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::CloseStartMenu);
                        }
                    >
                        "Log Off"
                    </button>
                    <button
                        type="button"
                        role="menuitem"
                        class="start-menu-turn-off"
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::CloseStartMenu);
                            runtime.publish(DesktopEvent::Shutdown);
                        }
                    >
                        "Turn Off Computer"
                    </button>
                </footer>
            </div>
        </Show>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContextMenuItem {
    ArrangeIcons,
    Refresh,
    OpenNotepad,
    OpenInternetExplorer,
    ChangeBackground,
    Properties,
}

impl ContextMenuItem {
    const ALL: [Self; 6] = [
        Self::ArrangeIcons,
        Self::Refresh,
        Self::OpenNotepad,
        Self::OpenInternetExplorer,
        Self::ChangeBackground,
        Self::Properties,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::ArrangeIcons => "Arrange Icons",
            Self::Refresh => "Refresh",
            Self::OpenNotepad => "Open Notepad",
            Self::OpenInternetExplorer => "Open Internet Explorer",
            Self::ChangeBackground => "Change Background",
            Self::Properties => "Properties",
        }
    }

    /// Title of the window the entry opens. The other entries only log.
    fn opens(self) -> Option<&'static str> {
        match self {
            Self::OpenNotepad => Some("Notepad"),
            Self::OpenInternetExplorer => Some("Internet Explorer"),
            Self::ArrangeIcons | Self::Refresh | Self::ChangeBackground | Self::Properties => None,
        }
    }
}

fn run_context_menu_item(runtime: DesktopRuntimeContext, item: ContextMenuItem) {
    match item.opens() {
        Some(title) => {
            let mut request = OpenWindowRequest::new(title);
            if let Some(icon) = runtime
                .config
                .with_value(|config| config.icon_for(title).map(str::to_string))
            {
                request = request.with_icon(icon);
            }
            runtime.publish(DesktopEvent::OpenWindow(request));
        }
        None => logging::log!("desktop context menu: {}", item.label()),
    }
}

#[component]
pub(super) fn DesktopContextMenu(
    runtime: DesktopRuntimeContext,
    desktop_context_menu: RwSignal<Option<DesktopContextMenuState>>,
) -> impl IntoView {
    move || {
        desktop_context_menu.get().map(|menu| {
            let menu_style = format!("left:{}px;top:{}px;", menu.x, menu.y);
            view! {
                <ul
                    id="desktop-context-menu"
                    class="desktop-context-menu"
                    role="menu"
                    aria-label="Desktop context menu"
                    style=menu_style
                    on:mousedown=move |ev| ev.stop_propagation()
                >
                    {ContextMenuItem::ALL
                        .into_iter()
                        .map(|item| {
                            view! {
                                <li>
                                    <button
                                        type="button"
                                        role="menuitem"
                                        class="desktop-context-menu-item"
                                        on:click=move |ev| {
                                            stop_mouse_event(&ev);
                                            desktop_context_menu.set(None);
                                            run_context_menu_item(runtime, item);
                                        }
                                    >
                                        {item.label()}
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn context_menu_only_opens_catalog_windows() {
        let opened = ContextMenuItem::ALL
            .into_iter()
            .filter_map(ContextMenuItem::opens)
            .collect::<Vec<_>>();
        assert_eq!(opened, vec!["Notepad", "Internet Explorer"]);
    }

    #[test]
    fn context_menu_lists_every_desktop_entry_in_order() {
        let labels = ContextMenuItem::ALL.map(ContextMenuItem::label);
        assert_eq!(
            labels,
            [
                "Arrange Icons",
                "Refresh",
                "Open Notepad",
                "Open Internet Explorer",
                "Change Background",
                "Properties",
            ]
        );
        assert_eq!(ContextMenuItem::ChangeBackground.opens(), None);
        assert_eq!(ContextMenuItem::Properties.opens(), None);
    }
}
