use serde::{Deserialize, Serialize};

/// Icon used when neither the request nor the app catalog supplies one.
pub const DEFAULT_ICON_REF: &str = "/images/f8736e34-c644-4ce0-ad98-f0b518a54160.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl WindowId {
    /// DOM id of the window surface element, used to move keyboard focus.
    pub fn dom_id(self) -> String {
        format!("desktop-window-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppId {
    MyDocuments,
    MyPictures,
    MyVideos,
    MyBriefcase,
    Notepad,
    InternetExplorer,
    Calculator,
    Minesweeper,
    CommandPrompt,
    Generic,
}

impl AppId {
    /// Resolves the content kind for a window title. Unknown titles fall back to [`AppId::Generic`].
    pub fn from_title(title: &str) -> Self {
        match title {
            "My Documents" => Self::MyDocuments,
            "My Pictures" => Self::MyPictures,
            "My Videos" => Self::MyVideos,
            "My Briefcase" => Self::MyBriefcase,
            "Notepad" => Self::Notepad,
            "Internet Explorer" => Self::InternetExplorer,
            "Calculator" => Self::Calculator,
            "Minesweeper" => Self::Minesweeper,
            "Command Prompt" => Self::CommandPrompt,
            _ => Self::Generic,
        }
    }

    pub fn title(self) -> Option<&'static str> {
        match self {
            Self::MyDocuments => Some("My Documents"),
            Self::MyPictures => Some("My Pictures"),
            Self::MyVideos => Some("My Videos"),
            Self::MyBriefcase => Some("My Briefcase"),
            Self::Notepad => Some("Notepad"),
            Self::InternetExplorer => Some("Internet Explorer"),
            Self::Calculator => Some("Calculator"),
            Self::Minesweeper => Some("Minesweeper"),
            Self::CommandPrompt => Some("Command Prompt"),
            Self::Generic => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    /// Clamps both coordinates to the non-negative quadrant.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0),
            y: self.y.max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

impl WindowSize {
    pub fn clamped_min(self, min_width: i32, min_height: i32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub icon_ref: String,
    pub position: WindowPosition,
    pub size: WindowSize,
    pub is_active: bool,
    pub is_minimized: bool,
}

/// Ordered window registry. Vector order is opening order and doubles as render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopState {
    pub next_window_id: u64,
    pub windows: Vec<WindowRecord>,
    pub start_menu_open: bool,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            windows: Vec::new(),
            start_menu_open: false,
        }
    }
}

impl DesktopState {
    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.windows.iter().find(|w| w.is_active).map(|w| w.id)
    }

    /// Windows that currently have a rendered surface.
    pub fn visible_windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter().filter(|w| !w.is_minimized)
    }

    pub fn active_count(&self) -> usize {
        self.windows.iter().filter(|w| w.is_active).count()
    }
}

/// Request to open a window, as carried on the `openWindow` broadcast topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub title: String,
    #[serde(
        rename = "iconRef",
        alias = "iconUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub icon_ref: Option<String>,
}

impl OpenWindowRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon_ref: None,
        }
    }

    pub fn with_icon(mut self, icon_ref: impl Into<String>) -> Self {
        self.icon_ref = Some(icon_ref.into());
        self
    }
}
